//! Fixed-capacity cursor storage with generational handles.

use super::error::CursorError;
use crate::draw::Color;
use crate::draw::color::BLACK;
use std::fmt;

/// Number of cursor slots when no capacity is configured.
pub const DEFAULT_CAPACITY: usize = 10;

/// One turtle-graphics pen.
///
/// Fields are only mutated through [`CursorEngine`](super::CursorEngine), which
/// keeps the heading in `[0, 360)` and the thickness at 1 or more.
#[derive(Debug, Clone, PartialEq)]
pub struct Cursor {
    pub(crate) x: f64,
    pub(crate) y: f64,
    pub(crate) heading: f64,
    pub(crate) thickness: u32,
    pub(crate) color: Color,
    pub(crate) visible: bool,
    pub(crate) active: bool,
}

impl Cursor {
    fn inactive() -> Self {
        Self {
            x: 0.0,
            y: 0.0,
            heading: 0.0,
            thickness: 1,
            color: BLACK,
            visible: false,
            active: false,
        }
    }

    pub fn position(&self) -> (f64, f64) {
        (self.x, self.y)
    }

    /// Heading in degrees, always in `[0, 360)`.
    pub fn heading(&self) -> f64 {
        self.heading
    }

    pub fn thickness(&self) -> u32 {
        self.thickness
    }

    pub fn color(&self) -> Color {
        self.color
    }

    pub fn is_visible(&self) -> bool {
        self.visible
    }

    pub fn is_active(&self) -> bool {
        self.active
    }
}

impl fmt::Display for Cursor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "({:.2}, {:.2}) heading {:.2}° thickness {} color {}{}",
            self.x,
            self.y,
            self.heading,
            self.thickness,
            self.color,
            if self.visible { "" } else { " (hidden)" }
        )
    }
}

/// Reference to a pool slot.
///
/// The generation changes every time the slot is released, so a handle never
/// reaches a cursor created after its own was deactivated.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct CursorHandle {
    index: usize,
    generation: u32,
}

impl CursorHandle {
    /// Slot index inside the pool.
    pub fn index(&self) -> usize {
        self.index
    }
}

/// Initial attributes of newly created cursors.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CursorDefaults {
    pub color: Color,
    pub thickness: u32,
}

impl Default for CursorDefaults {
    fn default() -> Self {
        Self {
            color: BLACK,
            thickness: 1,
        }
    }
}

#[derive(Debug, Clone)]
struct Slot {
    cursor: Cursor,
    generation: u32,
}

/// Owns every cursor. Slots are claimed first-free and only released in bulk.
#[derive(Debug, Clone)]
pub struct CursorPool {
    slots: Vec<Slot>,
    defaults: CursorDefaults,
}

impl Default for CursorPool {
    fn default() -> Self {
        Self::new(DEFAULT_CAPACITY)
    }
}

impl CursorPool {
    pub fn new(capacity: usize) -> Self {
        Self::with_defaults(capacity, CursorDefaults::default())
    }

    pub fn with_defaults(capacity: usize, defaults: CursorDefaults) -> Self {
        let slots = (0..capacity)
            .map(|_| Slot {
                cursor: Cursor::inactive(),
                generation: 0,
            })
            .collect();
        Self {
            slots,
            defaults: CursorDefaults {
                thickness: defaults.thickness.max(1),
                ..defaults
            },
        }
    }

    pub fn capacity(&self) -> usize {
        self.slots.len()
    }

    pub fn active_count(&self) -> usize {
        self.slots.iter().filter(|s| s.cursor.active).count()
    }

    /// Claims the first inactive slot and initializes a cursor at `(x, y)`.
    pub fn create(&mut self, x: f64, y: f64) -> Result<CursorHandle, CursorError> {
        let defaults = self.defaults;
        let capacity = self.slots.len();
        let Some((index, slot)) = self
            .slots
            .iter_mut()
            .enumerate()
            .find(|(_, slot)| !slot.cursor.active)
        else {
            return Err(CursorError::PoolExhausted { capacity });
        };

        slot.cursor = Cursor {
            x,
            y,
            heading: 0.0,
            thickness: defaults.thickness,
            color: defaults.color,
            visible: true,
            active: true,
        };

        Ok(CursorHandle {
            index,
            generation: slot.generation,
        })
    }

    /// Returns the live cursor behind `handle`, or `None` for stale handles.
    pub fn get(&self, handle: CursorHandle) -> Option<&Cursor> {
        self.slots
            .get(handle.index)
            .filter(|slot| slot.generation == handle.generation && slot.cursor.active)
            .map(|slot| &slot.cursor)
    }

    pub(crate) fn get_mut(&mut self, handle: CursorHandle) -> Option<&mut Cursor> {
        self.slots
            .get_mut(handle.index)
            .filter(|slot| slot.generation == handle.generation && slot.cursor.active)
            .map(|slot| &mut slot.cursor)
    }

    /// Marks every cursor inactive, invalidating all outstanding handles.
    ///
    /// Returns how many cursors were live.
    pub fn deactivate_all(&mut self) -> usize {
        let mut released = 0;
        for slot in self.slots.iter_mut().filter(|s| s.cursor.active) {
            slot.cursor.active = false;
            slot.generation = slot.generation.wrapping_add(1);
            released += 1;
        }
        released
    }

    /// Iterates over live cursors in slot order.
    pub fn iter(&self) -> impl Iterator<Item = (CursorHandle, &Cursor)> {
        self.slots
            .iter()
            .enumerate()
            .filter(|(_, slot)| slot.cursor.active)
            .map(|(index, slot)| {
                (
                    CursorHandle {
                        index,
                        generation: slot.generation,
                    },
                    &slot.cursor,
                )
            })
    }
}
