//! Executes parsed scripts against a cursor engine and pixel buffer.

use super::error::ScriptError;
use super::expr::{EvalError, Expr};
use super::parser::{AssignOp, Command, CursorOp, Script, Statement};
use crate::cursor::{Cursor, CursorEngine, CursorHandle, EngineOptions};
use crate::draw::PixelBuffer;
use log::{debug, warn};
use std::collections::HashMap;

/// Upper bound on iterations of a single loop execution.
pub const MAX_ITERATIONS: usize = 1_000_000;

/// Interpreter state: the engine, the surface it draws on, cursor names and
/// variable values.
#[derive(Debug)]
pub struct Interpreter {
    engine: CursorEngine,
    canvas: PixelBuffer,
    cursors: HashMap<String, CursorHandle>,
    variables: HashMap<String, f64>,
    positions: Vec<String>,
}

impl Interpreter {
    /// Creates an interpreter with a `width`×`height` canvas painted in the
    /// engine's background color.
    pub fn new(options: EngineOptions, width: u32, height: u32) -> Self {
        let canvas = PixelBuffer::with_background(width, height, options.background);
        Self {
            engine: CursorEngine::new(options),
            canvas,
            cursors: HashMap::new(),
            variables: HashMap::new(),
            positions: Vec::new(),
        }
    }

    pub fn engine(&self) -> &CursorEngine {
        &self.engine
    }

    pub fn canvas(&self) -> &PixelBuffer {
        &self.canvas
    }

    pub fn into_canvas(self) -> PixelBuffer {
        self.canvas
    }

    /// Looks up a live cursor by script name.
    pub fn cursor(&self, name: &str) -> Option<&Cursor> {
        self.cursors
            .get(name)
            .and_then(|handle| self.engine.cursor(*handle))
    }

    /// Current value of a script variable.
    pub fn variable(&self, name: &str) -> Option<f64> {
        self.variables.get(name).copied()
    }

    /// Lines produced by `NAME.position`, in execution order.
    pub fn positions(&self) -> &[String] {
        &self.positions
    }

    /// Parses and runs `source`. Nothing runs if any line fails to parse.
    pub fn run_source(&mut self, source: &str) -> Result<(), ScriptError> {
        let script = Script::parse(source)?;
        self.run(&script)
    }

    pub fn run(&mut self, script: &Script) -> Result<(), ScriptError> {
        debug!("Running script with {} top-level statement(s)", script.len());
        self.run_block(&script.statements)
    }

    fn run_block(&mut self, statements: &[Statement]) -> Result<(), ScriptError> {
        statements
            .iter()
            .try_for_each(|statement| self.execute(statement))
    }

    /// Executes one statement, including every statement nested in it.
    pub fn execute(&mut self, statement: &Statement) -> Result<(), ScriptError> {
        let line = statement.line;
        match &statement.command {
            Command::Canvas {
                width,
                height,
                color,
            } => {
                let color = color.unwrap_or(self.engine.background());
                debug!("Line {line}: new {width}x{height} canvas in {color}");
                self.canvas = PixelBuffer::with_background(*width, *height, color);
            }
            Command::Background(color) => {
                self.engine.set_background(*color);
                self.canvas.clear(*color);
            }
            Command::Clear {
                x,
                y,
                width,
                height,
            } => {
                let [x, y, width, height] = self.values(line, [x, y, width, height])?;
                self.engine
                    .clear_area(&mut self.canvas, x, y, width, height);
            }
            Command::Reset => {
                self.engine.deactivate_all();
                self.cursors.clear();
            }
            Command::CreateCursor { name, x, y } => {
                if self.cursor(name).is_some() {
                    return Err(ScriptError::DuplicateCursor {
                        line,
                        name: name.clone(),
                    });
                }
                let [x, y] = self.values(line, [x, y])?;
                let handle = self
                    .engine
                    .create_cursor(x, y)
                    .map_err(|source| ScriptError::Cursor { line, source })?;
                self.cursors.insert(name.clone(), handle);
            }
            Command::Cursor { name, op } => {
                let handle = self.handle(line, name)?;
                self.apply(line, name, handle, op)?;
            }
            Command::Declare { name, value, .. } => {
                let value = self.eval(line, value)?;
                self.variables.insert(name.clone(), value);
            }
            Command::Assign { name, op, value } => {
                let value = self.eval(line, value)?;
                let current = || self.lookup(line, name);
                let result = match op {
                    AssignOp::Set => value,
                    AssignOp::Add => current()? + value,
                    AssignOp::Sub => current()? - value,
                    AssignOp::Mul => current()? * value,
                    AssignOp::Div if value == 0.0 => {
                        return Err(evaluation(line, EvalError::DivisionByZero));
                    }
                    AssignOp::Div => current()? / value,
                };
                self.store(line, name, result)?;
            }
            Command::If {
                branches,
                otherwise,
            } => {
                let mut chosen = otherwise;
                for branch in branches {
                    if self.eval(branch.line, &branch.condition)? != 0.0 {
                        chosen = &branch.body;
                        break;
                    }
                }
                self.run_block(chosen)?;
            }
            Command::While { condition, body } => {
                let mut iterations = 0;
                while self.eval(line, condition)? != 0.0 {
                    next_iteration(line, &mut iterations)?;
                    self.run_block(body)?;
                }
            }
            Command::Repeat { count, body } => {
                let count = self.eval(line, count)?.trunc();
                if count > MAX_ITERATIONS as f64 {
                    return Err(ScriptError::LoopLimit {
                        line,
                        limit: MAX_ITERATIONS,
                    });
                }
                for _ in 0..count.max(0.0) as usize {
                    self.run_block(body)?;
                }
            }
            Command::For {
                var,
                start,
                end,
                step,
                body,
            } => {
                let [start, end] = self.values(line, [start, end])?;
                let step = match step {
                    Some(step) => self.eval(line, step)?,
                    None if end >= start => 1.0,
                    None => -1.0,
                };
                if step == 0.0 {
                    return Err(evaluation(line, EvalError::ZeroStep));
                }

                self.store(line, var, start)?;
                let mut iterations = 0;
                loop {
                    let value = self.lookup(line, var)?;
                    let within = if step > 0.0 { value <= end } else { value >= end };
                    if !within {
                        break;
                    }
                    next_iteration(line, &mut iterations)?;
                    self.run_block(body)?;
                    let next = self.lookup(line, var)? + step;
                    self.store(line, var, next)?;
                }
            }
        }
        Ok(())
    }

    fn eval(&self, line: usize, expr: &Expr) -> Result<f64, ScriptError> {
        expr.eval(&self.variables)
            .map_err(|source| evaluation(line, source))
    }

    fn values<const N: usize>(
        &self,
        line: usize,
        exprs: [&Expr; N],
    ) -> Result<[f64; N], ScriptError> {
        let mut out = [0.0; N];
        for (slot, expr) in out.iter_mut().zip(exprs) {
            *slot = self.eval(line, expr)?;
        }
        Ok(out)
    }

    fn lookup(&self, line: usize, name: &str) -> Result<f64, ScriptError> {
        self.variable(name)
            .ok_or_else(|| evaluation(line, EvalError::Unbound(name.to_string())))
    }

    fn store(&mut self, line: usize, name: &str, value: f64) -> Result<(), ScriptError> {
        if !value.is_finite() {
            return Err(evaluation(line, EvalError::NonFinite));
        }
        self.variables.insert(name.to_string(), value);
        Ok(())
    }

    fn handle(&self, line: usize, name: &str) -> Result<CursorHandle, ScriptError> {
        self.cursors
            .get(name)
            .copied()
            .ok_or_else(|| ScriptError::UnknownCursor {
                line,
                name: name.to_string(),
            })
    }

    fn apply(
        &mut self,
        line: usize,
        name: &str,
        handle: CursorHandle,
        op: &CursorOp,
    ) -> Result<(), ScriptError> {
        match op {
            CursorOp::Move(distance) => {
                let distance = self.eval(line, distance)?;
                self.engine.move_cursor(handle, distance);
            }
            CursorOp::Rotate(angle) => {
                let angle = self.eval(line, angle)?;
                self.engine.rotate(handle, angle);
            }
            CursorOp::Color(color) => {
                self.engine.set_color(handle, *color);
            }
            CursorOp::Thickness(thickness) => {
                // `as` saturates, so huge values still reach the engine's check
                let thickness = self.eval(line, thickness)? as i64;
                if let Err(err) = self.engine.set_thickness(handle, thickness) {
                    warn!("Line {line}: {err}, keeping thickness of '{name}'");
                }
            }
            CursorOp::Visible(visible) => {
                let visible = self.eval(line, visible)? != 0.0;
                self.engine.set_visibility(handle, visible);
            }
            CursorOp::Position => {
                if let Some(cursor) = self.engine.cursor(handle) {
                    let report = format!("{name}: {cursor}");
                    self.engine.report_position(handle);
                    self.positions.push(report);
                }
            }
            CursorOp::Line(length) => {
                let length = self.eval(line, length)?;
                self.engine.draw_line(&mut self.canvas, handle, length);
            }
            CursorOp::Rect {
                width,
                height,
                filled,
            } => {
                let [width, height] = self.values(line, [width, height])?;
                self.engine
                    .draw_rectangle(&mut self.canvas, handle, width, height, *filled);
            }
            CursorOp::Circle { radius, filled } => {
                let radius = self.eval(line, radius)?;
                self.engine
                    .draw_circle(&mut self.canvas, handle, radius, *filled);
            }
            CursorOp::Triangle {
                base,
                height,
                filled,
            } => {
                let [base, height] = self.values(line, [base, height])?;
                self.engine
                    .draw_triangle(&mut self.canvas, handle, base, height, *filled);
            }
            CursorOp::Ellipse {
                radius_x,
                radius_y,
                filled,
            } => {
                let [radius_x, radius_y] = self.values(line, [radius_x, radius_y])?;
                self.engine
                    .draw_ellipse(&mut self.canvas, handle, radius_x, radius_y, *filled);
            }
        }
        Ok(())
    }
}

fn evaluation(line: usize, source: EvalError) -> ScriptError {
    ScriptError::Evaluation { line, source }
}

fn next_iteration(line: usize, iterations: &mut usize) -> Result<(), ScriptError> {
    *iterations += 1;
    if *iterations > MAX_ITERATIONS {
        return Err(ScriptError::LoopLimit {
            line,
            limit: MAX_ITERATIONS,
        });
    }
    Ok(())
}

/// Runs `source` on a fresh canvas and returns the finished interpreter.
pub fn render(
    source: &str,
    options: EngineOptions,
    width: u32,
    height: u32,
) -> Result<Interpreter, ScriptError> {
    let mut interpreter = Interpreter::new(options, width, height);
    interpreter.run_source(source)?;
    Ok(interpreter)
}
