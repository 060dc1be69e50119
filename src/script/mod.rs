//! Drawing scripts: one command per line, `#` starts a comment.
//!
//! ```text
//! canvas 200 200 white
//! const sides = 6
//! var side = 40
//! cursor pen 100 100
//! pen.color rgb(200, 0, 0)
//! repeat sides
//!     pen.line side
//!     pen.move side
//!     pen.rotate 360/sides
//! end
//! for r = 5 to 25 step 10
//!     if r > 10
//!         pen.circle r filled
//!     else
//!         pen.circle r
//!     end
//! end
//! ```
//!
//! Numeric arguments are expressions over variables. An argument containing
//! spaces must be wrapped in parentheses, e.g. `pen.move (side * 2)`. Blocks
//! (`if`/`elif`/`else`, `while`, `repeat`, `for`) close with `end`.
//!
//! Scripts are parsed completely before any command runs, so a syntax error
//! never leaves a half-drawn canvas behind. Runtime failures (unknown cursor
//! names, an exhausted pool, division by zero, a runaway loop) stop execution
//! at the failing line.

mod error;
mod expr;
mod parser;
mod runner;

pub use error::ScriptError;
pub use expr::{BinaryOp, EvalError, Expr};
pub use parser::{AssignOp, Branch, Command, CursorOp, Script, Statement, parse_color};
pub use runner::{Interpreter, MAX_ITERATIONS, render};
