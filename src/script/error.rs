use super::expr::EvalError;
use crate::cursor::CursorError;
use thiserror::Error;

/// Errors raised while parsing or running a drawing script.
///
/// Every variant carries the 1-based line of the offending command.
#[derive(Debug, Error)]
pub enum ScriptError {
    #[error("line {line}: {message}")]
    Syntax { line: usize, message: String },

    #[error("line {line}: unknown cursor '{name}'")]
    UnknownCursor { line: usize, name: String },

    #[error("line {line}: cursor '{name}' is already defined")]
    DuplicateCursor { line: usize, name: String },

    #[error("line {line}: unknown variable '{name}'")]
    UnknownVariable { line: usize, name: String },

    #[error("line {line}: variable '{name}' is already declared")]
    DuplicateVariable { line: usize, name: String },

    #[error("line {line}: cannot assign to constant '{name}'")]
    ConstantAssignment { line: usize, name: String },

    #[error("line {line}: {source}")]
    Evaluation {
        line: usize,
        #[source]
        source: EvalError,
    },

    #[error("line {line}: loop exceeded {limit} iterations")]
    LoopLimit { line: usize, limit: usize },

    #[error("line {line}: {source}")]
    Cursor {
        line: usize,
        #[source]
        source: CursorError,
    },
}

impl ScriptError {
    pub(crate) fn syntax(line: usize, message: impl Into<String>) -> Self {
        ScriptError::Syntax {
            line,
            message: message.into(),
        }
    }

    /// Line the error was reported for.
    pub fn line(&self) -> usize {
        match self {
            ScriptError::Syntax { line, .. }
            | ScriptError::UnknownCursor { line, .. }
            | ScriptError::DuplicateCursor { line, .. }
            | ScriptError::UnknownVariable { line, .. }
            | ScriptError::DuplicateVariable { line, .. }
            | ScriptError::ConstantAssignment { line, .. }
            | ScriptError::Evaluation { line, .. }
            | ScriptError::LoopLimit { line, .. }
            | ScriptError::Cursor { line, .. } => *line,
        }
    }
}
