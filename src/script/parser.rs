//! Line-oriented script parsing.
//!
//! Lines are parsed one at a time and then folded into nested blocks. Variable
//! names are resolved against a single flat scope in source order, so a typo
//! is reported before anything runs.

use super::error::ScriptError;
use super::expr::Expr;
use crate::draw::{Color, MAX_DIMENSION};
use std::collections::HashMap;

/// Words that cannot name a variable.
const RESERVED: [&str; 18] = [
    "var", "const", "if", "elif", "else", "end", "while", "repeat", "for", "to", "step",
    "true", "false", "filled", "canvas", "background", "clear", "reset",
];

/// Commands addressed to a named cursor (`NAME.op args`).
#[derive(Debug, Clone, PartialEq)]
pub enum CursorOp {
    Move(Expr),
    Rotate(Expr),
    Color(Color),
    /// Truncated toward zero when run; the engine rejects non-positive values
    Thickness(Expr),
    /// Non-zero shows the cursor
    Visible(Expr),
    Position,
    Line(Expr),
    Rect { width: Expr, height: Expr, filled: bool },
    Circle { radius: Expr, filled: bool },
    Triangle { base: Expr, height: Expr, filled: bool },
    Ellipse { radius_x: Expr, radius_y: Expr, filled: bool },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AssignOp {
    Set,
    Add,
    Sub,
    Mul,
    Div,
}

/// One `if`/`elif` arm.
#[derive(Debug, Clone, PartialEq)]
pub struct Branch {
    pub line: usize,
    pub condition: Expr,
    pub body: Vec<Statement>,
}

/// A single parsed script command.
#[derive(Debug, Clone, PartialEq)]
pub enum Command {
    Canvas {
        width: u32,
        height: u32,
        color: Option<Color>,
    },
    Background(Color),
    Clear {
        x: Expr,
        y: Expr,
        width: Expr,
        height: Expr,
    },
    Reset,
    CreateCursor {
        name: String,
        x: Expr,
        y: Expr,
    },
    Cursor {
        name: String,
        op: CursorOp,
    },
    Declare {
        name: String,
        value: Expr,
        constant: bool,
    },
    Assign {
        name: String,
        op: AssignOp,
        value: Expr,
    },
    If {
        branches: Vec<Branch>,
        otherwise: Vec<Statement>,
    },
    While {
        condition: Expr,
        body: Vec<Statement>,
    },
    Repeat {
        count: Expr,
        body: Vec<Statement>,
    },
    /// Inclusive of `end`; without `step` the loop counts toward `end` by one.
    For {
        var: String,
        start: Expr,
        end: Expr,
        step: Option<Expr>,
        body: Vec<Statement>,
    },
}

/// A command and the line it came from. Blocks carry the line of their opener.
#[derive(Debug, Clone, PartialEq)]
pub struct Statement {
    pub line: usize,
    pub command: Command,
}

/// A fully parsed script.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Script {
    pub statements: Vec<Statement>,
}

impl Script {
    /// Parses every line, stopping at the first malformed one.
    pub fn parse(source: &str) -> Result<Self, ScriptError> {
        let mut builder = Builder::default();
        for (index, text) in source.lines().enumerate() {
            let line = index + 1;
            if let Some(item) = parse_line(line, text)? {
                builder.push(line, item)?;
            }
        }
        Ok(Self {
            statements: builder.finish()?,
        })
    }

    /// Number of top-level statements.
    pub fn len(&self) -> usize {
        self.statements.len()
    }

    pub fn is_empty(&self) -> bool {
        self.statements.is_empty()
    }
}

/// What a single source line contributes.
#[derive(Debug)]
enum Line {
    Command(Command),
    Open(BlockKind),
    Elif(Expr),
    Else,
    End,
}

#[derive(Debug)]
enum BlockKind {
    /// `condition` is `None` once `else` has been seen
    If {
        branches: Vec<Branch>,
        condition: Option<Expr>,
        arm_line: usize,
    },
    While(Expr),
    Repeat(Expr),
    For {
        var: String,
        start: Expr,
        end: Expr,
        step: Option<Expr>,
    },
}

impl BlockKind {
    fn keyword(&self) -> &'static str {
        match self {
            BlockKind::If { .. } => "if",
            BlockKind::While(_) => "while",
            BlockKind::Repeat(_) => "repeat",
            BlockKind::For { .. } => "for",
        }
    }
}

#[derive(Debug)]
struct Block {
    line: usize,
    kind: BlockKind,
    body: Vec<Statement>,
}

impl Block {
    fn into_command(self) -> Command {
        let Block { kind, body, .. } = self;
        match kind {
            BlockKind::If {
                mut branches,
                condition,
                arm_line,
            } => {
                let otherwise = match condition {
                    Some(condition) => {
                        branches.push(Branch {
                            line: arm_line,
                            condition,
                            body,
                        });
                        Vec::new()
                    }
                    None => body,
                };
                Command::If {
                    branches,
                    otherwise,
                }
            }
            BlockKind::While(condition) => Command::While { condition, body },
            BlockKind::Repeat(count) => Command::Repeat { count, body },
            BlockKind::For {
                var,
                start,
                end,
                step,
            } => Command::For {
                var,
                start,
                end,
                step,
                body,
            },
        }
    }
}

/// Folds lines into nested blocks and tracks declared variables.
#[derive(Debug, Default)]
struct Builder {
    /// Variable name to whether it is constant
    bindings: HashMap<String, bool>,
    open: Vec<Block>,
    statements: Vec<Statement>,
}

impl Builder {
    fn push(&mut self, line: usize, item: Line) -> Result<(), ScriptError> {
        match item {
            Line::Command(command) => {
                self.check_command(line, &command)?;
                self.emit(Statement { line, command });
            }
            Line::Open(kind) => {
                self.check_opener(line, &kind)?;
                self.open.push(Block {
                    line,
                    kind,
                    body: Vec::new(),
                });
            }
            Line::Elif(condition) => {
                self.check_expr(line, &condition)?;
                self.next_arm(line, "elif", Some(condition))?;
            }
            Line::Else => self.next_arm(line, "else", None)?,
            Line::End => {
                let block = self
                    .open
                    .pop()
                    .ok_or_else(|| ScriptError::syntax(line, "'end' without an open block"))?;
                let opener = block.line;
                self.emit(Statement {
                    line: opener,
                    command: block.into_command(),
                });
            }
        }
        Ok(())
    }

    fn next_arm(
        &mut self,
        line: usize,
        word: &str,
        next: Option<Expr>,
    ) -> Result<(), ScriptError> {
        match self.open.last_mut() {
            Some(Block {
                kind:
                    BlockKind::If {
                        branches,
                        condition,
                        arm_line,
                    },
                body,
                ..
            }) => {
                let Some(previous) = condition.take() else {
                    return Err(ScriptError::syntax(line, format!("'{word}' after 'else'")));
                };
                branches.push(Branch {
                    line: *arm_line,
                    condition: previous,
                    body: std::mem::take(body),
                });
                *condition = next;
                *arm_line = line;
                Ok(())
            }
            _ => Err(ScriptError::syntax(
                line,
                format!("'{word}' without a matching 'if'"),
            )),
        }
    }

    fn emit(&mut self, statement: Statement) {
        match self.open.last_mut() {
            Some(block) => block.body.push(statement),
            None => self.statements.push(statement),
        }
    }

    fn finish(self) -> Result<Vec<Statement>, ScriptError> {
        match self.open.last() {
            Some(block) => Err(ScriptError::syntax(
                block.line,
                format!("'{}' block is never closed with 'end'", block.kind.keyword()),
            )),
            None => Ok(self.statements),
        }
    }

    fn check_expr(&self, line: usize, expr: &Expr) -> Result<(), ScriptError> {
        let mut unknown = None;
        expr.for_each_var(&mut |name| {
            if unknown.is_none() && !self.bindings.contains_key(name) {
                unknown = Some(name.to_string());
            }
        });
        match unknown {
            Some(name) => Err(ScriptError::UnknownVariable { line, name }),
            None => Ok(()),
        }
    }

    fn check_assignable(&self, line: usize, name: &str) -> Result<(), ScriptError> {
        match self.bindings.get(name) {
            None => Err(ScriptError::UnknownVariable {
                line,
                name: name.to_string(),
            }),
            Some(true) => Err(ScriptError::ConstantAssignment {
                line,
                name: name.to_string(),
            }),
            Some(false) => Ok(()),
        }
    }

    fn check_command(&mut self, line: usize, command: &Command) -> Result<(), ScriptError> {
        match command {
            Command::Declare {
                name,
                value,
                constant,
            } => {
                self.check_expr(line, value)?;
                if self.bindings.contains_key(name) {
                    return Err(ScriptError::DuplicateVariable {
                        line,
                        name: name.clone(),
                    });
                }
                self.bindings.insert(name.clone(), *constant);
                Ok(())
            }
            Command::Assign { name, value, .. } => {
                self.check_expr(line, value)?;
                self.check_assignable(line, name)
            }
            other => arguments(other)
                .into_iter()
                .try_for_each(|expr| self.check_expr(line, expr)),
        }
    }

    fn check_opener(&mut self, line: usize, kind: &BlockKind) -> Result<(), ScriptError> {
        match kind {
            BlockKind::If { condition, .. } => condition
                .iter()
                .try_for_each(|expr| self.check_expr(line, expr)),
            BlockKind::While(expr) | BlockKind::Repeat(expr) => self.check_expr(line, expr),
            BlockKind::For {
                var,
                start,
                end,
                step,
            } => {
                self.check_expr(line, start)?;
                self.check_expr(line, end)?;
                if let Some(step) = step {
                    self.check_expr(line, step)?;
                }
                if self.bindings.contains_key(var) {
                    self.check_assignable(line, var)
                } else {
                    self.bindings.insert(var.clone(), false);
                    Ok(())
                }
            }
        }
    }
}

/// Expressions a simple command evaluates when it runs.
fn arguments(command: &Command) -> Vec<&Expr> {
    match command {
        Command::Clear {
            x,
            y,
            width,
            height,
        } => vec![x, y, width, height],
        Command::CreateCursor { x, y, .. } => vec![x, y],
        Command::Cursor { op, .. } => match op {
            CursorOp::Move(value)
            | CursorOp::Rotate(value)
            | CursorOp::Thickness(value)
            | CursorOp::Visible(value)
            | CursorOp::Line(value)
            | CursorOp::Circle { radius: value, .. } => vec![value],
            CursorOp::Rect { width, height, .. } => vec![width, height],
            CursorOp::Triangle { base, height, .. } => vec![base, height],
            CursorOp::Ellipse {
                radius_x, radius_y, ..
            } => vec![radius_x, radius_y],
            CursorOp::Color(_) | CursorOp::Position => Vec::new(),
        },
        _ => Vec::new(),
    }
}

/// Parses one line. Blank lines and comments yield `None`.
fn parse_line(line: usize, text: &str) -> Result<Option<Line>, ScriptError> {
    let code = match text.split_once('#') {
        Some((code, _comment)) => code,
        None => text,
    }
    .trim();
    if code.is_empty() {
        return Ok(None);
    }

    if let Some((name, op, value)) = split_assignment(code) {
        check_variable(line, name)?;
        return Ok(Some(Line::Command(Command::Assign {
            name: name.to_string(),
            op,
            value: expression(line, value)?,
        })));
    }

    let (head, rest) = match code.split_once(char::is_whitespace) {
        Some((head, rest)) => (head, rest.trim()),
        None => (code, ""),
    };
    let item = match head {
        "var" | "const" => {
            let (name, value) = split_assignment(rest)
                .and_then(|(name, op, value)| (op == AssignOp::Set).then_some((name, value)))
                .ok_or_else(|| {
                    ScriptError::syntax(line, format!("expected '{head} NAME = VALUE'"))
                })?;
            check_variable(line, name)?;
            Line::Command(Command::Declare {
                name: name.to_string(),
                value: expression(line, value)?,
                constant: head == "const",
            })
        }
        "if" => Line::Open(BlockKind::If {
            branches: Vec::new(),
            condition: Some(condition(line, head, rest)?),
            arm_line: line,
        }),
        "elif" => Line::Elif(condition(line, head, rest)?),
        "while" => Line::Open(BlockKind::While(condition(line, head, rest)?)),
        "repeat" => Line::Open(BlockKind::Repeat(condition(line, head, rest)?)),
        "for" => Line::Open(parse_for(line, rest)?),
        "else" | "end" => {
            if !rest.is_empty() {
                return Err(ScriptError::syntax(
                    line,
                    format!("unexpected '{rest}' after '{head}'"),
                ));
            }
            if head == "else" { Line::Else } else { Line::End }
        }
        _ => Line::Command(parse_command(line, code)?),
    };
    Ok(Some(item))
}

/// Splits `NAME op VALUE` for `=`, `+=`, `-=`, `*=` and `/=`.
fn split_assignment(code: &str) -> Option<(&str, AssignOp, &str)> {
    let end = code
        .find(|c: char| !(c.is_ascii_alphanumeric() || c == '_'))
        .unwrap_or(code.len());
    if end == 0 {
        return None;
    }
    let (name, rest) = code.split_at(end);
    let rest = rest.trim_start();
    let (op, value) = [
        ("+=", AssignOp::Add),
        ("-=", AssignOp::Sub),
        ("*=", AssignOp::Mul),
        ("/=", AssignOp::Div),
        ("=", AssignOp::Set),
    ]
    .into_iter()
    .find_map(|(text, op)| rest.strip_prefix(text).map(|value| (op, value)))?;
    // `==` is a comparison, not an assignment
    if op == AssignOp::Set && value.starts_with('=') {
        return None;
    }
    Some((name, op, value.trim()))
}

/// `for NAME = START to END [step STEP]`
fn parse_for(line: usize, rest: &str) -> Result<BlockKind, ScriptError> {
    let usage = || ScriptError::syntax(line, "expected 'for NAME = START to END [step STEP]'");
    let (var, range) = split_assignment(rest)
        .and_then(|(name, op, range)| (op == AssignOp::Set).then_some((name, range)))
        .ok_or_else(usage)?;
    check_variable(line, var)?;

    let tokens = tokenize(range);
    let to = tokens.iter().position(|t| *t == "to").ok_or_else(usage)?;
    let step_at = tokens.iter().position(|t| *t == "step");
    let part = |from: usize, until: usize| -> Result<Expr, ScriptError> {
        match tokens.get(from..until) {
            Some(slice) if !slice.is_empty() => expression(line, &slice.join(" ")),
            _ => Err(usage()),
        }
    };

    let start = part(0, to)?;
    let (end, step) = match step_at {
        Some(at) if at > to => (part(to + 1, at)?, Some(part(at + 1, tokens.len())?)),
        Some(_) => return Err(usage()),
        None => (part(to + 1, tokens.len())?, None),
    };
    Ok(BlockKind::For {
        var: var.to_string(),
        start,
        end,
        step,
    })
}

fn condition(line: usize, keyword: &str, rest: &str) -> Result<Expr, ScriptError> {
    if rest.is_empty() {
        return Err(ScriptError::syntax(
            line,
            format!("'{keyword}' expects an expression"),
        ));
    }
    expression(line, rest)
}

fn expression(line: usize, text: &str) -> Result<Expr, ScriptError> {
    Expr::parse(text).map_err(|message| ScriptError::syntax(line, message))
}

fn parse_command(line: usize, code: &str) -> Result<Command, ScriptError> {
    let tokens = tokenize(code);
    let Some((&head, args)) = tokens.split_first() else {
        return Err(ScriptError::syntax(line, "empty command"));
    };

    let mut args = Args::new(line, head, args);
    let command = match head.split_once('.') {
        Some((name, op)) => {
            check_name(line, name, "cursor")?;
            Command::Cursor {
                name: name.to_string(),
                op: parse_cursor_op(op, &mut args)?,
            }
        }
        None => parse_keyword(head, &mut args)?,
    };
    args.finish()?;
    Ok(command)
}

fn parse_keyword(keyword: &str, args: &mut Args<'_>) -> Result<Command, ScriptError> {
    let command = match keyword {
        "canvas" => Command::Canvas {
            width: args.dimension("width")?,
            height: args.dimension("height")?,
            color: args.optional_color()?,
        },
        "background" => Command::Background(args.color()?),
        "clear" => Command::Clear {
            x: args.expr("x")?,
            y: args.expr("y")?,
            width: args.expr("width")?,
            height: args.expr("height")?,
        },
        "reset" => Command::Reset,
        "cursor" => {
            let name = args.required("cursor name")?;
            check_name(args.line, name, "cursor")?;
            Command::CreateCursor {
                name: name.to_string(),
                x: args.expr("x")?,
                y: args.expr("y")?,
            }
        }
        other => {
            return Err(ScriptError::syntax(
                args.line,
                format!("unknown command '{other}'"),
            ));
        }
    };
    Ok(command)
}

fn parse_cursor_op(op: &str, args: &mut Args<'_>) -> Result<CursorOp, ScriptError> {
    let op = match op {
        "move" => CursorOp::Move(args.expr("distance")?),
        "rotate" => CursorOp::Rotate(args.expr("angle")?),
        "color" => CursorOp::Color(args.color()?),
        "thickness" => CursorOp::Thickness(args.expr("thickness")?),
        "visible" => CursorOp::Visible(args.switch()?),
        "position" => CursorOp::Position,
        "line" => CursorOp::Line(args.expr("length")?),
        "rect" => CursorOp::Rect {
            width: args.expr("width")?,
            height: args.expr("height")?,
            filled: args.filled()?,
        },
        "circle" => CursorOp::Circle {
            radius: args.expr("radius")?,
            filled: args.filled()?,
        },
        "triangle" => CursorOp::Triangle {
            base: args.expr("base")?,
            height: args.expr("height")?,
            filled: args.filled()?,
        },
        "ellipse" => CursorOp::Ellipse {
            radius_x: args.expr("radius_x")?,
            radius_y: args.expr("radius_y")?,
            filled: args.filled()?,
        },
        other => {
            return Err(ScriptError::syntax(
                args.line,
                format!("unknown cursor command '{other}'"),
            ));
        }
    };
    Ok(op)
}

/// Parses `name`, `rgb(r, g, b)` or `rgba(r, g, b, a)`.
pub fn parse_color(text: &str) -> Option<Color> {
    let text = text.trim();
    let lower = text.to_ascii_lowercase();
    if let Some(inner) = lower.strip_prefix("rgba(").and_then(|s| s.strip_suffix(')')) {
        let [r, g, b, a] = components::<4>(inner)?;
        return Some(Color::new(r, g, b, a));
    }
    if let Some(inner) = lower.strip_prefix("rgb(").and_then(|s| s.strip_suffix(')')) {
        let [r, g, b] = components::<3>(inner)?;
        return Some(Color::rgb(r, g, b));
    }
    Color::from_name(text)
}

fn components<const N: usize>(inner: &str) -> Option<[u8; N]> {
    let mut out = [0u8; N];
    let mut parts = inner.split(',');
    for slot in out.iter_mut() {
        *slot = parts.next()?.trim().parse().ok()?;
    }
    if parts.next().is_some() {
        return None;
    }
    Some(out)
}

/// Splits on whitespace outside parentheses so `rgb(1, 2, 3)` and
/// `(side * 2)` stay one token each.
fn tokenize(text: &str) -> Vec<&str> {
    let mut tokens = Vec::new();
    let mut depth = 0usize;
    let mut start = None;
    for (i, ch) in text.char_indices() {
        match ch {
            '(' => depth += 1,
            ')' => depth = depth.saturating_sub(1),
            c if c.is_whitespace() && depth == 0 => {
                if let Some(s) = start.take() {
                    tokens.push(&text[s..i]);
                }
                continue;
            }
            _ => {}
        }
        start.get_or_insert(i);
    }
    if let Some(s) = start {
        tokens.push(&text[s..]);
    }
    tokens
}

fn check_name(line: usize, name: &str, what: &str) -> Result<(), ScriptError> {
    let valid = !name.is_empty()
        && name.chars().all(|c| c.is_ascii_alphanumeric() || c == '_')
        && !name.starts_with(|c: char| c.is_ascii_digit());
    if valid {
        Ok(())
    } else {
        Err(ScriptError::syntax(line, format!("invalid {what} name '{name}'")))
    }
}

fn check_variable(line: usize, name: &str) -> Result<(), ScriptError> {
    check_name(line, name, "variable")?;
    if RESERVED.contains(&name) {
        return Err(ScriptError::syntax(
            line,
            format!("'{name}' is reserved and cannot name a variable"),
        ));
    }
    Ok(())
}

/// Cursor over a command's arguments with typed accessors.
struct Args<'a> {
    line: usize,
    command: &'a str,
    rest: &'a [&'a str],
}

impl<'a> Args<'a> {
    fn new(line: usize, command: &'a str, rest: &'a [&'a str]) -> Self {
        Self {
            line,
            command,
            rest,
        }
    }

    fn next(&mut self) -> Option<&'a str> {
        let (first, rest) = self.rest.split_first()?;
        self.rest = rest;
        Some(first)
    }

    fn required(&mut self, what: &str) -> Result<&'a str, ScriptError> {
        self.next().ok_or_else(|| {
            ScriptError::syntax(self.line, format!("'{}' expects {what}", self.command))
        })
    }

    fn expr(&mut self, what: &str) -> Result<Expr, ScriptError> {
        let token = self.required(what)?;
        Expr::parse(token).map_err(|message| {
            ScriptError::syntax(self.line, format!("invalid {what} '{token}': {message}"))
        })
    }

    /// Canvas sizes stay literal so the surface is known before anything runs.
    fn dimension(&mut self, what: &str) -> Result<u32, ScriptError> {
        let token = self.required(what)?;
        match token.parse::<u32>() {
            Ok(value) if (1..=MAX_DIMENSION).contains(&value) => Ok(value),
            _ => Err(ScriptError::syntax(
                self.line,
                format!("invalid {what} '{token}', expected 1-{MAX_DIMENSION}"),
            )),
        }
    }

    fn color(&mut self) -> Result<Color, ScriptError> {
        let token = self.required("a color")?;
        parse_color(token).ok_or_else(|| self.invalid("color", token))
    }

    fn optional_color(&mut self) -> Result<Option<Color>, ScriptError> {
        if self.rest.is_empty() {
            return Ok(None);
        }
        self.color().map(Some)
    }

    /// `on`/`off` or any expression.
    fn switch(&mut self) -> Result<Expr, ScriptError> {
        match self.rest.first() {
            Some(&"on") => {
                self.next();
                Ok(Expr::Number(1.0))
            }
            Some(&"off") => {
                self.next();
                Ok(Expr::Number(0.0))
            }
            _ => self.expr("visibility"),
        }
    }

    fn filled(&mut self) -> Result<bool, ScriptError> {
        match self.next() {
            None => Ok(false),
            Some("filled") => Ok(true),
            Some(other) => Err(ScriptError::syntax(
                self.line,
                format!("expected 'filled', found '{other}'"),
            )),
        }
    }

    fn invalid(&self, what: &str, token: &str) -> ScriptError {
        ScriptError::syntax(self.line, format!("invalid {what} '{token}'"))
    }

    fn finish(&self) -> Result<(), ScriptError> {
        match self.rest.first() {
            None => Ok(()),
            Some(extra) => Err(ScriptError::syntax(
                self.line,
                format!("unexpected argument '{extra}' for '{}'", self.command),
            )),
        }
    }
}
