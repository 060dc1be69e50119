//! Arithmetic expressions over numeric script variables.
//!
//! Grammar, loosest binding first:
//!
//! ```text
//! comparison := sum (("<" | "<=" | ">" | ">=" | "==" | "!=") sum)?
//! sum        := product (("+" | "-") product)*
//! product    := unary (("*" | "/" | "%") unary)*
//! unary      := ("-" | "+") unary | primary
//! primary    := NUMBER | "true" | "false" | NAME | "(" comparison ")"
//! ```
//!
//! Comparisons yield `1` or `0`; conditions treat any non-zero value as true.

use std::collections::HashMap;
use thiserror::Error;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BinaryOp {
    Add,
    Sub,
    Mul,
    Div,
    Rem,
    Lt,
    Le,
    Gt,
    Ge,
    Eq,
    Ne,
}

#[derive(Debug, Clone, PartialEq)]
pub enum Expr {
    Number(f64),
    Var(String),
    Neg(Box<Expr>),
    Binary {
        op: BinaryOp,
        lhs: Box<Expr>,
        rhs: Box<Expr>,
    },
}

/// Failures while evaluating an expression at run time.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum EvalError {
    #[error("variable '{0}' has no value yet")]
    Unbound(String),

    #[error("division by zero")]
    DivisionByZero,

    #[error("expression does not evaluate to a finite number")]
    NonFinite,

    #[error("loop step must not be zero")]
    ZeroStep,
}

impl Expr {
    /// Parses a complete expression; trailing input is an error.
    pub fn parse(text: &str) -> Result<Self, String> {
        let tokens = lex(text)?;
        let mut parser = ExprParser { tokens, pos: 0 };
        let expr = parser.comparison()?;
        match parser.tokens.get(parser.pos) {
            None => Ok(expr),
            Some(token) => Err(format!("unexpected '{token}' in expression '{text}'")),
        }
    }

    pub fn eval(&self, vars: &HashMap<String, f64>) -> Result<f64, EvalError> {
        let value = match self {
            Expr::Number(value) => *value,
            Expr::Var(name) => *vars
                .get(name)
                .ok_or_else(|| EvalError::Unbound(name.clone()))?,
            Expr::Neg(inner) => -inner.eval(vars)?,
            Expr::Binary { op, lhs, rhs } => {
                let (a, b) = (lhs.eval(vars)?, rhs.eval(vars)?);
                match op {
                    BinaryOp::Add => a + b,
                    BinaryOp::Sub => a - b,
                    BinaryOp::Mul => a * b,
                    BinaryOp::Div | BinaryOp::Rem if b == 0.0 => {
                        return Err(EvalError::DivisionByZero);
                    }
                    BinaryOp::Div => a / b,
                    BinaryOp::Rem => a % b,
                    BinaryOp::Lt => truth(a < b),
                    BinaryOp::Le => truth(a <= b),
                    BinaryOp::Gt => truth(a > b),
                    BinaryOp::Ge => truth(a >= b),
                    BinaryOp::Eq => truth(a == b),
                    BinaryOp::Ne => truth(a != b),
                }
            }
        };
        if value.is_finite() {
            Ok(value)
        } else {
            Err(EvalError::NonFinite)
        }
    }

    /// Calls `f` with every variable name the expression reads.
    pub fn for_each_var(&self, f: &mut impl FnMut(&str)) {
        match self {
            Expr::Number(_) => {}
            Expr::Var(name) => f(name),
            Expr::Neg(inner) => inner.for_each_var(f),
            Expr::Binary { lhs, rhs, .. } => {
                lhs.for_each_var(f);
                rhs.for_each_var(f);
            }
        }
    }
}

fn truth(value: bool) -> f64 {
    if value { 1.0 } else { 0.0 }
}

#[derive(Debug, Clone, PartialEq)]
enum Token {
    Number(f64),
    Name(String),
    Op(&'static str),
}

impl std::fmt::Display for Token {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Token::Number(value) => write!(f, "{value}"),
            Token::Name(name) => f.write_str(name),
            Token::Op(op) => f.write_str(op),
        }
    }
}

const OPERATORS: [&str; 15] = [
    "<=", ">=", "==", "!=", "<", ">", "+", "-", "*", "/", "%", "(", ")", "=", "!",
];

fn lex(text: &str) -> Result<Vec<Token>, String> {
    let mut tokens = Vec::new();
    let bytes = text.as_bytes();
    let mut i = 0;
    while i < bytes.len() {
        let c = bytes[i];
        if c.is_ascii_whitespace() {
            i += 1;
        } else if c.is_ascii_digit() || c == b'.' {
            let start = i;
            while i < bytes.len() && (bytes[i].is_ascii_digit() || bytes[i] == b'.') {
                i += 1;
            }
            // exponent: 1e6, 2.5E-3
            if i < bytes.len() && (bytes[i] == b'e' || bytes[i] == b'E') {
                let mut j = i + 1;
                if j < bytes.len() && (bytes[j] == b'+' || bytes[j] == b'-') {
                    j += 1;
                }
                if j < bytes.len() && bytes[j].is_ascii_digit() {
                    i = j;
                    while i < bytes.len() && bytes[i].is_ascii_digit() {
                        i += 1;
                    }
                }
            }
            let literal = &text[start..i];
            match literal.parse::<f64>() {
                Ok(value) if value.is_finite() => tokens.push(Token::Number(value)),
                _ => return Err(format!("invalid number '{literal}'")),
            }
        } else if c.is_ascii_alphabetic() || c == b'_' {
            let start = i;
            while i < bytes.len() && (bytes[i].is_ascii_alphanumeric() || bytes[i] == b'_') {
                i += 1;
            }
            tokens.push(Token::Name(text[start..i].to_string()));
        } else {
            let rest = &text[i..];
            let Some(op) = OPERATORS.iter().find(|op| rest.starts_with(**op)) else {
                let ch = rest.chars().next().unwrap_or('?');
                return Err(format!("unexpected character '{ch}' in expression"));
            };
            tokens.push(Token::Op(*op));
            i += op.len();
        }
    }
    Ok(tokens)
}

struct ExprParser {
    tokens: Vec<Token>,
    pos: usize,
}

impl ExprParser {
    fn peek_op(&self) -> Option<&'static str> {
        match self.tokens.get(self.pos) {
            Some(Token::Op(op)) => Some(*op),
            _ => None,
        }
    }

    fn eat_op(&mut self, candidates: &[(&str, BinaryOp)]) -> Option<BinaryOp> {
        let op = self.peek_op()?;
        let (_, binary) = candidates.iter().find(|(text, _)| *text == op)?;
        self.pos += 1;
        Some(*binary)
    }

    fn comparison(&mut self) -> Result<Expr, String> {
        let lhs = self.sum()?;
        let ops = [
            ("<", BinaryOp::Lt),
            ("<=", BinaryOp::Le),
            (">", BinaryOp::Gt),
            (">=", BinaryOp::Ge),
            ("==", BinaryOp::Eq),
            ("!=", BinaryOp::Ne),
        ];
        match self.eat_op(&ops) {
            Some(op) => Ok(binary(op, lhs, self.sum()?)),
            None => Ok(lhs),
        }
    }

    fn sum(&mut self) -> Result<Expr, String> {
        let mut expr = self.product()?;
        while let Some(op) = self.eat_op(&[("+", BinaryOp::Add), ("-", BinaryOp::Sub)]) {
            expr = binary(op, expr, self.product()?);
        }
        Ok(expr)
    }

    fn product(&mut self) -> Result<Expr, String> {
        let ops = [
            ("*", BinaryOp::Mul),
            ("/", BinaryOp::Div),
            ("%", BinaryOp::Rem),
        ];
        let mut expr = self.unary()?;
        while let Some(op) = self.eat_op(&ops) {
            expr = binary(op, expr, self.unary()?);
        }
        Ok(expr)
    }

    fn unary(&mut self) -> Result<Expr, String> {
        match self.peek_op() {
            Some("-") => {
                self.pos += 1;
                Ok(Expr::Neg(Box::new(self.unary()?)))
            }
            Some("+") => {
                self.pos += 1;
                self.unary()
            }
            _ => self.primary(),
        }
    }

    fn primary(&mut self) -> Result<Expr, String> {
        let token = self
            .tokens
            .get(self.pos)
            .cloned()
            .ok_or_else(|| "expression ends unexpectedly".to_string())?;
        self.pos += 1;
        match token {
            Token::Number(value) => Ok(Expr::Number(value)),
            Token::Name(name) => Ok(match name.as_str() {
                "true" => Expr::Number(1.0),
                "false" => Expr::Number(0.0),
                _ => Expr::Var(name),
            }),
            Token::Op("(") => {
                let inner = self.comparison()?;
                match self.peek_op() {
                    Some(")") => {
                        self.pos += 1;
                        Ok(inner)
                    }
                    _ => Err("missing ')'".to_string()),
                }
            }
            Token::Op(op) => Err(format!("unexpected '{op}' in expression")),
        }
    }
}

fn binary(op: BinaryOp, lhs: Expr, rhs: Expr) -> Expr {
    Expr::Binary {
        op,
        lhs: Box::new(lhs),
        rhs: Box::new(rhs),
    }
}
