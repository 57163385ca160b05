//!tokenizer and recursive descent evaluator for scalar expressions
//!
//!nothing is cached between calls, every evaluation re-tokenizes the source with its own Lexer
use crate::error::ExprError;
use std::f64::consts::{E, PI};
use std::iter::Peekable;
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Token<'a> {
    ///digits and '.', parsed when consumed
    Num(&'a str),
    ///a letter followed by letters or digits
    Ident(&'a str),
    ///one of + - * / ^ ( ) ,
    Op(char),
}
///lazy token cursor over an expression, yields the byte offset of each token
///
///whitespace and unknown characters are skipped
#[derive(Clone, Debug)]
pub struct Lexer<'a> {
    src: &'a str,
    pos: usize,
}
impl<'a> Lexer<'a> {
    pub fn new(src: &'a str) -> Self {
        Self { src, pos: 0 }
    }
    ///byte offset of the next unread character
    pub fn pos(&self) -> usize {
        self.pos
    }
    fn take_while<F>(&mut self, start: usize, f: F) -> &'a str
    where
        F: Fn(char) -> bool,
    {
        let rest = &self.src[start..];
        let len = rest.find(|c: char| !f(c)).unwrap_or(rest.len());
        self.pos = start + len;
        &self.src[start..self.pos]
    }
}
impl<'a> Iterator for Lexer<'a> {
    type Item = (usize, Token<'a>);
    fn next(&mut self) -> Option<Self::Item> {
        while let Some(c) = self.src[self.pos..].chars().next() {
            let start = self.pos;
            if c.is_ascii_digit() || c == '.' {
                let s = self.take_while(start, |c| c.is_ascii_digit() || c == '.');
                return Some((start, Token::Num(s)));
            }
            if c.is_alphabetic() {
                let s = self.take_while(start, char::is_alphanumeric);
                return Some((start, Token::Ident(s)));
            }
            self.pos += c.len_utf8();
            if matches!(c, '+' | '-' | '*' | '/' | '^' | '(' | ')' | ',') {
                return Some((start, Token::Op(c)));
            }
        }
        None
    }
}
type Function = fn(f64, Option<f64>) -> f64;
const FUNCTIONS: [(&str, Function); 24] = [
    ("sin", |a, _| a.sin()),
    ("cos", |a, _| a.cos()),
    ("tan", |a, _| a.tan()),
    ("asin", |a, _| a.asin()),
    ("acos", |a, _| a.acos()),
    ("atan", |a, _| a.atan()),
    ("atan2", |a, b| a.atan2(b.unwrap_or(0.0))),
    ("sinh", |a, _| a.sinh()),
    ("cosh", |a, _| a.cosh()),
    ("tanh", |a, _| a.tanh()),
    ("exp", |a, _| a.exp()),
    ("log", |a, b| match b {
        Some(b) => a.ln() / b.ln(),
        None => a.log10(),
    }),
    ("ln", |a, _| a.ln()),
    ("log10", |a, _| a.log10()),
    ("sqrt", |a, _| a.sqrt()),
    ("abs", |a, _| a.abs()),
    ("floor", |a, _| a.floor()),
    ("ceil", |a, _| a.ceil()),
    ("round", |a, _| a.round()),
    ("sign", |a, _| if a == 0.0 { 0.0 } else { a.signum() }),
    ("min", |a, b| a.min(b.unwrap_or(0.0))),
    ("max", |a, b| a.max(b.unwrap_or(0.0))),
    ("pow", |a, b| a.powf(b.unwrap_or(0.0))),
    ("mod", |a, b| {
        let b = b.unwrap_or(0.0);
        a - b * (a / b).floor()
    }),
];
fn function(name: &str) -> Option<Function> {
    FUNCTIONS
        .iter()
        .find(|(n, _)| n.eq_ignore_ascii_case(name))
        .map(|(_, f)| *f)
}
struct Parser<'a> {
    lexer: Peekable<Lexer<'a>>,
    len: usize,
    x: f64,
    y: f64,
    z: f64,
    strict: bool,
    error: Option<ExprError>,
}
impl<'a> Parser<'a> {
    fn new(src: &'a str, x: f64, y: f64, z: f64, strict: bool) -> Self {
        Self {
            lexer: Lexer::new(src).peekable(),
            len: src.len(),
            x,
            y,
            z,
            strict,
            error: None,
        }
    }
    fn report<F>(&mut self, error: F)
    where
        F: FnOnce() -> ExprError,
    {
        if self.strict && self.error.is_none() {
            self.error = Some(error())
        }
    }
    fn peek_op(&mut self) -> Option<char> {
        match self.lexer.peek() {
            Some((_, Token::Op(c))) => Some(*c),
            _ => None,
        }
    }
    fn eat(&mut self, op: char) -> bool {
        if self.peek_op() == Some(op) {
            self.lexer.next();
            true
        } else {
            false
        }
    }
    fn peek_pos(&mut self) -> usize {
        match self.lexer.peek() {
            Some((pos, _)) => *pos,
            None => self.len,
        }
    }
    fn run(mut self) -> (f64, Option<ExprError>) {
        let value = self.expression();
        if let Some((pos, token)) = self.lexer.next() {
            if token == Token::Op(')') {
                self.report(|| ExprError::UnmatchedParen(pos))
            } else {
                self.report(|| ExprError::TrailingInput(pos))
            }
        }
        (value, self.error)
    }
    fn expression(&mut self) -> f64 {
        let mut value = self.term();
        loop {
            if self.eat('+') {
                value += self.term()
            } else if self.eat('-') {
                value -= self.term()
            } else {
                return value;
            }
        }
    }
    fn term(&mut self) -> f64 {
        let mut value = self.power();
        loop {
            if self.eat('*') {
                value *= self.power()
            } else if self.eat('/') {
                value /= self.power()
            } else {
                return value;
            }
        }
    }
    fn power(&mut self) -> f64 {
        let base = self.unary();
        if self.eat('^') {
            base.powf(self.unary())
        } else {
            base
        }
    }
    fn unary(&mut self) -> f64 {
        if self.eat('-') {
            -self.factor()
        } else {
            self.eat('+');
            self.factor()
        }
    }
    fn factor(&mut self) -> f64 {
        match self.lexer.peek().copied() {
            Some((_, Token::Num(s))) => {
                self.lexer.next();
                s.parse().unwrap_or_else(|_| {
                    self.report(|| ExprError::InvalidNumber(s.to_string()));
                    0.0
                })
            }
            Some((_, Token::Ident(name))) => {
                self.lexer.next();
                self.identifier(name)
            }
            Some((pos, Token::Op('('))) => {
                self.lexer.next();
                let value = self.expression();
                if !self.eat(')') {
                    self.report(|| ExprError::UnmatchedParen(pos))
                }
                value
            }
            _ => {
                let pos = self.peek_pos();
                self.report(|| ExprError::MissingOperand(pos));
                0.0
            }
        }
    }
    fn identifier(&mut self, name: &str) -> f64 {
        let is = |s: &str| name.eq_ignore_ascii_case(s);
        if is("x") {
            self.x
        } else if is("y") {
            self.y
        } else if is("z") {
            self.z
        } else if is("pi") {
            PI
        } else if is("e") {
            E
        } else if self.peek_op() == Some('(') {
            self.call(name)
        } else {
            self.report(|| ExprError::UnknownIdentifier(name.to_string()));
            0.0
        }
    }
    fn call(&mut self, name: &str) -> f64 {
        let open = self.peek_pos();
        self.lexer.next();
        let a = self.expression();
        let b = self.eat(',').then(|| self.expression());
        if !self.eat(')') {
            self.report(|| ExprError::UnmatchedParen(open))
        }
        match function(name) {
            Some(f) => f(a, b),
            None => {
                self.report(|| ExprError::UnknownFunction(name.to_string()));
                0.0
            }
        }
    }
}
///evaluates expr at the given point, never fails,
///missing operands and unknown names become 0 and unmatched or trailing tokens are ignored
pub fn evaluate(expr: &str, x: f64, y: f64, z: f64) -> f64 {
    Parser::new(expr, x, y, z, false).run().0
}
fn uses(expr: &str, var: &str) -> bool {
    Lexer::new(expr).any(|(_, t)| matches!(t, Token::Ident(n) if n.eq_ignore_ascii_case(var)))
}
///weather expr contains y as a standalone identifier
pub fn uses_y(expr: &str) -> bool {
    uses(expr, "y")
}
///weather expr contains z as a standalone identifier
pub fn uses_z(expr: &str) -> bool {
    uses(expr, "z")
}
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Expression {
    source: String,
}
impl Expression {
    pub fn new(source: impl Into<String>) -> Self {
        Self {
            source: source.into(),
        }
    }
    pub fn as_str(&self) -> &str {
        &self.source
    }
    pub fn evaluate(&self, x: f64, y: f64, z: f64) -> f64 {
        evaluate(&self.source, x, y, z)
    }
    ///evaluates like evaluate but returns the first leniency event as an error
    pub fn try_evaluate(&self, x: f64, y: f64, z: f64) -> Result<f64, ExprError> {
        if self.source.trim().is_empty() {
            return Err(ExprError::Empty);
        }
        match Parser::new(&self.source, x, y, z, true).run() {
            (_, Some(error)) => Err(error),
            (value, None) => Ok(value),
        }
    }
    ///one shot syntax probe at the origin
    pub fn validate(&self) -> Result<(), ExprError> {
        self.try_evaluate(0.0, 0.0, 0.0).map(|_| ())
    }
    pub fn uses_y(&self) -> bool {
        uses_y(&self.source)
    }
    pub fn uses_z(&self) -> bool {
        uses_z(&self.source)
    }
}
impl From<&str> for Expression {
    fn from(value: &str) -> Self {
        Self::new(value)
    }
}
