use thiserror::Error;
///diagnostics recorded while parsing an expression,
///
///the lenient evaluator never returns these, only Expression::try_evaluate and Expression::validate do
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ExprError {
    #[error("expression is empty")]
    Empty,
    #[error("missing operand at {0}")]
    MissingOperand(usize),
    #[error("unmatched parenthesis at {0}")]
    UnmatchedParen(usize),
    #[error("unexpected input at {0}")]
    TrailingInput(usize),
    #[error("invalid number `{0}`")]
    InvalidNumber(String),
    #[error("unknown identifier `{0}`")]
    UnknownIdentifier(String),
    #[error("unknown function `{0}`")]
    UnknownFunction(String),
}
#[derive(Error, Debug)]
pub enum PlotError {
    #[error("invalid function syntax: {0}")]
    InvalidSyntax(#[from] ExprError),
    #[error("canvas has no area ({0}x{1})")]
    EmptyCanvas(u32, u32),
    #[error("framebuffer holds {got} pixels, expected {expected}")]
    Framebuffer { got: usize, expected: usize },
    #[error("could not decode view: {0}")]
    ViewDecode(&'static str),
    #[cfg(feature = "tiny-skia-png")]
    #[error("png encoding failed: {0}")]
    Png(String),
}
