use std::fmt;

/// Everything an engine operation can report back to its caller.
///
/// Every variant carries a short reason meant for the player.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Error {
    /// A pile number or card index is out of range.
    InvalidIndex(String),
    /// The operation needs cards from an empty pile, stock or waste.
    IllegalState(String),
    /// The placement breaks a sequencing rule.
    RuleViolation(String),
    /// Every candidate destination was tried and none accepted the cards.
    NoFit(String),
    /// Unrecognized suit or rank.
    Unknown(String),
}

pub type Result<T> = std::result::Result<T, Error>;

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidIndex(s) => write!(f, "invalid index: {}", s),
            Self::IllegalState(s) => write!(f, "illegal state: {}", s),
            Self::RuleViolation(s) => write!(f, "rule violation: {}", s),
            Self::NoFit(s) => write!(f, "no fit: {}", s),
            Self::Unknown(s) => write!(f, "unknown: {}", s),
        }
    }
}

impl std::error::Error for Error {}
