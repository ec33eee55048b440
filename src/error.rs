use thiserror::Error;

/// Errors that can occur when manipulating the game state.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum GameError {
    #[error("die index {0} is out of range")]
    DieIndex(usize),
    #[error("invalid configuration: {0}")]
    InvalidConfiguration(&'static str),
}
