use std::fmt;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ScoreError {
    /// Tile or hand text notation could not be parsed.
    Parse { input: String, message: String },
    /// Malformed scoring input (tile-count arithmetic, impossible duplicates).
    InvalidInput { message: String },
    /// Win type outside {ron, tsumo}.
    InvalidWinType { input: String },
    /// The hand admits no winning decomposition at all.
    NotAWinningHand,
    /// A structurally complete decomposition carries zero han.
    NoYaku,
    /// Every candidate decomposition was excluded for lack of yaku.
    NoWinningInterpretation,
}

impl fmt::Display for ScoreError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ScoreError::Parse { input, message } => {
                write!(f, "Parse error on '{}': {}", input, message)
            }
            ScoreError::InvalidInput { message } => {
                write!(f, "Invalid input: {}", message)
            }
            ScoreError::InvalidWinType { input } => {
                write!(f, "Invalid win type: '{}' (expected 'ron' or 'tsumo')", input)
            }
            ScoreError::NotAWinningHand => {
                write!(f, "Hand has no winning decomposition")
            }
            ScoreError::NoYaku => {
                write!(f, "Decomposition is complete but has no yaku")
            }
            ScoreError::NoWinningInterpretation => {
                write!(f, "No decomposition of the hand qualifies for a win")
            }
        }
    }
}

impl std::error::Error for ScoreError {}

pub type ScoreResult<T> = Result<T, ScoreError>;
