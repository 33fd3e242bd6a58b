use serde::Serialize;

/// Category of a penalty term: hard terms (category 0) express labor-rule violations, soft terms
/// (category 1) express operational cost.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum ScoreLevel {
    Hard,
    Soft,
}

impl ScoreLevel {
    pub fn category(&self) -> u8 {
        match self {
            ScoreLevel::Hard => 0,
            ScoreLevel::Soft => 1,
        }
    }
}
