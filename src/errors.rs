use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FeatureError {
    // A zero window is a programming error at the call site, not bad data.
    #[error("rolling window must be at least 1, got {0}")]
    InvalidWindow(usize),

    #[error("cannot build matchup features from an empty team history")]
    EmptyHistory,

    // Absent map keys are a caller error, never treated as empty history.
    #[error("no weekly history for team {0:?}")]
    UnknownTeam(String),
}
