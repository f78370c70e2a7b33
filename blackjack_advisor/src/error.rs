use thiserror::Error;

use crate::round::GamePhase;

#[derive(Error, Debug)]
pub enum Error {
    #[error("number of trials must be positive")]
    ZeroTrials,
    #[error("invalid card: {0}")]
    InvalidCard(u8),
    #[error("deck has {available} cards, {needed} are needed")]
    NotEnoughCards { needed: usize, available: usize },
    #[error("{method} is only allowed in {allowed:?} phase, current phase is {actual:?}")]
    PhaseNotAllowed {
        method: &'static str,
        allowed: GamePhase,
        actual: GamePhase,
    },
    #[error("estimator worker thread panicked")]
    WorkerPanicked,
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}
