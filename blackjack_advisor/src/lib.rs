pub mod card;
pub mod dealer;
pub mod deck;
mod error;
pub mod estimator;
pub mod hand;
pub mod round;

pub use card::{Card, Suit};
pub use dealer::DealerStop;
pub use deck::Deck;
pub use error::Error;
pub use estimator::{estimate_win_probability, Estimator, RoundSnapshot, WinEstimate};
pub use hand::Hand;
pub use round::{DecisionMaker, GamePhase, HitResult, Outcome, Round, RoundEventHandler};

/// The best possible hand total. Anything above busts.
pub const BLACKJACK: u16 = 21;

/// The dealer keeps drawing while the hand total is below this value.
pub const DEALER_STANDS_ON: u16 = 17;

/// Number of Monte Carlo trials used when nothing else is configured.
pub const DEFAULT_TRIALS: u32 = 5000;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Decision {
    Hit,
    Stand,
}

impl Decision {
    /// Parses a single-character command, case-insensitive. Returns None for
    /// anything other than `H` or `S`.
    pub fn from_input(input: &str) -> Option<Decision> {
        let mut chars = input.trim().chars();
        let command = chars.next()?;
        if chars.next().is_some() {
            return None;
        }
        match command.to_ascii_uppercase() {
            'H' => Some(Decision::Hit),
            'S' => Some(Decision::Stand),
            _ => None,
        }
    }
}
