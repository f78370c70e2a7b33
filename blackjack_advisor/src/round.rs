use blackjack_macros::allowed_phase;
use rand::Rng;

use crate::card::Card;
use crate::dealer::{self, DealerStop};
use crate::deck::Deck;
use crate::estimator::{Estimator, RoundSnapshot, WinEstimate};
use crate::hand::Hand;
use crate::{Decision, Error, BLACKJACK};

const INITIAL_CARDS: usize = 4;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GamePhase {
    PlayerTurn,
    DealerTurn,
    Finished,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    /// The player went over 21. The dealer does not play.
    PlayerBust,
    DealerBust,
    PlayerWins,
    DealerWins,
    Push,
}

impl Outcome {
    pub fn player_won(&self) -> bool {
        matches!(self, Outcome::DealerBust | Outcome::PlayerWins)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HitResult {
    Drew(Card),
    /// The drawn card took the player over 21 and ended the round.
    Busted(Card),
    /// Nothing left to draw. The player's turn is over.
    DeckExhausted,
}

/// Supplies the player's choices to `Round::play`.
pub trait DecisionMaker {
    /// Returns None when the player gave something that is neither Hit nor
    /// Stand. The round then asks again without changing any state.
    fn decide(&mut self, player_hand: &Hand, dealer_hand: &Hand) -> Result<Option<Decision>, Error>;
}

/// Receives everything that happens during `Round::play`.
pub trait RoundEventHandler {
    fn on_decision_point(&mut self, player_hand: &Hand, dealer_hand: &Hand) -> Result<(), Error>;
    fn on_estimate(&mut self, estimate: &WinEstimate) -> Result<(), Error>;
    fn on_invalid_decision(&mut self) -> Result<(), Error>;
    fn on_stand(&mut self) -> Result<(), Error>;
    fn on_hit(
        &mut self,
        result: &HitResult,
        player_hand: &Hand,
        dealer_hand: &Hand,
    ) -> Result<(), Error>;
    fn on_dealer_reveal(&mut self, dealer_hand: &Hand) -> Result<(), Error>;
    fn on_summary(
        &mut self,
        player_hand: &Hand,
        dealer_hand: &Hand,
        dealer_stop: Option<DealerStop>,
        outcome: Outcome,
    ) -> Result<(), Error>;
}

/// One round of single-deck Blackjack: the deck and both hands.
#[derive(Debug, Clone)]
pub struct Round {
    current_game_phase: GamePhase,
    deck: Deck,
    player_hand: Hand,
    dealer_hand: Hand,
    dealer_stop: Option<DealerStop>,
    outcome: Option<Outcome>,
}

impl Round {
    /// Shuffles a fresh deck and deals the initial cards.
    pub fn deal<R: Rng + ?Sized>(rng: &mut R) -> Result<Round, Error> {
        Round::from_deck(Deck::shuffled(rng))
    }

    /// Deals player, dealer, player, dealer from the top of the given deck.
    pub fn from_deck(mut deck: Deck) -> Result<Round, Error> {
        if deck.len() < INITIAL_CARDS {
            return Err(Error::NotEnoughCards {
                needed: INITIAL_CARDS,
                available: deck.len(),
            });
        }

        let mut player_hand = Hand::new();
        let mut dealer_hand = Hand::new();
        for _ in 0..2 {
            if let Some(card) = deck.draw() {
                player_hand.receive_card(card);
            }
            if let Some(card) = deck.draw() {
                dealer_hand.receive_card(card);
            }
        }
        log::info!(
            "new round: player {} ({}), dealer {}",
            player_hand,
            player_hand.total(),
            dealer_hand
        );

        Ok(Round {
            current_game_phase: GamePhase::PlayerTurn,
            deck,
            player_hand,
            dealer_hand,
            dealer_stop: None,
            outcome: None,
        })
    }

    pub fn phase(&self) -> GamePhase {
        self.current_game_phase
    }

    pub fn deck(&self) -> &Deck {
        &self.deck
    }

    pub fn player_hand(&self) -> &Hand {
        &self.player_hand
    }

    pub fn dealer_hand(&self) -> &Hand {
        &self.dealer_hand
    }

    pub fn dealer_stop(&self) -> Option<DealerStop> {
        self.dealer_stop
    }

    /// Available once the round is finished.
    pub fn outcome(&self) -> Option<Outcome> {
        self.outcome
    }

    pub fn snapshot(&self) -> RoundSnapshot<'_> {
        RoundSnapshot {
            deck: &self.deck,
            player: &self.player_hand,
            dealer: &self.dealer_hand,
        }
    }

    /// Estimated probability of winning if the player stands now.
    #[allowed_phase(PlayerTurn)]
    pub fn estimate_stand<R: Rng + ?Sized>(
        &self,
        estimator: &Estimator,
        rng: &mut R,
    ) -> Result<WinEstimate, Error> {
        estimator.estimate(&self.snapshot(), rng)
    }

    #[allowed_phase(PlayerTurn)]
    pub fn hit(&mut self) -> Result<HitResult, Error> {
        let card = match self.deck.draw() {
            Some(card) => card,
            None => {
                log::warn!("player hit on an empty deck");
                self.current_game_phase = GamePhase::DealerTurn;
                return Ok(HitResult::DeckExhausted);
            }
        };

        self.player_hand.receive_card(card);
        if self.player_hand.is_bust() {
            self.finish(Outcome::PlayerBust);
            return Ok(HitResult::Busted(card));
        }
        Ok(HitResult::Drew(card))
    }

    #[allowed_phase(PlayerTurn)]
    pub fn stand(&mut self) -> Result<(), Error> {
        self.current_game_phase = GamePhase::DealerTurn;
        Ok(())
    }

    /// The dealer plays out the hand, then the totals are compared.
    #[allowed_phase(DealerTurn)]
    pub fn play_dealer(&mut self) -> Result<Outcome, Error> {
        let stop = dealer::play_out(&mut self.dealer_hand, &mut self.deck);
        if stop == DealerStop::Exhausted {
            log::warn!("deck exhausted with dealer at {}", self.dealer_hand.total());
        }
        log::debug!("dealer stopped ({:?}) at {}", stop, self.dealer_hand.total());
        self.dealer_stop = Some(stop);

        let player_total = self.player_hand.total();
        let dealer_total = self.dealer_hand.total();
        let outcome = if dealer_total > BLACKJACK {
            Outcome::DealerBust
        } else if player_total > dealer_total {
            Outcome::PlayerWins
        } else if player_total < dealer_total {
            Outcome::DealerWins
        } else {
            Outcome::Push
        };
        self.finish(outcome);
        Ok(outcome)
    }

    /// Plays the whole round. Before every decision the stand-now estimate is
    /// computed and reported, then `decider` is asked what to do. After the
    /// player's turn the dealer plays unless the player busted.
    pub fn play<R, D, H>(
        &mut self,
        estimator: &Estimator,
        rng: &mut R,
        decider: &mut D,
        handler: &mut H,
    ) -> Result<Outcome, Error>
    where
        R: Rng + ?Sized,
        D: DecisionMaker,
        H: RoundEventHandler,
    {
        while self.current_game_phase == GamePhase::PlayerTurn {
            handler.on_decision_point(&self.player_hand, &self.dealer_hand)?;
            let estimate = self.estimate_stand(estimator, rng)?;
            handler.on_estimate(&estimate)?;

            match decider.decide(&self.player_hand, &self.dealer_hand)? {
                Some(Decision::Stand) => {
                    self.stand()?;
                    handler.on_stand()?;
                }
                Some(Decision::Hit) => {
                    let result = self.hit()?;
                    handler.on_hit(&result, &self.player_hand, &self.dealer_hand)?;
                }
                None => handler.on_invalid_decision()?,
            }
        }

        if self.current_game_phase == GamePhase::DealerTurn {
            handler.on_dealer_reveal(&self.dealer_hand)?;
            self.play_dealer()?;
        }

        let outcome = match self.outcome {
            Some(outcome) => outcome,
            None => {
                return Err(Error::PhaseNotAllowed {
                    method: "play",
                    allowed: GamePhase::Finished,
                    actual: self.current_game_phase,
                })
            }
        };
        handler.on_summary(
            &self.player_hand,
            &self.dealer_hand,
            self.dealer_stop,
            outcome,
        )?;
        Ok(outcome)
    }

    fn finish(&mut self, outcome: Outcome) {
        log::info!(
            "round finished: {:?} (player {}, dealer {})",
            outcome,
            self.player_hand.total(),
            self.dealer_hand.total()
        );
        self.outcome = Some(outcome);
        self.current_game_phase = GamePhase::Finished;
    }
}
