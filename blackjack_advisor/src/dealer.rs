use crate::deck::Deck;
use crate::hand::Hand;
use crate::DEALER_STANDS_ON;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DealerPhase {
    Drawing,
    Done,
}

/// Why the dealer stopped drawing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DealerStop {
    /// Reached at least 17 without busting.
    Stood,
    Busted,
    /// The deck ran out while the total was still below 17.
    Exhausted,
}

/// The dealer draws while the total is below 17 and the deck is not empty.
pub fn next_phase(hand: &Hand, deck: &Deck) -> DealerPhase {
    if hand.total() < DEALER_STANDS_ON && !deck.is_empty() {
        DealerPhase::Drawing
    } else {
        DealerPhase::Done
    }
}

/// Plays the dealer's hand to completion, drawing from the top of `deck`.
///
/// Always terminates: every step in `Drawing` removes one card from the deck.
pub fn play_out(hand: &mut Hand, deck: &mut Deck) -> DealerStop {
    while next_phase(hand, deck) == DealerPhase::Drawing {
        match deck.draw() {
            Some(card) => hand.receive_card(card),
            None => break,
        }
    }

    let total = hand.total();
    if hand.is_bust() {
        DealerStop::Busted
    } else if total < DEALER_STANDS_ON {
        DealerStop::Exhausted
    } else {
        DealerStop::Stood
    }
}
