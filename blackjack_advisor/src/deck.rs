use rand::seq::SliceRandom;
use rand::Rng;
use strum::IntoEnumIterator;

use crate::card::{Card, Suit};

pub const CARDS_IN_DECK: usize = 52;

/// The draw source of a single-deck round. Cards are drawn from the end of the
/// inner vector, so the last element is the top of the deck.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Deck {
    cards: Vec<Card>,
}

impl Deck {
    /// Creates a new deck with ordered cards: every rank from Ace to King, each
    /// in all four suits.
    pub fn new() -> Deck {
        let mut cards = Vec::with_capacity(CARDS_IN_DECK);
        for face_value in 1..=13 {
            for suit in Suit::iter() {
                // face_value is always within [1, 13] here.
                if let Ok(card) = Card::new(face_value, suit) {
                    cards.push(card);
                }
            }
        }
        Deck { cards }
    }

    /// Creates a new deck and shuffles it with the given random source.
    pub fn shuffled<R: Rng + ?Sized>(rng: &mut R) -> Deck {
        let mut deck = Deck::new();
        deck.shuffle(rng);
        deck
    }

    /// Uses the given cards as they are. The last card is the first one drawn.
    pub fn from_cards(cards: Vec<Card>) -> Deck {
        Deck { cards }
    }

    pub fn shuffle<R: Rng + ?Sized>(&mut self, rng: &mut R) {
        self.cards.shuffle(rng);
    }

    /// Removes the top card. Returns None if empty.
    pub fn draw(&mut self) -> Option<Card> {
        self.cards.pop()
    }

    pub fn len(&self) -> usize {
        self.cards.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }

    pub fn cards(&self) -> &[Card] {
        &self.cards
    }
}

impl Default for Deck {
    fn default() -> Self {
        Deck::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn every_card_appears_once(deck: &Deck) -> bool {
        let mut counts = [0u8; CARDS_IN_DECK];
        for card in deck.cards() {
            let card_integer: u8 = (*card).into();
            counts[card_integer as usize] += 1;
        }
        counts.iter().all(|count| *count == 1)
    }

    #[test]
    fn new_deck_is_complete_and_ordered() {
        let deck = Deck::new();
        assert_eq!(deck.len(), CARDS_IN_DECK);
        assert!(every_card_appears_once(&deck));
        assert_eq!(deck.cards()[0].to_string(), "A♠");
        assert_eq!(deck.cards()[3].to_string(), "A♣");
        assert_eq!(deck.cards()[51].to_string(), "K♣");
    }

    #[test]
    fn shuffled_deck_keeps_every_card() {
        let mut rng = StdRng::seed_from_u64(7);
        let deck = Deck::shuffled(&mut rng);
        assert_eq!(deck.len(), CARDS_IN_DECK);
        assert!(every_card_appears_once(&deck));
        assert_ne!(deck, Deck::new());
    }

    #[test]
    fn draws_from_the_top_until_exhausted() {
        let first = Card::new(5, Suit::Heart).unwrap();
        let top = Card::new(9, Suit::Club).unwrap();
        let mut deck = Deck::from_cards(vec![first, top]);
        assert_eq!(deck.draw(), Some(top));
        assert_eq!(deck.draw(), Some(first));
        assert!(deck.is_empty());
        assert_eq!(deck.draw(), None);
    }

    #[test]
    fn same_seed_gives_same_order() {
        let a = Deck::shuffled(&mut StdRng::seed_from_u64(42));
        let b = Deck::shuffled(&mut StdRng::seed_from_u64(42));
        assert_eq!(a, b);
    }
}
