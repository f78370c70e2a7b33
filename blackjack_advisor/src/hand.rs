use crate::card::Card;
use crate::BLACKJACK;

/// Cards held by the player or the dealer during one round. Only grows.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Hand {
    cards: Vec<Card>,
}

impl Hand {
    pub fn new() -> Hand {
        Hand {
            cards: Vec::with_capacity(5),
        }
    }

    pub fn from_cards(cards: Vec<Card>) -> Hand {
        Hand { cards }
    }

    pub fn receive_card(&mut self, card: Card) {
        self.cards.push(card);
    }

    pub fn cards(&self) -> &[Card] {
        &self.cards
    }

    pub fn len(&self) -> usize {
        self.cards.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }

    /// Sum of rank values with every Ace counted as 11.
    pub fn raw_sum(&self) -> u16 {
        self.cards.iter().map(|card| card.rank_value() as u16).sum()
    }

    fn number_of_aces(&self) -> u16 {
        self.cards.iter().filter(|card| card.is_ace()).count() as u16
    }

    /// The best total of the hand and how many aces were counted as 1 to get it.
    fn evaluate(&self) -> (u16, u16) {
        let mut total = self.raw_sum();
        let mut aces = self.number_of_aces();
        let mut softened = 0;
        while total > BLACKJACK && aces > 0 {
            total -= 10;
            aces -= 1;
            softened += 1;
        }
        (total, softened)
    }

    /// Best total of the hand. Aces count as 11 unless that busts the hand,
    /// in which case they are counted as 1 one at a time.
    pub fn total(&self) -> u16 {
        self.evaluate().0
    }

    pub fn is_bust(&self) -> bool {
        self.total() > BLACKJACK
    }

    /// True if at least one Ace is still counted as 11 in `total`.
    pub fn is_soft(&self) -> bool {
        let (_, softened) = self.evaluate();
        self.number_of_aces() > softened
    }

    pub fn is_natural(&self) -> bool {
        self.cards.len() == 2 && self.total() == BLACKJACK
    }
}

impl std::fmt::Display for Hand {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        for (i, card) in self.cards.iter().enumerate() {
            if i > 0 {
                write!(f, " ")?;
            }
            write!(f, "{}", card)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::card::Suit;

    fn hand_of(face_values: &[u8]) -> Hand {
        Hand::from_cards(
            face_values
                .iter()
                .map(|face_value| Card::new(*face_value, Suit::Spade).unwrap())
                .collect(),
        )
    }

    #[test]
    fn softens_only_as_many_aces_as_needed() {
        let hand = hand_of(&[1, 1, 9]);
        assert_eq!(hand.raw_sum(), 31);
        assert_eq!(hand.total(), 21);
        assert!(!hand.is_bust());
        assert!(hand.is_soft());

        let hand = hand_of(&[1, 1, 1, 9]);
        assert_eq!(hand.raw_sum(), 42);
        assert_eq!(hand.total(), 22);
        assert!(hand.is_bust());
        assert!(!hand.is_soft());
    }

    #[test]
    fn total_matches_smallest_softening_that_fits() {
        // For raw sum S with k aces, total = S - 10m with the smallest m in [0, k]
        // such that S - 10m <= 21, or m = k when none fits.
        for aces in 0..=4u8 {
            for other in 2..=13u8 {
                for extra in 2..=13u8 {
                    let mut face_values = vec![1; aces as usize];
                    face_values.push(other);
                    face_values.push(extra);
                    let hand = hand_of(&face_values);

                    let raw = hand.raw_sum();
                    let mut expected = raw;
                    for _ in 0..aces {
                        if expected > 21 {
                            expected -= 10;
                        }
                    }
                    assert_eq!(hand.total(), expected, "hand {}", hand);
                    assert_eq!(hand.is_bust(), hand.total() > 21, "hand {}", hand);
                }
            }
        }
    }

    #[test]
    fn hard_hands_bust_over_21() {
        assert_eq!(hand_of(&[10, 13]).total(), 20);
        assert!(!hand_of(&[10, 13]).is_soft());
        assert!(hand_of(&[10, 13, 2]).is_bust());
        assert!(!hand_of(&[10, 11]).is_bust());
    }

    #[test]
    fn natural_needs_exactly_two_cards() {
        assert!(hand_of(&[1, 13]).is_natural());
        assert!(!hand_of(&[7, 7, 7]).is_natural());
        assert!(!hand_of(&[10, 9]).is_natural());
    }

    #[test]
    fn display_lists_cards() {
        assert_eq!(hand_of(&[1, 10]).to_string(), "A♠ T♠");
    }
}
