use strum_macros::EnumIter;

use crate::Error;

static FACE_VALUE_TO_RANK_VALUE: [u8; 13] = [11, 2, 3, 4, 5, 6, 7, 8, 9, 10, 10, 10, 10];
static FACE_VALUE_TO_SYMBOL: [char; 13] =
    ['A', '2', '3', '4', '5', '6', '7', '8', '9', 'T', 'J', 'Q', 'K'];

pub const ACE_VALUE: u8 = 11;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, EnumIter)]
pub enum Suit {
    Spade = 0,
    Heart,
    Diamond,
    Club,
}

impl Suit {
    pub fn symbol(&self) -> char {
        match self {
            Suit::Spade => '♠',
            Suit::Heart => '♥',
            Suit::Diamond => '♦',
            Suit::Club => '♣',
        }
    }
}

/// Represents a card in the real world with a suit and a face value.
///
/// The face value is in [1, 13], where 1 stands for Ace and 11, 12, 13 stand for
/// J, Q, K. An Ace always carries rank value 11 here; counting it as 1 is up to
/// the hand evaluation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Card {
    face_value: u8,
    suit: Suit,
}

impl Card {
    pub fn new(face_value: u8, suit: Suit) -> Result<Card, Error> {
        if face_value == 0 || face_value > 13 {
            return Err(Error::InvalidCard(face_value));
        }
        Ok(Card { face_value, suit })
    }

    pub fn face_value(&self) -> u8 {
        self.face_value
    }

    pub fn suit(&self) -> Suit {
        self.suit
    }

    /// Value used for scoring, in [2, 11].
    pub fn rank_value(&self) -> u8 {
        FACE_VALUE_TO_RANK_VALUE[(self.face_value - 1) as usize]
    }

    pub fn is_ace(&self) -> bool {
        self.rank_value() == ACE_VALUE
    }
}

impl std::fmt::Display for Card {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let rank = FACE_VALUE_TO_SYMBOL[(self.face_value - 1) as usize];
        write!(f, "{}{}", rank, self.suit.symbol())
    }
}

impl From<Card> for u8 {
    fn from(card: Card) -> u8 {
        card.suit as u8 * 13 + card.face_value - 1
    }
}

impl TryFrom<u8> for Card {
    type Error = Error;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        let suit = match value / 13 {
            0 => Suit::Spade,
            1 => Suit::Heart,
            2 => Suit::Diamond,
            3 => Suit::Club,
            _ => return Err(Error::InvalidCard(value)),
        };
        Card::new(value % 13 + 1, suit)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rank_values_follow_blackjack_scoring() {
        let values: Vec<u8> = (1..=13)
            .map(|face_value| Card::new(face_value, Suit::Club).unwrap().rank_value())
            .collect();
        assert_eq!(values, vec![11, 2, 3, 4, 5, 6, 7, 8, 9, 10, 10, 10, 10]);
        assert!(Card::new(1, Suit::Heart).unwrap().is_ace());
        assert!(!Card::new(13, Suit::Heart).unwrap().is_ace());
    }

    #[test]
    fn display_shows_rank_then_suit() {
        assert_eq!(Card::new(1, Suit::Spade).unwrap().to_string(), "A♠");
        assert_eq!(Card::new(10, Suit::Heart).unwrap().to_string(), "T♥");
        assert_eq!(Card::new(12, Suit::Diamond).unwrap().to_string(), "Q♦");
        assert_eq!(Card::new(7, Suit::Club).unwrap().to_string(), "7♣");
    }

    #[test]
    fn invalid_face_values_are_rejected() {
        assert!(matches!(Card::new(0, Suit::Spade), Err(Error::InvalidCard(0))));
        assert!(matches!(Card::new(14, Suit::Spade), Err(Error::InvalidCard(14))));
        assert!(Card::try_from(52).is_err());
    }

    #[test]
    fn integer_conversion_covers_every_card_once() {
        for index in 0..52u8 {
            let card = Card::try_from(index).unwrap();
            let back: u8 = card.into();
            assert_eq!(back, index);
        }
    }
}
