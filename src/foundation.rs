use crate::card::{Card, Rank, Suit};
use crate::error::{Error, Result};
use crate::undo::{UndoLog, Undoable};
use arrayvec::ArrayVec;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

pub type FoundationPile = ArrayVec<Card, 13>;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FoundationUndo {
    /// A card went onto this suit's pile.
    Put { suit: Suit },
    /// This card came off its suit's pile.
    Got { card: Card },
}

/// Four (or fewer) suit piles, each built up from Ace to King.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Foundation {
    pub(crate) piles: BTreeMap<Suit, FoundationPile>,
    #[serde(skip)]
    undo_log: UndoLog<FoundationUndo>,
}

impl Foundation {
    pub fn new(suits: &[Suit]) -> Self {
        Self {
            piles: suits.iter().map(|&suit| (suit, ArrayVec::new())).collect(),
            undo_log: UndoLog::default(),
        }
    }

    pub fn piles(&self) -> &BTreeMap<Suit, FoundationPile> {
        &self.piles
    }

    pub fn pile(&self, suit: Suit) -> Option<&[Card]> {
        self.piles.get(&suit).map(|pile| pile.as_slice())
    }

    pub fn undo_len(&self) -> usize {
        self.undo_log.len()
    }

    /// Checks a placement without performing it.
    pub fn accepts(&self, card: &Card) -> Result<Suit> {
        if !card.is_revealed() {
            return Err(Error::RuleViolation(
                "foundation cards must be revealed before placing".into(),
            ));
        }
        let (Some(rank), Some(suit)) = (card.rank(), card.suit()) else {
            return Err(Error::RuleViolation("jokers cannot be played".into()));
        };
        let pile = self
            .piles
            .get(&suit)
            .ok_or_else(|| Error::Unknown(format!("no foundation pile for {}", suit)))?;
        match pile.last().and_then(Card::rank) {
            None if rank != Rank::Ace => Err(Error::RuleViolation(
                "the first card on a foundation pile must be an ace".into(),
            )),
            Some(top) if rank.value() != top.value() + 1 => Err(Error::RuleViolation(
                "foundation cards must be built sequentially by suit".into(),
            )),
            _ => Ok(suit),
        }
    }

    pub fn put(&mut self, card: Card) -> Result<()> {
        let suit = self.accepts(&card)?;
        if let Some(pile) = self.piles.get_mut(&suit) {
            pile.push(card);
        }
        self.undo_log.record(FoundationUndo::Put { suit });
        Ok(())
    }

    pub fn get(&mut self, suit: Suit) -> Result<Card> {
        let pile = self
            .piles
            .get_mut(&suit)
            .ok_or_else(|| Error::Unknown(format!("no foundation pile for {}", suit)))?;
        let card = pile
            .pop()
            .ok_or_else(|| Error::IllegalState(format!("the {} foundation pile is empty", suit)))?;
        self.undo_log.record(FoundationUndo::Got { card });
        Ok(card)
    }

    /// Every suit pile holds Ace through King.
    pub fn is_full(&self) -> bool {
        !self.piles.is_empty() && self.piles.values().all(|pile| pile.is_full())
    }
}

impl Undoable for Foundation {
    type Command = FoundationUndo;

    fn undo_log(&mut self) -> &mut UndoLog<FoundationUndo> {
        &mut self.undo_log
    }

    fn apply_inverse(&mut self, command: FoundationUndo) -> Result<()> {
        match command {
            FoundationUndo::Put { suit } => self
                .piles
                .get_mut(&suit)
                .and_then(|pile| pile.pop())
                .map(|_| ())
                .ok_or_else(|| Error::IllegalState(format!("nothing to take back from {}", suit))),
            FoundationUndo::Got { card } => {
                let suit = card
                    .suit()
                    .ok_or_else(|| Error::IllegalState("a joker left the foundation".into()))?;
                self.piles
                    .get_mut(&suit)
                    .ok_or_else(|| Error::Unknown(format!("no foundation pile for {}", suit)))?
                    .try_push(card)
                    .map_err(|_| Error::IllegalState(format!("the {} foundation pile is full", suit)))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn up(rank: Rank, suit: Suit) -> Card {
        Card::new(rank, suit).revealed()
    }

    #[test]
    fn put() {
        let mut f = Foundation::new(&Suit::ALL);
        assert!(matches!(
            f.put(Card::new(Rank::Ace, Suit::Hearts)),
            Err(Error::RuleViolation(_))
        ));
        assert!(f.put(up(Rank::Ace, Suit::Hearts)).is_ok());
        assert!(f.put(up(Rank::Two, Suit::Hearts)).is_ok());
        assert!(matches!(f.put(up(Rank::King, Suit::Hearts)), Err(Error::RuleViolation(_))));
        assert!(matches!(f.put(up(Rank::King, Suit::Diamonds)), Err(Error::RuleViolation(_))));
        assert!(matches!(f.put(up(Rank::Ace, Suit::Hearts)), Err(Error::RuleViolation(_))));
        assert!(matches!(f.put(Card::joker().revealed()), Err(Error::RuleViolation(_))));
        assert_eq!(f.pile(Suit::Hearts).map(<[Card]>::len), Some(2));
        assert_eq!(f.undo_len(), 2);
    }

    #[test]
    fn unknown_suit() {
        let mut f = Foundation::new(&[Suit::Hearts]);
        assert!(matches!(f.put(up(Rank::Ace, Suit::Spades)), Err(Error::Unknown(_))));
        assert!(matches!(f.get(Suit::Clubs), Err(Error::Unknown(_))));
    }

    #[test]
    fn get() {
        let mut f = Foundation::new(&Suit::ALL);
        assert!(matches!(f.get(Suit::Hearts), Err(Error::IllegalState(_))));
        f.put(up(Rank::Ace, Suit::Clubs)).unwrap();
        assert_eq!(f.get(Suit::Clubs), Ok(up(Rank::Ace, Suit::Clubs)));
        assert_eq!(f.pile(Suit::Clubs), Some(&[][..]));
        f.undo().unwrap();
        assert_eq!(f.pile(Suit::Clubs), Some(&[up(Rank::Ace, Suit::Clubs)][..]));
    }

    #[test]
    fn undo_put() {
        let mut f = Foundation::new(&Suit::ALL);
        assert_eq!(f.pile(Suit::Hearts).map(<[Card]>::len), Some(0));
        f.put(up(Rank::Ace, Suit::Hearts)).unwrap();
        assert_eq!(f.pile(Suit::Hearts).map(<[Card]>::len), Some(1));
        f.undo().unwrap();
        assert_eq!(f.pile(Suit::Hearts).map(<[Card]>::len), Some(0));
        assert_eq!(f.undo_len(), 0);
        assert_eq!(f.undo(), Ok(()));
    }

    #[test]
    fn full() {
        let mut f = Foundation::new(&Suit::ALL);
        assert!(!f.is_full());
        for suit in Suit::ALL {
            for rank in Rank::ALL {
                f.put(up(rank, suit)).unwrap();
            }
            assert!(matches!(f.put(up(Rank::King, suit)), Err(Error::RuleViolation(_))));
        }
        assert!(f.is_full());
        f.get(Suit::Spades).unwrap();
        assert!(!f.is_full());
    }
}
