use crate::card::{are_card_colors_different, are_card_ranks_sequential, Card, Rank};
use crate::deck::Deck;
use crate::error::{Error, Result};
use crate::undo::{UndoLog, Undoable};
use log::trace;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TableauUndo {
    /// `count` cards were appended to `pile`.
    Put { pile: usize, count: usize },
    /// `run` was lifted off `pile`; `revealed` if that exposed and turned a card.
    Got {
        pile: usize,
        run: Vec<Card>,
        revealed: bool,
    },
}

/// The seven (or `size`) playing piles, bottom card first.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Tableau {
    pub(crate) piles: Vec<Vec<Card>>,
    #[serde(skip)]
    undo_log: UndoLog<TableauUndo>,
}

impl Tableau {
    pub fn new(size: usize) -> Self {
        Self {
            piles: vec![Vec::new(); size],
            undo_log: UndoLog::default(),
        }
    }

    /// Deals the triangular opening layout: pile `i` gets `i + 1` cards and
    /// only the last card dealt into each pile is face up.
    pub fn dealt(size: usize, deck: &mut Deck) -> Result<Self> {
        let mut tableau = Self::new(size);
        for start in 0..size {
            for pile in start..size {
                let mut card = Self::deal_playable(deck)?;
                if pile == start {
                    card.reveal();
                }
                tableau.piles[pile].push(card);
            }
        }
        Ok(tableau)
    }

    fn deal_playable(deck: &mut Deck) -> Result<Card> {
        loop {
            match deck.deal() {
                Some(card) if card.is_joker() => continue,
                Some(card) => return Ok(card),
                None => {
                    return Err(Error::IllegalState(
                        "ran out of cards while dealing the tableau".into(),
                    ))
                }
            }
        }
    }

    pub fn piles(&self) -> &[Vec<Card>] {
        &self.piles
    }

    pub fn pile(&self, pile: usize) -> Option<&[Card]> {
        self.piles.get(pile).map(Vec::as_slice)
    }

    pub fn len(&self) -> usize {
        self.piles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.piles.is_empty()
    }

    pub fn undo_len(&self) -> usize {
        self.undo_log.len()
    }

    /// Checks whether a run headed by `bottom` may go onto `pile`.
    pub fn accepts(&self, bottom: &Card, pile: usize) -> Result<()> {
        if !bottom.is_revealed() {
            return Err(Error::RuleViolation(
                "concealed cards may not be put on the tableau".into(),
            ));
        }
        if bottom.is_joker() {
            return Err(Error::RuleViolation("jokers cannot be played".into()));
        }
        let target = self
            .piles
            .get(pile)
            .ok_or_else(|| Error::InvalidIndex(format!("invalid pile number {}", pile)))?;
        match target.last() {
            None if bottom.rank() == Some(Rank::King) => Ok(()),
            None => Err(Error::RuleViolation(
                "only kings may be built on empty tableau piles".into(),
            )),
            Some(top)
                if are_card_colors_different(bottom, top)
                    && are_card_ranks_sequential(bottom, top) =>
            {
                Ok(())
            }
            Some(_) => Err(Error::RuleViolation(
                "tableau cards must be built in descending order with alternate colors".into(),
            )),
        }
    }

    pub fn put(&mut self, run: Vec<Card>, pile: usize) -> Result<()> {
        let bottom = run
            .first()
            .ok_or_else(|| Error::IllegalState("cannot put an empty run".into()))?;
        if let Err(e) = self.accepts(bottom, pile) {
            trace!("tableau pile {} rejected {}: {}", pile, bottom, e);
            return Err(e);
        }
        let count = run.len();
        self.piles[pile].extend(run);
        self.undo_log.record(TableauUndo::Put { pile, count });
        Ok(())
    }

    /// Lifts every card from `index` to the top of `pile`. A card left
    /// exposed face down is turned up.
    pub fn get(&mut self, pile: usize, index: usize) -> Result<Vec<Card>> {
        let cards = self
            .piles
            .get_mut(pile)
            .ok_or_else(|| Error::InvalidIndex(format!("invalid pile number {}", pile)))?;
        let card = cards
            .get(index)
            .ok_or_else(|| Error::InvalidIndex(format!("invalid card number {}", index)))?;
        if !card.is_revealed() {
            return Err(Error::RuleViolation(format!(
                "card {} of pile {} is concealed",
                index, pile
            )));
        }
        let run = cards.split_off(index);
        let revealed = self.reveal(pile);
        self.undo_log.record(TableauUndo::Got {
            pile,
            run: run.clone(),
            revealed,
        });
        Ok(run)
    }

    /// Turns up the top card of `pile`; true if it was face down.
    fn reveal(&mut self, pile: usize) -> bool {
        match self.piles[pile].last_mut() {
            Some(top) if !top.is_revealed() => {
                top.reveal();
                true
            }
            _ => false,
        }
    }

    /// Turns down the top card of `pile`; true if it was face up.
    fn conceal(&mut self, pile: usize) -> bool {
        match self.piles[pile].last_mut() {
            Some(top) if top.is_revealed() => {
                top.conceal();
                true
            }
            _ => false,
        }
    }

    fn checked_pile(&mut self, pile: usize) -> Result<&mut Vec<Card>> {
        self.piles
            .get_mut(pile)
            .ok_or_else(|| Error::IllegalState(format!("pile {} vanished", pile)))
    }
}

impl Undoable for Tableau {
    type Command = TableauUndo;

    fn undo_log(&mut self) -> &mut UndoLog<TableauUndo> {
        &mut self.undo_log
    }

    fn apply_inverse(&mut self, command: TableauUndo) -> Result<()> {
        match command {
            TableauUndo::Put { pile, count } => {
                let cards = self.checked_pile(pile)?;
                let len = cards.len().checked_sub(count).ok_or_else(|| {
                    Error::IllegalState(format!("pile {} is shorter than {}", pile, count))
                })?;
                cards.truncate(len);
            }
            TableauUndo::Got {
                pile,
                run,
                revealed,
            } => {
                self.checked_pile(pile)?;
                if revealed {
                    self.conceal(pile);
                }
                self.piles[pile].extend(run);
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::card::Suit;

    fn shuffled() -> Tableau {
        Tableau::dealt(7, Deck::new(1, 0).shuffle()).unwrap()
    }

    fn up(rank: Rank, suit: Suit) -> Card {
        Card::new(rank, suit).revealed()
    }

    #[test]
    fn empty_layout() {
        let tableau = Tableau::new(8);
        assert_eq!(tableau.len(), 8);
        assert!(tableau.piles().iter().all(Vec::is_empty));
    }

    #[test]
    fn triangular_layout() {
        let mut deck = Deck::new(1, 0);
        deck.shuffle();
        let tableau = Tableau::dealt(7, &mut deck).unwrap();
        assert_eq!(deck.remaining(), 24);
        for (n, pile) in tableau.piles().iter().enumerate() {
            assert_eq!(pile.len(), n + 1);
            for (i, card) in pile.iter().enumerate() {
                assert_eq!(card.is_revealed(), i == n, "pile {} card {}", n, i);
            }
        }
    }

    #[test]
    fn column_by_column_deal_order() {
        let mut deck = Deck::new(1, 0);
        let tableau = Tableau::dealt(3, &mut deck).unwrap();
        let spade = |rank| Card::new(rank, Suit::Spades);
        assert_eq!(tableau.pile(0), Some(&[spade(Rank::Ace).revealed()][..]));
        assert_eq!(
            tableau.pile(1),
            Some(&[spade(Rank::Two), spade(Rank::Four).revealed()][..])
        );
        assert_eq!(
            tableau.pile(2),
            Some(&[spade(Rank::Three), spade(Rank::Five), spade(Rank::Six).revealed()][..])
        );
    }

    #[test]
    fn short_deck() {
        let mut deck = Deck::new(0, 3);
        assert!(matches!(Tableau::dealt(2, &mut deck), Err(Error::IllegalState(_))));
    }

    #[test]
    fn get_from_empty_pile() {
        let mut tableau = Tableau::new(7);
        assert!(matches!(tableau.get(0, 0), Err(Error::InvalidIndex(_))));
    }

    #[test]
    fn get_invalid_pile() {
        let mut tableau = Tableau::new(7);
        assert!(matches!(tableau.get(7, 0), Err(Error::InvalidIndex(_))));
    }

    #[test]
    fn get_invalid_card() {
        let mut tableau = shuffled();
        assert!(matches!(tableau.get(0, 1), Err(Error::InvalidIndex(_))));
    }

    #[test]
    fn get_concealed_card() {
        let mut tableau = shuffled();
        assert!(matches!(tableau.get(1, 0), Err(Error::RuleViolation(_))));
        assert_eq!(tableau.undo_len(), 0);
    }

    #[test]
    fn get_with_reveal() {
        let mut tableau = shuffled();
        let before = tableau.piles[6].clone();
        assert!(!tableau.piles[6][5].is_revealed());
        let run = tableau.get(6, 6).unwrap();
        assert!(tableau.piles[6][5].is_revealed());
        assert_eq!(tableau.piles[6].len(), 6);
        assert_eq!(run.len(), 1);
        tableau.undo().unwrap();
        assert!(!tableau.piles[6][5].is_revealed());
        assert_eq!(tableau.piles[6], before);
    }

    #[test]
    fn get_without_reveal() {
        let mut tableau = shuffled();
        tableau.piles[6][5] = up(Rank::King, Suit::Hearts);
        tableau.piles[6][6] = up(Rank::Queen, Suit::Hearts);
        tableau.get(6, 6).unwrap();
        assert!(tableau.piles[6][5].is_revealed());
        tableau.undo().unwrap();
        assert!(tableau.piles[6][5].is_revealed());
        assert_eq!(tableau.piles[6].len(), 7);
    }

    #[test]
    fn get_run() {
        let mut tableau = Tableau::new(2);
        tableau.piles[0] = vec![
            Card::new(Rank::Two, Suit::Clubs),
            up(Rank::Nine, Suit::Spades),
            up(Rank::Eight, Suit::Hearts),
            up(Rank::Seven, Suit::Clubs),
        ];
        let run = tableau.get(0, 1).unwrap();
        assert_eq!(run.len(), 3);
        assert_eq!(tableau.piles[0], vec![up(Rank::Two, Suit::Clubs)]);
        tableau.put(run, 1).unwrap_err();
        tableau.undo().unwrap();
        assert_eq!(tableau.piles[0].len(), 4);
        assert!(!tableau.piles[0][0].is_revealed());
    }

    #[test]
    fn put_on_empty_pile() {
        let mut tableau = Tableau::new(7);
        assert!(matches!(
            tableau.put(vec![up(Rank::Queen, Suit::Spades)], 0),
            Err(Error::RuleViolation(_))
        ));
        tableau.put(vec![up(Rank::King, Suit::Spades), up(Rank::Queen, Suit::Hearts)], 0).unwrap();
        assert_eq!(tableau.piles[0].len(), 2);
        tableau.undo().unwrap();
        assert!(tableau.piles[0].is_empty());
    }

    #[test]
    fn put_sequencing() {
        let mut tableau = Tableau::new(7);
        tableau.piles[3] = vec![up(Rank::Six, Suit::Clubs)];
        let concealed = Card::new(Rank::Five, Suit::Hearts);
        assert!(matches!(tableau.put(vec![concealed], 3), Err(Error::RuleViolation(_))));
        assert!(matches!(
            tableau.put(vec![up(Rank::Five, Suit::Spades)], 3),
            Err(Error::RuleViolation(_))
        ));
        assert!(matches!(
            tableau.put(vec![up(Rank::Four, Suit::Hearts)], 3),
            Err(Error::RuleViolation(_))
        ));
        assert!(matches!(
            tableau.put(vec![up(Rank::Five, Suit::Hearts)], 7),
            Err(Error::InvalidIndex(_))
        ));
        assert!(matches!(tableau.put(vec![], 3), Err(Error::IllegalState(_))));
        tableau.put(vec![up(Rank::Five, Suit::Diamonds)], 3).unwrap();
        assert_eq!(tableau.piles[3].len(), 2);
        assert_eq!(tableau.undo_len(), 1);
    }

    #[test]
    fn reveal_and_conceal_top() {
        let mut tableau = shuffled();
        tableau.piles[6][6].conceal();
        assert!(tableau.reveal(6));
        assert!(tableau.piles[6][6].is_revealed());
        assert!(!tableau.reveal(6));
        assert!(tableau.conceal(6));
        assert!(!tableau.piles[6][6].is_revealed());
    }
}
