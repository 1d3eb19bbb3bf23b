use crate::card::Card;
use crate::error::{Error, Result};
use crate::game::Game;
use crate::moves::{CardPosition, Move};
use log::info;

impl Game {
    /// Nothing is left face down: stock and waste are spent and every
    /// tableau card is revealed. From here the game always plays out.
    pub fn is_solvable(&self) -> bool {
        self.stock.is_empty()
            && self.waste.is_empty()
            && self
                .tableau
                .piles()
                .iter()
                .all(|pile| pile.iter().all(Card::is_revealed))
    }

    pub fn is_solved(&self) -> bool {
        self.foundation.is_full()
    }

    /// Plays out a solvable game by sending tableau cards to the foundation,
    /// lowest rank first. Each card is its own undoable move.
    pub fn solve(&mut self) -> Result<()> {
        if self.is_solved() {
            return Ok(());
        }
        if !self.is_solvable() {
            return Err(Error::IllegalState(
                "cards are still hidden in the stock, waste or tableau".into(),
            ));
        }
        let mut played = 0;
        while !self.is_solved() {
            match self.next_foundation_move() {
                Some(mv) => self.apply(&mv)?,
                None => return Err(Error::NoFit("no tableau card fits the foundation".into())),
            }
            played += 1;
        }
        info!("solved: played {} cards to the foundation", played);
        Ok(())
    }

    fn next_foundation_move(&self) -> Option<Move> {
        self.valid_moves()
            .into_iter()
            .filter(|mv| {
                matches!(
                    (&mv.from, &mv.to),
                    (CardPosition::Tableau(_), CardPosition::Foundation(_))
                )
            })
            .min_by_key(|mv| self.card_at(&mv.from).and_then(|card| card.rank()))
    }
}
