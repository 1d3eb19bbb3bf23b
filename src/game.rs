use crate::card::{Card, Suit};
use crate::config::{Config, Scoring};
use crate::deck::Deck;
use crate::error::{Error, Result};
use crate::foundation::Foundation;
use crate::tableau::Tableau;
use crate::undo::{UndoLog, Undoable};
use log::{debug, info, trace};
use rand::{rngs::StdRng, SeedableRng};
use serde::{Deserialize, Serialize};

/// Largest triangular layout a single deck can fill.
const MAX_TABLEAU_PILES: usize = 9;

/// How to reverse one player-facing action. Composite commands unwind the
/// score first and then call into the sub-component logs they wrote to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GameUndo {
    /// One card went from stock to waste, after recycling the waste if `replenished`.
    Dealt { replenished: bool },
    /// A foundation card went down onto the tableau.
    FromFoundation,
    /// `card` left the waste for the foundation or the tableau.
    FromWaste { to_foundation: bool, card: Card },
    /// A tableau run went to the foundation or another tableau pile.
    FromTableau { to_foundation: bool },
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Game {
    pub(crate) score: i32,
    pub(crate) stock: Deck,
    pub(crate) waste: Vec<Card>,
    pub(crate) foundation: Foundation,
    pub(crate) tableau: Tableau,
    scoring: Scoring,
    #[serde(skip)]
    undo_log: UndoLog<GameUndo>,
}

impl Default for Game {
    fn default() -> Self {
        Self::new()
    }
}

impl Game {
    /// A freshly shuffled single deck in the standard Klondike layout.
    pub fn new() -> Self {
        match Self::with_config(&Config::default()) {
            Ok(game) => game,
            Err(e) => unreachable!("the default layout always deals: {}", e),
        }
    }

    pub fn with_config(config: &Config) -> Result<Self> {
        if config.tableau_piles > MAX_TABLEAU_PILES {
            return Err(Error::InvalidIndex(format!(
                "{} tableau piles need more than one deck",
                config.tableau_piles
            )));
        }
        let mut stock = Deck::new(1, 0);
        match config.seed {
            Some(seed) => stock.shuffle_with(&mut StdRng::seed_from_u64(seed)),
            None => stock.shuffle(),
        };
        let tableau = Tableau::dealt(config.tableau_piles, &mut stock)?;
        info!(
            "new game: {} tableau piles, {} cards in stock, seed {:?}",
            config.tableau_piles,
            stock.remaining(),
            config.seed
        );
        Ok(Self {
            score: 0,
            stock,
            waste: Vec::new(),
            foundation: Foundation::new(&Suit::ALL),
            tableau,
            scoring: config.scoring,
            undo_log: UndoLog::default(),
        })
    }

    pub fn score(&self) -> i32 {
        self.score
    }

    pub fn stock(&self) -> &Deck {
        &self.stock
    }

    pub fn waste(&self) -> &[Card] {
        &self.waste
    }

    pub fn foundation(&self) -> &Foundation {
        &self.foundation
    }

    pub fn tableau(&self) -> &Tableau {
        &self.tableau
    }

    pub fn scoring(&self) -> &Scoring {
        &self.scoring
    }

    pub fn undo_len(&self) -> usize {
        self.undo_log.len()
    }

    fn adjust_score(&mut self, points: i32) {
        self.score += points;
    }

    /// Turns one card from stock to waste, first recycling the waste into
    /// the stock when the stock has run out.
    pub fn deal(&mut self) -> Result<()> {
        let mut replenished = false;
        if self.stock.is_empty() {
            if self.waste.is_empty() {
                return Err(Error::IllegalState("no cards remaining".into()));
            }
            let waste = std::mem::take(&mut self.waste);
            info!("replenishing stock with {} waste cards", waste.len());
            self.stock.put_back(waste.into_iter().map(|mut card| {
                card.conceal();
                card
            }));
            replenished = true;
        }
        let card = self
            .stock
            .deal()
            .ok_or_else(|| Error::IllegalState("no cards remaining".into()))?
            .revealed();
        debug!("dealt {}", card);
        self.waste.push(card);
        self.undo_log.record(GameUndo::Dealt { replenished });
        Ok(())
    }

    fn all_piles(&self) -> Vec<usize> {
        (0..self.tableau.len()).collect()
    }

    /// Places `run` on the first of `destinations` that accepts it.
    fn seek_tableau(&mut self, run: &[Card], destinations: &[usize]) -> Option<usize> {
        destinations.iter().copied().find(|&pile| {
            match self.tableau.put(run.to_vec(), pile) {
                Ok(()) => true,
                Err(e) => {
                    trace!("seek: pile {} refused: {}", pile, e);
                    false
                }
            }
        })
    }

    /// Moves the top card of a foundation pile onto the tableau, trying
    /// `destinations` in order or every pile if none are given.
    pub fn select_foundation(&mut self, suit: Suit, destinations: &[usize]) -> Result<()> {
        let card = self.foundation.get(suit)?;
        let candidates = match destinations {
            [] => self.all_piles(),
            piles => piles.to_vec(),
        };
        match self.seek_tableau(&[card], &candidates) {
            Some(pile) => {
                self.adjust_score(-self.scoring.tableau_to_foundation);
                self.undo_log.record(GameUndo::FromFoundation);
                debug!("foundation {} -> tableau {}", card, pile);
                Ok(())
            }
            None => {
                self.foundation.undo()?;
                Err(Error::NoFit(format!("no tableau fit for {}", card)))
            }
        }
    }

    /// Plays the top waste card. With no destination list at all the
    /// foundation is tried first; an empty list means every tableau pile.
    pub fn select_waste(&mut self, destinations: Option<&[usize]>) -> Result<()> {
        let card = self
            .waste
            .pop()
            .ok_or_else(|| Error::IllegalState("no cards left in the waste pile".into()))?;

        if destinations.is_none() {
            match self.foundation.put(card) {
                Ok(()) => {
                    self.adjust_score(self.scoring.waste_to_foundation);
                    self.undo_log.record(GameUndo::FromWaste {
                        to_foundation: true,
                        card,
                    });
                    debug!("waste {} -> foundation", card);
                    return Ok(());
                }
                Err(e) => trace!("waste {} does not fit the foundation: {}", card, e),
            }
        }

        let candidates = match destinations {
            Some(piles) if !piles.is_empty() => piles.to_vec(),
            _ => self.all_piles(),
        };
        match self.seek_tableau(&[card], &candidates) {
            Some(pile) => {
                self.adjust_score(self.scoring.waste_to_tableau);
                self.undo_log.record(GameUndo::FromWaste {
                    to_foundation: false,
                    card,
                });
                debug!("waste {} -> tableau {}", card, pile);
                Ok(())
            }
            None => {
                self.waste.push(card);
                Err(Error::NoFit(format!("no fit for {}", card)))
            }
        }
    }

    /// Plays a run from tableau pile `pile` starting at `card` (the top card
    /// when omitted, counted from the end when negative). A single card with
    /// no destination tries the foundation before the tableau.
    pub fn select_tableau(
        &mut self,
        pile: usize,
        card: Option<isize>,
        destination: Option<usize>,
    ) -> Result<()> {
        let len = self
            .tableau
            .pile(pile)
            .ok_or_else(|| Error::InvalidIndex(format!("invalid pile number {}", pile)))?
            .len();
        if len == 0 {
            return Err(Error::IllegalState(format!("tableau pile {} is empty", pile)));
        }
        let index = match card {
            None => len - 1,
            Some(n) if n < 0 => {
                let from_end = len as isize + n;
                if from_end < 0 {
                    return Err(Error::InvalidIndex(format!("invalid card number {}", n)));
                }
                from_end as usize
            }
            Some(n) => n as usize,
        };
        if destination == Some(pile) {
            return Err(Error::InvalidIndex(format!(
                "destination pile {} is the source pile",
                pile
            )));
        }

        let run = self.tableau.get(pile, index)?;

        if let ([single], None) = (run.as_slice(), destination) {
            match self.foundation.put(*single) {
                Ok(()) => {
                    self.adjust_score(self.scoring.tableau_to_foundation);
                    self.undo_log.record(GameUndo::FromTableau { to_foundation: true });
                    debug!("tableau {} {} -> foundation", pile, single);
                    return Ok(());
                }
                Err(e) => trace!("tableau {} does not fit the foundation: {}", single, e),
            }
        }

        let candidates = match destination {
            Some(to) => vec![to],
            None => (0..self.tableau.len()).filter(|&to| to != pile).collect(),
        };
        match self.seek_tableau(&run, &candidates) {
            Some(to) => {
                self.adjust_score(self.scoring.waste_to_tableau);
                self.undo_log.record(GameUndo::FromTableau { to_foundation: false });
                debug!("tableau {} ({} cards) -> tableau {}", pile, run.len(), to);
                Ok(())
            }
            None => {
                self.tableau.undo()?;
                Err(Error::NoFit(format!(
                    "no fit for the run at pile {} card {}",
                    pile, index
                )))
            }
        }
    }
}

impl Undoable for Game {
    type Command = GameUndo;

    fn undo_log(&mut self) -> &mut UndoLog<GameUndo> {
        &mut self.undo_log
    }

    fn apply_inverse(&mut self, command: GameUndo) -> Result<()> {
        debug!("undo {:?}", command);
        match command {
            GameUndo::Dealt { replenished } => {
                let mut card = self
                    .waste
                    .pop()
                    .ok_or_else(|| Error::IllegalState("waste is empty".into()))?;
                card.conceal();
                self.stock.put_front(card);
                if replenished {
                    while let Some(card) = self.stock.deal() {
                        self.waste.push(card.revealed());
                    }
                }
            }
            GameUndo::FromFoundation => {
                self.adjust_score(self.scoring.tableau_to_foundation);
                self.tableau.undo()?;
                self.foundation.undo()?;
            }
            GameUndo::FromWaste {
                to_foundation,
                card,
            } => {
                if to_foundation {
                    self.adjust_score(-self.scoring.waste_to_foundation);
                    self.foundation.undo()?;
                } else {
                    self.adjust_score(-self.scoring.waste_to_tableau);
                    self.tableau.undo()?;
                }
                self.waste.push(card);
            }
            GameUndo::FromTableau { to_foundation } => {
                if to_foundation {
                    self.adjust_score(-self.scoring.tableau_to_foundation);
                    self.foundation.undo()?;
                } else {
                    self.adjust_score(-self.scoring.waste_to_tableau);
                    self.tableau.undo()?;
                }
                self.tableau.undo()?;
            }
        }
        Ok(())
    }
}
