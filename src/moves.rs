use crate::card::{Card, Suit};
use crate::error::{Error, Result};
use crate::game::Game;
use std::fmt;

#[derive(Clone, Debug, Hash, PartialEq, Eq)]
pub enum CardPosition {
    Stock,
    Waste,
    Foundation(Suit),
    // pile, card index
    Tableau((usize, usize)),
}

#[derive(Clone, Debug, Hash, PartialEq, Eq)]
pub struct Move {
    pub from: CardPosition,
    pub to: CardPosition,
}

impl Move {
    fn new(from: CardPosition, to: CardPosition) -> Self {
        Self { from, to }
    }

    pub fn pretty_string(&self, game: &Game) -> String {
        let show = |card: Option<&Card>| card.map_or_else(|| " ".to_string(), Card::to_string);
        format!(
            "From: {} - {}\tTo: {} - {}",
            self.from,
            show(game.card_at(&self.from)),
            self.to,
            show(game.card_at(&self.to).or_else(|| game.top_at(&self.to))),
        )
    }
}

impl fmt::Display for CardPosition {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            CardPosition::Stock => write!(f, "stock"),
            CardPosition::Waste => write!(f, "waste"),
            CardPosition::Foundation(suit) => write!(f, "foundation {}", suit),
            CardPosition::Tableau((pile, card)) => write!(f, "tableau {}:{}", pile, card),
        }
    }
}

impl Game {
    /// The card a move would pick up from `position`.
    pub fn card_at(&self, position: &CardPosition) -> Option<&Card> {
        match position {
            CardPosition::Stock => self.stock.cards().next(),
            CardPosition::Waste => self.waste.last(),
            CardPosition::Foundation(suit) => self.foundation.pile(*suit).and_then(<[Card]>::last),
            CardPosition::Tableau((pile, card)) => self.tableau.pile(*pile)?.get(*card),
        }
    }

    /// The card a move would land on at `position`.
    fn top_at(&self, position: &CardPosition) -> Option<&Card> {
        match position {
            CardPosition::Tableau((pile, _)) => self.tableau.pile(*pile)?.last(),
            _ => self.card_at(position),
        }
    }

    fn get_move_from_stock(&self) -> Option<Move> {
        if !self.stock.is_empty() {
            Some(Move::new(CardPosition::Stock, CardPosition::Waste))
        } else if !self.waste.is_empty() {
            // Restock
            Some(Move::new(CardPosition::Waste, CardPosition::Stock))
        } else {
            None
        }
    }

    fn tableau_targets<'a>(
        &'a self,
        card: &'a Card,
        skip: Option<usize>,
    ) -> impl Iterator<Item = CardPosition> + 'a {
        (0..self.tableau.len())
            .filter(move |&pile| Some(pile) != skip)
            .filter(move |&pile| self.tableau.accepts(card, pile).is_ok())
            .map(move |pile| CardPosition::Tableau((pile, self.tableau.piles[pile].len())))
    }

    fn get_moves_from_waste(&self) -> Vec<Move> {
        let mut moves = Vec::new();
        if let Some(card) = self.waste.last() {
            if let Ok(suit) = self.foundation.accepts(card) {
                moves.push(Move::new(CardPosition::Waste, CardPosition::Foundation(suit)));
            }
            moves.extend(
                self.tableau_targets(card, None)
                    .map(|to| Move::new(CardPosition::Waste, to)),
            );
        }
        moves
    }

    fn get_moves_from_tableau(&self, pile: usize) -> Vec<Move> {
        let mut moves = Vec::new();
        let cards = &self.tableau.piles[pile];
        for (index, card) in cards.iter().enumerate().rev() {
            if !card.is_revealed() {
                break;
            }
            let from = CardPosition::Tableau((pile, index));
            if index + 1 == cards.len() {
                if let Ok(suit) = self.foundation.accepts(card) {
                    moves.push(Move::new(from.clone(), CardPosition::Foundation(suit)));
                }
            }
            moves.extend(
                self.tableau_targets(card, Some(pile))
                    .map(|to| Move::new(from.clone(), to)),
            );
        }
        moves
    }

    fn get_moves_from_foundation(&self) -> Vec<Move> {
        let mut moves = Vec::new();
        for (suit, pile) in self.foundation.piles() {
            if let Some(card) = pile.last() {
                moves.extend(
                    self.tableau_targets(card, None)
                        .map(|to| Move::new(CardPosition::Foundation(*suit), to)),
                );
            }
        }
        moves
    }

    /// Every single action the player could legally take right now.
    pub fn valid_moves(&self) -> Vec<Move> {
        let mut valid_moves = Vec::new();
        valid_moves.extend(self.get_move_from_stock());
        valid_moves.extend(self.get_moves_from_waste());
        for pile in 0..self.tableau.len() {
            valid_moves.extend(self.get_moves_from_tableau(pile));
        }
        valid_moves.extend(self.get_moves_from_foundation());
        valid_moves
    }

    /// Performs `mv` through the matching verb, so it scores and undoes
    /// like any other action.
    pub fn apply(&mut self, mv: &Move) -> Result<()> {
        match (&mv.from, &mv.to) {
            (CardPosition::Stock, CardPosition::Waste) | (CardPosition::Waste, CardPosition::Stock) => {
                self.deal()
            }
            (CardPosition::Waste, CardPosition::Foundation(_)) => {
                let card = self
                    .waste
                    .last()
                    .ok_or_else(|| Error::IllegalState("no cards left in the waste pile".into()))?;
                self.foundation.accepts(card)?;
                self.select_waste(None)
            }
            (CardPosition::Waste, CardPosition::Tableau((to, _))) => self.select_waste(Some(&[*to][..])),
            (CardPosition::Tableau((pile, index)), CardPosition::Foundation(_)) => {
                let top = self
                    .tableau
                    .pile(*pile)
                    .and_then(<[Card]>::last)
                    .ok_or_else(|| Error::InvalidIndex(format!("invalid pile number {}", pile)))?;
                if *index + 1 != self.tableau.piles[*pile].len() {
                    return Err(Error::RuleViolation(
                        "only the top tableau card can go to the foundation".into(),
                    ));
                }
                self.foundation.accepts(top)?;
                self.select_tableau(*pile, None, None)
            }
            (CardPosition::Tableau((pile, index)), CardPosition::Tableau((to, _))) => {
                let index = isize::try_from(*index)
                    .map_err(|_| Error::InvalidIndex(format!("invalid card number {}", index)))?;
                self.select_tableau(*pile, Some(index), Some(*to))
            }
            (CardPosition::Foundation(suit), CardPosition::Tableau((to, _))) => {
                self.select_foundation(*suit, &[*to])
            }
            (from, to) => Err(Error::RuleViolation(format!(
                "cards cannot move from {} to {}",
                from, to
            ))),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::card::Rank;
    use crate::undo::Undoable;

    fn up(rank: Rank, suit: Suit) -> Card {
        Card::new(rank, suit).revealed()
    }

    fn staged() -> Game {
        let mut game = Game::new();
        for pile in game.tableau.piles.iter_mut() {
            pile.clear();
        }
        game.stock.clear();
        game.tableau.piles[0] = vec![Card::new(Rank::Two, Suit::Clubs), up(Rank::Ace, Suit::Hearts)];
        game.tableau.piles[1] = vec![up(Rank::Nine, Suit::Clubs)];
        game.tableau.piles[2] = vec![up(Rank::Ten, Suit::Hearts), up(Rank::Nine, Suit::Spades)];
        game.waste = vec![up(Rank::Eight, Suit::Diamonds)];
        game
    }

    #[test]
    fn new_game_can_always_deal() {
        let game = Game::new();
        let moves = game.valid_moves();
        assert!(moves.contains(&Move::new(CardPosition::Stock, CardPosition::Waste)));
    }

    #[test]
    fn staged_moves() {
        let game = staged();
        assert_eq!(
            game.valid_moves(),
            vec![
                Move::new(CardPosition::Waste, CardPosition::Stock),
                Move::new(CardPosition::Waste, CardPosition::Tableau((1, 1))),
                Move::new(CardPosition::Waste, CardPosition::Tableau((2, 2))),
                Move::new(
                    CardPosition::Tableau((0, 1)),
                    CardPosition::Foundation(Suit::Hearts)
                ),
            ]
        );
    }

    #[test]
    fn apply_dispatches_to_verbs() {
        let mut game = staged();
        let to_foundation = Move::new(
            CardPosition::Tableau((0, 1)),
            CardPosition::Foundation(Suit::Hearts),
        );
        game.apply(&to_foundation).unwrap();
        assert_eq!(game.score(), 15);
        assert!(game.tableau.piles[0][0].is_revealed());

        game.apply(&Move::new(CardPosition::Waste, CardPosition::Tableau((2, 2))))
            .unwrap();
        assert_eq!(game.score(), 20);
        assert!(game.waste.is_empty());

        let onto_nine = Move::new(
            CardPosition::Foundation(Suit::Hearts),
            CardPosition::Tableau((1, 1)),
        );
        assert!(matches!(game.apply(&onto_nine), Err(Error::NoFit(_))));
        assert_eq!(game.foundation.pile(Suit::Hearts).map(<[Card]>::len), Some(1));

        let onto_two = Move::new(
            CardPosition::Foundation(Suit::Hearts),
            CardPosition::Tableau((0, 1)),
        );
        game.apply(&onto_two).unwrap();
        assert_eq!(game.score(), 5);

        while game.undo_len() > 0 {
            game.undo().unwrap();
        }
        assert_eq!(game.score(), 0);
        assert_eq!(game.waste, vec![up(Rank::Eight, Suit::Diamonds)]);
        assert_eq!(game.tableau.piles[0].len(), 2);
        assert!(!game.tableau.piles[0][0].is_revealed());
        assert_eq!(game.foundation.pile(Suit::Hearts).map(<[Card]>::len), Some(0));
    }

    #[test]
    fn apply_rejects_nonsense() {
        let mut game = staged();
        let mv = Move::new(CardPosition::Waste, CardPosition::Foundation(Suit::Diamonds));
        assert!(matches!(game.apply(&mv), Err(Error::RuleViolation(_))));
        let mv = Move::new(CardPosition::Tableau((2, 0)), CardPosition::Foundation(Suit::Hearts));
        assert!(matches!(game.apply(&mv), Err(Error::RuleViolation(_))));
        let mv = Move::new(CardPosition::Stock, CardPosition::Tableau((0, 0)));
        assert!(matches!(game.apply(&mv), Err(Error::RuleViolation(_))));
        assert_eq!(game.undo_len(), 0);
    }

    #[test]
    fn pretty_string() {
        let game = staged();
        let mv = Move::new(CardPosition::Waste, CardPosition::Tableau((1, 1)));
        assert_eq!(mv.pretty_string(&game), "From: waste - 8♦\tTo: tableau 1:1 - 9♣");
    }
}
