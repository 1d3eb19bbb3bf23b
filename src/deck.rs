use crate::card::{Card, Rank, Suit};
use rand::{seq::SliceRandom, thread_rng, Rng};
use serde::{Deserialize, Serialize};
use std::collections::VecDeque;

/// An ordered pile of cards dealt from the front. The Klondike stock is a Deck.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Deck {
    num_decks: usize,
    num_jokers: usize,
    cards: VecDeque<Card>,
    is_shuffled: bool,
}

impl Deck {
    /// `num_decks` copies of the 52 standard cards, each copy followed by
    /// `num_jokers` jokers. Suit-major, rank-minor, all concealed.
    pub fn new(num_decks: usize, num_jokers: usize) -> Self {
        let mut cards = VecDeque::with_capacity(num_decks * (52 + num_jokers));
        for _ in 0..num_decks {
            for suit in Suit::ALL {
                for rank in Rank::ALL {
                    cards.push_back(Card::new(rank, suit));
                }
            }
            cards.extend(std::iter::repeat(Card::joker()).take(num_jokers));
        }
        Self {
            num_decks,
            num_jokers,
            cards,
            is_shuffled: false,
        }
    }

    pub fn num_decks(&self) -> usize {
        self.num_decks
    }

    pub fn num_jokers(&self) -> usize {
        self.num_jokers
    }

    pub fn is_shuffled(&self) -> bool {
        self.is_shuffled
    }

    pub fn shuffle(&mut self) -> &mut Self {
        self.shuffle_with(&mut thread_rng())
    }

    /// Fisher-Yates over the whole deck with the given source.
    pub fn shuffle_with<R: Rng + ?Sized>(&mut self, rng: &mut R) -> &mut Self {
        self.cards.make_contiguous().shuffle(rng);
        self.is_shuffled = true;
        self
    }

    /// Removes the front card. `None` once the deck is empty.
    pub fn deal(&mut self) -> Option<Card> {
        self.cards.pop_front()
    }

    pub fn remaining(&self) -> usize {
        self.cards.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }

    pub fn cards(&self) -> impl Iterator<Item = &Card> {
        self.cards.iter()
    }

    pub(crate) fn put_front(&mut self, card: Card) {
        self.cards.push_front(card);
    }

    pub(crate) fn put_back(&mut self, cards: impl IntoIterator<Item = Card>) {
        self.cards.extend(cards);
    }

    #[cfg(test)]
    pub(crate) fn clear(&mut self) {
        self.cards.clear();
    }
}
