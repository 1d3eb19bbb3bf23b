use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

pub const NUM_CARDS_DECK: usize = 52;

const CONCEALED_MARKER: char = '|';
const JOKER_GLYPH: char = '*';

#[derive(Debug, Clone, Copy, Hash, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Rank {
    Ace = 1,
    Two,
    Three,
    Four,
    Five,
    Six,
    Seven,
    Eight,
    Nine,
    Ten,
    Jack,
    Queen,
    King,
}

impl Rank {
    pub const ALL: [Rank; 13] = [
        Rank::Ace,
        Rank::Two,
        Rank::Three,
        Rank::Four,
        Rank::Five,
        Rank::Six,
        Rank::Seven,
        Rank::Eight,
        Rank::Nine,
        Rank::Ten,
        Rank::Jack,
        Rank::Queen,
        Rank::King,
    ];

    /// Numeric order, Ace = 1 through King = 13.
    pub const fn value(self) -> u8 {
        self as u8
    }

    pub const fn is_face(self) -> bool {
        matches!(self, Rank::Jack | Rank::Queen | Rank::King)
    }

    fn as_str(self) -> &'static str {
        match self {
            Rank::Ace => "A",
            Rank::Two => "2",
            Rank::Three => "3",
            Rank::Four => "4",
            Rank::Five => "5",
            Rank::Six => "6",
            Rank::Seven => "7",
            Rank::Eight => "8",
            Rank::Nine => "9",
            Rank::Ten => "10",
            Rank::Jack => "J",
            Rank::Queen => "Q",
            Rank::King => "K",
        }
    }
}

impl fmt::Display for Rank {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for Rank {
    type Err = Error;
    fn from_str(s: &str) -> Result<Self> {
        Rank::ALL
            .into_iter()
            .find(|rank| rank.as_str() == s)
            .ok_or_else(|| Error::Unknown(format!("invalid rank {:?}", s)))
    }
}

#[derive(Debug, Clone, Copy, Hash, PartialEq, Eq)]
pub enum Color {
    Black,
    Red,
}

#[derive(Debug, Clone, Copy, Hash, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Suit {
    Spades,
    Hearts,
    Diamonds,
    Clubs,
}

impl Suit {
    pub const ALL: [Suit; 4] = [Suit::Spades, Suit::Hearts, Suit::Diamonds, Suit::Clubs];

    pub const fn color(self) -> Color {
        match self {
            Suit::Spades | Suit::Clubs => Color::Black,
            Suit::Hearts | Suit::Diamonds => Color::Red,
        }
    }

    pub const fn symbol(self) -> char {
        match self {
            Suit::Spades => '♠',
            Suit::Hearts => '♥',
            Suit::Diamonds => '♦',
            Suit::Clubs => '♣',
        }
    }
}

impl fmt::Display for Suit {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.symbol())
    }
}

impl TryFrom<char> for Suit {
    type Error = Error;
    fn try_from(c: char) -> Result<Self> {
        Suit::ALL
            .into_iter()
            .find(|suit| suit.symbol() == c)
            .ok_or_else(|| Error::Unknown(format!("invalid suit {:?}", c)))
    }
}

/// A playing card. Rank and suit are fixed at creation; only the
/// revealed flag changes afterwards. A joker has neither rank nor suit.
#[derive(Debug, Clone, Copy, Hash, PartialEq, Eq, Serialize, Deserialize)]
pub struct Card {
    rank: Option<Rank>,
    suit: Option<Suit>,
    revealed: bool,
}

impl Card {
    pub const fn new(rank: Rank, suit: Suit) -> Self {
        Self {
            rank: Some(rank),
            suit: Some(suit),
            revealed: false,
        }
    }

    pub const fn joker() -> Self {
        Self {
            rank: None,
            suit: None,
            revealed: false,
        }
    }

    pub fn rank(&self) -> Option<Rank> {
        self.rank
    }

    pub fn suit(&self) -> Option<Suit> {
        self.suit
    }

    pub fn color(&self) -> Option<Color> {
        self.suit.map(Suit::color)
    }

    pub fn is_revealed(&self) -> bool {
        self.revealed
    }

    pub fn is_joker(&self) -> bool {
        self.rank.is_none()
    }

    pub fn is_face(&self) -> bool {
        self.rank.is_some_and(Rank::is_face)
    }

    pub fn reveal(&mut self) -> &mut Self {
        self.revealed = true;
        self
    }

    pub fn conceal(&mut self) -> &mut Self {
        self.revealed = false;
        self
    }

    /// Builder-style reveal for values that are about to be moved.
    pub fn revealed(mut self) -> Self {
        self.revealed = true;
        self
    }
}

/// `bottom` is exactly one rank below `top`.
pub fn are_card_ranks_sequential(bottom: &Card, top: &Card) -> bool {
    match (bottom.rank, top.rank) {
        (Some(bottom), Some(top)) => bottom.value() + 1 == top.value(),
        _ => false,
    }
}

pub fn are_card_colors_different(card1: &Card, card2: &Card) -> bool {
    match (card1.color(), card2.color()) {
        (Some(color1), Some(color2)) => color1 != color2,
        _ => false,
    }
}

impl fmt::Display for Card {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        if !self.revealed {
            write!(f, "{}", CONCEALED_MARKER)?;
        }
        match (self.rank, self.suit) {
            (Some(rank), Some(suit)) => write!(f, "{}{}", rank, suit),
            _ => write!(f, "{}", JOKER_GLYPH),
        }
    }
}

impl FromStr for Card {
    type Err = Error;
    fn from_str(s: &str) -> Result<Self> {
        let (revealed, rest) = match s.strip_prefix(CONCEALED_MARKER) {
            Some(rest) => (false, rest),
            None => (true, s),
        };
        if rest == JOKER_GLYPH.to_string() {
            return Ok(Self {
                revealed,
                ..Self::joker()
            });
        }
        let mut chars = rest.chars();
        let suit = chars
            .next_back()
            .ok_or_else(|| Error::Unknown(format!("empty card string {:?}", s)))
            .and_then(Suit::try_from)?;
        let rank = chars.as_str().parse::<Rank>()?;
        Ok(Self {
            revealed,
            ..Self::new(rank, suit)
        })
    }
}
