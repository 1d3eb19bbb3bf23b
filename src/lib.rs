//! Rule engine for Klondike solitaire: cards and decks, the foundation and
//! tableau piles, and a game controller whose every action can be undone.

pub mod card;
pub mod config;
pub mod deck;
pub mod error;
pub mod foundation;
pub mod game;
pub mod moves;
pub mod solver;
pub mod tableau;
pub mod undo;


pub use card::{Card, Color, Rank, Suit};
pub use config::{Config, Scoring};
pub use deck::Deck;
pub use error::{Error, Result};
pub use foundation::Foundation;
pub use game::Game;
pub use moves::{CardPosition, Move};
pub use tableau::Tableau;
pub use undo::{UndoLog, Undoable};
