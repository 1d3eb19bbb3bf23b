use derivative::Derivative;
use serde::{Deserialize, Serialize};

/// Points awarded per transition. Reversing a move takes them back.
#[derive(Derivative, Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[derivative(Default)]
#[serde(default)]
pub struct Scoring {
    #[derivative(Default(value = "10"))]
    pub waste_to_foundation: i32,
    /// Also awarded for tableau to tableau moves.
    #[derivative(Default(value = "5"))]
    pub waste_to_tableau: i32,
    /// Also deducted when a card comes back down from the foundation.
    #[derivative(Default(value = "15"))]
    pub tableau_to_foundation: i32,
}

#[derive(Derivative, Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[derivative(Default)]
#[serde(default)]
pub struct Config {
    #[derivative(Default(value = "7"))]
    pub tableau_piles: usize,
    /// Fixed shuffle seed; `None` draws from the thread RNG.
    pub seed: Option<u64>,
    pub scoring: Scoring,
}

impl Config {
    pub fn from_json(json: &str) -> serde_json::Result<Self> {
        serde_json::from_str(json)
    }
}
