use anyhow::{Context, Result};
use colored::Colorize;
use klondike_engine::{Card, Color, Config, Game};
use std::fmt;

/// Debug dump of a game, red suits in red.
struct Board<'a>(&'a Game);

fn paint(card: &Card) -> String {
    if !card.is_revealed() {
        return "#".to_string();
    }
    match card.color() {
        Some(Color::Red) => card.to_string().red().bold().to_string(),
        _ => card.to_string().bold().to_string(),
    }
}

impl fmt::Display for Board<'_> {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let game = self.0;
        writeln!(f, "Score: {}", game.score())?;
        writeln!(f, "Stock: {}", game.stock().remaining())?;
        write!(f, "Waste: ")?;
        game.waste().iter().try_for_each(|card| write!(f, "{} ", paint(card)))?;
        writeln!(f)?;
        writeln!(f, "--------- Foundations ---------")?;
        game.foundation().piles().iter().try_for_each(|(suit, pile)| {
            write!(f, "[{}]\t", pile.last().map_or_else(|| suit.to_string(), paint))
        })?;
        writeln!(f)?;
        writeln!(f, "--------- Tableau -------------")?;
        game.tableau().piles().iter().enumerate().try_for_each(|(n, pile)| {
            write!(f, "{}: ", n)?;
            pile.iter().try_for_each(|card| write!(f, "{}\t", paint(card)))?;
            writeln!(f)
        })
    }
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let config = match std::env::args().nth(1) {
        Some(path) => {
            let json = std::fs::read_to_string(&path)
                .with_context(|| format!("reading config {}", path))?;
            Config::from_json(&json).with_context(|| format!("parsing config {}", path))?
        }
        None => Config::default(),
    };
    let game = Game::with_config(&config)?;
    println!("{}", Board(&game));
    for mv in game.valid_moves() {
        println!("{}", mv.pretty_string(&game));
    }
    Ok(())
}
