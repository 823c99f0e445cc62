//! Command parsing
//!
//! Turns a line of user input into a `Command`.

use crate::error::{PokedexError, Result};

/// A parsed REPL command.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Help,
    Exit,
    Map,
    MapBack,
    Explore(String),
    Catch(String),
    Inspect(String),
    Pokedex,
    Cache,
}

/// Name and description of every command, in the order `help` lists them.
pub const COMMANDS: &[(&str, &str)] = &[
    ("help", "Displays a help message"),
    ("exit", "Exit the Pokedex"),
    ("map", "Displays the names of the next 20 location areas"),
    ("mapb", "Displays the previous 20 location areas"),
    ("explore", "explore <area>: lists the pokemon found in a location area"),
    ("catch", "catch <pokemon>: throws a Pokeball, harder for experienced pokemon"),
    ("inspect", "inspect <pokemon>: shows details of a caught pokemon"),
    ("pokedex", "Lists every pokemon you have caught"),
    ("cache", "Shows response cache statistics"),
];

/// Lower-cases `text` and splits it on whitespace.
pub fn clean_input(text: &str) -> Vec<String> {
    text.split_whitespace().map(str::to_lowercase).collect()
}

impl Command {
    /// Parses one line of input.
    ///
    /// Returns `Ok(None)` for a blank line. Words after the first
    /// argument are ignored.
    pub fn parse(line: &str) -> Result<Option<Self>> {
        let words = clean_input(line);
        let Some((name, args)) = words.split_first() else {
            return Ok(None);
        };
        let arg = |command: &'static str, argument: &'static str| {
            args.first()
                .cloned()
                .ok_or(PokedexError::MissingArgument { command, argument })
        };

        let command = match name.as_str() {
            "help" => Self::Help,
            "exit" => Self::Exit,
            "map" => Self::Map,
            "mapb" => Self::MapBack,
            "explore" => Self::Explore(arg("explore", "area")?),
            "catch" => Self::Catch(arg("catch", "pokemon")?),
            "inspect" => Self::Inspect(arg("inspect", "pokemon")?),
            "pokedex" => Self::Pokedex,
            "cache" => Self::Cache,
            other => return Err(PokedexError::UnknownCommand(other.to_string())),
        };
        Ok(Some(command))
    }
}
