//! REPL Module
//!
//! Reads commands line by line and dispatches them to a `Session`.

pub mod commands;
pub mod session;

use std::io::Write;

use rand::Rng;
use tokio::io::{AsyncBufRead, AsyncBufReadExt};
use tracing::debug;

use crate::error::{PokedexError, Result};

pub use commands::{clean_input, Command, COMMANDS};
pub use session::{catch_probability, Flow, Pagination, Session};

/// Prompt printed before every line of input
pub const PROMPT: &str = "Pokedex > ";

/// Runs the command loop until `exit` or end of input.
///
/// Command failures are printed and the loop continues. Only a failure
/// to read input or write output ends the loop with an error.
pub async fn run<R, I, W>(session: &mut Session<R>, input: I, out: &mut W) -> Result<()>
where
    R: Rng,
    I: AsyncBufRead + Unpin,
    W: Write,
{
    let mut lines = input.lines();

    loop {
        write!(out, "{}", PROMPT)?;
        out.flush()?;

        let Some(line) = lines.next_line().await? else {
            writeln!(out)?;
            debug!("end of input");
            return Ok(());
        };

        let command = match Command::parse(&line) {
            Ok(Some(command)) => command,
            Ok(None) => continue,
            Err(err) => {
                writeln!(out, "{}", err)?;
                continue;
            }
        };

        match session.execute(command, out).await {
            Ok(Flow::Continue) => {}
            Ok(Flow::Exit) => return Ok(()),
            Err(PokedexError::Io(err)) => return Err(err.into()),
            Err(err) => writeln!(out, "Error: {}", err)?,
        }
    }
}
