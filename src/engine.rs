//! Protocol command dispatch.
//!
//! Holds the shared ledger and turns parsed commands into ledger calls,
//! writing exactly one reply line per command (none for `exit`).

use std::io::{self, Write};

use tracing::warn;

use crate::config::Config;
use crate::error::LedgerError;
use crate::ledger::Ledger;
use crate::protocol::{format_error, format_ok, format_parse_error, format_query, parse_command, Command};

/// What the main loop should do after a command.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Flow {
    Continue,
    Exit,
}

/// Dispatches protocol commands against one ledger.
pub struct Engine {
    ledger: Ledger,
}

impl Engine {
    pub fn new(config: &Config) -> Self {
        Self::with_ledger(Ledger::new(config))
    }

    pub fn with_ledger(ledger: Ledger) -> Self {
        Engine { ledger }
    }

    pub fn ledger(&self) -> &Ledger {
        &self.ledger
    }

    /// Parses and handles one input line. Blank lines produce no output.
    pub fn handle_line<W: Write>(&self, line: &str, out: &mut W) -> io::Result<Flow> {
        match parse_command(line) {
            Ok(Some(cmd)) => self.handle(cmd, out),
            Ok(None) => Ok(Flow::Continue),
            Err(e) => {
                warn!(error = %e, "malformed command");
                writeln!(out, "{}", format_parse_error(&e))?;
                out.flush()?;
                Ok(Flow::Continue)
            }
        }
    }

    /// Handles one parsed command, writing its reply to `out`.
    pub fn handle<W: Write>(&self, cmd: Command, out: &mut W) -> io::Result<Flow> {
        let ledger = &self.ledger;
        let reply = match cmd {
            Command::RegisterPlayer {
                id,
                player_name,
                token_name,
            } => ok_or_error(ledger.register_player(id, &player_name, &token_name))?,
            Command::CreateBattle { id, battle } => ok_or_error(ledger.create_battle(&id, &battle))?,
            Command::JoinBattle { id, battle } => ok_or_error(ledger.join_battle(&id, &battle))?,
            Command::Choice { id, mv, battle } => {
                ok_or_error(ledger.attack_or_defend_choice(&id, mv, &battle))?
            }
            Command::QuitBattle { id, battle } => ok_or_error(ledger.quit_battle(&id, &battle))?,
            Command::GetPlayer { id } => query_or_error("player", ledger.get_player(&id))?,
            Command::GetToken { id } => query_or_error("token", ledger.get_player_token(&id))?,
            Command::GetBattle { battle } => query_or_error("battle", ledger.get_battle(&battle))?,
            Command::GetAllBattles => format_query("battles", &ledger.get_all_battles())?,
            Command::TokenUri { variant } => {
                query_or_error("uri", ledger.token_metadata_uri(variant))?
            }
            Command::IsReady => "readyok".to_string(),
            Command::Exit => return Ok(Flow::Exit),
        };
        writeln!(out, "{}", reply)?;
        out.flush()?;
        Ok(Flow::Continue)
    }
}

fn ok_or_error<T: serde::Serialize>(result: Result<T, LedgerError>) -> io::Result<String> {
    match result {
        Ok(value) => Ok(format_ok(&value)?),
        Err(e) => Ok(rejected(&e)),
    }
}

fn query_or_error<T: serde::Serialize>(
    keyword: &str,
    result: Result<T, LedgerError>,
) -> io::Result<String> {
    match result {
        Ok(value) => Ok(format_query(keyword, &value)?),
        Err(e) => Ok(rejected(&e)),
    }
}

fn rejected(err: &LedgerError) -> String {
    warn!(kind = err.kind(), error = %err, "operation rejected");
    format_error(err)
}
