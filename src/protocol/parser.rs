//! Ledger command parser.
//!
//! Parses one line of the text protocol into a structured `Command` the
//! engine loop can dispatch on. Arguments are whitespace-separated, so names
//! and identifiers cannot contain spaces.

use thiserror::Error;

use crate::model::{Move, PlayerId};

/// Errors produced while parsing a command line.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ParseError {
    #[error("unknown command '{0}'")]
    UnknownCommand(String),

    #[error("{command}: missing {expected}")]
    MissingArgument {
        command: String,
        expected: &'static str,
    },

    #[error("{command}: unexpected argument '{found}'")]
    UnexpectedArgument { command: String, found: String },

    #[error("invalid choice '{0}', expected 1 (attack) or 2 (defend)")]
    InvalidChoice(String),

    #[error("invalid token variant '{0}'")]
    InvalidVariant(String),
}

/// A parsed client command.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// `registerplayer <id> <player_name> <token_name>`
    RegisterPlayer {
        id: PlayerId,
        player_name: String,
        token_name: String,
    },

    /// `createbattle <id> <battle>`
    CreateBattle { id: PlayerId, battle: String },

    /// `joinbattle <id> <battle>`
    JoinBattle { id: PlayerId, battle: String },

    /// `choice <id> <1|2> <battle>`
    Choice {
        id: PlayerId,
        mv: Move,
        battle: String,
    },

    /// `quitbattle <id> <battle>`
    QuitBattle { id: PlayerId, battle: String },

    /// `getplayer <id>`
    GetPlayer { id: PlayerId },

    /// `gettoken <id>`
    GetToken { id: PlayerId },

    /// `getbattle <battle>`
    GetBattle { battle: String },

    /// `getallbattles`
    GetAllBattles,

    /// `tokenuri <variant>`
    TokenUri { variant: u8 },

    /// Synchronization ping; answered with `readyok`.
    IsReady,

    /// Terminate the process.
    Exit,
}

/// Cursor over the arguments of one command.
struct Args<'a> {
    command: &'a str,
    tokens: std::slice::Iter<'a, &'a str>,
}

impl<'a> Args<'a> {
    fn next(&mut self, expected: &'static str) -> Result<&'a str, ParseError> {
        self.tokens
            .next()
            .copied()
            .ok_or_else(|| ParseError::MissingArgument {
                command: self.command.to_string(),
                expected,
            })
    }

    fn id(&mut self) -> Result<PlayerId, ParseError> {
        self.next("player id").map(PlayerId::from)
    }

    fn battle(&mut self) -> Result<String, ParseError> {
        self.next("battle name").map(str::to_string)
    }

    fn finish(mut self) -> Result<(), ParseError> {
        match self.tokens.next() {
            Some(extra) => Err(ParseError::UnexpectedArgument {
                command: self.command.to_string(),
                found: extra.to_string(),
            }),
            None => Ok(()),
        }
    }
}

/// Parses a single line of input.
///
/// Returns `Ok(None)` for blank lines.
pub fn parse_command(line: &str) -> Result<Option<Command>, ParseError> {
    let tokens: Vec<&str> = line.split_whitespace().collect();
    let Some((&head, rest)) = tokens.split_first() else {
        return Ok(None);
    };

    let mut args = Args {
        command: head,
        tokens: rest.iter(),
    };

    let cmd = match head {
        "registerplayer" => Command::RegisterPlayer {
            id: args.id()?,
            player_name: args.next("player name")?.to_string(),
            token_name: args.next("token name")?.to_string(),
        },
        "createbattle" => Command::CreateBattle {
            id: args.id()?,
            battle: args.battle()?,
        },
        "joinbattle" => Command::JoinBattle {
            id: args.id()?,
            battle: args.battle()?,
        },
        "choice" => {
            let id = args.id()?;
            let raw = args.next("choice (1 or 2)")?;
            let mv = raw
                .parse::<u8>()
                .ok()
                .and_then(Move::from_choice)
                .ok_or_else(|| ParseError::InvalidChoice(raw.to_string()))?;
            Command::Choice {
                id,
                mv,
                battle: args.battle()?,
            }
        }
        "quitbattle" => Command::QuitBattle {
            id: args.id()?,
            battle: args.battle()?,
        },
        "getplayer" => Command::GetPlayer { id: args.id()? },
        "gettoken" => Command::GetToken { id: args.id()? },
        "getbattle" => Command::GetBattle {
            battle: args.battle()?,
        },
        "getallbattles" => Command::GetAllBattles,
        "tokenuri" => {
            let raw = args.next("token variant")?;
            let variant = raw
                .parse::<u8>()
                .map_err(|_| ParseError::InvalidVariant(raw.to_string()))?;
            Command::TokenUri { variant }
        }
        "isready" => Command::IsReady,
        "exit" => Command::Exit,
        other => return Err(ParseError::UnknownCommand(other.to_string())),
    };
    args.finish()?;
    Ok(Some(cmd))
}
