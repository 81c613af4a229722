//! Line protocol command parser.
//!
//! Parses incoming protocol lines into structured `Command` variants that
//! the engine main loop can dispatch on.

/// Search constraints passed with the `go` command.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GoParams {
    pub depth: Option<u32>,
}

/// A parsed host-to-engine command.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Protocol handshake; the engine replies with its id, options and `hellook`.
    Hello,

    /// Synchronization ping; engine must reply `readyok`.
    IsReady,

    /// Set an engine option: `setoption name <id> [value <x>]`.
    SetOption { name: String, value: Option<String> },

    /// Reset to the empty board.
    NewGame,

    /// Set the board from position notation.
    Position { notation: String },

    /// Select the rule variant by name or numeric id.
    Variant { name: String },

    /// Play a turn for the side to move, in move notation.
    Play { turn: String },

    /// Search the current position and reply with `bestmove`.
    Go(GoParams),

    /// Terminate the engine process.
    Quit,
}

/// Parses a single line of input into a `Command`.
///
/// Returns `None` for empty lines or unrecognized commands. Malformed
/// arguments for known commands also return `None` after logging a warning.
pub fn parse_command(line: &str) -> Option<Command> {
    let tokens: Vec<&str> = line.split_whitespace().collect();
    let (&head, _) = tokens.split_first()?;

    match head {
        "hello" => Some(Command::Hello),
        "isready" => Some(Command::IsReady),
        "quit" => Some(Command::Quit),
        "newgame" => Some(Command::NewGame),

        "setoption" => parse_setoption(&tokens),
        "position" => single_argument(&tokens, "position <notation>")
            .map(|notation| Command::Position { notation }),
        "variant" => {
            single_argument(&tokens, "variant <name|id>").map(|name| Command::Variant { name })
        }
        "play" => single_argument(&tokens, "play <turn>").map(|turn| Command::Play { turn }),
        "go" => Some(parse_go(&tokens)),

        other => {
            log::warn!("unknown command: {}", other);
            None
        }
    }
}

/// Returns the one token following the command word.
fn single_argument(tokens: &[&str], usage: &str) -> Option<String> {
    match tokens {
        [_, arg] => Some((*arg).to_string()),
        _ => {
            log::warn!("malformed command: expected '{}'", usage);
            None
        }
    }
}

/// Parses `setoption name <id> [value <x>]`.
fn parse_setoption(tokens: &[&str]) -> Option<Command> {
    if tokens.len() < 3 || tokens[1] != "name" {
        log::warn!("malformed setoption: expected 'setoption name <id> [value <x>]'");
        return None;
    }

    let value_idx = tokens.iter().position(|&t| t == "value");

    let (name, value) = match value_idx {
        Some(vi) => {
            let name_parts = &tokens[2..vi];
            let value_parts = &tokens[vi + 1..];
            if name_parts.is_empty() {
                log::warn!("malformed setoption: empty name");
                return None;
            }
            let value = if value_parts.is_empty() {
                None
            } else {
                Some(value_parts.join(" "))
            };
            (name_parts.join(" "), value)
        }
        None => (tokens[2..].join(" "), None),
    };

    Some(Command::SetOption { name, value })
}

/// Parses `go [depth <n>]`.
fn parse_go(tokens: &[&str]) -> Command {
    let mut params = GoParams::default();
    let mut rest = tokens[1..].iter();

    while let Some(&token) = rest.next() {
        match token {
            "depth" => match rest.next().map(|v| v.parse::<u32>()) {
                Some(Ok(v)) => params.depth = Some(v),
                Some(Err(_)) | None => log::warn!("invalid depth value in go"),
            },
            other => log::warn!("unknown go parameter: '{}'", other),
        }
    }

    Command::Go(params)
}
