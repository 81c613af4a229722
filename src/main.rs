//! dropfour: a Connect-Four engine speaking a line protocol.
//!
//! This binary reads commands from stdin and writes responses to stdout.
//! Diagnostics go to stderr; set `RUST_LOG` to control their verbosity.
//! An optional first argument names a JSON config file.

use std::io::{self, BufRead, Write};
use std::path::Path;
use std::process;

use dropfour::config::load_config;
use dropfour::engine::Engine;
use dropfour::protocol::parser::{parse_command, Command};

/// Runs the main protocol loop, reading commands from stdin
/// and writing responses to stdout.
fn main() {
    env_logger::init();

    let mut engine = match std::env::args().nth(1) {
        Some(path) => match load_config(Path::new(&path)) {
            Ok(config) => Engine::with_config(config),
            Err(e) => {
                log::error!("{}", e);
                process::exit(1);
            }
        },
        None => Engine::new(),
    };

    let stdin = io::stdin();
    let stdout = io::stdout();
    let mut out = io::BufWriter::new(stdout.lock());

    if let Err(e) = run(&mut engine, stdin.lock(), &mut out) {
        log::error!("i/o error: {}", e);
        process::exit(1);
    }
}

fn run<R: BufRead, W: Write>(engine: &mut Engine, input: R, out: &mut W) -> io::Result<()> {
    for line in input.lines() {
        let Some(cmd) = parse_command(&line?) else {
            continue;
        };

        let result = match cmd {
            Command::Hello => {
                engine.handle_hello(out)?;
                Ok(())
            }
            Command::IsReady => {
                engine.handle_isready(out)?;
                Ok(())
            }
            Command::SetOption { name, value } => engine.set_option(&name, value.as_deref()),
            Command::NewGame => {
                engine.new_game();
                Ok(())
            }
            Command::Position { notation } => engine.set_position(&notation),
            Command::Variant { name } => engine.set_variant(&name),
            Command::Play { turn } => engine.play_turn(&turn),
            Command::Go(params) => {
                engine.handle_go(out, params.depth)?;
                Ok(())
            }
            Command::Quit => break,
        };

        if let Err(e) = result {
            log::warn!("{}", e);
        }
    }
    out.flush()
}
