//! Self-play game generation CLI.
//!
//! Plays engine-vs-engine games and outputs the records as JSONL.
//!
//! Usage:
//!   cargo run --release --bin selfplay -- [OPTIONS]
//!
//! Options:
//!   --games N         Number of games to play (default: 10)
//!   --depth N         Search depth for both sides (default: 4)
//!   --depth-red N     Search depth for Red
//!   --depth-yellow N  Search depth for Yellow
//!   --variant V       classic, threeforone or stock (default: classic)
//!   --openings N      Random opening turns per game (default: 2)
//!   --max-turns N     Turn limit before a game is drawn (default: 200)
//!   --threads N       Number of parallel threads (default: 4)
//!   --seed N          Random seed, 0 for entropy (default: 0)
//!   --output FILE     Output file path (default: stdout)
//!   --quiet           Suppress progress and summary output

use std::env;
use std::fs::File;
use std::io::{self, BufWriter};
use std::process;
use std::str::FromStr;
use std::time::Instant;

use dropfour::rules::Variant;
use dropfour::selfplay::{self, SelfPlayConfig};

struct Args {
    config: SelfPlayConfig,
    output_path: Option<String>,
}

fn value<T: FromStr>(args: &mut impl Iterator<Item = String>, flag: &str) -> Result<T, String> {
    let raw = args
        .next()
        .ok_or_else(|| format!("missing value for {}", flag))?;
    raw.parse()
        .map_err(|_| format!("invalid {} value: '{}'", flag, raw))
}

fn parse_args(mut args: impl Iterator<Item = String>) -> Result<Option<Args>, String> {
    let mut config = SelfPlayConfig::default();
    let mut output_path = None;

    while let Some(arg) = args.next() {
        match arg.as_str() {
            "--games" => config.games = value(&mut args, &arg)?,
            "--depth" => {
                let depth = value(&mut args, &arg)?;
                config.depth_red = depth;
                config.depth_yellow = depth;
            }
            "--depth-red" => config.depth_red = value(&mut args, &arg)?,
            "--depth-yellow" => config.depth_yellow = value(&mut args, &arg)?,
            "--variant" => {
                let name: String = value(&mut args, &arg)?;
                config.variant =
                    Variant::from_name(&name).ok_or_else(|| format!("unknown variant: '{}'", name))?;
            }
            "--openings" => config.random_openings = value(&mut args, &arg)?,
            "--max-turns" => config.max_turns = value(&mut args, &arg)?,
            "--threads" => config.threads = value(&mut args, &arg)?,
            "--seed" => config.seed = value(&mut args, &arg)?,
            "--output" => output_path = Some(value(&mut args, &arg)?),
            "--quiet" => config.quiet = true,
            "--help" | "-h" => return Ok(None),
            other => return Err(format!("unknown argument: {}", other)),
        }
    }

    Ok(Some(Args {
        config,
        output_path,
    }))
}

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let args = match parse_args(env::args().skip(1)) {
        Ok(Some(args)) => args,
        Ok(None) => {
            print_usage();
            return;
        }
        Err(e) => {
            eprintln!("{}", e);
            print_usage();
            process::exit(1);
        }
    };
    let config = args.config;

    if !config.quiet {
        log::info!(
            "Self-play: {} games, {} variant, depth {}/{}, {} random openings, {} threads",
            config.games,
            config.variant.name(),
            config.depth_red,
            config.depth_yellow,
            config.random_openings,
            config.threads
        );
    }

    let start = Instant::now();
    let games = selfplay::run_self_play(&config);
    let elapsed = start.elapsed();

    if !config.quiet {
        log::info!(
            "Completed {} games in {:.1}s",
            games.len(),
            elapsed.as_secs_f64()
        );
        selfplay::print_summary(&games);
    }

    let written = match &args.output_path {
        Some(path) => File::create(path)
            .and_then(|file| selfplay::write_jsonl(&games, &mut BufWriter::new(file))),
        None => selfplay::write_jsonl(&games, &mut BufWriter::new(io::stdout().lock())),
    };

    match (written, &args.output_path) {
        (Err(e), _) => {
            eprintln!("failed to write output: {}", e);
            process::exit(1);
        }
        (Ok(()), Some(path)) if !config.quiet => {
            log::info!("Wrote {} games to {}", games.len(), path);
        }
        (Ok(()), _) => {}
    }
}

fn print_usage() {
    eprintln!("Usage: selfplay [OPTIONS]");
    eprintln!();
    eprintln!("Options:");
    eprintln!("  --games N         Number of games to play (default: 10)");
    eprintln!("  --depth N         Search depth for both sides (default: 4)");
    eprintln!("  --depth-red N     Search depth for Red");
    eprintln!("  --depth-yellow N  Search depth for Yellow");
    eprintln!("  --variant V       classic, threeforone or stock (default: classic)");
    eprintln!("  --openings N      Random opening turns per game (default: 2)");
    eprintln!("  --max-turns N     Turn limit before a game is drawn (default: 200)");
    eprintln!("  --threads N       Number of parallel threads (default: 4)");
    eprintln!("  --seed N          Random seed, 0 for entropy (default: 0)");
    eprintln!("  --output FILE     Output file path (default: stdout)");
    eprintln!("  --quiet           Suppress progress and summary output");
    eprintln!("  --help            Show this help");
}
