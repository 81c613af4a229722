//! Integration tests for the dropfour engine binary.
//!
//! Tests the full protocol session flow by spawning the engine process,
//! sending commands via stdin, and verifying stdout responses.

use std::io::{BufRead, Write};
use std::process::{Command, Stdio};

/// Sends a sequence of commands to the engine and collects stdout lines.
fn run_engine(commands: &[&str]) -> Vec<String> {
    let exe = env!("CARGO_BIN_EXE_dropfour");
    let mut child = Command::new(exe)
        .stdin(Stdio::piped())
        .stdout(Stdio::piped())
        .stderr(Stdio::null())
        .spawn()
        .expect("failed to start dropfour");

    let mut stdin = child.stdin.take().unwrap();
    let stdout = child.stdout.take().unwrap();
    let reader = std::io::BufReader::new(stdout);

    for cmd in commands {
        writeln!(stdin, "{}", cmd).unwrap();
    }
    stdin.flush().unwrap();
    drop(stdin);

    let lines: Vec<String> = reader.lines().map(|l| l.unwrap()).collect();
    let status = child.wait().expect("failed to wait on child");
    assert!(status.success());
    lines
}

fn bestmoves(lines: &[String]) -> Vec<&str> {
    lines
        .iter()
        .filter_map(|l| l.strip_prefix("bestmove "))
        .collect()
}

#[test]
fn hello_handshake() {
    let lines = run_engine(&["hello", "quit"]);

    assert!(lines[0].starts_with("id name dropfour"));
    assert_eq!(lines.last().map(String::as_str), Some("hellook"));

    let options: Vec<&String> = lines.iter().filter(|l| l.starts_with("option ")).collect();
    assert!(!options.is_empty(), "handshake should include option declarations");
    for opt in &options {
        assert!(opt.contains("type "), "option line missing type: {}", opt);
    }
}

#[test]
fn isready_response() {
    let lines = run_engine(&["isready", "quit"]);
    assert_eq!(lines, vec!["readyok".to_string()]);
}

#[test]
fn unknown_commands_are_ignored() {
    let lines = run_engine(&["foobar", "nonsense", "quit"]);
    assert!(lines.is_empty());
}

#[test]
fn empty_lines_are_ignored() {
    let lines = run_engine(&["", "  ", "isready", "quit"]);
    assert_eq!(lines.len(), 1);
    assert_eq!(lines[0], "readyok");
}

#[test]
fn go_from_start_plays_center() {
    let lines = run_engine(&["hello", "newgame", "go depth 4", "quit"]);
    assert!(lines.iter().any(|l| l.starts_with("info depth 4 ")));
    assert_eq!(bestmoves(&lines), vec!["d3"]);
}

#[test]
fn go_blocks_horizontal_three() {
    let lines = run_engine(&["position 7/7/7/7/xx5/ooo4/0,0/r", "go depth 4", "quit"]);
    assert_eq!(bestmoves(&lines), vec!["d3"]);
}

#[test]
fn play_then_go_answers_for_yellow() {
    let lines = run_engine(&["newgame", "play d3", "go depth 2", "quit"]);
    let moves = bestmoves(&lines);
    assert_eq!(moves.len(), 1);
    assert!(moves[0].starts_with('d'), "yellow should drop: {}", moves[0]);
}

#[test]
fn illegal_play_is_ignored() {
    let lines = run_engine(&["play x53", "play d9", "go depth 2", "quit"]);
    assert_eq!(bestmoves(&lines), vec!["d3"]);
}

#[test]
fn variant_and_setoption_then_isready() {
    let lines = run_engine(&[
        "variant stock",
        "setoption name Depth value 2",
        "setoption name Threads value 2",
        "setoption name Bogus value 1",
        "isready",
        "quit",
    ]);
    assert_eq!(lines, vec!["readyok".to_string()]);
}

#[test]
fn stock_destroy_is_reported() {
    let lines = run_engine(&[
        "variant stock",
        "position 7/x6/o6/x6/x5o/x5o/1,0/r",
        "go depth 2",
        "quit",
    ]);
    assert_eq!(bestmoves(&lines), vec!["x20"]);
}

#[test]
fn three_for_one_drop_and_destroy_is_one_move() {
    let lines = run_engine(&[
        "variant threeforone",
        "position 7/7/7/7/o4x1/o1xx1o1/0,0/r",
        "go depth 2",
        "quit",
    ]);
    assert_eq!(bestmoves(&lines), vec!["d4x55"]);
}

#[test]
fn decided_position_answers_none() {
    let lines = run_engine(&["position 7/7/7/7/7/oooo3/0,0/r", "go", "quit"]);
    assert_eq!(bestmoves(&lines), vec!["none"]);
}

#[test]
fn bad_position_keeps_previous_one() {
    let lines = run_engine(&[
        "position 7/7/7/7/xx5/ooo4/0,0/r",
        "position not-a-position",
        "go depth 2",
        "quit",
    ]);
    assert_eq!(bestmoves(&lines), vec!["d3"]);
}

#[test]
fn eof_without_quit_exits_cleanly() {
    let lines = run_engine(&["isready"]);
    assert_eq!(lines, vec!["readyok".to_string()]);
}
