use std::io::{self, BufRead};

use tabuleiro::board::fen::STARTPOS_FEN;
use tabuleiro::config::EngineConfig;
use tabuleiro::engine::Engine;
use tabuleiro::logger::init_logging;

/// Line-oriented XBoard-dialect session loop. Owns no chess logic: command
/// parsing and stdin/stdout plumbing only, dispatching into `Engine`.
fn main() {
    let args: Vec<String> = std::env::args().collect();
    let log_path = arg_value(&args, "--log").unwrap_or_else(|| "logs/tabuleiro.log".to_string());
    let log_filter = arg_value(&args, "--log-filter").unwrap_or_else(|| "info".to_string());
    init_logging(&log_path, &log_filter);

    let mut engine = Engine::new(EngineConfig::default());
    if let Some(fen) = arg_value(&args, "--fen") {
        if let Err(e) = engine.set_position(&fen) {
            eprintln!("error: {e}");
        }
    }

    let mut post = false;
    let mut force = false;

    let stdin = io::stdin();
    for line in stdin.lock().lines() {
        let line = match line {
            Ok(l) => l.trim().to_string(),
            Err(_) => break,
        };
        if line.is_empty() {
            continue;
        }

        let mut parts = line.split_whitespace();
        let command = parts.next().unwrap_or("");

        match command {
            "new" => {
                if let Err(e) = engine.new_game(STARTPOS_FEN) {
                    eprintln!("error: {e}");
                }
                force = true;
            }
            "force" => force = true,
            "go" => {
                force = false;
                run_search(&mut engine, post);
            }
            "st" => {
                if let Some(n) = parts.next().and_then(|s| s.parse::<u64>().ok()) {
                    engine.set_move_time_seconds(n);
                }
            }
            "sd" => {
                if let Some(n) = parts.next().and_then(|s| s.parse::<i32>().ok()) {
                    engine.set_depth_limit(n);
                }
            }
            "time" => {
                if let Some(n) = parts.next().and_then(|s| s.parse::<u64>().ok()) {
                    engine.set_remaining_time_centis(n);
                }
            }
            "undo" => {
                if let Err(e) = engine.undo_last() {
                    eprintln!("error: {e}");
                }
            }
            "post" => post = true,
            "nopost" => post = false,
            "quit" => break,
            _ => {
                if let Err(e) = engine.apply_move(command) {
                    eprintln!("error: {e}");
                    continue;
                }
                if !force {
                    run_search(&mut engine, post);
                }
            }
        }
    }
}

fn run_search(engine: &mut Engine, post: bool) {
    let (best, info) = engine.search();
    if post {
        for line in info {
            println!("{line}");
        }
    }
    println!("move {best}");
}

fn arg_value(args: &[String], flag: &str) -> Option<String> {
    args.iter()
        .position(|a| a == flag)
        .and_then(|i| args.get(i + 1))
        .cloned()
}
