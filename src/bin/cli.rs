use chess_master::config::SessionConfig;
use chess_master::logger::{DEFAULT_FILTER, LogTarget, init_logging};
use chess_master::position::MoveRequest;
use chess_master::session::GameSession;
use std::io::{self, BufRead};
use std::path::PathBuf;
use std::time::Instant;

struct Args {
    config: Option<PathBuf>,
    log: Option<PathBuf>,
    log_filter: String,
}

fn parse_args() -> Result<Args, String> {
    let mut args = Args {
        config: None,
        log: None,
        log_filter: DEFAULT_FILTER.to_string(),
    };

    let mut it = std::env::args().skip(1);
    while let Some(arg) = it.next() {
        match arg.as_str() {
            "--config" => args.config = Some(it.next().ok_or("--config needs a path")?.into()),
            "--log" => args.log = Some(it.next().ok_or("--log needs a path")?.into()),
            "--log-filter" => args.log_filter = it.next().ok_or("--log-filter needs a value")?,
            "-h" | "--help" => {
                println!("usage: chess_master [--config <file.toml>] [--log <file>] [--log-filter <filter>]");
                std::process::exit(0);
            }
            other => return Err(format!("unknown argument: {}", other)),
        }
    }
    Ok(args)
}

fn main() {
    let args = match parse_args() {
        Ok(a) => a,
        Err(e) => {
            eprintln!("{}", e);
            std::process::exit(2);
        }
    };

    let target = match &args.log {
        Some(path) => LogTarget::File(path),
        None => LogTarget::Stderr,
    };
    if let Err(e) = init_logging(target, &args.log_filter) {
        eprintln!("Warning: logging disabled: {}", e);
    }

    let config = match &args.config {
        Some(path) => match SessionConfig::load(path) {
            Ok(c) => c,
            Err(e) => {
                eprintln!("{}", e);
                std::process::exit(1);
            }
        },
        None => SessionConfig::default(),
    };

    let mut session = GameSession::new(config);
    println!("{}", session.position());

    // Main command loop
    let stdin = io::stdin();
    for line in stdin.lock().lines() {
        let line = match line {
            Ok(l) => l.trim().to_string(),
            Err(_) => break,
        };

        if line.is_empty() {
            continue;
        }

        let parts: Vec<&str> = line.split_whitespace().collect();
        let command = parts[0];

        match command {
            "move" | "m" => match parts.as_slice() {
                [_, from, to] => {
                    let result = session.attempt_move(from, to);
                    handle_move(&mut session, result);
                }
                [_, uci] => handle_uci_move(&mut session, uci),
                _ => println!("usage: move <from> <to>"),
            },
            "random" => {
                let result = session.random_move();
                handle_move(&mut session, result);
            }
            "undo" | "repeat" => match session.undo() {
                Ok(()) => println!("{}", session.position()),
                Err(e) => println!("{}", e),
            },
            "reset" | "new" => {
                session.reset();
                println!("{}", session.position());
            }
            "fen" => {
                if parts.len() > 1 {
                    match session.load_fen(&parts[1..].join(" ")) {
                        Ok(()) => println!("{}", session.position()),
                        Err(e) => println!("{}", e),
                    }
                } else {
                    println!("{}", session.fen());
                }
            }
            "opponent" => match parts.get(1) {
                Some(&"on") => session.set_opponent_enabled(true),
                Some(&"off") => session.set_opponent_enabled(false),
                _ => println!(
                    "opponent is {}",
                    if session.opponent_enabled() { "on" } else { "off" }
                ),
            },
            "status" => println!("{}", session.status()),
            "history" => {
                for (i, pos) in session.history().iter().enumerate() {
                    println!("{:>3}. {}", i + 1, pos.fen());
                }
            }
            "moves" => println!("{}", session.position().legal_moves_uci().join(" ")),
            "d" | "display" => println!("{}", session.position()),
            "quit" => break,
            // Bare UCI like "e2e4"
            _ if command.len() >= 4 && command.len() <= 5 => handle_uci_move(&mut session, command),
            _ => println!("unknown command: {}", command),
        }
    }
}

fn handle_uci_move(session: &mut GameSession, uci: &str) {
    let result = MoveRequest::from_uci(uci, session.config().promotion)
        .and_then(|request| session.attempt(request));
    handle_move(session, result);
}

fn handle_move(
    session: &mut GameSession,
    result: Result<chess_master::AppliedMove, chess_master::GameError>,
) {
    match result {
        Ok(mv) => {
            println!("{}: {}", mv.side, mv);
            run_opponent(session);
            println!("{}", session.position());
            println!("{}", session.status());
        }
        Err(e) => println!("{}", e),
    }
}

/// Wait out the reply delay and let the computer move.
fn run_opponent(session: &mut GameSession) {
    let Some(due) = session.maybe_trigger(Instant::now()) else {
        return;
    };
    std::thread::sleep(due.saturating_duration_since(Instant::now()));
    if let Some(mv) = session.poll(Instant::now()) {
        println!("{}: {}", mv.side, mv);
    }
}
