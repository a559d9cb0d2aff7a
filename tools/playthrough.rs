//! Playthrough — interactive terminal driver for the session engine.
//!
//! Usage: playthrough [--script <path.ron>] [--fast]
//!
//! Replays each event batch with its scheduled delays, shows the current
//! choice set, and reads choice ids (or list numbers) from stdin.
//! `restart` begins a new session, `quit` exits.

use chatsim_engine::core::engine::SessionEngine;
use chatsim_engine::core::events::{Effect, EventBatch};
use chatsim_engine::core::timing::SCROLL_SETTLE_MS;
use chatsim_engine::scenarios::saturday_promise;
use chatsim_engine::schema::message::{Message, Speaker};
use chatsim_engine::schema::script::Script;
use std::io::{self, BufRead, Write};
use std::path::Path;
use std::time::Duration;

fn main() {
    let args: Vec<String> = std::env::args().collect();

    let mut script_path = None;
    let mut fast = false;

    let mut i = 1;
    while i < args.len() {
        match args[i].as_str() {
            "--script" if i + 1 < args.len() => {
                i += 1;
                script_path = Some(args[i].clone());
            }
            "--fast" => {
                fast = true;
            }
            "--help" | "-h" => {
                print_usage();
                return;
            }
            _ => {
                eprintln!("Unknown argument: {}", args[i]);
                print_usage();
                std::process::exit(1);
            }
        }
        i += 1;
    }

    let script = match script_path {
        Some(ref path) => match Script::load_from_ron(Path::new(path)) {
            Ok(s) => {
                println!("Loaded script: {}", path);
                s
            }
            Err(e) => {
                eprintln!("ERROR loading script {}: {}", path, e);
                std::process::exit(1);
            }
        },
        None => saturday_promise(),
    };

    let mut engine = match SessionEngine::new(script) {
        Ok(e) => e,
        Err(e) => {
            eprintln!("ERROR: script failed validation: {}", e);
            std::process::exit(1);
        }
    };

    println!("Type a choice id or number to reply, 'restart' or 'quit'.\n");

    let batch = engine.start();
    replay(&mut engine, batch, fast);

    let stdin = io::stdin();
    let mut stdout = io::stdout();

    loop {
        if engine.status().is_terminal() {
            println!("\n=== {:?} ===", engine.status());
            if let Some(text) = engine.ending_text() {
                println!("{}\n", text);
            }
            println!("Play again? (restart/quit)");
        } else {
            print_choices(&engine);
        }

        print!("> ");
        stdout.flush().ok();

        let mut line = String::new();
        if stdin.lock().read_line(&mut line).is_err() || line.is_empty() {
            break;
        }
        let line = line.trim();
        if line.is_empty() {
            continue;
        }

        match line {
            "quit" | "exit" | "q" => {
                println!("Goodbye.");
                break;
            }
            "restart" | "r" => {
                println!("\n--- new session ---\n");
                let batch = engine.start();
                replay(&mut engine, batch, fast);
                continue;
            }
            _ => {}
        }

        // Accept either the id ("3B") or the 1-based list number.
        let chosen = match line.parse::<usize>() {
            Ok(n) if n >= 1 => engine
                .current_choice_set()
                .get(n - 1)
                .map(|c| c.id.as_str().to_string()),
            _ => Some(line.to_string()),
        };
        let Some(id) = chosen else {
            println!("No such choice.");
            continue;
        };

        match engine.submit_choice(&id) {
            Ok(batch) => replay(&mut engine, batch, fast),
            Err(e) => println!("Rejected: {}", e),
        }
    }
}

/// Apply a batch's effects in order, honoring the scheduled delays, then
/// acknowledge it so the engine reopens input.
fn replay(engine: &mut SessionEngine, batch: EventBatch, fast: bool) {
    let incarnation = batch.incarnation;
    let mut typing = false;
    for scheduled in batch.effects {
        if !fast && scheduled.delay_ms > 0 {
            std::thread::sleep(Duration::from_millis(scheduled.delay_ms));
        }
        match scheduled.effect {
            Effect::AppendMessage(message) => {
                if typing {
                    clear_typing_line();
                    typing = false;
                }
                print_message(&message);
                if !fast {
                    std::thread::sleep(Duration::from_millis(SCROLL_SETTLE_MS));
                }
            }
            Effect::SetTypingIndicator(on) => {
                if on && !typing {
                    print!("  [typing...]");
                    io::stdout().flush().ok();
                } else if !on && typing {
                    clear_typing_line();
                }
                typing = on;
            }
            Effect::SetStatus(status) => {
                if status.is_terminal() {
                    println!("  * status: {:?} *", status);
                }
            }
            Effect::SetChoiceSet(_) => {
                // The prompt loop reads the live set from the engine.
            }
        }
    }
    if typing {
        clear_typing_line();
    }
    engine.settle(incarnation);
}

fn print_message(message: &Message) {
    let who = match message.speaker {
        Speaker::Narrator => "her",
        Speaker::Player => "you",
        Speaker::System => "***",
    };
    let failed = if message.delivery_failed {
        "  [not delivered]"
    } else {
        ""
    };
    println!("  {:>4} | {}{}", who, message.text, failed);
    if let Some(ref attachment) = message.attachment {
        println!("       | [{}]", attachment.0);
    }
}

fn print_choices(engine: &SessionEngine) {
    let choices = engine.current_choice_set();
    if choices.is_empty() {
        return;
    }
    println!();
    for (i, c) in choices.iter().enumerate() {
        println!("  {}. [{}] {}", i + 1, c.id.as_str(), c.display_text);
    }
}

fn clear_typing_line() {
    print!("\r            \r");
    io::stdout().flush().ok();
}

fn print_usage() {
    println!("Playthrough — interactive terminal driver for the session engine.");
    println!();
    println!("Usage: playthrough [--script <path.ron>] [--fast]");
    println!();
    println!("  --script <path>  Load a script from a RON file (default: bundled scenario)");
    println!("  --fast           Skip all scheduled delays");
}
