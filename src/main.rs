//! Bitcoin Key Toolkit CLI
//!
//! Usage:
//!   btc_vanity ka 01 false                   # Address of private key 1
//!   btc_vanity v 1Kid true                   # Find an address starting with "1Kid"
//!   btc_vanity -w 4 --timeout 600 v 1Kid true  # Same, bounded to 10 minutes
//!   btc_vanity i                             # Read further commands from stdin

use std::io::{self, BufRead};
use std::process;

use clap::Parser;
use tracing_subscriber::EnvFilter;

use btc_vanity::commands::{self, Context};
use btc_vanity::{Command, Config};

const PROGRAM: &str = "btc_vanity";

/// Exit status for termination by SIGINT.
const INTERRUPTED: i32 = 130;

/// Spellings accepted in place of `help`.
const HELP_ALIASES: [&str; 6] = ["Help", "h", "H", "?", "/?", "-?"];

fn main() {
    init_logging();

    let config = Config::parse_from(normalize_args(std::env::args()));

    // Validate configuration
    let search = match config.search_config() {
        Ok(search) => search,
        Err(e) => {
            eprintln!("Configuration error: {}", e);
            process::exit(1);
        }
    };

    let Some(command) = config.command else {
        eprintln!("No command given. Try \"{} help\" for a command reference.", PROGRAM);
        process::exit(1);
    };

    let context = Context::new(search);

    // Set up ctrl-c handler: stop a running search, otherwise quit
    let cancel = context.cancel.clone();
    ctrlc::set_handler(move || {
        if !cancel.interrupt() {
            process::exit(INTERRUPTED);
        }
    })
    .expect("Error setting Ctrl-C handler");

    let mut interactive = false;
    if let Err(e) = run_command(&command, &context, &mut interactive) {
        eprintln!("Error: {}", e);
        process::exit(1);
    }

    if interactive {
        interactive_loop(&context);
    }
}

/// Reads commands from stdin until interactive mode is toggled off or input ends.
///
/// Errors are reported and the loop continues.
fn interactive_loop(context: &Context) {
    let stdin = io::stdin();
    let mut interactive = true;

    for line in stdin.lock().lines() {
        let line = match line {
            Ok(line) => line,
            Err(e) => {
                eprintln!("Error reading input: {}", e);
                break;
            }
        };

        let words = line.split_whitespace().map(str::to_string);
        let args: Vec<String> = normalize_args(std::iter::once(PROGRAM.to_string()).chain(words));
        if args.len() == 1 {
            continue;
        }

        let config = match Config::try_parse_from(args) {
            Ok(config) => config,
            Err(e) => {
                let _ = e.print();
                continue;
            }
        };

        let Some(command) = config.command.as_ref() else {
            continue;
        };

        let line_context = match config.search_config() {
            Ok(search) => Context {
                search,
                cancel: context.cancel.clone(),
            },
            Err(e) => {
                eprintln!("Configuration error: {}", e);
                continue;
            }
        };

        if let Err(e) = run_command(command, &line_context, &mut interactive) {
            eprintln!("Error: {}", e);
        }

        if !interactive {
            break;
        }
    }
}

fn run_command(
    command: &Command,
    context: &Context,
    interactive: &mut bool,
) -> Result<(), btc_vanity::Error> {
    match command {
        Command::InteractiveMode => {
            if *interactive {
                println!("Leaving interactive mode. Goodbye!");
            } else {
                println!("Entering interactive mode. Welcome!");
            }
            *interactive = !*interactive;
            return Ok(());
        }
        Command::FindVanityAddress { .. } => {
            println!("Searching... (Press Ctrl+C to stop)\n");
        }
        _ => {}
    }

    for line in commands::execute(command, context)? {
        println!("{}", line);
    }
    Ok(())
}

/// Maps the help shorthands onto clap's `help` subcommand.
fn normalize_args(args: impl IntoIterator<Item = String>) -> Vec<String> {
    args.into_iter()
        .enumerate()
        .map(|(i, arg)| {
            if i == 1 && HELP_ALIASES.contains(&arg.as_str()) {
                "help".to_string()
            } else {
                arg
            }
        })
        .collect()
}

fn init_logging() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .init();
}
