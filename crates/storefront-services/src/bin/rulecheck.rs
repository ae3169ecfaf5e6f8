//! # Rule Checker
//!
//! Evaluates storefront rules from the command line.
//!
//! ## Usage
//! ```bash
//! rulecheck discount 100 SAVE10
//! rulecheck user alfred 19
//! rulecheck drive 16 US
//! rulecheck --config ./rules.toml hours "2025-12-25 09:30"
//! ```
//!
//! Arguments are read as JSON when they parse (`19`, `"19"`, `null`) and as
//! plain strings otherwise.

use std::env;
use std::path::PathBuf;
use std::process::ExitCode;

use serde_json::Value;
use storefront_core::schedule::parse_local;
use storefront_core::{input, Clock, RuleBook};
use storefront_services::{config, ServiceError, SystemClock};
use tracing_subscriber::EnvFilter;

fn print_help() {
    println!("Storefront Rule Checker");
    println!();
    println!("Usage: rulecheck [OPTIONS] <COMMAND> [ARGS]");
    println!();
    println!("Commands:");
    println!("  coupons                    List the coupon catalog");
    println!("  discount <PRICE> <CODE>    Apply a discount code to a price");
    println!("  username <NAME>            Check a standalone username");
    println!("  user <NAME> <AGE>          Validate sign-up input");
    println!("  drive <AGE> <COUNTRY>      Check the driving age");
    println!("  hours [YYYY-MM-DD HH:MM]   Is the store open (default: now)");
    println!("  holiday [YYYY-MM-DD HH:MM] Holiday discount (default: now)");
    println!();
    println!("Options:");
    println!("  -c, --config <PATH>    Rules file (default: platform config dir)");
    println!("  -h, --help             Show this help message");
}

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("info,storefront=debug"));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

/// Reads an argument as JSON, falling back to a bare string.
fn loose(arg: &str) -> Value {
    serde_json::from_str(arg).unwrap_or_else(|_| Value::String(arg.to_string()))
}

fn arg<'a>(rest: &'a [String], index: usize, name: &str) -> Result<&'a str, String> {
    rest.get(index)
        .map(String::as_str)
        .ok_or_else(|| format!("missing argument <{name}>"))
}

fn instant(rest: &[String]) -> Result<chrono::NaiveDateTime, String> {
    match rest.first() {
        Some(value) => parse_local(value).map_err(|e| format!("invalid time '{value}': {e}")),
        None => Ok(SystemClock.now()),
    }
}

fn run(book: &RuleBook, command: &str, rest: &[String]) -> Result<String, String> {
    match command {
        "coupons" => Ok(book
            .coupons()
            .iter()
            .map(|c| format!("{} {}", c.code, c.discount))
            .collect::<Vec<_>>()
            .join("\n")),
        "discount" => {
            let price = loose(arg(rest, 0, "PRICE")?);
            let code = loose(arg(rest, 1, "CODE")?);
            input::calculate_discount(book, &price, &code)
                .map(|m| m.to_string())
                .map_err(|e| e.to_string())
        }
        "username" => {
            let name = loose(arg(rest, 0, "NAME")?);
            Ok(input::is_valid_username(book, &name).to_string())
        }
        "user" => {
            let name = loose(arg(rest, 0, "NAME")?);
            let age = loose(arg(rest, 1, "AGE")?);
            Ok(input::validate_user_input(book, &name, &age).to_string())
        }
        "drive" => {
            let age = loose(arg(rest, 0, "AGE")?);
            let country = loose(arg(rest, 1, "COUNTRY")?);
            input::can_drive(book, &age, &country)
                .map(|ok| ok.to_string())
                .map_err(|e| e.to_string())
        }
        "hours" => Ok(book.is_online(instant(rest)?).to_string()),
        "holiday" => Ok(book.holiday_discount(instant(rest)?).to_string()),
        other => Err(format!("unknown command '{other}' (try --help)")),
    }
}

fn main() -> ExitCode {
    init_tracing();

    let args: Vec<String> = env::args().skip(1).collect();
    let mut config_path: Option<PathBuf> = None;
    let mut positional: Vec<String> = Vec::new();

    let mut i = 0;
    while i < args.len() {
        match args[i].as_str() {
            "--config" | "-c" => {
                let Some(path) = args.get(i + 1) else {
                    eprintln!("error: --config needs a path");
                    return ExitCode::from(2);
                };
                config_path = Some(PathBuf::from(path));
                i += 1;
            }
            "--help" | "-h" => {
                print_help();
                return ExitCode::SUCCESS;
            }
            other => positional.push(other.to_string()),
        }
        i += 1;
    }

    let Some((command, rest)) = positional.split_first() else {
        print_help();
        return ExitCode::from(2);
    };

    let loaded = config::load(config_path)
        .and_then(|rules| RuleBook::new(rules).map_err(ServiceError::from));
    let book = match loaded {
        Ok(book) => book,
        Err(e) => {
            eprintln!("error: {e}");
            return ExitCode::FAILURE;
        }
    };

    match run(&book, command, rest) {
        Ok(output) => {
            println!("{output}");
            ExitCode::SUCCESS
        }
        Err(message) => {
            eprintln!("error: {message}");
            ExitCode::FAILURE
        }
    }
}
