//! CLI tool to inspect how a fontifier would see C/C++ sources.

use std::fs;
use std::process::ExitCode;

fn main() -> ExitCode {
    let args: Vec<String> = std::env::args().collect();

    if args.len() < 2 || args[1] == "--help" || args[1] == "-h" {
        eprintln!("Usage: cppscan <command> [files...]");
        eprintln!();
        eprintln!("Commands:");
        eprintln!("  tokens  Dump the token stream of each file");
        eprintln!("  spans   Dump the classified spans of each file");
        eprintln!("  check   Fail if any file produces diagnostics");
        eprintln!();
        eprintln!("Examples:");
        eprintln!("  cppscan spans lambda.cc");
        eprintln!("  cppscan check src/*.cc");
        return ExitCode::from(2);
    }

    let command = args[1].as_str();
    let files = &args[2..];

    if files.is_empty() {
        eprintln!("Error: no files specified");
        return ExitCode::from(2);
    }

    let mut had_error = false;

    for path in files {
        let content = match fs::read_to_string(path) {
            Ok(c) => c,
            Err(e) => {
                eprintln!("{path}: {e}");
                had_error = true;
                continue;
            }
        };

        match command {
            "tokens" => {
                let lexed = cppscan_rs::tokenize(&content);
                for tok in &lexed.tokens {
                    if tok.kind == cppscan_rs::TokenKind::Whitespace {
                        continue;
                    }
                    println!(
                        "{path}:{}:{}: {:?} {:?}",
                        tok.line,
                        tok.column,
                        tok.kind,
                        tok.text(&content)
                    );
                }
                for diag in &lexed.diagnostics {
                    eprintln!("{path}: {diag}");
                }
            }
            "spans" => {
                let result = cppscan_rs::scan(&content);
                for span in &result.spans {
                    println!(
                        "{path}: {}..{} {:?} {:?}",
                        span.start,
                        span.end,
                        span.category,
                        span.text(&content)
                    );
                }
                for diag in &result.diagnostics {
                    eprintln!("{path}: {diag}");
                }
            }
            "check" => {
                let result = cppscan_rs::scan(&content);
                if result.diagnostics.is_empty() {
                    let spans = result.spans.len();
                    eprintln!("{path}: clean ({spans} span(s))");
                } else {
                    for diag in &result.diagnostics {
                        eprintln!("{path}: {diag}");
                    }
                    had_error = true;
                }
            }
            _ => {
                eprintln!("Unknown command: {command}");
                return ExitCode::from(2);
            }
        }
    }

    if had_error {
        ExitCode::FAILURE
    } else {
        ExitCode::SUCCESS
    }
}
