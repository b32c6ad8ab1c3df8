//! CLI tool to validate, format, and query dotenv files.

use std::process::ExitCode;

fn main() -> ExitCode {
    let args: Vec<String> = std::env::args().collect();

    if args.len() < 2 || args[1] == "--help" || args[1] == "-h" {
        eprintln!("Usage: envfile <command> [args...]");
        eprintln!();
        eprintln!("Commands:");
        eprintln!("  validate <files...>   Check if dotenv file(s) parse");
        eprintln!("  fmt <files...>        Format dotenv file(s) and print to stdout");
        eprintln!("  get <key> <files...>  Merge file(s) and print a key's value");
        eprintln!();
        eprintln!("A trailing '?' marks a file optional: envfile get KEY .env .env.local?");
        return ExitCode::from(2);
    }

    let command = args[1].as_str();

    match command {
        "validate" => validate(&args[2..]),
        "fmt" => fmt(&args[2..]),
        "get" => {
            if args.len() < 4 {
                eprintln!("Error: get needs a key and at least one file");
                return ExitCode::from(2);
            }
            get(&args[2], &args[3..])
        }
        _ => {
            eprintln!("Unknown command: {command}");
            ExitCode::from(2)
        }
    }
}

fn validate(files: &[String]) -> ExitCode {
    if files.is_empty() {
        eprintln!("Error: no files specified");
        return ExitCode::from(2);
    }

    let mut had_error = false;
    for path in files {
        match envfile_rs::parse_file(path) {
            Ok(doc) => {
                let variables = doc.keys().count();
                let comments = doc.comments().count();
                eprintln!("{path}: valid ({variables} variable(s), {comments} comment(s))");
            }
            Err(e) => {
                eprintln!("{path}: {e}");
                had_error = true;
            }
        }
    }

    if had_error {
        ExitCode::FAILURE
    } else {
        ExitCode::SUCCESS
    }
}

fn fmt(files: &[String]) -> ExitCode {
    if files.is_empty() {
        eprintln!("Error: no files specified");
        return ExitCode::from(2);
    }

    let mut had_error = false;
    for path in files {
        match envfile_rs::parse_file(path) {
            Ok(doc) => print!("{}", envfile_rs::format(&doc)),
            Err(e) => {
                eprintln!("{path}: {e}");
                had_error = true;
            }
        }
    }

    if had_error {
        ExitCode::FAILURE
    } else {
        ExitCode::SUCCESS
    }
}

fn get(key: &str, files: &[String]) -> ExitCode {
    match envfile_rs::parse_files(files) {
        Ok(doc) => doc.get(key).map_or_else(
            || {
                eprintln!("{key}: not set");
                ExitCode::FAILURE
            },
            |value| {
                println!("{value}");
                ExitCode::SUCCESS
            },
        ),
        Err(e) => {
            eprintln!("{e}");
            ExitCode::FAILURE
        }
    }
}
