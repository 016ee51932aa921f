//! Command-line parsing

use crate::error::{PassGenError, Result};
use crate::request::parse_length;
use crate::types::{CharacterClass, GenerationOptions};

/// What the binary was asked to do
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Print `count` distinct passwords
    Generate {
        options: GenerationOptions,
        count: usize,
    },
    /// Run the HTTP server; flags override the environment
    Serve {
        host: Option<String>,
        port: Option<u16>,
    },
    Help,
}

/// Parse arguments, excluding the program name
pub fn parse_args<I>(args: I) -> Result<Command>
where
    I: IntoIterator<Item = String>,
{
    let args: Vec<String> = args.into_iter().collect();

    if args.is_empty() || args.iter().any(|a| a == "--help" || a == "-h") {
        return Ok(Command::Help);
    }

    match args[0].as_str() {
        "generate" | "gen" => parse_generate(&args[1..]),
        "serve" => parse_serve(&args[1..]),
        other => Err(PassGenError::cli(format!("unknown command: {}", other))),
    }
}

fn parse_generate(args: &[String]) -> Result<Command> {
    let mut length = None;
    let mut classes = Vec::new();
    let mut count = 1;

    let mut iter = args.iter();
    while let Some(flag) = iter.next() {
        match flag.as_str() {
            "--length" | "-l" => {
                length = Some(parse_length(flag_value(flag, iter.next())?)?);
            }
            "--sets" | "-s" => {
                for token in flag_value(flag, iter.next())?.split(',') {
                    if token.trim().is_empty() {
                        continue;
                    }
                    classes.push(token.parse::<CharacterClass>()?);
                }
            }
            "--count" | "-c" => {
                let raw = flag_value(flag, iter.next())?;
                count = match raw.parse::<usize>() {
                    Ok(n) if n > 0 => n,
                    _ => return Err(PassGenError::cli(format!("invalid count: {}", raw))),
                };
            }
            other => return Err(PassGenError::cli(format!("unknown option: {}", other))),
        }
    }

    let length = length.ok_or_else(|| PassGenError::cli("missing --length"))?;
    if classes.is_empty() {
        return Err(PassGenError::NoClassSelected);
    }

    Ok(Command::Generate {
        options: GenerationOptions::new(length, classes),
        count,
    })
}

fn parse_serve(args: &[String]) -> Result<Command> {
    let mut host = None;
    let mut port = None;

    let mut iter = args.iter();
    while let Some(flag) = iter.next() {
        match flag.as_str() {
            "--host" => host = Some(flag_value(flag, iter.next())?.to_string()),
            "--port" | "-p" => {
                let raw = flag_value(flag, iter.next())?;
                port = Some(
                    raw.parse::<u16>()
                        .map_err(|_| PassGenError::cli(format!("invalid port: {}", raw)))?,
                );
            }
            other => return Err(PassGenError::cli(format!("unknown option: {}", other))),
        }
    }

    Ok(Command::Serve { host, port })
}

fn flag_value<'a>(flag: &str, value: Option<&'a String>) -> Result<&'a str> {
    value
        .map(String::as_str)
        .ok_or_else(|| PassGenError::cli(format!("missing value for {}", flag)))
}

/// Print help information
pub fn print_help() {
    println!("Unique Password Generator");
    println!();
    println!("USAGE:");
    println!("    unique-pass-gen generate --length N --sets SETS [--count K]");
    println!("    unique-pass-gen serve [--host HOST] [--port PORT]");
    println!();
    println!("SETS:");
    println!("    Comma-separated list of: digits, lower, upper");
    println!();
    println!("EXAMPLES:");
    println!("    unique-pass-gen generate -l 16 -s digits,lower,upper");
    println!("    unique-pass-gen generate -l 8 -s lower,upper -c 20");
    println!("    unique-pass-gen serve --port 8080");
    println!();
    println!("ENVIRONMENT VARIABLES:");
    println!("    UPG_HOST                  Bind host (default: 0.0.0.0)");
    println!("    UPG_PORT                  Bind port (default: 8080)");
    println!("    UPG_REQUEST_TIMEOUT_SECS  Deadline per generation (default: 10)");
    println!("    UPG_MAX_ATTEMPTS          Attempt cap per generation (default: none)");
    println!("    RUST_LOG                  Log filter (default: info)");
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args(raw: &[&str]) -> Vec<String> {
        raw.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_help() {
        assert_eq!(parse_args(args(&[])).unwrap(), Command::Help);
        assert_eq!(parse_args(args(&["generate", "--help"])).unwrap(), Command::Help);
    }

    #[test]
    fn test_generate() {
        let command = parse_args(args(&[
            "generate", "--length", "10", "--sets", "digits,lower,upper", "-c", "3",
        ]))
        .unwrap();

        let expected = GenerationOptions::builder().length(10).digits().lower().upper().build();
        assert_eq!(
            command,
            Command::Generate {
                options: expected,
                count: 3
            }
        );
    }

    #[test]
    fn test_generate_repeated_sets() {
        let command = parse_args(args(&["gen", "-l", "6", "-s", "digits", "-s", "lower"])).unwrap();
        let Command::Generate { options, count } = command else {
            panic!("expected generate");
        };
        assert_eq!(count, 1);
        assert!(options.has_class(CharacterClass::Digits));
        assert!(options.has_class(CharacterClass::Lower));
    }

    #[test]
    fn test_generate_errors() {
        let err = parse_args(args(&["generate", "-s", "digits"])).unwrap_err();
        assert!(matches!(err, PassGenError::Cli { .. }));

        let err = parse_args(args(&["generate", "-l", "5"])).unwrap_err();
        assert_eq!(err, PassGenError::NoClassSelected);

        let err = parse_args(args(&["generate", "-l", "zero", "-s", "lower"])).unwrap_err();
        assert!(matches!(err, PassGenError::InvalidLength { .. }));

        let err = parse_args(args(&["generate", "-l", "5", "-s", "symbols"])).unwrap_err();
        assert!(matches!(err, PassGenError::Cli { .. }));

        let err = parse_args(args(&["generate", "-l"])).unwrap_err();
        assert!(matches!(err, PassGenError::Cli { .. }));
    }

    #[test]
    fn test_serve() {
        assert_eq!(
            parse_args(args(&["serve", "--port", "9000"])).unwrap(),
            Command::Serve {
                host: None,
                port: Some(9000)
            }
        );
        assert!(parse_args(args(&["serve", "--port", "http"])).is_err());
        assert!(parse_args(args(&["launch"])).is_err());
    }
}
