#![forbid(unsafe_code)]

//! Command-line argument parsing for the herald demo.
//!
//! Parses args manually (no external dependencies) to keep the binary lean.
//! Supports environment variable overrides via `HERALD_DEMO_*` prefix.

use std::env;
use std::process;

const VERSION: &str = env!("CARGO_PKG_VERSION");

const HELP_TEXT: &str = "\
Herald Demo — observer pattern walkthrough

USAGE:
    herald-demo [OPTIONS]

OPTIONS:
    --headlines=N   Headlines to publish per round (default: 3)
    --verbose       Log registry internals at trace level
    --help, -h      Show this help message
    --version, -V   Show version

ENVIRONMENT:
    HERALD_DEMO_HEADLINES   Same as --headlines
    RUST_LOG                Standard tracing filter, overrides --verbose
";

/// Parsed command-line options.
#[derive(Debug, Clone)]
pub struct Opts {
    pub headlines: usize,
    pub verbose: bool,
}

impl Default for Opts {
    fn default() -> Self {
        Self {
            headlines: 3,
            verbose: false,
        }
    }
}

impl Opts {
    /// Parse from `std::env`. Exits the process on `--help`, `--version`,
    /// or an unrecognized argument.
    pub fn parse() -> Self {
        let mut opts = Self::default();

        if let Ok(value) = env::var("HERALD_DEMO_HEADLINES")
            && let Ok(n) = value.trim().parse()
        {
            opts.headlines = n;
        }

        for arg in env::args().skip(1) {
            match arg.as_str() {
                "--help" | "-h" => {
                    print!("{HELP_TEXT}");
                    process::exit(0);
                }
                "--version" | "-V" => {
                    println!("herald-demo {VERSION}");
                    process::exit(0);
                }
                "--verbose" => opts.verbose = true,
                other => {
                    if let Some(value) = other.strip_prefix("--headlines=") {
                        match value.parse() {
                            Ok(n) => opts.headlines = n,
                            Err(_) => {
                                eprintln!("invalid --headlines value: {value}");
                                process::exit(2);
                            }
                        }
                    } else {
                        eprintln!("unrecognized argument: {other}");
                        eprintln!("run with --help for usage");
                        process::exit(2);
                    }
                }
            }
        }
        opts
    }
}
