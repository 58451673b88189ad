use bf_interp::commands::run::{self, RunArgs};
use bf_interp::logging::init_logging;
use clap::Parser;
use std::env;
use std::io::{self, Write};

/// Exit status after Ctrl-C, 128 + SIGINT.
const INTERRUPTED: i32 = 130;

#[derive(Parser, Debug)]
#[command(name = "bf", version, about = "Run a Brainfuck program on a wrapping 8-bit tape")]
struct Cli {
    /// Log to stderr: -v for debug, -vv to trace every instruction (RUST_LOG overrides)
    #[arg(short = 'v', long = "verbose", action = clap::ArgAction::Count)]
    verbose: u8,

    #[command(flatten)]
    run: RunArgs,
}

fn main() {
    // Program name prefixes every diagnostic
    let program = env::args().next().unwrap_or_else(|| String::from("bf"));

    let cli = Cli::parse();
    init_logging(cli.verbose);

    // Whatever the program printed so far should survive Ctrl-C
    if let Err(e) = ctrlc::set_handler(|| {
        let _ = io::stdout().flush();
        let _ = io::stderr().flush();
        std::process::exit(INTERRUPTED);
    }) {
        tracing::warn!("failed to set ctrl+c handler: {e}");
    }

    let code = run::run(&program, cli.run);
    std::process::exit(code);
}
