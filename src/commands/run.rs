use clap::Args;
use std::fs;
use std::io::{self, Write};
use std::path::PathBuf;

use crate::cli_util::print_error;
use crate::config::Settings;
use crate::Interpreter;

#[derive(Args, Debug)]
pub struct RunArgs {
    /// Brainfuck program file, or the code itself with --eval
    #[arg(value_name = "FILE", allow_hyphen_values = true)]
    pub source: String,

    /// Treat FILE as Brainfuck code instead of a path
    #[arg(short = 'e', long = "eval")]
    pub eval: bool,

    /// Tape length in cells (fallback BF_MEMORY_SIZE, then bf.toml; default 4096)
    #[arg(short = 'm', long = "memory-size", value_name = "CELLS")]
    pub memory_size: Option<usize>,

    /// Read settings from PATH instead of bf.toml in the user config directory
    #[arg(short = 'c', long = "config", value_name = "PATH")]
    pub config: Option<PathBuf>,
}

/// Load, validate and execute one program. Returns the process exit code.
pub fn run(program: &str, args: RunArgs) -> i32 {
    let RunArgs {
        source,
        eval,
        memory_size,
        config,
    } = args;

    let settings = match Settings::load(memory_size, config.as_deref()) {
        Ok(settings) => settings,
        Err(e) => {
            eprintln!("{program}: {e}");
            let _ = io::stderr().flush();
            return 1;
        }
    };
    tracing::debug!(memory_size = settings.memory_size, "resolved settings");

    let code = if eval {
        source
    } else {
        let path = PathBuf::from(source);
        match fs::read_to_string(&path) {
            Ok(s) => s,
            Err(e) => {
                eprintln!(
                    "{program}: failed to read {} as UTF-8: {e}",
                    path.display()
                );
                let _ = io::stderr().flush();
                return 1;
            }
        }
    };

    let mut bf = match Interpreter::with_memory_size(&code, settings.memory_size) {
        Ok(bf) => bf,
        Err(err) => {
            print_error(program, &code, &err);
            return 1;
        }
    };

    if let Err(err) = bf.run() {
        print_error(program, &code, &err);
        return 1;
    }

    0
}
