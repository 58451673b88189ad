//! A small Brainfuck interpreter.
//!
//! Programs run on a fixed tape of byte cells (4096 by default) with a
//! single data pointer.
//!
//! Features and behaviors:
//! - Memory tape initialized to 0.
//! - Cells wrap modulo 256; the data pointer wraps around both ends of the tape.
//! - Input `,` reads a single byte; on EOF the current cell is set to 0.
//! - Output `.` writes the byte at the current cell, unmodified.
//! - Loops `[]` are paired before execution starts; unmatched brackets are
//!   reported as errors and nothing runs.
//! - Any character outside `><+-.,[]` is a comment.
//!
//! Quick start:
//!
//! ```
//! use bf_interp::Interpreter;
//!
//! let mut bf = Interpreter::new("++++++++[>++++++++<-]>+.")?;
//! let mut output = Vec::new();
//! bf.run_with_io(std::io::empty(), &mut output)?;
//! assert_eq!(output, b"A");
//! # Ok::<(), bf_interp::BrainfuckError>(())
//! ```

pub mod brackets;
pub mod cli_util;
pub mod commands;
pub mod config;
pub mod error;
pub mod interpreter;
pub mod logging;
pub mod theme;

pub use brackets::BracketMap;
pub use error::{BracketKind, BrainfuckError};
pub use interpreter::{DEFAULT_MEMORY_SIZE, EOF_CELL_VALUE, Interpreter};
