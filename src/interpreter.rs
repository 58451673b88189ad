//! The execution engine.
//!
//! An [`Interpreter`] owns the program, its [`BracketMap`], a fixed tape of
//! byte cells and the two cursors. Both cursors and every cell wrap instead
//! of failing:
//! - `+`/`-` wrap modulo 256,
//! - `>` past the last cell lands on cell 0 and `<` from cell 0 lands on the last cell.

use std::io::{self, Read, Write};

use crate::brackets::{BracketMap, LOOP_CLOSE, LOOP_OPEN};
use crate::error::BrainfuckError;

/// Tape length used when none is configured.
pub const DEFAULT_MEMORY_SIZE: usize = 4096;

/// Value stored by `,` once the input stream is exhausted.
pub const EOF_CELL_VALUE: u8 = 0;

/// A Brainfuck interpreter over a wrapping tape.
///
/// Brackets are resolved when the interpreter is built, so a program that
/// makes it to [`Interpreter::run`] is known to be well formed.
pub struct Interpreter {
    code: Vec<char>,
    brackets: BracketMap,
    memory: Vec<u8>,
    pointer: usize,
    ip: usize,
    steps: u64,
}

impl Interpreter {
    /// Create an interpreter for `source` with [`DEFAULT_MEMORY_SIZE`] cells.
    pub fn new(source: &str) -> Result<Self, BrainfuckError> {
        Self::with_memory_size(source, DEFAULT_MEMORY_SIZE)
    }

    /// Create an interpreter for `source` with a tape of `memory_size` cells.
    ///
    /// Fails with [`BrainfuckError::EmptyTape`] for a zero-length tape and
    /// with [`BrainfuckError::UnmatchedBracket`] for unbalanced loops.
    pub fn with_memory_size(source: &str, memory_size: usize) -> Result<Self, BrainfuckError> {
        if memory_size == 0 {
            return Err(BrainfuckError::EmptyTape);
        }

        let code: Vec<char> = source.chars().collect();
        let brackets = BracketMap::resolve(&code)?;

        Ok(Self {
            code,
            brackets,
            memory: vec![0; memory_size],
            pointer: 0,
            ip: 0,
            steps: 0,
        })
    }

    /// Execute the program against the process's stdin and stdout.
    pub fn run(&mut self) -> Result<(), BrainfuckError> {
        self.run_with_io(io::stdin(), io::stdout())
    }

    /// Execute the program until the instruction pointer runs off the end.
    ///
    /// `,` reads one byte from `input` and stores [`EOF_CELL_VALUE`] once it
    /// is exhausted. `.` writes one byte to `output`. Output is flushed before
    /// each read and when the program ends.
    pub fn run_with_io<R: Read, W: Write>(
        &mut self,
        mut input: R,
        mut output: W,
    ) -> Result<(), BrainfuckError> {
        let code_len = self.code.len();
        tracing::debug!(
            instructions = code_len,
            memory_size = self.memory.len(),
            "starting execution"
        );

        while self.ip < code_len {
            let instr = self.code[self.ip];
            tracing::trace!(
                ip = self.ip,
                ptr = self.pointer,
                cell = self.memory[self.pointer],
                op = %instr,
                "step"
            );

            match instr {
                '>' => {
                    self.pointer = (self.pointer + 1) % self.memory.len();
                }
                '<' => {
                    self.pointer = if self.pointer == 0 {
                        self.memory.len() - 1
                    } else {
                        self.pointer - 1
                    };
                }
                '+' => {
                    let cell = &mut self.memory[self.pointer];
                    *cell = cell.wrapping_add(1);
                }
                '-' => {
                    let cell = &mut self.memory[self.pointer];
                    *cell = cell.wrapping_sub(1);
                }
                '.' => {
                    let ip = self.ip;
                    output
                        .write_all(&[self.memory[self.pointer]])
                        .map_err(|source| BrainfuckError::Io { ip, source })?;
                }
                ',' => {
                    let ip = self.ip;
                    // Anything printed so far should be visible before we block on input.
                    output
                        .flush()
                        .map_err(|source| BrainfuckError::Io { ip, source })?;
                    let byte = read_byte(&mut input)
                        .map_err(|source| BrainfuckError::Io { ip, source })?;
                    self.memory[self.pointer] = byte.unwrap_or(EOF_CELL_VALUE);
                }
                LOOP_OPEN => {
                    // Land on the matching ']'; the increment below steps past it.
                    if self.memory[self.pointer] == 0 {
                        self.ip = self.jump_target();
                    }
                }
                LOOP_CLOSE => {
                    // Land on the matching '['; the increment below re-enters the body.
                    if self.memory[self.pointer] != 0 {
                        self.ip = self.jump_target();
                    }
                }
                _ => {}
            }

            self.steps += 1;
            self.ip += 1;
        }

        let ip = self.ip;
        output
            .flush()
            .map_err(|source| BrainfuckError::Io { ip, source })?;

        tracing::debug!(steps = self.steps, "execution finished");
        Ok(())
    }

    // Every bracket address was paired in `with_memory_size`.
    fn jump_target(&self) -> usize {
        self.brackets.partner(self.ip).expect("validated bracket")
    }

    /// The program as decoded characters; addresses index into this slice.
    pub fn source(&self) -> &[char] {
        &self.code
    }

    pub fn bracket_map(&self) -> &BracketMap {
        &self.brackets
    }

    /// The whole tape.
    pub fn memory(&self) -> &[u8] {
        &self.memory
    }

    pub fn memory_size(&self) -> usize {
        self.memory.len()
    }

    /// The data cursor.
    pub fn pointer(&self) -> usize {
        self.pointer
    }

    /// Address of the next instruction; equals the source length once finished.
    pub fn instruction_pointer(&self) -> usize {
        self.ip
    }

    /// Instructions dispatched so far, comment characters included.
    pub fn steps(&self) -> u64 {
        self.steps
    }
}

/// Read exactly one byte; `None` means end of input.
fn read_byte<R: Read>(input: &mut R) -> io::Result<Option<u8>> {
    let mut buf = [0u8; 1];
    loop {
        match input.read(&mut buf) {
            Ok(0) => return Ok(None),
            Ok(_) => return Ok(Some(buf[0])),
            Err(e) if e.kind() == io::ErrorKind::Interrupted => continue,
            Err(e) => return Err(e),
        }
    }
}
