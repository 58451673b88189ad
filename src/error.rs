use std::fmt;

/// Errors that can occur while loading or interpreting Brainfuck code.
#[derive(Debug, thiserror::Error)]
pub enum BrainfuckError {
    /// Loops were not balanced; a matching `[` or `]` was not found.
    #[error("Brainfuck syntax error: mismatched '{kind}' at instruction {ip}")]
    UnmatchedBracket { ip: usize, kind: BracketKind },

    /// A tape needs at least one cell.
    #[error("memory size must be at least 1 cell")]
    EmptyTape,

    /// An underlying I/O error occurred when reading stdin or writing stdout.
    #[error("I/O error at instruction {ip}: {source}")]
    Io {
        ip: usize,
        #[source]
        source: std::io::Error,
    },
}

/// Which side of the loop was unmatched.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BracketKind {
    Open,
    Close,
}

impl BracketKind {
    pub fn as_char(self) -> char {
        match self {
            BracketKind::Open => '[',
            BracketKind::Close => ']',
        }
    }
}

impl fmt::Display for BracketKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_char())
    }
}
