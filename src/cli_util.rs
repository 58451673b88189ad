use std::io::{self, Write};

use crate::error::BrainfuckError;
use crate::theme;

/// Where an instruction address sits in the source text, plus a one-line
/// excerpt around it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceContext {
    pub line: usize,
    pub column: usize,
    pub excerpt: String,
    /// Chars from the start of `excerpt` to the instruction.
    pub caret_offset: usize,
}

/// Show a short window around the position for context.
const WINDOW_CHARS: usize = 32;

impl SourceContext {
    /// Locate char address `pos` in `code`. The excerpt never crosses a line
    /// break, so the caret lines up under multi-line programs too.
    pub fn locate(code: &str, pos: usize) -> Self {
        let chars: Vec<char> = code.chars().collect();
        let pos = pos.min(chars.len());

        let line_start = chars[..pos]
            .iter()
            .rposition(|&c| c == '\n')
            .map_or(0, |i| i + 1);
        let line_end = chars[pos..]
            .iter()
            .position(|&c| c == '\n')
            .map_or(chars.len(), |i| pos + i);

        let start = pos.saturating_sub(WINDOW_CHARS).max(line_start);
        let end = (pos + WINDOW_CHARS + 1).min(line_end);

        let excerpt = chars[start..end]
            .iter()
            .map(|&c| if c.is_whitespace() { ' ' } else { c })
            .collect();

        Self {
            line: chars[..line_start].iter().filter(|&&c| c == '\n').count() + 1,
            column: pos - line_start + 1,
            excerpt,
            caret_offset: pos - start,
        }
    }
}

/// Print `err` to stderr, prefixed with `program`. Syntax errors also get the
/// offending line with a caret under the bracket.
pub fn print_error(program: &str, code: &str, err: &BrainfuckError) {
    eprintln!("{program}: {} {err}", theme::error_label());

    if let BrainfuckError::UnmatchedBracket { ip, .. } = err {
        let ctx = SourceContext::locate(code, *ip);
        eprintln!(
            "  {}",
            theme::location(&format!("--> line {}, column {}", ctx.line, ctx.column))
        );
        eprintln!("  {}", ctx.excerpt);
        eprintln!("  {}{}", " ".repeat(ctx.caret_offset), theme::caret("^"));
    }
    let _ = io::stderr().flush();
}
