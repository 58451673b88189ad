//! Static loop validation.
//!
//! Before a single instruction runs, the program is scanned once and every
//! `[` is paired with its `]`. The result is a direct address table: slot
//! `i` holds the partner address of the bracket at `i`, so jumps at run
//! time are a single index instead of a rescan.

use crate::error::{BracketKind, BrainfuckError};

pub const LOOP_OPEN: char = '[';
pub const LOOP_CLOSE: char = ']';

/// Matching bracket positions for a program, indexed by instruction address.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BracketMap {
    // jumps[i] is Some(partner) for '[' or ']' at i, None everywhere else.
    jumps: Vec<Option<usize>>,
    pairs: usize,
}

impl BracketMap {
    /// Pair every bracket in `program`.
    ///
    /// Fails on the first `]` with nothing open, or, once the scan is done,
    /// on the innermost `[` still waiting for its `]`.
    pub fn resolve(program: &[char]) -> Result<Self, BrainfuckError> {
        let mut jumps: Vec<Option<usize>> = vec![None; program.len()];
        let mut stack: Vec<usize> = Vec::new();
        let mut pairs = 0;

        for (i, &c) in program.iter().enumerate() {
            if c == LOOP_OPEN {
                stack.push(i);
            } else if c == LOOP_CLOSE {
                let Some(open_index) = stack.pop() else {
                    return Err(BrainfuckError::UnmatchedBracket {
                        ip: i,
                        kind: BracketKind::Close,
                    });
                };
                jumps[open_index] = Some(i);
                jumps[i] = Some(open_index);
                pairs += 1;
            }
        }

        if let Some(unmatched_open) = stack.last().copied() {
            return Err(BrainfuckError::UnmatchedBracket {
                ip: unmatched_open,
                kind: BracketKind::Open,
            });
        }

        tracing::debug!(pairs, instructions = program.len(), "resolved bracket map");
        Ok(Self { jumps, pairs })
    }

    /// Address of the bracket matching the one at `address`.
    pub fn partner(&self, address: usize) -> Option<usize> {
        self.jumps.get(address).copied().flatten()
    }

    /// `(open, close)` address pairs, ordered by the opening bracket.
    pub fn pairs(&self) -> impl Iterator<Item = (usize, usize)> + '_ {
        self.jumps
            .iter()
            .copied()
            .enumerate()
            .filter_map(|(open, partner)| {
                partner
                    .filter(|&close| close > open)
                    .map(|close| (open, close))
            })
    }

    /// Number of matched loops.
    pub fn len(&self) -> usize {
        self.pairs
    }

    pub fn is_empty(&self) -> bool {
        self.pairs == 0
    }
}
