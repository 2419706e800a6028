use std::fmt::{Display, Formatter, Result};

use thiserror::Error;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Position {
    pub offset: usize,
    pub line: usize,
    pub column: usize,
}

impl Display for Position {
    fn fmt(&self, f: &mut Formatter<'_>) -> Result {
        write!(f, "{}:{}", self.line, self.column)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Span {
    pub start: Position,
    pub end: Position,
}

impl Span {
    pub fn new(start: Position, end: Position) -> Self {
        Self { start, end }
    }
}

impl Default for Span {
    fn default() -> Self {
        Self {
            start: Position {
                offset: 0,
                line: 1,
                column: 1,
            },
            end: Position {
                offset: 0,
                line: 1,
                column: 1,
            },
        }
    }
}

impl Display for Span {
    fn fmt(&self, f: &mut Formatter<'_>) -> Result {
        write!(f, "{}", self.start)
    }
}

/// Findings emitted by the analyses. These are reports, not failures: the
/// analyzer completes for any well-typed tree and never unwinds.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Diagnostic {
    /// Use of an identifier with no reaching definition.
    #[error("{0} has no pre at {1}")]
    NoPre(String, Span),

    /// Field access whose field item has no reaching definition.
    #[error("no reaching def for {0} at {1}")]
    NoReachingDef(String, Span),

    /// A field-presence test over an operand with no resolvable identifier.
    /// Should not occur for a well-formed tree.
    #[error("no ID reaching def for {0}")]
    NoIdReachingDef(String),

    /// Statement that follows a non-reaching predecessor in a statement list.
    #[error("dead code: {0} at {1}")]
    DeadCode(String, Span),

    /// Reserved: a conditional whose post-state gained definitions without
    /// either branch contributing them. Currently never emitted.
    #[error("conditional at {0} changes definitions outside its branches")]
    BranchDefinednessMismatch(Span),

    /// Expression whose operands are all constants.
    #[error("foldable {0}: {1} at {2}")]
    Foldable(&'static str, String, Span),
}

/// Where diagnostics go. Hosts typically use [`StderrSink`]; tests collect
/// into a `Vec<Diagnostic>`.
pub trait DiagnosticSink {
    fn report(&mut self, diag: Diagnostic);
}

pub struct StderrSink;

impl DiagnosticSink for StderrSink {
    fn report(&mut self, diag: Diagnostic) {
        eprintln!("{diag}");
    }
}

impl DiagnosticSink for Vec<Diagnostic> {
    fn report(&mut self, diag: Diagnostic) {
        self.push(diag);
    }
}
