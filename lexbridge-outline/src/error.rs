//! # Outline Error Type
//!
//! [`OutlineError`] covers every way scanning and parsing an outline source
//! can fail: because of the source text, or because the scanner automata
//! could not be built or run. Broken engine wiring is not represented here;
//! that is a contract violation and panics.
use crate::TokenId;
use crate::scanner::ScanError;
use lexbridge::{Diagnostic, IndentError, TextLoc};
use smartstring::alias::String;
use std::fmt;
use thiserror::Error;

/// Terminals acceptable at the point of a syntax error.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Expected(pub Vec<TokenId>);

impl fmt::Display for Expected {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.0.as_slice() {
            [] => f.write_str("nothing"),
            [one] => write!(f, "{}", one),
            [init @ .., last] => {
                for (i, id) in init.iter().enumerate() {
                    if i > 0 {
                        f.write_str(", ")?;
                    }
                    write!(f, "{}", id)?;
                }
                write!(f, " or {}", last)
            }
        }
    }
}

/// Errors produced while scanning or parsing an outline source.
#[derive(Debug, Error)]
pub enum OutlineError {
    /// A line dedents to a column no enclosing block starts at.
    #[error("{loc}: {source}")]
    Indent {
        loc: TextLoc,
        #[source]
        source: IndentError,
    },

    /// A character sequence no scanner rule accepts.
    #[error("{loc}: unrecognized input {text:?}")]
    Lexical { loc: TextLoc, text: String },

    /// A terminal the grammar does not allow at this point.
    #[error("{loc}: unexpected {found}, expected {expected}")]
    Syntax {
        loc: TextLoc,
        found: TokenId,
        expected: Expected,
    },

    /// A terminal arrived with a payload it must not have, or without one
    /// it needs.
    #[error("{loc}: terminal {terminal:?} delivered with the wrong payload")]
    Payload { loc: TextLoc, terminal: TokenId },

    /// The scanner machinery failed; carries no location.
    #[error(transparent)]
    Scanner(#[from] ScanError),
}

impl OutlineError {
    /// Location of the error.
    pub fn loc(&self) -> TextLoc {
        match self {
            OutlineError::Indent { loc, .. }
            | OutlineError::Lexical { loc, .. }
            | OutlineError::Syntax { loc, .. }
            | OutlineError::Payload { loc, .. } => *loc,
            OutlineError::Scanner(_) => TextLoc::EMPTY,
        }
    }

    /// Fills in `loc` if the error was raised without a location.
    /// Scanner failures stay unlocated.
    pub fn located(mut self, at: TextLoc) -> Self {
        let slot = match &mut self {
            OutlineError::Indent { loc, .. }
            | OutlineError::Lexical { loc, .. }
            | OutlineError::Syntax { loc, .. }
            | OutlineError::Payload { loc, .. } => loc,
            OutlineError::Scanner(_) => return self,
        };
        if slot.is_empty() {
            *slot = at;
        }
        self
    }

    /// The error as a diagnostic, message without the location prefix.
    pub fn to_diagnostic(&self) -> Diagnostic {
        let message: String = match self {
            OutlineError::Indent { source, .. } => source.to_string().into(),
            OutlineError::Lexical { text, .. } => format!("unrecognized input {text:?}").into(),
            OutlineError::Syntax {
                found, expected, ..
            } => format!("unexpected {found}, expected {expected}").into(),
            OutlineError::Payload { terminal, .. } => {
                format!("terminal {terminal:?} delivered with the wrong payload").into()
            }
            OutlineError::Scanner(source) => source.to_string().into(),
        };
        Diagnostic::error(self.loc(), message)
    }
}
