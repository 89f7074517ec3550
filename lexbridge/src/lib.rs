//! # lexbridge
//!
//! Glue between a character scanner and a push-driven shift-reduce parser
//! engine, for indentation-sensitive grammars that build a typed AST with
//! exact source locations.
//!
//! The scanner and the parser engine are external: this crate recognizes no
//! lexical patterns and applies no productions. It provides:
//!
//! - [`loc`]: [`TextLoc`] line/column spans, advanced incrementally as text
//!   is consumed, merged with [`TextLoc::span`], and partially ordered by
//!   [`TextLoc::precedes`];
//! - [`indent`]: the [`IndentStack`] turning line-leading widths into block
//!   indent/dedent deltas;
//! - [`bridge`]: the [`Bridge`], which converts each scanner [`Match`] into
//!   nothing ([`skip`](Bridge::skip)), a [`Token`]
//!   ([`deliver`](Bridge::deliver)), or a content-free terminal
//!   ([`deliver_null`](Bridge::deliver_null)) fed to a [`ParserEngine`];
//! - [`ast`]: an arena [`Ast`] of kind-tagged nodes with parent/child links
//!   and root detection;
//! - [`diag`]: diagnostics and their stable source-order sort.
//!
//! Everything runs on the caller's thread, one lexeme at a time.
pub mod ast;
pub mod bridge;
pub mod diag;
pub mod engine;
pub mod indent;
pub mod loc;
pub mod scanner;
pub mod text;
pub mod token;

#[cfg(test)]
mod testlog;

pub use ast::{Ast, AstClass, AstNode, AstPayload, AstVariant, NodeId, NodeKind, kind_of};
pub use bridge::{Bridge, Match};
pub use diag::{Diagnostic, Located, Severity, sort_by_location};
pub use engine::ParserEngine;
pub use indent::{IndentError, IndentStack};
pub use loc::TextLoc;
pub use scanner::ScannerRegs;
pub use token::{SourceLabel, Token};
