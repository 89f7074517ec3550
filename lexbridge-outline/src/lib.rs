//! # lexbridge-outline
//!
//! A small indentation-sensitive declaration language built on
//! **lexbridge**, serving as a complete example of a scanner, bridge and
//! shift-reduce engine wired together.
//!
//! ```text
//! # comment
//! data answer = true or flag
//! section:
//!     data flag = false
//!     data title = "hello"
//! ```
//!
//! ## Overview
//!
//! - [`scanner`]: the [`OutlineScanner`], splitting input into lexemes;
//! - [`driver`]: the [`OutlineDriver`], mapping lexemes to bridge calls and
//!   resolving indentation into `Indent`/`Dedent` terminals;
//! - [`parser`]: the [`OutlineParser`] engine and its [`OutlineCtx`];
//! - [`ast`]: the [`OutlineNode`] family stored in a [`lexbridge::Ast`];
//! - [`token`]: the [`TokenId`] terminals;
//! - [`error`]: the [`OutlineError`] type.
//!
//! ## Example
//!
//! ```rust
//! use lexbridge_outline::{OutlineKind, parse_str};
//!
//! let ast = parse_str("data answer = true or flag\n", None, 0).unwrap();
//! let root = ast.roots().next().unwrap();
//! let decl = ast.children(root).next().unwrap();
//! assert_eq!(ast.kind(decl), OutlineKind::DataDecl);
//! assert_eq!(ast.loc(decl).to_string(), "1:1-26");
//! ```
pub mod ast;
pub mod driver;
pub mod error;
pub mod parser;
pub mod scanner;
pub mod token;

pub use ast::{OutlineKind, OutlineNode, TreeDisplay, render_tree};
pub use driver::{OutlineDriver, TokenCollector, parse_str, tokens_str};
pub use error::{Expected, OutlineError};
pub use parser::{OutlineCtx, OutlineParser};
pub use scanner::{Lexeme, OutlineScanner, Rule, ScanError, ScannerTables};
pub use token::TokenId;
