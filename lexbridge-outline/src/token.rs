//! # Outline Terminals
//!
//! [`TokenId`] enumerates the terminal symbols of the outline grammar, as
//! passed by the bridge to the parser engine. Some terminals always carry a
//! [`lexbridge::Token`] (identifiers, literals, the `data` keyword, whose
//! text or location the AST needs); the rest are delivered as content-free
//! markers.
use std::fmt;

/// Terminal symbols of the outline grammar.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TokenId {
    /// `data` keyword.
    Data,
    /// Identifier.
    Ident,
    /// `=`
    Equals,
    /// `true`
    True,
    /// `false`
    False,
    /// `or`
    Or,
    /// Non-empty string literal; the token text excludes the quotes.
    Str,
    /// `""`; the token text is the two quotes.
    EmptyStr,
    /// `:`
    Colon,
    /// End of a non-blank line.
    Newline,
    /// Start of a more deeply indented block.
    Indent,
    /// End of an indented block.
    Dedent,
    /// End of input.
    End,
}

impl TokenId {
    /// Returns `true` for terminals delivered with a token.
    pub fn has_payload(self) -> bool {
        matches!(
            self,
            TokenId::Data
                | TokenId::Ident
                | TokenId::True
                | TokenId::False
                | TokenId::Str
                | TokenId::EmptyStr
        )
    }

    /// Human-facing name, used in syntax errors.
    pub fn name(self) -> &'static str {
        match self {
            TokenId::Data => "`data`",
            TokenId::Ident => "identifier",
            TokenId::Equals => "`=`",
            TokenId::True => "`true`",
            TokenId::False => "`false`",
            TokenId::Or => "`or`",
            TokenId::Str | TokenId::EmptyStr => "string",
            TokenId::Colon => "`:`",
            TokenId::Newline => "end of line",
            TokenId::Indent => "indented block",
            TokenId::Dedent => "end of block",
            TokenId::End => "end of input",
        }
    }
}

impl fmt::Display for TokenId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
