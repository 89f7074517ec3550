//! Tokens handed from the bridge to the parser engine.

use crate::loc::TextLoc;
use crate::text::escape_str;
use smartstring::alias::String;
use std::fmt;
use std::sync::Arc;

/// Opaque label naming the source being scanned (typically a file path).
///
/// It is carried on every token purely for diagnostics. Cloning is cheap.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct SourceLabel(Arc<str>);

impl SourceLabel {
    pub fn new(label: impl AsRef<str>) -> Self {
        Self(Arc::from(label.as_ref()))
    }

    #[inline]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<&str> for SourceLabel {
    fn from(s: &str) -> Self {
        Self::new(s)
    }
}

impl From<&std::path::Path> for SourceLabel {
    fn from(p: &std::path::Path) -> Self {
        Self::new(p.to_string_lossy())
    }
}

impl fmt::Display for SourceLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// A lexical token delivered to the parser engine.
///
/// Built by [`Bridge::deliver`](crate::Bridge::deliver) and moved into
/// [`ParserEngine::step`](crate::ParserEngine::step); from then on the
/// engine owns it.
///
/// # Example
///
/// ```rust
/// # use lexbridge::{Token, TextLoc};
/// let tok = Token::new("flag", Some("main.ol".into()), TextLoc::new(2, 5, 2, 8));
/// assert_eq!(tok.to_string(), "TOKEN(\"flag\",\"main.ol\",2:5-8)");
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Token {
    /// Matched text, after trimming.
    pub text: String,
    /// Source the text was matched in.
    pub source: Option<SourceLabel>,
    /// Location of the full (untrimmed) match.
    pub loc: TextLoc,
}

impl Token {
    pub fn new(text: impl Into<String>, source: Option<SourceLabel>, loc: TextLoc) -> Self {
        Self {
            text: text.into(),
            source,
            loc,
        }
    }

    #[inline]
    pub fn text(&self) -> &str {
        self.text.as_str()
    }

    #[inline]
    pub fn loc(&self) -> TextLoc {
        self.loc
    }
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "TOKEN(\"{}\",", escape_str(&self.text))?;
        if let Some(source) = &self.source {
            write!(f, "\"{}\",", source)?;
        }
        write!(f, "{})", self.loc)
    }
}
