//! Location-bearing diagnostics and their source-order sort.
//!
//! [`TextLoc::precedes`] is only a partial order, so diagnostics cannot be
//! sorted with `slice::sort_by`: overlapping locations are incomparable and
//! the standard sorts require a total order. [`sort_by_location`] is a
//! stable insertion sort that moves an item before another only when it
//! strictly precedes it, so incomparable items keep their discovery order.

use crate::loc::TextLoc;
use crate::token::SourceLabel;
use smartstring::alias::String;
use std::fmt;

/// Anything carrying a source location.
pub trait Located {
    fn loc(&self) -> TextLoc;
}

impl Located for TextLoc {
    fn loc(&self) -> TextLoc {
        *self
    }
}

/// Severity of a [`Diagnostic`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Severity {
    Error,
    Warning,
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Severity::Error => "error",
            Severity::Warning => "warning",
        })
    }
}

/// A message about a location in a source.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Diagnostic {
    pub severity: Severity,
    pub source: Option<SourceLabel>,
    pub loc: TextLoc,
    pub message: String,
}

impl Diagnostic {
    pub fn error(loc: TextLoc, message: impl Into<String>) -> Self {
        Self {
            severity: Severity::Error,
            source: None,
            loc,
            message: message.into(),
        }
    }

    pub fn warning(loc: TextLoc, message: impl Into<String>) -> Self {
        Self {
            severity: Severity::Warning,
            ..Self::error(loc, message)
        }
    }

    pub fn with_source(mut self, source: Option<SourceLabel>) -> Self {
        self.source = source;
        self
    }
}

impl Located for Diagnostic {
    fn loc(&self) -> TextLoc {
        self.loc
    }
}

impl fmt::Display for Diagnostic {
    /// `source:loc: severity: message`, with the source omitted when absent.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if let Some(source) = &self.source {
            write!(f, "{}:", source)?;
        }
        write!(f, "{}: {}: {}", self.loc, self.severity, self.message)
    }
}

/// Sorts `items` into source order, keeping discovery order between items
/// whose locations are incomparable.
pub fn sort_by_location<T: Located>(items: &mut [T]) {
    for i in 1..items.len() {
        let mut j = i;
        while j > 0 && strictly_before(&items[j].loc(), &items[j - 1].loc()) {
            items.swap(j, j - 1);
            j -= 1;
        }
    }
}

// Two zero-width locations at the same point precede each other.
fn strictly_before(a: &TextLoc, b: &TextLoc) -> bool {
    a.precedes(b) && !b.precedes(a)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::loc;

    #[test]
    fn sorts_disjoint_locations() {
        let mut diags = vec![
            Diagnostic::error(loc!(3, 1, 3, 4), "third"),
            Diagnostic::error(loc!(1, 1, 1, 4), "first"),
            Diagnostic::error(loc!(2, 1, 2, 4), "second"),
        ];
        sort_by_location(&mut diags);
        let msgs: Vec<&str> = diags.iter().map(|d| d.message.as_str()).collect();
        assert_eq!(msgs, vec!["first", "second", "third"]);
    }

    #[test]
    fn incomparable_locations_keep_discovery_order() {
        let mut diags = vec![
            Diagnostic::error(loc!(5, 11, 5, 24), "b"),
            Diagnostic::error(loc!(5, 9, 5, 18), "a"),
            Diagnostic::error(loc!(1, 1, 1, 2), "z"),
        ];
        sort_by_location(&mut diags);
        let msgs: Vec<&str> = diags.iter().map(|d| d.message.as_str()).collect();
        assert_eq!(msgs, vec!["z", "b", "a"]);
    }

    #[test]
    fn equal_locations_are_stable() {
        let l = loc!(2, 2, 2, 2);
        let mut locs = vec![(l, 0), (l, 1), (loc!(1, 1, 1, 1), 2), (l, 3)];
        struct Tagged(TextLoc, usize);
        impl Located for Tagged {
            fn loc(&self) -> TextLoc {
                self.0
            }
        }
        let mut tagged: Vec<Tagged> = locs.drain(..).map(|(l, i)| Tagged(l, i)).collect();
        sort_by_location(&mut tagged);
        let order: Vec<usize> = tagged.iter().map(|t| t.1).collect();
        assert_eq!(order, vec![2, 0, 1, 3]);
    }

    #[test]
    fn display_with_and_without_source() {
        let d = Diagnostic::error(loc!(2, 3, 2, 5), "bad indent");
        assert_eq!(d.to_string(), "2:3-5: error: bad indent");
        let d = Diagnostic::warning(loc!(1, 1, 1, 1), "odd").with_source(Some("m.ol".into()));
        assert_eq!(d.to_string(), "m.ol:1:1: warning: odd");
    }
}
