//! Line/column locations of matched text.
//!
//! A [`TextLoc`] names the first and last character of a span of source text.
//! Lines are 1-based. Column `0` is legal and means "before the first
//! character of the line", which is where [`TextLoc::FIRST`] sits before
//! anything has been consumed.
//!
//! Locations are never written by hand in grammar code (apart from the two
//! constants). They are produced by [`TextLoc::advance`] as the scanner
//! consumes text, and by [`TextLoc::span`] when a reduction needs the
//! location of a whole subtree.
//!
//! # Examples
//!
//! ```rust
//! # use lexbridge::TextLoc;
//! let a = TextLoc::FIRST.advance("data");
//! assert_eq!(a, TextLoc::new(1, 1, 1, 4));
//!
//! let b = a.advance(" x\n  y");
//! assert_eq!(b, TextLoc::new(1, 5, 2, 3));
//!
//! assert!(TextLoc::FIRST.precedes(&a));
//! assert_eq!(TextLoc::span(&a, &b), TextLoc::new(1, 1, 2, 3));
//! assert_eq!(b.to_string(), "1:5-2:3");
//! ```

use std::fmt;

/// Location of a span of text: first and last character, line and column.
///
/// Equality is structural. Ordering is only partial (see
/// [`precedes`](Self::precedes)), so `TextLoc` deliberately does not
/// implement `PartialOrd`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct TextLoc {
    /// Line number of the first character.
    pub first_line: usize,
    /// Column number of the first character.
    pub first_col: usize,
    /// Line number of the last character.
    pub last_line: usize,
    /// Column number of the last character.
    pub last_col: usize,
}

impl TextLoc {
    /// The zero-width location at the start of any input, from which every
    /// other location is computed.
    pub const FIRST: TextLoc = TextLoc::new(1, 0, 1, 0);

    /// Uninitialized location.
    pub const EMPTY: TextLoc = TextLoc::new(0, 0, 0, 0);

    /// Creates a new `TextLoc`.
    #[inline]
    pub const fn new(
        first_line: usize,
        first_col: usize,
        last_line: usize,
        last_col: usize,
    ) -> Self {
        Self {
            first_line,
            first_col,
            last_line,
            last_col,
        }
    }

    /// Location of `text` when it immediately follows `self`.
    ///
    /// Only `self.last_line` and `self.last_col` are read. The new location
    /// starts one column after them. Each `\r\n`, `\r` or `\n` counts as a
    /// single line break; when `text` contains breaks, the last column is the
    /// number of characters after the final break, otherwise it is
    /// `self.last_col` plus the length of `text`. Lengths are counted in
    /// `char`s.
    ///
    /// When `self` ends right before a line break, the first column of the
    /// result points one past the end of that line. The next call
    /// recomputes from the break, so the value is never observed as wrong
    /// in a chain, but callers must not rely on the first column of such an
    /// intermediate location.
    pub fn advance(&self, text: &str) -> TextLoc {
        let first_line = self.last_line;
        let first_col = self.last_col + 1;

        let mut breaks = 0;
        let mut tail = 0;
        let mut chars = text.chars().peekable();
        while let Some(c) = chars.next() {
            match c {
                '\r' => {
                    chars.next_if_eq(&'\n');
                    breaks += 1;
                    tail = 0;
                }
                '\n' => {
                    breaks += 1;
                    tail = 0;
                }
                _ => tail += 1,
            }
        }

        if breaks > 0 {
            TextLoc::new(first_line, first_col, first_line + breaks, tail)
        } else {
            TextLoc::new(first_line, first_col, first_line, self.last_col + tail)
        }
    }

    /// Location spanning from the start of `first` to the end of `last`.
    ///
    /// No check is made that `last` follows `first`; pass them in document
    /// order.
    #[inline]
    pub const fn span(first: &TextLoc, last: &TextLoc) -> TextLoc {
        TextLoc::new(first.first_line, first.first_col, last.last_line, last.last_col)
    }

    /// Returns `true` if the text delimited by `self` comes entirely before
    /// the text delimited by `other`.
    ///
    /// This is a partial order: locations that overlap or are entwined are
    /// incomparable, and `a.precedes(b)` and `b.precedes(a)` are then both
    /// `false`.
    ///
    /// ```rust
    /// # use lexbridge::TextLoc;
    /// let first = TextLoc::new(5, 9, 5, 18);
    /// let second = TextLoc::new(5, 11, 5, 24);
    /// assert!(!first.precedes(&second));
    /// assert!(!second.precedes(&first));
    /// ```
    #[inline]
    pub const fn precedes(&self, other: &TextLoc) -> bool {
        self.last_line < other.first_line
            || (self.last_line == other.first_line && self.last_col <= other.first_col)
    }

    /// Returns `true` if this is [`TextLoc::EMPTY`].
    #[inline]
    pub fn is_empty(&self) -> bool {
        *self == Self::EMPTY
    }
}

/// Free-function form of [`TextLoc::advance`].
#[inline]
pub fn advance(prev: &TextLoc, text: &str) -> TextLoc {
    prev.advance(text)
}

/// Free-function form of [`TextLoc::span`].
#[inline]
pub fn span(first: &TextLoc, last: &TextLoc) -> TextLoc {
    TextLoc::span(first, last)
}

impl fmt::Display for TextLoc {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.first_line == self.last_line {
            write!(f, "{}:{}", self.first_line, self.first_col)?;
            if self.first_col != self.last_col {
                write!(f, "-{}", self.last_col)?;
            }
            Ok(())
        } else {
            write!(
                f,
                "{}:{}-{}:{}",
                self.first_line, self.first_col, self.last_line, self.last_col
            )
        }
    }
}

/// Build a [`TextLoc`] inline.
///
/// # Examples
///
/// ```rust
/// # use lexbridge::loc;
/// let l = loc!(2, 7, 4, 0);
/// assert_eq!(l.last_line, 4);
/// ```
#[macro_export]
macro_rules! loc {
    ($first_line:expr, $first_col:expr, $last_line:expr, $last_col:expr) => {
        $crate::TextLoc {
            first_line: $first_line,
            first_col: $first_col,
            last_line: $last_line,
            last_col: $last_col,
        }
    };
}
