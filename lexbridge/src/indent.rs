//! Indentation block stack for off-side-rule grammars.
//!
//! Each entry is the width one nested block adds over its enclosing block,
//! so the sum of the stack is the current indentation depth. The scanner
//! driver calls [`IndentStack::update`] once per line with the width of the
//! line's leading whitespace and turns the returned delta into indent or
//! dedent terminals.
//!
//! # Examples
//!
//! ```rust
//! # use lexbridge::{IndentStack, IndentError};
//! let mut stack = IndentStack::new();
//! assert_eq!(stack.update(4), Ok(1));
//! assert_eq!(stack.update(8), Ok(1));
//! assert_eq!(stack.update(8), Ok(0));
//! assert_eq!(stack.update(0), Ok(-2));
//! assert!(stack.is_empty());
//!
//! stack.update(4).unwrap();
//! assert_eq!(stack.update(2), Err(IndentError::Misaligned { width: 2, depth: 4 }));
//! assert_eq!(stack.depth(), 4);
//! ```

use thiserror::Error;

/// Errors produced by [`IndentStack::update`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum IndentError {
    /// The line dedents to a width that no enclosing block starts at.
    #[error("indentation width {width} does not match any enclosing block (current depth {depth})")]
    Misaligned {
        /// Width of the offending line's leading whitespace.
        width: usize,
        /// Indentation depth before the update.
        depth: usize,
    },
}

/// Stack of incremental block indentation widths.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct IndentStack {
    widths: Vec<usize>,
}

impl IndentStack {
    /// Creates an empty stack (depth 0).
    pub fn new() -> Self {
        Self { widths: Vec::new() }
    }

    /// Registers a line whose leading whitespace is `width` wide.
    ///
    /// Returns the change in the number of open blocks: `0` if the width
    /// equals the current depth, `1` if it is deeper (one block opened),
    /// or `-n` if `n` blocks were closed to land exactly on `width`.
    ///
    /// # Errors
    ///
    /// [`IndentError::Misaligned`] if dedenting skips past `width` without
    /// landing on it. The stack is left as it was before the call.
    pub fn update(&mut self, width: usize) -> Result<isize, IndentError> {
        let depth = self.depth();

        if width == depth {
            return Ok(0);
        }

        if width > depth {
            self.widths.push(width - depth);
            log::trace!("indent: depth {} -> {}, levels {}", depth, width, self.levels());
            return Ok(1);
        }

        let mut running = depth;
        let mut keep = self.widths.len();
        while running > width {
            keep -= 1;
            running -= self.widths[keep];
        }

        if running != width {
            log::trace!("misaligned dedent: width {}, depth {}", width, depth);
            return Err(IndentError::Misaligned { width, depth });
        }

        let popped = self.widths.len() - keep;
        self.widths.truncate(keep);
        log::trace!("dedent: depth {} -> {}, closed {}", depth, width, popped);
        Ok(-(popped as isize))
    }

    /// Current indentation depth (sum of all increments).
    #[inline]
    pub fn depth(&self) -> usize {
        self.widths.iter().sum()
    }

    /// Number of open blocks.
    #[inline]
    pub fn levels(&self) -> usize {
        self.widths.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.widths.is_empty()
    }

    /// The increments, outermost block first.
    #[inline]
    pub fn as_slice(&self) -> &[usize] {
        &self.widths
    }

    /// Closes every open block and returns how many there were.
    pub fn reset(&mut self) -> usize {
        let n = self.widths.len();
        self.widths.clear();
        n
    }
}

impl From<Vec<usize>> for IndentStack {
    /// Builds a stack from increments, outermost first.
    ///
    /// # Panics
    ///
    /// Panics if any increment is zero.
    fn from(widths: Vec<usize>) -> Self {
        assert!(widths.iter().all(|w| *w > 0), "indentation increments must be positive");
        Self { widths }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testlog;

    #[test]
    fn same_width_does_not_change_blocks() {
        testlog::init();
        let mut stack = IndentStack::from(vec![4, 4]);
        assert_eq!(stack.update(8), Ok(0));
        assert_eq!(stack.as_slice(), &[4, 4]);
    }

    #[test]
    fn zero_width_clears_blocks() {
        testlog::init();
        let mut stack = IndentStack::from(vec![2, 6, 4]);
        assert_eq!(stack.update(0), Ok(-3));
        assert!(stack.is_empty());
    }

    #[test]
    fn larger_width_extends_blocks() {
        testlog::init();
        let mut stack = IndentStack::from(vec![2, 2, 2, 2]);
        assert_eq!(stack.update(12), Ok(1));
        assert_eq!(stack.levels(), 5);
        assert_eq!(stack.as_slice().last(), Some(&4));
        assert_eq!(stack.as_slice(), &[2, 2, 2, 2, 4]);
    }

    #[test]
    fn smaller_misaligned_width_is_an_error() {
        testlog::init();
        let mut stack = IndentStack::from(vec![4, 4, 4]);
        let err = stack.update(10).unwrap_err();
        assert_eq!(err, IndentError::Misaligned { width: 10, depth: 12 });
        assert_eq!(stack.as_slice(), &[4, 4, 4]);
        assert!(err.to_string().contains("does not match any enclosing block"));
    }

    #[test]
    fn smaller_aligned_width_trims_blocks() {
        testlog::init();
        let mut stack = IndentStack::from(vec![4, 4, 4]);
        assert_eq!(stack.update(4), Ok(-2));
        assert_eq!(stack.as_slice(), &[4]);
    }

    #[test]
    fn misaligned_then_recovers_after_reset() {
        let mut stack = IndentStack::from(vec![3, 5]);
        assert!(stack.update(4).is_err());
        assert_eq!(stack.depth(), 8);
        assert_eq!(stack.reset(), 2);
        assert_eq!(stack.depth(), 0);
        assert_eq!(stack.update(4), Ok(1));
    }

    #[test]
    fn depth_tracks_running_sum() {
        let mut stack = IndentStack::new();
        for (width, delta) in [(2, 1), (5, 1), (5, 0), (2, -1), (9, 1), (0, -2)] {
            assert_eq!(stack.update(width), Ok(delta), "width {width}");
            assert_eq!(stack.depth(), width);
        }
    }

    #[test]
    #[should_panic(expected = "must be positive")]
    fn zero_increment_is_rejected() {
        let _ = IndentStack::from(vec![2, 0]);
    }
}
