//! The per-match bridging protocol between scanner and parser engine.
//!
//! Every lexeme the scanner recognizes is passed to exactly one of three
//! calls on a [`Bridge`]:
//!
//! - [`skip`](Bridge::skip): the lexeme is consumed but the grammar never
//!   sees it (whitespace, comments);
//! - [`deliver`](Bridge::deliver): a [`Token`] carrying the (optionally
//!   trimmed) text is handed to the engine;
//! - [`deliver_null`](Bridge::deliver_null): the engine is told the terminal
//!   occurred, without any text.
//!
//! In all three cases the running cursor advances over the *whole* match,
//! trims included, because delimiters are physically consumed from the
//! input even though the grammar must not see them.
//!
//! # Example
//!
//! ```rust
//! # use lexbridge::{Bridge, Match, ParserEngine, TextLoc, Token};
//! struct Collect;
//! impl ParserEngine for Collect {
//!     type Terminal = u8;
//!     type Context = Vec<Option<Token>>;
//!     type Error = ();
//!     fn step(&mut self, _t: u8, tok: Option<Token>, ctx: &mut Self::Context) -> Result<(), ()> {
//!         ctx.push(tok);
//!         Ok(())
//!     }
//! }
//!
//! let input = "say \"hi\"";
//! let mut bridge = Bridge::new();
//! let mut engine = Collect;
//! let mut ctx = Vec::new();
//!
//! bridge.deliver(&mut engine, &mut ctx, 1, Match::new(input, 0, 3)).unwrap();
//! bridge.skip(Match::new(input, 3, 4));
//! bridge.deliver(&mut engine, &mut ctx, 2, Match::new(input, 4, 8).trimmed(1, 1)).unwrap();
//!
//! let tok = ctx[1].as_ref().unwrap();
//! assert_eq!(tok.text(), "hi");
//! assert_eq!(tok.loc, TextLoc::new(1, 5, 1, 8));
//! assert_eq!(bridge.cursor(), TextLoc::new(1, 5, 1, 8));
//! ```

use crate::engine::ParserEngine;
use crate::loc::TextLoc;
use crate::scanner::ScannerRegs;
use crate::text::{escape_str, token_text, token_text_trimmed};
use crate::token::{SourceLabel, Token};
use smartstring::alias::String;

/// One scanner match: the input and the boundaries of the matched text.
///
/// `ts` is inclusive and `te` exclusive, both byte offsets into `input`.
/// `ltrim` and `rtrim` count bytes to drop from either end of the delivered
/// text; they never affect location tracking.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Match<'a> {
    pub input: &'a str,
    pub ts: usize,
    pub te: usize,
    pub ltrim: usize,
    pub rtrim: usize,
}

impl<'a> Match<'a> {
    /// An untrimmed match of `input[ts..te]`.
    #[inline]
    pub fn new(input: &'a str, ts: usize, te: usize) -> Self {
        Self {
            input,
            ts,
            te,
            ltrim: 0,
            rtrim: 0,
        }
    }

    /// The current token of a scanner, as recorded in its registers.
    #[inline]
    pub fn from_regs(input: &'a str, regs: &ScannerRegs) -> Self {
        Self::new(input, regs.ts, regs.te)
    }

    /// The empty match at byte offset `at`, used for synthesized terminals.
    #[inline]
    pub fn empty(input: &'a str, at: usize) -> Self {
        Self::new(input, at, at)
    }

    /// Sets the trim counts.
    #[inline]
    pub fn trimmed(self, ltrim: usize, rtrim: usize) -> Self {
        Self {
            ltrim,
            rtrim,
            ..self
        }
    }

    /// The full matched text, trims ignored.
    pub fn full_text(&self) -> String {
        token_text(self.input, self.ts, self.te)
    }

    fn assert_bounds(&self) {
        assert!(self.ts <= self.te, "inverted match boundaries {}..{}", self.ts, self.te);
        assert!(
            self.te <= self.input.len(),
            "match end {} past input length {}",
            self.te,
            self.input.len()
        );
    }
}

/// Running state of one scan: the location cursor, the text of the last
/// match, the source label stamped on tokens, and the echo verbosity.
#[derive(Debug, Clone)]
pub struct Bridge {
    cursor: TextLoc,
    mtext: String,
    source: Option<SourceLabel>,
    verbosity: u8,
}

impl Default for Bridge {
    fn default() -> Self {
        Self::new()
    }
}

impl Bridge {
    /// A bridge positioned at [`TextLoc::FIRST`], with no source label and
    /// verbosity 0.
    pub fn new() -> Self {
        Self {
            cursor: TextLoc::FIRST,
            mtext: String::new(),
            source: None,
            verbosity: 0,
        }
    }

    /// Sets the label stamped on every delivered token.
    pub fn with_source(mut self, source: impl Into<SourceLabel>) -> Self {
        self.source = Some(source.into());
        self
    }

    /// Sets the echo verbosity. At 2 and above every call is echoed through
    /// `log::debug!`.
    pub fn with_verbosity(mut self, verbosity: u8) -> Self {
        self.verbosity = verbosity;
        self
    }

    /// Starts tracking from `cursor` instead of [`TextLoc::FIRST`].
    pub fn with_cursor(mut self, cursor: TextLoc) -> Self {
        self.cursor = cursor;
        self
    }

    /// Location of the most recent match.
    #[inline]
    pub fn cursor(&self) -> TextLoc {
        self.cursor
    }

    /// Text of the most recent match (trimmed for [`deliver`](Self::deliver)).
    #[inline]
    pub fn mtext(&self) -> &str {
        self.mtext.as_str()
    }

    #[inline]
    pub fn source(&self) -> Option<&SourceLabel> {
        self.source.as_ref()
    }

    #[inline]
    pub fn verbosity(&self) -> u8 {
        self.verbosity
    }

    /// Rewinds to [`TextLoc::FIRST`] for a new input, keeping the label and
    /// verbosity.
    pub fn reset(&mut self) {
        self.cursor = TextLoc::FIRST;
        self.mtext.clear();
    }

    /// Consumes a match without forwarding anything to the engine.
    ///
    /// Trim counts are ignored.
    ///
    /// # Panics
    ///
    /// Panics if the match boundaries are inverted or out of bounds.
    pub fn skip(&mut self, m: Match<'_>) {
        m.assert_bounds();
        self.mtext = m.full_text();
        self.cursor = self.cursor.advance(&self.mtext);
        log::trace!("skip {:?} at {}", self.mtext, self.cursor);
        if self.verbosity >= 2 {
            log::debug!("Skipping text `{}` at {}", escape_str(&self.mtext), self.cursor);
        }
    }

    /// Consumes a match and hands a [`Token`] with its trimmed text to the
    /// engine as `terminal`.
    ///
    /// The token's location is that of the full match.
    ///
    /// # Panics
    ///
    /// Panics if the match boundaries are inverted or out of bounds, or if
    /// the trimmed text would be empty.
    ///
    /// # Errors
    ///
    /// Whatever the engine's step returns. The cursor has already advanced
    /// when the engine is called.
    pub fn deliver<E>(
        &mut self,
        engine: &mut E,
        context: &mut E::Context,
        terminal: E::Terminal,
        m: Match<'_>,
    ) -> Result<(), E::Error>
    where
        E: ParserEngine,
    {
        m.assert_bounds();
        assert!(
            m.ltrim + m.rtrim < m.te - m.ts,
            "trimmed match {}..{} (trim {}+{}) is empty",
            m.ts,
            m.te,
            m.ltrim,
            m.rtrim
        );
        self.cursor = self.cursor.advance(&m.input[m.ts..m.te]);
        self.mtext = token_text_trimmed(m.input, m.ts, m.te, m.ltrim, m.rtrim);
        log::trace!("deliver {:?} {:?} at {}", terminal, self.mtext, self.cursor);
        if self.verbosity >= 2 {
            log::debug!(
                "Passing token `{}` at {} to the parser",
                escape_str(&self.mtext),
                self.cursor
            );
        }
        let token = Token::new(self.mtext.clone(), self.source.clone(), self.cursor);
        engine.step(terminal, Some(token), context)
    }

    /// Consumes a match and tells the engine `terminal` occurred, without a
    /// token.
    ///
    /// Trim counts are ignored.
    ///
    /// # Panics
    ///
    /// Panics if the match boundaries are inverted or out of bounds.
    ///
    /// # Errors
    ///
    /// Whatever the engine's step returns.
    pub fn deliver_null<E>(
        &mut self,
        engine: &mut E,
        context: &mut E::Context,
        terminal: E::Terminal,
        m: Match<'_>,
    ) -> Result<(), E::Error>
    where
        E: ParserEngine,
    {
        m.assert_bounds();
        self.mtext = m.full_text();
        self.cursor = self.cursor.advance(&self.mtext);
        log::trace!("deliver null {:?} {:?} at {}", terminal, self.mtext, self.cursor);
        if self.verbosity >= 2 {
            log::debug!(
                "Passing token `{}` at {} to the parser as null",
                escape_str(&self.mtext),
                self.cursor
            );
        }
        engine.step(terminal, None, context)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testlog;
    use crate::loc;

    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    enum Term {
        Word,
        Str,
        Semi,
    }

    #[derive(Default)]
    struct Collect {
        fail_on: Option<Term>,
    }

    type Seen = Vec<(Term, Option<Token>)>;

    impl ParserEngine for Collect {
        type Terminal = Term;
        type Context = Seen;
        type Error = &'static str;

        fn step(
            &mut self,
            terminal: Term,
            payload: Option<Token>,
            context: &mut Seen,
        ) -> Result<(), &'static str> {
            if self.fail_on == Some(terminal) {
                return Err("rejected");
            }
            context.push((terminal, payload));
            Ok(())
        }
    }

    #[test]
    fn skip_advances_cursor_and_forwards_nothing() {
        testlog::init();
        let input = "# note\nword";
        let mut bridge = Bridge::new().with_verbosity(2);
        bridge.skip(Match::new(input, 0, 7));
        assert_eq!(bridge.mtext(), "# note\n");
        assert_eq!(bridge.cursor(), loc!(1, 1, 2, 0));
    }

    #[test]
    fn echo_reports_every_call_at_verbosity_two() {
        testlog::init();
        let input = "a\t\"b\"\n";
        let mut bridge = Bridge::new().with_verbosity(2);
        let mut engine = Collect::default();
        let mut seen = Seen::new();
        testlog::take(log::Level::Debug);

        bridge
            .deliver(&mut engine, &mut seen, Term::Word, Match::new(input, 0, 1))
            .unwrap();
        bridge.skip(Match::new(input, 1, 2));
        bridge
            .deliver(&mut engine, &mut seen, Term::Str, Match::new(input, 2, 5).trimmed(1, 1))
            .unwrap();
        bridge
            .deliver_null(&mut engine, &mut seen, Term::Semi, Match::new(input, 5, 6))
            .unwrap();

        assert_eq!(
            testlog::take(log::Level::Debug),
            vec![
                "Passing token `a` at 1:1 to the parser",
                "Skipping text `\\t` at 1:2",
                "Passing token `b` at 1:3-5 to the parser",
                "Passing token `\\n` at 1:6-2:0 to the parser as null",
            ]
        );
    }

    #[test]
    fn no_echo_below_verbosity_two() {
        testlog::init();
        for verbosity in [0, 1] {
            let input = "a b;";
            let mut bridge = Bridge::new().with_verbosity(verbosity);
            let mut engine = Collect::default();
            let mut seen = Seen::new();
            testlog::take(log::Level::Debug);

            bridge
                .deliver(&mut engine, &mut seen, Term::Word, Match::new(input, 0, 1))
                .unwrap();
            bridge.skip(Match::new(input, 1, 2));
            bridge
                .deliver_null(&mut engine, &mut seen, Term::Semi, Match::new(input, 3, 4))
                .unwrap();

            assert!(testlog::take(log::Level::Debug).is_empty());
            assert!(!testlog::take(log::Level::Trace).is_empty());
        }
    }

    #[test]
    fn resumes_from_a_given_cursor() {
        let input = "xy\nz";
        let mut bridge = Bridge::new().with_cursor(loc!(4, 1, 4, 6));
        let mut engine = Collect::default();
        let mut seen = Seen::new();

        bridge
            .deliver(&mut engine, &mut seen, Term::Word, Match::new(input, 0, 2))
            .unwrap();
        assert_eq!(bridge.cursor(), loc!(4, 7, 4, 8));
        bridge.skip(Match::new(input, 2, 3));
        assert_eq!(bridge.cursor(), loc!(4, 9, 5, 0));
        bridge
            .deliver(&mut engine, &mut seen, Term::Word, Match::new(input, 3, 4))
            .unwrap();
        assert_eq!(seen[1].1.as_ref().unwrap().loc, loc!(5, 1, 5, 1));
    }

    #[test]
    fn skip_ignores_trims() {
        let input = "/* c */";
        let mut bridge = Bridge::new();
        bridge.skip(Match::new(input, 0, 7).trimmed(2, 2));
        assert_eq!(bridge.mtext(), "/* c */");
        assert_eq!(bridge.cursor(), loc!(1, 1, 1, 7));
    }

    #[test]
    fn deliver_hands_token_to_engine() {
        testlog::init();
        let input = "alpha beta";
        let mut bridge = Bridge::new().with_source("t.ol").with_verbosity(2);
        let mut engine = Collect::default();
        let mut seen = Seen::new();

        bridge
            .deliver(&mut engine, &mut seen, Term::Word, Match::new(input, 0, 5))
            .unwrap();
        bridge.skip(Match::new(input, 5, 6));
        bridge
            .deliver(&mut engine, &mut seen, Term::Word, Match::new(input, 6, 10))
            .unwrap();

        assert_eq!(seen.len(), 2);
        let (term, tok) = &seen[1];
        assert_eq!(*term, Term::Word);
        let tok = tok.as_ref().unwrap();
        assert_eq!(tok.text(), "beta");
        assert_eq!(tok.loc, loc!(1, 7, 1, 10));
        assert_eq!(tok.source.as_ref().map(|s| s.as_str()), Some("t.ol"));
    }

    #[test]
    fn trimmed_text_does_not_shift_location() {
        let input = "x \"quoted\" y";
        let mut bridge = Bridge::new();
        let mut engine = Collect::default();
        let mut seen = Seen::new();

        bridge.skip(Match::new(input, 0, 2));
        bridge
            .deliver(&mut engine, &mut seen, Term::Str, Match::new(input, 2, 10).trimmed(1, 1))
            .unwrap();
        let tok = seen[0].1.as_ref().unwrap();
        assert_eq!(tok.text(), "quoted");
        assert_eq!(tok.loc, loc!(1, 3, 1, 10));
        assert_eq!(bridge.mtext(), "quoted");

        bridge.skip(Match::new(input, 10, 11));
        assert_eq!(bridge.cursor(), loc!(1, 11, 1, 11));
    }

    #[test]
    fn deliver_null_forwards_marker() {
        let input = "a;";
        let mut bridge = Bridge::new().with_verbosity(3);
        let mut engine = Collect::default();
        let mut seen = Seen::new();
        bridge
            .deliver(&mut engine, &mut seen, Term::Word, Match::new(input, 0, 1))
            .unwrap();
        bridge
            .deliver_null(&mut engine, &mut seen, Term::Semi, Match::new(input, 1, 2).trimmed(1, 0))
            .unwrap();
        assert_eq!(seen[1], (Term::Semi, None));
        assert_eq!(bridge.mtext(), ";");
        assert_eq!(bridge.cursor(), loc!(1, 2, 1, 2));
    }

    #[test]
    fn empty_null_match_keeps_column() {
        let input = "ab";
        let mut bridge = Bridge::new();
        let mut engine = Collect::default();
        let mut seen = Seen::new();
        bridge.skip(Match::new(input, 0, 2));
        bridge
            .deliver_null(&mut engine, &mut seen, Term::Semi, Match::empty(input, 2))
            .unwrap();
        assert_eq!(bridge.cursor(), loc!(1, 3, 1, 2));
        bridge
            .deliver_null(&mut engine, &mut seen, Term::Semi, Match::empty(input, 2))
            .unwrap();
        assert_eq!(bridge.cursor().last_col, 2);
        assert_eq!(seen.len(), 2);
    }

    #[test]
    fn engine_errors_propagate_after_cursor_moves() {
        let input = "ab";
        let mut bridge = Bridge::new();
        let mut engine = Collect {
            fail_on: Some(Term::Word),
        };
        let mut seen = Seen::new();
        let res = bridge.deliver(&mut engine, &mut seen, Term::Word, Match::new(input, 0, 2));
        assert_eq!(res, Err("rejected"));
        assert_eq!(bridge.cursor(), loc!(1, 1, 1, 2));
        assert!(seen.is_empty());
    }

    #[test]
    fn matches_chain_across_lines() {
        let input = "one\ntwo\r\nthree";
        let mut bridge = Bridge::new();
        let mut engine = Collect::default();
        let mut seen = Seen::new();
        let cuts = [(0, 3), (3, 4), (4, 7), (7, 9), (9, 14)];
        for (i, (ts, te)) in cuts.into_iter().enumerate() {
            if i % 2 == 0 {
                bridge
                    .deliver(&mut engine, &mut seen, Term::Word, Match::new(input, ts, te))
                    .unwrap();
            } else {
                bridge.skip(Match::new(input, ts, te));
            }
        }
        let locs: Vec<TextLoc> = seen.iter().map(|(_, t)| t.as_ref().unwrap().loc).collect();
        assert_eq!(locs, vec![loc!(1, 1, 1, 3), loc!(2, 1, 2, 3), loc!(3, 1, 3, 5)]);
    }

    #[test]
    fn from_regs_uses_token_registers() {
        let input = "let x";
        let mut regs = ScannerRegs::new(input.len(), 0);
        regs.set_token(4, 5, 1);
        let m = Match::from_regs(input, &regs);
        assert_eq!(m.full_text().as_str(), "x");
    }

    #[test]
    fn reset_rewinds_cursor() {
        let mut bridge = Bridge::new().with_source("a");
        bridge.skip(Match::new("abc", 0, 3));
        bridge.reset();
        assert_eq!(bridge.cursor(), TextLoc::FIRST);
        assert_eq!(bridge.mtext(), "");
        assert_eq!(bridge.source().map(|s| s.as_str()), Some("a"));
    }

    #[test]
    #[should_panic(expected = "is empty")]
    fn delivering_empty_trimmed_text_panics() {
        let mut bridge = Bridge::new();
        let mut engine = Collect::default();
        let mut seen = Seen::new();
        let m = Match::new("\"\"", 0, 2).trimmed(1, 1);
        let _ = bridge.deliver(&mut engine, &mut seen, Term::Str, m);
    }

    #[test]
    #[should_panic(expected = "inverted match boundaries")]
    fn inverted_match_panics() {
        Bridge::new().skip(Match::new("abc", 2, 1));
    }

    #[test]
    #[should_panic(expected = "past input length")]
    fn out_of_range_match_panics() {
        Bridge::new().skip(Match::new("abc", 1, 9));
    }
}
