//! # Outline Scanner
//!
//! A longest-match scanner with one anchored multi-pattern DFA per mode.
//! At the start of a line it measures the leading whitespace (or swallows
//! the whole line if it is blank or comment-only); inside a line it
//! recognizes words, punctuation, strings, comments and the line break.
//!
//! Each mode's patterns are listed in priority order: when two patterns
//! match the same longest prefix, the earlier one wins. That is how `data`
//! is a keyword and `database` an identifier.
//!
//! The scanner only splits the input into [`Lexeme`]s. Which of them reach
//! the parser, and how, is decided by the driver.
use lexbridge::ScannerRegs;
use regex_automata::{
    Anchored, Input, MatchError, MatchKind, PatternID,
    dfa::{Automaton, StartKind, dense},
    util::primitives::StateID,
};
use thiserror::Error;

/// Scanner state at the start of a line.
pub const LINE_START: usize = 0;
/// Scanner state inside a line.
pub const IN_LINE: usize = 1;

/// Rules the scanner recognizes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(usize)]
pub enum Rule {
    /// Leading whitespace of a non-blank line, possibly empty.
    Indentation,
    /// A line with nothing but whitespace and an optional comment,
    /// including its line break.
    BlankLine,
    /// Whitespace inside a line.
    Space,
    /// `#` up to the end of the line.
    Comment,
    Newline,
    Data,
    True,
    False,
    Or,
    Ident,
    Equals,
    Colon,
    /// Double-quoted string on a single line.
    Str,
    /// Anything no other rule accepts, including an unterminated string.
    Error,
}

const LINE_START_RULES: &[(Rule, &str)] = &[
    (Rule::BlankLine, r"[ \t]*(?:#[^\r\n]*)?(?:\r\n|\r|\n|$)"),
    (Rule::Indentation, r"[ \t]*"),
];

const IN_LINE_RULES: &[(Rule, &str)] = &[
    (Rule::Space, r"[ \t]+"),
    (Rule::Comment, r"#[^\r\n]*"),
    (Rule::Newline, r"\r\n|\r|\n"),
    (Rule::Data, r"data"),
    (Rule::True, r"true"),
    (Rule::False, r"false"),
    (Rule::Or, r"or"),
    (Rule::Ident, r"[A-Za-z_][A-Za-z0-9_]*"),
    (Rule::Equals, r"="),
    (Rule::Colon, r":"),
    (Rule::Str, r#""[^"\r\n]*""#),
    (Rule::Error, r#""[^"\r\n]*"#),
    (Rule::Error, r"(?s:.)"),
];

const MODE_RULES: [&[(Rule, &str)]; 2] = [LINE_START_RULES, IN_LINE_RULES];

/// Failures of the scanner machinery itself, never of the input.
#[derive(Debug, Error)]
pub enum ScanError {
    #[error("cannot build scanner automaton: {0}")]
    Build(#[from] dense::BuildError),

    #[error("scanner automaton failed: {0}")]
    Match(#[from] MatchError),
}

/// One recognized lexeme: a rule and its byte boundaries.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Lexeme {
    pub rule: Rule,
    pub ts: usize,
    pub te: usize,
}

/// Compiled automata, one per scanner mode.
#[derive(Debug, Clone)]
pub struct ScannerTables {
    dfas: Vec<dense::DFA<Vec<u32>>>,
}

impl ScannerTables {
    pub fn build() -> Result<Self, ScanError> {
        let mut dfas = Vec::with_capacity(MODE_RULES.len());
        for rules in MODE_RULES {
            let patterns: Vec<&str> = rules.iter().map(|(_, re)| *re).collect();
            let dfa = dense::Builder::new()
                .configure(
                    dense::DFA::config()
                        .match_kind(MatchKind::All)
                        .start_kind(StartKind::Anchored),
                )
                .build_many(&patterns)?;
            dfas.push(dfa);
        }
        Ok(Self { dfas })
    }

    #[inline]
    fn lookup(mode: usize, pattern: PatternID) -> Rule {
        MODE_RULES[mode][pattern.as_usize()].0
    }

    /// Longest anchored match of `mode`'s patterns at the start of
    /// `haystack`, as the winning pattern and the match length.
    fn longest_match(
        &self,
        mode: usize,
        haystack: &[u8],
    ) -> Result<Option<(PatternID, usize)>, MatchError> {
        let dfa = &self.dfas[mode];
        let mut state = dfa.start_state_forward(&Input::new(haystack).anchored(Anchored::Yes))?;
        let mut last_match = None;
        for (i, &b) in haystack.iter().enumerate() {
            state = dfa.next_state(state, b);
            if dfa.is_special_state(state) {
                // Matches are reported one byte late: this one ends at `i`.
                if dfa.is_match_state(state) {
                    last_match = Some((preferred_pattern(dfa, state), i));
                } else if dfa.is_dead_state(state) || dfa.is_quit_state(state) {
                    return Ok(last_match);
                }
            }
        }
        state = dfa.next_eoi_state(state);
        if dfa.is_match_state(state) {
            last_match = Some((preferred_pattern(dfa, state), haystack.len()));
        }
        Ok(last_match)
    }
}

fn preferred_pattern(dfa: &dense::DFA<Vec<u32>>, state: StateID) -> PatternID {
    (0..dfa.match_len(state))
        .map(|i| dfa.match_pattern(state, i))
        .min()
        .unwrap_or(PatternID::ZERO)
}

/// Scanner over a complete input.
#[derive(Debug, Clone)]
pub struct OutlineScanner<'a> {
    input: &'a str,
    tables: ScannerTables,
    regs: ScannerRegs,
}

impl<'a> OutlineScanner<'a> {
    pub fn try_new(input: &'a str) -> Result<Self, ScanError> {
        Ok(Self::with_tables(input, ScannerTables::build()?))
    }

    /// Scanner reusing already compiled tables.
    pub fn with_tables(input: &'a str, tables: ScannerTables) -> Self {
        Self {
            input,
            tables,
            regs: ScannerRegs::new(input.len(), LINE_START),
        }
    }

    #[inline]
    pub fn regs(&self) -> &ScannerRegs {
        &self.regs
    }

    /// Returns `true` if the last lexeme left the scanner inside a line,
    /// i.e. the input so far ends with an unterminated line.
    #[inline]
    pub fn in_line(&self) -> bool {
        self.regs.cs == IN_LINE
    }

    /// Scans the next lexeme, or returns `None` at end of input.
    pub fn next_lexeme(&mut self) -> Result<Option<Lexeme>, ScanError> {
        if self.regs.at_eof() {
            return Ok(None);
        }
        let mode = self.regs.cs;
        let ts = self.regs.p;
        let rest = &self.input[ts..];
        let (rule, te) = match self.tables.longest_match(mode, rest.as_bytes())? {
            Some((pattern, len)) => (ScannerTables::lookup(mode, pattern), ts + len),
            None => {
                let len = rest.chars().next().map_or(0, char::len_utf8);
                (Rule::Error, ts + len)
            }
        };
        self.regs.set_token(ts, te, rule as usize);
        self.regs.cs = match rule {
            Rule::BlankLine | Rule::Newline => LINE_START,
            _ => IN_LINE,
        };
        log::trace!("scan mode {} {:?} {}..{}", mode, rule, ts, te);
        Ok(Some(Lexeme { rule, ts, te }))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rules(input: &str) -> Vec<(Rule, &str)> {
        let mut scanner = OutlineScanner::try_new(input).unwrap();
        let mut out = Vec::new();
        while let Some(lx) = scanner.next_lexeme().unwrap() {
            out.push((lx.rule, &input[lx.ts..lx.te]));
        }
        out
    }

    #[test]
    fn declaration_line() {
        assert_eq!(
            rules("data x = true or y\n"),
            vec![
                (Rule::Indentation, ""),
                (Rule::Data, "data"),
                (Rule::Space, " "),
                (Rule::Ident, "x"),
                (Rule::Space, " "),
                (Rule::Equals, "="),
                (Rule::Space, " "),
                (Rule::True, "true"),
                (Rule::Space, " "),
                (Rule::Or, "or"),
                (Rule::Space, " "),
                (Rule::Ident, "y"),
                (Rule::Newline, "\n"),
            ]
        );
    }

    #[test]
    fn keywords_need_whole_words() {
        assert_eq!(
            rules("database or_else"),
            vec![
                (Rule::Indentation, ""),
                (Rule::Ident, "database"),
                (Rule::Space, " "),
                (Rule::Ident, "or_else"),
            ]
        );
    }

    #[test]
    fn blank_and_comment_lines_are_one_lexeme() {
        assert_eq!(
            rules("  \n# note\r\n    # indented note\nx:"),
            vec![
                (Rule::BlankLine, "  \n"),
                (Rule::BlankLine, "# note\r\n"),
                (Rule::BlankLine, "    # indented note\n"),
                (Rule::Indentation, ""),
                (Rule::Ident, "x"),
                (Rule::Colon, ":"),
            ]
        );
    }

    #[test]
    fn trailing_blank_line_without_break() {
        assert_eq!(
            rules("x\n   "),
            vec![
                (Rule::Indentation, ""),
                (Rule::Ident, "x"),
                (Rule::Newline, "\n"),
                (Rule::BlankLine, "   "),
            ]
        );
    }

    #[test]
    fn indentation_and_trailing_comment() {
        assert_eq!(
            rules("\t  s = \"a b\" # c"),
            vec![
                (Rule::Indentation, "\t  "),
                (Rule::Ident, "s"),
                (Rule::Space, " "),
                (Rule::Equals, "="),
                (Rule::Space, " "),
                (Rule::Str, "\"a b\""),
                (Rule::Space, " "),
                (Rule::Comment, "# c"),
            ]
        );
    }

    #[test]
    fn carriage_return_alone_ends_a_line() {
        assert_eq!(
            rules("a\r  b"),
            vec![
                (Rule::Indentation, ""),
                (Rule::Ident, "a"),
                (Rule::Newline, "\r"),
                (Rule::Indentation, "  "),
                (Rule::Ident, "b"),
            ]
        );
    }

    #[test]
    fn multibyte_string_contents() {
        assert_eq!(
            rules("s = \"héllo\""),
            vec![
                (Rule::Indentation, ""),
                (Rule::Ident, "s"),
                (Rule::Space, " "),
                (Rule::Equals, "="),
                (Rule::Space, " "),
                (Rule::Str, "\"héllo\""),
            ]
        );
    }

    #[test]
    fn unterminated_string_is_an_error_up_to_line_end() {
        assert_eq!(
            rules("x = \"abc\ny"),
            vec![
                (Rule::Indentation, ""),
                (Rule::Ident, "x"),
                (Rule::Space, " "),
                (Rule::Equals, "="),
                (Rule::Space, " "),
                (Rule::Error, "\"abc"),
                (Rule::Newline, "\n"),
                (Rule::Indentation, ""),
                (Rule::Ident, "y"),
            ]
        );
    }

    #[test]
    fn unknown_characters_are_errors() {
        assert_eq!(
            rules("é$"),
            vec![(Rule::Indentation, ""), (Rule::Error, "é"), (Rule::Error, "$")]
        );
    }

    #[test]
    fn state_tracks_unterminated_last_line() {
        let mut scanner = OutlineScanner::try_new("x\n").unwrap();
        while scanner.next_lexeme().unwrap().is_some() {}
        assert!(!scanner.in_line());

        let mut scanner = OutlineScanner::try_new("x").unwrap();
        while scanner.next_lexeme().unwrap().is_some() {}
        assert!(scanner.in_line());
        assert!(scanner.regs().at_eof());
    }

    #[test]
    fn registers_follow_the_last_lexeme() {
        let mut scanner = OutlineScanner::try_new("ab =").unwrap();
        scanner.next_lexeme().unwrap();
        let lx = scanner.next_lexeme().unwrap().unwrap();
        assert_eq!(lx.rule, Rule::Ident);
        let regs = scanner.regs();
        assert_eq!((regs.ts, regs.te, regs.p), (0, 2, 2));
        assert_eq!(regs.act, Rule::Ident as usize);
        assert_eq!(regs.cs, IN_LINE);
    }

    #[test]
    fn tables_can_be_shared() {
        let tables = ScannerTables::build().unwrap();
        let mut a = OutlineScanner::with_tables("x", tables.clone());
        let mut b = OutlineScanner::with_tables("  y", tables);
        a.next_lexeme().unwrap();
        let lx = b.next_lexeme().unwrap().unwrap();
        assert_eq!((lx.rule, lx.te), (Rule::Indentation, 2));
        assert_eq!(a.next_lexeme().unwrap().unwrap().rule, Rule::Ident);
    }

    #[test]
    fn empty_input_has_no_lexemes() {
        assert!(rules("").is_empty());
    }
}
