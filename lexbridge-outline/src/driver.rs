//! # Outline Driver
//!
//! Feeds the [`OutlineScanner`]'s lexemes through a [`Bridge`] into any
//! engine accepting [`TokenId`] terminals. Indentation is resolved here with
//! an [`IndentStack`]: the engine only ever sees `Indent` and `Dedent`.
use crate::ast::OutlineNode;
use crate::error::OutlineError;
use crate::parser::{OutlineCtx, OutlineParser};
use crate::scanner::{Lexeme, OutlineScanner, Rule};
use crate::token::TokenId;
use lexbridge::{Ast, Bridge, IndentStack, Match, ParserEngine, Token};

/// Drives one input from first lexeme to `End`.
#[derive(Debug)]
pub struct OutlineDriver<'a> {
    input: &'a str,
    scanner: OutlineScanner<'a>,
    bridge: Bridge,
    indents: IndentStack,
}

impl<'a> OutlineDriver<'a> {
    pub fn try_new(input: &'a str, bridge: Bridge) -> Result<Self, OutlineError> {
        Ok(Self {
            input,
            scanner: OutlineScanner::try_new(input)?,
            bridge,
            indents: IndentStack::new(),
        })
    }

    /// Runs the whole input through `engine`.
    ///
    /// # Errors
    ///
    /// Returns the first lexical, indentation or engine error. Errors the
    /// engine raises without a location get the location of the lexeme
    /// that triggered them.
    pub fn run<E>(&mut self, engine: &mut E, ctx: &mut E::Context) -> Result<(), OutlineError>
    where
        E: ParserEngine<Terminal = TokenId, Error = OutlineError>,
    {
        while let Some(lexeme) = self.scanner.next_lexeme()? {
            self.lexeme(engine, ctx, lexeme)
                .map_err(|e| e.located(self.bridge.cursor()))?;
        }
        self.finish(engine, ctx)
            .map_err(|e| e.located(self.bridge.cursor()))
    }

    fn lexeme<E>(
        &mut self,
        engine: &mut E,
        ctx: &mut E::Context,
        lexeme: Lexeme,
    ) -> Result<(), OutlineError>
    where
        E: ParserEngine<Terminal = TokenId, Error = OutlineError>,
    {
        let m = Match::new(self.input, lexeme.ts, lexeme.te);
        let bridge = &mut self.bridge;
        match lexeme.rule {
            Rule::BlankLine | Rule::Space | Rule::Comment => {
                bridge.skip(m);
                Ok(())
            }
            Rule::Indentation => self.indentation(engine, ctx, m),
            Rule::Newline => bridge.deliver_null(engine, ctx, TokenId::Newline, m),
            Rule::Equals => bridge.deliver_null(engine, ctx, TokenId::Equals, m),
            Rule::Colon => bridge.deliver_null(engine, ctx, TokenId::Colon, m),
            Rule::Or => bridge.deliver_null(engine, ctx, TokenId::Or, m),
            Rule::Data => bridge.deliver(engine, ctx, TokenId::Data, m),
            Rule::True => bridge.deliver(engine, ctx, TokenId::True, m),
            Rule::False => bridge.deliver(engine, ctx, TokenId::False, m),
            Rule::Ident => bridge.deliver(engine, ctx, TokenId::Ident, m),
            Rule::Str if m.te - m.ts == 2 => bridge.deliver(engine, ctx, TokenId::EmptyStr, m),
            Rule::Str => bridge.deliver(engine, ctx, TokenId::Str, m.trimmed(1, 1)),
            Rule::Error => {
                bridge.skip(m);
                Err(OutlineError::Lexical {
                    loc: bridge.cursor(),
                    text: m.full_text(),
                })
            }
        }
    }

    fn indentation<E>(
        &mut self,
        engine: &mut E,
        ctx: &mut E::Context,
        m: Match<'_>,
    ) -> Result<(), OutlineError>
    where
        E: ParserEngine<Terminal = TokenId, Error = OutlineError>,
    {
        let width = m.input[m.ts..m.te].chars().count();
        let delta = match self.indents.update(width) {
            Ok(delta) => delta,
            Err(source) => {
                self.bridge.skip(m);
                return Err(OutlineError::Indent {
                    loc: self.bridge.cursor(),
                    source,
                });
            }
        };
        log::trace!("indentation width {} -> delta {}", width, delta);
        match delta {
            0 => {
                self.bridge.skip(m);
                Ok(())
            }
            1 => self.bridge.deliver_null(engine, ctx, TokenId::Indent, m),
            _ => {
                self.bridge.deliver_null(engine, ctx, TokenId::Dedent, m)?;
                for _ in 1..delta.unsigned_abs() {
                    let at = Match::empty(self.input, m.te);
                    self.bridge.deliver_null(engine, ctx, TokenId::Dedent, at)?;
                }
                Ok(())
            }
        }
    }

    /// Closes an unterminated last line and every open block, then
    /// delivers `End`.
    fn finish<E>(&mut self, engine: &mut E, ctx: &mut E::Context) -> Result<(), OutlineError>
    where
        E: ParserEngine<Terminal = TokenId, Error = OutlineError>,
    {
        let eof = Match::empty(self.input, self.input.len());
        if self.scanner.in_line() {
            self.bridge.deliver_null(engine, ctx, TokenId::Newline, eof)?;
        }
        for _ in 0..self.indents.reset() {
            self.bridge.deliver_null(engine, ctx, TokenId::Dedent, eof)?;
        }
        self.bridge.deliver_null(engine, ctx, TokenId::End, eof)
    }
}

/// Parses `source` into an AST whose single root is a `Root` node.
///
/// `label` is stamped on every token; `verbosity` of 2 or more echoes every
/// bridge call through `log::debug!`, and 3 or more also traces the engine.
pub fn parse_str(
    source: &str,
    label: Option<&str>,
    verbosity: u8,
) -> Result<Ast<OutlineNode>, OutlineError> {
    let mut bridge = Bridge::new().with_verbosity(verbosity);
    if let Some(label) = label {
        bridge = bridge.with_source(label);
    }
    let mut parser = OutlineParser::new();
    if verbosity >= 3 {
        parser.trace(Some("outline: "));
    }
    let mut ctx = OutlineCtx::new();
    OutlineDriver::try_new(source, bridge)?.run(&mut parser, &mut ctx)?;
    Ok(ctx.ast)
}

/// Engine that accepts everything and records what it is given.
#[derive(Debug, Default)]
pub struct TokenCollector;

impl ParserEngine for TokenCollector {
    type Terminal = TokenId;
    type Context = Vec<(TokenId, Option<Token>)>;
    type Error = OutlineError;

    fn step(
        &mut self,
        terminal: TokenId,
        payload: Option<Token>,
        context: &mut Self::Context,
    ) -> Result<(), OutlineError> {
        context.push((terminal, payload));
        Ok(())
    }
}

/// The terminals `source` delivers to the parser, with their tokens, without
/// parsing.
pub fn tokens_str(
    source: &str,
    label: Option<&str>,
    verbosity: u8,
) -> Result<Vec<(TokenId, Option<Token>)>, OutlineError> {
    let mut bridge = Bridge::new().with_verbosity(verbosity);
    if let Some(label) = label {
        bridge = bridge.with_source(label);
    }
    let mut seen = Vec::new();
    OutlineDriver::try_new(source, bridge)?.run(&mut TokenCollector, &mut seen)?;
    Ok(seen)
}
