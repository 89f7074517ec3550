//! Interface to the external parser engine.
//!
//! A push-driven shift-reduce engine (hand-written, or generated from a
//! grammar) is consumed through four operations:
//!
//! - **allocate**: constructing the value that implements [`ParserEngine`];
//! - **free**: dropping it;
//! - **step**: [`ParserEngine::step`], called once per delivered terminal;
//! - **trace**: [`ParserEngine::trace`], an optional debugging hook.
//!
//! The engine owns every [`Token`] it receives. The `Context` is the shared
//! parsing state threaded by `&mut` through every step and every reduction
//! action, typically holding the AST under construction.

use crate::token::Token;
use std::fmt::Debug;

/// A parser engine driven one terminal at a time.
pub trait ParserEngine {
    /// Terminal symbol identifiers understood by the engine.
    type Terminal: Copy + Debug;

    /// Shared parsing state passed to every step.
    type Context;

    /// Error reported by a step (syntax errors, failed actions).
    type Error;

    /// Feeds one terminal into the engine.
    ///
    /// `payload` is `Some` for content-bearing terminals and `None` for
    /// terminals whose text is irrelevant. Ownership of the token moves into
    /// the engine.
    fn step(
        &mut self,
        terminal: Self::Terminal,
        payload: Option<Token>,
        context: &mut Self::Context,
    ) -> Result<(), Self::Error>;

    /// Enables tracing of engine steps with every trace record prefixed by
    /// `label`, or disables it when `label` is `None`.
    ///
    /// The default implementation does nothing.
    fn trace(&mut self, label: Option<&str>) {
        let _ = label;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::loc::TextLoc;

    #[derive(Default)]
    struct Recorder {
        label: Option<String>,
    }

    impl ParserEngine for Recorder {
        type Terminal = u8;
        type Context = Vec<(u8, Option<Token>)>;
        type Error = std::convert::Infallible;

        fn step(
            &mut self,
            terminal: u8,
            payload: Option<Token>,
            context: &mut Self::Context,
        ) -> Result<(), Self::Error> {
            context.push((terminal, payload));
            Ok(())
        }

        fn trace(&mut self, label: Option<&str>) {
            self.label = label.map(str::to_owned);
        }
    }

    #[test]
    fn engine_receives_ownership_of_tokens() {
        let mut engine = Recorder::default();
        let mut seen = Vec::new();
        let tok = Token::new("x", None, TextLoc::FIRST);
        engine.step(1, Some(tok), &mut seen).unwrap();
        engine.step(2, None, &mut seen).unwrap();
        assert_eq!(seen.len(), 2);
        assert_eq!(seen[0].1.as_ref().map(|t| t.text()), Some("x"));
        assert!(seen[1].1.is_none());
    }

    #[test]
    fn trace_hook_is_optional() {
        let mut engine = Recorder::default();
        engine.trace(Some("outline> "));
        assert_eq!(engine.label.as_deref(), Some("outline> "));
        engine.trace(None);
        assert!(engine.label.is_none());
    }
}
