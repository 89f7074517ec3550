//! # Outline Parser Engine
//!
//! [`OutlineParser`] is a push-driven shift-reduce engine for the outline
//! grammar:
//!
//! ```text
//! Program -> Stmts End | End
//! Stmts   -> Stmts Stmt | Stmt
//! Stmt    -> data ident = Expr Newline
//!          | ident : Newline Indent Stmts Dedent
//! Expr    -> Expr or Atom | Atom
//! Atom    -> true | false | ident | str
//! ```
//!
//! Each step checks the terminal against the set acceptable on top of the
//! current stack, shifts it, and then reduces for as long as a production
//! matches. The grammar is small enough that every handle is recognized by
//! a slice pattern on the stack top; no tables are needed. Reductions
//! build nodes in the [`OutlineCtx`] arena.
use crate::ast::{Block, BoolLiteral, DataDecl, LogOr, NameRef, OutlineNode, Root, StrLiteral};
use crate::error::{Expected, OutlineError};
use crate::token::TokenId;
use lexbridge::{Ast, NodeId, ParserEngine, TextLoc, Token};

/// Parsing state shared with reduction actions.
#[derive(Debug, Default)]
pub struct OutlineCtx {
    /// Nodes built so far.
    pub ast: Ast<OutlineNode>,
    /// The `Root` node, once the program has been accepted.
    pub root: Option<NodeId>,
}

impl OutlineCtx {
    pub fn new() -> Self {
        Self::default()
    }
}

/// Grammar symbol on the parse stack.
#[derive(Debug)]
enum Sym {
    Term { id: TokenId, token: Option<Token> },
    Expr(NodeId),
    Stmt(NodeId),
    Stmts(Vec<NodeId>),
}

#[derive(Debug, Clone, Copy)]
enum Prod {
    Atom,
    Or,
    DataDecl,
    Block,
    StmtsAppend,
    StmtsFirst,
    Program,
    EmptyProgram,
}

/// Shift-reduce engine for the outline grammar.
#[derive(Debug, Default)]
pub struct OutlineParser {
    stack: Vec<Sym>,
    accepted: bool,
    trace: Option<String>,
}

impl OutlineParser {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns `true` once `End` has been reduced into a program.
    pub fn is_accepted(&self) -> bool {
        self.accepted
    }

    /// Terminals acceptable in the current state.
    pub fn expected(&self) -> &'static [TokenId] {
        use TokenId::*;
        if self.accepted {
            return &[];
        }
        let n = self.stack.len();
        let below = |k: usize| n.checked_sub(k + 1).map(|i| &self.stack[i]);
        match self.stack.last() {
            None => &[Data, Ident, End],
            Some(Sym::Stmts(_)) if n == 1 => &[Data, Ident, End],
            Some(Sym::Stmts(_)) => &[Data, Ident, Dedent],
            Some(Sym::Expr(_)) => &[Or, Newline],
            Some(Sym::Stmt(_)) => &[],
            Some(Sym::Term { id, .. }) => match id {
                Indent => &[Data, Ident],
                Data => &[Ident],
                Ident if matches!(below(1), Some(Sym::Term { id: Data, .. })) => &[Equals],
                Ident => &[Colon],
                Equals | Or => &[True, False, Ident, Str, EmptyStr],
                Colon => &[Newline],
                Newline => &[Indent],
                _ => &[],
            },
        }
    }

    fn dump_stack(&self) -> String {
        let syms: Vec<String> = self
            .stack
            .iter()
            .map(|s| match s {
                Sym::Term { id, .. } => format!("{:?}", id),
                Sym::Expr(id) => format!("Expr#{}", id.index()),
                Sym::Stmt(id) => format!("Stmt#{}", id.index()),
                Sym::Stmts(ids) => format!("Stmts[{}]", ids.len()),
            })
            .collect();
        syms.join(" ")
    }

    fn handle(&self) -> Option<Prod> {
        use TokenId::*;
        let prod = match self.stack.as_slice() {
            [
                ..,
                Sym::Term { id: Equals | Or, .. },
                Sym::Term {
                    id: True | False | Ident | Str | EmptyStr,
                    ..
                },
            ] => Prod::Atom,
            [.., Sym::Expr(_), Sym::Term { id: Or, .. }, Sym::Expr(_)] => Prod::Or,
            [
                ..,
                Sym::Term { id: Data, .. },
                Sym::Term { id: Ident, .. },
                Sym::Term { id: Equals, .. },
                Sym::Expr(_),
                Sym::Term { id: Newline, .. },
            ] => Prod::DataDecl,
            [
                ..,
                Sym::Term { id: Ident, .. },
                Sym::Term { id: Colon, .. },
                Sym::Term { id: Newline, .. },
                Sym::Term { id: Indent, .. },
                Sym::Stmts(_),
                Sym::Term { id: Dedent, .. },
            ] => Prod::Block,
            [.., Sym::Stmts(_), Sym::Stmt(_)] => Prod::StmtsAppend,
            [.., Sym::Stmt(_)] => Prod::StmtsFirst,
            [Sym::Stmts(_), Sym::Term { id: End, .. }] => Prod::Program,
            [Sym::Term { id: End, .. }] => Prod::EmptyProgram,
            _ => return None,
        };
        Some(prod)
    }

    fn pop_term(&mut self) -> Option<Token> {
        match self.stack.pop() {
            Some(Sym::Term { token, .. }) => token,
            other => unreachable!("expected a terminal on the stack, found {:?}", other),
        }
    }

    fn pop_token(&mut self) -> Token {
        match self.pop_term() {
            Some(token) => token,
            None => unreachable!("payload terminal without a token"),
        }
    }

    fn pop_node(&mut self) -> NodeId {
        match self.stack.pop() {
            Some(Sym::Expr(id) | Sym::Stmt(id)) => id,
            other => unreachable!("expected a node on the stack, found {:?}", other),
        }
    }

    fn pop_stmts(&mut self) -> Vec<NodeId> {
        match self.stack.pop() {
            Some(Sym::Stmts(ids)) => ids,
            other => unreachable!("expected statements on the stack, found {:?}", other),
        }
    }

    fn reduce(&mut self, prod: Prod, ctx: &mut OutlineCtx) {
        let ast = &mut ctx.ast;
        match prod {
            Prod::Atom => {
                let Some(Sym::Term { id, .. }) = self.stack.last() else {
                    unreachable!()
                };
                let id = *id;
                let token = self.pop_token();
                let loc = token.loc;
                let node = match id {
                    TokenId::True => ast.add(loc, BoolLiteral { value: true }),
                    TokenId::False => ast.add(loc, BoolLiteral { value: false }),
                    TokenId::Ident => ast.add(loc, NameRef { name: token.text }),
                    TokenId::Str => ast.add(loc, StrLiteral { value: token.text }),
                    TokenId::EmptyStr => ast.add(loc, StrLiteral { value: "".into() }),
                    _ => unreachable!(),
                };
                self.stack.push(Sym::Expr(node));
            }
            Prod::Or => {
                let rhs = self.pop_node();
                self.pop_term();
                let lhs = self.pop_node();
                let loc = TextLoc::span(&ast.loc(lhs), &ast.loc(rhs));
                let node = ast.add(loc, LogOr { lhs, rhs });
                self.stack.push(Sym::Expr(node));
            }
            Prod::DataDecl => {
                self.pop_term();
                let expr = self.pop_node();
                self.pop_term();
                let name = self.pop_token();
                let kw = self.pop_token();
                let loc = TextLoc::span(&kw.loc, &ast.loc(expr));
                let node = ast.add(
                    loc,
                    DataDecl {
                        name: name.text,
                        expr,
                    },
                );
                self.stack.push(Sym::Stmt(node));
            }
            Prod::Block => {
                self.pop_term();
                let body = self.pop_stmts();
                self.pop_term();
                self.pop_term();
                self.pop_term();
                let name = self.pop_token();
                let last = body.last().map_or(name.loc, |id| ast.loc(*id));
                let loc = TextLoc::span(&name.loc, &last);
                let node = ast.add(
                    loc,
                    Block {
                        name: name.text,
                        body,
                    },
                );
                self.stack.push(Sym::Stmt(node));
            }
            Prod::StmtsAppend => {
                let stmt = self.pop_node();
                if let Some(Sym::Stmts(ids)) = self.stack.last_mut() {
                    ids.push(stmt);
                }
            }
            Prod::StmtsFirst => {
                let stmt = self.pop_node();
                self.stack.push(Sym::Stmts(vec![stmt]));
            }
            Prod::Program | Prod::EmptyProgram => {
                self.pop_term();
                let items = match prod {
                    Prod::Program => self.pop_stmts(),
                    _ => Vec::new(),
                };
                let loc = match (items.first(), items.last()) {
                    (Some(first), Some(last)) => TextLoc::span(&ast.loc(*first), &ast.loc(*last)),
                    _ => TextLoc::FIRST,
                };
                let root = ast.add(loc, Root { items });
                ctx.root = Some(root);
                self.accepted = true;
            }
        }
        if let Some(label) = &self.trace {
            log::trace!("{}reduce {:?} -> {}", label, prod, self.dump_stack());
        }
    }
}

impl ParserEngine for OutlineParser {
    type Terminal = TokenId;
    type Context = OutlineCtx;
    type Error = OutlineError;

    fn step(
        &mut self,
        terminal: TokenId,
        payload: Option<Token>,
        context: &mut OutlineCtx,
    ) -> Result<(), OutlineError> {
        let loc = payload.as_ref().map_or(TextLoc::EMPTY, |t| t.loc);
        if terminal.has_payload() != payload.is_some() {
            return Err(OutlineError::Payload { loc, terminal });
        }
        let expected = self.expected();
        if !expected.contains(&terminal) {
            return Err(OutlineError::Syntax {
                loc,
                found: terminal,
                expected: Expected(expected.to_vec()),
            });
        }

        self.stack.push(Sym::Term {
            id: terminal,
            token: payload,
        });
        if let Some(label) = &self.trace {
            log::trace!("{}shift {:?} -> {}", label, terminal, self.dump_stack());
        }
        while let Some(prod) = self.handle() {
            self.reduce(prod, context);
        }
        Ok(())
    }

    fn trace(&mut self, label: Option<&str>) {
        self.trace = label.map(str::to_owned);
    }
}
