//! # Outline AST
//!
//! One struct per node variant, each with a fixed [`OutlineKind`], and the
//! [`OutlineNode`] payload enum stored in the [`Ast`] arena. Variants hold
//! the ids of the children they own; [`Ast::insert`] links them
//! structurally.
use lexbridge::{Ast, AstClass, AstPayload, AstVariant, NodeId, NodeKind};
use smartstring::alias::String;
use std::fmt;

/// Kinds of outline AST nodes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum OutlineKind {
    Root,
    DataDecl,
    Block,
    LogOr,
    BoolLiteral,
    StrLiteral,
    NameRef,
}

impl NodeKind for OutlineKind {}

/// The whole program: top-level statements in order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Root {
    pub items: Vec<NodeId>,
}

/// `data name = expr`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DataDecl {
    pub name: String,
    pub expr: NodeId,
}

/// `name:` followed by an indented body.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Block {
    pub name: String,
    pub body: Vec<NodeId>,
}

/// `lhs or rhs`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LogOr {
    pub lhs: NodeId,
    pub rhs: NodeId,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BoolLiteral {
    pub value: bool,
}

/// String literal, quotes removed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StrLiteral {
    pub value: String,
}

/// Reference to a declared name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NameRef {
    pub name: String,
}

macro_rules! variants {
    ($($v:ident),* $(,)?) => {
        $(
            impl AstClass for $v {
                type Kind = OutlineKind;
            }

            impl AstVariant for $v {
                const KIND: OutlineKind = OutlineKind::$v;
            }

            impl From<$v> for OutlineNode {
                fn from(v: $v) -> Self {
                    OutlineNode::$v(v)
                }
            }
        )*

        /// Payload of an outline AST node.
        #[derive(Debug, Clone, PartialEq, Eq)]
        pub enum OutlineNode {
            $($v($v),)*
        }

        impl AstPayload for OutlineNode {
            fn kind(&self) -> OutlineKind {
                match self {
                    $(OutlineNode::$v(_) => OutlineKind::$v,)*
                }
            }

            fn children(&self) -> Vec<NodeId> {
                match self {
                    OutlineNode::Root(n) => n.items.clone(),
                    OutlineNode::DataDecl(n) => vec![n.expr],
                    OutlineNode::Block(n) => n.body.clone(),
                    OutlineNode::LogOr(n) => vec![n.lhs, n.rhs],
                    _ => Vec::new(),
                }
            }
        }
    };
}

variants!(Root, DataDecl, Block, LogOr, BoolLiteral, StrLiteral, NameRef);

impl AstClass for OutlineNode {
    type Kind = OutlineKind;
}

impl OutlineNode {
    /// Short one-line description used by the tree printer.
    pub fn label(&self) -> std::string::String {
        match self {
            OutlineNode::Root(_) => "Root".to_owned(),
            OutlineNode::DataDecl(n) => format!("DataDecl {}", n.name),
            OutlineNode::Block(n) => format!("Block {}", n.name),
            OutlineNode::LogOr(_) => "LogOr".to_owned(),
            OutlineNode::BoolLiteral(n) => format!("BoolLiteral {}", n.value),
            OutlineNode::StrLiteral(n) => format!("StrLiteral {:?}", n.value.as_str()),
            OutlineNode::NameRef(n) => format!("NameRef {}", n.name),
        }
    }
}

/// Indented tree view of the subtree rooted at `root`, one node per line,
/// each followed by its location.
pub fn render_tree(ast: &Ast<OutlineNode>, root: NodeId) -> TreeDisplay<'_> {
    TreeDisplay { ast, root }
}

/// [`Display`](fmt::Display) adapter returned by [`render_tree`].
#[derive(Debug, Clone, Copy)]
pub struct TreeDisplay<'a> {
    ast: &'a Ast<OutlineNode>,
    root: NodeId,
}

impl fmt::Display for TreeDisplay<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let base = self.ast.depth(self.root);
        for id in self.ast.descendants(self.root) {
            let indent = 2 * (self.ast.depth(id) - base);
            writeln!(
                f,
                "{:indent$}{} {}",
                "",
                self.ast.payload(id).label(),
                self.ast.loc(id),
                indent = indent
            )?;
        }
        Ok(())
    }
}
