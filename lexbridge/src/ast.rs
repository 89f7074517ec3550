//! Arena-backed abstract syntax trees with closed kind tagging.
//!
//! A grammar declares a closed `Kind` enum (implementing [`NodeKind`]), one
//! struct per node variant (implementing [`AstVariant`] with its fixed
//! `KIND`), and a payload enum wrapping all variants (implementing
//! [`AstPayload`]). Nodes live in an [`Ast`] arena and are addressed by
//! [`NodeId`].
//!
//! Two graphs coincide in shape but are tracked separately:
//!
//! - the *structural* graph: each [`AstNode`] records its parent and its
//!   children as ids, used for root-finding and traversal;
//! - the *ownership* graph: a variant stores the ids of the children it
//!   exclusively owns (an expression operand, a block body) in its own
//!   fields, typed the way the grammar needs them.
//!
//! A root is a node whose parent is itself. [`Ast::insert`] attaches the
//! children a payload reports, so building a node from already-built
//! children links the structural graph automatically.
//!
//! # Example
//!
//! ```rust
//! # use lexbridge::{Ast, AstClass, AstPayload, AstVariant, NodeId, NodeKind, TextLoc};
//! #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
//! enum Kind { Lit, Pair }
//! impl NodeKind for Kind {}
//!
//! #[derive(Debug)]
//! enum Node { Lit(bool), Pair(NodeId, NodeId) }
//! impl AstClass for Node { type Kind = Kind; }
//! impl AstPayload for Node {
//!     fn kind(&self) -> Kind {
//!         match self { Node::Lit(_) => Kind::Lit, Node::Pair(..) => Kind::Pair }
//!     }
//!     fn children(&self) -> Vec<NodeId> {
//!         match self { Node::Pair(a, b) => vec![*a, *b], _ => vec![] }
//!     }
//! }
//!
//! let mut ast = Ast::new();
//! let a = ast.insert(TextLoc::new(1, 1, 1, 4), Node::Lit(true));
//! let b = ast.insert(TextLoc::new(1, 6, 1, 10), Node::Lit(false));
//! let loc = TextLoc::span(&ast.loc(a), &ast.loc(b));
//! let pair = ast.insert(loc, Node::Pair(a, b));
//!
//! assert!(ast.is_root(pair));
//! assert_eq!(ast.parent(a), pair);
//! assert_eq!(ast.root(b), pair);
//! assert_eq!(ast.children_span(pair), Some(loc));
//! ```

use crate::loc::TextLoc;
use indexmap::IndexSet;
use std::fmt::Debug;
use std::hash::Hash;

/// A closed enumeration of node kinds.
pub trait NodeKind: Copy + Eq + Hash + Debug {}

/// Membership in a node family: implemented by the base [`AstNode`], by the
/// payload enum, and by every variant struct.
pub trait AstClass {
    type Kind: NodeKind;
}

/// A strict node variant: a member of the family that is not the base and
/// has a fixed kind.
pub trait AstVariant: AstClass {
    const KIND: Self::Kind;
}

/// The payload stored with each node, usually an enum over all variants.
pub trait AstPayload: AstClass {
    /// Kind of this payload. Must equal `T::KIND` for the variant `T` it
    /// wraps.
    fn kind(&self) -> Self::Kind;

    /// Ids of the children this payload owns, in document order.
    fn children(&self) -> Vec<NodeId> {
        Vec::new()
    }
}

/// Kind of a variant type, without an instance.
#[inline]
pub fn kind_of<T: AstVariant>() -> T::Kind {
    T::KIND
}

/// Index of a node in its [`Ast`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(usize);

impl NodeId {
    #[inline]
    pub fn index(self) -> usize {
        self.0
    }
}

/// Structural record shared by every node, whatever its variant.
#[derive(Debug, Clone)]
pub struct AstNode<K> {
    kind: K,
    parent: NodeId,
    children: IndexSet<NodeId>,
    loc: TextLoc,
}

impl<K: NodeKind> AstClass for AstNode<K> {
    type Kind = K;
}

impl<K: NodeKind> AstNode<K> {
    #[inline]
    pub fn kind(&self) -> K {
        self.kind
    }

    /// Parent id; equal to the node's own id for a root.
    #[inline]
    pub fn parent(&self) -> NodeId {
        self.parent
    }

    /// Children in attach order. Each child appears once.
    #[inline]
    pub fn children(&self) -> &IndexSet<NodeId> {
        &self.children
    }

    #[inline]
    pub fn loc(&self) -> TextLoc {
        self.loc
    }
}

/// An arena of nodes with payloads of type `V`.
#[derive(Debug, Clone)]
pub struct Ast<V: AstPayload> {
    nodes: Vec<AstNode<V::Kind>>,
    payloads: Vec<V>,
}

impl<V: AstPayload> Default for Ast<V> {
    fn default() -> Self {
        Self::new()
    }
}

impl<V: AstPayload> Ast<V> {
    pub fn new() -> Self {
        Self {
            nodes: Vec::new(),
            payloads: Vec::new(),
        }
    }

    /// Number of nodes in the arena.
    #[inline]
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Adds a node. It starts as its own root; the children reported by
    /// `payload` are then attached to it in order.
    ///
    /// # Panics
    ///
    /// Panics if any reported child already has a parent, as for
    /// [`attach`](Self::attach).
    pub fn insert(&mut self, loc: TextLoc, payload: V) -> NodeId {
        let id = NodeId(self.nodes.len());
        let kind = payload.kind();
        let children = payload.children();
        self.nodes.push(AstNode {
            kind,
            parent: id,
            children: IndexSet::new(),
            loc,
        });
        self.payloads.push(payload);
        log::trace!("ast: new {:?} {:?} at {}", id, kind, loc);
        self.attach_all(id, children);
        id
    }

    /// Adds a node from a concrete variant.
    ///
    /// # Panics
    ///
    /// Panics if the payload built from `node` reports a kind other than
    /// `T::KIND`.
    pub fn add<T>(&mut self, loc: TextLoc, node: T) -> NodeId
    where
        T: AstVariant<Kind = V::Kind> + Into<V>,
    {
        let payload = node.into();
        assert_eq!(
            payload.kind(),
            T::KIND,
            "payload kind does not match variant kind"
        );
        self.insert(loc, payload)
    }

    /// Makes `child` a structural child of `parent`.
    ///
    /// # Panics
    ///
    /// Panics if `child` already has a parent, if `child == parent`, or if
    /// `child` is the root of `parent`'s tree (which would form a cycle).
    pub fn attach(&mut self, parent: NodeId, child: NodeId) {
        assert_ne!(parent, child, "cannot attach {child:?} to itself");
        assert!(
            self.is_root(child),
            "{child:?} is already attached to {:?}",
            self.parent(child)
        );
        assert_ne!(
            self.root(parent),
            child,
            "attaching {child:?} under {parent:?} would form a cycle"
        );
        self.nodes[child.0].parent = parent;
        self.nodes[parent.0].children.insert(child);
    }

    /// Attaches each of `children` to `parent`, in order.
    pub fn attach_all(&mut self, parent: NodeId, children: impl IntoIterator<Item = NodeId>) {
        for child in children {
            self.attach(parent, child);
        }
    }

    #[inline]
    pub fn node(&self, id: NodeId) -> &AstNode<V::Kind> {
        &self.nodes[id.0]
    }

    #[inline]
    pub fn payload(&self, id: NodeId) -> &V {
        &self.payloads[id.0]
    }

    #[inline]
    pub fn kind(&self, id: NodeId) -> V::Kind {
        self.nodes[id.0].kind
    }

    #[inline]
    pub fn loc(&self, id: NodeId) -> TextLoc {
        self.nodes[id.0].loc
    }

    #[inline]
    pub fn parent(&self, id: NodeId) -> NodeId {
        self.nodes[id.0].parent
    }

    /// Children of `id` in attach order.
    pub fn children(&self, id: NodeId) -> impl Iterator<Item = NodeId> + '_ {
        self.nodes[id.0].children.iter().copied()
    }

    #[inline]
    pub fn is_root(&self, id: NodeId) -> bool {
        self.nodes[id.0].parent == id
    }

    /// Follows parent links up to the root of `id`'s tree.
    pub fn root(&self, mut id: NodeId) -> NodeId {
        while !self.is_root(id) {
            id = self.nodes[id.0].parent;
        }
        id
    }

    /// Number of parent links between `id` and its root.
    pub fn depth(&self, mut id: NodeId) -> usize {
        let mut depth = 0;
        while !self.is_root(id) {
            id = self.nodes[id.0].parent;
            depth += 1;
        }
        depth
    }

    /// Span from the first to the last child, or `None` without children.
    pub fn children_span(&self, id: NodeId) -> Option<TextLoc> {
        let children = &self.nodes[id.0].children;
        let first = children.first()?;
        let last = children.last()?;
        Some(TextLoc::span(&self.loc(*first), &self.loc(*last)))
    }

    /// Pre-order traversal of the subtree rooted at `id`, `id` first.
    pub fn descendants(&self, id: NodeId) -> Vec<NodeId> {
        let mut out = Vec::new();
        let mut stack = vec![id];
        while let Some(n) = stack.pop() {
            out.push(n);
            stack.extend(self.nodes[n.0].children.iter().rev().copied());
        }
        out
    }

    /// Ids of all nodes of variant `T`, in insertion order.
    pub fn nodes_of<T>(&self) -> impl Iterator<Item = NodeId> + '_
    where
        T: AstVariant<Kind = V::Kind>,
    {
        self.iter()
            .filter(|(_, node)| node.kind == T::KIND)
            .map(|(id, _)| id)
    }

    /// All roots in the arena, in insertion order.
    pub fn roots(&self) -> impl Iterator<Item = NodeId> + '_ {
        self.iter()
            .filter(|(id, node)| node.parent == *id)
            .map(|(id, _)| id)
    }

    pub fn iter(&self) -> impl Iterator<Item = (NodeId, &AstNode<V::Kind>)> + '_ {
        self.nodes.iter().enumerate().map(|(i, n)| (NodeId(i), n))
    }
}
