//! Depth-first traversal shared by sorting, searching and persistence.
//!
//! Both walkers visit nodes in pre-order: a node before its children, and
//! children in their current list order. The walk is iterative so very deep
//! volumes do not exhaust the call stack.

use crate::tree::node::{Node, NodeKind};
use std::ops::ControlFlow;

/// Walk a tree in pre-order.
///
/// The visitor receives each node together with its ancestors (root first,
/// parent last). Returning `ControlFlow::Break` stops the walk and the break
/// value is returned.
pub fn walk<'a, B>(
    root: &'a Node,
    mut visit: impl FnMut(&'a Node, &[&'a Node]) -> ControlFlow<B>,
) -> Option<B> {
    let mut stack: Vec<(&'a Node, usize)> = vec![(root, 0)];
    let mut ancestors: Vec<&'a Node> = Vec::new();

    while let Some((node, depth)) = stack.pop() {
        ancestors.truncate(depth);
        if let ControlFlow::Break(value) = visit(node, &ancestors) {
            return Some(value);
        }
        ancestors.push(node);
        stack.extend(node.children.iter().rev().map(|child| (child, depth + 1)));
    }

    None
}

/// Walk a tree in pre-order with mutable access.
///
/// Children are pushed after the visitor returns, so a visitor that reorders
/// `children` determines the order its subtree is walked in.
pub fn walk_mut(root: &mut Node, mut visit: impl FnMut(&mut Node)) {
    let mut stack: Vec<&mut Node> = vec![root];
    while let Some(node) = stack.pop() {
        visit(node);
        stack.extend(node.children.iter_mut().rev());
    }
}

/// Node counts of a tree
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TreeStats {
    pub directories: usize,
    pub files: usize,
}

impl TreeStats {
    pub fn total(&self) -> usize {
        self.directories + self.files
    }
}

/// Count directories and files, the root included
pub fn stats(root: &Node) -> TreeStats {
    let mut stats = TreeStats::default();
    walk::<()>(root, |node, _| {
        match node.kind {
            NodeKind::Directory => stats.directories += 1,
            NodeKind::File => stats.files += 1,
        }
        ControlFlow::Continue(())
    });
    stats
}
