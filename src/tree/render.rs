//! Text outline of a catalog tree for drivers without a tree widget

use crate::tree::node::Node;
use crate::tree::traversal;
use std::fmt::Write;
use std::ops::ControlFlow;

const INDENT: usize = 4;

/// Render an indented outline.
///
/// The root shows its bare name; every other line is `(yyyy-MM-dd) name`,
/// indented by depth.
pub fn outline(root: &Node) -> String {
    let mut out = String::new();
    traversal::walk::<()>(root, |node, ancestors| {
        let depth = ancestors.len();
        if depth == 0 {
            let _ = writeln!(out, "{}", node.name);
        } else {
            let _ = writeln!(
                out,
                "{:indent$}({}) {}",
                "",
                node.timestamp.format("%Y-%m-%d"),
                node.name,
                indent = depth * INDENT
            );
        }
        ControlFlow::Continue(())
    });
    out
}
