//! Sorting yields ordered siblings at every depth and keeps ties stable

use chrono::{DateTime, Duration, TimeZone, Utc};
use disc_catalog::sort::sort_tree;
use disc_catalog::tree::traversal;
use disc_catalog::{Node, SortOrder};
use proptest::prelude::*;
use std::ops::ControlFlow;

fn stamp(offset: i64) -> DateTime<Utc> {
    Utc.timestamp_opt(1_600_000_000, 0).unwrap() + Duration::hours(offset)
}

fn arb_tree() -> impl Strategy<Value = Node> {
    let leaf = ("[a-zA-Z]{1,4}", 0i64..6).prop_map(|(name, t)| Node::file(name, stamp(t)));
    leaf.prop_recursive(4, 48, 6, |inner| {
        ("[a-zA-Z]{1,4}", 0i64..6, prop::collection::vec(inner, 0..6)).prop_map(
            |(name, t, children)| {
                let mut dir = Node::directory(name, stamp(t));
                dir.children = children;
                dir
            },
        )
    })
}

fn siblings_ordered(root: &Node, order: SortOrder) -> bool {
    traversal::walk(root, |node, _| {
        let ok = node.children.windows(2).all(|pair| match order {
            SortOrder::Name => pair[0].name <= pair[1].name,
            SortOrder::Date => pair[0].timestamp <= pair[1].timestamp,
        });
        if ok {
            ControlFlow::Continue(())
        } else {
            ControlFlow::Break(())
        }
    })
    .is_none()
}

proptest! {
    #[test]
    fn sorted_by_name_at_every_depth(mut tree in arb_tree()) {
        let before = traversal::stats(&tree);
        sort_tree(&mut tree, SortOrder::Name);
        prop_assert!(siblings_ordered(&tree, SortOrder::Name));
        prop_assert_eq!(traversal::stats(&tree), before);
    }

    #[test]
    fn sorted_by_date_at_every_depth(mut tree in arb_tree()) {
        sort_tree(&mut tree, SortOrder::Date);
        prop_assert!(siblings_ordered(&tree, SortOrder::Date));
    }

    #[test]
    fn date_sort_is_stable(names in prop::collection::vec("[a-z]{1,3}", 1..12)) {
        let mut root = Node::directory("/", stamp(0));
        for name in &names {
            root.children.push(Node::file(name.clone(), stamp(1)));
        }
        sort_tree(&mut root, SortOrder::Date);
        let after: Vec<_> = root.children.iter().map(|c| c.name.clone()).collect();
        prop_assert_eq!(after, names);
    }

    #[test]
    fn sorting_twice_changes_nothing(mut tree in arb_tree()) {
        sort_tree(&mut tree, SortOrder::Name);
        let once = tree.clone();
        sort_tree(&mut tree, SortOrder::Name);
        prop_assert_eq!(tree, once);
    }
}
