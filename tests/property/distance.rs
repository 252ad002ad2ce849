//! Edit distance is a metric on strings

use disc_catalog::search::edit_distance;
use proptest::prelude::*;

proptest! {
    #[test]
    fn distance_to_self_is_zero(s in "\\PC{0,24}") {
        prop_assert_eq!(edit_distance(&s, &s), 0);
    }

    #[test]
    fn distance_is_symmetric(a in "\\PC{0,16}", b in "\\PC{0,16}") {
        prop_assert_eq!(edit_distance(&a, &b), edit_distance(&b, &a));
    }

    #[test]
    fn distance_is_bounded_by_lengths(a in "[a-z.]{0,16}", b in "[a-z.]{0,16}") {
        let d = edit_distance(&a, &b);
        prop_assert!(d >= a.len().abs_diff(b.len()));
        prop_assert!(d <= a.len().max(b.len()));
    }

    #[test]
    fn triangle_inequality(a in "[ab]{0,8}", b in "[ab]{0,8}", c in "[ab]{0,8}") {
        prop_assert!(edit_distance(&a, &c) <= edit_distance(&a, &b) + edit_distance(&b, &c));
    }

    #[test]
    fn one_insertion_is_distance_one(s in "[a-z]{1,12}", at in 0usize..12, ch in "[0-9]") {
        let at = at.min(s.len());
        let mut edited = s.clone();
        edited.insert_str(at, &ch);
        prop_assert_eq!(edit_distance(&s, &edited), 1);
    }
}
