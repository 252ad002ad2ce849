//! Merge rules for config composition

pub mod merge_policy;
