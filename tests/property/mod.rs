//! Property-based tests for ordering, distance and codec guarantees

mod codec;
mod distance;
mod ordering;
