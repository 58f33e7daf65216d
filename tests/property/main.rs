//! Property-based tests for the match rule and scoring.
//!
//! Run with: `cargo test --test property`

mod matcher;
