pub mod analysis;
pub mod diag;
pub mod ident;
pub mod tree;
pub mod types;

#[cfg(test)]
#[path = "tests/tree_test_utils.rs"]
mod tree_test_utils;
