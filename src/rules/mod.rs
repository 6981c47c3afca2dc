//! Rule evaluation and URL rewriting for browser-intercept.
//!
//! This module handles:
//! - Folding host-matching rules into a browser selection and query filters
//! - Filtering query parameters and rebuilding the target URL

pub mod evaluator;
pub mod rewriter;

pub use evaluator::{QueryFilter, ResolvedState, evaluate};
pub use rewriter::{filter_query, is_key_included, query_pairs, rebuild_url};
