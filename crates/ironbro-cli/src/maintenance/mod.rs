//! Site maintenance chores: theme script injection and the brace lint

mod braces;
mod inject;

pub use braces::check_braces;
pub use inject::{run_injection, InjectionSummary};
