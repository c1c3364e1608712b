//! Process-local backend with the same atomicity and referential rules as MySQL.
//! Used by the `memory` store backend, the demo binary and the tests.

mod account_repo_memory;
mod database;
mod relationship_repo_memory;

pub use account_repo_memory::*;
pub use database::*;
pub use relationship_repo_memory::*;
