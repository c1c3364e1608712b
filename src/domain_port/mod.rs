mod account_repo;
mod relationship_repo;

pub use account_repo::*;
pub use relationship_repo::*;
