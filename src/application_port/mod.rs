mod identity;
mod relationship_service;

pub use identity::*;
pub use relationship_service::*;
