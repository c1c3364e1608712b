mod identity_fake;
mod identity_jwt;
mod relationship_service_impl;
mod transition;

pub use identity_fake::*;
pub use identity_jwt::*;
pub use relationship_service_impl::*;
pub use transition::*;
