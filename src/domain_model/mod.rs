mod friend;
mod relationship;
mod user;

pub use friend::*;
pub use relationship::*;
pub use user::*;
