use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(
    Debug, Clone, Copy, Ord, PartialOrd, Eq, PartialEq, Hash, Serialize, Deserialize, sqlx::Type,
)]
#[sqlx(transparent)]
pub struct UserId(pub uuid::Uuid);

impl UserId {
    pub fn new_v4() -> Self {
        UserId(uuid::Uuid::new_v4())
    }
}

impl fmt::Display for UserId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl std::str::FromStr for UserId {
    type Err = uuid::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        uuid::Uuid::from_str(s).map(UserId)
    }
}

/// Two accounts in a fixed order. `first -> second` is the "forward" row of the pair.
#[derive(Debug, Clone, Copy, Eq, PartialEq, Hash)]
pub struct DirectedPair {
    pub first: UserId,
    pub second: UserId,
}

impl DirectedPair {
    pub fn new(first: UserId, second: UserId) -> Self {
        Self { first, second }
    }

    pub fn reversed(&self) -> Self {
        Self {
            first: self.second,
            second: self.first,
        }
    }

    pub fn is_reflexive(&self) -> bool {
        self.first == self.second
    }
}
