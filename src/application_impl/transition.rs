use crate::application_port::{RelationError, RelationPolicy};
use crate::domain_model::*;

/// A relationship-mutating request, with the roles of both accounts.
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub enum Transition {
    AddFriend { requester: UserId, recipient: UserId },
    AcceptFriend { recipient: UserId, requester: UserId },
    RejectFriend { recipient: UserId, requester: UserId },
    RemoveFriend { owner: UserId, counterparty: UserId },
    BlockFriend { owner: UserId, counterparty: UserId },
    UnblockFriend { owner: UserId, counterparty: UserId },
}

impl Transition {
    pub fn name(&self) -> &'static str {
        match self {
            Transition::AddFriend { .. } => "add_friend",
            Transition::AcceptFriend { .. } => "accept_friend",
            Transition::RejectFriend { .. } => "reject_friend",
            Transition::RemoveFriend { .. } => "remove_friend",
            Transition::BlockFriend { .. } => "block_friend",
            Transition::UnblockFriend { .. } => "unblock_friend",
        }
    }

    /// Request transitions are anchored on the pending row `requester -> recipient`,
    /// symmetric ones on `owner -> counterparty`.
    pub fn pair(&self) -> DirectedPair {
        match *self {
            Transition::AddFriend {
                requester,
                recipient,
            }
            | Transition::AcceptFriend {
                recipient,
                requester,
            }
            | Transition::RejectFriend {
                recipient,
                requester,
            } => DirectedPair::new(requester, recipient),
            Transition::RemoveFriend {
                owner,
                counterparty,
            }
            | Transition::BlockFriend {
                owner,
                counterparty,
            }
            | Transition::UnblockFriend {
                owner,
                counterparty,
            } => DirectedPair::new(owner, counterparty),
        }
    }

    /// Decides the row writes for this transition given the current rows of `pair()`.
    /// An empty plan is a successful no-op.
    pub fn plan(
        &self,
        snapshot: &PairSnapshot,
        policy: &RelationPolicy,
    ) -> Result<Vec<RowWrite>, RelationError> {
        let DirectedPair {
            first: a,
            second: b,
        } = self.pair();
        if a == b {
            return Err(RelationError::InvalidArgument(format!(
                "{}: account {a} cannot be related to itself",
                self.name()
            )));
        }

        match self {
            Transition::AddFriend { .. } => {
                if snapshot.is_empty() {
                    Ok(vec![RowWrite::put(a, b, RelationStatus::Pending)])
                } else {
                    Ok(vec![])
                }
            }
            Transition::AcceptFriend { requester, .. } => {
                if snapshot.forward == Some(RelationStatus::Pending) {
                    Ok(symmetric(a, b, RelationStatus::Accepted))
                } else if policy.strict_accept {
                    Err(RelationError::user_not_found(*requester))
                } else {
                    Ok(vec![])
                }
            }
            Transition::RejectFriend { requester, .. } => {
                if snapshot.forward == Some(RelationStatus::Pending) {
                    Ok(vec![RowWrite::delete(a, b)])
                } else {
                    Err(RelationError::user_not_found(*requester))
                }
            }
            Transition::RemoveFriend { counterparty, .. } => {
                let mut writes = Vec::with_capacity(2);
                if snapshot.forward.is_some() {
                    writes.push(RowWrite::delete(a, b));
                }
                if snapshot.backward.is_some() {
                    writes.push(RowWrite::delete(b, a));
                }
                if writes.is_empty() {
                    return Err(RelationError::user_not_found(*counterparty));
                }
                Ok(writes)
            }
            Transition::BlockFriend { .. } => Ok(symmetric(a, b, RelationStatus::Blocked)),
            Transition::UnblockFriend { counterparty, .. } => {
                if snapshot.is_empty() {
                    return Err(RelationError::user_not_found(*counterparty));
                }
                if policy.strict_unblock && !snapshot.is_symmetric_with(RelationStatus::Blocked) {
                    return Err(RelationError::InvalidState {
                        expected: RelationStatus::Blocked,
                        found: snapshot.forward.or(snapshot.backward),
                    });
                }
                Ok(symmetric(a, b, RelationStatus::Accepted))
            }
        }
    }
}

fn symmetric(a: UserId, b: UserId, status: RelationStatus) -> Vec<RowWrite> {
    vec![RowWrite::put(a, b, status), RowWrite::put(b, a, status)]
}
