use super::Transition;
use crate::application_port::*;
use crate::domain_model::*;
use crate::domain_port::*;
use crate::logger::*;
use std::sync::Arc;

pub struct RealRelationshipService {
    relationship_repo: Arc<dyn RelationshipRepo>,
    account_repo: Arc<dyn AccountRepo>,
    policy: RelationPolicy,
}

impl RealRelationshipService {
    pub fn new(
        relationship_repo: Arc<dyn RelationshipRepo>,
        account_repo: Arc<dyn AccountRepo>,
        policy: RelationPolicy,
    ) -> Self {
        Self {
            relationship_repo,
            account_repo,
            policy,
        }
    }

    async fn run(&self, transition: Transition) -> Result<(), RelationError> {
        let pair = transition.pair();
        let policy = self.policy;
        let planner = |snapshot: &PairSnapshot| transition.plan(snapshot, &policy);

        let applied = self
            .relationship_repo
            .mutate_pair(pair, &planner)
            .await
            .inspect_err(|e| {
                if let RelationError::Internal(_) = e {
                    warn!(transition = transition.name(), first = %pair.first, second = %pair.second, "store failure: {e}");
                }
            })?;

        if applied == 0 {
            debug!(transition = transition.name(), first = %pair.first, second = %pair.second, "nothing to do");
        } else {
            info!(transition = transition.name(), first = %pair.first, second = %pair.second, writes = applied);
        }

        Ok(())
    }
}

#[async_trait::async_trait]
impl RelationshipService for RealRelationshipService {
    async fn add_friend(&self, requester: UserId, recipient: UserId) -> Result<(), RelationError> {
        self.run(Transition::AddFriend {
            requester,
            recipient,
        })
        .await
    }

    async fn accept_friend(
        &self,
        recipient: UserId,
        requester: UserId,
    ) -> Result<(), RelationError> {
        self.run(Transition::AcceptFriend {
            recipient,
            requester,
        })
        .await
    }

    async fn reject_friend(
        &self,
        recipient: UserId,
        requester: UserId,
    ) -> Result<(), RelationError> {
        self.run(Transition::RejectFriend {
            recipient,
            requester,
        })
        .await
    }

    async fn remove_friend(
        &self,
        owner: UserId,
        counterparty: UserId,
    ) -> Result<(), RelationError> {
        self.run(Transition::RemoveFriend {
            owner,
            counterparty,
        })
        .await
    }

    async fn block_friend(&self, owner: UserId, counterparty: UserId) -> Result<(), RelationError> {
        self.run(Transition::BlockFriend {
            owner,
            counterparty,
        })
        .await
    }

    async fn unblock_friend(
        &self,
        owner: UserId,
        counterparty: UserId,
    ) -> Result<(), RelationError> {
        self.run(Transition::UnblockFriend {
            owner,
            counterparty,
        })
        .await
    }

    async fn get_friends(&self, owner: UserId) -> Result<Vec<FriendSummary>, RelationError> {
        let friends = self.relationship_repo.list_visible(owner).await?;
        if !friends.is_empty() {
            return Ok(friends);
        }

        if self.policy.empty_list_is_not_found {
            return Err(RelationError::friends_not_found(owner));
        }
        if !self.account_repo.exists(owner).await? {
            return Err(RelationError::user_not_found(owner));
        }

        Ok(friends)
    }
}
