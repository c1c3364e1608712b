use crate::application_port::*;
use crate::domain_model::*;

/// Computes the writes for a pair from its current state, or rejects the transition.
pub type Planner<'a> =
    dyn Fn(&PairSnapshot) -> Result<Vec<RowWrite>, RelationError> + Send + Sync + 'a;

#[async_trait::async_trait]
pub trait RelationshipRepo: Send + Sync {
    /// Locks both directed rows of `pair`, runs `planner` against them and applies every
    /// returned write in one atomic unit. Returns the number of writes applied; zero means
    /// the planner decided there was nothing to do.
    ///
    /// A write referencing an account that does not exist fails with `NotFound` naming
    /// that account, and nothing of the plan is kept.
    async fn mutate_pair(
        &self,
        pair: DirectedPair,
        planner: &Planner<'_>,
    ) -> Result<usize, RelationError>;

    /// Accepted/blocked rows owned by `owner` plus pending rows addressed to `owner`,
    /// joined with the live counterparty account. Ordered by username descending, then
    /// by counterparty id.
    async fn list_visible(&self, owner: UserId) -> Result<Vec<FriendSummary>, RelationError>;
}
