//! Walks two accounts through the whole relationship lifecycle on the memory
//! backend and prints what each side sees after every step.

use amity::application_impl::RealRelationshipService;
use amity::application_port::{RelationPolicy, RelationshipService};
use amity::domain_model::UserId;
use amity::infra_memory::*;
use amity::logger::*;
use std::sync::Arc;

async fn show(service: &dyn RelationshipService, who: &str, user_id: UserId) {
    match service.get_friends(user_id).await {
        Ok(friends) => {
            let view: Vec<String> = friends
                .iter()
                .map(|f| format!("{}:{}", f.username, f.status))
                .collect();
            println!("  {who} sees {view:?}");
        }
        Err(e) => println!("  {who} sees error: {e}"),
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let logger = Logger::new_bootstrap();
    logger.reload("amity=debug")?;

    let db = Arc::new(MemoryDatabase::new());
    let (john, kate) = (UserId::new_v4(), UserId::new_v4());
    db.insert_account(john, "john", 1)?;
    db.insert_account(kate, "kate", 2)?;

    let service = RealRelationshipService::new(
        Arc::new(MemoryRelationshipRepo::new(db.clone())),
        Arc::new(MemoryAccountRepo::new(db.clone())),
        RelationPolicy::default(),
    );

    println!("john -> kate: add");
    service.add_friend(john, kate).await?;
    show(&service, "john", john).await;
    show(&service, "kate", kate).await;

    println!("kate accepts john");
    service.accept_friend(kate, john).await?;
    show(&service, "john", john).await;
    show(&service, "kate", kate).await;

    println!("john blocks kate");
    service.block_friend(john, kate).await?;
    show(&service, "kate", kate).await;

    println!("john unblocks kate");
    service.unblock_friend(john, kate).await?;
    show(&service, "kate", kate).await;

    println!("kate removes john");
    service.remove_friend(kate, john).await?;
    println!("  rows left: {}", db.relationship_rows()?.len());

    Ok(())
}
