use crate::application_port::RelationError;
use sqlx::mysql::MySqlDatabaseError;

const ER_NO_REFERENCED_ROW: u16 = 1216;
const ER_NO_REFERENCED_ROW_2: u16 = 1452;

/// Which column of a relationship row pointed at a missing account.
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub enum ForeignKeyViolation {
    Owner,
    Counterparty,
    Unknown,
}

pub fn foreign_key_violation(err: &sqlx::Error) -> Option<ForeignKeyViolation> {
    if let sqlx::Error::Database(db) = err {
        if let Some(mysql_err) = db.try_downcast_ref::<MySqlDatabaseError>() {
            return parse_foreign_key_violation(mysql_err.number(), mysql_err.message());
        }
    }

    None
}

pub fn parse_foreign_key_violation(number: u16, message: &str) -> Option<ForeignKeyViolation> {
    if number != ER_NO_REFERENCED_ROW && number != ER_NO_REFERENCED_ROW_2 {
        return None;
    }

    if message.contains("`fk_relationship_owner`") || message.contains("(`owner_id`)") {
        Some(ForeignKeyViolation::Owner)
    } else if message.contains("`fk_relationship_counterparty`")
        || message.contains("(`counterparty_id`)")
    {
        Some(ForeignKeyViolation::Counterparty)
    } else {
        Some(ForeignKeyViolation::Unknown)
    }
}

pub fn internal(context: &'static str) -> impl Fn(sqlx::Error) -> RelationError {
    move |e| RelationError::Internal(format!("{context}: {e}"))
}
