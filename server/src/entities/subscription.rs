//! Subscription entity - Iscrizione di un membro ad un capitolo

use super::enums::Audience;
use serde::{Deserialize, Serialize};

#[derive(Serialize, Deserialize, Debug, Clone, sqlx::FromRow)]
pub struct Subscription {
    pub member_id: i64,
    pub chapter_id: i64,
    pub role: Audience,
}
