//! Workshop entity - Evento di un capitolo

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

#[derive(Serialize, Deserialize, Debug, Clone, sqlx::FromRow)]
pub struct Workshop {
    pub workshop_id: i64,
    pub chapter_id: i64,
    pub date_and_time: DateTime<Utc>, // inizio del workshop
    pub ends_at: Option<DateTime<Utc>>,
    pub host_id: Option<i64>, // sponsor che ospita il workshop
    pub description: Option<String>,
}
