//! Chapter entity - Capitolo (unità regionale che organizza i workshop)

use serde::{Deserialize, Serialize};

#[derive(Serialize, Deserialize, Debug, Clone, sqlx::FromRow)]
pub struct Chapter {
    pub chapter_id: i64,
    pub name: String,
    pub city: Option<String>,
    pub email: Option<String>,
}
