//! Sponsor entity - Partner esterno che ospita o sponsorizza i workshop

use serde::{Deserialize, Serialize};

#[derive(Serialize, Deserialize, Debug, Clone, sqlx::FromRow)]
pub struct Sponsor {
    pub sponsor_id: i64,
    pub name: String,
    pub website: Option<String>,
}
