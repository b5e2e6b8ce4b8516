//! WorkshopInvitation entity - Invito di un membro ad un workshop

use super::enums::{Audience, InvitationStatus};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

#[derive(Serialize, Deserialize, Debug, Clone, sqlx::FromRow)]
pub struct WorkshopInvitation {
    pub invitation_id: i64,
    pub workshop_id: i64,
    pub member_id: i64,
    pub role: Audience, // invitato come studente o come coach
    pub status: InvitationStatus,
    pub created_at: DateTime<Utc>,
    pub emailed_at: Option<DateTime<Utc>>, // None finché l'email non è stata consegnata
}
