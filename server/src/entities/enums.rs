//! Enums condivisi tra le entità e mappati come TEXT nel database

use serde::{Deserialize, Serialize};
use std::fmt;

/// Ruolo amministrativo di un membro
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, sqlx::Type)]
#[sqlx(rename_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum Role {
    Admin,
    Organiser,
}

/// Tipo di risorsa su cui un ruolo può essere concesso
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, sqlx::Type)]
#[sqlx(rename_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum ResourceType {
    Chapter,
}

/// Pubblico di un workshop: usato sia per le iscrizioni ai capitoli sia per gli inviti.
/// Nei path HTTP compare al plurale (`students`, `coaches`).
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, Hash, sqlx::Type)]
#[sqlx(rename_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum Audience {
    #[serde(alias = "students")]
    Student,
    #[serde(alias = "coaches")]
    Coach,
}

impl Audience {
    pub fn plural(&self) -> &'static str {
        match self {
            Audience::Student => "students",
            Audience::Coach => "coaches",
        }
    }

    /// Etichetta usata nei pulsanti e nelle intestazioni
    pub fn heading(&self) -> &'static str {
        match self {
            Audience::Student => "Students",
            Audience::Coach => "Coaches",
        }
    }
}

impl fmt::Display for Audience {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Audience::Student => write!(f, "student"),
            Audience::Coach => write!(f, "coach"),
        }
    }
}

#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, sqlx::Type)]
#[sqlx(rename_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum InvitationStatus {
    Pending,
    Attending,
    Declined,
}

impl fmt::Display for InvitationStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            InvitationStatus::Pending => write!(f, "pending"),
            InvitationStatus::Attending => write!(f, "attending"),
            InvitationStatus::Declined => write!(f, "declined"),
        }
    }
}
