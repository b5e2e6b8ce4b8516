//! Invitation DTOs - Inviti ai workshop e lista partecipanti

use crate::entities::{Audience, InvitationStatus};
use serde::{Deserialize, Serialize};

/// DTO per creare un nuovo invito (stato iniziale `Pending`)
#[derive(Debug, Clone)]
pub struct CreateInvitationDTO {
    pub workshop_id: i64,
    pub member_id: i64,
    pub role: Audience,
}

/// DTO per aggiornare un invito (solo lo stato è modificabile)
#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct UpdateInvitationDTO {
    pub status: Option<InvitationStatus>,
}

/// Form inviato dall'organizzatore per registrare la risposta di un membro
#[derive(Deserialize, Debug)]
pub struct InvitationResponseForm {
    pub status: InvitationStatus,
}

/// Partecipante confermato: invito `attending` unito ai dati del membro
#[derive(Serialize, Deserialize, Debug, Clone, sqlx::FromRow)]
pub struct AttendeeDTO {
    pub member_id: i64,
    pub name: String,
    pub surname: String,
    pub email: String,
    pub role: Audience,
}

impl AttendeeDTO {
    pub fn full_name(&self) -> String {
        format!("{} {}", self.name, self.surname)
    }
}

/// Conteggio inviti per stato, mostrato nella pagina del workshop
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct InvitationSummary {
    pub pending: usize,
    pub attending: usize,
    pub declined: usize,
}
