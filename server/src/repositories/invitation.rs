//! InvitationRepository - Repository per gli inviti ai workshop e i partecipanti

use super::{Read, Update};
use crate::dtos::{AttendeeDTO, CreateInvitationDTO, InvitationSummary, UpdateInvitationDTO};
use crate::entities::{InvitationStatus, WorkshopInvitation};
use chrono::Utc;
use sqlx::{Error, SqlitePool};

const INVITATION_COLUMNS: &str =
    "invitation_id, workshop_id, member_id, role, status, created_at, emailed_at";

pub struct InvitationRepository {
    connection_pool: SqlitePool,
}

impl InvitationRepository {
    pub fn new(connection_pool: SqlitePool) -> Self {
        Self { connection_pool }
    }

    /// Crea l'invito solo se il membro non è già stato invitato con lo stesso ruolo.
    /// Ritorna `None` se l'invito esisteva già.
    pub async fn create_if_absent(
        &self,
        data: &CreateInvitationDTO,
    ) -> Result<Option<WorkshopInvitation>, Error> {
        let now = Utc::now();
        let result = sqlx::query(
            r#"
            INSERT OR IGNORE INTO workshop_invitations (workshop_id, member_id, role, status, created_at)
            VALUES (?, ?, ?, ?, ?)
            "#,
        )
        .bind(data.workshop_id)
        .bind(data.member_id)
        .bind(data.role)
        .bind(InvitationStatus::Pending)
        .bind(now)
        .execute(&self.connection_pool)
        .await?;

        if result.rows_affected() == 0 {
            return Ok(None);
        }

        Ok(Some(WorkshopInvitation {
            invitation_id: result.last_insert_rowid(),
            workshop_id: data.workshop_id,
            member_id: data.member_id,
            role: data.role,
            status: InvitationStatus::Pending,
            created_at: now,
            emailed_at: None,
        }))
    }

    /// Invito ancora `pending` la cui email non è mai stata consegnata
    pub async fn find_unsent(
        &self,
        data: &CreateInvitationDTO,
    ) -> Result<Option<WorkshopInvitation>, Error> {
        let invitation = sqlx::query_as::<_, WorkshopInvitation>(&format!(
            r#"
            SELECT {INVITATION_COLUMNS} FROM workshop_invitations
            WHERE workshop_id = ? AND member_id = ? AND role = ? AND status = ? AND emailed_at IS NULL
            "#
        ))
        .bind(data.workshop_id)
        .bind(data.member_id)
        .bind(data.role)
        .bind(InvitationStatus::Pending)
        .fetch_optional(&self.connection_pool)
        .await?;

        Ok(invitation)
    }

    pub async fn mark_emailed(&self, invitation_id: &i64) -> Result<(), Error> {
        sqlx::query("UPDATE workshop_invitations SET emailed_at = ? WHERE invitation_id = ?")
            .bind(Utc::now())
            .bind(invitation_id)
            .execute(&self.connection_pool)
            .await?;
        Ok(())
    }

    /// Membri con invito `attending`: studenti prima dei coach, poi per cognome e nome
    pub async fn find_attendees(&self, workshop_id: &i64) -> Result<Vec<AttendeeDTO>, Error> {
        let attendees = sqlx::query_as::<_, AttendeeDTO>(
            r#"
            SELECT m.member_id, m.name, m.surname, m.email, i.role
            FROM workshop_invitations i
            JOIN members m ON m.member_id = i.member_id
            WHERE i.workshop_id = ? AND i.status = ?
            ORDER BY CASE i.role WHEN 'student' THEN 0 ELSE 1 END, m.surname, m.name
            "#,
        )
        .bind(workshop_id)
        .bind(InvitationStatus::Attending)
        .fetch_all(&self.connection_pool)
        .await?;

        Ok(attendees)
    }

    /// Numero di inviti per stato
    pub async fn summarize(&self, workshop_id: &i64) -> Result<InvitationSummary, Error> {
        let rows: Vec<(InvitationStatus, i64)> = sqlx::query_as(
            "SELECT status, COUNT(*) FROM workshop_invitations WHERE workshop_id = ? GROUP BY status",
        )
        .bind(workshop_id)
        .fetch_all(&self.connection_pool)
        .await?;

        let mut summary = InvitationSummary::default();
        for (status, count) in rows {
            let count = count as usize;
            match status {
                InvitationStatus::Pending => summary.pending = count,
                InvitationStatus::Attending => summary.attending = count,
                InvitationStatus::Declined => summary.declined = count,
            }
        }

        Ok(summary)
    }

    pub async fn find_many_by_workshop_id(
        &self,
        workshop_id: &i64,
    ) -> Result<Vec<WorkshopInvitation>, Error> {
        let invitations = sqlx::query_as::<_, WorkshopInvitation>(&format!(
            "SELECT {INVITATION_COLUMNS} FROM workshop_invitations WHERE workshop_id = ? ORDER BY invitation_id"
        ))
        .bind(workshop_id)
        .fetch_all(&self.connection_pool)
        .await?;

        Ok(invitations)
    }
}

impl Read<WorkshopInvitation, i64> for InvitationRepository {
    async fn read(&self, id: &i64) -> Result<Option<WorkshopInvitation>, Error> {
        let invitation = sqlx::query_as::<_, WorkshopInvitation>(&format!(
            "SELECT {INVITATION_COLUMNS} FROM workshop_invitations WHERE invitation_id = ?"
        ))
        .bind(id)
        .fetch_optional(&self.connection_pool)
        .await?;

        Ok(invitation)
    }
}

impl Update<WorkshopInvitation, UpdateInvitationDTO, i64> for InvitationRepository {
    async fn update(&self, id: &i64, data: &UpdateInvitationDTO) -> Result<WorkshopInvitation, Error> {
        // First, get the current invitation to ensure it exists
        let current_invitation = self.read(id).await?.ok_or(Error::RowNotFound)?;

        // If no state to update, return current invitation
        let Some(status) = data.status else {
            return Ok(current_invitation);
        };

        sqlx::query("UPDATE workshop_invitations SET status = ? WHERE invitation_id = ?")
            .bind(status)
            .bind(id)
            .execute(&self.connection_pool)
            .await?;

        // Fetch and return the updated invitation
        self.read(id).await?.ok_or(Error::RowNotFound)
    }
}
