//! Invitation services - Invio degli inviti e registrazione delle risposte

use super::redirect_with_flash;
use super::workshop::load_workshop;
use crate::core::{AppError, AppState, Flash, Permissions};
use crate::dtos::{InvitationResponseForm, UpdateInvitationDTO};
use crate::entities::Audience;
use crate::mailer::MailJob;
use crate::repositories::{Read, Update};
use crate::views;
use crate::views::workshop::workshop_path;
use axum::{
    Extension, Form,
    extract::{Path, State},
    response::{Html, Response},
};
use axum_macros::debug_handler;
use std::sync::Arc;
use tracing::{debug, info, instrument, warn};

#[instrument(skip(state, permissions), fields(member_id = %permissions.member_id, workshop_id = %workshop_id))]
pub async fn send_invites_page(
    State(state): State<Arc<AppState>>,
    Extension(permissions): Extension<Permissions>,
    Path(workshop_id): Path<i64>,
) -> Result<Html<String>, AppError> {
    debug!("Rendering audience picker");
    let workshop = load_workshop(&state, &permissions, workshop_id).await?;
    let chapter = state
        .chapter
        .read(&workshop.chapter_id)
        .await?
        .ok_or_else(|| AppError::not_found("Chapter not found"))?;

    Ok(views::workshop::send_invites(&workshop, &chapter))
}

#[debug_handler]
#[instrument(skip(state, permissions), fields(member_id = %permissions.member_id, workshop_id = %workshop_id, audience = %audience))]
pub async fn invite_audience(
    State(state): State<Arc<AppState>>,
    Extension(permissions): Extension<Permissions>,
    Path((workshop_id, audience)): Path<(i64, Audience)>,
) -> Result<Response, AppError> {
    debug!("Queueing workshop invitations");
    // L'handler conferma solo l'accodamento: destinatari e invii sono compito del worker
    load_workshop(&state, &permissions, workshop_id).await?;

    state.mail_queue.enqueue(MailJob::WorkshopInvitations {
        workshop_id,
        audience,
    })?;

    let flash = match audience {
        Audience::Student => Flash::StudentInvitesQueued,
        Audience::Coach => Flash::CoachInvitesQueued,
    };

    info!("Invitations to {} queued", audience.plural());
    Ok(redirect_with_flash(&workshop_path(workshop_id), flash))
}

#[instrument(skip(state, permissions, body), fields(member_id = %permissions.member_id, workshop_id = %workshop_id, invitation_id = %invitation_id, status = %body.status))]
pub async fn update_invitation(
    State(state): State<Arc<AppState>>,
    Extension(permissions): Extension<Permissions>,
    Path((workshop_id, invitation_id)): Path<(i64, i64)>,
    Form(body): Form<InvitationResponseForm>,
) -> Result<Response, AppError> {
    debug!("Recording invitation response");
    load_workshop(&state, &permissions, workshop_id).await?;

    match state.invitation.read(&invitation_id).await? {
        Some(invitation) if invitation.workshop_id == workshop_id => {}
        _ => {
            warn!("Invitation {} not found for workshop {}", invitation_id, workshop_id);
            return Err(AppError::not_found("Invitation not found"));
        }
    }

    state
        .invitation
        .update(
            &invitation_id,
            &UpdateInvitationDTO {
                status: Some(body.status),
            },
        )
        .await?;

    info!("Invitation {} updated", invitation_id);
    Ok(redirect_with_flash(
        &workshop_path(workshop_id),
        Flash::InvitationUpdated,
    ))
}
