//! Workshop services - Registro dei workshop: creazione, dettaglio, modifica

use super::{page_with_flash, redirect_with_flash};
use crate::core::{AppError, AppState, Flash, Permissions, require_chapter_organiser};
use crate::dtos::{
    CreateWorkshopDTO, FormPairs, UpdateWorkshopDTO, WorkshopForm, WorkshopParams, full_messages,
};
use crate::entities::Workshop;
use crate::repositories::{Create, Read, ReadMany, Update};
use crate::views;
use crate::views::workshop::{WorkshopFormPage, WorkshopPage, workshop_path};
use axum::{
    Extension, Form,
    extract::{Path, State},
    http::HeaderMap,
    response::{Html, IntoResponse, Response},
};
use axum_macros::debug_handler;
use futures::future::try_join_all;
use std::sync::Arc;
use tracing::{debug, info, instrument, warn};
use validator::Validate;

/// Carica il workshop e verifica che il membro possa gestirne il capitolo
pub(crate) async fn load_workshop(
    state: &AppState,
    permissions: &Permissions,
    workshop_id: i64,
) -> Result<Workshop, AppError> {
    let workshop = state.workshop.read(&workshop_id).await?.ok_or_else(|| {
        warn!("Workshop {} not found", workshop_id);
        AppError::not_found("Workshop not found")
    })?;
    require_chapter_organiser(permissions, workshop.chapter_id)?;
    Ok(workshop)
}

/// Valida il form e controlla i riferimenti alle directory.
/// `Ok(Err(messages))` significa form non valido, da ripresentare all'utente.
async fn check_form(
    state: &AppState,
    form: &WorkshopForm,
) -> Result<Result<WorkshopParams, Vec<String>>, AppError> {
    if let Err(errors) = form.validate() {
        return Ok(Err(full_messages(&errors)));
    }

    let params = match form.parse() {
        Ok(params) => params,
        Err(messages) => return Ok(Err(messages)),
    };

    let mut messages = Vec::new();

    if state.chapter.read(&params.chapter_id).await?.is_none() {
        messages.push("Chapter can't be blank".to_string());
    }

    if let Some(Some(host_id)) = params.host_id {
        if state.sponsor.read(&host_id).await?.is_none() {
            messages.push("Host is invalid".to_string());
        }
    }

    if let Some(sponsor_ids) = params.sponsor_ids.as_deref() {
        if !sponsor_ids.is_empty() && state.sponsor.read_many(sponsor_ids).await?.len() != sponsor_ids.len() {
            messages.push("Sponsors is invalid".to_string());
        }
    }

    if messages.is_empty() {
        Ok(Ok(params))
    } else {
        Ok(Err(messages))
    }
}

/// Form con le select popolate: capitoli gestibili dal membro e tutti gli sponsor
async fn render_form(
    state: &AppState,
    permissions: &Permissions,
    title: &str,
    action: String,
    form: &WorkshopForm,
    errors: &[String],
) -> Result<Html<String>, AppError> {
    let chapters: Vec<_> = state
        .chapter
        .find_all()
        .await?
        .into_iter()
        .filter(|c| permissions.can_manage_chapter(c.chapter_id))
        .collect();
    let sponsors = state.sponsor.find_all().await?;

    Ok(views::workshop::form(&WorkshopFormPage {
        title,
        action,
        form,
        errors,
        chapters: &chapters,
        sponsors: &sponsors,
    }))
}

#[instrument(skip(state, permissions), fields(member_id = %permissions.member_id))]
pub async fn new_workshop(
    State(state): State<Arc<AppState>>,
    Extension(permissions): Extension<Permissions>,
) -> Result<Html<String>, AppError> {
    debug!("Rendering new workshop form");
    render_form(
        &state,
        &permissions,
        "New workshop",
        "/admin/workshops".to_string(),
        &WorkshopForm::default(),
        &[],
    )
    .await
}

#[debug_handler]
#[instrument(skip(state, permissions, pairs), fields(member_id = %permissions.member_id))]
pub async fn create_workshop(
    State(state): State<Arc<AppState>>,
    Extension(permissions): Extension<Permissions>,
    Form(pairs): Form<FormPairs>,
) -> Result<Response, AppError> {
    debug!("Creating workshop");
    // 1. Costruire il form dalle coppie chiave/valore (select multipla degli sponsor)
    // 2. Validare campi e riferimenti; in caso di errori ripresentare il form senza salvare
    // 3. Verificare che il membro organizzi il capitolo scelto
    // 4. Salvare workshop e sponsor, redirect al dettaglio con il flash di conferma
    let form = WorkshopForm::from_pairs(&pairs);

    let params = match check_form(&state, &form).await? {
        Ok(params) => params,
        Err(errors) => {
            warn!("Workshop form rejected: {:?}", errors);
            let page = render_form(
                &state,
                &permissions,
                "New workshop",
                "/admin/workshops".to_string(),
                &form,
                &errors,
            )
            .await?;
            return Ok(page.into_response());
        }
    };

    require_chapter_organiser(&permissions, params.chapter_id)?;

    let workshop = state.workshop.create(&CreateWorkshopDTO::from(params)).await?;

    info!("Workshop {} created", workshop.workshop_id);
    Ok(redirect_with_flash(
        &workshop_path(workshop.workshop_id),
        Flash::WorkshopCreated,
    ))
}

#[instrument(skip(state, permissions, headers), fields(member_id = %permissions.member_id, workshop_id = %workshop_id))]
pub async fn show_workshop(
    State(state): State<Arc<AppState>>,
    Extension(permissions): Extension<Permissions>,
    Path(workshop_id): Path<i64>,
    headers: HeaderMap,
) -> Result<Response, AppError> {
    debug!("Showing workshop");
    let workshop = load_workshop(&state, &permissions, workshop_id).await?;

    let chapter = state
        .chapter
        .read(&workshop.chapter_id)
        .await?
        .ok_or_else(|| AppError::not_found("Chapter not found"))?;

    let host = match workshop.host_id {
        Some(host_id) => state.sponsor.read(&host_id).await?,
        None => None,
    };
    let sponsors = state.sponsor.find_many_by_workshop_id(&workshop_id).await?;
    let summary = state.invitation.summarize(&workshop_id).await?;

    let invitations = state.invitation.find_many_by_workshop_id(&workshop_id).await?;
    let members = try_join_all(invitations.iter().map(|invitation| {
        let state = state.clone();
        let member_id = invitation.member_id;
        async move { state.member.read(&member_id).await }
    }))
    .await?;
    let invitations = invitations
        .into_iter()
        .zip(members)
        .filter_map(|(invitation, member)| member.map(|m| (invitation, m)))
        .collect();

    let page = WorkshopPage {
        workshop,
        chapter,
        host,
        sponsors,
        summary,
        invitations,
    };

    let flash = Flash::from_headers(&headers);
    Ok(page_with_flash(flash, views::workshop::show(&page, flash)))
}

#[instrument(skip(state, permissions), fields(member_id = %permissions.member_id, workshop_id = %workshop_id))]
pub async fn edit_workshop(
    State(state): State<Arc<AppState>>,
    Extension(permissions): Extension<Permissions>,
    Path(workshop_id): Path<i64>,
) -> Result<Html<String>, AppError> {
    debug!("Rendering edit workshop form");
    let workshop = load_workshop(&state, &permissions, workshop_id).await?;
    let sponsor_ids = state.workshop.find_sponsor_ids(&workshop_id).await?;
    let form = WorkshopForm::from_workshop(&workshop, &sponsor_ids);

    render_form(
        &state,
        &permissions,
        "Edit workshop",
        workshop_path(workshop_id),
        &form,
        &[],
    )
    .await
}

#[debug_handler]
#[instrument(skip(state, permissions, pairs), fields(member_id = %permissions.member_id, workshop_id = %workshop_id))]
pub async fn update_workshop(
    State(state): State<Arc<AppState>>,
    Extension(permissions): Extension<Permissions>,
    Path(workshop_id): Path<i64>,
    Form(pairs): Form<FormPairs>,
) -> Result<Response, AppError> {
    debug!("Updating workshop");
    // 1. Caricare il workshop e verificare i permessi sul capitolo corrente
    // 2. Completare i campi non inviati con i valori correnti e validare
    // 3. Se il capitolo cambia, verificare i permessi anche sul nuovo
    // 4. Aggiornare campi e insieme degli sponsor in un'unica transazione
    let workshop = load_workshop(&state, &permissions, workshop_id).await?;

    let mut form = WorkshopForm::from_pairs(&pairs);
    form.merge_missing(&workshop);

    let params = match check_form(&state, &form).await? {
        Ok(params) => params,
        Err(errors) => {
            warn!("Workshop form rejected: {:?}", errors);
            let page = render_form(
                &state,
                &permissions,
                "Edit workshop",
                workshop_path(workshop_id),
                &form,
                &errors,
            )
            .await?;
            return Ok(page.into_response());
        }
    };

    require_chapter_organiser(&permissions, params.chapter_id)?;

    state
        .workshop
        .update(&workshop_id, &UpdateWorkshopDTO::from(params))
        .await?;

    info!("Workshop {} updated", workshop_id);
    Ok(redirect_with_flash(
        &workshop_path(workshop_id),
        Flash::WorkshopUpdated,
    ))
}
