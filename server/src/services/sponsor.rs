//! Sponsor services - Directory degli sponsor

use super::{page_with_flash, redirect_with_flash};
use crate::core::{AppError, AppState, Flash, Permissions};
use crate::dtos::{CreateSponsorDTO, FormPairs, SponsorForm, full_messages};
use crate::repositories::Create;
use crate::views;
use axum::{
    Extension, Form,
    extract::State,
    http::HeaderMap,
    response::{IntoResponse, Response},
};
use std::sync::Arc;
use tracing::{debug, info, instrument, warn};
use validator::Validate;

#[instrument(skip(state, permissions, headers), fields(member_id = %permissions.member_id))]
pub async fn list_sponsors(
    State(state): State<Arc<AppState>>,
    Extension(permissions): Extension<Permissions>,
    headers: HeaderMap,
) -> Result<Response, AppError> {
    debug!("Listing sponsors");
    let sponsors = state.sponsor.find_all().await?;
    let flash = Flash::from_headers(&headers);
    Ok(page_with_flash(
        flash,
        views::sponsor::index(&sponsors, &SponsorForm::default(), &[], flash),
    ))
}

#[instrument(skip(state, permissions, pairs), fields(member_id = %permissions.member_id))]
pub async fn create_sponsor(
    State(state): State<Arc<AppState>>,
    Extension(permissions): Extension<Permissions>,
    Form(pairs): Form<FormPairs>,
) -> Result<Response, AppError> {
    debug!("Creating sponsor");
    let form = SponsorForm::from_pairs(&pairs);

    if let Err(errors) = form.validate() {
        let errors = full_messages(&errors);
        warn!("Sponsor form rejected: {:?}", errors);
        let sponsors = state.sponsor.find_all().await?;
        return Ok(views::sponsor::index(&sponsors, &form, &errors, None).into_response());
    }

    let sponsor = state.sponsor.create(&CreateSponsorDTO::from(form)).await?;

    info!("Sponsor {} created", sponsor.sponsor_id);
    Ok(redirect_with_flash("/admin/sponsors", Flash::SponsorCreated))
}
