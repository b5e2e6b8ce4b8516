//! Chapter services - Directory dei capitoli e lista dei workshop per capitolo

use super::{page_with_flash, redirect_with_flash};
use crate::core::{AppError, AppState, Flash, Permissions, require_chapter_organiser};
use crate::dtos::{ChapterForm, CreateChapterDTO, FormPairs, full_messages};
use crate::entities::Chapter;
use crate::repositories::{Create, Delete, Read};
use crate::views;
use axum::{
    Extension, Form,
    extract::{Path, State},
    http::HeaderMap,
    response::{IntoResponse, Response},
};
use std::sync::Arc;
use tracing::{debug, info, instrument, warn};
use validator::Validate;

async fn visible_chapters(
    state: &AppState,
    permissions: &Permissions,
) -> Result<Vec<Chapter>, AppError> {
    Ok(state
        .chapter
        .find_all()
        .await?
        .into_iter()
        .filter(|c| permissions.can_manage_chapter(c.chapter_id))
        .collect())
}

#[instrument(skip(state, permissions, headers), fields(member_id = %permissions.member_id))]
pub async fn list_chapters(
    State(state): State<Arc<AppState>>,
    Extension(permissions): Extension<Permissions>,
    headers: HeaderMap,
) -> Result<Response, AppError> {
    debug!("Listing chapters");
    let chapters = visible_chapters(&state, &permissions).await?;
    let flash = Flash::from_headers(&headers);
    Ok(page_with_flash(
        flash,
        views::chapter::index(&chapters, &ChapterForm::default(), &[], flash),
    ))
}

#[instrument(skip(state, permissions, pairs), fields(member_id = %permissions.member_id))]
pub async fn create_chapter(
    State(state): State<Arc<AppState>>,
    Extension(permissions): Extension<Permissions>,
    Form(pairs): Form<FormPairs>,
) -> Result<Response, AppError> {
    debug!("Creating chapter");
    if !permissions.can_manage_all_chapters() {
        warn!("Member {} cannot create chapters", permissions.member_id);
        return Err(AppError::forbidden("You are not an organiser of every chapter"));
    }

    let form = ChapterForm::from_pairs(&pairs);
    let mut errors = match form.validate() {
        Ok(()) => Vec::new(),
        Err(e) => full_messages(&e),
    };
    if let Some(name) = form.name.as_deref().filter(|n| !n.is_empty()) {
        if state.chapter.find_by_name(name).await?.is_some() {
            errors.push("Name has already been taken".to_string());
        }
    }

    if !errors.is_empty() {
        warn!("Chapter form rejected: {:?}", errors);
        let chapters = visible_chapters(&state, &permissions).await?;
        return Ok(views::chapter::index(&chapters, &form, &errors, None).into_response());
    }

    let chapter = state.chapter.create(&CreateChapterDTO::from(form)).await?;

    info!("Chapter {} created", chapter.chapter_id);
    Ok(redirect_with_flash("/admin/chapters", Flash::ChapterCreated))
}

#[instrument(skip(state, permissions), fields(member_id = %permissions.member_id, chapter_id = %chapter_id))]
pub async fn delete_chapter(
    State(state): State<Arc<AppState>>,
    Extension(permissions): Extension<Permissions>,
    Path(chapter_id): Path<i64>,
) -> Result<Response, AppError> {
    debug!("Deleting chapter");
    state
        .chapter
        .read(&chapter_id)
        .await?
        .ok_or_else(|| AppError::not_found("Chapter not found"))?;
    require_chapter_organiser(&permissions, chapter_id)?;

    if state.workshop.count_by_chapter_id(&chapter_id).await? > 0 {
        warn!("Chapter {} still has workshops", chapter_id);
        return Err(AppError::conflict("Chapter still has workshops"));
    }

    state.chapter.delete(&chapter_id).await?;

    info!("Chapter {} deleted", chapter_id);
    Ok(redirect_with_flash("/admin/chapters", Flash::ChapterDeleted))
}

#[instrument(skip(state, permissions, headers), fields(member_id = %permissions.member_id, chapter_id = %chapter_id))]
pub async fn list_chapter_workshops(
    State(state): State<Arc<AppState>>,
    Extension(permissions): Extension<Permissions>,
    Path(chapter_id): Path<i64>,
    headers: HeaderMap,
) -> Result<Response, AppError> {
    debug!("Listing chapter workshops");
    let chapter = state.chapter.read(&chapter_id).await?.ok_or_else(|| {
        warn!("Chapter {} not found", chapter_id);
        AppError::not_found("Chapter not found")
    })?;
    require_chapter_organiser(&permissions, chapter_id)?;

    let workshops = state.workshop.find_many_by_chapter_id(&chapter_id).await?;

    info!("Found {} workshops", workshops.len());
    let flash = Flash::from_headers(&headers);
    Ok(page_with_flash(
        flash,
        views::workshop::index(&chapter, &workshops, flash),
    ))
}
