//! Auth services - Login e logout dell'area amministrativa

use crate::core::auth::SESSION_HOURS;
use crate::core::flash::TOKEN_COOKIE;
use crate::core::{AppError, AppState, encode_jwt};
use crate::dtos::{LoginForm, full_messages};
use crate::views;
use axum::{
    Form,
    extract::State,
    http::{HeaderMap, HeaderValue, StatusCode, header},
    response::{IntoResponse, Redirect, Response},
};
use std::sync::Arc;
use tracing::{debug, info, instrument, warn};
use validator::Validate;

pub async fn login_page() -> impl IntoResponse {
    views::auth::login("", &[])
}

#[instrument(skip(state, body), fields(email = %body.email))]
pub async fn login(
    State(state): State<Arc<AppState>>,
    Form(body): Form<LoginForm>,
) -> Result<Response, AppError> {
    debug!("Login attempt");
    // 1. Validare il form (email e password presenti), altrimenti ripresentare il form
    // 2. Cercare il membro per email e verificare l'hash della password
    // 3. Generare il JWT e consegnarlo sia come cookie HttpOnly sia come header Authorization
    // 4. Redirect alla directory dei capitoli

    if let Err(errors) = body.validate() {
        warn!("Invalid login form");
        let page = views::auth::login(&body.email, &full_messages(&errors));
        return Ok((StatusCode::UNPROCESSABLE_ENTITY, page).into_response());
    }

    let member = match state.member.find_by_email(&body.email).await? {
        Some(member) if member.verify_password(&body.password) => member,
        _ => {
            warn!("Invalid credentials");
            let page = views::auth::login(&body.email, &["Invalid email or password".to_string()]);
            return Ok((StatusCode::UNAUTHORIZED, page).into_response());
        }
    };

    let token = encode_jwt(member.email.clone(), member.member_id, &state.jwt_secret)?;

    let cookie = format!(
        "{TOKEN_COOKIE}={token}; Path=/; HttpOnly; SameSite=Lax; Max-Age={}",
        SESSION_HOURS * 60 * 60
    );

    let mut headers = HeaderMap::new();
    headers.insert(
        header::SET_COOKIE,
        HeaderValue::from_str(&cookie)
            .map_err(|_| AppError::internal_server_error("Failed to build session cookie"))?,
    );
    headers.insert(
        header::AUTHORIZATION,
        HeaderValue::from_str(&format!("Bearer {token}"))
            .map_err(|_| AppError::internal_server_error("Failed to build session header"))?,
    );

    info!("Member {} logged in", member.member_id);
    Ok((headers, Redirect::to("/admin/chapters")).into_response())
}

pub async fn logout() -> impl IntoResponse {
    (
        [(
            header::SET_COOKIE,
            HeaderValue::from_static("token=; Path=/; HttpOnly; Max-Age=0"),
        )],
        Redirect::to("/auth/login"),
    )
}
