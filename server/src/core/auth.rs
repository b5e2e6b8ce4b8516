use crate::core::flash::{TOKEN_COOKIE, cookie_value};
use crate::core::{AppError, AppState};
use crate::entities::{Member, MemberRole, ResourceType, Role};
use crate::repositories::Read;
use axum::extract::State;
use axum::{body::Body, extract::Request, http, http::Response, middleware::Next};
use chrono::{Duration, Utc};
use jsonwebtoken::{DecodingKey, EncodingKey, Header, TokenData, Validation, decode, encode};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::{debug, error, info, instrument, warn};

/// Durata della sessione in ore
pub const SESSION_HOURS: i64 = 24;

// struct che codifica il contenuto del token jwt
#[derive(Debug, Serialize, Deserialize)]
pub struct Claims {
    pub exp: usize, // Expiry time of the token
    pub iat: usize, // Issued at time of the token
    pub id: i64,
    pub email: String,
}

#[instrument(skip(secret), fields(email = %email, id = %id))]
pub fn encode_jwt(email: String, id: i64, secret: &str) -> Result<String, AppError> {
    debug!("Encoding JWT token for member");
    let now = Utc::now();
    let expire = Duration::hours(SESSION_HOURS);
    let exp: usize = (now + expire).timestamp() as usize;
    let iat: usize = now.timestamp() as usize;
    let claim = Claims { iat, exp, email, id };

    encode(
        &Header::default(),
        &claim,
        &EncodingKey::from_secret(secret.as_ref()),
    )
    .map(|token| {
        info!("JWT token encoded successfully");
        token
    })
    .map_err(|e| {
        error!("Failed to encode JWT token: {:?}", e);
        AppError::from(e)
    })
}

#[instrument(skip(jwt_token, secret))]
pub fn decode_jwt(jwt_token: &str, secret: &str) -> Result<TokenData<Claims>, AppError> {
    debug!("Decoding JWT token");
    decode::<Claims>(
        jwt_token,
        &DecodingKey::from_secret(secret.as_ref()),
        &Validation::default(),
    )
    .map(|data| {
        debug!("JWT token decoded successfully for member: {}", data.claims.email);
        data
    })
    .map_err(|e| {
        warn!("Failed to decode JWT token: {:?}", e);
        AppError::unauthorized("Unable to decode token")
    })
}

/// Token della richiesta: header `Authorization: Bearer ...` oppure cookie di sessione
fn extract_token(req: &Request) -> Result<String, AppError> {
    if let Some(header) = req.headers().get(http::header::AUTHORIZATION) {
        let header = header.to_str().map_err(|_| {
            warn!("Invalid authorization header format");
            AppError::forbidden("Empty header is not allowed")
        })?;
        let mut parts = header.split_whitespace();
        return match (parts.next(), parts.next()) {
            (Some("Bearer"), Some(token)) => Ok(token.to_string()),
            _ => {
                warn!("Authorization header is not a bearer token");
                Err(AppError::unauthorized("Unable to decode token"))
            }
        };
    }

    cookie_value(req.headers(), TOKEN_COOKIE).ok_or_else(|| {
        warn!("Missing session token");
        AppError::forbidden("Please log in to access this page")
    })
}

#[instrument(skip(state, req, next))]
pub async fn authentication_middleware(
    State(state): State<Arc<AppState>>,
    mut req: Request,
    next: Next,
) -> Result<Response<Body>, AppError> {
    debug!("Running authentication middleware");
    let token = extract_token(&req)?;
    let token_data = decode_jwt(&token, &state.jwt_secret)?;

    // Fetch the member details from the database
    let current_member = match state.member.read(&token_data.claims.id).await? {
        Some(member) if member.email == token_data.claims.email => {
            debug!("Member authenticated: {}", member.email);
            member
        }
        _ => {
            warn!("Member not found in database: {}", token_data.claims.email);
            return Err(AppError::unauthorized("You are not an authorized member"));
        }
    };
    req.extensions_mut().insert(current_member);
    Ok(next.run(req).await)
}

/// Capacità amministrative del membro corrente, ricavate dai suoi ruoli
#[derive(Debug, Clone)]
pub struct Permissions {
    pub member_id: i64,
    roles: Vec<MemberRole>,
}

impl Permissions {
    pub fn new(member_id: i64, roles: Vec<MemberRole>) -> Self {
        Self { member_id, roles }
    }

    pub fn is_admin(&self) -> bool {
        self.roles.iter().any(|r| r.role == Role::Admin)
    }

    fn chapter_organiser_roles(&self) -> impl Iterator<Item = &MemberRole> {
        self.roles.iter().filter(|r| {
            r.role == Role::Organiser && r.resource_type == Some(ResourceType::Chapter)
        })
    }

    /// Organizzatore di almeno un capitolo (o amministratore)
    pub fn can_manage_chapters(&self) -> bool {
        self.is_admin() || self.chapter_organiser_roles().next().is_some()
    }

    /// Organizzatore di tutti i capitoli (`add_role(:organiser, Chapter)`) o amministratore
    pub fn can_manage_all_chapters(&self) -> bool {
        self.is_admin()
            || self
                .chapter_organiser_roles()
                .any(|r| r.resource_id.is_none())
    }

    pub fn can_manage_chapter(&self, chapter_id: i64) -> bool {
        self.is_admin()
            || self
                .chapter_organiser_roles()
                .any(|r| r.resource_id.is_none_or(|id| id == chapter_id))
    }
}

/// Middleware che verifica che il membro autenticato abbia un ruolo da organizzatore.
/// Inserisce i `Permissions` nell'Extension per i controlli puntuali negli handler.
#[instrument(skip(state, req, next))]
pub async fn organiser_middleware(
    State(state): State<Arc<AppState>>,
    mut req: Request,
    next: Next,
) -> Result<Response<Body>, AppError> {
    debug!("Running organiser middleware");
    // 1. Ottenere il membro corrente dall'Extension (inserito dall'authentication_middleware)
    let current_member = req
        .extensions()
        .get::<Member>()
        .ok_or_else(|| {
            warn!("Member not found in request extensions");
            AppError::unauthorized("Member not authenticated")
        })?
        .clone();

    // 2. Caricare i ruoli e verificare la capacità di gestire i capitoli
    let roles = state.member.find_roles(&current_member.member_id).await?;
    let permissions = Permissions::new(current_member.member_id, roles);

    if !permissions.can_manage_chapters() {
        warn!("Member {} has no organiser role", current_member.member_id);
        return Err(AppError::forbidden("You are not an organiser"));
    }

    debug!("Member {} verified as organiser", current_member.member_id);

    // 3. Inserire i permessi nell'Extension per uso successivo negli handler
    req.extensions_mut().insert(permissions);

    Ok(next.run(req).await)
}

/// Helper per verificare che il membro possa gestire il capitolo indicato
#[instrument(skip(permissions), fields(member_id = %permissions.member_id))]
pub fn require_chapter_organiser(permissions: &Permissions, chapter_id: i64) -> Result<(), AppError> {
    if !permissions.can_manage_chapter(chapter_id) {
        warn!(
            "Member {} is not an organiser of chapter {}",
            permissions.member_id, chapter_id
        );
        return Err(AppError::forbidden("Insufficient role")
            .with_details(format!("This action requires the organiser role for chapter {}", chapter_id)));
    }

    debug!("Role check passed for chapter {}", chapter_id);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn role(role: Role, resource_id: Option<i64>) -> MemberRole {
        MemberRole {
            member_id: 1,
            role,
            resource_type: (role == Role::Organiser).then_some(ResourceType::Chapter),
            resource_id,
        }
    }

    #[test]
    fn test_type_wide_organiser_manages_every_chapter() {
        let permissions = Permissions::new(1, vec![role(Role::Organiser, None)]);
        assert!(permissions.can_manage_chapters());
        assert!(permissions.can_manage_all_chapters());
        assert!(permissions.can_manage_chapter(42));
    }

    #[test]
    fn test_scoped_organiser_manages_only_its_chapter() {
        let permissions = Permissions::new(1, vec![role(Role::Organiser, Some(2))]);
        assert!(permissions.can_manage_chapters());
        assert!(!permissions.can_manage_all_chapters());
        assert!(permissions.can_manage_chapter(2));
        assert!(require_chapter_organiser(&permissions, 1).is_err());
    }

    #[test]
    fn test_admin_manages_everything() {
        let permissions = Permissions::new(1, vec![role(Role::Admin, None)]);
        assert!(permissions.can_manage_all_chapters());
        assert!(require_chapter_organiser(&permissions, 7).is_ok());
    }

    #[test]
    fn test_member_without_roles() {
        let permissions = Permissions::new(1, vec![]);
        assert!(!permissions.can_manage_chapters());
        assert!(!permissions.can_manage_chapter(1));
    }

    #[test]
    fn test_jwt_round_trip_and_wrong_secret() {
        let token = encode_jwt("ada@example.com".to_string(), 1, "secret").unwrap();
        let data = decode_jwt(&token, "secret").unwrap();
        assert_eq!(data.claims.id, 1);
        assert_eq!(data.claims.email, "ada@example.com");

        let err = decode_jwt(&token, "another secret").unwrap_err();
        assert_eq!(err.status(), http::StatusCode::UNAUTHORIZED);
    }
}
