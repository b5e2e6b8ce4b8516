//! Flash messages e cookie
//!
//! Il messaggio di conferma sopravvive ad un solo redirect: viene salvato come codice
//! nel cookie `flash`, letto dalla pagina successiva e subito cancellato.

use axum::http::{HeaderMap, HeaderValue, header};

pub const FLASH_COOKIE: &str = "flash";
pub const TOKEN_COOKIE: &str = "token";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Flash {
    WorkshopCreated,
    WorkshopUpdated,
    StudentInvitesQueued,
    CoachInvitesQueued,
    InvitationUpdated,
    ChapterCreated,
    ChapterDeleted,
    SponsorCreated,
}

impl Flash {
    const ALL: [Flash; 8] = [
        Flash::WorkshopCreated,
        Flash::WorkshopUpdated,
        Flash::StudentInvitesQueued,
        Flash::CoachInvitesQueued,
        Flash::InvitationUpdated,
        Flash::ChapterCreated,
        Flash::ChapterDeleted,
        Flash::SponsorCreated,
    ];

    pub fn code(&self) -> &'static str {
        match self {
            Flash::WorkshopCreated => "workshop_created",
            Flash::WorkshopUpdated => "workshop_updated",
            Flash::StudentInvitesQueued => "student_invites",
            Flash::CoachInvitesQueued => "coach_invites",
            Flash::InvitationUpdated => "invitation_updated",
            Flash::ChapterCreated => "chapter_created",
            Flash::ChapterDeleted => "chapter_deleted",
            Flash::SponsorCreated => "sponsor_created",
        }
    }

    pub fn message(&self) -> &'static str {
        match self {
            Flash::WorkshopCreated => "The workshop has been created",
            Flash::WorkshopUpdated => "The workshop has been updated",
            Flash::StudentInvitesQueued => "Invitations to students are being emailed out",
            Flash::CoachInvitesQueued => "Invitations to coaches are being emailed out",
            Flash::InvitationUpdated => "The invitation has been updated",
            Flash::ChapterCreated => "The chapter has been created",
            Flash::ChapterDeleted => "The chapter has been deleted",
            Flash::SponsorCreated => "The sponsor has been created",
        }
    }

    pub fn from_code(code: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|flash| flash.code() == code)
    }

    /// Legge il flash dalla richiesta corrente
    pub fn from_headers(headers: &HeaderMap) -> Option<Self> {
        cookie_value(headers, FLASH_COOKIE).and_then(|code| Self::from_code(&code))
    }

    /// `Set-Cookie` che consegna il flash alla prossima pagina
    pub fn set_cookie(&self) -> HeaderValue {
        HeaderValue::from_static(match self {
            Flash::WorkshopCreated => "flash=workshop_created; Path=/; HttpOnly; SameSite=Lax",
            Flash::WorkshopUpdated => "flash=workshop_updated; Path=/; HttpOnly; SameSite=Lax",
            Flash::StudentInvitesQueued => "flash=student_invites; Path=/; HttpOnly; SameSite=Lax",
            Flash::CoachInvitesQueued => "flash=coach_invites; Path=/; HttpOnly; SameSite=Lax",
            Flash::InvitationUpdated => "flash=invitation_updated; Path=/; HttpOnly; SameSite=Lax",
            Flash::ChapterCreated => "flash=chapter_created; Path=/; HttpOnly; SameSite=Lax",
            Flash::ChapterDeleted => "flash=chapter_deleted; Path=/; HttpOnly; SameSite=Lax",
            Flash::SponsorCreated => "flash=sponsor_created; Path=/; HttpOnly; SameSite=Lax",
        })
    }

    /// `Set-Cookie` che cancella il flash già mostrato
    pub fn clear_cookie() -> HeaderValue {
        HeaderValue::from_static("flash=; Path=/; Max-Age=0")
    }
}

/// Valore di un cookie della richiesta
pub fn cookie_value(headers: &HeaderMap, name: &str) -> Option<String> {
    headers
        .get_all(header::COOKIE)
        .iter()
        .filter_map(|value| value.to_str().ok())
        .flat_map(|value| value.split(';'))
        .filter_map(|pair| pair.trim().split_once('='))
        .find(|(key, _)| *key == name)
        .map(|(_, value)| value.to_string())
        .filter(|value| !value.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_codes_round_trip() {
        for flash in Flash::ALL {
            assert_eq!(Flash::from_code(flash.code()), Some(flash));
            let cookie = flash.set_cookie();
            let cookie = cookie.to_str().unwrap();
            assert!(cookie.starts_with(&format!("flash={};", flash.code())));
        }
        assert_eq!(Flash::from_code("unknown"), None);
    }

    #[test]
    fn test_cookie_value_from_multiple_pairs() {
        let mut headers = HeaderMap::new();
        headers.insert(
            header::COOKIE,
            HeaderValue::from_static("token=abc.def; flash=workshop_created"),
        );

        assert_eq!(cookie_value(&headers, TOKEN_COOKIE), Some("abc.def".to_string()));
        assert_eq!(Flash::from_headers(&headers), Some(Flash::WorkshopCreated));
        assert_eq!(cookie_value(&headers, "missing"), None);
    }

    #[test]
    fn test_cleared_flash_is_ignored() {
        let mut headers = HeaderMap::new();
        headers.insert(header::COOKIE, HeaderValue::from_static("flash="));
        assert_eq!(Flash::from_headers(&headers), None);
    }
}
