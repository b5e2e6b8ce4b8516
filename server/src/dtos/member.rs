//! Member DTOs - Login e creazione membri

use crate::entities::{Audience, ResourceType, Role};
use serde::Deserialize;
use validator::Validate;

/// Form di login dell'area amministrativa
#[derive(Deserialize, Debug, Validate)]
pub struct LoginForm {
    #[validate(email(message = "is invalid"))]
    pub email: String,
    #[validate(length(min = 1, message = "can't be blank"))]
    pub password: String,
}

/// DTO per creare un nuovo membro (password già hashata)
#[derive(Debug, Clone, Validate)]
pub struct CreateMemberDTO {
    #[validate(length(min = 1, message = "can't be blank"))]
    pub name: String,
    #[validate(length(min = 1, message = "can't be blank"))]
    pub surname: String,
    #[validate(email(message = "is invalid"))]
    pub email: String,
    pub password: Option<String>,
}

/// DTO per concedere un ruolo (`add_role(:organiser, Chapter)`)
#[derive(Debug, Clone)]
pub struct GrantRoleDTO {
    pub role: Role,
    pub resource_type: Option<ResourceType>,
    pub resource_id: Option<i64>,
}

impl GrantRoleDTO {
    /// Organizzatore di tutti i capitoli
    pub fn organiser_of_chapters() -> Self {
        Self {
            role: Role::Organiser,
            resource_type: Some(ResourceType::Chapter),
            resource_id: None,
        }
    }

    /// Organizzatore di un solo capitolo
    pub fn organiser_of_chapter(chapter_id: i64) -> Self {
        Self {
            role: Role::Organiser,
            resource_type: Some(ResourceType::Chapter),
            resource_id: Some(chapter_id),
        }
    }

    pub fn admin() -> Self {
        Self {
            role: Role::Admin,
            resource_type: None,
            resource_id: None,
        }
    }
}

/// DTO per iscrivere un membro al pubblico di un capitolo
#[derive(Debug, Clone)]
pub struct CreateSubscriptionDTO {
    pub member_id: i64,
    pub chapter_id: i64,
    pub role: Audience,
}
