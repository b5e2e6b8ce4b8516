//! Sponsor DTOs - Form e DTO per la directory degli sponsor

use super::form::{FormPairs, last_value};
use validator::Validate;

#[derive(Debug, Default, Clone, Validate)]
pub struct SponsorForm {
    #[validate(
        required(message = "can't be blank"),
        length(min = 1, message = "can't be blank")
    )]
    pub name: Option<String>,

    #[validate(url(message = "is invalid"))]
    pub website: Option<String>,
}

impl SponsorForm {
    pub fn from_pairs(pairs: &FormPairs) -> Self {
        Self {
            name: last_value(pairs, "name"),
            website: last_value(pairs, "website").filter(|w| !w.is_empty()),
        }
    }
}

/// DTO per creare un nuovo sponsor (senza sponsor_id)
#[derive(Debug, Clone)]
pub struct CreateSponsorDTO {
    pub name: String,
    pub website: Option<String>,
}

impl From<SponsorForm> for CreateSponsorDTO {
    fn from(value: SponsorForm) -> Self {
        Self {
            name: value.name.unwrap_or_default(),
            website: value.website,
        }
    }
}
