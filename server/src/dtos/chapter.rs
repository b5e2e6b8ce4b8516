//! Chapter DTOs - Form e DTO per la directory dei capitoli

use super::form::{FormPairs, last_value};
use validator::Validate;

#[derive(Debug, Default, Clone, Validate)]
pub struct ChapterForm {
    #[validate(
        required(message = "can't be blank"),
        length(min = 1, message = "can't be blank")
    )]
    pub name: Option<String>,

    #[validate(length(max = 100, message = "is too long"))]
    pub city: Option<String>,

    #[validate(email(message = "is invalid"))]
    pub email: Option<String>,
}

impl ChapterForm {
    pub fn from_pairs(pairs: &FormPairs) -> Self {
        Self {
            name: last_value(pairs, "name"),
            city: last_value(pairs, "city").filter(|c| !c.is_empty()),
            email: last_value(pairs, "email").filter(|e| !e.is_empty()),
        }
    }
}

/// DTO per creare un nuovo capitolo (senza chapter_id)
#[derive(Debug, Clone)]
pub struct CreateChapterDTO {
    pub name: String,
    pub city: Option<String>,
    pub email: Option<String>,
}

impl From<ChapterForm> for CreateChapterDTO {
    fn from(value: ChapterForm) -> Self {
        Self {
            name: value.name.unwrap_or_default(),
            city: value.city,
            email: value.email,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dtos::form::full_messages;

    #[test]
    fn test_blank_name_is_rejected() {
        let pairs = vec![("name".to_string(), "   ".to_string())];
        let errors = ChapterForm::from_pairs(&pairs).validate().unwrap_err();
        assert_eq!(full_messages(&errors), vec!["Name can't be blank"]);
    }

    #[test]
    fn test_invalid_email_is_rejected() {
        let pairs = vec![
            ("name".to_string(), "Leeds".to_string()),
            ("email".to_string(), "not-an-email".to_string()),
        ];
        let errors = ChapterForm::from_pairs(&pairs).validate().unwrap_err();
        assert_eq!(full_messages(&errors), vec!["Email is invalid"]);
    }
}
