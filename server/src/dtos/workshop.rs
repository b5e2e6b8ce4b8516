//! Workshop DTOs - Form di creazione/modifica e DTO verso il repository

use super::form::{FormPairs, all_values, last_value};
use crate::entities::Workshop;
use chrono::{DateTime, NaiveDate, NaiveTime, Utc};
use lazy_static::lazy_static;
use regex::Regex;
use validator::{Validate, ValidationError};

lazy_static! {
    // vuoto ammesso: la presenza è controllata da `required`/`length`
    static ref DATE_FORMAT: Regex = Regex::new(r"^([0-9]{4}-[0-9]{2}-[0-9]{2})?$").unwrap();
    static ref TIME_FORMAT: Regex = Regex::new(r"^([0-9]{2}:[0-9]{2})?$").unwrap();
}

pub const DATE_INPUT_FORMAT: &str = "%Y-%m-%d";
pub const TIME_INPUT_FORMAT: &str = "%H:%M";

/// Form così come inviato dal browser. I campi assenti restano `None`,
/// i campi lasciati vuoti sono `Some("")`.
#[derive(Debug, Default, Clone, Validate)]
#[validate(schema(function = "validate_time_range", skip_on_field_errors = false))]
pub struct WorkshopForm {
    #[validate(
        required(message = "can't be blank"),
        length(min = 1, message = "can't be blank")
    )]
    pub chapter_id: Option<String>,

    #[validate(
        required(message = "can't be blank"),
        length(min = 1, message = "can't be blank"),
        regex(path = *DATE_FORMAT, message = "is invalid")
    )]
    pub date: Option<String>,

    #[validate(
        required(message = "can't be blank"),
        length(min = 1, message = "can't be blank"),
        regex(path = *TIME_FORMAT, message = "is invalid")
    )]
    pub begins_at: Option<String>,

    #[validate(regex(path = *TIME_FORMAT, message = "is invalid"))]
    pub ends_at: Option<String>,

    #[validate(length(max = 2000, message = "is too long"))]
    pub description: Option<String>,

    pub host_id: Option<String>,
    pub sponsor_ids: Option<Vec<String>>,
}

/// Eseguito anche quando altri campi sono invalidi; ignora orari mancanti o malformati
fn validate_time_range(form: &WorkshopForm) -> Result<(), ValidationError> {
    let parse = |time: Option<&str>| {
        time.and_then(|t| NaiveTime::parse_from_str(t, TIME_INPUT_FORMAT).ok())
    };
    if let (Some(begins), Some(ends)) = (
        parse(form.begins_at.as_deref()),
        parse(form.ends_at.as_deref()),
    ) {
        if ends < begins {
            let mut error = ValidationError::new("time_range");
            error.message = Some("Ends at must be after begins at".into());
            return Err(error);
        }
    }
    Ok(())
}

impl WorkshopForm {
    pub fn from_pairs(pairs: &FormPairs) -> Self {
        Self {
            chapter_id: last_value(pairs, "chapter_id"),
            date: last_value(pairs, "date"),
            begins_at: last_value(pairs, "begins_at"),
            ends_at: last_value(pairs, "ends_at"),
            description: last_value(pairs, "description"),
            host_id: last_value(pairs, "host_id"),
            sponsor_ids: all_values(pairs, "sponsor_ids"),
        }
    }

    /// Form precompilato con i valori correnti di un workshop (pagina di modifica)
    pub fn from_workshop(workshop: &Workshop, sponsor_ids: &[i64]) -> Self {
        let mut form = Self::default();
        form.merge_missing(workshop);
        form.host_id = Some(workshop.host_id.map(|id| id.to_string()).unwrap_or_default());
        form.sponsor_ids = Some(sponsor_ids.iter().map(|id| id.to_string()).collect());
        form
    }

    /// Completa i campi non inviati con i valori correnti del workshop.
    /// Host e sponsor assenti restano `None`, cioè invariati.
    pub fn merge_missing(&mut self, workshop: &Workshop) {
        if self.chapter_id.is_none() {
            self.chapter_id = Some(workshop.chapter_id.to_string());
        }
        if self.date.is_none() {
            self.date = Some(workshop.date_and_time.format(DATE_INPUT_FORMAT).to_string());
        }
        if self.begins_at.is_none() {
            self.begins_at = Some(workshop.date_and_time.format(TIME_INPUT_FORMAT).to_string());
        }
        if self.ends_at.is_none() {
            self.ends_at = workshop
                .ends_at
                .map(|ends| ends.format(TIME_INPUT_FORMAT).to_string());
        }
        if self.description.is_none() {
            self.description = workshop.description.clone();
        }
    }

    /// Converte un form già validato nei tipi del dominio.
    /// Raccoglie i messaggi per i valori che superano il formato ma non sono interpretabili
    /// (es. `2026-02-30`, `25:00`).
    pub fn parse(&self) -> Result<WorkshopParams, Vec<String>> {
        let mut errors = Vec::new();

        let chapter_id = match self.chapter_id.as_deref().map(str::parse::<i64>) {
            Some(Ok(id)) => Some(id),
            Some(Err(_)) => {
                errors.push("Chapter is invalid".to_string());
                None
            }
            None => {
                errors.push("Chapter can't be blank".to_string());
                None
            }
        };

        let date = self
            .date
            .as_deref()
            .and_then(|d| NaiveDate::parse_from_str(d, DATE_INPUT_FORMAT).ok());
        if date.is_none() {
            errors.push("Date is invalid".to_string());
        }

        let begins_at = self
            .begins_at
            .as_deref()
            .and_then(|t| NaiveTime::parse_from_str(t, TIME_INPUT_FORMAT).ok());
        if begins_at.is_none() {
            errors.push("Begins at is invalid".to_string());
        }

        let ends_at = match self.ends_at.as_deref() {
            None | Some("") => None,
            Some(t) => match NaiveTime::parse_from_str(t, TIME_INPUT_FORMAT) {
                Ok(time) => Some(time),
                Err(_) => {
                    errors.push("Ends at is invalid".to_string());
                    None
                }
            },
        };

        let host_id = match self.host_id.as_deref() {
            None => None,
            Some("") => Some(None),
            Some(raw) => match raw.parse::<i64>() {
                Ok(id) => Some(Some(id)),
                Err(_) => {
                    errors.push("Host is invalid".to_string());
                    None
                }
            },
        };

        let sponsor_ids = match &self.sponsor_ids {
            None => None,
            Some(raw) => match raw.iter().map(|s| s.parse::<i64>()).collect::<Result<Vec<_>, _>>() {
                Ok(mut ids) => {
                    ids.sort_unstable();
                    ids.dedup();
                    Some(ids)
                }
                Err(_) => {
                    errors.push("Sponsors is invalid".to_string());
                    None
                }
            },
        };

        match (chapter_id, date, begins_at) {
            (Some(chapter_id), Some(date), Some(begins_at)) if errors.is_empty() => {
                Ok(WorkshopParams {
                    chapter_id,
                    date_and_time: date.and_time(begins_at).and_utc(),
                    ends_at: ends_at.map(|time| date.and_time(time).and_utc()),
                    description: self.description.clone().filter(|d| !d.is_empty()),
                    host_id,
                    sponsor_ids,
                })
            }
            _ => Err(errors),
        }
    }
}

/// Valori tipizzati estratti dal form
#[derive(Debug, Clone, PartialEq)]
pub struct WorkshopParams {
    pub chapter_id: i64,
    pub date_and_time: DateTime<Utc>,
    pub ends_at: Option<DateTime<Utc>>,
    pub description: Option<String>,
    /// `None` = invariato, `Some(None)` = rimuovi host
    pub host_id: Option<Option<i64>>,
    /// `None` = invariato, `Some(ids)` = sostituisci l'intero insieme
    pub sponsor_ids: Option<Vec<i64>>,
}

/// DTO per creare un nuovo workshop (senza workshop_id)
#[derive(Debug, Clone)]
pub struct CreateWorkshopDTO {
    pub chapter_id: i64,
    pub date_and_time: DateTime<Utc>,
    pub ends_at: Option<DateTime<Utc>>,
    pub host_id: Option<i64>,
    pub description: Option<String>,
    pub sponsor_ids: Vec<i64>,
}

impl From<WorkshopParams> for CreateWorkshopDTO {
    fn from(value: WorkshopParams) -> Self {
        Self {
            chapter_id: value.chapter_id,
            date_and_time: value.date_and_time,
            ends_at: value.ends_at,
            host_id: value.host_id.flatten(),
            description: value.description,
            sponsor_ids: value.sponsor_ids.unwrap_or_default(),
        }
    }
}

/// DTO per aggiornare un workshop (solo i campi `Some(_)` vengono modificati)
#[derive(Debug, Clone, Default)]
pub struct UpdateWorkshopDTO {
    pub chapter_id: Option<i64>,
    pub date_and_time: Option<DateTime<Utc>>,
    pub ends_at: Option<Option<DateTime<Utc>>>,
    pub host_id: Option<Option<i64>>,
    pub description: Option<Option<String>>,
    pub sponsor_ids: Option<Vec<i64>>,
}

impl From<WorkshopParams> for UpdateWorkshopDTO {
    fn from(value: WorkshopParams) -> Self {
        Self {
            chapter_id: Some(value.chapter_id),
            date_and_time: Some(value.date_and_time),
            ends_at: Some(value.ends_at),
            host_id: value.host_id,
            description: Some(value.description),
            sponsor_ids: value.sponsor_ids,
        }
    }
}
