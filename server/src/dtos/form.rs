//! Form helpers - Decodifica dei form HTML e messaggi di validazione leggibili
//!
//! I form arrivano come coppie chiave/valore ordinate (`Form<Vec<(String, String)>>`),
//! così le select multiple con chiavi ripetute non perdono valori.

use validator::ValidationErrors;

/// Coppie chiave/valore di un form urlencoded
pub type FormPairs = Vec<(String, String)>;

/// Ultimo valore inviato per `key`, se presente
pub fn last_value(pairs: &[(String, String)], key: &str) -> Option<String> {
    pairs
        .iter()
        .rev()
        .find(|(k, _)| k == key)
        .map(|(_, v)| v.trim().to_string())
}

/// Tutti i valori non vuoti inviati per `key`. `None` se la chiave non compare affatto.
pub fn all_values(pairs: &[(String, String)], key: &str) -> Option<Vec<String>> {
    let mut seen = false;
    let values: Vec<String> = pairs
        .iter()
        .filter(|(k, _)| k == key)
        .inspect(|_| seen = true)
        .map(|(_, v)| v.trim().to_string())
        .filter(|v| !v.is_empty())
        .collect();

    seen.then_some(values)
}

/// Trasforma il nome di un campo nell'etichetta mostrata all'utente
/// (`chapter_id` -> `Chapter`, `begins_at` -> `Begins at`, `sponsor_ids` -> `Sponsors`)
pub fn humanize_field(field: &str) -> String {
    if field == "__all__" {
        return String::new();
    }

    let base = if let Some(stripped) = field.strip_suffix("_ids") {
        format!("{stripped}s")
    } else if let Some(stripped) = field.strip_suffix("_id") {
        stripped.to_string()
    } else {
        field.to_string()
    };

    let spaced = base.replace('_', " ");
    let mut chars = spaced.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

/// Messaggi completi ("Chapter can't be blank") ordinati e senza duplicati
pub fn full_messages(errors: &ValidationErrors) -> Vec<String> {
    let mut messages: Vec<String> = errors
        .field_errors()
        .into_iter()
        .flat_map(|(field, errs)| {
            let label = humanize_field(&field);
            errs.iter().map(move |err| {
                let message = err
                    .message
                    .as_ref()
                    .map(|m| m.to_string())
                    .unwrap_or_else(|| format!("is invalid ({})", err.code));
                if label.is_empty() {
                    message
                } else {
                    format!("{label} {message}")
                }
            })
        })
        .collect();

    messages.sort();
    messages.dedup();
    messages
}
