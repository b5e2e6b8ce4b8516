//! Query DTOs - Parametri di query string

use serde::Deserialize;

/// `?format=text` sugli export dei partecipanti
#[derive(Deserialize, Debug, Default)]
pub struct FormatQuery {
    #[serde(default)]
    pub format: Option<String>,
}
