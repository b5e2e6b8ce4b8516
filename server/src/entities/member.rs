//! Member entity - Membro (amministratore, organizzatore o partecipante)

use super::enums::{ResourceType, Role};
use bcrypt::{DEFAULT_COST, hash, verify};
use serde::{Deserialize, Serialize};

#[derive(Serialize, Deserialize, Debug, Clone, sqlx::FromRow)]
pub struct Member {
    pub member_id: i64,
    pub name: String,
    pub surname: String,
    pub email: String,
    #[serde(skip_serializing)]
    pub password: Option<String>, // hash bcrypt, assente per chi non accede all'area admin
}

impl Member {
    pub fn full_name(&self) -> String {
        format!("{} {}", self.name, self.surname)
    }

    /// Verify if target_password matches the stored hashed password
    pub fn verify_password(&self, target_password: &str) -> bool {
        match &self.password {
            Some(hashed) => verify(target_password, hashed).unwrap_or(false),
            None => false,
        }
    }

    /// Hash a password using bcrypt with default cost
    pub fn hash_password(password: &str) -> Result<String, bcrypt::BcryptError> {
        let hash = hash(password, DEFAULT_COST)?;
        Ok(hash)
    }
}

/// Ruolo concesso ad un membro. `resource_id = None` estende il ruolo
/// a tutte le risorse del tipo indicato.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq, sqlx::FromRow)]
pub struct MemberRole {
    pub member_id: i64,
    pub role: Role,
    pub resource_type: Option<ResourceType>,
    pub resource_id: Option<i64>,
}
