//! Configurazione applicazione caricata da variabili d'ambiente (e `.env`)

use dotenv::dotenv;
use std::env;
use tracing::{info, warn};

const DEFAULT_JWT_SECRET: &str = "un segreto meno bello";

#[derive(Debug, Clone)]
pub struct Config {
    pub database_url: String,
    pub jwt_secret: String,
    pub server_host: String,
    pub server_port: u16,
    pub max_connections: u32,
    pub mail_from: String,
    pub app_env: String,
    /// Credenziali opzionali dell'amministratore creato all'avvio
    pub admin_email: Option<String>,
    pub admin_password: Option<String>,
}

impl Config {
    /// Carica la configurazione dalle variabili d'ambiente
    /// Chiama dotenv() automaticamente
    pub fn from_env() -> Result<Self, String> {
        dotenv().ok();

        let database_url =
            env::var("DATABASE_URL").unwrap_or_else(|_| "sqlite://planner.db?mode=rwc".to_string());

        let jwt_secret = env::var("JWT_SECRET").unwrap_or_else(|_| {
            warn!("JWT_SECRET not set, using default (not secure for production!)");
            DEFAULT_JWT_SECRET.to_string()
        });

        let server_host = env::var("SERVER_HOST").unwrap_or_else(|_| "127.0.0.1".to_string());

        let server_port = env::var("SERVER_PORT")
            .unwrap_or_else(|_| "3000".to_string())
            .parse::<u16>()
            .map_err(|_| "Invalid SERVER_PORT: must be a number between 0-65535".to_string())?;

        let max_connections = env::var("DB_MAX_CONNECTIONS")
            .unwrap_or_else(|_| "5".to_string())
            .parse::<u32>()
            .map_err(|_| "Invalid DB_MAX_CONNECTIONS: must be a positive number".to_string())?;

        let mail_from =
            env::var("MAIL_FROM").unwrap_or_else(|_| "workshops@planner.local".to_string());

        let app_env = env::var("APP_ENV").unwrap_or_else(|_| "development".to_string());

        let admin_email = env::var("ADMIN_EMAIL").ok().filter(|v| !v.is_empty());
        let admin_password = env::var("ADMIN_PASSWORD").ok().filter(|v| !v.is_empty());
        if admin_email.is_some() != admin_password.is_some() {
            return Err("ADMIN_EMAIL and ADMIN_PASSWORD must be set together".to_string());
        }

        Ok(Config {
            database_url,
            jwt_secret,
            server_host,
            server_port,
            max_connections,
            mail_from,
            app_env,
            admin_email,
            admin_password,
        })
    }

    /// Logga la configurazione (nascondendo i segreti)
    pub fn print_info(&self) {
        info!("Environment: {}", self.app_env);
        info!("Server Address: {}:{}", self.server_host, self.server_port);
        info!("Database: {}", Self::mask_url(&self.database_url));
        info!("Max DB Connections: {}", self.max_connections);
        info!("Mail sender: {}", self.mail_from);
        if self.jwt_secret == DEFAULT_JWT_SECRET {
            warn!("JWT Secret: USING DEFAULT (INSECURE!)");
        } else {
            info!("JWT Secret: custom secret configured");
        }
    }

    /// Maschera l'URL del database per il logging
    fn mask_url(url: &str) -> String {
        if let (Some(at_pos), Some(scheme_end)) = (url.find('@'), url.find("://")) {
            let scheme = &url[..scheme_end + 3];
            let after_at = &url[at_pos..];
            return format!("{}***{}", scheme, after_at);
        }
        // sqlite: il path non contiene credenziali
        url.to_string()
    }
}
