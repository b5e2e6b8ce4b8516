#![allow(dead_code)]

use axum_test::TestServer;
use planner::core::{AppState, encode_jwt};
use planner::mailer::{LogTransport, MailQueue, MailTransport, RecordingTransport};
use sqlx::SqlitePool;
use std::sync::Arc;
use std::time::Duration;

pub const JWT_SECRET: &str = "ilmiobellissimosegretochevaassolutamentecambiato";
pub const MAIL_FROM: &str = "workshops@planner.local";

/// Organizzatore di tutti i capitoli (fixture `members`)
pub const ORGANISER: (i64, &str) = (1, "organiser@example.com");
/// Membro senza ruoli
pub const VISITOR: (i64, &str) = (2, "visitor@example.com");
/// Organizzatore del solo capitolo 2 (Berlin)
pub const LOCAL_ORGANISER: (i64, &str) = (3, "local.organiser@example.com");

/// Crea un AppState per i test, con un worker che scrive le email nel log
pub fn create_test_state(pool: SqlitePool) -> Arc<AppState> {
    create_test_state_with_transport(pool, Arc::new(LogTransport))
}

/// Crea un AppState il cui worker usa il trasporto indicato
pub fn create_test_state_with_transport(
    pool: SqlitePool,
    transport: Arc<dyn MailTransport>,
) -> Arc<AppState> {
    let (mail_queue, _worker) = MailQueue::start(pool.clone(), transport, MAIL_FROM.to_string());
    Arc::new(AppState::new(pool, JWT_SECRET.to_string(), mail_queue))
}

/// Crea un TestServer per i test
///
/// # Arguments
/// * `state` - AppState da utilizzare per il server
///
/// # Returns
/// TestServer configurato e pronto per eseguire richieste
pub fn create_test_server(state: Arc<AppState>) -> TestServer {
    let app = planner::create_router(state);
    TestServer::new(app).expect("Failed to create test server")
}

/// Genera un JWT token valido 24 ore per il membro indicato
pub fn create_test_jwt((member_id, email): (i64, &str)) -> String {
    encode_jwt(email.to_string(), member_id, JWT_SECRET).expect("Failed to create JWT token")
}

/// Valore dell'header Authorization per il membro indicato
pub fn bearer(member: (i64, &str)) -> String {
    format!("Bearer {}", create_test_jwt(member))
}

/// Attende che il worker abbia consegnato almeno `expected` email
pub async fn wait_for_deliveries(transport: &RecordingTransport, expected: usize) -> usize {
    for _ in 0..50 {
        let delivered = transport.delivered().len();
        if delivered >= expected {
            return delivered;
        }
        tokio::time::sleep(Duration::from_millis(20)).await;
    }
    transport.delivered().len()
}

/// Attende che il worker abbia tentato almeno `expected` consegne
pub async fn wait_for_attempts(transport: &RecordingTransport, expected: usize) -> usize {
    for _ in 0..50 {
        let attempts = transport.attempts();
        if attempts >= expected {
            return attempts;
        }
        tokio::time::sleep(Duration::from_millis(20)).await;
    }
    transport.attempts()
}

/// Porzione di HTML compresa tra `start` e la successiva occorrenza di `end`
pub fn html_section<'a>(html: &'a str, start: &str, end: &str) -> &'a str {
    let from = html.find(start).expect("section start not found");
    let rest = &html[from..];
    let to = rest.find(end).expect("section end not found");
    &rest[..to]
}
