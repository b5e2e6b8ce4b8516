use planner::core::{AppState, Config};
use planner::create_router;
use planner::dtos::{CreateMemberDTO, GrantRoleDTO};
use planner::entities::Member;
use planner::mailer::{LogTransport, MailQueue};
use planner::repositories::{Create, MemberRepository};
use sqlx::SqlitePool;
use sqlx::sqlite::SqlitePoolOptions;
use std::sync::Arc;
use tracing::info;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("planner=info,tower_http=info")),
        )
        .init();

    let config = Config::from_env()?;
    config.print_info();

    let pool = SqlitePoolOptions::new()
        .max_connections(config.max_connections)
        .connect(&config.database_url)
        .await?;

    sqlx::migrate!().run(&pool).await?;
    info!("Database migrations applied");

    if let (Some(email), Some(password)) = (&config.admin_email, &config.admin_password) {
        bootstrap_admin(&pool, email, password).await?;
    }

    let (mail_queue, _mail_worker) =
        MailQueue::start(pool.clone(), Arc::new(LogTransport), config.mail_from.clone());

    let state = Arc::new(AppState::new(pool, config.jwt_secret.clone(), mail_queue));
    let app = create_router(state);

    let addr = format!("{}:{}", config.server_host, config.server_port);
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    info!("Server listening on http://{}", addr);

    axum::serve(listener, app).await?;

    Ok(())
}

/// Crea (se manca) l'amministratore indicato nella configurazione
async fn bootstrap_admin(
    pool: &SqlitePool,
    email: &str,
    password: &str,
) -> Result<(), Box<dyn std::error::Error>> {
    let members = MemberRepository::new(pool.clone());

    let admin = match members.find_by_email(email).await? {
        Some(member) => member,
        None => {
            members
                .create(&CreateMemberDTO {
                    name: "Admin".to_string(),
                    surname: "User".to_string(),
                    email: email.to_string(),
                    password: Some(Member::hash_password(password)?),
                })
                .await?
        }
    };

    members.add_role(&admin.member_id, &GrantRoleDTO::admin()).await?;
    info!("Admin {} ready", email);
    Ok(())
}
