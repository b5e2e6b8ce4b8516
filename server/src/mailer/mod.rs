//! Mailer module - Coda asincrona per l'invio degli inviti ai workshop
//!
//! L'handler HTTP consegna un `MailJob` alla coda e risponde subito; il worker,
//! su un task tokio separato, risolve i destinatari, registra gli inviti e spedisce
//! le email tramite un `MailTransport`. Gli errori di consegna vengono loggati e
//! l'invito resta da spedire al dispatch successivo.

pub mod transport;

use crate::core::AppError;
use crate::dtos::CreateInvitationDTO;
use crate::entities::{Audience, Chapter, Member, Workshop};
use crate::repositories::{ChapterRepository, InvitationRepository, MemberRepository, Read, WorkshopRepository};
use crate::views::{humanize_date, time_range};
use sqlx::SqlitePool;
use std::sync::Arc;
use tokio::sync::mpsc::{UnboundedReceiver, UnboundedSender, unbounded_channel};
use tokio::task::JoinHandle;
use tracing::{debug, error, info, instrument, warn};

pub use transport::{EmailMessage, LogTransport, MailError, MailTransport, RecordingTransport};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MailJob {
    WorkshopInvitations { workshop_id: i64, audience: Audience },
}

/// Lato mittente della coda, condiviso dagli handler tramite `AppState`
#[derive(Clone)]
pub struct MailQueue {
    tx: UnboundedSender<MailJob>,
}

impl MailQueue {
    /// Avvia il worker e ritorna la coda collegata
    pub fn start(
        pool: SqlitePool,
        transport: Arc<dyn MailTransport>,
        sender: String,
    ) -> (Self, JoinHandle<()>) {
        let (tx, rx) = unbounded_channel();
        let worker = MailWorker::new(pool, transport, sender);
        let handle = tokio::spawn(worker.run(rx));
        (Self { tx }, handle)
    }

    /// Coda senza worker: ogni job viene perso. Usata quando i job vanno ispezionati a mano.
    pub fn detached() -> (Self, UnboundedReceiver<MailJob>) {
        let (tx, rx) = unbounded_channel();
        (Self { tx }, rx)
    }

    #[instrument(skip(self))]
    pub fn enqueue(&self, job: MailJob) -> Result<(), AppError> {
        self.tx.send(job).map_err(|e| {
            error!("Mail worker is gone, job dropped: {:?}", e.0);
            AppError::service_unavailable("Mail queue unavailable")
        })?;
        debug!("Mail job enqueued");
        Ok(())
    }
}

/// Consumatore della coda: possiede i propri repository
pub struct MailWorker {
    member: MemberRepository,
    chapter: ChapterRepository,
    workshop: WorkshopRepository,
    invitation: InvitationRepository,
    transport: Arc<dyn MailTransport>,
    sender: String,
}

impl MailWorker {
    pub fn new(pool: SqlitePool, transport: Arc<dyn MailTransport>, sender: String) -> Self {
        Self {
            member: MemberRepository::new(pool.clone()),
            chapter: ChapterRepository::new(pool.clone()),
            workshop: WorkshopRepository::new(pool.clone()),
            invitation: InvitationRepository::new(pool),
            transport,
            sender,
        }
    }

    pub async fn run(self, mut rx: UnboundedReceiver<MailJob>) {
        info!("Mail worker started");
        while let Some(job) = rx.recv().await {
            if let Err(e) = self.process(&job).await {
                error!("Mail job {:?} failed: {}", job, e);
            }
        }
        info!("Mail worker stopped: queue closed");
    }

    /// Esegue un job e ritorna il numero di email consegnate
    #[instrument(skip(self))]
    pub async fn process(&self, job: &MailJob) -> Result<usize, sqlx::Error> {
        match job {
            MailJob::WorkshopInvitations {
                workshop_id,
                audience,
            } => self.invite(*workshop_id, *audience).await,
        }
    }

    async fn invite(&self, workshop_id: i64, audience: Audience) -> Result<usize, sqlx::Error> {
        let Some(workshop) = self.workshop.read(&workshop_id).await? else {
            warn!("Workshop {} no longer exists, invitations skipped", workshop_id);
            return Ok(0);
        };
        let Some(chapter) = self.chapter.read(&workshop.chapter_id).await? else {
            warn!("Chapter {} not found for workshop {}", workshop.chapter_id, workshop_id);
            return Ok(0);
        };

        let members = self.member.find_audience(&chapter.chapter_id, &audience).await?;
        debug!("Found {} {} to invite", members.len(), audience.plural());

        let mut delivered = 0;
        for member in members {
            let invitation = CreateInvitationDTO {
                workshop_id,
                member_id: member.member_id,
                role: audience,
            };
            self.invitation.create_if_absent(&invitation).await?;
            // gli inviti la cui consegna è fallita restano senza `emailed_at` e vengono ritentati
            let Some(unsent) = self.invitation.find_unsent(&invitation).await? else {
                debug!("Member {} already invited", member.member_id);
                continue;
            };

            let message = invitation_email(&self.sender, &member, &workshop, &chapter, audience);
            match self.transport.deliver(&message) {
                Ok(()) => {
                    self.invitation.mark_emailed(&unsent.invitation_id).await?;
                    delivered += 1;
                }
                Err(e) => warn!("Failed to deliver invitation to {}: {}", member.email, e),
            }
        }

        info!(
            "Workshop {}: {} invitations to {} delivered",
            workshop_id,
            delivered,
            audience.plural()
        );
        Ok(delivered)
    }
}

pub fn invitation_email(
    sender: &str,
    member: &Member,
    workshop: &Workshop,
    chapter: &Chapter,
    audience: Audience,
) -> EmailMessage {
    let date = humanize_date(&workshop.date_and_time, false);
    let mut body = format!(
        "Hi {},\n\nYou are invited to the {} workshop as a {}.\n\nDate: {}\nTime: {}\n",
        member.name,
        chapter.name,
        audience,
        date,
        time_range(&workshop.date_and_time, workshop.ends_at.as_ref()),
    );
    if let Some(description) = &workshop.description {
        body.push_str(&format!("\n{description}\n"));
    }
    body.push_str("\nReply to this email to let us know whether you can attend.\n");

    EmailMessage {
        from: sender.to_string(),
        to: member.email.clone(),
        subject: format!("Workshop invitation: {} on {}", chapter.name, date),
        body,
    }
}
