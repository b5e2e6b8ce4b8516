//! DTOs module - Data Transfer Objects
//!
//! Questo modulo contiene i form inviati dal browser e i DTO passati ai repository.
//! I DTOs separano la rappresentazione esterna (form HTML) dalla rappresentazione interna (entities).

pub mod chapter;
pub mod form;
pub mod invitation;
pub mod member;
pub mod query;
pub mod sponsor;
pub mod workshop;

// Re-exports per facilitare l'import
pub use chapter::{ChapterForm, CreateChapterDTO};
pub use form::{FormPairs, full_messages};
pub use invitation::{
    AttendeeDTO, CreateInvitationDTO, InvitationResponseForm, InvitationSummary,
    UpdateInvitationDTO,
};
pub use member::{CreateMemberDTO, CreateSubscriptionDTO, GrantRoleDTO, LoginForm};
pub use query::FormatQuery;
pub use sponsor::{CreateSponsorDTO, SponsorForm};
pub use workshop::{CreateWorkshopDTO, UpdateWorkshopDTO, WorkshopForm, WorkshopParams};
