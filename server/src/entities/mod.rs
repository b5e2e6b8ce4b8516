//! Entities module - Entità del dominio applicativo
//!
//! Questo modulo contiene tutte le entità (models) che rappresentano i dati persistiti nel database.
//! Ogni entity corrisponde a una tabella nel database.

pub mod chapter;
pub mod enums;
pub mod invitation;
pub mod member;
pub mod sponsor;
pub mod subscription;
pub mod workshop;

// Re-exports per facilitare l'import
pub use chapter::Chapter;
pub use enums::{Audience, InvitationStatus, ResourceType, Role};
pub use invitation::WorkshopInvitation;
pub use member::{Member, MemberRole};
pub use sponsor::Sponsor;
pub use subscription::Subscription;
pub use workshop::Workshop;
