//! Repositories module - Coordinatore per tutti i repository del progetto
//!
//! Questo modulo organizza i repository in sotto-moduli separati per una migliore manutenibilità.
//! Ogni repository gestisce le operazioni di database per una specifica entità.

// ************************* NOTA SU SQLX ************************* //

/*
   Le query usano le funzioni runtime `sqlx::query` / `sqlx::query_as::<_, T>` con `.bind(..)`
   e le entity derivano `sqlx::FromRow`. Niente macro `query!`: quelle richiedono un database
   raggiungibile (o i metadati offline) in fase di compilazione.

   Number of Rows   Method to Call              Returns
   None             .execute(...).await         sqlx::Result<SqliteQueryResult>   (INSERT/UPDATE/DELETE)
   Zero or One      .fetch_optional(...).await  sqlx::Result<Option<T>>
   Exactly One      .fetch_one(...).await       sqlx::Result<T>                   (aggregate, COUNT)
   Multiple         .fetch_all(...).await       sqlx::Result<Vec<T>>

   Gli errori vengono propagati con `?` fino al service, che li converte in AppError.
   Le operazioni su più tabelle (workshop + sponsor) girano in una transazione.
*/

// ************************* MODULI REPOSITORY ************************* //

pub mod chapter;
pub mod invitation;
pub mod member;
pub mod sponsor;
pub mod traits;
pub mod workshop;

// Re-esportazione dei trait per facilitare l'import
pub use traits::{Create, Delete, Read, ReadMany, Update};

// Re-esportazione delle struct dei repository per facilitare l'import
pub use chapter::ChapterRepository;
pub use invitation::InvitationRepository;
pub use member::MemberRepository;
pub use sponsor::SponsorRepository;
pub use workshop::WorkshopRepository;
