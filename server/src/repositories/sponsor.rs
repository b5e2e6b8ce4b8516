//! SponsorRepository - Repository per la directory degli sponsor

use super::{Create, Read, ReadMany};
use crate::dtos::CreateSponsorDTO;
use crate::entities::Sponsor;
use sqlx::{Error, QueryBuilder, Sqlite, SqlitePool};

pub struct SponsorRepository {
    connection_pool: SqlitePool,
}

impl SponsorRepository {
    pub fn new(connection_pool: SqlitePool) -> Self {
        Self { connection_pool }
    }

    pub async fn find_all(&self) -> Result<Vec<Sponsor>, Error> {
        let sponsors = sqlx::query_as::<_, Sponsor>(
            "SELECT sponsor_id, name, website FROM sponsors ORDER BY name",
        )
        .fetch_all(&self.connection_pool)
        .await?;

        Ok(sponsors)
    }

    /// Sponsor associati ad un workshop (host escluso se non è anche sponsor)
    pub async fn find_many_by_workshop_id(&self, workshop_id: &i64) -> Result<Vec<Sponsor>, Error> {
        let sponsors = sqlx::query_as::<_, Sponsor>(
            r#"
            SELECT s.sponsor_id, s.name, s.website
            FROM sponsors s
            JOIN workshop_sponsors ws ON ws.sponsor_id = s.sponsor_id
            WHERE ws.workshop_id = ?
            ORDER BY s.name
            "#,
        )
        .bind(workshop_id)
        .fetch_all(&self.connection_pool)
        .await?;

        Ok(sponsors)
    }
}

impl Create<Sponsor, CreateSponsorDTO> for SponsorRepository {
    async fn create(&self, data: &CreateSponsorDTO) -> Result<Sponsor, Error> {
        let result = sqlx::query("INSERT INTO sponsors (name, website) VALUES (?, ?)")
            .bind(&data.name)
            .bind(&data.website)
            .execute(&self.connection_pool)
            .await?;

        Ok(Sponsor {
            sponsor_id: result.last_insert_rowid(),
            name: data.name.clone(),
            website: data.website.clone(),
        })
    }
}

impl Read<Sponsor, i64> for SponsorRepository {
    async fn read(&self, id: &i64) -> Result<Option<Sponsor>, Error> {
        let sponsor = sqlx::query_as::<_, Sponsor>(
            "SELECT sponsor_id, name, website FROM sponsors WHERE sponsor_id = ?",
        )
        .bind(id)
        .fetch_optional(&self.connection_pool)
        .await?;

        Ok(sponsor)
    }
}

impl ReadMany<Sponsor, i64> for SponsorRepository {
    async fn read_many(&self, ids: &[i64]) -> Result<Vec<Sponsor>, Error> {
        if ids.is_empty() {
            return Ok(Vec::new());
        }

        // WHERE IN con un placeholder per ogni id
        let mut query_builder: QueryBuilder<Sqlite> =
            QueryBuilder::new("SELECT sponsor_id, name, website FROM sponsors WHERE sponsor_id IN (");
        let mut separated = query_builder.separated(", ");
        for id in ids {
            separated.push_bind(*id);
        }
        separated.push_unseparated(") ORDER BY name");

        let sponsors = query_builder
            .build_query_as::<Sponsor>()
            .fetch_all(&self.connection_pool)
            .await?;

        Ok(sponsors)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[sqlx::test(fixtures(path = "../../fixtures", scripts("sponsors")))]
    async fn test_read_many_skips_unknown_ids(pool: SqlitePool) -> sqlx::Result<()> {
        let repo = SponsorRepository::new(pool);

        let sponsors = repo.read_many(&[3, 1, 42]).await?;
        let names: Vec<&str> = sponsors.iter().map(|s| s.name.as_str()).collect();
        assert_eq!(names, vec!["Acme Corp", "Initech"]);

        assert!(repo.read_many(&[]).await?.is_empty());
        Ok(())
    }
}
