//! WorkshopRepository - Repository per i workshop e i relativi sponsor

use super::{Create, Read, Update};
use crate::dtos::{CreateWorkshopDTO, UpdateWorkshopDTO};
use crate::entities::Workshop;
use sqlx::{Error, QueryBuilder, Sqlite, SqlitePool, Transaction};

const WORKSHOP_COLUMNS: &str = "workshop_id, chapter_id, date_and_time, ends_at, host_id, description";

pub struct WorkshopRepository {
    connection_pool: SqlitePool,
}

impl WorkshopRepository {
    pub fn new(connection_pool: SqlitePool) -> Self {
        Self { connection_pool }
    }

    /// Workshop di un capitolo, dal più recente
    pub async fn find_many_by_chapter_id(&self, chapter_id: &i64) -> Result<Vec<Workshop>, Error> {
        let workshops = sqlx::query_as::<_, Workshop>(&format!(
            "SELECT {WORKSHOP_COLUMNS} FROM workshops WHERE chapter_id = ? ORDER BY date_and_time DESC, workshop_id DESC"
        ))
        .bind(chapter_id)
        .fetch_all(&self.connection_pool)
        .await?;

        Ok(workshops)
    }

    pub async fn count_by_chapter_id(&self, chapter_id: &i64) -> Result<i64, Error> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM workshops WHERE chapter_id = ?")
            .bind(chapter_id)
            .fetch_one(&self.connection_pool)
            .await?;

        Ok(count)
    }

    /// Id degli sponsor associati al workshop
    pub async fn find_sponsor_ids(&self, workshop_id: &i64) -> Result<Vec<i64>, Error> {
        let ids: Vec<i64> = sqlx::query_scalar(
            "SELECT sponsor_id FROM workshop_sponsors WHERE workshop_id = ? ORDER BY sponsor_id",
        )
        .bind(workshop_id)
        .fetch_all(&self.connection_pool)
        .await?;

        Ok(ids)
    }

    /// Sostituisce l'intero insieme degli sponsor del workshop
    async fn replace_sponsors(
        tx: &mut Transaction<'_, Sqlite>,
        workshop_id: i64,
        sponsor_ids: &[i64],
    ) -> Result<(), Error> {
        sqlx::query("DELETE FROM workshop_sponsors WHERE workshop_id = ?")
            .bind(workshop_id)
            .execute(&mut **tx)
            .await?;

        for sponsor_id in sponsor_ids {
            sqlx::query("INSERT INTO workshop_sponsors (workshop_id, sponsor_id) VALUES (?, ?)")
                .bind(workshop_id)
                .bind(sponsor_id)
                .execute(&mut **tx)
                .await?;
        }

        Ok(())
    }
}

impl Create<Workshop, CreateWorkshopDTO> for WorkshopRepository {
    async fn create(&self, data: &CreateWorkshopDTO) -> Result<Workshop, Error> {
        // workshop e sponsor nella stessa transazione
        let mut tx = self.connection_pool.begin().await?;

        let result = sqlx::query(
            r#"
            INSERT INTO workshops (chapter_id, date_and_time, ends_at, host_id, description)
            VALUES (?, ?, ?, ?, ?)
            "#,
        )
        .bind(data.chapter_id)
        .bind(data.date_and_time)
        .bind(data.ends_at)
        .bind(data.host_id)
        .bind(&data.description)
        .execute(&mut *tx)
        .await?;

        let new_id = result.last_insert_rowid();
        Self::replace_sponsors(&mut tx, new_id, &data.sponsor_ids).await?;

        tx.commit().await?;

        Ok(Workshop {
            workshop_id: new_id,
            chapter_id: data.chapter_id,
            date_and_time: data.date_and_time,
            ends_at: data.ends_at,
            host_id: data.host_id,
            description: data.description.clone(),
        })
    }
}

impl Read<Workshop, i64> for WorkshopRepository {
    async fn read(&self, id: &i64) -> Result<Option<Workshop>, Error> {
        let workshop = sqlx::query_as::<_, Workshop>(&format!(
            "SELECT {WORKSHOP_COLUMNS} FROM workshops WHERE workshop_id = ?"
        ))
        .bind(id)
        .fetch_optional(&self.connection_pool)
        .await?;

        Ok(workshop)
    }
}

impl Update<Workshop, UpdateWorkshopDTO, i64> for WorkshopRepository {
    async fn update(&self, id: &i64, data: &UpdateWorkshopDTO) -> Result<Workshop, Error> {
        // First, get the current workshop to ensure it exists
        self.read(id).await?.ok_or(Error::RowNotFound)?;

        let mut tx = self.connection_pool.begin().await?;

        // UPDATE dinamico solo sui campi presenti
        let mut query_builder: QueryBuilder<Sqlite> = QueryBuilder::new("UPDATE workshops SET ");
        let mut has_fields = false;
        {
            let mut separated = query_builder.separated(", ");
            if let Some(chapter_id) = data.chapter_id {
                separated.push("chapter_id = ");
                separated.push_bind_unseparated(chapter_id);
                has_fields = true;
            }
            if let Some(date_and_time) = data.date_and_time {
                separated.push("date_and_time = ");
                separated.push_bind_unseparated(date_and_time);
                has_fields = true;
            }
            if let Some(ends_at) = data.ends_at {
                separated.push("ends_at = ");
                separated.push_bind_unseparated(ends_at);
                has_fields = true;
            }
            if let Some(host_id) = data.host_id {
                separated.push("host_id = ");
                separated.push_bind_unseparated(host_id);
                has_fields = true;
            }
            if let Some(ref description) = data.description {
                separated.push("description = ");
                separated.push_bind_unseparated(description.clone());
                has_fields = true;
            }
        }

        if has_fields {
            query_builder.push(" WHERE workshop_id = ");
            query_builder.push_bind(*id);
            query_builder.build().execute(&mut *tx).await?;
        }

        if let Some(ref sponsor_ids) = data.sponsor_ids {
            Self::replace_sponsors(&mut tx, *id, sponsor_ids).await?;
        }

        tx.commit().await?;

        // Fetch and return the updated workshop
        self.read(id).await?.ok_or(Error::RowNotFound)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};

    #[sqlx::test(fixtures(path = "../../fixtures", scripts("chapters", "sponsors", "workshops")))]
    async fn test_find_many_by_chapter_most_recent_first(pool: SqlitePool) -> sqlx::Result<()> {
        let repo = WorkshopRepository::new(pool);

        let ids: Vec<i64> = repo
            .find_many_by_chapter_id(&1)
            .await?
            .into_iter()
            .map(|w| w.workshop_id)
            .collect();
        assert_eq!(ids, vec![5, 4, 3, 2, 1]);
        assert_eq!(repo.count_by_chapter_id(&3).await?, 0);
        Ok(())
    }

    #[sqlx::test(fixtures(path = "../../fixtures", scripts("chapters", "sponsors")))]
    async fn test_create_with_sponsors(pool: SqlitePool) -> sqlx::Result<()> {
        let repo = WorkshopRepository::new(pool);

        let workshop = repo
            .create(&CreateWorkshopDTO {
                chapter_id: 2,
                date_and_time: Utc.with_ymd_and_hms(2026, 12, 12, 10, 0, 0).unwrap(),
                ends_at: None,
                host_id: Some(3),
                description: None,
                sponsor_ids: vec![1, 2],
            })
            .await?;

        let stored = repo.read(&workshop.workshop_id).await?.unwrap();
        assert_eq!(stored.date_and_time, workshop.date_and_time);
        assert_eq!(stored.host_id, Some(3));
        assert_eq!(repo.find_sponsor_ids(&workshop.workshop_id).await?, vec![1, 2]);
        Ok(())
    }

    #[sqlx::test(fixtures(path = "../../fixtures", scripts("chapters", "sponsors", "workshops")))]
    async fn test_update_replaces_sponsor_set(pool: SqlitePool) -> sqlx::Result<()> {
        let repo = WorkshopRepository::new(pool);

        let updated = repo
            .update(
                &1,
                &UpdateWorkshopDTO {
                    host_id: Some(None),
                    sponsor_ids: Some(vec![3]),
                    ..Default::default()
                },
            )
            .await?;

        assert_eq!(updated.host_id, None);
        assert_eq!(updated.chapter_id, 1);
        assert_eq!(repo.find_sponsor_ids(&1).await?, vec![3]);
        Ok(())
    }

    #[sqlx::test(fixtures(path = "../../fixtures", scripts("chapters", "sponsors", "workshops")))]
    async fn test_update_missing_workshop(pool: SqlitePool) -> sqlx::Result<()> {
        let repo = WorkshopRepository::new(pool);

        let result = repo.update(&999, &UpdateWorkshopDTO::default()).await;
        assert!(matches!(result, Err(Error::RowNotFound)));
        Ok(())
    }
}
