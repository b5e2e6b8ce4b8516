//! ChapterRepository - Repository per la directory dei capitoli

use super::{Create, Delete, Read};
use crate::dtos::CreateChapterDTO;
use crate::entities::Chapter;
use sqlx::{Error, SqlitePool};

pub struct ChapterRepository {
    connection_pool: SqlitePool,
}

impl ChapterRepository {
    pub fn new(connection_pool: SqlitePool) -> Self {
        Self { connection_pool }
    }

    /// Tutti i capitoli in ordine alfabetico (usati nelle select dei form)
    pub async fn find_all(&self) -> Result<Vec<Chapter>, Error> {
        let chapters = sqlx::query_as::<_, Chapter>(
            "SELECT chapter_id, name, city, email FROM chapters ORDER BY name",
        )
        .fetch_all(&self.connection_pool)
        .await?;

        Ok(chapters)
    }

    /// Il nome è univoco, il confronto ignora maiuscole/minuscole
    pub async fn find_by_name(&self, name: &str) -> Result<Option<Chapter>, Error> {
        let chapter = sqlx::query_as::<_, Chapter>(
            "SELECT chapter_id, name, city, email FROM chapters WHERE name = ? COLLATE NOCASE",
        )
        .bind(name)
        .fetch_optional(&self.connection_pool)
        .await?;

        Ok(chapter)
    }
}

impl Create<Chapter, CreateChapterDTO> for ChapterRepository {
    async fn create(&self, data: &CreateChapterDTO) -> Result<Chapter, Error> {
        let result = sqlx::query("INSERT INTO chapters (name, city, email) VALUES (?, ?, ?)")
            .bind(&data.name)
            .bind(&data.city)
            .bind(&data.email)
            .execute(&self.connection_pool)
            .await?;

        Ok(Chapter {
            chapter_id: result.last_insert_rowid(),
            name: data.name.clone(),
            city: data.city.clone(),
            email: data.email.clone(),
        })
    }
}

impl Read<Chapter, i64> for ChapterRepository {
    async fn read(&self, id: &i64) -> Result<Option<Chapter>, Error> {
        let chapter = sqlx::query_as::<_, Chapter>(
            "SELECT chapter_id, name, city, email FROM chapters WHERE chapter_id = ?",
        )
        .bind(id)
        .fetch_optional(&self.connection_pool)
        .await?;

        Ok(chapter)
    }
}

impl Delete<i64> for ChapterRepository {
    /// Fallisce con un errore di foreign key se esistono workshop del capitolo
    async fn delete(&self, id: &i64) -> Result<(), Error> {
        sqlx::query("DELETE FROM chapters WHERE chapter_id = ?")
            .bind(id)
            .execute(&self.connection_pool)
            .await?;

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[sqlx::test(fixtures(path = "../../fixtures", scripts("chapters")))]
    async fn test_find_all_sorted_by_name(pool: SqlitePool) -> sqlx::Result<()> {
        let repo = ChapterRepository::new(pool);
        let names: Vec<String> = repo.find_all().await?.into_iter().map(|c| c.name).collect();
        assert_eq!(names, vec!["Berlin", "Brighton", "London"]);
        Ok(())
    }

    #[sqlx::test(fixtures(path = "../../fixtures", scripts("chapters")))]
    async fn test_find_by_name_ignores_case(pool: SqlitePool) -> sqlx::Result<()> {
        let repo = ChapterRepository::new(pool);
        let chapter = repo.find_by_name("lonDON").await?;
        assert_eq!(chapter.map(|c| c.chapter_id), Some(1));
        Ok(())
    }

    #[sqlx::test(fixtures(path = "../../fixtures", scripts("chapters", "sponsors", "workshops")))]
    async fn test_delete_referenced_chapter_fails(pool: SqlitePool) -> sqlx::Result<()> {
        let repo = ChapterRepository::new(pool);

        assert!(repo.delete(&1).await.is_err());
        assert!(repo.read(&1).await?.is_some());

        repo.delete(&3).await?;
        assert!(repo.read(&3).await?.is_none());
        Ok(())
    }
}
