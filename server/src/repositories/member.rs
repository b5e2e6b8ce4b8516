//! MemberRepository - Repository per membri, ruoli e iscrizioni ai capitoli

use super::{Create, Read};
use crate::dtos::{CreateMemberDTO, CreateSubscriptionDTO, GrantRoleDTO};
use crate::entities::{Audience, Member, MemberRole, Subscription};
use sqlx::{Error, SqlitePool};

const MEMBER_COLUMNS: &str = "member_id, name, surname, email, password";

pub struct MemberRepository {
    connection_pool: SqlitePool,
}

impl MemberRepository {
    pub fn new(connection_pool: SqlitePool) -> Self {
        Self { connection_pool }
    }

    /// L'email è univoca: è la chiave di login
    pub async fn find_by_email(&self, email: &str) -> Result<Option<Member>, Error> {
        let member = sqlx::query_as::<_, Member>(&format!(
            "SELECT {MEMBER_COLUMNS} FROM members WHERE email = ?"
        ))
        .bind(email)
        .fetch_optional(&self.connection_pool)
        .await?;

        Ok(member)
    }

    /// Tutti i ruoli concessi al membro
    pub async fn find_roles(&self, member_id: &i64) -> Result<Vec<MemberRole>, Error> {
        let roles = sqlx::query_as::<_, MemberRole>(
            "SELECT member_id, role, resource_type, resource_id FROM member_roles WHERE member_id = ?",
        )
        .bind(member_id)
        .fetch_all(&self.connection_pool)
        .await?;

        Ok(roles)
    }

    /// Concede un ruolo; se il membro lo ha già non inserisce duplicati
    pub async fn add_role(&self, member_id: &i64, grant: &GrantRoleDTO) -> Result<MemberRole, Error> {
        // `IS` confronta correttamente anche i NULL
        sqlx::query(
            r#"
            INSERT INTO member_roles (member_id, role, resource_type, resource_id)
            SELECT ?, ?, ?, ?
            WHERE NOT EXISTS (
                SELECT 1 FROM member_roles
                WHERE member_id = ? AND role = ? AND resource_type IS ? AND resource_id IS ?
            )
            "#,
        )
        .bind(member_id)
        .bind(grant.role)
        .bind(grant.resource_type)
        .bind(grant.resource_id)
        .bind(member_id)
        .bind(grant.role)
        .bind(grant.resource_type)
        .bind(grant.resource_id)
        .execute(&self.connection_pool)
        .await?;

        Ok(MemberRole {
            member_id: *member_id,
            role: grant.role,
            resource_type: grant.resource_type,
            resource_id: grant.resource_id,
        })
    }

    /// Iscrive un membro al pubblico (studenti o coach) di un capitolo
    pub async fn subscribe(&self, data: &CreateSubscriptionDTO) -> Result<Subscription, Error> {
        sqlx::query("INSERT OR IGNORE INTO subscriptions (member_id, chapter_id, role) VALUES (?, ?, ?)")
            .bind(data.member_id)
            .bind(data.chapter_id)
            .bind(data.role)
            .execute(&self.connection_pool)
            .await?;

        Ok(Subscription {
            member_id: data.member_id,
            chapter_id: data.chapter_id,
            role: data.role,
        })
    }

    /// Membri iscritti al capitolo con il ruolo richiesto: i destinatari degli inviti
    pub async fn find_audience(&self, chapter_id: &i64, role: &Audience) -> Result<Vec<Member>, Error> {
        let members = sqlx::query_as::<_, Member>(
            r#"
            SELECT m.member_id, m.name, m.surname, m.email, m.password
            FROM members m
            JOIN subscriptions s ON s.member_id = m.member_id
            WHERE s.chapter_id = ? AND s.role = ?
            ORDER BY m.member_id
            "#,
        )
        .bind(chapter_id)
        .bind(role)
        .fetch_all(&self.connection_pool)
        .await?;

        Ok(members)
    }
}

impl Create<Member, CreateMemberDTO> for MemberRepository {
    async fn create(&self, data: &CreateMemberDTO) -> Result<Member, Error> {
        let result = sqlx::query("INSERT INTO members (name, surname, email, password) VALUES (?, ?, ?, ?)")
            .bind(&data.name)
            .bind(&data.surname)
            .bind(&data.email)
            .bind(&data.password)
            .execute(&self.connection_pool)
            .await?;

        Ok(Member {
            member_id: result.last_insert_rowid(),
            name: data.name.clone(),
            surname: data.surname.clone(),
            email: data.email.clone(),
            password: data.password.clone(),
        })
    }
}

impl Read<Member, i64> for MemberRepository {
    async fn read(&self, id: &i64) -> Result<Option<Member>, Error> {
        let member = sqlx::query_as::<_, Member>(&format!(
            "SELECT {MEMBER_COLUMNS} FROM members WHERE member_id = ?"
        ))
        .bind(id)
        .fetch_optional(&self.connection_pool)
        .await?;

        Ok(member)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::entities::{ResourceType, Role};

    #[sqlx::test(fixtures(path = "../../fixtures", scripts("members", "chapters")))]
    async fn test_add_role_is_idempotent(pool: SqlitePool) -> sqlx::Result<()> {
        let repo = MemberRepository::new(pool);

        repo.add_role(&2, &GrantRoleDTO::organiser_of_chapters()).await?;
        repo.add_role(&2, &GrantRoleDTO::organiser_of_chapters()).await?;

        let roles = repo.find_roles(&2).await?;
        assert_eq!(roles.len(), 1);
        assert_eq!(roles[0].role, Role::Organiser);
        assert_eq!(roles[0].resource_type, Some(ResourceType::Chapter));
        assert_eq!(roles[0].resource_id, None);
        Ok(())
    }

    #[sqlx::test(fixtures(path = "../../fixtures", scripts("members", "chapters", "subscriptions")))]
    async fn test_find_audience_by_role(pool: SqlitePool) -> sqlx::Result<()> {
        let repo = MemberRepository::new(pool);

        let students = repo.find_audience(&1, &Audience::Student).await?;
        let emails: Vec<&str> = students.iter().map(|m| m.email.as_str()).collect();
        assert_eq!(emails, vec!["jane.doe@example.com", "john.smith@example.com"]);

        let coaches = repo.find_audience(&2, &Audience::Coach).await?;
        assert!(coaches.is_empty());
        Ok(())
    }

    #[sqlx::test(fixtures(path = "../../fixtures", scripts("members", "chapters", "subscriptions")))]
    async fn test_subscribe_adds_member_to_audience(pool: SqlitePool) -> sqlx::Result<()> {
        let repo = MemberRepository::new(pool);
        let subscription = CreateSubscriptionDTO {
            member_id: 8,
            chapter_id: 1,
            role: Audience::Coach,
        };

        repo.subscribe(&subscription).await?;
        repo.subscribe(&subscription).await?;

        let coaches = repo.find_audience(&1, &Audience::Coach).await?;
        let ids: Vec<i64> = coaches.iter().map(|m| m.member_id).collect();
        assert_eq!(ids, vec![6, 7, 8]);
        Ok(())
    }

    #[sqlx::test(fixtures(path = "../../fixtures", scripts("members")))]
    async fn test_create_and_find_by_email(pool: SqlitePool) -> sqlx::Result<()> {
        let repo = MemberRepository::new(pool);

        let created = repo
            .create(&CreateMemberDTO {
                name: "Katherine".to_string(),
                surname: "Johnson".to_string(),
                email: "katherine@example.com".to_string(),
                password: None,
            })
            .await?;

        let found = repo.find_by_email("katherine@example.com").await?.unwrap();
        assert_eq!(found.member_id, created.member_id);
        assert_eq!(found.full_name(), "Katherine Johnson");
        Ok(())
    }
}
