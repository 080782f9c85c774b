//! SeaORM implementation of ContactRepository

use async_trait::async_trait;
use chrono::Utc;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, PaginatorTrait, QueryFilter,
    QueryOrder, QuerySelect, Set, SqlErr,
};
use tracing::debug;

use crate::domain::contact::rules;
use crate::domain::{
    Contact, ContactRepository, CreateContactDto, DomainError, DomainResult, UpdateContactDto,
};
use crate::infrastructure::database::entities::contact;
use crate::shared::{PageRequest, PaginatedResult};

pub struct SeaOrmContactRepository {
    db: DatabaseConnection,
}

impl SeaOrmContactRepository {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

// ── Conversion helpers ──────────────────────────────────────────

fn contact_model_to_domain(model: contact::Model) -> Contact {
    Contact {
        id: model.id,
        first_name: model.first_name,
        last_name: model.last_name,
        email: model.email,
        company: model.company,
        created_at: model.created_at,
        updated_at: model.updated_at,
    }
}

/// The unique index on `email` is the last line of defence when two
/// writers race past the service-level check.
fn write_err(e: sea_orm::DbErr) -> DomainError {
    match e.sql_err() {
        Some(SqlErr::UniqueConstraintViolation(detail)) => {
            debug!("Unique constraint violation: {}", detail);
            rules::email_taken()
        }
        _ => DomainError::from(e),
    }
}

// ── Repository implementation ───────────────────────────────────

#[async_trait]
impl ContactRepository for SeaOrmContactRepository {
    async fn list_contacts(&self, page: PageRequest) -> DomainResult<PaginatedResult<Contact>> {
        let query = contact::Entity::find().order_by_desc(contact::Column::Id);

        let total = query.clone().count(&self.db).await?;

        let models = query
            .offset(page.offset())
            .limit(page.per_page)
            .all(&self.db)
            .await?;

        let items: Vec<Contact> = models.into_iter().map(contact_model_to_domain).collect();

        Ok(PaginatedResult::new(items, total, page))
    }

    async fn get_contact_by_id(&self, id: i32) -> DomainResult<Option<Contact>> {
        let model = contact::Entity::find_by_id(id).one(&self.db).await?;
        Ok(model.map(contact_model_to_domain))
    }

    async fn get_contact_by_email(&self, email: &str) -> DomainResult<Option<Contact>> {
        let model = contact::Entity::find()
            .filter(contact::Column::Email.eq(email))
            .one(&self.db)
            .await?;
        Ok(model.map(contact_model_to_domain))
    }

    async fn create_contact(&self, dto: CreateContactDto) -> DomainResult<Contact> {
        let now = Utc::now();

        let new_contact = contact::ActiveModel {
            first_name: Set(dto.first_name),
            last_name: Set(dto.last_name),
            email: Set(dto.email),
            company: Set(dto.company),
            created_at: Set(now),
            updated_at: Set(now),
            ..Default::default()
        };

        let model = new_contact.insert(&self.db).await.map_err(write_err)?;
        Ok(contact_model_to_domain(model))
    }

    async fn update_contact(&self, id: i32, dto: UpdateContactDto) -> DomainResult<Option<Contact>> {
        let Some(existing) = contact::Entity::find_by_id(id).one(&self.db).await? else {
            return Ok(None);
        };

        let mut active: contact::ActiveModel = existing.into();

        if let Some(first_name) = dto.first_name {
            active.first_name = Set(first_name);
        }
        if let Some(last_name) = dto.last_name {
            active.last_name = Set(last_name);
        }
        if let Some(email) = dto.email {
            active.email = Set(email);
        }
        if let Some(company) = dto.company {
            active.company = Set(company);
        }

        active.updated_at = Set(Utc::now());

        let updated = active.update(&self.db).await.map_err(write_err)?;
        Ok(Some(contact_model_to_domain(updated)))
    }

    async fn delete_contact(&self, id: i32) -> DomainResult<bool> {
        let result = contact::Entity::delete_by_id(id).exec(&self.db).await?;
        Ok(result.rows_affected > 0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::infrastructure::database::init_in_memory_database;

    async fn repo() -> SeaOrmContactRepository {
        SeaOrmContactRepository::new(init_in_memory_database().await.unwrap())
    }

    fn new_contact(email: &str) -> CreateContactDto {
        CreateContactDto {
            first_name: "Bob".to_string(),
            last_name: "Loblaw".to_string(),
            email: email.to_string(),
            company: Some("Super Co".to_string()),
        }
    }

    #[tokio::test]
    async fn create_assigns_increasing_ids_and_timestamps() {
        let repo = repo().await;
        let a = repo.create_contact(new_contact("a@example.com")).await.unwrap();
        let b = repo.create_contact(new_contact("b@example.com")).await.unwrap();

        assert!(b.id > a.id);
        assert_eq!(a.created_at, a.updated_at);
        assert_eq!(a.company.as_deref(), Some("Super Co"));
    }

    #[tokio::test]
    async fn list_is_newest_first_and_counts_everything() {
        let repo = repo().await;
        for i in 0..5 {
            repo.create_contact(new_contact(&format!("c{}@example.com", i)))
                .await
                .unwrap();
        }

        let page = repo.list_contacts(PageRequest::new(1, 2)).await.unwrap();
        assert_eq!(page.total, 5);
        assert_eq!(page.items.len(), 2);
        assert_eq!(page.items[0].email, "c4@example.com");
        assert_eq!(page.items[1].email, "c3@example.com");

        let last = repo.list_contacts(PageRequest::new(3, 2)).await.unwrap();
        assert_eq!(last.items.len(), 1);
        assert_eq!(last.items[0].email, "c0@example.com");
    }

    #[tokio::test]
    async fn find_by_email_is_exact() {
        let repo = repo().await;
        repo.create_contact(new_contact("bob@example.com")).await.unwrap();

        assert!(repo.get_contact_by_email("bob@example.com").await.unwrap().is_some());
        assert!(repo.get_contact_by_email("nobody@example.com").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn duplicate_email_hits_unique_index() {
        let repo = repo().await;
        repo.create_contact(new_contact("bob@example.com")).await.unwrap();

        let err = repo
            .create_contact(new_contact("bob@example.com"))
            .await
            .unwrap_err();
        match err {
            DomainError::Validation(errors) => {
                assert_eq!(errors.get("email").unwrap(), [rules::EMAIL_TAKEN]);
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[tokio::test]
    async fn update_touches_only_supplied_fields() {
        let repo = repo().await;
        let created = repo.create_contact(new_contact("bob@example.com")).await.unwrap();

        let dto = UpdateContactDto {
            company: Some(None),
            ..Default::default()
        };
        let updated = repo.update_contact(created.id, dto).await.unwrap().unwrap();

        assert_eq!(updated.first_name, "Bob");
        assert_eq!(updated.email, "bob@example.com");
        assert_eq!(updated.company, None);
        assert!(updated.updated_at >= created.updated_at);
    }

    #[tokio::test]
    async fn update_and_delete_report_missing_rows() {
        let repo = repo().await;
        assert!(repo
            .update_contact(42, UpdateContactDto::default())
            .await
            .unwrap()
            .is_none());

        let created = repo.create_contact(new_contact("bob@example.com")).await.unwrap();
        assert!(repo.delete_contact(created.id).await.unwrap());
        assert!(!repo.delete_contact(created.id).await.unwrap());
        assert!(repo.get_contact_by_id(created.id).await.unwrap().is_none());
    }
}
