//! Contact management service: application-layer orchestration
//!
//! HTTP handlers are thin wrappers that delegate here. Field syntax is
//! checked at the HTTP boundary; this service owns the rules that need the
//! store: existence and email uniqueness.

use std::sync::Arc;

use tracing::info;

use crate::domain::contact::rules;
use crate::domain::{
    Contact, ContactRepository, CreateContactDto, DomainError, DomainResult, UpdateContactDto,
};
use crate::shared::{PageRequest, PaginatedResult};

/// Generic over `R: ContactRepository` so it stays decoupled from the
/// concrete persistence layer.
pub struct ContactService<R: ContactRepository> {
    repo: Arc<R>,
}

impl<R: ContactRepository> ContactService<R> {
    pub fn new(repo: Arc<R>) -> Self {
        Self { repo }
    }

    pub async fn list_contacts(&self, page: PageRequest) -> DomainResult<PaginatedResult<Contact>> {
        self.repo.list_contacts(page).await
    }

    pub async fn get_contact(&self, id: i32) -> DomainResult<Contact> {
        self.repo
            .get_contact_by_id(id)
            .await?
            .ok_or_else(|| not_found(id))
    }

    pub async fn create_contact(&self, dto: CreateContactDto) -> DomainResult<Contact> {
        if self.repo.get_contact_by_email(&dto.email).await?.is_some() {
            return Err(rules::email_taken());
        }

        let contact = self.repo.create_contact(dto).await?;
        info!("Contact {} created: {}", contact.id, contact.full_name());
        Ok(contact)
    }

    /// Partial update. The uniqueness check ignores the contact's own row,
    /// so re-submitting the current email is fine.
    pub async fn update_contact(&self, id: i32, dto: UpdateContactDto) -> DomainResult<Contact> {
        // 404 wins over 422
        self.get_contact(id).await?;

        if let Some(email) = dto.email.as_deref() {
            if let Some(owner) = self.repo.get_contact_by_email(email).await? {
                if owner.id != id {
                    return Err(rules::email_taken());
                }
            }
        }

        let contact = self
            .repo
            .update_contact(id, dto)
            .await?
            .ok_or_else(|| not_found(id))?;
        info!("Contact {} updated", contact.id);
        Ok(contact)
    }

    pub async fn delete_contact(&self, id: i32) -> DomainResult<()> {
        if !self.repo.delete_contact(id).await? {
            return Err(not_found(id));
        }
        info!("Contact {} deleted", id);
        Ok(())
    }
}

fn not_found(id: i32) -> DomainError {
    DomainError::NotFound {
        entity: "Contact",
        field: "id",
        value: id.to_string(),
    }
}
