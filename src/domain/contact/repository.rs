use async_trait::async_trait;

use super::{Contact, CreateContactDto, UpdateContactDto};
use crate::domain::DomainResult;
use crate::shared::{PageRequest, PaginatedResult};

#[async_trait]
pub trait ContactRepository: Send + Sync {
    /// One page of contacts, newest (highest id) first.
    async fn list_contacts(&self, page: PageRequest) -> DomainResult<PaginatedResult<Contact>>;

    async fn get_contact_by_id(&self, id: i32) -> DomainResult<Option<Contact>>;
    async fn get_contact_by_email(&self, email: &str) -> DomainResult<Option<Contact>>;

    async fn create_contact(&self, dto: CreateContactDto) -> DomainResult<Contact>;

    /// Apply the supplied fields and refresh `updated_at`.
    /// Returns `None` when no contact has this id.
    async fn update_contact(&self, id: i32, dto: UpdateContactDto) -> DomainResult<Option<Contact>>;

    /// Hard delete. Returns `false` when no contact has this id.
    async fn delete_contact(&self, id: i32) -> DomainResult<bool>;
}
