//! HTTP access to the contacts API

use std::collections::BTreeMap;

use async_trait::async_trait;
use reqwest::{Client, Response, StatusCode};
use serde::de::DeserializeOwned;
use serde::Deserialize;
use tracing::{debug, error};

use crate::error::{ClientError, Result};
use crate::model::{Contact, ContactInput, Paginated};

/// Operations the client needs from the server
#[async_trait]
pub trait ContactsApi: Send + Sync {
    /// Server root, e.g. `http://127.0.0.1:8081`
    fn base_url(&self) -> &str;

    async fn list_contacts(&self, page: u64, per_page: u64) -> Result<Paginated<Contact>>;

    async fn get_contact(&self, id: i64) -> Result<Contact>;

    async fn create_contact(&self, input: &ContactInput) -> Result<Contact>;

    async fn update_contact(&self, id: i64, input: &ContactInput) -> Result<Contact>;

    async fn delete_contact(&self, id: i64) -> Result<()>;
}

#[derive(Debug, Deserialize)]
struct ErrorBody {
    #[serde(default)]
    message: String,
    #[serde(default)]
    errors: BTreeMap<String, Vec<String>>,
}

/// reqwest-backed [`ContactsApi`]
#[derive(Clone)]
pub struct HttpContactsApi {
    client: Client,
    base_url: String,
}

impl HttpContactsApi {
    pub fn new(base_url: &str) -> Result<Self> {
        let client = Client::builder()
            .build()
            .map_err(|e| ClientError::Configuration(e.to_string()))?;

        let base_url = base_url.trim_end_matches('/').to_string();
        if base_url.is_empty() {
            return Err(ClientError::Configuration("base URL is empty".to_string()));
        }

        Ok(Self { client, base_url })
    }

    fn contacts_url(&self) -> String {
        format!("{}/api/contacts", self.base_url)
    }

    fn contact_url(&self, id: i64) -> String {
        format!("{}/api/contacts/{}", self.base_url, id)
    }

    /// Turn a response into `T`, or into the matching error variant.
    async fn read<T: DeserializeOwned>(response: Response) -> Result<T> {
        let status = response.status();
        if status.is_success() {
            return response
                .json::<T>()
                .await
                .map_err(|e| ClientError::Decode(e.to_string()));
        }

        let body = response.text().await.unwrap_or_default();
        error!("Request failed: {} - {}", status, body);

        let parsed: Option<ErrorBody> = serde_json::from_str(&body).ok();
        Err(match (status, parsed) {
            (StatusCode::UNPROCESSABLE_ENTITY, Some(b)) => ClientError::Validation {
                message: b.message,
                errors: b.errors,
            },
            (StatusCode::NOT_FOUND, Some(b)) => ClientError::NotFound(b.message),
            (StatusCode::NOT_FOUND, None) => ClientError::NotFound(body),
            _ => ClientError::Status {
                status: status.as_u16(),
                body,
            },
        })
    }
}

#[async_trait]
impl ContactsApi for HttpContactsApi {
    fn base_url(&self) -> &str {
        &self.base_url
    }

    async fn list_contacts(&self, page: u64, per_page: u64) -> Result<Paginated<Contact>> {
        debug!("Listing contacts: page={} per_page={}", page, per_page);
        let response = self
            .client
            .get(self.contacts_url())
            .query(&[("page", page), ("per_page", per_page)])
            .send()
            .await?;
        Self::read(response).await
    }

    async fn get_contact(&self, id: i64) -> Result<Contact> {
        let response = self.client.get(self.contact_url(id)).send().await?;
        Self::read(response).await
    }

    async fn create_contact(&self, input: &ContactInput) -> Result<Contact> {
        debug!("Creating contact: {}", input.email);
        let response = self
            .client
            .post(self.contacts_url())
            .json(input)
            .send()
            .await?;
        Self::read(response).await
    }

    async fn update_contact(&self, id: i64, input: &ContactInput) -> Result<Contact> {
        debug!("Updating contact {}", id);
        let response = self
            .client
            .put(self.contact_url(id))
            .json(input)
            .send()
            .await?;
        Self::read(response).await
    }

    async fn delete_contact(&self, id: i64) -> Result<()> {
        debug!("Deleting contact {}", id);
        let response = self.client.delete(self.contact_url(id)).send().await?;
        let _ack: serde_json::Value = Self::read(response).await?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn base_url_is_trimmed() {
        let api = HttpContactsApi::new("http://localhost:8081/").unwrap();
        assert_eq!(api.base_url(), "http://localhost:8081");
        assert_eq!(api.contact_url(7), "http://localhost:8081/api/contacts/7");
    }

    #[test]
    fn empty_base_url_is_rejected() {
        assert!(matches!(
            HttpContactsApi::new("/"),
            Err(ClientError::Configuration(_))
        ));
    }
}
