//! Client-side state controller
//!
//! Holds what the contacts screen shows (current page, loaded rows, form
//! buffer, last error) and turns user actions into API calls. Errors are
//! reduced to short user-facing messages; details go to the log.

use async_trait::async_trait;
use tracing::warn;

use crate::api::ContactsApi;
use crate::model::{Contact, ContactForm, FormField};

/// Page sizes offered to the user
pub const PAGE_SIZES: [u64; 4] = [5, 10, 20, 50];
pub const DEFAULT_PAGE_SIZE: u64 = 10;

pub const SAVE_FAILED: &str = "Save failed. Ensure email is unique and fields are valid.";
pub const DELETE_FAILED: &str = "Delete failed.";
pub const FORM_INCOMPLETE: &str = "First name, last name, and email are required.";
pub const DELETE_PROMPT: &str = "Delete this contact?";

/// Asks the user a yes/no question.
#[async_trait]
pub trait Confirm: Send {
    async fn confirm(&mut self, prompt: &str) -> bool;
}

pub struct ContactsApp<A: ContactsApi> {
    api: A,
    page: u64,
    per_page: u64,
    contacts: Vec<Contact>,
    total: u64,
    last_page: u64,
    form: ContactForm,
    editing: Option<i64>,
    loading: bool,
    error: Option<String>,
}

impl<A: ContactsApi> ContactsApp<A> {
    pub fn new(api: A) -> Self {
        Self {
            api,
            page: 1,
            per_page: DEFAULT_PAGE_SIZE,
            contacts: Vec::new(),
            total: 0,
            last_page: 1,
            form: ContactForm::default(),
            editing: None,
            loading: false,
            error: None,
        }
    }

    // ── Accessors ──────────────────────────────────────────────

    pub fn api(&self) -> &A {
        &self.api
    }

    pub fn page(&self) -> u64 {
        self.page
    }

    pub fn per_page(&self) -> u64 {
        self.per_page
    }

    pub fn contacts(&self) -> &[Contact] {
        &self.contacts
    }

    pub fn total(&self) -> u64 {
        self.total
    }

    pub fn last_page(&self) -> u64 {
        self.last_page
    }

    pub fn form(&self) -> &ContactForm {
        &self.form
    }

    pub fn editing(&self) -> Option<i64> {
        self.editing
    }

    pub fn is_loading(&self) -> bool {
        self.loading
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    // ── Loading & navigation ───────────────────────────────────

    /// Reload the current page. On failure the previous rows stay visible.
    pub async fn refresh(&mut self) {
        self.loading = true;
        self.error = None;

        match self.api.list_contacts(self.page, self.per_page).await {
            Ok(result) => {
                self.contacts = result.data;
                self.total = result.total;
                self.last_page = result.last_page.max(1);
            }
            Err(e) => {
                warn!("Failed to load contacts: {}", e);
                self.error = Some(format!(
                    "Failed to load contacts. Is the API running at {}?",
                    self.api.base_url()
                ));
            }
        }

        self.loading = false;
    }

    /// Jump to `page`, kept within `1..=last_page`.
    pub async fn go_to_page(&mut self, page: u64) {
        self.page = page.clamp(1, self.last_page.max(1));
        self.refresh().await;
    }

    pub async fn next_page(&mut self) {
        if self.page < self.last_page {
            self.go_to_page(self.page + 1).await;
        }
    }

    pub async fn prev_page(&mut self) {
        if self.page > 1 {
            self.go_to_page(self.page - 1).await;
        }
    }

    /// Change the page size; the current page number is kept. Returns
    /// `false` for sizes outside [`PAGE_SIZES`].
    pub async fn set_per_page(&mut self, per_page: u64) -> bool {
        if !PAGE_SIZES.contains(&per_page) {
            return false;
        }
        self.per_page = per_page;
        self.refresh().await;
        true
    }

    // ── Form ───────────────────────────────────────────────────

    /// Load `contact` into the form and remember its id.
    pub fn start_edit(&mut self, contact: &Contact) {
        self.error = None;
        self.form = ContactForm::from_contact(contact);
        self.editing = Some(contact.id);
    }

    /// Edit by id: taken from the loaded page when present, fetched otherwise.
    pub async fn start_edit_by_id(&mut self, id: i64) -> bool {
        if let Some(contact) = self.contacts.iter().find(|c| c.id == id).cloned() {
            self.start_edit(&contact);
            return true;
        }
        match self.api.get_contact(id).await {
            Ok(contact) => {
                self.start_edit(&contact);
                true
            }
            Err(e) => {
                warn!("Failed to load contact {}: {}", id, e);
                self.error = Some(format!("Contact {} not found.", id));
                false
            }
        }
    }

    pub fn set_field(&mut self, field: FormField, value: impl Into<String>) {
        self.form.set(field, value);
    }

    /// Drop the form buffer and leave edit mode.
    pub fn cancel_edit(&mut self) {
        self.form = ContactForm::default();
        self.editing = None;
    }

    /// Create or update from the form. Returns `true` on success.
    pub async fn submit(&mut self) -> bool {
        self.error = None;

        if !self.form.is_complete() {
            self.error = Some(FORM_INCOMPLETE.to_string());
            return false;
        }

        let input = self.form.to_input();
        let result = match self.editing {
            Some(id) => self.api.update_contact(id, &input).await,
            None => self.api.create_contact(&input).await,
        };

        match result {
            Ok(_) => {
                self.cancel_edit();
                self.refresh().await;
                true
            }
            Err(e) => {
                warn!("Save failed: {}", e);
                self.error = Some(SAVE_FAILED.to_string());
                false
            }
        }
    }

    /// Delete after confirmation. Returns `true` if the contact was deleted.
    pub async fn delete<C: Confirm + ?Sized>(&mut self, id: i64, confirm: &mut C) -> bool {
        if !confirm.confirm(DELETE_PROMPT).await {
            return false;
        }
        self.error = None;

        match self.api.delete_contact(id).await {
            Ok(()) => {
                if self.editing == Some(id) {
                    self.cancel_edit();
                }
                self.refresh().await;
                true
            }
            Err(e) => {
                warn!("Delete of contact {} failed: {}", id, e);
                self.error = Some(DELETE_FAILED.to_string());
                false
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Mutex;

    use chrono::Utc;

    use super::*;
    use crate::error::{ClientError, Result};
    use crate::model::{ContactInput, Paginated};

    /// In-memory stand-in that records every call.
    #[derive(Default)]
    struct FakeApi {
        contacts: Mutex<Vec<Contact>>,
        calls: Mutex<Vec<String>>,
        fail: Mutex<bool>,
    }

    impl FakeApi {
        fn with_contacts(n: i64) -> Self {
            let api = Self::default();
            {
                let mut contacts = api.contacts.lock().unwrap();
                for id in 1..=n {
                    contacts.push(contact(id, &format!("user{id}@example.com")));
                }
            }
            api
        }

        fn calls(&self) -> Vec<String> {
            self.calls.lock().unwrap().clone()
        }

        fn record(&self, call: String) -> Result<()> {
            self.calls.lock().unwrap().push(call);
            if *self.fail.lock().unwrap() {
                return Err(ClientError::Status {
                    status: 500,
                    body: "boom".to_string(),
                });
            }
            Ok(())
        }
    }

    fn contact(id: i64, email: &str) -> Contact {
        Contact {
            id,
            first_name: "First".to_string(),
            last_name: "Last".to_string(),
            email: email.to_string(),
            company: None,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    #[async_trait]
    impl ContactsApi for FakeApi {
        fn base_url(&self) -> &str {
            "http://fake:8081"
        }

        async fn list_contacts(&self, page: u64, per_page: u64) -> Result<Paginated<Contact>> {
            self.record(format!("list {page} {per_page}"))?;
            let mut all = self.contacts.lock().unwrap().clone();
            all.sort_by(|a, b| b.id.cmp(&a.id));
            let total = all.len() as u64;
            let data: Vec<Contact> = all
                .into_iter()
                .skip(((page - 1) * per_page) as usize)
                .take(per_page as usize)
                .collect();
            Ok(Paginated {
                current_page: page,
                data,
                first_page_url: String::new(),
                from: None,
                last_page: total.div_ceil(per_page).max(1),
                last_page_url: String::new(),
                links: Vec::new(),
                next_page_url: None,
                path: String::new(),
                per_page,
                prev_page_url: None,
                to: None,
                total,
            })
        }

        async fn get_contact(&self, id: i64) -> Result<Contact> {
            self.record(format!("get {id}"))?;
            self.contacts
                .lock()
                .unwrap()
                .iter()
                .find(|c| c.id == id)
                .cloned()
                .ok_or_else(|| ClientError::NotFound(format!("Contact {id} not found.")))
        }

        async fn create_contact(&self, input: &ContactInput) -> Result<Contact> {
            self.record(format!("create {}", input.email))?;
            let mut contacts = self.contacts.lock().unwrap();
            let id = contacts.iter().map(|c| c.id).max().unwrap_or(0) + 1;
            let mut created = contact(id, &input.email);
            created.company = input.company.clone();
            contacts.push(created.clone());
            Ok(created)
        }

        async fn update_contact(&self, id: i64, input: &ContactInput) -> Result<Contact> {
            self.record(format!("update {id} {:?}", input.company))?;
            let mut contacts = self.contacts.lock().unwrap();
            let existing = contacts
                .iter_mut()
                .find(|c| c.id == id)
                .ok_or_else(|| ClientError::NotFound(format!("Contact {id} not found.")))?;
            existing.email = input.email.clone();
            existing.company = input.company.clone();
            Ok(existing.clone())
        }

        async fn delete_contact(&self, id: i64) -> Result<()> {
            self.record(format!("delete {id}"))?;
            self.contacts.lock().unwrap().retain(|c| c.id != id);
            Ok(())
        }
    }

    struct Answer(bool);

    #[async_trait]
    impl Confirm for Answer {
        async fn confirm(&mut self, prompt: &str) -> bool {
            assert_eq!(prompt, DELETE_PROMPT);
            self.0
        }
    }

    #[tokio::test]
    async fn refresh_loads_first_page_with_default_size() {
        let mut app = ContactsApp::new(FakeApi::with_contacts(25));
        app.refresh().await;

        assert_eq!(app.api().calls(), ["list 1 10"]);
        assert_eq!(app.contacts().len(), 10);
        assert_eq!(app.contacts()[0].id, 25);
        assert_eq!(app.total(), 25);
        assert_eq!(app.last_page(), 3);
        assert!(!app.is_loading());
        assert_eq!(app.error(), None);
    }

    #[tokio::test]
    async fn navigation_is_bounded() {
        let mut app = ContactsApp::new(FakeApi::with_contacts(25));
        app.refresh().await;

        app.prev_page().await;
        assert_eq!(app.page(), 1);

        app.next_page().await;
        app.next_page().await;
        app.next_page().await;
        assert_eq!(app.page(), 3);
        assert_eq!(app.contacts().len(), 5);

        app.go_to_page(99).await;
        assert_eq!(app.page(), 3);
    }

    #[tokio::test]
    async fn changing_page_size_keeps_the_page() {
        let mut app = ContactsApp::new(FakeApi::with_contacts(25));
        app.refresh().await;
        app.next_page().await;

        assert!(app.set_per_page(5).await);
        assert_eq!(app.page(), 2);
        assert_eq!(app.api().calls().last().unwrap(), "list 2 5");

        assert!(!app.set_per_page(7).await);
        assert_eq!(app.per_page(), 5);
    }

    #[tokio::test]
    async fn load_failure_names_the_base_url() {
        let api = FakeApi::with_contacts(3);
        *api.fail.lock().unwrap() = true;
        let mut app = ContactsApp::new(api);
        app.refresh().await;

        assert_eq!(
            app.error(),
            Some("Failed to load contacts. Is the API running at http://fake:8081?")
        );
        assert!(app.contacts().is_empty());
    }

    #[tokio::test]
    async fn incomplete_form_is_not_submitted() {
        let mut app = ContactsApp::new(FakeApi::default());
        app.set_field(FormField::FirstName, "Bob");

        assert!(!app.submit().await);
        assert_eq!(app.error(), Some(FORM_INCOMPLETE));
        assert!(app.api().calls().is_empty());
    }

    #[tokio::test]
    async fn create_clears_form_and_reloads() {
        let mut app = ContactsApp::new(FakeApi::default());
        app.set_field(FormField::FirstName, "Bob");
        app.set_field(FormField::LastName, "Loblaw");
        app.set_field(FormField::Email, "bob@example.com");

        assert!(app.submit().await);
        assert_eq!(app.api().calls(), ["create bob@example.com", "list 1 10"]);
        assert_eq!(app.form(), &ContactForm::default());
        assert_eq!(app.contacts().len(), 1);
        assert_eq!(app.contacts()[0].company, None);
    }

    #[tokio::test]
    async fn edit_sends_update_for_tracked_id() {
        let mut app = ContactsApp::new(FakeApi::with_contacts(2));
        app.refresh().await;

        assert!(app.start_edit_by_id(1).await);
        assert_eq!(app.editing(), Some(1));
        assert_eq!(app.form().company, "");

        app.set_field(FormField::Company, "A Brand new Job! Co.");
        assert!(app.submit().await);

        let calls = app.api().calls();
        assert!(calls.contains(&"update 1 Some(\"A Brand new Job! Co.\")".to_string()));
        assert_eq!(app.editing(), None);
    }

    #[tokio::test]
    async fn edit_of_unknown_id_fetches_then_reports() {
        let mut app = ContactsApp::new(FakeApi::default());
        assert!(!app.start_edit_by_id(42).await);
        assert_eq!(app.api().calls(), ["get 42"]);
        assert_eq!(app.error(), Some("Contact 42 not found."));
        assert_eq!(app.editing(), None);
    }

    #[tokio::test]
    async fn cancel_clears_form_and_id() {
        let mut app = ContactsApp::new(FakeApi::with_contacts(1));
        app.refresh().await;
        app.start_edit_by_id(1).await;
        app.cancel_edit();

        assert_eq!(app.editing(), None);
        assert_eq!(app.form(), &ContactForm::default());
    }

    #[tokio::test]
    async fn save_failure_shows_generic_message() {
        let api = FakeApi::default();
        *api.fail.lock().unwrap() = true;
        let mut app = ContactsApp::new(api);
        app.set_field(FormField::FirstName, "Bob");
        app.set_field(FormField::LastName, "Loblaw");
        app.set_field(FormField::Email, "bob@example.com");

        assert!(!app.submit().await);
        assert_eq!(app.error(), Some(SAVE_FAILED));
        assert_eq!(app.form().first_name, "Bob");
    }

    #[tokio::test]
    async fn delete_requires_confirmation() {
        let mut app = ContactsApp::new(FakeApi::with_contacts(2));
        app.refresh().await;

        assert!(!app.delete(1, &mut Answer(false)).await);
        assert!(!app.api().calls().iter().any(|c| c.starts_with("delete")));

        assert!(app.delete(1, &mut Answer(true)).await);
        assert_eq!(app.total(), 1);
        assert!(app.contacts().iter().all(|c| c.id != 1));
    }

    #[tokio::test]
    async fn delete_failure_is_reported() {
        let api = FakeApi::with_contacts(1);
        *api.fail.lock().unwrap() = true;
        let mut app = ContactsApp::new(api);

        assert!(!app.delete(1, &mut Answer(true)).await);
        assert_eq!(app.error(), Some(DELETE_FAILED));
    }
}
