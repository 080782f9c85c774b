//! Plain-text rendering of the contacts screen

use std::fmt::Write;

use crate::api::ContactsApi;
use crate::app::ContactsApp;
use crate::model::{Contact, ContactForm, FormField};

const HEADERS: [&str; 5] = ["ID", "First", "Last", "Email", "Company"];
const NO_COMPANY: &str = "—";
const EMPTY_ROW: &str = "No contacts found.";

fn row(contact: &Contact) -> [String; 5] {
    [
        contact.id.to_string(),
        contact.first_name.clone(),
        contact.last_name.clone(),
        contact.email.clone(),
        contact
            .company
            .clone()
            .unwrap_or_else(|| NO_COMPANY.to_string()),
    ]
}

/// Column-aligned table of the loaded page.
pub fn render_table(contacts: &[Contact]) -> String {
    let rows: Vec<[String; 5]> = contacts.iter().map(row).collect();

    let mut widths = HEADERS.map(|h| h.chars().count());
    for r in &rows {
        for (w, cell) in widths.iter_mut().zip(r.iter()) {
            *w = (*w).max(cell.chars().count());
        }
    }

    let line = |cells: &[String]| -> String {
        cells
            .iter()
            .zip(widths.iter())
            .map(|(cell, w)| format!("{:<width$}", cell, width = *w))
            .collect::<Vec<_>>()
            .join("  ")
            .trim_end()
            .to_string()
    };

    let mut out = String::new();
    let header: Vec<String> = HEADERS.iter().map(|h| h.to_string()).collect();
    let _ = writeln!(out, "{}", line(&header));
    let rule: Vec<String> = widths.iter().map(|w| "-".repeat(*w)).collect();
    let _ = writeln!(out, "{}", line(&rule));

    if rows.is_empty() {
        let _ = writeln!(out, "{}", EMPTY_ROW);
    }
    for r in &rows {
        let _ = writeln!(out, "{}", line(r));
    }
    out
}

pub fn render_footer(page: u64, last_page: u64, total: u64) -> String {
    format!("Page {} / {} — Total {}", page, last_page, total)
}

pub fn render_form(form: &ContactForm, editing: Option<i64>) -> String {
    let mut out = String::new();
    let _ = match editing {
        Some(id) => writeln!(out, "Edit Contact #{}", id),
        None => writeln!(out, "New Contact"),
    };
    for field in FormField::ALL {
        let _ = writeln!(out, "  {:<10} {}", format!("{}:", field.label()), form.get(field));
    }
    out
}

/// Full screen: optional error, table, footer.
pub fn render<A: ContactsApi>(app: &ContactsApp<A>) -> String {
    let mut out = String::new();
    if let Some(error) = app.error() {
        let _ = writeln!(out, "! {}", error);
    }
    out.push_str(&render_table(app.contacts()));
    let _ = writeln!(
        out,
        "{}  ({} per page)",
        render_footer(app.page(), app.last_page(), app.total()),
        app.per_page()
    );
    out
}
