//! Length-aware pagination envelope
//!
//! Wraps one page of results with the navigation metadata front-ends
//! expect: page numbers, item bounds, page URLs and a windowed list of
//! page links.

use axum::http::{header, HeaderMap};
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};

use crate::shared::PaginatedResult;

/// Pages shown on each side of the current page in `links`
const ON_EACH_SIDE: u64 = 3;

pub const PREVIOUS_LABEL: &str = "&laquo; Previous";
pub const NEXT_LABEL: &str = "Next &raquo;";
pub const SEPARATOR_LABEL: &str = "...";

/// List query. Values are kept as raw strings so malformed numbers are
/// coerced instead of rejected.
#[derive(Debug, Default, Deserialize, IntoParams)]
pub struct PageQuery {
    /// Page number (1-based). Default: 1
    pub page: Option<String>,
    /// Items per page (max 50). Default: 15
    pub per_page: Option<String>,
}

/// One entry of the `links` array
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct PageLink {
    pub url: Option<String>,
    pub label: String,
    pub page: Option<u64>,
    pub active: bool,
}

/// Paginated response envelope
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct Paginated<T> {
    pub current_page: u64,
    /// Items on this page
    pub data: Vec<T>,
    pub first_page_url: String,
    /// 1-based index of the first item on this page, `null` when empty
    pub from: Option<u64>,
    pub last_page: u64,
    pub last_page_url: String,
    pub links: Vec<PageLink>,
    pub next_page_url: Option<String>,
    /// Collection URL without query string
    pub path: String,
    pub per_page: u64,
    pub prev_page_url: Option<String>,
    /// 1-based index of the last item on this page, `null` when empty
    pub to: Option<u64>,
    /// Items across all pages
    pub total: u64,
}

impl<T> Paginated<T> {
    pub fn from_result(result: PaginatedResult<T>, path: impl Into<String>) -> Self {
        let path = path.into();
        let url = |page: u64| format!("{}?page={}", path, page);

        let current = result.page;
        let last_page = result.last_page();
        let from = result.from();
        let to = result.to();

        let prev_page_url = (current > 1).then(|| url(current - 1));
        let next_page_url = (current < last_page).then(|| url(current + 1));

        let mut links = Vec::new();
        links.push(PageLink {
            url: prev_page_url.clone(),
            label: PREVIOUS_LABEL.to_string(),
            page: (current > 1).then(|| current - 1),
            active: false,
        });
        for slot in page_window(current, last_page) {
            links.push(match slot {
                Some(page) => PageLink {
                    url: Some(url(page)),
                    label: page.to_string(),
                    page: Some(page),
                    active: page == current,
                },
                None => PageLink {
                    url: None,
                    label: SEPARATOR_LABEL.to_string(),
                    page: None,
                    active: false,
                },
            });
        }
        links.push(PageLink {
            url: next_page_url.clone(),
            label: NEXT_LABEL.to_string(),
            page: (current < last_page).then(|| current + 1),
            active: false,
        });

        Self {
            current_page: current,
            data: result.items,
            first_page_url: url(1),
            from,
            last_page,
            last_page_url: url(last_page),
            links,
            next_page_url,
            path,
            per_page: result.per_page,
            prev_page_url,
            to,
            total: result.total,
        }
    }
}

/// Page numbers to link to; `None` marks a `...` gap.
fn page_window(current: u64, last: u64) -> Vec<Option<u64>> {
    let window = ON_EACH_SIDE + 4;
    let pages = |from: u64, to: u64| (from..=to).map(Some).collect::<Vec<_>>();

    if last < ON_EACH_SIDE * 2 + 8 {
        return pages(1, last);
    }

    let mut out = Vec::new();
    if current <= window {
        out.extend(pages(1, window + ON_EACH_SIDE));
        out.push(None);
        out.extend(pages(last - 1, last));
    } else if current > last - window {
        out.extend(pages(1, 2));
        out.push(None);
        out.extend(pages(last - (window + ON_EACH_SIDE - 1), last));
    } else {
        out.extend(pages(1, 2));
        out.push(None);
        out.extend(pages(current - ON_EACH_SIDE, current + ON_EACH_SIDE));
        out.push(None);
        out.extend(pages(last - 1, last));
    }
    out
}

/// `<base>/api/contacts`-style collection URL. The configured public URL
/// wins; otherwise the request's `Host` header is used; otherwise the
/// path stays relative.
pub fn collection_url(public_url: Option<&str>, headers: &HeaderMap, path: &str) -> String {
    if let Some(base) = public_url {
        return format!("{}{}", base.trim_end_matches('/'), path);
    }
    match headers.get(header::HOST).and_then(|h| h.to_str().ok()) {
        Some(host) => format!("http://{}{}", host, path),
        None => path.to_string(),
    }
}
