/// Page size used when the caller does not ask for one (or asks for nonsense)
pub const DEFAULT_PER_PAGE: u64 = 15;

/// Hard upper bound on page size
pub const MAX_PER_PAGE: u64 = 50;

/// Highest page number served. Keeps `(page - 1) * per_page` within the
/// signed 64-bit range the database driver binds offsets as.
pub const MAX_PAGE: u64 = i64::MAX as u64 / MAX_PER_PAGE;

/// A validated page request: `page >= 1`, `1 <= per_page <= MAX_PER_PAGE`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageRequest {
    pub page: u64,
    pub per_page: u64,
}

impl Default for PageRequest {
    fn default() -> Self {
        Self {
            page: 1,
            per_page: DEFAULT_PER_PAGE,
        }
    }
}

impl PageRequest {
    pub fn new(page: u64, per_page: u64) -> Self {
        let per_page = if per_page == 0 {
            DEFAULT_PER_PAGE
        } else {
            per_page.min(MAX_PER_PAGE)
        };
        Self {
            page: page.clamp(1, MAX_PAGE),
            per_page,
        }
    }

    /// Build from raw query-string values. Malformed input is coerced,
    /// never rejected.
    ///
    /// - `page` must be a whole positive integer, otherwise 1.
    /// - `per_page` takes its leading integer (`"20abc"` is 20); missing,
    ///   unparsable or non-positive values become [`DEFAULT_PER_PAGE`].
    pub fn from_query(page: Option<&str>, per_page: Option<&str>) -> Self {
        let page = page
            .and_then(|p| p.trim().parse::<i64>().ok())
            .filter(|p| *p >= 1)
            .unwrap_or(1) as u64;

        let per_page = per_page
            .and_then(leading_int)
            .filter(|n| *n >= 1)
            .map(|n| n as u64)
            .unwrap_or(DEFAULT_PER_PAGE);

        Self::new(page, per_page)
    }

    pub fn offset(&self) -> u64 {
        (self.page - 1).saturating_mul(self.per_page)
    }
}

/// Parse the leading integer of a string: optional sign, then digits.
fn leading_int(s: &str) -> Option<i64> {
    let s = s.trim_start();
    let (sign, rest) = match s.as_bytes().first() {
        Some(b'-') => (-1, &s[1..]),
        Some(b'+') => (1, &s[1..]),
        _ => (1, s),
    };
    let digits: String = rest.chars().take_while(|c| c.is_ascii_digit()).collect();
    if digits.is_empty() {
        return None;
    }
    // Saturate absurdly long inputs instead of failing.
    let value = digits.parse::<i64>().unwrap_or(i64::MAX);
    Some(sign * value)
}

/// One page of results plus the numbers needed to navigate the rest.
#[derive(Debug, Clone)]
pub struct PaginatedResult<T> {
    pub items: Vec<T>,
    pub total: u64,
    pub page: u64,
    pub per_page: u64,
}

impl<T> PaginatedResult<T> {
    pub fn new(items: Vec<T>, total: u64, request: PageRequest) -> Self {
        Self {
            items,
            total,
            page: request.page,
            per_page: request.per_page,
        }
    }

    /// Number of the last page; never less than 1.
    pub fn last_page(&self) -> u64 {
        self.total.div_ceil(self.per_page).max(1)
    }

    /// 1-based position of the first item on this page
    pub fn from(&self) -> Option<u64> {
        if self.items.is_empty() {
            None
        } else {
            Some(
                (self.page - 1)
                    .saturating_mul(self.per_page)
                    .saturating_add(1),
            )
        }
    }

    /// 1-based position of the last item on this page
    pub fn to(&self) -> Option<u64> {
        self.from()
            .map(|from| from.saturating_add(self.items.len() as u64 - 1))
    }

    pub fn map<U, F: FnMut(T) -> U>(self, f: F) -> PaginatedResult<U> {
        PaginatedResult {
            items: self.items.into_iter().map(f).collect(),
            total: self.total,
            page: self.page,
            per_page: self.per_page,
        }
    }
}
