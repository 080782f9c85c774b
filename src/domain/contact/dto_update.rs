/// Partial update. `None` leaves a field untouched; for `company`,
/// `Some(None)` clears it.
#[derive(Debug, Clone, Default)]
pub struct UpdateContactDto {
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub email: Option<String>,
    pub company: Option<Option<String>>,
}
