#[derive(Debug, Clone)]
pub struct CreateContactDto {
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub company: Option<String>,
}
