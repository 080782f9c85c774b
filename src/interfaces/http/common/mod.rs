//! Building blocks shared by the HTTP modules

pub mod error;
pub mod input;
pub mod pagination;
pub mod validated_json;

pub use error::{ApiError, MessageBody, OkResponse, ValidationErrorBody};
pub use input::TextInput;
pub use pagination::{collection_url, PageLink, PageQuery, Paginated};
pub use validated_json::ValidatedJson;
