//! Contact API handlers
//!
//! Thin wrappers over `ContactService`: parse the path, validate the body,
//! shape the response.

use std::sync::Arc;

use axum::{
    extract::{rejection::JsonRejection, Path, Query, State},
    http::{HeaderMap, StatusCode},
    Json,
};
use validator::Validate;

use super::dto::{ContactDto, CreateContactRequest, UpdateContactRequest};
use crate::application::ContactService;
use crate::infrastructure::SeaOrmContactRepository;
use crate::interfaces::http::common::{
    collection_url, ApiError, MessageBody, OkResponse, PageQuery, Paginated, ValidatedJson,
    ValidationErrorBody,
};
use crate::shared::PageRequest;

pub const CONTACTS_PATH: &str = "/api/contacts";

/// Contact handler state, concrete over `SeaOrmContactRepository` for Axum compatibility.
#[derive(Clone)]
pub struct ContactHandlerState {
    pub contact_service: Arc<ContactService<SeaOrmContactRepository>>,
    /// Externally visible base URL used in pagination links
    pub public_url: Option<String>,
}

/// Ids that are not integers can never match a row.
fn parse_id(raw: &str) -> Result<i32, ApiError> {
    raw.parse::<i32>()
        .map_err(|_| ApiError::contact_not_found(raw))
}

#[utoipa::path(
    get,
    path = "/api/contacts",
    tag = "Contacts",
    params(PageQuery),
    responses(
        (status = 200, description = "Contacts, newest first", body = Paginated<ContactDto>)
    )
)]
pub async fn list_contacts(
    State(state): State<ContactHandlerState>,
    headers: HeaderMap,
    Query(query): Query<PageQuery>,
) -> Result<Json<Paginated<ContactDto>>, ApiError> {
    let page = PageRequest::from_query(query.page.as_deref(), query.per_page.as_deref());
    let result = state.contact_service.list_contacts(page).await?;

    let path = collection_url(state.public_url.as_deref(), &headers, CONTACTS_PATH);
    Ok(Json(Paginated::from_result(result.map(ContactDto::from), path)))
}

#[utoipa::path(
    post,
    path = "/api/contacts",
    tag = "Contacts",
    request_body = CreateContactRequest,
    responses(
        (status = 201, description = "Contact created", body = ContactDto),
        (status = 400, description = "Malformed or non-object JSON body", body = MessageBody),
        (status = 422, description = "Validation error", body = ValidationErrorBody)
    )
)]
pub async fn create_contact(
    State(state): State<ContactHandlerState>,
    ValidatedJson(body): ValidatedJson<CreateContactRequest>,
) -> Result<(StatusCode, Json<ContactDto>), ApiError> {
    let contact = state.contact_service.create_contact(body.into_dto()).await?;
    Ok((StatusCode::CREATED, Json(ContactDto::from(contact))))
}

#[utoipa::path(
    get,
    path = "/api/contacts/{id}",
    tag = "Contacts",
    params(("id" = i32, Path, description = "Contact ID")),
    responses(
        (status = 200, description = "Contact details", body = ContactDto),
        (status = 404, description = "Not found", body = MessageBody)
    )
)]
pub async fn get_contact(
    State(state): State<ContactHandlerState>,
    Path(id): Path<String>,
) -> Result<Json<ContactDto>, ApiError> {
    let id = parse_id(&id)?;
    let contact = state.contact_service.get_contact(id).await?;
    Ok(Json(ContactDto::from(contact)))
}

/// Serves both PUT and PATCH; either way only the supplied fields change.
#[utoipa::path(
    put,
    path = "/api/contacts/{id}",
    tag = "Contacts",
    params(("id" = i32, Path, description = "Contact ID")),
    request_body = UpdateContactRequest,
    responses(
        (status = 200, description = "Contact updated", body = ContactDto),
        (status = 404, description = "Not found", body = MessageBody),
        (status = 400, description = "Malformed or non-object JSON body", body = MessageBody),
        (status = 422, description = "Validation error", body = ValidationErrorBody)
    )
)]
pub async fn update_contact(
    State(state): State<ContactHandlerState>,
    Path(id): Path<String>,
    body: Result<Json<UpdateContactRequest>, JsonRejection>,
) -> Result<Json<ContactDto>, ApiError> {
    // The record must exist before the body is looked at.
    let id = parse_id(&id)?;
    state.contact_service.get_contact(id).await?;

    let Json(body) = body?;
    body.validate()?;

    let contact = state
        .contact_service
        .update_contact(id, body.into_dto())
        .await?;
    Ok(Json(ContactDto::from(contact)))
}

#[utoipa::path(
    delete,
    path = "/api/contacts/{id}",
    tag = "Contacts",
    params(("id" = i32, Path, description = "Contact ID")),
    responses(
        (status = 200, description = "Contact deleted", body = OkResponse),
        (status = 404, description = "Not found", body = MessageBody)
    )
)]
pub async fn delete_contact(
    State(state): State<ContactHandlerState>,
    Path(id): Path<String>,
) -> Result<Json<OkResponse>, ApiError> {
    let id = parse_id(&id)?;
    state.contact_service.delete_contact(id).await?;
    Ok(Json(OkResponse::ok()))
}
