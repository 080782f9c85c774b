//! API Router with Swagger UI

use std::sync::Arc;

use axum::{http::HeaderValue, routing::get, Router};
use tower_http::cors::{AllowOrigin, Any, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing::warn;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use crate::application::ContactService;
use crate::config::{AppConfig, CorsConfig};
use crate::infrastructure::SeaOrmContactRepository;
use crate::interfaces::http::common::{
    MessageBody, OkResponse, PageLink, Paginated, ValidationErrorBody,
};
use crate::interfaces::http::modules::contacts::{
    self, ContactDto, ContactHandlerState, CreateContactRequest, UpdateContactRequest,
};
use crate::interfaces::http::modules::health;

/// OpenAPI documentation
#[derive(OpenApi)]
#[openapi(
    paths(
        // Health
        health::health_check,
        // Contacts
        contacts::list_contacts,
        contacts::create_contact,
        contacts::get_contact,
        contacts::update_contact,
        contacts::delete_contact,
    ),
    components(
        schemas(
            // Common
            MessageBody,
            ValidationErrorBody,
            OkResponse,
            PageLink,
            Paginated<ContactDto>,
            // Contacts
            ContactDto,
            CreateContactRequest,
            UpdateContactRequest,
        )
    ),
    tags(
        (name = "Health", description = "Liveness check"),
        (name = "Contacts", description = "Contact records: paginated listing and CRUD"),
    ),
    info(
        title = "Contacts API",
        version = "1.0.0",
        description = "REST API for managing contacts",
        license(name = "MIT")
    )
)]
pub struct ApiDoc;

fn cors_layer(config: &CorsConfig) -> CorsLayer {
    let layer = CorsLayer::new().allow_methods(Any).allow_headers(Any);

    if config.allowed_origins.is_empty() {
        return layer.allow_origin(Any);
    }

    let origins: Vec<HeaderValue> = config
        .allowed_origins
        .iter()
        .filter_map(|origin| match HeaderValue::from_str(origin) {
            Ok(value) => Some(value),
            Err(_) => {
                warn!("Ignoring invalid CORS origin: {}", origin);
                None
            }
        })
        .collect();
    layer.allow_origin(AllowOrigin::list(origins))
}

/// Create the API router with all routes
pub fn create_api_router(
    contact_service: Arc<ContactService<SeaOrmContactRepository>>,
    config: &AppConfig,
) -> Router {
    let contact_state = ContactHandlerState {
        contact_service,
        public_url: config.server.public_url.clone(),
    };

    let contact_routes = Router::new()
        .route(
            "/",
            get(contacts::list_contacts).post(contacts::create_contact),
        )
        .route(
            "/{id}",
            get(contacts::get_contact)
                .put(contacts::update_contact)
                .patch(contacts::update_contact)
                .delete(contacts::delete_contact),
        )
        .with_state(contact_state);

    let swagger_routes = SwaggerUi::new("/docs").url("/api-doc/openapi.json", ApiDoc::openapi());

    // Build router
    Router::new()
        // Swagger UI
        .merge(swagger_routes)
        // Health
        .route("/api/health", get(health::health_check))
        // Contacts
        .nest("/api/contacts", contact_routes)
        // Middleware
        .layer(cors_layer(&config.cors))
        .layer(TraceLayer::new_for_http())
}
