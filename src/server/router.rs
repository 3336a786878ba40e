//! HTTP routing and OpenAPI documentation configuration.
//!
//! All API endpoints are registered here with their OpenAPI operations, and Swagger UI is
//! served at `/api/docs`.

use axum::{middleware, Router};
use utoipa::OpenApi;
use utoipa_axum::{router::OpenApiRouter, routes};
use utoipa_swagger_ui::SwaggerUi;

use crate::server::{
    controller::{self, util::require_user::require_user},
    model::app::AppState,
};

/// Builds the application's HTTP router with all API endpoints and Swagger UI documentation.
///
/// # Registered Endpoints
/// - `GET /api/session/new` & `GET /api/login` - Sign-in form
/// - `POST /api/session` - Sign in
/// - `DELETE /api/session` & `GET /api/logout` - Sign out
/// - `GET /api/users/{user_id}/confirmation` - Confirm email from a confirmation link
/// - `GET /api/flash` - Take the pending flash message
/// - `GET /api/user` - Current user, requires a signed in user
///
/// The OpenAPI document is served at `/api/docs/openapi.json`.
///
/// # Arguments
/// - `state` - Application state, needed by the middleware guarding protected routes
///
/// # Example
/// ```ignore
/// let state = AppState::new(db, Arc::new(LogMailer));
/// let router = routes(&state).with_state(state).layer(session);
/// ```
pub fn routes(state: &AppState) -> Router<AppState> {
    #[derive(OpenApi)]
    #[openapi(info(title = "Turnstile", description = "Turnstile API"), tags(
        (name = controller::session::SESSION_TAG, description = "Sign-in and sign-out API routes"),
        (name = controller::confirmation::CONFIRMATION_TAG, description = "Email confirmation API routes"),
        (name = controller::user::USER_TAG, description = "Signed in user API routes"),
        (name = controller::flash::FLASH_TAG, description = "Flash message API routes"),
    ))]
    struct ApiDoc;

    let protected = OpenApiRouter::new()
        .routes(routes!(controller::user::get_user))
        .route_layer(middleware::from_fn_with_state(state.clone(), require_user));

    let (routes, api) = OpenApiRouter::with_openapi(ApiDoc::openapi())
        .routes(routes!(controller::session::new_session))
        .routes(routes!(controller::session::login))
        .routes(routes!(
            controller::session::create_session,
            controller::session::destroy_session
        ))
        .routes(routes!(controller::session::logout))
        .routes(routes!(controller::confirmation::confirm_email))
        .routes(routes!(controller::flash::take_flash))
        .merge(protected)
        .split_for_parts();

    routes.merge(SwaggerUi::new("/api/docs").url("/api/docs/openapi.json", api))
}
