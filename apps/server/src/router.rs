use axum::Router;
use axum::middleware::from_fn_with_state;
use recap::domain::constants::PLATFORM_NAME;
use recap::features::{access, report};
use recap::kernel::server::ApiState;
use recap::server::middleware::require_session;
use tower_http::trace::TraceLayer;
use utoipa::OpenApi;
use utoipa::openapi::Components;
use utoipa::openapi::security::{HttpAuthScheme, HttpBuilder, SecurityScheme};
use utoipa_axum::router::OpenApiRouter;
use utoipa_scalar::{Scalar, Servable};

#[derive(OpenApi)]
#[openapi(info(
    description = "Weekly market intelligence reports built from prices, news and a language model"
))]
struct ApiDoc;

pub(crate) fn init(state: ApiState) -> Router {
    let mut api = ApiDoc::openapi();
    PLATFORM_NAME.clone_into(&mut api.info.title);
    api.components.get_or_insert_with(Components::default).add_security_scheme(
        "session",
        SecurityScheme::Http(HttpBuilder::new().scheme(HttpAuthScheme::Bearer).build()),
    );

    // Every report route needs a live session
    let reports =
        report::routes().route_layer(from_fn_with_state(state.clone(), require_session));
    // A closed session takes its latest report with it
    let auth =
        access::routes().layer(from_fn_with_state(state.clone(), report::forget_closed_sessions));

    // Separate the OpenAPI routes and the API documentation object
    let (openapi_routes, api_doc) = OpenApiRouter::with_openapi(api)
        .merge(recap::server::router::system_router())
        .merge(auth)
        .merge(reports)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
        .split_for_parts();

    // Create the Scalar UI routes
    let scalar_routes = Scalar::with_url("/api", api_doc);

    Router::new().merge(openapi_routes).merge(scalar_routes)
}
