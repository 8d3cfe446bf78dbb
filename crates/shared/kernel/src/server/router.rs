use super::health;
use utoipa_axum::router::OpenApiRouter;
use utoipa_axum::routes;

/// Public system routes (`/health`).
pub fn system_router<S>() -> OpenApiRouter<S>
where
    S: Send + Sync + Clone + 'static,
{
    health::mark_started();
    OpenApiRouter::<S>::new().routes(routes!(health::health_handler))
}
