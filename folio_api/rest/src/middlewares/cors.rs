use axum::Router;
use tower_http::cors::{Any, CorsLayer};

/// The api is called from the portfolio frontend, wherever it is hosted.
pub fn add<S: Clone + Send + Sync + 'static>(router: Router<S>) -> Router<S> {
    router.layer(
        CorsLayer::new()
            .allow_origin(Any)
            .allow_methods(Any)
            .allow_headers(Any),
    )
}
