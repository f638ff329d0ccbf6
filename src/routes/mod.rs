mod health;
pub mod named;
mod video_games;

use axum::Router;

use crate::state::AppState;
use named::{Companies, Genres, Platforms};

/// Build the complete application router.
///
/// Structure:
/// - `GET /health`: liveness check
/// - `GET /api/v1/health`: database connectivity with ping latency
/// - `/api/v1/{genres,platforms,companies,video-games}`: catalogue resources
pub fn router() -> Router<AppState> {
    let api_v1 = Router::new()
        .merge(health::api_router())
        .nest("/genres", named::router::<Genres>())
        .nest("/platforms", named::router::<Platforms>())
        .nest("/companies", named::router::<Companies>())
        .nest("/video-games", video_games::router());

    Router::new()
        .merge(health::root_router())
        .nest("/api/v1", api_v1)
}
