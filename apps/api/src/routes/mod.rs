pub mod health;

use axum::{
    extract::DefaultBodyLimit,
    routing::{get, post},
    Router,
};
use portfolio_content::{
    About, Achievement, Certification, ContactInfo, Experience, Project, Resource, ResourceKind,
    Service, Skill,
};
use tower_http::services::ServeDir;

use crate::content::handlers::{get_singleton, list_collection, replace_collection, replace_singleton};
use crate::state::AppState;
use crate::upload::{handle_upload, UPLOADS_ROUTE};

/// GET/PUT pair for one resource, picked by its kind.
fn resource_route<R: Resource>() -> axum::routing::MethodRouter<AppState> {
    match R::KIND {
        ResourceKind::Collection => get(list_collection::<R>).put(replace_collection::<R>),
        ResourceKind::Singleton => get(get_singleton::<R>).put(replace_singleton::<R>),
    }
}

pub fn build_router(state: AppState) -> Router {
    let uploads = ServeDir::new(&state.config.uploads_dir);

    Router::new()
        .route("/", get(health::status_page))
        .route("/health", get(health::health_handler))
        // Content resources
        .route(&path::<Skill>(), resource_route::<Skill>())
        .route(&path::<Certification>(), resource_route::<Certification>())
        .route(&path::<Achievement>(), resource_route::<Achievement>())
        .route(&path::<Project>(), resource_route::<Project>())
        .route(&path::<Experience>(), resource_route::<Experience>())
        .route(&path::<Service>(), resource_route::<Service>())
        .route(&path::<ContactInfo>(), resource_route::<ContactInfo>())
        .route(&path::<About>(), resource_route::<About>())
        // Uploads: no size limit on the way in, served as static files on the way out
        .route(
            "/upload",
            post(handle_upload).layer(DefaultBodyLimit::disable()),
        )
        .nest_service(UPLOADS_ROUTE, uploads)
        .with_state(state)
}

fn path<R: Resource>() -> String {
    format!("/{}", R::NAME)
}
