use axum::{
    Router,
    routing::{get, post},
};
use tower_http::{
    cors::{Any, CorsLayer},
    services::ServeDir,
    trace::TraceLayer,
};

use crate::{
    AppState,
    routes::{analysis, feed, health, post as posts, user},
};

/// Build the full application router over the given state.
pub fn app(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    let static_dir = state.config.static_dir.clone();

    Router::new()
        // Public routes
        .route("/", get(feed::home))
        .route("/home", get(feed::home))
        .route("/about", get(feed::about))
        .route("/health", get(health::health_check))
        .route("/register", get(user::register_page).post(user::register))
        .route("/login", get(user::login_page).post(user::login))
        .route("/logout", get(user::logout))
        .route("/post/{id}", get(posts::show_post))
        .route("/user/{username}", get(feed::user_posts))
        .route("/analysis", get(analysis::analysis_page))
        .route("/analyse", post(analysis::analyse))
        .route(
            "/analysis_excel",
            get(analysis::excel_page).post(analysis::upload_excel),
        )
        // Protected routes (session required)
        .route("/account", get(user::account).post(user::update_account))
        .route("/post/new", get(posts::new_post_page).post(posts::create_post))
        .route(
            "/post/{id}/update",
            get(posts::edit_post_page).post(posts::update_post),
        )
        .route("/post/{id}/delete", post(posts::delete_post))
        // Stored avatars and other static files
        .nest_service("/static", ServeDir::new(static_dir))
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .with_state(state)
}
