use sentiment_blog::{AppState, config::Config, router};
use tracing::info;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() {
    // Initialize logging
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()))
        .with_target(false)
        .compact()
        .init();

    dotenvy::dotenv().ok();

    let config = Config::from_env();
    let addr = config.bind_addr.clone();

    let state = AppState::new(config);
    let app = router::app(state);

    let listener = tokio::net::TcpListener::bind(&addr).await.unwrap();

    info!("Server running on http://{}", addr);
    info!("Routes:");
    info!("  GET    /, /home            - Paginated post feed");
    info!("  GET    /about              - About page");
    info!("  GET    /health             - Health check");
    info!("  POST   /register           - Create account");
    info!("  POST   /login              - Login (session cookie)");
    info!("  GET    /logout             - Logout");
    info!("  GET/POST /account          - Profile and avatar (auth)");
    info!("  GET/POST /post/new         - Create post (auth)");
    info!("  GET    /post/{{id}}          - View post");
    info!("  GET/POST /post/{{id}}/update - Edit post (auth, author only)");
    info!("  POST   /post/{{id}}/delete   - Delete post (auth, author only)");
    info!("  GET    /user/{{username}}    - Posts by one user");
    info!("  GET    /analysis           - Sentiment input form");
    info!("  POST   /analyse            - Score a text");
    info!("  GET/POST /analysis_excel   - Spreadsheet upload");

    axum::serve(listener, app).await.unwrap();
}
