use std::path::PathBuf;

/// Runtime settings, read once at startup from the environment
/// (`.env` is loaded by `dotenvy` in `main`).
#[derive(Debug, Clone)]
pub struct Config {
    pub bind_addr: String,
    pub jwt_secret: String,
    /// Root of the statically served tree; avatars live in a subdirectory.
    pub static_dir: PathBuf,
    pub avatar_dir: PathBuf,
    /// Destination for the spreadsheet upload endpoint.
    pub upload_dir: PathBuf,
}

impl Config {
    pub fn from_env() -> Self {
        let jwt_secret = std::env::var("JWT_SECRET").expect("JWT_SECRET must be set!");
        let bind_addr =
            std::env::var("BIND_ADDR").unwrap_or_else(|_| "0.0.0.0:3000".to_string());
        let static_dir =
            PathBuf::from(std::env::var("STATIC_DIR").unwrap_or_else(|_| "static".to_string()));
        let avatar_dir = static_dir.join("profile_pics");
        let upload_dir =
            PathBuf::from(std::env::var("UPLOAD_DIR").unwrap_or_else(|_| "uploads".to_string()));

        Self {
            bind_addr,
            jwt_secret,
            static_dir,
            avatar_dir,
            upload_dir,
        }
    }
}
