use std::sync::Arc;

use crate::{
    config::Config,
    store::{PostStore, UserStore},
};

/// Shared application state: the two stores plus runtime settings.
///
/// `Arc` keeps the clones cheap; the stores are internally synchronized, so
/// concurrent requests race at the storage layer with the last write winning.
#[derive(Clone)]
pub struct AppState {
    pub users: Arc<UserStore>,
    pub posts: Arc<PostStore>,
    pub config: Arc<Config>,
}

impl AppState {
    pub fn new(config: Config) -> Self {
        Self {
            users: Arc::new(UserStore::new()),
            posts: Arc::new(PostStore::new()),
            config: Arc::new(config),
        }
    }
}
