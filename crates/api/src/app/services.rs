use std::sync::Arc;

use usermgmt_blogs::{Blog, seed_blogs};
use usermgmt_infra::{EntityStore, InMemoryStore};
use usermgmt_users::User;

use crate::config::ApiConfig;

/// Stores shared by every handler.
///
/// Handlers only see the `EntityStore` seam, so a locking or persistent
/// implementation can replace the in-memory one without handler changes.
#[derive(Clone)]
pub struct AppServices {
    pub users: Arc<dyn EntityStore<User>>,
    pub blogs: Arc<dyn EntityStore<Blog>>,
}

impl AppServices {
    pub fn new(users: Arc<dyn EntityStore<User>>, blogs: Arc<dyn EntityStore<Blog>>) -> Self {
        Self { users, blogs }
    }

    /// In-memory wiring: empty users, blogs optionally seeded.
    pub fn in_memory(seed: bool) -> Self {
        let users: Arc<InMemoryStore<User>> = Arc::new(InMemoryStore::new());
        let blogs: Arc<InMemoryStore<Blog>> = if seed {
            Arc::new(InMemoryStore::with_records(seed_blogs()))
        } else {
            Arc::new(InMemoryStore::new())
        };
        Self::new(users, blogs)
    }
}

pub fn build_services(config: &ApiConfig) -> AppServices {
    let services = AppServices::in_memory(config.seed_blogs);
    tracing::info!(seed_blogs = config.seed_blogs, "in-memory stores ready");
    services
}
