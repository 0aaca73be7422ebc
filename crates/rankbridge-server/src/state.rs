use std::sync::Arc;

use rankbridge_core::cache::RankColorCache;
use rankbridge_core::platform::RankPlatform;

/// Shared application state passed to all route handlers.
///
/// `platform` is the live upstream connection; `cache` holds the last
/// complete rank color snapshot. Both are injected so tests can swap the
/// platform for an in-memory fake.
#[derive(Clone)]
pub struct AppState {
    pub platform: Arc<dyn RankPlatform>,
    pub cache: Arc<RankColorCache>,
}

impl AppState {
    pub fn new(platform: Arc<dyn RankPlatform>, cache: Arc<RankColorCache>) -> Self {
        Self { platform, cache }
    }
}
