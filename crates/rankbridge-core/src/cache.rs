use std::collections::BTreeMap;
use std::sync::{Arc, RwLock};

use crate::allowlist::Allowlist;
use crate::color::hex_color;
use crate::error::Result;
use crate::platform::RankPlatform;

/// Rank name → `#rrggbb` display color.
pub type RankColorMap = BTreeMap<String, String>;

/// In-memory cache of allow-listed rank colors.
///
/// `refresh` builds a complete new map and swaps it in as a single
/// reference replacement, so readers always see one coherent upstream
/// snapshot and never block on network activity. Overlapping refreshes
/// are allowed; the last swap wins.
pub struct RankColorCache {
    allowlist: Allowlist,
    snapshot: RwLock<Arc<RankColorMap>>,
}

impl RankColorCache {
    pub fn new(allowlist: Allowlist) -> Self {
        Self {
            allowlist,
            snapshot: RwLock::new(Arc::new(RankColorMap::new())),
        }
    }

    /// Re-fetch the upstream role list and replace the snapshot wholesale.
    ///
    /// On error the previous snapshot stays in place; the caller decides
    /// whether to log or propagate. There is no retry.
    pub async fn refresh(&self, platform: &dyn RankPlatform) -> Result<()> {
        let roles = platform.fetch_roles().await?;
        let mut map = RankColorMap::new();
        for role in roles {
            if self.allowlist.contains(&role.name) {
                map.insert(role.name, hex_color(role.color));
            }
        }
        *self.write_guard() = Arc::new(map);
        Ok(())
    }

    /// Current snapshot; a cheap `Arc` clone, never blocks on I/O.
    pub fn snapshot(&self) -> Arc<RankColorMap> {
        Arc::clone(
            &self
                .snapshot
                .read()
                .unwrap_or_else(|poisoned| poisoned.into_inner()),
        )
    }

    pub fn contains_rank(&self, name: &str) -> bool {
        self.snapshot().contains_key(name)
    }

    pub fn allowlist(&self) -> &Allowlist {
        &self.allowlist
    }

    fn write_guard(&self) -> std::sync::RwLockWriteGuard<'_, Arc<RankColorMap>> {
        // The lock only guards a pointer swap; a poisoned lock still holds
        // a coherent snapshot, so recover rather than propagate the panic.
        self.snapshot
            .write()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}
