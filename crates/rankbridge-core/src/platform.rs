use async_trait::async_trait;

use crate::error::Result;

/// A role as reported by the upstream platform.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlatformRole {
    pub id: u64,
    pub name: String,
    /// Packed 0xRRGGBB display color.
    pub color: u32,
}

/// The upstream capability surface the domain logic depends on.
///
/// The real implementation talks to the chat platform's REST API; tests
/// substitute an in-memory fake. No caching happens behind this trait —
/// every call is a live upstream request.
#[async_trait]
pub trait RankPlatform: Send + Sync {
    /// Fetch the guild's full role list.
    async fn fetch_roles(&self) -> Result<Vec<PlatformRole>>;

    /// Fetch the role ids a member currently holds.
    async fn member_role_ids(&self, member_id: &str) -> Result<Vec<u64>>;

    async fn add_member_role(&self, member_id: &str, role_id: u64) -> Result<()>;

    async fn remove_member_role(&self, member_id: &str, role_id: u64) -> Result<()>;
}
