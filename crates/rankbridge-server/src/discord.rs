use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use serenity::all::{Context, EventHandler, Ready, Role};
use serenity::http::Http;
use serenity::model::id::{GuildId, RoleId, UserId};
use tokio::sync::oneshot;

use rankbridge_core::error::{RankError, Result};
use rankbridge_core::platform::{PlatformRole, RankPlatform};

use crate::state::AppState;

/// `RankPlatform` backed by the Discord REST API.
///
/// Every call is a live request against the guild; nothing is cached at
/// this layer.
pub struct DiscordPlatform {
    http: Arc<Http>,
    guild_id: GuildId,
}

impl DiscordPlatform {
    pub fn new(http: Arc<Http>, guild_id: GuildId) -> Self {
        Self { http, guild_id }
    }

    fn parse_member(&self, member_id: &str) -> Result<UserId> {
        member_id
            .parse::<u64>()
            .ok()
            .filter(|id| *id != 0)
            .map(UserId::new)
            .ok_or_else(|| RankError::InvalidMemberId(member_id.to_string()))
    }
}

fn upstream_error(err: serenity::Error) -> RankError {
    RankError::Upstream(err.to_string())
}

fn member_error(member_id: &str, err: serenity::Error) -> RankError {
    if let serenity::Error::Http(serenity::http::HttpError::UnsuccessfulRequest(resp)) = &err {
        if resp.status_code.as_u16() == 404 {
            return RankError::MemberNotFound(member_id.to_string());
        }
    }
    upstream_error(err)
}

#[async_trait]
impl RankPlatform for DiscordPlatform {
    async fn fetch_roles(&self) -> Result<Vec<PlatformRole>> {
        let roles = self
            .http
            .get_guild_roles(self.guild_id)
            .await
            .map_err(upstream_error)?;
        Ok(roles
            .into_iter()
            .map(|role| PlatformRole {
                id: role.id.get(),
                name: role.name,
                color: role.colour.0,
            })
            .collect())
    }

    async fn member_role_ids(&self, member_id: &str) -> Result<Vec<u64>> {
        let user_id = self.parse_member(member_id)?;
        let member = self
            .http
            .get_member(self.guild_id, user_id)
            .await
            .map_err(|err| member_error(member_id, err))?;
        Ok(member.roles.iter().map(|id| id.get()).collect())
    }

    async fn add_member_role(&self, member_id: &str, role_id: u64) -> Result<()> {
        let user_id = self.parse_member(member_id)?;
        self.http
            .add_member_role(
                self.guild_id,
                user_id,
                RoleId::new(role_id),
                Some("rank reassignment"),
            )
            .await
            .map_err(upstream_error)
    }

    async fn remove_member_role(&self, member_id: &str, role_id: u64) -> Result<()> {
        let user_id = self.parse_member(member_id)?;
        self.http
            .remove_member_role(
                self.guild_id,
                user_id,
                RoleId::new(role_id),
                Some("rank reassignment"),
            )
            .await
            .map_err(upstream_error)
    }
}

/// Gateway listener: loads the color cache once the session is ready and
/// reloads it whenever an allow-listed role is created or updated.
///
/// The outcome of the first startup refresh is reported over `first_sync_tx`
/// exactly once so the process can hold the HTTP listener until the cache
/// is populated, and fail fast when the gateway session never yields one.
pub struct SyncHandler {
    state: AppState,
    first_sync_tx: Mutex<Option<oneshot::Sender<Result<()>>>>,
}

impl SyncHandler {
    pub fn new(state: AppState, first_sync_tx: oneshot::Sender<Result<()>>) -> Self {
        Self {
            state,
            first_sync_tx: Mutex::new(Some(first_sync_tx)),
        }
    }

    async fn refresh(&self, trigger: &str) -> Result<()> {
        match self.state.cache.refresh(self.state.platform.as_ref()).await {
            Ok(()) => {
                let ranks = self.state.cache.snapshot().len();
                tracing::info!(ranks, trigger, "rank colors refreshed");
                Ok(())
            }
            // Previous snapshot stays in place; no retry.
            Err(err) => {
                tracing::error!(trigger, error = %err, "rank color refresh failed");
                Err(err)
            }
        }
    }

    /// Startup refresh. Signals the result the first time only; `ready`
    /// fires again on session resume and those refreshes are routine.
    async fn first_sync(&self) {
        let result = self.refresh("startup").await;
        let tx = self
            .first_sync_tx
            .lock()
            .unwrap_or_else(std::sync::PoisonError::into_inner)
            .take();
        if let Some(tx) = tx {
            let _ = tx.send(result);
        }
    }
}

#[async_trait]
impl EventHandler for SyncHandler {
    async fn ready(&self, _ctx: Context, ready: Ready) {
        tracing::info!(user = %ready.user.name, "gateway session ready");
        self.first_sync().await;
    }

    async fn guild_role_create(&self, _ctx: Context, new: Role) {
        if self.state.cache.allowlist().contains(&new.name) {
            let _ = self.refresh("role created").await;
        }
    }

    async fn guild_role_update(&self, _ctx: Context, _old: Option<Role>, new: Role) {
        if self.state.cache.allowlist().contains(&new.name) {
            let _ = self.refresh("role updated").await;
        }
    }
}
