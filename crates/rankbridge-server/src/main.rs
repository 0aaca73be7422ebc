use std::future::IntoFuture;
use std::path::PathBuf;
use std::sync::Arc;

use clap::Parser;
use serenity::all::GatewayIntents;
use serenity::http::Http;
use serenity::model::id::GuildId;
use serenity::Client;
use tracing_subscriber::EnvFilter;

use rankbridge_core::allowlist::Allowlist;
use rankbridge_core::cache::RankColorCache;
use rankbridge_core::platform::RankPlatform;
use rankbridge_server::discord::{DiscordPlatform, SyncHandler};
use rankbridge_server::state::AppState;

#[derive(Parser)]
#[command(
    name = "rankbridge-server",
    about = "Role sync service — caches guild rank colors and reassigns rank roles",
    version
)]
struct Cli {
    /// Discord bot token
    #[arg(long, env = "DISCORD_TOKEN", hide_env_values = true)]
    token: String,

    /// Guild (server) id to sync roles from
    #[arg(long, env = "GUILD_ID")]
    guild_id: u64,

    /// HTTP port for the API and static assets
    #[arg(long, env = "PORT", default_value_t = 3001)]
    port: u16,

    /// Directory of static assets served at /
    #[arg(long, env = "STATIC_DIR", default_value = "public")]
    static_dir: PathBuf,

    /// Comma-separated override of the tracked rank names
    #[arg(long, env = "RANKS")]
    ranks: Option<String>,
}

fn init_logging() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .compact()
        .init();
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    init_logging();
    let cli = Cli::parse();

    anyhow::ensure!(cli.guild_id != 0, "GUILD_ID must be a nonzero snowflake");

    let allowlist = cli
        .ranks
        .as_deref()
        .map(Allowlist::from_csv)
        .unwrap_or_default();
    tracing::info!(
        ranks = %allowlist.names().collect::<Vec<_>>().join(","),
        "tracking rank roles"
    );

    let http = Arc::new(Http::new(&cli.token));
    let platform: Arc<dyn RankPlatform> =
        Arc::new(DiscordPlatform::new(http, GuildId::new(cli.guild_id)));
    let cache = Arc::new(RankColorCache::new(allowlist));
    let state = AppState::new(platform, cache);

    let (first_sync_tx, first_sync_rx) = tokio::sync::oneshot::channel();
    let mut client = Client::builder(&cli.token, GatewayIntents::GUILDS)
        .event_handler(SyncHandler::new(state.clone(), first_sync_tx))
        .await?;

    // No traffic is served until the gateway session is up and the first
    // refresh has landed: a dead token or unreachable gateway keeps the
    // port closed instead of exposing an empty color map.
    let mut gateway = std::pin::pin!(client.start());
    tokio::select! {
        result = &mut gateway => {
            result?;
            anyhow::bail!("gateway client exited before the first rank sync");
        }
        result = first_sync_rx => {
            result.map_err(|_| anyhow::anyhow!("gateway handler dropped before the first rank sync"))??;
        }
    }

    let app = rankbridge_server::build_router(state, cli.static_dir.clone());
    let listener = tokio::net::TcpListener::bind(("0.0.0.0", cli.port)).await?;
    tracing::info!("role sync API listening on http://localhost:{}", cli.port);

    tokio::select! {
        result = &mut gateway => result?,
        result = axum::serve(listener, app).into_future() => result?,
    }

    Ok(())
}
