//! Operator CLI for the moderation queue
//!
//! Runs the same cascade as the HTTP API against the configured database.
//! Output is one JSON object per invocation so it can be scripted.

use std::env;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use serde::Serialize;
use situs_core::common::{Actor, MemberId, Role, SiteId};
use situs_core::domains::auth::JwtService;
use situs_core::domains::moderation::{CascadeEngine, CascadeOutcome, PgModerationStore};
use situs_core::domains::sites::{Site, SiteListing};
use situs_core::JwtConfig;
use sqlx::PgPool;

#[derive(Parser)]
#[command(name = "moderation_cli")]
#[command(about = "Review site submissions from the command line")]
struct Cli {
    /// Member id recorded as the reviewer
    #[arg(long, global = true, default_value_t = 1)]
    moderator: i32,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List sites awaiting review
    Pending,

    /// Verify a site and promote its pending dependents
    Approve { site_id: String },

    /// Reject a site and demote dependents nothing else references
    Reject { site_id: String },

    /// Apply database migrations
    Migrate,

    /// Issue a session token (needs JWT_SECRET, not DATABASE_URL)
    Token {
        member_id: i32,
        #[arg(long, default_value = "verifier")]
        role: Role,
    },
}

#[derive(Serialize)]
struct Response {
    success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    message: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    outcome: Option<CascadeOutcome>,
    #[serde(skip_serializing_if = "Option::is_none")]
    sites: Option<Vec<SiteListing>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    token: Option<String>,
}

impl Response {
    fn message(message: impl Into<String>) -> Self {
        Self {
            success: true,
            message: Some(message.into()),
            outcome: None,
            sites: None,
            token: None,
        }
    }
}

fn output(resp: &Response) -> Result<()> {
    println!("{}", serde_json::to_string(resp)?);
    Ok(())
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "warn".into()),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let moderator = MemberId::new(cli.moderator.into())?;

    let result = match cli.command {
        Commands::Pending => cmd_pending().await,
        Commands::Approve { site_id } => cmd_decide(&site_id, moderator, true).await,
        Commands::Reject { site_id } => cmd_decide(&site_id, moderator, false).await,
        Commands::Migrate => cmd_migrate().await,
        Commands::Token { member_id, role } => cmd_token(member_id, role),
    };

    if let Err(e) = result {
        output(&Response {
            success: false,
            message: Some(format!("{:#}", e)),
            outcome: None,
            sites: None,
            token: None,
        })?;
        std::process::exit(1);
    }
    Ok(())
}

async fn get_pool() -> Result<PgPool> {
    let _ = dotenvy::dotenv();
    let database_url = env::var("DATABASE_URL").context("DATABASE_URL must be set")?;
    PgPool::connect(&database_url)
        .await
        .context("Failed to connect to database")
}

async fn cmd_pending() -> Result<()> {
    let pool = get_pool().await?;
    let sites = Site::find_pending(&pool).await?;
    output(&Response {
        sites: Some(sites),
        ..Response::message("Pending sites")
    })
}

async fn cmd_decide(raw_id: &str, moderator: MemberId, approve: bool) -> Result<()> {
    let site_id = SiteId::parse(raw_id)?;
    let pool = get_pool().await?;
    let engine = CascadeEngine::new(PgModerationStore::new(pool));
    let actor = Actor::new(moderator, Role::Administrator);

    let (outcome, message) = if approve {
        (engine.approve(site_id, &actor).await?, "Site verified")
    } else {
        (engine.reject(site_id, &actor).await?, "Site rejected")
    };

    output(&Response {
        outcome: Some(outcome),
        ..Response::message(message)
    })
}

async fn cmd_migrate() -> Result<()> {
    let pool = get_pool().await?;
    sqlx::migrate!("./migrations")
        .run(&pool)
        .await
        .context("Failed to run migrations")?;
    output(&Response::message("Migrations complete"))
}

fn cmd_token(member_id: i32, role: Role) -> Result<()> {
    let config = JwtConfig::from_env()?;
    let jwt = JwtService::new(&config.secret, config.issuer);
    let token = jwt.create_token(MemberId::new(member_id.into())?, role)?;
    output(&Response {
        token: Some(token),
        ..Response::message(format!("Token issued for {} ({})", member_id, role))
    })
}
