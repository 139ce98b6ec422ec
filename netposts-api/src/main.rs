mod server;

use netposts_common::model::{
    Id,
    blog::{BlogMarker, PRIMARY_BLOG_ID},
    network::{DEFAULT_UPLOADS_PATH, Network},
};
use netposts_db::{
    client::DbClient,
    tables::{DEFAULT_TABLE_PREFIX, InvalidTablePrefixError, TablePrefix},
};
use serde::Deserialize;
use server::ServerState;
use sqlx::mysql::MySqlPoolOptions;
use std::{
    net::{IpAddr, SocketAddr},
    sync::Arc,
};
use thiserror::Error;
use tokio_util::sync::CancellationToken;
use tower_http::trace::TraceLayer;
use tracing::{debug, error, info};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Debug, Error)]
enum InitError {
    #[error("Error parsing .env file: {0}")]
    Dotenv(#[from] dotenvy::Error),
    #[error("Error parsing environment: {0}")]
    Envy(#[from] envy::Error),
    #[error("Error in table prefix: {0}")]
    TablePrefix(#[from] InvalidTablePrefixError),
    #[error("Error connecting to the database: {0}")]
    Database(#[from] sqlx::Error),
    #[error("Error binding tcp listener: {0}")]
    TcpBind(std::io::Error),
    #[error("Error serving server: {0}")]
    TcpServe(std::io::Error),
}

#[derive(Clone, Eq, PartialEq, Debug, Hash, Deserialize)]
struct Env {
    server_address: IpAddr,
    server_port: u16,
    database_url: String,
    #[serde(default = "default_table_prefix")]
    table_prefix: String,
    #[serde(default = "default_current_blog_id")]
    current_blog_id: Id<BlogMarker>,
    #[serde(default = "default_multisite")]
    multisite: bool,
    #[serde(default = "default_uploads_path")]
    uploads_path: String,
}

fn default_table_prefix() -> String {
    DEFAULT_TABLE_PREFIX.to_owned()
}

fn default_current_blog_id() -> Id<BlogMarker> {
    PRIMARY_BLOG_ID
}

fn default_multisite() -> bool {
    true
}

fn default_uploads_path() -> String {
    DEFAULT_UPLOADS_PATH.to_owned()
}

fn install_tracing() {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
                "netposts_api=debug,\
                netposts_db=debug,\
                tower_http=debug,axum::rejection=trace,sqlx=debug"
                    .into()
            }),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();
}

fn get_env() -> Result<Env, InitError> {
    if let Err(e) = dotenvy::dotenv() {
        if e.not_found() {
            debug!("No .dotenv file found");
        } else {
            return Err(e.into());
        }
    }

    envy::from_env().map_err(InitError::from)
}

fn shutdown_token() -> CancellationToken {
    let token = CancellationToken::new();

    let cancel = token.clone();
    tokio::spawn(async move {
        if let Err(e) = tokio::signal::ctrl_c().await {
            error!(error = %e, "Could not listen for ctrl-c");
        }
        info!("Shutting down");
        cancel.cancel();
    });

    token
}

#[tokio::main]
async fn main() -> Result<(), InitError> {
    install_tracing();
    let env = get_env()?;

    let table_prefix = TablePrefix::new(env.table_prefix)?;
    let pool = MySqlPoolOptions::new()
        .connect(&env.database_url)
        .await?;
    let network = Network {
        current_blog: env.current_blog_id,
        multisite: env.multisite,
        uploads_path: env.uploads_path,
    };
    debug!(
        ?network,
        table_prefix = table_prefix.get(),
        "Connected to the network database"
    );

    let state = ServerState {
        store: Arc::new(DbClient::new(pool, table_prefix)),
        network: Arc::new(network),
    };

    let tracing_layer = TraceLayer::new_for_http();
    let app = server::routes().with_state(state).layer(tracing_layer);

    let server_address = SocketAddr::new(env.server_address, env.server_port);
    let listener = tokio::net::TcpListener::bind(server_address)
        .await
        .map_err(InitError::TcpBind)?;
    info!(%server_address, "Serving");
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_token().cancelled_owned())
        .await
        .map_err(InitError::TcpServe)?;

    Ok(())
}
