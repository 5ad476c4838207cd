//! url2md-server entrypoint

use clap::Parser;
use std::net::SocketAddr;
use tracing::info;
use tracing_subscriber::EnvFilter;
use url2md_server::{create_router, AppState};

/// url2md - convert any URL to clean Markdown
#[derive(Parser, Debug)]
#[command(name = "url2md-server")]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Port to listen on
    #[arg(long, env = "PORT", default_value_t = 3000)]
    port: u16,

    /// Directory holding the static landing page
    #[arg(long, default_value = "public")]
    public_dir: String,
}

#[tokio::main]
async fn main() -> std::io::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let args = Args::parse();
    let app = create_router(AppState::new(), &args.public_dir);

    let addr = SocketAddr::from(([0, 0, 0, 0], args.port));
    let listener = tokio::net::TcpListener::bind(addr).await?;
    info!("url2md running at http://localhost:{}", args.port);

    axum::serve(listener, app).await
}
