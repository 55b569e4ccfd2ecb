use anyhow::Result;
use axum::Router;
use clap::Parser;
use matcher::{IdfMode, VectorizerConfig};
use server::build_app;
use std::net::SocketAddr;
use tokio::net::TcpListener;
use tracing_subscriber::{fmt, EnvFilter};

#[derive(Parser)]
#[command(name = "server", about = "Serve recipe recommendations over HTTP")]
struct Args {
    /// Recipe corpus: a CSV/JSON/JSONL file or a directory of them
    #[arg(long, env = "RECIPES_CORPUS", default_value = "./data/recipes.csv")]
    corpus: String,
    /// Host to bind
    #[arg(long, env = "HOST", default_value = "0.0.0.0")]
    host: String,
    /// Port to bind
    #[arg(long, env = "PORT", default_value_t = 8080)]
    port: u16,
    /// IDF weighting: smooth or plain
    #[arg(long, default_value_t = IdfMode::Smooth)]
    idf: IdfMode,
    /// Weight terms by raw count instead of 1 + ln(count)
    #[arg(long, default_value_t = false)]
    raw_tf: bool,
}

#[tokio::main]
async fn main() -> Result<()> {
    fmt().with_env_filter(EnvFilter::from_default_env()).init();
    let args = Args::parse();
    let config = VectorizerConfig { idf: args.idf, sublinear_tf: !args.raw_tf };
    let app: Router = build_app(args.corpus.clone(), config)?;

    let addr: SocketAddr = format!("{}:{}", args.host, args.port).parse()?;
    let listener = TcpListener::bind(addr).await?;
    tracing::info!(%addr, "server listening");
    axum::serve(listener, app).await?;
    Ok(())
}
