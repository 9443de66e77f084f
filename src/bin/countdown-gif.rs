use std::path::PathBuf;

use anyhow::Context as _;
use clap::{Parser, Subcommand};
use tracing::{error, info};

use countdown_gif::{
    AppState, COUNTDOWN_PATH, CountdownJob, CountdownStyle, DEFAULT_FONT_PATH, ServerConfig,
    build_thread_pool, router, unix_now,
};

#[derive(Parser, Debug)]
#[command(name = "countdown-gif", version, about = "Countdown timer GIF service")]
struct Cli {
    #[command(subcommand)]
    cmd: Option<Command>,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Serve `GET /countdown-gif?endTime=<unix-seconds>` (default).
    Serve(ServeArgs),
    /// Render one countdown GIF to a file without starting the server.
    Render(RenderArgs),
}

#[derive(Parser, Debug)]
struct ServeArgs {
    /// Bind host.
    #[arg(long, default_value = "0.0.0.0")]
    host: String,

    /// Bind port.
    #[arg(long, default_value_t = 9090)]
    port: u16,

    /// Font file read on every request.
    #[arg(long, default_value = DEFAULT_FONT_PATH)]
    font: PathBuf,

    /// Override rayon worker threads.
    #[arg(long)]
    threads: Option<usize>,
}

impl Default for ServeArgs {
    fn default() -> Self {
        let cfg = ServerConfig::default();
        Self {
            host: cfg.host,
            port: cfg.port,
            font: cfg.font_path,
            threads: cfg.threads,
        }
    }
}

#[derive(Parser, Debug)]
struct RenderArgs {
    /// Target time in Unix seconds.
    #[arg(long)]
    end_time: i64,

    /// Reference "now" in Unix seconds (defaults to the wall clock).
    #[arg(long)]
    now: Option<i64>,

    /// Output GIF path.
    #[arg(long)]
    out: PathBuf,

    /// Font file.
    #[arg(long, default_value = DEFAULT_FONT_PATH)]
    font: PathBuf,

    /// Override rayon worker threads.
    #[arg(long)]
    threads: Option<usize>,
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    let cli = Cli::parse();
    match cli.cmd.unwrap_or_else(|| Command::Serve(ServeArgs::default())) {
        Command::Serve(args) => cmd_serve(args),
        Command::Render(args) => cmd_render(args),
    }
}

fn cmd_serve(args: ServeArgs) -> anyhow::Result<()> {
    let cfg = ServerConfig {
        host: args.host,
        port: args.port,
        font_path: args.font,
        threads: args.threads,
    };

    let job = CountdownJob::new(CountdownStyle::default(), &cfg.font_path)?;
    let pool = build_thread_pool(cfg.threads)?;
    let app = router(AppState::new(job, pool));

    let runtime = tokio::runtime::Builder::new_multi_thread()
        .enable_all()
        .build()
        .context("build tokio runtime")?;

    runtime.block_on(async move {
        let addr = cfg.bind_addr();
        let listener = tokio::net::TcpListener::bind(&addr)
            .await
            .with_context(|| format!("bind '{addr}'"))?;
        info!(
            address = %addr,
            font = %cfg.font_path.display(),
            "countdown service ready: http://{addr}{COUNTDOWN_PATH}?endTime=<unix-seconds>"
        );

        if let Err(e) = axum::serve(listener, app)
            .with_graceful_shutdown(shutdown_signal())
            .await
        {
            error!(error = %e, "http server failed");
            return Err(anyhow::Error::new(e).context("serve http"));
        }
        info!("countdown service shut down");
        Ok(())
    })
}

fn cmd_render(args: RenderArgs) -> anyhow::Result<()> {
    let job = CountdownJob::new(CountdownStyle::default(), &args.font)?;
    let pool = build_thread_pool(args.threads)?;
    let now = args.now.unwrap_or_else(unix_now);

    let artifact = job.render(args.end_time, now, &pool)?;

    if let Some(parent) = args.out.parent()
        && !parent.as_os_str().is_empty()
    {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("create output dir '{}'", parent.display()))?;
    }
    std::fs::write(&args.out, artifact.bytes())
        .with_context(|| format!("write gif '{}'", args.out.display()))?;

    eprintln!(
        "wrote {} ({} frames, {} bytes)",
        args.out.display(),
        artifact.frame_count(),
        artifact.bytes().len()
    );
    Ok(())
}

/// Wait for SIGINT (Ctrl+C) or SIGTERM, then return to trigger graceful shutdown.
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            error!(error = %e, "failed to install Ctrl+C handler");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut sig) => {
                sig.recv().await;
            }
            Err(e) => {
                error!(error = %e, "failed to install SIGTERM handler");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => {},
        () = terminate => {},
    }
    info!("shutdown signal received");
}
