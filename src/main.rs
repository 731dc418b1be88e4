mod core;
mod features;
mod shared;

use crate::core::config::Config;
use crate::core::{app, database, error};
use crate::features::categories::repositories::PgCategoryRepository;
use crate::features::categories::{seed, CategoryService};
use std::sync::Arc;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

fn main() -> anyhow::Result<()> {
    // Build Tokio runtime with configurable worker threads
    let worker_threads = std::env::var("TOKIO_WORKER_THREADS")
        .ok()
        .and_then(|s| s.parse().ok())
        .unwrap_or_else(|| {
            std::thread::available_parallelism()
                .map(|p| p.get())
                .unwrap_or(4)
        });

    let runtime = tokio::runtime::Builder::new_multi_thread()
        .worker_threads(worker_threads)
        .max_blocking_threads(worker_threads * 4)
        .enable_all()
        .build()?;

    let command = std::env::args().nth(1);
    runtime.block_on(async_main(worker_threads, command))
}

async fn async_main(worker_threads: usize, command: Option<String>) -> anyhow::Result<()> {
    // Load .env file BEFORE initializing logger so RUST_LOG is available
    let _ = dotenvy::dotenv();

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = Config::from_env().map_err(|e| anyhow::anyhow!(e))?;
    error::expose_error_details(config.app.is_development());

    tracing::info!(
        "System info: available_cpus={}, tokio_worker_threads={}, environment={}, pid={}",
        std::thread::available_parallelism()
            .map(|p| p.get())
            .unwrap_or(1),
        worker_threads,
        config.app.environment,
        std::process::id()
    );

    let pool = database::connect(&config.database).await?;

    let repository = Arc::new(PgCategoryRepository::new(pool));
    let category_service = Arc::new(CategoryService::new(repository));

    match command.as_deref() {
        None | Some("serve") => {}
        Some("seed") => {
            let created = seed::seed_demo_catalog(&category_service)
                .await
                .map_err(|e| anyhow::anyhow!("Seeding failed: {}", e))?;
            tracing::info!("Seeding completed ({} categories)", created);
            return Ok(());
        }
        Some(other) => anyhow::bail!("Unknown command '{}', expected 'serve' or 'seed'", other),
    }

    let app = app::build_router(category_service, &config);

    let addr = config.app.server_address();
    let socket_addr: std::net::SocketAddr = addr
        .parse()
        .map_err(|e| anyhow::anyhow!("Invalid address: {}", e))?;

    let socket = socket2::Socket::new(
        socket2::Domain::for_address(socket_addr),
        socket2::Type::STREAM,
        Some(socket2::Protocol::TCP),
    )?;

    socket.set_reuse_address(true)?;
    socket.set_nodelay(true)?;
    socket.set_tcp_keepalive(
        &socket2::TcpKeepalive::new().with_time(std::time::Duration::from_secs(60)),
    )?;

    socket.set_nonblocking(true)?;
    socket.bind(&socket_addr.into())?;
    socket.listen(1024)?;

    let listener = tokio::net::TcpListener::from_std(socket.into())?;
    tracing::info!("Server listening on http://{}", addr);
    tracing::info!("Swagger UI available at http://{}/swagger-ui/", addr);

    axum::serve(listener, app).await?;

    Ok(())
}
