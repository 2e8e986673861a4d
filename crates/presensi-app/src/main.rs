mod cli;

use anyhow::Context;
use presensi_core::config::load_config;
use presensi_db::db::DbProvider;
use presensi_db::db::connection::create_pool;
use presensi_db::db::migrate::run_pending_migrations;
use presensi_service::generator::{
    generate_occurrences_with_timeout, preview_occurrences_with_timeout,
};
use presensi_service::store::postgres::PgStore;
use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, reload, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let (filter_layer, filter_handle) = reload::Layer::new(EnvFilter::new("debug"));

    tracing_subscriber::registry()
        .with(filter_layer)
        .with(
            fmt::layer()
                .with_target(true)
                .with_thread_ids(true)
                .with_file(true)
                .with_line_number(true),
        )
        .init();

    let command = match cli::parse_args(std::env::args().skip(1)) {
        Ok(command) => command,
        Err(e) => {
            eprintln!("{e}\n\n{}", cli::USAGE);
            std::process::exit(2);
        }
    };

    let config = load_config()?;

    tracing::info!(config = ?config.generation, "Configuration loaded");

    if let Ok(filter) = EnvFilter::try_new(config.logging.level.as_str()) {
        if let Err(e) = filter_handle.modify(|current| *current = filter) {
            tracing::warn!(error = %e, "Failed to update log filter from config");
        }
    } else {
        tracing::warn!(level = %config.logging.level, "Invalid log level in config, keeping debug");
    }

    run_pending_migrations(&config.database.url).await?;

    let pool = create_pool(
        &config.database.url,
        u32::from(config.database.max_connections),
    )
    .await?;
    let mut conn = pool
        .get_connection()
        .await
        .context("Failed to check out a database connection")?;
    let mut store = PgStore::new(&mut conn);

    tracing::info!(schedule_id = %command.schedule_id, dry_run = command.dry_run, "Starting generation");

    if command.dry_run {
        let rows = tokio::select! {
            rows = preview_occurrences_with_timeout(
                &mut store,
                &config.generation,
                command.schedule_id,
                &command.options,
                config.generation.timeout(),
            ) => rows?,
            _ = tokio::signal::ctrl_c() => anyhow::bail!("Interrupted"),
        };
        for row in &rows {
            println!(
                "{}\t{}\t{}\t{}",
                row.date,
                row.starts_at.map_or_else(|| "-".to_string(), |t| t.to_rfc3339()),
                row.meeting_number.map_or_else(|| "-".to_string(), |n| n.to_string()),
                row.title.as_deref().unwrap_or("-"),
            );
        }
        println!("{} sessions previewed", rows.len());
        return Ok(());
    }

    let created = tokio::select! {
        created = generate_occurrences_with_timeout(
            &mut store,
            &config.generation,
            command.schedule_id,
            &command.options,
            config.generation.timeout(),
        ) => created?,
        _ = tokio::signal::ctrl_c() => anyhow::bail!("Interrupted"),
    };

    println!("{created} sessions created");
    Ok(())
}
