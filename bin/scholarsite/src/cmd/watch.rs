//! Watch command - development server with live reload

use std::{
    collections::HashSet,
    path::{Path, PathBuf},
    sync::Arc,
    time::Duration,
};

use color_eyre::eyre::{Result, WrapErr};
use notify::{EventKind, RecommendedWatcher, RecursiveMode, Watcher, event::ModifyKind};
use scholarsite_core::Config;
use scholarsite_generator::{BuildStats, Builder};
use tokio::{net::TcpListener, sync::mpsc};

use super::{SitePaths, build::print_warnings, check::quick_validate};
use crate::server::{LIVERELOAD_SCRIPT, ServerState, create_router};

/// Debounce interval for file changes.
const DEBOUNCE_MS: u64 = 200;

/// Run the watch command.
///
/// Builds with drafts, serves the output and rebuilds when content, static
/// files or the configuration change.
pub async fn run(config_path: &Path, port: u16, open_browser: bool) -> Result<()> {
    tracing::info!(?config_path, port, "Starting watch mode");

    let config = load_config(config_path)?;
    let paths = SitePaths::resolve(config_path, &config);
    print_warnings(&quick_validate(&paths));

    tracing::info!("Running initial build...");
    let stats = build(config, &paths)?;
    print_build_stats(&stats);

    let state = Arc::new(ServerState::new());

    let (tx, mut rx) = mpsc::channel::<Vec<PathBuf>>(64);
    let mut watcher = RecommendedWatcher::new(
        move |res: Result<notify::Event, notify::Error>| match res {
            Ok(event) if is_relevant(&event.kind) => {
                // Receiver gone means the server is shutting down
                let _ = tx.blocking_send(event.paths);
            }
            Ok(_) => {}
            Err(e) => tracing::warn!(error = %e, "watch error"),
        },
        notify::Config::default(),
    )
    .wrap_err("Failed to create file watcher")?;

    for dir in [&paths.content_dir, &paths.static_dir] {
        if dir.exists() {
            watcher
                .watch(dir, RecursiveMode::Recursive)
                .wrap_err_with(|| format!("Failed to watch {}", dir.display()))?;
            tracing::debug!(dir = %dir.display(), "watching directory");
        }
    }
    watcher
        .watch(config_path, RecursiveMode::NonRecursive)
        .wrap_err("Failed to watch configuration file")?;

    let rebuild_state = state.clone();
    let rebuild_config = config_path.to_path_buf();
    let rebuild_paths = paths.clone();

    tokio::spawn(async move {
        while let Some(first) = rx.recv().await {
            let mut changed: HashSet<PathBuf> = first.into_iter().collect();

            // Let an editor's burst of writes settle, then take everything queued
            tokio::time::sleep(Duration::from_millis(DEBOUNCE_MS)).await;
            while let Ok(more) = rx.try_recv() {
                changed.extend(more);
            }

            println!();
            println!("  {} file(s) changed, rebuilding...", changed.len());

            // Reloading the config picks up edits to config.toml itself
            let result = load_config(&rebuild_config).and_then(|config| build(config, &rebuild_paths));

            match result {
                Ok(stats) => {
                    println!("  ✓ Rebuilt {} pages in {}ms", stats.pages, stats.duration_ms);
                    if only_stylesheets(&changed) {
                        rebuild_state.notify_css_reload();
                    } else {
                        rebuild_state.notify_reload();
                    }
                }
                Err(e) => {
                    tracing::error!("Rebuild failed: {e:#}");
                    eprintln!("  ✗ Rebuild failed: {e:#}");
                }
            }
        }
    });

    let app = create_router(&paths.output_dir, state);
    let addr = format!("127.0.0.1:{port}");

    let listener = TcpListener::bind(&addr)
        .await
        .wrap_err_with(|| format!("Failed to bind to {addr}"))?;

    println!();
    println!("  Dev server running at http://{addr}");
    println!("  Press Ctrl+C to stop");
    println!();

    if open_browser && let Err(e) = open::that(format!("http://{addr}")) {
        tracing::warn!(error = %e, "failed to open browser");
    }

    // Keep watcher alive
    let _watcher = watcher;

    axum::serve(listener, app).await.wrap_err("Server error")?;

    Ok(())
}

/// Load the configuration with drafts enabled for previews.
fn load_config(config_path: &Path) -> Result<Config> {
    let mut config = Config::load_with_env(config_path).wrap_err("Failed to load configuration")?;
    config.build.drafts = true;
    Ok(config)
}

fn build(config: Config, paths: &SitePaths) -> Result<BuildStats> {
    let mut builder = Builder::new(config, &paths.content_dir, &paths.output_dir)
        .with_live_reload(LIVERELOAD_SCRIPT);
    if paths.static_dir.is_dir() {
        builder = builder.with_static_dir(&paths.static_dir);
    }

    let stats = builder.build().wrap_err("Build failed")?;
    tracing::debug!(?stats, "Build completed");
    Ok(stats)
}

/// Writes, creations and removals trigger a rebuild.
fn is_relevant(kind: &EventKind) -> bool {
    matches!(
        kind,
        EventKind::Modify(ModifyKind::Data(_) | ModifyKind::Name(_))
            | EventKind::Create(_)
            | EventKind::Remove(_)
    )
}

/// Whether every changed path is a stylesheet.
fn only_stylesheets(changed: &HashSet<PathBuf>) -> bool {
    !changed.is_empty()
        && changed
            .iter()
            .all(|p| p.extension().is_some_and(|ext| ext == "css"))
}

/// Print build statistics in a user-friendly format.
fn print_build_stats(stats: &BuildStats) {
    println!();
    println!("  Build Statistics:");
    println!("  ─────────────────────────────────");
    println!("  Pages:        {:>6}", stats.pages);
    println!("  Records:      {:>6}", stats.records);
    println!("  Assets:       {:>6}", stats.assets);
    println!("  ─────────────────────────────────");
    println!("  Duration:     {:>6}ms", stats.duration_ms);
    println!();
}
