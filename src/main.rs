use actix::prelude::*;
use actix_files::Files;
use actix_session::config::PersistentSession;
use actix_session::SessionMiddleware;
use actix_session::storage::{CookieSessionStore, RedisSessionStore};
use actix_web::cookie::{Key, SameSite};
use actix_web::{App, HttpServer, web};
use anyhow::Context as _;
use path_clean::PathClean;
use std::path::PathBuf;
use std::sync::Arc;

mod actors;
mod booking;
mod config;
mod content;
mod errors;
mod gallery;
mod logger;
mod routing;
mod session;
mod static_assets;
mod templates;
mod view;

use actors::booking_intake::BookingIntakeActor;
use actors::health::HealthActor;
use actors::page_renderer::PageRendererActor;
use actors::ssg::{BuildSite, SsgActor};
use actors::template_renderer::{TemplateRendererActor, shared_environment};
use config::{CONFIG, SessionBackend};
use view::SiteSettings;

use clap::Parser;

#[derive(Parser)]
#[command(name = "redlion")]
#[command(about = "The Redlion Safaris website and booking form.", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(clap::Subcommand)]
enum Commands {
    /// Runs the development web server
    Dev,
    /// Runs the production web server
    Serve,
    /// Renders the site into a folder of static files
    Build {
        #[clap(long, default_value = "dist")]
        out: PathBuf,
    },
}

#[actix_web::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Some(Commands::Dev) | None => run_server(true).await,
        Some(Commands::Serve) => run_server(false).await,
        Some(Commands::Build { out }) => build_site(out).await,
    }
}

fn static_path() -> Option<PathBuf> {
    CONFIG
        .static_path
        .as_ref()
        .map(|path| PathBuf::from(path).clean())
}

/// Starts the renderer pipeline shared by the server and the static build.
fn start_renderer(
    threads: usize,
    dev_mode: bool,
    health_actor: Addr<HealthActor>,
) -> anyhow::Result<Addr<PageRendererActor>> {
    let env = shared_environment().map_err(|e| anyhow::anyhow!("templates failed to load: {}", e))?;
    let template_renderer = SyncArbiter::start(threads, move || TemplateRendererActor::new(env.clone(), dev_mode));
    Ok(PageRendererActor::new(template_renderer, health_actor).start())
}

async fn session_store() -> anyhow::Result<(session::RuntimeSessionStore, Key)> {
    let Some(session_config) = &CONFIG.session else {
        log::warn!("Heads up! No session key was found in your `config.yaml`. We're using a temporary key for now, so booking progress is lost on restart. Set `session.secret_key` for production.");
        let store = session::RuntimeSessionStore::Cookie(Arc::new(CookieSessionStore::default()));
        return Ok((store, Key::generate()));
    };

    let secret_key = Key::try_from(session_config.secret_key.as_bytes()).map_err(|e| {
        anyhow::anyhow!(
            "Your `secret_key` in `config.yaml` is not long enough. It needs to be at least 64 characters long. Details: {}",
            e
        )
    })?;

    let store = match session_config.backend {
        SessionBackend::Cookie => session::RuntimeSessionStore::Cookie(Arc::new(CookieSessionStore::default())),
        SessionBackend::Memory => {
            let store = session::MemoryStore::new();
            let sweeper = store.clone();
            actix_rt::spawn(async move {
                let mut interval = actix_rt::time::interval(std::time::Duration::from_secs(60));
                loop {
                    interval.tick().await;
                    let purged = sweeper.purge_expired();
                    if purged > 0 {
                        log::debug!("Purged {} expired sessions, {} still active", purged, sweeper.len());
                    }
                }
            });
            session::RuntimeSessionStore::Memory(store)
        }
        SessionBackend::Redis => {
            let redis_url = session_config
                .redis_url
                .as_ref()
                .context("`session.redis_url` is required for the redis session backend")?;
            let redis_pool_size = session_config.redis_pool_size.unwrap_or(10) as usize;
            let mut redis_cfg = deadpool_redis::Config::from_url(redis_url);
            redis_cfg.pool = Some(deadpool_redis::PoolConfig {
                max_size: redis_pool_size,
                ..Default::default()
            });
            let redis_pool = redis_cfg
                .create_pool(Some(deadpool_redis::Runtime::Tokio1))
                .context("Failed to create redis pool")?;
            let store = RedisSessionStore::new_pooled(redis_pool)
                .await
                .context("Failed to create Redis session store")?;
            session::RuntimeSessionStore::Redis(store)
        }
    };
    Ok((store, secret_key))
}

async fn run_server(dev_mode: bool) -> anyhow::Result<()> {
    let log_level = CONFIG.log_level.as_deref().unwrap_or(if dev_mode { "debug" } else { "info" });
    logger::init_logger(log_level);

    // --- Core Allocation ---
    // Template rendering is CPU-bound and gets its own thread pool.
    let total_cores = num_cpus::get();
    let template_renderer_threads = (total_cores / 2).max(1);
    let actix_web_threads = total_cores.saturating_sub(template_renderer_threads).max(1);

    log::debug!(
        "Core allocation: Total={}, Actix Web={}, Template Renderer={}",
        total_cores,
        actix_web_threads,
        template_renderer_threads
    );

    // --- Actor Initialization ---
    let health_actor = HealthActor::new().start();
    let renderer = start_renderer(template_renderer_threads, dev_mode, health_actor.clone())?;
    let sink = booking::sink::sink_from_config(&CONFIG.booking)?;
    log::info!("Bookings are delivered via the {} sink", sink.name());
    let intake = BookingIntakeActor::new(sink, health_actor.clone()).start();

    let state = web::Data::new(routing::SiteState {
        renderer,
        intake,
        health: health_actor,
        settings: SiteSettings::from_config(&CONFIG),
        dev_mode,
    });

    let (runtime_store, runtime_secret) = session_store().await?;
    let session_config = CONFIG.session.clone();
    let static_path = static_path();

    let host = CONFIG.server_address().to_string();
    let port = CONFIG.port();

    let server = HttpServer::new(move || {
        let mut app = App::new()
            .wrap(actix_web::middleware::Compress::default())
            .app_data(state.clone())
            .configure(routing::configure);

        if let Some(static_path) = &static_path {
            app = app.service(Files::new(CONFIG.static_url_prefix(), static_path.clone()));
        }

        app = app.default_service(web::route().to(routing::not_found));

        let cookie_ttl = session_config
            .as_ref()
            .and_then(|s| s.cookie_max_age.map(actix_web::cookie::time::Duration::seconds))
            .unwrap_or(actix_web::cookie::time::Duration::days(7));

        app.wrap(
            SessionMiddleware::builder(runtime_store.clone(), runtime_secret.clone())
                .cookie_name(
                    session_config
                        .as_ref()
                        .map(|s| s.cookie_name.clone())
                        .unwrap_or_else(|| "redlion_session".to_string()),
                )
                .cookie_secure(session_config.as_ref().map(|s| s.cookie_secure).unwrap_or(false))
                .cookie_http_only(session_config.as_ref().map(|s| s.cookie_http_only).unwrap_or(true))
                .cookie_path(
                    session_config
                        .as_ref()
                        .map(|s| s.cookie_path.clone())
                        .unwrap_or_else(|| "/".to_string()),
                )
                .cookie_same_site(SameSite::Lax)
                .cookie_domain(session_config.as_ref().and_then(|s| s.cookie_domain.clone()))
                .session_lifecycle(PersistentSession::default().session_ttl(cookie_ttl))
                .build(),
        )
    })
    .workers(actix_web_threads)
    .keep_alive(std::time::Duration::from_secs(30))
    .bind((host.as_str(), port))
    .map_err(|e| {
        if e.kind() == std::io::ErrorKind::AddrInUse {
            println!("Error: The port {} is already in use.", port);
            println!("Another application is likely running on this port.");
            println!("Please stop the other application or choose a different port in `config.yaml`.");
            std::process::exit(1);
        }
        e
    })?;

    logger::print_banner(&host, port, dev_mode);

    server.run().await?;
    Ok(())
}

async fn build_site(out: PathBuf) -> anyhow::Result<()> {
    logger::init_logger(CONFIG.log_level.as_deref().unwrap_or("info"));

    let health_actor = HealthActor::new().start();
    let renderer = start_renderer(1, false, health_actor)?;
    let ssg = SsgActor::new(renderer, SiteSettings::from_config(&CONFIG)).start();

    let index = ssg
        .send(BuildSite {
            output_path: out.clean(),
            static_path: static_path(),
        })
        .await??;

    println!("Site written to {}", index.display());
    Ok(())
}
