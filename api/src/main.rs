use api::store::PgPartStore;
use common::config::CONFIG;
use common::logging::setup_logging;
use common::persistence::init_pg_pool;
use std::net::SocketAddr;
use std::sync::Arc;
use tokio::sync::Notify;
use tokio_util::sync::CancellationToken;
use tracing::info;

#[cfg(not(target_env = "msvc"))]
use tikv_jemallocator::Jemalloc;

#[cfg(not(target_env = "msvc"))]
#[global_allocator]
static GLOBAL: Jemalloc = Jemalloc;

#[tokio::main]
async fn main() {
    setup_logging("api");
    info!("starting app");
    let cancellation_token = CancellationToken::new();

    let store = Arc::new(PgPartStore::new(init_pg_pool()));
    let app = api::app(store, &CONFIG.rate_limit);
    let addr = format!("{}:{}", CONFIG.api.host, CONFIG.api.port);
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .expect("failed to bind");
    info!("listening on `{addr}`");
    let app_done = serve(listener, app, cancellation_token.clone());

    tokio::signal::ctrl_c()
        .await
        .expect("failed to listen for ctrl c event");
    info!("exiting");
    cancellation_token.cancel();
    app_done.notified().await;
    info!("exited");
}

fn serve(
    listener: tokio::net::TcpListener,
    app: axum::Router,
    cancellation_token: CancellationToken,
) -> Arc<Notify> {
    let done = Arc::new(Notify::new());

    tokio::spawn({
        let done = done.clone();
        async move {
            axum::serve(
                listener,
                app.into_make_service_with_connect_info::<SocketAddr>(),
            )
            .with_graceful_shutdown(async move {
                cancellation_token.cancelled().await;
                info!("gracefully shutting down app");
            })
            .await
            .expect("failed to serve");
            done.notify_one();
        }
    });

    done
}
