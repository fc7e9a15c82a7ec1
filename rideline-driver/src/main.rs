use rideline_driver::producer::KafkaAcceptedProducer;
use rideline_driver::service::Jobs;
use rideline_driver::{app, worker, AppState};
use rideline_domain::repository::JobRepository;
use rideline_infra::app_config::{Config, DRIVER_DEFAULTS};
use rideline_infra::{bootstrap, events, DbClient, EventProducer, PgDriverRepository, PgJobRepository};
use std::net::SocketAddr;
use std::sync::Arc;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "rideline_driver=debug,rideline_infra=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = Config::load(DRIVER_DEFAULTS).expect("failed to load config");
    tracing::info!("starting driver service on port {}", config.server.port);

    let db = DbClient::new(&config.database.url, config.database.max_connections)
        .await
        .expect("failed to connect to driver database");
    bootstrap::driver_schema(&db.pool)
        .await
        .expect("failed to bootstrap driver schema");
    bootstrap::seed_drivers(&db.pool)
        .await
        .expect("failed to seed drivers");

    let kafka = Arc::new(EventProducer::new(&config.kafka.brokers).expect("failed to create Kafka producer"));
    let drivers = Arc::new(PgDriverRepository::new(db.pool.clone()));
    let jobs: Arc<dyn JobRepository> = Arc::new(PgJobRepository::new(db.pool.clone()));
    let producer = Arc::new(KafkaAcceptedProducer::new(
        kafka,
        config.kafka.topic_booking_accepted.clone(),
    ));

    let state = AppState {
        jobs: Arc::new(Jobs::new(drivers, jobs.clone(), producer)),
    };

    // Materialization consumer runs beside the HTTP server and drains on
    // the same shutdown signal.
    let (shutdown_tx, shutdown_rx) = tokio::sync::watch::channel(false);
    let consumer = events::consumer(
        &config.kafka.brokers,
        &config.kafka.group_id,
        &config.kafka.topic_booking_created,
    )
    .expect("failed to create booking.created consumer");
    let consumer_task = tokio::spawn(worker::run_materializer(consumer, jobs, shutdown_rx));

    let addr = SocketAddr::from(([0, 0, 0, 0], config.server.port));
    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .expect("failed to bind listener");
    tracing::info!("listening on {addr}");

    axum::serve(listener, app(state))
        .with_graceful_shutdown(shutdown_signal())
        .await
        .expect("server error");

    let _ = shutdown_tx.send(true);
    let _ = consumer_task.await;
    tracing::info!("exit");
}

async fn shutdown_signal() {
    tokio::signal::ctrl_c()
        .await
        .expect("failed to install shutdown signal handler");
}
