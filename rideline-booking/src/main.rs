use rideline_booking::producer::KafkaCreatedProducer;
use rideline_booking::service::Bookings;
use rideline_booking::{app, worker, AppState};
use rideline_domain::repository::BookingRepository;
use rideline_infra::app_config::{Config, BOOKING_DEFAULTS};
use rideline_infra::{bootstrap, events, DbClient, EventProducer, PgBookingRepository};
use std::net::SocketAddr;
use std::sync::Arc;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "rideline_booking=debug,rideline_infra=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = Config::load(BOOKING_DEFAULTS).expect("failed to load config");
    tracing::info!("starting booking service on port {}", config.server.port);

    let db = DbClient::new(&config.database.url, config.database.max_connections)
        .await
        .expect("failed to connect to booking database");
    bootstrap::booking_schema(&db.pool)
        .await
        .expect("failed to bootstrap booking schema");

    let kafka = Arc::new(EventProducer::new(&config.kafka.brokers).expect("failed to create Kafka producer"));
    let repo: Arc<dyn BookingRepository> = Arc::new(PgBookingRepository::new(db.pool.clone()));
    let producer = Arc::new(KafkaCreatedProducer::new(
        kafka,
        config.kafka.topic_booking_created.clone(),
    ));

    let state = AppState {
        bookings: Arc::new(Bookings::new(repo.clone(), producer)),
    };

    // Reconciliation consumer runs beside the HTTP server and drains on
    // the same shutdown signal.
    let (shutdown_tx, shutdown_rx) = tokio::sync::watch::channel(false);
    let consumer = events::consumer(
        &config.kafka.brokers,
        &config.kafka.group_id,
        &config.kafka.topic_booking_accepted,
    )
    .expect("failed to create booking.accepted consumer");
    let consumer_task = tokio::spawn(worker::run_reconciliation(consumer, repo, shutdown_rx));

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
