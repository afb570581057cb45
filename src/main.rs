use actix_cors::Cors;
use actix_web::{middleware, web, App, HttpServer};
use course_compass::config::Settings;
use course_compass::engine::{Dataset, Recommender, TrainedModel};
use course_compass::error::{handle_json_payload_error, handle_query_payload_error, AppError};
use course_compass::models::ForestParams;
use course_compass::routes::{self, AppState};
use course_compass::services::SessionStore;
use std::sync::Arc;
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

/// Load the dataset and train the model before serving any request
fn build_recommender(settings: &Settings) -> Result<Recommender, AppError> {
    let dataset = Dataset::load(&settings.dataset.path)?;
    let params = ForestParams::from(&settings.model);
    let model = TrainedModel::train(&dataset, &params)?;

    Ok(Recommender::new(
        Arc::new(model),
        Arc::new(dataset.course_info),
    ))
}

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    // Load .env file if present
    dotenv::dotenv().ok();

    // Load configuration
    let settings = match Settings::load().map_err(AppError::from) {
        Ok(settings) => settings,
        Err(e) => {
            // Logging is configured from these settings, so report on stderr
            eprintln!("{}", e);
            return Err(std::io::Error::new(std::io::ErrorKind::InvalidInput, e.to_string()));
        }
    };

    // Initialize logging
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(&settings.logging.level));

    let subscriber = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_level(true);

    match settings.logging.format.as_str() {
        "pretty" => subscriber.pretty().init(),
        "json" => subscriber.json().init(),
        _ => subscriber.init(),
    }

    info!("Starting Course Compass recommendation service...");

    let recommender = match build_recommender(&settings) {
        Ok(recommender) => recommender,
        Err(e) => {
            error!("Failed to initialise recommender: {}", e);
            return Err(std::io::Error::new(std::io::ErrorKind::Other, e.to_string()));
        }
    };

    let sessions = SessionStore::new(settings.session.max_sessions, settings.session.idle_ttl_secs);

    info!(
        "Session store ready (max: {}, idle TTL: {}s)",
        settings.session.max_sessions, settings.session.idle_ttl_secs
    );

    let app_state = AppState {
        recommender,
        sessions,
    };

    // Configure HTTP server
    let host = settings.server.host.clone();
    let port = settings.server.port;
    let workers = settings.server.workers.unwrap_or(4);

    info!("Starting HTTP server on {}:{}", host, port);

    HttpServer::new(move || {
        let cors = Cors::permissive();

        App::new()
            .app_data(web::Data::new(app_state.clone()))
            .app_data(web::JsonConfig::default().error_handler(handle_json_payload_error))
            .app_data(web::QueryConfig::default().error_handler(handle_query_payload_error))
            .wrap(cors)
            .wrap(middleware::Logger::default())
            .wrap(middleware::Compress::default())
            .configure(routes::configure_routes)
    })
    .workers(workers)
    .bind((host, port))?
    .run()
    .await
}
