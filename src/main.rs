use actix_web::{web, HttpServer};
use bookshelf::{config, http, telemetry, App};
use error_stack::{Result, ResultExt};
use thiserror::Error;
use tracing_actix_web::TracingLogger;

#[derive(Debug, Error)]
#[error("Failed to start the server")]
struct StartError;

#[tokio::main]
async fn main() {
  if let Err(error) = run().await {
    eprintln!("{error:?}");
    std::process::exit(1);
  }
}

async fn run() -> Result<(), StartError> {
  let config = config::Server::load().change_context(StartError)?;
  telemetry::init(&config.log).change_context(StartError)?;

  let host = config.http.host.clone();
  let port = config.http.port;
  let workers = config.http.workers;

  let app = web::Data::new(App::new(config).await.change_context(StartError)?);
  let mut server = HttpServer::new(move || {
    actix_web::App::new()
      .wrap(TracingLogger::default())
      .wrap(http::util::cors(&app.config.http))
      .app_data(app.clone())
      .configure(http::controllers::configure)
  });

  if let Some(workers) = workers {
    server = server.workers(workers.get());
  }

  let server = server
    .bind((host.as_str(), port))
    .change_context(StartError)
    .attach_printable_lazy(|| format!("could not listen to {host}:{port}"))?;

  tracing::info!("Listening on http://{host}:{port}");
  server.run().await.change_context(StartError)
}
