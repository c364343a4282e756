mod cli;
mod feed;
mod infra;
mod routes;
mod server;

use review_feed::error::AppError;

pub async fn run() -> Result<(), AppError> {
    cli::run().await
}
