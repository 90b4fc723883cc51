mod cli;
mod console;
mod infra;
mod routes;
mod server;

use empathy_profile::error::AppError;

pub async fn run() -> Result<(), AppError> {
    cli::run().await
}
