use std::error::Error;
use dotenv::dotenv;
use log;

use smart_home_api::common::logger::init_logger;
use smart_home_api::common::setting::Settings;
use smart_home_api::common::sqlite::SqliteConnection;
use smart_home_api::http_server::server::run as http_run;
use smart_home_api::service::state_projector::StateProjector;

#[actix_web::main]
async fn main() -> Result<(), Box<dyn Error>> {
    // load .env if present
    dotenv().ok();

    // missing DATABASE_URL stops the process here
    let settings = Settings::load()?;

    init_logger(settings.env.log_level.as_str());
    log::info!("settings loaded, env: {:?}", settings.env.env);
    log::debug!("settings: {:?}", settings);

    // one connection for the whole process, shared by every handler
    let conn = SqliteConnection::open(settings.database.url.as_str()).await?;
    let projector = StateProjector::new(conn);
    projector.init_tables().await?;

    http_run(&settings, projector).await?;

    Ok(())
}
