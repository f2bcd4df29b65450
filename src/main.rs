use actix_web::middleware::Logger;
use actix_web::{App, HttpServer, web};

use aquastore::assets::HttpAssetStore;
use aquastore::db::establish_connection_pool;
use aquastore::models::config::ServerConfig;
use aquastore::repository::DieselRepository;
use aquastore::routes;

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    dotenvy::dotenv().ok();
    env_logger::init();

    let config: ServerConfig = config::Config::builder()
        .add_source(config::File::with_name("config"))
        .add_source(config::Environment::with_prefix("AQUASTORE").separator("__"))
        .build()
        .and_then(|settings| settings.try_deserialize())
        .map_err(|e| std::io::Error::other(format!("failed to load configuration: {e}")))?;

    let pool = establish_connection_pool(&config.database_url)
        .map_err(|e| std::io::Error::other(format!("failed to create connection pool: {e}")))?;
    let repo = DieselRepository::new(pool);

    let assets = HttpAssetStore::new(&config.asset_store)
        .map_err(|e| std::io::Error::other(format!("failed to build asset store client: {e}")))?;

    log::info!(
        "Starting server at {}:{}",
        config.bind_address,
        config.port
    );

    let bind = (config.bind_address.clone(), config.port);
    HttpServer::new(move || {
        App::new()
            .app_data(web::Data::new(repo.clone()))
            .app_data(web::Data::new(assets.clone()))
            .wrap(Logger::default())
            .service(web::scope("/api/v1").configure(routes::configure))
    })
    .bind(bind)?
    .run()
    .await
}
