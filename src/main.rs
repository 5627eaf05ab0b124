use actix_cors::Cors;
use actix_files::Files;
use actix_web::{App, HttpServer, web};
use deals_backend::auth::jwks::JwksCache;
use deals_backend::auth::jwt::TokenVerifier;
use deals_backend::cache::RedisCache;
use deals_backend::config::{AppConfig, AuthConfig};
use deals_backend::create_pool;
use deals_backend::graphql::{self, ApiContext};
use deals_backend::handlers;
use deals_backend::uploads::{self, UploadStore};
use dotenv::dotenv;
use migration::{Migrator, MigratorTrait};
use std::io;
use std::sync::Arc;
use tracing_subscriber::EnvFilter;

#[actix_web::main]
async fn main() -> io::Result<()> {
    dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env().add_directive(tracing::Level::INFO.into()))
        .init();

    let config = AppConfig::from_env().map_err(io::Error::other)?;

    let db = create_pool(&config.database_url)
        .await
        .map_err(|e| io::Error::other(format!("Failed to connect to database: {e}")))?;
    tracing::info!("Connected to database");

    if config.run_migrations {
        Migrator::up(&db, None)
            .await
            .map_err(|e| io::Error::other(format!("Failed to run migrations: {e}")))?;
        tracing::info!("Migrations applied");
    }

    // Redis is optional: without it every query goes to the database.
    let cache = match &config.redis_url {
        Some(url) => match RedisCache::new(url).await {
            Ok(cache) => {
                tracing::info!("Connected to Redis");
                Some(Arc::new(cache))
            }
            Err(e) => {
                tracing::warn!("Redis unavailable, caching disabled: {e}");
                None
            }
        },
        None => None,
    };

    let verifier = match &config.auth {
        AuthConfig::Secret(secret) => TokenVerifier::Secret(secret.clone()),
        AuthConfig::Jwks { url, api_key } => {
            TokenVerifier::Jwks(JwksCache::new(url, api_key.as_deref()))
        }
    };
    let verifier_data = web::Data::new(Arc::new(verifier));

    let upload_store = UploadStore::new(
        &config.upload_dir,
        config.upload_max_bytes,
        &config.public_base_url,
    );
    upload_store.ensure_dir().await?;
    let upload_dir = upload_store.dir().to_path_buf();

    let api_context = ApiContext::new(db.clone(), cache, config.cache.clone(), upload_store);
    let schema = web::Data::new(graphql::build_schema().data(api_context).finish());
    let db_data = web::Data::new(db);

    let bind_addr = format!("0.0.0.0:{}", config.port);
    tracing::info!("Server running at http://{bind_addr} (GraphQL at /graphql)");

    HttpServer::new(move || {
        let cors = Cors::default()
            .allow_any_origin()
            .allowed_methods(vec!["GET", "POST", "OPTIONS"])
            .allowed_headers(vec![
                actix_web::http::header::AUTHORIZATION,
                actix_web::http::header::CONTENT_TYPE,
                actix_web::http::header::ACCEPT,
            ])
            .max_age(3600);

        App::new()
            .wrap(cors)
            .app_data(db_data.clone())
            .app_data(schema.clone())
            .app_data(verifier_data.clone())
            .service(
                web::resource("/graphql")
                    .route(web::post().to(graphql::graphql_handler))
                    .route(web::get().to(graphql::graphiql)),
            )
            .service(web::scope("/api").configure(handlers::init_routes))
            .service(Files::new(uploads::PUBLIC_PATH, &upload_dir))
    })
    .bind(&bind_addr)?
    .run()
    .await
}
