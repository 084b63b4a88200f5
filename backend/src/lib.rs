pub mod db;
pub mod error;
pub mod route;
pub mod schema;
pub mod serialize;
pub mod store;

use std::{num::NonZeroUsize, sync::Arc};

use actix_web::{error::JsonPayloadError, web, HttpRequest};
use clap::Parser;
use log::{info, warn};

use crate::error::Error;
use crate::store::{CategoryStore, MemoryStore, PgStore};

#[derive(Parser)]
pub struct Opt {
    /// Address to bind to.
    #[clap(short, long, env = "BIND_ADDRESS", default_value = "0.0.0.0")]
    pub address: String,

    /// Port to bind to.
    #[clap(short, long, env = "BIND_PORT", default_value = "8080")]
    pub port: u16,

    /// Postgresql URL. Categories are kept in memory if this is not set.
    #[clap(short, long, env = "DATABASE_URL")]
    pub database_url: Option<String>,

    /// Whether to run database migrations on startup.
    #[clap(short, long, env = "RUN_MIGRATIONS")]
    pub run_migrations: bool,

    /// Maximum number of pooled database connections.
    #[clap(long, env = "DB_POOL_SIZE", default_value = "8")]
    pub db_pool_size: NonZeroUsize,

    /// Maximum size of a request body, in bytes.
    #[clap(long, env = "MAX_BODY_SIZE", default_value = "65536")]
    pub max_body_size: usize,
}

/// Pick and set up the [CategoryStore] described by `opt`.
pub async fn setup_store(opt: &Opt) -> eyre::Result<Arc<dyn CategoryStore>> {
    match &opt.database_url {
        Some(database_url) => {
            let pool = db::setup(database_url, opt).await?;
            Ok(Arc::new(PgStore::new(pool)))
        }
        None => {
            warn!("no database configured, categories will not outlive the process");
            Ok(Arc::new(MemoryStore::new()))
        }
    }
}

/// Register the category routes and everything they need on an [web::ServiceConfig].
pub fn configure(
    store: Arc<dyn CategoryStore>,
    max_body_size: usize,
) -> impl FnOnce(&mut web::ServiceConfig) {
    move |cfg| {
        let json_config = web::JsonConfig::default()
            .limit(max_body_size)
            .error_handler(reject_json);

        info!("registering category routes");
        cfg.app_data(web::Data::from(store))
            .app_data(json_config)
            .service(route::category::list_categories)
            .service(route::category::get_category)
            .service(route::category::create_category)
            .service(route::category::replace_category)
            .service(route::category::delete_category);
    }
}

/// Bodies that fail to parse are a bad request. Oversized bodies and wrong content types keep
/// their own status codes.
fn reject_json(error: JsonPayloadError, req: &HttpRequest) -> actix_web::Error {
    let malformed = matches!(
        error,
        JsonPayloadError::Deserialize(_)
            | JsonPayloadError::Serialize(_)
            | JsonPayloadError::Payload(_)
    );

    if malformed {
        let msg = format!("invalid body for {} {}: {error}", req.method(), req.path());
        Error::BadRequest(msg).into()
    } else {
        warn!("rejected body for {} {}: {error}", req.method(), req.path());
        error.into()
    }
}
