use std::sync::Arc;

use actix_web::{middleware::Logger, App, HttpServer};
use clap::Parser;
use dotenv::dotenv;

use catalog_srv::{configure, setup_store, Opt};

#[actix_web::main]
async fn main() -> eyre::Result<()> {
    dotenv().ok();
    let opt = Arc::new(Opt::parse());
    env_logger::init();

    let store = setup_store(&opt).await?;
    let app = {
        let opt = Arc::clone(&opt);
        move || {
            App::new()
                .wrap(Logger::default())
                .configure(configure(Arc::clone(&store), opt.max_body_size))
        }
    };

    log::info!("listening on {}:{}", opt.address, opt.port);

    HttpServer::new(app)
        .bind((opt.address.as_str(), opt.port))?
        .run()
        .await?;

    Ok(())
}
