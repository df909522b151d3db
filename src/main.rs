mod api;
mod dashboard;
mod dataset;
mod fields;
mod filter;
mod options;
mod session;
mod settings;
mod views;
mod web;

use std::process::exit;

use clap::Parser;
use tracing::error;

use crate::{
    dashboard::Dashboard,
    settings::{Args, Settings},
};

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt::init();

    let args = Args::parse();

    let settings = match Settings::load(args.config.as_deref()) {
        Ok(ret) => ret,
        Err(error) => {
            error!("Problem while loading settings. {error}");
            exit(1);
        }
    };

    let data_path = args.data.unwrap_or(settings.data.path);
    let dashboard = match Dashboard::load(&data_path, &settings.defaults) {
        Ok(ret) => ret,
        Err(error) => {
            error!(
                "Failed to load data file `{}`. {error:#}",
                data_path.display()
            );
            exit(1);
        }
    };

    let tls = args
        .cert
        .zip(args.key)
        .map(|(cert, key)| web::Tls { cert, key });

    let schema = api::schema(dashboard);
    web::serve(schema, settings.web.address, tls).await;
}
