#![deny(missing_docs)]
//! Apiscope server executable.
//!
//! Hosts the HTTP endpoints that serve coverage and usage rollups to the
//! dashboard.

mod openapi;
mod routes;

#[cfg(not(test))]
use actix_cors::Cors;
#[cfg(not(test))]
use actix_web::{App, HttpServer, http::header, web};
#[cfg(not(test))]
use dotenvy::dotenv;

#[allow(unused_imports)]
use std::str::FromStr;

#[cfg(not(test))]
use crate::routes::{AppState, api_table, coverage_trends, coverage_usage, openapi_json, summary};

#[cfg(not(test))]
fn main() -> std::io::Result<()> {
    dotenv().ok();
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let data_dir =
        std::path::PathBuf::from(std::env::var("APISCOPE_DATA_DIR").unwrap_or_else(|_| "./data".to_string()));
    if !data_dir.is_dir() {
        log::warn!(
            "data directory {} does not exist yet; all queries will see empty snapshots",
            data_dir.display()
        );
    }
    let state = web::Data::new(AppState { data_dir });

    let origins = std::env::var("APISCOPE_UI_ORIGINS")
        .unwrap_or_else(|_| "http://127.0.0.1:4200,http://localhost:4200".to_string());
    let allowed_origins: Vec<String> = origins
        .split(',')
        .map(|value| value.trim())
        .filter(|origin| !origin.is_empty())
        .map(String::from)
        .collect();

    let listen_addr = std::env::var("APISCOPE_HOST").unwrap_or_else(|_| "127.0.0.1".to_string());
    let listen_port =
        u16::from_str(&std::env::var("APISCOPE_PORT").unwrap_or_else(|_| "8080".to_string()))
            .expect("APISCOPE_PORT must be a u16 number");
    let err_msg = format!("Can't bind {}:{}", &listen_addr, listen_port);

    actix_web::rt::System::new().block_on(async move {
        HttpServer::new(move || {
            let mut cors = Cors::default()
                .allowed_methods(vec!["GET", "OPTIONS"])
                .allowed_headers(vec![header::AUTHORIZATION, header::CONTENT_TYPE])
                .max_age(3600);
            for origin in &allowed_origins {
                cors = cors.allowed_origin(origin);
            }
            App::new()
                .wrap(actix_web::middleware::Logger::default())
                .wrap(cors)
                .app_data(state.clone())
                .service(summary)
                .service(coverage_usage)
                .service(coverage_trends)
                .service(api_table)
                .service(openapi_json)
        })
        .bind((listen_addr, listen_port))
        .expect(&err_msg)
        .run()
        .await
    })
}

#[cfg(test)]
fn main() {}
