// src/web/mod.rs

pub mod handlers;
pub mod pages;
pub mod types;

pub use types::*;

use crate::research::{ResearchAgent, ResearchRequest};
use anyhow::Result;
use rocket::fairing::{Fairing, Info, Kind};
use rocket::form::Form;
use rocket::http::{Header, Status};
use rocket::response::content::RawHtml;
use rocket::serde::json::Json;
use rocket::{catchers, delete, get, options, post, routes, Build, Request, Response, Rocket, State};
use tracing::{error, info};

// CORS Fairing
pub struct Cors;

#[rocket::async_trait]
impl Fairing for Cors {
    fn info(&self) -> Info {
        Info {
            name: "Add CORS headers to responses",
            kind: Kind::Response,
        }
    }

    async fn on_response<'r>(&self, _request: &'r Request<'_>, response: &mut Response<'r>) {
        response.set_header(Header::new("Access-Control-Allow-Origin", "*"));
        response.set_header(Header::new(
            "Access-Control-Allow-Methods",
            "POST, GET, DELETE, OPTIONS",
        ));
        response.set_header(Header::new("Access-Control-Allow-Headers", "*"));
    }
}

// Pages

#[get("/")]
pub async fn home() -> RawHtml<String> {
    handlers::home_handler().await
}

#[post("/research", data = "<form>")]
pub async fn research_form(
    form: Form<ResearchForm>,
    agent: &State<ResearchAgent>,
) -> RawHtml<String> {
    handlers::research_form_handler(form, agent).await
}

#[get("/report/download?<company>&<role>")]
pub async fn download_report(
    company: Option<String>,
    role: Option<String>,
    agent: &State<ResearchAgent>,
) -> Result<JsonDownload, Status> {
    handlers::download_report_handler(company, role, agent).await
}

// API

#[post("/research", data = "<request>")]
pub async fn research_api(
    request: Json<StandardRequest<ResearchRequest>>,
    agent: &State<ResearchAgent>,
) -> Result<Json<DataResponse<ResearchData>>, Json<StandardErrorResponse>> {
    handlers::research_api_handler(request, agent).await
}

#[delete("/research/cache?<company>&<role>")]
pub async fn evict_cache(
    company: Option<String>,
    role: Option<String>,
    agent: &State<ResearchAgent>,
) -> Result<Json<ActionResponse>, Json<StandardErrorResponse>> {
    handlers::evict_cache_handler(company, role, agent).await
}

#[get("/health")]
pub async fn health(agent: &State<ResearchAgent>) -> Json<TextResponse> {
    handlers::health_handler(agent).await
}

#[options("/<_..>")]
pub async fn options() -> Status {
    Status::Ok
}

// Error catchers
#[rocket::catch(400)]
pub fn bad_request() -> Json<StandardErrorResponse> {
    Json(StandardErrorResponse::new(
        "Invalid request format".to_string(),
        "BAD_REQUEST".to_string(),
        vec![
            "Check your request JSON format".to_string(),
            "Provide both 'company' and 'role'".to_string(),
        ],
        None,
    ))
}

#[rocket::catch(404)]
pub fn not_found() -> Json<StandardErrorResponse> {
    Json(StandardErrorResponse::new(
        "Not found".to_string(),
        "NOT_FOUND".to_string(),
        vec!["Check the request path and parameters".to_string()],
        None,
    ))
}

#[rocket::catch(422)]
pub fn unprocessable() -> Json<StandardErrorResponse> {
    Json(StandardErrorResponse::new(
        "Request body could not be parsed".to_string(),
        "UNPROCESSABLE".to_string(),
        vec!["Send a JSON object with 'company' and 'role' strings".to_string()],
        None,
    ))
}

#[rocket::catch(500)]
pub fn internal_error() -> Json<StandardErrorResponse> {
    Json(StandardErrorResponse::new(
        "Internal server error".to_string(),
        "INTERNAL_ERROR".to_string(),
        vec![
            "Try again in a few moments".to_string(),
            "Contact support if the problem persists".to_string(),
        ],
        None,
    ))
}

/// Assemble the application around a research agent
pub fn build_rocket(agent: ResearchAgent, port: u16) -> Rocket<Build> {
    let figment = rocket::Config::figment()
        .merge(("port", port))
        .merge(("address", "0.0.0.0"));

    rocket::custom(figment)
        .attach(Cors)
        .manage(agent)
        .register("/", catchers![bad_request, not_found, unprocessable, internal_error])
        .mount("/", routes![home, research_form, download_report, options])
        .mount("/api", routes![research_api, evict_cache, health])
}

pub async fn start_web_server(agent: ResearchAgent, port: u16) -> Result<()> {
    info!("Starting research agent server on http://0.0.0.0:{}", port);

    if let Err(e) = build_rocket(agent, port).launch().await {
        error!("Web server failed: {}", e);
        anyhow::bail!("Web server failed: {}", e);
    }

    Ok(())
}
