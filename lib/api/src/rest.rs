use actix_cors::Cors;
use actix_web::{error, http::header, web, App, HttpResponse, HttpServer, Result as ActixResult};
use platewise_core::{Error, QueryProfile, RestaurantRecord};
use platewise_similarity::Recommender;
use platewise_storage::CatalogStore;
use serde::Serialize;
use std::sync::Arc;
use tracing::{debug, info, warn};

/// Shared, read-only context handed to every request
pub struct ApiState {
    pub store: Arc<CatalogStore>,
    pub recommender: Recommender,
}

impl ApiState {
    pub fn new(store: Arc<CatalogStore>, recommender: Recommender) -> Self {
        Self { store, recommender }
    }
}

/// Entry of a similarity page
#[derive(Serialize)]
struct RestaurantSummary<'a> {
    name: &'a str,
    location: &'a str,
    cost: f32,
    rate: Option<f32>,
    cuisines: &'a str,
    votes: u32,
    book_table: Option<bool>,
    online_order: Option<bool>,
    listed_in_type: &'a str,
}

impl<'a> From<&'a RestaurantRecord> for RestaurantSummary<'a> {
    fn from(record: &'a RestaurantRecord) -> Self {
        Self {
            name: &record.name,
            location: &record.location,
            cost: record.cost,
            rate: record.rate,
            cuisines: &record.cuisines,
            votes: record.votes,
            book_table: record.book_table,
            online_order: record.online_order,
            listed_in_type: &record.listed_in_type,
        }
    }
}

/// Entry of a hard-filter result; no booking or ordering flags
#[derive(Serialize)]
struct FilteredSummary<'a> {
    name: &'a str,
    location: &'a str,
    cost: f32,
    rate: Option<f32>,
    cuisines: &'a str,
    votes: u32,
    listed_in_type: &'a str,
}

impl<'a> From<&'a RestaurantRecord> for FilteredSummary<'a> {
    fn from(record: &'a RestaurantRecord) -> Self {
        Self {
            name: &record.name,
            location: &record.location,
            cost: record.cost,
            rate: record.rate,
            cuisines: &record.cuisines,
            votes: record.votes,
            listed_in_type: &record.listed_in_type,
        }
    }
}

pub struct RestApi;

impl RestApi {
    pub async fn start(state: ApiState, port: u16) -> std::io::Result<()> {
        let state = web::Data::new(state);
        info!("REST API listening on 0.0.0.0:{}", port);

        HttpServer::new(move || {
            App::new()
                .wrap(cors())
                .app_data(state.clone())
                .configure(configure)
        })
        .bind(("0.0.0.0", port))?
        .run()
        .await
    }
}

/// Routes and extractor settings, shared by the server and tests
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.app_data(json_config())
        .route("/", web::get().to(home))
        .route("/recommend", web::post().to(recommend))
        .route("/recommend/filter", web::post().to(recommend_filter))
        .route("/catalog/reload", web::post().to(reload_catalog));
}

/// Any origin may call the API; preflight requests are answered here
pub fn cors() -> Cors {
    Cors::default()
        .allow_any_origin()
        .allowed_methods(vec!["GET", "POST", "OPTIONS"])
        .allowed_header(header::CONTENT_TYPE)
}

fn json_config() -> web::JsonConfig {
    web::JsonConfig::default().error_handler(|err, _req| {
        let invalid = Error::InvalidInput(err.to_string());
        debug!("rejected request body: {}", invalid);
        error::InternalError::from_response(err, error_response(&invalid)).into()
    })
}

async fn home() -> ActixResult<HttpResponse> {
    Ok(HttpResponse::Ok().json(serde_json::json!({
        "message": "Welcome to the Restaurant Recommender API!"
    })))
}

async fn recommend(
    state: web::Data<ApiState>,
    req: web::Json<QueryProfile>,
) -> ActixResult<HttpResponse> {
    let profile = req.into_inner();
    debug!(?profile, "similarity request");

    let snapshot = state.store.snapshot();
    match state.recommender.recommend_by_similarity(&snapshot, &profile) {
        Ok(page) => {
            let items: Vec<RestaurantSummary> =
                page.items.iter().map(|r| RestaurantSummary::from(*r)).collect();
            Ok(HttpResponse::Ok().json(items))
        }
        Err(e) => Ok(error_response(&e)),
    }
}

async fn recommend_filter(
    state: web::Data<ApiState>,
    req: web::Json<QueryProfile>,
) -> ActixResult<HttpResponse> {
    let profile = req.into_inner();
    debug!(?profile, "filter request");

    let snapshot = state.store.snapshot();
    match state.recommender.recommend_by_filter(&snapshot, &profile) {
        Ok(records) => {
            let items: Vec<FilteredSummary> =
                records.iter().map(|r| FilteredSummary::from(*r)).collect();
            Ok(HttpResponse::Ok().json(items))
        }
        Err(e) => Ok(error_response(&e)),
    }
}

async fn reload_catalog(state: web::Data<ApiState>) -> ActixResult<HttpResponse> {
    let store = state.store.clone();
    match web::block(move || store.reload()).await? {
        Ok(records) => {
            info!(
                "Catalog reloaded from {:?}: {} restaurants",
                state.store.catalog_path(),
                records
            );
            Ok(HttpResponse::Ok().json(serde_json::json!({
                "result": { "records": records }
            })))
        }
        Err(e) => {
            warn!("Catalog reload failed, keeping previous snapshot: {}", e);
            Ok(HttpResponse::InternalServerError().json(serde_json::json!({
                "error": e.to_string()
            })))
        }
    }
}

fn error_response(e: &Error) -> HttpResponse {
    match e {
        Error::NotFound => HttpResponse::NotFound().json(serde_json::json!({
            "message": e.to_string()
        })),
        Error::SchemaMismatch { .. } | Error::InvalidInput(_) => {
            warn!("recommendation failed: {}", e);
            HttpResponse::BadRequest().json(serde_json::json!({
                "error": e.to_string()
            }))
        }
        _ => {
            warn!("recommendation failed: {}", e);
            HttpResponse::InternalServerError().json(serde_json::json!({
                "error": e.to_string()
            }))
        }
    }
}
