pub mod health;

use axum::extract::DefaultBodyLimit;
use axum::routing::{get, post};
use axum::Router;
use harbor_db::models::emp::Emp;
use harbor_db::models::master::{
    Agent, Berth, EscortLocation, LoadedCargo, MasterTowing, OperatingVessel, Port,
};
use harbor_db::models::record::Entity;

use crate::handlers::{emp, record, upload};
use crate::state::AppState;

/// Upper bound on an uploaded PDF.
const MAX_UPLOAD_BYTES: usize = 50 * 1024 * 1024;

/// Build the `/api` route tree.
///
/// ```text
/// /hello                              GET greeting
/// /upload                             POST multipart PDF upload
///
/// /master/operating-vessels           list, create
/// /master/operating-vessels/{id}      get, update, delete
/// /master/ports                       (same shape)
/// /master/agents
/// /master/escort-locations
/// /master/loaded-cargo
/// /master/berths
/// /master/master-towing
///
/// /emps                               list, create
/// /emps/bulk                          bulk create (POST)
/// /emps/{id}                          get, update, delete
/// ```
pub fn api_routes() -> Router<AppState> {
    Router::new()
        .route("/hello", get(upload::hello))
        .route(
            "/upload",
            post(upload::upload).layer(DefaultBodyLimit::max(MAX_UPLOAD_BYTES)),
        )
        .nest("/master", master_router())
        .nest("/emps", emp_router())
}

/// Routes exempt from the request timeout, mounted at the root.
///
/// ```text
/// /api/convert                        POST run table extraction
/// ```
///
/// Conversion is bounded by `PDF_EXTRACTOR_TIMEOUT_SECS` instead, so a slow
/// tool surfaces as an extraction failure rather than a 408.
pub fn untimed_routes() -> Router<AppState> {
    Router::new().route("/api/convert", post(upload::convert))
}

fn master_router() -> Router<AppState> {
    Router::new()
        .nest("/operating-vessels", entity_router::<OperatingVessel>())
        .nest("/ports", entity_router::<Port>())
        .nest("/agents", entity_router::<Agent>())
        .nest("/escort-locations", entity_router::<EscortLocation>())
        .nest("/loaded-cargo", entity_router::<LoadedCargo>())
        .nest("/berths", entity_router::<Berth>())
        .nest("/master-towing", entity_router::<MasterTowing>())
}

fn emp_router() -> Router<AppState> {
    entity_router::<Emp>().route("/bulk", post(emp::create_bulk))
}

/// The five soft-delete verbs for one table.
///
/// ```text
/// GET    /        -> list
/// POST   /        -> create
/// GET    /{id}    -> get_by_id
/// PUT    /{id}    -> update
/// DELETE /{id}    -> delete
/// ```
pub fn entity_router<E: Entity>() -> Router<AppState> {
    Router::new()
        .route("/", get(record::list::<E>).post(record::create::<E>))
        .route(
            "/{id}",
            get(record::get_by_id::<E>)
                .put(record::update::<E>)
                .delete(record::delete::<E>),
        )
}
