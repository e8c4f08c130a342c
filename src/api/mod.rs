pub mod checkins;
pub mod facilities;
pub mod guests;
pub mod params;
pub mod request_tracing;
pub mod summaries;
pub mod templates;
pub mod users;

use axum::{
    extract::{DefaultBodyLimit, Json},
    middleware,
    routing::{get, post},
    Router,
};
use sqlx::PgPool;
use std::sync::Arc;
use tower::ServiceBuilder;
use utoipa::OpenApi;

use crate::error::ErrorResponse;
use crate::models::{
    AssignmentRequest, Checkin, CheckinRequest, Facility, FacilityRequest, Guest, GuestRequest,
    PaymentType, Summary, Template, TemplateRequest, User, UserRequest,
};
use crate::service::{
    CheckinService, ExportService, FacilityService, GuestService, SummaryService, TemplateService,
    UserService,
};

const MAX_BODY_BYTES: usize = 1024 * 1024;

/// Shared state: one service per resource over a single pool
#[derive(Clone)]
pub struct AppState {
    pub facilities: Arc<FacilityService>,
    pub guests: Arc<GuestService>,
    pub templates: Arc<TemplateService>,
    pub checkins: Arc<CheckinService>,
    pub summaries: Arc<SummaryService>,
    pub exports: Arc<ExportService>,
    pub users: Arc<UserService>,
}

impl AppState {
    pub fn new(pool: PgPool) -> Self {
        Self {
            facilities: Arc::new(FacilityService::new(pool.clone())),
            guests: Arc::new(GuestService::new(pool.clone())),
            templates: Arc::new(TemplateService::new(pool.clone())),
            checkins: Arc::new(CheckinService::new(pool.clone())),
            summaries: Arc::new(SummaryService::new(pool.clone())),
            exports: Arc::new(ExportService::new(pool.clone())),
            users: Arc::new(UserService::new(pool)),
        }
    }
}

#[derive(OpenApi)]
#[openapi(
    paths(
        facilities::list_facilities,
        facilities::insert_facility,
        facilities::exact_facility,
        facilities::find_facility,
        facilities::update_facility,
        facilities::remove_facility,
        guests::list_guests,
        guests::insert_guest,
        guests::exact_guest,
        guests::find_guest,
        guests::update_guest,
        guests::remove_guest,
        templates::list_templates,
        templates::insert_template,
        templates::exact_template,
        templates::find_template,
        templates::update_template,
        templates::remove_template,
        checkins::list_checkins,
        checkins::insert_checkin,
        checkins::generate_checkins,
        checkins::find_checkin,
        checkins::update_checkin,
        checkins::remove_checkin,
        checkins::assign_checkin,
        checkins::deassign_checkin,
        summaries::daily_summaries,
        summaries::monthly_summaries,
        summaries::export_checkins,
        users::list_users,
        users::insert_user,
        users::exact_user,
        users::find_user,
        users::update_user,
        users::remove_user,
    ),
    components(schemas(
        Facility,
        FacilityRequest,
        Guest,
        GuestRequest,
        Template,
        TemplateRequest,
        Checkin,
        CheckinRequest,
        AssignmentRequest,
        PaymentType,
        Summary,
        User,
        UserRequest,
        ErrorResponse,
    )),
    tags(
        (name = "facilities", description = "Shelter facilities"),
        (name = "guests", description = "Guests of a facility"),
        (name = "templates", description = "Mat layouts used to generate a night's checkins"),
        (name = "checkins", description = "Mats per night and their assigned guests"),
        (name = "summaries", description = "Daily and monthly totals, CSV export"),
        (name = "users", description = "Application users"),
    )
)]
pub struct ApiDoc;

/// Health check
pub async fn health_check() -> &'static str {
    "OK"
}

pub async fn openapi_json() -> Json<utoipa::openapi::OpenApi> {
    Json(ApiDoc::openapi())
}

pub fn router(state: AppState) -> Router {
    let facility_routes = Router::new()
        .route(
            "/api/facilities",
            get(facilities::list_facilities).post(facilities::insert_facility),
        )
        .route("/api/facilities/exact/:name", get(facilities::exact_facility))
        .route(
            "/api/facilities/:facility_id",
            get(facilities::find_facility)
                .put(facilities::update_facility)
                .delete(facilities::remove_facility),
        );

    let guest_routes = Router::new()
        .route(
            "/api/facilities/:facility_id/guests",
            get(guests::list_guests).post(guests::insert_guest),
        )
        .route(
            "/api/facilities/:facility_id/guests/exact/:first_name/:last_name",
            get(guests::exact_guest),
        )
        .route(
            "/api/facilities/:facility_id/guests/:guest_id",
            get(guests::find_guest)
                .put(guests::update_guest)
                .delete(guests::remove_guest),
        );

    let template_routes = Router::new()
        .route(
            "/api/facilities/:facility_id/templates",
            get(templates::list_templates).post(templates::insert_template),
        )
        .route(
            "/api/facilities/:facility_id/templates/exact/:name",
            get(templates::exact_template),
        )
        .route(
            "/api/facilities/:facility_id/templates/:template_id",
            get(templates::find_template)
                .put(templates::update_template)
                .delete(templates::remove_template),
        );

    let checkin_routes = Router::new()
        .route(
            "/api/facilities/:facility_id/checkins",
            get(checkins::list_checkins).post(checkins::insert_checkin),
        )
        .route(
            "/api/facilities/:facility_id/checkins/generate/:checkin_date/:template_id",
            post(checkins::generate_checkins),
        )
        .route(
            "/api/facilities/:facility_id/checkins/:checkin_id",
            get(checkins::find_checkin)
                .put(checkins::update_checkin)
                .delete(checkins::remove_checkin),
        )
        .route(
            "/api/facilities/:facility_id/checkins/:checkin_id/assignment",
            post(checkins::assign_checkin).delete(checkins::deassign_checkin),
        );

    let summary_routes = Router::new()
        .route(
            "/api/facilities/:facility_id/summaries/:checkin_date_from/:checkin_date_to",
            get(summaries::daily_summaries),
        )
        .route(
            "/api/facilities/:facility_id/summaries/:checkin_date_from/:checkin_date_to/monthly",
            get(summaries::monthly_summaries),
        )
        .route(
            "/api/facilities/:facility_id/exports/checkins/:checkin_date_from/:checkin_date_to",
            get(summaries::export_checkins),
        );

    let user_routes = Router::new()
        .route("/api/users", get(users::list_users).post(users::insert_user))
        .route("/api/users/exact/:username", get(users::exact_user))
        .route(
            "/api/users/:user_id",
            get(users::find_user)
                .put(users::update_user)
                .delete(users::remove_user),
        );

    let api = Router::new()
        .merge(facility_routes)
        .merge(guest_routes)
        .merge(template_routes)
        .merge(checkin_routes)
        .merge(summary_routes)
        .merge(user_routes)
        .with_state(state);

    Router::new()
        .route("/health", get(health_check))
        .route("/openapi.json", get(openapi_json))
        .merge(api)
        .layer(
            ServiceBuilder::new()
                .layer(middleware::from_fn(request_tracing::request_tracing_middleware))
                .layer(DefaultBodyLimit::max(MAX_BODY_BYTES)),
        )
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::{to_bytes, Body};
    use axum::http::{Method, Request, StatusCode};
    use serde_json::{json, Value};
    use sqlx::postgres::PgPoolOptions;
    use tower::ServiceExt;

    /// The pool never connects: every request below is answered before any
    /// query runs.
    fn app() -> Router {
        let pool = PgPoolOptions::new()
            .connect_lazy("postgres://localhost/checkins_test")
            .expect("lazy pool");
        router(AppState::new(pool))
    }

    async fn send(method: Method, uri: &str, body: Option<Value>) -> (StatusCode, Vec<u8>) {
        let builder = Request::builder().method(method).uri(uri);
        let request = match body {
            Some(json) => builder
                .header("content-type", "application/json")
                .body(Body::from(json.to_string()))
                .unwrap(),
            None => builder.body(Body::empty()).unwrap(),
        };
        let response = app().oneshot(request).await.unwrap();
        let status = response.status();
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        (status, bytes.to_vec())
    }

    async fn send_json(method: Method, uri: &str, body: Option<Value>) -> (StatusCode, Value) {
        let (status, bytes) = send(method, uri, body).await;
        (status, serde_json::from_slice(&bytes).unwrap())
    }

    #[tokio::test]
    async fn health_is_ok() {
        let (status, body) = send(Method::GET, "/health", None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, b"OK");
    }

    #[tokio::test]
    async fn openapi_lists_every_resource() {
        let (status, doc) = send_json(Method::GET, "/openapi.json", None).await;
        assert_eq!(status, StatusCode::OK);
        let paths = doc["paths"].as_object().unwrap();
        for path in [
            "/api/facilities",
            "/api/facilities/{facility_id}/guests/{guest_id}",
            "/api/facilities/{facility_id}/templates",
            "/api/facilities/{facility_id}/checkins/{checkin_id}/assignment",
            "/api/facilities/{facility_id}/summaries/{checkin_date_from}/{checkin_date_to}",
            "/api/users/{user_id}",
        ] {
            assert!(paths.contains_key(path), "missing {path}");
        }
        assert!(doc["components"]["schemas"]["Summary"].is_object());
    }

    #[tokio::test]
    async fn summaries_reject_malformed_dates() {
        let (status, body) = send_json(
            Method::GET,
            "/api/facilities/1/summaries/2024-02-30/2024-03-01",
            None,
        )
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["success"], false);
        assert!(body["message"].as_str().unwrap().contains("2024-02-30"));
    }

    #[tokio::test]
    async fn summaries_reject_reversed_range() {
        let (status, _) = send_json(
            Method::GET,
            "/api/facilities/1/summaries/2024-03-02/2024-03-01/monthly",
            None,
        )
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn export_rejects_malformed_dates() {
        let (status, _) = send_json(
            Method::GET,
            "/api/facilities/1/exports/checkins/2024-3-1/2024-03-31",
            None,
        )
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn checkin_list_requires_a_valid_date() {
        let (status, body) = send_json(Method::GET, "/api/facilities/1/checkins", None).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["message"], "date is required");

        let (status, _) =
            send_json(Method::GET, "/api/facilities/1/checkins?date=03/09/2024", None).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn generate_rejects_malformed_date() {
        let (status, _) = send_json(
            Method::POST,
            "/api/facilities/1/checkins/generate/20240309/1",
            None,
        )
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn checkin_insert_validates_body() {
        let (status, body) = send_json(
            Method::POST,
            "/api/facilities/1/checkins",
            Some(json!({ "checkinDate": "2024-03-09", "matNumber": 3, "paymentType": "ZZ" })),
        )
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["message"], "Invalid payment type 'ZZ'");
    }

    #[tokio::test]
    async fn facility_insert_requires_name() {
        let (status, body) = send_json(
            Method::POST,
            "/api/facilities",
            Some(json!({ "name": "   ", "city": "Portland" })),
        )
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["message"], "name is required");
    }

    #[tokio::test]
    async fn template_insert_validates_mats() {
        let (status, _) = send_json(
            Method::POST,
            "/api/facilities/1/templates",
            Some(json!({ "name": "Standard", "allMats": "1-10", "handicapMats": "11" })),
        )
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn template_insert_rejects_oversized_range() {
        let (status, body) = send_json(
            Method::POST,
            "/api/facilities/1/templates",
            Some(json!({ "name": "Huge", "allMats": "1-2000000000" })),
        )
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert!(body["message"].as_str().unwrap().contains("exceeds the maximum"));
    }

    #[tokio::test]
    async fn user_insert_requires_password() {
        let (status, body) = send_json(
            Method::POST,
            "/api/users",
            Some(json!({ "name": "Desk", "scope": "regular", "username": "desk" })),
        )
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["message"], "password is required");
    }

    #[tokio::test]
    async fn non_numeric_ids_are_rejected() {
        let (status, _) = send(Method::GET, "/api/facilities/abc", None).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
    }
}
