use actix_web::{web, HttpResponse, Responder};
use validator::Validate;
use crate::core::{GroupingEngine, GroupingError};
use crate::models::{
    ClearGroupingsResponse, ErrorResponse, GenerateGroupingsRequest, Golfer, GroupingResponse, GroupingResult,
    GuestRequest, HealthResponse, PreferenceEdge, PreviewGroupingsRequest,
};
use crate::services::{parse_schedule_id, CacheManager, PostgresClient};
use std::sync::Arc;

/// Application state shared across all handlers
#[derive(Clone)]
pub struct AppState {
    pub cache: Arc<CacheManager>,
    pub postgres: Arc<PostgresClient>,
    pub grouping: GroupingState,
}

/// Engine plus the request limits enforced in front of it
///
/// Registered as its own app data so the stateless preview needs no storage.
#[derive(Debug, Clone)]
pub struct GroupingState {
    pub engine: GroupingEngine,
    /// Largest capacity a request may override to
    pub max_capacity: usize,
    /// Largest roster a single run will group
    pub max_golfers: usize,
}

/// Configure all grouping routes
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg
        .route("/health", web::get().to(health_check))
        .route("/schedules/{schedule_id}/groupings", web::post().to(generate_groupings))
        .route("/schedules/{schedule_id}/groupings", web::get().to(get_groupings))
        .route("/schedules/{schedule_id}/groupings", web::delete().to(clear_groupings))
        .route("/groupings/preview", web::post().to(preview_groupings));
}

fn error_response(status_code: u16, error: &str, message: impl ToString) -> HttpResponse {
    let body = ErrorResponse {
        error: error.to_string(),
        message: message.to_string(),
        status_code,
    };
    match status_code {
        400 => HttpResponse::BadRequest().json(body),
        404 => HttpResponse::NotFound().json(body),
        422 => HttpResponse::UnprocessableEntity().json(body),
        _ => HttpResponse::InternalServerError().json(body),
    }
}

fn grouping_error_response(err: &GroupingError) -> HttpResponse {
    error_response(422, "Invalid roster", err)
}

/// Resolve the capacity for one run, rejecting overrides above the configured ceiling
fn resolve_capacity(grouping: &GroupingState, requested: Option<usize>) -> Result<usize, HttpResponse> {
    let capacity = requested.unwrap_or(grouping.engine.settings().capacity);
    if capacity > grouping.max_capacity {
        return Err(error_response(
            400,
            "Validation failed",
            format!("capacity {} exceeds maximum of {}", capacity, grouping.max_capacity),
        ));
    }
    Ok(capacity)
}

/// Refuse rosters above `max_golfers`; the engine is cubic in roster size
fn check_roster_size(grouping: &GroupingState, golfers: usize, status_code: u16) -> Result<(), HttpResponse> {
    if golfers > grouping.max_golfers {
        return Err(error_response(
            status_code,
            "Roster too large",
            format!("{} golfers exceeds maximum of {}", golfers, grouping.max_golfers),
        ));
    }
    Ok(())
}

/// Parse a generate body; an empty body keeps the configured defaults
fn parse_generate_body(body: &[u8]) -> Result<GenerateGroupingsRequest, HttpResponse> {
    if body.iter().all(|b| b.is_ascii_whitespace()) {
        return Ok(GenerateGroupingsRequest::default());
    }
    serde_json::from_slice(body)
        .map_err(|e| error_response(400, "invalid_json", format!("Invalid JSON: {}", e)))
}

/// Run the engine on the blocking pool so a large roster never stalls a worker
async fn run_engine(
    engine: GroupingEngine,
    golfers: Vec<Golfer>,
    preferences: Vec<PreferenceEdge>,
    guests: Vec<GuestRequest>,
    capacity: usize,
) -> Result<GroupingResult, HttpResponse> {
    let outcome = web::block(move || {
        engine.generate_with_capacity(&golfers, &preferences, &guests, capacity)
    })
    .await;

    match outcome {
        Ok(Ok(result)) => Ok(result),
        Ok(Err(e)) => {
            tracing::info!("Grouping rejected: {}", e);
            Err(grouping_error_response(&e))
        }
        Err(e) => {
            tracing::error!("Grouping run did not complete: {}", e);
            Err(error_response(500, "Grouping failed", e))
        }
    }
}

/// Health check endpoint
async fn health_check(state: web::Data<AppState>) -> impl Responder {
    let pg_healthy = state.postgres.health_check().await.unwrap_or(false);

    let status = if pg_healthy { "healthy" } else { "degraded" };

    HttpResponse::Ok().json(HealthResponse {
        status: status.to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        timestamp: chrono::Utc::now(),
    })
}

/// Generate and store groupings for a schedule
///
/// POST /api/v1/schedules/{scheduleId}/groupings
///
/// Request body (optional):
/// ```json
/// { "capacity": 4 }
/// ```
async fn generate_groupings(
    state: web::Data<AppState>,
    path: web::Path<String>,
    body: web::Bytes,
) -> impl Responder {
    let req = match parse_generate_body(&body) {
        Ok(req) => req,
        Err(response) => return response,
    };
    if let Err(errors) = req.validate() {
        return error_response(400, "Validation failed", errors);
    }

    let schedule_id = match parse_schedule_id(&path) {
        Ok(id) => id,
        Err(e) => return error_response(400, "Invalid schedule id", e),
    };
    let capacity = match resolve_capacity(&state.grouping, req.capacity) {
        Ok(capacity) => capacity,
        Err(response) => return response,
    };

    match state.postgres.schedule_exists(schedule_id).await {
        Ok(true) => {}
        Ok(false) => return error_response(404, "Schedule not found", schedule_id),
        Err(e) => {
            tracing::error!("Failed to look up schedule {}: {}", schedule_id, e);
            return error_response(500, "Failed to look up schedule", e);
        }
    }

    let golfers = match state.postgres.confirmed_golfers(schedule_id).await {
        Ok(golfers) => golfers,
        Err(e) => {
            tracing::error!("Failed to fetch confirmed golfers for {}: {}", schedule_id, e);
            return error_response(500, "Failed to fetch confirmed golfers", e);
        }
    };
    let preferences = match state.postgres.partner_preferences(schedule_id).await {
        Ok(preferences) => preferences,
        Err(e) => {
            tracing::error!("Failed to fetch preferences for {}: {}", schedule_id, e);
            return error_response(500, "Failed to fetch preferences", e);
        }
    };
    let guests = match state.postgres.approved_guests(schedule_id).await {
        Ok(guests) => guests,
        Err(e) => {
            tracing::error!("Failed to fetch guests for {}: {}", schedule_id, e);
            return error_response(500, "Failed to fetch guests", e);
        }
    };

    if let Err(response) = check_roster_size(&state.grouping, golfers.len(), 422) {
        tracing::warn!("Schedule {} has {} confirmed golfers, above the roster limit", schedule_id, golfers.len());
        return response;
    }

    tracing::info!(
        "Generating groupings for schedule {}: {} golfers, {} preferences, {} guests, capacity {}",
        schedule_id,
        golfers.len(),
        preferences.len(),
        guests.len(),
        capacity
    );

    let engine = state.grouping.engine.clone();
    let result = match run_engine(engine, golfers, preferences, guests, capacity).await {
        Ok(result) => result,
        Err(response) => return response,
    };

    let generated_at = chrono::Utc::now();
    if let Err(e) = state
        .postgres
        .replace_groupings(schedule_id, &result, generated_at)
        .await
    {
        tracing::error!("Failed to store groupings for {}: {}", schedule_id, e);
        return error_response(500, "Failed to store groupings", e);
    }

    let schedule_key = schedule_id.to_string();
    let response = GroupingResponse {
        schedule_id: Some(schedule_key.clone()),
        groups: result.groups,
        unplaced_guests: result.unplaced_guests,
        stats: Some(result.stats),
        generated_at,
    };

    if let Err(e) = state.cache.put_groupings(&schedule_key, &response).await {
        tracing::warn!("Failed to cache groupings for {}: {}", schedule_key, e);
    }

    HttpResponse::Ok().json(response)
}

/// Fetch the current groupings for a schedule
///
/// GET /api/v1/schedules/{scheduleId}/groupings
async fn get_groupings(state: web::Data<AppState>, path: web::Path<String>) -> impl Responder {
    let schedule_id = match parse_schedule_id(&path) {
        Ok(id) => id,
        Err(e) => return error_response(400, "Invalid schedule id", e),
    };
    let schedule_key = schedule_id.to_string();

    match state.cache.get_groupings(&schedule_key).await {
        Ok(Some(cached)) => return HttpResponse::Ok().json(cached),
        Ok(None) => {}
        Err(e) => tracing::warn!("Cache lookup failed for {}, reading storage: {}", schedule_key, e),
    }

    match state.postgres.load_groupings(schedule_id).await {
        Ok(Some(stored)) => {
            let response = GroupingResponse {
                schedule_id: Some(schedule_key.clone()),
                groups: stored.groups,
                unplaced_guests: stored.unplaced_guests,
                stats: None,
                generated_at: stored.generated_at,
            };
            if let Err(e) = state.cache.put_groupings(&schedule_key, &response).await {
                tracing::warn!("Failed to cache groupings for {}: {}", schedule_key, e);
            }
            HttpResponse::Ok().json(response)
        }
        Ok(None) => error_response(404, "Groupings not found", format!("no groupings for schedule {}", schedule_key)),
        Err(e) => {
            tracing::error!("Failed to load groupings for {}: {}", schedule_key, e);
            error_response(500, "Failed to load groupings", e)
        }
    }
}

/// Remove the stored groupings for a schedule
///
/// DELETE /api/v1/schedules/{scheduleId}/groupings
async fn clear_groupings(state: web::Data<AppState>, path: web::Path<String>) -> impl Responder {
    let schedule_id = match parse_schedule_id(&path) {
        Ok(id) => id,
        Err(e) => return error_response(400, "Invalid schedule id", e),
    };

    let removed = match state.postgres.clear_groupings(schedule_id).await {
        Ok(removed) => removed,
        Err(e) => {
            tracing::error!("Failed to clear groupings for {}: {}", schedule_id, e);
            return error_response(500, "Failed to clear groupings", e);
        }
    };

    if let Err(e) = state.cache.evict_groupings(&schedule_id.to_string()).await {
        tracing::warn!("Failed to evict cached groupings for {}: {}", schedule_id, e);
    }

    HttpResponse::Ok().json(ClearGroupingsResponse {
        success: true,
        groups_removed: removed,
    })
}

/// Group an ad-hoc roster without touching storage
///
/// POST /api/v1/groupings/preview
///
/// Request body:
/// ```json
/// {
///   "golfers": [{ "profileId": "string", "teeTimePreference": "early|late|none" }],
///   "preferences": [{ "fromProfileId": "string", "toProfileId": "string", "rank": 1 }],
///   "guests": [{ "guestRequestId": "string", "hostProfileId": "string" }],
///   "capacity": 4
/// }
/// ```
async fn preview_groupings(
    grouping: web::Data<GroupingState>,
    req: web::Json<PreviewGroupingsRequest>,
) -> impl Responder {
    if let Err(errors) = req.validate() {
        return error_response(400, "Validation failed", errors);
    }
    let capacity = match resolve_capacity(&grouping, req.capacity) {
        Ok(capacity) => capacity,
        Err(response) => return response,
    };
    if let Err(response) = check_roster_size(&grouping, req.golfers.len(), 400) {
        return response;
    }

    let req = req.into_inner();
    match run_engine(grouping.engine.clone(), req.golfers, req.preferences, req.guests, capacity).await {
        Ok(result) => HttpResponse::Ok().json(GroupingResponse {
            schedule_id: None,
            groups: result.groups,
            unplaced_guests: result.unplaced_guests,
            stats: Some(result.stats),
            generated_at: chrono::Utc::now(),
        }),
        Err(response) => response,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use actix_web::{http::header::ContentType, test, App};
    use serde_json::json;

    fn preview_app_state() -> GroupingState {
        GroupingState {
            engine: GroupingEngine::default(),
            max_capacity: 6,
            max_golfers: 8,
        }
    }

    fn preview_request(body: serde_json::Value) -> test::TestRequest {
        test::TestRequest::post().uri("/groupings/preview").set_json(body)
    }

    #[::core::prelude::v1::test]
    fn test_health_check_response() {
        let response = HealthResponse {
            status: "healthy".to_string(),
            version: "0.1.0".to_string(),
            timestamp: chrono::Utc::now(),
        };

        assert_eq!(response.status, "healthy");
    }

    #[::core::prelude::v1::test]
    fn test_error_response_status() {
        let response = error_response(422, "Invalid roster", GroupingError::EmptyRoster);
        assert_eq!(response.status().as_u16(), 422);

        let response = error_response(404, "Groupings not found", "none");
        assert_eq!(response.status().as_u16(), 404);

        let response = error_response(503, "Unavailable", "down");
        assert_eq!(response.status().as_u16(), 500);
    }

    #[::core::prelude::v1::test]
    fn test_generate_body_parsing() {
        assert_eq!(parse_generate_body(b"").unwrap().capacity, None);
        assert_eq!(parse_generate_body(b" \n").unwrap().capacity, None);
        assert_eq!(parse_generate_body(br#"{}"#).unwrap().capacity, None);
        assert_eq!(parse_generate_body(br#"{"capacity": 3}"#).unwrap().capacity, Some(3));

        let negative = parse_generate_body(br#"{"capacity": -3}"#).unwrap_err();
        assert_eq!(negative.status().as_u16(), 400);

        let wrong_type = parse_generate_body(br#"{"capacity": "five"}"#).unwrap_err();
        assert_eq!(wrong_type.status().as_u16(), 400);
    }

    #[actix_web::test]
    async fn test_preview_groups_roster() {
        let app = test::init_service(
            App::new()
                .app_data(web::Data::new(preview_app_state()))
                .configure(configure),
        )
        .await;

        let req = preview_request(json!({
            "golfers": [
                { "profileId": "a", "teeTimePreference": "early" },
                { "profileId": "b" },
                { "profileId": "c" },
                { "profileId": "d", "teeTimePreference": "late" }
            ],
            "preferences": [{ "fromProfileId": "a", "toProfileId": "b", "rank": 1 }],
            "capacity": 2
        }))
        .to_request();
        let response: GroupingResponse = test::call_and_read_body_json(&app, req).await;

        assert!(response.schedule_id.is_none());
        assert_eq!(response.groups.len(), 2);
        assert_eq!(response.groups[0].members, vec!["a", "b"]);
        assert_eq!(response.stats.map(|s| s.capacity), Some(2));
    }

    #[actix_web::test]
    async fn test_preview_rejects_capacity_above_max() {
        let app = test::init_service(
            App::new()
                .app_data(web::Data::new(preview_app_state()))
                .configure(configure),
        )
        .await;

        let req = preview_request(json!({
            "golfers": [{ "profileId": "a" }],
            "capacity": 7
        }))
        .to_request();
        let response = test::call_service(&app, req).await;

        assert_eq!(response.status().as_u16(), 400);
    }

    #[actix_web::test]
    async fn test_preview_rejects_oversized_roster() {
        let app = test::init_service(
            App::new()
                .app_data(web::Data::new(preview_app_state()))
                .configure(configure),
        )
        .await;

        let golfers: Vec<_> = (0..9).map(|i| json!({ "profileId": format!("p{}", i) })).collect();
        let req = preview_request(json!({ "golfers": golfers })).to_request();
        let response = test::call_service(&app, req).await;

        assert_eq!(response.status().as_u16(), 400);
    }

    #[actix_web::test]
    async fn test_preview_duplicate_golfer_is_unprocessable() {
        let app = test::init_service(
            App::new()
                .app_data(web::Data::new(preview_app_state()))
                .configure(configure),
        )
        .await;

        let req = preview_request(json!({
            "golfers": [{ "profileId": "a" }, { "profileId": "a" }]
        }))
        .to_request();
        let response = test::call_service(&app, req).await;

        assert_eq!(response.status().as_u16(), 422);
    }

    #[actix_web::test]
    async fn test_preview_malformed_body_is_bad_request() {
        let app = test::init_service(
            App::new()
                .app_data(web::Data::new(preview_app_state()))
                .configure(configure),
        )
        .await;

        let req = test::TestRequest::post()
            .uri("/groupings/preview")
            .insert_header(ContentType::json())
            .set_payload(r#"{"golfers": [{"profileId": "a"}], "capacity": "five"}"#)
            .to_request();
        let response = test::call_service(&app, req).await;

        assert_eq!(response.status().as_u16(), 400);
    }
}
