use crate::domain::flow::{CoachingSession, Step};
use crate::domain::profile::IntakePatch;
use crate::domain::wearable::{WearableMetric, WearableSnapshot};
use crate::middleware::rate_limit::rate_limit_middleware;
use crate::state::SharedState;
use crate::web::error::{ApiError, JsonBody};
use axum::{
    extract::{Path, State},
    http::StatusCode,
    middleware,
    routing::{get, post, put},
    Json, Router,
};
use chrono::Utc;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

#[derive(Debug, Serialize)]
struct SessionResponse {
    #[serde(flatten)]
    session: CoachingSession,
    results_available: bool,
}

impl From<CoachingSession> for SessionResponse {
    fn from(session: CoachingSession) -> Self {
        let results_available = session.plan.is_some();
        Self {
            session,
            results_available,
        }
    }
}

#[derive(Debug, Deserialize)]
struct MetricPayload {
    metric: String,
    value: u16,
}

#[derive(Debug, Deserialize)]
struct StepPayload {
    step: Step,
}

pub fn router(state: SharedState) -> Router {
    let limited = Router::new()
        .route("/:id/plan", post(generate_plan))
        .route_layer(middleware::from_fn_with_state(
            state.limiter.clone(),
            rate_limit_middleware,
        ));

    Router::new()
        .route("/", post(create_session))
        .route("/:id", get(get_session).delete(delete_session))
        .route("/:id/intake", put(update_intake))
        .route("/:id/wearable", put(replace_wearable).patch(update_metric))
        .route("/:id/step", post(change_step))
        .route("/:id/continue", post(continue_to_wearable))
        .route("/:id/reset", post(start_over))
        .merge(limited)
        .with_state(state)
}

async fn create_session(
    State(state): State<SharedState>,
) -> (StatusCode, Json<SessionResponse>) {
    let session = state.sessions.create().await;
    (StatusCode::CREATED, Json(session.into()))
}

async fn get_session(
    State(state): State<SharedState>,
    Path(id): Path<Uuid>,
) -> Result<Json<SessionResponse>, ApiError> {
    let session = state.sessions.get(id).await.ok_or(ApiError::SessionNotFound)?;
    Ok(Json(session.into()))
}

async fn delete_session(
    State(state): State<SharedState>,
    Path(id): Path<Uuid>,
) -> Result<StatusCode, ApiError> {
    if !state.sessions.remove(id).await {
        return Err(ApiError::SessionNotFound);
    }
    Ok(StatusCode::NO_CONTENT)
}

async fn update_intake(
    State(state): State<SharedState>,
    Path(id): Path<Uuid>,
    JsonBody(patch): JsonBody<IntakePatch>,
) -> Result<Json<SessionResponse>, ApiError> {
    let session = state
        .sessions
        .update(id, |s| {
            s.apply_intake(patch, Utc::now());
            s.clone()
        })
        .await
        .ok_or(ApiError::SessionNotFound)?;
    Ok(Json(session.into()))
}

async fn replace_wearable(
    State(state): State<SharedState>,
    Path(id): Path<Uuid>,
    JsonBody(snapshot): JsonBody<WearableSnapshot>,
) -> Result<Json<SessionResponse>, ApiError> {
    let session = state
        .sessions
        .update(id, |s| s.replace_wearable(snapshot, Utc::now()).map(|_| s.clone()))
        .await
        .ok_or(ApiError::SessionNotFound)??;
    Ok(Json(session.into()))
}

async fn update_metric(
    State(state): State<SharedState>,
    Path(id): Path<Uuid>,
    JsonBody(payload): JsonBody<MetricPayload>,
) -> Result<Json<SessionResponse>, ApiError> {
    let metric = WearableMetric::try_from(payload.metric.as_str())?;
    let session = state
        .sessions
        .update(id, |s| {
            s.set_metric(metric, payload.value, Utc::now())
                .map(|_| s.clone())
        })
        .await
        .ok_or(ApiError::SessionNotFound)??;
    Ok(Json(session.into()))
}

async fn change_step(
    State(state): State<SharedState>,
    Path(id): Path<Uuid>,
    JsonBody(payload): JsonBody<StepPayload>,
) -> Result<Json<SessionResponse>, ApiError> {
    let session = state
        .sessions
        .update(id, |s| s.go_to(payload.step, Utc::now()).map(|_| s.clone()))
        .await
        .ok_or(ApiError::SessionNotFound)??;
    Ok(Json(session.into()))
}

async fn continue_to_wearable(
    State(state): State<SharedState>,
    Path(id): Path<Uuid>,
) -> Result<Json<SessionResponse>, ApiError> {
    let session = state
        .sessions
        .update(id, |s| s.continue_to_wearable(Utc::now()).map(|_| s.clone()))
        .await
        .ok_or(ApiError::SessionNotFound)??;
    Ok(Json(session.into()))
}

async fn generate_plan(
    State(state): State<SharedState>,
    Path(id): Path<Uuid>,
) -> Result<Json<SessionResponse>, ApiError> {
    let snapshot = state.sessions.get(id).await.ok_or(ApiError::SessionNotFound)?;
    snapshot.validated_profile()?;

    // No lock is held during the delay; the plan is built from the session as it is afterwards.
    state.latency.wait().await;

    let session = state
        .sessions
        .update(id, |s| s.generate_plan(Utc::now()).map(|_| s.clone()))
        .await
        .ok_or(ApiError::SessionNotFound)??;
    tracing::info!(
        "Session {} plan ready with {} barrier-aware recommendations",
        id,
        session.plan.as_ref().map_or(0, |plan| plan.barrier_aware.len())
    );
    Ok(Json(session.into()))
}

async fn start_over(
    State(state): State<SharedState>,
    Path(id): Path<Uuid>,
) -> Result<Json<SessionResponse>, ApiError> {
    let session = state
        .sessions
        .update(id, |s| {
            s.start_over(Utc::now());
            s.clone()
        })
        .await
        .ok_or(ApiError::SessionNotFound)?;
    Ok(Json(session.into()))
}
