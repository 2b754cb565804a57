use crate::domain::options::{
    entries, Budget, FamilySituation, Neighborhood, OptionEntry, Transportation, WorkSchedule,
};
use crate::domain::profile::IntakeForm;
use crate::domain::wearable::WearableSnapshot;
use crate::middleware::rate_limit::rate_limit_middleware;
use crate::services::coaching::{self, CoachingPlan, ComparisonNotes};
use crate::state::SharedState;
use crate::web::error::{ApiError, JsonBody};
use axum::{
    extract::State,
    middleware,
    routing::{get, post},
    Json, Router,
};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

#[derive(Debug, Serialize)]
struct OptionsResponse {
    work_schedule: Vec<OptionEntry>,
    budget: Vec<OptionEntry>,
    family_situation: Vec<OptionEntry>,
    neighborhood: Vec<OptionEntry>,
    transportation: Vec<OptionEntry>,
}

#[derive(Debug, Deserialize)]
struct EvaluatePayload {
    intake: IntakeForm,
    #[serde(default)]
    wearable: WearableSnapshot,
}

#[derive(Debug, Serialize)]
pub struct EvaluateResponse {
    pub plan: CoachingPlan,
    pub comparison: ComparisonNotes,
    pub evaluated_at: DateTime<Utc>,
}

impl EvaluateResponse {
    pub fn new(plan: CoachingPlan) -> Self {
        Self {
            plan,
            comparison: coaching::comparison_notes(),
            evaluated_at: Utc::now(),
        }
    }
}

pub fn router(state: SharedState) -> Router {
    let limited = Router::new()
        .route("/evaluate", post(evaluate))
        .route_layer(middleware::from_fn_with_state(
            state.limiter.clone(),
            rate_limit_middleware,
        ));

    Router::new()
        .route("/options", get(options))
        .route("/defaults", get(defaults))
        .merge(limited)
        .with_state(state)
}

async fn options() -> Json<OptionsResponse> {
    Json(OptionsResponse {
        work_schedule: entries::<WorkSchedule>(),
        budget: entries::<Budget>(),
        family_situation: entries::<FamilySituation>(),
        neighborhood: entries::<Neighborhood>(),
        transportation: entries::<Transportation>(),
    })
}

async fn defaults() -> Json<WearableSnapshot> {
    Json(WearableSnapshot::default())
}

async fn evaluate(
    State(state): State<SharedState>,
    JsonBody(payload): JsonBody<EvaluatePayload>,
) -> Result<Json<EvaluateResponse>, ApiError> {
    let profile = payload.intake.validate()?;
    payload.wearable.validate()?;

    state.latency.wait().await;
    let plan = coaching::evaluate(&profile, &payload.wearable);
    tracing::info!(
        "Evaluated plan with {} barrier-aware recommendations",
        plan.barrier_aware.len()
    );

    Ok(Json(EvaluateResponse::new(plan)))
}
