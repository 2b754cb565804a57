//! Three-step coaching flow: intake -> wearable -> results.
use crate::domain::profile::{IntakeError, IntakeForm, IntakePatch, UserProfile};
use crate::domain::wearable::{WearableError, WearableMetric, WearableSnapshot};
use crate::services::coaching::{self, CoachingPlan};
use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use uuid::Uuid;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum FlowError {
    #[error(transparent)]
    Intake(#[from] IntakeError),
    #[error(transparent)]
    Wearable(#[from] WearableError),
    #[error("no plan has been generated yet")]
    ResultsUnavailable,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum Step {
    Intake,
    Wearable,
    Results,
}

#[derive(Debug, Clone, Serialize)]
pub struct CoachingSession {
    pub id: Uuid,
    pub step: Step,
    pub intake: IntakeForm,
    pub wearable: WearableSnapshot,
    pub plan: Option<CoachingPlan>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl CoachingSession {
    pub fn new(id: Uuid, now: DateTime<Utc>) -> Self {
        Self {
            id,
            step: Step::Intake,
            intake: IntakeForm::default(),
            wearable: WearableSnapshot::default(),
            plan: None,
            created_at: now,
            updated_at: now,
        }
    }

    pub fn apply_intake(&mut self, patch: IntakePatch, now: DateTime<Utc>) {
        self.intake.apply(patch);
        self.updated_at = now;
    }

    pub fn set_metric(
        &mut self,
        metric: WearableMetric,
        value: u16,
        now: DateTime<Utc>,
    ) -> Result<(), FlowError> {
        self.wearable.set(metric, value)?;
        self.updated_at = now;
        Ok(())
    }

    pub fn replace_wearable(
        &mut self,
        snapshot: WearableSnapshot,
        now: DateTime<Utc>,
    ) -> Result<(), FlowError> {
        snapshot.validate()?;
        self.wearable = snapshot;
        self.updated_at = now;
        Ok(())
    }

    pub fn validated_profile(&self) -> Result<UserProfile, FlowError> {
        Ok(self.intake.validate()?)
    }

    /// The intake "continue" button: only valid answers move the flow forward.
    pub fn continue_to_wearable(&mut self, now: DateTime<Utc>) -> Result<(), FlowError> {
        self.validated_profile()?;
        self.transition(Step::Wearable, now);
        Ok(())
    }

    /// Stepper navigation. Results stay locked until a plan exists.
    pub fn go_to(&mut self, step: Step, now: DateTime<Utc>) -> Result<(), FlowError> {
        if step == Step::Results && self.plan.is_none() {
            return Err(FlowError::ResultsUnavailable);
        }
        self.transition(step, now);
        Ok(())
    }

    pub fn record_plan(&mut self, plan: CoachingPlan, now: DateTime<Utc>) {
        self.plan = Some(plan);
        self.transition(Step::Results, now);
    }

    /// Evaluates the current answers and readings and stores the plan.
    /// Fails without touching the session when the intake is incomplete.
    pub fn generate_plan(&mut self, now: DateTime<Utc>) -> Result<(), FlowError> {
        let profile = self.validated_profile()?;
        let plan = coaching::evaluate(&profile, &self.wearable);
        self.record_plan(plan, now);
        Ok(())
    }

    /// Clears answers and plan. Slider values survive a restart.
    pub fn start_over(&mut self, now: DateTime<Utc>) {
        self.intake = IntakeForm::default();
        self.plan = None;
        self.transition(Step::Intake, now);
    }

    pub fn is_idle(&self, ttl: Duration, now: DateTime<Utc>) -> bool {
        now - self.updated_at >= ttl
    }

    fn transition(&mut self, step: Step, now: DateTime<Utc>) {
        if self.step != step {
            tracing::debug!(session = %self.id, from = ?self.step, to = ?step, "step transition");
        }
        self.step = step;
        self.updated_at = now;
    }
}
