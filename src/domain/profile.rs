use crate::domain::options::{
    Budget, FamilySituation, IntakeField, IntakeOption, Neighborhood, Transportation, WorkSchedule,
};
use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum IntakeError {
    #[error("{0} is required")]
    MissingField(IntakeField),
    #[error("unknown {field} option: {value}")]
    UnknownOption { field: IntakeField, value: String },
}

/// Free-text health goal as the user typed it.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(transparent)]
pub struct HealthGoal(String);

impl HealthGoal {
    pub fn new(text: impl Into<String>) -> Self {
        Self(text.into())
    }

    /// Prevention or screening goals unlock the preventive-care rules.
    /// Matching is case-sensitive: "Prevent ..." does not count.
    pub fn targets_prevention(&self) -> bool {
        self.0.contains("prevent") || self.0.contains("screening")
    }
}

/// Validated user context handed to the recommendation engine.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct UserProfile {
    pub health_goal: HealthGoal,
    pub work_schedule: Option<WorkSchedule>,
    pub budget: Option<Budget>,
    pub family_situation: Option<FamilySituation>,
    pub neighborhood: Option<Neighborhood>,
    pub transportation: Option<Transportation>,
}

impl UserProfile {
    pub fn has_irregular_timing(&self) -> bool {
        self.work_schedule
            .map(|s| s.has_irregular_timing())
            .unwrap_or(false)
    }

    pub fn has_children(&self) -> bool {
        self.family_situation
            .map(|f| f.has_children())
            .unwrap_or(false)
    }

    pub fn has_time(&self) -> bool {
        !self.work_schedule.map(|s| s.is_time_poor()).unwrap_or(false)
    }

    pub fn has_budget(&self) -> bool {
        self.budget
            .map(|b| b.has_discretionary_funds())
            .unwrap_or(false)
    }

    pub fn is_budget_constrained(&self) -> bool {
        self.budget.map(|b| b.is_constrained()).unwrap_or(false)
    }

    pub fn restricts_outdoor_activity(&self) -> bool {
        self.neighborhood
            .map(|n| n.restricts_outdoor_activity())
            .unwrap_or(false)
    }

    pub fn has_transport(&self) -> bool {
        self.transportation
            .map(|t| t.provides_transport())
            .unwrap_or(false)
    }

    pub fn has_schedule_flexibility(&self) -> bool {
        !self.work_schedule.map(|s| s.is_inflexible()).unwrap_or(false)
    }
}

/// Raw intake answers exactly as the form submits them.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct IntakeForm {
    #[serde(default)]
    pub health_goal: String,
    #[serde(default)]
    pub work_schedule: String,
    #[serde(default)]
    pub budget: String,
    #[serde(default)]
    pub family_situation: String,
    #[serde(default)]
    pub neighborhood: String,
    #[serde(default)]
    pub transportation: String,
}

/// Partial update of the intake answers; absent fields are left untouched.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct IntakePatch {
    pub health_goal: Option<String>,
    pub work_schedule: Option<String>,
    pub budget: Option<String>,
    pub family_situation: Option<String>,
    pub neighborhood: Option<String>,
    pub transportation: Option<String>,
}

impl IntakeForm {
    pub fn apply(&mut self, patch: IntakePatch) {
        if let Some(val) = patch.health_goal {
            self.health_goal = val;
        }
        if let Some(val) = patch.work_schedule {
            self.work_schedule = val;
        }
        if let Some(val) = patch.budget {
            self.budget = val;
        }
        if let Some(val) = patch.family_situation {
            self.family_situation = val;
        }
        if let Some(val) = patch.neighborhood {
            self.neighborhood = val;
        }
        if let Some(val) = patch.transportation {
            self.transportation = val;
        }
    }

    /// Health goal, work schedule and budget must be answered before evaluation.
    pub fn validate(&self) -> Result<UserProfile, IntakeError> {
        if self.health_goal.trim().is_empty() {
            return Err(IntakeError::MissingField(IntakeField::HealthGoal));
        }
        let work_schedule = required::<WorkSchedule>(&self.work_schedule)?;
        let budget = required::<Budget>(&self.budget)?;

        Ok(UserProfile {
            health_goal: HealthGoal::new(self.health_goal.trim()),
            work_schedule: Some(work_schedule),
            budget: Some(budget),
            family_situation: optional(&self.family_situation)?,
            neighborhood: optional(&self.neighborhood)?,
            transportation: optional(&self.transportation)?,
        })
    }
}

fn required<T: IntakeOption>(raw: &str) -> Result<T, IntakeError> {
    optional::<T>(raw)?.ok_or(IntakeError::MissingField(T::FIELD))
}

fn optional<T: IntakeOption>(raw: &str) -> Result<Option<T>, IntakeError> {
    if raw.trim().is_empty() {
        return Ok(None);
    }
    T::parse(raw).map(Some).ok_or_else(|| IntakeError::UnknownOption {
        field: T::FIELD,
        value: raw.trim().to_string(),
    })
}
