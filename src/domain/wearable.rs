use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

pub const METRIC_MAX: u8 = 100;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum WearableError {
    #[error("{metric} must be between 0 and {max}, got {value}", max = METRIC_MAX)]
    OutOfRange { metric: WearableMetric, value: u16 },
    #[error("unknown wearable metric: {0}")]
    UnknownMetric(String),
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum WearableMetric {
    SleepScore,
    ActivityLevel,
    StressLevel,
    HeartRateVariability,
}

impl WearableMetric {
    pub fn as_str(&self) -> &'static str {
        match self {
            WearableMetric::SleepScore => "sleep_score",
            WearableMetric::ActivityLevel => "activity_level",
            WearableMetric::StressLevel => "stress_level",
            WearableMetric::HeartRateVariability => "heart_rate_variability",
        }
    }
}

impl fmt::Display for WearableMetric {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl TryFrom<&str> for WearableMetric {
    type Error = WearableError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        match value.trim().to_lowercase().as_str() {
            "sleep_score" | "sleep" => Ok(WearableMetric::SleepScore),
            "activity_level" | "activity" => Ok(WearableMetric::ActivityLevel),
            "stress_level" | "stress" => Ok(WearableMetric::StressLevel),
            "heart_rate_variability" | "hrv" => Ok(WearableMetric::HeartRateVariability),
            other => Err(WearableError::UnknownMetric(other.to_string())),
        }
    }
}

/// Simulated wearable readings, each on a 0-100 scale.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub struct WearableSnapshot {
    pub sleep_score: u16,
    pub activity_level: u16,
    pub stress_level: u16,
    pub heart_rate_variability: u16,
}

impl Default for WearableSnapshot {
    fn default() -> Self {
        Self {
            sleep_score: 70,
            activity_level: 50,
            stress_level: 60,
            heart_rate_variability: 45,
        }
    }
}

impl WearableSnapshot {
    pub fn get(&self, metric: WearableMetric) -> u16 {
        match metric {
            WearableMetric::SleepScore => self.sleep_score,
            WearableMetric::ActivityLevel => self.activity_level,
            WearableMetric::StressLevel => self.stress_level,
            WearableMetric::HeartRateVariability => self.heart_rate_variability,
        }
    }

    pub fn set(&mut self, metric: WearableMetric, value: u16) -> Result<(), WearableError> {
        check_range(metric, value)?;
        match metric {
            WearableMetric::SleepScore => self.sleep_score = value,
            WearableMetric::ActivityLevel => self.activity_level = value,
            WearableMetric::StressLevel => self.stress_level = value,
            WearableMetric::HeartRateVariability => self.heart_rate_variability = value,
        }
        Ok(())
    }

    pub fn validate(&self) -> Result<(), WearableError> {
        for metric in [
            WearableMetric::SleepScore,
            WearableMetric::ActivityLevel,
            WearableMetric::StressLevel,
            WearableMetric::HeartRateVariability,
        ] {
            check_range(metric, self.get(metric))?;
        }
        Ok(())
    }
}

fn check_range(metric: WearableMetric, value: u16) -> Result<(), WearableError> {
    if value > METRIC_MAX as u16 {
        return Err(WearableError::OutOfRange { metric, value });
    }
    Ok(())
}
