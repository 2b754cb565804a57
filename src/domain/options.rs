//! Closed option sets for the intake answers.
//! Wire ids match the values the intake form posts; labels are what the form shows.
use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum IntakeField {
    HealthGoal,
    WorkSchedule,
    Budget,
    FamilySituation,
    Neighborhood,
    Transportation,
}

impl IntakeField {
    pub fn as_str(&self) -> &'static str {
        match self {
            IntakeField::HealthGoal => "health_goal",
            IntakeField::WorkSchedule => "work_schedule",
            IntakeField::Budget => "budget",
            IntakeField::FamilySituation => "family_situation",
            IntakeField::Neighborhood => "neighborhood",
            IntakeField::Transportation => "transportation",
        }
    }
}

impl fmt::Display for IntakeField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A categorical intake answer with a fixed set of choices.
pub trait IntakeOption: Sized + Copy + 'static {
    const FIELD: IntakeField;

    fn all() -> &'static [Self];
    fn as_str(&self) -> &'static str;
    fn label(&self) -> &'static str;

    /// Looks up a wire id, ignoring surrounding whitespace and ASCII case.
    fn parse(raw: &str) -> Option<Self> {
        let needle = raw.trim();
        Self::all()
            .iter()
            .find(|option| option.as_str().eq_ignore_ascii_case(needle))
            .copied()
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "kebab-case")]
pub enum WorkSchedule {
    #[serde(rename = "standard-9-5")]
    Standard9To5,
    FlexibleHours,
    ShiftWork,
    IrregularHours,
    MultipleJobs,
    StrictSchedule,
}

impl WorkSchedule {
    /// Sleep cannot be pinned to a clock time.
    pub fn has_irregular_timing(&self) -> bool {
        matches!(self, WorkSchedule::ShiftWork | WorkSchedule::IrregularHours)
    }

    /// 60+ hour weeks leave no slack for dedicated exercise time.
    pub fn is_time_poor(&self) -> bool {
        matches!(self, WorkSchedule::MultipleJobs)
    }

    /// Daytime appointments are hard to fit in.
    pub fn is_inflexible(&self) -> bool {
        matches!(self, WorkSchedule::StrictSchedule | WorkSchedule::MultipleJobs)
    }
}

impl IntakeOption for WorkSchedule {
    const FIELD: IntakeField = IntakeField::WorkSchedule;

    fn all() -> &'static [Self] {
        &[
            WorkSchedule::Standard9To5,
            WorkSchedule::FlexibleHours,
            WorkSchedule::ShiftWork,
            WorkSchedule::IrregularHours,
            WorkSchedule::MultipleJobs,
            WorkSchedule::StrictSchedule,
        ]
    }

    fn as_str(&self) -> &'static str {
        match self {
            WorkSchedule::Standard9To5 => "standard-9-5",
            WorkSchedule::FlexibleHours => "flexible-hours",
            WorkSchedule::ShiftWork => "shift-work",
            WorkSchedule::IrregularHours => "irregular-hours",
            WorkSchedule::MultipleJobs => "multiple-jobs",
            WorkSchedule::StrictSchedule => "strict-schedule",
        }
    }

    fn label(&self) -> &'static str {
        match self {
            WorkSchedule::Standard9To5 => "Standard 9-5, weekdays",
            WorkSchedule::FlexibleHours => "Flexible hours, some control over schedule",
            WorkSchedule::ShiftWork => "Shift work (nights, weekends, rotating)",
            WorkSchedule::IrregularHours => "Irregular/unpredictable hours",
            WorkSchedule::MultipleJobs => "Multiple jobs (60+ hrs/week)",
            WorkSchedule::StrictSchedule => "Strict schedule, no flexibility",
        }
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "kebab-case")]
pub enum Budget {
    VeryTight,
    LimitedBudget,
    ModerateBudget,
    FlexibleBudget,
}

impl Budget {
    pub fn has_discretionary_funds(&self) -> bool {
        matches!(self, Budget::ModerateBudget | Budget::FlexibleBudget)
    }

    pub fn is_constrained(&self) -> bool {
        matches!(self, Budget::VeryTight | Budget::LimitedBudget)
    }
}

impl IntakeOption for Budget {
    const FIELD: IntakeField = IntakeField::Budget;

    fn all() -> &'static [Self] {
        &[
            Budget::VeryTight,
            Budget::LimitedBudget,
            Budget::ModerateBudget,
            Budget::FlexibleBudget,
        ]
    }

    fn as_str(&self) -> &'static str {
        match self {
            Budget::VeryTight => "very-tight",
            Budget::LimitedBudget => "limited-budget",
            Budget::ModerateBudget => "moderate-budget",
            Budget::FlexibleBudget => "flexible-budget",
        }
    }

    fn label(&self) -> &'static str {
        match self {
            Budget::VeryTight => "Very tight - every dollar counts",
            Budget::LimitedBudget => "Limited - can afford basics only",
            Budget::ModerateBudget => "Moderate - some flexibility for health",
            Budget::FlexibleBudget => "Flexible - budget isn't a major constraint",
        }
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "kebab-case")]
pub enum FamilySituation {
    SingleNoDependents,
    YoungChildren,
    SchoolAgeChildren,
    ElderlyCare,
    PartnerNoKids,
}

impl FamilySituation {
    /// Any id mentioning children or kids, `partner-no-kids` included.
    pub fn has_children(&self) -> bool {
        matches!(
            self,
            FamilySituation::YoungChildren
                | FamilySituation::SchoolAgeChildren
                | FamilySituation::PartnerNoKids
        )
    }
}

impl IntakeOption for FamilySituation {
    const FIELD: IntakeField = IntakeField::FamilySituation;

    fn all() -> &'static [Self] {
        &[
            FamilySituation::SingleNoDependents,
            FamilySituation::YoungChildren,
            FamilySituation::SchoolAgeChildren,
            FamilySituation::ElderlyCare,
            FamilySituation::PartnerNoKids,
        ]
    }

    fn as_str(&self) -> &'static str {
        match self {
            FamilySituation::SingleNoDependents => "single-no-dependents",
            FamilySituation::YoungChildren => "young-children",
            FamilySituation::SchoolAgeChildren => "school-age-children",
            FamilySituation::ElderlyCare => "elderly-care",
            FamilySituation::PartnerNoKids => "partner-no-kids",
        }
    }

    fn label(&self) -> &'static str {
        match self {
            FamilySituation::SingleNoDependents => "Single, no dependents",
            FamilySituation::YoungChildren => "Primary caregiver for young children",
            FamilySituation::SchoolAgeChildren => "Have school-age children",
            FamilySituation::ElderlyCare => "Caring for elderly family member",
            FamilySituation::PartnerNoKids => "Partner/spouse, no children",
        }
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "kebab-case")]
pub enum Neighborhood {
    SafeWalkable,
    LimitedWalkability,
    UnsafeLimited,
    SuburbanCarNeeded,
    UrbanAccessible,
}

impl Neighborhood {
    pub fn restricts_outdoor_activity(&self) -> bool {
        matches!(
            self,
            Neighborhood::LimitedWalkability | Neighborhood::UnsafeLimited
        )
    }
}

impl IntakeOption for Neighborhood {
    const FIELD: IntakeField = IntakeField::Neighborhood;

    fn all() -> &'static [Self] {
        &[
            Neighborhood::SafeWalkable,
            Neighborhood::LimitedWalkability,
            Neighborhood::UnsafeLimited,
            Neighborhood::SuburbanCarNeeded,
            Neighborhood::UrbanAccessible,
        ]
    }

    fn as_str(&self) -> &'static str {
        match self {
            Neighborhood::SafeWalkable => "safe-walkable",
            Neighborhood::LimitedWalkability => "limited-walkability",
            Neighborhood::UnsafeLimited => "unsafe-limited",
            Neighborhood::SuburbanCarNeeded => "suburban-car-needed",
            Neighborhood::UrbanAccessible => "urban-accessible",
        }
    }

    fn label(&self) -> &'static str {
        match self {
            Neighborhood::SafeWalkable => "Safe, walkable, parks nearby",
            Neighborhood::LimitedWalkability => "Limited walkability, some amenities",
            Neighborhood::UnsafeLimited => "Safety concerns, limited outdoor spaces",
            Neighborhood::SuburbanCarNeeded => "Suburban, car needed for everything",
            Neighborhood::UrbanAccessible => "Urban, good public transit/resources",
        }
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "kebab-case")]
pub enum Transportation {
    OwnCar,
    PublicTransit,
    LimitedTransport,
    NoReliableTransport,
}

impl Transportation {
    /// Ids mentioning a car or reliability count as having transport.
    /// `no-reliable-transport` matches on "reliable" and is included.
    pub fn provides_transport(&self) -> bool {
        matches!(
            self,
            Transportation::OwnCar | Transportation::NoReliableTransport
        )
    }
}

impl IntakeOption for Transportation {
    const FIELD: IntakeField = IntakeField::Transportation;

    fn all() -> &'static [Self] {
        &[
            Transportation::OwnCar,
            Transportation::PublicTransit,
            Transportation::LimitedTransport,
            Transportation::NoReliableTransport,
        ]
    }

    fn as_str(&self) -> &'static str {
        match self {
            Transportation::OwnCar => "own-car",
            Transportation::PublicTransit => "public-transit",
            Transportation::LimitedTransport => "limited-transport",
            Transportation::NoReliableTransport => "no-reliable-transport",
        }
    }

    fn label(&self) -> &'static str {
        match self {
            Transportation::OwnCar => "Own car, reliable",
            Transportation::PublicTransit => "Public transit available",
            Transportation::LimitedTransport => "Limited transportation options",
            Transportation::NoReliableTransport => "No reliable transportation",
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct OptionEntry {
    pub id: &'static str,
    pub label: &'static str,
}

/// All choices of one option set, in form order.
pub fn entries<T: IntakeOption>() -> Vec<OptionEntry> {
    T::all()
        .iter()
        .map(|option| OptionEntry {
            id: option.as_str(),
            label: option.label(),
        })
        .collect()
}
