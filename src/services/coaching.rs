use crate::domain::profile::UserProfile;
use crate::domain::wearable::WearableSnapshot;
use serde::{Deserialize, Serialize};

/// Sleep rules fire below this score.
pub const SLEEP_SCORE_FLOOR: u16 = 70;
/// Activity rules fire below this level.
pub const ACTIVITY_LEVEL_FLOOR: u16 = 60;
/// Stress rules fire above this level.
pub const STRESS_LEVEL_CEILING: u16 = 60;
/// Upper bound on barrier-aware recommendations per plan.
pub const MAX_BARRIER_AWARE: usize = 4;

const GENERIC_ADVICE: [&str; 5] = [
    "Exercise for 30 minutes daily, 5 days per week",
    "Get 8 hours of sleep each night",
    "Eat a balanced diet with plenty of vegetables",
    "Practice meditation for 20 minutes daily",
    "Schedule annual check-ups with your primary care physician",
];

const PRINCIPLES: [(&str, &str); 5] = [
    ("Present Bias Mitigation", "Immediate small wins vs distant big goals"),
    ("Choice Architecture", "Make healthy choices the easy default"),
    ("Implementation Intentions", "Specific when/where/how plans"),
    ("Social Proof", "Leverage community and accountability"),
    ("Habit Stacking", "Attach new habits to existing routines"),
];

const GENERIC_SHORTCOMINGS: [&str; 5] = [
    "Ignores your work schedule constraints",
    "Assumes unlimited time and money",
    "Doesn't account for caregiving responsibilities",
    "No adaptation to your environment",
    "Sets unrealistic expectations → guilt → giving up",
];

const BARRIER_AWARE_STRENGTHS: [&str; 5] = [
    "Adapts to your actual schedule and resources",
    "Micro-habits you can actually maintain",
    "Uses proven behavioral psychology",
    "Immediate, achievable wins build momentum",
    "Success breeds more success",
];

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum RuleGroup {
    Sleep,
    Activity,
    Stress,
    PreventiveCare,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Recommendation {
    pub category: RuleGroup,
    pub action: String,
    pub barrier: String,
    pub principle: String,
    pub impact: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct BehavioralPrinciple {
    pub principle: String,
    pub usage: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct CoachingPlan {
    pub generic: Vec<String>,
    pub barrier_aware: Vec<Recommendation>,
    pub principles: Vec<BehavioralPrinciple>,
}

/// Static copy shown next to the two plans.
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct ComparisonNotes {
    pub generic_shortcomings: Vec<String>,
    pub barrier_aware_strengths: Vec<String>,
}

/// Builds the side-by-side plan for one user. Pure: same input, same plan.
pub fn evaluate(profile: &UserProfile, wearable: &WearableSnapshot) -> CoachingPlan {
    CoachingPlan {
        generic: generic_advice(),
        barrier_aware: barrier_aware_advice(profile, wearable),
        principles: behavioral_principles(),
    }
}

pub fn generic_advice() -> Vec<String> {
    GENERIC_ADVICE.iter().map(|s| s.to_string()).collect()
}

pub fn behavioral_principles() -> Vec<BehavioralPrinciple> {
    PRINCIPLES
        .iter()
        .map(|(principle, usage)| BehavioralPrinciple {
            principle: principle.to_string(),
            usage: usage.to_string(),
        })
        .collect()
}

pub fn comparison_notes() -> ComparisonNotes {
    ComparisonNotes {
        generic_shortcomings: GENERIC_SHORTCOMINGS.iter().map(|s| s.to_string()).collect(),
        barrier_aware_strengths: BARRIER_AWARE_STRENGTHS.iter().map(|s| s.to_string()).collect(),
    }
}

/// Runs the rule groups in order: sleep, activity, stress, preventive care.
/// Each group contributes at most one recommendation.
pub fn barrier_aware_advice(profile: &UserProfile, wearable: &WearableSnapshot) -> Vec<Recommendation> {
    let mut advice = Vec::new();

    add_sleep_advice(&mut advice, profile, wearable);
    add_activity_advice(&mut advice, profile, wearable);
    add_stress_advice(&mut advice, profile, wearable);
    add_preventive_care_advice(&mut advice, profile);

    advice.truncate(MAX_BARRIER_AWARE);
    advice
}

fn recommendation(
    category: RuleGroup,
    action: &str,
    barrier: &str,
    principle: &str,
    impact: &str,
) -> Recommendation {
    Recommendation {
        category,
        action: action.into(),
        barrier: barrier.into(),
        principle: principle.into(),
        impact: impact.into(),
    }
}

// ─────────────────────────────────────────────────────────
// SLEEP
// ─────────────────────────────────────────────────────────
fn add_sleep_advice(c: &mut Vec<Recommendation>, profile: &UserProfile, wearable: &WearableSnapshot) {
    if wearable.sleep_score >= SLEEP_SCORE_FLOOR {
        return;
    }

    if profile.has_irregular_timing() {
        tracing::debug!(sleep_score = wearable.sleep_score, "sleep rule: anchor habits");
        c.push(recommendation(
            RuleGroup::Sleep,
            "Create a 'wind-down kit' for whenever you finish work - blackout curtains, white noise app, and consistent pre-sleep routine regardless of time",
            "Irregular schedule makes consistent sleep time impossible",
            "Anchor habits to events, not times",
            "Could improve sleep score by 15-20 points",
        ));
    } else if profile.has_children() {
        tracing::debug!(sleep_score = wearable.sleep_score, "sleep rule: micro-routine");
        c.push(recommendation(
            RuleGroup::Sleep,
            "Set phone to Do Not Disturb at 9 PM. Use the 20 minutes after kids sleep for a simple routine: 5-min stretch, warm shower, read in bed",
            "Caregiving responsibilities limit evening time",
            "Micro-routines (20 min vs 60 min)",
            "Realistic goal with high compliance likelihood",
        ));
    } else {
        tracing::debug!(sleep_score = wearable.sleep_score, "sleep rule: gradual bedtime shift");
        c.push(recommendation(
            RuleGroup::Sleep,
            "Move your bedtime 15 minutes earlier each week until you reach 7 hours. Set a phone reminder 1 hour before target bedtime",
            "Low urgency for gradual improvement",
            "Gradual change + implementation intention",
            "80% adherence rate vs 30% for immediate change",
        ));
    }
}

// ─────────────────────────────────────────────────────────
// ACTIVITY
// ─────────────────────────────────────────────────────────
fn add_activity_advice(c: &mut Vec<Recommendation>, profile: &UserProfile, wearable: &WearableSnapshot) {
    if wearable.activity_level >= ACTIVITY_LEVEL_FLOOR {
        return;
    }

    let has_budget = profile.has_budget();
    let has_time = profile.has_time();
    tracing::debug!(
        activity_level = wearable.activity_level,
        has_budget,
        has_time,
        "evaluating activity rules"
    );

    if !has_time && !has_budget {
        c.push(recommendation(
            RuleGroup::Activity,
            "During commute: if standing, do calf raises at every stop. Get off one stop early 2x/week and walk. Weekend: one 20-min YouTube workout with kids",
            "Time poverty + budget constraints",
            "Habit stacking + environment design",
            "Activity level increase without gym/time investment",
        ));
    } else if profile.restricts_outdoor_activity() {
        c.push(recommendation(
            RuleGroup::Activity,
            "Indoor movement: 10 squats every time you use the bathroom, walk in place during TV commercials, YouTube fitness (no equipment needed)",
            "No safe outdoor walking areas",
            "Remove environmental barriers",
            "Can achieve 150 min/week activity indoors",
        ));
    } else if has_budget && has_time {
        c.push(recommendation(
            RuleGroup::Activity,
            "Join a community fitness class or walking group. Social commitment = 95% attendance vs 40% solo. Start with 2x/week, same time/place",
            "Motivation and accountability",
            "Social proof + commitment device",
            "Higher adherence through community",
        ));
    } else {
        c.push(recommendation(
            RuleGroup::Activity,
            "Walking meetings if possible, stairs instead of elevator (start with down only), park further away. Track steps - aim for +500 steps/day this week",
            "Fitting activity into workday",
            "Incremental goals + choice architecture",
            "Sustainable daily habit formation",
        ));
    }
}

// ─────────────────────────────────────────────────────────
// STRESS
// ─────────────────────────────────────────────────────────
fn add_stress_advice(c: &mut Vec<Recommendation>, profile: &UserProfile, wearable: &WearableSnapshot) {
    if wearable.stress_level <= STRESS_LEVEL_CEILING {
        return;
    }

    if profile.is_budget_constrained() {
        tracing::debug!(stress_level = wearable.stress_level, "stress rule: free breathing app");
        c.push(recommendation(
            RuleGroup::Stress,
            "Free breathing app (Breathwrk or Oak): 2 minutes before work, 2 minutes at lunch. No cost, no time commitment, immediate impact on HRV",
            "Can't afford therapy or wellness apps",
            "Remove cost barrier + micro-habit",
            "Measurable HRV improvement in 2 weeks",
        ));
    } else {
        tracing::debug!(stress_level = wearable.stress_level, "stress rule: break down stressors");
        c.push(recommendation(
            RuleGroup::Stress,
            "Identify your top 2 stressors. For each, schedule one 15-min 'problem-solving session' this week. Write down 3 tiny actions you control",
            "Overwhelm prevents action",
            "Break down complexity + control focus",
            "Reduces rumination, increases agency",
        ));
    }
}

// ─────────────────────────────────────────────────────────
// PREVENTIVE CARE
// ─────────────────────────────────────────────────────────
fn add_preventive_care_advice(c: &mut Vec<Recommendation>, profile: &UserProfile) {
    if !profile.health_goal.targets_prevention() {
        return;
    }

    let has_transport = profile.has_transport();
    let has_flexibility = profile.has_schedule_flexibility();
    tracing::debug!(has_transport, has_flexibility, "evaluating preventive care rules");

    if !has_transport || !has_flexibility {
        c.push(recommendation(
            RuleGroup::PreventiveCare,
            "Check if your employer offers on-site health screenings. If not, use CVS MinuteClinic (evening/weekend hours) or telehealth for blood pressure check",
            "Transportation + inflexible work schedule",
            "Meet people where they are",
            "Removes 2 major barriers to preventative care",
        ));
    } else {
        c.push(recommendation(
            RuleGroup::PreventiveCare,
            "Schedule your annual physical right now (use this momentum!). Morning appointments have fewer delays. Block 3 hours on calendar including travel",
            "Procrastination + time uncertainty",
            "Implementation intention + buffer time",
            "Scheduled appointments are 85% more likely to happen",
        ));
    }
}
