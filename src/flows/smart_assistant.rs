//! `smart-assistant-feedback`: between-set intensity, rest and encouragement.

use super::first_match;
use crate::engine::{Flow, PromptBuilder, PromptSpec};
use crate::postprocessing::{FieldMap, Layout, OutputField};
use crate::preprocessing::{FieldKind, FieldSpec};
use serde::{Deserialize, Serialize};

/// Heart rate (bpm) at or above which a set counts as hard regardless of feel.
const HIGH_HEART_RATE: u32 = 170;
const HIGH_VOLUME_REPS: u32 = 12;
const LATE_SET: u32 = 4;

#[derive(Debug, Clone, Deserialize)]
pub struct SmartAssistantRequest {
    #[serde(default)]
    pub workout_type: Option<String>,
    pub current_set: u32,
    pub rep_count: u32,
    #[serde(default)]
    pub heart_rate: Option<u32>,
    #[serde(default)]
    pub time_under_tension: Option<u32>,
    #[serde(default)]
    pub weight_lifted: Option<String>,
    pub perceived_exertion: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SmartAssistantResponse {
    pub intensity_recommendation: String,
    pub rest_suggestion: String,
    pub motivational_nudge: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Effort {
    Light,
    Moderate,
    Hard,
}

struct EffortEntry {
    effort: Effort,
    keywords: &'static [&'static str],
}

// Hard is checked first so "too hard, not easy" reads as hard. Negated easy
// phrasings sit ahead of the light entry.
const EFFORTS: &[EffortEntry] = &[
    EffortEntry {
        effort: Effort::Hard,
        keywords: &["too hard", "exhaust", "failure", "brutal", "very hard", "struggl", "max effort"],
    },
    EffortEntry {
        effort: Effort::Moderate,
        keywords: &["not easy", "not that easy", "not so easy", "wasn't easy", "not light", "hardly easy"],
    },
    EffortEntry {
        effort: Effort::Light,
        keywords: &["too easy", "easy", "light", "effortless", "no problem"],
    },
    EffortEntry {
        effort: Effort::Moderate,
        keywords: &["challenging", "manageable", "moderate", "tough", "solid"],
    },
];

impl SmartAssistantRequest {
    fn effort(&self) -> Effort {
        if self.heart_rate.is_some_and(|bpm| bpm >= HIGH_HEART_RATE) {
            return Effort::Hard;
        }
        first_match(&self.perceived_exertion, EFFORTS, |e| e.keywords)
            .map_or(Effort::Moderate, |entry| entry.effort)
    }
}

fn rest_seconds(effort: Effort) -> u32 {
    match effort {
        Effort::Light => 60,
        Effort::Moderate => 90,
        Effort::Hard => 150,
    }
}

fn nudge(request: &SmartAssistantRequest) -> String {
    if request.rep_count >= HIGH_VOLUME_REPS {
        format!(
            "{} reps is serious volume. Stay sharp and finish strong!",
            request.rep_count
        )
    } else if request.current_set >= LATE_SET {
        format!(
            "Set {} already. That's real work, keep your focus through the last ones.",
            request.current_set
        )
    } else {
        "You're doing great! Keep pushing forward.".to_string()
    }
}

pub struct SmartAssistant;

impl Flow for SmartAssistant {
    type Request = SmartAssistantRequest;
    type Response = SmartAssistantResponse;

    const NAME: &'static str = "smart-assistant-feedback";

    const FIELDS: &'static [FieldSpec] = &[
        FieldSpec::optional("workout_type", FieldKind::Text, "the exercise being performed"),
        FieldSpec::required(
            "current_set",
            FieldKind::Integer { min: 1, max: 50 },
            "the set just completed",
        ),
        FieldSpec::required(
            "rep_count",
            FieldKind::Integer { min: 0, max: 500 },
            "reps completed in the set",
        ),
        FieldSpec::optional(
            "heart_rate",
            FieldKind::Integer { min: 30, max: 240 },
            "heart rate in beats per minute",
        ),
        FieldSpec::optional(
            "time_under_tension",
            FieldKind::Integer { min: 0, max: 3600 },
            "seconds under tension for the set",
        ),
        FieldSpec::optional("weight_lifted", FieldKind::Text, "load with units, e.g. 70 kg"),
        FieldSpec::required(
            "perceived_exertion",
            FieldKind::Text,
            "how hard the set felt",
        ),
    ];

    const OUTPUTS: &'static [OutputField] = &[
        OutputField::primary(
            "intensity_recommendation",
            "INTENSITY",
            "whether to increase, decrease or maintain intensity for the next set",
        ),
        OutputField::secondary(
            "rest_suggestion",
            "REST",
            "how long to rest before the next set",
        ),
        OutputField::secondary(
            "motivational_nudge",
            "MOTIVATION",
            "one short, contextual motivational line",
        ),
    ];

    const LAYOUT: Layout = Layout::Sections;

    fn prompt(request: &SmartAssistantRequest) -> PromptSpec {
        PromptBuilder::new("Give real-time coaching between sets.")
            .optional_fact("Exercise", request.workout_type.as_deref())
            .fact("Current set", request.current_set)
            .fact("Reps completed", request.rep_count)
            .optional_fact("Heart rate", request.heart_rate.map(|bpm| format!("{} bpm", bpm)))
            .optional_fact(
                "Time under tension",
                request.time_under_tension.map(|secs| format!("{} s", secs)),
            )
            .optional_fact("Weight lifted", request.weight_lifted.as_deref())
            .fact("Perceived exertion", &request.perceived_exertion)
            .guidance("Keep each section to one or two sentences.")
            .build(Self::OUTPUTS, Self::LAYOUT)
    }

    fn fallback(request: &SmartAssistantRequest) -> SmartAssistantResponse {
        let effort = request.effort();

        let intensity_recommendation = match effort {
            Effort::Light => "Increase the load by about 5% or add two reps on the next set.",
            Effort::Moderate => "Maintain current intensity.",
            Effort::Hard => {
                "Decrease the load by about 10% so you can keep clean form on the next set."
            }
        };

        SmartAssistantResponse {
            intensity_recommendation: intensity_recommendation.to_string(),
            rest_suggestion: format!(
                "Take a {}-second rest before set {}.",
                rest_seconds(effort),
                request.current_set + 1
            ),
            motivational_nudge: nudge(request),
        }
    }

    fn assemble(_request: &SmartAssistantRequest, fields: &FieldMap) -> SmartAssistantResponse {
        SmartAssistantResponse {
            intensity_recommendation: fields.text("intensity_recommendation").to_string(),
            rest_suggestion: fields.text("rest_suggestion").to_string(),
            motivational_nudge: fields.text("motivational_nudge").to_string(),
        }
    }
}
