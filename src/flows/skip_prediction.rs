//! `predict-workout-skipping`: will the user skip the next session, and a nudge either way.

use super::{first_match, mentions};
use crate::engine::{Flow, PromptBuilder, PromptSpec};
use crate::postprocessing::{FieldMap, Layout, OutputField};
use crate::preprocessing::{FieldKind, FieldSpec};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Deserialize)]
pub struct SkipPredictionRequest {
    pub behavioral_data: String,
    pub current_motivation_level: String,
    pub schedule: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SkipPredictionResponse {
    pub skip_prediction: bool,
    pub motivation_nudge: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub adjusted_schedule_suggestion: Option<String>,
}

struct MotivationEntry {
    keywords: &'static [&'static str],
    risk: u8,
}

// Negated forms ("not motivated") sit in the low entry, ahead of "motivated".
const MOTIVATION: &[MotivationEntry] = &[
    MotivationEntry {
        keywords: &["low", "none", "exhausted", "tired", "unmotivated", "not motivated", "no motivation"],
        risk: 2,
    },
    MotivationEntry {
        keywords: &["medium", "moderate", "average", "okay", "so-so", "mixed"],
        risk: 1,
    },
    MotivationEntry {
        keywords: &["high", "motivated", "great", "pumped", "excited", "strong"],
        risk: 0,
    },
];

const DEFAULT_RISK: u8 = 1;
const SKIP_THRESHOLD: u8 = 2;

const LAPSE_KEYWORDS: &[&str] = &["skip", "miss", "irregular", "inconsistent", "cancel"];

fn risk_score(request: &SkipPredictionRequest) -> u8 {
    let motivation = first_match(&request.current_motivation_level, MOTIVATION, |m| m.keywords)
        .map_or(DEFAULT_RISK, |entry| entry.risk);

    let history = request.behavioral_data.to_lowercase();
    let lapses = LAPSE_KEYWORDS.iter().any(|k| mentions(&history, k));

    motivation + u8::from(lapses)
}

fn lighter_session(schedule: &str) -> String {
    format!(
        "Consider a lighter workout if you're feeling unmotivated. Keep your usual slots ({}) but make the next one a 20-minute session you can't talk yourself out of.",
        schedule.trim_end_matches('.')
    )
}

pub struct SkipPrediction;

impl Flow for SkipPrediction {
    type Request = SkipPredictionRequest;
    type Response = SkipPredictionResponse;

    const NAME: &'static str = "predict-workout-skipping";

    const FIELDS: &'static [FieldSpec] = &[
        FieldSpec::required(
            "behavioral_data",
            FieldKind::Text,
            "the user's recent workout habits",
        ),
        FieldSpec::required(
            "current_motivation_level",
            FieldKind::Text,
            "self-reported motivation right now",
        ),
        FieldSpec::required("schedule", FieldKind::Text, "the planned workout schedule"),
    ];

    const OUTPUTS: &'static [OutputField] = &[
        OutputField::secondary(
            "skip_prediction",
            "SKIP PREDICTION",
            "yes or no: will the user skip the next scheduled workout",
        ),
        OutputField::primary(
            "motivation_nudge",
            "MOTIVATION NUDGE",
            "a short message encouraging the user to stick to the schedule",
        ),
        OutputField::secondary(
            "adjusted_schedule_suggestion",
            "ADJUSTED SCHEDULE",
            "a schedule adjustment if a skip is likely, otherwise none",
        ),
    ];

    const LAYOUT: Layout = Layout::Sections;

    fn prompt(request: &SkipPredictionRequest) -> PromptSpec {
        PromptBuilder::new("Predict whether the user will skip their next workout and help them stay on track.")
            .fact("Workout habits", &request.behavioral_data)
            .fact("Current motivation", &request.current_motivation_level)
            .fact("Schedule", &request.schedule)
            .guidance("Answer the skip prediction with a plain yes or no first.")
            .build(Self::OUTPUTS, Self::LAYOUT)
    }

    fn fallback(request: &SkipPredictionRequest) -> SkipPredictionResponse {
        let skip_prediction = risk_score(request) >= SKIP_THRESHOLD;

        if skip_prediction {
            SkipPredictionResponse {
                skip_prediction,
                motivation_nudge: "Don't skip your workout today! Remember your goals.".to_string(),
                adjusted_schedule_suggestion: Some(lighter_session(&request.schedule)),
            }
        } else {
            SkipPredictionResponse {
                skip_prediction,
                motivation_nudge: "You're on track. Show up for your next session and keep the streak alive."
                    .to_string(),
                adjusted_schedule_suggestion: None,
            }
        }
    }

    fn assemble(request: &SkipPredictionRequest, fields: &FieldMap) -> SkipPredictionResponse {
        let skip_prediction = fields
            .flag("skip_prediction")
            .unwrap_or_else(|| risk_score(request) >= SKIP_THRESHOLD);

        let adjusted_schedule_suggestion = skip_prediction.then(|| {
            fields
                .extracted("adjusted_schedule_suggestion")
                .map(str::to_string)
                .unwrap_or_else(|| lighter_session(&request.schedule))
        });

        SkipPredictionResponse {
            skip_prediction,
            motivation_nudge: fields.text("motivation_nudge").to_string(),
            adjusted_schedule_suggestion,
        }
    }
}
