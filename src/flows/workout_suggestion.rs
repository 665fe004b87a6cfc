//! `workout-suggestion`: the next exercise in a session.

use super::{first_match, mentions};
use crate::engine::{Flow, PromptBuilder, PromptSpec};
use crate::postprocessing::{FieldMap, Layout, OutputField};
use crate::preprocessing::{FieldKind, FieldSpec};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Deserialize)]
pub struct WorkoutSuggestionRequest {
    pub previous_exercises: Vec<String>,
    pub user_query: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WorkoutSuggestionResponse {
    pub recommendation: String,
}

struct GroupEntry {
    keywords: &'static [&'static str],
    target: &'static str,
    sets: &'static str,
    why: &'static str,
}

const GROUPS: &[GroupEntry] = &[
    GroupEntry {
        keywords: &["chest", "pec", "bench", "push-up", "pushup", "push up", "fly", "flye"],
        target: "chest",
        sets: "3 sets of dumbbell bench presses",
        why: "Dumbbells let each side work independently and give a deeper stretch than a barbell.",
    },
    GroupEntry {
        keywords: &["back", "lats", "lat pulldown", "row", "pull-up", "pullup", "pull up", "deadlift"],
        target: "back",
        sets: "3 sets of bent-over rows",
        why: "Rows build the upper back and balance out all the pressing most people do.",
    },
    GroupEntry {
        keywords: &["leg", "squat", "lunge", "quad", "hamstring", "glute", "calf", "calves"],
        target: "legs",
        sets: "4 sets of goblet squats",
        why: "Goblet squats train the whole lower body while keeping your torso upright.",
    },
    GroupEntry {
        keywords: &["shoulder", "delt", "overhead press", "lateral raise", "military press"],
        target: "shoulders",
        sets: "3 sets of seated dumbbell shoulder presses",
        why: "Sitting removes leg drive so the delts do the work.",
    },
    GroupEntry {
        keywords: &["arms", "bicep", "tricep", "curl", "dips", "skull crusher"],
        target: "arms",
        sets: "3 sets of triceps rope pushdowns",
        why: "Triceps make up most of your upper-arm size and recover quickly.",
    },
    GroupEntry {
        keywords: &["core", "abs", "abdominal", "plank", "crunch", "oblique", "sit-up"],
        target: "core",
        sets: "3 rounds of 45-second planks",
        why: "A stable core carries over to every lift you do.",
    },
    GroupEntry {
        keywords: &["cardio", "run", "jog", "bike", "cycling", "rowing machine", "conditioning", "hiit"],
        target: "conditioning",
        sets: "a 10-minute interval finisher on the bike",
        why: "Short intervals raise your heart rate without wrecking recovery.",
    },
];

const FULL_BODY: GroupEntry = GroupEntry {
    keywords: &[],
    target: "whole body",
    sets: "3 rounds of a full-body circuit of squats, push-ups and rows",
    why: "You've covered every major area, so a light circuit ties the session together.",
};

/// The query decides first; otherwise the first group no earlier exercise covered.
fn next_group(request: &WorkoutSuggestionRequest) -> &'static GroupEntry {
    if let Some(group) = first_match(&request.user_query, GROUPS, |g| g.keywords) {
        return group;
    }

    let done: Vec<String> = request
        .previous_exercises
        .iter()
        .map(|exercise| exercise.to_lowercase())
        .collect();

    GROUPS
        .iter()
        .find(|group| {
            !done
                .iter()
                .any(|exercise| group.keywords.iter().any(|k| mentions(exercise, k)))
        })
        .unwrap_or(&FULL_BODY)
}

pub struct WorkoutSuggestion;

impl Flow for WorkoutSuggestion {
    type Request = WorkoutSuggestionRequest;
    type Response = WorkoutSuggestionResponse;

    const NAME: &'static str = "workout-suggestion";

    const FIELDS: &'static [FieldSpec] = &[
        FieldSpec::required(
            "previous_exercises",
            FieldKind::TextList,
            "exercises already done this session",
        ),
        FieldSpec::required("user_query", FieldKind::Text, "what the user is asking for"),
    ];

    const OUTPUTS: &'static [OutputField] = &[OutputField::primary(
        "recommendation",
        "RECOMMENDATION",
        "the next exercise with sets and reps, and why it is a good choice",
    )];

    const LAYOUT: Layout = Layout::Sections;

    fn prompt(request: &WorkoutSuggestionRequest) -> PromptSpec {
        PromptBuilder::new("Suggest the single best next exercise for this session.")
            .list_fact("Exercises done so far", &request.previous_exercises)
            .fact("User request", &request.user_query)
            .guidance("Prefer a muscle group the session has not trained yet unless the user asks otherwise.")
            .build(Self::OUTPUTS, Self::LAYOUT)
    }

    fn fallback(request: &WorkoutSuggestionRequest) -> WorkoutSuggestionResponse {
        let group = next_group(request);

        let mut recommendation = format!(
            "A good next move would be {} to target your {}. {}",
            group.sets, group.target, group.why
        );
        if let Some(last) = request.previous_exercises.last() {
            recommendation.push_str(&format!(" It complements the {} you just did.", last));
        }

        WorkoutSuggestionResponse { recommendation }
    }

    fn assemble(_request: &WorkoutSuggestionRequest, fields: &FieldMap) -> WorkoutSuggestionResponse {
        WorkoutSuggestionResponse {
            recommendation: fields.text("recommendation").to_string(),
        }
    }
}
