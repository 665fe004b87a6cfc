//! `gym-recommendations`: a gym style, a program and a challenge for the user's goals.

use super::first_match;
use crate::engine::{Flow, PromptBuilder, PromptSpec};
use crate::postprocessing::{FieldMap, Layout, OutputField};
use crate::preprocessing::{FieldKind, FieldSpec};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Deserialize)]
pub struct GymRequest {
    pub goals: String,
    pub location: String,
    #[serde(default)]
    pub preferences: Option<String>,
    #[serde(default)]
    pub history: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GymResponse {
    pub gym: String,
    pub workout_program: String,
    pub fitness_challenge: String,
}

struct GoalEntry {
    keywords: &'static [&'static str],
    facility: &'static str,
    program: &'static str,
    challenge: &'static str,
}

const GOALS: &[GoalEntry] = &[
    GoalEntry {
        keywords: &["weight loss", "lose", "fat", "slim", "cut"],
        facility: "Pick one with plenty of cardio machines and a HIIT class timetable.",
        program: "Fat-loss program, 4 days a week: two full-body strength sessions (squats, rows, presses, 3x10) and two 30-minute interval sessions, plus a daily 8,000-step walk.",
        challenge: "30-day step challenge: hit 10,000 steps on at least 25 days this month.",
    },
    GoalEntry {
        keywords: &["muscle", "strength", "bulk", "build", "gain", "strong"],
        facility: "Pick one with several squat racks, free weights up to heavy dumbbells and a deadlift platform.",
        program: "Upper/lower split, 4 days a week: compound lifts at 4x6-8 followed by accessories at 3x10-12, adding weight whenever you hit the top of the rep range.",
        challenge: "12-week strength challenge: add 10% to your squat, bench and deadlift.",
    },
    GoalEntry {
        keywords: &["endurance", "marathon", "run", "stamina", "cardio", "triathlon"],
        facility: "Pick one with treadmills, rowers and ideally an indoor track or pool.",
        program: "Endurance block, 5 days a week: three easy aerobic sessions, one tempo session and one long session, with two short strength circuits for injury prevention.",
        challenge: "Build to a continuous 60-minute run or row within eight weeks.",
    },
    GoalEntry {
        keywords: &["flexib", "mobility", "stretch", "posture", "stiff"],
        facility: "Pick one with a quiet stretching area and regular mobility or yoga classes.",
        program: "Mobility routine, 5 days a week: 20 minutes of dynamic stretching and joint circles, plus two longer yoga or pilates sessions.",
        challenge: "30-day splits-and-reach challenge: measure your sit-and-reach every Sunday.",
    },
];

const GENERAL: GoalEntry = GoalEntry {
    keywords: &[],
    facility: "Pick one with a balanced mix of free weights, machines and classes.",
    program: "General fitness program, 3 days a week: full-body strength (3x10 of squats, push-ups, rows and lunges) plus 20 minutes of moderate cardio.",
    challenge: "Four-week consistency challenge: complete 12 sessions without missing a planned day.",
};

struct StyleEntry {
    keywords: &'static [&'static str],
    style: &'static str,
}

const STYLES: &[StyleEntry] = &[
    StyleEntry {
        keywords: &["yoga", "pilates"],
        style: "a yoga and pilates studio",
    },
    StyleEntry {
        keywords: &["hiit", "interval", "bootcamp"],
        style: "a HIIT and functional training gym",
    },
    StyleEntry {
        keywords: &["swim", "pool"],
        style: "a leisure centre with a lap pool",
    },
    StyleEntry {
        keywords: &["cycling", "spin", "bike"],
        style: "an indoor cycling studio",
    },
    StyleEntry {
        keywords: &["group class", "classes", "group"],
        style: "a gym with a full group-class timetable",
    },
    StyleEntry {
        keywords: &["boxing", "kickbox", "martial", "mma"],
        style: "a boxing and combat fitness gym",
    },
    StyleEntry {
        keywords: &["crossfit"],
        style: "a CrossFit box",
    },
];

const DEFAULT_STYLE: &str = "a full-service gym";

fn goal_for(goals: &str) -> &'static GoalEntry {
    first_match(goals, GOALS, |g| g.keywords).unwrap_or(&GENERAL)
}

fn style_for(preferences: Option<&str>) -> &'static str {
    preferences
        .and_then(|prefs| first_match(prefs, STYLES, |s| s.keywords))
        .map_or(DEFAULT_STYLE, |entry| entry.style)
}

pub struct GymRecommender;

impl Flow for GymRecommender {
    type Request = GymRequest;
    type Response = GymResponse;

    const NAME: &'static str = "gym-recommendations";

    const FIELDS: &'static [FieldSpec] = &[
        FieldSpec::required("goals", FieldKind::Text, "what the user wants to achieve"),
        FieldSpec::required("location", FieldKind::Text, "where the user trains"),
        FieldSpec::optional("preferences", FieldKind::Text, "preferred gyms or training styles"),
        FieldSpec::optional("history", FieldKind::Text, "past workout history"),
    ];

    const OUTPUTS: &'static [OutputField] = &[
        OutputField::primary(
            "gym",
            "GYM",
            "the kind of gym to look for near the user's location and why",
        ),
        OutputField::secondary(
            "workout_program",
            "WORKOUT PROGRAM",
            "a weekly program with session types and volume",
        ),
        OutputField::secondary(
            "fitness_challenge",
            "FITNESS CHALLENGE",
            "one measurable challenge with a time frame",
        ),
    ];

    const LAYOUT: Layout = Layout::Sections;

    fn prompt(request: &GymRequest) -> PromptSpec {
        PromptBuilder::new("Recommend a gym, a workout program and a fitness challenge.")
            .fact("Goals", &request.goals)
            .fact("Location", &request.location)
            .optional_fact("Preferences", request.preferences.as_deref())
            .optional_fact("Workout history", request.history.as_deref())
            .guidance("Describe the kind of gym to look for rather than inventing gym names.")
            .build(Self::OUTPUTS, Self::LAYOUT)
    }

    fn fallback(request: &GymRequest) -> GymResponse {
        let goal = goal_for(&request.goals);
        let style = style_for(request.preferences.as_deref());

        let mut gym = format!(
            "Look for {} close to {}. {}",
            style, request.location, goal.facility
        );
        if let Some(history) = request.history.as_deref() {
            gym.push_str(&format!(
                " Given your background ({}), ask for a trial week before committing.",
                history.trim_end_matches('.')
            ));
        }

        GymResponse {
            gym,
            workout_program: goal.program.to_string(),
            fitness_challenge: goal.challenge.to_string(),
        }
    }

    fn assemble(_request: &GymRequest, fields: &FieldMap) -> GymResponse {
        GymResponse {
            gym: fields.text("gym").to_string(),
            workout_program: fields.text("workout_program").to_string(),
            fitness_challenge: fields.text("fitness_challenge").to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::postprocessing::decompose;

    fn request(goals: &str, preferences: Option<&str>) -> GymRequest {
        GymRequest {
            goals: goals.to_string(),
            location: "Downtown".to_string(),
            preferences: preferences.map(str::to_string),
            history: None,
        }
    }

    #[test]
    fn weight_loss_with_yoga_preference() {
        let response = GymRecommender::fallback(&request("Lose weight", Some("Yoga, Cardio")));

        assert!(response.gym.starts_with("Look for a yoga and pilates studio close to Downtown."));
        assert!(response.workout_program.starts_with("Fat-loss program"));
        assert!(response.fitness_challenge.contains("10,000 steps"));
    }

    #[test]
    fn goal_and_style_defaults() {
        let response = GymRecommender::fallback(&request("feel better", None));

        assert!(response.gym.starts_with("Look for a full-service gym close to Downtown."));
        assert!(response.workout_program.starts_with("General fitness program"));
    }

    #[test]
    fn history_is_acknowledged() {
        let mut req = request("build muscle", Some("crossfit"));
        req.history = Some("Attended Gym B for 6 months.".to_string());

        let response = GymRecommender::fallback(&req);
        assert!(response.gym.contains("a CrossFit box"));
        assert!(response.gym.contains("(Attended Gym B for 6 months)"));
        assert!(response.workout_program.starts_with("Upper/lower split"));
    }

    #[test]
    fn prompt_omits_absent_details() {
        let spec = GymRecommender::prompt(&request("run a marathon", None));
        assert!(spec.text.contains("Location: Downtown"));
        assert!(!spec.text.contains("Preferences:"));
        assert!(!spec.text.contains("Workout history:"));
    }

    #[test]
    fn assemble_splits_sections() {
        let raw = "**GYM:** A climbing gym downtown.\n**WORKOUT PROGRAM:** Boulder twice a week.\n**FITNESS CHALLENGE:** Send a V4 in 8 weeks.";
        let fields = decompose(raw, GymRecommender::OUTPUTS, GymRecommender::LAYOUT).unwrap();

        let response = GymRecommender::assemble(&request("strength", None), &fields);
        assert_eq!(response.gym, "A climbing gym downtown.");
        assert_eq!(response.workout_program, "Boulder twice a week.");
        assert_eq!(response.fitness_challenge, "Send a V4 in 8 weeks.");
    }
}
