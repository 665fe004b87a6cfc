//! The coaching endpoints.
//!
//! Each submodule declares one [`Flow`](crate::engine::Flow): its request and
//! response types, field tables, prompt, and rule-based fallback. Endpoint
//! differences live in those tables; the sequencing is shared by the
//! orchestrator.

pub mod diet_plan;
pub mod food_nutrition;
pub mod gym_recommender;
pub mod motivational_update;
pub mod skip_prediction;
pub mod smart_assistant;
pub mod workout_feedback;
pub mod workout_suggestion;

pub use diet_plan::DietPlan;
pub use food_nutrition::FoodNutrition;
pub use gym_recommender::GymRecommender;
pub use motivational_update::MotivationalUpdate;
pub use skip_prediction::SkipPrediction;
pub use smart_assistant::SmartAssistant;
pub use workout_feedback::WorkoutFeedback;
pub use workout_suggestion::WorkoutSuggestion;

use crate::engine::Orchestrator;
use crate::llm::Backend;
use crate::preprocessing::ValidationError;
use serde::Serialize;
use serde_json::Value;
use std::fmt;
use std::str::FromStr;

#[derive(Debug, thiserror::Error)]
pub enum DispatchError {
    #[error("Unknown endpoint: {0}")]
    UnknownEndpoint(String),

    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error("Failed to serialize response: {0}")]
    Serialization(#[from] serde_json::Error),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Endpoint {
    DietPlan,
    FoodNutrition,
    GymRecommendations,
    MotivationalUpdate,
    WorkoutFeedback,
    SkipPrediction,
    SmartAssistant,
    WorkoutSuggestion,
}

impl Endpoint {
    pub const ALL: [Endpoint; 8] = [
        Endpoint::DietPlan,
        Endpoint::FoodNutrition,
        Endpoint::GymRecommendations,
        Endpoint::MotivationalUpdate,
        Endpoint::WorkoutFeedback,
        Endpoint::SkipPrediction,
        Endpoint::SmartAssistant,
        Endpoint::WorkoutSuggestion,
    ];

    pub fn name(self) -> &'static str {
        use crate::engine::Flow;

        match self {
            Endpoint::DietPlan => DietPlan::NAME,
            Endpoint::FoodNutrition => FoodNutrition::NAME,
            Endpoint::GymRecommendations => GymRecommender::NAME,
            Endpoint::MotivationalUpdate => MotivationalUpdate::NAME,
            Endpoint::WorkoutFeedback => WorkoutFeedback::NAME,
            Endpoint::SkipPrediction => SkipPrediction::NAME,
            Endpoint::SmartAssistant => SmartAssistant::NAME,
            Endpoint::WorkoutSuggestion => WorkoutSuggestion::NAME,
        }
    }
}

impl fmt::Display for Endpoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Endpoint {
    type Err = DispatchError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim().to_ascii_lowercase().replace('_', "-");
        Endpoint::ALL
            .into_iter()
            .find(|endpoint| endpoint.name() == wanted)
            .ok_or_else(|| DispatchError::UnknownEndpoint(s.to_string()))
    }
}

/// Runs `endpoint` on a JSON payload and returns the JSON response.
pub async fn dispatch<B: Backend>(
    orchestrator: &Orchestrator<B>,
    endpoint: Endpoint,
    payload: &Value,
) -> Result<Value, DispatchError> {
    match endpoint {
        Endpoint::DietPlan => to_json(orchestrator.run::<DietPlan>(payload).await?),
        Endpoint::FoodNutrition => to_json(orchestrator.run::<FoodNutrition>(payload).await?),
        Endpoint::GymRecommendations => {
            to_json(orchestrator.run::<GymRecommender>(payload).await?)
        }
        Endpoint::MotivationalUpdate => {
            to_json(orchestrator.run::<MotivationalUpdate>(payload).await?)
        }
        Endpoint::WorkoutFeedback => to_json(orchestrator.run::<WorkoutFeedback>(payload).await?),
        Endpoint::SkipPrediction => to_json(orchestrator.run::<SkipPrediction>(payload).await?),
        Endpoint::SmartAssistant => to_json(orchestrator.run::<SmartAssistant>(payload).await?),
        Endpoint::WorkoutSuggestion => {
            to_json(orchestrator.run::<WorkoutSuggestion>(payload).await?)
        }
    }
}

fn to_json<T: Serialize>(response: T) -> Result<Value, DispatchError> {
    Ok(serde_json::to_value(response)?)
}

/// First table entry with a keyword mentioned in `text`, ignoring case.
///
/// Tables are scanned in order, so earlier entries win ties.
pub(crate) fn first_match<'a, T>(
    text: &str,
    table: &'a [T],
    keywords: impl Fn(&T) -> &'static [&'static str],
) -> Option<&'a T> {
    let lower = text.to_lowercase();
    table
        .iter()
        .find(|entry| keywords(*entry).iter().any(|k| mentions(&lower, k)))
}

/// Whether `keyword` starts a word somewhere in the lowercased `text`.
///
/// Keywords may be stems ("struggl"), so only the start is anchored:
/// "light" matches "lighter" but not "slightly".
pub(crate) fn mentions(text: &str, keyword: &str) -> bool {
    text.match_indices(keyword).any(|(at, _)| {
        text[..at]
            .chars()
            .next_back()
            .map_or(true, |c| !c.is_alphanumeric())
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn endpoint_names_round_trip() {
        for endpoint in Endpoint::ALL {
            assert_eq!(endpoint.name().parse::<Endpoint>().unwrap(), endpoint);
        }
        assert_eq!(
            "Smart_Assistant_Feedback".parse::<Endpoint>().unwrap(),
            Endpoint::SmartAssistant
        );
        assert!(matches!(
            "bogus".parse::<Endpoint>(),
            Err(DispatchError::UnknownEndpoint(_))
        ));
    }

    #[test]
    fn first_match_prefers_table_order() {
        const TABLE: &[(&str, &[&str])] = &[("a", &["tired"]), ("b", &["stressed", "tired"])];
        let hit = first_match("Tired and stressed", TABLE, |entry| entry.1);
        assert_eq!(hit.map(|entry| entry.0), Some("a"));
        assert!(first_match("fine", TABLE, |entry| entry.1).is_none());
    }

    #[test]
    fn keywords_must_start_a_word() {
        assert!(mentions("felt light today", "light"));
        assert!(mentions("lighter than last week", "light"));
        assert!(mentions("(light) set", "light"));
        assert!(!mentions("slightly hard", "light"));
        assert!(!mentions("ab crunches", "run"));
        assert!(mentions("struggled on the last rep", "struggl"));

        const TABLE: &[(&str, &[&str])] = &[("light", &["light"]), ("moderate", &["hard"])];
        let hit = first_match("Slightly hard", TABLE, |entry| entry.1);
        assert_eq!(hit.map(|entry| entry.0), Some("moderate"));
    }
}
