use fitcoach::flows::{DietPlan, SmartAssistant};
use fitcoach::{
    dispatch, BackendConfig, Constraint, DispatchError, Endpoint, HttpBackend, Orchestrator,
    ResponseSource,
};
use serde_json::{json, Value};

fn offline() -> Orchestrator<HttpBackend> {
    Orchestrator::new(HttpBackend::new(BackendConfig::default()).unwrap())
}

fn sample_payload(endpoint: Endpoint) -> Value {
    match endpoint {
        Endpoint::DietPlan => json!({
            "bmi": 27.3,
            "weight_goal": "maintain",
            "dietary_preferences": "pescatarian",
            "user_history": "Struggled with late-night snacking."
        }),
        Endpoint::FoodNutrition => json!({"food_name": "salmon"}),
        Endpoint::GymRecommendations => json!({
            "goals": "improve endurance",
            "location": "Lisbon",
            "preferences": "swimming"
        }),
        Endpoint::MotivationalUpdate => json!({"user_message": "Pretty stressed with work"}),
        Endpoint::WorkoutFeedback => json!({
            "workout_type": "push-ups",
            "photo_data_uri": "data:image/png;base64,iVBORw0KGgo=",
            "target_muscle_groups": "chest, triceps"
        }),
        Endpoint::SkipPrediction => json!({
            "behavioral_data": "Works out 3 times a week, skips Mondays.",
            "current_motivation_level": "low",
            "schedule": "Monday, Wednesday, Friday"
        }),
        Endpoint::SmartAssistant => json!({
            "workout_type": "bench press",
            "current_set": 2,
            "rep_count": 10,
            "heart_rate": 120,
            "time_under_tension": 30,
            "weight_lifted": "150 lbs",
            "perceived_exertion": "Challenging but manageable."
        }),
        Endpoint::WorkoutSuggestion => json!({
            "previous_exercises": ["bicep curls"],
            "user_query": "What should I do next?"
        }),
    }
}

fn assert_text_fields_populated(value: &Value) {
    let object = value.as_object().expect("response is an object");
    for (name, field) in object {
        if let Some(text) = field.as_str() {
            assert!(!text.trim().is_empty(), "{} is empty", name);
        }
    }
}

#[tokio::test]
async fn vegetarian_weight_loss_plan_without_credential() {
    let orchestrator = offline();
    let payload = json!({
        "bmi": 22.5,
        "weight_goal": "lose weight",
        "dietary_preferences": "vegetarian"
    });

    let outcome = orchestrator.execute::<DietPlan>(&payload).await.unwrap();

    assert_eq!(outcome.source, ResponseSource::Fallback);
    assert!(outcome.response.diet_plan.contains("Vegetarian"));
    assert!(outcome.response.daily_calorie_target < 2000);
}

#[tokio::test]
async fn easy_set_with_high_reps_without_credential() {
    let orchestrator = offline();
    let payload = json!({
        "perceived_exertion": "too easy",
        "current_set": 1,
        "rep_count": 12
    });

    let response = orchestrator.run::<SmartAssistant>(&payload).await.unwrap();

    assert!(response.intensity_recommendation.to_lowercase().contains("increase"));
    let seconds: u32 = response
        .rest_suggestion
        .split(|c: char| !c.is_ascii_digit())
        .find(|part| !part.is_empty())
        .and_then(|digits| digits.parse().ok())
        .unwrap();
    assert!((60..=90).contains(&seconds));
    assert!(response.motivational_nudge.contains("12"));
}

#[tokio::test]
async fn missing_required_field_is_reported() {
    let orchestrator = offline();
    let payload = json!({"bmi": 22.5, "dietary_preferences": "vegetarian"});

    let err = dispatch(&orchestrator, Endpoint::DietPlan, &payload)
        .await
        .unwrap_err();

    match err {
        DispatchError::Validation(validation) => {
            assert_eq!(validation.fields(), vec!["weight_goal"]);
            assert!(matches!(
                validation.violation("weight_goal"),
                Some(Constraint::Missing)
            ));
            assert!(validation.to_string().contains("weight_goal"));
        }
        other => panic!("expected a validation error, got {other}"),
    }
}

#[tokio::test]
async fn invalid_photo_is_rejected() {
    let orchestrator = offline();
    let mut payload = sample_payload(Endpoint::WorkoutFeedback);
    payload["photo_data_uri"] = json!("https://example.com/squat.jpg");

    let err = dispatch(&orchestrator, Endpoint::WorkoutFeedback, &payload)
        .await
        .unwrap_err();
    assert!(matches!(err, DispatchError::Validation(ref v) if v.fields() == vec!["photo_data_uri"]));
}

#[tokio::test]
async fn every_endpoint_answers_offline_and_deterministically() {
    let orchestrator = offline();

    for endpoint in Endpoint::ALL {
        let payload = sample_payload(endpoint);
        let first = dispatch(&orchestrator, endpoint, &payload).await.unwrap();
        let second = dispatch(&orchestrator, endpoint, &payload).await.unwrap();

        assert_eq!(first, second, "{} is not deterministic", endpoint);
        assert_text_fields_populated(&first);
    }
}

#[tokio::test]
async fn skip_prediction_shape() {
    let orchestrator = offline();
    let response = dispatch(
        &orchestrator,
        Endpoint::SkipPrediction,
        &sample_payload(Endpoint::SkipPrediction),
    )
    .await
    .unwrap();

    assert_eq!(response["skip_prediction"], json!(true));
    assert!(response["adjusted_schedule_suggestion"].is_string());
}

#[tokio::test]
async fn unknown_fields_are_ignored() {
    let orchestrator = offline();
    let mut payload = sample_payload(Endpoint::FoodNutrition);
    payload["serving"] = json!("large");

    let response = dispatch(&orchestrator, Endpoint::FoodNutrition, &payload)
        .await
        .unwrap();
    assert_eq!(response["food_name"], json!("salmon"));
    assert!(response.get("serving").is_none());
}
