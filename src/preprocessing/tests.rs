use super::*;
use serde::Deserialize;
use serde_json::json;

const FIELDS: &[FieldSpec] = &[
    FieldSpec::required(
        "bmi",
        FieldKind::Number {
            min: 10.0,
            max: 80.0,
        },
        "Body mass index",
    ),
    FieldSpec::required("weight_goal", FieldKind::Text, "Weight goal"),
    FieldSpec::optional("user_history", FieldKind::Text, "Diet history"),
    FieldSpec::optional(
        "current_set",
        FieldKind::Integer { min: 1, max: 50 },
        "Set number",
    ),
];

#[derive(Debug, Deserialize)]
struct Sample {
    bmi: f64,
    weight_goal: String,
    #[serde(default)]
    user_history: Option<String>,
    #[serde(default)]
    current_set: Option<u32>,
}

#[test]
fn accepts_valid_payload_and_trims_text() {
    let sample: Sample = parse_request(
        &json!({"bmi": 22.5, "weight_goal": "  lose weight ", "extra": true}),
        FIELDS,
    )
    .unwrap();

    assert_eq!(sample.bmi, 22.5);
    assert_eq!(sample.weight_goal, "lose weight");
    assert!(sample.user_history.is_none());
    assert!(sample.current_set.is_none());
}

#[test]
fn reports_missing_required_field_by_name() {
    let err = validate_payload(&json!({"bmi": 22.5}), FIELDS).unwrap_err();
    assert_eq!(err.fields(), vec!["weight_goal"]);
    assert_eq!(err.violation("weight_goal"), Some(&Constraint::Missing));
    assert!(err.to_string().contains("weight_goal"));
}

#[test]
fn collects_every_violation_in_declaration_order() {
    let err = validate_payload(
        &json!({"bmi": "heavy", "weight_goal": "   ", "current_set": 0}),
        FIELDS,
    )
    .unwrap_err();

    assert_eq!(err.fields(), vec!["bmi", "weight_goal", "current_set"]);
    assert!(matches!(
        err.violation("bmi"),
        Some(Constraint::WrongType {
            expected: "number",
            found: "text"
        })
    ));
    assert_eq!(err.violation("weight_goal"), Some(&Constraint::Empty));
    assert!(matches!(
        err.violation("current_set"),
        Some(Constraint::OutOfRange { .. })
    ));
}

#[test]
fn rejects_out_of_range_number() {
    let err = validate_payload(&json!({"bmi": 95.0, "weight_goal": "gain"}), FIELDS).unwrap_err();
    assert_eq!(
        err.violation("bmi"),
        Some(&Constraint::OutOfRange {
            min: 10.0,
            max: 80.0,
            value: 95.0
        })
    );
}

#[test]
fn null_and_blank_optionals_are_absent() {
    let normalized = validate_payload(
        &json!({"bmi": 20, "weight_goal": "maintain", "user_history": null, "current_set": null}),
        FIELDS,
    )
    .unwrap();
    assert!(!normalized.contains_key("user_history"));

    let normalized = validate_payload(
        &json!({"bmi": 20, "weight_goal": "maintain", "user_history": "  "}),
        FIELDS,
    )
    .unwrap();
    assert!(!normalized.contains_key("user_history"));
}

#[test]
fn integer_fields_reject_fractions_but_accept_whole_floats() {
    let err = validate_payload(
        &json!({"bmi": 20, "weight_goal": "maintain", "current_set": 2.5}),
        FIELDS,
    )
    .unwrap_err();
    assert!(matches!(
        err.violation("current_set"),
        Some(Constraint::WrongType { .. })
    ));

    let sample: Sample = parse_request(
        &json!({"bmi": 20, "weight_goal": "maintain", "current_set": 3.0}),
        FIELDS,
    )
    .unwrap();
    assert_eq!(sample.current_set, Some(3));
}

#[test]
fn non_object_payload_is_rejected() {
    let err = validate_payload(&json!(["bmi"]), FIELDS).unwrap_err();
    assert_eq!(err.fields(), vec!["$"]);
}

#[test]
fn text_lists_must_hold_non_empty_text() {
    let fields = &[FieldSpec::required(
        "previous_exercises",
        FieldKind::TextList,
        "Exercises done",
    )];

    assert!(validate_payload(&json!({"previous_exercises": ["curls", " dips "]}), fields).is_ok());

    let err = validate_payload(&json!({"previous_exercises": []}), fields).unwrap_err();
    assert_eq!(err.violation("previous_exercises"), Some(&Constraint::Empty));

    let err = validate_payload(&json!({"previous_exercises": ["curls", 3]}), fields).unwrap_err();
    assert!(matches!(
        err.violation("previous_exercises"),
        Some(Constraint::WrongType { .. })
    ));

    let err = validate_payload(&json!({"previous_exercises": ["curls", ""]}), fields).unwrap_err();
    assert!(matches!(
        err.violation("previous_exercises"),
        Some(Constraint::Malformed(_))
    ));
}

#[test]
fn image_data_uri_must_be_base64_image() {
    let fields = &[FieldSpec::required(
        "photo_data_uri",
        FieldKind::ImageDataUri,
        "Exercise photo",
    )];

    assert!(validate_payload(
        &json!({"photo_data_uri": "data:image/png;base64,iVBORw0KGgo="}),
        fields
    )
    .is_ok());

    for bad in [
        "https://example.com/squat.jpg",
        "data:image/png,rawbytes",
        "data:image/jpeg;base64,***",
    ] {
        let err = validate_payload(&json!({ "photo_data_uri": bad }), fields).unwrap_err();
        assert!(
            matches!(err.violation("photo_data_uri"), Some(Constraint::Malformed(_))),
            "{bad} should be malformed"
        );
    }
}
