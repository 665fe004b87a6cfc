use super::*;

const PLAN_OUTPUTS: &[OutputField] = &[
    OutputField::primary("diet_plan", "DIET PLAN", "the plan"),
    OutputField::secondary("grocery_list", "GROCERY LIST", "the list"),
    OutputField::secondary("nutritional_information", "NUTRITIONAL INFORMATION", "the info"),
];

const FOOD_OUTPUTS: &[OutputField] = &[
    OutputField::primary("calories", "Calories", "energy").keywords(&["calorie", "kcal"]),
    OutputField::secondary("protein", "Protein", "protein").keywords(&["protein"]),
    OutputField::secondary("carbs", "Carbohydrates", "carbs").keywords(&["carb", "sugar"]),
    OutputField::secondary("fats", "Fat", "fat").keywords(&["fat"]),
];

#[test]
fn clean_strips_code_fences() {
    assert_eq!(formatter::clean("```\nhello\n```"), "hello");
    assert_eq!(formatter::clean("```text\nDIET PLAN: oats\n```"), "DIET PLAN: oats");
    assert_eq!(formatter::clean("  plain  "), "plain");
}

#[test]
fn truncate_marks_cut_text() {
    assert_eq!(formatter::truncate("short", 10), "short");
    assert_eq!(formatter::truncate("abcdefghij", 4), "abcd...");
    assert_eq!(formatter::truncate("éééé", 2), "éé...");
}

#[test]
fn routes_labeled_sections_to_fields() {
    let raw = "DIET PLAN: Oats for breakfast, lentil curry for lunch.\n\
               GROCERY LIST: oats, lentils, spinach\n\
               NUTRITIONAL INFORMATION: About 1500 kcal, 80g protein.";

    let fields = decompose(raw, PLAN_OUTPUTS, Layout::Sections).unwrap();

    assert_eq!(
        fields.text("diet_plan"),
        "Oats for breakfast, lentil curry for lunch."
    );
    assert_eq!(fields.text("grocery_list"), "oats, lentils, spinach");
    assert_eq!(
        fields.text("nutritional_information"),
        "About 1500 kcal, 80g protein."
    );
    assert!(fields.iter().all(|f| f.origin == Origin::Extracted));
}

#[test]
fn matches_decorated_labels_case_insensitively() {
    let raw = "## Diet Plan\nEat more greens.\n\n\
               **Grocery List:**\n- kale\n- tofu\n\n\
               3. nutritional information: balanced macros";

    let fields = decompose(raw, PLAN_OUTPUTS, Layout::Sections).unwrap();

    assert_eq!(fields.text("diet_plan"), "Eat more greens.");
    assert_eq!(fields.text("grocery_list"), "- kale\n- tofu");
    assert_eq!(fields.text("nutritional_information"), "balanced macros");
}

#[test]
fn sections_out_of_order_are_still_routed() {
    let raw = "GROCERY LIST: rice\nDIET PLAN: rice bowls";
    let fields = decompose(raw, PLAN_OUTPUTS, Layout::Sections).unwrap();

    assert_eq!(fields.text("diet_plan"), "rice bowls");
    assert_eq!(fields.text("grocery_list"), "rice");
    assert_eq!(
        fields.origin("nutritional_information"),
        Some(Origin::Placeholder)
    );
}

#[test]
fn unlabeled_text_falls_back_to_prefix_and_placeholder() {
    let raw = "Eat lots of vegetables and drink water.";
    let fields = decompose(raw, PLAN_OUTPUTS, Layout::Sections).unwrap();

    assert_eq!(fields.text("diet_plan"), raw);
    assert_eq!(fields.origin("diet_plan"), Some(Origin::RawPrefix));
    assert_eq!(fields.text("grocery_list"), PLACEHOLDER);
    assert_eq!(fields.text("nutritional_information"), PLACEHOLDER);
    assert!(fields.iter().all(|f| !f.text.is_empty()));
}

#[test]
fn long_unlabeled_text_is_truncated_for_primary_field() {
    let raw = "word ".repeat(200);
    let fields = decompose(&raw, PLAN_OUTPUTS, Layout::Sections).unwrap();

    let plan = fields.text("diet_plan");
    assert!(plan.ends_with("..."));
    assert!(plan.chars().count() <= PREFIX_CHARS + 3);
}

#[test]
fn empty_labeled_sections_use_placeholder_policy() {
    let raw = "DIET PLAN:\nGROCERY LIST:\nNUTRITIONAL INFORMATION:";
    let fields = decompose(raw, PLAN_OUTPUTS, Layout::Sections).unwrap();

    assert_eq!(fields.origin("diet_plan"), Some(Origin::RawPrefix));
    assert_eq!(fields.text("grocery_list"), PLACEHOLDER);
}

#[test]
fn blank_text_has_no_usable_content() {
    assert!(decompose("   \n ", PLAN_OUTPUTS, Layout::Sections).is_none());
    assert!(decompose("```\n```", PLAN_OUTPUTS, Layout::Sections).is_none());
}

#[test]
fn json_objects_are_read_by_field_name() {
    let raw = "```json\n{\"diet_plan\": \"Tofu scramble\", \"grocery_list\": \"tofu\"}\n```";
    let fields = decompose(raw, PLAN_OUTPUTS, Layout::Sections).unwrap();

    assert_eq!(fields.text("diet_plan"), "Tofu scramble");
    assert_eq!(fields.text("grocery_list"), "tofu");
    assert_eq!(fields.text("nutritional_information"), PLACEHOLDER);
}

#[test]
fn keyword_lines_populate_first_matching_field() {
    let raw = "Apple, one medium\n\
               Calories: 95 kcal\n\
               Protein: 0.5g\n\
               Carbohydrates: 25g (19g sugar)\n\
               Fat: 0.3g\n\
               Calories from fat: 3 kcal";

    let fields = decompose(raw, FOOD_OUTPUTS, Layout::Keywords).unwrap();

    assert_eq!(fields.text("calories"), "95 kcal");
    assert_eq!(fields.text("protein"), "0.5g");
    assert_eq!(fields.text("carbs"), "25g (19g sugar)");
    assert_eq!(fields.text("fats"), "0.3g");
}

#[test]
fn keyword_line_claimed_by_populated_field_is_ignored() {
    // The second line mentions "fat" but "calorie" is checked first.
    let raw = "Calories: 200 kcal\nCalories from fat: 90";
    let fields = decompose(raw, FOOD_OUTPUTS, Layout::Keywords).unwrap();

    assert_eq!(fields.text("calories"), "200 kcal");
    assert_eq!(fields.text("fats"), PLACEHOLDER);
}

#[test]
fn reads_integers_and_flags_from_extracted_text() {
    const OUTPUTS: &[OutputField] = &[
        OutputField::primary("nudge", "NUDGE", "nudge"),
        OutputField::secondary("skip", "SKIP", "yes or no"),
        OutputField::secondary("calories", "CALORIES", "number"),
    ];

    let fields = decompose(
        "NUDGE: go\nSKIP: Not likely.\nCALORIES: about 1,850 kcal",
        OUTPUTS,
        Layout::Sections,
    )
    .unwrap();
    assert_eq!(fields.flag("skip"), Some(false));
    assert_eq!(fields.integer("calories", 1200..=4000), Some(1850));
    assert_eq!(fields.integer("calories", 0..=1000), None);

    let fields = decompose("NUDGE: go\nSKIP: Yes, likely", OUTPUTS, Layout::Sections).unwrap();
    assert_eq!(fields.flag("skip"), Some(true));
    assert_eq!(fields.integer("calories", 0..=5000), None);
}

#[test]
fn negation_in_the_deciding_clause_wins() {
    const OUTPUTS: &[OutputField] = &[OutputField::primary("skip", "SKIP", "yes or no")];
    let flag = |raw: &str| decompose(raw, OUTPUTS, Layout::Sections).unwrap().flag("skip");

    assert_eq!(flag("SKIP: The user will not skip."), Some(false));
    assert_eq!(flag("SKIP: Likely to train, won't skip."), Some(false));
    assert_eq!(flag("SKIP: The user will probably skip."), Some(true));
    assert_eq!(flag("SKIP: Hard to say. Yes, probably."), Some(true));
    assert_eq!(flag("SKIP: The user will skip."), None);
}
