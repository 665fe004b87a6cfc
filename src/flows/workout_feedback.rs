//! `personalized-workout-feedback`: form and rep cues for an exercise photo.
//!
//! The backend receives text only, so the photo is summarized in the prompt
//! by its media type and approximate size.

use super::first_match;
use crate::engine::{Flow, PromptBuilder, PromptSpec};
use crate::postprocessing::{FieldMap, Layout, OutputField};
use crate::preprocessing::{FieldKind, FieldSpec};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Deserialize)]
pub struct WorkoutFeedbackRequest {
    pub workout_type: String,
    pub photo_data_uri: String,
    pub target_muscle_groups: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WorkoutFeedbackResponse {
    pub form_feedback: String,
    pub rep_feedback: String,
    pub performance_score: u8,
    pub motivational_message: String,
}

struct ExerciseEntry {
    keywords: &'static [&'static str],
    form: &'static str,
    reps: &'static str,
    score: u8,
}

// Lunges come first so "lunge squat" combos get lunge cues.
const EXERCISES: &[ExerciseEntry] = &[
    ExerciseEntry {
        keywords: &["lunge"],
        form: "Keep your front knee over your ankle and lower the back knee straight down. Stay tall through the torso.",
        reps: "Match the rep count on both legs and pause briefly at the bottom of each rep.",
        score: 82,
    },
    ExerciseEntry {
        keywords: &["squat"],
        form: "Push your knees out over your toes, keep your chest up and sit back until your thighs reach parallel.",
        reps: "Control the descent for two seconds and drive up evenly. Stop the set when depth starts to shrink.",
        score: 84,
    },
    ExerciseEntry {
        keywords: &["deadlift", "rdl"],
        form: "Keep the bar close to your shins, hinge at the hips with a neutral spine and brace before every pull.",
        reps: "Reset your grip and brace between reps rather than bouncing the weight off the floor.",
        score: 80,
    },
    ExerciseEntry {
        keywords: &["bench", "chest press"],
        form: "Retract your shoulder blades, keep your feet planted and lower the bar to mid-chest with elbows at about 45 degrees.",
        reps: "Use a steady tempo and keep the bar path consistent on every rep.",
        score: 83,
    },
    ExerciseEntry {
        keywords: &["push-up", "push up", "pushup", "press-up"],
        form: "Hold a straight line from head to heels and keep your elbows tucked at about 45 degrees.",
        reps: "Touch the same depth every rep. Switch to an incline once your hips start to sag.",
        score: 86,
    },
    ExerciseEntry {
        keywords: &["plank"],
        form: "Stack your shoulders over your elbows, squeeze your glutes and keep your hips level with your shoulders.",
        reps: "Quality beats duration. End the hold as soon as your lower back starts to arch.",
        score: 88,
    },
    ExerciseEntry {
        keywords: &["pull-up", "pull up", "pullup", "chin-up", "chin up"],
        form: "Start from a dead hang, pull your shoulder blades down first and bring your chest toward the bar.",
        reps: "Full range on every rep. Use a band rather than half reps when you tire.",
        score: 81,
    },
    ExerciseEntry {
        keywords: &["row"],
        form: "Keep a flat back, lead with your elbows and squeeze your shoulder blades together at the top.",
        reps: "Avoid using momentum. Pause for a second at the top of each rep.",
        score: 85,
    },
];

const GENERIC: ExerciseEntry = ExerciseEntry {
    keywords: &[],
    form: "Keep your back straight and engage your core.",
    reps: "Good consistency in your reps. Maintain this form throughout.",
    score: 85,
};

const GENERIC_MESSAGE: &str = "Great job! You're doing amazing. Keep it up!";

/// Media type and approximate decoded size of a `data:` URI.
fn describe_photo(uri: &str) -> String {
    let media_type = uri
        .strip_prefix("data:")
        .and_then(|rest| rest.split(';').next())
        .unwrap_or("image");
    let encoded = uri.split_once(',').map_or(0, |(_, payload)| payload.len());
    let kib = (encoded * 3 / 4 + 1023) / 1024;
    format!("{} photo, about {} KiB (not shown)", media_type, kib)
}

pub struct WorkoutFeedback;

impl Flow for WorkoutFeedback {
    type Request = WorkoutFeedbackRequest;
    type Response = WorkoutFeedbackResponse;

    const NAME: &'static str = "personalized-workout-feedback";

    const FIELDS: &'static [FieldSpec] = &[
        FieldSpec::required("workout_type", FieldKind::Text, "the exercise performed"),
        FieldSpec::required(
            "photo_data_uri",
            FieldKind::ImageDataUri,
            "a photo of the user mid-exercise",
        ),
        FieldSpec::required(
            "target_muscle_groups",
            FieldKind::Text,
            "the muscles the exercise targets",
        ),
    ];

    const OUTPUTS: &'static [OutputField] = &[
        OutputField::primary(
            "form_feedback",
            "FORM FEEDBACK",
            "specific corrections and cues for the user's form",
        ),
        OutputField::secondary(
            "rep_feedback",
            "REP FEEDBACK",
            "feedback on repetition count and consistency",
        ),
        OutputField::secondary(
            "performance_score",
            "PERFORMANCE SCORE",
            "one whole number from 0 to 100",
        ),
        OutputField::secondary(
            "motivational_message",
            "MOTIVATION",
            "a short encouraging message",
        ),
    ];

    const LAYOUT: Layout = Layout::Sections;

    fn prompt(request: &WorkoutFeedbackRequest) -> PromptSpec {
        PromptBuilder::new("Give personalized feedback on the user's exercise form and reps.")
            .fact("Exercise", &request.workout_type)
            .fact("Target muscle groups", &request.target_muscle_groups)
            .fact("Photo", describe_photo(&request.photo_data_uri))
            .guidance("Base the feedback on the most common form faults for this exercise.")
            .build(Self::OUTPUTS, Self::LAYOUT)
    }

    fn fallback(request: &WorkoutFeedbackRequest) -> WorkoutFeedbackResponse {
        let exercise = first_match(&request.workout_type, EXERCISES, |e| e.keywords);

        let motivational_message = match exercise {
            Some(_) => format!(
                "Great job! Every clean rep is building your {}. Keep it up!",
                request.target_muscle_groups
            ),
            None => GENERIC_MESSAGE.to_string(),
        };
        let exercise = exercise.unwrap_or(&GENERIC);

        WorkoutFeedbackResponse {
            form_feedback: exercise.form.to_string(),
            rep_feedback: exercise.reps.to_string(),
            performance_score: exercise.score,
            motivational_message,
        }
    }

    fn assemble(request: &WorkoutFeedbackRequest, fields: &FieldMap) -> WorkoutFeedbackResponse {
        let performance_score = match fields.integer("performance_score", 0..=100) {
            Some(score) => score as u8,
            None => Self::fallback(request).performance_score,
        };

        WorkoutFeedbackResponse {
            form_feedback: fields.text("form_feedback").to_string(),
            rep_feedback: fields.text("rep_feedback").to_string(),
            performance_score,
            motivational_message: fields.text("motivational_message").to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::postprocessing::decompose;

    const PHOTO: &str = "data:image/jpeg;base64,/9j/4AAQSkZJRgABAQAAAQABAAD/2wBDAAgGBgcGBQgHBwcJCQgKDBQNDAsLDBkSEw8UHRofHh0aHBwgJC4nICIsIxwcKDcpLDAxNDQ0Hyc5PTgyPC4zNDL/";

    fn request(workout: &str) -> WorkoutFeedbackRequest {
        WorkoutFeedbackRequest {
            workout_type: workout.to_string(),
            photo_data_uri: PHOTO.to_string(),
            target_muscle_groups: "quads, glutes".to_string(),
        }
    }

    #[test]
    fn squat_cues_and_score() {
        let response = WorkoutFeedback::fallback(&request("Back Squats"));
        assert!(response.form_feedback.contains("thighs reach parallel"));
        assert_eq!(response.performance_score, 84);
        assert!(response.motivational_message.contains("quads, glutes"));
    }

    #[test]
    fn lunge_wins_over_squat() {
        let response = WorkoutFeedback::fallback(&request("lunge to squat combo"));
        assert_eq!(response.performance_score, 82);
    }

    #[test]
    fn unknown_exercise_gets_generic_feedback() {
        let response = WorkoutFeedback::fallback(&request("kettlebell swing"));
        assert_eq!(
            response,
            WorkoutFeedbackResponse {
                form_feedback: "Keep your back straight and engage your core.".to_string(),
                rep_feedback: "Good consistency in your reps. Maintain this form throughout."
                    .to_string(),
                performance_score: 85,
                motivational_message: GENERIC_MESSAGE.to_string(),
            }
        );
    }

    #[test]
    fn prompt_describes_photo_without_embedding_it() {
        let spec = WorkoutFeedback::prompt(&request("squats"));
        assert!(spec.text.contains("Photo: image/jpeg photo, about 1 KiB (not shown)"));
        assert!(!spec.text.contains("base64"));
    }

    #[test]
    fn assemble_uses_backend_score_when_in_range() {
        let raw = "FORM FEEDBACK: Knees caving in.\nREP FEEDBACK: Solid.\nPERFORMANCE SCORE: 72/100\nMOTIVATION: Nice!";
        let fields = decompose(raw, WorkoutFeedback::OUTPUTS, WorkoutFeedback::LAYOUT).unwrap();
        let response = WorkoutFeedback::assemble(&request("squat"), &fields);
        assert_eq!(response.performance_score, 72);
        assert_eq!(response.form_feedback, "Knees caving in.");

        let raw = "FORM FEEDBACK: Fine.\nPERFORMANCE SCORE: excellent";
        let fields = decompose(raw, WorkoutFeedback::OUTPUTS, WorkoutFeedback::LAYOUT).unwrap();
        assert_eq!(WorkoutFeedback::assemble(&request("squat"), &fields).performance_score, 84);
    }
}
