//! `motivational-fitness-update`: a supportive reply to how the user feels.

use super::first_match;
use crate::engine::{Flow, PromptBuilder, PromptSpec};
use crate::postprocessing::{FieldMap, Layout, OutputField};
use crate::preprocessing::{FieldKind, FieldSpec};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Deserialize)]
pub struct MotivationRequest {
    pub user_message: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MotivationResponse {
    pub motivational_message: String,
    pub personalized_guidance: String,
}

struct MoodEntry {
    keywords: &'static [&'static str],
    message: &'static str,
    guidance: &'static str,
}

// "unmotivated" must be checked before "excited", which lists "motivated".
const MOODS: &[MoodEntry] = &[
    MoodEntry {
        keywords: &["sore", "injur", "pain", "hurt", "ache"],
        message: "Listen to your body. Recovery is part of training, not a break from it.",
        guidance: "Swap today's session for gentle mobility work or a light walk, and see a professional if the pain is sharp or lasts more than a few days.",
    },
    MoodEntry {
        keywords: &["tired", "exhausted", "lazy", "sleepy", "drained", "fatigue"],
        message: "Hey, it's totally okay to feel that way! Some days are just tougher than others. Don't be too hard on yourself.",
        guidance: "How about we just aim for a quick 10-minute walk? Just to get the body moving a little. No pressure!",
    },
    MoodEntry {
        keywords: &["stress", "anxious", "down", "sad", "overwhelm", "depress"],
        message: "That sounds like a lot to carry. Moving your body is one of the kindest things you can do for your mind right now.",
        guidance: "Try 15 minutes of easy cardio or stretching and focus on slow breathing. Keep it about feeling better, not performance.",
    },
    MoodEntry {
        keywords: &["unmotivated", "not motivated", "don't feel like", "dont feel like", "bored", "can't be bothered"],
        message: "Motivation comes and goes, but habits carry you through. You don't have to feel like it to make progress.",
        guidance: "Commit to just the warm-up. If you still want to stop after five minutes, you can, but you probably won't.",
    },
    MoodEntry {
        keywords: &["excited", "great", "pumped", "motivated", "energized", "energised", "happy"],
        message: "Love that energy! Days like this are when real progress happens.",
        guidance: "Channel it into a quality session: warm up properly, then try to beat one number from last week.",
    },
];

const STEADY: MoodEntry = MoodEntry {
    keywords: &[],
    message: "Thanks for checking in! Every session you show up for adds up.",
    guidance: "Stick to your plan today and note one thing that felt better than last time.",
};

pub struct MotivationalUpdate;

impl Flow for MotivationalUpdate {
    type Request = MotivationRequest;
    type Response = MotivationResponse;

    const NAME: &'static str = "motivational-fitness-update";

    const FIELDS: &'static [FieldSpec] = &[FieldSpec::required(
        "user_message",
        FieldKind::Text,
        "how the user feels or what is going on",
    )];

    const OUTPUTS: &'static [OutputField] = &[
        OutputField::primary(
            "motivational_message",
            "MOTIVATIONAL MESSAGE",
            "a friendly, supportive reply to the user's feelings",
        ),
        OutputField::secondary(
            "personalized_guidance",
            "PERSONALIZED GUIDANCE",
            "one short, actionable suggestion for today",
        ),
    ];

    const LAYOUT: Layout = Layout::Sections;

    fn prompt(request: &MotivationRequest) -> PromptSpec {
        PromptBuilder::new("Act as a friendly fitness buddy and respond to the user's message.")
            .fact("User message", format!("\"{}\"", request.user_message))
            .guidance("Keep the tone encouraging, positive and realistic.")
            .build(Self::OUTPUTS, Self::LAYOUT)
    }

    fn fallback(request: &MotivationRequest) -> MotivationResponse {
        let mood = first_match(&request.user_message, MOODS, |m| m.keywords).unwrap_or(&STEADY);

        MotivationResponse {
            motivational_message: mood.message.to_string(),
            personalized_guidance: mood.guidance.to_string(),
        }
    }

    fn assemble(_request: &MotivationRequest, fields: &FieldMap) -> MotivationResponse {
        MotivationResponse {
            motivational_message: fields.text("motivational_message").to_string(),
            personalized_guidance: fields.text("personalized_guidance").to_string(),
        }
    }
}
