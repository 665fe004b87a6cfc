//! Re-usable prompt skeletons.

pub fn base_system() -> &'static str {
    r#"You are an encouraging, knowledgeable fitness and nutrition coach. Give practical advice that is safe for a general audience and specific to the details below."#
}

pub fn coach_system(task: &str) -> String {
    format!("{}\n\nTask: {}", base_system(), task)
}

pub fn sections_instruction() -> &'static str {
    "Answer in plain text using exactly the sections below, in this order. Start each section on its own line as `LABEL: text`, using the label exactly as written."
}

pub fn keywords_instruction() -> &'static str {
    "Answer with one short line per item below, in this order. Start each line with the item name followed by a colon."
}
