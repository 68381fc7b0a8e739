//! Bundled content shown before the backend answers or when it is unreachable.

use crate::model::{Course, Profile, QuizQuestion, Unit};

pub const DEFAULT_COURSE_TITLE: &str = "My Adaptive Course";

/// Icon + title + blurb card used on the landing and profile pages.
#[derive(Debug, Clone, PartialEq)]
pub struct InfoCard {
    pub title: String,
    pub description: String,
    pub icon: String,
}

impl InfoCard {
    fn new(title: impl Into<String>, description: impl Into<String>, icon: &str) -> Self {
        Self {
            title: title.into(),
            description: description.into(),
            icon: icon.to_string(),
        }
    }
}

pub fn features() -> Vec<InfoCard> {
    vec![
        InfoCard::new(
            "Focus",
            "Pinpoint attention patterns and keep your sessions sharp.",
            "\u{1F3AF}",
        ),
        InfoCard::new(
            "Adapt",
            "Content that flexes with your rhythm and energy.",
            "\u{1F9E0}",
        ),
        InfoCard::new(
            "Dynamic Content",
            "Micro-units surface at the right moment for retention.",
            "\u{26A1}",
        ),
    ]
}

/// Questions used when `GET /quiz` fails. They carry no correct answers.
pub fn fallback_questions() -> Vec<QuizQuestion> {
    vec![
        QuizQuestion::new("Sequence: 2, 4, 8, 16... Next?", &["18", "24", "30", "32"], None),
        QuizQuestion::new(
            "Choose the pair that best completes the analogy: Neuron is to brain as pixel is to ___",
            &["Monitor", "Image", "Color", "Cable"],
            None,
        ),
        QuizQuestion::new(
            "Pick the strongest indicator of focused study habits:",
            &[
                "Long sessions without breaks",
                "Regular spaced reviews",
                "All-night cramming",
                "Reading without notes",
            ],
            None,
        ),
    ]
}

/// Profile used when no quiz result was handed off.
pub fn default_profile() -> Profile {
    Profile {
        level: "Intermediate".to_string(),
        units: 7,
        desc: "Balanced".to_string(),
        efficiency: 0.0,
    }
}

/// The three trait cards shown on the profile page.
pub fn profile_traits(profile: &Profile) -> Vec<InfoCard> {
    vec![
        InfoCard::new(format!("{} Level", profile.level), "Tailored rigor", "\u{1F4DA}"),
        InfoCard::new(format!("{} Units", profile.units), "Balanced cadence", "\u{1F5C2}\u{FE0F}"),
        InfoCard::new(format!("{} Complexity", profile.desc), "Concept first", "\u{1F9ED}"),
    ]
}

/// Course rendered on the results page when nothing was generated yet.
pub fn example_course() -> Course {
    let unit = |title: &str, content: &str, objective: &str| Unit {
        title: title.to_string(),
        content: content.to_string(),
        objectives: vec![objective.to_string()],
        icon: Some("\u{1F4D8}".to_string()),
        quiz_questions: Vec::new(),
    };

    Course {
        title: "Introduction to Cognitive Science".to_string(),
        description: Some(
            "A foundational course adapted for intermediate learners, focusing on attention, \
             memory, and decision-making."
                .to_string(),
        ),
        level: Some("Intermediate".to_string()),
        language: Some("en".to_string()),
        units: vec![
            unit(
                "Unit 1: Fundamentals of Attention",
                "Attention is a cognitive process that redirects awareness to prioritize sensory input, memory, and reasoning.",
                "Define key attention mechanisms.",
            ),
            unit(
                "Unit 2: Memory Systems",
                "Human memory blends short-term buffers with long-term stores that retain concepts, patterns, and schemas.",
                "Differentiate between short-term and long-term memory.",
            ),
            unit(
                "Unit 3: Decision Making Models",
                "Normative and descriptive models explore how we choose under uncertainty, incentives, and cognitive limits.",
                "Apply basic decision-making frameworks.",
            ),
            unit(
                "Unit 4: Cognitive Biases",
                "Biases shift perception and choices, but surfacing them early improves strategy, negotiation, and empathy.",
                "Spot and neutralize common biases.",
            ),
        ],
    }
}
