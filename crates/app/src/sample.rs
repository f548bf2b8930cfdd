use quiz_core::model::{Question, QuestionKind};

/// Builtin quiz served when the AI provider is not in play.
pub fn questions() -> Vec<Question> {
    vec![
        Question::new(
            QuestionKind::MultipleChoice,
            "Which planet is known as the red planet?",
            vec![
                "Mars".into(),
                "Venus".into(),
                "Jupiter".into(),
                "Mercury".into(),
            ],
            "Mars",
            "Iron oxide dust on the surface gives Mars its reddish color.",
        ),
        Question::new(
            QuestionKind::Ox,
            "Sound travels faster in water than in air.",
            vec!["O".into(), "X".into()],
            "O",
            "Water is denser, so sound moves roughly four times faster in it.",
        )
        .with_passage(
            "A whale's call can carry for hundreds of kilometers under the sea, \
             far beyond what any shout could manage in open air.",
        )
        .with_audio_script(
            "Listen: a whale's call can carry for hundreds of kilometers under the sea.",
        )
        .with_image_prompt("A whale singing beneath the ocean surface, soft light from above"),
        Question::new(
            QuestionKind::ShortAnswer,
            "Name the largest ocean on Earth.",
            Vec::new(),
            "Pacific",
            "The Pacific covers about a third of the planet's surface.",
        ),
        Question::new(
            QuestionKind::MultipleChoice,
            "What is the chemical symbol for gold?",
            vec!["Au".into(), "Ag".into(), "Gd".into(), "Go".into()],
            "Au",
            "From the Latin aurum.",
        ),
        Question::new(
            QuestionKind::ShortAnswer,
            "In which year did the first person walk on the moon?",
            Vec::new(),
            "1969",
            "Apollo 11 landed on July 20, 1969.",
        ),
    ]
}
