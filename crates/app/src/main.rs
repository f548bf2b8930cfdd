#![forbid(unsafe_code)]

mod runner;
mod sample;

use std::fmt;
use std::io;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use quiz_core::model::Question;
use services::{
    Clock, Difficulty, GenerationService, QuestionProvider, QuizLoopService, QuizRequest,
    StaticQuestionProvider,
};

#[derive(Debug)]
enum ArgsError {
    MissingValue { flag: &'static str },
    UnknownArg(String),
    InvalidCount { raw: String },
    InvalidDifficulty { raw: String },
    MissingTopic,
}

impl fmt::Display for ArgsError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ArgsError::MissingValue { flag } => write!(f, "{flag} requires a value"),
            ArgsError::UnknownArg(arg) => write!(f, "unknown argument: {arg}"),
            ArgsError::InvalidCount { raw } => write!(f, "invalid --count value: {raw}"),
            ArgsError::InvalidDifficulty { raw } => {
                write!(f, "invalid --difficulty value: {raw} (easy|normal|hard)")
            }
            ArgsError::MissingTopic => {
                write!(f, "a topic is required; pass --topic or set QUIZ_TOPIC")
            }
        }
    }
}

impl std::error::Error for ArgsError {}

fn require_value(
    args: &mut impl Iterator<Item = String>,
    flag: &'static str,
) -> Result<String, ArgsError> {
    args.next().ok_or(ArgsError::MissingValue { flag })
}

fn print_usage() {
    eprintln!("Usage:");
    eprintln!("  cargo run -p app -- [--topic <text>] [--count <1-20>]");
    eprintln!("                      [--difficulty easy|normal|hard] [--offline]");
    eprintln!("                      [--file <questions.json>] [--json] [--voice <name>]");
    eprintln!();
    eprintln!("Modes:");
    eprintln!("  default    generate a quiz with the AI provider (needs QUIZ_AI_API_KEY)");
    eprintln!("  --offline  run the builtin quiz");
    eprintln!("  --file     load questions from a JSON array");
    eprintln!();
    eprintln!("Environment:");
    eprintln!("  QUIZ_TOPIC, QUIZ_QUESTION_COUNT        defaults for --topic and --count");
    eprintln!("  QUIZ_AI_API_KEY, QUIZ_AI_BASE_URL, QUIZ_AI_MODEL");
    eprintln!("  QUIZ_AI_SPEECH_MODEL, QUIZ_AI_SPEECH_VOICE, QUIZ_AI_IMAGE_MODEL");
}

struct Args {
    topic: Option<String>,
    count: u8,
    difficulty: Difficulty,
    offline: bool,
    file: Option<PathBuf>,
    json: bool,
    voice: Option<String>,
}

impl Args {
    fn parse(args: &mut impl Iterator<Item = String>) -> Result<Self, ArgsError> {
        let mut topic = std::env::var("QUIZ_TOPIC")
            .ok()
            .filter(|value| !value.trim().is_empty());
        let mut count = std::env::var("QUIZ_QUESTION_COUNT")
            .ok()
            .and_then(|value| value.parse::<u8>().ok())
            .unwrap_or(QuizRequest::DEFAULT_QUESTIONS);
        let mut difficulty = Difficulty::default();
        let mut offline = false;
        let mut file = None;
        let mut json = false;
        let mut voice = None;

        while let Some(arg) = args.next() {
            match arg.as_str() {
                "--topic" => topic = Some(require_value(args, "--topic")?),
                "--count" => {
                    let value = require_value(args, "--count")?;
                    count = value
                        .parse()
                        .map_err(|_| ArgsError::InvalidCount { raw: value })?;
                }
                "--difficulty" => {
                    let value = require_value(args, "--difficulty")?;
                    difficulty = parse_difficulty(&value)?;
                }
                "--offline" => offline = true,
                "--file" => file = Some(PathBuf::from(require_value(args, "--file")?)),
                "--json" => json = true,
                "--voice" => voice = Some(require_value(args, "--voice")?),
                "--help" | "-h" => {
                    print_usage();
                    std::process::exit(0);
                }
                _ => return Err(ArgsError::UnknownArg(arg)),
            }
        }

        Ok(Self {
            topic,
            count,
            difficulty,
            offline,
            file,
            json,
            voice,
        })
    }
}

fn parse_difficulty(raw: &str) -> Result<Difficulty, ArgsError> {
    match raw.to_ascii_lowercase().as_str() {
        "easy" => Ok(Difficulty::Easy),
        "normal" => Ok(Difficulty::Normal),
        "hard" => Ok(Difficulty::Hard),
        _ => Err(ArgsError::InvalidDifficulty {
            raw: raw.to_string(),
        }),
    }
}

fn load_questions(path: &Path) -> Result<Vec<Question>, Box<dyn std::error::Error>> {
    let file = std::fs::File::open(path)?;
    let questions: Vec<Question> = serde_json::from_reader(io::BufReader::new(file))?;
    Ok(questions)
}

async fn run() -> Result<(), Box<dyn std::error::Error>> {
    let mut argv = std::env::args().skip(1);
    let args = Args::parse(&mut argv).map_err(|err| {
        eprintln!("{err}");
        print_usage();
        err
    })?;

    let mut generation = GenerationService::from_env();
    if let Some(voice) = &args.voice {
        generation = generation.with_voice(voice.clone());
    }

    let (provider, topic, count): (Arc<dyn QuestionProvider>, String, u8) =
        if let Some(path) = &args.file {
            let questions = load_questions(path)?;
            log::info!("loaded {} questions from {}", questions.len(), path.display());
            let count = u8::try_from(questions.len()).unwrap_or(u8::MAX);
            let topic = args.topic.clone().unwrap_or_else(|| {
                path.file_stem()
                    .map_or_else(|| "custom quiz".into(), |s| s.to_string_lossy().into_owned())
            });
            (Arc::new(StaticQuestionProvider::new(questions)), topic, count)
        } else if args.offline {
            let topic = args
                .topic
                .clone()
                .unwrap_or_else(|| "general knowledge".into());
            (
                Arc::new(StaticQuestionProvider::new(sample::questions())),
                topic,
                args.count,
            )
        } else {
            if !generation.enabled() {
                eprintln!(
                    "QUIZ_AI_API_KEY is not set; pass --offline or --file <questions.json> \
                     for a local quiz"
                );
                return Err(
                    io::Error::new(io::ErrorKind::InvalidInput, "missing QUIZ_AI_API_KEY").into(),
                );
            }
            let Some(topic) = args.topic.clone() else {
                eprintln!("{}", ArgsError::MissingTopic);
                print_usage();
                return Err(ArgsError::MissingTopic.into());
            };
            (Arc::new(generation.clone()), topic, args.count)
        };

    let mut quiz_loop = QuizLoopService::new(Clock::default_clock(), provider);
    if generation.enabled() {
        quiz_loop = quiz_loop.with_speech(Arc::new(generation.clone()));
    }
    let explainer = generation.enabled().then(|| generation.clone());

    let request = QuizRequest::new(topic, count, args.difficulty);
    let mut session = quiz_loop.start_quiz(&request).await?;

    println!(
        "Topic: {} ({} questions, {})",
        request.topic(),
        session.total_questions(),
        request.difficulty()
    );
    let progress = session.progress();
    if progress.degraded > 0 {
        println!(
            "note: {} of {} questions arrived malformed and can only be skipped",
            progress.degraded, progress.total
        );
    }

    let outcome = runner::run_session(
        &quiz_loop,
        explainer.as_ref(),
        &mut session,
        args.json,
    )
    .await?;
    if outcome.is_none() {
        println!("quiz abandoned");
    }
    Ok(())
}

#[tokio::main]
async fn main() {
    pretty_env_logger::init();
    if let Err(err) = run().await {
        eprintln!("{err}");
        std::process::exit(2);
    }
}
