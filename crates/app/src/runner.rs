//! Terminal answer loop: renders the current question, maps learner input
//! onto session transitions, and prints the closing report.

use std::io::{self, BufRead, Write};

use quiz_core::model::{Question, QuestionKind, ScoreReport};
use services::{AdvanceOutcome, GenerationService, QuizLoopService, QuizSession, SessionError};

const COMMANDS: &str = "\
commands:
  1..9       select an option
  <text>     draft a short answer
  :check     freeze the answer and reveal the solution
  :yes :no   self-assess a revealed short answer
  :prev      revisit the previous question
  :next      advance (finishes the quiz on the last question)
  :passage   save the narration audio next to this file
  :explain   ask the AI collaborator to expand on the answer
  :image     save an illustration for this question
  :help      show this list
  :quit      abandon the quiz";

//
// ─── COMMAND PARSING ───────────────────────────────────────────────────────────
//

/// One line of learner input, before kind-aware dispatch.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Select(usize),
    Text(String),
    Check,
    Assess(bool),
    Prev,
    Next,
    Passage,
    Explain,
    Image,
    Help,
    Quit,
    Noop,
}

#[must_use]
pub fn parse_command(input: &str) -> Command {
    let trimmed = input.trim();
    match trimmed {
        "" => Command::Noop,
        ":check" => Command::Check,
        ":yes" => Command::Assess(true),
        ":no" => Command::Assess(false),
        ":prev" => Command::Prev,
        ":next" => Command::Next,
        ":passage" => Command::Passage,
        ":explain" => Command::Explain,
        ":image" => Command::Image,
        ":help" => Command::Help,
        ":quit" | ":q" => Command::Quit,
        _ => match trimmed.parse::<usize>() {
            Ok(n) => Command::Select(n),
            Err(_) => Command::Text(trimmed.to_string()),
        },
    }
}

//
// ─── RENDERING ─────────────────────────────────────────────────────────────────
//

fn render_question(session: &QuizSession) -> String {
    let question = session.current_question();
    let mut out = String::new();
    out.push_str(&format!(
        "\nQuestion {}/{} [{}]\n",
        session.current_index() + 1,
        session.total_questions(),
        question.kind
    ));

    if let Some(reason) = session.degradation() {
        out.push_str(&format!("  {}\n", question.text));
        out.push_str(&format!("  (unanswerable: {reason}; :next to skip)\n"));
        return out;
    }

    if let Some(passage) = &question.passage {
        out.push_str(&format!("  | {passage}\n"));
        if let Some(translation) = &question.passage_translation {
            out.push_str(&format!("  | ({translation})\n"));
        }
    }

    out.push_str(&format!("  {}\n", question.text));
    for (i, option) in question.options.iter().enumerate() {
        let marker = if session.current_answer() == Some(option.as_str()) {
            " *"
        } else {
            ""
        };
        out.push_str(&format!("    {}) {option}{marker}\n", i + 1));
    }

    if session.is_checked() {
        match session.current_verdict() {
            Some(true) => out.push_str("  correct!\n"),
            Some(false) => out.push_str(&format!("  wrong. answer: {}\n", question.answer)),
            None => out.push_str(&format!(
                "  your answer: {}\n  expected: {}\n  were you right? :yes or :no\n",
                session.current_answer().unwrap_or(""),
                question.answer
            )),
        }
        if !question.explanation.is_empty() {
            out.push_str(&format!("  note: {}\n", question.explanation));
        }
    } else if question.kind == QuestionKind::ShortAnswer {
        if session.current_draft().is_empty() {
            out.push_str("  (type your answer, then :check)\n");
        } else {
            out.push_str(&format!(
                "  draft: {}\n  (:check to grade)\n",
                session.current_draft()
            ));
        }
    } else {
        out.push_str(&format!(
            "  (pick an option 1-{}, then :check)\n",
            question.options.len()
        ));
    }
    out
}

fn render_report(questions: &[Question], report: &ScoreReport) -> String {
    let mut out = String::new();
    out.push_str("\nQuiz complete!\n");
    out.push_str(&format!(
        "Score: {:.1}% ({} of {} correct)\n",
        report.score_percentage(),
        report.correct_count(),
        report.total_count()
    ));
    out.push_str(&format!(
        "Time: {}s\n",
        report.duration().num_seconds().max(0)
    ));
    for (i, question) in questions.iter().enumerate() {
        let verdict = report.correctness().get(i).copied().flatten();
        let status = match verdict {
            Some(true) => "correct",
            Some(false) => "wrong",
            None => "unresolved",
        };
        let answer = report
            .user_answers()
            .get(i)
            .cloned()
            .flatten()
            .unwrap_or_else(|| "(no answer)".into());
        out.push_str(&format!("  {}. {status:<10} {answer}\n", i + 1));
        if verdict == Some(false) {
            out.push_str(&format!("     expected: {}\n", question.answer));
        }
    }
    out
}

fn report_outcome(result: Result<(), SessionError>, session: &QuizSession) {
    match result {
        Ok(()) => print!("{}", render_question(session)),
        Err(err) => println!("{err}"),
    }
}

//
// ─── ANSWER LOOP ───────────────────────────────────────────────────────────────
//

/// Drive the session over stdin until it completes or the learner quits.
///
/// Returns the report when the quiz ran to completion, `None` on quit or
/// end of input.
///
/// # Errors
///
/// Returns an error only for I/O failures; rejected transitions and
/// collaborator failures are reported inline and the loop continues.
pub async fn run_session(
    quiz_loop: &QuizLoopService,
    explainer: Option<&GenerationService>,
    session: &mut QuizSession,
    json_report: bool,
) -> Result<Option<ScoreReport>, Box<dyn std::error::Error>> {
    let stdin = io::stdin();
    let mut stdout = io::stdout();
    println!("{COMMANDS}");
    print!("{}", render_question(session));

    let mut line = String::new();
    loop {
        print!("> ");
        stdout.flush()?;
        line.clear();
        if stdin.lock().read_line(&mut line)? == 0 {
            println!();
            return Ok(None);
        }

        match parse_command(&line) {
            Command::Noop => {}
            Command::Help => println!("{COMMANDS}"),
            Command::Quit => return Ok(None),
            Command::Select(n) => {
                if session.current_question().kind == QuestionKind::ShortAnswer {
                    // Digits are a legitimate short answer.
                    report_outcome(session.set_draft(line.trim()), session);
                } else {
                    let options = &session.current_question().options;
                    if n == 0 || n > options.len() {
                        println!("pick an option between 1 and {}", options.len());
                    } else {
                        let choice = options[n - 1].clone();
                        report_outcome(session.select_option(&choice), session);
                    }
                }
            }
            Command::Text(text) => {
                if session.current_question().kind == QuestionKind::ShortAnswer {
                    report_outcome(session.set_draft(&text), session);
                } else {
                    println!("pick an option number, or :help for commands");
                }
            }
            Command::Check => report_outcome(session.check_answer(), session),
            Command::Assess(correct) => report_outcome(session.self_assess(correct), session),
            Command::Prev => {
                if session.go_prev() {
                    print!("{}", render_question(session));
                } else {
                    println!("already at the first question");
                }
            }
            Command::Next => match quiz_loop.advance(session) {
                Ok(AdvanceOutcome::Continue) => print!("{}", render_question(session)),
                Ok(AdvanceOutcome::Completed(report)) => {
                    if json_report {
                        println!("{}", serde_json::to_string_pretty(&report)?);
                    } else {
                        print!("{}", render_report(session.questions(), &report));
                    }
                    return Ok(Some(report));
                }
                Err(err) => println!("{err}"),
            },
            Command::Passage => match quiz_loop.passage_audio(session).await {
                Ok(clip) => {
                    let path = format!("quiz-narration-{}.mp3", session.current_index() + 1);
                    std::fs::write(&path, &clip.bytes)?;
                    println!("saved narration to {path}");
                }
                Err(err) => println!("{err}"),
            },
            Command::Explain => {
                if !session.is_checked() {
                    println!("check your answer first");
                } else if let Some(service) = explainer {
                    match service.explain_answer(session.current_question()).await {
                        Ok(text) => println!("{text}"),
                        Err(err) => println!("{err}"),
                    }
                } else {
                    println!("explanations need the AI collaborator (set QUIZ_AI_API_KEY)");
                }
            }
            Command::Image => {
                let prompt = session.current_question().image_prompt.clone();
                match (prompt, explainer) {
                    (None, _) => println!("this question has no illustration prompt"),
                    (_, None) => {
                        println!("illustrations need the AI collaborator (set QUIZ_AI_API_KEY)");
                    }
                    (Some(prompt), Some(service)) => match service.illustrate(&prompt).await {
                        Ok(bytes) => {
                            let path =
                                format!("quiz-illustration-{}.png", session.current_index() + 1);
                            std::fs::write(&path, &bytes)?;
                            println!("saved illustration to {path}");
                        }
                        Err(err) => println!("{err}"),
                    },
                }
            }
        }
    }
}

//
// ─── TESTS ─────────────────────────────────────────────────────────────────────
//
