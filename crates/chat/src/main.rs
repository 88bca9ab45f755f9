use std::io::{self, BufRead};
use std::process::ExitCode;
use std::sync::Arc;

use edubot::chat::{
    MessageView, ScrollTracker, SessionController, SessionEvent, SubmitOutcome, TRUNCATION_THRESHOLD,
    TranscriptView, project, speaker_label,
};
use edubot::config::endpoint_config_from_env;
use edubot::theme::ThemeMode;
use edubot_llm::{AgentEndpoint, PracticeQuestion, StudyPrompt, create_endpoint, practice_prompt};

/// Terminal stand-in for the presentation layer.
///
/// All state transitions live in the session controller; this shell only
/// reads lines, forwards them, and renders projections.
#[tokio::main]
async fn main() -> ExitCode {
    tracing_subscriber::fmt::init();

    let Some(config) = endpoint_config_from_env() else {
        eprintln!("OPENAI_API_KEY is not set; cannot reach the chat endpoint.");
        return ExitCode::FAILURE;
    };

    let endpoint = match create_endpoint(config) {
        Ok(endpoint) => endpoint,
        Err(error) => {
            tracing::error!(error = %error, "failed to initialize the chat endpoint");
            return ExitCode::FAILURE;
        }
    };

    tracing::info!(
        endpoint_id = endpoint.id(),
        model = endpoint.model(),
        "chat endpoint ready"
    );

    run_shell(endpoint).await;
    ExitCode::SUCCESS
}

async fn run_shell(endpoint: Arc<dyn AgentEndpoint>) {
    let mut controller = SessionController::new();
    let mut theme = ThemeMode::default();
    let mut scroll = ScrollTracker::new();

    render(&project(controller.transcript(), controller.state(), theme));
    println!(
        "(commands: /theme, /expand <n>, /ask <subject> <topic> <difficulty> <question...>, \
        /quiz <subject> <topic> <difficulty>, /quit)"
    );

    let stdin = io::stdin();
    for line in stdin.lock().lines() {
        let Ok(line) = line else {
            break;
        };
        let input = line.trim();

        match input {
            "/quit" => break,
            "/theme" => {
                theme = theme.toggled();
                println!("theme: {}", theme.name());
                continue;
            }
            _ if input.starts_with("/expand") => {
                handle_expand(&mut controller, input);
                render(&project(controller.transcript(), controller.state(), theme));
                continue;
            }
            _ if input.starts_with("/ask") => {
                handle_ask(endpoint.as_ref(), input).await;
                continue;
            }
            _ if input.starts_with("/quiz") => {
                handle_quiz(endpoint.as_ref(), input).await;
                continue;
            }
            _ => {}
        }

        let SubmitOutcome::Dispatched(request) = controller.submit(input) else {
            continue;
        };

        drain_events(&mut controller, &mut scroll);
        render(&project(controller.transcript(), controller.state(), theme));

        // The single suspension point: the request runs to completion or
        // failure, with no timeout and no cancellation.
        let outcome = endpoint.send_conversation(request.messages).await;
        controller.settle(outcome);

        drain_events(&mut controller, &mut scroll);
        scroll.observe(controller.transcript().revision());
        render(&project(controller.transcript(), controller.state(), theme));
        // Printing ends at the newest entry, which is this shell's analog of
        // scrolling the transcript view to the bottom.
        scroll.take_pending();
    }
}

fn drain_events(controller: &mut SessionController, scroll: &mut ScrollTracker) {
    for event in controller.take_events() {
        match event {
            SessionEvent::ScrollToBottom => scroll.request_scroll_to_bottom(),
            SessionEvent::Notice(reason) => println!("[alert] {reason}"),
        }
    }
}

fn render(view: &TranscriptView) {
    println!();
    if view.is_welcome {
        println!("Welcome! Ask questions about any subject, get explanations,");
        println!("or request practice problems.");
        return;
    }

    for (index, message) in view.messages.iter().enumerate() {
        render_message(index, message);
    }
}

fn render_message(index: usize, message: &MessageView) {
    let label = speaker_label(message.role);

    if message.is_thinking {
        println!("[{index}] {label} {}: Thinking ...", message.timestamp);
        return;
    }

    if message.is_truncatable && !message.expanded {
        let preview = message
            .content
            .chars()
            .take(TRUNCATION_THRESHOLD)
            .collect::<String>();
        println!("[{index}] {label} {}: {preview}", message.timestamp);
        println!("    ... (/expand {index} to show more)");
    } else {
        println!("[{index}] {label} {}: {}", message.timestamp, message.content);
        if message.is_truncatable {
            println!("    (/expand {index} to show less)");
        }
    }
}

fn handle_expand(controller: &mut SessionController, input: &str) {
    let index = input
        .strip_prefix("/expand")
        .map(str::trim)
        .and_then(|raw| raw.parse::<usize>().ok());

    let Some(index) = index else {
        println!("usage: /expand <message number>");
        return;
    };

    let Some(id) = controller.transcript().messages().get(index).map(|m| m.id) else {
        println!("no message number {index}");
        return;
    };

    controller.toggle_expanded(id);
}

async fn handle_ask(endpoint: &dyn AgentEndpoint, input: &str) {
    let Some(prompt) = parse_ask(input) else {
        println!("usage: /ask <subject> <topic> <difficulty 1-5> <question>");
        return;
    };

    match endpoint.send_prompt(prompt.explanation_prompt()).await {
        Ok(reply) => println!("{reply}"),
        Err(error) => match error.rejection_reason() {
            Some(reason) => println!("[alert] {reason}"),
            None => tracing::error!(error = %error, "explanation request failed"),
        },
    }
}

fn parse_ask(input: &str) -> Option<StudyPrompt> {
    let rest = input.strip_prefix("/ask").unwrap_or_default();
    let mut parts = rest.split_whitespace();
    let (subject, topic, difficulty) = (parts.next()?, parts.next()?, parts.next()?);
    let difficulty = difficulty.parse::<u8>().ok()?;
    let question = parts.collect::<Vec<_>>().join(" ");
    if question.is_empty() {
        return None;
    }
    Some(StudyPrompt::new(subject, topic, question, difficulty))
}

async fn handle_quiz(endpoint: &dyn AgentEndpoint, input: &str) {
    let rest = input.strip_prefix("/quiz").unwrap_or_default();
    let mut parts = rest.split_whitespace();
    let (Some(subject), Some(topic), Some(difficulty)) =
        (parts.next(), parts.next(), parts.next())
    else {
        println!("usage: /quiz <subject> <topic> <difficulty 1-5>");
        return;
    };
    let difficulty = difficulty.parse::<u8>().unwrap_or(1);

    match endpoint
        .send_prompt(practice_prompt(subject, topic, difficulty))
        .await
    {
        Ok(reply) => match PracticeQuestion::parse(&reply) {
            Some(question) => {
                println!("Question: {}", question.question);
                println!("Answer: {}", question.answer);
            }
            None => println!("{reply}"),
        },
        Err(error) => match error.rejection_reason() {
            Some(reason) => println!("[alert] {reason}"),
            None => tracing::error!(error = %error, "practice question request failed"),
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ask_command_builds_an_explanation_prompt() {
        let prompt = parse_ask("/ask math algebra 3 how do I factor quadratics?")
            .expect("well-formed command should parse");

        assert_eq!(prompt.subject, "math");
        assert_eq!(prompt.topic, "algebra");
        assert_eq!(prompt.difficulty, 3);
        assert_eq!(prompt.question, "how do I factor quadratics?");

        let rendered = prompt.explanation_prompt();
        assert!(rendered.contains("expert educator in math"));
        assert!(rendered.contains("difficulty level 3"));
    }

    #[test]
    fn ask_command_rejects_missing_question() {
        assert_eq!(parse_ask("/ask math algebra 3"), None);
        assert_eq!(parse_ask("/ask math algebra"), None);
        assert_eq!(parse_ask("/ask math algebra four what?"), None);
    }
}
