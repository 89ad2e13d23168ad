//! Headless terminal runner: reads commands from stdin and ticks once a second.

use std::time::Duration;

use services::{
    QuizCommand, QuizController, QuizError, QuizEvent, QuizView, RecordingNotifier, Screen,
};
use tokio::io::{AsyncBufReadExt, BufReader};
use tokio::time::MissedTickBehavior;
use tracing::debug;

const TICK_INTERVAL: Duration = Duration::from_secs(1);

const HELP: &str = "commands: start | select <n> | next | prev | submit | reset | quit";

pub async fn play(
    quiz: &mut QuizController,
    notifications: &RecordingNotifier,
) -> Result<(), Box<dyn std::error::Error>> {
    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    let mut ticker = tokio::time::interval(TICK_INTERVAL);
    ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

    quiz.boot().await?;
    print_view(&quiz.view());
    println!("{HELP}");

    loop {
        tokio::select! {
            _ = ticker.tick() => {
                let event = quiz.dispatch(QuizCommand::Tick).await?;
                for message in notifications.take() {
                    println!("\n*** {message} ***");
                }
                if let QuizEvent::Submitted(result) = &event {
                    debug!(score = result.score(), "submitted on expiry");
                    print_view(&quiz.view());
                }
            }
            line = lines.next_line() => {
                let Some(line) = line? else {
                    break;
                };
                let input = line.trim();
                match input {
                    "" => continue,
                    "quit" | "exit" | "q" => break,
                    "help" | "?" => {
                        println!("{HELP}");
                        continue;
                    }
                    _ => {}
                }
                let command = match input.parse::<QuizCommand>() {
                    Ok(command) => command,
                    Err(err) => {
                        println!("{err}");
                        continue;
                    }
                };
                match quiz.dispatch(command).await {
                    Ok(_) => print_view(&quiz.view()),
                    Err(err @ QuizError::InvalidOption { .. }) => println!("{err}"),
                    Err(err) => return Err(err.into()),
                }
            }
        }
    }

    Ok(())
}

fn print_view(view: &QuizView) {
    println!();
    match view.screen {
        Screen::Start => {
            println!("Quiz de JavaScript");
            println!("Digite `start` para começar.");
        }
        Screen::Quiz => {
            let Some(question) = view.question.as_ref() else {
                return;
            };
            println!(
                "Pergunta {} de {}  |  Tempo restante: {}s  |  {:.0}%",
                question.number(),
                question.total,
                view.time_remaining,
                view.progress_percent
            );
            println!("{}", question.text);
            for option in &question.options {
                let marker = if option.selected { "x" } else { " " };
                println!("  [{marker}] {}) {}", option.index + 1, option.text);
            }
            if let Some(message) = view.error_message.as_ref() {
                println!("! {message}");
            }
        }
        Screen::Result => {
            let Some(result) = view.result.as_ref() else {
                return;
            };
            println!("{}", result.score_line());
            for item in result.review() {
                println!("Q{}: {}", item.index + 1, item.question_text);
                let answer = if item.is_unanswered() {
                    "Nenhuma resposta"
                } else {
                    item.user_answer.as_str()
                };
                println!("   Sua resposta: {answer}");
                println!("   Resposta correta: {}", item.correct_answer);
            }
            println!("Digite `reset` para jogar de novo.");
        }
    }
}
