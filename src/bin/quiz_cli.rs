use std::env;
use tokio::io::{AsyncBufReadExt, BufReader};

use pop_quiz_backend::config::env_flag;
use pop_quiz_backend::quiz::questions::default_questions;
use pop_quiz_backend::quiz::render::render;
use pop_quiz_backend::quiz::{
    CompletionPolicy, FileStore, HttpPayoutClient, QuizError, QuizWidget, WidgetOptions,
};

const HELP: &str = "commands: answer <n> <key> | submit | claim | retake | pay | wallet <address> | quit";

#[derive(Debug, PartialEq, Eq)]
enum Command {
    Answer(usize, String),
    Submit,
    Claim,
    Retake,
    Pay,
    Wallet(String),
    Quit,
    Help,
}

fn parse_command(line: &str) -> Result<Command, String> {
    let mut parts = line.split_whitespace();
    let Some(head) = parts.next() else {
        return Ok(Command::Help);
    };
    match head.to_ascii_lowercase().as_str() {
        "answer" | "a" => {
            let number = parts
                .next()
                .and_then(|n| n.parse::<usize>().ok())
                .filter(|n| *n > 0)
                .ok_or_else(|| "usage: answer <question number> <option key>".to_string())?;
            let key = parts
                .next()
                .ok_or_else(|| "usage: answer <question number> <option key>".to_string())?;
            Ok(Command::Answer(number - 1, key.to_ascii_lowercase()))
        }
        "submit" => Ok(Command::Submit),
        "claim" => Ok(Command::Claim),
        "retake" | "retry" => Ok(Command::Retake),
        "pay" => Ok(Command::Pay),
        "wallet" => parts
            .next()
            .map(|a| Command::Wallet(a.to_string()))
            .ok_or_else(|| "usage: wallet <address>".to_string()),
        "quit" | "exit" | "q" => Ok(Command::Quit),
        "help" | "?" => Ok(Command::Help),
        other => Err(format!("unknown command '{}'", other)),
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenv::dotenv().ok();
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "pop_quiz_backend=warn".into()),
        )
        .with_writer(std::io::stderr)
        .init();

    let api_url = env::var("PAYOUT_API_URL").unwrap_or_else(|_| "http://localhost:3000".to_string());
    let state_path =
        env::var("QUIZ_STATE_PATH").unwrap_or_else(|_| ".pop-quiz-state.json".to_string());
    let mut wallet = env::var("WALLET_ADDRESS").ok();

    let payment_gate = env_flag("PAYMENT_GATE_ENABLED");
    let options = WidgetOptions {
        completion_policy: if payment_gate {
            CompletionPolicy::OnAnySubmission
        } else {
            CompletionPolicy::OnWin
        },
        payment_gate,
    };

    let store = FileStore::open(&state_path)?;
    let mut widget = QuizWidget::new(default_questions(), store, options);
    let client = HttpPayoutClient::new(&api_url);
    tracing::debug!("Payout endpoint: {}", client.endpoint());

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    println!("{}", HELP);

    loop {
        println!("\n{}", render(&widget.view(), wallet.as_deref()));
        let Some(line) = lines.next_line().await? else {
            break;
        };

        let command = match parse_command(&line) {
            Ok(command) => command,
            Err(message) => {
                println!("{}", message);
                continue;
            }
        };

        let result: Result<(), QuizError> = match command {
            Command::Answer(index, key) => widget.select_option(index, &key),
            Command::Submit => widget.submit().map(|_| ()),
            Command::Claim => widget
                .claim(&client, wallet.as_deref())
                .await
                .map(|_| ()),
            Command::Retake => widget.retake(),
            Command::Pay => {
                widget.record_payment();
                Ok(())
            }
            Command::Wallet(address) => {
                wallet = Some(address);
                Ok(())
            }
            Command::Help => {
                println!("{}", HELP);
                Ok(())
            }
            Command::Quit => break,
        };

        // Wallet errors are already queued as a notice.
        match result {
            Ok(()) | Err(QuizError::WalletNotConnected) => {}
            Err(err) => println!("! {}", err),
        }
        if let Some(notice) = widget.take_notice() {
            println!("! {}", notice);
        }
    }

    Ok(())
}
