//! chatloop - terminal chat with a hosted language model
//!
//! Reads operator lines from stdin, sends the whole conversation to the
//! provider on every turn, and prints each reply until told to quit.

mod config;
mod conversation;
mod llm;
mod responder;
mod session;
mod state_machine;

use config::{ChatConfig, ConfigError};
use llm::{LoggingService, OpenAIService};
use responder::LlmResponder;
use session::{Session, SessionError, SessionOutcome};
use std::io::Write;
use std::process::ExitCode;
use std::sync::Arc;
use tokio::io::BufReader;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, Layer};

const LOG_FILTER_VAR: &str = "CHATLOOP_LOG";
const LOG_FORMAT_VAR: &str = "CHATLOOP_LOG_FORMAT";

const EXIT_OK: u8 = 0;
/// Exit status when the session cannot be configured
const EXIT_CONFIG: u8 = 1;
/// Exit status for a fault during a turn (provider or console)
const EXIT_SESSION_FAILED: u8 = 2;

fn init_logging() {
    let filter = tracing_subscriber::EnvFilter::try_from_env(LOG_FILTER_VAR)
        .unwrap_or_else(|_| "chatloop=warn".into());

    // Logs go to stderr; stdout carries only the transcript
    let fmt = if std::env::var(LOG_FORMAT_VAR).is_ok_and(|f| f.eq_ignore_ascii_case("json")) {
        tracing_subscriber::fmt::layer()
            .json()
            .with_current_span(false)
            .with_span_list(false)
            .with_writer(std::io::stderr)
            .boxed()
    } else {
        tracing_subscriber::fmt::layer()
            .with_writer(std::io::stderr)
            .boxed()
    };

    tracing_subscriber::registry().with(filter).with(fmt).init();
}

/// Tell the operator why the session cannot start.
///
/// The missing-credential message goes to stdout, where the operator is
/// looking for the banner; anything else goes to stderr.
fn report_config_error(
    error: &ConfigError,
    stdout: &mut impl Write,
    stderr: &mut impl Write,
) -> u8 {
    let out: &mut dyn Write = match error {
        ConfigError::MissingCredential { .. } => stdout,
        ConfigError::Invalid { .. } => stderr,
    };
    // Nothing left to report to if the console itself is gone
    let _ = writeln!(out, "{error}");
    EXIT_CONFIG
}

fn exit_status(outcome: &Result<SessionOutcome, SessionError>) -> u8 {
    match outcome {
        Ok(SessionOutcome::Quit | SessionOutcome::InputClosed) => EXIT_OK,
        Err(_) => EXIT_SESSION_FAILED,
    }
}

fn report_dotenv(loaded: &Result<Vec<dotenvy::Error>, dotenvy::Error>) {
    match loaded {
        Ok(skipped) => {
            tracing::debug!(skipped = skipped.len(), "Loaded .env");
            for e in skipped {
                tracing::warn!(error = %e, "Skipped .env line");
            }
        }
        // A missing .env is fine; the variables may come from the shell
        Err(e) if e.not_found() => {}
        Err(e) => tracing::warn!(error = %e, "Could not read .env"),
    }
}

#[tokio::main]
async fn main() -> ExitCode {
    // Before logging starts, so the filter can come from .env too
    let dotenv = config::load_dotenv();

    init_logging();
    report_dotenv(&dotenv);

    let config = match ChatConfig::from_env() {
        Ok(config) => config,
        Err(e) => {
            let code = report_config_error(&e, &mut std::io::stdout(), &mut std::io::stderr());
            return ExitCode::from(code);
        }
    };

    let service = match OpenAIService::new(
        config.api_key.clone(),
        config.model.clone(),
        &config.base_url,
        config.request_timeout,
    ) {
        Ok(service) => service,
        Err(e) => {
            eprintln!("{e}");
            return ExitCode::from(EXIT_CONFIG);
        }
    };

    tracing::info!(
        model = %config.model,
        base_url = %config.base_url,
        temperature = config.temperature,
        timeout_secs = config.request_timeout.as_secs(),
        "Starting chat session"
    );

    let service = Arc::new(LoggingService::new(Arc::new(service)));
    let mut session = Session::new(LlmResponder::new(service, config.temperature));

    let stdin = BufReader::new(tokio::io::stdin());
    let outcome = session.run(stdin, tokio::io::stdout()).await;
    if let Err(e) = &outcome {
        tracing::error!(
            turns = session.log().len(),
            state = ?session.state(),
            "Session aborted"
        );
        eprintln!("Error: {e}");
    }
    ExitCode::from(exit_status(&outcome))
}
