//! Application entry point — terminal interview client.
//!
//! # Startup sequence
//!
//! 1. Initialise logging.
//! 2. Load [`AppConfig`] from disk (returns default on first run).
//! 3. Build the HTTP client, the speech synthesizer and (when configured)
//!    the speech recognizer from config.
//! 4. Create the recognition event channel.
//! 5. Seed the [`InterviewSession`] and print the welcome turn.
//! 6. Run the REPL: `tokio::select!` between stdin lines and recognition
//!    events until the user quits or stdin closes.
//!
//! # Commands
//!
//! | Input            | Action                               |
//! |------------------|--------------------------------------|
//! | `/upload <path>` | upload a PDF resume                  |
//! | `/voice`         | start / stop voice input             |
//! | `/stop`          | end the interview (fetches the score)|
//! | `/quit`          | leave immediately                    |
//! | anything else    | submit as the answer; an empty line sends the voice buffer |

use std::sync::Arc;

use tokio::io::{AsyncBufReadExt, BufReader};
use tokio::sync::mpsc;

use interviewer::{
    client::{HttpInterviewClient, ResumeDocument},
    config::AppConfig,
    conversation::Speaker,
    session::InterviewSession,
    speech::{
        synthesizer_from_config, CommandRecognizer, RecognitionEngine, RecognitionEvent,
        Transcriber,
    },
};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // 1. Logging
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    log::info!("interview client starting up");

    // 2. Configuration
    let config = AppConfig::load().unwrap_or_else(|e| {
        log::warn!("Failed to load config ({e}); using defaults");
        AppConfig::default()
    });

    // 3. Remote client + speech adapters
    let api = Arc::new(HttpInterviewClient::from_config(&config.server));
    let voice = synthesizer_from_config(&config.speech);

    // 4. Recognition event channel.  No configured recognizer command means
    //    voice input is unsupported on this installation; the session will
    //    report that if the user tries anyway.
    let (event_tx, mut event_rx) = mpsc::channel::<RecognitionEvent>(32);
    let engine: Option<Arc<dyn RecognitionEngine>> = config
        .speech
        .recognizer_command
        .as_deref()
        .and_then(CommandRecognizer::new)
        .map(|recognizer| Arc::new(recognizer) as Arc<dyn RecognitionEngine>);
    if engine.is_none() {
        log::info!("no recognizer command configured; voice input disabled");
    }
    let transcriber = Transcriber::new(engine, event_tx);

    // 5. Session
    let mut session = InterviewSession::new(api, voice, transcriber);
    let mut printed = render_new_turns(&session, 0);
    print_help();

    // 6. REPL
    let mut lines = BufReader::new(tokio::io::stdin()).lines();

    loop {
        tokio::select! {
            line = lines.next_line() => {
                let Some(line) = line? else { break };
                if !dispatch(&mut session, line.trim()).await {
                    break;
                }
                printed = render_new_turns(&session, printed);
            }
            Some(event) = event_rx.recv() => {
                let was_recording = session.is_recording();
                if let Some(partial) = session.handle_recognition(event) {
                    if config.ui.show_partial_transcripts {
                        println!("(listening) {partial}");
                    }
                }
                if was_recording && !session.is_recording() {
                    println!("(voice input stopped — press Enter to send your answer)");
                }
                printed = render_new_turns(&session, printed);
            }
        }
    }

    log::info!("interview client shutting down");
    Ok(())
}

// ---------------------------------------------------------------------------
// Command dispatch
// ---------------------------------------------------------------------------

/// Route one line of input.  Returns `false` when the REPL should exit.
async fn dispatch(session: &mut InterviewSession, input: &str) -> bool {
    match input {
        "/quit" | "/exit" => return false,

        "/stop" => {
            println!("(processing...)");
            session.end_interview().await;
        }

        "/voice" => {
            // Affordance-level gate: voice input only once the interview is
            // underway and no remote call is pending.
            if !session.store().resume_accepted() || session.store().is_busy() {
                println!("(voice input becomes available once your resume is uploaded)");
            } else {
                session.toggle_recording();
                if session.is_recording() {
                    println!("(recording — speak now, /voice again to stop)");
                }
            }
        }

        _ if input.starts_with("/upload") => {
            let path = input.trim_start_matches("/upload").trim();
            if path.is_empty() {
                println!("usage: /upload <path-to-resume.pdf>");
            } else {
                match ResumeDocument::from_path(path) {
                    Ok(document) => {
                        println!("(processing...)");
                        session.upload_resume(&document).await;
                    }
                    Err(e) => session.reject_document(&e),
                }
            }
        }

        _ if input.starts_with('/') => {
            println!("unknown command: {input}");
        }

        answer => {
            if session.store().resume_accepted() && !answer.is_empty() {
                println!("(processing...)");
            }
            session.submit_answer(answer).await;
        }
    }

    true
}

// ---------------------------------------------------------------------------
// Rendering
// ---------------------------------------------------------------------------

/// Print turns appended since the last call; returns the new watermark.
fn render_new_turns(session: &InterviewSession, printed: usize) -> usize {
    let turns = session.store().turns();
    for turn in &turns[printed..] {
        match turn.speaker {
            Speaker::User => println!("you> {}", turn.text),
            Speaker::System => println!("interviewer> {}{}", turn.kind.prefix(), turn.text),
        }
    }
    turns.len()
}

fn print_help() {
    println!();
    println!("  /upload <path>   upload your resume (PDF) to start the interview");
    println!("  /voice           start or stop voice input");
    println!("  /stop            end the interview and get your score");
    println!("  /quit            leave immediately");
    println!("  anything else    submit it as your answer (Enter alone sends the voice buffer)");
    println!();
}
