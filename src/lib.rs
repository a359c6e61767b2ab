pub mod cli;
pub mod client;
pub mod error;
pub mod models;
pub mod ui;
pub mod view;

use cli::Args;
use client::{ new_client, AnswerService };
use log::info;
use std::error::Error;
use std::io::IsTerminal;
use std::sync::Arc;
use view::ChatView;

pub async fn run(args: Args) -> Result<(), Box<dyn Error + Send + Sync>> {
    info!("--- Core Configuration ---");
    info!("Answer Service URL: {}", args.api_url);
    info!("Request Timeout: {}s", args.timeout_secs);
    info!("Context Configured: {}", args.contexto().is_some());
    info!("Mode: {}", if args.pregunta.is_some() { "one-shot" } else { "interactive" });
    info!("-------------------------");

    let service = new_client(&args)?;

    match args.pregunta.as_deref() {
        Some(question) => ask_once(service, question).await,
        None => ui::run_interactive(service).await,
    }
}

/// Runs one submission and prints the reply. Blank questions print nothing.
pub async fn ask_once(
    service: Arc<dyn AnswerService>,
    question: &str
) -> Result<(), Box<dyn Error + Send + Sync>> {
    let mut view = ChatView::new();
    view.submit(question, service.as_ref()).await;

    let Some(reply) = view.conversation().messages().get(1) else {
        info!("Empty question, nothing to ask");
        return Ok(());
    };

    let stdout = std::io::stdout();
    let colored = stdout.is_terminal();
    ui::print::print_answer(&mut stdout.lock(), reply, colored)?;
    Ok(())
}
