pub mod print;
pub mod render;
pub mod terminal;

use crossterm::event::{ Event, EventStream };
use futures::StreamExt;
use log::{ debug, error, info };
use std::error::Error;
use std::sync::Arc;
use tokio::sync::mpsc;
use crate::client::{ ask_service, AnswerOutcome, AnswerService };
use crate::view::{ ChatView, PendingQuestion, ViewCommand };
use self::terminal::Terminal;

/// Sends the question on its own task so the view keeps handling input.
/// The task always runs to completion, even if the view is gone by then.
fn spawn_question(
    service: Arc<dyn AnswerService>,
    pending: PendingQuestion,
    tx: mpsc::Sender<AnswerOutcome>
) {
    tokio::spawn(async move {
        let outcome = ask_service(service.as_ref(), &pending.question).await;
        if tx.send(outcome).await.is_err() {
            debug!("Chat view closed before the answer arrived");
        }
    });
}

pub async fn run_interactive(service: Arc<dyn AnswerService>) -> Result<(), Box<dyn Error + Send + Sync>> {
    info!("Opening chat view against {}", service.endpoint());

    let mut terminal = Terminal::enter()?;
    let mut view = ChatView::new();
    let (clock_tx, mut clock_rx) = mpsc::channel::<String>(4);
    let ticker = view.mount(clock_tx);
    let (answer_tx, mut answer_rx) = mpsc::channel::<AnswerOutcome>(4);
    let mut events = EventStream::new();

    terminal.draw(&mut view)?;

    loop {
        tokio::select! {
            maybe_event = events.next() => {
                match maybe_event {
                    Some(Ok(Event::Key(key))) => {
                        match view.handle_key(&key) {
                            ViewCommand::Ask(pending) => {
                                spawn_question(service.clone(), pending, answer_tx.clone());
                            }
                            ViewCommand::Exit => break,
                            ViewCommand::None => {}
                        }
                    }
                    Some(Ok(Event::Paste(text))) => view.insert_str(&text),
                    Some(Ok(_)) => {}
                    Some(Err(e)) => {
                        error!("Error reading terminal events: {}", e);
                        break;
                    }
                    None => break,
                }
            }
            Some(time) = clock_rx.recv() => view.set_current_time(time),
            Some(outcome) = answer_rx.recv() => view.complete_submit(outcome),
        }
        terminal.draw(&mut view)?;
    }

    drop(ticker);
    terminal.exit()?;
    info!("Chat view closed after {} messages", view.conversation().len());
    Ok(())
}
