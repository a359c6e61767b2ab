pub mod http;

use async_trait::async_trait;
use log::{ error, warn };
use std::error::Error as StdError;
use std::sync::Arc;
use crate::cli::Args;
use crate::error::ChatError;
use crate::models::api::AnswerResponse;
use self::http::HttpAnswerClient;

pub const EMPTY_ANSWER_FALLBACK: &str = "❌ Error en la respuesta.";
pub const CONNECTION_FALLBACK: &str = "❌ No se pudo conectar con el servidor.";

#[async_trait]
pub trait AnswerService: Send + Sync {
    async fn ask(&self, question: &str) -> Result<AnswerResponse, ChatError>;

    fn endpoint(&self) -> String;
}

/// What a finished request contributes to the conversation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AnswerOutcome {
    Answer(String),
    EmptyAnswer,
    Unreachable,
}

impl AnswerOutcome {
    pub fn from_result(result: Result<AnswerResponse, ChatError>) -> Self {
        match result {
            Ok(resp) => match resp.answer() {
                Some(answer) => AnswerOutcome::Answer(answer.to_string()),
                None => {
                    match resp.error.as_deref() {
                        Some(reason) => warn!("Answer service reported an error: {}", reason),
                        None => warn!("Answer service reply has no usable 'respuesta' field"),
                    }
                    AnswerOutcome::EmptyAnswer
                }
            },
            Err(e) => {
                error!("Error al conectar con el servidor: {}", e);
                AnswerOutcome::Unreachable
            }
        }
    }

    /// Text of the assistant message this outcome produces.
    pub fn content(&self) -> &str {
        match self {
            AnswerOutcome::Answer(text) => text,
            AnswerOutcome::EmptyAnswer => EMPTY_ANSWER_FALLBACK,
            AnswerOutcome::Unreachable => CONNECTION_FALLBACK,
        }
    }

    pub fn into_content(self) -> String {
        match self {
            AnswerOutcome::Answer(text) => text,
            other => other.content().to_string(),
        }
    }
}

pub async fn ask_service(service: &dyn AnswerService, question: &str) -> AnswerOutcome {
    AnswerOutcome::from_result(service.ask(question).await)
}

pub fn new_client(args: &Args) -> Result<Arc<dyn AnswerService>, Box<dyn StdError + Send + Sync>> {
    let client = HttpAnswerClient::builder(&args.api_url)
        .timeout(args.request_timeout())
        .contexto(args.contexto())
        .build()?;
    Ok(Arc::new(client))
}
