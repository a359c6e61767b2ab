use reqwest::Client as HttpClient;
use reqwest::header::{ ACCEPT, CONTENT_TYPE };
use async_trait::async_trait;
use std::time::Duration;
use log::debug;
use super::AnswerService;
use crate::error::ChatError;
use crate::models::api::{ AnswerResponse, QuestionRequest };

const ASK_ROUTE: &str = "/preguntar";

#[derive(Debug, Clone)]
pub struct HttpAnswerClient {
    http: HttpClient,
    endpoint: String,
    contexto: Option<String>,
}

pub struct HttpAnswerClientBuilder {
    base_url: String,
    timeout: Option<Duration>,
    contexto: Option<String>,
}

impl HttpAnswerClientBuilder {
    pub fn timeout(mut self, timeout: Option<Duration>) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn contexto(mut self, contexto: Option<String>) -> Self {
        self.contexto = contexto;
        self
    }

    pub fn build(self) -> Result<HttpAnswerClient, ChatError> {
        let base = self.base_url.trim().trim_end_matches('/');
        if reqwest::Url::parse(base).is_err() {
            return Err(ChatError::InvalidUrl(self.base_url.clone()));
        }

        let mut builder = HttpClient::builder();
        if let Some(timeout) = self.timeout {
            builder = builder.timeout(timeout);
        }

        Ok(HttpAnswerClient {
            http: builder.build()?,
            endpoint: format!("{}{}", base, ASK_ROUTE),
            contexto: self.contexto,
        })
    }
}

impl HttpAnswerClient {
    pub fn builder(base_url: &str) -> HttpAnswerClientBuilder {
        HttpAnswerClientBuilder {
            base_url: base_url.to_string(),
            timeout: None,
            contexto: None,
        }
    }

    pub fn new(base_url: &str) -> Result<Self, ChatError> {
        Self::builder(base_url).build()
    }
}

#[async_trait]
impl AnswerService for HttpAnswerClient {
    async fn ask(&self, question: &str) -> Result<AnswerResponse, ChatError> {
        let req = QuestionRequest {
            pregunta: question.to_string(),
            contexto: self.contexto.clone(),
        };
        debug!("POST {} ({} chars)", self.endpoint, question.len());

        // Status is not checked; the backend reports failures as JSON bodies.
        let resp = self.http
            .post(&self.endpoint)
            .header(CONTENT_TYPE, "application/json")
            .header(ACCEPT, "application/json")
            .json(&req)
            .send().await?;
        let status = resp.status();
        let body = resp.text().await?;
        debug!("Answer service replied {} ({} bytes)", status, body.len());

        // Only an object can carry `respuesta`; serde would read an array as a field sequence.
        match serde_json::from_str(&body)? {
            value @ serde_json::Value::Object(_) => Ok(serde_json::from_value(value).unwrap_or_default()),
            _ => Ok(AnswerResponse::default()),
        }
    }

    fn endpoint(&self) -> String {
        self.endpoint.clone()
    }
}
