use serde::{ Serialize, Deserialize };

/// Body of `POST /preguntar`.
#[derive(Serialize, Debug, Clone)]
pub struct QuestionRequest {
    pub pregunta: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub contexto: Option<String>,
}

/// Reply of the answer service. Every field is optional so that any JSON
/// object deserializes; the backend sends `error` instead of `respuesta` on failure.
#[derive(Deserialize, Debug, Clone, Default)]
pub struct AnswerResponse {
    #[serde(default, deserialize_with = "string_or_none")]
    pub respuesta: Option<String>,
    #[serde(default, deserialize_with = "string_or_none")]
    pub error: Option<String>,
}

impl AnswerResponse {
    /// The answer text, if present and non-empty.
    pub fn answer(&self) -> Option<&str> {
        self.respuesta.as_deref().filter(|r| !r.is_empty())
    }
}

fn string_or_none<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
    where D: serde::Deserializer<'de>
{
    let value = serde_json::Value::deserialize(deserializer)?;
    Ok(match value {
        serde_json::Value::String(s) => Some(s),
        _ => None,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn request_omits_missing_contexto() {
        let req = QuestionRequest { pregunta: "¿Qué dice el artículo 3?".into(), contexto: None };
        let json = serde_json::to_value(&req).unwrap();
        assert_eq!(json, serde_json::json!({ "pregunta": "¿Qué dice el artículo 3?" }));
    }

    #[test]
    fn request_includes_contexto_when_set() {
        let req = QuestionRequest { pregunta: "hola".into(), contexto: Some("RAC-2".into()) };
        let json = serde_json::to_value(&req).unwrap();
        assert_eq!(json["contexto"], "RAC-2");
    }

    #[test]
    fn empty_answer_is_treated_as_missing() {
        let resp: AnswerResponse = serde_json::from_str(r#"{"respuesta": ""}"#).unwrap();
        assert_eq!(resp.answer(), None);
    }

    #[test]
    fn non_string_answer_is_tolerated() {
        let resp: AnswerResponse = serde_json::from_str(r#"{"respuesta": 42, "extra": true}"#).unwrap();
        assert_eq!(resp.answer(), None);
    }

    #[test]
    fn backend_error_shape_is_tolerated() {
        let resp: AnswerResponse =
            serde_json::from_str(r#"{"error": "Debes enviar una pregunta"}"#).unwrap();
        assert_eq!(resp.answer(), None);
        assert_eq!(resp.error.as_deref(), Some("Debes enviar una pregunta"));
    }
}
