use crate::credential::Credential;
use crate::errors::SettingsError;
use crate::service::{CatalogSchema, ServiceRole};
use crate::transport::HttpTransport;
use crate::util::{join_endpoint, normalize_base_url};
use serde::Deserialize;
use tracing::{debug, info};

/// OpenAI-style catalog listing: `{"data": [{"id": "..."}]}`.
#[derive(Debug, Deserialize)]
struct OpenAiCatalog {
    #[serde(default)]
    data: Vec<OpenAiCatalogEntry>,
}

#[derive(Debug, Deserialize)]
struct OpenAiCatalogEntry {
    id: String,
}

/// Ollama-style tag listing: `{"models": [{"name": "..."}]}`.
#[derive(Debug, Deserialize)]
struct OllamaCatalog {
    #[serde(default)]
    models: Vec<OllamaCatalogEntry>,
}

#[derive(Debug, Deserialize)]
struct OllamaCatalogEntry {
    name: String,
}

/// Resolves the model catalog a configured service currently exposes.
///
/// Unlike the connectivity prober there is no fallback cascade here: one
/// GET against the role's catalog endpoint, and any failure is reported
/// to the caller, who retries through the explicit refresh action.
pub struct ModelCatalogResolver<'a> {
    transport: &'a dyn HttpTransport,
}

impl<'a> ModelCatalogResolver<'a> {
    pub fn new(transport: &'a dyn HttpTransport) -> Self {
        Self { transport }
    }

    /// Fetch the model identifiers `base_url` serves for `role`, in the
    /// order the service reports them, filtered by the role's naming
    /// convention. Every call re-fetches; nothing is cached here.
    pub fn list_models(
        &self,
        base_url: &str,
        role: ServiceRole,
        credential: &Credential,
    ) -> Result<Vec<String>, SettingsError> {
        let base = normalize_base_url(base_url)?;
        let profile = role.profile();
        let url = join_endpoint(&base, profile.catalog_path);

        let mut headers: Vec<(String, String)> = Vec::new();
        if let Some(bearer) = credential.bearer() {
            headers.push(("Authorization".to_string(), bearer));
        }

        debug!("Fetching {} model catalog from {}", role.id(), url);
        let response = self
            .transport
            .request("GET", &url, &headers)
            .map_err(SettingsError::Transport)?;
        if !response.is_success() {
            return Err(SettingsError::HttpStatus(
                response.status,
                response.status_text,
            ));
        }

        let ids: Vec<String> = match profile.schema {
            CatalogSchema::OpenAi => {
                let catalog: OpenAiCatalog = serde_json::from_slice(&response.body)
                    .map_err(|e| SettingsError::Decode(e.to_string()))?;
                catalog.data.into_iter().map(|entry| entry.id).collect()
            }
            CatalogSchema::Ollama => {
                let catalog: OllamaCatalog = serde_json::from_slice(&response.body)
                    .map_err(|e| SettingsError::Decode(e.to_string()))?;
                catalog.models.into_iter().map(|entry| entry.name).collect()
            }
        };

        let models: Vec<String> = ids
            .into_iter()
            .filter(|id| profile.filter.keeps(id))
            .collect();
        info!(
            "{} catalog: {} models available at {}",
            role.id(),
            models.len(),
            url
        );
        Ok(models)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::transport::mock::{json_response, status_response, MockTransport};

    const BASE: &str = "http://example.test:9000";

    const SPEACHES_CATALOG: &str =
        r#"{"data":[{"id":"Systran/whisper-small"},{"id":"speaches-ai/piper-en"}]}"#;

    fn openai_mock(body: &str) -> MockTransport {
        MockTransport::new().on(
            "GET",
            &format!("{}/v1/models", BASE),
            Ok(json_response(200, body)),
        )
    }

    #[test]
    fn stt_keeps_only_whisper_models() {
        let mock = openai_mock(SPEACHES_CATALOG);
        let models = ModelCatalogResolver::new(&mock)
            .list_models(BASE, ServiceRole::SpeechToText, &Credential::None)
            .unwrap();
        assert_eq!(models, vec!["Systran/whisper-small".to_string()]);
    }

    #[test]
    fn tts_keeps_the_complement() {
        let mock = openai_mock(SPEACHES_CATALOG);
        let models = ModelCatalogResolver::new(&mock)
            .list_models(BASE, ServiceRole::TextToSpeech, &Credential::None)
            .unwrap();
        assert_eq!(models, vec!["speaches-ai/piper-en".to_string()]);
    }

    #[test]
    fn chat_uses_the_tag_listing_unfiltered() {
        let mock = MockTransport::new().on(
            "GET",
            &format!("{}/api/tags", BASE),
            Ok(json_response(
                200,
                r#"{"models":[{"name":"llama2"},{"name":"mistral"}]}"#,
            )),
        );
        let models = ModelCatalogResolver::new(&mock)
            .list_models(BASE, ServiceRole::Chat, &Credential::None)
            .unwrap();
        assert_eq!(models, vec!["llama2".to_string(), "mistral".to_string()]);
    }

    #[test]
    fn literal_credential_becomes_a_bearer_header() {
        let mock = openai_mock(r#"{"data":[]}"#);
        let credential = Credential::parse("sk-test-123");
        ModelCatalogResolver::new(&mock)
            .list_models(BASE, ServiceRole::SpeechToText, &credential)
            .unwrap();
        let recorded = mock.recorded();
        assert_eq!(recorded.len(), 1);
        assert_eq!(
            recorded[0].headers,
            vec![(
                "Authorization".to_string(),
                "Bearer sk-test-123".to_string()
            )]
        );
    }

    #[test]
    fn env_indirection_is_never_transmitted() {
        let mock = openai_mock(r#"{"data":[]}"#);
        let credential = Credential::parse("env:OPENAI_API_KEY");
        ModelCatalogResolver::new(&mock)
            .list_models(BASE, ServiceRole::SpeechToText, &credential)
            .unwrap();
        for request in mock.recorded() {
            assert!(
                request.headers.is_empty(),
                "unexpected header on {}: {:?}",
                request.url,
                request.headers
            );
        }
    }

    #[test]
    fn non_success_status_is_a_hard_failure() {
        let mock = MockTransport::new().on(
            "GET",
            &format!("{}/v1/models", BASE),
            Ok(status_response(404)),
        );
        let err = ModelCatalogResolver::new(&mock)
            .list_models(BASE, ServiceRole::SpeechToText, &Credential::None)
            .unwrap_err();
        assert!(matches!(err, SettingsError::HttpStatus(404, _)));
        assert_eq!(err.to_string(), "HTTP 404: Not Found");
    }

    #[test]
    fn transport_failure_maps_to_transport_error() {
        let mock = MockTransport::new();
        let err = ModelCatalogResolver::new(&mock)
            .list_models(BASE, ServiceRole::Chat, &Credential::None)
            .unwrap_err();
        assert!(matches!(err, SettingsError::Transport(_)));
    }

    #[test]
    fn malformed_body_maps_to_decode_error() {
        let mock = openai_mock("<!doctype html>");
        let err = ModelCatalogResolver::new(&mock)
            .list_models(BASE, ServiceRole::TextToSpeech, &Credential::None)
            .unwrap_err();
        assert!(matches!(err, SettingsError::Decode(_)));
    }

    #[test]
    fn missing_top_level_key_is_an_empty_catalog() {
        let mock = openai_mock(r#"{"object":"list"}"#);
        let models = ModelCatalogResolver::new(&mock)
            .list_models(BASE, ServiceRole::SpeechToText, &Credential::None)
            .unwrap();
        assert!(models.is_empty());

        let mock = MockTransport::new().on(
            "GET",
            &format!("{}/api/tags", BASE),
            Ok(json_response(200, "{}")),
        );
        let models = ModelCatalogResolver::new(&mock)
            .list_models(BASE, ServiceRole::Chat, &Credential::None)
            .unwrap();
        assert!(models.is_empty());
    }

    #[test]
    fn listing_is_idempotent_against_unchanged_backend() {
        let mock = openai_mock(SPEACHES_CATALOG);
        let resolver = ModelCatalogResolver::new(&mock);
        let first = resolver
            .list_models(BASE, ServiceRole::TextToSpeech, &Credential::None)
            .unwrap();
        let second = resolver
            .list_models(BASE, ServiceRole::TextToSpeech, &Credential::None)
            .unwrap();
        assert_eq!(first, second);
        assert_eq!(mock.request_count(), 2, "every call re-fetches");
    }

    #[test]
    fn trailing_slash_joins_cleanly() {
        let mock = openai_mock(r#"{"data":[]}"#);
        ModelCatalogResolver::new(&mock)
            .list_models(
                &format!("{}/", BASE),
                ServiceRole::SpeechToText,
                &Credential::None,
            )
            .unwrap();
        assert_eq!(
            mock.urls_for("GET"),
            vec![format!("{}/v1/models", BASE)]
        );
    }
}
