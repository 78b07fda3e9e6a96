use serde::{Deserialize, Serialize};

/// The three logical services the settings surface manages.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ServiceRole {
    #[serde(rename = "stt")]
    SpeechToText,
    #[serde(rename = "tts")]
    TextToSpeech,
    #[serde(rename = "chat")]
    Chat,
}

impl ServiceRole {
    pub const ALL: [ServiceRole; 3] = [
        ServiceRole::SpeechToText,
        ServiceRole::TextToSpeech,
        ServiceRole::Chat,
    ];

    /// Short identifier used in logs and slot labels.
    pub fn id(self) -> &'static str {
        match self {
            ServiceRole::SpeechToText => "stt",
            ServiceRole::TextToSpeech => "tts",
            ServiceRole::Chat => "chat",
        }
    }

    pub(crate) fn index(self) -> usize {
        match self {
            ServiceRole::SpeechToText => 0,
            ServiceRole::TextToSpeech => 1,
            ServiceRole::Chat => 2,
        }
    }

    /// Catalog endpoint, response schema and model filter for this role.
    /// Branching happens once here; request construction is shared.
    pub(crate) fn profile(self) -> RoleProfile {
        match self {
            ServiceRole::SpeechToText => RoleProfile {
                catalog_path: "/v1/models",
                schema: CatalogSchema::OpenAi,
                filter: ModelFilter::WhisperOnly,
            },
            ServiceRole::TextToSpeech => RoleProfile {
                catalog_path: "/v1/models",
                schema: CatalogSchema::OpenAi,
                filter: ModelFilter::NonWhisper,
            },
            ServiceRole::Chat => RoleProfile {
                catalog_path: "/api/tags",
                schema: CatalogSchema::Ollama,
                filter: ModelFilter::All,
            },
        }
    }
}

#[derive(Debug, Clone, Copy)]
pub(crate) struct RoleProfile {
    pub(crate) catalog_path: &'static str,
    pub(crate) schema: CatalogSchema,
    pub(crate) filter: ModelFilter,
}

/// Known catalog response shapes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum CatalogSchema {
    /// `{"data": [{"id": "..."}]}`
    OpenAi,
    /// `{"models": [{"name": "..."}]}`
    Ollama,
}

/// Partition of a shared catalog backend by naming convention. The
/// OpenAI-style schema carries no model-type field, so transcription and
/// synthesis models hosted side by side are split on "whisper".
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum ModelFilter {
    WhisperOnly,
    NonWhisper,
    All,
}

impl ModelFilter {
    pub(crate) fn keeps(self, model_id: &str) -> bool {
        match self {
            ModelFilter::WhisperOnly => model_id.to_lowercase().contains("whisper"),
            ModelFilter::NonWhisper => !model_id.to_lowercase().contains("whisper"),
            ModelFilter::All => true,
        }
    }
}
