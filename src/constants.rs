pub const DEFAULT_SPEECH_URL: &str = "http://localhost:8000";
pub const DEFAULT_CHAT_URL: &str = "http://localhost:11434";

pub const DEFAULT_STT_MODEL: &str = "Systran/faster-distil-whisper-small.en";
pub const DEFAULT_TTS_MODEL: &str = "speaches-ai/Kokoro-82M-v1.0-ONNX-int8";
pub const DEFAULT_MALE_TTS_MODEL: &str = "speaches-ai/piper-en_GB-alan-low";
pub const DEFAULT_FEMALE_TTS_MODEL: &str = "speaches-ai/piper-en_US-amy-low";
pub const DEFAULT_MALE_VOICE: &str = "alan";
pub const DEFAULT_FEMALE_VOICE: &str = "amy";
pub const DEFAULT_CHAT_MODEL: &str = "llama2";

pub const DEFAULT_TTS_SPEED: f32 = 1.25;
pub const TTS_SPEED_MIN: f32 = 0.5;
pub const TTS_SPEED_MAX: f32 = 2.0;

pub const HTTP_CONNECT_TIMEOUT_SECS: u64 = 5;
pub const HTTP_READ_TIMEOUT_SECS: u64 = 15;

/// Well-known API suffixes tried, in order, when the bare base URL does
/// not answer. Covers common REST health conventions plus the OpenAI and
/// Ollama endpoint families.
pub const PROBE_ENDPOINTS: &[&str] = &[
    "/health",
    "/status",
    "/",
    "/docs",
    "/api",
    "/v1",
    "/v1/models",
    "/v1/audio/transcriptions",
    "/v1/audio/speech",
    "/v1/chat/completions",
    "/api/chat",
    "/api/generate",
    "/models",
];
