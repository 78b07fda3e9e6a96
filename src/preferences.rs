use crate::constants::{
  DEFAULT_CHAT_MODEL,
  DEFAULT_CHAT_URL,
  DEFAULT_FEMALE_TTS_MODEL,
  DEFAULT_FEMALE_VOICE,
  DEFAULT_MALE_TTS_MODEL,
  DEFAULT_MALE_VOICE,
  DEFAULT_SPEECH_URL,
  DEFAULT_STT_MODEL,
  DEFAULT_TTS_MODEL,
  DEFAULT_TTS_SPEED,
  TTS_SPEED_MAX,
  TTS_SPEED_MIN,
};
use crate::credential::Credential;
use crate::errors::SettingsError;
use crate::service::ServiceRole;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashMap};
use std::fs;
use std::path::PathBuf;
use tracing::warn;

const KEY_SPEECH_URL: &str = "speechUrl";
const KEY_STT_URL: &str = "sttUrl";
const KEY_TTS_URL: &str = "ttsUrl";
const KEY_STT_API_KEY: &str = "sttApiKey";
const KEY_TTS_API_KEY: &str = "ttsApiKey";
const KEY_CHAT_URL: &str = "chatUrl";
const KEY_CHAT_API_KEY: &str = "chatApiKey";
const KEY_CHAT_MODEL: &str = "chatModel";
const KEY_VOICE: &str = "voice";
const KEY_STT_MODEL: &str = "sttModel";
const KEY_TTS_MODEL: &str = "ttsModel";
const KEY_MALE_TTS_MODEL: &str = "maleTtsModel";
const KEY_FEMALE_TTS_MODEL: &str = "femaleTtsModel";
const KEY_MALE_VOICE: &str = "maleVoice";
const KEY_FEMALE_VOICE: &str = "femaleVoice";
const KEY_TTS_SPEED: &str = "ttsSpeed";

/// Flat external key-value collaborator holding the persisted settings.
/// Keys are written independently; there are no transactions.
pub trait PreferenceStore: Send {
  fn get_all(&self) -> Result<HashMap<String, String>, SettingsError>;
  fn set(&mut self, key: &str, value: &str) -> Result<(), SettingsError>;
}

/// In-memory view of the persisted preference set. Loaded once per
/// session, edited in place, flushed key-by-key on save.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Preferences {
  /// Legacy shared speech endpoint; sttUrl/ttsUrl fall back to it when
  /// they are absent from the store.
  pub speech_url: String,
  pub stt_url: String,
  pub tts_url: String,
  pub stt_api_key: String,
  pub tts_api_key: String,
  pub chat_url: String,
  pub chat_api_key: String,
  pub chat_model: String,
  pub voice: String, // "male" | "female"
  pub stt_model: String,
  pub tts_model: String,
  pub male_tts_model: String,
  pub female_tts_model: String,
  pub male_voice: String,
  pub female_voice: String,
  pub tts_speed: String,
}

impl Default for Preferences {
  fn default() -> Self {
    Self {
      speech_url: DEFAULT_SPEECH_URL.to_string(),
      stt_url: DEFAULT_SPEECH_URL.to_string(),
      tts_url: DEFAULT_SPEECH_URL.to_string(),
      stt_api_key: String::new(),
      tts_api_key: String::new(),
      chat_url: DEFAULT_CHAT_URL.to_string(),
      chat_api_key: String::new(),
      chat_model: DEFAULT_CHAT_MODEL.to_string(),
      voice: "male".to_string(),
      stt_model: DEFAULT_STT_MODEL.to_string(),
      tts_model: DEFAULT_TTS_MODEL.to_string(),
      male_tts_model: DEFAULT_MALE_TTS_MODEL.to_string(),
      female_tts_model: DEFAULT_FEMALE_TTS_MODEL.to_string(),
      male_voice: DEFAULT_MALE_VOICE.to_string(),
      female_voice: DEFAULT_FEMALE_VOICE.to_string(),
      tts_speed: DEFAULT_TTS_SPEED.to_string(),
    }
  }
}

impl Preferences {
  /// Read the whole store once and build the typed view, applying
  /// defaults for absent keys and normalizing out-of-range values.
  pub fn load(store: &dyn PreferenceStore) -> Result<Self, SettingsError> {
    Ok(Self::from_map(&store.get_all()?))
  }

  pub fn from_map(map: &HashMap<String, String>) -> Self {
    let defaults = Preferences::default();
    let get = |key: &str, fallback: &str| -> String {
      map
        .get(key)
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
        .unwrap_or_else(|| fallback.to_string())
    };
    // Credentials stay verbatim: empty means "no auth" and must survive.
    let get_raw =
      |key: &str| -> String { map.get(key).cloned().unwrap_or_default() };

    let speech_url = get(KEY_SPEECH_URL, &defaults.speech_url);
    let mut prefs = Preferences {
      stt_url: get(KEY_STT_URL, &speech_url),
      tts_url: get(KEY_TTS_URL, &speech_url),
      stt_api_key: get_raw(KEY_STT_API_KEY),
      tts_api_key: get_raw(KEY_TTS_API_KEY),
      chat_url: get(KEY_CHAT_URL, &defaults.chat_url),
      chat_api_key: get_raw(KEY_CHAT_API_KEY),
      chat_model: get(KEY_CHAT_MODEL, &defaults.chat_model),
      voice: get(KEY_VOICE, &defaults.voice),
      stt_model: get(KEY_STT_MODEL, &defaults.stt_model),
      tts_model: get(KEY_TTS_MODEL, &defaults.tts_model),
      male_tts_model: get(KEY_MALE_TTS_MODEL, &defaults.male_tts_model),
      female_tts_model: get(KEY_FEMALE_TTS_MODEL, &defaults.female_tts_model),
      male_voice: get(KEY_MALE_VOICE, &defaults.male_voice),
      female_voice: get(KEY_FEMALE_VOICE, &defaults.female_voice),
      tts_speed: get(KEY_TTS_SPEED, &defaults.tts_speed),
      speech_url,
    };
    prefs.normalize();
    prefs
  }

  fn normalize(&mut self) {
    if self.voice != "male" && self.voice != "female" {
      self.voice = "male".to_string();
    }
    match self.tts_speed.trim().parse::<f32>() {
      Ok(speed) if (TTS_SPEED_MIN..=TTS_SPEED_MAX).contains(&speed) => {}
      _ => self.tts_speed = DEFAULT_TTS_SPEED.to_string(),
    }
  }

  /// Flush every key to the store individually. All keys are attempted
  /// even when some writes fail; failures collapse into a single Storage
  /// error, so a partial save leaves the store in a mixed state the
  /// caller cannot introspect.
  pub fn save(&self, store: &mut dyn PreferenceStore) -> Result<(), SettingsError> {
    let entries = self.entries();
    let total = entries.len();
    let mut failed = 0usize;
    for (key, value) in entries {
      if let Err(err) = store.set(key, &value) {
        warn!("Failed to persist preference '{}': {}", key, err);
        failed += 1;
      }
    }
    if failed == 0 {
      Ok(())
    } else {
      Err(SettingsError::Storage(format!(
        "Failed to save settings: {} of {} keys were not written",
        failed, total
      )))
    }
  }

  fn entries(&self) -> Vec<(&'static str, String)> {
    vec![
      (KEY_SPEECH_URL, self.speech_url.clone()),
      (KEY_STT_URL, self.stt_url.clone()),
      (KEY_TTS_URL, self.tts_url.clone()),
      (KEY_STT_API_KEY, self.stt_api_key.clone()),
      (KEY_TTS_API_KEY, self.tts_api_key.clone()),
      (KEY_CHAT_URL, self.chat_url.clone()),
      (KEY_CHAT_API_KEY, self.chat_api_key.clone()),
      (KEY_CHAT_MODEL, self.chat_model.clone()),
      (KEY_VOICE, self.voice.clone()),
      (KEY_STT_MODEL, self.stt_model.clone()),
      (KEY_TTS_MODEL, self.tts_model.clone()),
      (KEY_MALE_TTS_MODEL, self.male_tts_model.clone()),
      (KEY_FEMALE_TTS_MODEL, self.female_tts_model.clone()),
      (KEY_MALE_VOICE, self.male_voice.clone()),
      (KEY_FEMALE_VOICE, self.female_voice.clone()),
      (KEY_TTS_SPEED, self.tts_speed.clone()),
    ]
  }

  /// Base URL the given role is configured against.
  pub fn url_for(&self, role: ServiceRole) -> &str {
    match role {
      ServiceRole::SpeechToText => &self.stt_url,
      ServiceRole::TextToSpeech => &self.tts_url,
      ServiceRole::Chat => &self.chat_url,
    }
  }

  /// Credential for the given role, parsed from its stored string form.
  pub fn credential_for(&self, role: ServiceRole) -> Credential {
    let raw = match role {
      ServiceRole::SpeechToText => &self.stt_api_key,
      ServiceRole::TextToSpeech => &self.tts_api_key,
      ServiceRole::Chat => &self.chat_api_key,
    };
    Credential::parse(raw)
  }

  /// Currently selected model identifier for the given role.
  pub fn model_for(&self, role: ServiceRole) -> &str {
    match role {
      ServiceRole::SpeechToText => &self.stt_model,
      ServiceRole::TextToSpeech => &self.tts_model,
      ServiceRole::Chat => &self.chat_model,
    }
  }

  /// The synthesis model matching the configured voice gender.
  pub fn active_tts_model(&self) -> &str {
    if self.voice == "female" {
      &self.female_tts_model
    } else {
      &self.male_tts_model
    }
  }

  /// The voice id matching the configured voice gender.
  pub fn active_voice_id(&self) -> &str {
    if self.voice == "female" {
      &self.female_voice
    } else {
      &self.male_voice
    }
  }

  pub fn tts_speed_value(&self) -> f32 {
    self.tts_speed.trim().parse().unwrap_or(DEFAULT_TTS_SPEED)
  }
}

/// Preference store persisted as a flat JSON object in a single file.
pub struct JsonFileStore {
  path: PathBuf,
}

impl JsonFileStore {
  pub fn new(path: impl Into<PathBuf>) -> Self {
    Self { path: path.into() }
  }

  fn read_map(&self) -> Result<BTreeMap<String, String>, SettingsError> {
    match fs::read_to_string(&self.path) {
      Ok(raw) => serde_json::from_str(&raw).map_err(|e| {
        SettingsError::Storage(format!("Failed to parse preference file: {}", e))
      }),
      Err(err) if err.kind() == std::io::ErrorKind::NotFound => Ok(BTreeMap::new()),
      Err(err) => Err(SettingsError::Storage(format!(
        "Failed to read preference file: {}",
        err
      ))),
    }
  }
}

impl PreferenceStore for JsonFileStore {
  fn get_all(&self) -> Result<HashMap<String, String>, SettingsError> {
    Ok(self.read_map()?.into_iter().collect())
  }

  fn set(&mut self, key: &str, value: &str) -> Result<(), SettingsError> {
    let mut map = self.read_map()?;
    map.insert(key.to_string(), value.to_string());
    let raw = serde_json::to_string_pretty(&map).map_err(|e| {
      SettingsError::Storage(format!("Failed to serialize preferences: {}", e))
    })?;
    fs::write(&self.path, raw)
      .map_err(|e| SettingsError::Storage(format!("Failed to write preference file: {}", e)))
  }
}

/// Volatile store, used by tests and the first-run preview.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
  values: HashMap<String, String>,
}

impl MemoryStore {
  pub fn new() -> Self {
    Self::default()
  }

  pub fn with_values(values: HashMap<String, String>) -> Self {
    Self { values }
  }
}

impl PreferenceStore for MemoryStore {
  fn get_all(&self) -> Result<HashMap<String, String>, SettingsError> {
    Ok(self.values.clone())
  }

  fn set(&mut self, key: &str, value: &str) -> Result<(), SettingsError> {
    self.values.insert(key.to_string(), value.to_string());
    Ok(())
  }
}
