// VoxDesk - settings, connectivity and model catalog core
#![allow(clippy::needless_return)]

mod catalog;
mod constants;
mod credential;
mod errors;
mod preferences;
mod probe;
mod service;
mod session;
mod transport;
mod util;

pub use catalog::ModelCatalogResolver;
pub use constants::PROBE_ENDPOINTS;
pub use credential::{Credential, ENV_INDIRECTION_PREFIX};
pub use errors::SettingsError;
pub use preferences::{JsonFileStore, MemoryStore, PreferenceStore, Preferences};
pub use probe::{ConnectivityProber, ProbeResult};
pub use service::ServiceRole;
pub use session::{ModelSlot, SettingsSession};
pub use transport::{HttpResponse, HttpTransport, UreqTransport};

use tracing::info;

/// Open a settings session backed by the shipped collaborators: a JSON
/// preference file and the default ureq transport.
pub fn open_session(
    preference_path: impl Into<std::path::PathBuf>,
) -> Result<SettingsSession, SettingsError> {
    SettingsSession::load(
        Box::new(JsonFileStore::new(preference_path)),
        Box::new(UreqTransport::new()),
    )
}

pub fn init_logging() {
    use tracing_subscriber::{fmt, EnvFilter};

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_thread_ids(false)
        .with_file(true)
        .with_line_number(true)
        .init();

    info!("VoxDesk settings core starting up");
}
