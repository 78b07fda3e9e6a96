use crate::catalog::ModelCatalogResolver;
use crate::errors::SettingsError;
use crate::preferences::{PreferenceStore, Preferences};
use crate::probe::{ConnectivityProber, ProbeResult};
use crate::service::ServiceRole;
use crate::transport::HttpTransport;
use serde::Serialize;
use tracing::{info, warn};

/// Per-role model catalog state the UI renders next to the model picker.
#[derive(Debug, Clone, Default, Serialize)]
pub struct ModelSlot {
    pub loading: bool,
    pub models: Vec<String>,
    pub error: Option<String>,
}

/// One editing session over the settings surface.
///
/// Preferences are read from the store once at load, edited in memory,
/// and flushed key-by-key on save. Model catalogs and test results are
/// transient: they live only as long as the session and are re-fetched
/// on every refresh.
pub struct SettingsSession {
    store: Box<dyn PreferenceStore>,
    transport: Box<dyn HttpTransport>,
    preferences: Preferences,
    slots: [ModelSlot; 3],
    test_results: [Option<String>; 3],
}

impl SettingsSession {
    pub fn load(
        store: Box<dyn PreferenceStore>,
        transport: Box<dyn HttpTransport>,
    ) -> Result<Self, SettingsError> {
        let preferences = Preferences::load(store.as_ref())?;
        Ok(Self {
            store,
            transport,
            preferences,
            slots: Default::default(),
            test_results: Default::default(),
        })
    }

    pub fn preferences(&self) -> &Preferences {
        &self.preferences
    }

    pub fn preferences_mut(&mut self) -> &mut Preferences {
        &mut self.preferences
    }

    pub fn save(&mut self) -> Result<(), SettingsError> {
        self.preferences.save(self.store.as_mut())
    }

    /// Probe the role's configured base URL and record the rendered
    /// outcome for the UI.
    pub fn test_service(&mut self, role: ServiceRole) -> Result<ProbeResult, SettingsError> {
        let url = self.preferences.url_for(role).to_string();
        let prober = ConnectivityProber::new(self.transport.as_ref());
        let result = prober.probe(&url);
        match &result {
            Ok(outcome) => {
                info!("Service test for {}: {}", role.id(), outcome);
                self.test_results[role.index()] = Some(outcome.to_string());
            }
            Err(err) => {
                warn!("Service test for {} failed: {}", role.id(), err);
                self.test_results[role.index()] = Some(err.to_string());
            }
        }
        result
    }

    /// Re-fetch the role's model catalog. The previous catalog is
    /// replaced on success and kept on failure; a stale error is cleared
    /// before the attempt either way.
    pub fn refresh_models(&mut self, role: ServiceRole) -> &ModelSlot {
        let url = self.preferences.url_for(role).to_string();
        let credential = self.preferences.credential_for(role);
        {
            let slot = &mut self.slots[role.index()];
            slot.loading = true;
            slot.error = None;
        }

        let resolver = ModelCatalogResolver::new(self.transport.as_ref());
        let outcome = resolver.list_models(&url, role, &credential);

        let slot = &mut self.slots[role.index()];
        slot.loading = false;
        match outcome {
            Ok(models) => {
                slot.models = models;
            }
            Err(err) => {
                warn!("Model refresh for {} failed: {}", role.id(), err);
                slot.error = Some(format!("Failed to fetch models: {}", err));
            }
        }
        &self.slots[role.index()]
    }

    pub fn model_slot(&self, role: ServiceRole) -> &ModelSlot {
        &self.slots[role.index()]
    }

    pub fn test_result(&self, role: ServiceRole) -> Option<&str> {
        self.test_results[role.index()].as_deref()
    }
}
