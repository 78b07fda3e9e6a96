use crate::constants::PROBE_ENDPOINTS;
use crate::errors::SettingsError;
use crate::transport::HttpTransport;
use crate::util::{join_endpoint, normalize_base_url};
use serde::{Deserialize, Serialize};
use std::fmt;
use tracing::{debug, warn};

/// Outcome of a single reachability probe against a base URL.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "detail")]
pub enum ProbeResult {
    /// The bare base URL answered 2xx.
    Reachable,

    /// The base URL itself did not answer 2xx but well-known API paths
    /// did (2xx, or 401/405, which prove the path is routed server-side
    /// even though this request was rejected).
    ReachableWithEndpoints(Vec<String>),

    /// The server answers but exposes no recognized API shape. Callers
    /// inspect the embedded status: 500 and above renders as a server
    /// error rather than a soft warning.
    Degraded(u16),

    /// Nothing answered, not even a final HEAD to the bare base.
    Unreachable(String),
}

impl ProbeResult {
    /// True when the probe proved an API-shaped service is listening.
    pub fn is_reachable(&self) -> bool {
        matches!(
            self,
            ProbeResult::Reachable | ProbeResult::ReachableWithEndpoints(_)
        )
    }
}

impl fmt::Display for ProbeResult {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            ProbeResult::Reachable => write!(f, "Server reachable and responding"),
            ProbeResult::ReachableWithEndpoints(endpoints) => write!(
                f,
                "Server reachable. Found endpoints: {}",
                endpoints.join(", ")
            ),
            ProbeResult::Degraded(status) if *status < 500 => write!(
                f,
                "Server reachable but API endpoints not found. Status: {}",
                status
            ),
            ProbeResult::Degraded(status) => write!(f, "Server error: {}", status),
            ProbeResult::Unreachable(message) => write!(f, "Connection failed: {}", message),
        }
    }
}

/// Staged reachability prober.
///
/// The configured services sit behind arbitrary HTTP servers with no
/// single canonical discovery endpoint, so reachability is established
/// through a cascade: bare base URL first, then a fixed list of common
/// REST/OpenAI/Ollama suffixes, then a last-resort HEAD. Every request is
/// issued exactly once, strictly sequentially, so the accumulated
/// endpoint list is deterministic and order-stable for display.
pub struct ConnectivityProber<'a> {
    transport: &'a dyn HttpTransport,
}

impl<'a> ConnectivityProber<'a> {
    pub fn new(transport: &'a dyn HttpTransport) -> Self {
        Self { transport }
    }

    /// Probe `base_url` through the cascade. Network failures mid-cascade
    /// are treated as "this attempt found nothing", never as fatal; only
    /// a hard-failed final HEAD yields `Unreachable`.
    pub fn probe(&self, base_url: &str) -> Result<ProbeResult, SettingsError> {
        let base = normalize_base_url(base_url)?;

        // Bare base first. Servers that answer a landing page or health
        // response at the root short-circuit the whole cascade.
        match self.transport.request("GET", &base, &[]) {
            Ok(response) if response.is_success() => {
                debug!("Probe {}: root answered {}", base, response.status);
                return Ok(ProbeResult::Reachable);
            }
            Ok(response) => {
                debug!("Probe {}: root answered {}", base, response.status);
            }
            Err(err) => {
                warn!("Probe {}: root request failed: {}", base, err);
            }
        }

        // Well-known suffixes, in fixed order.
        let mut found: Vec<String> = Vec::new();
        for endpoint in PROBE_ENDPOINTS {
            let url = join_endpoint(&base, endpoint);
            match self.transport.request("GET", &url, &[]) {
                Ok(response) if endpoint_exists(response.status) => {
                    debug!(
                        "Probe {}: endpoint {} answered {}",
                        base, endpoint, response.status
                    );
                    found.push((*endpoint).to_string());
                }
                Ok(_) => {}
                Err(err) => {
                    warn!("Probe {}: endpoint {} skipped: {}", base, endpoint, err);
                }
            }
        }
        if !found.is_empty() {
            return Ok(ProbeResult::ReachableWithEndpoints(found));
        }

        // Last resort: a HEAD to the bare base tells "listening but
        // unrecognized" apart from "not listening at all".
        match self.transport.request("HEAD", &base, &[]) {
            Ok(response) => Ok(ProbeResult::Degraded(response.status)),
            Err(err) => Ok(ProbeResult::Unreachable(err)),
        }
    }
}

/// 2xx works outright; 401 needs credentials and 405 rejects GET, but
/// both prove the path exists server-side.
fn endpoint_exists(status: u16) -> bool {
    (200..300).contains(&status) || status == 401 || status == 405
}
