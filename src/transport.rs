use crate::constants::{HTTP_CONNECT_TIMEOUT_SECS, HTTP_READ_TIMEOUT_SECS};
use std::io::Read;
use std::time::Duration;

/// A single HTTP exchange as seen by the settings core.
#[derive(Debug, Clone)]
pub struct HttpResponse {
    pub status: u16,
    pub status_text: String,
    pub headers: Vec<(String, String)>,
    pub body: Vec<u8>,
}

impl HttpResponse {
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

/// Injected HTTP collaborator. Implementations own timeout and redirect
/// policy; the core issues one request at a time and inherits whatever
/// the transport provides.
pub trait HttpTransport: Send + Sync {
    /// Err carries a human-readable description of a transport-level
    /// failure (DNS, refused connection, timeout). A non-2xx status is
    /// not an error at this layer.
    fn request(
        &self,
        method: &str,
        url: &str,
        headers: &[(String, String)],
    ) -> Result<HttpResponse, String>;
}

/// Default transport backed by a ureq agent with fixed timeouts.
pub struct UreqTransport {
    agent: ureq::Agent,
}

impl UreqTransport {
    pub fn new() -> Self {
        let agent = ureq::builder()
            .timeout_connect(Duration::from_secs(HTTP_CONNECT_TIMEOUT_SECS))
            .timeout_read(Duration::from_secs(HTTP_READ_TIMEOUT_SECS))
            .build();
        Self { agent }
    }
}

impl Default for UreqTransport {
    fn default() -> Self {
        Self::new()
    }
}

impl HttpTransport for UreqTransport {
    fn request(
        &self,
        method: &str,
        url: &str,
        headers: &[(String, String)],
    ) -> Result<HttpResponse, String> {
        let mut request = self.agent.request(method, url);
        for (name, value) in headers {
            request = request.set(name, value);
        }
        match request.call() {
            Ok(response) => read_response(response),
            // ureq reports non-2xx statuses as errors; fold them back
            // into plain responses
            Err(ureq::Error::Status(_, response)) => read_response(response),
            Err(ureq::Error::Transport(err)) => Err(err.to_string()),
        }
    }
}

fn read_response(response: ureq::Response) -> Result<HttpResponse, String> {
    let status = response.status();
    let status_text = response.status_text().to_string();
    let headers: Vec<(String, String)> = response
        .headers_names()
        .into_iter()
        .filter_map(|name| {
            response
                .header(&name)
                .map(|value| (name.clone(), value.to_string()))
        })
        .collect();
    let mut body = Vec::new();
    response
        .into_reader()
        .read_to_end(&mut body)
        .map_err(|e| format!("Failed to read response body: {}", e))?;
    Ok(HttpResponse {
        status,
        status_text,
        headers,
        body,
    })
}


#[cfg(test)]
mod tests {
    use super::mock::{status_response, MockTransport};
    use super::*;

    #[test]
    fn success_covers_the_whole_2xx_range() {
        assert!(status_response(200).is_success());
        assert!(status_response(204).is_success());
        assert!(!status_response(301).is_success());
        assert!(!status_response(401).is_success());
    }

    #[test]
    fn mock_transport_records_requests_in_order() {
        let mock = MockTransport::with_fallback_status(404);
        let _ = mock.request("GET", "http://a.test", &[]);
        let _ = mock.request("HEAD", "http://b.test", &[]);
        let recorded = mock.recorded();
        assert_eq!(recorded.len(), 2);
        assert_eq!(recorded[0].method, "GET");
        assert_eq!(recorded[1].url, "http://b.test");
    }

    // --- ureq transport: unreachable endpoint surfaces a transport error (no panic) ---
    #[test]
    fn ureq_transport_reports_error_for_unreachable_endpoint() {
        let transport = UreqTransport::new();
        let result = transport.request("GET", "http://127.0.0.1:19999/v1/models", &[]);
        assert!(
            result.is_err(),
            "expected transport error for unreachable endpoint, got: {:?}",
            result.map(|r| r.status)
        );
    }
}
