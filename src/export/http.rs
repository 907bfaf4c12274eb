//! Blocking HTTP transport for the export endpoint.

use std::time::Duration;

use tracing::debug;

use super::{ExportError, ExportRequest};
use crate::config::DashboardConfig;
use crate::traits::ExportTransport;

/// POSTs the request as JSON and returns the binary body of a 2xx response
#[derive(Debug, Clone)]
pub struct HttpExportTransport {
    client: reqwest::blocking::Client,
    url: String,
}

impl HttpExportTransport {
    pub fn new(url: impl Into<String>, timeout: Duration) -> Result<Self, ExportError> {
        let client = reqwest::blocking::Client::builder()
            .user_agent(concat!("cryptodash/", env!("CARGO_PKG_VERSION")))
            .timeout(timeout)
            .build()
            .map_err(|e| ExportError::Transport(format!("Failed to create HTTP client: {}", e)))?;
        Ok(Self {
            client,
            url: url.into(),
        })
    }

    /// Transport for the endpoint and timeout of `config`
    pub fn from_config(config: &DashboardConfig) -> Result<Self, ExportError> {
        Self::new(config.export_url(), config.request_timeout())
    }

    pub fn url(&self) -> &str {
        &self.url
    }
}

impl ExportTransport for HttpExportTransport {
    fn request_export(&self, request: &ExportRequest) -> Result<Vec<u8>, ExportError> {
        debug!(url = %self.url, format = request.format.extension(), rows = request.results.len(), "sending export request");

        let response = self
            .client
            .post(&self.url)
            .json(request)
            .send()
            .map_err(|e| ExportError::Transport(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            return Err(ExportError::Status(status.as_u16()));
        }

        let bytes = response
            .bytes()
            .map_err(|e| ExportError::Transport(e.to_string()))?;
        Ok(bytes.to_vec())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::export::ExportFormat;

    #[test]
    fn test_from_config_uses_export_url() {
        let transport = HttpExportTransport::from_config(&DashboardConfig::default()).unwrap();
        assert_eq!(transport.url(), "http://127.0.0.1:5000/api/online/exportar");
    }

    #[test]
    fn test_unreachable_endpoint_is_transport_error() {
        // Nothing listens on the local discard port
        let transport = HttpExportTransport::new("http://127.0.0.1:9/api/online/exportar", Duration::from_secs(2)).unwrap();
        let request = ExportRequest {
            format: ExportFormat::Csv,
            results: vec![serde_json::json!({"cripto": "BTC"})],
        };
        assert!(matches!(transport.request_export(&request), Err(ExportError::Transport(_))));
    }
}
