//! Connector stack for the default transport: TCP, then rustls.

use hyper_rustls::{HttpsConnector, HttpsConnectorBuilder};
use hyper_util::client::legacy::connect::HttpConnector;

use crate::ClientConfig;

/// TCP connector honoring the configured connect timeout.
///
/// `enforce_http(false)` lets `https://` URIs through to the TLS layer.
fn tcp_connector(config: &ClientConfig) -> HttpConnector {
    let mut tcp = HttpConnector::new();
    tcp.enforce_http(false);
    tcp.set_connect_timeout(Some(config.connect_timeout));
    tcp
}

/// Client TLS settings trusting the Mozilla root certificates.
fn tls_config() -> rustls::ClientConfig {
    let roots: rustls::RootCertStore = webpki_roots::TLS_SERVER_ROOTS.iter().cloned().collect();
    rustls::ClientConfig::builder()
        .with_root_certificates(roots)
        .with_no_client_auth()
}

/// HTTPS connector that also accepts plain `http://` URLs and negotiates
/// HTTP/1.1 or HTTP/2.
#[must_use]
pub fn https_connector(config: &ClientConfig) -> HttpsConnector<HttpConnector> {
    HttpsConnectorBuilder::new()
        .with_tls_config(tls_config())
        .https_or_http()
        .enable_http1()
        .enable_http2()
        .wrap_connector(tcp_connector(config))
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use super::*;

    #[test]
    fn tcp_connector_accepts_https_uris() {
        let config = ClientConfig::builder()
            .connect_timeout(Duration::from_millis(250))
            .build();
        let _tcp = tcp_connector(&config);
        let _https = https_connector(&config);
    }
}
