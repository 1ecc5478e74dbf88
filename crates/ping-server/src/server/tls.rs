//! TLS listener setup using rustls.
//!
//! The certificate chain and private key are PEM files managed outside the
//! service; this module only reads them and builds a `rustls::ServerConfig`.

use std::{io::BufReader, sync::Arc};

use rustls::{crypto::ring, ServerConfig};

use crate::error::ServerError;

/// Read the PEM files at `cert_path` and `key_path` and build the server config.
///
/// # Errors
///
/// Returns [`ServerError::Tls`] if either file cannot be read or parsed.
pub fn load_server_config(cert_path: &str, key_path: &str) -> Result<Arc<ServerConfig>, ServerError> {
    let cert_pem = std::fs::read(cert_path)
        .map_err(|e| ServerError::Tls(format!("failed to read certificate {cert_path}: {e}")))?;
    let key_pem = std::fs::read(key_path)
        .map_err(|e| ServerError::Tls(format!("failed to read private key {key_path}: {e}")))?;

    build_server_config(&cert_pem, &key_pem)
}

/// Build a [`rustls::ServerConfig`] from PEM-encoded certificate and private key bytes.
///
/// The ring provider is selected explicitly so the result does not depend on
/// a process-wide default. ALPN offers HTTP/2 and HTTP/1.1.
///
/// # Errors
///
/// Returns an error if the certificate or key cannot be parsed, or if rustls
/// rejects the configuration.
pub fn build_server_config(cert_pem: &[u8], key_pem: &[u8]) -> Result<Arc<ServerConfig>, ServerError> {
    let certs = rustls_pemfile::certs(&mut BufReader::new(cert_pem))
        .collect::<Result<Vec<_>, _>>()
        .map_err(|e| ServerError::Tls(format!("failed to parse TLS certificate chain: {e}")))?;
    if certs.is_empty() {
        return Err(ServerError::Tls("no certificate found in PEM data".into()));
    }

    let key = rustls_pemfile::private_key(&mut BufReader::new(key_pem))
        .map_err(|e| ServerError::Tls(format!("failed to read TLS private key: {e}")))?
        .ok_or_else(|| ServerError::Tls("no private key found in PEM data".into()))?;

    let mut config = ServerConfig::builder_with_provider(Arc::new(ring::default_provider()))
        .with_safe_default_protocol_versions()
        .map_err(|e| ServerError::Tls(format!("unsupported protocol versions: {e}")))?
        .with_no_client_auth()
        .with_single_cert(certs, key)
        .map_err(|e| ServerError::Tls(format!("failed to build rustls ServerConfig: {e}")))?;
    config.alpn_protocols = vec![b"h2".to_vec(), b"http/1.1".to_vec()];

    Ok(Arc::new(config))
}
