//! Fixtures and a minimal HTTPS client for exercising a running server.

use std::{net::SocketAddr, sync::Arc};

use axum::{
    body::{to_bytes, Body},
    http::{header, Request, StatusCode, Version},
};
use bytes::Bytes;
use hyper_util::rt::{TokioExecutor, TokioIo};
use rustls::{crypto::ring, pki_types::ServerName, ClientConfig, RootCertStore};
use tokio::net::TcpStream;
use tokio_rustls::TlsConnector;

pub const CERT: &str = concat!(env!("CARGO_MANIFEST_DIR"), "/testdata/localhost.crt");
pub const KEY: &str = concat!(env!("CARGO_MANIFEST_DIR"), "/testdata/localhost.key");
pub const CA_CERT: &str = concat!(env!("CARGO_MANIFEST_DIR"), "/testdata/ca.crt");

type BoxError = Box<dyn std::error::Error + Send + Sync>;

/// HTTP version the client offers through ALPN.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Protocol {
    Http1,
    Http2,
}

impl Protocol {
    fn alpn(self) -> &'static [u8] {
        match self {
            Protocol::Http1 => b"http/1.1",
            Protocol::Http2 => b"h2",
        }
    }
}

/// Response as seen by the test client.
#[derive(Debug)]
pub struct Reply {
    pub version: Version,
    pub status: StatusCode,
    pub content_type: Option<String>,
    pub body: Bytes,
}

/// Connector that trusts only the fixture CA and offers `protocol` via ALPN.
pub fn tls_connector(protocol: Protocol) -> TlsConnector {
    let ca_pem = std::fs::read(CA_CERT).unwrap();
    let mut roots = RootCertStore::empty();
    for cert in rustls_pemfile::certs(&mut ca_pem.as_slice()) {
        roots.add(cert.unwrap()).unwrap();
    }

    let mut config = ClientConfig::builder_with_provider(Arc::new(ring::default_provider()))
        .with_safe_default_protocol_versions()
        .unwrap()
        .with_root_certificates(roots)
        .with_no_client_auth();
    config.alpn_protocols = vec![protocol.alpn().to_vec()];
    TlsConnector::from(Arc::new(config))
}

/// Send one HTTP/1.1 `POST` over a fresh TLS connection to `addr`.
pub async fn post(addr: SocketAddr, path: &str, body: impl Into<Body>) -> Result<Reply, BoxError> {
    post_with(Protocol::Http1, addr, path, body).await
}

/// Send one `POST` over a fresh TLS connection, speaking `protocol`.
pub async fn post_with(
    protocol: Protocol,
    addr: SocketAddr,
    path: &str,
    body: impl Into<Body>,
) -> Result<Reply, BoxError> {
    let tcp = TcpStream::connect(addr).await?;
    let tls = tls_connector(protocol)
        .connect(ServerName::try_from("localhost")?, tcp)
        .await?;
    let io = TokioIo::new(tls);

    let res = match protocol {
        Protocol::Http1 => {
            let (mut sender, conn) = hyper::client::conn::http1::handshake(io).await?;
            tokio::spawn(conn);
            let req = Request::builder()
                .method("POST")
                .uri(path)
                .header(header::HOST, "localhost")
                .body(body.into())?;
            sender.send_request(req).await?
        }
        Protocol::Http2 => {
            let (mut sender, conn) =
                hyper::client::conn::http2::handshake(TokioExecutor::new(), io).await?;
            tokio::spawn(conn);
            let req = Request::builder()
                .method("POST")
                .uri(format!("https://localhost{path}"))
                .body(body.into())?;
            sender.send_request(req).await?
        }
    };

    let version = res.version();
    let status = res.status();
    let content_type = res
        .headers()
        .get(header::CONTENT_TYPE)
        .and_then(|v| v.to_str().ok())
        .map(str::to_owned);
    let body = to_bytes(Body::new(res.into_body()), usize::MAX).await?;

    Ok(Reply {
        version,
        status,
        content_type,
        body,
    })
}
