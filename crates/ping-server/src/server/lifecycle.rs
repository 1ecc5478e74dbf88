//! TLS server lifecycle: bind, accept, serve, drain.
//!
//! ```text
//! Created ──serve()──▶ Listening ──token cancelled──▶ ShuttingDown ──drained──▶ Stopped
//! ```
//!
//! Every accepted TCP connection is TLS-terminated and served by hyper on its
//! own task. Cancelling the shutdown token stops the accept loop, drops the
//! listener, and asks every live connection to finish its in-flight requests
//! and close. `serve` returns once all connection tasks are gone or the
//! configured grace period runs out.

use std::{io, net::SocketAddr, sync::Arc};

use axum::{extract::Request, Router};
use hyper::body::Incoming;
use hyper_util::{
    rt::{TokioExecutor, TokioIo},
    server::conn::auto,
};
use tokio::{
    net::{TcpListener, TcpStream},
    sync::watch,
};
use tokio_rustls::TlsAcceptor;
use tokio_util::{sync::CancellationToken, task::TaskTracker};
use tower::Service;
use tracing::{debug, error, info, warn};

use super::{router, state::Dependencies, tls};
use crate::{config::Config, error::ServerError};

/// Observable lifecycle state of a [`Server`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ServerState {
    /// Configured with a router, no socket open.
    Created,
    /// Accepting connections.
    Listening,
    /// No longer accepting; waiting for in-flight requests.
    ShuttingDown,
    /// Listener closed and connections drained.
    Stopped,
}

/// Why the accept loop ended.
enum LoopExit {
    /// The shutdown token fired. Translated to `Ok(())`.
    Closed,
    /// The listener itself failed.
    Failed(io::Error),
}

/// Per-connection shutdown signals.
#[derive(Clone)]
struct ConnectionSignals {
    /// Finish in-flight requests, then close.
    drain: CancellationToken,
    /// Close now; the grace period is over.
    abort: CancellationToken,
}

/// HTTPS server owning its router, configuration, and shutdown token.
pub struct Server {
    config: Config,
    router: Router,
    shutdown: CancellationToken,
    state: watch::Sender<ServerState>,
}

impl Server {
    /// Create a server answering `POST /ping` with `deps`.
    pub fn new(config: Config, deps: Dependencies, shutdown: CancellationToken) -> Self {
        let router = router::build(deps, config.request_timeout());
        Self::with_router(config, router, shutdown)
    }

    /// Create a server whose [`Dependencies`] come from `config` itself.
    pub fn from_config(config: Config, shutdown: CancellationToken) -> Self {
        let deps = Dependencies::from(&config);
        Self::new(config, deps, shutdown)
    }

    /// Create a server around an already-built router.
    pub fn with_router(config: Config, router: Router, shutdown: CancellationToken) -> Self {
        let (state, _) = watch::channel(ServerState::Created);
        Self {
            config,
            router,
            shutdown,
            state,
        }
    }

    pub fn state(&self) -> ServerState {
        *self.state.borrow()
    }

    /// Receiver that observes every state transition.
    pub fn subscribe(&self) -> watch::Receiver<ServerState> {
        self.state.subscribe()
    }

    /// Load TLS material, bind `0.0.0.0:<port>`, and serve until shutdown.
    ///
    /// # Errors
    ///
    /// Fails immediately on an invalid port, unreadable or invalid
    /// certificate/key, or bind failure, and later on a fatal accept error.
    /// Shutdown through the token returns `Ok(())`.
    pub async fn serve(self) -> Result<(), ServerError> {
        self.config
            .validate()
            .map_err(|e| ServerError::InvalidConfig(format!("{e:#}")))?;
        let tls_config = tls::load_server_config(&self.config.tls_cert_path, &self.config.tls_key_path)?;

        let addr: SocketAddr = ([0, 0, 0, 0], self.config.port).into();
        let listener = TcpListener::bind(addr)
            .await
            .map_err(|source| ServerError::Bind { addr, source })?;

        self.run(listener, tls_config).await
    }

    /// Serve on an already-bound listener; the configured port is ignored.
    ///
    /// # Errors
    ///
    /// Same as [`Server::serve`], minus the port check and the bind step.
    pub async fn serve_with_listener(self, listener: TcpListener) -> Result<(), ServerError> {
        self.config
            .validate_settings()
            .map_err(|e| ServerError::InvalidConfig(format!("{e:#}")))?;
        let tls_config = tls::load_server_config(&self.config.tls_cert_path, &self.config.tls_key_path)?;
        self.run(listener, tls_config).await
    }

    async fn run(
        self,
        listener: TcpListener,
        tls_config: Arc<rustls::ServerConfig>,
    ) -> Result<(), ServerError> {
        let acceptor = TlsAcceptor::from(tls_config);
        let tracker = TaskTracker::new();
        let signals = ConnectionSignals {
            drain: self.shutdown.child_token(),
            abort: CancellationToken::new(),
        };

        match listener.local_addr() {
            Ok(addr) => info!(addr = %addr, "listening"),
            Err(e) => warn!(error = %e, "listening on unknown address"),
        }
        self.state.send_replace(ServerState::Listening);

        let exit = self
            .accept_loop(&listener, &acceptor, &tracker, &signals)
            .await;

        self.state.send_replace(ServerState::ShuttingDown);
        drop(listener);
        signals.drain.cancel();
        tracker.close();
        info!(connections = tracker.len(), "shutting down, draining connections");

        match self.config.shutdown_grace_period() {
            None => tracker.wait().await,
            Some(grace) => {
                if tokio::time::timeout(grace, tracker.wait()).await.is_err() {
                    warn!(
                        connections = tracker.len(),
                        grace_secs = grace.as_secs(),
                        "grace period elapsed, closing remaining connections"
                    );
                    signals.abort.cancel();
                    tracker.wait().await;
                }
            }
        }

        self.state.send_replace(ServerState::Stopped);
        match exit {
            LoopExit::Closed => {
                info!("server stopped");
                Ok(())
            }
            LoopExit::Failed(e) => Err(ServerError::Accept(e)),
        }
    }

    async fn accept_loop(
        &self,
        listener: &TcpListener,
        acceptor: &TlsAcceptor,
        tracker: &TaskTracker,
        signals: &ConnectionSignals,
    ) -> LoopExit {
        loop {
            let (stream, peer) = tokio::select! {
                biased;
                _ = self.shutdown.cancelled() => return LoopExit::Closed,
                accepted = listener.accept() => match accepted {
                    Ok(conn) => conn,
                    Err(e) if is_connection_error(&e) => {
                        debug!(error = %e, "accept failed for a single connection");
                        continue;
                    }
                    Err(e) => {
                        error!(error = %e, "listener failed");
                        return LoopExit::Failed(e);
                    }
                },
            };

            debug!(%peer, "accepted TCP connection");
            tracker.spawn(serve_connection(
                stream,
                peer,
                acceptor.clone(),
                self.router.clone(),
                signals.clone(),
            ));
        }
    }
}

/// TLS handshake, then HTTP/1.1 or HTTP/2 on one connection until it closes.
async fn serve_connection(
    stream: TcpStream,
    peer: SocketAddr,
    acceptor: TlsAcceptor,
    router: Router,
    signals: ConnectionSignals,
) {
    let tls_stream = tokio::select! {
        handshake = acceptor.accept(stream) => match handshake {
            Ok(s) => s,
            Err(e) => {
                debug!(%peer, error = %e, "TLS handshake failed");
                return;
            }
        },
        _ = signals.abort.cancelled() => return,
    };

    let service = hyper::service::service_fn(move |req: Request<Incoming>| router.clone().call(req));
    let builder = auto::Builder::new(TokioExecutor::new());
    let conn = builder.serve_connection(TokioIo::new(tls_stream), service);
    tokio::pin!(conn);

    let mut draining = false;
    loop {
        tokio::select! {
            res = conn.as_mut() => {
                if let Err(e) = res {
                    debug!(%peer, error = %e, "connection closed with error");
                }
                break;
            }
            _ = signals.drain.cancelled(), if !draining => {
                draining = true;
                conn.as_mut().graceful_shutdown();
            }
            _ = signals.abort.cancelled() => {
                warn!(%peer, "dropping connection with requests still in flight");
                break;
            }
        }
    }
}

/// Accept errors that concern one connection and leave the listener usable.
fn is_connection_error(e: &io::Error) -> bool {
    matches!(
        e.kind(),
        io::ErrorKind::ConnectionRefused
            | io::ErrorKind::ConnectionAborted
            | io::ErrorKind::ConnectionReset
            | io::ErrorKind::Interrupted
    )
}
