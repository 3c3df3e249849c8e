// Server module entry point
// Binding, the accept loop, and per-connection serving

pub mod connection;
pub mod listener;

// loop is a keyword, so the module is named server_loop
#[path = "loop.rs"]
pub mod server_loop;

pub use listener::create_reusable_listener;

use std::net::SocketAddr;
use std::sync::Arc;

use tokio::net::TcpListener;
use tokio::sync::Notify;
use tokio::task::JoinHandle;

use crate::config::{AppState, Config};
use crate::registry::HandlerRegistry;

/// A bound server that has not started accepting yet.
///
/// The configuration and handler registry are frozen at bind time;
/// nothing mutates them once serving starts.
pub struct Server {
    listener: TcpListener,
    addr: SocketAddr,
    state: Arc<AppState>,
    shutdown: Arc<Notify>,
}

impl Server {
    /// Bind the configured address and pair it with a handler registry.
    ///
    /// Must be called from within a Tokio runtime. Binding port 0 picks a
    /// free port; [`local_addr`](Self::local_addr) reports the result.
    ///
    /// # Errors
    ///
    /// Fails when the configured address does not parse or the listener
    /// cannot be bound.
    pub fn bind(config: Config, registry: HandlerRegistry) -> std::io::Result<Self> {
        let addr = config
            .get_socket_addr()
            .map_err(|e| std::io::Error::new(std::io::ErrorKind::InvalidInput, e))?;
        let listener = create_reusable_listener(addr)?;
        let addr = listener.local_addr()?;

        Ok(Self {
            listener,
            addr,
            state: Arc::new(AppState::new(config, registry)),
            shutdown: Arc::new(Notify::new()),
        })
    }

    /// The address the listener actually bound.
    pub fn local_addr(&self) -> SocketAddr {
        self.addr
    }

    /// Move the accept loop onto its own task and return a handle that
    /// can stop it.
    pub fn spawn(self) -> ServerHandle {
        let shutdown = Arc::clone(&self.shutdown);
        let addr = self.addr;
        let task = tokio::spawn(self.run());

        ServerHandle {
            addr,
            shutdown,
            task,
        }
    }

    /// Drive the accept loop on the caller's task until the shutdown
    /// signal fires.
    pub async fn run(self) {
        server_loop::run_accept_loop(self.listener, self.state, self.shutdown).await;
    }
}

/// Handle to a running server: its address and the means to stop it.
pub struct ServerHandle {
    addr: SocketAddr,
    shutdown: Arc<Notify>,
    task: JoinHandle<()>,
}

impl ServerHandle {
    /// The address the server is serving on.
    pub fn addr(&self) -> SocketAddr {
        self.addr
    }

    /// Signal the accept loop to stop and wait for it to wind down.
    ///
    /// When this returns the listener is closed and the port can be bound
    /// again. Connections already accepted drain on their own tasks.
    pub async fn stop(self) {
        self.shutdown.notify_one();
        let _ = self.task.await;
    }
}
