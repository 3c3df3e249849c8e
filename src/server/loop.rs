// Server loop module
// Accepts connections until the stop signal fires

use std::sync::Arc;

use tokio::net::TcpListener;
use tokio::sync::Notify;

use super::connection::spawn_connection;
use crate::config::AppState;
use crate::logger;

/// Accept connections until `shutdown` is notified.
///
/// Accept errors are logged and the loop keeps going; one failed accept
/// must not take the server down. On stop the listener is dropped, which
/// releases the port, while in-flight connections finish on their own
/// tasks.
pub async fn run_accept_loop(listener: TcpListener, state: Arc<AppState>, shutdown: Arc<Notify>) {
    loop {
        tokio::select! {
            accept_result = listener.accept() => {
                match accept_result {
                    Ok((stream, peer_addr)) => {
                        if state.config.logging.access_log {
                            logger::log_connection_accepted(&peer_addr);
                        }
                        spawn_connection(stream, peer_addr, Arc::clone(&state));
                    }
                    Err(e) => {
                        logger::log_error(&format!("Failed to accept connection: {e}"));
                    }
                }
            }

            () = shutdown.notified() => {
                if let Ok(addr) = listener.local_addr() {
                    logger::log_server_stopped(&addr);
                }
                break;
            }
        }
    }
}
