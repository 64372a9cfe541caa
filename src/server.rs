//! Server module
//!
//! Listener setup and the accept loop. The listener is created with
//! `SO_REUSEPORT`/`SO_REUSEADDR` so a replacement process can bind the
//! address before the old one finishes draining.

use hyper::server::conn::http1;
use hyper::service::service_fn;
use hyper_util::rt::TokioIo;
use socket2::{Domain, Protocol, Socket, Type};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use tokio::net::{TcpListener, TcpStream};

use crate::config::AppState;
use crate::handler;
use crate::logger;

/// Create a `TcpListener` with `SO_REUSEPORT` and `SO_REUSEADDR` enabled
pub fn create_reusable_listener(addr: std::net::SocketAddr) -> std::io::Result<TcpListener> {
    let domain = if addr.is_ipv4() {
        Domain::IPV4
    } else {
        Domain::IPV6
    };

    let socket = Socket::new(domain, Type::STREAM, Some(Protocol::TCP))?;
    socket.set_reuse_port(true)?;
    socket.set_reuse_address(true)?;

    // Non-blocking mode for async compatibility
    socket.set_nonblocking(true)?;

    socket.bind(&addr.into())?;
    socket.listen(128)?;

    let std_listener: std::net::TcpListener = socket.into();
    TcpListener::from_std(std_listener)
}

/// Accept loop; runs until SIGINT/Ctrl+C
pub async fn run(
    listener: TcpListener,
    state: Arc<AppState>,
) -> Result<(), Box<dyn std::error::Error>> {
    let active_connections = Arc::new(AtomicUsize::new(0));

    loop {
        tokio::select! {
            accept_result = listener.accept() => {
                match accept_result {
                    Ok((stream, peer_addr)) => {
                        accept_connection(stream, peer_addr, &state, &active_connections);
                    }
                    Err(e) => {
                        logger::log_error(&format!("Failed to accept connection: {e}"));
                    }
                }
            }

            _ = tokio::signal::ctrl_c() => {
                logger::log_shutdown();
                break;
            }
        }
    }

    Ok(())
}

/// Serve a single accepted connection on its own task
fn accept_connection(
    stream: TcpStream,
    peer_addr: std::net::SocketAddr,
    state: &Arc<AppState>,
    active_connections: &Arc<AtomicUsize>,
) {
    if state.config.logging.access_log {
        logger::log_connection_accepted(&peer_addr);
    }

    let state = Arc::clone(state);
    let counter = Arc::clone(active_connections);

    tokio::spawn(async move {
        counter.fetch_add(1, Ordering::Relaxed);

        let io = TokioIo::new(stream);
        let service = service_fn(move |req| {
            let state = Arc::clone(&state);
            async move { handler::handle_request(req, state).await }
        });

        if let Err(e) = http1::Builder::new().serve_connection(io, service).await {
            logger::log_connection_error(&e);
        }

        counter.fetch_sub(1, Ordering::Relaxed);
    });
}
