//! Logger module
//!
//! Console logging for server lifecycle, access, and error events.

use crate::config::Config;
use chrono::Local;
use hyper::{Method, Uri, Version};
use std::net::SocketAddr;

pub fn log_server_start(addr: &SocketAddr, config: &Config) {
    println!("======================================");
    println!("Items server started successfully");
    println!("Listening on: http://{addr}");
    println!("Log level: {}", config.logging.level);
    println!("Data file: {}", config.storage.data_file);
    println!("Pages directory: {}", config.pages.dir);
    if let Some(workers) = config.server.workers {
        println!("Worker threads: {workers}");
    }
    println!("Using Tokio runtime for concurrency");
    println!("======================================\n");
}

pub fn log_connection_accepted(peer_addr: &SocketAddr) {
    println!("[Connection] Accepted from: {peer_addr}");
}

pub fn log_connection_error(err: &impl std::fmt::Debug) {
    eprintln!("[ERROR] Failed to serve connection: {err:?}");
}

pub fn log_request(method: &Method, uri: &Uri, version: Version) {
    println!(
        "[{}] [Request] {method} {uri} {version:?}",
        Local::now().format("%d/%b/%Y:%H:%M:%S")
    );
}

pub fn log_headers_count(count: usize, show: bool) {
    if show {
        println!("[Headers] Count: {count}");
    }
}

pub fn log_response(size: usize) {
    println!("[Response] Sent 200 OK ({size} bytes)\n");
}

pub fn log_api_request(method: &str, path: &str, status: u16) {
    println!("[API] {method} {path} - {status}");
}

pub fn log_error(message: &str) {
    eprintln!("[ERROR] {message}");
}

pub fn log_warning(message: &str) {
    eprintln!("[WARN] {message}");
}

pub fn log_shutdown() {
    println!("\n[Shutdown] Signal received, stopping server");
}
