//! Health probing for container liveness checks.
//!
//! A thin protocol client: an HTTP HEAD request over a raw TCP connection,
//! or a Unix-domain connect test. HTTPS is deliberately unsupported to keep
//! the binary small. The prober shares no state with the rendering
//! pipeline and runs only via the `check` subcommand.

use crate::error::{EnvwarpError, Result};
use std::io::{BufRead, BufReader, Write};
use std::net::{TcpStream, ToSocketAddrs};
use std::os::unix::net::UnixStream;
use std::time::Duration;

/// Socket timeout applied to the connect, write, and read of a probe.
pub const PROBE_TIMEOUT: Duration = Duration::from_secs(5);

/// Probe `address`, returning `Ok(())` iff the endpoint looks healthy.
///
/// Supported schemes: `http://host[:port][/path]`, `unix://path`, and
/// `unix/path`. Everything else, including `https://`, is a failure.
pub fn probe(address: &str) -> Result<()> {
    if address.starts_with("https://") {
        Err(EnvwarpError::Probe(
            "https health checks are not supported in this build".to_string(),
        ))
    } else if let Some(target) = address.strip_prefix("http://") {
        probe_http(target)
    } else if let Some(socket) = address
        .strip_prefix("unix://")
        .or_else(|| address.strip_prefix("unix/"))
    {
        probe_unix(socket)
    } else {
        Err(EnvwarpError::Probe(format!(
            "unsupported address format for check: {}",
            address
        )))
    }
}

/// Send a HEAD request and judge health by the status line alone.
/// Healthy while the server answers with a code below 500.
fn probe_http(target: &str) -> Result<()> {
    let (host, path) = match target.find('/') {
        Some(idx) => (&target[..idx], &target[idx..]),
        None => (target, "/"),
    };
    let authority = if host.contains(':') {
        host.to_string()
    } else {
        format!("{}:80", host)
    };

    let addr = authority
        .to_socket_addrs()
        .map_err(|e| EnvwarpError::Probe(format!("http check failed: {}", e)))?
        .next()
        .ok_or_else(|| {
            EnvwarpError::Probe(format!("http check failed: cannot resolve '{}'", authority))
        })?;

    let mut stream = TcpStream::connect_timeout(&addr, PROBE_TIMEOUT)
        .map_err(|e| EnvwarpError::Probe(format!("http check failed: {}", e)))?;
    stream
        .set_read_timeout(Some(PROBE_TIMEOUT))
        .and_then(|_| stream.set_write_timeout(Some(PROBE_TIMEOUT)))
        .map_err(|e| EnvwarpError::Probe(format!("http check failed: {}", e)))?;

    let request = format!(
        "HEAD {} HTTP/1.1\r\nHost: {}\r\nConnection: close\r\n\r\n",
        path, host
    );
    stream
        .write_all(request.as_bytes())
        .map_err(|e| EnvwarpError::Probe(format!("http check failed on write: {}", e)))?;

    let mut status_line = String::new();
    BufReader::new(stream)
        .read_line(&mut status_line)
        .map_err(|e| EnvwarpError::Probe(format!("http check failed on read: {}", e)))?;

    let code = parse_status_code(&status_line)?;
    if code < 500 {
        eprintln!(
            "HTTP check successful, service is online. Status code: {}",
            code
        );
        Ok(())
    } else {
        Err(EnvwarpError::Probe(format!(
            "http check failed, server error. Status code: {}",
            code
        )))
    }
}

/// Parse `HTTP/<ver> <code> ...` into the numeric status code.
fn parse_status_code(status_line: &str) -> Result<u16> {
    let mut parts = status_line.trim().splitn(3, ' ');
    let version = parts.next().unwrap_or_default();
    let code = parts.next().unwrap_or_default();
    if !version.starts_with("HTTP/") || code.is_empty() {
        return Err(EnvwarpError::Probe(format!(
            "http check failed, invalid status line: {:?}",
            status_line
        )));
    }
    code.parse().map_err(|_| {
        EnvwarpError::Probe(format!("http check failed, invalid status code: {:?}", code))
    })
}

/// A bare connect test; no payload is exchanged.
fn probe_unix(socket_path: &str) -> Result<()> {
    // std offers no connect timeout for Unix sockets; a local connect
    // either succeeds or fails immediately.
    UnixStream::connect(socket_path)
        .map_err(|e| EnvwarpError::Probe(format!("unix socket check failed: {}", e)))?;
    eprintln!("UNIX socket check successful.");
    Ok(())
}
