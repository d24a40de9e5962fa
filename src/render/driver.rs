// src/render/driver.rs
//! A WebDriver binary (chromedriver, geckodriver) owned for the whole run.
//!
//! Spawned on the port of the configured endpoint and killed on drop.

use std::net::{TcpStream, ToSocketAddrs};
use std::path::{Path, PathBuf};
use std::process::{Child, Command, Stdio};
use std::thread;
use std::time::{Duration, Instant};

use log::{debug, info};
use url::Url;

use crate::config::consts::DRIVER_POLL_MS;
use crate::error::{RenderError, RenderErrorKind};

pub struct DriverProcess {
    child: Child,
    binary: PathBuf,
}

impl DriverProcess {
    /// Start `binary --port=<port>` and wait until `endpoint` accepts connections.
    pub fn spawn(binary: &Path, endpoint: &str, timeout: Duration) -> Result<Self, RenderError> {
        let fail = |msg: String| RenderError::new(endpoint, RenderErrorKind::Driver(msg));

        let url = Url::parse(endpoint).map_err(|e| fail(format!("invalid endpoint: {e}")))?;
        let port = url.port_or_known_default().ok_or_else(|| fail("endpoint has no port".into()))?;

        info!("Starting {} on port {port}", binary.display());
        let child = Command::new(binary)
            .arg(format!("--port={port}"))
            .stdout(Stdio::null())
            .stderr(Stdio::null())
            .spawn()
            .map_err(|e| fail(format!("could not start {}: {e}", binary.display())))?;
        let mut driver = Self { child, binary: binary.to_path_buf() };

        let deadline = Instant::now() + timeout;
        loop {
            if endpoint_reachable(&url) {
                debug!("{} accepting connections", driver.binary.display());
                return Ok(driver);
            }
            if let Ok(Some(status)) = driver.child.try_wait() {
                return Err(fail(format!("{} exited early ({status})", driver.binary.display())));
            }
            if Instant::now() >= deadline {
                return Err(fail(format!(
                    "{} not reachable after {}s",
                    driver.binary.display(),
                    timeout.as_secs()
                )));
            }
            thread::sleep(Duration::from_millis(DRIVER_POLL_MS));
        }
    }
}

impl Drop for DriverProcess {
    fn drop(&mut self) {
        debug!("Stopping {}", self.binary.display());
        let _ = self.child.kill();
        let _ = self.child.wait();
    }
}

/// True if something is listening on the endpoint's host and port.
pub(crate) fn endpoint_reachable(url: &Url) -> bool {
    let (Some(host), Some(port)) = (url.host_str(), url.port_or_known_default()) else {
        return false;
    };
    let Ok(addrs) = (host, port).to_socket_addrs() else {
        return false;
    };
    addrs
        .into_iter()
        .any(|addr| TcpStream::connect_timeout(&addr, Duration::from_millis(500)).is_ok())
}
