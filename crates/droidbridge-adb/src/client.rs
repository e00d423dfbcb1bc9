//! Process invocation and server-scoped operations.
//!
//! [`AdbClient`] spawns exactly one `adb` process per command and applies
//! the output policy: any non-empty stderr is failure, regardless of exit
//! code. The [`Invoker`] trait is the seam tests use to substitute a fake.

use std::collections::BTreeMap;
use std::process::Stdio;
use std::time::Duration;

use async_trait::async_trait;
use serde::Serialize;
use tokio::process::Command;
use tracing::debug;

use crate::command::AdbCommand;
use crate::error::{AdbError, Result};
use crate::parse::{self, Device};

/// Runs adb commands. Implemented by [`AdbClient`] for real invocations and
/// by fakes in tests.
#[async_trait]
pub trait Invoker: Send + Sync {
    /// Run a single adb command and return its trimmed stdout.
    async fn run(&self, command: &AdbCommand) -> Result<String>;
}

/// Spawns one `adb` process per command. Cheap to clone; construct it once
/// and pass it by reference wherever commands are issued.
#[derive(Debug, Clone)]
pub struct AdbClient {
    adb_path: String,
    timeout: Option<Duration>,
}

impl AdbClient {
    pub fn new() -> Self {
        Self {
            adb_path: "adb".to_string(),
            timeout: None,
        }
    }

    /// Use an explicit adb executable instead of resolving `adb` on PATH.
    pub fn with_adb_path(mut self, path: impl Into<String>) -> Self {
        self.adb_path = path.into();
        self
    }

    /// Bound each command's runtime. Off by default: a hung device command
    /// blocks its caller indefinitely, matching adb's own behavior.
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    pub fn adb_path(&self) -> &str {
        &self.adb_path
    }
}

impl Default for AdbClient {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl Invoker for AdbClient {
    async fn run(&self, command: &AdbCommand) -> Result<String> {
        debug!(%command, "running adb");
        let mut process = Command::new(&self.adb_path);
        process
            .args(command.args())
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped());

        let output = match self.timeout {
            Some(limit) => tokio::time::timeout(limit, process.output())
                .await
                .map_err(|_| AdbError::Timeout(limit))?,
            None => process.output().await,
        }
        .map_err(AdbError::Spawn)?;

        evaluate(&output.stdout, &output.stderr)
    }
}

/// Output policy: non-empty stderr is failure even on exit code 0; success
/// is stdout with trailing whitespace trimmed.
fn evaluate(stdout: &[u8], stderr: &[u8]) -> Result<String> {
    if !stderr.is_empty() {
        let text = String::from_utf8_lossy(stderr);
        return Err(AdbError::Command(text.trim_end().to_string()));
    }
    Ok(String::from_utf8_lossy(stdout).trim_end().to_string())
}

/// Start the adb server. Safe to call repeatedly; the command is idempotent.
pub async fn start_server<I>(adb: &I) -> Result<()>
where
    I: Invoker + ?Sized,
{
    adb.run(&AdbCommand::start_server())
        .await
        .map(drop)
        .map_err(|e| e.context("Failed to start ADB server"))
}

pub async fn kill_server<I>(adb: &I) -> Result<()>
where
    I: Invoker + ?Sized,
{
    adb.run(&AdbCommand::kill_server())
        .await
        .map(drop)
        .map_err(|e| e.context("Failed to kill ADB server"))
}

/// List connected devices. Recomputed on every call, never cached.
pub async fn list_devices<I>(adb: &I) -> Result<Vec<Device>>
where
    I: Invoker + ?Sized,
{
    let output = adb
        .run(&AdbCommand::devices())
        .await
        .map_err(|e| e.context("Failed to get device list"))?;
    Ok(parse::parse_device_list(&output))
}

/// Connect to a device over TCP/IP, e.g. `192.168.1.100:5555`.
pub async fn connect<I>(adb: &I, host: &str) -> Result<()>
where
    I: Invoker + ?Sized,
{
    adb.run(&AdbCommand::connect(host)).await.map(drop)
}

pub async fn disconnect<I>(adb: &I, host: &str) -> Result<()>
where
    I: Invoker + ?Sized,
{
    adb.run(&AdbCommand::disconnect(host)).await.map(drop)
}

/// One device's entry in the bulk describe query.
#[derive(Debug, Clone, Serialize)]
pub struct DeviceReport {
    pub serial: String,
    pub state: String,
    pub properties: BTreeMap<String, String>,
}

/// Describe every connected device: one concurrent property read per
/// device, joined all-or-nothing. A single device's failure fails the
/// whole batch.
pub async fn describe_devices<I>(adb: &I) -> Result<Vec<DeviceReport>>
where
    I: Invoker + ?Sized,
{
    let devices = list_devices(adb).await?;
    futures::future::try_join_all(devices.into_iter().map(|device| async move {
        let output = adb.run(&AdbCommand::get_properties(&device.serial)).await?;
        Ok(DeviceReport {
            serial: device.serial,
            state: device.state,
            properties: parse::parse_device_props(&output),
        })
    }))
    .await
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn nonempty_stderr_is_failure_even_with_stdout() {
        let err = evaluate(b"partial output\n", b"error: device offline\n").unwrap_err();
        match err {
            AdbError::Command(text) => assert_eq!(text, "error: device offline"),
            other => panic!("expected Command error, got {other:?}"),
        }
    }

    #[test]
    fn empty_stderr_yields_trimmed_stdout() {
        assert_eq!(evaluate(b"Pixel 7\n", b"").unwrap(), "Pixel 7");
        assert_eq!(evaluate(b"", b"").unwrap(), "");
    }

    #[test]
    fn whitespace_only_stderr_still_fails() {
        assert!(matches!(
            evaluate(b"ok", b"\n"),
            Err(AdbError::Command(_))
        ));
    }
}
