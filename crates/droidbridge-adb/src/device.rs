//! Device-level commands: screenshots, properties, packages, app lifecycle.

use std::collections::BTreeMap;
use std::path::Path;

use serde::Serialize;

use crate::client::Invoker;
use crate::command::AdbCommand;
use crate::error::Result;
use crate::parse;

/// Fixed on-device path screenshots are captured to before being pulled.
/// Not unique per call: concurrent screenshots on one device race on it.
pub const DEVICE_SCREENSHOT_PATH: &str = "/sdcard/screenshot.png";

/// Model and Android version of a device.
#[derive(Debug, Clone, Serialize)]
pub struct DeviceInfo {
    pub model: String,
    pub android_version: String,
}

/// Issues device-scoped commands. Like [`crate::InputController`], a
/// per-call value object.
pub struct DeviceController<'a, I: ?Sized> {
    adb: &'a I,
    serial: &'a str,
}

impl<'a, I> DeviceController<'a, I>
where
    I: Invoker + ?Sized,
{
    pub fn new(adb: &'a I, serial: &'a str) -> Self {
        Self { adb, serial }
    }

    /// Capture a screenshot and save it to `output_path` on the local
    /// machine. Three steps: screencap to [`DEVICE_SCREENSHOT_PATH`], pull
    /// to the local path (creating parent directories as needed), then
    /// remove the device-side file. The first failing step aborts the
    /// sequence; if the pull or removal fails after the capture, the temp
    /// file is left behind on the device.
    pub async fn take_screenshot(&self, output_path: &Path) -> Result<()> {
        self.screenshot_steps(output_path)
            .await
            .map_err(|e| e.context("Failed to take screenshot"))
    }

    async fn screenshot_steps(&self, output_path: &Path) -> Result<()> {
        self.adb
            .run(&AdbCommand::screencap(self.serial, DEVICE_SCREENSHOT_PATH))
            .await?;

        if let Some(parent) = output_path.parent() {
            if !parent.as_os_str().is_empty() {
                tokio::fs::create_dir_all(parent).await?;
            }
        }

        let local = output_path.to_string_lossy();
        self.adb
            .run(&AdbCommand::pull(self.serial, DEVICE_SCREENSHOT_PATH, &local))
            .await?;

        self.adb
            .run(&AdbCommand::remove(self.serial, DEVICE_SCREENSHOT_PATH))
            .await
            .map(drop)
    }

    /// Read the device model and Android version.
    pub async fn device_info(&self) -> Result<DeviceInfo> {
        let model = self
            .adb
            .run(&AdbCommand::get_property(self.serial, "ro.product.model"))
            .await
            .map_err(|e| e.context("Failed to get device info"))?;
        let android_version = self
            .adb
            .run(&AdbCommand::get_property(
                self.serial,
                "ro.build.version.release",
            ))
            .await
            .map_err(|e| e.context("Failed to get device info"))?;
        Ok(DeviceInfo {
            model,
            android_version,
        })
    }

    /// Full `getprop` map for this device.
    pub async fn properties(&self) -> Result<BTreeMap<String, String>> {
        let output = self
            .adb
            .run(&AdbCommand::get_properties(self.serial))
            .await
            .map_err(|e| e.context("Failed to get device properties"))?;
        Ok(parse::parse_device_props(&output))
    }

    pub async fn list_packages(&self) -> Result<Vec<String>> {
        let output = self
            .adb
            .run(&AdbCommand::list_packages(self.serial))
            .await
            .map_err(|e| e.context("Failed to list packages"))?;
        Ok(parse::parse_package_list(&output))
    }

    pub async fn install(&self, apk_path: &str) -> Result<()> {
        self.adb
            .run(&AdbCommand::install(self.serial, apk_path))
            .await
            .map(drop)
            .map_err(|e| e.context("Failed to install app"))
    }

    pub async fn uninstall(&self, package: &str) -> Result<()> {
        self.adb
            .run(&AdbCommand::uninstall(self.serial, package))
            .await
            .map(drop)
            .map_err(|e| e.context("Failed to uninstall app"))
    }

    pub async fn start_app(&self, package: &str) -> Result<()> {
        self.adb
            .run(&AdbCommand::start_app(self.serial, package))
            .await
            .map(drop)
            .map_err(|e| e.context("Failed to start app"))
    }

    pub async fn stop_app(&self, package: &str) -> Result<()> {
        self.adb
            .run(&AdbCommand::stop_app(self.serial, package))
            .await
            .map(drop)
            .map_err(|e| e.context("Failed to stop app"))
    }
}
