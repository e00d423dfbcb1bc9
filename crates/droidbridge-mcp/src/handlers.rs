//! Tool handler implementations.
//!
//! Handlers are generic over [`Invoker`] so tests can script a fake adb.
//! Each one builds a per-call controller, runs the operation, and maps the
//! outcome to an MCP result.

use std::path::Path;

use droidbridge_adb::{client, DeviceController, InputController, Invoker};
use rmcp::model::CallToolResult;
use rmcp::ErrorData as McpError;

use crate::params::*;
use crate::result::{internal_error, invalid_params, json_success, text_success};

/// Resolve a target serial: explicit wins, otherwise auto-select when
/// exactly one device is connected.
pub async fn resolve_device<I>(adb: &I, device: Option<&str>) -> Result<String, McpError>
where
    I: Invoker + ?Sized,
{
    if let Some(serial) = device {
        return Ok(serial.to_string());
    }
    let devices = client::list_devices(adb)
        .await
        .map_err(|e| internal_error(format!("Device error: {e}")))?;
    match devices.len() {
        0 => Err(internal_error("No ADB devices connected")),
        1 => Ok(devices[0].serial.clone()),
        n => Err(invalid_params(format!(
            "Multiple devices connected ({n}), specify a serial: {:?}",
            devices.iter().map(|d| &d.serial).collect::<Vec<_>>()
        ))),
    }
}

pub async fn devices<I>(adb: &I, _params: DevicesParams) -> Result<CallToolResult, McpError>
where
    I: Invoker + ?Sized,
{
    let devices = client::list_devices(adb)
        .await
        .map_err(|e| internal_error(format!("Failed to list devices: {e}")))?;
    json_success(&devices)
}

pub async fn connect_device<I>(adb: &I, params: ConnectParams) -> Result<CallToolResult, McpError>
where
    I: Invoker + ?Sized,
{
    client::connect(adb, &params.host)
        .await
        .map_err(|e| internal_error(format!("Connect failed: {e}")))?;
    Ok(text_success(format!("Connected to device at {}", params.host)))
}

pub async fn disconnect_device<I>(
    adb: &I,
    params: DisconnectParams,
) -> Result<CallToolResult, McpError>
where
    I: Invoker + ?Sized,
{
    client::disconnect(adb, &params.host)
        .await
        .map_err(|e| internal_error(format!("Disconnect failed: {e}")))?;
    Ok(text_success(format!(
        "Disconnected from device at {}",
        params.host
    )))
}

pub async fn device_info<I>(adb: &I, params: DeviceInfoParams) -> Result<CallToolResult, McpError>
where
    I: Invoker + ?Sized,
{
    let serial = resolve_device(adb, params.device.as_deref()).await?;
    let info = DeviceController::new(adb, &serial)
        .device_info()
        .await
        .map_err(|e| internal_error(e.to_string()))?;
    json_success(&info)
}

pub async fn list_packages<I>(
    adb: &I,
    params: ListPackagesParams,
) -> Result<CallToolResult, McpError>
where
    I: Invoker + ?Sized,
{
    let serial = resolve_device(adb, params.device.as_deref()).await?;
    let packages = DeviceController::new(adb, &serial)
        .list_packages()
        .await
        .map_err(|e| internal_error(e.to_string()))?;
    json_success(&packages)
}

pub async fn install_app<I>(adb: &I, params: InstallAppParams) -> Result<CallToolResult, McpError>
where
    I: Invoker + ?Sized,
{
    let serial = resolve_device(adb, params.device.as_deref()).await?;
    DeviceController::new(adb, &serial)
        .install(&params.apk_path)
        .await
        .map_err(|e| internal_error(e.to_string()))?;
    Ok(text_success(format!("Installed {}", params.apk_path)))
}

pub async fn uninstall_app<I>(
    adb: &I,
    params: UninstallAppParams,
) -> Result<CallToolResult, McpError>
where
    I: Invoker + ?Sized,
{
    let serial = resolve_device(adb, params.device.as_deref()).await?;
    DeviceController::new(adb, &serial)
        .uninstall(&params.package)
        .await
        .map_err(|e| internal_error(e.to_string()))?;
    Ok(text_success(format!("Uninstalled {}", params.package)))
}

pub async fn start_app<I>(adb: &I, params: StartAppParams) -> Result<CallToolResult, McpError>
where
    I: Invoker + ?Sized,
{
    let serial = resolve_device(adb, params.device.as_deref()).await?;
    DeviceController::new(adb, &serial)
        .start_app(&params.package)
        .await
        .map_err(|e| internal_error(e.to_string()))?;
    Ok(text_success(format!("Started {}", params.package)))
}

pub async fn stop_app<I>(adb: &I, params: StopAppParams) -> Result<CallToolResult, McpError>
where
    I: Invoker + ?Sized,
{
    let serial = resolve_device(adb, params.device.as_deref()).await?;
    DeviceController::new(adb, &serial)
        .stop_app(&params.package)
        .await
        .map_err(|e| internal_error(e.to_string()))?;
    Ok(text_success(format!("Stopped {}", params.package)))
}

pub async fn tap<I>(adb: &I, params: TapParams) -> Result<CallToolResult, McpError>
where
    I: Invoker + ?Sized,
{
    let serial = resolve_device(adb, params.device.as_deref()).await?;
    InputController::new(adb, &serial)
        .tap(params.x, params.y)
        .await
        .map_err(|e| internal_error(format!("Tap failed: {e}")))?;
    Ok(text_success(format!("Tapped at ({}, {})", params.x, params.y)))
}

pub async fn swipe<I>(adb: &I, params: SwipeParams) -> Result<CallToolResult, McpError>
where
    I: Invoker + ?Sized,
{
    let serial = resolve_device(adb, params.device.as_deref()).await?;
    InputController::new(adb, &serial)
        .swipe(params.start_x, params.start_y, params.end_x, params.end_y)
        .await
        .map_err(|e| internal_error(format!("Swipe failed: {e}")))?;
    Ok(text_success(format!(
        "Swiped from ({}, {}) to ({}, {})",
        params.start_x, params.start_y, params.end_x, params.end_y
    )))
}

pub async fn input_text<I>(adb: &I, params: InputTextParams) -> Result<CallToolResult, McpError>
where
    I: Invoker + ?Sized,
{
    let serial = resolve_device(adb, params.device.as_deref()).await?;
    InputController::new(adb, &serial)
        .input_text(&params.text)
        .await
        .map_err(|e| internal_error(format!("Input text failed: {e}")))?;
    Ok(text_success(format!("Input text: {}", params.text)))
}

pub async fn press_key<I>(adb: &I, params: PressKeyParams) -> Result<CallToolResult, McpError>
where
    I: Invoker + ?Sized,
{
    let serial = resolve_device(adb, params.device.as_deref()).await?;
    InputController::new(adb, &serial)
        .press_key(&params.key)
        .await
        .map_err(|e| internal_error(format!("Keyevent failed: {e}")))?;
    Ok(text_success(format!("Sent key: {}", params.key)))
}

pub async fn screenshot<I>(adb: &I, params: ScreenshotParams) -> Result<CallToolResult, McpError>
where
    I: Invoker + ?Sized,
{
    let serial = resolve_device(adb, params.device.as_deref()).await?;
    DeviceController::new(adb, &serial)
        .take_screenshot(Path::new(&params.output_path))
        .await
        .map_err(|e| internal_error(e.to_string()))?;
    Ok(text_success(format!(
        "Screenshot saved to {}",
        params.output_path
    )))
}

#[cfg(test)]
mod tests {
    use super::*;

    use std::collections::HashMap;
    use std::sync::Mutex;

    use async_trait::async_trait;
    use droidbridge_adb::{AdbCommand, AdbError};

    #[derive(Default)]
    struct FakeInvoker {
        replies: HashMap<String, String>,
        calls: Mutex<Vec<String>>,
    }

    impl FakeInvoker {
        fn reply(mut self, command: &str, stdout: &str) -> Self {
            self.replies.insert(command.into(), stdout.into());
            self
        }
    }

    #[async_trait]
    impl Invoker for FakeInvoker {
        async fn run(&self, command: &AdbCommand) -> droidbridge_adb::Result<String> {
            let rendered = command.to_string();
            self.calls.lock().unwrap().push(rendered.clone());
            match self.replies.get(&rendered) {
                Some(stdout) => Ok(stdout.clone()),
                None => Err(AdbError::Command(format!("unscripted: {rendered}"))),
            }
        }
    }

    #[tokio::test]
    async fn resolve_prefers_explicit_serial() {
        let adb = FakeInvoker::default();
        let serial = resolve_device(&adb, Some("emuX")).await.unwrap();
        assert_eq!(serial, "emuX");
        assert!(adb.calls.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn resolve_auto_selects_single_device() {
        let adb =
            FakeInvoker::default().reply("devices", "List of devices attached\nemuA\tdevice");
        assert_eq!(resolve_device(&adb, None).await.unwrap(), "emuA");
    }

    #[tokio::test]
    async fn resolve_rejects_zero_and_many() {
        let none = FakeInvoker::default().reply("devices", "List of devices attached\n");
        assert!(resolve_device(&none, None).await.is_err());

        let many = FakeInvoker::default()
            .reply("devices", "List of devices attached\nemuA\tdevice\nemuB\tdevice");
        let err = resolve_device(&many, None).await.unwrap_err();
        assert!(err.message.contains("Multiple devices"));
    }

    #[tokio::test]
    async fn devices_handler_returns_json() {
        let adb =
            FakeInvoker::default().reply("devices", "List of devices attached\nemuA\tdevice");
        let result = devices(&adb, DevicesParams {}).await.unwrap();
        assert!(!result.is_error.unwrap_or(false));
        assert_eq!(result.content.len(), 1);
    }

    #[tokio::test]
    async fn tap_reports_coordinates() {
        let adb = FakeInvoker::default().reply("-s emuA shell input tap 5 9", "");
        let params = TapParams {
            x: 5,
            y: 9,
            device: Some("emuA".into()),
        };
        let result = tap(&adb, params).await.unwrap();
        assert!(!result.is_error.unwrap_or(false));
    }

    #[tokio::test]
    async fn screenshot_error_surfaces_operation_context() {
        let adb = FakeInvoker::default();
        let params = ScreenshotParams {
            output_path: "/tmp/shot.png".into(),
            device: Some("emuA".into()),
        };
        let err = screenshot(&adb, params).await.unwrap_err();
        assert!(err.message.contains("Failed to take screenshot"));
    }
}
