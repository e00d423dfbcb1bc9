//! Parameter types for the droidbridge MCP tools.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

#[derive(Debug, Serialize, Deserialize, JsonSchema)]
pub struct DevicesParams {}

#[derive(Debug, Serialize, Deserialize, JsonSchema)]
pub struct ConnectParams {
    #[schemars(description = "Host address of the device (e.g. 192.168.1.100:5555)")]
    pub host: String,
}

#[derive(Debug, Serialize, Deserialize, JsonSchema)]
pub struct DisconnectParams {
    #[schemars(description = "Host address of the device to disconnect")]
    pub host: String,
}

#[derive(Debug, Serialize, Deserialize, JsonSchema)]
pub struct DeviceInfoParams {
    #[schemars(description = "Device serial number (optional, auto-selects if only one device)")]
    #[serde(default)]
    pub device: Option<String>,
}

#[derive(Debug, Serialize, Deserialize, JsonSchema)]
pub struct ListPackagesParams {
    #[schemars(description = "Device serial number (optional, auto-selects if only one device)")]
    #[serde(default)]
    pub device: Option<String>,
}

#[derive(Debug, Serialize, Deserialize, JsonSchema)]
pub struct InstallAppParams {
    #[schemars(description = "Local path of the APK to install")]
    pub apk_path: String,

    #[schemars(description = "Device serial number (optional, auto-selects if only one device)")]
    #[serde(default)]
    pub device: Option<String>,
}

#[derive(Debug, Serialize, Deserialize, JsonSchema)]
pub struct UninstallAppParams {
    #[schemars(description = "Package name to uninstall (e.g. com.example.app)")]
    pub package: String,

    #[schemars(description = "Device serial number (optional, auto-selects if only one device)")]
    #[serde(default)]
    pub device: Option<String>,
}

#[derive(Debug, Serialize, Deserialize, JsonSchema)]
pub struct StartAppParams {
    #[schemars(description = "Package name of the app to start")]
    pub package: String,

    #[schemars(description = "Device serial number (optional, auto-selects if only one device)")]
    #[serde(default)]
    pub device: Option<String>,
}

#[derive(Debug, Serialize, Deserialize, JsonSchema)]
pub struct StopAppParams {
    #[schemars(description = "Package name of the app to force-stop")]
    pub package: String,

    #[schemars(description = "Device serial number (optional, auto-selects if only one device)")]
    #[serde(default)]
    pub device: Option<String>,
}

#[derive(Debug, Serialize, Deserialize, JsonSchema)]
pub struct TapParams {
    #[schemars(description = "X coordinate to tap")]
    pub x: i32,

    #[schemars(description = "Y coordinate to tap")]
    pub y: i32,

    #[schemars(description = "Device serial number (optional, auto-selects if only one device)")]
    #[serde(default)]
    pub device: Option<String>,
}

#[derive(Debug, Serialize, Deserialize, JsonSchema)]
pub struct SwipeParams {
    #[schemars(description = "Starting X coordinate")]
    pub start_x: i32,

    #[schemars(description = "Starting Y coordinate")]
    pub start_y: i32,

    #[schemars(description = "Ending X coordinate")]
    pub end_x: i32,

    #[schemars(description = "Ending Y coordinate")]
    pub end_y: i32,

    #[schemars(description = "Device serial number (optional, auto-selects if only one device)")]
    #[serde(default)]
    pub device: Option<String>,
}

#[derive(Debug, Serialize, Deserialize, JsonSchema)]
pub struct InputTextParams {
    #[schemars(description = "Text to type into the focused field")]
    pub text: String,

    #[schemars(description = "Device serial number (optional, auto-selects if only one device)")]
    #[serde(default)]
    pub device: Option<String>,
}

#[derive(Debug, Serialize, Deserialize, JsonSchema)]
pub struct PressKeyParams {
    #[schemars(description = "Keycode to press (e.g. KEYCODE_HOME or a numeric code)")]
    pub key: String,

    #[schemars(description = "Device serial number (optional, auto-selects if only one device)")]
    #[serde(default)]
    pub device: Option<String>,
}

#[derive(Debug, Serialize, Deserialize, JsonSchema)]
pub struct ScreenshotParams {
    #[schemars(description = "Local file path to save the screenshot to")]
    pub output_path: String,

    #[schemars(description = "Device serial number (optional, auto-selects if only one device)")]
    #[serde(default)]
    pub device: Option<String>,
}
