//! MCP server for Android Debug Bridge device control.
//!
//! Tools cover device discovery, connection management, app lifecycle,
//! input gestures, and screenshots. Devices are also exposed as resources
//! (`device://list`, `device://<serial>/info`), and the `analyze_device`
//! prompt bundles a bulk property sweep of every connected device.

use std::sync::Arc;

use droidbridge_adb::{client, AdbClient, DeviceController};
use rmcp::{
    handler::server::{router::tool::ToolRouter, wrapper::Parameters},
    model::{
        AnnotateAble, CallToolResult, GetPromptRequestParam, GetPromptResult, ListPromptsResult,
        ListResourcesResult, PaginatedRequestParam, Prompt, PromptMessage, PromptMessageContent,
        PromptMessageRole, RawResource, ReadResourceRequestParam, ReadResourceResult, Resource,
        ResourceContents, ServerCapabilities, ServerInfo,
    },
    service::RequestContext,
    tool, tool_handler, tool_router, ErrorData as McpError, RoleServer,
};

use crate::handlers;
use crate::params::*;
use crate::result::{internal_error, invalid_params};

pub const PROMPT_ANALYZE_DEVICE: &str = "analyze_device";

/// The droidbridge MCP server. Owns the one [`AdbClient`] every handler
/// issues commands through; the client is injected, never a hidden global.
#[derive(Clone)]
pub struct DroidBridgeServer {
    adb: Arc<AdbClient>,
    tool_router: ToolRouter<Self>,
}

#[tool_router]
impl DroidBridgeServer {
    pub fn new(adb: Arc<AdbClient>) -> Self {
        Self {
            adb,
            tool_router: Self::tool_router(),
        }
    }

    #[tool(description = "List all connected ADB devices with serial number and state")]
    async fn adb_devices(
        &self,
        Parameters(params): Parameters<DevicesParams>,
    ) -> Result<CallToolResult, McpError> {
        handlers::devices(self.adb.as_ref(), params).await
    }

    #[tool(description = "Connect to an Android device over TCP/IP")]
    async fn connect_device(
        &self,
        Parameters(params): Parameters<ConnectParams>,
    ) -> Result<CallToolResult, McpError> {
        handlers::connect_device(self.adb.as_ref(), params).await
    }

    #[tool(description = "Disconnect from an Android device")]
    async fn disconnect_device(
        &self,
        Parameters(params): Parameters<DisconnectParams>,
    ) -> Result<CallToolResult, McpError> {
        handlers::disconnect_device(self.adb.as_ref(), params).await
    }

    #[tool(description = "Get the model and Android version of a device")]
    async fn device_info(
        &self,
        Parameters(params): Parameters<DeviceInfoParams>,
    ) -> Result<CallToolResult, McpError> {
        handlers::device_info(self.adb.as_ref(), params).await
    }

    #[tool(description = "List installed packages on a device")]
    async fn list_packages(
        &self,
        Parameters(params): Parameters<ListPackagesParams>,
    ) -> Result<CallToolResult, McpError> {
        handlers::list_packages(self.adb.as_ref(), params).await
    }

    #[tool(description = "Install an APK from a local path onto a device")]
    async fn install_app(
        &self,
        Parameters(params): Parameters<InstallAppParams>,
    ) -> Result<CallToolResult, McpError> {
        handlers::install_app(self.adb.as_ref(), params).await
    }

    #[tool(description = "Uninstall a package from a device")]
    async fn uninstall_app(
        &self,
        Parameters(params): Parameters<UninstallAppParams>,
    ) -> Result<CallToolResult, McpError> {
        handlers::uninstall_app(self.adb.as_ref(), params).await
    }

    #[tool(description = "Start an app by package name")]
    async fn start_app(
        &self,
        Parameters(params): Parameters<StartAppParams>,
    ) -> Result<CallToolResult, McpError> {
        handlers::start_app(self.adb.as_ref(), params).await
    }

    #[tool(description = "Force-stop an app by package name")]
    async fn stop_app(
        &self,
        Parameters(params): Parameters<StopAppParams>,
    ) -> Result<CallToolResult, McpError> {
        handlers::stop_app(self.adb.as_ref(), params).await
    }

    #[tool(description = "Tap at specific x,y coordinates on the device screen")]
    async fn tap(
        &self,
        Parameters(params): Parameters<TapParams>,
    ) -> Result<CallToolResult, McpError> {
        handlers::tap(self.adb.as_ref(), params).await
    }

    #[tool(description = "Perform a swipe gesture from start to end coordinates")]
    async fn swipe(
        &self,
        Parameters(params): Parameters<SwipeParams>,
    ) -> Result<CallToolResult, McpError> {
        handlers::swipe(self.adb.as_ref(), params).await
    }

    #[tool(description = "Type text on the device (requires focus on a text field)")]
    async fn input_text(
        &self,
        Parameters(params): Parameters<InputTextParams>,
    ) -> Result<CallToolResult, McpError> {
        handlers::input_text(self.adb.as_ref(), params).await
    }

    #[tool(description = "Send a key event (e.g. KEYCODE_HOME or a numeric keycode)")]
    async fn press_key(
        &self,
        Parameters(params): Parameters<PressKeyParams>,
    ) -> Result<CallToolResult, McpError> {
        handlers::press_key(self.adb.as_ref(), params).await
    }

    #[tool(description = "Capture a screenshot and save it to a local file")]
    async fn screenshot(
        &self,
        Parameters(params): Parameters<ScreenshotParams>,
    ) -> Result<CallToolResult, McpError> {
        handlers::screenshot(self.adb.as_ref(), params).await
    }
}

fn device_list_resource() -> Resource {
    let mut raw = RawResource::new("device://list", "Connected Devices");
    raw.description = Some("List of all connected Android devices".into());
    raw.mime_type = Some("application/json".into());
    raw.no_annotation()
}

fn device_info_resource(serial: &str) -> Resource {
    let mut raw = RawResource::new(format!("device://{serial}/info"), format!("Device {serial}"));
    raw.description = Some(format!("Information about device {serial}"));
    raw.mime_type = Some("application/json".into());
    raw.no_annotation()
}

#[tool_handler]
impl rmcp::ServerHandler for DroidBridgeServer {
    fn get_info(&self) -> ServerInfo {
        ServerInfo {
            instructions: Some(
                "ADB MCP server for Android device control. \
                 Lists devices as resources, relays taps, swipes, text and \
                 key input, manages apps, and captures screenshots."
                    .into(),
            ),
            capabilities: ServerCapabilities::builder()
                .enable_tools()
                .enable_resources()
                .enable_prompts()
                .build(),
            ..Default::default()
        }
    }

    async fn list_resources(
        &self,
        _request: Option<PaginatedRequestParam>,
        _context: RequestContext<RoleServer>,
    ) -> Result<ListResourcesResult, McpError> {
        client::start_server(self.adb.as_ref())
            .await
            .map_err(|e| internal_error(e.to_string()))?;
        let devices = client::list_devices(self.adb.as_ref())
            .await
            .map_err(|e| internal_error(e.to_string()))?;

        let mut resources = vec![device_list_resource()];
        resources.extend(devices.iter().map(|d| device_info_resource(&d.serial)));
        Ok(ListResourcesResult {
            meta: None,
            resources,
            next_cursor: None,
        })
    }

    async fn read_resource(
        &self,
        request: ReadResourceRequestParam,
        _context: RequestContext<RoleServer>,
    ) -> Result<ReadResourceResult, McpError> {
        let uri = request.uri;

        if uri == "device://list" {
            let devices = client::list_devices(self.adb.as_ref())
                .await
                .map_err(|e| internal_error(e.to_string()))?;
            let json = serde_json::to_string_pretty(&devices)
                .map_err(|e| internal_error(e.to_string()))?;
            return Ok(ReadResourceResult {
                contents: vec![ResourceContents::text(json, uri)],
            });
        }

        let serial = uri
            .strip_prefix("device://")
            .and_then(|rest| rest.strip_suffix("/info"))
            .ok_or_else(|| invalid_params(format!("Unknown resource URI: {uri}")))?
            .to_string();

        let properties = DeviceController::new(self.adb.as_ref(), &serial)
            .properties()
            .await
            .map_err(|e| internal_error(e.to_string()))?;
        let json =
            serde_json::to_string_pretty(&properties).map_err(|e| internal_error(e.to_string()))?;
        Ok(ReadResourceResult {
            contents: vec![ResourceContents::text(json, uri)],
        })
    }

    async fn list_prompts(
        &self,
        _request: Option<PaginatedRequestParam>,
        _context: RequestContext<RoleServer>,
    ) -> Result<ListPromptsResult, McpError> {
        Ok(ListPromptsResult {
            meta: None,
            next_cursor: None,
            prompts: vec![Prompt::new(
                PROMPT_ANALYZE_DEVICE,
                Some("Analyze device status and information"),
                None,
            )],
        })
    }

    async fn get_prompt(
        &self,
        request: GetPromptRequestParam,
        _context: RequestContext<RoleServer>,
    ) -> Result<GetPromptResult, McpError> {
        if request.name != PROMPT_ANALYZE_DEVICE {
            return Err(invalid_params(format!("Unknown prompt: {}", request.name)));
        }

        // One concurrent property read per device, all-or-nothing.
        let reports = client::describe_devices(self.adb.as_ref())
            .await
            .map_err(|e| internal_error(e.to_string()))?;
        let json =
            serde_json::to_string_pretty(&reports).map_err(|e| internal_error(e.to_string()))?;

        let user = |text: String| PromptMessage {
            role: PromptMessageRole::User,
            content: PromptMessageContent::text(text),
        };
        Ok(GetPromptResult {
            description: None,
            messages: vec![
                user("Please analyze the following Android devices:".to_string()),
                user(json),
                user(
                    "Provide a detailed analysis of the connected devices, including \
                     their status, Android version, and key specifications."
                        .to_string(),
                ),
            ],
        })
    }
}
