//! Adapter layer for the Android Debug Bridge CLI.
//!
//! Every operation here is one `adb` invocation: a pure command builder
//! produces an argument vector, the invoker spawns the process and applies
//! the stderr-is-failure policy, and pure parsers structure the stdout.
//! Controllers bind a device serial to that trio and are cheap per-call
//! values, not cached objects.

pub mod client;
pub mod command;
pub mod device;
pub mod error;
pub mod input;
pub mod parse;

pub use client::{AdbClient, DeviceReport, Invoker};
pub use command::AdbCommand;
pub use device::{DeviceController, DeviceInfo, DEVICE_SCREENSHOT_PATH};
pub use error::{AdbError, Result};
pub use input::InputController;
pub use parse::Device;
