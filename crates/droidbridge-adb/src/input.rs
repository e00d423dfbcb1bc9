//! Input and gesture commands for a single device.

use crate::client::Invoker;
use crate::command::AdbCommand;
use crate::error::Result;

/// Issues input commands scoped to one device serial. A controller is a
/// cheap value constructed per call; it holds no state beyond its borrows.
pub struct InputController<'a, I: ?Sized> {
    adb: &'a I,
    serial: &'a str,
}

impl<'a, I> InputController<'a, I>
where
    I: Invoker + ?Sized,
{
    pub fn new(adb: &'a I, serial: &'a str) -> Self {
        Self { adb, serial }
    }

    pub async fn tap(&self, x: i32, y: i32) -> Result<()> {
        self.adb
            .run(&AdbCommand::tap(self.serial, x, y))
            .await
            .map(drop)
    }

    pub async fn swipe(&self, start_x: i32, start_y: i32, end_x: i32, end_y: i32) -> Result<()> {
        self.adb
            .run(&AdbCommand::swipe(self.serial, start_x, start_y, end_x, end_y))
            .await
            .map(drop)
    }

    /// Type text into the focused field. Shell-sensitive characters are
    /// escaped by the command builder.
    pub async fn input_text(&self, text: &str) -> Result<()> {
        self.adb
            .run(&AdbCommand::input_text(self.serial, text))
            .await
            .map(drop)
    }

    /// Press a key by keycode, e.g. `KEYCODE_HOME` or `3`.
    pub async fn press_key(&self, keycode: &str) -> Result<()> {
        self.adb
            .run(&AdbCommand::press_key(self.serial, keycode))
            .await
            .map(drop)
    }
}
