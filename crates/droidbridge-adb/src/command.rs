//! Pure construction of adb argument vectors.
//!
//! Builders never execute anything and never validate serials or package
//! names; they only format. Arguments are kept as a vector so the invoker
//! can spawn `adb` without a host shell in between. `Display` renders the
//! canonical space-joined form used in logs and tests.

use std::fmt;

/// A fully-built adb argument vector.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AdbCommand {
    args: Vec<String>,
}

impl AdbCommand {
    fn new<I>(args: I) -> Self
    where
        I: IntoIterator,
        I::Item: Into<String>,
    {
        Self {
            args: args.into_iter().map(Into::into).collect(),
        }
    }

    /// Arguments to pass to the adb executable, in order.
    pub fn args(&self) -> &[String] {
        &self.args
    }

    pub fn devices() -> Self {
        Self::new(["devices"])
    }

    pub fn start_server() -> Self {
        Self::new(["start-server"])
    }

    pub fn kill_server() -> Self {
        Self::new(["kill-server"])
    }

    pub fn connect(host: &str) -> Self {
        Self::new(["connect", host])
    }

    pub fn disconnect(host: &str) -> Self {
        Self::new(["disconnect", host])
    }

    /// All system properties of a device.
    pub fn get_properties(serial: &str) -> Self {
        Self::new(["-s", serial, "shell", "getprop"])
    }

    /// A single system property, e.g. `ro.product.model`.
    pub fn get_property(serial: &str, key: &str) -> Self {
        Self::new(["-s", serial, "shell", "getprop", key])
    }

    pub fn list_packages(serial: &str) -> Self {
        Self::new(["-s", serial, "shell", "pm", "list", "packages"])
    }

    pub fn install(serial: &str, apk_path: &str) -> Self {
        Self::new(["-s", serial, "install", apk_path])
    }

    pub fn uninstall(serial: &str, package: &str) -> Self {
        Self::new(["-s", serial, "uninstall", package])
    }

    /// Launch an app by firing a single monkey event at its package.
    pub fn start_app(serial: &str, package: &str) -> Self {
        Self::new(["-s", serial, "shell", "monkey", "-p", package, "1"])
    }

    pub fn stop_app(serial: &str, package: &str) -> Self {
        Self::new(["-s", serial, "shell", "am", "force-stop", package])
    }

    pub fn tap(serial: &str, x: i32, y: i32) -> Self {
        Self::new([
            "-s".to_string(),
            serial.to_string(),
            "shell".into(),
            "input".into(),
            "tap".into(),
            x.to_string(),
            y.to_string(),
        ])
    }

    pub fn swipe(serial: &str, x1: i32, y1: i32, x2: i32, y2: i32) -> Self {
        Self::new([
            "-s".to_string(),
            serial.to_string(),
            "shell".into(),
            "input".into(),
            "swipe".into(),
            x1.to_string(),
            y1.to_string(),
            x2.to_string(),
            y2.to_string(),
        ])
    }

    /// Text input. The text is escaped and embedded quoted as a single
    /// argument, so the device-side shell receives it as one word.
    pub fn input_text(serial: &str, text: &str) -> Self {
        let quoted = format!("\"{}\"", escape_shell_text(text));
        Self::new([
            "-s".to_string(),
            serial.to_string(),
            "shell".into(),
            "input".into(),
            "text".into(),
            quoted,
        ])
    }

    pub fn press_key(serial: &str, keycode: &str) -> Self {
        Self::new(["-s", serial, "shell", "input", "keyevent", keycode])
    }

    /// Capture the screen to a file on the device.
    pub fn screencap(serial: &str, device_path: &str) -> Self {
        Self::new(["-s", serial, "shell", "screencap", "-p", device_path])
    }

    pub fn pull(serial: &str, remote_path: &str, local_path: &str) -> Self {
        Self::new(["-s", serial, "pull", remote_path, local_path])
    }

    pub fn remove(serial: &str, device_path: &str) -> Self {
        Self::new(["-s", serial, "shell", "rm", device_path])
    }
}

impl fmt::Display for AdbCommand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.args.join(" "))
    }
}

/// Backslash-escape characters the device shell would otherwise interpret.
pub fn escape_shell_text(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for ch in text.chars() {
        if matches!(
            ch,
            '&' | ';' | '$' | '"' | '\'' | '|' | '<' | '>' | '(' | ')'
        ) {
            escaped.push('\\');
        }
        escaped.push(ch);
    }
    escaped
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tap_renders_exact_command_line() {
        assert_eq!(
            AdbCommand::tap("X1", 10, 20).to_string(),
            "-s X1 shell input tap 10 20"
        );
    }

    #[test]
    fn swipe_renders_all_coordinates() {
        assert_eq!(
            AdbCommand::swipe("emu", 0, 100, 0, 900).to_string(),
            "-s emu shell input swipe 0 100 0 900"
        );
    }

    #[test]
    fn serverless_commands_have_no_serial() {
        assert_eq!(AdbCommand::devices().to_string(), "devices");
        assert_eq!(AdbCommand::start_server().to_string(), "start-server");
        assert_eq!(AdbCommand::kill_server().to_string(), "kill-server");
        assert_eq!(
            AdbCommand::connect("192.168.1.100:5555").to_string(),
            "connect 192.168.1.100:5555"
        );
    }

    #[test]
    fn property_and_package_commands() {
        assert_eq!(
            AdbCommand::get_properties("emu").to_string(),
            "-s emu shell getprop"
        );
        assert_eq!(
            AdbCommand::get_property("emu", "ro.product.model").to_string(),
            "-s emu shell getprop ro.product.model"
        );
        assert_eq!(
            AdbCommand::list_packages("emu").to_string(),
            "-s emu shell pm list packages"
        );
    }

    #[test]
    fn app_lifecycle_commands() {
        assert_eq!(
            AdbCommand::install("emu", "/tmp/app.apk").to_string(),
            "-s emu install /tmp/app.apk"
        );
        assert_eq!(
            AdbCommand::uninstall("emu", "com.example").to_string(),
            "-s emu uninstall com.example"
        );
        assert_eq!(
            AdbCommand::start_app("emu", "com.example").to_string(),
            "-s emu shell monkey -p com.example 1"
        );
        assert_eq!(
            AdbCommand::stop_app("emu", "com.example").to_string(),
            "-s emu shell am force-stop com.example"
        );
    }

    #[test]
    fn input_text_is_quoted_and_escaped() {
        assert_eq!(
            AdbCommand::input_text("emu", "hello").to_string(),
            "-s emu shell input text \"hello\""
        );
        assert_eq!(
            AdbCommand::input_text("emu", "a&b;c").to_string(),
            "-s emu shell input text \"a\\&b\\;c\""
        );
    }

    #[test]
    fn screenshot_commands() {
        assert_eq!(
            AdbCommand::screencap("emu", "/sdcard/screenshot.png").to_string(),
            "-s emu shell screencap -p /sdcard/screenshot.png"
        );
        assert_eq!(
            AdbCommand::pull("emu", "/sdcard/screenshot.png", "/tmp/out.png").to_string(),
            "-s emu pull /sdcard/screenshot.png /tmp/out.png"
        );
        assert_eq!(
            AdbCommand::remove("emu", "/sdcard/screenshot.png").to_string(),
            "-s emu shell rm /sdcard/screenshot.png"
        );
    }

    #[test]
    fn escape_covers_shell_metacharacters() {
        assert_eq!(
            escape_shell_text(r#"a&b;c$d"e'f|g<h>i(j)k"#),
            r#"a\&b\;c\$d\"e\'f\|g\<h\>i\(j\)k"#
        );
        assert_eq!(escape_shell_text("plain text_123"), "plain text_123");
    }

    #[test]
    fn distinct_arguments_render_distinct_commands() {
        assert_ne!(
            AdbCommand::tap("emu", 1, 23).to_string(),
            AdbCommand::tap("emu", 12, 3).to_string()
        );
        assert_ne!(
            AdbCommand::get_property("emu", "a").to_string(),
            AdbCommand::get_property("em", "u a").to_string()
        );
    }
}
