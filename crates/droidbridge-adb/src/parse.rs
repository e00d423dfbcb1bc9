//! Parsers for adb stdout.
//!
//! All parsers are total: empty input yields empty collections and
//! malformed lines are skipped, never reported.

use std::collections::BTreeMap;
use std::sync::OnceLock;

use regex::Regex;
use serde::{Deserialize, Serialize};

/// A connected device as reported by `adb devices`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Device {
    pub serial: String,
    /// Device state (`device`, `offline`, `unauthorized`, ...). Empty when
    /// the line carried no tab separator.
    pub state: String,
}

/// Parse `adb devices` output. The first line is the header and is always
/// dropped; blank lines are skipped; everything before the first tab is the
/// serial and everything after it the state.
pub fn parse_device_list(output: &str) -> Vec<Device> {
    output
        .lines()
        .skip(1)
        .filter(|line| !line.trim().is_empty())
        .map(|line| match line.split_once('\t') {
            Some((serial, state)) => Device {
                serial: serial.to_string(),
                state: state.to_string(),
            },
            None => Device {
                serial: line.to_string(),
                state: String::new(),
            },
        })
        .collect()
}

fn prop_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| {
        Regex::new(r"\[([^\]]+)\]: \[([^\]]*)\]").expect("property pattern compiles")
    })
}

/// Parse `getprop` output into a key/value map. Matches with an empty value
/// are skipped; a key seen again overwrites the earlier value.
pub fn parse_device_props(output: &str) -> BTreeMap<String, String> {
    let mut props = BTreeMap::new();
    for caps in prop_pattern().captures_iter(output) {
        let value = &caps[2];
        if value.is_empty() {
            continue;
        }
        props.insert(caps[1].to_string(), value.to_string());
    }
    props
}

/// Parse `pm list packages` output: keep lines with the `package:` prefix,
/// strip it, trim surrounding whitespace.
pub fn parse_package_list(output: &str) -> Vec<String> {
    output
        .lines()
        .filter_map(|line| line.strip_prefix("package:"))
        .map(|name| name.trim().to_string())
        .collect()
}
