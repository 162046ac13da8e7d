//! Flat key-value application settings

use std::{collections::BTreeMap, fmt, str::FromStr};

use crate::error::{SplitError, SplitResult};

/// The fixed set of keys under `[Settings]`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum SettingKey {
    StartHotkey,
    StopHotkey,
    ResetHotkey,
    SplitHotkey,
    AlwaysOnTop,
    BackgroundColor,
}

impl SettingKey {
    pub const ALL: [SettingKey; 6] = [
        SettingKey::StartHotkey,
        SettingKey::StopHotkey,
        SettingKey::ResetHotkey,
        SettingKey::SplitHotkey,
        SettingKey::AlwaysOnTop,
        SettingKey::BackgroundColor,
    ];

    /// Canonical key name as written to the config file
    pub fn as_str(&self) -> &'static str {
        match self {
            SettingKey::StartHotkey => "StartHotkey",
            SettingKey::StopHotkey => "StopHotkey",
            SettingKey::ResetHotkey => "ResetHotkey",
            SettingKey::SplitHotkey => "SplitHotkey",
            SettingKey::AlwaysOnTop => "AlwaysOnTop",
            SettingKey::BackgroundColor => "BackgroundColor",
        }
    }

    /// Value written on first run
    pub fn default_value(&self) -> &'static str {
        match self {
            SettingKey::StartHotkey => "s",
            SettingKey::StopHotkey => "x",
            SettingKey::ResetHotkey => "r",
            SettingKey::SplitHotkey => "space",
            SettingKey::AlwaysOnTop => "no",
            SettingKey::BackgroundColor => "#ffffff",
        }
    }
}

impl fmt::Display for SettingKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Key names match case-insensitively, as configparser does
impl FromStr for SettingKey {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        SettingKey::ALL
            .into_iter()
            .find(|key| key.as_str().eq_ignore_ascii_case(s))
            .ok_or_else(|| format!("unknown setting '{}'", s))
    }
}

/// Timer actions that can be bound to a hotkey
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TimerAction {
    Start,
    Stop,
    Reset,
    Split,
}

impl TimerAction {
    pub const ALL: [TimerAction; 4] = [
        TimerAction::Start,
        TimerAction::Stop,
        TimerAction::Reset,
        TimerAction::Split,
    ];

    /// Setting holding this action's hotkey
    pub fn setting_key(&self) -> SettingKey {
        match self {
            TimerAction::Start => SettingKey::StartHotkey,
            TimerAction::Stop => SettingKey::StopHotkey,
            TimerAction::Reset => SettingKey::ResetHotkey,
            TimerAction::Split => SettingKey::SplitHotkey,
        }
    }

    /// Lowercase word used in commands and messages
    pub fn name(&self) -> &'static str {
        match self {
            TimerAction::Start => "start",
            TimerAction::Stop => "stop",
            TimerAction::Reset => "reset",
            TimerAction::Split => "split",
        }
    }
}

impl FromStr for TimerAction {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        TimerAction::ALL
            .into_iter()
            .find(|action| action.name().eq_ignore_ascii_case(s))
            .ok_or_else(|| format!("unknown action '{}'", s))
    }
}

/// Setting name to string value. Unknown keys read from disk are kept.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Settings {
    values: BTreeMap<String, String>,
}

impl Settings {
    /// The first-run key set
    pub fn defaults() -> Self {
        let values = SettingKey::ALL
            .iter()
            .map(|key| (key.as_str().to_string(), key.default_value().to_string()))
            .collect();
        Self { values }
    }

    /// Build from raw values, failing on the first required key that is absent.
    ///
    /// Known keys are renamed to their canonical spelling, so `starthotkey`
    /// reads as `StartHotkey`. Unknown keys pass through untouched.
    pub fn from_values(raw: BTreeMap<String, String>) -> SplitResult<Self> {
        let values: BTreeMap<String, String> = raw
            .into_iter()
            .map(|(name, value)| match name.parse::<SettingKey>() {
                Ok(key) => (key.as_str().to_string(), value),
                Err(_) => (name, value),
            })
            .collect();

        for key in SettingKey::ALL {
            if !values.contains_key(key.as_str()) {
                return Err(SplitError::MissingSetting(key.as_str().to_string()));
            }
        }
        Ok(Self { values })
    }

    /// Every stored value, unknown keys included
    pub fn values(&self) -> &BTreeMap<String, String> {
        &self.values
    }

    /// Raw string value of `key`, empty if absent
    pub fn get(&self, key: SettingKey) -> &str {
        self.values.get(key.as_str()).map(String::as_str).unwrap_or_default()
    }

    /// Update memory only; see `SettingsStore::save` for disk
    pub fn set(&mut self, key: SettingKey, value: impl Into<String>) {
        self.values.insert(key.as_str().to_string(), value.into());
    }

    /// The AlwaysOnTop flag, rejecting values that are not booleans
    pub fn always_on_top(&self) -> SplitResult<bool> {
        parse_bool(self.get(SettingKey::AlwaysOnTop)).ok_or_else(|| SplitError::InvalidSetting {
            key: SettingKey::AlwaysOnTop.as_str().to_string(),
            value: self.get(SettingKey::AlwaysOnTop).to_string(),
        })
    }

    /// Background color, empty for the toolkit default
    pub fn background_color(&self) -> &str {
        self.get(SettingKey::BackgroundColor)
    }

    /// Action whose hotkey matches a key press.
    ///
    /// `key` is the raw input; a lone space also matches the `space` keysym.
    /// Bindings are checked in start, stop, reset, split order.
    pub fn action_for_key(&self, key: &str) -> Option<TimerAction> {
        let keysym = if key == " " { "space" } else { key.trim() };
        if keysym.is_empty() {
            return None;
        }
        TimerAction::ALL
            .into_iter()
            .find(|action| self.get(action.setting_key()) == keysym)
    }
}

/// configparser-style booleans
fn parse_bool(value: &str) -> Option<bool> {
    match value.trim().to_ascii_lowercase().as_str() {
        "1" | "yes" | "true" | "on" => Some(true),
        "0" | "no" | "false" | "off" => Some(false),
        _ => None,
    }
}
