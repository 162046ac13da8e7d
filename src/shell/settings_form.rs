//! Transient settings form
//!
//! The form is a view over the settings held by `AppState`. It is filled from
//! them when opened; hotkey capture and color picks write through to memory
//! immediately, and only `save` flushes to disk.

use std::collections::BTreeMap;

use tracing::debug;

use crate::{
    error::SplitResult,
    state::{AppState, SettingKey, Settings, TimerAction},
};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SettingsForm {
    fields: BTreeMap<SettingKey, String>,
    always_on_top: bool,
}

impl SettingsForm {
    /// Form populated from `settings`
    pub fn from_settings(settings: &Settings) -> SplitResult<Self> {
        let fields = TimerAction::ALL
            .iter()
            .map(|action| action.setting_key())
            .chain(std::iter::once(SettingKey::BackgroundColor))
            .map(|key| (key, settings.get(key).to_string()))
            .collect();

        Ok(Self {
            fields,
            always_on_top: settings.always_on_top()?,
        })
    }

    /// Value shown in the form for `key`, empty when the form has no such field
    pub fn field(&self, key: SettingKey) -> &str {
        self.fields.get(&key).map(String::as_str).unwrap_or_default()
    }

    /// State of the always-on-top checkbox
    pub fn always_on_top(&self) -> bool {
        self.always_on_top
    }

    /// Bind the pressed key to `action`
    pub fn capture_hotkey(&mut self, state: &AppState, action: TimerAction, key: &str) -> SplitResult<String> {
        let keysym = if key == " " { "space".to_string() } else { key.trim().to_string() };
        let setting = action.setting_key();
        self.fields.insert(setting, keysym.clone());
        state.set_setting(setting, keysym.clone())?;
        debug!("Captured {} for {}", keysym, setting);
        Ok(keysym)
    }

    /// Take a color picked by the user
    pub fn pick_color(&mut self, state: &AppState, color: &str) -> SplitResult<()> {
        let color = color.trim().to_string();
        self.fields.insert(SettingKey::BackgroundColor, color.clone());
        state.set_setting(SettingKey::BackgroundColor, color)
    }

    /// Flip the checkbox and the live window attribute with it
    pub fn toggle_always_on_top(&mut self, state: &AppState) -> SplitResult<bool> {
        self.always_on_top = !self.always_on_top;
        state.set_always_on_top(self.always_on_top)?;
        Ok(self.always_on_top)
    }

    /// Commit the form, apply it to the window and write the config file
    pub fn save(&self, state: &AppState) -> SplitResult<()> {
        let fields: Vec<(SettingKey, String)> = self
            .fields
            .iter()
            .map(|(key, value)| (*key, value.clone()))
            .collect();
        state.save_settings(&fields)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        services::SettingsStore,
        state::{ManualClock, TimerEngine, UnmatchedPolicy},
    };
    use tempfile::tempdir;

    #[test]
    fn test_capture_writes_through_to_memory_only() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("config.toml");
        let store = SettingsStore::open(&path).unwrap();
        let state = AppState::new(TimerEngine::new(ManualClock::new()), store, UnmatchedPolicy::Slower).unwrap();

        let mut form = SettingsForm::from_settings(&state.settings().unwrap()).unwrap();
        assert_eq!(form.field(SettingKey::SplitHotkey), "space");

        assert_eq!(form.capture_hotkey(&state, TimerAction::Split, " ").unwrap(), "space");
        form.capture_hotkey(&state, TimerAction::Start, "Return").unwrap();
        form.pick_color(&state, "#112233").unwrap();

        let settings = state.settings().unwrap();
        assert_eq!(settings.get(SettingKey::StartHotkey), "Return");
        assert_eq!(settings.background_color(), "#112233");

        let on_disk = SettingsStore::open(&path).unwrap();
        assert_eq!(on_disk.get(SettingKey::StartHotkey), "s");
    }

    #[test]
    fn test_toggle_moves_live_window_attribute() {
        let dir = tempdir().unwrap();
        let store = SettingsStore::open(dir.path().join("config.toml")).unwrap();
        let state = AppState::new(TimerEngine::new(ManualClock::new()), store, UnmatchedPolicy::Slower).unwrap();

        let mut form = SettingsForm::from_settings(&state.settings().unwrap()).unwrap();
        assert!(form.toggle_always_on_top(&state).unwrap());
        assert!(state.chrome().unwrap().always_on_top);
        // Not committed to settings until save
        assert_eq!(state.settings().unwrap().get(SettingKey::AlwaysOnTop), "no");
    }
}
