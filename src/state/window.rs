//! Live window attributes the settings are applied to

use super::Settings;
use crate::error::SplitResult;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct WindowChrome {
    pub always_on_top: bool,
    pub background_color: String,
}

impl WindowChrome {
    /// Chrome as described by `settings`
    pub fn from_settings(settings: &Settings) -> SplitResult<Self> {
        Ok(Self {
            always_on_top: settings.always_on_top()?,
            background_color: settings.background_color().to_string(),
        })
    }
}
