//! Rendered views

use std::fmt::Write;

use chrono::{DateTime, Utc};

use crate::{
    state::{CompareOutcome, SettingKey, SplitRow, TimerAction, WindowChrome},
    utils::format_time,
};

use super::SettingsForm;

pub const APP_NAME: &str = "BasicSplit";

/// Links shown on the about screen, opened with `open <n>`
pub const ABOUT_LINKS: &[(&str, &str)] = &[
    ("Leaderboards", "https://www.speedrun.com"),
    ("Built with Rust", "https://www.rust-lang.org"),
];

pub const HELP: &str = "\
Commands:
  start | stop | toggle | reset | split   timer controls (hotkeys work too)
  new                                     start a new set of splits
  save <file>                             save splits (.split added if missing)
  compare <file>                          compare against saved splits
  settings                                hotkeys, always on top, background colour
  about | open <n>                        about screen and its links
  show                                    redraw the window
  close                                   exit";

pub const SETTINGS_HELP: &str = "\
Settings:
  bind <start|stop|reset|split>   the next key you enter becomes the hotkey
  ontop                           toggle window always on top
  color <value>                   background colour
  show | save | cancel";

/// Main window: time label, split list and window chrome
pub fn render_main(
    label: &str,
    running: bool,
    rows: &[SplitRow],
    chrome: &WindowChrome,
    last_action: Option<(&str, DateTime<Utc>)>,
) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "=== {} ===", APP_NAME);
    let _ = writeln!(out, "  {}  [{}]", label, if running { "running" } else { "stopped" });
    if let Some((action, at)) = last_action {
        let _ = writeln!(out, "  last action: {} at {}", action, at.format("%H:%M:%S UTC"));
    }
    if rows.is_empty() {
        let _ = writeln!(out, "  (no splits)");
    }
    for row in rows {
        let _ = write!(out, "  Split {}: {}", row.number, format_time(row.seconds));
        if let Some(pace) = row.pace {
            let _ = write!(out, "  [{}]", pace.label());
        }
        out.push('\n');
    }
    let _ = write!(
        out,
        "  background {}  always on top {}",
        if chrome.background_color.is_empty() { "(default)" } else { chrome.background_color.as_str() },
        if chrome.always_on_top { "yes" } else { "no" }
    );
    out
}

/// Settings dialog with the form's current fields
pub fn render_settings(form: &SettingsForm) -> String {
    let mut out = String::from("--- Settings ---\n");
    for action in TimerAction::ALL {
        let key = action.setting_key();
        let label = format!("{} Hotkey:", capitalize(action.name()));
        let _ = writeln!(out, "  {:<14} {}", label, form.field(key));
    }
    let _ = writeln!(
        out,
        "  [{}] Window Always On Top",
        if form.always_on_top() { "x" } else { " " }
    );
    let _ = write!(out, "  {:<14} {}", "Background:", form.field(SettingKey::BackgroundColor));
    out
}

/// Whole-list verdict followed by the baseline summary
pub fn render_compare(outcome: &CompareOutcome) -> String {
    let mut out = String::from(if outcome.matches {
        "The splits match!"
    } else {
        "The splits do not match."
    });
    let _ = write!(out, " Baseline has {} splits", outcome.baseline_len);
    if let Some(saved_at) = outcome.saved_at {
        let _ = write!(out, ", saved {}", saved_at.format("%Y-%m-%d %H:%M:%S UTC"));
    }
    out.push('.');
    out
}

/// Name, version and numbered links
pub fn render_about() -> String {
    let mut out = String::new();
    let _ = writeln!(out, "{} v{}", APP_NAME, env!("CARGO_PKG_VERSION"));
    let _ = writeln!(out, "A simple split timer for speedruns.");
    for (i, (title, url)) in ABOUT_LINKS.iter().enumerate() {
        let _ = writeln!(out, "  [{}] {}: {}", i + 1, title, url);
    }
    out.push_str("Use 'open <n>' to open a link.");
    out
}

fn capitalize(word: &str) -> String {
    let mut chars = word.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::Pace;

    #[test]
    fn test_main_view_annotates_rows() {
        let rows = vec![
            SplitRow { number: 1, seconds: 9.5, pace: Some(Pace::Faster) },
            SplitRow { number: 2, seconds: 21.0, pace: Some(Pace::Slower) },
            SplitRow { number: 3, seconds: 30.0, pace: None },
        ];
        let chrome = WindowChrome { always_on_top: true, background_color: "#ffffff".to_string() };
        let view = render_main("0:30.00", false, &rows, &chrome, None);

        assert!(view.contains("Split 1: 0:09.50  [faster]"));
        assert!(view.contains("Split 2: 0:21.00  [slower]"));
        assert!(view.contains("Split 3: 0:30.00\n"));
        assert!(view.contains("always on top yes"));
        assert!(!view.contains("last action"));
    }

    #[test]
    fn test_compare_message_keeps_legacy_wording() {
        let outcome = CompareOutcome { matches: true, baseline_len: 2, saved_at: None };
        assert_eq!(render_compare(&outcome), "The splits match! Baseline has 2 splits.");
    }

    #[test]
    fn test_main_view_shows_last_action() {
        let chrome = WindowChrome { always_on_top: false, background_color: String::new() };
        let at = DateTime::from_timestamp(1_700_000_000, 0).unwrap();
        let view = render_main("0:01.00", true, &[], &chrome, Some(("split", at)));
        assert!(view.contains("  last action: split at 22:13:20 UTC\n"), "{}", view);
    }
}
