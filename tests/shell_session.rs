use std::sync::Arc;

mod common;

use basic_split::{
    services::{load_splits, save_splits, SettingsStore},
    shell::{Console, Mode, Reply, Shell},
    state::{AppState, SettingKey, SplitList, TimerEngine, UnmatchedPolicy},
};
use common::ManualClock;
use tempfile::{tempdir, TempDir};

struct Session {
    shell: Shell,
    clock: ManualClock,
    dir: TempDir,
}

impl Session {
    fn new(policy: UnmatchedPolicy) -> Self {
        let dir = tempdir().unwrap();
        let clock = ManualClock::new();
        let store = SettingsStore::open(dir.path().join("config.toml")).unwrap();
        let state = AppState::new(TimerEngine::new(clock.clone()), store, policy).unwrap();
        Self {
            shell: Shell::new(Arc::new(state)),
            clock,
            dir,
        }
    }

    async fn send(&mut self, line: &str) -> String {
        match self.shell.handle_line(line).await {
            Reply::Render(text) => text,
            Reply::Close => "<closed>".to_string(),
        }
    }

    fn path(&self, name: &str) -> String {
        self.dir.path().join(name).display().to_string()
    }
}

#[tokio::test]
async fn test_hotkeys_drive_the_timer() {
    let mut s = Session::new(UnmatchedPolicy::Slower);

    s.send("s").await;
    s.clock.advance_secs(5.999);
    let view = s.send(" ").await;
    assert!(view.contains("Split 1: 0:05.99"), "{}", view);
    assert!(view.contains("last action: split at "), "{}", view);

    s.clock.advance_secs(59.257);
    s.send("space").await;
    let view = s.send("x").await;
    assert!(view.contains("Split 2: 1:05.25"), "{}", view);
    assert!(view.contains("[stopped]"));

    // Split while stopped does nothing
    let view = s.send("split").await;
    assert!(!view.contains("Split 3"));

    let view = s.send("r").await;
    assert!(view.contains("last action: reset at "), "{}", view);
    assert!(view.contains("0:00.00"));
    assert!(view.contains("(no splits)"));
}

#[tokio::test]
async fn test_save_then_compare_marks_rows() {
    let mut s = Session::new(UnmatchedPolicy::Slower);
    let best = s.path("best");
    save_splits(&s.dir.path().join("best.split"), &SplitList::from(vec![10.0, 20.0])).unwrap();

    s.send("toggle").await;
    s.clock.advance_secs(9.5);
    s.send("split").await;
    s.clock.advance_secs(11.5);
    s.send("split").await;
    s.clock.advance_secs(1.0);
    s.send("split").await;
    s.send("toggle").await;

    let view = s.send(&format!("compare {}", best)).await;
    assert!(view.starts_with("The splits do not match."), "{}", view);
    assert!(view.contains("Split 1: 0:09.50  [faster]"));
    assert!(view.contains("Split 2: 0:21.00  [slower]"));
    assert!(view.contains("Split 3: 0:22.00  [slower]"));

    let run = s.path("run.split");
    let reply = s.send(&format!("save {}", run)).await;
    assert!(reply.starts_with("Saved 3 splits"), "{}", reply);
    assert_eq!(load_splits(&s.dir.path().join("run.split")).unwrap().splits.as_slice(), &[9.5, 21.0, 22.0]);

    let view = s.send(&format!("compare {}", run)).await;
    assert!(view.starts_with("The splits match!"), "{}", view);
}

#[tokio::test]
async fn test_unmatched_rows_can_stay_unannotated() {
    let mut s = Session::new(UnmatchedPolicy::None);
    save_splits(&s.dir.path().join("short.split"), &SplitList::from(vec![10.0])).unwrap();

    s.send("start").await;
    s.clock.advance_secs(12.0);
    s.send("split").await;
    s.clock.advance_secs(3.0);
    s.send("split").await;

    let view = s.send(&format!("compare {}", s.path("short.split"))).await;
    assert!(view.contains("Split 1: 0:12.00  [slower]"));
    assert!(view.contains("Split 2: 0:15.00\n"));
}

#[tokio::test]
async fn test_compare_errors_leave_shell_usable() {
    let mut s = Session::new(UnmatchedPolicy::Slower);
    std::fs::write(s.dir.path().join("junk.split"), b"not a split file").unwrap();

    let reply = s.send(&format!("compare {}", s.path("missing.split"))).await;
    assert!(reply.starts_with("Error: I/O error"), "{}", reply);

    let reply = s.send(&format!("compare {}", s.path("junk.split"))).await;
    assert!(reply.starts_with("Error: Malformed split file"), "{}", reply);

    assert_eq!(s.shell.mode(), &Mode::Main);
    assert!(s.send("show").await.contains("BasicSplit"));
}

#[tokio::test]
async fn test_new_asks_for_confirmation() {
    let mut s = Session::new(UnmatchedPolicy::Slower);
    s.send("start").await;
    s.clock.advance_secs(1.0);
    s.send("split").await;

    assert!(s.send("new").await.contains("[y/N]"));
    assert_eq!(s.shell.mode(), &Mode::ConfirmNew);
    assert_eq!(s.send("n").await, "Kept the current splits.");
    assert_eq!(s.shell.state().splits().unwrap().len(), 1);

    s.send("new").await;
    let view = s.send("yes").await;
    assert!(view.contains("(no splits)"));
    assert!(!s.shell.state().is_running().unwrap());
}

#[tokio::test]
async fn test_settings_dialog_rebinds_and_persists() {
    let mut s = Session::new(UnmatchedPolicy::Slower);
    let config = s.dir.path().join("config.toml");

    let view = s.send("settings").await;
    assert!(view.contains("Split Hotkey:"));
    assert!(matches!(s.shell.mode(), Mode::Settings(_)));

    assert!(s.send("bind start").await.contains("Press the new start hotkey"));
    let view = s.send("g").await;
    assert!(view.starts_with("start hotkey set to g"), "{}", view);

    // Live in memory, not on disk yet
    assert_eq!(s.shell.state().settings().unwrap().get(SettingKey::StartHotkey), "g");
    assert_eq!(SettingsStore::open(&config).unwrap().get(SettingKey::StartHotkey), "s");

    s.send("ontop").await;
    s.send("color #336699").await;
    let view = s.send("save").await;
    assert!(view.starts_with("Settings saved."));
    assert!(view.contains("background #336699  always on top yes"));
    assert_eq!(s.shell.mode(), &Mode::Main);

    let reloaded = SettingsStore::open(&config).unwrap();
    assert_eq!(reloaded.get(SettingKey::StartHotkey), "g");
    assert_eq!(reloaded.get(SettingKey::AlwaysOnTop), "yes");
    assert_eq!(reloaded.get(SettingKey::BackgroundColor), "#336699");

    // New binding is live in the main window
    assert!(s.send("g").await.contains("[running]"));
}

#[tokio::test]
async fn test_hotkeys_are_ignored_inside_settings() {
    let mut s = Session::new(UnmatchedPolicy::Slower);
    s.send("settings").await;
    let reply = s.send("s").await;
    assert!(reply.contains("unknown settings command"));
    assert!(!s.shell.state().is_running().unwrap());

    assert_eq!(s.send("cancel").await, "Settings closed without saving.");
    assert_eq!(s.shell.mode(), &Mode::Main);
}

#[tokio::test]
async fn test_close_and_about() {
    let mut s = Session::new(UnmatchedPolicy::Slower);
    let about = s.send("about").await;
    assert!(about.contains("[1]"));
    assert!(s.send("open 9").await.starts_with("Error: Failed to open link"));
    assert_eq!(s.send("close").await, "<closed>");
}

#[tokio::test]
async fn test_run_reads_until_close() {
    let dir = tempdir().unwrap();
    let store = SettingsStore::open(dir.path().join("config.toml")).unwrap();
    let state = AppState::new(TimerEngine::new(ManualClock::new()), store, UnmatchedPolicy::Slower).unwrap();
    let shell = Shell::new(Arc::new(state));

    let input: &[u8] = b"help\nclose\nstart\n";
    let console = Console::new(Vec::new());
    shell.run(input, console.clone()).await.unwrap();

    let text = String::from_utf8(console.into_inner().unwrap()).unwrap();
    assert!(text.contains("Type 'help' for commands."));
    assert!(text.contains("Commands:"));
    assert!(!text.contains("[running]"));
}
