//! Input handlers for each shell mode

use std::sync::Arc;
use tracing::{debug, info, warn};

use crate::{
    error::{SplitError, SplitResult},
    services::open_link,
    state::{AppState, TimerAction},
    tasks::spawn_display_refresh,
};
use super::{
    commands::{is_confirmation, parse_command, parse_settings_command, Command, SettingsCommand},
    responses::{render_about, render_compare, render_main, render_settings, ABOUT_LINKS, HELP, SETTINGS_HELP},
    SettingsForm,
};

/// What the shell is currently waiting for
#[derive(Debug, Clone, PartialEq)]
pub enum Mode {
    Main,
    /// "Start a new set of splits?" is on screen
    ConfirmNew,
    Settings(SettingsForm),
    /// The next key becomes the hotkey for the action
    Capture(SettingsForm, TimerAction),
}

/// Output of handling one input line
#[derive(Debug, Clone, PartialEq)]
pub enum Reply {
    Render(String),
    Close,
}

/// Dispatches input lines to `AppState` and keeps the current mode
pub struct Shell {
    state: Arc<AppState>,
    mode: Mode,
}

impl Shell {
    /// Shell in the main window over `state`
    pub fn new(state: Arc<AppState>) -> Self {
        Self {
            state,
            mode: Mode::Main,
        }
    }

    /// Which view input is currently routed to
    pub fn mode(&self) -> &Mode {
        &self.mode
    }

    /// Application state this shell drives
    pub fn state(&self) -> &Arc<AppState> {
        &self.state
    }

    /// Main window as it currently looks
    pub fn main_view(&self) -> SplitResult<String> {
        let (action, at) = self.state.get_last_action();
        Ok(render_main(
            &self.state.elapsed_label()?,
            self.state.is_running()?,
            &self.state.split_rows()?,
            &self.state.chrome()?,
            action.as_deref().zip(at),
        ))
    }

    /// Handle one line of input. Errors are reported and the shell carries on.
    pub async fn handle_line(&mut self, line: &str) -> Reply {
        let mode = std::mem::replace(&mut self.mode, Mode::Main);
        let (next, result) = match mode {
            Mode::Main => (Mode::Main, self.handle_main(line).await),
            Mode::ConfirmNew => (Mode::Main, self.handle_confirm_new(line)),
            Mode::Settings(form) => self.handle_settings(form, line),
            Mode::Capture(form, action) => self.handle_capture(form, action, line),
        };
        // handle_main may have opened a dialog
        if self.mode == Mode::Main {
            self.mode = next;
        }

        match result {
            Ok(reply) => reply,
            Err(e) => {
                warn!("Action failed: {}", e);
                Reply::Render(format!("Error: {}", e))
            }
        }
    }

    fn after_action(&self, started: Option<u64>) -> SplitResult<Reply> {
        if let Some(run_id) = started {
            spawn_display_refresh(&self.state, run_id);
        }
        Ok(Reply::Render(self.main_view()?))
    }

    async fn handle_main(&mut self, line: &str) -> SplitResult<Reply> {
        if let Some(action) = self.state.action_for_key(line)? {
            debug!("Hotkey {:?} -> {}", line, action.name());
            let started = self.state.perform(action)?;
            return self.after_action(started);
        }

        match parse_command(line) {
            Command::Action(action) => {
                let started = self.state.perform(action)?;
                self.after_action(started)
            }
            Command::Toggle => {
                let started = self.state.toggle()?;
                self.after_action(started)
            }
            Command::New => {
                self.mode = Mode::ConfirmNew;
                Ok(Reply::Render("Do you want to start a new set of splits? [y/N]".to_string()))
            }
            Command::Save(path) => {
                let count = self.state.save_splits(&path)?;
                Ok(Reply::Render(format!("Saved {} splits to {}", count, path.display())))
            }
            Command::Compare(path) => {
                let outcome = self.state.compare(&path)?;
                Ok(Reply::Render(format!("{}\n{}", render_compare(&outcome), self.main_view()?)))
            }
            Command::Settings => {
                let form = SettingsForm::from_settings(&self.state.settings()?)?;
                let view = format!("{}\n{}", render_settings(&form), SETTINGS_HELP);
                self.mode = Mode::Settings(form);
                Ok(Reply::Render(view))
            }
            Command::About => Ok(Reply::Render(render_about())),
            Command::OpenLink(n) => {
                let (title, url) = ABOUT_LINKS
                    .get(n - 1)
                    .ok_or_else(|| SplitError::OpenLink(format!("no link number {}", n)))?;
                open_link(url).await?;
                Ok(Reply::Render(format!("Opened {}", title)))
            }
            Command::Show => Ok(Reply::Render(self.main_view()?)),
            Command::Help => Ok(Reply::Render(HELP.to_string())),
            Command::Close => {
                info!("Close requested");
                Ok(Reply::Close)
            }
            Command::Invalid(message) => Ok(Reply::Render(message)),
        }
    }

    fn handle_confirm_new(&self, line: &str) -> SplitResult<Reply> {
        if !is_confirmation(line) {
            return Ok(Reply::Render("Kept the current splits.".to_string()));
        }
        self.state.reset()?;
        Ok(Reply::Render(self.main_view()?))
    }

    fn handle_settings(&self, mut form: SettingsForm, line: &str) -> (Mode, SplitResult<Reply>) {
        match parse_settings_command(line) {
            SettingsCommand::Bind(action) => {
                let prompt = format!("Press the new {} hotkey", action.name());
                (Mode::Capture(form, action), Ok(Reply::Render(prompt)))
            }
            SettingsCommand::ToggleAlwaysOnTop => {
                let result = form
                    .toggle_always_on_top(&self.state)
                    .map(|_| Reply::Render(render_settings(&form)));
                (Mode::Settings(form), result)
            }
            SettingsCommand::Color(color) => {
                let result = form
                    .pick_color(&self.state, &color)
                    .map(|_| Reply::Render(render_settings(&form)));
                (Mode::Settings(form), result)
            }
            SettingsCommand::Show => {
                let view = render_settings(&form);
                (Mode::Settings(form), Ok(Reply::Render(view)))
            }
            SettingsCommand::Save => match form.save(&self.state) {
                Ok(()) => (
                    Mode::Main,
                    self.main_view()
                        .map(|view| Reply::Render(format!("Settings saved.\n{}", view))),
                ),
                Err(e) => (Mode::Settings(form), Err(e)),
            },
            SettingsCommand::Cancel => (
                Mode::Main,
                Ok(Reply::Render("Settings closed without saving.".to_string())),
            ),
            SettingsCommand::Invalid(message) => (Mode::Settings(form), Ok(Reply::Render(message))),
        }
    }

    fn handle_capture(
        &self,
        mut form: SettingsForm,
        action: TimerAction,
        line: &str,
    ) -> (Mode, SplitResult<Reply>) {
        if line.trim().is_empty() && line != " " {
            let prompt = format!("Press the new {} hotkey", action.name());
            return (Mode::Capture(form, action), Ok(Reply::Render(prompt)));
        }

        let result = form.capture_hotkey(&self.state, action, line).map(|keysym| {
            Reply::Render(format!(
                "{} hotkey set to {}\n{}",
                action.name(),
                keysym,
                render_settings(&form)
            ))
        });
        (Mode::Settings(form), result)
    }
}
