//! Parsing of input lines into shell commands

use std::path::PathBuf;

use crate::{services::SPLIT_FILE_EXTENSION, state::TimerAction};

/// Commands accepted in the main window
#[derive(Debug, Clone, PartialEq)]
pub enum Command {
    Action(TimerAction),
    Toggle,
    New,
    Save(PathBuf),
    Compare(PathBuf),
    Settings,
    About,
    OpenLink(usize),
    Show,
    Help,
    Close,
    Invalid(String),
}

/// Commands accepted while the settings form is open
#[derive(Debug, Clone, PartialEq)]
pub enum SettingsCommand {
    Bind(TimerAction),
    ToggleAlwaysOnTop,
    Color(String),
    Show,
    Save,
    Cancel,
    Invalid(String),
}

fn split_word(line: &str) -> (String, &str) {
    let line = line.trim();
    match line.split_once(char::is_whitespace) {
        Some((word, rest)) => (word.to_ascii_lowercase(), rest.trim()),
        None => (line.to_ascii_lowercase(), ""),
    }
}

/// Path argument with the split extension added when none was given
fn split_path(arg: &str) -> PathBuf {
    let path = PathBuf::from(arg);
    if path.extension().is_none() {
        path.with_extension(SPLIT_FILE_EXTENSION)
    } else {
        path
    }
}

/// Parse a main-window command word. Hotkeys are resolved before this.
pub fn parse_command(line: &str) -> Command {
    let (word, rest) = split_word(line);
    match word.as_str() {
        "start" => Command::Action(TimerAction::Start),
        "stop" => Command::Action(TimerAction::Stop),
        "reset" => Command::Action(TimerAction::Reset),
        "split" => Command::Action(TimerAction::Split),
        "toggle" => Command::Toggle,
        "new" => Command::New,
        "save" | "compare" if rest.is_empty() => {
            Command::Invalid(format!("usage: {} <file.{}>", word, SPLIT_FILE_EXTENSION))
        }
        "save" => Command::Save(split_path(rest)),
        "compare" => Command::Compare(split_path(rest)),
        "settings" => Command::Settings,
        "about" => Command::About,
        "open" => match rest.parse::<usize>() {
            Ok(n) if n > 0 => Command::OpenLink(n),
            _ => Command::Invalid("usage: open <link number>".to_string()),
        },
        "" | "show" => Command::Show,
        "help" | "?" => Command::Help,
        "close" | "quit" | "exit" => Command::Close,
        other => Command::Invalid(format!("unknown command '{}', try 'help'", other)),
    }
}

/// Parse a line typed while the settings form is open
pub fn parse_settings_command(line: &str) -> SettingsCommand {
    let (word, rest) = split_word(line);
    match word.as_str() {
        "bind" => match rest.parse::<TimerAction>() {
            Ok(action) => SettingsCommand::Bind(action),
            Err(e) => SettingsCommand::Invalid(format!("{}; usage: bind <start|stop|reset|split>", e)),
        },
        "ontop" => SettingsCommand::ToggleAlwaysOnTop,
        "color" | "colour" if rest.is_empty() => SettingsCommand::Invalid("usage: color <value>".to_string()),
        "color" | "colour" => SettingsCommand::Color(rest.to_string()),
        "" | "show" => SettingsCommand::Show,
        "save" => SettingsCommand::Save,
        "cancel" | "close" => SettingsCommand::Cancel,
        other => SettingsCommand::Invalid(format!("unknown settings command '{}'", other)),
    }
}

/// Answer to the "start a new set of splits?" prompt
pub fn is_confirmation(line: &str) -> bool {
    matches!(line.trim().to_ascii_lowercase().as_str(), "y" | "yes")
}
