pub mod parser;
pub mod preset;

use std::collections::HashMap;

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

use crate::error::{QueueError, Result};
use preset::{get_preset, Action};

/// Actions shown in the status bar, in display order.
const STATUS_ACTIONS: [Action; 5] = [
    Action::Activate,
    Action::ContextMenu,
    Action::Reload,
    Action::Help,
    Action::Quit,
];

/// Actions listed in the help popup, in display order.
const HELP_ACTIONS: [Action; 13] = [
    Action::MoveUp,
    Action::MoveDown,
    Action::Top,
    Action::Bottom,
    Action::Activate,
    Action::Collapse,
    Action::Expand,
    Action::ContextMenu,
    Action::JumpToActive,
    Action::Reload,
    Action::Exit,
    Action::Help,
    Action::Quit,
];

pub struct KeybindingMap {
    bindings: HashMap<KeyEvent, Action>,
}

impl KeybindingMap {
    /// Start from a named preset, then apply `action = "key"` overrides. An
    /// override replaces every preset key bound to that action.
    pub fn from_preset(name: &str, overrides: &HashMap<String, String>) -> Result<Self> {
        let mut bindings = get_preset(name)
            .ok_or_else(|| QueueError::Config(format!("Unknown keybinding preset: {}", name)))?;

        let mut names: Vec<&String> = overrides.keys().collect();
        names.sort();
        for action_name in names {
            let action = Action::from_str(action_name)
                .ok_or_else(|| QueueError::Config(format!("Unknown action: {}", action_name)))?;
            let key_event = parser::parse_key(&overrides[action_name])?;

            bindings.retain(|_, bound| *bound != action);
            bindings.insert(key_event, action);
        }

        Ok(Self { bindings })
    }

    pub fn resolve(&self, key: &KeyEvent) -> Option<&Action> {
        self.bindings.get(key)
    }

    /// Shortest key for `action`, formatted for display.
    pub fn key_for(&self, action: &Action) -> Option<String> {
        self.bindings
            .iter()
            .filter(|(_, bound)| *bound == action)
            .map(|(key, _)| format_key_event(key))
            .min_by(|a, b| a.len().cmp(&b.len()).then_with(|| a.cmp(b)))
    }

    pub fn hints(&self) -> Vec<(String, &'static str)> {
        labelled(self, &STATUS_ACTIONS)
    }

    pub fn help_lines(&self) -> Vec<(String, &'static str)> {
        labelled(self, &HELP_ACTIONS)
    }
}

fn labelled(map: &KeybindingMap, actions: &[Action]) -> Vec<(String, &'static str)> {
    actions
        .iter()
        .filter_map(|action| map.key_for(action).map(|key| (key, action.hint_text())))
        .collect()
}

fn format_key_event(key: &KeyEvent) -> String {
    let mut parts = Vec::new();

    if key.modifiers.contains(KeyModifiers::CONTROL) {
        parts.push("Ctrl".to_string());
    }
    if key.modifiers.contains(KeyModifiers::ALT) {
        parts.push("Alt".to_string());
    }
    if key.modifiers.contains(KeyModifiers::SHIFT) && !matches!(key.code, KeyCode::Char(_)) {
        parts.push("Shift".to_string());
    }

    let key_str = match key.code {
        KeyCode::Char(' ') => "Space".to_string(),
        KeyCode::Char(c) => c.to_string(),
        KeyCode::Enter => "Enter".to_string(),
        KeyCode::Esc => "Esc".to_string(),
        KeyCode::Tab => "Tab".to_string(),
        KeyCode::Backspace => "Backspace".to_string(),
        KeyCode::Delete => "Delete".to_string(),
        KeyCode::Up => "↑".to_string(),
        KeyCode::Down => "↓".to_string(),
        KeyCode::Left => "←".to_string(),
        KeyCode::Right => "→".to_string(),
        KeyCode::Home => "Home".to_string(),
        KeyCode::End => "End".to_string(),
        KeyCode::PageUp => "PageUp".to_string(),
        KeyCode::PageDown => "PageDown".to_string(),
        KeyCode::F(n) => format!("F{}", n),
        _ => "?".to_string(),
    };
    parts.push(key_str);

    parts.join("+")
}
