use std::collections::HashMap;

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Action {
    MoveUp,
    MoveDown,
    Top,
    Bottom,
    Activate,
    Collapse,
    Expand,
    ContextMenu,
    JumpToActive,
    Reload,
    Exit,
    Quit,
    Help,
}

impl Action {
    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "move_up" => Some(Self::MoveUp),
            "move_down" => Some(Self::MoveDown),
            "top" => Some(Self::Top),
            "bottom" => Some(Self::Bottom),
            "activate" => Some(Self::Activate),
            "collapse" => Some(Self::Collapse),
            "expand" => Some(Self::Expand),
            "context_menu" => Some(Self::ContextMenu),
            "jump_to_active" => Some(Self::JumpToActive),
            "reload" => Some(Self::Reload),
            "exit" => Some(Self::Exit),
            "quit" => Some(Self::Quit),
            "help" => Some(Self::Help),
            _ => None,
        }
    }

    pub fn hint_text(&self) -> &'static str {
        match self {
            Self::MoveUp => "up",
            Self::MoveDown => "down",
            Self::Top => "top",
            Self::Bottom => "bottom",
            Self::Activate => "open/toggle",
            Self::Collapse => "collapse",
            Self::Expand => "expand",
            Self::ContextMenu => "menu",
            Self::JumpToActive => "active note",
            Self::Reload => "reload",
            Self::Exit => "exit",
            Self::Quit => "quit",
            Self::Help => "help",
        }
    }
}

fn key(code: KeyCode) -> KeyEvent {
    KeyEvent::new(code, KeyModifiers::NONE)
}

fn ctrl(code: KeyCode) -> KeyEvent {
    KeyEvent::new(code, KeyModifiers::CONTROL)
}

fn alt(code: KeyCode) -> KeyEvent {
    KeyEvent::new(code, KeyModifiers::ALT)
}

fn shift(code: KeyCode) -> KeyEvent {
    KeyEvent::new(code, KeyModifiers::SHIFT)
}

pub fn vim_preset() -> HashMap<KeyEvent, Action> {
    let mut m = HashMap::new();
    m.insert(key(KeyCode::Char('k')), Action::MoveUp);
    m.insert(key(KeyCode::Up), Action::MoveUp);
    m.insert(key(KeyCode::Char('j')), Action::MoveDown);
    m.insert(key(KeyCode::Down), Action::MoveDown);
    m.insert(key(KeyCode::Char('g')), Action::Top);
    m.insert(shift(KeyCode::Char('G')), Action::Bottom);
    m.insert(key(KeyCode::Enter), Action::Activate);
    m.insert(key(KeyCode::Char('o')), Action::Activate);
    m.insert(key(KeyCode::Char('h')), Action::Collapse);
    m.insert(key(KeyCode::Left), Action::Collapse);
    m.insert(key(KeyCode::Char('l')), Action::Expand);
    m.insert(key(KeyCode::Right), Action::Expand);
    m.insert(key(KeyCode::Char('m')), Action::ContextMenu);
    m.insert(key(KeyCode::Char('a')), Action::JumpToActive);
    m.insert(key(KeyCode::Char('r')), Action::Reload);
    m.insert(key(KeyCode::Esc), Action::Exit);
    m.insert(key(KeyCode::Char('q')), Action::Quit);
    m.insert(key(KeyCode::Char('?')), Action::Help);
    m
}

pub fn emacs_preset() -> HashMap<KeyEvent, Action> {
    let mut m = HashMap::new();
    m.insert(ctrl(KeyCode::Char('p')), Action::MoveUp);
    m.insert(key(KeyCode::Up), Action::MoveUp);
    m.insert(ctrl(KeyCode::Char('n')), Action::MoveDown);
    m.insert(key(KeyCode::Down), Action::MoveDown);
    m.insert(alt(KeyCode::Char('<')), Action::Top);
    m.insert(alt(KeyCode::Char('>')), Action::Bottom);
    m.insert(key(KeyCode::Enter), Action::Activate);
    m.insert(ctrl(KeyCode::Char('b')), Action::Collapse);
    m.insert(ctrl(KeyCode::Char('f')), Action::Expand);
    m.insert(alt(KeyCode::Enter), Action::ContextMenu);
    m.insert(ctrl(KeyCode::Char('l')), Action::JumpToActive);
    m.insert(ctrl(KeyCode::Char('r')), Action::Reload);
    m.insert(ctrl(KeyCode::Char('g')), Action::Exit);
    m.insert(ctrl(KeyCode::Char('q')), Action::Quit);
    m.insert(ctrl(KeyCode::Char('h')), Action::Help);
    m
}

pub fn vscode_preset() -> HashMap<KeyEvent, Action> {
    let mut m = HashMap::new();
    m.insert(key(KeyCode::Up), Action::MoveUp);
    m.insert(key(KeyCode::Down), Action::MoveDown);
    m.insert(key(KeyCode::Home), Action::Top);
    m.insert(key(KeyCode::End), Action::Bottom);
    m.insert(key(KeyCode::Enter), Action::Activate);
    m.insert(key(KeyCode::Char(' ')), Action::Activate);
    m.insert(key(KeyCode::Left), Action::Collapse);
    m.insert(key(KeyCode::Right), Action::Expand);
    m.insert(shift(KeyCode::F(10)), Action::ContextMenu);
    m.insert(ctrl(KeyCode::Char('e')), Action::JumpToActive);
    m.insert(key(KeyCode::F(5)), Action::Reload);
    m.insert(key(KeyCode::Esc), Action::Exit);
    m.insert(ctrl(KeyCode::Char('q')), Action::Quit);
    m.insert(key(KeyCode::F(1)), Action::Help);
    m
}

pub fn get_preset(name: &str) -> Option<HashMap<KeyEvent, Action>> {
    match name.to_lowercase().as_str() {
        "vim" => Some(vim_preset()),
        "emacs" => Some(emacs_preset()),
        "vscode" => Some(vscode_preset()),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn has_essential_actions(preset: &HashMap<KeyEvent, Action>) {
        let actions: Vec<&Action> = preset.values().collect();
        assert!(actions.contains(&&Action::MoveUp), "Missing MoveUp");
        assert!(actions.contains(&&Action::MoveDown), "Missing MoveDown");
        assert!(actions.contains(&&Action::Activate), "Missing Activate");
        assert!(actions.contains(&&Action::ContextMenu), "Missing ContextMenu");
        assert!(actions.contains(&&Action::Reload), "Missing Reload");
        assert!(actions.contains(&&Action::Quit), "Missing Quit");
    }

    #[test]
    fn vim_preset_has_essential_actions() {
        has_essential_actions(&vim_preset());
    }

    #[test]
    fn emacs_preset_has_essential_actions() {
        has_essential_actions(&emacs_preset());
    }

    #[test]
    fn vscode_preset_has_essential_actions() {
        has_essential_actions(&vscode_preset());
    }

    #[test]
    fn vim_j_maps_to_move_down() {
        let preset = vim_preset();
        assert_eq!(
            preset.get(&key(KeyCode::Char('j'))),
            Some(&Action::MoveDown)
        );
    }

    #[test]
    fn vim_enter_activates() {
        let preset = vim_preset();
        assert_eq!(preset.get(&key(KeyCode::Enter)), Some(&Action::Activate));
    }

    #[test]
    fn vim_m_opens_context_menu() {
        let preset = vim_preset();
        assert_eq!(
            preset.get(&key(KeyCode::Char('m'))),
            Some(&Action::ContextMenu)
        );
    }

    #[test]
    fn emacs_ctrl_p_maps_to_move_up() {
        let preset = emacs_preset();
        assert_eq!(preset.get(&ctrl(KeyCode::Char('p'))), Some(&Action::MoveUp));
    }

    #[test]
    fn vscode_arrows_fold_branches() {
        let preset = vscode_preset();
        assert_eq!(preset.get(&key(KeyCode::Left)), Some(&Action::Collapse));
        assert_eq!(preset.get(&key(KeyCode::Right)), Some(&Action::Expand));
    }

    #[test]
    fn get_preset_returns_none_for_unknown() {
        assert!(get_preset("unknown").is_none());
    }

    #[test]
    fn get_preset_case_insensitive() {
        assert!(get_preset("Vim").is_some());
        assert!(get_preset("Emacs").is_some());
        assert!(get_preset("VSCode").is_some());
    }

    #[test]
    fn action_from_str_roundtrip() {
        assert_eq!(Action::from_str("move_up"), Some(Action::MoveUp));
        assert_eq!(Action::from_str("context_menu"), Some(Action::ContextMenu));
        assert_eq!(Action::from_str("JUMP_TO_ACTIVE"), Some(Action::JumpToActive));
        assert_eq!(Action::from_str("nonexistent"), None);
    }

    #[test]
    fn action_hint_text_returns_non_empty() {
        let actions = [
            Action::MoveUp,
            Action::MoveDown,
            Action::Activate,
            Action::ContextMenu,
            Action::Reload,
            Action::Quit,
            Action::Help,
        ];
        for action in &actions {
            assert!(!action.hint_text().is_empty());
        }
    }
}
