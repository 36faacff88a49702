use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

use crate::error::{QueueError, Result};

/// Parse a binding such as `"Ctrl+Shift+k"`, `"Space"` or `"Shift+F10"`.
///
/// Modifiers come first, the key itself last. A literal `+` is written as
/// `"plus"` since it doubles as the separator.
pub fn parse_key(input: &str) -> Result<KeyEvent> {
    let trimmed = input.trim();
    if trimmed.is_empty() {
        return Err(QueueError::Config("Empty key binding".into()));
    }

    let (mod_part, key_part) = match trimmed.rsplit_once('+') {
        Some((mods, key)) => (Some(mods), key.trim()),
        None => (None, trimmed),
    };

    let mut modifiers = KeyModifiers::NONE;
    if let Some(mods) = mod_part {
        for name in mods.split('+') {
            modifiers |= parse_modifier(name.trim()).ok_or_else(|| {
                QueueError::Config(format!("Unknown modifier '{}' in key '{}'", name, input))
            })?;
        }
    }

    if key_part.is_empty() {
        return Err(QueueError::Config(format!(
            "No key code found in '{}'",
            input
        )));
    }

    Ok(KeyEvent::new(parse_key_code(key_part)?, modifiers))
}

fn parse_modifier(name: &str) -> Option<KeyModifiers> {
    match name.to_lowercase().as_str() {
        "ctrl" | "control" => Some(KeyModifiers::CONTROL),
        "shift" => Some(KeyModifiers::SHIFT),
        "alt" | "meta" | "option" => Some(KeyModifiers::ALT),
        _ => None,
    }
}

fn parse_key_code(s: &str) -> Result<KeyCode> {
    let lower = s.to_lowercase();
    let code = match lower.as_str() {
        "enter" | "return" => KeyCode::Enter,
        "esc" | "escape" => KeyCode::Esc,
        "tab" => KeyCode::Tab,
        "backspace" | "bs" => KeyCode::Backspace,
        "delete" | "del" => KeyCode::Delete,
        "home" => KeyCode::Home,
        "end" => KeyCode::End,
        "pageup" | "pgup" => KeyCode::PageUp,
        "pagedown" | "pgdn" => KeyCode::PageDown,
        "up" | "↑" => KeyCode::Up,
        "down" | "↓" => KeyCode::Down,
        "left" | "←" => KeyCode::Left,
        "right" | "→" => KeyCode::Right,
        "space" => KeyCode::Char(' '),
        "plus" => KeyCode::Char('+'),
        f if f.len() > 1 && f.starts_with('f') => parse_function_key(&f[1..])?,
        _ => {
            let mut chars = s.chars();
            match (chars.next(), chars.next()) {
                (Some(ch), None) => KeyCode::Char(ch),
                _ => return Err(QueueError::Config(format!("Unknown key: {}", s))),
            }
        }
    };
    Ok(code)
}

fn parse_function_key(digits: &str) -> Result<KeyCode> {
    let num: u8 = digits
        .parse()
        .map_err(|_| QueueError::Config(format!("Invalid function key: F{}", digits)))?;
    if !(1..=12).contains(&num) {
        return Err(QueueError::Config(format!(
            "Function key out of range: F{}",
            num
        )));
    }
    Ok(KeyCode::F(num))
}
