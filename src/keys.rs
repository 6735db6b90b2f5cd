use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

// ============================================================================
// KEY PARSING
// ============================================================================

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KeyBinding {
    pub key: KeyCode,
    pub ctrl: bool,
    pub alt: bool,
    pub shift: bool,
}

impl KeyBinding {
    /// Parses strings such as `"q"`, `"Esc"`, `"Ctrl-c"` or `"Shift-Up"`.
    pub fn parse(key_str: &str) -> Option<Self> {
        let mut ctrl = false;
        let mut alt = false;
        let mut shift = false;

        // A lone "-" is the minus key, not a separator.
        let (modifiers, key_part) = match key_str.rsplit_once('-') {
            Some((mods, key)) if !key.is_empty() && !mods.is_empty() => (Some(mods), key),
            _ => (None, key_str),
        };

        if let Some(mods) = modifiers {
            for modifier in mods.split('-') {
                match modifier.to_lowercase().as_str() {
                    "ctrl" | "control" => ctrl = true,
                    "alt" => alt = true,
                    "shift" => shift = true,
                    _ => return None,
                }
            }
        }

        let key = match key_part {
            "Esc" | "esc" | "Escape" => KeyCode::Esc,
            "Enter" | "enter" | "Return" => KeyCode::Enter,
            "Tab" => KeyCode::Tab,
            "Backspace" => KeyCode::Backspace,
            "Delete" | "Del" => KeyCode::Delete,
            "Home" => KeyCode::Home,
            "End" => KeyCode::End,
            "PageUp" => KeyCode::PageUp,
            "PageDown" => KeyCode::PageDown,
            "Up" => KeyCode::Up,
            "Down" => KeyCode::Down,
            "Left" => KeyCode::Left,
            "Right" => KeyCode::Right,
            "Space" => KeyCode::Char(' '),
            f if f.len() > 1 && f.starts_with('F') => match f[1..].parse::<u8>() {
                Ok(n @ 1..=12) => KeyCode::F(n),
                _ => return None,
            },
            c => {
                let mut chars = c.chars();
                match (chars.next(), chars.next()) {
                    (Some(ch), None) => KeyCode::Char(ch),
                    _ => return None,
                }
            }
        };

        Some(KeyBinding {
            key,
            ctrl,
            alt,
            shift,
        })
    }

    pub fn matches(&self, event: &KeyEvent) -> bool {
        if self.key != event.code {
            return false;
        }

        let modifiers = event.modifiers;
        let ctrl = modifiers.contains(KeyModifiers::CONTROL);
        let alt = modifiers.contains(KeyModifiers::ALT);
        let shift = modifiers.contains(KeyModifiers::SHIFT);

        // Terminals disagree on whether shifted characters carry SHIFT.
        let shift_ok = matches!(self.key, KeyCode::Char(_)) && !self.shift || self.shift == shift;

        self.ctrl == ctrl && self.alt == alt && shift_ok
    }
}

/// True when any of the configured key strings matches `event`.
pub fn matches_any(bindings: &[String], event: &KeyEvent) -> bool {
    bindings
        .iter()
        .filter_map(|s| KeyBinding::parse(s))
        .any(|binding| binding.matches(event))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn press(code: KeyCode, modifiers: KeyModifiers) -> KeyEvent {
        KeyEvent::new(code, modifiers)
    }

    #[test]
    fn parses_named_and_char_keys() {
        assert_eq!(KeyBinding::parse("Esc").unwrap().key, KeyCode::Esc);
        assert_eq!(KeyBinding::parse("`").unwrap().key, KeyCode::Char('`'));
        assert_eq!(KeyBinding::parse("F5").unwrap().key, KeyCode::F(5));
        assert_eq!(KeyBinding::parse("-").unwrap().key, KeyCode::Char('-'));
        assert!(KeyBinding::parse("F13").is_none());
        assert!(KeyBinding::parse("NotAKey").is_none());
    }

    #[test]
    fn parses_modifiers() {
        let binding = KeyBinding::parse("Ctrl-c").unwrap();
        assert_eq!(binding.key, KeyCode::Char('c'));
        assert!(binding.ctrl);
        assert!(!binding.alt);

        let binding = KeyBinding::parse("Ctrl-Alt-x").unwrap();
        assert!(binding.ctrl && binding.alt);

        assert!(KeyBinding::parse("Hyper-x").is_none());
    }

    #[test]
    fn matching_respects_modifiers() {
        let ctrl_c = KeyBinding::parse("Ctrl-c").unwrap();
        assert!(ctrl_c.matches(&press(KeyCode::Char('c'), KeyModifiers::CONTROL)));
        assert!(!ctrl_c.matches(&press(KeyCode::Char('c'), KeyModifiers::NONE)));

        let q = KeyBinding::parse("q").unwrap();
        assert!(q.matches(&press(KeyCode::Char('q'), KeyModifiers::NONE)));
        assert!(!q.matches(&press(KeyCode::Char('q'), KeyModifiers::CONTROL)));
    }

    #[test]
    fn shifted_chars_match_plain_binding() {
        let tilde = KeyBinding::parse("~").unwrap();
        assert!(tilde.matches(&press(KeyCode::Char('~'), KeyModifiers::SHIFT)));
    }

    #[test]
    fn matches_any_skips_invalid_entries() {
        let bindings = vec!["bogus-key-name".to_string(), "Enter".to_string()];
        assert!(matches_any(&bindings, &press(KeyCode::Enter, KeyModifiers::NONE)));
        assert!(!matches_any(&bindings, &press(KeyCode::Tab, KeyModifiers::NONE)));
    }
}
