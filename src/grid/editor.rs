use crossterm::event::{KeyCode, KeyEvent};

use crate::units::{normalize_input, DisplayUnit, PaletteColor, UnitId, MAX_VALUE_LEN};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum EditorField {
    Power,
    Alternating,
    ValueA,
    ValueB,
    Color,
}

impl EditorField {
    pub fn all() -> &'static [EditorField] {
        &[
            EditorField::Power,
            EditorField::Alternating,
            EditorField::ValueA,
            EditorField::ValueB,
            EditorField::Color,
        ]
    }

    fn index(&self) -> usize {
        Self::all().iter().position(|f| f == self).unwrap_or(0)
    }

    fn next(&self) -> EditorField {
        let all = Self::all();
        all[(self.index() + 1) % all.len()]
    }

    fn prev(&self) -> EditorField {
        let all = Self::all();
        all[(self.index() + all.len() - 1) % all.len()]
    }
}

/// What the shell should do after an editor keystroke.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum EditorAction {
    None,
    Close,
    TogglePower,
    ToggleAlternating,
    SetValue(String),
    SetSecondary(String),
    SetColor(PaletteColor),
}

/// Per-unit detail editor. Holds only focus; the unit itself stays in the
/// store so the editor always shows live values.
pub struct Editor {
    pub unit: UnitId,
    pub focus: EditorField,
}

impl Editor {
    pub fn new(unit: UnitId) -> Self {
        Self {
            unit,
            focus: EditorField::Power,
        }
    }

    pub fn handle_key(&mut self, key: KeyEvent, unit: &DisplayUnit) -> EditorAction {
        match key.code {
            KeyCode::Esc => return EditorAction::Close,
            KeyCode::Tab | KeyCode::Down => {
                self.focus = self.focus.next();
                return EditorAction::None;
            }
            KeyCode::BackTab | KeyCode::Up => {
                self.focus = self.focus.prev();
                return EditorAction::None;
            }
            _ => {}
        }

        match self.focus {
            EditorField::Power => match key.code {
                KeyCode::Enter | KeyCode::Char(' ') => EditorAction::TogglePower,
                _ => EditorAction::None,
            },
            EditorField::Alternating => match key.code {
                KeyCode::Enter | KeyCode::Char(' ') => EditorAction::ToggleAlternating,
                _ => EditorAction::None,
            },
            EditorField::ValueA => edit_text(key, &unit.value, EditorAction::SetValue),
            EditorField::ValueB => {
                // Read-only until the unit alternates.
                if !unit.is_alternating {
                    return match key.code {
                        KeyCode::Enter => EditorAction::Close,
                        _ => EditorAction::None,
                    };
                }
                edit_text(key, &unit.secondary_value, EditorAction::SetSecondary)
            }
            EditorField::Color => match key.code {
                KeyCode::Left => EditorAction::SetColor(unit.color.prev()),
                KeyCode::Right => EditorAction::SetColor(unit.color.next()),
                KeyCode::Char(c @ '1'..='7') => {
                    let idx = c as usize - '1' as usize;
                    EditorAction::SetColor(PaletteColor::all()[idx])
                }
                KeyCode::Enter => EditorAction::Close,
                _ => EditorAction::None,
            },
        }
    }
}

fn edit_text(key: KeyEvent, current: &str, make: fn(String) -> EditorAction) -> EditorAction {
    match key.code {
        KeyCode::Enter => EditorAction::Close,
        KeyCode::Backspace => {
            let mut text = current.to_string();
            text.pop();
            make(text)
        }
        KeyCode::Char(c) if !c.is_control() => {
            if current.chars().count() >= MAX_VALUE_LEN {
                return EditorAction::None;
            }
            make(normalize_input(&format!("{current}{c}")))
        }
        _ => EditorAction::None,
    }
}
