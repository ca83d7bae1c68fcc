use std::fmt;

use ratatui::style::Color;
use serde::{Deserialize, Serialize};
use thiserror::Error;

pub const GRID_ROWS: u16 = 10;
pub const GRID_COLS: u16 = 20;
pub const TOTAL_DISPLAYS: usize = (GRID_ROWS * GRID_COLS) as usize;
/// Longest text a single dual-digit module can hold.
pub const MAX_VALUE_LEN: usize = 2;

/// 1-based module address, row-major over the 10x20 grid.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(into = "u16", try_from = "u16")]
pub struct UnitId(u16);

impl From<UnitId> for u16 {
    fn from(id: UnitId) -> u16 {
        id.0
    }
}

impl TryFrom<u16> for UnitId {
    type Error = UnitsError;

    fn try_from(id: u16) -> Result<Self, Self::Error> {
        UnitId::new(id).ok_or(UnitsError::InvalidId(id))
    }
}

impl UnitId {
    pub const FIRST: UnitId = UnitId(1);

    pub fn new(id: u16) -> Option<Self> {
        if (1..=TOTAL_DISPLAYS as u16).contains(&id) {
            Some(UnitId(id))
        } else {
            None
        }
    }

    /// Zero-based row and column to id.
    pub fn from_coord(row: u16, col: u16) -> Option<Self> {
        if row >= GRID_ROWS || col >= GRID_COLS {
            return None;
        }
        Some(UnitId(row * GRID_COLS + col + 1))
    }

    pub fn get(self) -> u16 {
        self.0
    }

    pub fn index(self) -> usize {
        (self.0 - 1) as usize
    }

    pub fn row(self) -> u16 {
        (self.0 - 1) / GRID_COLS
    }

    /// Zero-based column; the printed label adds one.
    pub fn col(self) -> u16 {
        (self.0 - 1) % GRID_COLS
    }

    pub fn row_label(self) -> char {
        row_label(self.row())
    }

    pub fn all() -> impl Iterator<Item = UnitId> {
        (1..=TOTAL_DISPLAYS as u16).map(UnitId)
    }
}

impl fmt::Display for UnitId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.row_label(), self.col() + 1)
    }
}

pub fn row_label(row: u16) -> char {
    (b'A' + row as u8) as char
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PaletteColor {
    Green,
    Blue,
    Yellow,
    Purple,
    Cyan,
    White,
    /// Also the fallback for tags outside the palette.
    #[serde(other)]
    Red,
}

impl PaletteColor {
    pub fn all() -> &'static [PaletteColor] {
        &[
            PaletteColor::Red,
            PaletteColor::Green,
            PaletteColor::Blue,
            PaletteColor::Yellow,
            PaletteColor::Purple,
            PaletteColor::Cyan,
            PaletteColor::White,
        ]
    }

    pub fn name(&self) -> &'static str {
        match self {
            PaletteColor::Red => "red",
            PaletteColor::Green => "green",
            PaletteColor::Blue => "blue",
            PaletteColor::Yellow => "yellow",
            PaletteColor::Purple => "purple",
            PaletteColor::Cyan => "cyan",
            PaletteColor::White => "white",
        }
    }

    pub fn rgb(&self) -> Color {
        match self {
            PaletteColor::Red => Color::Rgb(239, 68, 68),
            PaletteColor::Green => Color::Rgb(34, 197, 94),
            PaletteColor::Blue => Color::Rgb(59, 130, 246),
            PaletteColor::Yellow => Color::Rgb(234, 179, 8),
            PaletteColor::Purple => Color::Rgb(168, 85, 247),
            PaletteColor::Cyan => Color::Rgb(6, 182, 212),
            PaletteColor::White => Color::Rgb(248, 250, 252),
        }
    }

    pub fn index(&self) -> usize {
        Self::all().iter().position(|c| c == self).unwrap_or(0)
    }

    pub fn next(&self) -> PaletteColor {
        let all = Self::all();
        all[(self.index() + 1) % all.len()]
    }

    pub fn prev(&self) -> PaletteColor {
        let all = Self::all();
        all[(self.index() + all.len() - 1) % all.len()]
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DisplayUnit {
    pub id: UnitId,
    pub value: String,
    pub secondary_value: String,
    pub is_alternating: bool,
    pub is_on: bool,
    pub color: PaletteColor,
}

impl DisplayUnit {
    pub fn new(id: UnitId) -> Self {
        DisplayUnit {
            id,
            value: "00".to_string(),
            secondary_value: "00".to_string(),
            is_alternating: false,
            is_on: false,
            color: PaletteColor::Red,
        }
    }

    /// Raw value shown for the given blink phase. Only lit alternating
    /// units ever show their secondary value.
    pub fn shown_value(&self, phase: BlinkPhase) -> &str {
        if self.is_alternating && self.is_on && phase == BlinkPhase::Secondary {
            &self.secondary_value
        } else {
            &self.value
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum BlinkPhase {
    Primary,
    Secondary,
}

impl BlinkPhase {
    pub fn flipped(self) -> Self {
        match self {
            BlinkPhase::Primary => BlinkPhase::Secondary,
            BlinkPhase::Secondary => BlinkPhase::Primary,
        }
    }
}

/// Upper-cased, left-padded to two cells, last two characters kept.
pub fn display_text(raw: &str) -> String {
    let upper = raw.to_uppercase();
    let chars: Vec<char> = upper.chars().collect();
    let tail: String = if chars.len() > MAX_VALUE_LEN {
        chars[chars.len() - MAX_VALUE_LEN..].iter().collect()
    } else {
        upper
    };
    format!("{:>width$}", tail, width = MAX_VALUE_LEN)
}

/// Normalizes text typed into a value field.
pub fn normalize_input(raw: &str) -> String {
    raw.to_uppercase().chars().take(MAX_VALUE_LEN).collect()
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct UnitPatch {
    pub value: Option<String>,
    pub secondary_value: Option<String>,
    pub is_alternating: Option<bool>,
    pub color: Option<PaletteColor>,
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum UnitsError {
    #[error("expected {TOTAL_DISPLAYS} display units, got {0}")]
    WrongLength(usize),
    #[error("display id {0} is outside 1..={TOTAL_DISPLAYS}")]
    InvalidId(u16),
    #[error("display unit at position {position} has id {found}")]
    OutOfOrder { position: usize, found: u16 },
}

/// The 200 modules, always complete and ordered by id.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct UnitGrid {
    units: Vec<DisplayUnit>,
    dirty: bool,
}

impl UnitGrid {
    pub fn new() -> Self {
        UnitGrid {
            units: default_units(),
            dirty: false,
        }
    }

    /// Wraps a loaded collection without marking it dirty.
    pub fn from_units(units: Vec<DisplayUnit>) -> Result<Self, UnitsError> {
        validate(&units)?;
        Ok(UnitGrid { units, dirty: false })
    }

    pub fn units(&self) -> &[DisplayUnit] {
        &self.units
    }

    pub fn get(&self, id: UnitId) -> &DisplayUnit {
        &self.units[id.index()]
    }

    pub fn is_dirty(&self) -> bool {
        self.dirty
    }

    pub fn mark_clean(&mut self) {
        self.dirty = false;
    }

    pub fn lit_count(&self) -> usize {
        self.units.iter().filter(|u| u.is_on).count()
    }

    /// Flips power. Switching on adopts `selected`; switching off keeps the
    /// old color for the next activation.
    pub fn toggle(&mut self, id: UnitId, selected: PaletteColor) {
        let unit = &mut self.units[id.index()];
        if !unit.is_on {
            unit.color = selected;
        }
        unit.is_on = !unit.is_on;
        self.dirty = true;
    }

    pub fn update(&mut self, id: UnitId, patch: UnitPatch) {
        let unit = &mut self.units[id.index()];
        if let Some(value) = patch.value {
            unit.value = value;
        }
        if let Some(secondary) = patch.secondary_value {
            unit.secondary_value = secondary;
        }
        if let Some(alternating) = patch.is_alternating {
            unit.is_alternating = alternating;
        }
        if let Some(color) = patch.color {
            unit.color = color;
        }
        self.dirty = true;
    }

    pub fn replace_all(&mut self, units: Vec<DisplayUnit>) -> Result<(), UnitsError> {
        validate(&units)?;
        self.units = units;
        self.dirty = true;
        Ok(())
    }

    pub fn reset(&mut self) {
        self.units = default_units();
        self.dirty = true;
    }
}

impl Default for UnitGrid {
    fn default() -> Self {
        Self::new()
    }
}

pub fn default_units() -> Vec<DisplayUnit> {
    UnitId::all().map(DisplayUnit::new).collect()
}

fn validate(units: &[DisplayUnit]) -> Result<(), UnitsError> {
    if units.len() != TOTAL_DISPLAYS {
        return Err(UnitsError::WrongLength(units.len()));
    }
    for (position, unit) in units.iter().enumerate() {
        if unit.id.index() != position {
            return Err(UnitsError::OutOfOrder {
                position,
                found: unit.id.get(),
            });
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn id(n: u16) -> UnitId {
        UnitId::new(n).unwrap()
    }

    #[test]
    fn coordinates_follow_row_major_layout() {
        assert_eq!(id(1).to_string(), "A1");
        assert_eq!(id(20).to_string(), "A20");
        assert_eq!(id(21).to_string(), "B1");
        assert_eq!(id(200).to_string(), "J20");
        assert_eq!(UnitId::from_coord(9, 19), Some(id(200)));
        assert_eq!(UnitId::from_coord(1, 0), Some(id(21)));
        assert_eq!(UnitId::from_coord(10, 0), None);
        assert_eq!(UnitId::new(0), None);
        assert_eq!(UnitId::new(201), None);
    }

    #[test]
    fn coordinate_mapping_is_a_bijection() {
        for unit in UnitId::all() {
            assert_eq!(UnitId::from_coord(unit.row(), unit.col()), Some(unit));
        }
    }

    #[test]
    fn defaults_are_off_red_zero() {
        let grid = UnitGrid::new();
        assert_eq!(grid.units().len(), TOTAL_DISPLAYS);
        for (i, unit) in grid.units().iter().enumerate() {
            assert_eq!(unit.id.get() as usize, i + 1);
            assert!(!unit.is_on);
            assert!(!unit.is_alternating);
            assert_eq!(unit.value, "00");
            assert_eq!(unit.secondary_value, "00");
            assert_eq!(unit.color, PaletteColor::Red);
        }
        assert!(!grid.is_dirty());
    }

    #[test]
    fn toggle_twice_restores_power_and_leaves_others_alone() {
        for n in [1, 57, 200] {
            let mut grid = UnitGrid::new();
            let before = grid.clone();
            grid.toggle(id(n), PaletteColor::Red);
            assert!(grid.get(id(n)).is_on);
            for other in UnitId::all().filter(|o| o.get() != n) {
                assert_eq!(grid.get(other), before.get(other));
            }
            grid.toggle(id(n), PaletteColor::Red);
            assert_eq!(grid.units(), before.units());
        }
    }

    #[test]
    fn switching_on_adopts_selected_color_switching_off_keeps_it() {
        let mut grid = UnitGrid::new();
        grid.toggle(id(5), PaletteColor::Cyan);
        assert_eq!(grid.get(id(5)).color, PaletteColor::Cyan);

        grid.toggle(id(5), PaletteColor::Green);
        assert!(!grid.get(id(5)).is_on);
        assert_eq!(grid.get(id(5)).color, PaletteColor::Cyan);

        grid.toggle(id(5), PaletteColor::Green);
        assert_eq!(grid.get(id(5)).color, PaletteColor::Green);
    }

    #[test]
    fn update_touches_only_named_fields() {
        let mut grid = UnitGrid::new();
        grid.update(
            id(42),
            UnitPatch {
                value: Some("7F".to_string()),
                ..Default::default()
            },
        );
        let unit = grid.get(id(42));
        assert_eq!(unit.value, "7F");
        assert_eq!(unit.secondary_value, "00");
        assert!(!unit.is_alternating);
        assert_eq!(grid.units().len(), TOTAL_DISPLAYS);
        assert_eq!(grid.get(id(41)).value, "00");
        assert!(grid.is_dirty());
    }

    #[test]
    fn order_and_length_survive_mixed_edits() {
        let mut grid = UnitGrid::new();
        for n in (1..=200).step_by(7) {
            grid.toggle(id(n), PaletteColor::Blue);
            grid.update(
                id(n),
                UnitPatch {
                    is_alternating: Some(true),
                    secondary_value: Some("12".to_string()),
                    color: Some(PaletteColor::White),
                    ..Default::default()
                },
            );
        }
        assert_eq!(grid.units().len(), TOTAL_DISPLAYS);
        for (i, unit) in grid.units().iter().enumerate() {
            assert_eq!(unit.id.index(), i);
        }
    }

    #[test]
    fn replace_all_rejects_wrong_shapes() {
        let mut grid = UnitGrid::new();
        let mut short = default_units();
        short.pop();
        assert_eq!(grid.replace_all(short), Err(UnitsError::WrongLength(199)));

        let mut swapped = default_units();
        swapped.swap(0, 1);
        assert_eq!(
            grid.replace_all(swapped),
            Err(UnitsError::OutOfOrder { position: 0, found: 2 })
        );
        assert!(!grid.is_dirty());
    }

    #[test]
    fn reset_restores_defaults() {
        let mut grid = UnitGrid::new();
        grid.toggle(id(3), PaletteColor::Yellow);
        grid.mark_clean();
        grid.reset();
        assert_eq!(grid.units(), default_units().as_slice());
        assert!(grid.is_dirty());
    }

    #[test]
    fn shown_value_alternates_only_when_lit() {
        let mut unit = DisplayUnit::new(id(1));
        unit.value = "12".to_string();
        unit.secondary_value = "34".to_string();
        unit.is_alternating = true;
        assert_eq!(unit.shown_value(BlinkPhase::Secondary), "12");
        unit.is_on = true;
        assert_eq!(unit.shown_value(BlinkPhase::Primary), "12");
        assert_eq!(unit.shown_value(BlinkPhase::Secondary), "34");
    }

    #[test]
    fn display_text_pads_and_keeps_tail() {
        assert_eq!(display_text(""), "  ");
        assert_eq!(display_text("7"), " 7");
        assert_eq!(display_text("f"), " F");
        assert_eq!(display_text("123"), "23");
        assert_eq!(display_text("x?"), "X?");
    }

    #[test]
    fn input_is_upper_cased_and_capped() {
        assert_eq!(normalize_input("ff9"), "FF");
        assert_eq!(normalize_input(""), "");
    }

    #[test]
    fn palette_cycles() {
        assert_eq!(PaletteColor::White.next(), PaletteColor::Red);
        assert_eq!(PaletteColor::Red.prev(), PaletteColor::White);
        assert_eq!(PaletteColor::Blue.index(), 2);
    }
}
