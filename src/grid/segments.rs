//! Seven-segment glyph table used by the detail editor.
//!
//! Segment indices follow the usual a..g order:
//!
//! ```text
//!  -0-
//! 5   1
//!  -6-
//! 4   2
//!  -3-
//! ```

pub const SEGMENT_COUNT: usize = 7;

/// Active segment indices for a character. Anything outside the table lights
/// nothing; callers still print the raw character elsewhere.
pub fn active_segments(c: char) -> &'static [u8] {
    match c.to_ascii_uppercase() {
        '0' => &[0, 1, 2, 3, 4, 5],
        '1' => &[1, 2],
        '2' => &[0, 1, 6, 4, 3],
        '3' => &[0, 1, 6, 2, 3],
        '4' => &[5, 6, 1, 2],
        '5' => &[0, 5, 6, 2, 3],
        '6' => &[0, 5, 6, 4, 2, 3],
        '7' => &[0, 1, 2],
        '8' => &[0, 1, 2, 3, 4, 5, 6],
        '9' => &[0, 1, 2, 3, 5, 6],
        'F' => &[0, 5, 6, 4],
        _ => &[],
    }
}

/// Segment states indexed 0..7.
pub fn segment_mask(c: char) -> [bool; SEGMENT_COUNT] {
    let mut mask = [false; SEGMENT_COUNT];
    for &seg in active_segments(c) {
        mask[seg as usize] = true;
    }
    mask
}

/// Draws a glyph as five rows of four terminal cells.
pub fn glyph_rows(c: char) -> [String; 5] {
    let m = segment_mask(c);
    let h = |on: bool| if on { "━━" } else { "  " };
    let v = |on: bool| if on { '┃' } else { ' ' };
    [
        format!(" {} ", h(m[0])),
        format!("{}  {}", v(m[5]), v(m[1])),
        format!(" {} ", h(m[6])),
        format!("{}  {}", v(m[4]), v(m[2])),
        format!(" {} ", h(m[3])),
    ]
}
