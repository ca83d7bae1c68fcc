//! Arduino sketch generated from the current pin mapping.

use std::fmt::Write as _;
use std::fs;
use std::path::{Path, PathBuf};

use crate::config::HardwareConfig;
use crate::grid::segments::active_segments;

pub const SKETCH_FILE_NAME: &str = "matrix_radar.ino";
pub const DATA_PIN: u8 = 13;

/// Renders a NeoPixel sketch that lights a module's segments through the
/// configured bit positions.
pub fn render_sketch(config: &HardwareConfig) -> String {
    let map = &config.pin_mapping;
    let mut out = String::new();
    let _ = writeln!(out, "// MatrixRadar firmware for {} SK6805 dual-digit modules", config.total_displays);
    let _ = writeln!(out, "// Controller address: {}", config.ip_address);
    out.push_str("#include <Adafruit_NeoPixel.h>\n\n");
    let _ = writeln!(out, "#define PIN        {DATA_PIN}");
    let _ = writeln!(out, "#define NUM_MODS   {}", config.total_displays);
    let _ = writeln!(out, "#define LEDS_PER   {}", map.leds_per_module());
    out.push_str("#define TOTAL_LEDS (NUM_MODS * LEDS_PER)\n\n");
    out.push_str("Adafruit_NeoPixel pixels(TOTAL_LEDS, PIN, NEO_GRB + NEO_KHZ800);\n\n");
    let _ = writeln!(out, "const uint8_t DIGIT1_MAP[7] = {{{}}};", join(&map.digit1));
    let _ = writeln!(out, "const uint8_t DIGIT2_MAP[7] = {{{}}};", join(&map.digit2));
    out.push('\n');

    out.push_str("// Segment masks, bit n = segment n (a..g)\n");
    out.push_str("uint8_t glyphMask(char c) {\n  switch (c) {\n");
    for c in ['0', '1', '2', '3', '4', '5', '6', '7', '8', '9', 'F'] {
        let mask = active_segments(c).iter().fold(0u8, |m, &s| m | (1 << s));
        let _ = writeln!(out, "    case '{c}': return 0x{mask:02X};");
    }
    out.push_str("    default: return 0x00;\n  }\n}\n\n");

    out.push_str(
        "void setup() {\n  pixels.begin();\n  pixels.setBrightness(50);\n}\n\n\
         void showModule(int modIdx, const char *val, uint32_t color, bool on) {\n  \
         int start = modIdx * LEDS_PER;\n  \
         uint8_t m1 = on ? glyphMask(val[0]) : 0;\n  \
         uint8_t m2 = on ? glyphMask(val[1]) : 0;\n  \
         for (int s = 0; s < 7; s++) {\n    \
         pixels.setPixelColor(start + DIGIT1_MAP[s], (m1 >> s) & 1 ? color : 0);\n    \
         pixels.setPixelColor(start + DIGIT2_MAP[s], (m2 >> s) & 1 ? color : 0);\n  \
         }\n}\n\n\
         void loop() {\n  // Frames arrive over WiFi; call showModule() per module, then:\n  \
         pixels.show();\n}\n",
    );
    out
}

/// Writes the sketch into `dir` and returns the file path.
pub fn export_sketch(config: &HardwareConfig, dir: &Path) -> std::io::Result<PathBuf> {
    let path = dir.join(SKETCH_FILE_NAME);
    fs::write(&path, render_sketch(config))?;
    Ok(path)
}

fn join(bits: &[u8]) -> String {
    bits.iter().map(|b| b.to_string()).collect::<Vec<_>>().join(", ")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::PinMapping;

    #[test]
    fn sketch_embeds_the_pin_mapping() {
        let config = HardwareConfig {
            ip_address: "10.1.2.3".to_string(),
            pin_mapping: PinMapping {
                digit1: [6, 5, 4, 3, 2, 1, 0],
                digit2: [13, 12, 11, 10, 9, 8, 7],
            },
            ..HardwareConfig::default()
        };
        let sketch = render_sketch(&config);
        assert!(sketch.contains("DIGIT1_MAP[7] = {6, 5, 4, 3, 2, 1, 0};"));
        assert!(sketch.contains("DIGIT2_MAP[7] = {13, 12, 11, 10, 9, 8, 7};"));
        assert!(sketch.contains("#define NUM_MODS   200"));
        assert!(sketch.contains("#define LEDS_PER   14"));
        assert!(sketch.contains("10.1.2.3"));
    }

    #[test]
    fn glyph_masks_follow_the_segment_table() {
        let sketch = render_sketch(&HardwareConfig::default());
        assert!(sketch.contains("case '8': return 0x7F;"));
        assert!(sketch.contains("case '1': return 0x06;"));
        assert!(sketch.contains("case 'F': return 0x71;"));
    }

    #[test]
    fn export_writes_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = export_sketch(&HardwareConfig::default(), dir.path()).unwrap();
        assert_eq!(path.file_name().unwrap(), SKETCH_FILE_NAME);
        assert!(fs::read_to_string(path).unwrap().contains("pixels.show();"));
    }
}
