use std::path::PathBuf;
use std::time::Duration;

use clap::Parser;

use crate::snapshot::Snapshot;
use crate::units::TOTAL_DISPLAYS;

pub const DEFAULT_IP: &str = "192.168.4.1";
const LOG_FILE_NAME: &str = "matrix_radar.log";

/// Control panel for a 10x20 matrix of dual-digit display modules.
#[derive(Debug, Parser)]
#[command(name = "matrix-radar", version, about)]
pub struct Args {
    /// Where the grid snapshot lives
    #[arg(long)]
    pub state_file: Option<PathBuf>,

    /// Log file (the terminal is owned by the UI)
    #[arg(long)]
    pub log_file: Option<PathBuf>,

    /// Address of the ESP32 controller
    #[arg(long, default_value = DEFAULT_IP)]
    pub ip: String,

    /// API key for the pattern generation service
    #[arg(long, env = "GEMINI_API_KEY", hide_env_values = true)]
    pub api_key: Option<String>,

    /// Model used for pattern generation
    #[arg(long, default_value = "gemini-3-flash-preview")]
    pub model: String,

    /// Base URL of the pattern generation service
    #[arg(long, default_value = "https://generativelanguage.googleapis.com")]
    pub api_base: String,

    /// Period of the alternating-value blink, in milliseconds
    #[arg(long, default_value_t = 1200, value_parser = clap::value_parser!(u64).range(200..=5000))]
    pub blink_ms: u64,

    /// UI tick period, in milliseconds
    #[arg(long, default_value_t = 50, value_parser = clap::value_parser!(u64).range(10..=1000))]
    pub tick_ms: u64,
}

impl Args {
    pub fn state_path(&self) -> PathBuf {
        self.state_file.clone().unwrap_or_else(Snapshot::default_path)
    }

    pub fn log_path(&self) -> PathBuf {
        self.log_file.clone().unwrap_or_else(|| {
            self.state_path()
                .parent()
                .map(|dir| dir.join(LOG_FILE_NAME))
                .unwrap_or_else(|| PathBuf::from(LOG_FILE_NAME))
        })
    }

    pub fn blink_interval(&self) -> Duration {
        Duration::from_millis(self.blink_ms)
    }

    pub fn hardware(&self) -> HardwareConfig {
        HardwareConfig {
            ip_address: self.ip.clone(),
            ..HardwareConfig::default()
        }
    }
}

/// Bit position of each of the seven segments, per digit.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PinMapping {
    pub digit1: [u8; 7],
    pub digit2: [u8; 7],
}

impl Default for PinMapping {
    fn default() -> Self {
        Self {
            digit1: [0, 1, 2, 3, 4, 5, 6],
            digit2: [7, 8, 9, 10, 11, 12, 13],
        }
    }
}

impl PinMapping {
    pub fn leds_per_module(&self) -> usize {
        self.digit1.len() + self.digit2.len()
    }
}

/// Session-scoped hardware settings. The address is free text.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct HardwareConfig {
    pub ip_address: String,
    pub total_displays: usize,
    pub pin_mapping: PinMapping,
}

impl Default for HardwareConfig {
    fn default() -> Self {
        Self {
            ip_address: DEFAULT_IP.to_string(),
            total_displays: TOTAL_DISPLAYS,
            pin_mapping: PinMapping::default(),
        }
    }
}
