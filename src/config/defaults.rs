/// Default base configuration file embedded in the binary
pub const DEFAULT_CONFIG: &str = include_str!("../../config.default.toml");

pub fn default_current_theme() -> String {
    "one_dark_pro".to_string()
}

pub fn default_true() -> bool {
    true
}

pub fn default_scan_interval_secs() -> u64 {
    30
}
