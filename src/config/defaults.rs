use super::Config;

pub const PALETTE_SIZE: usize = 5;
pub const LOG_LEVEL: &str = "info";
pub const DB_FILE: &str = "hues.sqlite3";
pub const LOG_FILE: &str = "hues.log";

/// Config written on first run.
pub fn defaults() -> Config {
    let mut cfg = Config::default();
    cfg.ui.last_screen = Some("generator".to_string());
    cfg
}
