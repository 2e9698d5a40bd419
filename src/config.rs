use std::path::PathBuf;

/// Runtime settings for one session.
#[derive(Debug, Clone, PartialEq)]
pub struct GameConfig {
    /// Simulation steps per second
    pub tick_rate: u32,
    /// Directory holding the sound files
    pub resources: PathBuf,
    pub muted: bool,
    pub debug: bool,
    pub log_file: PathBuf,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            tick_rate: 10,
            resources: PathBuf::from("resources"),
            muted: false,
            debug: false,
            log_file: PathBuf::from("/tmp/snake.log"),
        }
    }
}
