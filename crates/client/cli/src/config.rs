//! Simulator configuration loaded from the environment.
use std::env;
use std::path::PathBuf;

/// Settings for one headless skirmish run.
#[derive(Clone, Debug)]
pub struct SimConfig {
    pub data_dir: PathBuf,
    pub config_path: Option<PathBuf>,
    pub skills_path: Option<PathBuf>,
    pub roster_path: Option<PathBuf>,
    pub frames: u64,
    pub seed: Option<u64>,
    pub save_dir: Option<PathBuf>,
    pub log_dir: Option<PathBuf>,
}

impl SimConfig {
    pub const DEFAULT_FRAMES: u64 = 600;

    /// Construct configuration from process environment variables.
    ///
    /// Environment variables:
    /// - `JABS_DATA` - Content directory (default: `data` next to the crate)
    /// - `JABS_CONFIG` - Combat tuning TOML (default: `<data>/config.toml`)
    /// - `JABS_SKILLS` - Skill catalog RON (default: `<data>/skills.ron`)
    /// - `JABS_ROSTER` - Battler roster RON (default: `<data>/roster.ron`)
    /// - `JABS_FRAMES` - Frames to simulate (default: 600)
    /// - `JABS_SEED` - RNG seed (default: random)
    /// - `JABS_SAVE_DIR` - Where ally loadouts are restored from and saved to
    /// - `JABS_LOG_DIR` - Also write logs to `<dir>/jabs-sim.log`
    pub fn from_env() -> Self {
        let mut config = Self::default();

        if let Ok(dir) = env::var("JABS_DATA") {
            config.data_dir = PathBuf::from(dir);
        }
        config.config_path = env::var("JABS_CONFIG").ok().map(PathBuf::from);
        config.skills_path = env::var("JABS_SKILLS").ok().map(PathBuf::from);
        config.roster_path = env::var("JABS_ROSTER").ok().map(PathBuf::from);

        if let Some(frames) = read_env::<u64>("JABS_FRAMES") {
            config.frames = frames.max(1);
        }
        config.seed = read_env::<u64>("JABS_SEED");

        config.save_dir = env::var("JABS_SAVE_DIR").ok().map(PathBuf::from);
        config.log_dir = env::var("JABS_LOG_DIR").ok().map(PathBuf::from);

        config
    }
}

impl Default for SimConfig {
    fn default() -> Self {
        Self {
            data_dir: PathBuf::from(concat!(env!("CARGO_MANIFEST_DIR"), "/data")),
            config_path: None,
            skills_path: None,
            roster_path: None,
            frames: Self::DEFAULT_FRAMES,
            seed: None,
            save_dir: None,
            log_dir: None,
        }
    }
}

fn read_env<T: std::str::FromStr>(key: &str) -> Option<T> {
    env::var(key).ok().and_then(|value| value.parse().ok())
}
