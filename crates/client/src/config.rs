//! Skirmish configuration read from the process environment.
use std::env;
use std::path::PathBuf;

/// Everything the headless runner needs before it builds a runtime.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SkirmishConfig {
    pub seed: u64,
    /// Scheduler ticks before the run is cut off.
    pub max_steps: u32,
    /// TOML game config; defaults apply when unset.
    pub config_path: Option<PathBuf>,
    /// RON or bare-text arena; the built-in arena is used when unset.
    pub layout_path: Option<PathBuf>,
    /// Directory for a log file in addition to stderr.
    pub log_dir: Option<PathBuf>,
}

impl Default for SkirmishConfig {
    fn default() -> Self {
        Self {
            seed: 0,
            max_steps: 2_000,
            config_path: None,
            layout_path: None,
            log_dir: None,
        }
    }
}

impl SkirmishConfig {
    /// Construct configuration from process environment variables.
    ///
    /// Environment variables:
    /// - `SKIRMISH_SEED` - RNG seed for enemy decisions (default: 0)
    /// - `SKIRMISH_MAX_STEPS` - Tick limit (default: 2000)
    /// - `SKIRMISH_CONFIG` - Path to a TOML game config
    /// - `SKIRMISH_LAYOUT` - Path to an arena layout (`.ron` or `.txt`)
    /// - `SKIRMISH_LOG_DIR` - Also write `skirmish.log` into this directory
    pub fn from_env() -> Self {
        let mut config = Self::default();

        if let Some(seed) = read_env::<u64>("SKIRMISH_SEED") {
            config.seed = seed;
        }
        if let Some(steps) = read_env::<u32>("SKIRMISH_MAX_STEPS") {
            config.max_steps = steps.max(1);
        }

        config.config_path = env::var_os("SKIRMISH_CONFIG").map(PathBuf::from);
        config.layout_path = env::var_os("SKIRMISH_LAYOUT").map(PathBuf::from);
        config.log_dir = env::var_os("SKIRMISH_LOG_DIR").map(PathBuf::from);

        config
    }
}

fn read_env<T>(key: &str) -> Option<T>
where
    T: std::str::FromStr,
{
    env::var(key).ok()?.parse().ok()
}
