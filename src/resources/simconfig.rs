//! Simulation configuration.
//!
//! Manages the settings of the demo scenario loaded from an INI file.
//! Provides defaults for a safe start and methods to load/save the file.
//!
//! # Configuration File Format
//!
//! ```ini
//! [world]
//! dt = 0.016666668
//! steps = 600
//! time_scale = 1.0
//! allow_sleep = true
//!
//! [sleep]
//! speed_limit = 0.1
//! time_limit = 1.0
//!
//! [scenario]
//! bodies = 8
//! seed = 42
//! contact_chance = 0.05
//! damping = 0.5
//! ```

use configparser::ini::Ini;
use log::{info, warn};
use std::path::PathBuf;

/// Default safe values for startup
const DEFAULT_DT: f32 = 1.0 / 60.0;
const DEFAULT_STEPS: u32 = 600;
const DEFAULT_TIME_SCALE: f32 = 1.0;
const DEFAULT_ALLOW_SLEEP: bool = true;
const DEFAULT_SLEEP_SPEED_LIMIT: f32 = 0.1;
const DEFAULT_SLEEP_TIME_LIMIT: f32 = 1.0;
const DEFAULT_BODIES: u32 = 8;
const DEFAULT_SEED: u64 = 42;
const DEFAULT_CONTACT_CHANCE: f32 = 0.05;
const DEFAULT_DAMPING: f32 = 0.5;
const DEFAULT_CONFIG_PATH: &str = "./simevents.ini";

/// Simulation configuration.
///
/// Values missing from the file keep their defaults.
#[derive(Debug, Clone, PartialEq)]
pub struct SimConfig {
    /// Fixed step length in seconds.
    pub dt: f32,
    /// Number of steps to run.
    pub steps: u32,
    /// Multiplier applied to every step.
    pub time_scale: f32,
    /// Let bodies fall asleep.
    pub allow_sleep: bool,
    /// Speed under which a body counts as resting.
    pub sleep_speed_limit: f32,
    /// Seconds a body must rest before it sleeps.
    pub sleep_time_limit: f32,
    /// Number of bodies in the scenario.
    pub bodies: u32,
    /// Seed for the scenario's random numbers.
    pub seed: u64,
    /// Probability per pair and step of reporting a contact.
    pub contact_chance: f32,
    /// Linear damping applied to every body each step.
    pub damping: f32,
    /// Path to the configuration file.
    pub config_path: PathBuf,
}

impl Default for SimConfig {
    fn default() -> Self {
        Self::new()
    }
}

impl SimConfig {
    /// Create a new configuration with safe default values.
    pub fn new() -> Self {
        Self {
            dt: DEFAULT_DT,
            steps: DEFAULT_STEPS,
            time_scale: DEFAULT_TIME_SCALE,
            allow_sleep: DEFAULT_ALLOW_SLEEP,
            sleep_speed_limit: DEFAULT_SLEEP_SPEED_LIMIT,
            sleep_time_limit: DEFAULT_SLEEP_TIME_LIMIT,
            bodies: DEFAULT_BODIES,
            seed: DEFAULT_SEED,
            contact_chance: DEFAULT_CONTACT_CHANCE,
            damping: DEFAULT_DAMPING,
            config_path: PathBuf::from(DEFAULT_CONFIG_PATH),
        }
    }

    /// Create a new configuration with a custom config file path.
    pub fn with_path(path: impl Into<PathBuf>) -> Self {
        Self {
            config_path: path.into(),
            ..Self::new()
        }
    }

    /// Load configuration from the INI file.
    ///
    /// Missing values retain their current (default) values.
    /// Returns an error if the file cannot be read or parsed.
    pub fn load_from_file(&mut self) -> Result<(), String> {
        let mut config = Ini::new();
        config
            .load(&self.config_path)
            .map_err(|e| format!("Failed to load config file: {}", e))?;

        // [world] section
        if let Some(dt) = config.getfloat("world", "dt").ok().flatten() {
            self.dt = dt as f32;
        }
        if let Some(steps) = config.getuint("world", "steps").ok().flatten() {
            match u32::try_from(steps) {
                Ok(steps) => self.steps = steps,
                Err(_) => warn!("Ignoring out-of-range [world] steps = {}", steps),
            }
        }
        if let Some(scale) = config.getfloat("world", "time_scale").ok().flatten() {
            self.time_scale = scale as f32;
        }
        if let Some(allow) = config.getbool("world", "allow_sleep").ok().flatten() {
            self.allow_sleep = allow;
        }

        // [sleep] section
        if let Some(limit) = config.getfloat("sleep", "speed_limit").ok().flatten() {
            self.sleep_speed_limit = limit as f32;
        }
        if let Some(limit) = config.getfloat("sleep", "time_limit").ok().flatten() {
            self.sleep_time_limit = limit as f32;
        }

        // [scenario] section
        if let Some(bodies) = config.getuint("scenario", "bodies").ok().flatten() {
            match u32::try_from(bodies) {
                Ok(bodies) => self.bodies = bodies,
                Err(_) => warn!("Ignoring out-of-range [scenario] bodies = {}", bodies),
            }
        }
        if let Some(seed) = config.getuint("scenario", "seed").ok().flatten() {
            self.seed = seed;
        }
        if let Some(chance) = config.getfloat("scenario", "contact_chance").ok().flatten() {
            self.contact_chance = chance as f32;
        }
        if let Some(damping) = config.getfloat("scenario", "damping").ok().flatten() {
            self.damping = damping as f32;
        }

        info!(
            "Loaded config: dt={}, steps={}, time_scale={}, allow_sleep={}, bodies={}, seed={}",
            self.dt, self.steps, self.time_scale, self.allow_sleep, self.bodies, self.seed
        );

        Ok(())
    }

    /// Save configuration to the INI file.
    ///
    /// Creates the file if it doesn't exist.
    pub fn save_to_file(&self) -> Result<(), String> {
        let mut config = Ini::new();

        // [world] section
        config.set("world", "dt", Some(self.dt.to_string()));
        config.set("world", "steps", Some(self.steps.to_string()));
        config.set("world", "time_scale", Some(self.time_scale.to_string()));
        config.set("world", "allow_sleep", Some(self.allow_sleep.to_string()));

        // [sleep] section
        config.set("sleep", "speed_limit", Some(self.sleep_speed_limit.to_string()));
        config.set("sleep", "time_limit", Some(self.sleep_time_limit.to_string()));

        // [scenario] section
        config.set("scenario", "bodies", Some(self.bodies.to_string()));
        config.set("scenario", "seed", Some(self.seed.to_string()));
        config.set("scenario", "contact_chance", Some(self.contact_chance.to_string()));
        config.set("scenario", "damping", Some(self.damping.to_string()));

        config
            .write(&self.config_path)
            .map_err(|e| format!("Failed to save config file: {}", e))?;

        info!("Saved config to {:?}", self.config_path);

        Ok(())
    }
}
