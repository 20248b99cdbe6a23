//! Configuration system for allocforge.
//!
//! Load solver configuration from TOML or YAML files to control component
//! weights, construction, local search and restarts without code changes.
//!
//! # Examples
//!
//! Load configuration from TOML string:
//!
//! ```
//! use allocforge_config::{LocalSearchType, SolverConfig};
//!
//! let config = SolverConfig::from_toml_str(r#"
//!     random_seed = 7
//!     restart_count = 4
//!
//!     [components.capacity]
//!     weight = 10
//!     hard = true
//!
//!     [local_search]
//!     local_search_type = "simulated_annealing"
//!
//!     [local_search.termination]
//!     step_count_limit = 50000
//! "#).unwrap();
//!
//! assert_eq!(config.random_seed, Some(7));
//! assert_eq!(config.components.capacity.weight, 10);
//! assert_eq!(config.local_search_type(), Some(LocalSearchType::SimulatedAnnealing));
//! ```
//!
//! Use default config when file is missing:
//!
//! ```
//! use allocforge_config::SolverConfig;
//!
//! let config = SolverConfig::load("solver.toml").unwrap_or_default();
//! ```

use std::path::Path;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Configuration error
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("TOML parse error: {0}")]
    Toml(#[from] toml::de::Error),

    #[error("YAML parse error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("Invalid configuration: {0}")]
    Invalid(String),
}

/// Main solver configuration.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(default, rename_all = "snake_case")]
pub struct SolverConfig {
    /// Environment mode affecting reproducibility and assertions.
    pub environment_mode: EnvironmentMode,

    /// Random seed for reproducible results.
    pub random_seed: Option<u64>,

    /// Number of independent runs; the best result wins.
    pub restart_count: usize,

    /// Weight and level of each cost component.
    pub components: ComponentsConfig,

    /// How the initial assignment is built.
    pub construction: ConstructionConfig,

    /// Improvement phase; none means construction only.
    pub local_search: Option<LocalSearchConfig>,

    /// Steps between two load consistency checks in full assert mode.
    pub consistency_check_interval: u64,
}

impl Default for SolverConfig {
    fn default() -> Self {
        Self {
            environment_mode: EnvironmentMode::default(),
            random_seed: None,
            restart_count: 1,
            components: ComponentsConfig::default(),
            construction: ConstructionConfig::default(),
            local_search: None,
            consistency_check_interval: 1000,
        }
    }
}

impl SolverConfig {
    /// Creates a new default configuration.
    pub fn new() -> Self {
        Self::default()
    }

    /// Loads configuration from a file; `.yaml`/`.yml` files are read as
    /// YAML, anything else as TOML.
    ///
    /// # Errors
    ///
    /// Returns error if the file doesn't exist, doesn't parse, or holds
    /// invalid values.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        match path.extension().and_then(|e| e.to_str()) {
            Some("yaml") | Some("yml") => Self::from_yaml_file(path),
            _ => Self::from_toml_file(path),
        }
    }

    /// Loads configuration from a TOML file.
    pub fn from_toml_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path)?;
        Self::from_toml_str(&contents)
    }

    /// Parses configuration from a TOML string.
    pub fn from_toml_str(s: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(s)?;
        config.validate()?;
        Ok(config)
    }

    /// Loads configuration from a YAML file.
    pub fn from_yaml_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path)?;
        Self::from_yaml_str(&contents)
    }

    /// Parses configuration from a YAML string.
    pub fn from_yaml_str(s: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_yaml::from_str(s)?;
        config.validate()?;
        Ok(config)
    }

    /// Checks value ranges that serde cannot express.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.restart_count == 0 {
            return Err(invalid("restart_count must be at least 1"));
        }
        for (name, component) in self.components.iter() {
            if component.weight < 0 {
                return Err(invalid(format!(
                    "component {} has negative weight {}",
                    name, component.weight
                )));
            }
        }
        if let Some(ls) = &self.local_search {
            let sa = &ls.simulated_annealing;
            if !(sa.starting_temperature > 0.0) {
                return Err(invalid("starting_temperature must be positive"));
            }
            if !(sa.cooling_rate > 0.0 && sa.cooling_rate < 1.0) {
                return Err(invalid("cooling_rate must be in (0, 1)"));
            }
            if sa.steps_per_temperature == 0 {
                return Err(invalid("steps_per_temperature must be at least 1"));
            }
        }
        Ok(())
    }

    /// Sets the random seed.
    pub fn with_random_seed(mut self, seed: u64) -> Self {
        self.random_seed = Some(seed);
        self
    }

    /// Sets the environment mode.
    pub fn with_environment_mode(mut self, mode: EnvironmentMode) -> Self {
        self.environment_mode = mode;
        self
    }

    /// Sets the number of restarts.
    pub fn with_restart_count(mut self, restarts: usize) -> Self {
        self.restart_count = restarts;
        self
    }

    /// Sets the construction type.
    pub fn with_construction_type(mut self, construction_type: ConstructionType) -> Self {
        self.construction.construction_type = construction_type;
        self
    }

    /// Enables local search of the given type, keeping other settings.
    pub fn with_local_search_type(mut self, local_search_type: LocalSearchType) -> Self {
        let mut ls = self.local_search.take().unwrap_or_default();
        ls.local_search_type = local_search_type;
        self.local_search = Some(ls);
        self
    }

    /// Sets the local search step limit, enabling hill climbing if no local
    /// search was configured.
    pub fn with_step_count_limit(mut self, steps: u64) -> Self {
        let mut ls = self.local_search.take().unwrap_or_default();
        ls.termination.step_count_limit = Some(steps);
        self.local_search = Some(ls);
        self
    }

    /// Returns the configured local search type, if any.
    pub fn local_search_type(&self) -> Option<LocalSearchType> {
        self.local_search.as_ref().map(|ls| ls.local_search_type)
    }

    /// True when periodic consistency checks are requested.
    pub fn is_asserting(&self) -> bool {
        self.environment_mode == EnvironmentMode::FullAssert
    }
}

/// Environment mode affecting solver behavior.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum EnvironmentMode {
    /// Non-reproducible mode: the seed is drawn from the OS when not given.
    #[default]
    NonReproducible,

    /// Reproducible mode: a missing seed defaults to 0.
    Reproducible,

    /// Reproducible, plus periodic load consistency checks.
    FullAssert,
}

/// Weight and level of one cost component.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "snake_case")]
pub struct ComponentConfig {
    #[serde(default = "default_weight")]
    pub weight: i64,

    #[serde(default)]
    pub hard: bool,
}

impl ComponentConfig {
    pub const fn soft(weight: i64) -> Self {
        Self {
            weight,
            hard: false,
        }
    }

    pub const fn hard(weight: i64) -> Self {
        Self { weight, hard: true }
    }
}

fn default_weight() -> i64 {
    1
}

/// Configuration of the Supply, Opening and Capacity components.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize)]
#[serde(default, rename_all = "snake_case")]
pub struct ComponentsConfig {
    pub supply: ComponentConfig,
    pub opening: ComponentConfig,
    pub capacity: ComponentConfig,
}

impl Default for ComponentsConfig {
    fn default() -> Self {
        Self {
            supply: ComponentConfig::soft(1),
            opening: ComponentConfig::soft(1),
            capacity: ComponentConfig::hard(1),
        }
    }
}

impl ComponentsConfig {
    /// Named entries, in component order.
    pub fn iter(&self) -> impl Iterator<Item = (&'static str, &ComponentConfig)> {
        [
            ("supply", &self.supply),
            ("opening", &self.opening),
            ("capacity", &self.capacity),
        ]
        .into_iter()
    }
}

/// Construction configuration.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(default, rename_all = "snake_case")]
pub struct ConstructionConfig {
    pub construction_type: ConstructionType,

    /// Resource receiving the clients greedy construction cannot place.
    pub fallback_resource: usize,
}

/// Construction types.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ConstructionType {
    /// Least marginal cost first.
    #[default]
    Greedy,

    /// Uniformly random resource per client.
    Random,
}

/// Local search configuration.
#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
#[serde(default, rename_all = "snake_case")]
pub struct LocalSearchConfig {
    pub local_search_type: LocalSearchType,

    pub termination: TerminationConfig,

    /// Annealing schedule; only read by simulated annealing.
    pub simulated_annealing: SimulatedAnnealingConfig,
}

/// Local search types.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum LocalSearchType {
    /// Random moves, accept when not worsening.
    #[default]
    HillClimbing,

    /// Best move of the full neighborhood, stop at a local optimum.
    SteepestDescent,

    /// Random moves, accept worsening ones with a cooling probability.
    SimulatedAnnealing,
}

/// Termination configuration.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(default, rename_all = "snake_case")]
pub struct TerminationConfig {
    /// Maximum number of steps.
    pub step_count_limit: Option<u64>,

    /// Maximum steps without improving the best cost.
    pub unimproved_step_count_limit: Option<u64>,

    /// Maximum seconds to spend.
    pub seconds_spent_limit: Option<u64>,
}

/// Simulated annealing configuration.
#[derive(Debug, Clone, Copy, PartialEq, Deserialize, Serialize)]
#[serde(default, rename_all = "snake_case")]
pub struct SimulatedAnnealingConfig {
    pub starting_temperature: f64,

    /// Multiplicative decay applied every `steps_per_temperature` steps.
    pub cooling_rate: f64,

    pub steps_per_temperature: u64,

    /// The phase stops once the temperature falls below this value.
    pub min_temperature: f64,
}

impl Default for SimulatedAnnealingConfig {
    fn default() -> Self {
        Self {
            starting_temperature: 100.0,
            cooling_rate: 0.99,
            steps_per_temperature: 100,
            min_temperature: 0.01,
        }
    }
}

fn invalid(message: impl Into<String>) -> ConfigError {
    ConfigError::Invalid(message.into())
}
