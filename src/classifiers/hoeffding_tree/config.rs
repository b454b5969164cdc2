use crate::classifiers::hoeffding_tree::error::ConfigError;
use crate::classifiers::hoeffding_tree::split_criteria::SplitCriterionKind;
use crate::utils::memory::MemorySized;
use schemars::JsonSchema;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use std::path::Path;

pub const BYTES_PER_MEGABYTE: f64 = (1u64 << 20) as f64;

fn default_max_size() -> f64 {
    100.0
}

fn default_memory_estimate_period() -> u64 {
    1_000_000
}

fn default_true() -> bool {
    true
}

fn default_grace_period() -> u64 {
    200
}

fn default_split_confidence() -> f64 {
    1e-7
}

fn default_tie_threshold() -> f64 {
    0.05
}

/// Growth and memory policy shared by every tree variant.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct TreeConfig {
    #[serde(default)]
    #[schemars(
        title = "Max Depth",
        description = "Maximum depth a leaf may be split or reactivated at (empty = unbounded)"
    )]
    pub max_depth: Option<usize>,

    #[serde(default)]
    #[schemars(title = "Binary Split", description = "Only allow binary splits")]
    pub binary_split: bool,

    #[serde(default = "default_max_size")]
    #[schemars(
        title = "Max Size",
        description = "Memory ceiling of the tree, in megabytes",
        range(min = 0.0),
        default = "default_max_size"
    )]
    pub max_size: f64,

    #[serde(default = "default_memory_estimate_period")]
    #[schemars(
        title = "Memory Estimate Period",
        description = "Instances absorbed between two memory checks",
        range(min = 1),
        default = "default_memory_estimate_period"
    )]
    pub memory_estimate_period: u64,

    #[serde(default)]
    #[schemars(
        title = "Stop Memory Management",
        description = "Stop growing as soon as the memory ceiling is hit"
    )]
    pub stop_mem_management: bool,

    #[serde(default)]
    #[schemars(
        title = "Remove Poor Attributes",
        description = "Stop collecting statistics for attributes with clearly inferior merit"
    )]
    pub remove_poor_atts: bool,

    #[serde(default = "default_true")]
    #[schemars(
        title = "Merit Pre-prune",
        description = "Consider not splitting as a candidate when searching for splits",
        default = "default_true"
    )]
    pub merit_preprune: bool,
}

impl Default for TreeConfig {
    fn default() -> Self {
        Self {
            max_depth: None,
            binary_split: false,
            max_size: default_max_size(),
            memory_estimate_period: default_memory_estimate_period(),
            stop_mem_management: false,
            remove_poor_atts: false,
            merit_preprune: true,
        }
    }
}

impl TreeConfig {
    pub fn max_byte_size(&self) -> f64 {
        self.max_size * BYTES_PER_MEGABYTE
    }

    /// Whether a leaf at `depth` may still split or be reactivated.
    pub fn depth_allows(&self, depth: usize) -> bool {
        self.max_depth.is_none_or(|max| depth < max)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if !(self.max_size.is_finite() && self.max_size > 0.0) {
            return Err(ConfigError::invalid(
                "max_size",
                format!("must be a positive number of megabytes, got {}", self.max_size),
            ));
        }
        if self.memory_estimate_period == 0 {
            return Err(ConfigError::invalid(
                "memory_estimate_period",
                "must be at least 1",
            ));
        }
        Ok(())
    }

    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let config: Self = load_json(path.as_ref())?;
        config.validate()?;
        Ok(config)
    }
}

impl MemorySized for TreeConfig {}

/// Settings of the classification tree: the shared growth policy plus the
/// split decision parameters.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct ClassifierConfig {
    #[serde(flatten)]
    pub tree: TreeConfig,

    #[serde(default = "default_grace_period")]
    #[schemars(
        title = "Grace Period",
        description = "Weight a leaf must observe between split attempts",
        range(min = 1),
        default = "default_grace_period"
    )]
    pub grace_period: u64,

    #[serde(default)]
    #[schemars(title = "Split Criterion", description = "Merit used to rank candidate splits")]
    pub split_criterion: SplitCriterionKind,

    #[serde(default = "default_split_confidence")]
    #[schemars(
        title = "Split Confidence",
        description = "Allowed error in split decisions (0-1, exclusive)",
        default = "default_split_confidence"
    )]
    pub split_confidence: f64,

    #[serde(default = "default_tie_threshold")]
    #[schemars(
        title = "Tie Threshold",
        description = "Bound below which a split is forced to break ties",
        range(min = 0.0),
        default = "default_tie_threshold"
    )]
    pub tie_threshold: f64,
}

impl Default for ClassifierConfig {
    fn default() -> Self {
        Self {
            tree: TreeConfig::default(),
            grace_period: default_grace_period(),
            split_criterion: SplitCriterionKind::default(),
            split_confidence: default_split_confidence(),
            tie_threshold: default_tie_threshold(),
        }
    }
}

impl ClassifierConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.tree.validate()?;
        if self.grace_period == 0 {
            return Err(ConfigError::invalid("grace_period", "must be at least 1"));
        }
        if !(self.split_confidence > 0.0 && self.split_confidence < 1.0) {
            return Err(ConfigError::invalid(
                "split_confidence",
                format!("must lie strictly between 0 and 1, got {}", self.split_confidence),
            ));
        }
        if !(self.tie_threshold.is_finite() && self.tie_threshold >= 0.0) {
            return Err(ConfigError::invalid(
                "tie_threshold",
                format!("must be non-negative, got {}", self.tie_threshold),
            ));
        }
        Ok(())
    }

    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let config: Self = load_json(path.as_ref())?;
        config.validate()?;
        Ok(config)
    }
}

fn load_json<T: DeserializeOwned>(path: &Path) -> Result<T, ConfigError> {
    let raw = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    Ok(serde_json::from_str(&raw)?)
}
