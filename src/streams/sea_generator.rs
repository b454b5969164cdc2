use crate::classifiers::hoeffding_tree::error::ConfigError;
use crate::core::attributes::{AttributeRef, NominalAttribute, NumericAttribute};
use crate::core::instance_header::InstanceHeader;
use crate::core::instances::{DenseInstance, Instance};
use crate::streams::stream::Stream;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::sync::Arc;

const THRESHOLDS: [f64; 4] = [8.0, 9.0, 7.0, 9.5];
const DEFAULT_SEED: u64 = 42;

fn default_seed() -> u64 {
    DEFAULT_SEED
}

fn default_sea_function() -> u8 {
    2
}

#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq)]
pub struct SeaParameters {
    #[serde(default = "default_sea_function")]
    #[schemars(
        title = "Function",
        description = "SEA concept function (1-4)",
        range(min = 1, max = 4),
        default = "default_sea_function"
    )]
    pub function_id: u8,

    #[serde(default)]
    #[schemars(title = "Balance", description = "Alternate classes during generation")]
    pub balance: bool,

    #[serde(default)]
    #[schemars(
        title = "Noise",
        description = "Fraction of labels flipped (0.0-1.0)",
        range(min = 0.0, max = 1.0)
    )]
    pub noise_pct: f64,

    #[serde(default)]
    #[schemars(
        title = "Instances",
        description = "Number of instances to generate (empty = unbounded)"
    )]
    pub max_instances: Option<u64>,

    #[serde(default = "default_seed")]
    #[schemars(title = "Seed", description = "PRNG seed", default = "default_seed")]
    pub seed: u64,
}

impl Default for SeaParameters {
    fn default() -> Self {
        Self {
            function_id: default_sea_function(),
            balance: false,
            noise_pct: 0.0,
            max_instances: None,
            seed: DEFAULT_SEED,
        }
    }
}

/// SEA concepts: three numeric attributes in `[0, 10)`, class is whether
/// the first two sum to at most the function's threshold. The third
/// attribute is irrelevant.
pub struct SeaGenerator {
    params: SeaParameters,
    threshold: f64,
    header: Arc<InstanceHeader>,
    rng: StdRng,
    produced: u64,
    next_class_should_be_zero: bool,
}

impl SeaGenerator {
    pub fn new(params: SeaParameters) -> Result<Self, ConfigError> {
        let threshold = usize::from(params.function_id)
            .checked_sub(1)
            .and_then(|i| THRESHOLDS.get(i).copied())
            .ok_or_else(|| {
                ConfigError::invalid(
                    "function_id",
                    format!("must be between 1 and 4, got {}", params.function_id),
                )
            })?;
        if !(0.0..=1.0).contains(&params.noise_pct) {
            return Err(ConfigError::invalid(
                "noise_pct",
                format!("must lie in [0, 1], got {}", params.noise_pct),
            ));
        }

        let attributes: Vec<AttributeRef> = vec![
            Arc::new(NumericAttribute::new("attrib1")),
            Arc::new(NumericAttribute::new("attrib2")),
            Arc::new(NumericAttribute::new("attrib3")),
            Arc::new(NominalAttribute::new(
                "class",
                vec!["groupA".to_string(), "groupB".to_string()],
            )),
        ];
        let header = Arc::new(InstanceHeader::new(
            format!("sea-f{}", params.function_id),
            attributes,
            3,
        ));

        Ok(Self {
            rng: StdRng::seed_from_u64(params.seed),
            threshold,
            header,
            params,
            produced: 0,
            next_class_should_be_zero: false,
        })
    }

    fn determine_class(&self, attrib1: f64, attrib2: f64) -> usize {
        if attrib1 + attrib2 <= self.threshold {
            0
        } else {
            1
        }
    }
}

impl Stream for SeaGenerator {
    fn header(&self) -> Arc<InstanceHeader> {
        Arc::clone(&self.header)
    }

    fn has_more_instances(&self) -> bool {
        self.params
            .max_instances
            .is_none_or(|max| self.produced < max)
    }

    fn next_instance(&mut self) -> Option<Box<dyn Instance>> {
        if !self.has_more_instances() {
            return None;
        }

        let (attrib1, attrib2, attrib3, mut class) = loop {
            let a1 = self.rng.random_range(0.0..10.0);
            let a2 = self.rng.random_range(0.0..10.0);
            let a3 = self.rng.random_range(0.0..10.0);
            let class = self.determine_class(a1, a2);
            if !self.params.balance || (class == 0) == self.next_class_should_be_zero {
                break (a1, a2, a3, class);
            }
        };
        self.next_class_should_be_zero = !self.next_class_should_be_zero;

        if self.params.noise_pct > 0.0 && self.rng.random_bool(self.params.noise_pct) {
            class = 1 - class;
        }

        self.produced += 1;
        let values = vec![attrib1, attrib2, attrib3, class as f64];
        Some(Box::new(DenseInstance::new(
            Arc::clone(&self.header),
            values,
            1.0,
        )))
    }

    fn restart(&mut self) {
        self.rng = StdRng::seed_from_u64(self.params.seed);
        self.produced = 0;
        self.next_class_should_be_zero = false;
    }
}
