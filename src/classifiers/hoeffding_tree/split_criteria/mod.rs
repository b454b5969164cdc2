mod gini_split_criterion;
mod info_gain_split_criterion;
mod split_criterion;

pub use gini_split_criterion::GiniSplitCriterion;
pub use info_gain_split_criterion::InfoGainSplitCriterion;
pub use split_criterion::SplitCriterion;

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use strum_macros::{Display, EnumIter, EnumString, IntoStaticStr};

#[derive(
    Debug,
    Clone,
    Copy,
    Default,
    PartialEq,
    Eq,
    Serialize,
    Deserialize,
    JsonSchema,
    Display,
    EnumString,
    EnumIter,
    IntoStaticStr,
)]
#[serde(rename_all = "kebab-case")]
#[strum(serialize_all = "kebab-case")]
pub enum SplitCriterionKind {
    #[default]
    InfoGain,
    Gini,
}

impl SplitCriterionKind {
    pub fn build(self) -> Box<dyn SplitCriterion> {
        match self {
            SplitCriterionKind::InfoGain => Box::new(InfoGainSplitCriterion::default()),
            SplitCriterionKind::Gini => Box::new(GiniSplitCriterion::new()),
        }
    }
}
