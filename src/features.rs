use serde::{Deserialize, Serialize};

/// Runtime toggles for optional parts of the tick pipeline.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Features {
    /// Hand the flanker cost matrix to the visualization sink.
    pub visualize: bool,
    /// Run the spawn planner before agent decisions.
    pub spawning: bool,
}

impl Default for Features {
    fn default() -> Features {
        Features {
            visualize: true,
            spawning: true,
        }
    }
}
