use serde::{Deserialize, Serialize};

use super::leg::Minutes;

/// Labor-time limits of a single duty, in minutes.
#[derive(Deserialize, Serialize, Debug, Clone, Copy, PartialEq, Eq)]
pub struct LaborRules {
    /// Maximum driving time (`D_MAX`).
    pub max_driving_time: Minutes,
    /// Maximum paid working time (`W_MAX`).
    pub max_working_time: Minutes,
    /// Minimum paid working time (`W_MIN`), shortfalls are paid anyway.
    pub min_working_time: Minutes,
    /// Maximum span between shift start and shift end (`T_MAX`).
    pub max_span: Minutes,
}

impl Default for LaborRules {
    fn default() -> Self {
        LaborRules {
            max_driving_time: 9 * 60,
            max_working_time: 10 * 60,
            min_working_time: 6 * 60 + 30,
            max_span: 14 * 60,
        }
    }
}
