use std::ops::Deref;

use serde::Serialize;

use super::{instance::Instance, labor_rules::LaborRules};

/// An [`Instance`] together with the labor rules its schedules are judged by.
///
/// Dereferences to the instance so solver code reads legs and ride times directly.
#[derive(Serialize, Debug, Clone)]
pub struct DutyProblem {
    instance: Instance,
    rules: LaborRules,
}

impl DutyProblem {
    pub fn new(instance: Instance, rules: LaborRules) -> Self {
        DutyProblem { instance, rules }
    }

    pub fn instance(&self) -> &Instance {
        &self.instance
    }

    pub fn rules(&self) -> &LaborRules {
        &self.rules
    }
}

impl Deref for DutyProblem {
    type Target = Instance;

    fn deref(&self) -> &Self::Target {
        &self.instance
    }
}
