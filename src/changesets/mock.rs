use crate::changesets::ReleasePlanResolver;
use crate::domain::ReleasePlan;
use crate::error::Result;
use std::path::Path;

/// Release plan resolver returning a fixed plan for any repository and reference
pub struct StaticReleasePlan {
    plan: ReleasePlan,
}

impl StaticReleasePlan {
    pub fn new(plan: ReleasePlan) -> Self {
        StaticReleasePlan { plan }
    }
}

impl ReleasePlanResolver for StaticReleasePlan {
    fn get_release_plan(&self, _repository_root: &Path, _base_ref: &str) -> Result<ReleasePlan> {
        Ok(self.plan.clone())
    }
}
