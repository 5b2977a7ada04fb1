use serde::{Deserialize, Serialize};

/// A purchasable access plan shown by the plan-selection collaborator.
///
/// The portal core only consumes the label; price is carried for display.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct PlanInfo {
    pub label: String,
    pub price_ksh: u32,
}

impl PlanInfo {
    pub fn new(label: impl Into<String>, price_ksh: u32) -> Self {
        Self { label: label.into(), price_ksh }
    }
}

/// The plan catalog offered on the portal landing page.
pub fn plan_catalog() -> Vec<PlanInfo> {
    vec![
        PlanInfo::new("Individual – 1 hour – Ksh 10", 10),
        PlanInfo::new("Shared – 24 hours – Ksh 80", 80),
        PlanInfo::new("Family – 1 month – Ksh 900", 900),
    ]
}
