use super::item::ItemRequirement;
use super::step::StepId;

/// A named section of the guidance panel, shown in authoring order.
#[derive(Debug, Clone, PartialEq)]
pub struct Panel {
    pub header: String,
    pub steps: Vec<StepId>,
    /// Items worth highlighting while this section is active
    pub items: Vec<ItemRequirement>,
}
