use serde::{Deserialize, Serialize};

/// Engine options that change how a tree is parsed.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ParseOptions {
    /// Keep nested adders nested instead of flattening them.
    ///
    /// Editors that round-trip structured adders (weapon lists grouped by
    /// category) need the hierarchy. Cost figures are identical either way.
    pub preserve_adder_hierarchy: bool,

    /// Skip the container/list post-pass. Costs of list children and
    /// container rollups are then left exactly as parsed.
    pub skip_aggregation: bool,
}

impl ParseOptions {
    pub fn new() -> Self {
        Self::default()
    }

    /// Enables adder hierarchy preservation (builder pattern).
    #[must_use]
    pub fn preserving_adders(mut self) -> Self {
        self.preserve_adder_hierarchy = true;
        self
    }
}
