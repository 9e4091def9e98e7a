use i_overlay::core::overlay_rule::OverlayRule;

/// The type of 2D boolean operation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BooleanOp {
    Intersect,
    Subtract,
}

impl BooleanOp {
    /// Maps the operation onto the overlay rule that selects its fragments.
    #[must_use]
    pub fn overlay_rule(self) -> OverlayRule {
        match self {
            BooleanOp::Intersect => OverlayRule::Intersect,
            BooleanOp::Subtract => OverlayRule::Difference,
        }
    }
}
