//! Builder for constructing state transitions.

use crate::builder::diagram::TransitionEdge;
use crate::builder::error::BuildError;

/// Builder for constructing transitions with a fluent API.
///
/// Patterns are kept as text and checked when the machine is built, so
/// every problem is reported together.
#[derive(Clone, Debug, Default)]
pub struct TransitionBuilder {
    from: Option<String>,
    to: Option<String>,
    guard: Option<String>,
}

impl TransitionBuilder {
    /// Create a new transition builder.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the source state (required).
    pub fn from(mut self, state: impl Into<String>) -> Self {
        self.from = Some(state.into());
        self
    }

    /// Set the target state (required).
    pub fn to(mut self, state: impl Into<String>) -> Self {
        self.to = Some(state.into());
        self
    }

    /// Set the sensor guard, e.g. `"1*0"` (required).
    pub fn when(mut self, guard: impl Into<String>) -> Self {
        self.guard = Some(guard.into());
        self
    }

    /// Build the transition edge. `order` is assigned by the machine builder.
    pub fn build(self) -> Result<TransitionEdge, BuildError> {
        let source = self.from.ok_or(BuildError::MissingFromState)?;
        let target = self.to.ok_or(BuildError::MissingToState)?;
        let guard = self.guard.ok_or(BuildError::MissingGuard)?;

        Ok(TransitionEdge {
            source,
            target,
            guard,
            order: None,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builder_validates_required_fields() {
        let result = TransitionBuilder::new().from("Idle").build();
        assert_eq!(result, Err(BuildError::MissingToState));

        let result = TransitionBuilder::new().to("Idle").build();
        assert_eq!(result, Err(BuildError::MissingFromState));
    }

    #[test]
    fn builder_validates_missing_guard() {
        let result = TransitionBuilder::new().from("Idle").to("Busy").build();
        assert_eq!(result, Err(BuildError::MissingGuard));
    }

    #[test]
    fn fluent_api_builds_transition() {
        let edge = TransitionBuilder::new()
            .from("Idle")
            .to("Busy")
            .when("1*")
            .build()
            .unwrap();

        assert_eq!(edge.source, "Idle");
        assert_eq!(edge.target, "Busy");
        assert_eq!(edge.guard, "1*");
        assert_eq!(edge.order, None);
    }
}
