//! Actuator output patterns.

use super::signal::{Pattern, PatternError, Signals, Trit};
use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// Actuator pattern emitted by a state.
///
/// `0` and `1` force the actuator, `*` leaves it at the value emitted on
/// the previous tick.
///
/// # Example
///
/// ```rust
/// use automata::core::{Output, Signals};
///
/// let output: Output = "1*".parse().unwrap();
/// let previous: Signals = "01".parse().unwrap();
///
/// assert_eq!(output.apply(&previous).to_string(), "11");
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Output {
    pattern: Pattern,
}

impl Output {
    pub fn new(pattern: Pattern) -> Self {
        Output { pattern }
    }

    /// Output that keeps every actuator unchanged.
    pub fn unchanged(len: usize) -> Self {
        Output {
            pattern: Pattern::any(len),
        }
    }

    /// Compute the actuator vector from the previously emitted one.
    pub fn apply(&self, previous: &Signals) -> Signals {
        let bits = self
            .pattern
            .trits()
            .iter()
            .enumerate()
            .map(|(index, trit)| match trit {
                Trit::Low => false,
                Trit::High => true,
                Trit::Any => previous.get(index),
            })
            .collect();
        Signals::from_bits(bits)
    }

    pub fn pattern(&self) -> &Pattern {
        &self.pattern
    }

    pub fn len(&self) -> usize {
        self.pattern.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pattern.is_empty()
    }
}

impl FromStr for Output {
    type Err = PatternError;

    fn from_str(text: &str) -> Result<Self, Self::Err> {
        text.parse().map(Output::new)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn forced_positions_ignore_previous() {
        let output: Output = "10".parse().unwrap();
        let previous: Signals = "01".parse().unwrap();

        assert_eq!(output.apply(&previous).to_string(), "10");
    }

    #[test]
    fn unchanged_positions_keep_previous() {
        let output = Output::unchanged(3);
        let previous: Signals = "101".parse().unwrap();

        assert_eq!(output.apply(&previous), previous);
    }

    #[test]
    fn mixed_pattern() {
        let output: Output = "*0*1".parse().unwrap();
        let previous: Signals = "1110".parse().unwrap();

        assert_eq!(output.apply(&previous).to_string(), "1011");
    }
}
