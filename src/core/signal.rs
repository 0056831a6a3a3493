//! Sensor and actuator vectors.
//!
//! Concrete readings are [`Signals`]: plain booleans, one per declared
//! sensor or actuator. Guards and outputs are [`Pattern`]s, which may also
//! hold the wildcard `*`.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Declaration of a single sensor or actuator.
///
/// The position of a declaration in its list is the index of the
/// corresponding value in every [`Signals`] vector.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct SignalSpec {
    /// Short name shown on the diagram (e.g. `"U"`)
    pub name: String,
    /// Human readable description
    pub description: String,
}

impl SignalSpec {
    pub fn new(name: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            description: description.into(),
        }
    }
}

/// Errors raised while parsing signal vectors and patterns.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum PatternError {
    #[error("Invalid symbol '{symbol}' at position {position} in \"{text}\"")]
    InvalidSymbol {
        symbol: char,
        position: usize,
        text: String,
    },
}

/// A concrete vector of boolean signal values.
///
/// Never contains a wildcard. Displayed and parsed as a string of
/// `0` and `1` characters.
///
/// # Example
///
/// ```rust
/// use automata::core::Signals;
///
/// let sensors: Signals = "0110".parse().unwrap();
/// assert_eq!(sensors.len(), 4);
/// assert!(sensors.get(1));
/// assert_eq!(sensors.to_string(), "0110");
/// ```
#[derive(Clone, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Signals(Vec<bool>);

impl Signals {
    /// All-zero vector of the given length.
    pub fn zeros(len: usize) -> Self {
        Self(vec![false; len])
    }

    pub fn from_bits(bits: Vec<bool>) -> Self {
        Self(bits)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Value at `index`. Out of range positions read as `false`.
    pub fn get(&self, index: usize) -> bool {
        self.0.get(index).copied().unwrap_or(false)
    }

    /// Set the value at `index`. Out of range positions are ignored.
    pub fn set(&mut self, index: usize, value: bool) {
        if let Some(slot) = self.0.get_mut(index) {
            *slot = value;
        }
    }

    /// Reset every position to `false`, keeping the length.
    pub fn clear(&mut self) {
        self.0.iter_mut().for_each(|bit| *bit = false);
    }

    pub fn as_slice(&self) -> &[bool] {
        &self.0
    }
}

impl fmt::Display for Signals {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for bit in &self.0 {
            f.write_str(if *bit { "1" } else { "0" })?;
        }
        Ok(())
    }
}

impl FromStr for Signals {
    type Err = PatternError;

    fn from_str(text: &str) -> Result<Self, Self::Err> {
        text.chars()
            .enumerate()
            .map(|(position, symbol)| match symbol {
                '0' => Ok(false),
                '1' => Ok(true),
                _ => Err(PatternError::InvalidSymbol {
                    symbol,
                    position,
                    text: text.to_string(),
                }),
            })
            .collect::<Result<Vec<_>, _>>()
            .map(Self)
    }
}

/// One position of a [`Pattern`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Trit {
    Low,
    High,
    /// Don't care in a guard, unchanged in an output
    Any,
}

impl Trit {
    pub fn symbol(self) -> char {
        match self {
            Self::Low => '0',
            Self::High => '1',
            Self::Any => '*',
        }
    }
}

/// A vector of `0`, `1` and `*` values used by guards and outputs.
///
/// # Example
///
/// ```rust
/// use automata::core::{Pattern, Trit};
///
/// let pattern: Pattern = "1*0".parse().unwrap();
/// assert_eq!(pattern.trits(), &[Trit::High, Trit::Any, Trit::Low]);
/// assert!("1x0".parse::<Pattern>().is_err());
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Pattern(Vec<Trit>);

impl Pattern {
    pub fn new(trits: Vec<Trit>) -> Self {
        Self(trits)
    }

    /// Pattern made only of wildcards.
    pub fn any(len: usize) -> Self {
        Self(vec![Trit::Any; len])
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn trits(&self) -> &[Trit] {
        &self.0
    }
}

impl fmt::Display for Pattern {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for trit in &self.0 {
            write!(f, "{}", trit.symbol())?;
        }
        Ok(())
    }
}

impl FromStr for Pattern {
    type Err = PatternError;

    fn from_str(text: &str) -> Result<Self, Self::Err> {
        text.chars()
            .enumerate()
            .map(|(position, symbol)| match symbol {
                '0' => Ok(Trit::Low),
                '1' => Ok(Trit::High),
                '*' => Ok(Trit::Any),
                _ => Err(PatternError::InvalidSymbol {
                    symbol,
                    position,
                    text: text.to_string(),
                }),
            })
            .collect::<Result<Vec<_>, _>>()
            .map(Self)
    }
}

impl From<&Signals> for Pattern {
    fn from(signals: &Signals) -> Self {
        Self(
            signals
                .as_slice()
                .iter()
                .map(|bit| if *bit { Trit::High } else { Trit::Low })
                .collect(),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn signals_parse_and_display() {
        let signals: Signals = "1001".parse().unwrap();
        assert_eq!(signals.as_slice(), &[true, false, false, true]);
        assert_eq!(signals.to_string(), "1001");
    }

    #[test]
    fn signals_reject_wildcards() {
        let result = "1*01".parse::<Signals>();
        assert_eq!(
            result,
            Err(PatternError::InvalidSymbol {
                symbol: '*',
                position: 1,
                text: "1*01".to_string(),
            })
        );
    }

    #[test]
    fn signals_set_ignores_out_of_range() {
        let mut signals = Signals::zeros(2);
        signals.set(1, true);
        signals.set(5, true);
        assert_eq!(signals.to_string(), "01");
        assert!(!signals.get(5));

        signals.clear();
        assert_eq!(signals, Signals::zeros(2));
    }

    #[test]
    fn pattern_round_trips_symbols() {
        let pattern: Pattern = "01*".parse().unwrap();
        assert_eq!(pattern.to_string(), "01*");
        assert_eq!(Pattern::any(3).to_string(), "***");
    }

    #[test]
    fn pattern_reports_invalid_symbol_position() {
        match "0-1".parse::<Pattern>() {
            Err(PatternError::InvalidSymbol {
                symbol, position, ..
            }) => {
                assert_eq!(symbol, '-');
                assert_eq!(position, 1);
            }
            other => panic!("Expected invalid symbol, got {other:?}"),
        }
    }

    #[test]
    fn empty_pattern_is_valid() {
        let pattern: Pattern = "".parse().unwrap();
        assert!(pattern.is_empty());
    }

    #[test]
    fn signals_serialize_correctly() {
        let signals: Signals = "101".parse().unwrap();
        let json = serde_json::to_string(&signals).unwrap();
        let deserialized: Signals = serde_json::from_str(&json).unwrap();
        assert_eq!(signals, deserialized);
    }
}
