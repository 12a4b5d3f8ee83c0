//! Search settings.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Default search depth in plies.
pub const DEFAULT_DEPTH: u8 = 4;

/// Tuning knobs for the move choosers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SearchConfig {
    /// Negamax depth in plies. Values below 1 are searched at depth 1.
    pub depth: u8,
    /// Shuffle candidate moves before searching them, so equal-scored moves
    /// are picked at random.
    pub shuffle: bool,
}

impl Default for SearchConfig {
    fn default() -> Self {
        SearchConfig {
            depth: DEFAULT_DEPTH,
            shuffle: true,
        }
    }
}

/// How a side picks its moves.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Strategy {
    /// Any legal move, uniformly at random.
    Random,
    /// Greedy material look-ahead over our move and the reply.
    TwoPly,
    /// Full negamax alpha-beta search.
    #[default]
    Negamax,
}

impl Strategy {
    pub const ALL: [Strategy; 3] = [Strategy::Random, Strategy::TwoPly, Strategy::Negamax];

    pub const fn name(self) -> &'static str {
        match self {
            Strategy::Random => "random",
            Strategy::TwoPly => "two-ply",
            Strategy::Negamax => "negamax",
        }
    }
}

impl fmt::Display for Strategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Error returned when parsing an unknown strategy name.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("unknown strategy '{0}' (expected random, two-ply or negamax)")]
pub struct UnknownStrategy(pub String);

impl FromStr for Strategy {
    type Err = UnknownStrategy;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Strategy::ALL
            .into_iter()
            .find(|strategy| strategy.name().eq_ignore_ascii_case(s))
            .ok_or_else(|| UnknownStrategy(s.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config() {
        let config = SearchConfig::default();
        assert_eq!(config.depth, 4);
        assert!(config.shuffle);
    }

    #[test]
    fn partial_toml_keeps_defaults() {
        let config: SearchConfig = toml::from_str("depth = 2").unwrap();
        assert_eq!(config.depth, 2);
        assert!(config.shuffle);

        let config: SearchConfig = toml::from_str("").unwrap();
        assert_eq!(config, SearchConfig::default());
    }

    #[test]
    fn strategy_names_roundtrip() {
        for strategy in Strategy::ALL {
            assert_eq!(strategy.to_string().parse::<Strategy>(), Ok(strategy));
        }
        assert_eq!("NEGAMAX".parse::<Strategy>(), Ok(Strategy::Negamax));
        assert_eq!(
            "minimax".parse::<Strategy>(),
            Err(UnknownStrategy("minimax".to_string()))
        );
    }

    #[test]
    fn strategy_deserializes_kebab_case() {
        #[derive(Deserialize)]
        struct Sides {
            white: Strategy,
            black: Strategy,
        }

        let sides: Sides = toml::from_str("white = \"two-ply\"\nblack = \"random\"").unwrap();
        assert_eq!(sides.white, Strategy::TwoPly);
        assert_eq!(sides.black, Strategy::Random);
    }
}
