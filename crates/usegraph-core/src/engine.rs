//! Layout engine selection.

use std::{
    fmt::{self, Display},
    str::FromStr,
};

use serde::{Deserialize, Serialize};

/// Available layout engines used by the solver-backed layout phases.
///
/// The names match external configuration strings (snake_case).
///
/// # Variants
///
/// - `Sugiyama` - Layered graph layout using the Sugiyama method (default)
/// - `Basic` - Deterministic single-row placement that never fails
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash, Deserialize, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum LayoutEngine {
    /// Basic row layout engine
    Basic,
    /// Sugiyama layered layout engine (default)
    #[default]
    Sugiyama,
}

impl FromStr for LayoutEngine {
    type Err = &'static str;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "basic" => Ok(Self::Basic),
            "sugiyama" => Ok(Self::Sugiyama),
            _ => Err("Unsupported layout engine"),
        }
    }
}

impl From<LayoutEngine> for &'static str {
    fn from(val: LayoutEngine) -> Self {
        match val {
            LayoutEngine::Basic => "basic",
            LayoutEngine::Sugiyama => "sugiyama",
        }
    }
}

impl Display for LayoutEngine {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s: &'static str = (*self).into();
        write!(f, "{s}")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_sugiyama() {
        assert_eq!(LayoutEngine::default(), LayoutEngine::Sugiyama);
    }

    #[test]
    fn test_from_str_roundtrip() {
        for engine in [LayoutEngine::Basic, LayoutEngine::Sugiyama] {
            let name = engine.to_string();
            assert_eq!(name.parse::<LayoutEngine>(), Ok(engine));
        }
        assert!("force".parse::<LayoutEngine>().is_err());
    }
}
