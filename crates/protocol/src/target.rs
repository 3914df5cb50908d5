use serde::{Deserialize, Serialize};

use crate::palette::Swatch;

/// A transformation applied uniformly to every lamp.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum GlobalAction {
    Brighten,
    Dim,
    Randomize,
    Reset,
}

impl GlobalAction {
    pub const ALL: [GlobalAction; 4] = [
        GlobalAction::Brighten,
        GlobalAction::Dim,
        GlobalAction::Randomize,
        GlobalAction::Reset,
    ];

    pub fn label(self) -> &'static str {
        match self {
            Self::Brighten => "Brighten",
            Self::Dim => "Dim",
            Self::Randomize => "Randomize",
            Self::Reset => "Reset",
        }
    }
}

impl std::str::FromStr for GlobalAction {
    type Err = UnknownAction;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "brighten" => Ok(Self::Brighten),
            "dim" => Ok(Self::Dim),
            "randomize" => Ok(Self::Randomize),
            "reset" => Ok(Self::Reset),
            other => Err(UnknownAction(other.to_string())),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnknownAction(pub String);

impl std::fmt::Display for UnknownAction {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "unknown global action: {}", self.0)
    }
}

impl std::error::Error for UnknownAction {}

/// What a clickable render command answers to.
///
/// Renderers collect these alongside the drawn shapes and hand the one under
/// the pointer back to the store.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "kind", content = "value", rename_all = "camelCase")]
pub enum HitTarget {
    Lamp(u32),
    Global(GlobalAction),
    Swatch(Swatch),
    ClosePicker,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_actions() {
        for action in GlobalAction::ALL {
            let parsed: Result<GlobalAction, _> = action.label().to_lowercase().parse();
            assert_eq!(parsed, Ok(action));
        }
        assert!("explode".parse::<GlobalAction>().is_err());
    }

    #[test]
    fn target_json_shape() {
        let json = serde_json::to_string(&HitTarget::Lamp(7)).unwrap_or_default();
        assert_eq!(json, r#"{"kind":"lamp","value":7}"#);
        let json = serde_json::to_string(&HitTarget::Global(GlobalAction::Dim)).unwrap_or_default();
        assert_eq!(json, r#"{"kind":"global","value":"dim"}"#);
        let json = serde_json::to_string(&HitTarget::ClosePicker).unwrap_or_default();
        assert_eq!(json, r#"{"kind":"closePicker"}"#);
    }
}
