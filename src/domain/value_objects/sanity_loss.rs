//! Sanity loss table keyed by how bad the encounter was

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use super::RollSpecification;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SanitySeverity {
    Minor,
    Moderate,
    Major,
    Severe,
    Extreme,
}

impl SanitySeverity {
    /// Loss on a successful check. `None` means nothing is lost.
    pub fn success_loss(&self) -> Option<RollSpecification> {
        match self {
            Self::Minor => None,
            Self::Moderate => Some(RollSpecification::new(1, 2)),
            Self::Major => Some(RollSpecification::new(1, 4)),
            Self::Severe => Some(RollSpecification::new(1, 6)),
            Self::Extreme => Some(RollSpecification::new(1, 10)),
        }
    }

    /// Loss on a failed check
    pub fn failure_loss(&self) -> RollSpecification {
        match self {
            Self::Minor => RollSpecification::new(1, 4),
            Self::Moderate => RollSpecification::new(1, 6),
            Self::Major => RollSpecification::new(1, 8),
            Self::Severe => RollSpecification::new(1, 10),
            Self::Extreme => RollSpecification::new(1, 20),
        }
    }

    pub fn display_name(&self) -> &'static str {
        match self {
            Self::Minor => "Minor",
            Self::Moderate => "Moderate",
            Self::Major => "Major",
            Self::Severe => "Severe",
            Self::Extreme => "Extreme",
        }
    }
}

impl fmt::Display for SanitySeverity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.display_name())
    }
}

impl FromStr for SanitySeverity {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "minor" => Ok(Self::Minor),
            "moderate" => Ok(Self::Moderate),
            "major" => Ok(Self::Major),
            "severe" => Ok(Self::Severe),
            "extreme" => Ok(Self::Extreme),
            other => Err(format!("Unknown severity: {}", other)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_loss_table() {
        assert_eq!(SanitySeverity::Minor.success_loss(), None);
        assert_eq!(SanitySeverity::Minor.failure_loss().to_string(), "1d4");
        assert_eq!(
            SanitySeverity::Moderate.success_loss().map(|s| s.to_string()),
            Some("1d2".to_string())
        );
        assert_eq!(SanitySeverity::Extreme.failure_loss().to_string(), "1d20");
    }

    #[test]
    fn test_parse() {
        assert_eq!("Severe".parse::<SanitySeverity>(), Ok(SanitySeverity::Severe));
        assert!("catastrophic".parse::<SanitySeverity>().is_err());
    }
}
