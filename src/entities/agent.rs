// 🕵️ Agent Entity - one row of the roster
//
// The remote collection owns identity: ids are assigned on create and the
// client never invents one. Compensation travels as text (see money.rs).

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Name cap, in characters
pub const MAX_NAME_LEN: usize = 100;

/// Category cap, in characters
pub const MAX_CATEGORY_LEN: usize = 100;

// ============================================================================
// IDENTITY
// ============================================================================

/// Opaque identifier assigned by the remote collection
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct AgentId(pub u64);

impl fmt::Display for AgentId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for AgentId {
    type Err = std::num::ParseIntError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        s.trim().parse().map(AgentId)
    }
}

// ============================================================================
// AGENT
// ============================================================================

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Agent {
    pub id: AgentId,

    /// Display name (≤100 chars)
    pub name: String,

    /// Category (≤100 chars)
    pub category: String,

    /// Tenure in whole years
    pub tenure: u32,

    /// Compensation amount as text, e.g. "12345.67"
    pub compensation: String,
}

impl Agent {
    /// Compensation with the currency sign, for display
    pub fn compensation_label(&self) -> String {
        format!("${}", self.compensation)
    }
}

/// Agent before the remote collection has assigned an id
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewAgent {
    pub name: String,
    pub category: String,
    pub tenure: u32,
    pub compensation: String,
}

impl NewAgent {
    /// Length caps on the free-text fields. Compensation is checked by
    /// `money::validate`.
    pub fn check_text_fields(&self) -> Result<(), &'static str> {
        if self.name.chars().count() > MAX_NAME_LEN {
            return Err("Name must be at most 100 characters");
        }
        if self.category.chars().count() > MAX_CATEGORY_LEN {
            return Err("Category must be at most 100 characters");
        }
        Ok(())
    }

    pub fn with_id(self, id: AgentId) -> Agent {
        Agent {
            id,
            name: self.name,
            category: self.category,
            tenure: self.tenure,
            compensation: self.compensation,
        }
    }
}

/// Partial update body. Compensation is the only mutable field.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CompensationUpdate {
    pub compensation: String,
}

impl CompensationUpdate {
    pub fn new(compensation: impl Into<String>) -> Self {
        CompensationUpdate {
            compensation: compensation.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> NewAgent {
        NewAgent {
            name: "Whiskers".to_string(),
            category: "Siamese".to_string(),
            tenure: 4,
            compensation: "1500.00".to_string(),
        }
    }

    #[test]
    fn test_agent_json_shape() {
        let agent = sample().with_id(AgentId(7));
        let json = serde_json::to_value(&agent).unwrap();

        assert_eq!(json["id"], 7);
        assert_eq!(json["name"], "Whiskers");
        assert_eq!(json["tenure"], 4);
        assert_eq!(json["compensation"], "1500.00");
    }

    #[test]
    fn test_new_agent_has_no_id() {
        let json = serde_json::to_value(sample()).unwrap();
        assert!(json.get("id").is_none());
    }

    #[test]
    fn test_text_field_caps() {
        let mut agent = sample();
        assert!(agent.check_text_fields().is_ok());

        agent.name = "x".repeat(100);
        assert!(agent.check_text_fields().is_ok());

        agent.name = "x".repeat(101);
        assert_eq!(
            agent.check_text_fields(),
            Err("Name must be at most 100 characters")
        );

        agent.name = "ok".to_string();
        agent.category = "y".repeat(101);
        assert_eq!(
            agent.check_text_fields(),
            Err("Category must be at most 100 characters")
        );
    }

    #[test]
    fn test_agent_id_parse() {
        assert_eq!(" 42 ".parse::<AgentId>().unwrap(), AgentId(42));
        assert!("abc".parse::<AgentId>().is_err());
        assert_eq!(AgentId(3).to_string(), "3");
    }

    #[test]
    fn test_compensation_label() {
        let agent = sample().with_id(AgentId(1));
        assert_eq!(agent.compensation_label(), "$1500.00");
    }
}
