//! Appeal type models
//!
//! The closed set of appeal types a driver can file and the display
//! metadata for each of them.

use crate::WizardError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Administrative appeal against a traffic penalty
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AppealType {
    /// Defense filed against the notice of infraction, before a penalty exists
    PriorDefense,
    /// Appeal of the imposed penalty to the JARI board
    FirstInstance,
    /// Appeal to CETRAN after the JARI denied the first one
    SecondInstance,
}

impl AppealType {
    /// All appeal types in the order they are presented
    pub fn all() -> [AppealType; 3] {
        [
            AppealType::PriorDefense,
            AppealType::FirstInstance,
            AppealType::SecondInstance,
        ]
    }

    /// Wire tag, as used in query parameters and analytics payloads
    pub fn as_str(&self) -> &'static str {
        match self {
            AppealType::PriorDefense => "prior_defense",
            AppealType::FirstInstance => "first_instance",
            AppealType::SecondInstance => "second_instance",
        }
    }

    /// Display card for this appeal type
    pub fn card(&self) -> &'static AppealTypeCard {
        match self {
            AppealType::PriorDefense => &APPEAL_CARDS[0],
            AppealType::FirstInstance => &APPEAL_CARDS[1],
            AppealType::SecondInstance => &APPEAL_CARDS[2],
        }
    }
}

impl fmt::Display for AppealType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for AppealType {
    type Err = WizardError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "prior_defense" => Ok(AppealType::PriorDefense),
            "first_instance" => Ok(AppealType::FirstInstance),
            "second_instance" => Ok(AppealType::SecondInstance),
            other => Err(WizardError::UnknownAppealType(other.to_string())),
        }
    }
}

/// Display metadata for one selectable appeal card
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppealTypeCard {
    pub appeal_type: AppealType,
    pub emoji: &'static str,
    pub title: &'static str,
    pub description: &'static str,
    pub deadline: &'static str,
    /// Highlighted with a "most common" badge
    pub most_common: bool,
}

/// Cards in presentation order, indexed the same way as [`AppealType::all`]
pub static APPEAL_CARDS: [AppealTypeCard; 3] = [
    AppealTypeCard {
        appeal_type: AppealType::PriorDefense,
        emoji: "📝",
        title: "Prior Defense",
        description: "Contest the notice of infraction before any penalty is imposed.",
        deadline: "Deadline stated on the notice of infraction (at least 30 days)",
        most_common: false,
    },
    AppealTypeCard {
        appeal_type: AppealType::FirstInstance,
        emoji: "⚖️",
        title: "First Instance Appeal (JARI)",
        description: "Appeal the imposed penalty to the administrative appeals board.",
        deadline: "Deadline stated on the notice of penalty (at least 30 days)",
        most_common: true,
    },
    AppealTypeCard {
        appeal_type: AppealType::SecondInstance,
        emoji: "🏛️",
        title: "Second Instance Appeal (CETRAN)",
        description: "Take the case further after the JARI has denied your appeal.",
        deadline: "30 days from the notice of the JARI decision",
        most_common: false,
    },
];
