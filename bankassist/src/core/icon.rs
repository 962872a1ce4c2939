//! Symbolic stage icons.
//!
//! The model only carries a tag. Each presentation layer decides how a tag
//! is drawn.

use serde::{Deserialize, Serialize};
use std::fmt;

/// A symbolic icon attached to a stage.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StageIcon {
    /// Channel intake (phone, web, chat).
    Intake,
    /// Intent classification.
    Intent,
    /// Identity and KYC.
    Auth,
    /// Profile and permissions lookup.
    Entitlement,
    /// Policy and procedure retrieval.
    Knowledge,
    /// Case resolution.
    Resolution,
    /// Compliance and risk review.
    Compliance,
    /// Customer communication.
    Communication,
    /// Anything else.
    #[default]
    Generic,
}

impl fmt::Display for StageIcon {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Intake => "intake",
            Self::Intent => "intent",
            Self::Auth => "auth",
            Self::Entitlement => "entitlement",
            Self::Knowledge => "knowledge",
            Self::Resolution => "resolution",
            Self::Compliance => "compliance",
            Self::Communication => "communication",
            Self::Generic => "generic",
        };
        f.write_str(name)
    }
}
