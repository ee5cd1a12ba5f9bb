use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::TaxError;

/// Legal form of the business.
///
/// Only [`EntityType::SoleProprietor`] and [`EntityType::SCorp`] have a tax
/// scenario; the other two exist so deduction applicability can be answered
/// for every entity type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum EntityType {
    SoleProprietor,
    SCorp,
    Llc,
    CCorp,
}

impl EntityType {
    pub const ALL: [EntityType; 4] = [Self::SoleProprietor, Self::SCorp, Self::Llc, Self::CCorp];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::SoleProprietor => "sole-proprietor",
            Self::SCorp => "s-corp",
            Self::Llc => "llc",
            Self::CCorp => "c-corp",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Self::SoleProprietor => "Sole Proprietor",
            Self::SCorp => "S Corporation",
            Self::Llc => "LLC",
            Self::CCorp => "C Corporation",
        }
    }

    /// Parses a code or label, ignoring case and treating spaces, dashes and
    /// underscores alike (`"S Corporation"`, `"s-corp"`, `"SCorp"` all match).
    pub fn parse(s: &str) -> Option<Self> {
        let key: String = s
            .chars()
            .filter(|c| !matches!(c, ' ' | '-' | '_'))
            .flat_map(char::to_lowercase)
            .collect();

        match key.as_str() {
            "soleproprietor" | "soleproprietorship" | "sp" => Some(Self::SoleProprietor),
            "scorp" | "scorporation" => Some(Self::SCorp),
            "llc" => Some(Self::Llc),
            "ccorp" | "ccorporation" => Some(Self::CCorp),
            _ => None,
        }
    }

    /// Pass-through entities report business income on the owner's return.
    pub fn is_pass_through(&self) -> bool {
        !matches!(self, Self::CCorp)
    }

    /// The entity type a scenario is compared against in batch comparisons.
    pub fn opposite(&self) -> Option<Self> {
        match self {
            Self::SoleProprietor => Some(Self::SCorp),
            Self::SCorp => Some(Self::SoleProprietor),
            Self::Llc | Self::CCorp => None,
        }
    }
}

impl fmt::Display for EntityType {
    fn fmt(
        &self,
        f: &mut fmt::Formatter<'_>,
    ) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for EntityType {
    type Err = TaxError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s).ok_or_else(|| TaxError::UnknownEntityType(s.to_string()))
    }
}
