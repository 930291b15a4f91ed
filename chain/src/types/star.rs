//! Star registration payloads.
//!
//! These are the values encoded into block bodies by the ownership
//! workflow, and the shape returned by owner lookups.

use serde::{Deserialize, Serialize};

/// Celestial coordinates and story of a registered star.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Star {
    /// Right ascension, e.g. `"16h 29m 1.0s"`.
    pub ra: String,
    /// Declination, e.g. `"-26° 29' 24.9"`.
    pub dec: String,
    /// Optional magnitude.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub mag: Option<String>,
    /// Optional constellation.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cen: Option<String>,
    /// Free-form story attached by the owner.
    pub story: String,
}

/// Body of a block admitted through a verified submission.
///
/// Carries the full proof (challenge message and signature) so that the
/// admission can be audited later.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct StarRecord {
    pub owner: String,
    pub message: String,
    pub signature: String,
    pub star: Star,
}

/// Result item of an owner lookup.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct StarOwnership {
    pub owner: String,
    pub star: Star,
}

impl From<StarRecord> for StarOwnership {
    fn from(record: StarRecord) -> Self {
        Self {
            owner: record.owner,
            star: record.star,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn optional_star_fields_are_omitted_and_defaulted() {
        let star = Star {
            ra: "16h 29m 1.0s".to_string(),
            dec: "-26° 29' 24.9".to_string(),
            mag: None,
            cen: None,
            story: "Found it".to_string(),
        };
        let json = serde_json::to_string(&star).expect("serialize");
        assert!(!json.contains("mag"));
        assert!(!json.contains("cen"));

        let back: Star =
            serde_json::from_str(r#"{"ra":"1","dec":"2","story":"s"}"#).expect("deserialize");
        assert_eq!(back.mag, None);
        assert_eq!(back.story, "s");
    }
}
