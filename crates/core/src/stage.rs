//! Pipeline stages.

use serde::{Deserialize, Serialize};

/// A named phase of the production pipeline with distinct context needs.
///
/// The set is closed and fixed at build time. `General` is the fallback for
/// any (role, task) pair the resolver does not recognize: it carries only
/// the base fields every stage needs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Stage {
    Strategy,
    Products,
    Seo,
    Content,
    Refinement,
    Review,
    Visual,
    General,
}

impl Stage {
    /// Every stage, in pipeline order.
    pub const ALL: [Stage; 8] = [
        Stage::Strategy,
        Stage::Products,
        Stage::Seo,
        Stage::Content,
        Stage::Refinement,
        Stage::Review,
        Stage::Visual,
        Stage::General,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Stage::Strategy => "strategy",
            Stage::Products => "products",
            Stage::Seo => "seo",
            Stage::Content => "content",
            Stage::Refinement => "refinement",
            Stage::Review => "review",
            Stage::Visual => "visual",
            Stage::General => "general",
        }
    }

}

impl std::fmt::Display for Stage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_matches_serde_name() {
        for stage in Stage::ALL {
            let json = serde_json::to_string(&stage).unwrap();
            assert_eq!(json, format!("\"{stage}\""));
        }
    }

    #[test]
    fn serde_uses_snake_case() {
        let json = serde_json::to_string(&Stage::Refinement).unwrap();
        assert_eq!(json, "\"refinement\"");
        let back: Stage = serde_json::from_str(&json).unwrap();
        assert_eq!(back, Stage::Refinement);
    }
}
