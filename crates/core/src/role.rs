//! Production-stage specialists.

use serde::{Deserialize, Serialize};

/// The specialist responsible for a production stage.
///
/// Role names arrive as plain identifiers from the pipeline runner and are
/// matched verbatim. Names outside the known set are carried as
/// [`Role::Other`] rather than rejected: an unrecognized role still receives
/// a stage view, just without role-specific augmentation.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum Role {
    BrandStrategist,
    SeoSpecialist,
    ContentStrategist,
    SeoCopywriter,
    NarrativeEditor,
    ContentReviewer,
    VisualConsultant,
    Other(String),
}

impl Role {
    pub fn as_str(&self) -> &str {
        match self {
            Role::BrandStrategist => "brand_strategist",
            Role::SeoSpecialist => "seo_specialist",
            Role::ContentStrategist => "content_strategist",
            Role::SeoCopywriter => "seo_copywriter",
            Role::NarrativeEditor => "narrative_editor",
            Role::ContentReviewer => "content_reviewer",
            Role::VisualConsultant => "visual_consultant",
            Role::Other(name) => name,
        }
    }
}

impl From<&str> for Role {
    fn from(name: &str) -> Self {
        match name {
            "brand_strategist" => Role::BrandStrategist,
            "seo_specialist" => Role::SeoSpecialist,
            "content_strategist" => Role::ContentStrategist,
            "seo_copywriter" => Role::SeoCopywriter,
            "narrative_editor" => Role::NarrativeEditor,
            "content_reviewer" => Role::ContentReviewer,
            "visual_consultant" => Role::VisualConsultant,
            other => Role::Other(other.to_string()),
        }
    }
}

impl From<String> for Role {
    fn from(name: String) -> Self {
        Role::from(name.as_str())
    }
}

impl From<Role> for String {
    fn from(role: Role) -> Self {
        role.as_str().to_string()
    }
}

impl std::fmt::Display for Role {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}
