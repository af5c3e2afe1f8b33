//! Manufacturer entity and the wire-facing types around it.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Entity lifecycle status. Records are never hard-deleted; Remove flips
/// this to `Inactive`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Status {
    Active,
    Inactive,
}

impl Status {
    pub fn as_str(&self) -> &'static str {
        match self {
            Status::Active => "active",
            Status::Inactive => "inactive",
        }
    }
}

impl std::str::FromStr for Status {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "active" => Ok(Status::Active),
            "inactive" => Ok(Status::Inactive),
            other => Err(format!("invalid status: {}", other)),
        }
    }
}

/// Image reference. `thumbnail` falls back to `url` when not given distinctly.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Pic {
    pub url: String,
    pub thumbnail: String,
}

/// `pic` on the wire: either a bare URL string or an object with `url` and
/// an optional `thumbnail`.
#[derive(Clone, Debug, Deserialize)]
#[serde(untagged)]
pub enum PicInput {
    Url(String),
    Full { url: String, thumbnail: Option<String> },
}

impl PicInput {
    pub fn into_pic(self) -> Pic {
        match self {
            PicInput::Url(url) => Pic {
                thumbnail: url.clone(),
                url,
            },
            PicInput::Full { url, thumbnail } => Pic {
                thumbnail: thumbnail.unwrap_or_else(|| url.clone()),
                url,
            },
        }
    }
}

/// The catalog entity. `tenant` is set once at creation and never mutated;
/// `code` is stored lowercased.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct Manufacturer {
    pub id: Uuid,
    pub tenant: String,
    pub code: String,
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub pic: Option<Pic>,
    pub status: Status,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Partial wire model accepted by Create and Update. Only present fields
/// are applied.
#[derive(Clone, Debug, Default, Deserialize)]
pub struct ManufacturerPatch {
    pub code: Option<String>,
    pub name: Option<String>,
    pub description: Option<String>,
    pub status: Option<Status>,
    pub pic: Option<PicInput>,
}

/// Heterogeneous lookup key for Get: internal id or business code.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum LookupKey {
    Id(Uuid),
    Code(String),
}

impl LookupKey {
    /// A string that parses as a UUID is an id; anything else is a code,
    /// lowercased.
    pub fn parse(s: &str) -> Self {
        match Uuid::parse_str(s) {
            Ok(id) => LookupKey::Id(id),
            Err(_) => LookupKey::Code(s.to_lowercase()),
        }
    }

    /// Lookup key from an ad-hoc query object carrying `id` or `code`.
    /// Returns `None` when neither shape matches (a lookup miss, not an
    /// error).
    pub fn from_query(query: &serde_json::Value) -> Option<Self> {
        if let Some(s) = query.as_str() {
            return Some(Self::parse(s));
        }
        if let Some(id) = query.get("id").and_then(|v| v.as_str()) {
            return Uuid::parse_str(id).ok().map(LookupKey::Id);
        }
        if let Some(code) = query.get("code").and_then(|v| v.as_str()) {
            return Some(LookupKey::Code(code.to_lowercase()));
        }
        None
    }
}

/// Search filter overrides. Defaults (active status, caller's tenant) are
/// applied by the service.
#[derive(Clone, Debug, Default, Deserialize)]
pub struct SearchQuery {
    pub status: Option<Status>,
    pub name: Option<String>,
}

/// Offset/limit page. Absent page means the full result set.
#[derive(Clone, Copy, Debug, Deserialize)]
pub struct Page {
    pub skip: u32,
    pub limit: u32,
}

#[derive(Debug, Serialize)]
pub struct SearchResult {
    pub count: u64,
    pub items: Vec<Manufacturer>,
}
