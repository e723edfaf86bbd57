use super::{Category, GroceryError, Result};
use chrono::{DateTime, SubsecRound, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use uuid::Uuid;

/// Current time at the precision the persisted text keeps (milliseconds),
/// so an item read back from storage compares equal to the one written.
pub fn now() -> DateTime<Utc> {
    Utc::now().trunc_subsecs(3)
}

fn new_item_id() -> String {
    format!("item-{}", Uuid::new_v4().simple())
}

fn normalize_category(category: Option<&str>) -> Option<String> {
    category
        .map(str::trim)
        .filter(|value| !value.is_empty())
        .map(str::to_string)
}

// ============================================================================
// Item
// ============================================================================

/// One grocery-list entry.
///
/// Fields are read through accessors; mutation goes through the list so the
/// `id`/`created_at` pair stays fixed and `updated_at` follows every change.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Item {
    id: String,
    name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    category: Option<String>,
    #[serde(default)]
    collected: bool,
    #[serde(with = "iso_millis")]
    created_at: DateTime<Utc>,
    #[serde(with = "iso_millis")]
    updated_at: DateTime<Utc>,
}

impl Item {
    /// Create a pending item. Returns `None` when the trimmed name is empty.
    pub fn new(name: &str, category: Option<&str>) -> Option<Self> {
        let name = name.trim();
        if name.is_empty() {
            return None;
        }

        let created_at = now();
        Some(Self {
            id: new_item_id(),
            name: name.to_string(),
            category: normalize_category(category),
            collected: false,
            created_at,
            updated_at: created_at,
        })
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn category(&self) -> Option<&str> {
        self.category.as_deref()
    }

    /// The category as a vocabulary value, if it is one.
    pub fn known_category(&self) -> Option<Category> {
        self.category.as_deref().and_then(Category::from_label)
    }

    pub fn is_collected(&self) -> bool {
        self.collected
    }

    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    pub fn updated_at(&self) -> DateTime<Utc> {
        self.updated_at
    }

    /// Case-insensitive substring match on name or category.
    /// `needle` must already be lowercase.
    pub(crate) fn matches_search(&self, needle: &str) -> bool {
        if needle.is_empty() {
            return true;
        }
        self.name.to_lowercase().contains(needle)
            || self
                .category
                .as_deref()
                .is_some_and(|category| category.to_lowercase().contains(needle))
    }

    pub(crate) fn toggle(&mut self) {
        self.collected = !self.collected;
        self.touch();
    }

    pub(crate) fn apply(&mut self, patch: ItemPatch) {
        if let Some(name) = patch.name {
            let name = name.trim();
            if !name.is_empty() {
                self.name = name.to_string();
            }
        }
        if let Some(category) = patch.category {
            self.category = normalize_category(category.as_deref());
        }
        self.touch();
    }

    fn touch(&mut self) {
        self.updated_at = now().max(self.created_at);
    }
}

/// Partial update for an item's user-editable fields.
///
/// `category` is doubly optional: `None` leaves it alone, `Some(None)`
/// removes it.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ItemPatch {
    pub name: Option<String>,
    pub category: Option<Option<String>>,
}

impl ItemPatch {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    pub fn category(mut self, category: impl Into<String>) -> Self {
        self.category = Some(Some(category.into()));
        self
    }

    pub fn clear_category(mut self) -> Self {
        self.category = Some(None);
        self
    }

    pub fn is_empty(&self) -> bool {
        self.name.is_none() && self.category.is_none()
    }
}

// ============================================================================
// Filter
// ============================================================================

/// Which items a view shows.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Filter {
    #[default]
    All,
    Pending,
    Collected,
}

impl Filter {
    pub const ALL: [Filter; 3] = [Filter::All, Filter::Pending, Filter::Collected];

    pub fn matches(&self, item: &Item) -> bool {
        match self {
            Filter::All => true,
            Filter::Pending => !item.is_collected(),
            Filter::Collected => item.is_collected(),
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Filter::All => "all",
            Filter::Pending => "pending",
            Filter::Collected => "collected",
        }
    }
}

impl fmt::Display for Filter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for Filter {
    type Err = GroceryError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "all" => Ok(Filter::All),
            "pending" => Ok(Filter::Pending),
            "collected" => Ok(Filter::Collected),
            _ => Err(GroceryError::InvalidFilter(s.to_string())),
        }
    }
}

// ============================================================================
// Stats
// ============================================================================

/// Aggregate counts over the whole list, independent of filter and search.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Stats {
    pub total: usize,
    pub collected: usize,
    pub pending: usize,
    /// Integer percentage, rounded half up.
    pub completion_rate: u8,
}

impl Stats {
    /// `collected` is capped at `total`.
    pub fn new(total: usize, collected: usize) -> Self {
        let collected = collected.min(total);
        let completion_rate = if total == 0 {
            0
        } else {
            ((collected * 200 + total) / (total * 2)) as u8
        };

        Self {
            total,
            collected,
            pending: total - collected,
            completion_rate,
        }
    }

    pub fn is_complete(&self) -> bool {
        self.total > 0 && self.collected == self.total
    }

    pub fn has_collected(&self) -> bool {
        self.collected > 0
    }
}

/// ISO-8601 text with millisecond precision and a `Z` suffix.
mod iso_millis {
    use chrono::{DateTime, SecondsFormat, Utc};
    use serde::de::Error;
    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(
        value: &DateTime<Utc>,
        serializer: S,
    ) -> std::result::Result<S::Ok, S::Error> {
        serializer.serialize_str(&value.to_rfc3339_opts(SecondsFormat::Millis, true))
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(
        deserializer: D,
    ) -> std::result::Result<DateTime<Utc>, D::Error> {
        let raw = String::deserialize(deserializer)?;
        DateTime::parse_from_rfc3339(&raw)
            .map(|ts| ts.with_timezone(&Utc))
            .map_err(D::Error::custom)
    }
}
