//! Analysis result types
//!
//! Shared by the CLI and the Web (WASM) front end:
//! - DetoxItem: one document detected on the desk
//! - DetoxResponse: one complete model reply (summary + items)
//! - Category / Visibility: the closed enumerations of the response schema
//! - Filter: the dashboard category selector

use serde::{Deserialize, Deserializer, Serialize};
use std::collections::HashSet;
use std::fmt;

use crate::error::AnalysisError;

/// Sentinel the model uses for dates it cannot read
pub const NO_DATE: &str = "N/A";

/// Urgency range the schema describes
pub const MIN_URGENCY: u8 = 1;
pub const MAX_URGENCY: u8 = 10;

/// What the user should do with a document
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Category {
    /// Needs an action (pay, call, sign)
    Action,
    /// Worth keeping, no deadline
    Archive,
    /// Advertising, empty envelopes, rubbish
    Trash,
}

impl Category {
    /// Every category, in dashboard order
    pub const ALL: [Category; 3] = [Category::Action, Category::Archive, Category::Trash];

    /// Wire value (`ACTION` / `ARCHIVE` / `TRASH`)
    pub fn as_str(&self) -> &'static str {
        match self {
            Category::Action => "ACTION",
            Category::Archive => "ARCHIVE",
            Category::Trash => "TRASH",
        }
    }

    /// Badge text shown on item cards
    pub fn badge_label(&self) -> &'static str {
        match self {
            Category::Action => "TO DO",
            Category::Archive => "KEEP",
            Category::Trash => "BIN",
        }
    }

    /// Label used in the category breakdown
    pub fn breakdown_label(&self) -> &'static str {
        match self {
            Category::Action => "Action required",
            Category::Archive => "To archive",
            Category::Trash => "Bin",
        }
    }

    /// Label used on the filter bar
    pub fn filter_label(&self) -> &'static str {
        match self {
            Category::Action => "Actions",
            Category::Archive => "Archive",
            Category::Trash => "Bin",
        }
    }

    /// CSS modifier for badges and chart segments
    pub fn css_class(&self) -> &'static str {
        match self {
            Category::Action => "category-action",
            Category::Archive => "category-archive",
            Category::Trash => "category-trash",
        }
    }

    /// Chart colour
    pub fn color(&self) -> &'static str {
        match self {
            Category::Action => "#ef4444",
            Category::Archive => "#3b82f6",
            Category::Trash => "#9ca3af",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for Category {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_uppercase().as_str() {
            "ACTION" => Ok(Category::Action),
            "ARCHIVE" => Ok(Category::Archive),
            "TRASH" => Ok(Category::Trash),
            _ => Err(format!("Unknown category: {}. Use action, archive, or trash", s)),
        }
    }
}

/// How legible the model judged a document to be
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Visibility {
    High,
    Medium,
    Low,
}

impl Visibility {
    pub fn as_str(&self) -> &'static str {
        match self {
            Visibility::High => "High",
            Visibility::Medium => "Medium",
            Visibility::Low => "Low",
        }
    }
}

/// One detected document
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DetoxItem {
    pub id: i64,

    /// Document kind (bill, letter, flyer, note)
    #[serde(rename = "type")]
    pub doc_type: String,

    pub sender: String,

    /// `YYYY-MM-DD` or `N/A`
    #[serde(default = "no_date")]
    pub extract_date: String,

    /// `YYYY-MM-DD` or `N/A`
    #[serde(default = "no_date")]
    pub deadline: String,

    #[serde(default)]
    pub amount: Option<String>,

    /// 1 (rubbish) .. 10 (due today); any integer is accepted and clamped
    #[serde(deserialize_with = "clamped_urgency")]
    pub urgency_score: u8,

    pub category: Category,

    pub action_suggested: String,

    #[serde(default)]
    pub visibility: Option<Visibility>,

    /// Local-only state, never sent by the model
    #[serde(rename = "isPaid", default)]
    pub is_paid: bool,
}

fn no_date() -> String {
    NO_DATE.to_string()
}

fn clamp_urgency(score: i64) -> u8 {
    // in range after the clamp, so the cast is lossless
    score.clamp(MIN_URGENCY as i64, MAX_URGENCY as i64) as u8
}

fn clamped_urgency<'de, D: Deserializer<'de>>(deserializer: D) -> Result<u8, D::Error> {
    i64::deserialize(deserializer).map(clamp_urgency)
}

impl DetoxItem {
    /// Minimal item, mainly for tests and stubs
    pub fn new(id: i64, category: Category) -> Self {
        Self {
            id,
            doc_type: String::new(),
            sender: String::new(),
            extract_date: no_date(),
            deadline: no_date(),
            amount: None,
            urgency_score: 1,
            category,
            action_suggested: String::new(),
            visibility: None,
            is_paid: false,
        }
    }

    /// ACTION item that has not been paid yet
    pub fn is_outstanding(&self) -> bool {
        self.category == Category::Action && !self.is_paid
    }

    /// Deadline, unless it is the `N/A` sentinel or blank
    pub fn deadline(&self) -> Option<&str> {
        let d = self.deadline.trim();
        if d.is_empty() || d == NO_DATE {
            None
        } else {
            Some(d)
        }
    }

    /// Amount, unless blank
    pub fn amount(&self) -> Option<&str> {
        self.amount.as_deref().map(str::trim).filter(|a| !a.is_empty())
    }
}

/// One analysis result
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DetoxResponse {
    pub summary: String,
    pub items: Vec<DetoxItem>,
}

impl DetoxResponse {
    /// Enforce the invariants serde cannot: unique ids, urgency in 1..=10
    ///
    /// Applies to model replies and to saved results alike. Payment state is
    /// left untouched.
    pub fn validate(&mut self) -> Result<(), AnalysisError> {
        let mut seen = HashSet::new();
        for item in &mut self.items {
            if !seen.insert(item.id) {
                return Err(AnalysisError::Parse(format!("duplicate item id {}", item.id)));
            }
            item.urgency_score = item.urgency_score.clamp(MIN_URGENCY, MAX_URGENCY);
        }
        Ok(())
    }
}

/// Dashboard category selector
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Filter {
    #[default]
    All,
    Category(Category),
}

impl Filter {
    /// Every selector, in filter-bar order
    pub const ALL: [Filter; 4] = [
        Filter::All,
        Filter::Category(Category::Action),
        Filter::Category(Category::Archive),
        Filter::Category(Category::Trash),
    ];

    pub fn matches(&self, item: &DetoxItem) -> bool {
        match self {
            Filter::All => true,
            Filter::Category(c) => item.category == *c,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Filter::All => "All",
            Filter::Category(c) => c.filter_label(),
        }
    }

    /// Stable key for DOM ids and CLI values
    pub fn key(&self) -> &'static str {
        match self {
            Filter::All => "all",
            Filter::Category(Category::Action) => "action",
            Filter::Category(Category::Archive) => "archive",
            Filter::Category(Category::Trash) => "trash",
        }
    }
}

impl std::str::FromStr for Filter {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.eq_ignore_ascii_case("all") {
            return Ok(Filter::All);
        }
        s.parse::<Category>().map(Filter::Category)
    }
}
