//! Dashboard derivations
//!
//! Pure functions of the working item list. Front ends only format what
//! these return; privacy redaction is applied here so no view can leak
//! a sender or an amount by accident.

use percent_encoding::{utf8_percent_encode, AsciiSet, NON_ALPHANUMERIC};

use crate::store::DocumentStore;
use crate::types::{Category, DetoxItem, Filter, Visibility};

/// Number of entries in the action plan
pub const PLAN_SIZE: usize = 5;

/// Urgency from which an unpaid ACTION item gets the urgent badge
pub const URGENT_THRESHOLD: u8 = 8;

pub const REDACTED_SENDER: &str = "•••••••";
pub const REDACTED_AMOUNT: &str = "€ ••••";

pub const EMPTY_GRID_TEXT: &str = "No documents found.";
pub const EMPTY_PLAN_TEXT: &str = "All clear! No urgent action required.";

const CALENDAR_BASE: &str = "https://calendar.google.com/calendar/render?action=TEMPLATE";

/// Characters `encodeURIComponent` leaves alone
const URI_COMPONENT: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'_')
    .remove(b'.')
    .remove(b'!')
    .remove(b'~')
    .remove(b'*')
    .remove(b'\'')
    .remove(b'(')
    .remove(b')');

/// Display toggles; the only state the renderer keeps
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ViewOptions {
    /// Mask senders and amounts (default on)
    pub privacy: bool,
    /// Show the original scan unblurred (default off)
    pub reveal_image: bool,
}

impl Default for ViewOptions {
    fn default() -> Self {
        Self { privacy: true, reveal_image: false }
    }
}

// =============================================
// Aggregates
// =============================================

/// Parse a display amount such as "€45.00" or "1.234,50 EUR"
///
/// Everything but digits, `.` and `,` is stripped, the first `,` becomes a
/// decimal point and the longest leading number is read. Anything
/// unreadable counts as 0.
pub fn parse_amount(raw: &str) -> f64 {
    let cleaned: String = raw
        .chars()
        .filter(|c| c.is_ascii_digit() || *c == '.' || *c == ',')
        .collect();
    let normalized = cleaned.replacen(',', ".", 1);

    let mut end = 0;
    let mut seen_dot = false;
    for (i, c) in normalized.char_indices() {
        match c {
            '0'..='9' => end = i + 1,
            '.' if !seen_dot => seen_dot = true,
            _ => break,
        }
    }

    normalized[..end].parse::<f64>().unwrap_or(0.0)
}

/// Sum of amounts still to pay (ACTION, unpaid)
pub fn total_outstanding(items: &[DetoxItem]) -> f64 {
    items
        .iter()
        .filter(|i| i.is_outstanding())
        .filter_map(|i| i.amount())
        .map(parse_amount)
        .sum()
}

/// Number of ACTION items not yet paid
pub fn outstanding_count(items: &[DetoxItem]) -> usize {
    items.iter().filter(|i| i.is_outstanding()).count()
}

/// Highest urgency among unpaid items, 0 when there are none
pub fn max_urgency(items: &[DetoxItem]) -> u8 {
    items
        .iter()
        .filter(|i| !i.is_paid)
        .map(|i| i.urgency_score)
        .max()
        .unwrap_or(0)
}

/// Unpaid ACTION items by urgency (descending, stable), top 5
pub fn action_plan(items: &[DetoxItem]) -> Vec<&DetoxItem> {
    let mut plan: Vec<&DetoxItem> = items.iter().filter(|i| i.is_outstanding()).collect();
    plan.sort_by(|a, b| b.urgency_score.cmp(&a.urgency_score));
    plan.truncate(PLAN_SIZE);
    plan
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CategoryCount {
    pub category: Category,
    pub count: usize,
}

/// Items per category; empty categories are left out
pub fn category_breakdown(items: &[DetoxItem]) -> Vec<CategoryCount> {
    Category::ALL
        .iter()
        .map(|&category| CategoryCount {
            category,
            count: items.iter().filter(|i| i.category == category).count(),
        })
        .filter(|c| c.count > 0)
        .collect()
}

// =============================================
// Per-item presentation
// =============================================

pub fn display_sender(item: &DetoxItem, options: &ViewOptions) -> String {
    if options.privacy {
        REDACTED_SENDER.to_string()
    } else {
        item.sender.clone()
    }
}

pub fn display_amount(item: &DetoxItem, options: &ViewOptions) -> Option<String> {
    let amount = item.amount()?;
    Some(if options.privacy {
        REDACTED_AMOUNT.to_string()
    } else {
        amount.to_string()
    })
}

pub fn format_total(total: f64, options: &ViewOptions) -> String {
    if options.privacy {
        REDACTED_AMOUNT.to_string()
    } else {
        format!("€{:.2}", total)
    }
}

pub fn is_urgent(item: &DetoxItem) -> bool {
    item.is_outstanding() && item.urgency_score >= URGENT_THRESHOLD
}

/// Low-legibility documents are flagged for a manual check
pub fn needs_review(item: &DetoxItem) -> bool {
    item.visibility == Some(Visibility::Low)
}

/// `YYYY-MM-DD`, digits only; no calendar validation
pub fn is_iso_date(s: &str) -> bool {
    let b = s.as_bytes();
    b.len() == 10
        && b.iter().enumerate().all(|(i, c)| match i {
            4 | 7 => *c == b'-',
            _ => c.is_ascii_digit(),
        })
}

/// One-hour calendar event (09:00-10:00 UTC) on the deadline
///
/// Only unpaid ACTION items with a well-formed deadline get a link.
/// The link carries the real sender and amount: it leaves the app only
/// when the user opens it.
pub fn calendar_link(item: &DetoxItem) -> Option<String> {
    if !item.is_outstanding() {
        return None;
    }
    let deadline = item.deadline()?;
    if !is_iso_date(deadline) {
        return None;
    }

    let day = deadline.replace('-', "");
    let title = format!("Pay {}", item.sender);
    let details = format!(
        "Amount: {}\nNote: {}\nCreated by Desk Detox",
        item.amount().unwrap_or("N/A"),
        item.action_suggested
    );

    Some(format!(
        "{}&text={}&dates={day}T090000Z/{day}T100000Z&details={}",
        CALENDAR_BASE,
        utf8_percent_encode(&title, URI_COMPONENT),
        utf8_percent_encode(&details, URI_COMPONENT),
    ))
}

// =============================================
// View models
// =============================================

/// Everything an item card shows, already redacted
#[derive(Debug, Clone, PartialEq)]
pub struct CardView {
    pub id: i64,
    pub category: Category,
    pub sender: String,
    pub doc_type: String,
    pub deadline: Option<String>,
    pub amount: Option<String>,
    pub action_suggested: String,
    pub urgency_score: u8,
    pub is_paid: bool,
    pub urgent: bool,
    pub needs_review: bool,
    pub calendar_url: Option<String>,
    /// Paid toggle is only offered on ACTION items
    pub can_toggle_paid: bool,
    /// Archive is not offered on items already archived
    pub can_archive: bool,
}

impl CardView {
    pub fn new(item: &DetoxItem, options: &ViewOptions) -> Self {
        Self {
            id: item.id,
            category: item.category,
            sender: display_sender(item, options),
            doc_type: item.doc_type.clone(),
            deadline: item.deadline().map(str::to_string),
            amount: display_amount(item, options),
            action_suggested: item.action_suggested.clone(),
            urgency_score: item.urgency_score,
            is_paid: item.is_paid,
            urgent: is_urgent(item),
            needs_review: needs_review(item),
            calendar_url: calendar_link(item),
            can_toggle_paid: item.category == Category::Action,
            can_archive: item.category != Category::Archive,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct PlanEntry {
    /// 1-based
    pub rank: usize,
    pub id: i64,
    pub action: String,
    pub sender: String,
    pub deadline: Option<String>,
}

/// Complete dashboard derivation for one render
#[derive(Debug, Clone, PartialEq)]
pub struct DashboardView {
    pub summary: String,
    pub filter: Filter,
    /// Redaction was applied to senders and amounts
    pub privacy: bool,
    pub document_count: usize,
    pub outstanding_count: usize,
    pub total: f64,
    pub total_display: String,
    pub max_urgency: u8,
    pub plan: Vec<PlanEntry>,
    pub breakdown: Vec<CategoryCount>,
    /// Items passing the filter; empty means the grid shows its placeholder
    pub cards: Vec<CardView>,
}

impl DashboardView {
    pub fn build(store: &DocumentStore, filter: Filter, options: &ViewOptions) -> Self {
        let items = store.items();
        let total = total_outstanding(items);

        let plan = action_plan(items)
            .into_iter()
            .enumerate()
            .map(|(idx, item)| PlanEntry {
                rank: idx + 1,
                id: item.id,
                action: item.action_suggested.clone(),
                sender: display_sender(item, options),
                deadline: item.deadline().map(str::to_string),
            })
            .collect();

        let cards = store
            .filter(filter)
            .into_iter()
            .map(|item| CardView::new(item, options))
            .collect();

        Self {
            summary: store.summary().to_string(),
            filter,
            privacy: options.privacy,
            document_count: items.len(),
            outstanding_count: outstanding_count(items),
            total,
            total_display: format_total(total, options),
            max_urgency: max_urgency(items),
            plan,
            breakdown: category_breakdown(items),
            cards,
        }
    }

    pub fn is_grid_empty(&self) -> bool {
        self.cards.is_empty()
    }
}
