//! Terminal dashboard
//!
//! Formats a `DashboardView` as plain text. All figures and redactions
//! come from the view; nothing here looks at the raw items.

use desk_detox_common::dashboard::{EMPTY_GRID_TEXT, EMPTY_PLAN_TEXT};
use desk_detox_common::{CardView, DashboardView};
use std::fmt::Write;

const BAR_WIDTH: usize = 20;

pub fn render(view: &DashboardView) -> String {
    let mut out = String::new();
    // writing to a String cannot fail
    let _ = render_into(&mut out, view);
    out
}

fn render_into(out: &mut String, view: &DashboardView) -> std::fmt::Result {
    writeln!(out, "📋 Analysis report")?;
    if !view.summary.is_empty() {
        writeln!(out, "   {}", view.summary)?;
    }
    writeln!(out)?;

    writeln!(
        out,
        "   Documents: {}   To pay: {}   Estimated total: {}   Max urgency: {}/10",
        view.document_count, view.outstanding_count, view.total_display, view.max_urgency
    )?;
    writeln!(out)?;

    render_breakdown(out, view)?;
    render_plan(out, view)?;
    render_cards(out, view)?;
    Ok(())
}

fn render_breakdown(out: &mut String, view: &DashboardView) -> std::fmt::Result {
    if view.breakdown.is_empty() {
        return Ok(());
    }

    writeln!(out, "── Overview")?;
    let total: usize = view.breakdown.iter().map(|c| c.count).sum();
    for entry in &view.breakdown {
        let filled = (entry.count * BAR_WIDTH).div_ceil(total.max(1));
        writeln!(
            out,
            "   {:<16} {:<width$} {}",
            entry.category.breakdown_label(),
            "█".repeat(filled),
            entry.count,
            width = BAR_WIDTH
        )?;
    }
    writeln!(out)
}

fn render_plan(out: &mut String, view: &DashboardView) -> std::fmt::Result {
    writeln!(out, "── Action plan")?;
    if view.plan.is_empty() {
        writeln!(out, "   {}", EMPTY_PLAN_TEXT)?;
    }
    for entry in &view.plan {
        write!(out, "   {}. {} ({})", entry.rank, entry.action, entry.sender)?;
        if let Some(deadline) = &entry.deadline {
            write!(out, " by {}", deadline)?;
        }
        writeln!(out)?;
    }
    writeln!(out)
}

fn render_cards(out: &mut String, view: &DashboardView) -> std::fmt::Result {
    writeln!(out, "── Documents [{}]", view.filter.label())?;
    if view.is_grid_empty() {
        writeln!(out, "   🔍 {}", EMPTY_GRID_TEXT)?;
        return Ok(());
    }
    for card in &view.cards {
        render_card(out, card, view.privacy)?;
    }
    Ok(())
}

fn render_card(out: &mut String, card: &CardView, privacy: bool) -> std::fmt::Result {
    write!(out, "   #{} [{}] {}", card.id, card.category.badge_label(), card.sender)?;
    if !card.doc_type.is_empty() {
        write!(out, " · {}", card.doc_type)?;
    }
    if card.urgent {
        write!(out, "  ⚠ URGENT")?;
    }
    if card.is_paid {
        write!(out, "  ✔ PAID")?;
    }
    if card.needs_review {
        write!(out, "  👁 check manually")?;
    }
    writeln!(out)?;

    let mut details = Vec::new();
    if let Some(deadline) = &card.deadline {
        details.push(format!("Due: {}", deadline));
    }
    if let Some(amount) = &card.amount {
        details.push(format!("Amount: {}", amount));
    }
    details.push(format!("Urgency: {}/10", card.urgency_score));
    writeln!(out, "      {}", details.join("   "))?;

    if !card.is_paid && !card.action_suggested.is_empty() {
        writeln!(out, "      → \"{}\"", card.action_suggested)?;
    }
    // the link spells out sender and amount
    match &card.calendar_url {
        Some(_) if privacy => writeln!(out, "      📅 calendar link hidden (privacy on)")?,
        Some(url) => writeln!(out, "      📅 {}", url)?,
        None => {}
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use desk_detox_common::dashboard::{REDACTED_AMOUNT, REDACTED_SENDER};
    use desk_detox_common::{
        Category, DetoxItem, DetoxResponse, DocumentStore, Filter, ViewOptions,
    };

    fn store() -> DocumentStore {
        let mut bill = DetoxItem::new(1, Category::Action);
        bill.sender = "Power Co".to_string();
        bill.doc_type = "Bill".to_string();
        bill.amount = Some("€45.00".to_string());
        bill.deadline = "2024-03-15".to_string();
        bill.urgency_score = 9;
        bill.action_suggested = "Pay by 15/03".to_string();

        let mut flyer = DetoxItem::new(2, Category::Trash);
        flyer.sender = "Pizza Place".to_string();

        DocumentStore::load(&DetoxResponse {
            summary: "Found 2 documents, 1 urgent".to_string(),
            items: vec![bill, flyer],
        })
    }

    #[test]
    fn test_render_private() {
        let view = DashboardView::build(&store(), Filter::All, &ViewOptions::default());
        let text = render(&view);

        assert!(text.contains("Found 2 documents, 1 urgent"));
        assert!(text.contains("Documents: 2"));
        assert!(text.contains("To pay: 1"));
        assert!(text.contains(REDACTED_SENDER));
        assert!(text.contains(REDACTED_AMOUNT));
        assert!(!text.contains("Power Co ·"));
        assert!(!text.contains("€45.00"));
        assert!(text.contains("URGENT"));
        assert!(text.contains("1. Pay by 15/03"));
        assert!(!text.contains("calendar.google.com"));
    }

    #[test]
    fn test_render_public() {
        let options = ViewOptions { privacy: false, reveal_image: false };
        let view = DashboardView::build(&store(), Filter::All, &options);
        let text = render(&view);

        assert!(text.contains("Power Co"));
        assert!(text.contains("Estimated total: €45.00"));
        assert!(text.contains("20240315T090000Z"));
    }

    #[test]
    fn test_render_empty_filter_shows_placeholder() {
        let view = DashboardView::build(
            &store(),
            Filter::Category(Category::Archive),
            &ViewOptions::default(),
        );
        let text = render(&view);
        assert!(text.contains("Documents [Archive]"));
        assert!(text.contains(EMPTY_GRID_TEXT));
    }

    #[test]
    fn test_render_no_actions() {
        let mut store = store();
        store.toggle_paid(1);
        let view = DashboardView::build(&store, Filter::All, &ViewOptions::default());
        let text = render(&view);
        assert!(text.contains(EMPTY_PLAN_TEXT));
        assert!(text.contains("PAID"));
    }
}
