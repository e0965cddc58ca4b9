//! Dashboard figures: headline cards and the category breakdown

use desk_detox_common::{CategoryCount, DashboardView};
use leptos::prelude::*;

#[component]
pub fn StatsRow(view: DashboardView) -> impl IntoView {
    view! {
        <div class="stats-row">
            <StatCard label="Documents" value=view.document_count.to_string() />
            <StatCard label="To pay" value=view.outstanding_count.to_string() />
            <StatCard label="Estimated total" value=view.total_display.clone() />
            <StatCard label="Max urgency" value=format!("{}/10", view.max_urgency) />
        </div>
    }
}

#[component]
fn StatCard(label: &'static str, value: String) -> impl IntoView {
    view! {
        <div class="stat-card">
            <span class="stat-value">{value}</span>
            <span class="stat-label">{label}</span>
        </div>
    }
}

#[component]
pub fn Breakdown(breakdown: Vec<CategoryCount>) -> impl IntoView {
    let total: usize = breakdown.iter().map(|c| c.count).sum();

    view! {
        <div class="breakdown">
            <h3>"Overview"</h3>
            {breakdown
                .into_iter()
                .map(|entry| {
                    let style = format!(
                        "width: {:.0}%; background: {}",
                        bar_percent(entry.count, total),
                        entry.category.color()
                    );
                    view! {
                        <div class="breakdown-row">
                            <span class="breakdown-label">{entry.category.breakdown_label()}</span>
                            <div class="breakdown-bar">
                                <div class="breakdown-fill" style=style />
                            </div>
                            <span class="breakdown-count">{entry.count}</span>
                        </div>
                    }
                })
                .collect_view()}
        </div>
    }
}

fn bar_percent(count: usize, total: usize) -> f64 {
    if total == 0 {
        0.0
    } else {
        count as f64 * 100.0 / total as f64
    }
}
