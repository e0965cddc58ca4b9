//! Results dashboard
//!
//! Everything shown comes from a `DashboardView`; the buttons only report
//! item ids back up to the app, which owns the working copy.

use super::stats::{Breakdown, StatsRow};
use desk_detox_common::dashboard::{EMPTY_GRID_TEXT, EMPTY_PLAN_TEXT};
use desk_detox_common::{CardView, DashboardView, Filter, PlanEntry, ViewOptions};
use leptos::prelude::*;

#[component]
pub fn Dashboard(
    view: Memo<Option<DashboardView>>,
    filter: RwSignal<Filter>,
    options: RwSignal<ViewOptions>,
    #[prop(into)] preview: Signal<Option<String>>,
    on_delete: Callback<i64>,
    on_archive: Callback<i64>,
    on_toggle_paid: Callback<i64>,
) -> impl IntoView {
    view! {
        <div class="dashboard">
            {move || {
                view.get()
                    .map(|v| {
                        view! {
                            <section class="summary">
                                <p>{v.summary.clone()}</p>
                            </section>
                            <StatsRow view=v.clone() />
                            <div class="dashboard-columns">
                                <ActionPlan plan=v.plan.clone() />
                                <Breakdown breakdown=v.breakdown.clone() />
                            </div>
                        }
                    })
            }}

            <div class="toolbar">
                <FilterBar filter=filter />
                <label class="toggle">
                    <input
                        type="checkbox"
                        prop:checked=move || options.get().privacy
                        on:change=move |_| options.update(|o| o.privacy = !o.privacy)
                    />
                    "Privacy mode"
                </label>
            </div>

            {move || {
                view.get()
                    .map(|v| {
                        if v.is_grid_empty() {
                            view! { <p class="empty-state">"🔍 " {EMPTY_GRID_TEXT}</p> }.into_any()
                        } else {
                            view! {
                                <div class="card-grid">
                                    {v.cards
                                        .into_iter()
                                        .map(|card| {
                                            view! {
                                                <ItemCard
                                                    card=card
                                                    on_delete=on_delete
                                                    on_archive=on_archive
                                                    on_toggle_paid=on_toggle_paid
                                                />
                                            }
                                        })
                                        .collect_view()}
                                </div>
                            }
                                .into_any()
                        }
                    })
            }}

            <ScanPreview preview=preview options=options />
        </div>
    }
}

#[component]
fn ActionPlan(plan: Vec<PlanEntry>) -> impl IntoView {
    let body = if plan.is_empty() {
        view! { <p class="text-muted">{EMPTY_PLAN_TEXT}</p> }.into_any()
    } else {
        view! {
            <ol>
                {plan
                    .into_iter()
                    .map(|entry| {
                        view! {
                            <li>
                                <strong>{entry.action}</strong>
                                " "
                                <span class="text-muted">{entry.sender}</span>
                                {entry.deadline.map(|d| view! { <span class="deadline">" · " {d}</span> })}
                            </li>
                        }
                    })
                    .collect_view()}
            </ol>
        }
        .into_any()
    };

    view! {
        <div class="action-plan">
            <h3>"Action plan"</h3>
            {body}
        </div>
    }
}

#[component]
fn FilterBar(filter: RwSignal<Filter>) -> impl IntoView {
    view! {
        <div class="filter-bar">
            {Filter::ALL
                .into_iter()
                .map(|f| {
                    view! {
                        <button
                            id=format!("filter-{}", f.key())
                            class=move || {
                                if filter.get() == f { "btn btn-filter active" } else { "btn btn-filter" }
                            }
                            on:click=move |_| filter.set(f)
                        >
                            {f.label()}
                        </button>
                    }
                })
                .collect_view()}
        </div>
    }
}

#[component]
fn ItemCard(
    card: CardView,
    on_delete: Callback<i64>,
    on_archive: Callback<i64>,
    on_toggle_paid: Callback<i64>,
) -> impl IntoView {
    let id = card.id;
    let class = card_class(&card);
    let details = card_details(&card);
    let show_action = !card.is_paid && !card.action_suggested.is_empty();

    view! {
        <article class=class>
            <header class="card-header">
                <span class=format!("badge {}", card.category.css_class())>
                    {card.category.badge_label()}
                </span>
                {card.urgent.then(|| view! { <span class="badge badge-urgent">"URGENT"</span> })}
                {card.is_paid.then(|| view! { <span class="badge badge-paid">"PAID"</span> })}
                {card.needs_review.then(|| view! { <span class="badge badge-review">"Check manually"</span> })}
            </header>

            <h4 class="card-sender">{card.sender.clone()}</h4>
            <p class="text-muted">{card.doc_type.clone()}</p>
            <p class="card-details">{details}</p>
            {show_action.then(|| view! { <p class="card-action">"→ " {card.action_suggested.clone()}</p> })}

            <footer class="card-actions">
                {card
                    .can_toggle_paid
                    .then(|| {
                        let label = if card.is_paid { "Mark unpaid" } else { "Mark paid" };
                        view! {
                            <button class="btn btn-small" on:click=move |_| on_toggle_paid.run(id)>
                                {label}
                            </button>
                        }
                    })}
                {card
                    .can_archive
                    .then(|| {
                        view! {
                            <button class="btn btn-small btn-secondary" on:click=move |_| on_archive.run(id)>
                                "Archive"
                            </button>
                        }
                    })}
                <button class="btn btn-small btn-tertiary" on:click=move |_| on_delete.run(id)>
                    "Delete"
                </button>
                {card
                    .calendar_url
                    .clone()
                    .map(|url| {
                        view! {
                            <a class="btn btn-small" href=url target="_blank" rel="noopener noreferrer">
                                "📅 Add to calendar"
                            </a>
                        }
                    })}
            </footer>
        </article>
    }
}

/// Original scan, blurred until revealed
#[component]
fn ScanPreview(preview: Signal<Option<String>>, options: RwSignal<ViewOptions>) -> impl IntoView {
    view! {
        <div class="scan-preview-slot">
            {move || {
                preview.get().map(|src| {
                    let revealed = options.get().reveal_image;
                    view! {
                        <section class="scan-preview">
                            <img class={if revealed { "preview" } else { "preview blurred" }} src=src alt="Original scan" />
                            <button
                                class="btn btn-small btn-secondary"
                                on:click=move |_| options.update(|o| o.reveal_image = !o.reveal_image)
                            >
                                {if revealed { "Hide scan" } else { "Show scan" }}
                            </button>
                        </section>
                    }
                })
            }}
        </div>
    }
}

fn card_class(card: &CardView) -> String {
    let mut classes = vec!["item-card", card.category.css_class()];
    if card.urgent {
        classes.push("urgent");
    }
    if card.is_paid {
        classes.push("paid");
    }
    classes.join(" ")
}

fn card_details(card: &CardView) -> String {
    let mut parts = Vec::new();
    if let Some(deadline) = &card.deadline {
        parts.push(format!("Due {}", deadline));
    }
    if let Some(amount) = &card.amount {
        parts.push(amount.clone());
    }
    parts.push(format!("Urgency {}/10", card.urgency_score));
    parts.join(" · ")
}
