//! Interactive review
//!
//! Shows the dashboard and reads one short command at a time:
//! `d 3` deletes item 3, `a 3` archives it, `p 3` toggles paid,
//! `f action` switches the list filter, `v` toggles privacy, `q` ends.

use crate::error::Result;
use crate::report;
use desk_detox_common::{DashboardView, DocumentStore, Filter, ViewOptions};
use dialoguer::Input;

const PROMPT: &str = "Command (d <id>:delete a <id>:archive p <id>:paid f <filter> v:privacy q:done)";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReviewAction {
    Delete(i64),
    Archive(i64),
    TogglePaid(i64),
    Filter(Filter),
    TogglePrivacy,
    Done,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    Updated,
    /// Unknown id, or the action does not apply to that item
    Ignored,
    Done,
}

/// What the review screen shows besides the items
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ReviewState {
    pub filter: Filter,
    pub options: ViewOptions,
}

pub fn parse_command(input: &str) -> std::result::Result<ReviewAction, String> {
    let mut parts = input.split_whitespace();
    let Some(command) = parts.next() else {
        return Err("empty command".to_string());
    };
    let arg = parts.next();
    if parts.next().is_some() {
        return Err(format!("too many arguments: {}", input.trim()));
    }

    let id = || -> std::result::Result<i64, String> {
        arg.ok_or_else(|| format!("'{}' needs an item id", command))?
            .trim_start_matches('#')
            .parse::<i64>()
            .map_err(|_| format!("not an item id: {}", arg.unwrap_or_default()))
    };

    match command {
        "d" | "delete" => Ok(ReviewAction::Delete(id()?)),
        "a" | "archive" => Ok(ReviewAction::Archive(id()?)),
        "p" | "paid" => Ok(ReviewAction::TogglePaid(id()?)),
        "f" | "filter" => arg
            .unwrap_or("all")
            .parse::<Filter>()
            .map(ReviewAction::Filter),
        "v" | "privacy" => Ok(ReviewAction::TogglePrivacy),
        "q" | "done" | "quit" => Ok(ReviewAction::Done),
        other => Err(format!("unknown command: {}", other)),
    }
}

pub fn apply(store: &mut DocumentStore, state: &mut ReviewState, action: ReviewAction) -> Outcome {
    let changed = match action {
        ReviewAction::Delete(id) => store.delete(id),
        ReviewAction::Archive(id) => store.archive(id),
        ReviewAction::TogglePaid(id) => store.toggle_paid(id),
        ReviewAction::Filter(filter) => {
            state.filter = filter;
            true
        }
        ReviewAction::TogglePrivacy => {
            state.options.privacy = !state.options.privacy;
            true
        }
        ReviewAction::Done => return Outcome::Done,
    };

    if changed {
        tracing::debug!(?action, "review action applied");
        Outcome::Updated
    } else {
        Outcome::Ignored
    }
}

/// Run the prompt loop until `q`; returns the final view state
pub fn run(store: &mut DocumentStore, mut state: ReviewState) -> Result<ReviewState> {
    loop {
        let view = DashboardView::build(store, state.filter, &state.options);
        println!("{}", report::render(&view));

        let input: String = Input::new()
            .with_prompt(PROMPT)
            .allow_empty(true)
            .interact_text()?;

        let action = match parse_command(&input) {
            Ok(action) => action,
            Err(e) if input.trim().is_empty() => {
                tracing::trace!(error = %e, "blank input");
                continue;
            }
            Err(e) => {
                println!("⚠ {}", e);
                continue;
            }
        };

        match apply(store, &mut state, action) {
            Outcome::Done => return Ok(state),
            Outcome::Updated => {}
            Outcome::Ignored => println!("⚠ Nothing to do for that item"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use desk_detox_common::{Category, DetoxItem, DetoxResponse};

    fn store() -> DocumentStore {
        DocumentStore::load(&DetoxResponse {
            summary: String::new(),
            items: vec![
                DetoxItem::new(1, Category::Action),
                DetoxItem::new(2, Category::Archive),
                DetoxItem::new(3, Category::Trash),
            ],
        })
    }

    fn state() -> ReviewState {
        ReviewState { filter: Filter::All, options: ViewOptions::default() }
    }

    #[test]
    fn test_parse_command() {
        assert_eq!(parse_command("d 3"), Ok(ReviewAction::Delete(3)));
        assert_eq!(parse_command("archive #2"), Ok(ReviewAction::Archive(2)));
        assert_eq!(parse_command(" p 1 "), Ok(ReviewAction::TogglePaid(1)));
        assert_eq!(
            parse_command("f trash"),
            Ok(ReviewAction::Filter(Filter::Category(Category::Trash)))
        );
        assert_eq!(parse_command("f"), Ok(ReviewAction::Filter(Filter::All)));
        assert_eq!(parse_command("v"), Ok(ReviewAction::TogglePrivacy));
        assert_eq!(parse_command("q"), Ok(ReviewAction::Done));
    }

    #[test]
    fn test_parse_command_errors() {
        assert!(parse_command("").is_err());
        assert!(parse_command("d").is_err());
        assert!(parse_command("d x").is_err());
        assert!(parse_command("d 1 2").is_err());
        assert!(parse_command("f paid").is_err());
        assert!(parse_command("z").is_err());
    }

    #[test]
    fn test_apply_item_actions() {
        let mut store = store();
        let mut state = state();

        assert_eq!(apply(&mut store, &mut state, ReviewAction::TogglePaid(1)), Outcome::Updated);
        assert!(store.get(1).map(|i| i.is_paid).unwrap_or(false));

        // paid toggle only exists for ACTION items
        assert_eq!(apply(&mut store, &mut state, ReviewAction::TogglePaid(3)), Outcome::Ignored);

        assert_eq!(apply(&mut store, &mut state, ReviewAction::Archive(3)), Outcome::Updated);
        assert_eq!(store.get(3).map(|i| i.category), Some(Category::Archive));

        assert_eq!(apply(&mut store, &mut state, ReviewAction::Delete(2)), Outcome::Updated);
        assert_eq!(apply(&mut store, &mut state, ReviewAction::Delete(2)), Outcome::Ignored);
        assert_eq!(store.len(), 2);
    }

    #[test]
    fn test_apply_view_actions() {
        let mut store = store();
        let mut state = state();

        apply(&mut store, &mut state, ReviewAction::TogglePrivacy);
        assert!(!state.options.privacy);

        let filter = Filter::Category(Category::Action);
        apply(&mut store, &mut state, ReviewAction::Filter(filter));
        assert_eq!(state.filter, filter);

        assert_eq!(apply(&mut store, &mut state, ReviewAction::Done), Outcome::Done);
        assert_eq!(store.len(), 3);
    }
}
