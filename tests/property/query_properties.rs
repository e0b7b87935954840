//! Property tests for view query parsing and task payload validation.
//!
//! Uses proptest to verify:
//! 1. Any query the navigation widgets can produce parses back to itself.
//! 2. Arbitrary query strings never panic the parser.
//! 3. Title validation agrees with the trim / length rules for any input.

use proptest::prelude::*;
use taskboard_proto::query::{ViewMode, ViewQuery};
use taskboard_proto::task::{
    MAX_TASK_TITLE_LENGTH, TaskPriority, TaskStatus, TitleError, validate_title,
};

fn arb_status() -> impl Strategy<Value = Option<TaskStatus>> {
    prop::option::of(prop::sample::select(TaskStatus::ALL.to_vec()))
}

fn arb_priority() -> impl Strategy<Value = Option<TaskPriority>> {
    prop::option::of(prop::sample::select(TaskPriority::ALL.to_vec()))
}

/// Queries as the UI writes them: search text is either empty or has
/// non-whitespace content.
fn arb_view_query() -> impl Strategy<Value = ViewQuery> {
    (
        any::<bool>(),
        prop_oneof![Just(String::new()), "[a-zA-Z0-9&=+%?# ]{0,16}[a-z]"],
        arb_status(),
        arb_priority(),
        any::<bool>(),
    )
        .prop_map(|(kanban, search, status, priority, form_open)| ViewQuery {
            view: if kanban { ViewMode::Kanban } else { ViewMode::List },
            search,
            status,
            priority,
            form_open,
        })
}

proptest! {
    #[test]
    fn written_queries_parse_back(query in arb_view_query()) {
        let encoded = query.to_query_string();
        prop_assert_eq!(ViewQuery::parse(&encoded), query);
    }

    #[test]
    fn parser_accepts_any_input(raw in "\\PC{0,64}") {
        let _ = ViewQuery::parse(&raw);
    }

    #[test]
    fn title_validation_matches_rules(title in "\\PC{0,300}") {
        let expected = if title.trim().is_empty() {
            Err(TitleError::Empty)
        } else if title.chars().count() > MAX_TASK_TITLE_LENGTH {
            Err(TitleError::TooLong)
        } else {
            Ok(())
        };
        prop_assert_eq!(validate_title(&title), expected);
    }
}
