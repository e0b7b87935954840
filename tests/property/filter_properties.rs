//! Property tests for the search and filter controller.
//!
//! Uses proptest to verify:
//! 1. Filtering keeps input order and returns a subsequence of the input.
//! 2. Every returned task satisfies every criterion, and every dropped task
//!    fails at least one.
//! 3. Search is case-insensitive.
//! 4. Combined criteria equal the intersection of the single criteria.
//! 5. Lane grouping partitions the visible tasks.

use proptest::prelude::*;
use taskboard::filter::{TaskFilter, filter_tasks, lanes};
use taskboard_proto::task::{Task, TaskId, TaskPriority, TaskStatus};

fn arb_status() -> impl Strategy<Value = TaskStatus> {
    prop::sample::select(TaskStatus::ALL.to_vec())
}

fn arb_priority() -> impl Strategy<Value = TaskPriority> {
    prop::sample::select(TaskPriority::ALL.to_vec())
}

fn arb_tasks() -> impl Strategy<Value = Vec<Task>> {
    prop::collection::vec(("[a-zA-Z ]{1,12}", arb_status(), arb_priority()), 0..24).prop_map(
        |rows| {
            rows.into_iter()
                .zip(1..)
                .map(|((title, status, priority), id)| Task {
                    id: TaskId::new(id),
                    title,
                    status,
                    priority,
                })
                .collect()
        },
    )
}

fn arb_filter() -> impl Strategy<Value = TaskFilter> {
    (
        "[a-zA-Z]{0,3}",
        prop::option::of(arb_status()),
        prop::option::of(arb_priority()),
    )
        .prop_map(|(search, status, priority)| TaskFilter {
            search,
            status,
            priority,
        })
}

fn ids(tasks: &[&Task]) -> Vec<TaskId> {
    tasks.iter().map(|t| t.id).collect()
}

proptest! {
    #[test]
    fn result_is_ordered_subsequence(tasks in arb_tasks(), filter in arb_filter()) {
        let result = ids(&filter_tasks(&tasks, &filter));
        let mut input = tasks.iter().map(|t| t.id);
        for id in &result {
            prop_assert!(input.any(|candidate| candidate == *id));
        }
    }

    #[test]
    fn kept_tasks_match_and_dropped_tasks_do_not(tasks in arb_tasks(), filter in arb_filter()) {
        let kept = ids(&filter_tasks(&tasks, &filter));
        for task in &tasks {
            prop_assert_eq!(kept.contains(&task.id), filter.matches(task));
        }
    }

    #[test]
    fn search_ignores_case(tasks in arb_tasks(), search in "[a-zA-Z]{1,3}") {
        let lower = TaskFilter { search: search.to_lowercase(), ..TaskFilter::default() };
        let upper = TaskFilter { search: search.to_uppercase(), ..TaskFilter::default() };
        prop_assert_eq!(
            ids(&filter_tasks(&tasks, &lower)),
            ids(&filter_tasks(&tasks, &upper))
        );
    }

    #[test]
    fn criteria_combine_as_intersection(tasks in arb_tasks(), filter in arb_filter()) {
        let by_search = ids(&filter_tasks(
            &tasks,
            &TaskFilter { search: filter.search.clone(), ..TaskFilter::default() },
        ));
        let by_status = ids(&filter_tasks(
            &tasks,
            &TaskFilter { status: filter.status, ..TaskFilter::default() },
        ));
        let by_priority = ids(&filter_tasks(
            &tasks,
            &TaskFilter { priority: filter.priority, ..TaskFilter::default() },
        ));
        let expected: Vec<TaskId> = by_search
            .into_iter()
            .filter(|id| by_status.contains(id) && by_priority.contains(id))
            .collect();
        prop_assert_eq!(ids(&filter_tasks(&tasks, &filter)), expected);
    }

    #[test]
    fn lanes_partition_visible_tasks(tasks in arb_tasks(), filter in arb_filter()) {
        let visible = filter_tasks(&tasks, &filter);
        let grouped = lanes(&visible);
        let total: usize = grouped.iter().map(Vec::len).sum();
        prop_assert_eq!(total, visible.len());
        for (lane, cards) in grouped.iter().enumerate() {
            prop_assert!(cards.iter().all(|t| t.priority.lane() == lane));
        }
    }
}
