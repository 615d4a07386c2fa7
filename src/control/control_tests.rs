//! Unit tests for the select control state machine

#[cfg(test)]
mod tests {
    use crate::config::SelectConfig;
    use crate::control::{
        FetchKind, Phase, ResolveOutcome, SelectControl, StalePolicy, SyncOutcome,
    };
    use crate::model::SelectionValue;
    use crate::source::{FetchPage, FetchQuery};
    use crate::testing::{ChangeRecorder, ids, option, page};
    use pretty_assertions::assert_eq;

    fn single() -> (SelectControl, ChangeRecorder) {
        let recorder = ChangeRecorder::new();
        let control = SelectControl::new(
            &SelectConfig::default(),
            SelectionValue::Empty,
            recorder.handler(),
        );
        (control, recorder)
    }

    fn multi() -> (SelectControl, ChangeRecorder) {
        let recorder = ChangeRecorder::new();
        let control = SelectControl::new(
            &SelectConfig::default().with_multi(true),
            SelectionValue::Empty,
            recorder.handler(),
        );
        (control, recorder)
    }

    #[test]
    fn test_new_control_is_closed() {
        let (control, recorder) = single();

        assert_eq!(control.phase(), Phase::Closed);
        assert_eq!(control.page(), 1);
        assert!(control.options().is_empty());
        assert!(control.latest_request().is_none());
        assert_eq!(recorder.count(), 0);
    }

    #[test]
    fn test_open_issues_first_page() {
        let (mut control, _) = single();

        let ticket = control.open().unwrap();

        assert_eq!(ticket.kind, FetchKind::Reset);
        assert_eq!(ticket.query, FetchQuery::first(""));
        assert_eq!(control.phase(), Phase::LoadingFirstPage);
        assert!(control.is_loading());
        assert!(control.open().is_none(), "second open is a no-op");
    }

    #[test]
    fn test_reset_result_makes_ready() {
        let (mut control, _) = single();
        let ticket = control.open().unwrap();

        let outcome = control.resolve(&ticket, page(&[1, 2], false));

        assert_eq!(outcome, ResolveOutcome::Replaced);
        assert_eq!(control.phase(), Phase::Ready);
        assert_eq!(ids(control.options()), vec!["1", "2"]);
        assert!(!control.can_load_more());
    }

    #[test]
    fn test_load_more_appends_and_advances_page() {
        let (mut control, _) = single();
        let first = control.open().unwrap();
        control.resolve(&first, page(&[1, 2], true));
        assert!(control.can_load_more());

        let more = control.load_more().unwrap();
        assert_eq!(more.kind, FetchKind::More);
        assert_eq!(more.query, FetchQuery::page("", 2));
        assert_eq!(control.phase(), Phase::LoadingMore);
        assert!(!control.can_load_more());

        assert_eq!(control.resolve(&more, page(&[3], false)), ResolveOutcome::Appended);
        assert_eq!(control.page(), 2);
        assert_eq!(ids(control.options()), vec!["1", "2", "3"]);
        assert_eq!(control.phase(), Phase::Ready);
        assert!(control.load_more().is_none());
    }

    #[test]
    fn test_load_more_is_not_guarded_against_repeats() {
        let (mut control, _) = single();
        let first = control.open().unwrap();
        control.resolve(&first, page(&[1], true));

        let a = control.load_more().unwrap();
        let b = control.load_more().unwrap();
        assert_eq!(a.query, b.query);
        assert_ne!(a.id, b.id);

        control.resolve(&a, page(&[2], true));
        control.resolve(&b, page(&[2], true));

        assert_eq!(ids(control.options()), vec!["1", "2", "2"]);
        assert_eq!(control.page(), 3);
    }

    #[test]
    fn test_load_more_requires_open_list() {
        let (mut control, _) = single();
        let first = control.open().unwrap();
        control.resolve(&first, page(&[1], true));
        control.close();

        assert!(control.load_more().is_none());
    }

    #[test]
    fn test_search_change_while_open_resets() {
        let (mut control, _) = single();
        let first = control.open().unwrap();
        control.resolve(&first, page(&[1], true));
        let more = control.load_more().unwrap();
        control.resolve(&more, page(&[2], false));

        let ticket = control.set_search("ban").unwrap();

        assert_eq!(ticket.query, FetchQuery::first("ban"));
        assert_eq!(control.page(), 1);
        assert!(control.options().is_empty());
        assert_eq!(control.phase(), Phase::LoadingFirstPage);
    }

    #[test]
    fn test_same_search_does_not_refetch() {
        let (mut control, _) = single();
        control.open();
        assert!(control.set_search("").is_none());
    }

    #[test]
    fn test_search_change_while_closed_defers_fetch() {
        let (mut control, _) = single();

        assert!(control.set_search("sur").is_none());
        assert_eq!(control.search(), "sur");

        let ticket = control.open().unwrap();
        assert_eq!(ticket.query, FetchQuery::first("sur"));
    }

    #[test]
    fn test_reopen_resets_accumulator() {
        let (mut control, _) = single();
        let first = control.open().unwrap();
        control.resolve(&first, page(&[1], true));
        let more = control.load_more().unwrap();
        control.resolve(&more, page(&[2], true));
        control.close();

        let again = control.open().unwrap();

        assert_eq!(again.query, FetchQuery::first(""));
        assert_eq!(control.page(), 1);
        assert!(control.options().is_empty());
    }

    #[test]
    fn test_toggle() {
        let (mut control, _) = single();
        assert!(control.toggle().is_some());
        assert!(control.is_open());
        assert!(control.toggle().is_none());
        assert!(!control.is_open());
    }

    #[test]
    fn test_old_search_result_resolving_last_wins() {
        let (mut control, _) = single();
        assert!(control.set_search("a").is_none());
        let old = control.open().unwrap();
        let new = control.set_search("ab").unwrap();

        control.resolve(&new, page(&[20, 21], false));
        control.resolve(&old, page(&[10], true));

        assert_eq!(ids(control.options()), vec!["10"]);
        assert!(control.has_more());
        assert_eq!(control.search(), "ab");
    }

    #[test]
    fn test_discard_stale_keeps_latest() {
        let recorder = ChangeRecorder::new();
        let mut control = SelectControl::new(
            &SelectConfig::default().with_stale_responses(StalePolicy::DiscardStale),
            SelectionValue::Empty,
            recorder.handler(),
        );
        let old = control.open().unwrap();
        let new = control.set_search("ab").unwrap();

        assert_eq!(control.resolve(&new, page(&[20], false)), ResolveOutcome::Replaced);
        assert_eq!(
            control.resolve(&old, page(&[10], true)),
            ResolveOutcome::DiscardedStale
        );
        assert_eq!(ids(control.options()), vec!["20"]);
    }

    #[test]
    fn test_search_change_during_load_more_appends_old_page() {
        let (mut control, _) = single();
        let first = control.open().unwrap();
        control.resolve(&first, page(&[1, 2], true));
        let more = control.load_more().unwrap();

        let reset = control.set_search("x").unwrap();
        control.resolve(&reset, page(&[9], false));
        assert_eq!(control.phase(), Phase::LoadingMore);

        assert_eq!(control.resolve(&more, page(&[3, 4], true)), ResolveOutcome::Appended);

        assert_eq!(ids(control.options()), vec!["9", "3", "4"]);
        assert_eq!(control.page(), 2);
        assert!(control.has_more());
        assert_eq!(control.phase(), Phase::Ready);
    }

    #[test]
    fn test_discard_stale_search_change_during_load_more() {
        let recorder = ChangeRecorder::new();
        let mut control = SelectControl::new(
            &SelectConfig::default().with_stale_responses(StalePolicy::DiscardStale),
            SelectionValue::Empty,
            recorder.handler(),
        );
        let first = control.open().unwrap();
        control.resolve(&first, page(&[1, 2], true));
        let more = control.load_more().unwrap();

        let reset = control.set_search("x").unwrap();
        assert!(!control.is_loading_more());
        control.resolve(&reset, page(&[9], true));
        assert_eq!(control.phase(), Phase::Ready);

        assert_eq!(
            control.resolve(&more, page(&[3, 4], true)),
            ResolveOutcome::DiscardedStale
        );
        assert_eq!(ids(control.options()), vec!["9"]);
        assert_eq!(control.page(), 1);
        assert_eq!(control.phase(), Phase::Ready);
        assert!(control.can_load_more());
    }

    #[test]
    fn test_discard_stale_reopen_during_load_more() {
        let recorder = ChangeRecorder::new();
        let mut control = SelectControl::new(
            &SelectConfig::default().with_stale_responses(StalePolicy::DiscardStale),
            SelectionValue::Empty,
            recorder.handler(),
        );
        let first = control.open().unwrap();
        control.resolve(&first, page(&[1, 2], true));
        let more = control.load_more().unwrap();
        control.close();

        let reopen = control.open().unwrap();
        control.resolve(&reopen, page(&[1, 2], true));
        control.resolve(&more, page(&[3], false));

        assert_eq!(control.phase(), Phase::Ready);
        assert_eq!(ids(control.options()), vec!["1", "2"]);
        assert!(control.can_load_more());
    }

    #[test]
    fn test_result_after_close_still_lands() {
        let (mut control, _) = single();
        let ticket = control.open().unwrap();
        control.close();

        control.resolve(&ticket, page(&[1], false));

        assert_eq!(control.phase(), Phase::Closed);
        assert_eq!(ids(control.options()), vec!["1"]);
        assert!(!control.is_loading());
    }

    #[test]
    fn test_single_select_notifies_and_closes() {
        let (mut control, recorder) = single();
        let ticket = control.open().unwrap();
        control.resolve(&ticket, page(&[1, 2], false));

        assert!(control.select(option(1)));

        assert_eq!(recorder.calls(), vec![SelectionValue::One(option(1))]);
        assert!(!control.is_open());
        assert_eq!(control.selection_text().as_deref(), Some("Option 1"));
        assert!(control.is_selected(&option(1)));
    }

    #[test]
    fn test_single_reselect_still_notifies() {
        let (mut control, recorder) = single();
        control.open();
        control.select(option(1));
        control.open();
        control.select(option(1));

        assert_eq!(recorder.count(), 2);
        assert_eq!(control.selected(), &SelectionValue::One(option(1)));
        assert!(!control.is_open());
    }

    #[test]
    fn test_multi_toggle_sequence() {
        let (mut control, recorder) = multi();
        control.open();

        control.select(option(1));
        control.select(option(2));
        control.select(option(1));

        assert_eq!(
            recorder.calls(),
            vec![
                SelectionValue::Many(vec![option(1)]),
                SelectionValue::Many(vec![option(1), option(2)]),
                SelectionValue::Many(vec![option(2)]),
            ]
        );
        assert!(control.is_open(), "multi picks keep the list open");
        assert_eq!(control.selection_text().as_deref(), Some("Option 2"));
    }

    #[test]
    fn test_clear_notifies_without_fetch() {
        let (mut control, recorder) = single();
        control.select(option(1));
        let latest = control.latest_request();

        assert!(control.clear());

        assert_eq!(recorder.calls().last(), Some(&SelectionValue::Empty));
        assert_eq!(control.selected(), &SelectionValue::Empty);
        assert_eq!(control.latest_request(), latest);
        assert!(control.selection_text().is_none());
    }

    #[test]
    fn test_sync_value_overrides_local_pick() {
        let (mut control, _) = single();
        control.select(option(1));
        assert!(control.has_pending_change());

        assert_eq!(control.sync_value(SelectionValue::Empty), SyncOutcome::Reverted);
        assert_eq!(control.selected(), &SelectionValue::Empty);

        control.select(option(2));
        assert_eq!(
            control.sync_value(SelectionValue::One(option(2))),
            SyncOutcome::Confirmed
        );
        assert!(!control.has_pending_change());
    }

    #[test]
    fn test_initial_value_is_shown() {
        let recorder = ChangeRecorder::new();
        let control = SelectControl::new(
            &SelectConfig::default(),
            SelectionValue::One(option(9)),
            recorder.handler(),
        );

        assert_eq!(control.selection_text().as_deref(), Some("Option 9"));
    }

    #[test]
    fn test_disabled_ignores_interaction() {
        let recorder = ChangeRecorder::new();
        let mut control = SelectControl::new(
            &SelectConfig::default().with_disabled(true),
            SelectionValue::Empty,
            recorder.handler(),
        );

        assert!(control.open().is_none());
        assert!(!control.select(option(1)));
        assert!(!control.clear());
        assert_eq!(recorder.count(), 0);
        assert!(control.is_disabled());
    }

    #[test]
    fn test_snapshot_serializes_camel_case() {
        let (mut control, _) = single();
        let ticket = control.open().unwrap();
        control.resolve(&ticket, FetchPage::new(vec![option(1)], true));

        let json = serde_json::to_value(control.snapshot()).unwrap();

        assert_eq!(json["hasMore"], serde_json::json!(true));
        assert_eq!(json["loadingMore"], serde_json::json!(false));
        assert_eq!(json["selected"], serde_json::Value::Null);
        assert_eq!(json["options"][0]["label"], serde_json::json!("Option 1"));
    }
}
