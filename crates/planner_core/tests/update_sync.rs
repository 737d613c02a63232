use std::sync::Once;

use planner_core::{
    update, AppState, Effect, FieldName, HistoryMode, Msg, RequestId, SyncPhase, SyncStatus,
};
use pretty_assertions::assert_eq;

fn init_logging() {
    static INIT: Once = Once::new();
    INIT.call_once(planner_logging::initialize_for_tests);
}

fn edit(state: AppState, field: FieldName, text: &str) -> (AppState, Vec<Effect>) {
    update(
        state,
        Msg::FieldEdited {
            field,
            text: text.to_string(),
        },
    )
}

fn fetches(effects: &[Effect]) -> Vec<(RequestId, String)> {
    effects
        .iter()
        .filter_map(|effect| match effect {
            Effect::FetchPlan { request_id, path } => Some((*request_id, path.clone())),
            _ => None,
        })
        .collect()
}

fn loaded(state: AppState, request_id: RequestId, markup: &str) -> (AppState, Vec<Effect>) {
    update(
        state,
        Msg::PlanLoaded {
            request_id,
            markup: markup.to_string(),
        },
    )
}

#[test]
fn first_edit_pushes_location_and_fetches() {
    init_logging();
    let (state, effects) = edit(AppState::new(), FieldName::Targets, "gear");

    assert_eq!(
        effects,
        vec![
            Effect::WriteLocation {
                path: "/?target=gear&recipe=&external=".to_string(),
                mode: HistoryMode::Push,
            },
            Effect::FetchPlan {
                request_id: 1,
                path: "/plan?target=gear&recipe=&external=".to_string(),
            },
        ]
    );
    assert_eq!(
        state.sync_phase(),
        SyncPhase::InFlight {
            request_id: 1,
            pending: false
        }
    );
}

#[test]
fn bursts_coalesce_into_one_follow_up() {
    init_logging();
    let (state, first) = edit(AppState::new(), FieldName::Targets, "g");
    assert_eq!(fetches(&first).len(), 1);

    let mut state = state;
    for text in ["ge", "gea", "gear", "gear:2"] {
        let (next, effects) = edit(state, FieldName::Targets, text);
        assert!(effects.is_empty(), "no effects while in flight");
        state = next;
    }
    assert_eq!(state.view().status, SyncStatus::LoadingWithPending);

    let (state, effects) = loaded(state, 1, "<p>g</p>");
    assert_eq!(
        fetches(&effects),
        vec![(2, "/plan?target=gear%3A2&recipe=&external=".to_string())]
    );
    assert_eq!(state.view().plan_markup.as_deref(), Some("<p>g</p>"));

    let (state, effects) = loaded(state, 2, "<p>gear:2</p>");
    assert_eq!(fetches(&effects), Vec::new());
    assert!(state.is_idle());
    assert_eq!(state.view().plan_markup.as_deref(), Some("<p>gear:2</p>"));
}

#[test]
fn follow_up_reads_fields_at_dispatch_time() {
    init_logging();
    let (state, _) = edit(AppState::new(), FieldName::Recipes, "bake");
    let (state, _) = edit(state, FieldName::Recipes, "bake@oven-1");
    // Programmatic edits while in flight are also coalesced.
    let (state, effects) = update(
        state,
        Msg::ReplaceRecipeMachine {
            recipe_name: "bake".to_string(),
            machine: "oven-2".to_string(),
        },
    );
    assert_eq!(
        effects,
        vec![Effect::SetFieldText {
            field: FieldName::Recipes,
            text: "bake@oven-2".to_string(),
        }]
    );

    let (_state, effects) = loaded(state, 1, "plan");
    assert_eq!(
        effects,
        vec![
            Effect::ReplacePlan {
                markup: "plan".to_string(),
            },
            Effect::WriteLocation {
                path: "/?target=&recipe=bake%40oven-2&external=".to_string(),
                mode: HistoryMode::Push,
            },
            Effect::FetchPlan {
                request_id: 2,
                path: "/plan?target=&recipe=bake%40oven-2&external=".to_string(),
            },
        ]
    );
}

#[test]
fn completion_without_pending_edits_goes_idle() {
    init_logging();
    let (state, _) = edit(AppState::new(), FieldName::Externals, "water");
    let (mut state, effects) = loaded(state, 1, "<div>ok</div>");

    assert_eq!(
        effects,
        vec![Effect::ReplacePlan {
            markup: "<div>ok</div>".to_string()
        }]
    );
    assert!(state.is_idle());
    assert!(state.consume_dirty());
    assert!(!state.consume_dirty());
}

#[test]
fn failure_releases_slot_and_honors_pending() {
    init_logging();
    let (state, _) = edit(AppState::new(), FieldName::Targets, "a");
    let (state, _) = loaded(state, 1, "<p>a</p>");
    let (state, _) = edit(state, FieldName::Targets, "b");
    let (state, effects) = edit(state, FieldName::Targets, "c");
    assert!(effects.is_empty());

    let (state, effects) = update(
        state,
        Msg::PlanFailed {
            request_id: 2,
            reason: "timeout".to_string(),
        },
    );

    let view = state.view();
    assert_eq!(view.plan_markup.as_deref(), Some("<p>a</p>"));
    assert_eq!(view.last_failure.as_deref(), Some("timeout"));
    assert_eq!(
        fetches(&effects),
        vec![(3, "/plan?target=c&recipe=&external=".to_string())]
    );

    let (state, _) = loaded(state, 3, "<p>c</p>");
    assert_eq!(state.view().last_failure, None);
    assert!(state.is_idle());
}

#[test]
fn failure_without_pending_goes_idle() {
    init_logging();
    let (state, _) = edit(AppState::new(), FieldName::Targets, "a");
    let (state, effects) = update(
        state,
        Msg::PlanFailed {
            request_id: 1,
            reason: "network error".to_string(),
        },
    );
    assert!(effects.is_empty());
    assert!(state.is_idle());
    assert_eq!(state.view().plan_markup, None);

    // The next edit is fetched right away.
    let (_state, effects) = edit(state, FieldName::Targets, "b");
    assert_eq!(fetches(&effects).len(), 1);
}

#[test]
fn stale_completion_is_ignored() {
    init_logging();
    let (state, _) = edit(AppState::new(), FieldName::Targets, "a");
    let (state, _) = edit(state, FieldName::Targets, "b");

    let (state, effects) = loaded(state, 7, "<p>stale</p>");
    assert!(effects.is_empty());
    assert_eq!(state.view().plan_markup, None);
    assert_eq!(
        state.sync_phase(),
        SyncPhase::InFlight {
            request_id: 1,
            pending: true
        }
    );
}

#[test]
fn markup_is_stored_verbatim() {
    let markup = "<table><tr><td>&lt;raw&gt;</td></tr></table>\n<script>x()</script>";
    let (state, _) = edit(AppState::new(), FieldName::Targets, "a");
    let (state, _) = loaded(state, 1, markup);
    assert_eq!(state.view().plan_markup.as_deref(), Some(markup));
}
