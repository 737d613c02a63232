use planner_core::{update, AppState, Effect, FieldName, Msg};

fn settled_state(location: &str) -> AppState {
    let (state, _) = update(
        AppState::new(),
        Msg::Bootstrap {
            location: location.to_string(),
        },
    );
    let (state, _) = update(
        state,
        Msg::PlanLoaded {
            request_id: 1,
            markup: String::new(),
        },
    );
    state
}

fn field_text(effects: &[Effect], wanted: FieldName) -> Option<String> {
    effects.iter().find_map(|effect| match effect {
        Effect::SetFieldText { field, text } if *field == wanted => Some(text.clone()),
        _ => None,
    })
}

#[test]
fn replace_target_updates_field_and_surface() {
    let state = settled_state("/?target=foo%3A5&target=baz&target=foo");
    let (state, effects) = update(
        state,
        Msg::ReplaceTarget {
            old_name: "foo".to_string(),
            new_name: "bar".to_string(),
        },
    );
    assert_eq!(state.view().targets, "bar:5\nbaz\nbar");
    assert_eq!(
        field_text(&effects, FieldName::Targets).as_deref(),
        Some("bar:5\nbaz\nbar")
    );
}

#[test]
fn replace_recipe_and_external() {
    let state = settled_state("/?recipe=mix%40oven-1&recipe=cut&external=water");
    let (state, _) = update(
        state,
        Msg::ReplaceRecipe {
            old_name: "mix".to_string(),
            new_name: "blend".to_string(),
        },
    );
    let (state, _) = update(
        state,
        Msg::PlanLoaded {
            request_id: 2,
            markup: String::new(),
        },
    );
    let (state, effects) = update(
        state,
        Msg::ReplaceExternal {
            old_name: "water".to_string(),
            new_name: "ice".to_string(),
        },
    );
    assert_eq!(state.view().recipes, "blend\ncut");
    assert_eq!(state.view().externals, "ice");
    assert_eq!(field_text(&effects, FieldName::Externals).as_deref(), Some("ice"));
}

#[test]
fn append_recipe_adds_duplicate_line() {
    let state = settled_state("/?recipe=bake");
    let (state, _) = update(
        state,
        Msg::AppendRecipe {
            name: "bake".to_string(),
        },
    );
    assert_eq!(state.view().recipes, "bake\nbake");
}

#[test]
fn editor_without_match_still_synchronizes() {
    let state = settled_state("/?external=water");
    let (state, effects) = update(
        state,
        Msg::ReplaceExternal {
            old_name: "coal".to_string(),
            new_name: "wood".to_string(),
        },
    );
    assert_eq!(state.view().externals, "water");
    assert!(effects
        .iter()
        .any(|effect| matches!(effect, Effect::FetchPlan { request_id: 2, .. })));
}

#[test]
fn editor_messages_name_the_field_they_rewrite() {
    let rename = Msg::ReplaceRecipeMachine {
        recipe_name: "mix".to_string(),
        machine: "oven".to_string(),
    };
    assert_eq!(rename.edited_field(), Some(FieldName::Recipes));
    let append = Msg::AppendExternal {
        name: "water".to_string(),
    };
    assert_eq!(append.edited_field(), Some(FieldName::Externals));
    let typed = Msg::FieldEdited {
        field: FieldName::Targets,
        text: "gear".to_string(),
    };
    assert_eq!(typed.edited_field(), None);
}
