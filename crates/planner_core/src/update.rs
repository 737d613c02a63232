use planner_logging::{planner_info, planner_warn};

use crate::codec::{query_of_location, QueryParameters};
use crate::editors::{
    append_entry, replace_external_entry, replace_recipe_entry, replace_recipe_machine,
    replace_target_entry,
};
use crate::{AppState, Effect, FieldName, FieldState, HistoryMode, Msg};

/// Pure update function: applies a message to state and returns any effects.
pub fn update(mut state: AppState, msg: Msg) -> (AppState, Vec<Effect>) {
    let effects = match msg {
        Msg::Bootstrap { location } => {
            let parameters = QueryParameters::decode(&query_of_location(&location));
            state.replace_fields(FieldState::from_parameters(&parameters));
            let mut effects: Vec<Effect> = FieldName::ALL
                .into_iter()
                .map(|field| Effect::SetFieldText {
                    field,
                    text: state.fields().text(field).to_owned(),
                })
                .collect();
            effects.extend(state.request_sync(HistoryMode::Replace));
            effects
        }
        Msg::FieldEdited { field, text } => {
            state.set_field_text(field, text);
            state.request_sync(HistoryMode::Push)
        }
        Msg::ReplaceExternal { old_name, new_name } => {
            edit_and_sync(&mut state, FieldName::Externals, |lines| {
                replace_external_entry(lines, &old_name, &new_name)
            })
        }
        Msg::ReplaceTarget { old_name, new_name } => {
            edit_and_sync(&mut state, FieldName::Targets, |lines| {
                replace_target_entry(lines, &old_name, &new_name)
            })
        }
        Msg::ReplaceRecipe { old_name, new_name } => {
            edit_and_sync(&mut state, FieldName::Recipes, |lines| {
                replace_recipe_entry(lines, &old_name, &new_name)
            })
        }
        Msg::ReplaceRecipeMachine {
            recipe_name,
            machine,
        } => edit_and_sync(&mut state, FieldName::Recipes, |lines| {
            replace_recipe_machine(lines, &recipe_name, &machine)
        }),
        Msg::AppendRecipe { name } => {
            edit_and_sync(&mut state, FieldName::Recipes, |lines| append_entry(lines, &name))
        }
        Msg::AppendExternal { name } => {
            edit_and_sync(&mut state, FieldName::Externals, |lines| append_entry(lines, &name))
        }
        Msg::PlanLoaded { request_id, markup } => match state.settle(request_id) {
            Some(follow_up) => {
                planner_info!(
                    "plan request {request_id} applied ({} bytes of markup)",
                    markup.len()
                );
                state.show_plan(markup.clone());
                let mut effects = vec![Effect::ReplacePlan { markup }];
                effects.extend(follow_up_sync(&mut state, follow_up));
                effects
            }
            None => Vec::new(),
        },
        Msg::PlanFailed { request_id, reason } => match state.settle(request_id) {
            Some(follow_up) => {
                planner_warn!("plan request {request_id} failed: {reason}");
                state.record_failure(reason);
                follow_up_sync(&mut state, follow_up)
            }
            None => Vec::new(),
        },
    };

    (state, effects)
}

fn edit_and_sync<F>(state: &mut AppState, field: FieldName, edit: F) -> Vec<Effect>
where
    F: FnOnce(&[String]) -> Vec<String>,
{
    let mut effects = vec![state.edit_lines(field, edit)];
    effects.extend(state.request_sync(HistoryMode::Push));
    effects
}

// The follow-up encodes the fields as they are now, not as they were when
// the pending flag was raised.
fn follow_up_sync(state: &mut AppState, follow_up: bool) -> Vec<Effect> {
    if follow_up {
        state.request_sync(HistoryMode::Push)
    } else {
        Vec::new()
    }
}
