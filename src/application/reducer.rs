use serde::{Deserialize, Serialize};

use crate::domain::todolist::{DomainTodolist, FilterValue, RequestStatus, Todolist, TodolistId};

pub type TodolistsState = Vec<DomainTodolist>;

/// Every change the store accepts. Network results are turned into these by
/// the service; UI code may dispatch the purely local ones directly.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(tag = "type", content = "payload", rename_all = "camelCase")]
pub enum TodolistsAction {
    SetTodolists(Vec<Todolist>),
    CreateTodolist(Todolist),
    DeleteTodolist { id: TodolistId },
    ChangeTitle { id: TodolistId, title: String },
    ChangeFilter { id: TodolistId, filter: FilterValue },
    ChangeEntityStatus { id: TodolistId, status: RequestStatus },
    Clear,
}

impl TodolistsAction {
    pub fn name(&self) -> &'static str {
        match self {
            TodolistsAction::SetTodolists(_) => "todolists/setTodolists",
            TodolistsAction::CreateTodolist(_) => "todolists/createTodolist",
            TodolistsAction::DeleteTodolist { .. } => "todolists/deleteTodolist",
            TodolistsAction::ChangeTitle { .. } => "todolists/changeTitle",
            TodolistsAction::ChangeFilter { .. } => "todolists/changeFilter",
            TodolistsAction::ChangeEntityStatus { .. } => "todolists/changeEntityStatus",
            TodolistsAction::Clear => "todolists/clear",
        }
    }
}

/// Pure transition function. Unknown ids are ignored.
pub fn reduce(mut state: TodolistsState, action: &TodolistsAction) -> TodolistsState {
    match action {
        TodolistsAction::SetTodolists(lists) => {
            let mut next: TodolistsState = Vec::with_capacity(lists.len());
            for tl in lists {
                // Keep the first occurrence if the server ever repeats an id.
                if next.iter().all(|d| d.id != tl.id) {
                    next.push(DomainTodolist::from(tl.clone()));
                }
            }
            next
        }
        TodolistsAction::CreateTodolist(tl) => {
            if state.iter().all(|d| d.id != tl.id) {
                state.insert(0, DomainTodolist::from(tl.clone()));
            }
            state
        }
        TodolistsAction::DeleteTodolist { id } => {
            if let Some(index) = state.iter().position(|d| &d.id == id) {
                state.remove(index);
            }
            state
        }
        TodolistsAction::ChangeTitle { id, title } => {
            if let Some(tl) = find_mut(&mut state, id) { tl.title = title.clone(); }
            state
        }
        TodolistsAction::ChangeFilter { id, filter } => {
            if let Some(tl) = find_mut(&mut state, id) { tl.filter = *filter; }
            state
        }
        TodolistsAction::ChangeEntityStatus { id, status } => {
            if let Some(tl) = find_mut(&mut state, id) { tl.entity_status = *status; }
            state
        }
        TodolistsAction::Clear => Vec::new(),
    }
}

fn find_mut<'a>(state: &'a mut TodolistsState, id: &TodolistId) -> Option<&'a mut DomainTodolist> {
    state.iter_mut().find(|d| &d.id == id)
}

pub fn select_todolists(state: &TodolistsState) -> &[DomainTodolist] { state }

pub fn select_todolist<'a>(state: &'a TodolistsState, id: &TodolistId) -> Option<&'a DomainTodolist> {
    state.iter().find(|d| &d.id == id)
}

/// Whether the UI should disable controls for this record.
pub fn select_is_busy(state: &TodolistsState, id: &TodolistId) -> bool {
    select_todolist(state, id).is_some_and(|d| d.entity_status == RequestStatus::Loading)
}

#[cfg(test)]
mod tests {
    use std::collections::BTreeSet;

    use proptest::prelude::*;

    use super::*;

    fn tl(id: &str, title: &str) -> Todolist {
        Todolist { id: id.into(), title: title.into(), order: 0, added_date: String::new() }
    }

    fn state_of(lists: &[(&str, &str)]) -> TodolistsState {
        reduce(Vec::new(), &TodolistsAction::SetTodolists(lists.iter().map(|(i, t)| tl(i, t)).collect()))
    }

    #[test]
    fn set_todolists_replaces_and_tags_defaults() {
        let mut state = state_of(&[("old", "Old")]);
        state[0].filter = FilterValue::Completed;
        let state = reduce(state, &TodolistsAction::SetTodolists(vec![tl("1", "Books"), tl("2", "Films")]));
        assert_eq!(state.len(), 2);
        assert!(state.iter().all(|d| d.filter == FilterValue::All && d.entity_status == RequestStatus::Idle));
        assert_eq!(state[0].id, TodolistId::new("1"));
    }

    #[test]
    fn set_todolists_drops_repeated_ids() {
        let state = state_of(&[("1", "a"), ("1", "b"), ("2", "c")]);
        assert_eq!(state.iter().map(|d| d.title.as_str()).collect::<Vec<_>>(), vec!["a", "c"]);
    }

    #[test]
    fn create_inserts_at_head() {
        let state = state_of(&[("1", "Books")]);
        let state = reduce(state, &TodolistsAction::CreateTodolist(tl("2", "Groceries")));
        assert_eq!(state[0].id, TodolistId::new("2"));
        assert_eq!(state[1].id, TodolistId::new("1"));
    }

    #[test]
    fn create_with_existing_id_is_ignored() {
        let before = state_of(&[("1", "Books")]);
        let after = reduce(before.clone(), &TodolistsAction::CreateTodolist(tl("1", "Dup")));
        assert_eq!(before, after);
    }

    #[test]
    fn delete_missing_is_noop() {
        let before = state_of(&[("1", "Books")]);
        let after = reduce(before.clone(), &TodolistsAction::DeleteTodolist { id: "missing".into() });
        assert_eq!(before, after);
    }

    #[test]
    fn rename_missing_is_noop() {
        let before = state_of(&[("1", "Books")]);
        let after = reduce(before.clone(), &TodolistsAction::ChangeTitle { id: "missing".into(), title: "X".into() });
        assert_eq!(before, after);
    }

    #[test]
    fn rename_updates_title_only() {
        let state = state_of(&[("1", "Books")]);
        let state = reduce(state, &TodolistsAction::ChangeTitle { id: "1".into(), title: "Movies".into() });
        assert_eq!(state[0].title, "Movies");
        assert_eq!(state[0].filter, FilterValue::All);
    }

    #[test]
    fn entity_status_touches_one_record() {
        let state = state_of(&[("1", "a"), ("2", "b")]);
        let state = reduce(state, &TodolistsAction::ChangeEntityStatus { id: "2".into(), status: RequestStatus::Loading });
        assert!(select_is_busy(&state, &"2".into()));
        assert!(!select_is_busy(&state, &"1".into()));
        assert!(!select_is_busy(&state, &"missing".into()));
    }

    #[test]
    fn clear_empties_state() {
        let state = reduce(state_of(&[("1", "a")]), &TodolistsAction::Clear);
        assert!(select_todolists(&state).is_empty());
    }

    #[test]
    fn action_serializes_tagged() {
        let action = TodolistsAction::ChangeFilter { id: "1".into(), filter: FilterValue::Active };
        let v = serde_json::to_value(&action).unwrap();
        assert_eq!(v["type"], "changeFilter");
        assert_eq!(v["payload"]["filter"], "active");
    }

    #[derive(Debug, Clone)]
    enum Op { Create(u8), Delete(u8), Rename(u8) }

    fn op_strategy() -> impl Strategy<Value = Op> {
        prop_oneof![
            (0u8..16).prop_map(Op::Create),
            (0u8..16).prop_map(Op::Delete),
            (0u8..16).prop_map(Op::Rename),
        ]
    }

    fn filter_strategy() -> impl Strategy<Value = FilterValue> {
        prop_oneof![Just(FilterValue::All), Just(FilterValue::Active), Just(FilterValue::Completed)]
    }

    proptest! {
        #![proptest_config(ProptestConfig { cases: 64, .. ProptestConfig::default() })]

        #[test]
        fn id_set_follows_set_semantics(ops in prop::collection::vec(op_strategy(), 0..40)) {
            let mut state = TodolistsState::new();
            let mut expected = BTreeSet::new();
            for op in &ops {
                let action = match op {
                    Op::Create(n) => { expected.insert(n.to_string()); TodolistsAction::CreateTodolist(tl(&n.to_string(), "t")) }
                    Op::Delete(n) => { expected.remove(&n.to_string()); TodolistsAction::DeleteTodolist { id: n.to_string().as_str().into() } }
                    Op::Rename(n) => TodolistsAction::ChangeTitle { id: n.to_string().as_str().into(), title: format!("r{n}") },
                };
                state = reduce(state, &action);
            }
            let ids: BTreeSet<String> = state.iter().map(|d| d.id.0.clone()).collect();
            prop_assert_eq!(ids, expected);
            prop_assert_eq!(state.len(), state.iter().map(|d| &d.id).collect::<BTreeSet<_>>().len());
        }

        #[test]
        fn change_filter_is_idempotent(target in 0u8..4, filter in filter_strategy()) {
            let state = state_of(&[("0", "a"), ("1", "b"), ("2", "c")]);
            let action = TodolistsAction::ChangeFilter { id: target.to_string().as_str().into(), filter };
            let once = reduce(state, &action);
            let twice = reduce(once.clone(), &action);
            prop_assert_eq!(once, twice);
        }
    }
}
