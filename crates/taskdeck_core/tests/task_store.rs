use chrono::NaiveDate;
use std::collections::HashSet;
use taskdeck_core::{
    MemoryKeyValueStore, Priority, PriorityFilter, StatusFilter, TaskCounts, TaskDraft,
    TaskPatch, TaskQuery, TaskSnapshotRepository, TaskStore,
};

fn ready_store() -> TaskStore<MemoryKeyValueStore> {
    TaskStore::restored(TaskSnapshotRepository::new(MemoryKeyValueStore::new())).unwrap()
}

fn reload(store: &TaskStore<MemoryKeyValueStore>) -> TaskStore<MemoryKeyValueStore> {
    let kv = store.snapshots().store().clone();
    TaskStore::restored(TaskSnapshotRepository::new(kv)).unwrap()
}

#[test]
fn add_prepends_and_survives_reload_with_fresh_identity() {
    let mut store = ready_store();
    let due = NaiveDate::from_ymd_opt(2025, 4, 15);

    let first = store
        .add(TaskDraft::new("Write report").description("quarterly"))
        .unwrap();
    let second = store
        .add(
            TaskDraft::new("Call bank")
                .priority(Priority::High)
                .due_date(due),
        )
        .unwrap();

    assert_ne!(first.id, second.id);
    assert!(!second.completed);
    assert_eq!(store.tasks()[0].id, second.id);
    assert_eq!(store.tasks()[1].id, first.id);

    let restored = reload(&store);
    assert_eq!(restored.tasks(), store.tasks());
    let loaded = restored.get(&second.id).unwrap();
    assert_eq!(loaded.title, "Call bank");
    assert_eq!(loaded.description, "");
    assert_eq!(loaded.priority, Priority::High);
    assert_eq!(loaded.due_date, due);
    assert_eq!(loaded.created_at, second.created_at);
}

#[test]
fn ids_stay_unique_across_many_adds() {
    let mut store = ready_store();
    for index in 0..50 {
        store.add(TaskDraft::new(format!("task {index}"))).unwrap();
    }

    let ids: HashSet<&str> = store.tasks().iter().map(|task| task.id.as_str()).collect();
    assert_eq!(ids.len(), 50);
}

#[test]
fn empty_title_leaves_collection_unchanged() {
    let mut store = ready_store();
    store.add(TaskDraft::new("keep me")).unwrap();
    let before = store.tasks().to_vec();

    assert!(store.add(TaskDraft::new("")).is_err());
    assert!(store.add(TaskDraft::new("   ")).is_err());

    assert_eq!(store.tasks(), before.as_slice());
    assert_eq!(reload(&store).tasks(), before.as_slice());
}

#[test]
fn toggle_twice_restores_completion() {
    let mut store = ready_store();
    let task = store.add(TaskDraft::new("flip")).unwrap();

    assert!(store.toggle(&task.id).unwrap());
    assert!(store.get(&task.id).unwrap().completed);
    assert!(reload(&store).get(&task.id).unwrap().completed);

    assert!(store.toggle(&task.id).unwrap());
    assert!(!store.get(&task.id).unwrap().completed);
}

#[test]
fn delete_twice_is_a_noop_the_second_time() {
    let mut store = ready_store();
    let task = store.add(TaskDraft::new("remove")).unwrap();
    store.add(TaskDraft::new("stay")).unwrap();

    assert!(store.delete(&task.id).unwrap());
    assert!(!store.delete(&task.id).unwrap());
    assert_eq!(store.len(), 1);
    assert!(reload(&store).get(&task.id).is_none());
}

#[test]
fn unknown_ids_are_silent_noops() {
    let mut store = ready_store();
    store.add(TaskDraft::new("only")).unwrap();
    let before = store.tasks().to_vec();

    assert!(!store.toggle("missing").unwrap());
    assert!(!store
        .update(
            "missing",
            TaskPatch {
                title: Some("ghost".to_string()),
                ..TaskPatch::default()
            }
        )
        .unwrap());
    assert!(!store.delete("missing").unwrap());

    assert_eq!(store.tasks(), before.as_slice());
}

#[test]
fn update_merges_only_given_fields() {
    let mut store = ready_store();
    let task = store
        .add(
            TaskDraft::new("draft")
                .description("details")
                .due_date(NaiveDate::from_ymd_opt(2025, 6, 1)),
        )
        .unwrap();

    store
        .update(
            &task.id,
            TaskPatch {
                priority: Some(Priority::Low),
                due_date: Some(None),
                ..TaskPatch::default()
            },
        )
        .unwrap();

    let updated = reload(&store).get(&task.id).unwrap().clone();
    assert_eq!(updated.id, task.id);
    assert_eq!(updated.created_at, task.created_at);
    assert_eq!(updated.title, "draft");
    assert_eq!(updated.description, "details");
    assert_eq!(updated.priority, Priority::Low);
    assert_eq!(updated.due_date, None);
}

#[test]
fn scenario_sorts_high_before_low_then_filters_after_toggle() {
    let mut store = ready_store();
    let milk = store
        .add(TaskDraft::new("Buy milk").priority(Priority::Low))
        .unwrap();
    store
        .add(
            TaskDraft::new("File taxes")
                .priority(Priority::High)
                .due_date(NaiveDate::from_ymd_opt(2025, 4, 15)),
        )
        .unwrap();

    let all = store.project(&TaskQuery::default());
    assert_eq!(all.titles(), vec!["File taxes", "Buy milk"]);

    store.toggle(&milk.id).unwrap();

    let active = store.project(&TaskQuery::new(StatusFilter::Active, PriorityFilter::All));
    assert_eq!(active.titles(), vec!["File taxes"]);

    let completed = store.project(&TaskQuery::new(StatusFilter::Completed, PriorityFilter::All));
    assert_eq!(completed.titles(), vec!["Buy milk"]);
    assert_eq!(
        completed.counts,
        TaskCounts {
            total: 2,
            active: 1,
            completed: 1
        }
    );
}

#[test]
fn projection_groups_keep_base_order() {
    let mut store = ready_store();
    let plan = [
        ("l1", Priority::Low, false),
        ("h1", Priority::High, true),
        ("m1", Priority::Medium, false),
        ("h2", Priority::High, false),
        ("l2", Priority::Low, true),
        ("m2", Priority::Medium, false),
        ("h3", Priority::High, false),
    ];
    for (title, priority, completed) in plan {
        let task = store
            .add(TaskDraft::new(title).priority(priority))
            .unwrap();
        if completed {
            store.toggle(&task.id).unwrap();
        }
    }

    // Base order is newest first, so later adds appear earlier within a group.
    let projection = store.project(&TaskQuery::default());
    assert_eq!(
        projection.titles(),
        vec!["h3", "h2", "m2", "m1", "l1", "h1", "l2"]
    );
    assert_eq!(store.tasks()[0].title, "h3");
    assert_eq!(store.tasks()[6].title, "l1");
}
