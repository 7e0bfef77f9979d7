use std::collections::HashMap;

use migration::MigratorTrait;
use sea_orm::{ConnectionTrait, Statement};
use todoit::{ForcedTagSet, ItemStatus, Manager, ManagerError};

async fn test_db() -> sea_orm::DatabaseConnection {
    let db = sea_orm::Database::connect("sqlite::memory:").await.unwrap();
    db.execute(Statement::from_string(db.get_database_backend(), "PRAGMA foreign_keys = ON".to_string()))
        .await
        .unwrap();
    migration::Migrator::up(&db, None).await.unwrap();
    db
}

async fn test_manager() -> Manager {
    Manager::with_forced_tags(test_db().await, ForcedTagSet::empty())
}

async fn table_count(db: &sea_orm::DatabaseConnection, sql: &str) -> i64 {
    let row = db.query_one(Statement::from_string(db.get_database_backend(), sql.to_string())).await.unwrap().unwrap();
    row.try_get::<i64>("", "c").unwrap()
}

// S1. Hierarchical auto-complete.
#[tokio::test]
async fn hierarchical_auto_complete() {
    let manager = test_manager().await;
    manager.create_list("p", "Project", None, None).await.unwrap();
    manager.add_item("p", "api", "Build API", None).await.unwrap();
    manager.add_subitem("p", "api", "auth", "Add auth", None).await.unwrap();

    manager
        .update_item_status("p", "auth", ItemStatus::Completed, None, Some("api"))
        .await
        .unwrap();

    let api = manager.get_item("p", "api", None).await.unwrap();
    assert_eq!(api.status, ItemStatus::Completed);

    let history = manager.get_item_history("p", "api", None).await.unwrap();
    assert!(history.iter().any(|entry| entry.action == todoit::HistoryAction::AutoCompleted));
}

// S2. Cross-list dependency blocks `next`.
#[tokio::test]
async fn cross_list_dependency_blocks_next() {
    let manager = test_manager().await;
    manager.create_list("backend", "Backend", None, None).await.unwrap();
    manager.create_list("frontend", "Frontend", None, None).await.unwrap();
    manager.add_item("backend", "api", "Build API", None).await.unwrap();
    manager.add_item("frontend", "ui", "Build UI", None).await.unwrap();

    manager.add_item_dependency("frontend", "ui", "backend", "api").await.unwrap();

    assert!(manager.get_next_pending("frontend").await.unwrap().is_none());

    manager
        .update_item_status("backend", "api", ItemStatus::Completed, None, None)
        .await
        .unwrap();

    let next = manager.get_next_pending("frontend").await.unwrap().unwrap();
    assert_eq!(next.item_key.as_str(), "ui");
}

// S3. Cascade delete with tags + properties.
#[tokio::test]
async fn cascade_delete_removes_every_dependent_row() {
    let db = test_db().await;
    let manager = Manager::with_forced_tags(db.clone(), ForcedTagSet::empty());
    manager.create_list("x", "List X", None, None).await.unwrap();
    manager.add_item("x", "t1", "Task one", None).await.unwrap();
    manager.set_item_property("x", "t1", "owner", "alice", None).await.unwrap();
    manager.set_item_property("x", "t1", "priority", "high", None).await.unwrap();
    manager.add_tag_to_list("x", "dev").await.unwrap();
    manager.set_list_property("x", "env", "ci").await.unwrap();

    manager.delete_list("x").await.unwrap();

    assert_eq!(table_count(&db, "SELECT COUNT(*) AS c FROM list_tag_assignments").await, 0);
    assert_eq!(table_count(&db, "SELECT COUNT(*) AS c FROM list_properties").await, 0);
    assert_eq!(table_count(&db, "SELECT COUNT(*) AS c FROM item_properties").await, 0);
    assert_eq!(table_count(&db, "SELECT COUNT(*) AS c FROM todo_items").await, 0);
    assert_eq!(table_count(&db, "SELECT COUNT(*) AS c FROM lists").await, 0);

    assert!(matches!(manager.get_list("x").await, Err(ManagerError::NotFound { .. })));
}

// S4. Sibling-unique keys allow duplicate child keys across parents.
#[tokio::test]
async fn duplicate_child_keys_allowed_across_parents() {
    let manager = test_manager().await;
    manager.create_list("render", "Render", None, None).await.unwrap();
    manager.add_item("render", "scene_0019", "Scene 19", None).await.unwrap();
    manager.add_item("render", "scene_0020", "Scene 20", None).await.unwrap();

    manager.add_subitem("render", "scene_0019", "image_gen", "Generate", None).await.unwrap();
    manager.add_subitem("render", "scene_0020", "image_gen", "Generate", None).await.unwrap();

    let under_20 = manager.get_item("render", "image_gen", Some("scene_0020")).await.unwrap();
    let under_19 = manager.get_item("render", "image_gen", Some("scene_0019")).await.unwrap();
    assert_ne!(under_19.id, under_20.id);

    // Without a parent key, a subitem is invisible even if its key is unique.
    manager.create_list("solo", "Solo", None, None).await.unwrap();
    manager.add_item("solo", "root", "Root", None).await.unwrap();
    manager.add_subitem("solo", "root", "subkey", "Sub", None).await.unwrap();
    assert!(matches!(
        manager.get_item("solo", "subkey", None).await,
        Err(ManagerError::NotFound { .. })
    ));
}

// S5. Hierarchical numbering stability.
#[tokio::test]
async fn hierarchical_listing_orders_children_under_their_root() {
    let manager = test_manager().await;
    manager.create_list("shoot", "Shoot", None, None).await.unwrap();
    let root1 = manager.add_item("shoot", "r1", "Root one", Some(1)).await.unwrap();
    manager.add_item("shoot", "r3", "Root three", Some(3)).await.unwrap();
    manager.add_subitem("shoot", "r1", "c1", "Child one", None).await.unwrap();
    manager.add_subitem("shoot", "r1", "c2", "Child two", None).await.unwrap();
    manager.add_subitem("shoot", "r1", "c3", "Child three", None).await.unwrap();

    let items = manager.get_list_items("shoot", None, None).await.unwrap();
    let keys: Vec<&str> = items.iter().map(|item| item.item_key.as_str()).collect();
    assert_eq!(keys, vec!["r1", "c1", "c2", "c3", "r3"]);
    assert_eq!(items[0].id, root1.id);
}

// S6. Cycle rejection.
#[tokio::test]
async fn dependency_cycle_is_rejected() {
    let manager = test_manager().await;
    manager.create_list("chain", "Chain", None, None).await.unwrap();
    manager.add_item("chain", "a", "A", None).await.unwrap();
    manager.add_item("chain", "b", "B", None).await.unwrap();
    manager.add_item("chain", "c", "C", None).await.unwrap();

    manager.add_item_dependency("chain", "a", "chain", "b").await.unwrap();
    manager.add_item_dependency("chain", "b", "chain", "c").await.unwrap();

    let result = manager.add_item_dependency("chain", "c", "chain", "a").await;
    assert!(matches!(result, Err(ManagerError::WouldCycle { .. })));

    let blockers = manager.get_item_blockers("chain", "a").await.unwrap();
    assert!(blockers.iter().all(|b| b.item_key.as_str() != "c"));
}

#[tokio::test]
async fn manual_status_change_rejected_on_parent_with_children() {
    let manager = test_manager().await;
    manager.create_list("p", "P", None, None).await.unwrap();
    manager.add_item("p", "parent", "Parent", None).await.unwrap();
    manager.add_subitem("p", "parent", "child", "Child", None).await.unwrap();

    let result = manager.update_item_status("p", "parent", ItemStatus::Completed, None, None).await;
    assert!(matches!(result, Err(ManagerError::HasSubitems { .. })));
}

#[tokio::test]
async fn archive_requires_completion_unless_forced() {
    let manager = test_manager().await;
    manager.create_list("p", "P", None, None).await.unwrap();
    manager.add_item("p", "t1", "Task", None).await.unwrap();

    let result = manager.archive_list("p", false).await;
    assert!(matches!(result, Err(ManagerError::IncompletePrecondition { .. })));

    let archived = manager.archive_list("p", true).await.unwrap();
    assert_eq!(archived.status, todoit::ListStatus::Archived);

    let unarchived = manager.unarchive_list("p").await.unwrap();
    assert_eq!(unarchived.status, todoit::ListStatus::Active);
    assert_eq!(unarchived.title, archived.title);
}

#[tokio::test]
async fn limit_zero_returns_empty_and_none_returns_all() {
    let manager = test_manager().await;
    manager.create_list("p", "P", None, None).await.unwrap();
    manager.add_item("p", "a", "A", None).await.unwrap();
    manager.add_item("p", "b", "B", None).await.unwrap();

    let none = manager.get_list_items("p", None, Some(0)).await.unwrap();
    assert!(none.is_empty());

    let all = manager.get_list_items("p", None, None).await.unwrap();
    assert_eq!(all.len(), 2);

    let over = manager.get_list_items("p", None, Some(100)).await.unwrap();
    assert_eq!(over.len(), 2);
}

#[tokio::test]
async fn delete_then_recreate_same_key_succeeds() {
    let manager = test_manager().await;
    manager.create_list("recurring", "First", None, None).await.unwrap();
    manager.delete_list("recurring").await.unwrap();
    let recreated = manager.create_list("recurring", "Second", None, None).await.unwrap();
    assert_eq!(recreated.title, "Second");
}

#[tokio::test]
async fn forced_tag_set_excludes_untagged_lists() {
    let scoped = Manager::with_forced_tags(test_db().await, ForcedTagSet::parse("dev"));
    let list = scoped.create_list("p", "P", None, None).await.unwrap();
    let tags: Vec<String> = scoped
        .get_tags_for_list("p")
        .await
        .unwrap()
        .into_iter()
        .map(|tag| tag.name.as_str().to_string())
        .collect();
    assert_eq!(tags, vec!["dev"]);
    assert_eq!(list.list_key.as_str(), "p");

    assert!(scoped.get_list("p").await.is_ok());
}

#[tokio::test]
async fn clear_completion_states_keeps_status() {
    let manager = test_manager().await;
    manager.create_list("p", "P", None, None).await.unwrap();
    manager.add_item("p", "t1", "Task", None).await.unwrap();

    let mut states = HashMap::new();
    states.insert("reviewed".to_string(), true);
    manager
        .update_item_status("p", "t1", ItemStatus::InProgress, Some(states), None)
        .await
        .unwrap();

    let cleared = manager.clear_item_completion_states("p", "t1", None).await.unwrap();
    assert!(cleared.completion_states.is_empty());
    assert_eq!(cleared.status, ItemStatus::InProgress);
}
