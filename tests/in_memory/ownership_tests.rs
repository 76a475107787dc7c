//! Integration tests for cross-owner scoping.
//!
//! An id belonging to another owner must behave exactly like an absent id,
//! whatever the operation.

use crate::in_memory::helpers::{World, create_saved_task, registered_owner, world};
use homee::task::{
    domain::{TaskChanges, TaskId, TaskStatus},
    ports::OwnerTaskFilter,
    services::TaskWorkflowError,
};
use rstest::rstest;

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn lookups_never_cross_owner_boundaries(world: World) {
    let alice = registered_owner(&world, "Alice");
    let bob = registered_owner(&world, "Bob");
    let task = create_saved_task(&world, &alice, "Mine", "Body", TaskStatus::Draft).await;

    let fetched = world.service.task_for_owner(bob.id(), task.id()).await;
    let absent = world.service.task_for_owner(bob.id(), TaskId::new()).await;

    // An existing foreign id and a nonexistent id are indistinguishable.
    assert!(matches!(fetched, Err(TaskWorkflowError::NotFound(_))));
    assert!(matches!(absent, Err(TaskWorkflowError::NotFound(_))));
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn updates_never_cross_owner_boundaries(world: World) {
    let alice = registered_owner(&world, "Alice");
    let bob = registered_owner(&world, "Bob");
    let task = create_saved_task(&world, &alice, "Mine", "Body", TaskStatus::Draft).await;

    let changes = TaskChanges::new().with_title("Taken over");
    let result = world
        .service
        .update_task(bob.id(), task.id(), &changes)
        .await;
    assert!(matches!(result, Err(TaskWorkflowError::NotFound(_))));

    let stored = world
        .service
        .task_for_owner(alice.id(), task.id())
        .await
        .expect("alice still owns the task");
    assert_eq!(stored.title(), Some("Mine"));
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn deletes_never_cross_owner_boundaries(world: World) {
    let alice = registered_owner(&world, "Alice");
    let bob = registered_owner(&world, "Bob");
    let task = create_saved_task(&world, &alice, "Mine", "Body", TaskStatus::Draft).await;

    let result = world.service.delete_task(bob.id(), task.id()).await;
    assert!(matches!(result, Err(TaskWorkflowError::NotFound(_))));

    world
        .service
        .task_for_owner(alice.id(), task.id())
        .await
        .expect("task survives the foreign delete");
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn listings_only_contain_the_callers_tasks(world: World) {
    let alice = registered_owner(&world, "Alice");
    let bob = registered_owner(&world, "Bob");
    create_saved_task(&world, &alice, "A1", "Body", TaskStatus::Draft).await;
    create_saved_task(&world, &alice, "A2", "Body", TaskStatus::Published).await;
    create_saved_task(&world, &bob, "B1", "Body", TaskStatus::Draft).await;

    let alices = world
        .service
        .tasks_for_owner(alice.id(), OwnerTaskFilter::All)
        .await
        .expect("alice listing");
    let bobs = world
        .service
        .tasks_for_owner(bob.id(), OwnerTaskFilter::All)
        .await
        .expect("bob listing");

    assert_eq!(alices.len(), 2);
    assert_eq!(bobs.len(), 1);
    assert!(bobs.iter().all(|task| task.owner() == bob.id()));
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn each_owner_keeps_an_independent_unsaved_slot(world: World) {
    let alice = registered_owner(&world, "Alice");
    let bob = registered_owner(&world, "Bob");

    let alices = world
        .service
        .create_unsaved(alice.id())
        .await
        .expect("alice create");
    let bobs = world
        .service
        .create_unsaved(bob.id())
        .await
        .expect("bob create");

    assert_ne!(alices.id(), bobs.id());
    assert_eq!(alices.owner(), alice.id());
    assert_eq!(bobs.owner(), bob.id());
}
