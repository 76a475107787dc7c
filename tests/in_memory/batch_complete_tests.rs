//! Integration tests for bulk completion and the in-progress filter.

use crate::in_memory::helpers::{World, create_saved_task, registered_owner, world};
use homee::task::{domain::TaskStatus, ports::OwnerTaskFilter};
use rstest::rstest;

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn mixed_id_batches_only_mutate_the_owned_subset(world: World) {
    let alice = registered_owner(&world, "Alice");
    let bob = registered_owner(&world, "Bob");
    let mine_a = create_saved_task(&world, &alice, "A1", "Body", TaskStatus::Draft).await;
    let mine_b = create_saved_task(&world, &alice, "A2", "Body", TaskStatus::Published).await;
    let theirs = create_saved_task(&world, &bob, "B1", "Body", TaskStatus::Draft).await;

    let completed = world
        .service
        .complete_tasks(alice.id(), &[mine_a.id(), mine_b.id(), theirs.id()])
        .await
        .expect("batch complete");
    assert_eq!(completed, 2);

    let today = world.service.today();
    for id in [mine_a.id(), mine_b.id()] {
        let task = world
            .service
            .task_for_owner(alice.id(), id)
            .await
            .expect("owned task");
        assert_eq!(task.completed_date(), Some(today));
    }

    let untouched = world
        .service
        .task_for_owner(bob.id(), theirs.id())
        .await
        .expect("bob's task");
    assert_eq!(untouched.completed_date(), None);
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn completion_dates_survive_a_second_batch(world: World) {
    let owner = registered_owner(&world, "Taro");
    let task = create_saved_task(&world, &owner, "Once", "Body", TaskStatus::Draft).await;

    let first = world
        .service
        .complete_tasks(owner.id(), &[task.id()])
        .await
        .expect("first batch");
    assert_eq!(first, 1);
    let stamped = world
        .service
        .task_for_owner(owner.id(), task.id())
        .await
        .expect("task")
        .completed_date();

    let second = world
        .service
        .complete_tasks(owner.id(), &[task.id()])
        .await
        .expect("second batch");
    assert_eq!(second, 0);
    let unchanged = world
        .service
        .task_for_owner(owner.id(), task.id())
        .await
        .expect("task")
        .completed_date();
    assert_eq!(unchanged, stamped);
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn in_progress_filter_excludes_completed_tasks(world: World) {
    let owner = registered_owner(&world, "Taro");
    let open_task = create_saved_task(&world, &owner, "Open", "Body", TaskStatus::Draft).await;
    let done_task = create_saved_task(&world, &owner, "Done", "Body", TaskStatus::Draft).await;

    world
        .service
        .complete_tasks(owner.id(), &[done_task.id()])
        .await
        .expect("batch complete");

    let in_progress = world
        .service
        .tasks_for_owner(owner.id(), OwnerTaskFilter::InProgress)
        .await
        .expect("in-progress listing");
    assert_eq!(in_progress.len(), 1);
    assert_eq!(
        in_progress.first().map(homee::task::domain::Task::id),
        Some(open_task.id())
    );

    // The unfiltered listing still shows both.
    let all = world
        .service
        .tasks_for_owner(owner.id(), OwnerTaskFilter::All)
        .await
        .expect("full listing");
    assert_eq!(all.len(), 2);
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn empty_batches_are_a_successful_no_op(world: World) {
    let owner = registered_owner(&world, "Taro");

    let completed = world
        .service
        .complete_tasks(owner.id(), &[])
        .await
        .expect("empty batch");
    assert_eq!(completed, 0);
}
