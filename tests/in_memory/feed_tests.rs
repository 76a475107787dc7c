//! Integration tests for published feed pagination and visibility.

use crate::in_memory::helpers::{World, create_saved_task, registered_owner, world};
use chrono::{DateTime, Local, NaiveDate, TimeZone, Utc};
use homee::task::{
    domain::{Owner, Task, TaskChanges, TaskStatus},
    ports::TaskRepository,
    services::TaskWorkflowError,
};
use mockable::Clock;
use rstest::rstest;

/// Clock pinned to noon UTC on a fixed date, for deterministic ordering.
struct PinnedClock(DateTime<Utc>);

impl PinnedClock {
    fn on(year: i32, month: u32, day: u32) -> Self {
        let date = NaiveDate::from_ymd_opt(year, month, day).expect("valid date");
        let noon = date.and_hms_opt(12, 0, 0).expect("valid time");
        Self(Utc.from_utc_datetime(&noon))
    }
}

impl Clock for PinnedClock {
    fn local(&self) -> DateTime<Local> {
        self.0.with_timezone(&Local)
    }

    fn utc(&self) -> DateTime<Utc> {
        self.0
    }
}

/// Inserts a published task created at the pinned clock's instant.
async fn insert_published_at(world: &World, owner: &Owner, title: &str, clock: &PinnedClock) {
    let mut task = Task::new_unsaved(owner.id(), clock);
    let changes = TaskChanges::new()
        .with_title(title)
        .with_body("Body")
        .with_status(TaskStatus::Published);
    task.apply(&changes, clock).expect("valid publish");
    world.repository.insert(&task).await.expect("insert task");
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn feed_paginates_published_tasks_ten_per_page(world: World) {
    let owner = registered_owner(&world, "Taro");
    for i in 0..25 {
        create_saved_task(
            &world,
            &owner,
            &format!("Published {i}"),
            "Body",
            TaskStatus::Published,
        )
        .await;
    }
    for i in 0..8 {
        create_saved_task(
            &world,
            &owner,
            &format!("Draft {i}"),
            "Body",
            TaskStatus::Draft,
        )
        .await;
    }

    let first = world.service.published_feed(1).await.expect("page 1");
    assert_eq!(first.tasks.len(), 10);
    assert_eq!(first.current_page, 1);
    assert_eq!(first.total_pages, 3);
    assert!(
        first
            .tasks
            .iter()
            .all(|published| published.task.status() == TaskStatus::Published)
    );

    let second = world.service.published_feed(2).await.expect("page 2");
    assert_eq!(second.tasks.len(), 10);
    assert_eq!(second.current_page, 2);
    assert_eq!(second.total_pages, 3);

    let third = world.service.published_feed(3).await.expect("page 3");
    assert_eq!(third.tasks.len(), 5);

    // Pages never overlap.
    let first_ids: Vec<_> = first.tasks.iter().map(|p| p.task.id()).collect();
    assert!(
        second
            .tasks
            .iter()
            .all(|published| !first_ids.contains(&published.task.id()))
    );

    let beyond = world.service.published_feed(4).await.expect("page 4");
    assert!(beyond.tasks.is_empty());
    assert_eq!(beyond.total_pages, 3);
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn feed_orders_tasks_newest_created_first(world: World) {
    let owner = registered_owner(&world, "Taro");
    insert_published_at(&world, &owner, "Oldest", &PinnedClock::on(2025, 3, 1)).await;
    insert_published_at(&world, &owner, "Newest", &PinnedClock::on(2025, 3, 20)).await;
    insert_published_at(&world, &owner, "Middle", &PinnedClock::on(2025, 3, 10)).await;

    let feed = world.service.published_feed(1).await.expect("feed");
    let titles: Vec<Option<&str>> = feed
        .tasks
        .iter()
        .map(|published| published.task.title())
        .collect();
    assert_eq!(titles, [Some("Newest"), Some("Middle"), Some("Oldest")]);
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn feed_entries_carry_the_authors_name(world: World) {
    let alice = registered_owner(&world, "Alice");
    let bob = registered_owner(&world, "Bob");
    insert_published_at(&world, &alice, "From Alice", &PinnedClock::on(2025, 3, 2)).await;
    insert_published_at(&world, &bob, "From Bob", &PinnedClock::on(2025, 3, 1)).await;

    let feed = world.service.published_feed(1).await.expect("feed");
    let authors: Vec<&str> = feed
        .tasks
        .iter()
        .map(|published| published.author.as_str())
        .collect();
    assert_eq!(authors, ["Alice", "Bob"]);
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn only_published_tasks_are_publicly_visible(world: World) {
    let owner = registered_owner(&world, "Taro");
    let draft = create_saved_task(&world, &owner, "Draft", "Body", TaskStatus::Draft).await;
    let published =
        create_saved_task(&world, &owner, "Public", "Body", TaskStatus::Published).await;

    let shown = world
        .service
        .published_task(published.id())
        .await
        .expect("published task");
    assert_eq!(shown.task.id(), published.id());
    assert_eq!(shown.author.as_str(), "Taro");

    let hidden = world.service.published_task(draft.id()).await;
    assert!(matches!(hidden, Err(TaskWorkflowError::NotFound(_))));
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn unpublishing_removes_a_task_from_the_feed(world: World) {
    let owner = registered_owner(&world, "Taro");
    let published =
        create_saved_task(&world, &owner, "Public", "Body", TaskStatus::Published).await;

    let before = world.service.published_feed(1).await.expect("feed");
    assert_eq!(before.tasks.len(), 1);

    let unpublish = TaskChanges::new().with_status(TaskStatus::Draft);
    world
        .service
        .update_task(owner.id(), published.id(), &unpublish)
        .await
        .expect("unpublish");

    let after = world.service.published_feed(1).await.expect("feed");
    assert!(after.tasks.is_empty());
    assert_eq!(after.total_pages, 0);
}
