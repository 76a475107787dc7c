//! Shared test helpers for in-memory repository integration tests.

use homee::task::{
    adapters::memory::InMemoryTaskRepository,
    domain::{Owner, OwnerId, OwnerName, Task, TaskChanges, TaskStatus},
    services::TaskWorkflowService,
};
use mockable::DefaultClock;
use rstest::fixture;
use std::sync::Arc;

/// Service type used across the integration tests.
pub type TestService = TaskWorkflowService<InMemoryTaskRepository, DefaultClock>;

/// Repository plus the service driving it.
pub struct World {
    /// Shared in-memory repository.
    pub repository: Arc<InMemoryTaskRepository>,
    /// Workflow service over the repository.
    pub service: TestService,
}

/// Provides a fresh repository/service pair for each test.
#[fixture]
pub fn world() -> World {
    let repository = Arc::new(InMemoryTaskRepository::new());
    let service = TaskWorkflowService::new(Arc::clone(&repository), Arc::new(DefaultClock));
    World {
        repository,
        service,
    }
}

/// Builds an owner with the given display name, registered for feed
/// rendering.
pub fn registered_owner(world: &World, name: &str) -> Owner {
    let owner = Owner::new(
        OwnerId::new(),
        OwnerName::new(name).expect("valid owner name"),
    );
    world
        .repository
        .register_owner(&owner)
        .expect("register owner");
    owner
}

/// Creates a task for the owner and moves it to the given saved status.
pub async fn create_saved_task(
    world: &World,
    owner: &Owner,
    title: &str,
    body: &str,
    status: TaskStatus,
) -> Task {
    let unsaved = world
        .service
        .create_unsaved(owner.id())
        .await
        .expect("create unsaved task");
    let changes = TaskChanges::new()
        .with_title(title)
        .with_body(body)
        .with_status(status);
    world
        .service
        .update_task(owner.id(), unsaved.id(), &changes)
        .await
        .expect("save task")
}
