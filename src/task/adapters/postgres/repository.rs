//! `PostgreSQL` repository implementation for task store persistence.

use super::{
    models::{NewTaskRow, TaskRow},
    schema::{tasks, users},
};
use crate::task::{
    domain::{OwnerId, OwnerName, PersistedTaskData, Task, TaskId, TaskStatus},
    ports::{
        FEED_PAGE_SIZE, OwnerTaskFilter, PublishedPage, PublishedTask, TaskRepository,
        TaskRepositoryError, TaskRepositoryResult,
    },
};
use async_trait::async_trait;
use chrono::{DateTime, NaiveDate, Utc};
use diesel::pg::PgConnection;
use diesel::prelude::*;
use diesel::r2d2::{ConnectionManager, Pool};
use diesel::result::{DatabaseErrorInformation, DatabaseErrorKind, Error as DieselError};

/// `PostgreSQL` connection pool type used by task adapters.
pub type TaskPgPool = Pool<ConnectionManager<PgConnection>>;

/// `PostgreSQL`-backed task repository.
#[derive(Debug, Clone)]
pub struct PostgresTaskRepository {
    pool: TaskPgPool,
}

impl PostgresTaskRepository {
    /// Creates a new repository from a `PostgreSQL` connection pool.
    #[must_use]
    pub const fn new(pool: TaskPgPool) -> Self {
        Self { pool }
    }

    async fn run_blocking<F, T>(&self, f: F) -> TaskRepositoryResult<T>
    where
        F: FnOnce(&mut PgConnection) -> TaskRepositoryResult<T> + Send + 'static,
        T: Send + 'static,
    {
        let pool = self.pool.clone();
        tokio::task::spawn_blocking(move || {
            let mut connection = pool.get().map_err(TaskRepositoryError::persistence)?;
            f(&mut connection)
        })
        .await
        .map_err(TaskRepositoryError::persistence)?
    }
}

#[async_trait]
impl TaskRepository for PostgresTaskRepository {
    async fn insert(&self, task: &Task) -> TaskRepositoryResult<()> {
        let task_id = task.id();
        let owner = task.owner();
        let is_unsaved = task.status() == TaskStatus::Unsaved;
        let new_row = to_new_row(task);

        self.run_blocking(move |connection| {
            // This pre-check improves semantic error reporting but is not
            // relied on for correctness: the partial unique index still
            // enforces the invariant in the TOCTOU window between check and
            // insert.
            if is_unsaved {
                let unsaved_held = find_unsaved_row(connection, owner)?.is_some();
                if unsaved_held {
                    return Err(TaskRepositoryError::UnsavedExists(owner));
                }
            }

            diesel::insert_into(tasks::table)
                .values(&new_row)
                .execute(connection)
                .map_err(|err| match err {
                    DieselError::DatabaseError(DatabaseErrorKind::UniqueViolation, ref info)
                        if is_owner_unsaved_unique_violation(info.as_ref()) =>
                    {
                        TaskRepositoryError::UnsavedExists(owner)
                    }
                    DieselError::DatabaseError(DatabaseErrorKind::UniqueViolation, _) => {
                        TaskRepositoryError::DuplicateTask(task_id)
                    }
                    _ => TaskRepositoryError::persistence(err),
                })?;

            Ok(())
        })
        .await
    }

    async fn update(&self, task: &Task) -> TaskRepositoryResult<()> {
        let task_id = task.id();
        let row = to_new_row(task);

        self.run_blocking(move |connection| {
            let updated = diesel::update(tasks::table.filter(tasks::id.eq(task_id.into_inner())))
                .set((
                    tasks::title.eq(row.title),
                    tasks::body.eq(row.body),
                    tasks::status.eq(row.status),
                    tasks::end_date.eq(row.end_date),
                    tasks::completed_date.eq(row.completed_date),
                    tasks::updated_at.eq(row.updated_at),
                ))
                .execute(connection)
                .map_err(TaskRepositoryError::persistence)?;

            if updated == 0 {
                return Err(TaskRepositoryError::NotFound(task_id));
            }
            Ok(())
        })
        .await
    }

    async fn find_for_owner(
        &self,
        owner: OwnerId,
        id: TaskId,
    ) -> TaskRepositoryResult<Option<Task>> {
        self.run_blocking(move |connection| {
            let row = tasks::table
                .filter(tasks::id.eq(id.into_inner()))
                .filter(tasks::user_id.eq(owner.into_inner()))
                .select(TaskRow::as_select())
                .first::<TaskRow>(connection)
                .optional()
                .map_err(TaskRepositoryError::persistence)?;
            row.map(row_to_task).transpose()
        })
        .await
    }

    async fn find_unsaved(&self, owner: OwnerId) -> TaskRepositoryResult<Option<Task>> {
        self.run_blocking(move |connection| {
            let row = find_unsaved_row(connection, owner)?;
            row.map(row_to_task).transpose()
        })
        .await
    }

    async fn list_for_owner(
        &self,
        owner: OwnerId,
        filter: OwnerTaskFilter,
    ) -> TaskRepositoryResult<Vec<Task>> {
        self.run_blocking(move |connection| {
            let mut query = tasks::table
                .filter(tasks::user_id.eq(owner.into_inner()))
                .filter(tasks::status.ne(TaskStatus::Unsaved.as_str()))
                .select(TaskRow::as_select())
                .into_boxed();
            if filter == OwnerTaskFilter::InProgress {
                query = query.filter(tasks::completed_date.is_null());
            }

            let rows = query
                .order(tasks::created_at.desc())
                .load::<TaskRow>(connection)
                .map_err(TaskRepositoryError::persistence)?;
            rows.into_iter().map(row_to_task).collect()
        })
        .await
    }

    async fn complete_all(
        &self,
        owner: OwnerId,
        ids: &[TaskId],
        completed_on: NaiveDate,
        now: DateTime<Utc>,
    ) -> TaskRepositoryResult<usize> {
        let id_values: Vec<uuid::Uuid> = ids.iter().map(|id| id.into_inner()).collect();

        self.run_blocking(move |connection| {
            diesel::update(
                tasks::table
                    .filter(tasks::user_id.eq(owner.into_inner()))
                    .filter(tasks::id.eq_any(id_values))
                    .filter(tasks::completed_date.is_null()),
            )
            .set((
                tasks::completed_date.eq(Some(completed_on)),
                tasks::updated_at.eq(now),
            ))
            .execute(connection)
            .map_err(TaskRepositoryError::persistence)
        })
        .await
    }

    async fn delete(&self, owner: OwnerId, id: TaskId) -> TaskRepositoryResult<bool> {
        self.run_blocking(move |connection| {
            let deleted = diesel::delete(
                tasks::table
                    .filter(tasks::id.eq(id.into_inner()))
                    .filter(tasks::user_id.eq(owner.into_inner())),
            )
            .execute(connection)
            .map_err(TaskRepositoryError::persistence)?;
            Ok(deleted > 0)
        })
        .await
    }

    async fn list_published(&self, page: u32) -> TaskRepositoryResult<PublishedPage> {
        self.run_blocking(move |connection| {
            let row_count: i64 = tasks::table
                .filter(tasks::status.eq(TaskStatus::Published.as_str()))
                .count()
                .get_result(connection)
                .map_err(TaskRepositoryError::persistence)?;
            let total = u32::try_from(row_count).map_err(TaskRepositoryError::persistence)?;
            let total_pages = total.div_ceil(FEED_PAGE_SIZE);

            let offset = i64::from(page.saturating_sub(1)) * i64::from(FEED_PAGE_SIZE);
            let rows = tasks::table
                .inner_join(users::table)
                .filter(tasks::status.eq(TaskStatus::Published.as_str()))
                .order(tasks::created_at.desc())
                .limit(i64::from(FEED_PAGE_SIZE))
                .offset(offset)
                .select((TaskRow::as_select(), users::name))
                .load::<(TaskRow, String)>(connection)
                .map_err(TaskRepositoryError::persistence)?;

            let page_tasks = rows
                .into_iter()
                .map(row_to_published)
                .collect::<TaskRepositoryResult<Vec<_>>>()?;

            Ok(PublishedPage {
                tasks: page_tasks,
                current_page: page,
                total_pages,
            })
        })
        .await
    }

    async fn find_published(&self, id: TaskId) -> TaskRepositoryResult<Option<PublishedTask>> {
        self.run_blocking(move |connection| {
            let row = tasks::table
                .inner_join(users::table)
                .filter(tasks::id.eq(id.into_inner()))
                .filter(tasks::status.eq(TaskStatus::Published.as_str()))
                .select((TaskRow::as_select(), users::name))
                .first::<(TaskRow, String)>(connection)
                .optional()
                .map_err(TaskRepositoryError::persistence)?;
            row.map(row_to_published).transpose()
        })
        .await
    }
}

fn to_new_row(task: &Task) -> NewTaskRow {
    NewTaskRow {
        id: task.id().into_inner(),
        user_id: task.owner().into_inner(),
        title: task.title().map(ToOwned::to_owned),
        body: task.body().map(ToOwned::to_owned),
        status: task.status().as_str().to_owned(),
        end_date: task.end_date(),
        completed_date: task.completed_date(),
        created_at: task.created_at(),
        updated_at: task.updated_at(),
    }
}

fn row_to_task(row: TaskRow) -> TaskRepositoryResult<Task> {
    let TaskRow {
        id,
        user_id,
        title,
        body,
        status: persisted_status,
        end_date,
        completed_date,
        created_at,
        updated_at,
    } = row;

    let status = TaskStatus::try_from(persisted_status.as_str())
        .map_err(TaskRepositoryError::persistence)?;

    let data = PersistedTaskData {
        id: TaskId::from_uuid(id),
        owner: OwnerId::from_uuid(user_id),
        title,
        body,
        status,
        end_date,
        completed_date,
        created_at,
        updated_at,
    };
    Ok(Task::from_persisted(data))
}

fn row_to_published((row, author): (TaskRow, String)) -> TaskRepositoryResult<PublishedTask> {
    let author = OwnerName::new(author).map_err(TaskRepositoryError::persistence)?;
    Ok(PublishedTask {
        task: row_to_task(row)?,
        author,
    })
}

fn is_owner_unsaved_unique_violation(info: &dyn DatabaseErrorInformation) -> bool {
    info.constraint_name()
        .is_some_and(|name| name == "idx_tasks_owner_unsaved_unique")
}

fn find_unsaved_row(
    connection: &mut PgConnection,
    owner: OwnerId,
) -> TaskRepositoryResult<Option<TaskRow>> {
    tasks::table
        .filter(tasks::user_id.eq(owner.into_inner()))
        .filter(tasks::status.eq(TaskStatus::Unsaved.as_str()))
        .select(TaskRow::as_select())
        .first::<TaskRow>(connection)
        .optional()
        .map_err(TaskRepositoryError::persistence)
}
