//! In-process storage backend.

use async_trait::async_trait;
use chrono::{NaiveDate, Utc};
use std::collections::{BTreeMap, BTreeSet};
use tokio::sync::RwLock;

use super::Repository;
use crate::db::models::{
    Label, NewUser, TaskDetails, TaskFilter, TaskRecord, TaskStatus, User,
};
use crate::error::{AppError, AppResult};

#[derive(Debug, Clone)]
struct StoredTask {
    record: TaskRecord,
    created_at: NaiveDate,
}

#[derive(Debug, Default)]
struct Tables {
    users: BTreeMap<i64, User>,
    statuses: BTreeMap<i64, TaskStatus>,
    labels: BTreeMap<i64, Label>,
    tasks: BTreeMap<i64, StoredTask>,
    task_labels: BTreeMap<i64, BTreeSet<i64>>,
    user_seq: i64,
    status_seq: i64,
    label_seq: i64,
    task_seq: i64,
}

fn next_id(seq: &mut i64) -> i64 {
    *seq += 1;
    *seq
}

fn today() -> NaiveDate {
    Utc::now().date_naive()
}

impl Tables {
    fn details(&self, id: i64, task: &StoredTask) -> AppResult<TaskDetails> {
        let status = self
            .statuses
            .get(&task.record.task_status_id)
            .ok_or_else(|| {
                AppError::Internal(format!("Task {} references a missing status", id))
            })?;
        Ok(TaskDetails {
            id,
            name: task.record.name.clone(),
            task_index: task.record.task_index,
            description: task.record.description.clone(),
            task_status_id: status.id,
            status_slug: status.slug.clone(),
            assignee_id: task.record.assignee_id,
            label_ids: self
                .task_labels
                .get(&id)
                .map(|ids| ids.iter().copied().collect())
                .unwrap_or_default(),
            created_at: task.created_at,
        })
    }

    fn check_user_email(&self, email: &str, except: Option<i64>) -> AppResult<()> {
        let taken = self
            .users
            .values()
            .any(|u| u.email == email && Some(u.id) != except);
        if taken {
            return Err(AppError::Conflict(format!(
                "User with email '{}' already exists",
                email
            )));
        }
        Ok(())
    }

    fn check_status(&self, name: &str, slug: &str, except: Option<i64>) -> AppResult<()> {
        for status in self.statuses.values().filter(|s| Some(s.id) != except) {
            if status.name == name {
                return Err(AppError::Conflict(format!(
                    "Task status with name '{}' already exists",
                    name
                )));
            }
            if status.slug == slug {
                return Err(AppError::Conflict(format!(
                    "Task status with slug '{}' already exists",
                    slug
                )));
            }
        }
        Ok(())
    }

    fn check_label(&self, name: &str, except: Option<i64>) -> AppResult<()> {
        if self
            .labels
            .values()
            .any(|l| l.name == name && Some(l.id) != except)
        {
            return Err(AppError::Conflict(format!(
                "Label with name '{}' already exists",
                name
            )));
        }
        Ok(())
    }

    fn check_task_references(&self, task: &TaskRecord, label_ids: &[i64]) -> AppResult<()> {
        if !self.statuses.contains_key(&task.task_status_id) {
            return Err(AppError::Conflict(format!(
                "Task status {} does not exist",
                task.task_status_id
            )));
        }
        if let Some(assignee) = task.assignee_id {
            if !self.users.contains_key(&assignee) {
                return Err(AppError::Conflict(format!("User {} does not exist", assignee)));
            }
        }
        if let Some(missing) = label_ids.iter().find(|id| !self.labels.contains_key(id)) {
            return Err(AppError::Conflict(format!("Label {} does not exist", missing)));
        }
        Ok(())
    }

    fn matches(&self, id: i64, task: &StoredTask, filter: &TaskFilter) -> bool {
        if let Some(title) = &filter.title_cont {
            if !task
                .record
                .name
                .to_lowercase()
                .contains(&title.to_lowercase())
            {
                return false;
            }
        }
        if let Some(slug) = &filter.status {
            let status_slug = self
                .statuses
                .get(&task.record.task_status_id)
                .map(|s| s.slug.as_str());
            if status_slug != Some(slug.as_str()) {
                return false;
            }
        }
        if let Some(assignee) = filter.assignee_id {
            if task.record.assignee_id != Some(assignee) {
                return false;
            }
        }
        if let Some(label) = filter.label_id {
            let linked = self
                .task_labels
                .get(&id)
                .is_some_and(|ids| ids.contains(&label));
            if !linked {
                return false;
            }
        }
        true
    }
}

/// Repository keeping all tables behind one lock.
#[derive(Debug, Default)]
pub struct MemoryRepository {
    tables: RwLock<Tables>,
}

impl MemoryRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl Repository for MemoryRepository {
    fn backend(&self) -> &'static str {
        "memory"
    }

    async fn health_check(&self) -> bool {
        true
    }

    async fn list_users(&self) -> AppResult<Vec<User>> {
        Ok(self.tables.read().await.users.values().cloned().collect())
    }

    async fn get_user(&self, id: i64) -> AppResult<Option<User>> {
        Ok(self.tables.read().await.users.get(&id).cloned())
    }

    async fn find_user_by_email(&self, email: &str) -> AppResult<Option<User>> {
        let tables = self.tables.read().await;
        Ok(tables.users.values().find(|u| u.email == email).cloned())
    }

    async fn insert_user(&self, user: &NewUser) -> AppResult<User> {
        let mut tables = self.tables.write().await;
        tables.check_user_email(&user.email, None)?;
        let now = today();
        let row = User {
            id: next_id(&mut tables.user_seq),
            first_name: user.first_name.clone(),
            last_name: user.last_name.clone(),
            email: user.email.clone(),
            password_hash: user.password_hash.clone(),
            role: user.role.as_str().to_string(),
            created_at: now,
            updated_at: now,
        };
        tables.users.insert(row.id, row.clone());
        Ok(row)
    }

    async fn update_user(&self, user: &User) -> AppResult<User> {
        let mut tables = self.tables.write().await;
        if !tables.users.contains_key(&user.id) {
            return Err(AppError::NotFound(format!("No user with id {}", user.id)));
        }
        tables.check_user_email(&user.email, Some(user.id))?;
        let mut row = user.clone();
        row.updated_at = today();
        tables.users.insert(row.id, row.clone());
        Ok(row)
    }

    async fn delete_user(&self, id: i64) -> AppResult<bool> {
        let mut tables = self.tables.write().await;
        if tables
            .tasks
            .values()
            .any(|t| t.record.assignee_id == Some(id))
        {
            return Err(AppError::Conflict(format!(
                "User {} is assigned to a task",
                id
            )));
        }
        Ok(tables.users.remove(&id).is_some())
    }

    async fn count_users(&self) -> AppResult<i64> {
        Ok(self.tables.read().await.users.len() as i64)
    }

    async fn user_has_tasks(&self, id: i64) -> AppResult<bool> {
        let tables = self.tables.read().await;
        Ok(tables
            .tasks
            .values()
            .any(|t| t.record.assignee_id == Some(id)))
    }

    async fn list_statuses(&self) -> AppResult<Vec<TaskStatus>> {
        Ok(self.tables.read().await.statuses.values().cloned().collect())
    }

    async fn get_status(&self, id: i64) -> AppResult<Option<TaskStatus>> {
        Ok(self.tables.read().await.statuses.get(&id).cloned())
    }

    async fn find_status_by_slug(&self, slug: &str) -> AppResult<Option<TaskStatus>> {
        let tables = self.tables.read().await;
        Ok(tables.statuses.values().find(|s| s.slug == slug).cloned())
    }

    async fn insert_status(&self, name: &str, slug: &str) -> AppResult<TaskStatus> {
        let mut tables = self.tables.write().await;
        tables.check_status(name, slug, None)?;
        let row = TaskStatus {
            id: next_id(&mut tables.status_seq),
            name: name.to_string(),
            slug: slug.to_string(),
            created_at: today(),
        };
        tables.statuses.insert(row.id, row.clone());
        Ok(row)
    }

    async fn update_status(&self, status: &TaskStatus) -> AppResult<TaskStatus> {
        let mut tables = self.tables.write().await;
        if !tables.statuses.contains_key(&status.id) {
            return Err(AppError::NotFound(format!(
                "No task status with id {}",
                status.id
            )));
        }
        tables.check_status(&status.name, &status.slug, Some(status.id))?;
        tables.statuses.insert(status.id, status.clone());
        Ok(status.clone())
    }

    async fn delete_status(&self, id: i64) -> AppResult<bool> {
        let mut tables = self.tables.write().await;
        if tables
            .tasks
            .values()
            .any(|t| t.record.task_status_id == id)
        {
            return Err(AppError::Conflict(format!(
                "Task status {} is used by a task",
                id
            )));
        }
        Ok(tables.statuses.remove(&id).is_some())
    }

    async fn status_in_use(&self, id: i64) -> AppResult<bool> {
        let tables = self.tables.read().await;
        Ok(tables
            .tasks
            .values()
            .any(|t| t.record.task_status_id == id))
    }

    async fn list_labels(&self) -> AppResult<Vec<Label>> {
        Ok(self.tables.read().await.labels.values().cloned().collect())
    }

    async fn get_label(&self, id: i64) -> AppResult<Option<Label>> {
        Ok(self.tables.read().await.labels.get(&id).cloned())
    }

    async fn insert_label(&self, name: &str) -> AppResult<Label> {
        let mut tables = self.tables.write().await;
        tables.check_label(name, None)?;
        let row = Label {
            id: next_id(&mut tables.label_seq),
            name: name.to_string(),
            created_at: today(),
        };
        tables.labels.insert(row.id, row.clone());
        Ok(row)
    }

    async fn update_label(&self, label: &Label) -> AppResult<Label> {
        let mut tables = self.tables.write().await;
        if !tables.labels.contains_key(&label.id) {
            return Err(AppError::NotFound(format!("No label with id {}", label.id)));
        }
        tables.check_label(&label.name, Some(label.id))?;
        tables.labels.insert(label.id, label.clone());
        Ok(label.clone())
    }

    async fn delete_label(&self, id: i64) -> AppResult<bool> {
        let mut tables = self.tables.write().await;
        if tables.task_labels.values().any(|ids| ids.contains(&id)) {
            return Err(AppError::Conflict(format!(
                "Label {} is attached to a task",
                id
            )));
        }
        Ok(tables.labels.remove(&id).is_some())
    }

    async fn label_in_use(&self, id: i64) -> AppResult<bool> {
        let tables = self.tables.read().await;
        Ok(tables.task_labels.values().any(|ids| ids.contains(&id)))
    }

    async fn list_tasks(&self, filter: &TaskFilter) -> AppResult<Vec<TaskDetails>> {
        let tables = self.tables.read().await;
        tables
            .tasks
            .iter()
            .filter(|(id, task)| tables.matches(**id, task, filter))
            .map(|(id, task)| tables.details(*id, task))
            .collect()
    }

    async fn get_task(&self, id: i64) -> AppResult<Option<TaskDetails>> {
        let tables = self.tables.read().await;
        tables
            .tasks
            .get(&id)
            .map(|task| tables.details(id, task))
            .transpose()
    }

    async fn insert_task(&self, task: &TaskRecord, label_ids: &[i64]) -> AppResult<i64> {
        let mut tables = self.tables.write().await;
        tables.check_task_references(task, label_ids)?;
        let id = next_id(&mut tables.task_seq);
        tables.tasks.insert(
            id,
            StoredTask {
                record: task.clone(),
                created_at: today(),
            },
        );
        if !label_ids.is_empty() {
            tables
                .task_labels
                .insert(id, label_ids.iter().copied().collect());
        }
        Ok(id)
    }

    async fn update_task(
        &self,
        id: i64,
        task: &TaskRecord,
        label_ids: Option<&[i64]>,
    ) -> AppResult<bool> {
        let mut tables = self.tables.write().await;
        if !tables.tasks.contains_key(&id) {
            return Ok(false);
        }
        tables.check_task_references(task, label_ids.unwrap_or_default())?;
        if let Some(stored) = tables.tasks.get_mut(&id) {
            stored.record = task.clone();
        }
        if let Some(label_ids) = label_ids {
            tables
                .task_labels
                .insert(id, label_ids.iter().copied().collect());
        }
        Ok(true)
    }

    async fn delete_task(&self, id: i64) -> AppResult<bool> {
        let mut tables = self.tables.write().await;
        tables.task_labels.remove(&id);
        Ok(tables.tasks.remove(&id).is_some())
    }

    async fn count_tasks(&self) -> AppResult<i64> {
        Ok(self.tables.read().await.tasks.len() as i64)
    }
}
