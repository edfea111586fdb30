//! Startup data: the administrator, the default task statuses and, on
//! request, random demo users and tasks. Every step is idempotent.

use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};

use crate::auth::{PasswordHasher, Role};
use crate::config::AppConfig;
use crate::db::models::{NewUser, TaskRecord};
use crate::error::AppResult;
use crate::repository::Repository;
use crate::state::AppState;

/// `(slug, name)` pairs created when no status exists.
pub const DEFAULT_STATUSES: [(&str, &str); 5] = [
    ("draft", "Draft"),
    ("to_review", "ToReview"),
    ("to_be_fixed", "ToBeFixed"),
    ("to_publish", "ToPublish"),
    ("published", "Published"),
];

const DEMO_USERS: usize = 3;
const DEMO_TASKS: usize = 5;

const FIRST_NAMES: &[&str] = &["Alice", "Boris", "Chloe", "Dmitry", "Elena", "Farid", "Grace"];
const LAST_NAMES: &[&str] = &["Ivanova", "Smith", "Novak", "Garcia", "Kowalski", "Tanaka"];
const TASK_TITLES: &[&str] = &[
    "Saffron", "Basil", "Cumin", "Paprika", "Fennel", "Nutmeg", "Oregano", "Turmeric",
];
const TASK_CONTENTS: &[&str] = &[
    "The Sun Also Rises",
    "Brave New World",
    "The Glass Bead Game",
    "A Farewell to Arms",
    "The Road",
    "Dune",
];

/// Run every bootstrap step against the state's repository.
pub async fn run(state: &AppState) -> AppResult<()> {
    let repo = state.repo.as_ref();
    ensure_admin(repo, &state.passwords, &state.config).await?;
    ensure_default_statuses(repo).await?;
    if state.config.seed_demo_data {
        seed_demo_data(repo, &state.passwords).await?;
    }
    Ok(())
}

/// Create the configured administrator unless that email already exists.
pub async fn ensure_admin(
    repo: &dyn Repository,
    passwords: &PasswordHasher,
    config: &AppConfig,
) -> AppResult<()> {
    if repo.find_user_by_email(&config.admin_email).await?.is_some() {
        return Ok(());
    }

    let admin = repo
        .insert_user(&NewUser {
            first_name: Some("Hexlet".to_string()),
            last_name: Some("Admin".to_string()),
            email: config.admin_email.clone(),
            password_hash: passwords.hash(&config.admin_password).await?,
            role: Role::Admin,
        })
        .await?;

    tracing::info!(user_id = admin.id, email = %admin.email, "Administrator created");
    Ok(())
}

/// Insert [`DEFAULT_STATUSES`] when the table is empty.
pub async fn ensure_default_statuses(repo: &dyn Repository) -> AppResult<()> {
    if !repo.list_statuses().await?.is_empty() {
        return Ok(());
    }

    for (slug, name) in DEFAULT_STATUSES {
        repo.insert_status(name, slug).await?;
    }

    tracing::info!(count = DEFAULT_STATUSES.len(), "Default task statuses created");
    Ok(())
}

struct DemoUser {
    first_name: String,
    last_name: String,
    email: String,
    password: String,
}

fn demo_users(rng: &mut StdRng) -> Vec<DemoUser> {
    (0..DEMO_USERS)
        .map(|_| {
            let first = FIRST_NAMES.choose(rng).copied().unwrap_or("Demo");
            let last = LAST_NAMES.choose(rng).copied().unwrap_or("User");
            let tag: u32 = rng.gen_range(1000..10000);
            DemoUser {
                first_name: first.to_string(),
                last_name: last.to_string(),
                email: format!(
                    "{}.{}{}@example.com",
                    first.to_lowercase(),
                    last.to_lowercase(),
                    tag
                ),
                password: format!("demo{}", tag),
            }
        })
        .collect()
}

/// Add random users when at most the administrator exists, and random
/// tasks when there are none.
pub async fn seed_demo_data(repo: &dyn Repository, passwords: &PasswordHasher) -> AppResult<()> {
    let mut rng = StdRng::from_entropy();

    if repo.count_users().await? <= 1 {
        for user in demo_users(&mut rng) {
            repo.insert_user(&NewUser {
                first_name: Some(user.first_name),
                last_name: Some(user.last_name),
                email: user.email,
                password_hash: passwords.hash(&user.password).await?,
                role: Role::User,
            })
            .await?;
        }
        tracing::info!(count = DEMO_USERS, "Demo users created");
    }

    if repo.count_tasks().await? > 0 {
        return Ok(());
    }

    let status_ids: Vec<i64> = repo.list_statuses().await?.iter().map(|s| s.id).collect();
    let user_ids: Vec<i64> = repo.list_users().await?.iter().map(|u| u.id).collect();
    if status_ids.is_empty() {
        tracing::warn!("No task statuses available, skipping demo tasks");
        return Ok(());
    }

    for _ in 0..DEMO_TASKS {
        let record = TaskRecord {
            name: TASK_TITLES.choose(&mut rng).copied().unwrap_or("Task").to_string(),
            task_index: Some(rng.gen_range(0..10)),
            description: TASK_CONTENTS.choose(&mut rng).map(|s| s.to_string()),
            task_status_id: status_ids[rng.gen_range(0..status_ids.len())],
            assignee_id: user_ids.choose(&mut rng).copied(),
        };
        repo.insert_task(&record, &[]).await?;
    }

    tracing::info!(count = DEMO_TASKS, "Demo tasks created");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::models::TaskFilter;
    use crate::repository::MemoryRepository;

    #[tokio::test]
    async fn test_bootstrap_is_idempotent() {
        let repo = MemoryRepository::new();
        let passwords = PasswordHasher::new(4);
        let config = AppConfig::default();

        for _ in 0..2 {
            ensure_admin(&repo, &passwords, &config).await.unwrap();
            ensure_default_statuses(&repo).await.unwrap();
        }

        assert_eq!(repo.count_users().await.unwrap(), 1);
        let admin = repo
            .find_user_by_email("hexlet@example.com")
            .await
            .unwrap()
            .unwrap();
        assert_eq!(admin.role(), Role::Admin);
        assert!(passwords.verify("qwerty", &admin.password_hash).await.unwrap());

        let slugs: Vec<String> = repo
            .list_statuses()
            .await
            .unwrap()
            .into_iter()
            .map(|s| s.slug)
            .collect();
        assert_eq!(
            slugs,
            vec!["draft", "to_review", "to_be_fixed", "to_publish", "published"]
        );
    }

    #[tokio::test]
    async fn test_demo_data() {
        let repo = MemoryRepository::new();
        let passwords = PasswordHasher::new(4);
        ensure_admin(&repo, &passwords, &AppConfig::default())
            .await
            .unwrap();
        ensure_default_statuses(&repo).await.unwrap();

        seed_demo_data(&repo, &passwords).await.unwrap();
        seed_demo_data(&repo, &passwords).await.unwrap();

        assert_eq!(repo.count_users().await.unwrap(), 1 + DEMO_USERS as i64);
        let tasks = repo.list_tasks(&TaskFilter::default()).await.unwrap();
        assert_eq!(tasks.len(), DEMO_TASKS);
        assert!(tasks.iter().all(|t| t.assignee_id.is_some()));
    }
}
