use std::sync::Mutex;

use anyhow::Context;
use async_trait::async_trait;
use sqlx::PgPool;

use crate::auth::repo_types::{NewUser, User};

#[async_trait]
pub trait UserRepo: Send + Sync {
    async fn find_by_email(&self, email: &str) -> anyhow::Result<Option<User>>;
    async fn create(&self, user: NewUser) -> anyhow::Result<User>;
}

#[derive(Clone)]
pub struct PgUserRepo {
    db: PgPool,
}

impl PgUserRepo {
    pub fn new(db: PgPool) -> Self {
        Self { db }
    }
}

#[async_trait]
impl UserRepo for PgUserRepo {
    async fn find_by_email(&self, email: &str) -> anyhow::Result<Option<User>> {
        let user = sqlx::query_as::<_, User>(
            r#"
            SELECT id, username, email, password_hash
            FROM users
            WHERE email = $1
            "#,
        )
        .bind(email)
        .fetch_optional(&self.db)
        .await
        .context("find user by email")?;
        Ok(user)
    }

    async fn create(&self, user: NewUser) -> anyhow::Result<User> {
        let user = sqlx::query_as::<_, User>(
            r#"
            INSERT INTO users (username, email, password_hash)
            VALUES ($1, $2, $3)
            RETURNING id, username, email, password_hash
            "#,
        )
        .bind(user.username)
        .bind(user.email)
        .bind(user.password_hash)
        .fetch_one(&self.db)
        .await
        .context("insert user")?;
        Ok(user)
    }
}

/// Process-local store used with `DATABASE_URL=memory:` and in tests.
#[derive(Default)]
pub struct InMemoryUserRepo {
    rows: Mutex<Vec<User>>,
}

#[async_trait]
impl UserRepo for InMemoryUserRepo {
    async fn find_by_email(&self, email: &str) -> anyhow::Result<Option<User>> {
        let rows = self
            .rows
            .lock()
            .map_err(|_| anyhow::anyhow!("user store lock poisoned"))?;
        Ok(rows.iter().find(|u| u.email == email).cloned())
    }

    async fn create(&self, user: NewUser) -> anyhow::Result<User> {
        let mut rows = self
            .rows
            .lock()
            .map_err(|_| anyhow::anyhow!("user store lock poisoned"))?;
        // mirrors the unique index on users.email
        if rows.iter().any(|u| u.email == user.email) {
            anyhow::bail!("insert user: duplicate email");
        }
        let stored = User {
            id: rows.len() as i64 + 1,
            username: user.username,
            email: user.email,
            password_hash: user.password_hash,
        };
        rows.push(stored.clone());
        Ok(stored)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn new_user(email: &str) -> NewUser {
        NewUser {
            username: None,
            email: email.into(),
            password_hash: "$argon2id$fake".into(),
        }
    }

    #[tokio::test]
    async fn in_memory_assigns_sequential_ids() {
        let repo = InMemoryUserRepo::default();
        let a = repo.create(new_user("a@b.com")).await.unwrap();
        let b = repo.create(new_user("c@d.com")).await.unwrap();
        assert_eq!(a.id, 1);
        assert_eq!(b.id, 2);
    }

    #[tokio::test]
    async fn in_memory_finds_by_exact_email() {
        let repo = InMemoryUserRepo::default();
        repo.create(new_user("a@b.com")).await.unwrap();
        assert!(repo.find_by_email("a@b.com").await.unwrap().is_some());
        assert!(repo.find_by_email("A@b.com").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn in_memory_rejects_duplicate_email() {
        let repo = InMemoryUserRepo::default();
        repo.create(new_user("a@b.com")).await.unwrap();
        assert!(repo.create(new_user("a@b.com")).await.is_err());
    }
}
