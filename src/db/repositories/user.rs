use anyhow::{Context, Result};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, ConnectionTrait, EntityTrait, PaginatorTrait, QueryFilter,
    QueryOrder, Set,
};

use crate::entities::{prelude::*, users};

pub struct UserRepository<'a, C> {
    conn: &'a C,
}

impl<'a, C: ConnectionTrait> UserRepository<'a, C> {
    #[must_use]
    pub const fn new(conn: &'a C) -> Self {
        Self { conn }
    }

    /// All users ordered by email, ties broken by id.
    pub async fn list(&self) -> Result<Vec<users::Model>> {
        Users::find()
            .order_by_asc(users::Column::Email)
            .order_by_asc(users::Column::Id)
            .all(self.conn)
            .await
            .context("Failed to list users")
    }

    pub async fn get(&self, id: i32) -> Result<Option<users::Model>> {
        Users::find_by_id(id)
            .one(self.conn)
            .await
            .context("Failed to query user by ID")
    }

    pub async fn email_exists(&self, email: &str) -> Result<bool> {
        let count = Users::find()
            .filter(users::Column::Email.eq(email))
            .count(self.conn)
            .await
            .context("Failed to query user by email")?;

        Ok(count > 0)
    }

    pub async fn insert(&self, email: &str, password: &str, is_active: bool) -> Result<users::Model> {
        users::ActiveModel {
            email: Set(email.to_string()),
            password: Set(password.to_string()),
            is_active: Set(is_active),
            ..Default::default()
        }
        .insert(self.conn)
        .await
        .with_context(|| format!("Failed to insert user '{email}'"))
    }
}
