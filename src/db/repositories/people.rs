use crate::entities::{people, prelude::*};
use anyhow::{Context, Result};
use sea_orm::{ActiveModelTrait, ConnectionTrait, EntityTrait, QueryOrder, Set};

pub struct PersonRepository<'a, C> {
    conn: &'a C,
}

impl<'a, C: ConnectionTrait> PersonRepository<'a, C> {
    #[must_use]
    pub const fn new(conn: &'a C) -> Self {
        Self { conn }
    }

    /// All people ordered by name, ties broken by id.
    pub async fn list(&self) -> Result<Vec<people::Model>> {
        People::find()
            .order_by_asc(people::Column::Name)
            .order_by_asc(people::Column::Id)
            .all(self.conn)
            .await
            .context("Failed to list people")
    }

    pub async fn get(&self, id: i32) -> Result<Option<people::Model>> {
        People::find_by_id(id)
            .one(self.conn)
            .await
            .context("Failed to query person by ID")
    }

    pub async fn insert(&self, name: &str, url: &str) -> Result<people::Model> {
        people::ActiveModel {
            name: Set(name.to_string()),
            url: Set(url.to_string()),
            ..Default::default()
        }
        .insert(self.conn)
        .await
        .with_context(|| format!("Failed to insert person '{name}'"))
    }
}
