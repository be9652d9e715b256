use crate::entities::{planets, prelude::*};
use anyhow::{Context, Result};
use sea_orm::{ActiveModelTrait, ConnectionTrait, EntityTrait, QueryOrder, Set};

pub struct PlanetRepository<'a, C> {
    conn: &'a C,
}

impl<'a, C: ConnectionTrait> PlanetRepository<'a, C> {
    #[must_use]
    pub const fn new(conn: &'a C) -> Self {
        Self { conn }
    }

    /// All planets ordered by name, ties broken by id.
    pub async fn list(&self) -> Result<Vec<planets::Model>> {
        Planets::find()
            .order_by_asc(planets::Column::Name)
            .order_by_asc(planets::Column::Id)
            .all(self.conn)
            .await
            .context("Failed to list planets")
    }

    pub async fn get(&self, id: i32) -> Result<Option<planets::Model>> {
        Planets::find_by_id(id)
            .one(self.conn)
            .await
            .context("Failed to query planet by ID")
    }

    pub async fn insert(&self, name: &str, url: &str) -> Result<planets::Model> {
        planets::ActiveModel {
            name: Set(name.to_string()),
            url: Set(url.to_string()),
            ..Default::default()
        }
        .insert(self.conn)
        .await
        .with_context(|| format!("Failed to insert planet '{name}'"))
    }
}
