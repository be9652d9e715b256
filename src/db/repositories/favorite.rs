use std::collections::{BTreeSet, HashMap};

use anyhow::{Context, Result};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, ConnectionTrait, EntityTrait, QueryFilter, QueryOrder, Set,
};

use crate::entities::{favorites, people, planets, prelude::*, users};
use crate::models::FavoriteTarget;

/// A favorite row together with whatever related rows could be found.
#[derive(Debug, Clone)]
pub struct FavoriteWithRelations {
    pub favorite: favorites::Model,
    pub user: Option<users::Model>,
    pub person: Option<people::Model>,
    pub planet: Option<planets::Model>,
}

impl FavoriteWithRelations {
    #[must_use]
    pub fn related(&self) -> crate::models::favorite::Related<'_> {
        crate::models::favorite::Related {
            user: self.user.as_ref(),
            person: self.person.as_ref(),
            planet: self.planet.as_ref(),
        }
    }
}

/// Fields copied from the target when a favorite is created.
#[derive(Debug, Clone)]
pub struct NewFavorite<'s> {
    pub user_id: i32,
    pub target: FavoriteTarget,
    pub name: &'s str,
    pub url: &'s str,
}

pub struct FavoriteRepository<'a, C> {
    conn: &'a C,
}

impl<'a, C: ConnectionTrait> FavoriteRepository<'a, C> {
    #[must_use]
    pub const fn new(conn: &'a C) -> Self {
        Self { conn }
    }

    fn target_filter(target: FavoriteTarget) -> sea_orm::sea_query::SimpleExpr {
        match target {
            FavoriteTarget::Person(id) => favorites::Column::PeopleId.eq(id),
            FavoriteTarget::Planet(id) => favorites::Column::PlanetId.eq(id),
        }
    }

    pub async fn list_for_user(&self, user_id: i32) -> Result<Vec<favorites::Model>> {
        Favorites::find()
            .filter(favorites::Column::UserId.eq(user_id))
            .order_by_asc(favorites::Column::Id)
            .all(self.conn)
            .await
            .context("Failed to list favorites for user")
    }

    /// Favorites of a user with their user, person and planet rows batch-loaded.
    pub async fn list_for_user_with_relations(
        &self,
        user_id: i32,
    ) -> Result<Vec<FavoriteWithRelations>> {
        let rows = self.list_for_user(user_id).await?;
        if rows.is_empty() {
            return Ok(Vec::new());
        }

        let user_ids: BTreeSet<i32> = rows.iter().map(|r| r.user_id).collect();
        let people_ids: BTreeSet<i32> = rows.iter().filter_map(|r| r.people_id).collect();
        let planet_ids: BTreeSet<i32> = rows.iter().filter_map(|r| r.planet_id).collect();

        let users_by_id: HashMap<i32, users::Model> = Users::find()
            .filter(users::Column::Id.is_in(user_ids))
            .all(self.conn)
            .await
            .context("Failed to load favorite users")?
            .into_iter()
            .map(|u| (u.id, u))
            .collect();

        let people_by_id: HashMap<i32, people::Model> = if people_ids.is_empty() {
            HashMap::new()
        } else {
            People::find()
                .filter(people::Column::Id.is_in(people_ids))
                .all(self.conn)
                .await
                .context("Failed to load favorite people")?
                .into_iter()
                .map(|p| (p.id, p))
                .collect()
        };

        let planets_by_id: HashMap<i32, planets::Model> = if planet_ids.is_empty() {
            HashMap::new()
        } else {
            Planets::find()
                .filter(planets::Column::Id.is_in(planet_ids))
                .all(self.conn)
                .await
                .context("Failed to load favorite planets")?
                .into_iter()
                .map(|p| (p.id, p))
                .collect()
        };

        Ok(rows
            .into_iter()
            .map(|favorite| FavoriteWithRelations {
                user: users_by_id.get(&favorite.user_id).cloned(),
                person: favorite.people_id.and_then(|id| people_by_id.get(&id).cloned()),
                planet: favorite.planet_id.and_then(|id| planets_by_id.get(&id).cloned()),
                favorite,
            })
            .collect())
    }

    pub async fn create(&self, new: NewFavorite<'_>) -> Result<favorites::Model> {
        favorites::ActiveModel {
            user_id: Set(new.user_id),
            people_id: Set(new.target.people_id()),
            planet_id: Set(new.target.planet_id()),
            name: Set(Some(new.name.to_string())),
            url: Set(Some(new.url.to_string())),
            ..Default::default()
        }
        .insert(self.conn)
        .await
        .context("Failed to insert favorite")
    }

    /// Oldest favorite of `user_id` pointing at `target`.
    pub async fn find_first(
        &self,
        user_id: i32,
        target: FavoriteTarget,
    ) -> Result<Option<favorites::Model>> {
        Favorites::find()
            .filter(favorites::Column::UserId.eq(user_id))
            .filter(Self::target_filter(target))
            .order_by_asc(favorites::Column::Id)
            .one(self.conn)
            .await
            .context("Failed to query favorite")
    }

    pub async fn delete(&self, id: i32) -> Result<bool> {
        let result = Favorites::delete_by_id(id)
            .exec(self.conn)
            .await
            .context("Failed to delete favorite")?;

        Ok(result.rows_affected > 0)
    }
}
