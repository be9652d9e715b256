//! Domain service for favorites.
//!
//! Every method runs against the caller's [`UnitOfWork`]; committing is the
//! caller's job, so one request maps to exactly one transaction.

use thiserror::Error;
use tracing::info;

use crate::db::{NewFavorite, UnitOfWork};
use crate::entities::favorites;
use crate::models::{Favorite, FavoriteTarget, SerializeError, TargetKind};

/// Errors specific to favorite operations.
#[derive(Debug, Error)]
pub enum FavoriteError {
    #[error("User {0} not found")]
    UserNotFound(i32),

    #[error("{0} {1} not found")]
    TargetNotFound(TargetKind, i32),

    #[error("Favorite not found")]
    FavoriteNotFound,

    #[error(transparent)]
    Serialize(#[from] SerializeError),

    #[error("Database error: {0}")]
    Database(String),
}

impl From<anyhow::Error> for FavoriteError {
    fn from(err: anyhow::Error) -> Self {
        Self::Database(format!("{err:#}"))
    }
}

impl From<sea_orm::DbErr> for FavoriteError {
    fn from(err: sea_orm::DbErr) -> Self {
        Self::Database(err.to_string())
    }
}

pub struct FavoriteService<'a> {
    uow: &'a UnitOfWork,
}

impl<'a> FavoriteService<'a> {
    #[must_use]
    pub const fn new(uow: &'a UnitOfWork) -> Self {
        Self { uow }
    }

    /// Serialized favorites of `user_id`. An unknown user has no favorites.
    pub async fn list_for_user(&self, user_id: i32) -> Result<Vec<Favorite>, FavoriteError> {
        let rows = self
            .uow
            .favorites()
            .list_for_user_with_relations(user_id)
            .await?;

        rows.iter()
            .map(|row| Favorite::assemble(&row.favorite, row.related()).map_err(Into::into))
            .collect()
    }

    /// Records that `user_id` likes `target`, copying the target's name and url.
    ///
    /// Repeated calls create repeated rows.
    pub async fn add(
        &self,
        user_id: i32,
        target: FavoriteTarget,
    ) -> Result<favorites::Model, FavoriteError> {
        let user = self
            .uow
            .users()
            .get(user_id)
            .await?
            .ok_or(FavoriteError::UserNotFound(user_id))?;

        let not_found = || FavoriteError::TargetNotFound(target.kind(), target.id());
        let (name, url) = match target {
            FavoriteTarget::Person(id) => {
                let person = self.uow.people().get(id).await?.ok_or_else(not_found)?;
                (person.name, person.url)
            }
            FavoriteTarget::Planet(id) => {
                let planet = self.uow.planets().get(id).await?.ok_or_else(not_found)?;
                (planet.name, planet.url)
            }
        };

        let favorite = self
            .uow
            .favorites()
            .create(NewFavorite {
                user_id: user.id,
                target,
                name: &name,
                url: &url,
            })
            .await?;

        info!(
            favorite_id = favorite.id,
            user_id = user.id,
            target = %target.kind(),
            target_id = target.id(),
            "Favorite added"
        );
        Ok(favorite)
    }

    /// Deletes the oldest favorite of `user_id` pointing at `target`.
    pub async fn remove(
        &self,
        user_id: i32,
        target: FavoriteTarget,
    ) -> Result<favorites::Model, FavoriteError> {
        let favorites = self.uow.favorites();
        let favorite = favorites
            .find_first(user_id, target)
            .await?
            .ok_or(FavoriteError::FavoriteNotFound)?;

        if !favorites.delete(favorite.id).await? {
            return Err(FavoriteError::FavoriteNotFound);
        }

        info!(
            favorite_id = favorite.id,
            user_id,
            target = %target.kind(),
            target_id = target.id(),
            "Favorite removed"
        );
        Ok(favorite)
    }
}
