//! Favorite creation and deletion.
//!
//! Creation takes the owning user from the path. Deletion acts on behalf of
//! the [`ActingUser`], which defaults to user 1 when the request names no one.

use axum::{Json, extract::Path};

use super::extract::ActingUser;
use super::{ApiError, MessageResponse};
use crate::db::UnitOfWork;
use crate::models::FavoriteTarget;
use crate::services::FavoriteService;

async fn add(
    uow: UnitOfWork,
    user_id: i32,
    target: FavoriteTarget,
) -> Result<Json<MessageResponse>, ApiError> {
    let result = FavoriteService::new(&uow)
        .add(user_id, target)
        .await
        .map_err(ApiError::from);
    uow.finish(result).await?;

    Ok(Json(MessageResponse::new(format!(
        "{} added to favorites",
        target.kind().message_label()
    ))))
}

async fn remove(
    uow: UnitOfWork,
    user_id: i32,
    target: FavoriteTarget,
) -> Result<Json<MessageResponse>, ApiError> {
    let result = FavoriteService::new(&uow)
        .remove(user_id, target)
        .await
        .map_err(ApiError::from);
    uow.finish(result).await?;

    Ok(Json(MessageResponse::new(format!(
        "{} removed from favorites",
        target.kind().message_label()
    ))))
}

/// `POST /users/{user_id}/favorite/planet/{planet_id}`
pub async fn add_planet_favorite(
    Path((user_id, planet_id)): Path<(i32, i32)>,
    uow: UnitOfWork,
) -> Result<Json<MessageResponse>, ApiError> {
    add(uow, user_id, FavoriteTarget::Planet(planet_id)).await
}

/// `POST /users/{user_id}/favorite/people/{people_id}`
pub async fn add_person_favorite(
    Path((user_id, people_id)): Path<(i32, i32)>,
    uow: UnitOfWork,
) -> Result<Json<MessageResponse>, ApiError> {
    add(uow, user_id, FavoriteTarget::Person(people_id)).await
}

/// `DELETE /favorite/planet/{planet_id}`
pub async fn delete_planet_favorite(
    Path(planet_id): Path<i32>,
    ActingUser(user_id): ActingUser,
    uow: UnitOfWork,
) -> Result<Json<MessageResponse>, ApiError> {
    remove(uow, user_id, FavoriteTarget::Planet(planet_id)).await
}

/// `DELETE /favorite/people/{people_id}`
pub async fn delete_person_favorite(
    Path(people_id): Path<i32>,
    ActingUser(user_id): ActingUser,
    uow: UnitOfWork,
) -> Result<Json<MessageResponse>, ApiError> {
    remove(uow, user_id, FavoriteTarget::Person(people_id)).await
}

