use axum::{Json, extract::Path};

use super::{ApiError, ItemResponse, ListResponse};
use crate::db::UnitOfWork;
use crate::models::{Favorite, User};
use crate::services::FavoriteService;

/// `GET /users`, ordered by email.
pub async fn list_users(uow: UnitOfWork) -> Result<Json<ListResponse<User>>, ApiError> {
    let result = uow
        .users()
        .list()
        .await
        .map(|rows| rows.into_iter().map(User::from).collect::<Vec<_>>())
        .map_err(ApiError::from);

    let users = uow.finish(result).await?;
    Ok(Json(ListResponse::new(
        "Hello, this is your GET /user response ",
        users,
    )))
}

/// `GET /users/{id}`
pub async fn get_user(
    Path(id): Path<i32>,
    uow: UnitOfWork,
) -> Result<Json<ItemResponse<User>>, ApiError> {
    let result = match uow.users().get(id).await {
        Ok(Some(row)) => Ok(User::from(row)),
        Ok(None) => Err(ApiError::not_found("User", id)),
        Err(e) => Err(e.into()),
    };

    let user = uow.finish(result).await?;
    Ok(Json(ItemResponse::new(
        format!("This is the user with id: {id} "),
        user,
    )))
}

/// `GET /users/{id}/favorites`
///
/// Returns a bare array. The user is not looked up, so an unknown id yields
/// `[]` rather than 404.
pub async fn list_user_favorites(
    Path(id): Path<i32>,
    uow: UnitOfWork,
) -> Result<Json<Vec<Favorite>>, ApiError> {
    let result = FavoriteService::new(&uow)
        .list_for_user(id)
        .await
        .map_err(ApiError::from);

    let favorites = uow.finish(result).await?;
    Ok(Json(favorites))
}
