use axum::{Json, extract::Path};

use super::{ApiError, ItemResponse, ListResponse};
use crate::db::UnitOfWork;
use crate::models::Planet;

/// `GET /planets`, ordered by name.
pub async fn list_planets(uow: UnitOfWork) -> Result<Json<ListResponse<Planet>>, ApiError> {
    let result = uow
        .planets()
        .list()
        .await
        .map(|rows| rows.into_iter().map(Planet::from).collect::<Vec<_>>())
        .map_err(ApiError::from);

    let planets = uow.finish(result).await?;
    Ok(Json(ListResponse::new(
        "Hello, this is your GET/planet response ",
        planets,
    )))
}

/// `GET /planets/{id}`
pub async fn get_planet(
    Path(id): Path<i32>,
    uow: UnitOfWork,
) -> Result<Json<ItemResponse<Planet>>, ApiError> {
    let result = match uow.planets().get(id).await {
        Ok(Some(row)) => Ok(Planet::from(row)),
        Ok(None) => Err(ApiError::not_found("Planet", id)),
        Err(e) => Err(e.into()),
    };

    let planet = uow.finish(result).await?;
    Ok(Json(ItemResponse::new(
        format!("This is the planet with id: {id}"),
        planet,
    )))
}
