use axum::{Json, extract::Path};

use super::{ApiError, ItemResponse, ListResponse};
use crate::db::UnitOfWork;
use crate::models::Person;

/// `GET /people`, ordered by name.
pub async fn list_people(uow: UnitOfWork) -> Result<Json<ListResponse<Person>>, ApiError> {
    let result = uow
        .people()
        .list()
        .await
        .map(|rows| rows.into_iter().map(Person::from).collect::<Vec<_>>())
        .map_err(ApiError::from);

    let people = uow.finish(result).await?;
    Ok(Json(ListResponse::new(
        "Hello, this is your GET/people response ",
        people,
    )))
}

/// `GET /people/{id}`
pub async fn get_person(
    Path(id): Path<i32>,
    uow: UnitOfWork,
) -> Result<Json<ItemResponse<Person>>, ApiError> {
    let result = match uow.people().get(id).await {
        Ok(Some(row)) => Ok(Person::from(row)),
        Ok(None) => Err(ApiError::not_found("Person", id)),
        Err(e) => Err(e.into()),
    };

    let person = uow.finish(result).await?;
    Ok(Json(ItemResponse::new(
        format!("This is the person with id: {id}"),
        person,
    )))
}
