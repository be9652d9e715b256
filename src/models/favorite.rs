//! Favorites: the join between a user and a liked person or planet.
//!
//! Storage keeps two nullable foreign keys on one row. Everything above the
//! repository layer works with [`FavoriteTarget`] instead, which makes the
//! "exactly one target" rule explicit.

use serde::Serialize;
use std::fmt;
use thiserror::Error;

use crate::entities::{favorites, people, planets, users};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TargetKind {
    Person,
    Planet,
}

impl TargetKind {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Person => "Person",
            Self::Planet => "Planet",
        }
    }

    /// Label used in the favorites acknowledgement messages.
    #[must_use]
    pub const fn message_label(self) -> &'static str {
        match self {
            Self::Person => "People",
            Self::Planet => "Planet",
        }
    }
}

impl fmt::Display for TargetKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FavoriteTarget {
    Person(i32),
    Planet(i32),
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FavoriteTargetError {
    #[error("favorite references both person {people_id} and planet {planet_id}")]
    Ambiguous { people_id: i32, planet_id: i32 },

    #[error("favorite references neither a person nor a planet")]
    Missing,
}

impl FavoriteTarget {
    pub const fn from_columns(
        people_id: Option<i32>,
        planet_id: Option<i32>,
    ) -> Result<Self, FavoriteTargetError> {
        match (people_id, planet_id) {
            (Some(id), None) => Ok(Self::Person(id)),
            (None, Some(id)) => Ok(Self::Planet(id)),
            (Some(people_id), Some(planet_id)) => Err(FavoriteTargetError::Ambiguous {
                people_id,
                planet_id,
            }),
            (None, None) => Err(FavoriteTargetError::Missing),
        }
    }

    #[must_use]
    pub const fn kind(self) -> TargetKind {
        match self {
            Self::Person(_) => TargetKind::Person,
            Self::Planet(_) => TargetKind::Planet,
        }
    }

    #[must_use]
    pub const fn id(self) -> i32 {
        match self {
            Self::Person(id) | Self::Planet(id) => id,
        }
    }

    #[must_use]
    pub const fn people_id(self) -> Option<i32> {
        match self {
            Self::Person(id) => Some(id),
            Self::Planet(_) => None,
        }
    }

    #[must_use]
    pub const fn planet_id(self) -> Option<i32> {
        match self {
            Self::Planet(id) => Some(id),
            Self::Person(_) => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NamedRef {
    pub id: i32,
    pub name: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct UserRef {
    pub id: i32,
    pub email: String,
}

/// Serialized favorite. The unused target serializes as `null`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Favorite {
    pub id: i32,
    pub people: Option<NamedRef>,
    pub planet: Option<NamedRef>,
    pub user: UserRef,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SerializeError {
    #[error("{relation} {id} referenced by favorite {favorite_id} not found")]
    MissingRelation {
        favorite_id: i32,
        relation: &'static str,
        id: i32,
    },

    #[error("favorite {favorite_id}: {source}")]
    InvalidTarget {
        favorite_id: i32,
        #[source]
        source: FavoriteTargetError,
    },
}

/// Rows loaded alongside a favorite.
#[derive(Debug, Clone, Copy, Default)]
pub struct Related<'a> {
    pub user: Option<&'a users::Model>,
    pub person: Option<&'a people::Model>,
    pub planet: Option<&'a planets::Model>,
}

impl Favorite {
    /// Builds the public view of a favorite row from its related rows.
    ///
    /// Names and emails come from the related rows, not from the columns the
    /// row copied at creation time. A relation the row points to but which
    /// was not loaded is an error.
    pub fn assemble(row: &favorites::Model, related: Related<'_>) -> Result<Self, SerializeError> {
        let target = FavoriteTarget::from_columns(row.people_id, row.planet_id).map_err(
            |source| SerializeError::InvalidTarget {
                favorite_id: row.id,
                source,
            },
        )?;

        let missing = |relation: &'static str, id: i32| SerializeError::MissingRelation {
            favorite_id: row.id,
            relation,
            id,
        };

        let user = related
            .user
            .filter(|u| u.id == row.user_id)
            .map(|u| UserRef {
                id: u.id,
                email: u.email.clone(),
            })
            .ok_or_else(|| missing("User", row.user_id))?;

        let (people, planet) = match target {
            FavoriteTarget::Person(id) => {
                let person = related
                    .person
                    .filter(|p| p.id == id)
                    .ok_or_else(|| missing("Person", id))?;
                let named = NamedRef {
                    id: person.id,
                    name: person.name.clone(),
                };
                (Some(named), None)
            }
            FavoriteTarget::Planet(id) => {
                let planet = related
                    .planet
                    .filter(|p| p.id == id)
                    .ok_or_else(|| missing("Planet", id))?;
                let named = NamedRef {
                    id: planet.id,
                    name: planet.name.clone(),
                };
                (None, Some(named))
            }
        };

        Ok(Self {
            id: row.id,
            people,
            planet,
            user,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn luke() -> people::Model {
        people::Model {
            id: 1,
            name: "Luke Skywalker".to_string(),
            url: "https://swapi.dev/api/people/1/".to_string(),
        }
    }

    fn tatooine() -> planets::Model {
        planets::Model {
            id: 1,
            name: "Tatooine".to_string(),
            url: "https://swapi.dev/api/planets/1/".to_string(),
        }
    }

    fn user() -> users::Model {
        users::Model {
            id: 1,
            email: "a@b.com".to_string(),
            password: "secret".to_string(),
            is_active: true,
        }
    }

    fn row(people_id: Option<i32>, planet_id: Option<i32>) -> favorites::Model {
        favorites::Model {
            id: 7,
            user_id: 1,
            people_id,
            planet_id,
            name: Some("stale copy".to_string()),
            url: None,
        }
    }

    #[test]
    fn test_target_from_columns() {
        assert_eq!(
            FavoriteTarget::from_columns(Some(4), None),
            Ok(FavoriteTarget::Person(4))
        );
        assert_eq!(
            FavoriteTarget::from_columns(None, Some(9)),
            Ok(FavoriteTarget::Planet(9))
        );
        assert_eq!(
            FavoriteTarget::from_columns(None, None),
            Err(FavoriteTargetError::Missing)
        );
        assert!(matches!(
            FavoriteTarget::from_columns(Some(1), Some(2)),
            Err(FavoriteTargetError::Ambiguous {
                people_id: 1,
                planet_id: 2
            })
        ));
    }

    #[test]
    fn test_target_columns_round_trip() {
        let target = FavoriteTarget::Planet(5);
        assert_eq!(target.people_id(), None);
        assert_eq!(target.planet_id(), Some(5));
        assert_eq!(target.kind(), TargetKind::Planet);
        assert_eq!(target.id(), 5);
    }

    #[test]
    fn test_person_favorite_shape() {
        let (user, person) = (user(), luke());
        let favorite = Favorite::assemble(
            &row(Some(1), None),
            Related {
                user: Some(&user),
                person: Some(&person),
                planet: None,
            },
        )
        .unwrap();

        let json = serde_json::to_value(&favorite).unwrap();
        assert_eq!(
            json,
            serde_json::json!({
                "id": 7,
                "people": {"id": 1, "name": "Luke Skywalker"},
                "planet": null,
                "user": {"id": 1, "email": "a@b.com"}
            })
        );
    }

    #[test]
    fn test_planet_favorite_ignores_copied_name() {
        let (user, planet) = (user(), tatooine());
        let favorite = Favorite::assemble(
            &row(None, Some(1)),
            Related {
                user: Some(&user),
                person: None,
                planet: Some(&planet),
            },
        )
        .unwrap();

        assert_eq!(favorite.planet.unwrap().name, "Tatooine");
        assert!(favorite.people.is_none());
    }

    #[test]
    fn test_missing_relation_is_an_error() {
        let user = user();
        let err = Favorite::assemble(
            &row(None, Some(3)),
            Related {
                user: Some(&user),
                ..Related::default()
            },
        )
        .unwrap_err();

        assert_eq!(
            err,
            SerializeError::MissingRelation {
                favorite_id: 7,
                relation: "Planet",
                id: 3
            }
        );

        let planet = tatooine();
        let err = Favorite::assemble(
            &row(None, Some(1)),
            Related {
                planet: Some(&planet),
                ..Related::default()
            },
        )
        .unwrap_err();
        assert!(matches!(
            err,
            SerializeError::MissingRelation {
                relation: "User",
                ..
            }
        ));
    }

    #[test]
    fn test_ambiguous_row_fails() {
        let err = Favorite::assemble(&row(Some(1), Some(1)), Related::default()).unwrap_err();
        assert!(matches!(err, SerializeError::InvalidTarget { .. }));
    }
}
