//! Fixture loading for the `seed` command.
//!
//! Users are never created over HTTP, so this is how rows get into a fresh
//! database.

use std::collections::HashSet;
use std::path::Path;

use anyhow::{Context, Result, bail};
use serde::Deserialize;

use super::UnitOfWork;

pub const EMAIL_MAX_LEN: usize = 120;
pub const PASSWORD_MAX_LEN: usize = 80;
pub const NAME_MAX_LEN: usize = 250;
pub const URL_MAX_LEN: usize = 400;

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct SeedData {
    pub users: Vec<SeedUser>,
    pub people: Vec<SeedResource>,
    pub planets: Vec<SeedResource>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct SeedUser {
    pub email: String,
    pub password: String,
    #[serde(default = "default_active")]
    pub is_active: bool,
}

const fn default_active() -> bool {
    true
}

#[derive(Debug, Clone, Deserialize)]
pub struct SeedResource {
    pub name: String,
    pub url: String,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SeedReport {
    pub users: usize,
    pub people: usize,
    pub planets: usize,
}

fn check_len(field: &str, value: &str, max: usize) -> Result<()> {
    if value.is_empty() {
        bail!("{field} cannot be empty");
    }
    if value.chars().count() > max {
        bail!("{field} must be {max} characters or less: {value:?}");
    }
    Ok(())
}

impl SeedData {
    pub fn load_from_path(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read seed file: {}", path.display()))?;

        serde_json::from_str(&content)
            .with_context(|| format!("Failed to parse seed file: {}", path.display()))
    }

    /// Column caps and email uniqueness within the file.
    pub fn validate(&self) -> Result<()> {
        let mut emails = HashSet::new();
        for user in &self.users {
            check_len("email", &user.email, EMAIL_MAX_LEN)?;
            check_len("password", &user.password, PASSWORD_MAX_LEN)?;
            if !emails.insert(user.email.as_str()) {
                bail!("Duplicate email in seed data: {}", user.email);
            }
        }

        for resource in self.people.iter().chain(&self.planets) {
            check_len("name", &resource.name, NAME_MAX_LEN)?;
            check_len("url", &resource.url, URL_MAX_LEN)?;
        }

        Ok(())
    }
}

pub(super) async fn apply(uow: &UnitOfWork, data: &SeedData) -> Result<SeedReport> {
    let users = uow.users();
    for user in &data.users {
        if users.email_exists(&user.email).await? {
            bail!("User with email {} already exists", user.email);
        }
        users
            .insert(&user.email, &user.password, user.is_active)
            .await?;
    }

    for person in &data.people {
        uow.people().insert(&person.name, &person.url).await?;
    }

    for planet in &data.planets {
        uow.planets().insert(&planet.name, &planet.url).await?;
    }

    Ok(SeedReport {
        users: data.users.len(),
        people: data.people.len(),
        planets: data.planets.len(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::Store;

    fn sample() -> SeedData {
        serde_json::from_str(
            r#"{
                "users": [{"email": "a@b.com", "password": "pw"}],
                "people": [{"name": "Luke", "url": "u1"}],
                "planets": [{"name": "Tatooine", "url": "p1"}]
            }"#,
        )
        .unwrap()
    }

    #[test]
    fn test_defaults() {
        let data = sample();
        assert!(data.users[0].is_active);
        assert!(data.validate().is_ok());

        let empty: SeedData = serde_json::from_str("{}").unwrap();
        assert!(empty.people.is_empty());
    }

    #[test]
    fn test_rejects_oversized_fields() {
        let mut data = sample();
        data.users[0].email = format!("{}@b.com", "a".repeat(EMAIL_MAX_LEN));
        assert!(data.validate().is_err());

        let mut data = sample();
        data.planets[0].url = "x".repeat(URL_MAX_LEN + 1);
        assert!(data.validate().is_err());

        let mut data = sample();
        data.people[0].name = String::new();
        assert!(data.validate().is_err());
    }

    #[test]
    fn test_rejects_duplicate_emails() {
        let mut data = sample();
        data.users.push(data.users[0].clone());
        let err = data.validate().unwrap_err();
        assert!(err.to_string().contains("Duplicate email"));
    }

    #[tokio::test]
    async fn test_seed_is_atomic() {
        let store = Store::new("sqlite::memory:").await.unwrap();
        let report = store.seed(&sample()).await.unwrap();
        assert_eq!(
            report,
            SeedReport {
                users: 1,
                people: 1,
                planets: 1
            }
        );

        // Same email again: the whole second load is rejected.
        assert!(store.seed(&sample()).await.is_err());
        assert_eq!(store.people().list().await.unwrap().len(), 1);
        assert_eq!(store.users().list().await.unwrap().len(), 1);
    }
}
