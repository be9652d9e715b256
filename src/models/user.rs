use serde::Serialize;

use crate::entities::users;

/// Public view of a user. Password and activation flag are not part of it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct User {
    pub id: i32,
    pub email: String,
}

impl From<users::Model> for User {
    fn from(model: users::Model) -> Self {
        Self {
            id: model.id,
            email: model.email,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_password_is_not_serialized() {
        let user = User::from(users::Model {
            id: 3,
            email: "leia@alderaan.org".to_string(),
            password: "hunter2".to_string(),
            is_active: true,
        });

        let json = serde_json::to_value(&user).unwrap();
        assert_eq!(json, serde_json::json!({"id": 3, "email": "leia@alderaan.org"}));
        assert!(!json.to_string().contains("hunter2"));
    }
}
