use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    #[default]
    User,
    Admin,
    Rider,
}

/// The signed-in account.
///
/// Older builds of the client stored the account with an `id` field
/// instead of the backend's `_id`; both spellings are accepted.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct User {
    #[serde(rename = "_id", alias = "id")]
    pub id: String,
    pub name: String,
    pub email: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    #[serde(default)]
    pub role: Role,
}

impl User {
    pub fn is_admin(&self) -> bool {
        self.role == Role::Admin
    }

    pub fn is_rider(&self) -> bool {
        self.role == Role::Rider
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accepts_legacy_id_spelling() {
        let user: User =
            serde_json::from_str(r#"{"id":"u1","name":"Kofi","email":"k@x.com","role":"rider"}"#)
                .unwrap();
        assert_eq!(user.id, "u1");
        assert!(user.is_rider());
        assert!(!user.is_admin());
    }

    #[test]
    fn serializes_with_backend_id() {
        let user = User {
            id: "u2".into(),
            name: "Esi".into(),
            email: "e@x.com".into(),
            phone: None,
            role: Role::Admin,
        };
        let json = serde_json::to_value(&user).unwrap();
        assert_eq!(json["_id"], "u2");
        assert_eq!(json["role"], "admin");
    }
}
