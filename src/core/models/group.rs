use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use utoipa::ToSchema;
use uuid::Uuid;

use crate::core::errors::LedgerError;

#[derive(Clone, Debug, Default, Serialize, Deserialize, ToSchema, PartialEq, Eq)]
pub struct Group {
    #[serde(default)]
    pub id: Uuid,
    #[serde(default)]
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default)]
    pub users: Vec<Uuid>,
}

impl Group {
    pub fn validate(&self) -> Result<(), LedgerError> {
        if self.name.trim().is_empty() {
            return Err(LedgerError::invalid_input("name", r#"field "name" must be non-empty"#));
        }
        if self.users.is_empty() {
            return Err(LedgerError::invalid_input("users", r#"field "users" must be non-empty"#));
        }
        let mut seen = HashSet::with_capacity(self.users.len());
        if let Some(duplicate) = self.users.iter().find(|id| !seen.insert(**id)) {
            return Err(LedgerError::invalid_input(
                "users",
                format!(r#"field "users" lists user {} more than once"#, duplicate),
            ));
        }
        Ok(())
    }

    pub fn has_member(&self, user_id: Uuid) -> bool {
        self.users.contains(&user_id)
    }
}
