use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

use crate::core::errors::LedgerError;

#[derive(Clone, Debug, Default, Serialize, Deserialize, ToSchema, PartialEq, Eq)]
pub struct User {
    #[serde(default)]
    pub id: Uuid,
    #[serde(default)]
    pub name: String,
}

impl User {
    pub fn validate(&self) -> Result<(), LedgerError> {
        if self.name.trim().is_empty() {
            return Err(LedgerError::invalid_input("name", r#"field "name" must be non-empty"#));
        }
        Ok(())
    }
}
