use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Authenticated caller of a request, as carried by its session credential
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionUser {
    pub id: Uuid,
    pub email: String,
    pub name: String,
}
