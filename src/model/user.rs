use serde::{Deserialize, Serialize};

/// The currently signed in user
#[derive(Clone, Debug, Serialize, Deserialize, utoipa::ToSchema)]
pub struct UserDto {
    pub id: i32,
    pub email: String,
}
