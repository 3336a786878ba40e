use sea_orm::DatabaseConnection;

use crate::{
    model::user::UserDto,
    server::{data::user::UserRepository, error::Error},
};

pub struct UserService<'a> {
    db: &'a DatabaseConnection,
}

impl<'a> UserService<'a> {
    /// Creates a new instance of [`UserService`]
    pub fn new(db: &'a DatabaseConnection) -> Self {
        Self { db }
    }

    /// Retrieves a user's public information
    ///
    /// # Arguments
    /// - `user_id` (`i32`): ID of the user to retrieve
    ///
    /// # Returns
    /// - `Ok(Some(UserDto))`: User found
    /// - `Ok(None)`: No user with the provided ID
    /// - `Err(Error::DbErr)`: Database query failed
    pub async fn get_user(&self, user_id: i32) -> Result<Option<UserDto>, Error> {
        let user = UserRepository::new(self.db).get(user_id).await?;

        Ok(user.map(|user| UserDto {
            id: user.id,
            email: user.email,
        }))
    }
}
