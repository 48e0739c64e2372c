//! User service for account management.
//!
//! This module provides the `UserService` for self-service profile changes and the
//! admin user listing and deletion.

use sea_orm::DatabaseConnection;

use crate::server::{
    data::user::UserRepository,
    error::{auth::AuthError, AppError},
    model::{
        total_pages,
        user::{GetAllUsersParam, PaginatedUsers, UpdateUserParam, User},
    },
    service::auth::{
        password::{hash_password, verify_password},
        validate_password,
    },
};

pub struct UserService<'a> {
    db: &'a DatabaseConnection,
}

impl<'a> UserService<'a> {
    pub fn new(db: &'a DatabaseConnection) -> Self {
        Self { db }
    }

    /// Retrieves a user by ID.
    ///
    /// # Returns
    /// - `Ok(User)` - User found
    /// - `Err(AppError::NotFound)` - No user with that ID
    pub async fn get_user(&self, id: i32) -> Result<User, AppError> {
        UserRepository::new(self.db)
            .find_by_id(id)
            .await?
            .ok_or_else(|| AppError::NotFound("User not found".to_string()))
    }

    /// Updates the caller's own profile.
    ///
    /// # Returns
    /// - `Ok(User)` - The updated user
    /// - `Err(AppError::BadRequest)` - Name supplied but blank
    /// - `Err(AppError::NotFound)` - User no longer exists
    pub async fn update_profile(&self, id: i32, mut param: UpdateUserParam) -> Result<User, AppError> {
        if let Some(name) = param.name.as_mut() {
            *name = name.trim().to_string();
            if name.is_empty() {
                return Err(AppError::BadRequest("Name cannot be empty".to_string()));
            }
        }

        UserRepository::new(self.db)
            .update_profile(id, param)
            .await?
            .ok_or_else(|| AppError::NotFound("User not found".to_string()))
    }

    /// Changes the caller's password after checking the current one.
    ///
    /// # Returns
    /// - `Ok(())` - Password changed
    /// - `Err(AppError::AuthErr(WrongPassword))` - Current password does not match
    /// - `Err(AppError::BadRequest)` - New password too short
    pub async fn change_password(
        &self,
        user: &User,
        current_password: &str,
        new_password: &str,
    ) -> Result<(), AppError> {
        if !verify_password(current_password, &user.password_hash)? {
            return Err(AuthError::WrongPassword.into());
        }
        validate_password(new_password)?;

        UserRepository::new(self.db)
            .update_password_hash(user.id, hash_password(new_password)?)
            .await
    }

    /// Retrieves users with pagination and an optional role filter.
    pub async fn get_all_users(&self, param: GetAllUsersParam) -> Result<PaginatedUsers, AppError> {
        let (users, total) = UserRepository::new(self.db)
            .get_all_paginated(param.page, param.per_page, param.role)
            .await?;

        Ok(PaginatedUsers {
            users,
            total,
            page: param.page,
            per_page: param.per_page,
            total_pages: total_pages(total, param.per_page),
        })
    }

    /// Deletes an account and everything that belongs to it.
    ///
    /// # Returns
    /// - `Ok(())` - User deleted
    /// - `Err(AppError::BadRequest)` - Admin tried to delete their own account
    /// - `Err(AppError::NotFound)` - No user with that ID
    pub async fn delete_user(&self, actor_id: i32, target_id: i32) -> Result<(), AppError> {
        if actor_id == target_id {
            return Err(AppError::BadRequest(
                "You cannot delete your own account".to_string(),
            ));
        }

        if !UserRepository::new(self.db).delete(target_id).await? {
            return Err(AppError::NotFound("User not found".to_string()));
        }

        tracing::info!("User {} deleted user {}", actor_id, target_id);
        Ok(())
    }
}
