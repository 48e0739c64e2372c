//! User data repository for database operations.
//!
//! This module provides the `UserRepository` for managing account records. It handles
//! registration inserts, profile and password updates, role-filtered pagination and the
//! name lookups used when rendering appointments.

use std::collections::HashMap;

use chrono::Utc;
use sea_orm::{
    ActiveModelTrait, ActiveValue, ColumnTrait, DatabaseConnection, EntityTrait, PaginatorTrait,
    QueryFilter, QueryOrder,
};

use crate::server::{
    error::AppError,
    model::user::{CreateUserParam, Role, UpdateUserParam, User},
};

/// Repository providing database operations for user management.
pub struct UserRepository<'a> {
    db: &'a DatabaseConnection,
}

impl<'a> UserRepository<'a> {
    /// Creates a new UserRepository instance.
    ///
    /// # Arguments
    /// - `db` - Reference to the database connection
    pub fn new(db: &'a DatabaseConnection) -> Self {
        Self { db }
    }

    /// Inserts a new user.
    ///
    /// The email is expected to be normalized and checked for uniqueness by the caller;
    /// a duplicate still fails on the unique index.
    ///
    /// # Returns
    /// - `Ok(User)` - The created user
    /// - `Err(AppError::DbErr)` - Database error during insert
    pub async fn create(&self, param: CreateUserParam) -> Result<User, AppError> {
        let entity = entity::user::ActiveModel {
            name: ActiveValue::Set(param.name),
            email: ActiveValue::Set(param.email),
            password_hash: ActiveValue::Set(param.password_hash),
            role: ActiveValue::Set(param.role.to_string()),
            phone: ActiveValue::Set(param.phone),
            gender: ActiveValue::Set(param.gender),
            date_of_birth: ActiveValue::Set(None),
            address: ActiveValue::Set(None),
            created_at: ActiveValue::Set(Utc::now()),
            ..Default::default()
        }
        .insert(self.db)
        .await?;

        User::from_entity(entity)
    }

    /// Finds a user by ID.
    ///
    /// # Returns
    /// - `Ok(Some(User))` - User found
    /// - `Ok(None)` - No user with that ID
    /// - `Err(AppError)` - Database error or unparseable stored role
    pub async fn find_by_id(&self, id: i32) -> Result<Option<User>, AppError> {
        let entity = entity::prelude::User::find_by_id(id).one(self.db).await?;

        entity.map(User::from_entity).transpose()
    }

    /// Finds a user by their normalized email.
    pub async fn find_by_email(&self, email: &str) -> Result<Option<User>, AppError> {
        let entity = entity::prelude::User::find()
            .filter(entity::user::Column::Email.eq(email))
            .one(self.db)
            .await?;

        entity.map(User::from_entity).transpose()
    }

    /// Applies profile changes to a user.
    ///
    /// Only fields set in `param` are written.
    ///
    /// # Returns
    /// - `Ok(Some(User))` - The updated user
    /// - `Ok(None)` - No user with that ID
    /// - `Err(AppError)` - Database error during update
    pub async fn update_profile(
        &self,
        id: i32,
        param: UpdateUserParam,
    ) -> Result<Option<User>, AppError> {
        let Some(entity) = entity::prelude::User::find_by_id(id).one(self.db).await? else {
            return Ok(None);
        };

        let mut active: entity::user::ActiveModel = entity.into();
        if let Some(name) = param.name {
            active.name = ActiveValue::Set(name);
        }
        if let Some(phone) = param.phone {
            active.phone = ActiveValue::Set(Some(phone));
        }
        if let Some(gender) = param.gender {
            active.gender = ActiveValue::Set(Some(gender));
        }
        if let Some(date_of_birth) = param.date_of_birth {
            active.date_of_birth = ActiveValue::Set(Some(date_of_birth));
        }
        if let Some(address) = param.address {
            active.address = ActiveValue::Set(Some(address));
        }

        let entity = active.update(self.db).await?;

        Ok(Some(User::from_entity(entity)?))
    }

    /// Replaces a user's password hash.
    pub async fn update_password_hash(&self, id: i32, password_hash: String) -> Result<(), AppError> {
        entity::prelude::User::update(entity::user::ActiveModel {
            id: ActiveValue::Unchanged(id),
            password_hash: ActiveValue::Set(password_hash),
            ..Default::default()
        })
        .exec(self.db)
        .await?;

        Ok(())
    }

    /// Gets users with pagination, ordered by ID.
    ///
    /// # Arguments
    /// - `page` - Zero-indexed page number
    /// - `per_page` - Number of users per page
    /// - `role` - Optional role filter
    ///
    /// # Returns
    /// - `Ok((users, total))` - Users for the requested page and total matching user count
    /// - `Err(AppError)` - Database error during pagination query
    pub async fn get_all_paginated(
        &self,
        page: u64,
        per_page: u64,
        role: Option<Role>,
    ) -> Result<(Vec<User>, u64), AppError> {
        let mut query = entity::prelude::User::find().order_by_asc(entity::user::Column::Id);
        if let Some(role) = role {
            query = query.filter(entity::user::Column::Role.eq(role.as_str()));
        }

        let paginator = query.paginate(self.db, per_page);
        let total = paginator.num_items().await?;
        let users = paginator
            .fetch_page(page)
            .await?
            .into_iter()
            .map(User::from_entity)
            .collect::<Result<Vec<_>, _>>()?;

        Ok((users, total))
    }

    /// Loads several users at once, keyed by ID.
    pub async fn find_by_ids(&self, ids: &[i32]) -> Result<HashMap<i32, User>, AppError> {
        if ids.is_empty() {
            return Ok(HashMap::new());
        }

        entity::prelude::User::find()
            .filter(entity::user::Column::Id.is_in(ids.to_vec()))
            .all(self.db)
            .await?
            .into_iter()
            .map(|entity| User::from_entity(entity).map(|user| (user.id, user)))
            .collect()
    }

    /// Looks up display names for a set of user IDs.
    ///
    /// Missing IDs are simply absent from the returned map.
    pub async fn get_names_by_ids(&self, ids: &[i32]) -> Result<HashMap<i32, String>, AppError> {
        if ids.is_empty() {
            return Ok(HashMap::new());
        }

        let users = entity::prelude::User::find()
            .filter(entity::user::Column::Id.is_in(ids.to_vec()))
            .all(self.db)
            .await?;

        Ok(users.into_iter().map(|u| (u.id, u.name)).collect())
    }

    /// Deletes a user; dependent rows are removed by foreign key cascades.
    ///
    /// # Returns
    /// - `Ok(true)` - User deleted
    /// - `Ok(false)` - No user with that ID
    pub async fn delete(&self, id: i32) -> Result<bool, AppError> {
        let result = entity::prelude::User::delete_by_id(id).exec(self.db).await?;

        Ok(result.rows_affected > 0)
    }

    /// Checks if any admin account exists.
    pub async fn admin_exists(&self) -> Result<bool, AppError> {
        Ok(self.count_by_role(Role::Admin).await? > 0)
    }

    pub async fn count_by_role(&self, role: Role) -> Result<u64, AppError> {
        let count = entity::prelude::User::find()
            .filter(entity::user::Column::Role.eq(role.as_str()))
            .count(self.db)
            .await?;

        Ok(count)
    }
}
