use crate::server::{
    data::user::UserRepository,
    error::AppError,
    model::user::{CreateUserParam, Role, UpdateUserParam},
};
use test_utils::{builder::TestBuilder, factory};

mod create;
mod delete;
mod get_all_paginated;
mod get_names_by_ids;
mod update_profile;

fn create_param(email: &str, role: Role) -> CreateUserParam {
    CreateUserParam {
        name: "Jane Doe".to_string(),
        email: email.to_string(),
        password_hash: "hash".to_string(),
        role,
        phone: Some("555-0100".to_string()),
        gender: None,
    }
}
