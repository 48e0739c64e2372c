use chrono::{NaiveTime, Utc};
use test_utils::{builder::TestBuilder, factory};

use crate::server::{
    data::reminder::ReminderRepository, error::AppError, model::reminder::CreateReminderParam,
};

mod crud;
