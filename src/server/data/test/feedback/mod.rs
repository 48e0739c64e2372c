use test_utils::{builder::TestBuilder, factory};

use crate::server::{
    data::feedback::FeedbackRepository,
    error::AppError,
    model::feedback::CreateFeedbackParam,
};

mod crud;
