//! Conversions between domain models and the shared wire DTOs.

pub mod habit_mapper;
pub mod log_mapper;
pub mod user_mapper;

pub use habit_mapper::HabitMapper;
pub use log_mapper::LogMapper;
pub use user_mapper::UserMapper;
