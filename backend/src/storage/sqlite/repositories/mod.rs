pub mod user_repository;
pub mod session_repository;
pub mod habit_repository;
pub mod habit_log_repository;

pub use user_repository::UserRepository;
pub use session_repository::SessionRepository;
pub use habit_repository::HabitRepository;
pub use habit_log_repository::HabitLogRepository;
