//! In-process adapters that need no external infrastructure.

mod in_memory_user_repository;

pub use in_memory_user_repository::InMemoryUserRepository;
