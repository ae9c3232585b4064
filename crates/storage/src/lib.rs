#![forbid(unsafe_code)]

pub mod repository;
pub mod rest;

pub use repository::{
    InMemoryRepository, ProfileRepository, ProgressRepository, Storage, StorageError,
};
pub use rest::{AuthClient, AuthSession, RestConfig, RestRepository};
