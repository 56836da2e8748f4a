#![forbid(unsafe_code)]

pub mod app_services;
pub mod auth;
pub mod catalog;
pub mod error;
pub mod progress;

pub use lms_core::Clock;

pub use app_services::AppServices;
pub use auth::{AuthProvider, LocalAuthProvider, PasswordHashing, Session, SessionSubscription};
pub use catalog::CatalogService;
pub use error::{AppServicesError, AuthError, CatalogError, ProgressError};
pub use progress::{CourseDetail, ProgressService};
