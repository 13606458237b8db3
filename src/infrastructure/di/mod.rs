//! Dependency injection container

mod service_container;

pub use service_container::ServiceContainer;
