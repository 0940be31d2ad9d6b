//! Business logic services for the application layer.

pub mod deep_link_service;

pub use deep_link_service::DeepLinkService;
