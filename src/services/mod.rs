pub mod api_client;
pub mod auth_service;
pub mod push_service;
pub mod view_loader;

pub use api_client::{ApiClient, AuthGateway, PushGateway, StoryGateway, UploadAuth};
