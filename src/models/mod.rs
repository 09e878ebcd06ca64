pub mod api;
pub mod auth;
pub mod push;
pub mod session;
pub mod story;

pub use api::{decode_envelope, ApiError, MessageResponse};
pub use auth::{LoginRequest, LoginResponse, LoginResult, RegisterRequest};
pub use push::{NotificationContent, PushMessage, PushSubscriptionBody, UnsubscribeBody};
pub use session::Session;
pub use story::{Coordinates, Story, StoryFilter, StoryUpload};
