pub mod camera_viewmodel;
pub mod location_picker;
pub mod notification_viewmodel;
pub mod story_form_viewmodel;
pub mod story_list_viewmodel;
