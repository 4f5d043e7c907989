pub mod form_preview;
pub mod main;

pub use form_preview::FormPreviewActivity;
pub use main::{MainActivity, Msg, UserEvent};
