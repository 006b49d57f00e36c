pub mod authorize;
pub mod callback_handler;
pub mod pages;

pub use authorize::authorization_url;
pub use callback_handler::callback_handler;
