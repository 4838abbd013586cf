// Chat widget backend: dispatch to the configured provider, with canned
// fallbacks whenever the live path is unavailable.

pub mod fallback;
pub mod handlers;
pub mod models;
pub mod service;

pub use service::AiService;
