pub mod auth_service;
pub mod build_key_service;
pub mod checksum;
pub mod content_walker;
pub mod failure_writer;

pub use auth_service::AuthService;
pub use build_key_service::BuildKeyService;
pub use content_walker::ContentWalker;
pub use failure_writer::FailureWriter;
