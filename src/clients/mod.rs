pub mod zy_client;

pub use zy_client::ZyClient;
