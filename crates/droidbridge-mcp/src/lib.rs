pub mod config;
pub mod handlers;
pub mod logging;
pub mod params;
pub mod result;
pub mod server;

pub use server::DroidBridgeServer;
