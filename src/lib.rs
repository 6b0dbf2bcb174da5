pub(crate) mod blocking;
pub mod client;
pub mod clock;
pub mod commands;
pub mod config;
pub mod db;
pub mod error;
pub mod frame;
pub mod glob;
pub mod key;
pub mod number;
pub mod pubsub;
pub mod scan;
pub mod scripting;
pub mod server;
pub mod session;
pub mod sorted_set;
pub mod transaction;
pub mod utils;
pub mod value;

pub use client::Client;
pub use clock::{Clock, ManualClock, SystemClock};
pub use config::Config;
pub use error::CommandError;
pub use frame::Frame;
pub use server::Server;

pub type Error = Box<dyn std::error::Error + Send + Sync>;
pub type Result<T> = std::result::Result<T, Error>;
