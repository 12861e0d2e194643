pub mod macros;
pub mod message_client;
pub mod order_client;
pub mod review_client;
pub mod user_client;

pub use message_client::*;
pub use order_client::*;
pub use review_client::*;
pub use user_client::*;
