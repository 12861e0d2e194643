pub mod message;
pub mod order;
pub mod review;
pub mod user;

pub use message::*;
pub use order::*;
pub use review::*;
pub use user::*;
