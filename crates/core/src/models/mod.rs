//! Marketplace records.
//!
//! These are flat, serde-friendly structs that match the column names used by
//! the hosted backend tables (`products`, `stores`, `orders`, `messages`).

pub mod message;
pub mod order;
pub mod product;
pub mod store;
pub mod user;

pub use message::{Conversation, Message, Sender};
pub use order::{Order, OrderItem, PaymentInfo, ShippingInfo};
pub use product::Product;
pub use store::{Store, StoreContact};
pub use user::{Account, AuthSession, AuthUser};
