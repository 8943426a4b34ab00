pub mod balance;
pub mod group;
pub mod transaction;
pub mod user;

pub use balance::Balance;
pub use group::Group;
pub use transaction::{Amount, Share, Transaction, Weight};
pub use user::User;
