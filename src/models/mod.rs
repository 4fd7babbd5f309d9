pub mod comment;
pub mod stock;
pub mod user;

pub use comment::Comment;
pub use stock::{Stock, StockWithComments};
pub use user::{AppUser, NewUser, Role};
