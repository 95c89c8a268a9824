pub mod card;
pub mod favorite;

pub use card::*;
pub use favorite::*;
