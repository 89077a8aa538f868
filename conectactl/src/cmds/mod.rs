pub use check::*;
pub use find::*;
pub use list::*;

mod check;
mod find;
mod list;
