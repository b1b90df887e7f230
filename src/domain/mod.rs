pub mod announcement;
pub mod cart;
pub mod farmer_query;
pub mod product;
pub mod program;
pub mod registration;
pub mod session;
pub mod validation;

pub use announcement::*;
pub use cart::*;
pub use farmer_query::*;
pub use product::*;
pub use program::*;
pub use registration::*;
pub use session::*;
