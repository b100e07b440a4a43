pub mod auth;
pub mod energy;
pub mod range;
pub mod weather;

pub use auth::*;
pub use energy::*;
pub use range::*;
pub use weather::*;
