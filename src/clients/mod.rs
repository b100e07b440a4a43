pub mod hydra;
pub mod identity;
pub mod mock_weather;
pub mod open_meteo;

pub use hydra::*;
pub use identity::*;
pub use mock_weather::*;
pub use open_meteo::*;
