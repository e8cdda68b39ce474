pub mod entities;
pub mod location;
pub mod nutrients;
pub mod ports;
pub mod report;
pub mod services;
pub mod session;
pub mod validation;

pub use entities::*;
pub use location::*;
pub use nutrients::NutrientLevel;
pub use ports::*;
pub use session::*;
