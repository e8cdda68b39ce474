pub mod reported;

pub use reported::ReportedGeolocation;
