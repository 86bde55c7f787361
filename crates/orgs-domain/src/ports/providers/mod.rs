//! External data provider ports

/// Municipality record source
pub mod municipality_source;

pub use municipality_source::MunicipalitySource;
