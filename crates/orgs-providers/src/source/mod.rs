//! Record Source Implementations
//!
//! | Provider | Description |
//! |----------|-------------|
//! | [`CsvMunicipalitySource`] | World-cities style CSV file with a header row |

#[cfg(feature = "source-csv")]
pub mod csv;

#[cfg(feature = "source-csv")]
pub use self::csv::CsvMunicipalitySource;
