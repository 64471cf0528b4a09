//! Market data retrieval: canonical bar/quote models and the provider
//! abstraction used to fetch them from a vendor REST API.

pub mod models;
pub mod providers;
