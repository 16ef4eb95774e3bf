//! Integration and unit tests for the Warenlager application.
//!
//! ## Test Modules
//!
//! - **filter_tests**: Query composition, clamping and validation rules
//! - **api_tests**: CRUD, listing, statistics and error-shape tests over the router
//! - **db_tests**: Schema initialization and constraint tests
//! - **geo_tests**: Haversine and geocoding response handling
//! - **config_tests**: Configuration loading and validation

pub mod config_tests;
pub mod db_tests;
pub mod geo_tests;
