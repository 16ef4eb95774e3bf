//! HTTP route handlers for the Warenlager API.
//!
//! Each sub-module handles a specific domain of functionality:
//!
//! - `categories`: category CRUD endpoints
//! - `distance`: geodesic distance lookup
//! - `export`: product report export
//! - `health`: health check and system status endpoints
//! - `products`: product CRUD and filtered listing
//! - `statistics`: derived product distribution statistics
//! - `suppliers`: supplier CRUD endpoints

pub mod categories;
pub mod distance;
pub mod export;
pub mod health;
pub mod products;
pub mod statistics;
pub mod suppliers;
