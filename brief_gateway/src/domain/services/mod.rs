pub mod helpers;
pub mod interest_catalog;
