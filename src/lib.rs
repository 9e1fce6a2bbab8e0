pub mod errors;
pub mod interval;
pub mod algebra;
pub mod collection;
pub mod query;
pub mod config;
pub mod timing;
pub mod io;
