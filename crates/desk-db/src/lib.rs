pub mod connection;
pub use connection::Connection;

pub mod results;
pub mod schema;

pub mod members;
pub mod payments;
