pub mod common;
pub mod manufacturers;
pub mod permissions;

pub use common::common_routes;
pub use manufacturers::manufacturer_routes;
