pub mod manufacturers;

pub use manufacturers::ManufacturerService;
