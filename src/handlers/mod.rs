pub mod manufacturers;
