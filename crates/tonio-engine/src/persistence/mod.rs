pub mod character;
pub mod store;
