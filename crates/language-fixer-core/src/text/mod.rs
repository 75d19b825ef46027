pub mod convert;
pub mod layouts;
pub mod mapping;
