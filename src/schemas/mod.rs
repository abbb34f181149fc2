//! Parameter schemas for tools: generation, validation and decoding.

pub mod schema;
pub mod validation;
pub mod validator;

pub use schema::parameters_schema;
pub use validation::validate_arguments;
pub use validator::decode_arguments;
