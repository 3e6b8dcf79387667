pub mod curl;
pub mod error;
pub mod logger;
pub mod message;
pub mod path_params;
