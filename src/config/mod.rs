pub mod director;
pub mod request_config;
pub mod yaml_config;

pub use director::{RequestDirector, DEFAULT_CONFIG_FILE};
pub use request_config::{Header, Method, RequestConfig};
pub use yaml_config::YamlConfig;
