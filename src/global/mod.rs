pub mod logging;
pub mod middleware;
pub mod prometheus;
pub mod rate_limit;
pub mod validator;

pub use logging::init_logging;
pub use middleware::request_tracing;
pub use rate_limit::with_rate_limit;
pub use validator::SecretKeyValidator;
