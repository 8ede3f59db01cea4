//! Application level setup.

mod tracing_subscriber;

pub use self::tracing_subscriber::init_tracing;
