pub mod rc;

#[cfg(feature = "runtime")]
pub mod tracing_setup;
