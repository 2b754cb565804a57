pub mod coaching;
pub mod latency;
pub mod sessions;
