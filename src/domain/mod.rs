pub mod flow;
pub mod options;
pub mod profile;
pub mod wearable;
