pub mod machine;
pub mod snapshot;
pub mod ws;
