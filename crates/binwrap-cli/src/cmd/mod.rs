pub mod launch;
pub mod provision;
