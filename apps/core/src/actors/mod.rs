pub mod messages;
pub mod mock;
pub mod remote;
pub mod supervisor;
pub mod traits;
