pub mod mock;

pub use mock::MockPort;
pub use mock::ScriptedPort;
