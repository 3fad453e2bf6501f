pub mod runner;
pub mod script;

pub use runner::{GameRunner, DEFAULT_FIXED_DT};
pub use script::{Script, ScriptStep};
