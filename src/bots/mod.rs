pub mod command;
pub mod heuristic;
pub mod human;
pub mod random;
pub mod registry;
pub mod scripted;

pub use command::CommandOracle;
pub use heuristic::HeuristicOracle;
pub use human::{HumanCommand, HumanPrompt};
pub use random::RandomOracle;
pub use scripted::{ScriptedOracle, ScriptedReply};
