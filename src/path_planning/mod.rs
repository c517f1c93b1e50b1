// Path Planning algorithms module

pub mod frontier;
pub mod graph_search;
pub mod a_star;
pub mod uninformed;
pub mod rrt;
pub mod pheromone;
pub mod aco;
pub mod planner;

pub use graph_search::*;
pub use a_star::*;
pub use uninformed::*;
pub use rrt::*;
pub use pheromone::*;
pub use aco::*;
pub use planner::*;
