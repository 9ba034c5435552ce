//! The three agents of the planner: two specialists and a coordinator
//! that drives them through agent tools.

pub mod activity;
pub mod coordinator;
pub mod hotel;

pub use activity::activity_agent;
pub use coordinator::coordinator_agent;
pub use hotel::hotel_agent;
