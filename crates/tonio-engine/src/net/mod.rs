pub mod bus;
pub mod link;
pub mod messages;
pub mod sim;
