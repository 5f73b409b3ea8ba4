pub mod answer;
pub mod common;
pub mod poll;
pub mod remote;
pub mod slot;
