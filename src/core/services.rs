pub mod answer;
pub mod poll;
