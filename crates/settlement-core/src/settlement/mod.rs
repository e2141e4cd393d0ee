pub mod batch;
pub mod calculator;
pub mod request;
pub mod schedule;
