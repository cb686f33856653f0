pub mod candidate;
pub mod error;
pub mod interval;
pub mod jump;
pub mod observation;
pub mod types;
