pub mod audit;
pub mod recover;
