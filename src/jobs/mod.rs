pub mod actions;
pub mod collector;
pub mod context;
pub mod fighter;
pub mod healer;
pub mod jobsystem;
pub mod raider;
pub mod tow;
