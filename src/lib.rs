#![warn(clippy::all)]

pub mod config;
pub mod features;
pub mod findnearest;
pub mod game_loop;
pub mod jobs;
pub mod logging;
pub mod military;
pub mod model;
pub mod pathing;
pub mod roster;
pub mod spawnsystem;
pub mod tickstate;
pub mod visualize;
