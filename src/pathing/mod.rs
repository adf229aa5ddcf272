pub mod costmatrix;
pub mod gridexecutor;
pub mod movecost;
pub mod movementsystem;
