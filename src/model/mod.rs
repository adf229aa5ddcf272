pub mod agent;
pub mod body;
pub mod position;
pub mod snapshot;
pub mod structure;

pub use agent::*;
pub use body::*;
pub use position::*;
pub use snapshot::*;
pub use structure::*;
