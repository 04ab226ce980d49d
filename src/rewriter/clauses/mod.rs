pub mod selection;
pub use selection::*;

pub mod group_by;
pub use group_by::*;

pub mod filter;
pub use filter::*;

pub mod order_by;
pub use order_by::*;

pub mod aggregate_removal;
pub use aggregate_removal::*;
