pub mod soql_type;
pub use soql_type::*;

pub mod literal;
pub use literal::*;

pub mod column;
pub use column::*;

pub mod function;
pub use function::*;

pub mod expr;
pub use expr::*;

pub mod order_by;
pub use order_by::*;

pub mod analysis;
pub use analysis::*;
