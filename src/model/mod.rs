//! Pure data structures: the order wire shape, the validated order, and the
//! invocation response.

pub mod order;
pub mod response;

pub use order::*;
pub use response::*;
