pub mod alert;
pub mod device;
pub mod domain;
pub mod report;
pub mod risk;

pub use alert::*;
pub use device::*;
pub use domain::*;
pub use report::*;
pub use risk::*;
