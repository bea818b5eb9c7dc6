pub mod cli;
pub mod config;
pub mod error;
pub mod model;
pub mod registry;
pub mod session;
pub mod store;

pub use error::{PayrollError, PayrollResult};
pub use model::{Category, Employee, EmployeeForm, EmployeeId};
pub use registry::Registry;
pub use session::{Session, Status};
pub use store::{FileStore, MemoryStore, Store};
