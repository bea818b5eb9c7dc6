pub mod category;
pub mod employee;

pub use category::Category;
pub use employee::{Employee, EmployeeForm, EmployeeId};
