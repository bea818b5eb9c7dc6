use std::collections::HashMap;

use crate::error::{PayrollError, PayrollResult};
use crate::model::{Employee, EmployeeId};

/// In-memory collection of employee records keyed by id.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Registry {
    employees: HashMap<EmployeeId, Employee>,
}

impl Registry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Inserts `employee`, replacing any record already stored under its id.
    /// Returns the replaced record.
    pub fn add(&mut self, employee: Employee) -> Option<Employee> {
        self.employees.insert(employee.id(), employee)
    }

    pub fn get(&self, id: EmployeeId) -> Option<&Employee> {
        self.employees.get(&id)
    }

    pub fn mark_leave(&mut self, id: EmployeeId) -> PayrollResult<&Employee> {
        let employee = self
            .employees
            .get_mut(&id)
            .ok_or(PayrollError::NotFound(id))?;
        employee.mark_leave();
        Ok(employee)
    }

    pub fn recompute_all(&mut self) {
        for employee in self.employees.values_mut() {
            employee.recompute_net_salary();
        }
    }

    /// Snapshot of every record, ordered by id.
    pub fn list(&self) -> Vec<Employee> {
        let mut employees: Vec<Employee> = self.employees.values().cloned().collect();
        employees.sort_by_key(Employee::id);
        employees
    }

    pub fn len(&self) -> usize {
        self.employees.len()
    }

    pub fn is_empty(&self) -> bool {
        self.employees.is_empty()
    }
}

impl FromIterator<Employee> for Registry {
    fn from_iter<T: IntoIterator<Item = Employee>>(iter: T) -> Self {
        let mut registry = Registry::new();
        for employee in iter {
            registry.add(employee);
        }
        registry
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::Category;

    fn registry() -> Registry {
        [
            Employee::new(EmployeeId(3), "Carol", 2000.0, 0.2, Category::PartTime),
            Employee::new(EmployeeId(1), "Alice", 5000.0, 0.1, Category::FullTime),
            Employee::new(EmployeeId(2), "Bob", 100.0, 0.5, Category::Standard),
        ]
        .into_iter()
        .collect()
    }

    #[test]
    fn list_is_sorted_by_id() {
        let ids: Vec<i32> = registry().list().iter().map(|e| e.id().0).collect();
        assert_eq!(ids, vec![1, 2, 3]);
    }

    #[test]
    fn duplicate_add_overwrites_whole_record() {
        let mut registry = registry();
        registry.mark_leave(EmployeeId(1)).unwrap();
        registry.mark_leave(EmployeeId(1)).unwrap();

        let replaced = registry.add(Employee::new(
            EmployeeId(1),
            "Alicia",
            6000.0,
            0.2,
            Category::Standard,
        ));
        assert_eq!(replaced.unwrap().leaves_taken(), 2);

        let current = registry.get(EmployeeId(1)).unwrap();
        assert_eq!(current.name(), "Alicia");
        assert_eq!(current.leaves_taken(), 0);
        assert_eq!(current.net_salary(), 4800.0);
        assert_eq!(registry.len(), 3);
    }

    #[test]
    fn mark_leave_on_missing_id_is_not_found() {
        let mut registry = registry();
        let before = registry.clone();
        let err = registry.mark_leave(EmployeeId(99)).unwrap_err();
        assert!(matches!(err, PayrollError::NotFound(EmployeeId(99))));
        assert_eq!(registry, before);
    }

    #[test]
    fn mark_leave_n_times_counts_exactly() {
        let mut registry = registry();
        for _ in 0..5 {
            registry.mark_leave(EmployeeId(3)).unwrap();
        }
        let carol = registry.get(EmployeeId(3)).unwrap();
        assert_eq!(carol.leaves_taken(), 5);
        assert_eq!(carol.net_salary(), 2000.0 - 400.0 - 250.0);
    }

    #[test]
    fn recompute_all_is_idempotent() {
        let mut registry = registry();
        registry.mark_leave(EmployeeId(2)).unwrap();
        let before = registry.clone();
        registry.recompute_all();
        registry.recompute_all();
        assert_eq!(registry, before);
    }

    #[test]
    fn get_missing_returns_none() {
        assert!(registry().get(EmployeeId(42)).is_none());
        assert!(Registry::new().is_empty());
    }
}
