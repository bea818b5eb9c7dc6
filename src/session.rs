use tracing::{info, warn};

use crate::error::{PayrollError, PayrollResult};
use crate::model::{Category, Employee, EmployeeForm, EmployeeId};
use crate::registry::Registry;
use crate::store::Store;

/// Outcome message of a successful operation, shown to the user as-is.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Status(pub String);

impl Status {
    fn new(message: impl Into<String>) -> Self {
        Self(message.into())
    }

    pub fn message(&self) -> &str {
        &self.0
    }
}

/// Owns the registry for the lifetime of the process and writes it through
/// to `store` after every mutation.
pub struct Session<S: Store> {
    registry: Registry,
    store: S,
}

impl<S: Store> Session<S> {
    /// Restores the registry from `store`. A missing or unreadable store
    /// yields an empty registry; this never fails.
    pub fn open(store: S) -> (Self, Status) {
        let mut session = Self {
            registry: Registry::new(),
            store,
        };
        let status = session.load();
        (session, status)
    }

    pub fn registry(&self) -> &Registry {
        &self.registry
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn add_employee(
        &mut self,
        id: EmployeeId,
        name: &str,
        salary: f64,
        tax_rate: f64,
        category: Category,
    ) -> PayrollResult<Status> {
        let employee = Employee::try_new(id, name, salary, tax_rate, category)?;
        self.add_record(employee)
    }

    /// Adds from raw form input. `category_choice` is the option picked in
    /// the category prompt, `None` if the prompt was dismissed.
    pub fn add_from_form(
        &mut self,
        form: EmployeeForm,
        category_choice: Option<usize>,
    ) -> PayrollResult<Status> {
        let category = Category::from_choice(category_choice).inspect_err(|_| {
            info!("Employee type not selected, add abandoned");
        })?;
        let employee = form.into_employee(category)?;
        self.add_record(employee)
    }

    pub fn add_record(&mut self, employee: Employee) -> PayrollResult<Status> {
        let id = employee.id();
        let category = employee.category();
        if self.registry.add(employee).is_some() {
            warn!(employee_id = %id, "Duplicate id, previous record replaced");
        }
        info!(employee_id = %id, %category, "Employee added");

        self.save()?;
        Ok(Status::new("Employee added successfully."))
    }

    pub fn mark_leave(&mut self, id: EmployeeId) -> PayrollResult<Status> {
        let employee = self.registry.mark_leave(id).inspect_err(|_| {
            info!(employee_id = %id, "Leave requested for unknown employee");
        })?;
        let status = Status::new(format!("Leave marked for {}.", employee.name()));
        info!(
            employee_id = %id,
            leaves_taken = employee.leaves_taken(),
            net_salary = employee.net_salary(),
            "Leave marked"
        );

        self.save()?;
        Ok(status)
    }

    /// Parses `raw` as an employee id before marking leave.
    pub fn mark_leave_raw(&mut self, raw: &str) -> PayrollResult<Status> {
        let id = EmployeeId::parse(raw)?;
        self.mark_leave(id)
    }

    /// Batch recompute of every net salary. Not persisted: recomputation
    /// never changes a consistent record.
    pub fn process_payroll(&mut self) -> Status {
        self.registry.recompute_all();
        info!(employees = self.registry.len(), "Payroll processed");
        Status::new("Payroll processed for all employees.")
    }

    pub fn find(&self, id: EmployeeId) -> PayrollResult<&Employee> {
        self.registry.get(id).ok_or(PayrollError::NotFound(id))
    }

    pub fn list_employees(&self) -> Vec<Employee> {
        self.registry.list()
    }

    /// One line per employee, ordered by id.
    pub fn render_listing(&self) -> String {
        self.list_employees()
            .iter()
            .map(|e| format!("{e}\n"))
            .collect()
    }

    pub fn save(&self) -> PayrollResult<Status> {
        self.store.save(&self.registry).map_err(|e| {
            tracing::error!(error = %format!("{e:#}"), "Save failed");
            PayrollError::persistence(e)
        })?;
        Ok(Status::new("Data saved successfully."))
    }

    /// Replaces the in-memory registry with the stored one, falling back to
    /// an empty registry when nothing usable is stored.
    pub fn load(&mut self) -> Status {
        match self.store.load() {
            Ok(Some(registry)) => {
                self.registry = registry;
                Status::new("Data loaded.")
            }
            Ok(None) => {
                self.registry = Registry::new();
                Status::new("No previous data found. Starting fresh.")
            }
            Err(e) => {
                warn!(error = %format!("{e:#}"), "Stored data unreadable, starting empty");
                self.registry = Registry::new();
                Status::new("No previous data found. Starting fresh.")
            }
        }
    }
}
