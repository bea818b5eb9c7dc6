use std::fmt;

use derive_more::{Display, From};
use serde::{Deserialize, Serialize};

use crate::error::{PayrollError, PayrollResult};
use crate::model::category::Category;

#[derive(
    Debug, Copy, Clone, Eq, PartialEq, Ord, PartialOrd, Hash, Serialize, Deserialize, Display, From,
)]
#[serde(transparent)]
pub struct EmployeeId(pub i32);

impl EmployeeId {
    pub fn parse(raw: &str) -> PayrollResult<Self> {
        raw.trim()
            .parse::<i32>()
            .map(EmployeeId)
            .map_err(|_| PayrollError::Parse("Invalid ID.".to_string()))
    }
}

/// One employee and their derived net salary.
///
/// Fields are private so `net_salary` can only change together with its
/// inputs: every mutation goes through a method that recomputes it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Employee {
    id: EmployeeId,
    name: String,
    salary: f64,
    tax_rate: f64,
    category: Category,
    leaves_taken: u32,
    net_salary: f64,
}

/// `max(0, salary - salary * tax_rate - leaves * per_leave_deduction)`
pub fn net_salary(salary: f64, tax_rate: f64, leaves_taken: u32, category: Category) -> f64 {
    let tax = salary * tax_rate;
    let leave_deduction = f64::from(leaves_taken) * category.leave_deduction();
    (salary - tax - leave_deduction).max(0.0)
}

impl Employee {
    /// Builds a record with no leaves taken. Numeric ranges are not checked;
    /// see [`Employee::try_new`].
    pub fn new(
        id: EmployeeId,
        name: impl Into<String>,
        salary: f64,
        tax_rate: f64,
        category: Category,
    ) -> Self {
        let mut employee = Self {
            id,
            name: name.into(),
            salary,
            tax_rate,
            category,
            leaves_taken: 0,
            net_salary: 0.0,
        };
        employee.recompute_net_salary();
        employee
    }

    /// Like [`Employee::new`] but rejects values outside the intended domain.
    pub fn try_new(
        id: EmployeeId,
        name: impl Into<String>,
        salary: f64,
        tax_rate: f64,
        category: Category,
    ) -> PayrollResult<Self> {
        let name = name.into();
        validate(salary, tax_rate)?;
        Ok(Self::new(id, name, salary, tax_rate, category))
    }

    pub fn mark_leave(&mut self) {
        self.leaves_taken += 1;
        self.recompute_net_salary();
    }

    pub fn recompute_net_salary(&mut self) {
        self.net_salary = net_salary(self.salary, self.tax_rate, self.leaves_taken, self.category);
    }

    pub fn id(&self) -> EmployeeId {
        self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn salary(&self) -> f64 {
        self.salary
    }

    pub fn tax_rate(&self) -> f64 {
        self.tax_rate
    }

    pub fn category(&self) -> Category {
        self.category
    }

    pub fn leaves_taken(&self) -> u32 {
        self.leaves_taken
    }

    pub fn net_salary(&self) -> f64 {
        self.net_salary
    }

    /// False when any amount is infinite or NaN; such a record cannot be
    /// stored as JSON.
    pub fn has_finite_amounts(&self) -> bool {
        self.salary.is_finite() && self.tax_rate.is_finite() && self.net_salary.is_finite()
    }
}

impl fmt::Display for Employee {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} - ID: {}, Name: {}, Salary: {}, Tax Rate: {}, Leaves: {}, Net Salary: {}",
            self.category,
            self.id,
            self.name,
            self.salary,
            self.tax_rate,
            self.leaves_taken,
            self.net_salary
        )
    }
}

fn validate(salary: f64, tax_rate: f64) -> PayrollResult<()> {
    if !salary.is_finite() || salary < 0.0 {
        return Err(PayrollError::InvalidInput(format!(
            "salary must be a non-negative amount, got {salary}"
        )));
    }
    if !(0.0..=1.0).contains(&tax_rate) {
        return Err(PayrollError::InvalidInput(format!(
            "tax rate must be between 0 and 1, got {tax_rate}"
        )));
    }
    Ok(())
}

/// Raw text fields as typed into the add-employee form.
#[derive(Debug, Clone, Default)]
pub struct EmployeeForm {
    pub id: String,
    pub name: String,
    pub salary: String,
    pub tax_rate: String,
}

impl EmployeeForm {
    pub fn into_employee(self, category: Category) -> PayrollResult<Employee> {
        let id = self
            .id
            .trim()
            .parse::<i32>()
            .map_err(|_| PayrollError::parse("id", &self.id))?;
        let salary = self
            .salary
            .trim()
            .parse::<f64>()
            .map_err(|_| PayrollError::parse("salary", &self.salary))?;
        let tax_rate = self
            .tax_rate
            .trim()
            .parse::<f64>()
            .map_err(|_| PayrollError::parse("tax rate", &self.tax_rate))?;

        Employee::try_new(EmployeeId(id), self.name.trim(), salary, tax_rate, category)
    }
}
