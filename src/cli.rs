use std::io::{BufRead, Write};
use std::path::PathBuf;
use std::str::FromStr;

use anyhow::Result;
use clap::{Args, Parser, Subcommand};
use tracing::debug;

use crate::error::{PayrollError, PayrollResult};
use crate::model::{Category, EmployeeForm};
use crate::session::{Session, Status};
use crate::store::Store;

#[derive(Parser, Debug)]
#[command(name = "payroll", version, about = "Employee payroll register")]
pub struct Cli {
    #[arg(long, value_name = "FILE", help = "Data file (overrides PAYROLL_DATA_FILE)")]
    pub data_file: Option<PathBuf>,
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Add an employee, replacing any record with the same id.
    Add(AddCommand),
    /// Record one leave for an employee.
    Leave { id: String },
    /// Recompute every net salary.
    Payroll,
    /// Print all employees.
    List,
    /// Write the register to the data file.
    Save,
    /// Interactive session reading commands from stdin.
    Shell,
}

#[derive(Args, Debug)]
pub struct AddCommand {
    id: String,
    name: String,
    salary: String,
    tax_rate: String,
    #[arg(long, help = "Standard, FullTime or PartTime")]
    category: Option<String>,
}

impl AddCommand {
    fn category(&self) -> PayrollResult<Category> {
        match self.category.as_deref() {
            None => Err(PayrollError::SelectionCancelled),
            Some(raw) => {
                Category::from_str(raw.trim()).map_err(|_| PayrollError::parse("category", raw))
            }
        }
    }

    fn into_form(self) -> EmployeeForm {
        EmployeeForm {
            id: self.id,
            name: self.name,
            salary: self.salary,
            tax_rate: self.tax_rate,
        }
    }
}

/// Renders an operation result as the single status line the user sees.
pub fn status_line(result: PayrollResult<Status>) -> String {
    match result {
        Ok(status) => status.0,
        Err(e) => {
            debug!(code = e.code(), "Operation failed");
            format!("Error: {e}")
        }
    }
}

fn listing<S: Store>(session: &Session<S>) -> String {
    let listing = session.render_listing();
    if listing.is_empty() {
        "No employees.".to_string()
    } else {
        listing.trim_end().to_string()
    }
}

pub fn run_command<S: Store>(
    session: &mut Session<S>,
    command: Command,
    out: &mut impl Write,
) -> Result<()> {
    let line = match command {
        Command::Add(add) => status_line(
            add.category()
                .and_then(|category| add.into_form().into_employee(category))
                .and_then(|employee| session.add_record(employee)),
        ),
        Command::Leave { id } => status_line(session.mark_leave_raw(&id)),
        Command::Payroll => session.process_payroll().0,
        Command::List => listing(session),
        Command::Save => status_line(session.save()),
        Command::Shell => {
            let stdin = std::io::stdin();
            return run_shell(session, stdin.lock(), out);
        }
    };
    writeln!(out, "{line}")?;
    Ok(())
}

const SHELL_HELP: &str = "\
Commands:
  add <id> <name> <salary> <tax-rate>   add an employee (asks for the type)
  leave <id>                            mark one leave
  payroll                               process payroll
  list                                  view employees
  save                                  save data
  help                                  show this text
  quit                                  leave the session";

const CATEGORY_PROMPT: &str = "Select Employee Type: [0] Full-Time  [1] Part-Time  [2] Standard";

/// Line-oriented interactive session. Each command prints one status block.
pub fn run_shell<S: Store>(
    session: &mut Session<S>,
    input: impl BufRead,
    out: &mut impl Write,
) -> Result<()> {
    let mut lines = input.lines();
    writeln!(out, "{SHELL_HELP}")?;

    while let Some(line) = lines.next() {
        let line = line?;
        let tokens: Vec<&str> = line.split_whitespace().collect();
        let Some((&verb, args)) = tokens.split_first() else {
            continue;
        };

        let response = match verb.to_ascii_lowercase().as_str() {
            "add" => match form_from_args(args) {
                Some(form) => {
                    writeln!(out, "{CATEGORY_PROMPT}")?;
                    let choice = match lines.next() {
                        Some(answer) => answer?.trim().parse::<usize>().ok(),
                        None => None,
                    };
                    status_line(session.add_from_form(form, choice))
                }
                None => "Usage: add <id> <name> <salary> <tax-rate>".to_string(),
            },
            "leave" => match args {
                [id] => status_line(session.mark_leave_raw(id)),
                _ => "Usage: leave <id>".to_string(),
            },
            "payroll" => session.process_payroll().0,
            "list" => listing(session),
            "save" => status_line(session.save()),
            "help" => SHELL_HELP.to_string(),
            "quit" | "exit" => break,
            other => format!("Unknown command: {other}"),
        };
        writeln!(out, "{response}")?;
    }
    Ok(())
}

/// `<id> <name...> <salary> <tax-rate>`; the name may contain spaces.
fn form_from_args(args: &[&str]) -> Option<EmployeeForm> {
    if args.len() < 4 {
        return None;
    }
    let (id, rest) = args.split_first()?;
    let (tax_rate, rest) = rest.split_last()?;
    let (salary, name) = rest.split_last()?;
    Some(EmployeeForm {
        id: id.to_string(),
        name: name.join(" "),
        salary: salary.to_string(),
        tax_rate: tax_rate.to_string(),
    })
}
