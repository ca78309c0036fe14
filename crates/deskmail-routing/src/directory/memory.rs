//! In-memory directory for testing

use async_trait::async_trait;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use super::traits::{AliasMappingStore, AliasRecord, DirectoryEmployee, PositionDirectory};
use crate::errors::RoutingError;

#[derive(Debug, Clone)]
struct EmployeeRow {
    position: String,
    is_active: bool,
    employee: DirectoryEmployee,
}

#[derive(Debug, Clone)]
struct AliasRow {
    position: String,
    is_active: bool,
    alias: AliasRecord,
}

/// Serves both directory traits from vectors, with call counters
#[derive(Debug, Clone, Default)]
pub struct InMemoryDirectory {
    employees: Arc<Mutex<Vec<EmployeeRow>>>,
    aliases: Arc<Mutex<Vec<AliasRow>>>,
    pub employee_lookups: Arc<AtomicUsize>,
    pub alias_lookups: Arc<AtomicUsize>,
    pub should_fail: bool,
}

impl InMemoryDirectory {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_failure(mut self) -> Self {
        self.should_fail = true;
        self
    }

    pub fn with_employee(
        self,
        first: &str,
        last: &str,
        email: Option<&str>,
        position: &str,
        department: &str,
    ) -> Self {
        self.push_employee(first, last, email, position, department, true);
        self
    }

    pub fn with_inactive_employee(
        self,
        first: &str,
        last: &str,
        email: Option<&str>,
        position: &str,
        department: &str,
    ) -> Self {
        self.push_employee(first, last, email, position, department, false);
        self
    }

    pub fn with_alias(self, position: &str, employee_name: &str, email: &str) -> Self {
        self.aliases.lock().unwrap().push(AliasRow {
            position: position.to_string(),
            is_active: true,
            alias: AliasRecord {
                employee_name: employee_name.to_string(),
                email: email.to_string(),
            },
        });
        self
    }

    pub fn with_inactive_alias(self, position: &str, employee_name: &str, email: &str) -> Self {
        self.aliases.lock().unwrap().push(AliasRow {
            position: position.to_string(),
            is_active: false,
            alias: AliasRecord {
                employee_name: employee_name.to_string(),
                email: email.to_string(),
            },
        });
        self
    }

    pub fn employee_lookup_count(&self) -> usize {
        self.employee_lookups.load(Ordering::SeqCst)
    }

    pub fn alias_lookup_count(&self) -> usize {
        self.alias_lookups.load(Ordering::SeqCst)
    }

    fn push_employee(
        &self,
        first: &str,
        last: &str,
        email: Option<&str>,
        position: &str,
        department: &str,
        is_active: bool,
    ) {
        self.employees.lock().unwrap().push(EmployeeRow {
            position: position.to_string(),
            is_active,
            employee: DirectoryEmployee {
                first_name: Some(first.to_string()),
                last_name: Some(last.to_string()),
                name: None,
                email: email.map(String::from),
                department: department.to_string(),
            },
        });
    }
}

#[async_trait]
impl PositionDirectory for InMemoryDirectory {
    async fn find_active(
        &self,
        position: &str,
        department: &str,
    ) -> Result<Vec<DirectoryEmployee>, RoutingError> {
        self.employee_lookups.fetch_add(1, Ordering::SeqCst);

        if self.should_fail {
            return Err(RoutingError::Directory(
                "Mock directory unavailable".to_string(),
            ));
        }

        Ok(self
            .employees
            .lock()
            .unwrap()
            .iter()
            .filter(|row| {
                row.is_active && row.position == position && row.employee.department == department
            })
            .map(|row| row.employee.clone())
            .collect())
    }
}

#[async_trait]
impl AliasMappingStore for InMemoryDirectory {
    async fn find_active(&self, position: &str) -> Result<Vec<AliasRecord>, RoutingError> {
        self.alias_lookups.fetch_add(1, Ordering::SeqCst);

        if self.should_fail {
            return Err(RoutingError::Directory(
                "Mock alias store unavailable".to_string(),
            ));
        }

        Ok(self
            .aliases
            .lock()
            .unwrap()
            .iter()
            .filter(|row| row.is_active && row.position == position)
            .map(|row| row.alias.clone())
            .collect())
    }
}
