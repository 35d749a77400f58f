//! Employee service.

use common::{Employee, EmployeePatch, Id, InboundOrdersPerEmployee};
use store::entity::EMPLOYEE;
use store::{EmployeeRepository, WarehouseRepository};

use crate::error::Result;
use crate::protocol::{Op, ensure_unique, record, report_query, validate, write_failed};

const CARD_TAKEN: &str = "employee with this card number already exists";

/// Manages warehouse employees, keyed by `card_number_id`.
pub struct EmployeeService<S> {
    store: S,
}

impl<S> EmployeeService<S>
where
    S: EmployeeRepository + WarehouseRepository,
{
    pub fn new(store: S) -> Self {
        Self { store }
    }

    #[tracing::instrument(skip(self))]
    pub async fn list(&self) -> Result<Vec<Employee>> {
        Ok(self.store.list_employees().await?)
    }

    #[tracing::instrument(skip(self))]
    pub async fn get(&self, id: Id) -> Result<Employee> {
        Ok(self.store.find_employee(id).await?)
    }

    #[tracing::instrument(skip(self))]
    pub async fn create(&self, employee: Employee) -> Result<Employee> {
        record(EMPLOYEE, Op::Create, self.insert(employee).await)
    }

    #[tracing::instrument(skip(self))]
    pub async fn update(&self, id: Id, patch: EmployeePatch) -> Result<Employee> {
        record(EMPLOYEE, Op::Update, self.modify(id, patch).await)
    }

    #[tracing::instrument(skip(self))]
    pub async fn delete(&self, id: Id) -> Result<()> {
        record(EMPLOYEE, Op::Delete, self.remove(id).await)
    }

    #[tracing::instrument(skip(self))]
    pub async fn inbound_orders_report(
        &self,
        id: Option<Id>,
    ) -> Result<Vec<InboundOrdersPerEmployee>> {
        report_query("employee_inbound_orders");
        Ok(self.store.inbound_orders_report(id).await?)
    }

    async fn insert(&self, employee: Employee) -> Result<Employee> {
        validate(&employee)?;
        ensure_unique(
            self.store
                .find_employee_by_card_number(&employee.card_number_id)
                .await,
            |found| found.id,
            employee.id,
            CARD_TAKEN,
        )?;
        self.store.find_warehouse(employee.warehouse_id).await?;

        let employee = self
            .store
            .save_employee(employee)
            .await
            .map_err(|e| write_failed(e, CARD_TAKEN))?;
        tracing::info!(employee_id = employee.id, "employee created");
        Ok(employee)
    }

    async fn modify(&self, id: Id, patch: EmployeePatch) -> Result<Employee> {
        let mut employee = self.store.find_employee(id).await?;
        let prior_card = employee.card_number_id.clone();
        patch.apply(&mut employee);

        validate(&employee)?;
        if employee.card_number_id != prior_card {
            ensure_unique(
                self.store
                    .find_employee_by_card_number(&employee.card_number_id)
                    .await,
                |found| found.id,
                id,
                CARD_TAKEN,
            )?;
        }
        self.store.find_warehouse(employee.warehouse_id).await?;

        self.store
            .update_employee(&employee)
            .await
            .map_err(|e| write_failed(e, CARD_TAKEN))?;
        Ok(employee)
    }

    async fn remove(&self, id: Id) -> Result<()> {
        self.store.find_employee(id).await?;
        self.store.delete_employee(id).await?;
        Ok(())
    }
}
