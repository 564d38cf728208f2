use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::RwLock;
use uuid::Uuid;

use crate::models::customer::Customer;
use crate::utils::errors::{not_found_error, AppError, AppResult};

/// Contrato de almacenamiento de clientes. El motor sólo lee clientes;
/// el alta existe para el sistema propietario y los tests.
#[async_trait]
pub trait CustomerStore: Send + Sync {
    async fn get(&self, id: Uuid) -> AppResult<Customer>;

    async fn insert(&self, customer: Customer) -> AppResult<Customer>;
}

/// Implementación en memoria
#[derive(Clone, Default)]
pub struct InMemoryCustomerStore {
    customers: Arc<RwLock<HashMap<Uuid, Customer>>>,
}

impl InMemoryCustomerStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl CustomerStore for InMemoryCustomerStore {
    async fn get(&self, id: Uuid) -> AppResult<Customer> {
        let customers = self.customers.read().await;
        customers
            .get(&id)
            .cloned()
            .ok_or_else(|| not_found_error("Cliente", &id))
    }

    async fn insert(&self, customer: Customer) -> AppResult<Customer> {
        let mut customers = self.customers.write().await;
        if customers.contains_key(&customer.id) {
            return Err(AppError::Conflict(format!(
                "ya existe un cliente con id '{}'",
                customer.id
            )));
        }
        customers.insert(customer.id, customer.clone());
        Ok(customer)
    }
}
