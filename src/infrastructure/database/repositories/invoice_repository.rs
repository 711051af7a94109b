//! SeaORM implementation of InvoiceRepository

use async_trait::async_trait;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter, QueryOrder, Set,
};
use tracing::debug;

use crate::domain::invoice::{Invoice, InvoiceLine, InvoiceRepository, PaymentStatus};
use crate::domain::{DomainError, DomainResult};
use crate::infrastructure::database::entities::invoice;

pub struct SeaOrmInvoiceRepository {
    db: DatabaseConnection,
}

impl SeaOrmInvoiceRepository {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

// ── Conversion helpers ──────────────────────────────────────────

fn model_to_domain(m: invoice::Model) -> DomainResult<Invoice> {
    let line_items: Vec<InvoiceLine> = serde_json::from_str(&m.line_items)
        .map_err(|e| DomainError::Validation(format!("corrupt line_items column: {}", e)))?;

    Ok(Invoice {
        id: m.id,
        booking_code: m.booking_code,
        line_items,
        total: m.total,
        issued_at: m.issued_at,
        payment_status: PaymentStatus::from_str(&m.payment_status),
        payment_method: m.payment_method,
    })
}

fn domain_to_active(i: &Invoice) -> DomainResult<invoice::ActiveModel> {
    let line_items = serde_json::to_string(&i.line_items)
        .map_err(|e| DomainError::Validation(format!("cannot serialize line_items: {}", e)))?;

    Ok(invoice::ActiveModel {
        id: Set(i.id.clone()),
        booking_code: Set(i.booking_code.clone()),
        line_items: Set(line_items),
        total: Set(i.total),
        issued_at: Set(i.issued_at),
        payment_status: Set(i.payment_status.as_str().to_string()),
        payment_method: Set(i.payment_method.clone()),
    })
}

fn db_err(e: sea_orm::DbErr) -> DomainError {
    DomainError::Validation(format!("Database error: {}", e))
}

// ── InvoiceRepository impl ──────────────────────────────────────

#[async_trait]
impl InvoiceRepository for SeaOrmInvoiceRepository {
    async fn save(&self, i: Invoice) -> DomainResult<()> {
        debug!(invoice_id = %i.id, booking_code = %i.booking_code, "Saving invoice");
        domain_to_active(&i)?.insert(&self.db).await.map_err(db_err)?;
        Ok(())
    }

    async fn find_by_id(&self, id: &str) -> DomainResult<Option<Invoice>> {
        let model = invoice::Entity::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(db_err)?;
        model.map(model_to_domain).transpose()
    }

    async fn find_by_booking_code(&self, code: &str) -> DomainResult<Vec<Invoice>> {
        let models = invoice::Entity::find()
            .filter(invoice::Column::BookingCode.eq(code))
            .all(&self.db)
            .await
            .map_err(db_err)?;
        models.into_iter().map(model_to_domain).collect()
    }

    async fn update(&self, i: Invoice) -> DomainResult<()> {
        let existing = invoice::Entity::find_by_id(&i.id)
            .one(&self.db)
            .await
            .map_err(db_err)?;
        if existing.is_none() {
            return Err(DomainError::not_found("Invoice", "id", &i.id));
        }

        domain_to_active(&i)?.update(&self.db).await.map_err(db_err)?;
        Ok(())
    }

    async fn find_all(&self) -> DomainResult<Vec<Invoice>> {
        let models = invoice::Entity::find()
            .order_by_desc(invoice::Column::IssuedAt)
            .all(&self.db)
            .await
            .map_err(db_err)?;
        models.into_iter().map(model_to_domain).collect()
    }
}
