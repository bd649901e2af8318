//! Catalog use cases

use crate::error::{CatalogError, Result};
use crate::storage::Database;
use std::sync::Arc;
use techflow_types::{NewService, Service, ServiceFields, ServiceRecord, Session};
use tracing::info;

/// Orchestrates the listing, detail and admin-CRUD use cases.
///
/// Gated operations take the authenticated [`Session`] explicitly: a value
/// can only be obtained through the auth service, so possession proves the
/// caller logged in.
pub struct CatalogService {
    db: Arc<Database>,
}

impl CatalogService {
    pub fn new(db: Arc<Database>) -> Self {
        Self { db }
    }

    /// Public catalog listing, ordered by ascending id.
    pub async fn list_public(&self) -> Result<Vec<Service>> {
        self.db.list_services().await
    }

    /// Public detail view. Absent ids surface as [`CatalogError::NotFound`],
    /// which the boundary maps to a redirect back to the list.
    pub async fn detail(&self, id: i64) -> Result<Service> {
        self.db
            .get_service(id)
            .await?
            .ok_or(CatalogError::NotFound)
    }

    /// Admin listing. Same rows as the public list.
    pub async fn list_admin(&self, _session: &Session) -> Result<Vec<Service>> {
        self.db.list_services().await
    }

    /// Create a service from raw form input.
    pub async fn create(&self, session: &Session, fields: ServiceFields) -> Result<Service> {
        let new = NewService::parse(fields)?;
        let service = self.db.insert_service(&new).await?;
        info!(
            "Service created by {}: {} (id={})",
            session.username, service.name, service.id
        );
        Ok(service)
    }

    /// Delete a service. Absent ids are a no-op, so this always succeeds
    /// from the caller's perspective.
    pub async fn delete(&self, session: &Session, id: i64) -> Result<()> {
        self.db.delete_service(id).await?;
        info!("Service deleted by {}: id={}", session.username, id);
        Ok(())
    }

    /// Export every service as a transport record for external consumers.
    pub async fn export_records(&self) -> Result<Vec<ServiceRecord>> {
        let services = self.db.list_services().await?;
        Ok(services.into_iter().map(ServiceRecord::from).collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use techflow_types::{ValidationError, DEFAULT_ICON};

    fn admin_session() -> Session {
        Session {
            user_id: 1,
            username: "admin".to_string(),
        }
    }

    async fn seeded_catalog() -> CatalogService {
        let db = Arc::new(Database::in_memory().await.unwrap());
        db.seed("admin", "hash").await.unwrap();
        CatalogService::new(db)
    }

    fn fields(name: &str, price: &str, stock: &str) -> ServiceFields {
        ServiceFields {
            name: name.to_string(),
            price: price.to_string(),
            stock: stock.to_string(),
            ..ServiceFields::default()
        }
    }

    #[tokio::test]
    async fn create_then_detail_round_trips() {
        let catalog = seeded_catalog().await;
        let session = admin_session();

        let created = catalog
            .create(&session, fields("Hosting", "100", "5"))
            .await
            .unwrap();
        let detail = catalog.detail(created.id).await.unwrap();

        assert_eq!(detail.name, "Hosting");
        assert_eq!(detail.price, 100.0);
        assert_eq!(detail.stock, 5);
        assert!(!detail.promotion);
        assert_eq!(detail.icon, DEFAULT_ICON);
    }

    #[tokio::test]
    async fn create_rejects_malformed_input() {
        let catalog = seeded_catalog().await;

        let err = catalog
            .create(&admin_session(), fields("", "100", "5"))
            .await
            .unwrap_err();
        assert!(matches!(
            err,
            CatalogError::Validation(ValidationError::EmptyName)
        ));

        let err = catalog
            .create(&admin_session(), fields("X", "abc", "5"))
            .await
            .unwrap_err();
        assert!(matches!(
            err,
            CatalogError::Validation(ValidationError::InvalidPrice)
        ));
    }

    #[tokio::test]
    async fn detail_of_absent_id_is_not_found() {
        let catalog = seeded_catalog().await;
        let err = catalog.detail(999).await.unwrap_err();
        assert!(matches!(err, CatalogError::NotFound));
    }

    #[tokio::test]
    async fn delete_always_succeeds() {
        let catalog = seeded_catalog().await;
        let session = admin_session();

        catalog.delete(&session, 2).await.unwrap();
        catalog.delete(&session, 2).await.unwrap();
        catalog.delete(&session, 999).await.unwrap();

        assert_eq!(catalog.list_public().await.unwrap().len(), 9);
    }

    #[tokio::test]
    async fn export_matches_public_list() {
        let catalog = seeded_catalog().await;

        let services = catalog.list_public().await.unwrap();
        let records = catalog.export_records().await.unwrap();

        assert_eq!(records.len(), services.len());
        for (service, record) in services.iter().zip(&records) {
            assert_eq!(record.id, service.id);
            assert_eq!(record.nombre, service.name);
            assert_eq!(record.promocion, service.promotion);
        }
    }
}
