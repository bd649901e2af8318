//! SQLite persistence layer (embedded, no external database server)

use crate::error::Result;
use sqlx::sqlite::{SqliteConnectOptions, SqlitePoolOptions, SqliteQueryResult};
use sqlx::SqlitePool;
use std::sync::Arc;
use techflow_types::{AdminAccount, NewService, Service};

/// Example catalog inserted at first startup. Ids are fixed so re-seeding a
/// row is a primary-key conflict, which keeps each insert idempotent.
const SEED_SERVICES: &[(i64, &str, &str, f64, i64, bool, &str)] = &[
    (
        1,
        "Desarrollo Web",
        "Sitios web modernos y responsivos con las últimas tecnologías",
        2_500_000.0,
        15,
        true,
        "💻",
    ),
    (
        2,
        "Apps Móviles",
        "Aplicaciones nativas para iOS y Android",
        4_500_000.0,
        8,
        false,
        "📱",
    ),
    (
        3,
        "Cloud Computing",
        "Migración y gestión de servicios en la nube",
        3_200_000.0,
        12,
        true,
        "☁️",
    ),
    (
        4,
        "Ciberseguridad",
        "Auditorías de seguridad y protección de datos",
        2_800_000.0,
        6,
        false,
        "🔐",
    ),
    (
        5,
        "Inteligencia Artificial",
        "Soluciones de IA y Machine Learning personalizadas",
        6_500_000.0,
        4,
        true,
        "🤖",
    ),
    (
        6,
        "UI/UX Design",
        "Diseño de interfaces centradas en el usuario",
        1_800_000.0,
        20,
        false,
        "🎨",
    ),
    (
        7,
        "Business Intelligence",
        "Análisis de datos y reportes empresariales",
        3_800_000.0,
        10,
        false,
        "📊",
    ),
    (
        8,
        "Mantenimiento IT",
        "Soporte técnico especializado 24/7",
        1_200_000.0,
        25,
        false,
        "🔧",
    ),
    (
        9,
        "E-commerce",
        "Tiendas online completas y optimizadas",
        3_500_000.0,
        7,
        true,
        "🌐",
    ),
    (
        10,
        "Consultoría Digital",
        "Estrategias de transformación digital",
        2_200_000.0,
        18,
        false,
        "📈",
    ),
];

pub struct Database {
    pool: Arc<SqlitePool>,
}

impl Database {
    pub async fn new(database_path: &str) -> Result<Self> {
        tracing::info!("Opening SQLite database at: {}", database_path);

        // Create parent directory if needed
        if let Some(parent) = std::path::Path::new(database_path).parent() {
            if !parent.as_os_str().is_empty() {
                tokio::fs::create_dir_all(parent)
                    .await
                    .map_err(sqlx::Error::Io)?;
            }
        }

        let options = SqliteConnectOptions::new()
            .filename(database_path)
            .create_if_missing(true)
            .journal_mode(sqlx::sqlite::SqliteJournalMode::Wal)
            .synchronous(sqlx::sqlite::SqliteSynchronous::Normal);

        let pool = SqlitePoolOptions::new()
            .max_connections(5)
            .connect_with(options)
            .await?;

        Self::run_migrations(&pool).await?;

        tracing::info!("Database initialization complete");

        Ok(Self {
            pool: Arc::new(pool),
        })
    }

    /// Single shared in-memory database for tests.
    #[cfg(test)]
    pub(crate) async fn in_memory() -> Result<Self> {
        let pool = SqlitePoolOptions::new()
            .max_connections(1)
            .idle_timeout(None)
            .max_lifetime(None)
            .connect_with(SqliteConnectOptions::new().filename(":memory:"))
            .await?;

        Self::run_migrations(&pool).await?;

        Ok(Self {
            pool: Arc::new(pool),
        })
    }

    async fn run_migrations(pool: &SqlitePool) -> Result<()> {
        // Services table
        sqlx::query(
            r#"
            CREATE TABLE IF NOT EXISTS services (
                id INTEGER PRIMARY KEY AUTOINCREMENT,
                name TEXT NOT NULL,
                description TEXT NOT NULL DEFAULT '',
                price REAL NOT NULL,
                stock INTEGER NOT NULL DEFAULT 0,
                promotion INTEGER NOT NULL DEFAULT 0,
                icon TEXT NOT NULL DEFAULT '🔧',
                created_at DATETIME DEFAULT CURRENT_TIMESTAMP
            )
            "#,
        )
        .execute(pool)
        .await?;

        // Admin accounts table
        sqlx::query(
            r#"
            CREATE TABLE IF NOT EXISTS admin_accounts (
                id INTEGER PRIMARY KEY AUTOINCREMENT,
                username TEXT UNIQUE NOT NULL,
                password_hash TEXT NOT NULL,
                role TEXT NOT NULL DEFAULT 'admin',
                created_at DATETIME DEFAULT CURRENT_TIMESTAMP
            )
            "#,
        )
        .execute(pool)
        .await?;

        Ok(())
    }

    /// Seed the admin account and the example catalog.
    ///
    /// Every insert is individually idempotent: a uniqueness violation on one
    /// row is skipped without aborting the rest, so this is safe to call on
    /// every process start.
    pub async fn seed(&self, admin_username: &str, admin_password_hash: &str) -> Result<()> {
        let inserted = sqlx::query(
            r#"
            INSERT INTO admin_accounts (username, password_hash) VALUES (?1, ?2)
            "#,
        )
        .bind(admin_username)
        .bind(admin_password_hash)
        .execute(&*self.pool)
        .await;
        swallow_duplicate(inserted, admin_username)?;

        for &(id, name, description, price, stock, promotion, icon) in SEED_SERVICES {
            let inserted = sqlx::query(
                r#"
                INSERT INTO services (id, name, description, price, stock, promotion, icon)
                VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)
                "#,
            )
            .bind(id)
            .bind(name)
            .bind(description)
            .bind(price)
            .bind(stock)
            .bind(promotion)
            .bind(icon)
            .execute(&*self.pool)
            .await;
            swallow_duplicate(inserted, name)?;
        }

        Ok(())
    }

    // Service operations

    pub async fn list_services(&self) -> Result<Vec<Service>> {
        let rows: Vec<ServiceRow> = sqlx::query_as(
            r#"
            SELECT id, name, description, price, stock, promotion, icon, created_at
            FROM services
            ORDER BY id ASC
            "#,
        )
        .fetch_all(&*self.pool)
        .await?;

        Ok(rows.into_iter().map(|r| r.into()).collect())
    }

    pub async fn get_service(&self, id: i64) -> Result<Option<Service>> {
        let row: Option<ServiceRow> = sqlx::query_as(
            r#"
            SELECT id, name, description, price, stock, promotion, icon, created_at
            FROM services WHERE id = ?1
            "#,
        )
        .bind(id)
        .fetch_optional(&*self.pool)
        .await?;

        Ok(row.map(|r| r.into()))
    }

    /// Insert a validated service and return the stored row with its
    /// generated id.
    pub async fn insert_service(&self, new: &NewService) -> Result<Service> {
        let result = sqlx::query(
            r#"
            INSERT INTO services (name, description, price, stock, promotion, icon)
            VALUES (?1, ?2, ?3, ?4, ?5, ?6)
            "#,
        )
        .bind(&new.name)
        .bind(&new.description)
        .bind(new.price)
        .bind(new.stock)
        .bind(new.promotion)
        .bind(&new.icon)
        .execute(&*self.pool)
        .await?;

        let id = result.last_insert_rowid();
        let row: ServiceRow = sqlx::query_as(
            r#"
            SELECT id, name, description, price, stock, promotion, icon, created_at
            FROM services WHERE id = ?1
            "#,
        )
        .bind(id)
        .fetch_one(&*self.pool)
        .await?;

        Ok(row.into())
    }

    /// Delete a service row. Deleting an absent id is a no-op.
    pub async fn delete_service(&self, id: i64) -> Result<()> {
        let result = sqlx::query(
            r#"
            DELETE FROM services WHERE id = ?1
            "#,
        )
        .bind(id)
        .execute(&*self.pool)
        .await?;

        if result.rows_affected() == 0 {
            tracing::debug!("Delete of absent service id={} ignored", id);
        }

        Ok(())
    }

    // Account operations

    pub async fn find_account(&self, username: &str) -> Result<Option<AdminAccount>> {
        let row: Option<AccountRow> = sqlx::query_as(
            r#"
            SELECT id, username, password_hash, role, created_at
            FROM admin_accounts WHERE username = ?1
            "#,
        )
        .bind(username)
        .fetch_optional(&*self.pool)
        .await?;

        Ok(row.map(|r| r.into()))
    }
}

/// A uniqueness violation means the row is already seeded; any other
/// database error aborts.
fn swallow_duplicate(result: sqlx::Result<SqliteQueryResult>, what: &str) -> Result<()> {
    match result {
        Ok(_) => Ok(()),
        Err(sqlx::Error::Database(e))
            if matches!(e.kind(), sqlx::error::ErrorKind::UniqueViolation) =>
        {
            tracing::debug!("Seed row already present, skipping: {}", what);
            Ok(())
        }
        Err(e) => Err(e.into()),
    }
}

// Helper structs for sqlx query_as
#[derive(sqlx::FromRow)]
struct ServiceRow {
    id: i64,
    name: String,
    description: String,
    price: f64,
    stock: i64,
    promotion: bool,
    icon: String,
    created_at: chrono::DateTime<chrono::Utc>,
}

impl From<ServiceRow> for Service {
    fn from(r: ServiceRow) -> Self {
        Service {
            id: r.id,
            name: r.name,
            description: r.description,
            price: r.price,
            stock: r.stock,
            promotion: r.promotion,
            icon: r.icon,
            created_at: r.created_at,
        }
    }
}

#[derive(sqlx::FromRow)]
struct AccountRow {
    id: i64,
    username: String,
    password_hash: String,
    role: String,
    created_at: chrono::DateTime<chrono::Utc>,
}

impl From<AccountRow> for AdminAccount {
    fn from(r: AccountRow) -> Self {
        AdminAccount {
            id: r.id,
            username: r.username,
            password_hash: r.password_hash,
            role: r.role,
            created_at: r.created_at,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use techflow_types::{ServiceFields, DEFAULT_ICON};

    fn new_service(name: &str, price: f64, stock: i64) -> NewService {
        NewService::parse(ServiceFields {
            name: name.to_string(),
            price: price.to_string(),
            stock: stock.to_string(),
            ..ServiceFields::default()
        })
        .unwrap()
    }

    #[tokio::test]
    async fn seeding_is_idempotent() {
        let db = Database::in_memory().await.unwrap();

        for _ in 0..3 {
            db.seed("admin", "not-a-real-hash").await.unwrap();
        }

        let admins: i64 =
            sqlx::query_scalar("SELECT COUNT(*) FROM admin_accounts WHERE username = 'admin'")
                .fetch_one(&*db.pool)
                .await
                .unwrap();
        assert_eq!(admins, 1);
        assert_eq!(db.list_services().await.unwrap().len(), 10);
    }

    #[tokio::test]
    async fn seeding_keeps_rows_added_since() {
        let db = Database::in_memory().await.unwrap();
        db.seed("admin", "hash").await.unwrap();

        let added = db.insert_service(&new_service("Extra", 100.0, 1)).await.unwrap();
        db.seed("admin", "hash").await.unwrap();

        let services = db.list_services().await.unwrap();
        assert_eq!(services.len(), 11);
        assert!(services.iter().any(|s| s.id == added.id));
    }

    #[tokio::test]
    async fn listing_is_ordered_by_ascending_id() {
        let db = Database::in_memory().await.unwrap();
        db.seed("admin", "hash").await.unwrap();

        db.delete_service(3).await.unwrap();
        db.insert_service(&new_service("Nuevo", 50.0, 2)).await.unwrap();

        let ids: Vec<i64> = db.list_services().await.unwrap().iter().map(|s| s.id).collect();
        let mut sorted = ids.clone();
        sorted.sort_unstable();
        assert_eq!(ids, sorted);
        assert!(!ids.contains(&3));
    }

    #[tokio::test]
    async fn insert_then_get_round_trips() {
        let db = Database::in_memory().await.unwrap();

        let inserted = db.insert_service(&new_service("Hosting", 100.0, 5)).await.unwrap();
        let fetched = db.get_service(inserted.id).await.unwrap().unwrap();

        assert_eq!(fetched.name, "Hosting");
        assert_eq!(fetched.price, 100.0);
        assert_eq!(fetched.stock, 5);
        assert!(!fetched.promotion);
        assert_eq!(fetched.icon, DEFAULT_ICON);
    }

    #[tokio::test]
    async fn get_absent_service_is_none() {
        let db = Database::in_memory().await.unwrap();
        assert!(db.get_service(999).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn delete_is_idempotent() {
        let db = Database::in_memory().await.unwrap();
        db.seed("admin", "hash").await.unwrap();

        db.delete_service(1).await.unwrap();
        db.delete_service(1).await.unwrap();
        db.delete_service(999).await.unwrap();

        assert_eq!(db.list_services().await.unwrap().len(), 9);
    }

    #[tokio::test]
    async fn find_account_by_username() {
        let db = Database::in_memory().await.unwrap();
        db.seed("admin", "hash").await.unwrap();

        let account = db.find_account("admin").await.unwrap().unwrap();
        assert_eq!(account.username, "admin");
        assert_eq!(account.role, "admin");

        assert!(db.find_account("nobody").await.unwrap().is_none());
    }
}
