#![allow(dead_code)]

use diesel::connection::SimpleConnection;
use diesel_migrations::{EmbeddedMigrations, MigrationHarness, embed_migrations};
use tempfile::TempDir;

use savings_search::db::{DbPool, establish_connection_pool};

pub const MIGRATIONS: EmbeddedMigrations = embed_migrations!("migrations");

/// Migrated SQLite database living in a temporary directory that is removed
/// on drop.
pub struct TestDb {
    pool: DbPool,
    _dir: TempDir,
}

impl TestDb {
    pub fn new(name: &str) -> Self {
        let dir = tempfile::tempdir().expect("create temp dir");
        let path = dir.path().join(name);
        let url = path.to_str().expect("utf-8 path").to_string();

        let pool = establish_connection_pool(&url).expect("build pool");
        let mut conn = pool.get().expect("get connection");
        conn.run_pending_migrations(MIGRATIONS)
            .expect("run migrations");

        Self { pool, _dir: dir }
    }

    pub fn pool(&self) -> DbPool {
        self.pool.clone()
    }

    pub fn execute(&self, sql: &str) {
        let mut conn = self.pool.get().expect("get connection");
        conn.batch_execute(sql).expect("execute seed sql");
    }

    /// Seeds two branches under the head office plus one unrelated office.
    ///
    /// Offices: 1 `.` head, 2 `.2.` north, 3 `.2.3.` north-east, 4 `.4.` south.
    /// Accounts:
    /// * 1 Alice (office 2, born 1990-10-20) USD, active
    /// * 2 Bob (office 3, born 1985-10-20) EUR, approved, external EXT-2
    /// * 3 Carol (office 4, born 1970-10-20) USD, active
    /// * 4 Dave (office 2, born 1992-03-05) USD, closed
    /// * 5 group Savers (office 3) USD, active
    /// * 6 Alice second account, product 2, USD, active
    pub fn seed_accounts(&self) {
        self.execute(
            r#"
            INSERT INTO m_office (id, parent_id, hierarchy, name) VALUES
                (1, NULL, '.', 'Head Office'),
                (2, 1, '.2.', 'North'),
                (3, 2, '.2.3.', 'North East'),
                (4, 1, '.4.', 'South');

            INSERT INTO m_staff (id, office_id, display_name) VALUES
                (1, 2, 'Officer Olive');

            INSERT INTO m_group (id, office_id, display_name) VALUES
                (1, 3, 'Savers');

            INSERT INTO m_client (id, office_id, display_name, date_of_birth) VALUES
                (1, 2, 'Alice', '1990-10-20'),
                (2, 3, 'Bob', '1985-10-20'),
                (3, 4, 'Carol', '1970-10-20'),
                (4, 2, 'Dave', '1992-03-05');

            INSERT INTO m_savings_product (id, name, currency_code) VALUES
                (1, 'Passbook', 'USD'),
                (2, 'Fixed Goal', 'USD');

            INSERT INTO m_savings_account
                (id, account_no, external_id, client_id, group_id, product_id,
                 field_officer_id, status, currency_code, submitted_on_date)
            VALUES
                (1, '000000001', NULL, 1, NULL, 1, 1, 'active', 'USD', '2024-01-05'),
                (2, '000000002', 'EXT-2', 2, NULL, 1, NULL, 'approved', 'EUR', '2024-01-03'),
                (3, '000000003', NULL, 3, NULL, 1, NULL, 'active', 'USD', '2024-01-01'),
                (4, '000000004', NULL, 4, NULL, 1, NULL, 'closed', 'USD', '2024-01-04'),
                (5, '000000005', NULL, NULL, 1, 1, NULL, 'active', 'USD', '2024-01-02'),
                (6, '000000006', NULL, 1, NULL, 2, 1, 'active', 'USD', '2024-01-06');
            "#,
        );
    }
}
