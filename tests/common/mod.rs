use adrata_ops::db::{DbPool, establish_connection_pool};
use adrata_ops::domain::workspace::NewWorkspace;
use adrata_ops::repository::{DieselRepository, WorkspaceWriter};
use diesel_migrations::{EmbeddedMigrations, MigrationHarness, embed_migrations};

pub const MIGRATIONS: EmbeddedMigrations = embed_migrations!("migrations");

/// A migrated SQLite database in a temp directory, removed on drop.
pub struct TestDb {
    _dir: tempfile::TempDir,
    pool: DbPool,
}

impl TestDb {
    pub fn new(name: &str) -> Self {
        let dir = tempfile::tempdir().expect("create temp dir");
        let path = dir.path().join(name);
        let pool =
            establish_connection_pool(path.to_str().expect("utf8 path")).expect("create pool");
        let mut conn = pool.get().expect("get connection");
        conn.run_pending_migrations(MIGRATIONS)
            .expect("run migrations");
        Self { _dir: dir, pool }
    }

    pub fn pool(&self) -> &DbPool {
        &self.pool
    }

    pub fn repo(&self) -> DieselRepository {
        DieselRepository::new(self.pool.clone())
    }
}

/// Creates a workspace to hang test records off.
pub fn seed_workspace(repo: &DieselRepository, slug: &str) -> adrata_ops::domain::workspace::Workspace {
    repo.create_workspace(&NewWorkspace::new("Test Workspace", slug).unwrap())
        .unwrap()
}
