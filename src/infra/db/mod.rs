//! PostgreSQL connection handle and schema migrations.

use std::collections::HashSet;

use sea_orm::{
    ConnectionTrait, Database as SeaDatabase, DatabaseConnection, DbErr, EntityTrait, Statement,
};
use sea_orm_migration::{seaql_migrations, MigrationName, MigratorTrait, SchemaManager};

use crate::config::Config;

pub mod migrations;

pub use migrations::Migrator;

/// Table sea-orm-migration records applied versions in
const HISTORY_TABLE: &str = "seaql_migrations";

/// Cloneable handle over the SeaORM connection pool.
#[derive(Clone)]
pub struct Database {
    connection: DatabaseConnection,
}

/// One row of `migrate status` output
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MigrationState {
    pub name: String,
    pub applied: bool,
}

impl Database {
    /// Open the pool and bring the schema up to date.
    pub async fn connect(config: &Config) -> Result<Self, DbErr> {
        let db = Self::connect_without_migrations(config).await?;

        if let Err(e) = db.run_migrations().await {
            tracing::error!(error = %e, "Schema migration failed");
            return Err(e);
        }

        tracing::info!("Schema is up to date");
        Ok(db)
    }

    /// Open the pool only; used by the `migrate` subcommands.
    pub async fn connect_without_migrations(config: &Config) -> Result<Self, DbErr> {
        let connection = SeaDatabase::connect(&config.database_url).await?;
        Ok(Self { connection })
    }

    pub fn get_connection(&self) -> DatabaseConnection {
        self.connection.clone()
    }

    pub async fn run_migrations(&self) -> Result<(), DbErr> {
        Migrator::up(&self.connection, None).await
    }

    /// Revert the most recent migration.
    pub async fn rollback_migration(&self) -> Result<(), DbErr> {
        Migrator::down(&self.connection, Some(1)).await
    }

    /// Every known migration, in order, with whether it has been applied.
    /// A database that has never been migrated reports everything pending.
    pub async fn migration_status(&self) -> Result<Vec<MigrationState>, DbErr> {
        let applied: HashSet<String> = if SchemaManager::new(&self.connection)
            .has_table(HISTORY_TABLE)
            .await?
        {
            seaql_migrations::Entity::find()
                .all(&self.connection)
                .await?
                .into_iter()
                .map(|row| row.version)
                .collect()
        } else {
            tracing::debug!(table = HISTORY_TABLE, "No migration history yet");
            HashSet::new()
        };

        Ok(migration_states(
            Migrator::migrations().iter().map(|m| m.name().to_string()),
            &applied,
        ))
    }

    /// Drop every table and re-apply all migrations.
    pub async fn fresh_migrations(&self) -> Result<(), DbErr> {
        Migrator::fresh(&self.connection).await
    }

    /// Round-trip `SELECT 1` for the health endpoint.
    pub async fn ping(&self) -> Result<(), DbErr> {
        let backend = self.connection.get_database_backend();
        self.connection
            .execute(Statement::from_string(backend, "SELECT 1".to_string()))
            .await
            .map(|_| ())
    }
}

fn migration_states(
    names: impl IntoIterator<Item = String>,
    applied: &HashSet<String>,
) -> Vec<MigrationState> {
    names
        .into_iter()
        .map(|name| MigrationState {
            applied: applied.contains(&name),
            name,
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn known() -> Vec<String> {
        Migrator::migrations()
            .iter()
            .map(|m| m.name().to_string())
            .collect()
    }

    #[test]
    fn test_empty_history_reports_all_pending() {
        let states = migration_states(known(), &HashSet::new());

        assert_eq!(states.len(), known().len());
        assert!(!states.is_empty());
        assert!(states.iter().all(|s| !s.applied));
    }

    #[test]
    fn test_partial_history_keeps_order() {
        let names = known();
        let applied: HashSet<String> = names.iter().take(1).cloned().collect();

        let states = migration_states(names.clone(), &applied);

        assert_eq!(
            states.iter().map(|s| s.name.clone()).collect::<Vec<_>>(),
            names
        );
        assert!(states[0].applied);
        assert!(states[1..].iter().all(|s| !s.applied));
    }
}
