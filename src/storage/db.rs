use log::debug;
use sea_orm::sea_query::{Index, IndexCreateStatement};
use sea_orm::sqlx::sqlite::SqlitePoolOptions;
use sea_orm::{
    ConnectOptions, ConnectionTrait, Database, DatabaseConnection, DbErr, EntityTrait, PaginatorTrait, RuntimeErr,
    Schema, SqlxSqliteConnector,
};

use crate::config::StorageConfig;
use crate::constants::{FILE_DB_MAX_CONNECTIONS, LOG_SCHEMA_READY};
use crate::entities::{board, label, list, project, task, task_label};
use crate::error::Result;

/// Local storage for board data
pub struct LocalStorage {
    pub conn: DatabaseConnection,
}

impl LocalStorage {
    /// Open the configured database and make sure the schema exists
    pub async fn new(config: &StorageConfig) -> Result<Self> {
        let conn = if config.is_in_memory() {
            Self::connect_memory(&config.database_url()).await?
        } else {
            let mut options = ConnectOptions::new(config.database_url());
            options
                .max_connections(FILE_DB_MAX_CONNECTIONS)
                .min_connections(1)
                .sqlx_logging(false);
            Database::connect(options).await?
        };
        let storage = LocalStorage { conn };
        storage.init_schema().await?;
        Ok(storage)
    }

    /// Every SQLite memory connection is its own database, so the pool keeps
    /// exactly one and never reaps or rotates it.
    async fn connect_memory(url: &str) -> Result<DatabaseConnection> {
        let pool = SqlitePoolOptions::new()
            .min_connections(1)
            .max_connections(1)
            .idle_timeout(None) // avoid idle reaping
            .max_lifetime(None) // avoid lifetime rotation
            .connect(url)
            .await
            .map_err(|e| DbErr::Conn(RuntimeErr::SqlxError(e)))?;
        Ok(SqlxSqliteConnector::from_sqlx_sqlite_pool(pool))
    }

    /// Open a fresh in-memory database
    pub async fn in_memory() -> Result<Self> {
        Self::new(&StorageConfig::default()).await
    }

    /// Initialize database schema from the entity definitions
    async fn init_schema(&self) -> Result<()> {
        let backend = self.conn.get_database_backend();
        let schema = Schema::new(backend);

        // Parents before children so foreign keys resolve
        let tables = vec![
            schema.create_table_from_entity(project::Entity),
            schema.create_table_from_entity(board::Entity),
            schema.create_table_from_entity(list::Entity),
            schema.create_table_from_entity(label::Entity),
            schema.create_table_from_entity(task::Entity),
            schema.create_table_from_entity(task_label::Entity),
        ];
        for mut table in tables {
            table.if_not_exists();
            self.conn.execute(backend.build(&table)).await?;
        }

        for index in Self::unique_indexes() {
            self.conn.execute(backend.build(&index)).await?;
        }

        debug!("{}", LOG_SCHEMA_READY);
        Ok(())
    }

    /// Composite unique keys that the entity derive cannot express
    fn unique_indexes() -> Vec<IndexCreateStatement> {
        vec![
            Index::create()
                .name("idx_boards_project_title")
                .table(board::Entity)
                .col(board::Column::ProjectId)
                .col(board::Column::Title)
                .unique()
                .if_not_exists()
                .to_owned(),
            Index::create()
                .name("idx_lists_board_title")
                .table(list::Entity)
                .col(list::Column::BoardId)
                .col(list::Column::Title)
                .unique()
                .if_not_exists()
                .to_owned(),
            Index::create()
                .name("idx_labels_title_project")
                .table(label::Entity)
                .col(label::Column::Title)
                .col(label::Column::ProjectId)
                .unique()
                .if_not_exists()
                .to_owned(),
        ]
    }

    /// Check if the database has any data
    pub async fn has_data(&self) -> Result<bool> {
        let count = project::Entity::find().count(&self.conn).await?;
        Ok(count > 0)
    }

    /// Clear all data from the database, children first
    pub async fn clear_all_data(&self) -> Result<()> {
        task_label::Entity::delete_many().exec(&self.conn).await?;
        task::Entity::delete_many().exec(&self.conn).await?;
        list::Entity::delete_many().exec(&self.conn).await?;
        board::Entity::delete_many().exec(&self.conn).await?;
        label::Entity::delete_many().exec(&self.conn).await?;
        project::Entity::delete_many().exec(&self.conn).await?;
        Ok(())
    }
}
