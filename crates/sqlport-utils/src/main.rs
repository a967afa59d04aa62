//! sqlport CLI
//!
//! Command-line tool for temporary tables, schema cleanup, and previewing
//! paginated SQL per dialect.
//!
//! Each invocation opens its own connection. SQLite `TEMP` tables live only as
//! long as that connection, so a table made by `create-temp` is gone once the
//! command exits; pass `--then` to use it within the same session.

use clap::{Parser, Subcommand, ValueEnum};
use sqlx::{Connection as _, SqliteConnection};
use tracing::{Level, debug, info};
use tracing_subscriber::FmtSubscriber;

use sqlport_core::{Dialect, GenericDialect, MssqlDialect, Select};
use sqlport_utils::prelude::*;

/// Portable pagination and temporary table tooling.
#[derive(Parser)]
#[command(name = "sqlport")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Database URL (SQLite path or connection string).
    #[arg(short, long, env = "DATABASE_URL", default_value = "sqlite:db.sqlite3?mode=rwc")]
    database: String,

    /// Enable verbose output.
    #[arg(short, long)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Create a temporary table and print its name.
    ///
    /// The table only lives as long as this command's connection.
    CreateTemp {
        /// Table name, `%` is replaced by a random number.
        #[arg(short, long, default_value = "TMP_%")]
        pattern: String,

        /// Column definitions, e.g. "id INTEGER, label TEXT".
        #[arg(short, long)]
        columns: String,

        /// Statement to run on the same connection once the table exists;
        /// `{table}` is replaced by its name. May be repeated.
        #[arg(long = "then")]
        then: Vec<String>,
    },

    /// Empty and drop a temporary table.
    DropTemp {
        /// Table name.
        name: String,
    },

    /// Drop every table and sequence in one transaction.
    Cleanup,

    /// Print the SQL for one page of a table.
    Page {
        /// Target dialect.
        #[arg(long, value_enum, default_value_t = DialectArg::Generic)]
        dialect: DialectArg,

        /// Table to select from.
        #[arg(short, long)]
        table: String,

        /// Columns to select (all if not specified).
        #[arg(short, long, value_delimiter = ',')]
        columns: Vec<String>,

        /// Ascending ORDER BY columns; prefix with '-' for descending.
        #[arg(short, long, value_delimiter = ',', allow_hyphen_values = true)]
        order: Vec<String>,

        /// Maximum number of rows.
        #[arg(short, long)]
        limit: u64,

        /// Rows to skip.
        #[arg(long, default_value_t = 0)]
        offset: u64,
    },
}

#[derive(Clone, Copy, ValueEnum)]
enum DialectArg {
    Generic,
    Mssql,
}

impl DialectArg {
    fn build(self) -> Box<dyn Dialect> {
        match self {
            Self::Generic => Box::new(GenericDialect::new()),
            Self::Mssql => Box::new(MssqlDialect::new()),
        }
    }
}

fn page_sql(
    dialect: DialectArg,
    table: &str,
    columns: &[String],
    order: &[String],
    limit: u64,
    offset: u64,
) -> sqlport_core::Result<String> {
    let query = Select::with_boxed_dialect(dialect.build());
    let query = if columns.is_empty() {
        query.all()
    } else {
        let columns: Vec<&str> = columns.iter().map(String::as_str).collect();
        query.columns(&columns)
    };

    let mut query = query.from(table);
    for column in order {
        query = match column.strip_prefix('-') {
            Some(column) => query.order_by_desc(column),
            None => query.order_by_asc(column),
        };
    }
    query.limit_offset(limit, offset).render()
}

/// Placeholder for the created table's name in `create-temp --then`.
const TABLE_PLACEHOLDER: &str = "{table}";

async fn run_in_session<C: Connection, D: CatalogDialect, N: NameGenerator>(
    manager: &mut TemporaryObjectManager<C, D, N>,
    table: &str,
    statements: &[String],
) -> sqlport_utils::error::Result<Vec<u64>> {
    let mut affected = Vec::with_capacity(statements.len());
    for statement in statements {
        let sql = statement.replace(TABLE_PLACEHOLDER, table);
        debug!(sql = %sql, "Executing SQL");
        affected.push(manager.connection_mut().execute_statement(&sql).await?);
    }
    Ok(affected)
}

async fn connect(
    database: &str,
) -> anyhow::Result<TemporaryObjectManager<SqliteConnection, SqliteCatalog>> {
    let conn = SqliteConnection::connect(database).await?;
    Ok(TemporaryObjectManager::new(conn, SqliteCatalog::new()))
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Setup logging
    let log_level = if cli.verbose {
        Level::DEBUG
    } else {
        Level::INFO
    };
    let subscriber = FmtSubscriber::builder()
        .with_max_level(log_level)
        .with_target(false)
        .without_time()
        .finish();
    tracing::subscriber::set_global_default(subscriber)?;

    match cli.command {
        Commands::Page {
            dialect,
            table,
            columns,
            order,
            limit,
            offset,
        } => {
            println!(
                "{}",
                page_sql(dialect, &table, &columns, &order, limit, offset)?
            );
        }

        Commands::CreateTemp {
            pattern,
            columns,
            then,
        } => {
            let mut manager = connect(&cli.database).await?;
            let name = manager.create_temporary_table(&pattern, &columns).await?;
            println!("{name}");
            let affected = run_in_session(&mut manager, &name, &then).await?;
            for (statement, rows) in then.iter().zip(affected) {
                info!(statement = %statement, rows, "Statement executed");
            }
        }

        Commands::DropTemp { name } => {
            let mut manager = connect(&cli.database).await?;
            manager.drop_temporary_table(&name).await?;
        }

        Commands::Cleanup => {
            let mut manager = connect(&cli.database).await?;
            let report = manager.cleanup().await?;
            for table in &report.tables {
                println!("table    {table}");
            }
            for sequence in &report.sequences {
                println!("sequence {sequence}");
            }
            info!("Dropped {} objects.", report.dropped());
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    async fn create_test_manager() -> TemporaryObjectManager<SqliteConnection, SqliteCatalog> {
        connect("sqlite::memory:")
            .await
            .expect("Failed to open in-memory SQLite database")
    }

    #[tokio::test]
    async fn test_statements_see_the_temporary_table() {
        let mut manager = create_test_manager().await;
        let table = manager
            .create_temporary_table("TMP_%", "id INTEGER")
            .await
            .unwrap();

        let statements = vec![
            "INSERT INTO {table} (id) VALUES (1), (2)".to_string(),
            "DELETE FROM {table} WHERE id = 1".to_string(),
        ];
        let affected = run_in_session(&mut manager, &table, &statements)
            .await
            .unwrap();
        assert_eq!(affected, vec![2, 1]);

        let remaining = manager
            .connection_mut()
            .fetch_count(&format!("SELECT count(*) FROM {table}"))
            .await
            .unwrap();
        assert_eq!(remaining, 1);
    }

    #[tokio::test]
    async fn test_failed_statement_is_reported() {
        let mut manager = create_test_manager().await;
        let table = manager
            .create_temporary_table("TMP_%", "id INTEGER")
            .await
            .unwrap();

        let statements = vec!["INSERT INTO {table} (missing) VALUES (1)".to_string()];
        let err = run_in_session(&mut manager, &table, &statements)
            .await
            .unwrap_err();
        assert!(matches!(err, DbError::Database(_)));
    }

    #[test]
    fn test_page_sql_parses_order_prefix() {
        let sql = page_sql(
            DialectArg::Mssql,
            "events",
            &["id".to_string(), "at".to_string()],
            &["-at".to_string(), "id".to_string()],
            2,
            4,
        )
        .unwrap();
        assert_eq!(
            sql,
            "SELECT * FROM ( SELECT TOP 2 * FROM ( \
             SELECT TOP 6 id, at FROM events ORDER BY at DESC, id ASC \
             ) AS sqlport_page_inner ORDER BY at ASC, id DESC \
             ) AS sqlport_page_outer ORDER BY at DESC, id ASC"
        );
    }

    #[test]
    fn test_page_sql_generic_selects_all_by_default() {
        let sql = page_sql(DialectArg::Generic, "events", &[], &[], 10, 0).unwrap();
        assert_eq!(sql, "SELECT * FROM events LIMIT 10");
    }
}
