//! Tenant schema DDL: derivation and validation of schema names, schema
//! creation/removal, and provisioning of the tenant-scoped tables.
//!
//! Shared tables are managed by the `migration` crate; the tables created
//! here exist once per tenant schema and are intentionally outside the
//! migration history.

use sea_orm::sea_query::{
    Alias, ColumnDef, ForeignKey, ForeignKeyAction, Table, TableCreateStatement,
};
use sea_orm::{ConnectionTrait, DatabaseBackend, DbErr, DeriveIden, Statement};

use crate::error::RepositoryError;

/// Longest identifier Postgres accepts without truncation.
const MAX_SCHEMA_NAME_LEN: usize = 63;

/// Derive a usable schema name from a tenant display name.
///
/// Lowercases, maps runs of non-alphanumeric characters to single
/// underscores, and prefixes names that would not start with a letter.
pub fn derive_schema_name(name: &str) -> String {
    let mut out = String::with_capacity(name.len());
    let mut last_was_sep = false;

    for ch in name.trim().chars() {
        if ch.is_ascii_alphanumeric() {
            out.push(ch.to_ascii_lowercase());
            last_was_sep = false;
        } else if !last_was_sep && !out.is_empty() {
            out.push('_');
            last_was_sep = true;
        }
    }

    while out.ends_with('_') {
        out.pop();
    }

    if out.is_empty() {
        out = "tenant".to_string();
    }

    if !out.starts_with(|c: char| c.is_ascii_lowercase()) || out.starts_with("pg_") {
        out = format!("tenant_{}", out);
    }

    out.truncate(MAX_SCHEMA_NAME_LEN);
    out
}

/// Validate a schema name before it is interpolated into DDL.
///
/// Accepts `[a-z_][a-z0-9_]*`, at most 63 bytes, excluding the reserved
/// `pg_` prefix. Names passing this check are safe to quote verbatim.
pub fn validate_schema_name(name: &str) -> Result<(), RepositoryError> {
    if name.is_empty() {
        return Err(RepositoryError::validation_error(
            "Schema name cannot be empty",
        ));
    }

    if name.len() > MAX_SCHEMA_NAME_LEN {
        return Err(RepositoryError::validation_error(format!(
            "Schema name cannot exceed {} bytes",
            MAX_SCHEMA_NAME_LEN
        )));
    }

    if name.starts_with("pg_") {
        return Err(RepositoryError::validation_error(
            "Schema name cannot start with the reserved prefix 'pg_'",
        ));
    }

    let mut chars = name.chars();
    let first = chars.next().unwrap_or('_');
    if !(first.is_ascii_lowercase() || first == '_') {
        return Err(RepositoryError::validation_error(
            "Schema name must start with a lowercase letter or underscore",
        ));
    }

    if !name
        .chars()
        .all(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || c == '_')
    {
        return Err(RepositoryError::validation_error(
            "Schema name can only contain lowercase letters, digits, and underscores",
        ));
    }

    Ok(())
}

/// Create the tenant's schema. No-op on SQLite, which has no schemas.
pub async fn create_schema<C: ConnectionTrait>(conn: &C, schema: &str) -> Result<(), DbErr> {
    if conn.get_database_backend() != DatabaseBackend::Postgres {
        return Ok(());
    }

    conn.execute(Statement::from_string(
        DatabaseBackend::Postgres,
        format!("CREATE SCHEMA IF NOT EXISTS \"{}\"", schema),
    ))
    .await?;

    Ok(())
}

/// Drop the tenant's schema and everything in it. No-op on SQLite.
pub async fn drop_schema<C: ConnectionTrait>(conn: &C, schema: &str) -> Result<(), DbErr> {
    if conn.get_database_backend() != DatabaseBackend::Postgres {
        return Ok(());
    }

    conn.execute(Statement::from_string(
        DatabaseBackend::Postgres,
        format!("DROP SCHEMA IF EXISTS \"{}\" CASCADE", schema),
    ))
    .await?;

    Ok(())
}

/// Create the tenant-scoped tables inside the tenant's schema.
///
/// On Postgres the products table is created schema-qualified with a
/// cross-schema foreign key to `public.categories`; on SQLite the table is
/// created unqualified in the shared namespace.
pub async fn provision_tenant_tables<C: ConnectionTrait>(
    conn: &C,
    schema: &str,
) -> Result<(), DbErr> {
    let backend = conn.get_database_backend();
    let stmt = create_products_table(backend, schema);
    conn.execute(backend.build(&stmt)).await?;
    Ok(())
}

fn create_products_table(backend: DatabaseBackend, schema: &str) -> TableCreateStatement {
    let mut stmt = Table::create();
    stmt.if_not_exists()
        .col(
            ColumnDef::new(Products::Id)
                .big_integer()
                .not_null()
                .auto_increment()
                .primary_key(),
        )
        .col(ColumnDef::new(Products::Name).text().not_null())
        .col(ColumnDef::new(Products::CategoryId).big_integer().null())
        .col(
            ColumnDef::new(Products::Price)
                .decimal_len(10, 2)
                .not_null(),
        );

    let mut fk = ForeignKey::create();
    fk.name("fk_products_category_id")
        .from_col(Products::CategoryId)
        .to_col(Categories::Id)
        .on_delete(ForeignKeyAction::Cascade);

    if backend == DatabaseBackend::Postgres {
        stmt.table((Alias::new(schema), Products::Table));
        fk.from_tbl((Alias::new(schema), Products::Table))
            .to_tbl((Alias::new("public"), Categories::Table));
    } else {
        stmt.table(Products::Table);
        fk.from_tbl(Products::Table).to_tbl(Categories::Table);
    }

    stmt.foreign_key(&mut fk);
    stmt
}

#[derive(DeriveIden)]
enum Products {
    Table,
    Id,
    Name,
    CategoryId,
    Price,
}

#[derive(DeriveIden)]
enum Categories {
    Table,
    Id,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn derives_slug_from_display_name() {
        assert_eq!(derive_schema_name("Acme Corp"), "acme_corp");
        assert_eq!(derive_schema_name("  Wayne -- Enterprises  "), "wayne_enterprises");
        assert_eq!(derive_schema_name("42 Widgets"), "tenant_42_widgets");
        assert_eq!(derive_schema_name("pg_catalog"), "tenant_pg_catalog");
        assert_eq!(derive_schema_name("!!!"), "tenant");
    }

    #[test]
    fn derived_names_always_validate() {
        for name in ["Acme Corp", "42 Widgets", "pg_x", "ümläut GmbH", "", "---"] {
            let derived = derive_schema_name(name);
            assert!(
                validate_schema_name(&derived).is_ok(),
                "derived name '{}' from '{}' failed validation",
                derived,
                name
            );
        }
    }

    #[test]
    fn rejects_unsafe_schema_names() {
        assert!(validate_schema_name("").is_err());
        assert!(validate_schema_name("Tenant").is_err());
        assert!(validate_schema_name("pg_temp").is_err());
        assert!(validate_schema_name("1tenant").is_err());
        assert!(validate_schema_name("acme;drop").is_err());
        assert!(validate_schema_name(&"a".repeat(64)).is_err());
    }

    #[test]
    fn accepts_plain_identifiers() {
        assert!(validate_schema_name("acme").is_ok());
        assert!(validate_schema_name("_internal").is_ok());
        assert!(validate_schema_name("acme_corp_2").is_ok());
    }

    #[test]
    fn postgres_ddl_is_schema_qualified() {
        let stmt = create_products_table(DatabaseBackend::Postgres, "acme");
        let sql = stmt.to_string(sea_orm::sea_query::PostgresQueryBuilder);

        assert!(sql.contains("\"acme\".\"products\""));
        assert!(sql.contains("\"public\".\"categories\""));
        assert!(sql.contains("ON DELETE CASCADE"));
    }

    #[test]
    fn sqlite_ddl_is_unqualified() {
        let stmt = create_products_table(DatabaseBackend::Sqlite, "acme");
        let sql = stmt.to_string(sea_orm::sea_query::SqliteQueryBuilder);

        assert!(sql.contains("\"products\""));
        assert!(!sql.contains("acme"));
    }
}
