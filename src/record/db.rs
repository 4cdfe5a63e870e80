//! Database operations for records.
//!
//! Every kind of record has its own table with the same layout. Table and
//! column names come from [RecordKind] and are never taken from user input.

use rusqlite::{Connection, OptionalExtension, Row, params};
use time::OffsetDateTime;

use crate::{
    Error,
    record::{Record, RecordFields, RecordId, RecordKind},
};

/// Create a record and return it with its generated ID and timestamps.
pub fn create_record(
    kind: RecordKind,
    fields: RecordFields,
    connection: &Connection,
) -> Result<Record, Error> {
    let now = now_utc();

    connection.execute(
        &format!(
            "INSERT INTO \"{table}\" (\"{field}\", amount, created_at, updated_at) \
            VALUES (?1, ?2, ?3, ?3);",
            table = kind.name(),
            field = kind.label_field(),
        ),
        params![fields.label, fields.amount, now],
    )?;

    let id = connection.last_insert_rowid();

    Ok(Record {
        id,
        kind,
        label: fields.label,
        amount: fields.amount,
        created_at: now,
        updated_at: now,
    })
}

/// Retrieve a single record by ID.
pub fn get_record(kind: RecordKind, id: RecordId, connection: &Connection) -> Result<Record, Error> {
    connection
        .prepare(&format!(
            "SELECT {columns} FROM \"{table}\" WHERE id = :id;",
            columns = select_columns(kind),
            table = kind.name(),
        ))?
        .query_row(&[(":id", &id)], |row| map_row(kind, row))
        .map_err(|error| error.into())
}

/// Retrieve every record of `kind`, newest first.
pub fn list_records(kind: RecordKind, connection: &Connection) -> Result<Vec<Record>, Error> {
    connection
        .prepare(&format!(
            "SELECT {columns} FROM \"{table}\" ORDER BY created_at DESC, id DESC;",
            columns = select_columns(kind),
            table = kind.name(),
        ))?
        .query_map([], |row| map_row(kind, row))?
        .map(|maybe_record| maybe_record.map_err(|error| error.into()))
        .collect()
}

/// Replace the label and amount of a record.
///
/// Returns the updated record, or `None` if no record has the ID `id`.
pub fn update_record(
    kind: RecordKind,
    id: RecordId,
    fields: RecordFields,
    connection: &Connection,
) -> Result<Option<Record>, Error> {
    connection
        .query_row(
            &format!(
                "UPDATE \"{table}\" SET \"{field}\" = ?1, amount = ?2, updated_at = ?3 \
                WHERE id = ?4 RETURNING {columns};",
                table = kind.name(),
                field = kind.label_field(),
                columns = select_columns(kind),
            ),
            params![fields.label, fields.amount, now_utc(), id],
            |row| map_row(kind, row),
        )
        .optional()
        .map_err(Error::from)
}

/// Delete a record by ID.
///
/// Returns the deleted record, or `None` if no record has the ID `id`.
pub fn delete_record(
    kind: RecordKind,
    id: RecordId,
    connection: &Connection,
) -> Result<Option<Record>, Error> {
    connection
        .query_row(
            &format!(
                "DELETE FROM \"{table}\" WHERE id = ?1 RETURNING {columns};",
                table = kind.name(),
                columns = select_columns(kind),
            ),
            [id],
            |row| map_row(kind, row),
        )
        .optional()
        .map_err(Error::from)
}

/// Initialize the table and index for `kind`.
pub fn create_record_table(kind: RecordKind, connection: &Connection) -> Result<(), rusqlite::Error> {
    connection.execute_batch(&format!(
        "CREATE TABLE IF NOT EXISTS \"{table}\" (
            id INTEGER PRIMARY KEY,
            \"{field}\" TEXT NOT NULL,
            amount REAL NOT NULL,
            created_at TEXT NOT NULL,
            updated_at TEXT NOT NULL
        );

        CREATE INDEX IF NOT EXISTS idx_{table}_created_at ON \"{table}\"(created_at);",
        table = kind.name(),
        field = kind.label_field(),
    ))?;

    Ok(())
}

fn select_columns(kind: RecordKind) -> String {
    format!(
        "id, \"{}\", amount, created_at, updated_at",
        kind.label_field()
    )
}

fn map_row(kind: RecordKind, row: &Row) -> Result<Record, rusqlite::Error> {
    Ok(Record {
        id: row.get(0)?,
        kind,
        label: row.get(1)?,
        amount: row.get(2)?,
        created_at: row.get(3)?,
        updated_at: row.get(4)?,
    })
}

/// The current time truncated to milliseconds, so that timestamps read back
/// from the database compare equal to the ones that were written.
fn now_utc() -> OffsetDateTime {
    let now = OffsetDateTime::now_utc();

    now.replace_millisecond(now.millisecond()).unwrap_or(now)
}
