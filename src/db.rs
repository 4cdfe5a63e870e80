//! Database set up for the application.

use rusqlite::{Connection, TransactionBehavior, Transaction as SqlTransaction};

use crate::{
    Error,
    record::{RecordKind, create_record_table},
};

/// Create the tables for every kind of record if they do not already exist.
///
/// All tables are created in one exclusive transaction, so either every table
/// exists afterwards or none of the changes are applied.
///
/// # Errors
/// Returns an error if there is an SQL error.
pub fn initialize(connection: &Connection) -> Result<(), Error> {
    let transaction = SqlTransaction::new_unchecked(connection, TransactionBehavior::Exclusive)?;

    for kind in RecordKind::ALL {
        create_record_table(kind, &transaction)?;
    }

    transaction.commit()?;

    Ok(())
}
