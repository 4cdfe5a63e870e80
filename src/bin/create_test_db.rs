use std::error::Error;
use std::path::Path;
use std::process::exit;

use clap::Parser;
use rusqlite::Connection;

use pocket_ledger::{RecordFields, RecordKind, create_record, initialize_db};

/// A utility for creating a test database for the Pocket Ledger server.
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Args {
    /// File path to save the SQLite database to.
    #[arg(long, short)]
    output_path: String,
}

const SAMPLE_RECORDS: &[(RecordKind, &str, f64)] = &[
    (RecordKind::Credit, "Car loan", 350.0),
    (RecordKind::Credit, "Car loan ", 150.0),
    (RecordKind::Credit, "Phone", 45.9),
    (RecordKind::Plus, "Salary", 12000.0),
    (RecordKind::Plus, "Gift", 200.0),
    (RecordKind::Transaction, "Groceries", 320.4),
    (RecordKind::Transaction, " Groceries", 95.0),
    (RecordKind::Transaction, "Coffee", 14.0),
    (RecordKind::General, "הוצאות", 2100.0),
    (RecordKind::General, "ציפים", 400.0),
    (RecordKind::General, "בד ביט", 250.0),
    (RecordKind::General, "Rent", 4500.0),
];

/// Create and populate a database for manual testing.
fn main() -> Result<(), Box<dyn Error>> {
    let args = Args::parse();

    let output_path = Path::new(&args.output_path);

    match output_path.extension() {
        None => {
            eprintln!("Output path must include a file extension (e.g., 'my_database.db').");
            exit(1);
        }
        Some(extension) if extension.is_empty() => {
            eprintln!("Output path must include a file extension (e.g., 'my_database.db').");
            exit(1);
        }
        _ => {}
    }

    if output_path.is_file() {
        eprintln!("File already exists at {output_path:#?}!");
        exit(1);
    }

    println!("Creating database at {output_path:#?}");
    let conn = Connection::open(output_path)?;

    initialize_db(&conn)?;

    println!("Creating {} sample records...", SAMPLE_RECORDS.len());

    for &(kind, label, amount) in SAMPLE_RECORDS {
        create_record(
            kind,
            RecordFields {
                label: label.to_owned(),
                amount,
            },
            &conn,
        )?;
    }

    println!("Success!");

    Ok(())
}
