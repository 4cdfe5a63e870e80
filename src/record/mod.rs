//! Credits, pluses, transactions and general entries.
//!
//! The four kinds of record share one implementation, parameterised by
//! [RecordKind].

mod api;
mod db;
mod domain;
mod edit;
mod page;
mod validation;

pub use api::{
    create_record_endpoint, delete_record_endpoint, list_records_endpoint, update_record_endpoint,
};
pub use db::{
    create_record, create_record_table, delete_record, get_record, list_records, update_record,
};
pub use domain::{Record, RecordFields, RecordForm, RecordId, RecordKind};
pub use edit::{get_edit_record_page, update_record_form_endpoint};
pub use page::{create_record_form_endpoint, delete_record_form_endpoint, get_records_page};
