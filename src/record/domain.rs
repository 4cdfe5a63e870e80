//! Core record domain types.

use serde::{Deserialize, Serialize, Serializer, ser::SerializeMap};
use time::{OffsetDateTime, format_description::well_known::Rfc3339};

use crate::{database_id::DatabaseId, endpoints};

/// Database identifier for a record.
pub type RecordId = DatabaseId;

/// The four independent kinds of record the ledger keeps.
///
/// Each kind lives in its own table and only differs from the others in the
/// name of its identifying text field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RecordKind {
    /// Money owed or paid on credit, identified by `name`.
    Credit,
    /// Extra income, identified by `name`.
    Plus,
    /// A one-off transaction, identified by its `transaction` description.
    Transaction,
    /// A general entry, identified by `title`.
    General,
}

impl RecordKind {
    /// Every record kind, in the order they are displayed.
    pub const ALL: [RecordKind; 4] = [
        RecordKind::Credit,
        RecordKind::Plus,
        RecordKind::Transaction,
        RecordKind::General,
    ];

    /// The lowercase singular name, which doubles as the table name.
    pub fn name(self) -> &'static str {
        match self {
            RecordKind::Credit => "credit",
            RecordKind::Plus => "plus",
            RecordKind::Transaction => "transaction",
            RecordKind::General => "general",
        }
    }

    /// The capitalised singular name, e.g. "Credit".
    pub fn title(self) -> &'static str {
        match self {
            RecordKind::Credit => "Credit",
            RecordKind::Plus => "Plus",
            RecordKind::Transaction => "Transaction",
            RecordKind::General => "General",
        }
    }

    /// The lowercase plural name used for the REST collection, e.g. "credits".
    pub fn collection(self) -> &'static str {
        match self {
            RecordKind::Credit => "credits",
            RecordKind::Plus => "pluses",
            RecordKind::Transaction => "transactions",
            RecordKind::General => "generals",
        }
    }

    /// The capitalised plural name, e.g. "Credits".
    pub fn plural_title(self) -> &'static str {
        match self {
            RecordKind::Credit => "Credits",
            RecordKind::Plus => "Pluses",
            RecordKind::Transaction => "Transactions",
            RecordKind::General => "Generals",
        }
    }

    /// The name of the identifying text field in JSON bodies and in the database.
    pub fn label_field(self) -> &'static str {
        match self {
            RecordKind::Credit | RecordKind::Plus => "name",
            RecordKind::Transaction => "transaction",
            RecordKind::General => "title",
        }
    }

    /// How the identifying field is labelled in forms.
    pub fn label_caption(self) -> &'static str {
        match self {
            RecordKind::Credit | RecordKind::Plus => "Name",
            RecordKind::Transaction => "Description",
            RecordKind::General => "Title",
        }
    }

    pub(crate) fn label_required_message(self) -> &'static str {
        match self {
            RecordKind::Credit | RecordKind::Plus => "Name is required",
            RecordKind::Transaction => "Transaction description is required",
            RecordKind::General => "Title is required",
        }
    }

    pub(crate) fn collection_api(self) -> &'static str {
        match self {
            RecordKind::Credit => endpoints::CREDITS_API,
            RecordKind::Plus => endpoints::PLUSES_API,
            RecordKind::Transaction => endpoints::TRANSACTIONS_API,
            RecordKind::General => endpoints::GENERALS_API,
        }
    }

    pub(crate) fn record_api(self) -> &'static str {
        match self {
            RecordKind::Credit => endpoints::CREDIT_API,
            RecordKind::Plus => endpoints::PLUS_API,
            RecordKind::Transaction => endpoints::TRANSACTION_API,
            RecordKind::General => endpoints::GENERAL_API,
        }
    }

    pub(crate) fn page_view(self) -> &'static str {
        match self {
            RecordKind::Credit => endpoints::CREDITS_VIEW,
            RecordKind::Plus => endpoints::PLUSES_VIEW,
            RecordKind::Transaction => endpoints::TRANSACTIONS_VIEW,
            RecordKind::General => endpoints::GENERALS_VIEW,
        }
    }

    pub(crate) fn form_endpoint(self) -> &'static str {
        match self {
            RecordKind::Credit => endpoints::CREDIT_FORM,
            RecordKind::Plus => endpoints::PLUS_FORM,
            RecordKind::Transaction => endpoints::TRANSACTION_FORM,
            RecordKind::General => endpoints::GENERAL_FORM,
        }
    }

    pub(crate) fn edit_view(self) -> &'static str {
        match self {
            RecordKind::Credit => endpoints::EDIT_CREDIT_VIEW,
            RecordKind::Plus => endpoints::EDIT_PLUS_VIEW,
            RecordKind::Transaction => endpoints::EDIT_TRANSACTION_VIEW,
            RecordKind::General => endpoints::EDIT_GENERAL_VIEW,
        }
    }
}

/// A stored record of any kind.
#[derive(Debug, Clone, PartialEq)]
pub struct Record {
    /// The ID generated by the database.
    pub id: RecordId,
    /// Which collection the record belongs to.
    pub kind: RecordKind,
    /// The identifying text (name, transaction description or title).
    pub label: String,
    /// The amount of money.
    pub amount: f64,
    /// When the record was created.
    pub created_at: OffsetDateTime,
    /// When the record's fields were last replaced.
    pub updated_at: OffsetDateTime,
}

// Records are serialised with their kind's field name so clients see
// `{"name": ..}`, `{"transaction": ..}` or `{"title": ..}`.
impl Serialize for Record {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        let created_at = self
            .created_at
            .format(&Rfc3339)
            .map_err(serde::ser::Error::custom)?;
        let updated_at = self
            .updated_at
            .format(&Rfc3339)
            .map_err(serde::ser::Error::custom)?;

        let mut map = serializer.serialize_map(Some(5))?;
        map.serialize_entry("_id", &self.id)?;
        map.serialize_entry(self.kind.label_field(), &self.label)?;
        map.serialize_entry("amount", &self.amount)?;
        map.serialize_entry("createdAt", &created_at)?;
        map.serialize_entry("updatedAt", &updated_at)?;
        map.end()
    }
}

/// The two mutable fields of a record after validation.
#[derive(Debug, Clone, PartialEq)]
pub struct RecordFields {
    /// The identifying text, guaranteed to be non-empty.
    pub label: String,
    /// The amount of money.
    pub amount: f64,
}

/// Form data for record creation and editing from the HTML pages.
#[derive(Debug, Default, Clone, Serialize, Deserialize)]
pub struct RecordForm {
    pub label: String,
    pub amount: String,
}

impl From<&Record> for RecordForm {
    fn from(record: &Record) -> Self {
        Self {
            label: record.label.clone(),
            amount: record.amount.to_string(),
        }
    }
}
