//! Wire types for the NeoStore supplier REST API

use serde::{Deserialize, Serialize};

/// A supplier record as returned by the backend
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Supplier {
    /// Server-assigned identifier, immutable once created
    pub id: i64,
    pub name: String,
    pub email: String,
    pub description: String,
    /// Tax identifier; stored unmasked or masked, validated on its 14 digits
    pub cnpj: String,
}

/// A supplier payload for create, update and import calls.
///
/// Never carries an identifier: the backend assigns one on creation and
/// the identifier travels in the URL on updates.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewSupplier {
    pub name: String,
    pub email: String,
    pub description: String,
    pub cnpj: String,
}

impl From<Supplier> for NewSupplier {
    fn from(supplier: Supplier) -> Self {
        Self {
            name: supplier.name,
            email: supplier.email,
            description: supplier.description,
            cnpj: supplier.cnpj,
        }
    }
}

/// One page of results plus the total count across all pages
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Page<T> {
    pub data: Vec<T>,
    pub total: u64,
}

/// A field-level error reported by the backend
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldError {
    pub field: String,
    pub message: String,
}

/// One rejected record from a bulk import
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ImportFailure {
    /// Zero-based index of the record in the submitted array
    pub index: usize,
    pub error: String,
    pub supplier: NewSupplier,
}

/// Outcome of a bulk import: how many records were accepted, and which failed
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ImportReport {
    pub imported: u64,
    #[serde(default)]
    pub errors: Vec<ImportFailure>,
}

/// Best-effort shape of an error response body.
///
/// Every member is optional so that partially conforming bodies still
/// produce a structured error instead of a parse failure.
#[derive(Debug, Clone, Deserialize)]
pub struct ApiErrorBody {
    pub status: Option<u16>,
    pub error: Option<String>,
    pub path: Option<String>,
    pub timestamp: Option<String>,
    #[serde(rename = "fieldErrors", default)]
    pub field_errors: Vec<FieldError>,
}
