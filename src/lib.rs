//! NeoStore Supplier Client Library
//!
//! A Rust client for the NeoStore supplier REST API, providing list
//! (paginated), create, update, delete and bulk-import operations, plus
//! CNPJ formatting/validation and a data store that owns the list state
//! of the supplier admin screen.

pub mod api;
pub mod cnpj;
pub mod config;
pub mod error;
pub mod model;
pub mod store;
pub mod validation;

pub use crate::api::SupplierApi;
pub use crate::config::ClientOptions;
pub use crate::error::{Error, Result};
pub use crate::model::{
    FieldError, ImportFailure, ImportReport, NewSupplier, Page, Supplier,
};
pub use crate::store::{StoreError, SupplierStore};
pub use crate::validation::{validate, DescriptionPolicy, ValidationErrors};

/// A convenience module for common imports
pub mod prelude {
    pub use crate::api::SupplierApi;
    pub use crate::config::ClientOptions;
    pub use crate::error::{Error, Result};
    pub use crate::model::{NewSupplier, Supplier};
    pub use crate::store::SupplierStore;
}
