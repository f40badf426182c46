//! Data orchestration for the supplier admin screen
//!
//! [`SupplierStore`] owns the current page of suppliers, the total count,
//! the page cursor and the loading flag, and resynchronizes that state by
//! reloading the current page after every mutation. Outcomes are funneled
//! to injected success/error callbacks, the way a toast layer consumes
//! them; the store itself never panics on a failed request.

use std::path::Path;

use log::{debug, warn};

use crate::api::SupplierApi;
use crate::error::{Error, Result};
use crate::model::{FieldError, ImportReport, NewSupplier, Supplier};
use crate::validation::{validate, DescriptionPolicy};

/// Notification callback, invoked with a display-ready message
pub type NotifyFn = Box<dyn Fn(&str) + Send + Sync>;

/// Confirmation hook consulted before a delete is issued
pub type ConfirmFn = Box<dyn Fn() -> bool + Send + Sync>;

/// The last failure recorded by the store
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoreError {
    pub message: String,
    pub field_errors: Vec<FieldError>,
}

/// Owns the supplier list state and drives reload-after-mutation.
///
/// The store is single-owner: one instance per screen, operations take
/// `&mut self` and resolve their resynchronizing reload before returning,
/// so a caller that awaited a mutation observes up-to-date list state.
pub struct SupplierStore {
    api: SupplierApi,
    suppliers: Vec<Supplier>,
    total: u64,
    current_page: u32,
    page_size: u32,
    loading: bool,
    last_error: Option<StoreError>,
    description_policy: DescriptionPolicy,
    on_success: Option<NotifyFn>,
    on_error: Option<NotifyFn>,
    confirm_delete: Option<ConfirmFn>,
}

impl SupplierStore {
    /// Create a store over an API client. Page size and description policy
    /// are taken from the client's options.
    pub fn new(api: SupplierApi) -> Self {
        let page_size = api.options().page_size;
        let description_policy = api.options().description_policy;
        Self {
            api,
            suppliers: Vec::new(),
            total: 0,
            current_page: 1,
            page_size,
            loading: false,
            last_error: None,
            description_policy,
            on_success: None,
            on_error: None,
            confirm_delete: None,
        }
    }

    /// Set the success notification callback
    pub fn with_on_success<F>(mut self, callback: F) -> Self
    where
        F: Fn(&str) + Send + Sync + 'static,
    {
        self.on_success = Some(Box::new(callback));
        self
    }

    /// Set the error notification callback
    pub fn with_on_error<F>(mut self, callback: F) -> Self
    where
        F: Fn(&str) + Send + Sync + 'static,
    {
        self.on_error = Some(Box::new(callback));
        self
    }

    /// Set the hook consulted before deleting. Without one, deletes
    /// proceed unconditionally.
    pub fn with_confirm_delete<F>(mut self, hook: F) -> Self
    where
        F: Fn() -> bool + Send + Sync + 'static,
    {
        self.confirm_delete = Some(Box::new(hook));
        self
    }

    /// The currently loaded page of suppliers
    pub fn suppliers(&self) -> &[Supplier] {
        &self.suppliers
    }

    /// Total supplier count across all pages, as of the last load
    pub fn total(&self) -> u64 {
        self.total
    }

    /// The page the store currently displays
    pub fn current_page(&self) -> u32 {
        self.current_page
    }

    pub fn is_loading(&self) -> bool {
        self.loading
    }

    /// The last recorded failure, cleared on the next load
    pub fn last_error(&self) -> Option<&StoreError> {
        self.last_error.as_ref()
    }

    /// Load one page of suppliers.
    ///
    /// On success, items, total and page cursor are replaced together. On
    /// failure the previous items stay visible, the error is recorded and
    /// the error callback fires; there is no caller-side recovery for a
    /// background refresh, so the failure is absorbed rather than returned.
    pub async fn load(&mut self, page: u32) {
        self.loading = true;
        self.last_error = None;

        match self.api.list(page, self.page_size).await {
            Ok(result) => {
                debug!("loaded page {page}: {} of {} suppliers", result.data.len(), result.total);
                self.suppliers = result.data;
                self.total = result.total;
                self.current_page = page;
            }
            Err(err) => {
                warn!("failed to load suppliers page {page}: {err}");
                let message = "Erro ao carregar fornecedores";
                self.last_error = Some(StoreError {
                    message: message.to_string(),
                    field_errors: Vec::new(),
                });
                self.notify_error(message);
            }
        }

        self.loading = false;
    }

    /// Create a supplier, then reload the current page.
    ///
    /// The record is validated locally first; a validation failure is
    /// returned without issuing any request or notification, so a form can
    /// overlay the field messages. Server failures are reported through the
    /// error callback and returned, letting the caller keep its form open.
    pub async fn create(&mut self, supplier: &NewSupplier) -> Result<Supplier> {
        self.check(supplier)?;
        match self.api.create(supplier).await {
            Ok(created) => {
                self.notify_success("Fornecedor criado com sucesso!");
                self.load(self.current_page).await;
                Ok(created)
            }
            Err(err) => {
                self.report_failure(&err, "Erro ao criar fornecedor");
                Err(err)
            }
        }
    }

    /// Update a supplier, then reload the current page
    pub async fn update(&mut self, id: i64, supplier: &NewSupplier) -> Result<Supplier> {
        self.check(supplier)?;
        match self.api.update(id, supplier).await {
            Ok(updated) => {
                self.notify_success("Fornecedor atualizado com sucesso!");
                self.load(self.current_page).await;
                Ok(updated)
            }
            Err(err) => {
                self.report_failure(&err, "Erro ao atualizar fornecedor");
                Err(err)
            }
        }
    }

    /// Delete a supplier after consulting the confirmation hook, then
    /// reload the current page. A declined confirmation is a no-op: no
    /// request, no notification.
    pub async fn delete(&mut self, id: i64) -> Result<()> {
        if let Some(confirm) = &self.confirm_delete {
            if !confirm() {
                debug!("delete of supplier {id} declined");
                return Ok(());
            }
        }

        match self.api.delete(id).await {
            Ok(()) => {
                self.notify_success("Fornecedor excluído com sucesso!");
                self.load(self.current_page).await;
                Ok(())
            }
            Err(err) => {
                self.report_failure(&err, "Erro ao excluir fornecedor");
                Err(err)
            }
        }
    }

    /// Import suppliers from a JSON file.
    ///
    /// Only `.json` files are accepted. Malformed JSON short-circuits with
    /// an error notification before any network call, and without a reload.
    pub async fn import_file(&mut self, path: &Path) -> Result<ImportReport> {
        let is_json = path
            .extension()
            .and_then(|ext| ext.to_str())
            .map(|ext| ext.eq_ignore_ascii_case("json"))
            .unwrap_or(false);
        if !is_json {
            let message = "Por favor, selecione um arquivo JSON válido.";
            self.notify_error(message);
            return Err(Error::general(message));
        }

        let text = match tokio::fs::read_to_string(path).await {
            Ok(text) => text,
            Err(err) => {
                warn!("failed to read import file {}: {err}", path.display());
                self.notify_error("Erro ao importar fornecedores");
                return Err(Error::Io(err));
            }
        };

        let records: Vec<NewSupplier> = match serde_json::from_str(&text) {
            Ok(records) => records,
            Err(err) => {
                self.notify_error("Erro ao importar fornecedores");
                return Err(Error::Json(err));
            }
        };

        self.import_records(&records).await
    }

    /// Submit a batch of suppliers for import, then reload the current
    /// page regardless of partial failure. The success notification fires
    /// only when every record was accepted; otherwise the error callback
    /// receives a summary of the counts.
    pub async fn import_records(&mut self, records: &[NewSupplier]) -> Result<ImportReport> {
        match self.api.import(records).await {
            Ok(report) => {
                if report.errors.is_empty() {
                    self.notify_success(&format!(
                        "{} fornecedores importados com sucesso!",
                        report.imported
                    ));
                } else {
                    self.notify_error(&format!(
                        "{} fornecedores importados. {} erros encontrados.",
                        report.imported,
                        report.errors.len()
                    ));
                }
                self.load(self.current_page).await;
                Ok(report)
            }
            Err(err) => {
                self.report_failure(&err, "Erro ao importar fornecedores");
                Err(err)
            }
        }
    }

    fn check(&self, supplier: &NewSupplier) -> Result<()> {
        let errors = validate(supplier, self.description_policy);
        if errors.is_empty() {
            Ok(())
        } else {
            Err(Error::Validation(errors))
        }
    }

    /// Record and report a mutation failure. Field messages reported by
    /// the backend are joined with `"; "`; transport failures fall back to
    /// the per-operation message.
    fn report_failure(&mut self, err: &Error, fallback: &str) {
        let message = match err {
            Error::Server { field_errors, .. } if !field_errors.is_empty() => field_errors
                .iter()
                .map(|field| field.message.as_str())
                .collect::<Vec<_>>()
                .join("; "),
            Error::Server { error, .. } => error.clone(),
            _ => fallback.to_string(),
        };
        self.last_error = Some(StoreError {
            message: message.clone(),
            field_errors: err.field_errors().map(|fields| fields.to_vec()).unwrap_or_default(),
        });
        self.notify_error(&message);
    }

    fn notify_success(&self, message: &str) {
        if let Some(callback) = &self.on_success {
            callback(message);
        }
    }

    fn notify_error(&self, message: &str) {
        if let Some(callback) = &self.on_error {
            callback(message);
        }
    }
}
