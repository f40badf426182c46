//! Pre-submission validation of supplier records
//!
//! Mirrors the backend's field rules so a form can surface errors without
//! a round trip. Messages are the exact strings displayed in the admin UI.

use std::collections::BTreeMap;

use crate::cnpj;
use crate::config::{MAX_DESCRIPTION_LENGTH, MAX_EMAIL_LENGTH, MAX_NAME_LENGTH};
use crate::model::NewSupplier;

/// Mapping from field name to a single human-readable message; an empty
/// mapping means the record is valid. First failing rule per field wins.
pub type ValidationErrors = BTreeMap<String, String>;

/// Whether the description field is required.
///
/// The two revisions of the supplier form disagree on this, so it is a
/// policy rather than a hardcoded rule.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DescriptionPolicy {
    #[default]
    Optional,
    Required,
}

/// Validate a candidate supplier record.
///
/// All fields are checked independently; a failure in one never hides a
/// failure in another.
pub fn validate(supplier: &NewSupplier, policy: DescriptionPolicy) -> ValidationErrors {
    let mut errors = ValidationErrors::new();

    let name = supplier.name.trim();
    if name.is_empty() {
        errors.insert("name".into(), "Nome é obrigatório".into());
    } else if name.chars().count() > MAX_NAME_LENGTH {
        errors.insert(
            "name".into(),
            format!("Nome deve ter no máximo {MAX_NAME_LENGTH} caracteres"),
        );
    }

    let email = supplier.email.trim();
    if email.is_empty() {
        errors.insert("email".into(), "Email é obrigatório".into());
    } else if !is_valid_email(email) {
        errors.insert("email".into(), "Email deve ter um formato válido".into());
    } else if email.chars().count() > MAX_EMAIL_LENGTH {
        errors.insert(
            "email".into(),
            format!("Email deve ter no máximo {MAX_EMAIL_LENGTH} caracteres"),
        );
    }

    let tax_id = supplier.cnpj.trim();
    if tax_id.is_empty() {
        errors.insert("cnpj".into(), "CNPJ é obrigatório".into());
    } else if !cnpj::is_valid(tax_id) {
        errors.insert("cnpj".into(), "CNPJ deve ter um formato válido".into());
    }

    let description = supplier.description.trim();
    if policy == DescriptionPolicy::Required && description.is_empty() {
        errors.insert("description".into(), "Descrição é obrigatória".into());
    } else if description.chars().count() > MAX_DESCRIPTION_LENGTH {
        errors.insert(
            "description".into(),
            format!("Descrição deve ter no máximo {MAX_DESCRIPTION_LENGTH} caracteres"),
        );
    }

    errors
}

/// `local@domain.tld` shape: no whitespace, exactly one `@`, and a dot in
/// the domain with something on both sides. Not an RFC 5322 parser.
fn is_valid_email(email: &str) -> bool {
    fn plain(part: &str) -> bool {
        !part.is_empty() && !part.chars().any(|c| c.is_whitespace() || c == '@')
    }

    match email.split_once('@') {
        Some((local, domain)) => match domain.rsplit_once('.') {
            Some((host, tld)) => plain(local) && plain(host) && plain(tld),
            None => false,
        },
        None => false,
    }
}
