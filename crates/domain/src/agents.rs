// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::error::DomainError;
use crate::validation::{require_text, validate_phone};
use time::OffsetDateTime;

/// A corporate counterparty that books rooms or pays on a guest's behalf.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Agent {
    pub id: Option<i64>,
    /// Full legal name, unique.
    pub full_title: String,
    /// Short trading name, unique.
    pub short_title: String,
    pub tax_id: Option<String>,
    pub address: Option<String>,
    pub bank_account: Option<String>,
    pub bank_code: Option<String>,
    pub phone: Option<String>,
    pub is_active: bool,
    pub created_at: OffsetDateTime,
    pub updated_at: OffsetDateTime,
}

impl Agent {
    /// # Errors
    ///
    /// Returns an error if either title is blank or the phone is malformed.
    pub fn validate(&self) -> Result<(), DomainError> {
        require_text("full_title", &self.full_title)?;
        require_text("short_title", &self.short_title)?;
        if let Some(phone) = &self.phone {
            validate_phone(phone)?;
        }
        Ok(())
    }
}
