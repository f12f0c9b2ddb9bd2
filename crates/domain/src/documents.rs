// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Nationalities and identity documents.
//!
//! ## National ID layout
//!
//! A national ID is 12 digits. Digits 0-5 encode the holder's birthdate as
//! `YYMMDD` and digit 6 encodes the century: 3 or 4 for the 1900s, 5 or 6
//! for the 2000s. When the encoding yields a real calendar date under a
//! known century it must agree with the document's birthdate; any other
//! encoding carries no constraint.

use crate::error::DomainError;
use crate::validation::{require_text, validate_country_code};
use std::fmt;
use std::str::FromStr;
use time::{Date, Month, OffsetDateTime};

/// Default look-ahead, in days, for "expiring soon".
pub const EXPIRY_WARNING_DAYS: i64 = 30;

/// Longest look-ahead, in days, a caller may ask for.
pub const MAX_EXPIRY_WARNING_DAYS: i64 = 36_500;

/// A country a document can be issued by.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Nationality {
    pub id: Option<i64>,
    pub name: String,
    pub code: Option<String>,
}

impl Nationality {
    /// # Errors
    ///
    /// Returns an error if the name is blank or the code is malformed.
    pub fn validate(&self) -> Result<(), DomainError> {
        require_text("name", &self.name)?;
        if let Some(code) = &self.code {
            validate_country_code(code)?;
        }
        Ok(())
    }
}

/// Kind of identity document.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum DocumentType {
    Passport,
    IdCard,
}

impl DocumentType {
    pub const ALL: [Self; 2] = [Self::Passport, Self::IdCard];

    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Passport => "passport",
            Self::IdCard => "id_card",
        }
    }
}

impl FromStr for DocumentType {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "passport" => Ok(Self::Passport),
            "id_card" => Ok(Self::IdCard),
            _ => Err(DomainError::InvalidChoice {
                field: "document_type",
                value: s.to_string(),
            }),
        }
    }
}

/// A validated 12-digit national identification number.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct NationalId(String);

impl NationalId {
    /// Validates the 12-digit shape.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::InvalidNationalId` for any other shape.
    pub fn parse(value: &str) -> Result<Self, DomainError> {
        if value.len() == 12 && value.bytes().all(|b| b.is_ascii_digit()) {
            Ok(Self(value.to_string()))
        } else {
            Err(DomainError::InvalidNationalId(value.to_string()))
        }
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Decodes the birthdate, or `None` when the encoding is not a valid
    /// date under a known century digit.
    #[must_use]
    pub fn encoded_birthdate(&self) -> Option<Date> {
        let digit = |i: usize| -> Option<u8> {
            self.0.as_bytes().get(i).map(|b| b.saturating_sub(b'0'))
        };
        let pair = |i: usize| -> Option<u8> { Some(digit(i)? * 10 + digit(i + 1)?) };

        let yy: i32 = i32::from(pair(0)?);
        let month: Month = Month::try_from(pair(2)?).ok()?;
        let day: u8 = pair(4)?;
        let century: i32 = match digit(6)? {
            3 | 4 => 1900,
            5 | 6 => 2000,
            _ => return None,
        };
        Date::from_calendar_date(century + yy, month, day).ok()
    }
}

impl fmt::Display for NationalId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// An identity document on file for a guest.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Document {
    pub id: Option<i64>,
    pub nationality_id: i64,
    pub national_id: NationalId,
    pub first_name: String,
    pub last_name: String,
    pub middle_name: Option<String>,
    pub date_of_birth: Option<Date>,
    pub document_type: DocumentType,
    pub number: String,
    /// Stored scan location, if one was uploaded.
    pub scan_path: Option<String>,
    /// External scan link.
    pub scan_url: Option<String>,
    pub issued_by: Option<String>,
    pub issued_date: Option<Date>,
    pub expiry_date: Option<Date>,
    pub notes: Option<String>,
    pub uploaded_at: OffsetDateTime,
    pub updated_at: OffsetDateTime,
}

impl Document {
    /// Runs the write-time field and cross-field checks.
    ///
    /// # Errors
    ///
    /// Returns the first failing rule: blank names or number, expiry not
    /// after issue, issue not after birth, or a national ID that encodes
    /// a different birthdate.
    pub fn validate(&self) -> Result<(), DomainError> {
        require_text("first_name", &self.first_name)?;
        require_text("last_name", &self.last_name)?;
        require_text("number", &self.number)?;

        if let (Some(issued), Some(expiry)) = (self.issued_date, self.expiry_date)
            && issued >= expiry
        {
            return Err(DomainError::ExpiryNotAfterIssue { issued, expiry });
        }

        if let (Some(birth), Some(issued)) = (self.date_of_birth, self.issued_date)
            && birth >= issued
        {
            return Err(DomainError::IssueNotAfterBirth { birth, issued });
        }

        if let (Some(supplied), Some(encoded)) =
            (self.date_of_birth, self.national_id.encoded_birthdate())
            && supplied != encoded
        {
            return Err(DomainError::NationalIdBirthdateMismatch { encoded, supplied });
        }

        Ok(())
    }

    /// "last first [middle]".
    #[must_use]
    pub fn full_name(&self) -> String {
        full_name(&self.last_name, &self.first_name, self.middle_name.as_deref())
    }

    #[must_use]
    pub fn expiry(&self, today: Date) -> ExpiryStatus {
        ExpiryStatus::evaluate(self.expiry_date, today)
    }

    #[must_use]
    pub const fn has_scan(&self) -> bool {
        self.scan_path.is_some() || self.scan_url.is_some()
    }

    /// Checks the document for problems a desk clerk should act on.
    #[must_use]
    pub fn verify(&self, today: Date, warning_days: i64) -> DocumentVerification {
        let status = self.expiry(today);
        let mut warnings: Vec<String> = Vec::new();

        if status.is_expired {
            warnings.push(String::from("Document has expired"));
        } else if let Some(days) = status.days_until_expiry
            && days > 0
            && days <= warning_days
        {
            warnings.push(format!("Document expires in {days} days"));
        }
        if !self.has_scan() {
            warnings.push(String::from("No document scan on file"));
        }
        if self.issued_date.is_none() {
            warnings.push(String::from("Issue date is not recorded"));
        }
        if self.expiry_date.is_none() {
            warnings.push(String::from("Expiry date is not recorded"));
        }

        DocumentVerification {
            is_valid: !status.is_expired && warnings.is_empty(),
            status,
            warnings,
        }
    }
}

/// Joins name parts as "last first [middle]".
#[must_use]
pub fn full_name(last: &str, first: &str, middle: Option<&str>) -> String {
    match middle.filter(|m| !m.is_empty()) {
        Some(middle) => format!("{last} {first} {middle}"),
        None => format!("{last} {first}"),
    }
}

/// Expiry status of a document relative to a given day.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ExpiryStatus {
    pub is_expired: bool,
    pub days_until_expiry: Option<i64>,
    pub is_expiring_soon: bool,
}

impl ExpiryStatus {
    #[must_use]
    pub fn evaluate(expiry_date: Option<Date>, today: Date) -> Self {
        let days_until_expiry: Option<i64> = expiry_date.map(|e| (e - today).whole_days());
        Self {
            is_expired: expiry_date.is_some_and(|e| e < today),
            days_until_expiry,
            is_expiring_soon: days_until_expiry
                .is_some_and(|d| d > 0 && d <= EXPIRY_WARNING_DAYS),
        }
    }
}

/// Outcome of [`Document::verify`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DocumentVerification {
    pub is_valid: bool,
    pub status: ExpiryStatus,
    pub warnings: Vec<String>,
}

/// Counts over the whole document register.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DocumentStatistics {
    pub total: u64,
    pub by_type: Vec<(DocumentType, u64)>,
    pub expired: u64,
    pub expiring_soon: u64,
    pub valid: u64,
}

/// Tallies document statistics from `(type, expiry)` pairs.
#[must_use]
pub fn document_statistics<I>(documents: I, today: Date) -> DocumentStatistics
where
    I: IntoIterator<Item = (DocumentType, Option<Date>)>,
{
    let mut stats = DocumentStatistics {
        by_type: DocumentType::ALL.iter().map(|t| (*t, 0)).collect(),
        ..DocumentStatistics::default()
    };
    for (document_type, expiry) in documents {
        stats.total += 1;
        if let Some(entry) = stats.by_type.iter_mut().find(|(t, _)| *t == document_type) {
            entry.1 += 1;
        }
        let status = ExpiryStatus::evaluate(expiry, today);
        if status.is_expired {
            stats.expired += 1;
        } else {
            stats.valid += 1;
        }
        if status.is_expiring_soon {
            stats.expiring_soon += 1;
        }
    }
    stats
}
