// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Room types, rooms and room conditions.

use crate::error::DomainError;
use crate::money::Money;
use crate::relevance::ValidityWindow;
use crate::validation::{require_positive, require_text, validate_color};
use time::{Date, OffsetDateTime};

/// Color shown for a room condition when none is given.
pub const DEFAULT_CONDITION_COLOR: &str = "#808080";

/// A priced category of room, offered during its validity window.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RoomType {
    pub id: Option<i64>,
    pub title: String,
    /// Nightly rate.
    pub price: Money,
    pub window: ValidityWindow,
    pub description: Option<String>,
    pub is_active: bool,
    pub created_at: OffsetDateTime,
    pub updated_at: OffsetDateTime,
}

impl RoomType {
    /// # Errors
    ///
    /// Returns an error if the title is blank or the price is not positive.
    pub fn validate(&self) -> Result<(), DomainError> {
        require_text("title", &self.title)?;
        require_positive("price", self.price)
    }

    /// Active and inside its validity window on `today`.
    #[must_use]
    pub fn is_relevant(&self, today: Date) -> bool {
        self.is_active && self.window.is_relevant(today)
    }
}

/// A physical room.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Room {
    pub id: Option<i64>,
    pub number: i64,
    pub floor: Option<i64>,
    /// Applicable room types, ordered by id.
    pub room_type_ids: Vec<i64>,
    pub is_active: bool,
}

impl Room {
    /// # Errors
    ///
    /// Returns an error if the room number is not positive.
    pub fn validate(&self) -> Result<(), DomainError> {
        if self.number <= 0 {
            return Err(DomainError::NonPositiveNumber {
                field: "number",
                value: self.number,
            });
        }
        Ok(())
    }
}

/// Housekeeping state a room can be in.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RoomCondition {
    pub id: Option<i64>,
    pub label: String,
    pub color: String,
    pub is_available: bool,
}

impl RoomCondition {
    /// # Errors
    ///
    /// Returns an error if the label is blank or the color is malformed.
    pub fn validate(&self) -> Result<(), DomainError> {
        require_text("label", &self.label)?;
        validate_color(&self.color)
    }
}
