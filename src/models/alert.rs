use std::{fmt, str::FromStr};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::schema::{self, ValidationError};

/// Trigger direction of an alert relative to its target price.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Condition {
    Above,
    Below,
}

impl Condition {
    pub const ALL: [Condition; 2] = [Condition::Above, Condition::Below];

    pub fn as_str(self) -> &'static str {
        match self {
            Condition::Above => "Above",
            Condition::Below => "Below",
        }
    }
}

impl fmt::Display for Condition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Condition {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        schema::parse_condition(s)
    }
}

/// A stored price alert. `id` and `created_at` are assigned by the store.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Alert {
    pub id: i64,
    pub commodity_id: String,
    pub mandi_id: String,
    pub target_price: i64,
    pub condition: Condition,
    pub created_at: DateTime<Utc>,
}

/// Client-supplied part of an alert.
///
/// Only obtainable through [`NewAlert::new`] or [`schema::parse_new_alert`],
/// both of which run the same rules, so a store can take one at face value.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NewAlert {
    commodity_id: String,
    mandi_id: String,
    target_price: i64,
    condition: Condition,
}

impl NewAlert {
    pub fn new(
        commodity_id: impl Into<String>,
        mandi_id: impl Into<String>,
        target_price: i64,
        condition: Condition,
    ) -> Result<Self, ValidationError> {
        let draft = NewAlert {
            commodity_id: commodity_id.into(),
            mandi_id: mandi_id.into(),
            target_price,
            condition,
        };
        schema::check(&draft)?;
        Ok(draft)
    }

    pub fn commodity_id(&self) -> &str {
        &self.commodity_id
    }

    pub fn mandi_id(&self) -> &str {
        &self.mandi_id
    }

    pub fn target_price(&self) -> i64 {
        self.target_price
    }

    pub fn condition(&self) -> Condition {
        self.condition
    }

    pub fn into_alert(self, id: i64, created_at: DateTime<Utc>) -> Alert {
        Alert {
            id,
            commodity_id: self.commodity_id,
            mandi_id: self.mandi_id,
            target_price: self.target_price,
            condition: self.condition,
            created_at,
        }
    }
}
