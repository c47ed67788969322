//! Strongly-typed ID wrappers for all entity types
//!
//! Records arrive from the document store with opaque string keys, so the
//! wrappers hold strings rather than parsed UUIDs. IDs minted locally are
//! random v4 UUIDs.

use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

/// Macro to generate ID newtype wrappers
macro_rules! define_id {
    ($name:ident) => {
        #[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
        #[serde(transparent)]
        pub struct $name(String);

        impl $name {
            /// Create a new random ID
            pub fn new() -> Self {
                Self(Uuid::new_v4().to_string())
            }

            /// Wrap an existing document key
            pub fn from_key(key: impl Into<String>) -> Self {
                Self(key.into())
            }

            /// Get the underlying key
            pub fn as_str(&self) -> &str {
                &self.0
            }

            /// Check whether the key is empty or whitespace
            pub fn is_blank(&self) -> bool {
                self.0.trim().is_empty()
            }
        }

        impl Default for $name {
            fn default() -> Self {
                Self::new()
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(&self.0)
            }
        }

        impl From<&str> for $name {
            fn from(key: &str) -> Self {
                Self(key.to_string())
            }
        }
    };
}

define_id!(TransactionId);
define_id!(BudgetCategoryId);
define_id!(GoalId);
define_id!(HabitId);
define_id!(RecurringId);
