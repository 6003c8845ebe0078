//! Explicit field patches for sparse-merge updates.
//!
//! Update payloads need three states per optional column: leave the stored
//! value alone, clear it, or replace it. A plain `Option` collapses the first
//! two, which is how the coalesce-style update it replaces made clearing a
//! field impossible. `Patch` keeps them distinct:
//!
//! - field absent from the JSON body → [`Patch::Keep`]
//! - field present as `null`         → [`Patch::Clear`]
//! - field present with a value      → [`Patch::Set`]
//!
//! Fields must be declared `#[serde(default)]` so absence maps to `Keep`.

use serde::{Deserialize, Deserializer};

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum Patch<T> {
    #[default]
    Keep,
    Clear,
    Set(T),
}

impl<T> Patch<T> {
    /// True when the update should write this column.
    pub fn is_write(&self) -> bool {
        !matches!(self, Patch::Keep)
    }

    /// The value to bind when writing: `Set` binds the value, `Clear` binds
    /// NULL, `Keep` binds a placeholder that the SQL never reads.
    pub fn to_write(&self) -> Option<&T> {
        match self {
            Patch::Set(v) => Some(v),
            _ => None,
        }
    }

    /// Owned variant of [`Patch::to_write`], for query binding.
    pub fn write_value(&self) -> Option<T>
    where
        T: Clone,
    {
        self.to_write().cloned()
    }
}

impl<'de, T> Deserialize<'de> for Patch<T>
where
    T: Deserialize<'de>,
{
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        Ok(match Option::<T>::deserialize(deserializer)? {
            Some(v) => Patch::Set(v),
            None => Patch::Clear,
        })
    }
}
