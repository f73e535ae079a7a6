//! Synthetic row ids

use chrono::Utc;
use serde::Deserialize;
use serde::Serialize;
use uuid::Uuid;

use crate::model::RowId;

/// How the store stamps ids for rows it creates.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum IdStrategy {
    /// Epoch milliseconds, bumped so every stamp is strictly greater than the last.
    #[default]
    Timestamp,
    /// A random v4 UUID per stamp.
    Random,
}

/// Generates `new_<stamp>` and `imported_<stamp>_<index>` row ids.
///
/// With [`IdStrategy::Timestamp`] the stamp is the current epoch time in
/// milliseconds, but never less than one past the previous stamp, so rapid
/// successive adds and imports within the same millisecond stay distinct.
#[derive(Debug, Clone)]
pub struct IdGenerator {
    strategy: IdStrategy,
    last_millis: i64,
}

impl IdGenerator {
    pub fn new(strategy: IdStrategy) -> Self {
        Self {
            strategy,
            last_millis: 0,
        }
    }

    pub fn strategy(&self) -> IdStrategy {
        self.strategy
    }

    /// Returns the next stamp.
    pub fn next_stamp(&mut self) -> String {
        match self.strategy {
            IdStrategy::Timestamp => {
                let now = Utc::now().timestamp_millis();
                let stamp = now.max(self.last_millis.saturating_add(1));
                self.last_millis = stamp;
                stamp.to_string()
            }
            IdStrategy::Random => Uuid::new_v4().simple().to_string(),
        }
    }

    /// Id for a row created through the row-add interface.
    pub fn new_row_id(&mut self) -> RowId {
        RowId::new(format!("new_{}", self.next_stamp()))
    }

    /// Stamp shared by every row of one import.
    pub fn import_stamp(&mut self) -> String {
        self.next_stamp()
    }
}

impl Default for IdGenerator {
    fn default() -> Self {
        Self::new(IdStrategy::default())
    }
}

/// Id of the `index`th row of the import stamped `stamp`.
pub fn imported_row_id(stamp: &str, index: usize) -> RowId {
    RowId::new(format!("imported_{}_{}", stamp, index))
}
