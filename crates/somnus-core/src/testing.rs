//! In-memory [`SampleStore`] used by the unit tests in this crate.

use std::sync::Mutex;

use thiserror::Error;

use crate::store::{NewRecord, SampleStore, StoredPayload};

#[derive(Debug, Error)]
#[error("memory store unavailable")]
pub struct Unavailable;

#[derive(Default)]
pub struct MemoryStore {
  rows:        Mutex<Vec<(i64, NewRecord)>>,
  /// When set, every call fails with [`Unavailable`].
  pub offline: bool,
}

impl MemoryStore {
  pub fn offline() -> Self { Self { offline: true, ..Self::default() } }

  pub fn len(&self) -> usize { self.rows.lock().unwrap().len() }
}

impl SampleStore for MemoryStore {
  type Error = Unavailable;

  async fn initialize(&self) -> Result<(), Unavailable> {
    if self.offline { Err(Unavailable) } else { Ok(()) }
  }

  async fn append(&self, record: NewRecord) -> Result<i64, Unavailable> {
    if self.offline {
      return Err(Unavailable);
    }
    let mut rows = self.rows.lock().unwrap();
    let id = rows.len() as i64 + 1;
    rows.push((id, record));
    Ok(id)
  }

  async fn query_by_session_and_type(
    &self,
    session_id: &str,
    data_type:  &str,
  ) -> Result<Vec<StoredPayload>, Unavailable> {
    if self.offline {
      return Err(Unavailable);
    }
    Ok(
      self
        .rows
        .lock()
        .unwrap()
        .iter()
        .filter(|(_, r)| r.session_id == session_id && r.data_type == data_type)
        .map(|(id, r)| StoredPayload { id: *id, payload: r.payload.clone() })
        .collect(),
    )
  }
}
