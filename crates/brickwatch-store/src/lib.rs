mod store;

pub use store::CategoryStore;

use brickwatch_core::{Category, CoreError};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("category '{0}' is not tracked by this store")]
    UnknownCategory(Category),

    #[error(transparent)]
    Category(#[from] CoreError),
}
