use crate::data::StudentStore;
use std::{ops::Deref, sync::Arc};

#[derive(Clone, Debug)]
pub struct StudentsState {
    store: Arc<dyn StudentStore>,
}

impl StudentsState {
    pub fn new(store: impl StudentStore + 'static) -> Self {
        Self {
            store: Arc::new(store),
        }
    }

    pub async fn sensible_shutdown(&self) {
        self.store.close().await;
    }
}

impl Deref for StudentsState {
    type Target = dyn StudentStore;

    fn deref(&self) -> &Self::Target {
        &*self.store
    }
}
