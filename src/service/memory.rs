//! In-memory service used by the dashboard tests.

use super::FileCollectionService;
use crate::error::ServiceError;
use crate::model::{CreateFilesPayload, StoredFile};
use std::cell::{Cell, RefCell};

#[derive(Debug, Default)]
pub struct InMemoryService {
    pub files: RefCell<Vec<StoredFile>>,
    pub fetch_calls: Cell<usize>,
    pub create_calls: Cell<usize>,
    pub delete_one_calls: Cell<usize>,
    pub delete_many_calls: Cell<usize>,
    pub fail_fetch: Cell<bool>,
    pub fail_mutations: Cell<bool>,
}

impl InMemoryService {
    pub fn with_files(files: Vec<StoredFile>) -> Self {
        Self {
            files: RefCell::new(files),
            ..Default::default()
        }
    }

    pub fn names(&self) -> Vec<String> {
        self.files.borrow().iter().map(|f| f.name.clone()).collect()
    }

    fn check_mutation(&self) -> Result<(), ServiceError> {
        if self.fail_mutations.get() {
            return Err(ServiceError::Io(std::io::Error::other("injected mutation failure")));
        }
        Ok(())
    }

    fn remove(&self, name: &str) -> Result<(), ServiceError> {
        let mut files = self.files.borrow_mut();
        match files.iter().position(|f| f.name == name) {
            Some(idx) => {
                files.remove(idx);
                Ok(())
            }
            None => Err(ServiceError::NotFound(name.to_string())),
        }
    }
}

impl FileCollectionService for InMemoryService {
    async fn fetch_all(&self) -> Result<Vec<StoredFile>, ServiceError> {
        self.fetch_calls.set(self.fetch_calls.get() + 1);
        if self.fail_fetch.get() {
            return Err(ServiceError::Io(std::io::Error::other("injected fetch failure")));
        }
        Ok(self.files.borrow().clone())
    }

    async fn create_many(&self, payload: &CreateFilesPayload) -> Result<(), ServiceError> {
        self.create_calls.set(self.create_calls.get() + 1);
        self.check_mutation()?;
        if payload.files.is_empty() {
            return Err(ServiceError::EmptyPayload);
        }
        let mut files = self.files.borrow_mut();
        for path in &payload.files {
            let name = path.to_string_lossy().to_string();
            files.push(crate::model::file(&name));
        }
        Ok(())
    }

    async fn delete_one(&self, file: &StoredFile) -> Result<(), ServiceError> {
        self.delete_one_calls.set(self.delete_one_calls.get() + 1);
        self.check_mutation()?;
        self.remove(&file.name)
    }

    async fn delete_many(&self, files: &[StoredFile]) -> Result<(), ServiceError> {
        self.delete_many_calls.set(self.delete_many_calls.get() + 1);
        self.check_mutation()?;
        for file in files {
            self.remove(&file.name)?;
        }
        Ok(())
    }
}
