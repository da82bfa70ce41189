//! Repository-backed implementation of the `PackageCommand` port.

use std::sync::Arc;

use async_trait::async_trait;

use crate::domain::error::DomainError;
use crate::domain::package::{NewPackage, PackageId};
use crate::domain::ports::{PackageCommand, PackageInsertError, PackageRepository};

use super::map_persistence_error;

/// Package create/remove operations for the admin surface.
#[derive(Clone)]
pub struct PackageAdminService {
    packages: Arc<dyn PackageRepository>,
}

impl PackageAdminService {
    /// Create the service from its port.
    pub fn new(packages: Arc<dyn PackageRepository>) -> Self {
        Self { packages }
    }
}

#[async_trait]
impl PackageCommand for PackageAdminService {
    async fn add_package(&self, request: &NewPackage) -> Result<PackageId, DomainError> {
        match self.packages.insert(request).await {
            Ok(id) => Ok(id),
            Err(PackageInsertError::UnknownUser) => Err(DomainError::invalid_request(
                "sender or receiver does not exist",
            )),
            Err(PackageInsertError::Backend(err)) => Err(map_persistence_error(err)),
        }
    }

    async fn remove_package(&self, package: PackageId) -> Result<(), DomainError> {
        let deleted = self
            .packages
            .delete(package)
            .await
            .map_err(map_persistence_error)?;

        if deleted {
            Ok(())
        } else {
            Err(DomainError::not_found(format!(
                "package {package} not found"
            )))
        }
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Mutex;

    use rstest::rstest;

    use super::*;
    use crate::domain::ErrorCode;
    use crate::domain::package::{AdminPackage, Package};
    use crate::domain::ports::PersistenceError;
    use crate::domain::user::UserId;

    fn request() -> NewPackage {
        NewPackage::new(
            UserId::new(1).expect("id"),
            UserId::new(2).expect("id"),
            "Box A",
            None,
            "Lisbon",
            "Porto",
        )
        .expect("valid request")
    }

    /// Stub with a one-shot delete: the first call removes the row, the
    /// second finds nothing, mirroring the double-remove scenario.
    struct StubPackages {
        present: Mutex<bool>,
        insert_result: Option<Result<i32, PackageInsertError>>,
        delete_failure: Option<PersistenceError>,
    }

    impl StubPackages {
        fn with_row() -> Self {
            Self {
                present: Mutex::new(true),
                insert_result: None,
                delete_failure: None,
            }
        }
    }

    #[async_trait]
    impl PackageRepository for StubPackages {
        async fn list_for_user(&self, _user: UserId) -> Result<Vec<Package>, PersistenceError> {
            unimplemented!("not exercised by admin tests")
        }

        async fn search_for_user(
            &self,
            _user: UserId,
            _term: &str,
        ) -> Result<Vec<Package>, PersistenceError> {
            unimplemented!("not exercised by admin tests")
        }

        async fn insert(&self, _package: &NewPackage) -> Result<PackageId, PackageInsertError> {
            match self.insert_result.clone() {
                Some(Ok(id)) => PackageId::new(id)
                    .map_err(|_| PackageInsertError::Backend(PersistenceError::query("id"))),
                Some(Err(err)) => Err(err),
                None => unimplemented!("insert result not configured"),
            }
        }

        async fn delete(&self, _package: PackageId) -> Result<bool, PersistenceError> {
            if let Some(failure) = self.delete_failure.clone() {
                return Err(failure);
            }
            let mut present = self.present.lock().expect("lock");
            let deleted = *present;
            *present = false;
            Ok(deleted)
        }

        async fn list_all_joined(&self) -> Result<Vec<AdminPackage>, PersistenceError> {
            unimplemented!("not exercised by admin tests")
        }
    }

    #[tokio::test]
    async fn add_package_returns_the_assigned_id() {
        let service = PackageAdminService::new(Arc::new(StubPackages {
            present: Mutex::new(false),
            insert_result: Some(Ok(41)),
            delete_failure: None,
        }));

        let id = service.add_package(&request()).await.expect("insert");
        assert_eq!(id.get(), 41);
    }

    #[tokio::test]
    async fn add_package_flags_unknown_users_as_client_fault() {
        let service = PackageAdminService::new(Arc::new(StubPackages {
            present: Mutex::new(false),
            insert_result: Some(Err(PackageInsertError::UnknownUser)),
            delete_failure: None,
        }));

        let err = service
            .add_package(&request())
            .await
            .expect_err("unknown user must fail");
        assert_eq!(err.code(), ErrorCode::InvalidRequest);
    }

    #[tokio::test]
    async fn remove_package_succeeds_once_then_reports_not_found() {
        let service = PackageAdminService::new(Arc::new(StubPackages::with_row()));
        let id = PackageId::new(41).expect("id");

        service.remove_package(id).await.expect("first removal");

        let err = service
            .remove_package(id)
            .await
            .expect_err("second removal must fail");
        assert_eq!(err.code(), ErrorCode::NotFound);
    }

    #[rstest]
    #[case(PersistenceError::connection("down"), ErrorCode::ServiceUnavailable)]
    #[case(PersistenceError::query("broken"), ErrorCode::InternalError)]
    #[tokio::test]
    async fn remove_package_maps_backend_failures(
        #[case] failure: PersistenceError,
        #[case] expected: ErrorCode,
    ) {
        let service = PackageAdminService::new(Arc::new(StubPackages {
            present: Mutex::new(true),
            insert_result: None,
            delete_failure: Some(failure),
        }));

        let err = service
            .remove_package(PackageId::new(41).expect("id"))
            .await
            .expect_err("failure must surface");
        assert_eq!(err.code(), expected);
    }
}
