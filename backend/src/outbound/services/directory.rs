//! Repository-backed implementations of the directory query ports.

use std::sync::Arc;

use async_trait::async_trait;

use crate::domain::error::DomainError;
use crate::domain::package::{AdminPackage, Package, PackageId};
use crate::domain::ports::{
    AdminDirectoryQuery, DirectoryQuery, PackageRepository, TrackingRepository, UserRepository,
};
use crate::domain::tracking::Checkpoint;
use crate::domain::user::{UserId, UserSummary};

use super::map_persistence_error;

/// Client-facing queries: membership-filtered listings and history reads.
#[derive(Clone)]
pub struct PackageDirectory {
    packages: Arc<dyn PackageRepository>,
    tracking: Arc<dyn TrackingRepository>,
}

impl PackageDirectory {
    /// Create the service from its ports.
    pub fn new(
        packages: Arc<dyn PackageRepository>,
        tracking: Arc<dyn TrackingRepository>,
    ) -> Self {
        Self { packages, tracking }
    }
}

#[async_trait]
impl DirectoryQuery for PackageDirectory {
    async fn list_packages(&self, user: UserId) -> Result<Vec<Package>, DomainError> {
        self.packages
            .list_for_user(user)
            .await
            .map_err(map_persistence_error)
    }

    async fn search_packages(
        &self,
        user: UserId,
        term: &str,
    ) -> Result<Vec<Package>, DomainError> {
        // A blank term is the plain listing; routing it there makes the
        // "empty search equals list" property structural.
        if term.trim().is_empty() {
            return self.list_packages(user).await;
        }
        self.packages
            .search_for_user(user, term)
            .await
            .map_err(map_persistence_error)
    }

    async fn check_status(&self, package: PackageId) -> Result<Vec<Checkpoint>, DomainError> {
        self.tracking
            .history(package)
            .await
            .map_err(map_persistence_error)
    }
}

/// Admin-facing unfiltered listings.
#[derive(Clone)]
pub struct AdminDirectory {
    users: Arc<dyn UserRepository>,
    packages: Arc<dyn PackageRepository>,
}

impl AdminDirectory {
    /// Create the service from its ports.
    pub fn new(users: Arc<dyn UserRepository>, packages: Arc<dyn PackageRepository>) -> Self {
        Self { users, packages }
    }
}

#[async_trait]
impl AdminDirectoryQuery for AdminDirectory {
    async fn list_all_users(&self) -> Result<Vec<UserSummary>, DomainError> {
        self.users
            .list_all()
            .await
            .map_err(map_persistence_error)
    }

    async fn list_all_packages(&self) -> Result<Vec<AdminPackage>, DomainError> {
        self.packages
            .list_all_joined()
            .await
            .map_err(map_persistence_error)
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Mutex;

    use chrono::{TimeZone, Utc};
    use rstest::rstest;

    use super::*;
    use crate::domain::ErrorCode;
    use crate::domain::package::NewPackage;
    use crate::domain::ports::{
        AppendOutcome, PackageInsertError, PersistenceError, RegisterOutcome, UserInsertError,
    };
    use crate::domain::tracking::CheckpointRequest;
    use crate::domain::user::{NewUser, UserCredentials};

    fn user(id: i32) -> UserId {
        UserId::new(id).expect("positive id")
    }

    fn package_id(id: i32) -> PackageId {
        PackageId::new(id).expect("positive id")
    }

    fn package(id: i32, owner: i32, name: &str) -> Package {
        Package {
            id: package_id(id),
            sender_id: user(owner),
            receiver_id: user(owner),
            name: name.to_owned(),
            description: None,
            sender_city: "Lisbon".to_owned(),
            destination_city: "Porto".to_owned(),
            is_tracked: false,
            created_at: Utc.timestamp_opt(1_700_000_000, 0).single().expect("time"),
        }
    }

    /// Package repository stub recording which method was hit.
    #[derive(Default)]
    struct StubPackages {
        listed: Mutex<Vec<UserId>>,
        searched: Mutex<Vec<(UserId, String)>>,
        rows: Vec<Package>,
        failure: Option<PersistenceError>,
    }

    #[async_trait]
    impl PackageRepository for StubPackages {
        async fn list_for_user(&self, user: UserId) -> Result<Vec<Package>, PersistenceError> {
            if let Some(failure) = self.failure.clone() {
                return Err(failure);
            }
            self.listed.lock().expect("lock").push(user);
            Ok(self.rows.clone())
        }

        async fn search_for_user(
            &self,
            user: UserId,
            term: &str,
        ) -> Result<Vec<Package>, PersistenceError> {
            self.searched
                .lock()
                .expect("lock")
                .push((user, term.to_owned()));
            Ok(self.rows.clone())
        }

        async fn insert(&self, _package: &NewPackage) -> Result<PackageId, PackageInsertError> {
            unimplemented!("not exercised by directory tests")
        }

        async fn delete(&self, _package: PackageId) -> Result<bool, PersistenceError> {
            unimplemented!("not exercised by directory tests")
        }

        async fn list_all_joined(&self) -> Result<Vec<AdminPackage>, PersistenceError> {
            if let Some(failure) = self.failure.clone() {
                return Err(failure);
            }
            Ok(Vec::new())
        }
    }

    #[derive(Default)]
    struct StubTracking {
        history_rows: Vec<Checkpoint>,
    }

    #[async_trait]
    impl TrackingRepository for StubTracking {
        async fn register(
            &self,
            _request: &CheckpointRequest,
        ) -> Result<RegisterOutcome, PersistenceError> {
            unimplemented!("not exercised by directory tests")
        }

        async fn append(
            &self,
            _request: &CheckpointRequest,
        ) -> Result<AppendOutcome, PersistenceError> {
            unimplemented!("not exercised by directory tests")
        }

        async fn history(
            &self,
            _package: PackageId,
        ) -> Result<Vec<Checkpoint>, PersistenceError> {
            Ok(self.history_rows.clone())
        }
    }

    #[derive(Default)]
    struct StubUsers {
        summaries: Vec<UserSummary>,
        failure: Option<PersistenceError>,
    }

    #[async_trait]
    impl UserRepository for StubUsers {
        async fn find_by_username(
            &self,
            _username: &str,
        ) -> Result<Option<UserCredentials>, PersistenceError> {
            unimplemented!("not exercised by directory tests")
        }

        async fn insert(&self, _user: &NewUser) -> Result<UserId, UserInsertError> {
            unimplemented!("not exercised by directory tests")
        }

        async fn list_all(&self) -> Result<Vec<UserSummary>, PersistenceError> {
            if let Some(failure) = self.failure.clone() {
                return Err(failure);
            }
            Ok(self.summaries.clone())
        }
    }

    #[rstest]
    #[case("")]
    #[case("   ")]
    #[tokio::test]
    async fn blank_search_terms_use_the_plain_listing(#[case] term: &str) {
        let packages = Arc::new(StubPackages {
            rows: vec![package(1, 3, "Box A")],
            ..StubPackages::default()
        });
        let directory = PackageDirectory::new(packages.clone(), Arc::new(StubTracking::default()));

        let listed = directory.list_packages(user(3)).await.expect("list");
        let searched = directory
            .search_packages(user(3), term)
            .await
            .expect("search");

        assert_eq!(listed, searched);
        assert_eq!(packages.listed.lock().expect("lock").len(), 2);
        assert!(packages.searched.lock().expect("lock").is_empty());
    }

    #[tokio::test]
    async fn non_blank_terms_reach_the_search_path() {
        let packages = Arc::new(StubPackages::default());
        let directory = PackageDirectory::new(packages.clone(), Arc::new(StubTracking::default()));

        directory
            .search_packages(user(3), "box")
            .await
            .expect("search");

        let searched = packages.searched.lock().expect("lock");
        assert_eq!(searched.as_slice(), &[(user(3), "box".to_owned())]);
    }

    #[tokio::test]
    async fn check_status_returns_history_in_repository_order() {
        let history = vec![
            Checkpoint {
                city: "Lisbon".to_owned(),
                recorded_at: Utc.timestamp_opt(1, 0).single().expect("time"),
            },
            Checkpoint {
                city: "Coimbra".to_owned(),
                recorded_at: Utc.timestamp_opt(2, 0).single().expect("time"),
            },
        ];
        let directory = PackageDirectory::new(
            Arc::new(StubPackages::default()),
            Arc::new(StubTracking {
                history_rows: history.clone(),
            }),
        );

        let result = directory.check_status(package_id(9)).await.expect("status");
        assert_eq!(result, history);
    }

    #[rstest]
    #[case(PersistenceError::connection("down"), ErrorCode::ServiceUnavailable)]
    #[case(PersistenceError::query("broken"), ErrorCode::InternalError)]
    #[tokio::test]
    async fn listing_failures_map_to_server_faults(
        #[case] failure: PersistenceError,
        #[case] expected: ErrorCode,
    ) {
        let directory = PackageDirectory::new(
            Arc::new(StubPackages {
                failure: Some(failure),
                ..StubPackages::default()
            }),
            Arc::new(StubTracking::default()),
        );

        let err = directory
            .list_packages(user(3))
            .await
            .expect_err("failure must surface");
        assert_eq!(err.code(), expected);
    }

    #[tokio::test]
    async fn admin_listing_passes_through_summaries() {
        let summaries = vec![UserSummary {
            id: user(1),
            username: "ada".to_owned(),
        }];
        let admin = AdminDirectory::new(
            Arc::new(StubUsers {
                summaries: summaries.clone(),
                failure: None,
            }),
            Arc::new(StubPackages::default()),
        );

        let result = admin.list_all_users().await.expect("list users");
        assert_eq!(result, summaries);
    }

    #[tokio::test]
    async fn admin_listing_maps_backend_failures() {
        let admin = AdminDirectory::new(
            Arc::new(StubUsers {
                summaries: Vec::new(),
                failure: Some(PersistenceError::connection("down")),
            }),
            Arc::new(StubPackages::default()),
        );

        let err = admin
            .list_all_users()
            .await
            .expect_err("failure must surface");
        assert_eq!(err.code(), ErrorCode::ServiceUnavailable);
    }
}
