//! REST API test harness.

use std::sync::Arc;
use std::time::Duration;

use axum::http::{HeaderName, HeaderValue};
use axum_test::{TestRequest, TestServer};
use quire_persistence::backends::sqlite::SqliteBackend;
use quire_persistence::core::{ArticleStore, MembershipStore, TenantPolicyStore};
use quire_persistence::tenant::TenantId;
use quire_persistence::types::{ArticleRecord, MembershipRecord, TenantProtectionPolicy};
use serde_json::Value;

use quire_rest::{ServerConfig, create_app_with_shared};

const X_TENANT_ID: HeaderName = HeaderName::from_static("x-tenant-id");
const X_USER_ID: HeaderName = HeaderName::from_static("x-user-id");
const X_USER_TENANT: HeaderName = HeaderName::from_static("x-user-tenant");
const X_USER_ROLES: HeaderName = HeaderName::from_static("x-user-roles");

/// Who a request is made as.
#[derive(Debug, Clone, Default)]
pub struct As {
    pub tenant: Option<&'static str>,
    pub user: Option<&'static str>,
    pub home: Option<&'static str>,
    pub roles: Option<&'static str>,
}

impl As {
    pub fn anonymous(tenant: &'static str) -> Self {
        Self {
            tenant: Some(tenant),
            ..Default::default()
        }
    }

    pub fn user(tenant: &'static str, user: &'static str) -> Self {
        Self {
            tenant: Some(tenant),
            user: Some(user),
            ..Default::default()
        }
    }

    /// An admin reading their own tenant.
    pub fn admin(tenant: &'static str, user: &'static str) -> Self {
        Self::admin_of(tenant, tenant, user)
    }

    /// An admin of `home` reading `tenant`.
    pub fn admin_of(home: &'static str, tenant: &'static str, user: &'static str) -> Self {
        Self {
            tenant: Some(tenant),
            user: Some(user),
            home: Some(home),
            roles: Some("editor,admin"),
        }
    }

    fn apply(&self, mut request: TestRequest) -> TestRequest {
        if let Some(tenant) = self.tenant {
            request = request.add_header(X_TENANT_ID, HeaderValue::from_static(tenant));
        }
        if let Some(user) = self.user {
            request = request.add_header(X_USER_ID, HeaderValue::from_static(user));
        }
        if let Some(home) = self.home {
            request = request.add_header(X_USER_TENANT, HeaderValue::from_static(home));
        }
        if let Some(roles) = self.roles {
            request = request.add_header(X_USER_ROLES, HeaderValue::from_static(roles));
        }
        request
    }
}

/// Test harness for REST API testing.
///
/// # Example
///
/// ```rust,ignore
/// #[tokio::test]
/// async fn test_read() {
///     let harness = TestHarness::new().await;
///     harness.seed_article(fixtures::published("acme", "a-1")).await;
///
///     let response = harness.get("/articles/a-1", As::anonymous("acme")).await;
///     response.assert_status_ok();
/// }
/// ```
pub struct TestHarness {
    /// The test server instance.
    pub server: TestServer,

    /// The storage backend.
    pub backend: Arc<SqliteBackend>,

    /// Server configuration.
    pub config: ServerConfig,
}

impl TestHarness {
    /// Creates a harness with the testing configuration.
    pub async fn new() -> Self {
        Self::with_config(ServerConfig::for_testing()).await
    }

    /// Creates a harness with a custom configuration.
    pub async fn with_config(config: ServerConfig) -> Self {
        let backend = SqliteBackend::in_memory().expect("Failed to create SQLite backend");
        backend.init_schema().expect("Failed to init schema");
        let backend = Arc::new(backend);

        let app = create_app_with_shared(Arc::clone(&backend), config.clone());
        let server = TestServer::new(app).expect("Failed to create test server");

        Self {
            server,
            backend,
            config,
        }
    }

    /// Stores an article.
    pub async fn seed_article(&self, article: ArticleRecord) {
        self.backend
            .put(&article)
            .await
            .expect("Failed to seed article");
    }

    /// Stores a tenant policy.
    pub async fn seed_policy(&self, tenant: &str, policy: TenantProtectionPolicy) {
        self.backend
            .put_policy(&TenantId::new(tenant), &policy)
            .await
            .expect("Failed to seed policy");
    }

    /// Stores a membership.
    pub async fn seed_membership(&self, membership: MembershipRecord) {
        self.backend
            .put_membership(&membership)
            .await
            .expect("Failed to seed membership");
    }

    /// Reads the stored view count of an article.
    pub async fn view_count(&self, tenant: &str, id: &str) -> u64 {
        self.backend
            .get(&TenantId::new(tenant), id)
            .await
            .expect("Failed to read article")
            .expect("Article missing")
            .view_count
    }

    /// Waits for the background view increment to reach `expected`.
    ///
    /// Returns the last observed count.
    pub async fn wait_for_view_count(&self, tenant: &str, id: &str, expected: u64) -> u64 {
        let mut count = self.view_count(tenant, id).await;
        for _ in 0..50 {
            if count >= expected {
                break;
            }
            tokio::time::sleep(Duration::from_millis(10)).await;
            count = self.view_count(tenant, id).await;
        }
        count
    }

    /// Lets spawned tasks run, then returns the view count.
    pub async fn settled_view_count(&self, tenant: &str, id: &str) -> u64 {
        for _ in 0..5 {
            tokio::task::yield_now().await;
        }
        tokio::time::sleep(Duration::from_millis(30)).await;
        self.view_count(tenant, id).await
    }

    /// Makes a GET request.
    pub async fn get(&self, path: &str, who: As) -> axum_test::TestResponse {
        who.apply(self.server.get(path)).await
    }

    /// Makes a POST request with a JSON body.
    pub async fn post(&self, path: &str, body: Value, who: As) -> axum_test::TestResponse {
        who.apply(self.server.post(path)).json(&body).await
    }
}
