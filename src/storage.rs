use async_trait::async_trait;
use aws_sdk_s3 as s3;
use s3::presigning::PresigningConfig;
use std::sync::Arc;
use std::time::Duration;

/// Presigned avatar uploads expire after ten minutes.
const UPLOAD_URL_TTL: Duration = Duration::from_secs(600);

/// Content types accepted for profile photos.
pub const AVATAR_CONTENT_TYPES: [&str; 3] = ["image/jpeg", "image/png", "image/webp"];

/// StorageService
///
/// Object storage used for employee profile photos. The browser uploads
/// straight to the bucket with a presigned URL; this service never sees the bytes.
#[async_trait]
pub trait StorageService: Send + Sync {
    /// Creates the bucket when missing. Only called for the local MinIO setup.
    async fn ensure_bucket_exists(&self);

    /// Returns a presigned PUT URL for `key`, pinned to `content_type`.
    async fn presign_avatar_upload(&self, key: &str, content_type: &str)
    -> Result<String, String>;
}

/// S3StorageClient
///
/// `StorageService` over any S3-compatible endpoint (MinIO locally).
/// Path-style addressing is forced for MinIO compatibility.
#[derive(Clone)]
pub struct S3StorageClient {
    client: s3::Client,
    bucket_name: String,
}

impl S3StorageClient {
    pub async fn new(
        endpoint: &str,
        region: &str,
        access_key: &str,
        secret_key: &str,
        bucket: &str,
    ) -> Self {
        let credentials =
            s3::config::Credentials::new(access_key, secret_key, None, None, "static");

        let config = s3::Config::builder()
            .credentials_provider(credentials)
            .endpoint_url(endpoint)
            .region(s3::config::Region::new(region.to_string()))
            .behavior_version_latest()
            .force_path_style(true)
            .build();

        Self {
            client: s3::Client::from_conf(config),
            bucket_name: bucket.to_string(),
        }
    }
}

#[async_trait]
impl StorageService for S3StorageClient {
    async fn ensure_bucket_exists(&self) {
        if let Err(e) = self
            .client
            .create_bucket()
            .bucket(&self.bucket_name)
            .send()
            .await
        {
            // Already-owned buckets also land here.
            tracing::debug!("create_bucket for {}: {:?}", self.bucket_name, e);
        }
    }

    async fn presign_avatar_upload(
        &self,
        key: &str,
        content_type: &str,
    ) -> Result<String, String> {
        let presigning = PresigningConfig::expires_in(UPLOAD_URL_TTL).map_err(|e| e.to_string())?;

        let presigned = self
            .client
            .put_object()
            .bucket(&self.bucket_name)
            .key(sanitize_key(key))
            .content_type(content_type)
            .presigned(presigning)
            .await
            .map_err(|e| e.to_string())?;

        Ok(presigned.uri().to_string())
    }
}

/// Drops empty, `.` and `..` segments so a key cannot escape its prefix.
pub fn sanitize_key(key: &str) -> String {
    key.split('/')
        .filter(|segment| !segment.is_empty() && *segment != ".." && *segment != ".")
        .collect::<Vec<_>>()
        .join("/")
}

/// MockStorageService
///
/// In-memory stand-in for tests. Produces deterministic URLs or a simulated failure.
#[derive(Clone, Default)]
pub struct MockStorageService {
    pub should_fail: bool,
}

impl MockStorageService {
    pub fn new() -> Self {
        Self { should_fail: false }
    }

    pub fn new_failing() -> Self {
        Self { should_fail: true }
    }
}

#[async_trait]
impl StorageService for MockStorageService {
    async fn ensure_bucket_exists(&self) {}

    async fn presign_avatar_upload(
        &self,
        key: &str,
        _content_type: &str,
    ) -> Result<String, String> {
        if self.should_fail {
            return Err("Mock Storage Error: Simulation requested".to_string());
        }

        Ok(format!(
            "http://localhost:9000/mock-bucket/{}?signature=fake",
            sanitize_key(key)
        ))
    }
}

/// StorageState
pub type StorageState = Arc<dyn StorageService>;
