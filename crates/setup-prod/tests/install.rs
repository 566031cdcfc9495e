//! End-to-end installer tests against in-memory collaborators.

use async_trait::async_trait;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};
use url::Url;

use setup_prod::{InstallConfig, Installer};
use setup_prod_core::error::{Error, Result};
use setup_prod_core::source::{ArtifactTransport, ReleaseSource};
use setup_prod_core::{Platform, ToolCache};

struct FakeReleases {
    tag: &'static str,
    calls: AtomicUsize,
}

impl FakeReleases {
    fn new(tag: &'static str) -> Arc<Self> {
        Arc::new(Self {
            tag,
            calls: AtomicUsize::new(0),
        })
    }
}

#[async_trait]
impl ReleaseSource for FakeReleases {
    async fn latest_tag(&self, _owner: &str, _repo: &str) -> Result<String> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        Ok(self.tag.to_string())
    }
}

/// Transport that records every requested URL and serves fixed bytes,
/// or a not-found error when `found` is false.
struct FakeTransport {
    found: bool,
    requests: std::sync::Mutex<Vec<String>>,
}

impl FakeTransport {
    fn new(found: bool) -> Arc<Self> {
        Arc::new(Self {
            found,
            requests: std::sync::Mutex::new(Vec::new()),
        })
    }

    fn request_count(&self) -> usize {
        self.requests.lock().unwrap().len()
    }

    fn requested(&self) -> Vec<String> {
        self.requests.lock().unwrap().clone()
    }
}

#[async_trait]
impl ArtifactTransport for FakeTransport {
    async fn download(&self, url: &Url, dest_dir: &Path) -> Result<PathBuf> {
        self.requests.lock().unwrap().push(url.to_string());
        if !self.found {
            return Err(Error::download(format!("{url} returned HTTP 404")));
        }
        let dest = dest_dir.join("prod_download");
        std::fs::write(&dest, b"prod-binary").map_err(|e| Error::download(e.to_string()))?;
        Ok(dest)
    }
}

fn config(version: &str) -> InstallConfig {
    InstallConfig {
        tool: "prod".to_string(),
        owner: "sysprod".to_string(),
        base_url: "https://example.test/releases/".to_string(),
        version: version.to_string(),
        force: false,
    }
}

fn linux() -> Platform {
    Platform::from_raw("linux", "x86_64")
}

#[tokio::test]
async fn fresh_install_downloads_and_caches() {
    let cache_root = tempfile::tempdir().unwrap();
    let transport = FakeTransport::new(true);
    let installer = Installer::new(
        config("v1.2.3"),
        ToolCache::new(cache_root.path()),
        FakeReleases::new("unused"),
        transport.clone(),
    );

    let installed = installer.run(&linux()).await.unwrap();

    assert_eq!(installed.version, "v1.2.3");
    assert_eq!(
        transport.requested(),
        vec!["https://example.test/releases/v1.2.3/prod_linux_amd64".to_string()]
    );
    assert_eq!(
        installed.bin_path,
        cache_root.path().join("prod").join("v1.2.3").join("prod")
    );
    assert_eq!(installed.bin_dir, installed.bin_path.parent().unwrap());
    assert_eq!(std::fs::read(&installed.bin_path).unwrap(), b"prod-binary");
}

#[cfg(unix)]
#[tokio::test]
async fn fresh_install_marks_binary_executable() {
    use std::os::unix::fs::PermissionsExt;

    let cache_root = tempfile::tempdir().unwrap();
    let installer = Installer::new(
        config("v1.2.3"),
        ToolCache::new(cache_root.path()),
        FakeReleases::new("unused"),
        FakeTransport::new(true),
    );

    let installed = installer.run(&linux()).await.unwrap();
    let mode = std::fs::metadata(&installed.bin_path)
        .unwrap()
        .permissions()
        .mode();
    assert_eq!(mode & 0o111, 0o111);
}

#[tokio::test]
async fn second_run_hits_cache_without_download() {
    let cache_root = tempfile::tempdir().unwrap();
    let transport = FakeTransport::new(true);

    let first = Installer::new(
        config("v1.2.3"),
        ToolCache::new(cache_root.path()),
        FakeReleases::new("unused"),
        transport.clone(),
    );
    let first_path = first.run(&linux()).await.unwrap().bin_path;

    let second = Installer::new(
        config("v1.2.3"),
        ToolCache::new(cache_root.path()),
        FakeReleases::new("unused"),
        transport.clone(),
    );
    let second_path = second.run(&linux()).await.unwrap().bin_path;

    assert_eq!(first_path, second_path);
    assert_eq!(transport.request_count(), 1);
}

#[tokio::test]
async fn latest_resolves_through_release_source() {
    let cache_root = tempfile::tempdir().unwrap();
    let releases = FakeReleases::new("v9.0.0");
    let transport = FakeTransport::new(true);
    let installer = Installer::new(
        config("latest"),
        ToolCache::new(cache_root.path()),
        releases.clone(),
        transport.clone(),
    );

    let installed = installer.run(&linux()).await.unwrap();

    assert_eq!(installed.version, "v9.0.0");
    assert_eq!(releases.calls.load(Ordering::SeqCst), 1);
    // The resolved tag feeds both the URL and the cache key.
    assert!(transport.requested()[0].contains("/v9.0.0/"));
    assert!(installed.bin_path.ends_with("prod/v9.0.0/prod"));
}

#[tokio::test]
async fn explicit_version_never_queries_releases() {
    let cache_root = tempfile::tempdir().unwrap();
    let releases = FakeReleases::new("v9.0.0");
    let installer = Installer::new(
        config("v2.0.0"),
        ToolCache::new(cache_root.path()),
        releases.clone(),
        FakeTransport::new(true),
    );

    installer.run(&linux()).await.unwrap();
    assert_eq!(releases.calls.load(Ordering::SeqCst), 0);
}

#[tokio::test]
async fn windows_platform_requests_exe_asset() {
    let cache_root = tempfile::tempdir().unwrap();
    let transport = FakeTransport::new(true);
    let installer = Installer::new(
        config("v1.2.3"),
        ToolCache::new(cache_root.path()),
        FakeReleases::new("unused"),
        transport.clone(),
    );

    let installed = installer
        .run(&Platform::from_raw("win32", "x64"))
        .await
        .unwrap();

    assert_eq!(
        transport.requested(),
        vec!["https://example.test/releases/v1.2.3/prod_windows_amd64.exe".to_string()]
    );
    assert!(installed.bin_path.ends_with("prod/v1.2.3/prod.exe"));
}

#[tokio::test]
async fn failed_download_leaves_no_cache_entry() {
    let cache_root = tempfile::tempdir().unwrap();
    let cache = ToolCache::new(cache_root.path());
    let installer = Installer::new(
        config("v1.2.3"),
        cache.clone(),
        FakeReleases::new("unused"),
        FakeTransport::new(false),
    );

    let err = installer.run(&linux()).await.unwrap_err();
    assert!(matches!(err, Error::Download { .. }));
    assert!(cache.lookup("prod", "v1.2.3", "prod").is_none());
}

#[tokio::test]
async fn invalid_base_url_fails_before_download() {
    let cache_root = tempfile::tempdir().unwrap();
    let transport = FakeTransport::new(true);
    let mut cfg = config("v1.2.3");
    cfg.base_url = "not a url".to_string();
    let installer = Installer::new(
        cfg,
        ToolCache::new(cache_root.path()),
        FakeReleases::new("unused"),
        transport.clone(),
    );

    let err = installer.run(&linux()).await.unwrap_err();
    assert!(matches!(err, Error::InvalidBaseUrl { .. }));
    assert_eq!(transport.request_count(), 0);
}

#[tokio::test]
async fn force_redownloads_cached_version() {
    let cache_root = tempfile::tempdir().unwrap();
    let transport = FakeTransport::new(true);

    let installer = Installer::new(
        config("v1.2.3"),
        ToolCache::new(cache_root.path()),
        FakeReleases::new("unused"),
        transport.clone(),
    );
    installer.run(&linux()).await.unwrap();

    let mut cfg = config("v1.2.3");
    cfg.force = true;
    let forced = Installer::new(
        cfg,
        ToolCache::new(cache_root.path()),
        FakeReleases::new("unused"),
        transport.clone(),
    );
    forced.run(&linux()).await.unwrap();

    assert_eq!(transport.request_count(), 2);
}
