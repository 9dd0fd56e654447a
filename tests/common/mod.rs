//! Test utilities and helper functions for the inline-resource test suite

use futures::future::BoxFuture;
use kodegen_tools_inline_resource::{
    Artifact, ArtifactKind, Bundle, FetchError, Fetcher, InlineConfig, Minifier,
    NonMatchedLevel, RemoteCache, ResourceInliner, TransformError,
};
use mockito::{Mock, Server};
use std::collections::HashMap;
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

/// Route log output through the test harness
#[allow(dead_code)]
pub fn init_logging() {
    let _ = env_logger::builder().is_test(true).try_init();
}

/// Bundle holding `index.html` with `html` followed by `outputs`, in that order
#[allow(dead_code)]
pub fn bundle_with(html: &str, outputs: Vec<Artifact>) -> Bundle {
    std::iter::once(Artifact::asset("index.html", html))
        .chain(outputs)
        .collect()
}

/// Text of the bundle's `index.html`
#[allow(dead_code)]
pub fn document_of(bundle: &Bundle) -> String {
    bundle
        .document()
        .map(|(_, text)| text.to_string())
        .expect("bundle has a document")
}

/// Config with compression off and the given unmatched policy, defaults otherwise
#[allow(dead_code)]
pub fn plain_config(non_matched: NonMatchedLevel) -> InlineConfig {
    InlineConfig::builder()
        .compress(false)
        .non_matched(non_matched)
        .build()
        .expect("valid config")
}

/// In-memory fetcher that counts requests
#[allow(dead_code)]
#[derive(Default)]
pub struct StaticFetcher {
    responses: HashMap<String, Result<Vec<u8>, FetchError>>,
    calls: AtomicUsize,
}

#[allow(dead_code)]
impl StaticFetcher {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(mut self, url: &str, body: &str) -> Self {
        self.responses.insert(url.to_string(), Ok(body.as_bytes().to_vec()));
        self
    }

    pub fn with_status(mut self, url: &str, status: u16) -> Self {
        self.responses.insert(
            url.to_string(),
            Err(FetchError::Status {
                url: url.to_string(),
                status,
            }),
        );
        self
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

impl Fetcher for StaticFetcher {
    fn fetch<'a>(&'a self, url: &'a str) -> BoxFuture<'a, Result<Vec<u8>, FetchError>> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        let response = self.responses.get(url).cloned().unwrap_or_else(|| {
            Err(FetchError::Status {
                url: url.to_string(),
                status: 404,
            })
        });
        Box::pin(async move { response })
    }
}

/// Minifier that always fails
#[allow(dead_code)]
pub struct FailingMinifier;

impl Minifier for FailingMinifier {
    fn minify(&self, _content: &str, _kind: ArtifactKind) -> Result<String, TransformError> {
        Err(TransformError::Failed("minifier crashed".to_string()))
    }
}

/// Inliner using `fetcher` and `cache` with the default minifier
#[allow(dead_code)]
pub fn inliner_with(
    config: InlineConfig,
    fetcher: Arc<StaticFetcher>,
    cache: RemoteCache,
) -> ResourceInliner {
    ResourceInliner::with_parts(
        config,
        fetcher,
        cache,
        Arc::new(kodegen_tools_inline_resource::inline_resource::HtmlMinifier),
    )
    .expect("valid config")
}

/// Creates a mock endpoint that returns a body with the given content type
#[allow(dead_code)]
pub async fn create_body_mock(
    server: &mut Server,
    path: &str,
    content_type: &str,
    body: &str,
) -> Mock {
    server
        .mock("GET", path)
        .with_status(200)
        .with_header("content-type", content_type)
        .with_body(body)
        .create_async()
        .await
}

/// Creates a mock endpoint that returns an error
#[allow(dead_code)]
pub async fn create_error_mock(server: &mut Server, path: &str, status: usize) -> Mock {
    server
        .mock("GET", path)
        .with_status(status)
        .with_body("Error")
        .create_async()
        .await
}
