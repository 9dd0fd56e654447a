//! Tests for remote resource fetching, caching and inlining over HTTP

mod common;

use anyhow::Result;
use common::{bundle_with, create_body_mock, create_error_mock, document_of, init_logging};
use kodegen_tools_inline_resource::inline_resource::HtmlMinifier;
use kodegen_tools_inline_resource::{
    ExcludeAttr, FetchError, Fetcher, HttpFetcher, InlineConfig, RemoteCache, ResourceInliner,
};
use mockito::Server;
use std::io::Write;
use std::sync::Arc;
use std::time::Duration;

fn fetcher() -> HttpFetcher {
    HttpFetcher::new(Duration::from_secs(5), 1024)
}

fn remote_config(cache: bool, force_refresh: bool) -> Result<InlineConfig> {
    Ok(InlineConfig::builder()
        .compress(false)
        .inline_remote(true)
        .cache(cache)
        .force_refresh(force_refresh)
        .build()?)
}

fn inliner(config: InlineConfig, cache: RemoteCache) -> Result<ResourceInliner> {
    let fetcher = HttpFetcher::new(config.fetch_timeout(), config.max_remote_size());
    Ok(ResourceInliner::with_parts(
        config,
        Arc::new(fetcher),
        cache,
        Arc::new(HtmlMinifier),
    )?)
}

#[tokio::test]
async fn test_fetch_ok_body() -> Result<()> {
    init_logging();
    let mut server = Server::new_async().await;
    let mock = create_body_mock(&mut server, "/lib.js", "application/javascript", "lib()").await;

    let bytes = fetcher().fetch(&format!("{}/lib.js", server.url())).await?;

    assert_eq!(bytes, b"lib()");
    mock.assert_async().await;
    Ok(())
}

#[tokio::test]
async fn test_fetch_no_content_is_empty() -> Result<()> {
    init_logging();
    let mut server = Server::new_async().await;
    let _mock = server
        .mock("GET", "/empty.css")
        .with_status(204)
        .create_async()
        .await;

    let bytes = fetcher().fetch(&format!("{}/empty.css", server.url())).await?;

    assert!(bytes.is_empty());
    Ok(())
}

#[tokio::test]
async fn test_fetch_rejects_other_statuses() {
    init_logging();
    let mut server = Server::new_async().await;
    let _missing = create_error_mock(&mut server, "/missing.js", 404).await;
    let _partial = create_error_mock(&mut server, "/partial.js", 206).await;

    let url = format!("{}/missing.js", server.url());
    let err = fetcher().fetch(&url).await.unwrap_err();
    assert_eq!(err, FetchError::Status { url, status: 404 });

    let url = format!("{}/partial.js", server.url());
    let err = fetcher().fetch(&url).await.unwrap_err();
    assert!(err.is_status());
}

#[tokio::test]
async fn test_fetch_enforces_size_limit() {
    init_logging();
    let mut server = Server::new_async().await;
    let body = "x".repeat(4096);
    let _mock = create_body_mock(&mut server, "/big.js", "application/javascript", &body).await;

    let err = fetcher()
        .fetch(&format!("{}/big.js", server.url()))
        .await
        .unwrap_err();

    assert!(matches!(err, FetchError::TooLarge { limit: 1024, .. }));
}

#[tokio::test]
async fn test_fetch_unreachable_host() {
    init_logging();
    // Port 9 (discard) is not expected to be listening
    let err = HttpFetcher::new(Duration::from_secs(2), 1024)
        .fetch("http://127.0.0.1:9/lib.js")
        .await
        .unwrap_err();

    assert!(matches!(
        err,
        FetchError::RequestFailed { .. } | FetchError::Timeout { .. }
    ));
}

#[tokio::test(flavor = "multi_thread")]
async fn test_fetch_slow_body_times_out() {
    init_logging();
    let mut server = Server::new_async().await;
    let _mock = server
        .mock("GET", "/slow.js")
        .with_status(200)
        .with_chunked_body(|w| {
            std::thread::sleep(Duration::from_secs(3));
            w.write_all(b"late()")
        })
        .create_async()
        .await;

    let url = format!("{}/slow.js", server.url());
    let err = HttpFetcher::new(Duration::from_secs(1), 1024)
        .fetch(&url)
        .await
        .unwrap_err();

    assert_eq!(err, FetchError::Timeout { url });
}

#[tokio::test]
async fn test_remote_script_is_inlined() -> Result<()> {
    init_logging();
    let mut server = Server::new_async().await;
    let mock = create_body_mock(&mut server, "/lib.js", "application/javascript", "lib()").await;
    let url = format!("{}/lib.js", server.url());

    let html = format!(r#"<body><script src="{url}" crossorigin="anonymous"></script></body>"#);
    let mut bundle = bundle_with(&html, vec![]);

    let report = inliner(remote_config(true, false)?, RemoteCache::new())?
        .generate_bundle(&mut bundle)
        .await?;

    assert_eq!(
        document_of(&bundle),
        r#"<body><script crossorigin="anonymous">lib()</script></body>"#
    );
    assert_eq!(report.inlined, vec![url]);
    mock.assert_async().await;
    Ok(())
}

#[tokio::test]
async fn test_remote_stylesheet_is_inlined() -> Result<()> {
    init_logging();
    let mut server = Server::new_async().await;
    let _mock = create_body_mock(&mut server, "/font.css", "text/css", "@font-face{}").await;
    let url = format!("{}/font.css", server.url());

    let mut bundle = bundle_with(&format!(r#"<link rel="stylesheet" href="{url}">"#), vec![]);

    inliner(remote_config(true, false)?, RemoteCache::new())?
        .generate_bundle(&mut bundle)
        .await?;

    assert_eq!(
        document_of(&bundle),
        r#"<style rel="stylesheet">@font-face{}</style>"#
    );
    Ok(())
}

#[tokio::test]
async fn test_pair_rule_on_href_keeps_remote_stylesheet() -> Result<()> {
    init_logging();
    let mut server = Server::new_async().await;
    let mock = server
        .mock("GET", "/theme.css")
        .with_status(200)
        .with_body("a{}")
        .expect(0)
        .create_async()
        .await;
    let url = format!("{}/theme.css", server.url());
    let html = format!(r#"<link rel="stylesheet" href="{url}">"#);

    let config = InlineConfig::builder()
        .compress(false)
        .inline_remote(true)
        .exclude_attrs(vec![ExcludeAttr::pair("href", url.as_str())])
        .build()?;
    let mut bundle = bundle_with(&html, vec![]);

    let report = inliner(config, RemoteCache::new())?
        .generate_bundle(&mut bundle)
        .await?;

    assert_eq!(document_of(&bundle), html);
    assert_eq!(report.skipped, vec![url]);
    mock.assert_async().await;
    Ok(())
}

#[tokio::test]
async fn test_shared_cache_avoids_second_request() -> Result<()> {
    init_logging();
    let mut server = Server::new_async().await;
    let mock = server
        .mock("GET", "/lib.js")
        .with_status(200)
        .with_body("lib()")
        .expect(1)
        .create_async()
        .await;
    let url = format!("{}/lib.js", server.url());
    let html = format!(r#"<script src="{url}"></script>"#);
    let cache = RemoteCache::new();

    for _ in 0..2 {
        let mut bundle = bundle_with(&html, vec![]);
        inliner(remote_config(true, false)?, cache.clone())?
            .generate_bundle(&mut bundle)
            .await?;
        assert_eq!(document_of(&bundle), "<script>lib()</script>");
    }

    assert!(cache.contains(&url));
    assert_eq!(cache.len(), 1);
    mock.assert_async().await;
    Ok(())
}

#[tokio::test]
async fn test_disabled_cache_fetches_every_pass() -> Result<()> {
    init_logging();
    let mut server = Server::new_async().await;
    let mock = server
        .mock("GET", "/lib.js")
        .with_status(200)
        .with_body("lib()")
        .expect(2)
        .create_async()
        .await;
    let html = format!(r#"<script src="{}/lib.js"></script>"#, server.url());
    let cache = RemoteCache::new();

    for _ in 0..2 {
        let mut bundle = bundle_with(&html, vec![]);
        inliner(remote_config(false, false)?, cache.clone())?
            .generate_bundle(&mut bundle)
            .await?;
    }

    assert!(cache.is_empty());
    mock.assert_async().await;
    Ok(())
}

#[tokio::test]
async fn test_force_refresh_bypasses_cached_entry() -> Result<()> {
    init_logging();
    let mut server = Server::new_async().await;
    let mock = server
        .mock("GET", "/lib.js")
        .with_status(200)
        .with_body("fresh()")
        .expect(1)
        .create_async()
        .await;
    let url = format!("{}/lib.js", server.url());
    let cache = RemoteCache::new();
    cache.insert(&url, Arc::from("stale()"));

    let mut bundle = bundle_with(&format!(r#"<script src="{url}"></script>"#), vec![]);
    inliner(remote_config(true, true)?, cache.clone())?
        .generate_bundle(&mut bundle)
        .await?;

    assert_eq!(document_of(&bundle), "<script>fresh()</script>");
    assert_eq!(cache.get(&url).as_deref(), Some("fresh()"));
    mock.assert_async().await;
    Ok(())
}

#[tokio::test]
async fn test_cached_entry_used_without_request() -> Result<()> {
    init_logging();
    let mut server = Server::new_async().await;
    let mock = server
        .mock("GET", "/lib.js")
        .with_status(200)
        .with_body("fresh()")
        .expect(0)
        .create_async()
        .await;
    let url = format!("{}/lib.js", server.url());
    let cache = RemoteCache::new();
    cache.insert(&url, Arc::from("cached()"));

    let mut bundle = bundle_with(&format!(r#"<script src="{url}"></script>"#), vec![]);
    inliner(remote_config(true, false)?, cache)?
        .generate_bundle(&mut bundle)
        .await?;

    assert_eq!(document_of(&bundle), "<script>cached()</script>");
    mock.assert_async().await;
    Ok(())
}
