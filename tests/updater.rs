//! Update checks end to end, against local HTTP servers

mod helper;

use std::io::Write;
use std::sync::Arc;
use std::time::Duration;

use mockito::Server;
use tempfile::NamedTempFile;

use helper::{StaticUpstream, release_schema};
use upstream_updater::upstream::{CodebergUpstream, GitHubUpstream};
use upstream_updater::version::error::{UpdaterError, UpstreamError};
use upstream_updater::{CheckFile, Update, Updater, UpdaterConfig, Upstream, UpstreamKind};

fn updater() -> Updater {
    Updater::new(UpdaterConfig::default()).unwrap()
}

async fn github_server(body: &str) -> (mockito::ServerGuard, mockito::Mock) {
    let mut server = Server::new_async().await;
    let mock = server
        .mock("GET", "/repos/octo/tool/releases")
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(body)
        .create_async()
        .await;
    (server, mock)
}

#[tokio::test]
async fn check_finds_newer_github_release() {
    let (server, mock) = github_server(r#"[{"tag_name": "v1.3.0-rc.1"}]"#).await;
    let upstream = GitHubUpstream::new("octo", "tool").with_base_url(&server.url());

    let update = updater()
        .check("v1.2.0", &release_schema(), &upstream)
        .await
        .unwrap();

    mock.assert_async().await;
    assert_eq!(
        update,
        Some(Update::new(
            "v1.3.0-rc.1",
            "https://github.com/octo/tool/releases/tag/v1.3.0-rc.1"
        ))
    );
}

#[tokio::test]
async fn check_reports_nothing_for_same_version() {
    let (server, mock) = github_server(r#"[{"tag_name": "v1.2.0"}]"#).await;
    let upstream = GitHubUpstream::new("octo", "tool").with_base_url(&server.url());

    let update = updater()
        .check("v1.2.0", &release_schema(), &upstream)
        .await
        .unwrap();

    mock.assert_async().await;
    assert_eq!(update, None);
}

#[tokio::test]
async fn check_surfaces_http_failures() {
    let mut server = Server::new_async().await;
    let mock = server
        .mock("GET", "/repos/octo/tool/releases")
        .with_status(500)
        .create_async()
        .await;
    let upstream = GitHubUpstream::new("octo", "tool").with_base_url(&server.url());

    let result = updater().check("v1.2.0", &release_schema(), &upstream).await;

    mock.assert_async().await;
    assert!(matches!(
        result,
        Err(UpdaterError::Upstream(UpstreamError::UnsuccessfulRequest { status: 500 }))
    ));
}

#[tokio::test]
async fn check_all_combines_http_and_static_upstreams() {
    let (github, github_mock) = github_server(r#"[{"tag_name": "v2.0.0"}]"#).await;

    let mut codeberg = Server::new_async().await;
    let codeberg_mock = codeberg
        .mock("GET", "/repos/forge/tool/releases/latest")
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(r#"{"tag_name": "v2.0.0"}"#)
        .create_async()
        .await;

    let upstreams: Vec<Arc<dyn Upstream>> = vec![
        Arc::new(GitHubUpstream::new("octo", "tool").with_base_url(&github.url())),
        Arc::new(
            CodebergUpstream::new("forge", "tool")
                .with_base_url(&codeberg.url())
                .with_priority(3),
        ),
        Arc::new(StaticUpstream::new(UpstreamKind::Spigot).failing()),
        Arc::new(StaticUpstream::new(UpstreamKind::Modrinth).with_version("v1.5.0")),
    ];

    let update = updater()
        .check_all("v1.0.0", &release_schema(), &upstreams)
        .await
        .unwrap();

    github_mock.assert_async().await;
    codeberg_mock.assert_async().await;
    assert_eq!(
        update,
        Some(Update::new(
            "v2.0.0",
            "https://codeberg.org/forge/tool/releases/tag/v2.0.0"
        ))
    );
}

#[tokio::test]
async fn check_all_ignores_nightly_builds() {
    let upstreams: Vec<Arc<dyn Upstream>> = vec![
        Arc::new(StaticUpstream::new(UpstreamKind::GitHub).with_version("v3.0.0-nightly")),
        Arc::new(StaticUpstream::new(UpstreamKind::Hangar).with_version("v1.0.1")),
    ];

    let update = updater()
        .check_all("v1.0.0", &release_schema(), &upstreams)
        .await
        .unwrap();

    assert_eq!(
        update,
        Some(Update::new("v1.0.1", "https://hangar.example/v1.0.1"))
    );
}

#[tokio::test]
async fn check_file_drives_a_full_check() {
    let (server, mock) = github_server(r#"[{"tag_name": "v0.4.0-beta.2"}]"#).await;

    let mut file = NamedTempFile::new().unwrap();
    write!(
        file,
        r#"{{
            "current": "v0.3.9",
            "schema": {{
                "prefixes": ["v"],
                "classifiers": [
                    {{ "name": "beta", "divider": "-", "priority": 4 }}
                ]
            }},
            "upstreams": [
                {{ "type": "github", "user": "octo", "repo": "tool", "baseUrl": "{}" }}
            ],
            "updater": {{ "readTimeout": 5000 }}
        }}"#,
        server.url()
    )
    .unwrap();

    let check = CheckFile::load(file.path()).unwrap();
    let upstreams: Vec<Arc<dyn Upstream>> = check.upstreams.iter().map(|u| u.build()).collect();
    let updater = Updater::new(check.updater).unwrap();

    let update = updater
        .check_all(&check.current, &check.schema, &upstreams)
        .await
        .unwrap();

    mock.assert_async().await;
    assert_eq!(update.map(|u| u.value), Some("v0.4.0-beta.2".to_string()));
}

#[tokio::test]
async fn periodic_run_polls_until_shutdown() {
    let mut server = Server::new_async().await;
    let mock = server
        .mock("GET", "/repos/octo/tool/releases")
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(r#"[{"tag_name": "v1.0.0"}]"#)
        .expect_at_least(2)
        .create_async()
        .await;

    let config = UpdaterConfig::builder()
        .periodic(Duration::from_millis(20))
        .build()
        .unwrap();
    let upstream: Arc<dyn Upstream> =
        Arc::new(GitHubUpstream::new("octo", "tool").with_base_url(&server.url()));

    let task = Arc::new(Updater::new(config).unwrap())
        .run("v1.0.0".to_string(), release_schema(), upstream)
        .await
        .unwrap()
        .unwrap();

    tokio::time::sleep(Duration::from_millis(150)).await;
    task.shutdown().await;

    mock.assert_async().await;
}
