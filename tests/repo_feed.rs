use serde_json::json;
use traffic_canvas::feed::{
    parse_profile, parse_repositories, select_repositories, FeedError, FeedState, RawRepository,
};

fn raw_repo(id: u64, stars: u64, fork: bool) -> serde_json::Value {
    json!({
        "id": id,
        "name": format!("repo-{id}"),
        "description": format!("Repository {id}"),
        "html_url": format!("https://github.com/someone/repo-{id}"),
        "stargazers_count": stars,
        "language": "Rust",
        "topics": ["simulation"],
        "fork": fork,
        "watchers_count": stars,
    })
}

/// Twelve repositories with one fork: the fork is dropped, order kept.
#[test]
fn test_forks_are_filtered_and_order_kept() -> anyhow::Result<()> {
    let repos: Vec<_> = (0..12u64).map(|i| raw_repo(i, 100 - i, i == 4)).collect();
    let body = serde_json::to_string(&repos)?;

    let selected = parse_repositories(&body, 12)?;

    assert_eq!(selected.len(), 11);
    assert!(selected.iter().all(|r| r.id != 4));
    let ids: Vec<u64> = selected.iter().map(|r| r.id).collect();
    assert_eq!(ids, vec![0, 1, 2, 3, 5, 6, 7, 8, 9, 10, 11]);

    let first = &selected[0];
    assert_eq!(first.name, "repo-0");
    assert_eq!(first.url, "https://github.com/someone/repo-0");
    assert_eq!(first.stars, 100);
    assert_eq!(first.language.as_deref(), Some("Rust"));
    assert_eq!(first.topics, vec!["simulation".to_string()]);
    Ok(())
}

#[test]
fn test_selection_is_capped() -> anyhow::Result<()> {
    let repos: Vec<RawRepository> = (0..30u64)
        .map(|i| serde_json::from_value(raw_repo(i, i, i % 5 == 0)))
        .collect::<Result<_, _>>()?;

    let selected = select_repositories(repos, 12);

    assert_eq!(selected.len(), 12);
    assert_eq!(selected.last().map(|r| r.id), Some(14));
    Ok(())
}

#[test]
fn test_optional_fields_default() -> anyhow::Result<()> {
    let body = r#"[{"id": 1, "name": "bare", "html_url": "https://github.com/someone/bare",
                    "description": null, "language": null}]"#;

    let selected = parse_repositories(body, 12)?;

    assert_eq!(selected.len(), 1);
    assert_eq!(selected[0].description, None);
    assert_eq!(selected[0].language, None);
    assert_eq!(selected[0].stars, 0);
    assert!(selected[0].topics.is_empty());
    Ok(())
}

#[test]
fn test_profile_name_falls_back_to_login() -> anyhow::Result<()> {
    let named = parse_profile(
        r#"{"login": "someone", "name": "Some One", "bio": "Builds things",
            "followers": 10, "public_repos": 42, "avatar_url": "https://example.com/a.png"}"#,
    )?;
    assert_eq!(named.name, "Some One");
    assert_eq!(named.public_repos, 42);

    let unnamed = parse_profile(r#"{"login": "someone", "name": null}"#)?;
    assert_eq!(unnamed.name, "someone");
    assert_eq!(unnamed.followers, 0);
    assert_eq!(unnamed.bio, None);
    Ok(())
}

#[test]
fn test_malformed_body_is_a_decode_error() {
    let err = parse_repositories(r#"{"message": "API rate limit exceeded"}"#, 12).unwrap_err();
    assert!(matches!(err, FeedError::Decode(_)));
    assert!(parse_profile("not json").is_err());
}

#[test]
fn test_feed_state_accessors() {
    assert!(FeedState::Loading.is_loading());
    assert!(FeedState::Failed("status 403".to_string()).repositories().is_empty());
}

#[test]
fn test_null_topics_decode_as_empty() -> anyhow::Result<()> {
    let body = r#"[{"id": 7, "name": "untagged", "html_url": "https://github.com/someone/untagged",
                    "stargazers_count": 3, "topics": null, "fork": false}]"#;

    let selected = parse_repositories(body, 12)?;

    assert_eq!(selected.len(), 1);
    assert_eq!(selected[0].id, 7);
    assert!(selected[0].topics.is_empty());
    Ok(())
}

#[cfg(feature = "github")]
mod client {
    use tokio::io::{AsyncReadExt, AsyncWriteExt};
    use tokio::net::TcpListener;
    use traffic_canvas::feed::{FeedClient, FeedState};
    use traffic_canvas::FeedConfig;

    fn config_for(api_base: String) -> FeedConfig {
        FeedConfig {
            username: "someone".to_string(),
            api_base,
            ..FeedConfig::default()
        }
    }

    /// Answers every request with the given status line and an empty body.
    async fn serve_status(status_line: &'static str) -> anyhow::Result<String> {
        let listener = TcpListener::bind("127.0.0.1:0").await?;
        let addr = listener.local_addr()?;

        tokio::spawn(async move {
            while let Ok((mut socket, _)) = listener.accept().await {
                tokio::spawn(async move {
                    let mut request = Vec::new();
                    let mut buf = [0u8; 1024];
                    while !request.windows(4).any(|w| w == b"\r\n\r\n") {
                        match socket.read(&mut buf).await {
                            Ok(0) | Err(_) => return,
                            Ok(n) => request.extend_from_slice(&buf[..n]),
                        }
                    }
                    let response = format!("HTTP/1.1 {status_line}\r\ncontent-length: 0\r\nconnection: close\r\n\r\n");
                    let _ = socket.write_all(response.as_bytes()).await;
                    let _ = socket.shutdown().await;
                });
            }
        });

        Ok(format!("http://{addr}"))
    }

    #[tokio::test]
    async fn test_unreachable_api_fails_the_feed() -> anyhow::Result<()> {
        let client = FeedClient::new(config_for("http://127.0.0.1:1".to_string()))?;

        let state = client.load().await;

        assert!(matches!(state, FeedState::Failed(_)), "got {state:?}");
        assert!(state.repositories().is_empty());
        Ok(())
    }

    #[tokio::test]
    async fn test_not_found_status_fails_the_feed() -> anyhow::Result<()> {
        let base = serve_status("404 Not Found").await?;
        let client = FeedClient::new(config_for(base))?;

        match client.load().await {
            FeedState::Failed(message) => assert!(message.contains("404"), "message: {message}"),
            other => panic!("expected a failed feed, got {other:?}"),
        }
        Ok(())
    }
}
