//! End-to-end pipeline tests against a mock Discogs API.

use discogs_snarfer::{
    DiscogsApi, EntityKind, ReplyContext, SnarfError, Snarfer, TemplateConfig,
};
use serde_json::json;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

const FULL_TEMPLATE: &str =
    "{{artists}}- {{title}} ({{year}}) [{{formats}}] {{labels}} H:{{have}} W:{{want}} FS:{{for_sale}}";

fn homework() -> serde_json::Value {
    json!({
        "artists": [{"name": "Daft Punk"}],
        "title": "Homework",
        "year": 1997,
        "formats": [{"name": "CD"}],
        "labels": [{"name": "Virgin"}],
        "community": {"have": 1000, "want": 500},
        "num_for_sale": 12
    })
}

fn snarfer_for(server: &MockServer, config: TemplateConfig) -> Snarfer {
    let api = DiscogsApi::with_base_url(server.uri()).expect("client should build");
    Snarfer::new(api, config)
}

fn config_with(kind: EntityKind, template: &str) -> TemplateConfig {
    let mut config = TemplateConfig::default();
    config.set_default(kind, template);
    config
}

#[tokio::test]
async fn release_link_renders_single_line_reply() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/releases/249504"))
        .respond_with(ResponseTemplate::new(200).set_body_json(homework()))
        .expect(1)
        .mount(&server)
        .await;

    let snarfer = snarfer_for(&server, config_with(EntityKind::Release, FULL_TEMPLATE));
    let reply = snarfer
        .handle(
            "check this out https://www.discogs.com/release/249504-Daft-Punk-Homework",
            &ReplyContext::new("libera", "#music"),
        )
        .await
        .expect("pipeline should succeed");

    assert_eq!(
        reply.as_deref(),
        Some("Daft Punk - Homework (1997) [CD] Virgin H:1000 W:500 FS:12")
    );
}

#[tokio::test]
async fn master_link_leaves_release_fields_empty() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/masters/72065"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "artists": [{"name": "Various", "join": ""}],
            "title": "Now That's What I Call Music",
            "year": 1983,
            "formats": [{"name": "Vinyl"}],
            "num_for_sale": 40
        })))
        .expect(1)
        .mount(&server)
        .await;

    let snarfer = snarfer_for(&server, config_with(EntityKind::Master, FULL_TEMPLATE));
    let reply = snarfer
        .handle(
            "https://www.discogs.com/master/72065-Various-Now-Thats-What-I-Call-Music",
            &ReplyContext::default(),
        )
        .await
        .unwrap();

    assert_eq!(
        reply.as_deref(),
        Some("Various - Now That's What I Call Music (1983) [] H: W: FS:")
    );
}

#[tokio::test]
async fn channel_template_overrides_default() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/releases/249504"))
        .respond_with(ResponseTemplate::new(200).set_body_json(homework()))
        .mount(&server)
        .await;

    let config = TemplateConfig::from_toml_str(
        r##"
[templates]
release = "{{ title }}"

[networks.libera.channels."#vinyl"]
release = "{{ title }}\n  on {{ labels }}{% if for_sale %}, {{ for_sale }} for sale{% endif %}"
"##,
    )
    .unwrap();
    let snarfer = snarfer_for(&server, config);
    let link = "https://www.discogs.com/release/249504";

    let reply = snarfer
        .handle(link, &ReplyContext::new("libera", "#vinyl"))
        .await
        .unwrap();
    assert_eq!(reply.as_deref(), Some("Homework on Virgin, 12 for sale"));

    let reply = snarfer
        .handle(link, &ReplyContext::new("libera", "#other"))
        .await
        .unwrap();
    assert_eq!(reply.as_deref(), Some("Homework"));
}

#[tokio::test]
async fn sparse_payload_still_renders() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/releases/7"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"title": "Untitled"})))
        .mount(&server)
        .await;

    let snarfer = snarfer_for(&server, config_with(EntityKind::Release, FULL_TEMPLATE));
    let reply = snarfer
        .handle("https://www.discogs.com/release/7", &ReplyContext::default())
        .await
        .unwrap();
    assert_eq!(reply.as_deref(), Some("- Untitled () [] H: W: FS:"));
}

#[tokio::test]
async fn malformed_template_fails_after_fetch() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/releases/249504"))
        .respond_with(ResponseTemplate::new(200).set_body_json(homework()))
        .mount(&server)
        .await;

    // Closure providers are not validated up front
    let api = DiscogsApi::with_base_url(server.uri()).unwrap();
    let snarfer = Snarfer::new(api, |_kind: EntityKind, _ctx: &ReplyContext| {
        "{{ title ".to_string()
    });
    let err = snarfer
        .handle("https://www.discogs.com/release/249504", &ReplyContext::default())
        .await
        .unwrap_err();
    assert!(matches!(err, SnarfError::TemplateError(_)));
}

#[tokio::test]
async fn decode_error_aborts_pipeline() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/masters/1"))
        .respond_with(ResponseTemplate::new(200).set_body_string("{\"title\": "))
        .mount(&server)
        .await;

    let snarfer = snarfer_for(&server, TemplateConfig::default());
    let err = snarfer
        .handle("https://www.discogs.com/master/1", &ReplyContext::default())
        .await
        .unwrap_err();
    assert!(matches!(err, SnarfError::DecodeError { .. }));
    assert!(!err.is_fetch_error());
}

#[tokio::test]
async fn text_without_link_never_hits_api() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200).set_body_json(homework()))
        .expect(0)
        .mount(&server)
        .await;

    let snarfer = snarfer_for(&server, TemplateConfig::default());
    let reply = snarfer
        .handle(
            "https://microsoft.com/ https://google.com/",
            &ReplyContext::default(),
        )
        .await
        .unwrap();
    assert_eq!(reply, None);
}

#[tokio::test]
async fn concurrent_lookups_share_one_snarfer() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/releases/249504"))
        .respond_with(ResponseTemplate::new(200).set_body_json(homework()))
        .expect(4)
        .mount(&server)
        .await;

    let snarfer = snarfer_for(&server, config_with(EntityKind::Release, "{{title}} {{year}}"));
    let mut handles = Vec::new();
    for _ in 0..4 {
        let snarfer = snarfer.clone();
        handles.push(tokio::spawn(async move {
            snarfer
                .handle(
                    "https://www.discogs.com/release/249504",
                    &ReplyContext::default(),
                )
                .await
        }));
    }
    for handle in handles {
        let reply = handle.await.expect("task should not panic").unwrap();
        assert_eq!(reply.as_deref(), Some("Homework 1997"));
    }
}
