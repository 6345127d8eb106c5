//! Contract Test: Export Output
//!
//! Verifies what an export run writes:
//! - Resource blocks go to the primary output stream
//! - Import commands go to `<zone>/page-rules-<zone>.sh`, one per rule
//! - Targets, actions and mapping entries keep API order

mod common;

use cft_core::model::{Action, Zone};
use cft_core::{ExportConfig, Exporter};
use common::*;
use serde_json::json;

#[tokio::test]
async fn single_rule_end_to_end() {
    let out_dir = tempfile::tempdir().unwrap();
    let zone = Zone::new("zone1", "example.com");
    let rule = page_rule(
        "42",
        &["*.example.com/*"],
        json!(1),
        vec![Action::new(
            "forwarding_url",
            json!({"url": "https://x.com", "status_code": 301}),
        )],
    );

    let api = MockZoneApi::new().with_zone(zone.clone(), vec![rule]);
    let exporter = Exporter::new(Box::new(api), ExportConfig::new(out_dir.path())).unwrap();

    let mut stdout: Vec<u8> = Vec::new();
    let summary = exporter.run(&[zone], &mut stdout).await.unwrap();

    let hcl = String::from_utf8(stdout).unwrap();
    assert_eq!(
        hcl,
        "\
resource \"cloudflare_page_rule\" \"page_rule_42\" {
    zone_id = \"zone1\"
    target = \"*.example.com/*\"
    priority = 1
    status = \"active\"
    actions {
        forwarding_url {
            url = \"https://x.com\"
            status_code = 301
        }
    }
}
"
    );

    let script = read(out_dir.path().join("example.com/page-rules-example.com.sh"));
    assert_eq!(
        script,
        "terraform import cloudflare_page_rule.page_rule_42 zone1/42\n"
    );

    assert_eq!(summary.total_exported(), 1);
    assert_eq!(summary.total_failed(), 0);
}

#[tokio::test]
async fn blocks_concatenate_and_imports_follow_rule_order() {
    let out_dir = tempfile::tempdir().unwrap();
    let zone = Zone::new("z", "example.org");
    let rules = vec![
        page_rule("b", &["b.example.org/*"], json!(2), vec![Action::new("cache_level", json!("bypass"))]),
        page_rule("a", &["a.example.org/*"], json!(1), vec![Action::new("ssl", json!("flexible"))]),
    ];

    let api = MockZoneApi::new().with_zone(zone.clone(), rules);
    let exporter = Exporter::new(Box::new(api), ExportConfig::new(out_dir.path())).unwrap();

    let mut stdout: Vec<u8> = Vec::new();
    exporter.run(&[zone], &mut stdout).await.unwrap();

    let hcl = String::from_utf8(stdout).unwrap();
    let b = hcl.find("\"page_rule_b\"").unwrap();
    let a = hcl.find("\"page_rule_a\"").unwrap();
    assert!(b < a, "blocks must follow API order");
    assert!(hcl.contains("}\nresource \"cloudflare_page_rule\" \"page_rule_a\" {\n"));

    let script = read(out_dir.path().join("example.org/page-rules-example.org.sh"));
    let lines: Vec<&str> = script.lines().collect();
    assert_eq!(
        lines,
        [
            "terraform import cloudflare_page_rule.page_rule_b z/b",
            "terraform import cloudflare_page_rule.page_rule_a z/a",
        ]
    );
}

#[tokio::test]
async fn targets_and_actions_keep_api_order() {
    let out_dir = tempfile::tempdir().unwrap();
    let zone = Zone::new("z", "example.net");
    let rule = page_rule(
        "1",
        &["one.example.net/*", "two.example.net/*"],
        json!(1),
        vec![
            Action::new("minify", json!({"js": "on", "css": "off", "html": "on"})),
            Action::new("browser_cache_ttl", json!(14400)),
            Action::new("disable_apps", json!(true)),
        ],
    );

    let api = MockZoneApi::new().with_zone(zone.clone(), vec![rule]);
    let exporter = Exporter::new(Box::new(api), ExportConfig::new(out_dir.path())).unwrap();

    let mut stdout: Vec<u8> = Vec::new();
    exporter.run(&[zone], &mut stdout).await.unwrap();

    let hcl = String::from_utf8(stdout).unwrap();
    let lines: Vec<&str> = hcl.lines().map(str::trim).collect();
    let expected = [
        "target = \"one.example.net/*\"",
        "target = \"two.example.net/*\"",
        "minify {",
        "js = \"on\"",
        "css = \"off\"",
        "html = \"on\"",
        "browser_cache_ttl = 14400",
        "disable_apps = true",
    ];

    let mut cursor = 0;
    for want in expected {
        let pos = lines[cursor..]
            .iter()
            .position(|l| *l == want)
            .unwrap_or_else(|| panic!("missing or out of order: {}", want));
        cursor += pos + 1;
    }
}

#[tokio::test]
async fn one_script_per_zone() {
    let out_dir = tempfile::tempdir().unwrap();
    let first = Zone::new("z1", "first.com");
    let second = Zone::new("z2", "second.com");

    let api = MockZoneApi::new()
        .with_zone(first.clone(), vec![page_rule("r1", &["first.com/*"], json!(1), vec![])])
        .with_zone(
            second.clone(),
            vec![
                page_rule("r2", &["second.com/a"], json!(1), vec![]),
                page_rule("r3", &["second.com/b"], json!(2), vec![]),
            ],
        );
    let exporter = Exporter::new(Box::new(api), ExportConfig::new(out_dir.path())).unwrap();

    let mut stdout: Vec<u8> = Vec::new();
    let summary = exporter.run(&[first, second], &mut stdout).await.unwrap();

    assert_eq!(
        read(out_dir.path().join("first.com/page-rules-first.com.sh")).lines().count(),
        1
    );
    assert_eq!(
        read(out_dir.path().join("second.com/page-rules-second.com.sh")).lines().count(),
        2
    );
    assert_eq!(summary.zones.len(), 2);
    assert_eq!(
        summary.zones[1].script_path,
        out_dir.path().join("second.com/page-rules-second.com.sh")
    );
}

#[tokio::test]
async fn zone_without_rules_gets_empty_script() {
    let out_dir = tempfile::tempdir().unwrap();
    let zone = Zone::new("z", "empty.com");

    let api = MockZoneApi::new().with_zone(zone.clone(), vec![]);
    let exporter = Exporter::new(Box::new(api), ExportConfig::new(out_dir.path())).unwrap();

    let mut stdout: Vec<u8> = Vec::new();
    exporter.run(&[zone], &mut stdout).await.unwrap();

    assert!(stdout.is_empty());
    assert_eq!(read(out_dir.path().join("empty.com/page-rules-empty.com.sh")), "");
}

#[tokio::test]
async fn resources_to_file_moves_blocks_out_of_stdout() {
    let out_dir = tempfile::tempdir().unwrap();
    let zone = Zone::new("z", "example.com");

    let api = MockZoneApi::new().with_zone(
        zone.clone(),
        vec![page_rule("7", &["example.com/*"], json!(1), vec![])],
    );
    let config = ExportConfig::new(out_dir.path()).with_resources_to_file(true);
    let exporter = Exporter::new(Box::new(api), config).unwrap();

    let mut stdout: Vec<u8> = Vec::new();
    exporter.run(&[zone], &mut stdout).await.unwrap();

    assert!(stdout.is_empty());
    let tf = read(out_dir.path().join("example.com/page-rules-example.com.tf"));
    assert!(tf.starts_with("resource \"cloudflare_page_rule\" \"page_rule_7\" {\n"));
    assert_eq!(
        read(out_dir.path().join("example.com/page-rules-example.com.sh")),
        "terraform import cloudflare_page_rule.page_rule_7 z/7\n"
    );
}

#[tokio::test]
async fn zone_filter_selects_one_zone() {
    let api = MockZoneApi::new()
        .with_zone(Zone::new("z1", "first.com"), vec![])
        .with_zone(Zone::new("z2", "second.com"), vec![]);
    let exporter = Exporter::new(Box::new(api), ExportConfig::default()).unwrap();

    let zones = exporter.zones(Some("second.com")).await.unwrap();
    assert_eq!(zones, vec![Zone::new("z2", "second.com")]);

    let all = exporter.zones(None).await.unwrap();
    assert_eq!(all.len(), 2);

    let missing = exporter.zones(Some("third.com")).await;
    assert!(matches!(missing, Err(cft_core::Error::NotFound(_))));
}
