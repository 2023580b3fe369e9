//! End-to-end engine tests, mostly against the built-in systemd catalog

use unitsense::{CompletionKind, ContextKind, Engine, EngineOptions};

fn engine() -> Engine {
    Engine::builtin().unwrap()
}

const SERVICE: &str = "\
[Unit]
Description=OpenSSH server daemon
After=network.target

[Service]
Type=notify
ExecStart=/usr/sbin/sshd -D
WorkingDirectory=/
";

// =============================================================================
// Sections
// =============================================================================

#[test]
fn test_bracket_offers_every_section() {
    let engine = engine();
    let result = engine.complete("[", 1, 2);

    assert_eq!(
        result.labels(),
        vec!["Unit", "Install", "Service", "Socket", "Mount", "Automount", "Path", "Swap", "Timer"]
    );
    assert!(result.items.iter().all(|i| i.kind == CompletionKind::Section));
    assert!(!result.is_incomplete);
}

#[test]
fn test_bracket_with_indent_is_section_context() {
    let engine = engine();
    let ctx = engine.context("  [", 1, 4);
    assert_eq!(
        ctx.kind,
        ContextKind::SectionName {
            prefix: String::new()
        }
    );
}

#[test]
fn test_section_prefix() {
    let engine = engine();
    let result = engine.complete("[Tim", 1, 5);
    assert_eq!(result.labels(), vec!["Timer"]);
}

#[test]
fn test_sections_matched_to_file() {
    let engine = engine().with_options(EngineOptions::default().with_match_sections_to_file(true));
    let result = engine.complete_in_file(Some("sshd.socket"), "[", 1, 2);
    let labels = result.labels();

    assert!(labels.contains(&"Unit"));
    assert!(labels.contains(&"Install"));
    assert!(labels.contains(&"Socket"));
    assert!(!labels.contains(&"Service"));
    assert!(!labels.contains(&"Timer"));
}

// =============================================================================
// Settings
// =============================================================================

#[test]
fn test_settings_of_enclosing_section() {
    let engine = engine();
    // Empty line after the final newline
    let result = engine.complete(SERVICE, 9, 1);

    let kb = engine.knowledge();
    let expected: Vec<_> = kb
        .settings("Service")
        .unwrap()
        .iter()
        .map(|s| s.name.as_str())
        .collect();
    assert_eq!(result.labels(), expected);
    assert!(result.items.iter().all(|i| i.kind == CompletionKind::Setting));
}

#[test]
fn test_exec_settings_come_first_in_service() {
    let engine = engine();
    let result = engine.complete("[Service]\n", 2, 1);
    let labels = result.labels();

    let exec_pos = labels.iter().position(|l| *l == "WorkingDirectory").unwrap();
    let type_pos = labels.iter().position(|l| *l == "Type").unwrap();
    assert!(exec_pos < type_pos);
}

#[test]
fn test_setting_prefix_narrows() {
    let engine = engine();
    let result = engine.complete("[Unit]\nDescr", 2, 6);
    assert_eq!(result.items[0].label, "Description");
    assert_eq!(result.items[0].insert_text, "Description=");
}

#[test]
fn test_no_header_means_no_completions_or_hover() {
    let engine = engine();
    assert!(engine.complete("Type=", 1, 6).is_empty());
    assert!(engine.complete("\n", 2, 1).is_empty());
    assert!(engine.hover("Description=x", 1, 2).is_none());
}

#[test]
fn test_key_round_trip_yields_value_context() {
    let engine = engine();

    for section in engine.knowledge().sections() {
        let section = section.name.as_str();
        let source = format!("[{}]\n", section);
        let result = engine.complete(&source, 2, 1);
        assert!(!result.is_empty());

        for item in &result.items {
            let completed = format!("[{}]\n{}", section, item.insert_text);
            let column = item.insert_text.chars().count() as u32 + 1;
            let ctx = engine.context(&completed, 2, column);

            assert_eq!(
                ctx.kind,
                ContextKind::KeyValue {
                    key: item.label.clone()
                },
                "round trip for {}.{}",
                section,
                item.label
            );
        }
    }
}

// =============================================================================
// Values
// =============================================================================

#[test]
fn test_service_type_values() {
    let engine = engine();
    let result = engine.complete("[Service]\nType=", 2, 6);

    assert_eq!(
        result.labels(),
        vec!["simple", "forking", "oneshot", "dbus", "notify", "idle"]
    );
    assert!(result.items.iter().all(|i| i.kind == CompletionKind::Value));
}

#[test]
fn test_service_type_values_ignore_typed_text() {
    let engine = engine();
    let result = engine.complete("[Service]\nType=xyz", 2, 9);
    assert_eq!(
        result.labels(),
        vec!["simple", "forking", "oneshot", "dbus", "notify", "idle"]
    );
}

#[test]
fn test_service_type_values_filtered_when_enabled() {
    let engine = engine().with_options(EngineOptions::default().with_filter_values(true));
    let result = engine.complete("[Service]\nType=one", 2, 9);
    assert_eq!(result.labels(), vec!["oneshot"]);
}

#[test]
fn test_mount_type_is_free_form() {
    let engine = engine();
    assert!(engine.complete("[Mount]\nType=", 2, 6).is_empty());
}

#[test]
fn test_working_directory_has_no_values() {
    let engine = engine();
    assert!(engine.complete("[Service]\nWorkingDirectory=", 2, 18).is_empty());
}

#[test]
fn test_nearest_header_decides_values() {
    let engine = engine();
    let source = "[Service]\nType=simple\n\n[Mount]\nType=";
    assert!(engine.complete(source, 5, 6).is_empty());
    assert_eq!(engine.complete(source, 2, 6).items.len(), 6);
}

// =============================================================================
// Hover
// =============================================================================

#[test]
fn test_hover_description() {
    let engine = engine();
    let info = engine.hover(SERVICE, 2, 4).unwrap();

    assert!(info.contents.starts_with("A free-form string describing the unit"));
    let range = info.range.unwrap();
    assert_eq!((range.start_line, range.start_col, range.end_col), (2, 1, 12));
}

#[test]
fn test_hover_section_header_is_empty() {
    let engine = engine();
    assert!(engine.hover(SERVICE, 1, 3).is_none());
    assert!(engine.hover(SERVICE, 5, 4).is_none());
}

#[test]
fn test_hover_value_is_empty() {
    let engine = engine();
    assert!(engine.hover(SERVICE, 6, 8).is_none());
}

#[test]
fn test_hover_exec_setting_in_service() {
    let engine = engine();
    let info = engine.hover(SERVICE, 8, 3).unwrap();
    let expected = &engine
        .knowledge()
        .settings("Service")
        .unwrap()
        .get("WorkingDirectory")
        .unwrap()
        .doc;
    assert_eq!(&info.contents, expected);
}

#[test]
fn test_repeated_requests_agree() {
    let engine = engine();
    let first = engine.complete(SERVICE, 6, 6);
    let second = engine.complete(SERVICE, 6, 6);
    assert_eq!(first.labels(), second.labels());
}

// =============================================================================
// Custom catalogs
// =============================================================================

#[test]
fn test_engine_from_catalog_file() {
    let dir = tempfile::TempDir::new().unwrap();
    let path = dir.path().join("units.yaml");
    std::fs::write(
        &path,
        r#"
groups:
  common:
    - name: Enabled
      doc: Whether the widget runs
      choices: ["yes", "no"]
sections:
  - name: Widget
    doc: Widget options
    include: [common]
    settings:
      - name: Speed
        doc: How fast
"#,
    )
    .unwrap();

    let engine = Engine::load(&path).unwrap();
    assert_eq!(engine.complete("[", 1, 2).labels(), vec!["Widget"]);
    assert_eq!(engine.complete("[Widget]\n", 2, 1).labels(), vec!["Enabled", "Speed"]);
    assert_eq!(engine.complete("[Widget]\nEnabled=", 2, 9).labels(), vec!["yes", "no"]);
    assert_eq!(engine.hover("[Widget]\nSpeed=3", 2, 2).unwrap().contents, "How fast");
}
