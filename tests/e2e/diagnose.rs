use crate::common::fake_host::{FakeHost, HostEvent};
use crate::common::scripted_rc::ScriptedRc;
use rtags_bridge::config::Config;
use rtags_bridge::host::CursorPosition;
use rtags_bridge::model::diagnostics::SignKind;
use rtags_bridge::{MalformedOutput, RtagsError, RtagsPlugin};

const MAIN: &str = "/src/main.cpp";

fn config() -> Config {
    Config {
        diagnose_settle_ms: 0,
        ..Config::default()
    }
}

fn host() -> FakeHost {
    FakeHost::with_buffer(MAIN, "int main() { Widget w; }\n", CursorPosition::new(1, 0))
}

const REPORT: &str = r#"{"checkStyle":{"/src/main.cpp":[
    {"type":"error","message":"/src/main.cpp:1:14: error: Issue: unknown type name 'Widget'","line":1,"column":14},
    {"type":"skipped","message":"","line":1,"column":1},
    {"type":"warning","message":"/src/main.cpp:1:21: warning: Issue: unused variable 'w'","line":1,"column":21},
    {"type":"fixit","message":"replace with 'Window'","line":1,"column":14}
]}}"#;

#[test]
fn test_diagnose_places_signs_and_quickfix() {
    let rc = ScriptedRc::new().on("--diagnose", REPORT);
    let plugin = RtagsPlugin::new(config(), rc);
    let mut host = host();

    plugin.diagnose(&mut host).unwrap();

    assert_eq!(
        plugin.runner().call_args(),
        vec![vec![
            "--diagnose".to_string(),
            MAIN.to_string(),
            "--synchronous-diagnostics".to_string(),
            "--json".to_string(),
        ]]
    );

    assert_eq!(host.events[0], HostEvent::UnplaceAllSigns);
    assert_eq!(host.events[1], HostEvent::Save(MAIN.to_string()));

    let placed: Vec<(usize, SignKind)> = host
        .events
        .iter()
        .filter_map(|e| match e {
            HostEvent::PlaceSign { id, kind, .. } => Some((*id, *kind)),
            _ => None,
        })
        .collect();
    // The skipped entry keeps its slot, so ids jump from 1 to 3
    assert_eq!(
        placed,
        vec![(1, SignKind::Error), (3, SignKind::Warning), (4, SignKind::FixIt)]
    );

    let entries = host.last_quickfix().unwrap();
    assert_eq!(entries.len(), 3);
    assert_eq!(entries[0].text, "unknown type name 'Widget'");
    assert_eq!(entries[0].kind, Some('E'));
    assert_eq!(entries[0].nr, Some(1));
    assert_eq!(entries[1].text, "unused variable 'w'");
    assert_eq!(entries[1].kind, Some('W'));
    assert_eq!(entries[2].text, "replace with 'Window'");
    assert_eq!(entries[2].kind, Some('W'));
}

#[test]
fn test_diagnose_defines_signs_before_placing() {
    let rc = ScriptedRc::new().on("--diagnose", REPORT);
    let plugin = RtagsPlugin::new(config(), rc);
    let mut host = host();

    plugin.diagnose(&mut host).unwrap();

    let first_place = host
        .events
        .iter()
        .position(|e| matches!(e, HostEvent::PlaceSign { .. }))
        .unwrap();
    let defined = host.events[..first_place]
        .iter()
        .filter(|e| matches!(e, HostEvent::DefineSign(_)))
        .count();
    assert_eq!(defined, SignKind::ALL.len());
}

#[test]
fn test_clean_file_closes_quickfix() {
    let rc = ScriptedRc::new().on("--diagnose", r#"{"checkStyle":{"/src/main.cpp":null}}"#);
    let plugin = RtagsPlugin::new(config(), rc);
    let mut host = host();

    plugin.diagnose(&mut host).unwrap();

    assert_eq!(host.events.last(), Some(&HostEvent::CloseQuickfix));
    assert!(host.last_quickfix().is_none());
}

#[test]
fn test_only_skipped_entries_closes_quickfix() {
    let rc = ScriptedRc::new().on(
        "--diagnose",
        r#"{"checkStyle":{"/src/main.cpp":[{"type":"skipped","message":"","line":1,"column":1}]}}"#,
    );
    let plugin = RtagsPlugin::new(config(), rc);
    let mut host = host();

    plugin.diagnose(&mut host).unwrap();

    assert_eq!(host.events.last(), Some(&HostEvent::CloseQuickfix));
}

#[test]
fn test_two_files_is_unexpected_shape() {
    let rc = ScriptedRc::new().on(
        "--diagnose",
        r#"{"checkStyle":{"/src/main.cpp":null,"/src/other.cpp":null}}"#,
    );
    let plugin = RtagsPlugin::new(config(), rc);
    let mut host = host();

    let err = plugin.diagnose(&mut host).unwrap_err();

    assert!(matches!(
        err,
        RtagsError::Malformed(MalformedOutput::UnexpectedShape(_))
    ));
    assert!(host.last_quickfix().is_none());
}

#[test]
fn test_report_for_other_file_is_rejected() {
    let rc = ScriptedRc::new().on("--diagnose", r#"{"checkStyle":{"/src/other.cpp":[]}}"#);
    let plugin = RtagsPlugin::new(config(), rc);
    let host = host();

    let err = plugin.file_diagnostics(&host).unwrap_err();

    assert!(matches!(
        err,
        RtagsError::Malformed(MalformedOutput::UnexpectedShape(_))
    ));
}
