use crate::common::fake_host::FakeHost;
use crate::common::scripted_rc::ScriptedRc;
use rtags_bridge::config::Config;
use rtags_bridge::host::CursorPosition;
use rtags_bridge::{RtagsError, RtagsPlugin};

const MAIN: &str = "/src/main.cpp";
const TEXT: &str = "int main() {\n  Widget w;\n  w.dr\n}";

const RESPONSE: &str = r#"{"completions":[
    {"completion":"draw","signature":"void draw()","kind":"CXXMethod"},
    {"completion":"drag_state","signature":"int drag_state","kind":"FieldDecl"},
    {"completion":"DRAW_ALL","signature":"","kind":"macro definition"},
    {"completion":"dragon","signature":"","kind":"NamespaceAlias"}
]}"#;

#[test]
fn test_find_start_is_start_of_word() {
    let plugin = RtagsPlugin::new(Config::default(), ScriptedRc::new());
    let host = FakeHost::with_buffer(MAIN, TEXT, CursorPosition::new(3, 6));

    assert_eq!(plugin.complete_find_start(&host), 4);
}

#[test]
fn test_find_start_after_non_word() {
    let plugin = RtagsPlugin::new(Config::default(), ScriptedRc::new());
    let host = FakeHost::with_buffer(MAIN, "  w.", CursorPosition::new(1, 4));

    assert_eq!(plugin.complete_find_start(&host), 4);
}

#[test]
fn test_complete_sends_unsaved_buffer() {
    let rc = ScriptedRc::new().on("--synchronous-completions", RESPONSE);
    let plugin = RtagsPlugin::new(Config::default(), rc);
    let host = FakeHost::with_buffer(MAIN, TEXT, CursorPosition::new(3, 4));

    let result = plugin.complete(&host, "dr").unwrap();

    let calls = plugin.runner().calls();
    assert_eq!(calls.len(), 1);
    assert_eq!(
        calls[0].args,
        vec![
            "--synchronous-completions",
            "-l",
            "/src/main.cpp:3:7",
            "--unsaved-file=/src/main.cpp:33",
            "--json",
            "--code-complete-prefix",
            "dr",
        ]
    );
    assert_eq!(calls[0].input.as_deref(), Some(TEXT));

    assert_eq!(result.refresh, "always");
    let words: Vec<(&str, &str)> = result
        .words
        .iter()
        .map(|w| (w.word.as_str(), w.kind.as_str()))
        .collect();
    assert_eq!(
        words,
        vec![
            ("draw", "m"),
            ("drag_state", "v"),
            ("DRAW_ALL", "d"),
            ("dragon", ""),
        ]
    );
}

#[test]
fn test_complete_without_base_omits_prefix() {
    let rc = ScriptedRc::new().on("--synchronous-completions", r#"{"completions":[]}"#);
    let plugin = RtagsPlugin::new(Config::default(), rc);
    let host = FakeHost::with_buffer(MAIN, "  w.", CursorPosition::new(1, 4));

    let result = plugin.complete(&host, "").unwrap();

    assert!(result.words.is_empty());
    let args = &plugin.runner().calls()[0].args;
    assert_eq!(args[2], "/src/main.cpp:1:5");
    assert!(!args.iter().any(|a| a == "--code-complete-prefix"));
}

#[test]
fn test_complete_failure_is_tool_error() {
    let rc = ScriptedRc::new().fail_on("--synchronous-completions", 1, "", "no project");
    let plugin = RtagsPlugin::new(Config::default(), rc);
    let host = FakeHost::with_buffer(MAIN, TEXT, CursorPosition::new(3, 4));

    let err = plugin.complete(&host, "dr").unwrap_err();

    assert!(matches!(err, RtagsError::ToolInvocation { status: 1, .. }));
}
