use crate::common::fake_host::{FakeHost, HostEvent};
use crate::common::scripted_rc::ScriptedRc;
use rtags_bridge::config::Config;
use rtags_bridge::host::CursorPosition;
use rtags_bridge::RtagsPlugin;

const MAIN: &str = "/src/main.cpp";
const HEADER: &str = "/src/widget.h";

const REFERENCES: &str = r#"[
    {"loc":"/src/widget.h:2:8:","ctx":"  void draw();"},
    {"loc":"/src/main.cpp:2:5:","ctx":"  w.draw(); w.draw();"},
    {"loc":"/src/main.cpp:2:15:","ctx":"  w.draw(); w.draw();"}
]"#;

fn setup(answers: &[usize]) -> (RtagsPlugin<ScriptedRc>, FakeHost) {
    let rc = ScriptedRc::new().on("--rename", REFERENCES);
    let plugin = RtagsPlugin::new(Config::default(), rc);
    let mut host = FakeHost::with_buffer(
        MAIN,
        "int main() {\n  w.draw(); w.draw();\n}",
        CursorPosition::new(2, 4),
    );
    host.add_buffer(HEADER, "struct Widget {\n  void draw();\n};");
    host.inputs.push_back("render".to_string());
    host.confirm_answers.extend(answers.iter().copied());
    (plugin, host)
}

fn replace(file: &str, line: usize, column: usize) -> HostEvent {
    HostEvent::Replace {
        file: file.to_string(),
        line,
        column,
        text: "render".to_string(),
    }
}

fn confirm(file: &str) -> HostEvent {
    HostEvent::Confirm(format!("Rename in {file}"))
}

#[test]
fn test_rename_yes_yes_edits_bottom_up_and_saves_per_file() {
    let (plugin, mut host) = setup(&[1, 1]);

    let outcome = plugin.rename_symbol(&mut host).unwrap();

    assert_eq!(
        plugin.runner().call_args(),
        vec![vec![
            "--absolute-path".to_string(),
            "-r".to_string(),
            "/src/main.cpp:2:5".to_string(),
            "-e".to_string(),
            "--rename".to_string(),
            "--json".to_string(),
        ]]
    );
    assert_eq!(
        host.events,
        vec![
            HostEvent::Input("New name: ".to_string()),
            HostEvent::Save(MAIN.to_string()),
            confirm(MAIN),
            replace(MAIN, 2, 14),
            replace(MAIN, 2, 4),
            HostEvent::Save(MAIN.to_string()),
            confirm(HEADER),
            HostEvent::Open(HEADER.to_string()),
            replace(HEADER, 2, 7),
            HostEvent::Save(HEADER.to_string()),
        ]
    );
    assert_eq!(host.text(MAIN), "int main() {\n  w.render(); w.render();\n}");
    assert_eq!(host.text(HEADER), "struct Widget {\n  void render();\n};");
    assert_eq!(outcome.files_renamed, 2);
    assert_eq!(outcome.edits_applied, 3);
    assert!(!outcome.cancelled);
}

#[test]
fn test_rename_cancel_saves_once_and_stops() {
    let (plugin, mut host) = setup(&[4]);

    let outcome = plugin.rename_symbol(&mut host).unwrap();

    assert_eq!(
        host.events,
        vec![
            HostEvent::Input("New name: ".to_string()),
            HostEvent::Save(MAIN.to_string()),
            confirm(MAIN),
            HostEvent::Save(MAIN.to_string()),
        ]
    );
    assert_eq!(host.text(MAIN), "int main() {\n  w.draw(); w.draw();\n}");
    assert!(outcome.cancelled);
    assert_eq!(outcome.edits_applied, 0);
}

#[test]
fn test_rename_yes_to_all_asks_once() {
    let (plugin, mut host) = setup(&[2]);

    let outcome = plugin.rename_symbol(&mut host).unwrap();

    let confirms = host
        .events
        .iter()
        .filter(|e| matches!(e, HostEvent::Confirm(_)))
        .count();
    assert_eq!(confirms, 1);
    assert_eq!(host.saves(), vec![MAIN, MAIN, HEADER]);
    assert_eq!(outcome.files_renamed, 2);
}

#[test]
fn test_rename_no_skips_file() {
    let (plugin, mut host) = setup(&[3, 1]);

    let outcome = plugin.rename_symbol(&mut host).unwrap();

    assert_eq!(host.text(MAIN), "int main() {\n  w.draw(); w.draw();\n}");
    assert_eq!(host.text(HEADER), "struct Widget {\n  void render();\n};");
    assert_eq!(outcome.files_skipped, 1);
    assert_eq!(outcome.files_renamed, 1);
}

#[test]
fn test_rename_dismissed_prompt_cancels() {
    let (plugin, mut host) = setup(&[]);

    let outcome = plugin.rename_symbol(&mut host).unwrap();

    assert!(outcome.cancelled);
    assert_eq!(host.saves(), vec![MAIN, MAIN]);
}

#[test]
fn test_rename_empty_name_does_nothing() {
    let (plugin, mut host) = setup(&[1, 1]);
    host.inputs.clear();

    let outcome = plugin.rename_symbol(&mut host).unwrap();

    assert!(plugin.runner().calls().is_empty());
    assert_eq!(host.events, vec![HostEvent::Input("New name: ".to_string())]);
    assert_eq!(outcome.edits_applied, 0);
}
