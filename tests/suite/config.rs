//! Config files driving the animation end to end.

use std::io::Write;
use std::time::Duration;

use macterm_config::{ConfigError, MactermConfig};
use macterm_types::{InvalidConfiguration, Line, Typewriter};
use tempfile::NamedTempFile;

use crate::common::run_to_end;

fn write_config(content: &str) -> NamedTempFile {
    let mut file = NamedTempFile::new().unwrap();
    file.write_all(content.as_bytes()).unwrap();
    file
}

fn load(content: &str) -> MactermConfig {
    let file = write_config(content);
    MactermConfig::load_from(file.path()).unwrap().unwrap()
}

#[test]
fn configured_prompt_lines_are_typed_in_order() {
    let config = load(
        r#"
lines = [
  { prompt = "$ ", output = "ls" },
  "done",
]

[typewriter]
delete_effect = false
loop = true
typing_speed_ms = 5
"#,
    );
    let config = config.typewriter_config().unwrap();
    assert_eq!(config.lines()[0], Line::prompt("$ ", "ls"));
    assert_eq!(config.prompt_len(0), 2);
    assert_eq!(config.prompt_len(1), 0);

    let mut tw = Typewriter::new(config);
    assert_eq!(tw.next_delay(), Some(Duration::from_millis(5)));
    let mut texts = Vec::new();
    for _ in 0..10 {
        tw.tick();
        texts.push(tw.displayed().to_string());
    }
    assert_eq!(
        texts,
        ["$", "$ ", "$ l", "$ ls", "", "d", "do", "don", "done", ""].map(String::from)
    );
}

#[test]
fn single_pass_config_terminates() {
    let config = load("lines = [\"ab\", \"c\"]\n");
    let mut tw = Typewriter::new(config.typewriter_config().unwrap());
    let seen = run_to_end(&mut tw, 50);
    assert_eq!(seen.last().map(String::as_str), Some(""));
    assert!(tw.state().is_finished());
    assert_eq!(tw.state().line_index(), 1);
}

#[test]
fn invalid_values_surface_as_configuration_errors() {
    let config = load("lines = [\"x\"]\n\n[typewriter]\ndelete_speed_ms = -25\n");
    let err = config.typewriter_config().unwrap_err();
    assert_eq!(
        err,
        InvalidConfiguration::Duration {
            field: "delete_speed_ms",
            value: -25.0,
        }
    );
    assert!(err.to_string().contains("delete_speed_ms"));
}

#[test]
fn unparsable_file_reports_its_path() {
    let file = write_config("[typewriter\nloop = true\n");
    let err = MactermConfig::load_from(file.path()).unwrap_err();
    assert!(matches!(err, ConfigError::Parse { .. }));
    assert!(err.to_string().contains(&file.path().display().to_string()));
}

#[test]
fn wrong_value_type_is_a_parse_error() {
    let file = write_config("[typewriter]\nloop = \"yes\"\n");
    let err = MactermConfig::load_from(file.path()).unwrap_err();
    assert!(matches!(err, ConfigError::Parse { .. }));
}
