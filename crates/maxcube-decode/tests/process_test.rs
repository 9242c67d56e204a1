//! Tests for the line processing loop behind the CLI.

use std::io::Cursor;

use base64::engine::general_purpose::STANDARD;
use base64::Engine as _;

use maxcube_decode::{process, CliConfig, OutputFormat, Summary};

fn shutter_contact(address: &str, embedded: [u8; 3]) -> String {
    let mut bytes = vec![19u8];
    bytes.extend_from_slice(&embedded);
    bytes.extend_from_slice(&[4, 0, 0, 0]);
    bytes.extend_from_slice(b"ABCDEFGHIJ");
    bytes.extend_from_slice(&[0x00, 0x12]);
    format!("C:{},{}", address, STANDARD.encode(&bytes))
}

fn run(input: &str, config: &CliConfig) -> (Summary, String) {
    let mut out = Vec::new();
    let summary = process(Cursor::new(input), config, &mut out).expect("process should succeed");
    (summary, String::from_utf8(out).expect("output should be UTF-8"))
}

#[test]
fn test_json_output() {
    let config = CliConfig {
        format: OutputFormat::Json,
        ..CliConfig::default()
    };
    let (summary, out) = run(&shutter_contact("1a2b3c", [0x1A, 0x2B, 0x3C]), &config);

    assert_eq!(
        summary,
        Summary {
            decoded: 1,
            failed: 0,
            with_diagnostics: 0
        }
    );

    let value: serde_json::Value = serde_json::from_str(out.trim()).expect("valid JSON");
    assert_eq!(value["rf_address"], "1a2b3c");
    assert_eq!(value["serial_number"], "ABCDEFGHIJ");
    assert_eq!(value["device_kind"], "ShutterContact");
    assert_eq!(value["device_data"], "0012");
    assert!(value["thermostat"].is_null());
    assert!(value["program"].is_null());
    assert_eq!(value["diagnostics"].as_array().map(Vec::len), Some(0));
}

#[test]
fn test_text_output_and_blank_lines() {
    let input = format!(
        "\n{}\n\n{}\n",
        shutter_contact("1A2B3C", [0x1A, 0x2B, 0x3C]),
        shutter_contact("1A2B3C", [0x1A, 0x2B, 0x3D])
    );
    let (summary, out) = run(&input, &CliConfig::default());

    assert_eq!(summary.decoded, 2);
    assert_eq!(summary.with_diagnostics, 1);
    assert_eq!(out.matches("=== C Message ===").count(), 2);
    assert!(out.contains("wrong RF address: expected 1A2B3C, actual 1A2B3D"));
    assert!(!summary.is_failure(false));
    assert!(summary.is_failure(true));
}

#[test]
fn test_bad_lines_are_counted() {
    let input = format!(
        "C:1A2B3C,@@@@\nL:AAAA\n{}\n",
        shutter_contact("1A2B3C", [0x1A, 0x2B, 0x3C])
    );
    let (summary, out) = run(&input, &CliConfig::default());

    assert_eq!(summary.decoded, 1);
    assert_eq!(summary.failed, 2);
    assert!(summary.is_failure(false));
    assert_eq!(out.matches("=== C Message ===").count(), 1);
}

#[test]
fn test_bare_payload_with_custom_delimiter() {
    let line = shutter_contact("1A2B3C", [0x1A, 0x2B, 0x3C])
        .trim_start_matches("C:")
        .replacen(',', ";", 1);
    let mut config = CliConfig::default();
    config.decoder.delimiter = ';';

    let (summary, out) = run(&line, &config);
    assert_eq!(summary.decoded, 1);
    assert!(out.contains("SerialNumber:         ABCDEFGHIJ"));
}

#[test]
fn test_other_message_types_are_rejected() {
    let input = format!(
        "S:00,AAAA\nH:0a1b2c,AAAA\n{}\n",
        shutter_contact("1A2B3C", [0x1A, 0x2B, 0x3C])
    );
    let config = CliConfig {
        format: OutputFormat::Json,
        ..CliConfig::default()
    };
    let (summary, out) = run(&input, &config);

    assert_eq!(
        summary,
        Summary {
            decoded: 1,
            failed: 2,
            with_diagnostics: 0
        }
    );
    assert_eq!(out.lines().count(), 1);
    assert!(!out.contains("S:00"));
}
