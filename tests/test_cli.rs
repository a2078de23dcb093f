use std::fs;
use std::process::{Command, Output};

mod common;

fn presort(args: &[&str]) -> Result<Output, anyhow::Error> {
    let output = Command::new(env!("CARGO_BIN_EXE_presort")).args(args).output()?;
    Ok(output)
}

#[test]
fn test_cli_merge() -> Result<(), anyhow::Error> {
    common::setup();
    let output_path = common::temp_file_name("./target/results/");
    let output_name = output_path.to_string_lossy().to_string();

    let output = presort(&["merge", "./tests/fixtures/left-id.csv", "./tests/fixtures/right-id.csv", &output_name, "id"])?;
    assert!(output.status.success());
    let stdout = String::from_utf8(output.stdout)?;
    assert!(stdout.starts_with(&format!("out: {}\ndup: 1\nmerge: ", output_name)));
    assert_eq!(
        fs::read_to_string(&output_path)?,
        "1,a,b,2020-01-01\n2,a,b,2020-01-01\n3,a,b,2020-06-01\n"
    );
    fs::remove_file(output_path)?;
    Ok(())
}

#[test]
fn test_cli_check_exit_code() -> Result<(), anyhow::Error> {
    let output = presort(&["check", "id", "./tests/fixtures/left-id.csv"])?;
    assert_eq!(output.status.code(), Some(0));
    assert_eq!(String::from_utf8(output.stdout)?, "sorted\n");

    let output = presort(&["check", "id", "./tests/fixtures/unsorted.csv"])?;
    assert_eq!(output.status.code(), Some(1));
    assert_eq!(String::from_utf8(output.stdout)?, "not sorted\n");
    Ok(())
}

#[test]
fn test_cli_missing_input() -> Result<(), anyhow::Error> {
    common::setup();
    let output_path = common::temp_file_name("./target/results/");
    let output_name = output_path.to_string_lossy().to_string();

    let output = presort(&["merge", "./tests/fixtures/no-such-file.csv", "./tests/fixtures/right-id.csv", &output_name, "id"])?;
    assert!(!output.status.success());
    let stderr = String::from_utf8(output.stderr)?;
    assert!(stderr.contains("Failed to open ./tests/fixtures/no-such-file.csv"));
    assert!(!output_path.exists());
    Ok(())
}

#[test]
fn test_cli_unknown_key_mode() -> Result<(), anyhow::Error> {
    let output = presort(&["check", "a_id", "./tests/fixtures/left-id.csv"])?;
    assert_eq!(output.status.code(), Some(2));
    assert!(String::from_utf8(output.stderr)?.contains("Unknown key mode 'a_id'"));
    Ok(())
}

#[test]
fn test_cli_detect_key() -> Result<(), anyhow::Error> {
    let output = presort(&["detect-key", "./tests/fixtures/schema-id-b-a.sql"])?;
    assert!(output.status.success());
    assert_eq!(String::from_utf8(output.stdout)?, "id_b_a\n");
    Ok(())
}
