use assert_cmd::prelude::*;
use predicates::prelude::*;
use std::process::Command;

#[test]
fn version() -> Result<(), Box<dyn std::error::Error>> {
    let mut cmd = Command::cargo_bin("billdb")?;

    cmd.arg("version");

    cmd.assert()
        .success()
        .stdout(predicate::str::contains(env!("CARGO_PKG_VERSION")));

    Ok(())
}

#[test]
fn detect_serbian_url() -> Result<(), Box<dyn std::error::Error>> {
    let mut cmd = Command::cargo_bin("billdb")?;

    cmd.arg("detect").arg("https://suf.purs.gov.rs/v/?vl=A1U2RVVRSDhUVTZF");

    cmd.assert()
        .success()
        .stdout(predicate::str::diff("serbia\n"));

    Ok(())
}

#[test]
fn detect_russian_qr() -> Result<(), Box<dyn std::error::Error>> {
    let mut cmd = Command::cargo_bin("billdb")?;

    cmd.arg("detect")
        .arg("t=20200924T1837&s=349.00&fn=9289000100408074&i=2795&fp=3826571101&n=1");

    cmd.assert()
        .success()
        .stdout(predicate::str::diff("russia\n"));

    Ok(())
}

#[test]
fn parse_unsupported_input() -> Result<(), Box<dyn std::error::Error>> {
    let dir = tempfile::tempdir()?;
    let mut cmd = Command::cargo_bin("billdb")?;

    cmd.arg("parse")
        .arg("-c")
        .arg(dir.path().join("config.toml"))
        .arg("definitely not a receipt");

    cmd.assert()
        .failure()
        .stderr(predicate::str::contains("UnsupportedFormat"));

    Ok(())
}

#[test]
fn qr_missing_image() -> Result<(), Box<dyn std::error::Error>> {
    let dir = tempfile::tempdir()?;
    let mut cmd = Command::cargo_bin("billdb")?;

    cmd.arg("qr")
        .arg("-c")
        .arg(dir.path().join("config.toml"))
        .arg(dir.path().join("missing.png"));

    cmd.assert()
        .failure()
        .stderr(predicate::str::contains("NotFound"));

    Ok(())
}
