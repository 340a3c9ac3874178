use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::tempdir;

fn bin() -> Command {
    let mut cmd = Command::new(assert_cmd::cargo::cargo_bin!("cipherdesk"));
    cmd.env_remove("CIPHERDESK_KEY");
    cmd
}

fn stdout_of(cmd: &mut Command) -> String {
    let out = cmd.assert().success().get_output().stdout.clone();
    String::from_utf8(out).unwrap().trim_end().to_string()
}

#[test]
fn caesar_encrypt_and_decrypt() {
    bin()
        .args(["encrypt", "-a", "caesar", "-k", "3", "ABC xyz"])
        .assert()
        .success()
        .stdout("DEF abc\n");

    bin()
        .args(["decrypt", "-a", "caesar", "-k", "3", "DEF abc"])
        .assert()
        .success()
        .stdout("ABC xyz\n");
}

#[test]
fn chacha20_roundtrip_with_env_key() {
    let ciphertext = stdout_of(
        bin()
            .env("CIPHERDESK_KEY", "correct horse")
            .args(["encrypt", "hello world"]),
    );
    assert_ne!(ciphertext, "hello world");

    bin()
        .env("CIPHERDESK_KEY", "correct horse")
        .args(["decrypt", &ciphertext])
        .assert()
        .success()
        .stdout("hello world\n");
}

#[test]
fn chacha20_key_from_stdin() {
    let ciphertext = stdout_of(bin().args(["encrypt", "piped"]).write_stdin("k1\n"));

    bin()
        .args(["decrypt", &ciphertext])
        .write_stdin("k1\n")
        .assert()
        .success()
        .stdout("piped\n");
}

#[test]
fn chacha20_without_key_fails() {
    bin()
        .args(["encrypt", "text"])
        .write_stdin("")
        .assert()
        .failure()
        .stderr(predicate::str::contains("no key provided"));
}

#[test]
fn unsupported_algorithm_fails() {
    bin()
        .args(["encrypt", "-a", "rot13", "-k", "1", "text"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("unsupported algorithm"));
}

#[test]
fn encrypt_json_record() {
    let out = stdout_of(bin().args(["encrypt", "-a", "caesar", "-k", "1", "--json", "abc"]));
    let record: serde_json::Value = serde_json::from_str(&out).unwrap();

    assert_eq!(record["type"], "encrypt");
    assert_eq!(record["algorithm"], "caesar");
    assert_eq!(record["input"], "abc");
    assert_eq!(record["output"], "bcd");
}

#[test]
fn generate_respects_length_and_count() {
    let out = stdout_of(bin().args(["generate", "--length", "20", "-n", "3"]));
    let keys: Vec<&str> = out.lines().collect();

    assert_eq!(keys.len(), 3);
    assert!(keys.iter().all(|k| k.chars().count() == 20));
}

#[test]
fn generate_pin_preset() {
    let out = stdout_of(bin().args(["generate", "--preset", "pin"]));
    assert_eq!(out.len(), 6);
    assert!(out.chars().all(|c| c.is_ascii_digit()));
}

#[test]
fn generate_with_no_classes_fails() {
    bin()
        .args([
            "generate",
            "--no-lowercase",
            "--no-uppercase",
            "--no-digits",
            "--no-special",
        ])
        .assert()
        .failure()
        .stderr(predicate::str::contains("at least one character class"));
}

#[test]
fn generate_with_assessment() {
    bin()
        .args(["generate", "--preset", "maximum", "--assess"])
        .assert()
        .success()
        .stdout(predicate::str::contains("210 bits"));
}

#[test]
fn passphrase_has_requested_words() {
    let out = stdout_of(bin().args(["passphrase", "-w", "5", "-s", "."]));
    let words: Vec<&str> = out.split('.').collect();

    assert_eq!(words.len(), 5);
    assert!(words.iter().all(|w| w.chars().next().unwrap().is_uppercase()));
}

#[test]
fn assess_reports_level() {
    bin()
        .args(["assess", "hello"])
        .assert()
        .success()
        .stdout(predicate::str::contains("level:      1 (weak)"))
        .stdout(predicate::str::contains("crack time: instantly"));
}

#[test]
fn assess_json() {
    let out = stdout_of(bin().args(["assess", "--json", "aaaa"]));
    let value: serde_json::Value = serde_json::from_str(&out).unwrap();
    assert_eq!(value["entropy_bits"], 19);
    assert_eq!(value["level"], 1);
    assert_eq!(value["label"], "weak");
    assert_eq!(value["description"], "Unsafe, use a longer key");
    assert_eq!(value["crack_time"], "instantly");
}

#[test]
fn assess_empty_candidate() {
    bin()
        .args(["assess", ""])
        .write_stdin("")
        .assert()
        .success()
        .stdout(predicate::str::contains("level:      0 (no key)"))
        .stdout(predicate::str::contains("score:      0/100"));

    let out = stdout_of(bin().args(["assess", "--json", ""]).write_stdin(""));
    let value: serde_json::Value = serde_json::from_str(&out).unwrap();
    assert_eq!(value["level"], 0);
    assert_eq!(value["label"], "no key");
    assert_eq!(value["score"], 0);
    assert!(value["crack_time"].is_null());
}

#[test]
fn file_roundtrip() {
    let dir = tempdir().unwrap();
    let plain = dir.path().join("plain.txt");
    let enc = dir.path().join("plain.enc");
    let dec = dir.path().join("plain.dec");
    std::fs::write(&plain, "file contents\n".repeat(10_000)).unwrap();

    bin()
        .env("CIPHERDESK_KEY", "pw")
        .arg("encrypt-file")
        .arg(&plain)
        .arg(&enc)
        .args(["--nonce", "000102030405060708090a0b"])
        .assert()
        .success()
        .stdout(predicate::str::contains("encrypted 140000 bytes"));

    assert_ne!(std::fs::read(&enc).unwrap(), std::fs::read(&plain).unwrap());

    bin()
        .env("CIPHERDESK_KEY", "pw")
        .arg("decrypt-file")
        .arg(&enc)
        .arg(&dec)
        .args(["--nonce", "000102030405060708090a0b"])
        .assert()
        .success();

    assert_eq!(std::fs::read(&dec).unwrap(), std::fs::read(&plain).unwrap());
}

#[test]
fn file_output_is_not_overwritten_without_force() {
    let dir = tempdir().unwrap();
    let plain = dir.path().join("a.txt");
    let out = dir.path().join("b.txt");
    std::fs::write(&plain, "a").unwrap();
    std::fs::write(&out, "keep me").unwrap();

    bin()
        .env("CIPHERDESK_KEY", "pw")
        .arg("encrypt-file")
        .arg(&plain)
        .arg(&out)
        .assert()
        .failure()
        .stderr(predicate::str::contains("already exists"));

    assert_eq!(std::fs::read_to_string(&out).unwrap(), "keep me");

    bin()
        .env("CIPHERDESK_KEY", "pw")
        .arg("encrypt-file")
        .arg(&plain)
        .arg(&out)
        .arg("--force")
        .assert()
        .success();
}

#[test]
fn file_with_bad_nonce_fails() {
    let dir = tempdir().unwrap();
    let plain = dir.path().join("a.txt");
    std::fs::write(&plain, "a").unwrap();

    bin()
        .env("CIPHERDESK_KEY", "pw")
        .arg("encrypt-file")
        .arg(&plain)
        .arg(dir.path().join("b"))
        .args(["--nonce", "0102"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("invalid nonce length"));
}

#[test]
fn encrypt_file_confirms_piped_key() {
    let dir = tempdir().unwrap();
    let plain = dir.path().join("a.txt");
    std::fs::write(&plain, "a").unwrap();

    bin()
        .arg("encrypt-file")
        .arg(&plain)
        .arg(dir.path().join("b"))
        .write_stdin("one\ntwo\n")
        .assert()
        .failure()
        .stderr(predicate::str::contains("keys do not match"));
}
