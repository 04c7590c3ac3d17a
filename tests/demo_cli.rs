#![allow(deprecated)]

use assert_cmd::cargo::cargo_bin;
use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::TempDir;

fn clinicdesk_cmd(home: &TempDir) -> Command {
    let mut cmd = Command::new(cargo_bin("clinicdesk"));
    cmd.env("CLINICDESK_HOME", home.path())
        .env("NO_COLOR", "1")
        .env_remove("CLINICDESK_API_URL")
        .env_remove("RUST_LOG")
        .arg("--demo");
    cmd
}

fn login(home: &TempDir, role: &str, token: &str) {
    clinicdesk_cmd(home)
        .args(["login", role, token])
        .assert()
        .success()
        .stdout(predicate::str::contains(format!("Logged in as {}.", role)));
}

#[test]
fn guest_sees_every_doctor_with_login_prompt() {
    let home = TempDir::new().unwrap();

    clinicdesk_cmd(&home)
        .arg("doctors")
        .assert()
        .success()
        .stdout(predicate::str::contains("Emily Adams"))
        .stdout(predicate::str::contains("Rahul Mehta"))
        .stdout(predicate::str::contains("Sofia Lind"))
        .stdout(predicate::str::contains("log in as a patient first"))
        .stdout(predicate::str::contains("delete-doctor").not());

    // naked invocation lists doctors too
    clinicdesk_cmd(&home)
        .assert()
        .success()
        .stdout(predicate::str::contains("Sofia Lind"));
}

#[test]
fn filters_narrow_and_report_no_results() {
    let home = TempDir::new().unwrap();

    clinicdesk_cmd(&home)
        .args(["doctors", "--specialty", "dermatology"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Rahul Mehta"))
        .stdout(predicate::str::contains("Emily Adams").not());

    clinicdesk_cmd(&home)
        .args(["doctors", "--time", "09:00"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Emily Adams"))
        .stdout(predicate::str::contains("Sofia Lind"))
        .stdout(predicate::str::contains("Rahul Mehta").not());

    clinicdesk_cmd(&home)
        .args(["doctors", "--name", "No Name Matches XYZ"])
        .assert()
        .success()
        .stdout(predicate::str::contains(
            "No doctors found with the given filters.",
        ));
}

#[test]
fn admin_deletes_a_doctor() {
    let home = TempDir::new().unwrap();
    login(&home, "admin", "admin-demo-token");

    clinicdesk_cmd(&home)
        .args(["delete-doctor", "2", "--yes"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Doctor deleted."))
        .stdout(predicate::str::contains("Rahul Mehta").not())
        .stdout(predicate::str::contains("Emily Adams"));

    // the demo clinic persists between runs
    clinicdesk_cmd(&home)
        .arg("ls")
        .assert()
        .success()
        .stdout(predicate::str::contains("Rahul Mehta").not())
        .stdout(predicate::str::contains("delete: clinicdesk delete-doctor 1"));
}

#[test]
fn delete_without_confirmation_is_cancelled() {
    let home = TempDir::new().unwrap();
    login(&home, "admin", "admin-demo-token");

    clinicdesk_cmd(&home)
        .args(["delete-doctor", "2"])
        .write_stdin("n\n")
        .assert()
        .success()
        .stdout(predicate::str::contains("Deletion cancelled."));

    clinicdesk_cmd(&home)
        .arg("doctors")
        .assert()
        .success()
        .stdout(predicate::str::contains("Rahul Mehta"));
}

#[test]
fn admin_with_a_wrong_token_cannot_delete() {
    let home = TempDir::new().unwrap();
    login(&home, "admin", "not-the-token");

    clinicdesk_cmd(&home)
        .args(["rm", "1", "-y"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Error deleting doctor."));

    clinicdesk_cmd(&home)
        .arg("doctors")
        .assert()
        .success()
        .stdout(predicate::str::contains("Emily Adams"));
}

#[test]
fn admin_adds_a_doctor() {
    let home = TempDir::new().unwrap();
    login(&home, "admin", "admin-demo-token");

    clinicdesk_cmd(&home)
        .args([
            "add-doctor",
            "--name",
            "Omar Haddad",
            "--email",
            "omar@clinic.org",
            "--specialty",
            "Neurology",
            "--time",
            "08:00-09:00, 16:00-17:00",
        ])
        .assert()
        .success()
        .stdout(predicate::str::contains("Doctor registered."))
        .stdout(predicate::str::contains("Omar Haddad"))
        .stdout(predicate::str::contains("08:00-09:00, 16:00-17:00"));

    clinicdesk_cmd(&home)
        .args([
            "add",
            "--name",
            "Omar Again",
            "--email",
            "omar@clinic.org",
        ])
        .assert()
        .success()
        .stdout(predicate::str::contains("Doctor already exists."));
}

#[test]
fn patient_books_and_guest_is_prompted() {
    let home = TempDir::new().unwrap();

    clinicdesk_cmd(&home)
        .args(["book", "1"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Please log in as a patient to book."));

    login(&home, "patient", "patient-demo-token");
    clinicdesk_cmd(&home)
        .args(["book", "1"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Dr. Emily Adams (Cardiology)"))
        .stdout(predicate::str::contains("Jane Doe <jane.doe@mail.com>"));
}

#[test]
fn expired_patient_session_is_sent_to_login() {
    let home = TempDir::new().unwrap();
    login(&home, "patient", "stale-token");

    clinicdesk_cmd(&home)
        .args(["book", "3"])
        .assert()
        .success()
        .stdout(predicate::str::contains(
            "Session expired. Please log in again.",
        ))
        .stdout(predicate::str::contains("clinicdesk login"));
}

#[test]
fn doctor_sees_todays_appointments() {
    let home = TempDir::new().unwrap();
    login(&home, "doctor", "doctor-demo-token");

    clinicdesk_cmd(&home)
        .arg("appointments")
        .assert()
        .success()
        .stdout(predicate::str::contains("Jane Doe"))
        .stdout(predicate::str::contains("Mark Owens"));

    clinicdesk_cmd(&home)
        .args(["appts", "--patient", "No Name Matches XYZ"])
        .assert()
        .success()
        .stdout(predicate::str::contains("No Appointments found for today."));

    clinicdesk_cmd(&home)
        .args(["appts", "--date", "2001-01-01"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Appointments for 2001-01-01"))
        .stdout(predicate::str::contains("No Appointments found for today."));
}

#[test]
fn appointments_html_fragment_lists_rows() {
    let home = TempDir::new().unwrap();
    login(&home, "doctor", "doctor-demo-token");

    clinicdesk_cmd(&home)
        .args(["--html", "appointments", "--today"])
        .assert()
        .success()
        .stdout(predicate::str::contains("<tr"))
        .stdout(predicate::str::contains("<td>Mark Owens</td>"));
}

#[test]
fn doctor_cards_html_escapes_names() {
    let home = TempDir::new().unwrap();
    login(&home, "admin", "admin-demo-token");

    clinicdesk_cmd(&home)
        .args([
            "add-doctor",
            "--name",
            "A<b>Bold</b>",
            "--email",
            "bold@clinic.org",
        ])
        .assert()
        .success()
        .stdout(predicate::str::contains("Doctor registered."));

    clinicdesk_cmd(&home)
        .args(["--html", "doctors"])
        .assert()
        .success()
        .stdout(predicate::str::contains("<h3>A&lt;b&gt;Bold&lt;"))
        .stdout(predicate::str::contains("<b>Bold</b>").not());
}

#[test]
fn appointments_without_session_report_missing_token() {
    let home = TempDir::new().unwrap();

    clinicdesk_cmd(&home)
        .arg("appointments")
        .assert()
        .success()
        .stdout(predicate::str::contains(
            "Authorization token is missing. Please log in again.",
        ))
        .stdout(predicate::str::contains(
            "Error loading appointments. Try again later.",
        ));
}

#[test]
fn login_whoami_logout() {
    let home = TempDir::new().unwrap();

    clinicdesk_cmd(&home)
        .arg("whoami")
        .assert()
        .success()
        .stdout(predicate::str::contains("guest"));

    login(&home, "doctor", "doctor-demo-token");
    assert!(home.path().join("session.json").exists());

    clinicdesk_cmd(&home)
        .arg("whoami")
        .assert()
        .success()
        .stdout(predicate::str::contains("doctor"))
        .stdout(predicate::str::contains("doctor-demo-token").not());

    clinicdesk_cmd(&home)
        .arg("logout")
        .assert()
        .success()
        .stdout(predicate::str::contains("Logged out."));
    assert!(!home.path().join("session.json").exists());
}

#[test]
fn config_roundtrip_and_validation() {
    let home = TempDir::new().unwrap();

    clinicdesk_cmd(&home)
        .args(["config", "api-url", "https://clinic.example.org/"])
        .assert()
        .success()
        .stdout(predicate::str::contains(
            "api-url set to https://clinic.example.org",
        ));

    clinicdesk_cmd(&home)
        .arg("config")
        .assert()
        .success()
        .stdout(predicate::str::contains("api-url = https://clinic.example.org"))
        .stdout(predicate::str::contains("timeout = 10"));

    clinicdesk_cmd(&home)
        .args(["config", "api-url", "clinic.example.org"])
        .assert()
        .failure()
        .stderr(predicate::str::starts_with("Error:"));

    clinicdesk_cmd(&home)
        .args(["config", "colour", "blue"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Unknown config key: colour"));
}
