//! Tests for HostService against real config files

use std::fs;

use tempfile::TempDir;

use sshalias::application::ApplicationError;
use sshalias::domain::{DeleteSummary, DomainError};
use sshalias::util::testing::{host_service, init_test_setup, write_ssh_config};

const CONFIG: &str = "\
Host web
    HostName 10.0.0.1
    User alice
    Port 22

Host db
    HostName 10.0.0.2
    User bob
    Port 22
";

fn aliases_in(content: &str) -> Vec<String> {
    content
        .lines()
        .filter_map(|l| l.strip_prefix("Host "))
        .map(str::to_string)
        .collect()
}

// ============================================================
// load()
// ============================================================

#[test]
fn given_missing_file_when_loading_then_returns_empty_config() {
    init_test_setup();
    let temp = TempDir::new().unwrap();
    let service = host_service(&temp.path().join("config"));

    let config = service.load().unwrap();

    assert_eq!(config.host_count(), 0);
}

#[test]
fn given_unparsable_file_when_loading_then_fails_loudly() {
    let temp = TempDir::new().unwrap();
    let path = write_ssh_config(temp.path(), "Host web\n    Port nope\n");
    let service = host_service(&path);

    let err = service.load().unwrap_err();

    assert!(matches!(err, ApplicationError::InvalidConfig { .. }));
    assert!(err.to_string().contains("line 2"));
}

// ============================================================
// list()
// ============================================================

#[test]
fn given_terms_when_listing_then_or_matches_across_fields() {
    let temp = TempDir::new().unwrap();
    let path = write_ssh_config(temp.path(), CONFIG);
    let service = host_service(&path);

    let alice = service.list(&["alice".into()]).unwrap();
    let port = service.list(&["22".into()]).unwrap();
    let all = service.list(&[]).unwrap();
    let either = service.list(&["db".into(), "10.0.0.1".into()]).unwrap();

    assert_eq!(alice.len(), 1);
    assert_eq!(alice[0].aliases, vec!["web"]);
    assert_eq!(port.len(), 2);
    assert_eq!(all.len(), 2);
    assert_eq!(either.len(), 2);
    assert_eq!(either[0].aliases, vec!["web"], "file order is kept");
}

// ============================================================
// add()
// ============================================================

#[test]
fn given_new_alias_when_adding_then_appends_entry_to_file() {
    let temp = TempDir::new().unwrap();
    let path = write_ssh_config(temp.path(), CONFIG);
    let service = host_service(&path);

    let added = service.add("cache", "root@10.0.0.3:2222").unwrap();

    assert_eq!(added.user.as_deref(), Some("root"));
    let content = fs::read_to_string(&path).unwrap();
    assert_eq!(aliases_in(&content), vec!["web", "db", "cache"]);
    assert!(content.ends_with("Host cache\n    HostName 10.0.0.3\n    User root\n    Port 2222\n"));
}

#[test]
fn given_missing_file_when_adding_then_creates_it() {
    let temp = TempDir::new().unwrap();
    let path = temp.path().join("ssh").join("config");
    let service = host_service(&path);

    service.add("web", "example.com").unwrap();

    assert_eq!(
        fs::read_to_string(&path).unwrap(),
        "Host web\n    HostName example.com\n"
    );
}

#[test]
fn given_existing_alias_when_adding_then_file_is_untouched() {
    let temp = TempDir::new().unwrap();
    let original = "Host web\n  hostname=10.0.0.1\n";
    let path = write_ssh_config(temp.path(), original);
    let service = host_service(&path);

    let err = service.add("web", "10.9.9.9").unwrap_err();

    assert!(matches!(
        err,
        ApplicationError::Domain(DomainError::AliasExists(ref a)) if a == "web"
    ));
    assert_eq!(fs::read_to_string(&path).unwrap(), original);
}

#[test]
fn given_invalid_host_string_when_adding_then_config_is_not_read() {
    let temp = TempDir::new().unwrap();
    // unparsable on purpose: validation must fail first
    let path = write_ssh_config(temp.path(), "Host\n");
    let service = host_service(&path);

    let err = service.add("web", "root@:22").unwrap_err();

    assert!(matches!(
        err,
        ApplicationError::Domain(DomainError::InvalidHostSpec { .. })
    ));
}

// ============================================================
// update()
// ============================================================

#[test]
fn given_update_when_called_then_reports_not_implemented() {
    let temp = TempDir::new().unwrap();
    let path = write_ssh_config(temp.path(), CONFIG);
    let service = host_service(&path);

    let err = service.update().unwrap_err();

    assert!(matches!(err, ApplicationError::NotImplemented("update")));
    assert_eq!(fs::read_to_string(&path).unwrap(), CONFIG);
}

// ============================================================
// delete()
// ============================================================

#[test]
fn given_one_unknown_alias_when_deleting_then_file_is_unchanged() {
    let temp = TempDir::new().unwrap();
    let path = write_ssh_config(temp.path(), CONFIG);
    let service = host_service(&path);

    let err = service
        .delete(&["web".into(), "ghost".into(), "db".into()])
        .unwrap_err();

    assert!(matches!(
        err,
        ApplicationError::Domain(DomainError::AliasNotFound(ref a)) if a == "ghost"
    ));
    assert_eq!(fs::read_to_string(&path).unwrap(), CONFIG);
}

#[test]
fn given_single_alias_entry_when_deleting_alias_then_entry_disappears() {
    let temp = TempDir::new().unwrap();
    let path = write_ssh_config(temp.path(), CONFIG);
    let service = host_service(&path);

    let summary = service.delete(&["db".into()]).unwrap();

    assert_eq!(summary, DeleteSummary { aliases: 1, entries: 1 });
    let content = fs::read_to_string(&path).unwrap();
    assert_eq!(aliases_in(&content), vec!["web"]);
    assert!(!content.contains("10.0.0.2"));
}

#[test]
fn given_multi_alias_entry_when_deleting_one_alias_then_entry_keeps_the_rest() {
    let temp = TempDir::new().unwrap();
    let path = write_ssh_config(temp.path(), "Host web www\n    HostName 10.0.0.1\n");
    let service = host_service(&path);

    service.delete(&["web".into()]).unwrap();

    assert_eq!(
        fs::read_to_string(&path).unwrap(),
        "Host www\n    HostName 10.0.0.1\n"
    );
}

#[test]
fn given_comment_above_next_host_when_deleting_previous_then_comment_survives() {
    let temp = TempDir::new().unwrap();
    let path = write_ssh_config(
        temp.path(),
        "Host a\n    HostName x\n\n# Work servers: keep this note\nHost b\n    HostName y\n",
    );
    let service = host_service(&path);

    service.delete(&["a".into()]).unwrap();

    assert_eq!(
        fs::read_to_string(&path).unwrap(),
        "# Work servers: keep this note\nHost b\n    HostName y\n"
    );
}

// ============================================================
// rename()
// ============================================================

#[test]
fn given_alias_in_middle_when_renaming_then_position_is_kept() {
    let temp = TempDir::new().unwrap();
    let path = write_ssh_config(temp.path(), "Host db web cache\n    HostName 10.0.0.1\n");
    let service = host_service(&path);

    let renamed = service.rename("web", "web2").unwrap();

    assert_eq!(renamed.aliases, vec!["db", "web2", "cache"]);
    assert!(fs::read_to_string(&path)
        .unwrap()
        .starts_with("Host db web2 cache\n"));
}

#[test]
fn given_comment_above_host_when_renaming_it_then_comment_stays_above() {
    let temp = TempDir::new().unwrap();
    let path = write_ssh_config(
        temp.path(),
        "Host a\n    HostName x\n\n# Work servers: keep this note\nHost b\n    HostName y\n",
    );
    let service = host_service(&path);

    service.rename("b", "c").unwrap();

    assert_eq!(
        fs::read_to_string(&path).unwrap(),
        "Host a\n    HostName x\n\n# Work servers: keep this note\nHost c\n    HostName y\n"
    );
}

#[test]
fn given_taken_new_alias_when_renaming_then_fails_without_writing() {
    let temp = TempDir::new().unwrap();
    let path = write_ssh_config(temp.path(), CONFIG);
    let service = host_service(&path);

    let taken = service.rename("web", "db").unwrap_err();
    let unknown = service.rename("ghost", "spirit").unwrap_err();

    assert!(matches!(
        taken,
        ApplicationError::Domain(DomainError::NewAliasExists(_))
    ));
    assert!(matches!(
        unknown,
        ApplicationError::Domain(DomainError::OldAliasNotFound(_))
    ));
    assert_eq!(fs::read_to_string(&path).unwrap(), CONFIG);
}

// ============================================================
// backup()
// ============================================================

#[test]
fn given_malformed_config_when_backing_up_then_copies_bytes_verbatim() {
    let temp = TempDir::new().unwrap();
    let path = temp.path().join("config");
    let content: &[u8] = b"Host\n\tPort ???\n\xff\xfe not utf8\r\nMatch\n";
    fs::write(&path, content).unwrap();
    let dest = temp.path().join("config.bak");
    let service = host_service(&path);

    let bytes = service.backup(&dest).unwrap();

    assert_eq!(bytes, content.len() as u64);
    assert_eq!(fs::read(&dest).unwrap(), content);
}

#[test]
fn given_missing_config_when_backing_up_then_fails() {
    let temp = TempDir::new().unwrap();
    let service = host_service(&temp.path().join("config"));

    let err = service.backup(&temp.path().join("out")).unwrap_err();

    assert!(matches!(err, ApplicationError::OperationFailed { .. }));
    assert!(!temp.path().join("out").exists());
}

#[test]
fn given_unwritable_destination_when_backing_up_then_fails() {
    let temp = TempDir::new().unwrap();
    let path = write_ssh_config(temp.path(), CONFIG);
    let service = host_service(&path);

    let err = service
        .backup(&temp.path().join("no-such-dir").join("config.bak"))
        .unwrap_err();

    assert!(err.to_string().contains("write backup"));
}

#[cfg(unix)]
#[test]
fn given_restrictive_mode_when_backing_up_then_destination_gets_same_mode() {
    use std::os::unix::fs::PermissionsExt;

    let temp = TempDir::new().unwrap();
    let path = write_ssh_config(temp.path(), CONFIG);
    fs::set_permissions(&path, fs::Permissions::from_mode(0o600)).unwrap();
    let dest = temp.path().join("config.bak");
    let service = host_service(&path);

    service.backup(&dest).unwrap();

    let mode = fs::metadata(&dest).unwrap().permissions().mode() & 0o777;
    assert_eq!(mode, 0o600);
}
