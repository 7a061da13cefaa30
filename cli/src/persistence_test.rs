use super::*;
use api::testkit;

fn scratch(name: &str) -> PathBuf {
    std::env::temp_dir().join(format!("instashare-cli-{}-{name}", std::process::id())).join(SESSION_FILE_NAME)
}

#[test]
fn save_then_load_returns_the_session() {
    let store = FilePersistence::new(scratch("roundtrip"));
    let session = testkit::session("u1", "a@example.com");
    store.save(&session);
    assert_eq!(store.load(), Some(session));
    store.clear();
    assert_eq!(store.load(), None);
}

#[test]
fn load_without_file_is_none() {
    let store = FilePersistence::new(scratch("missing"));
    assert_eq!(store.load(), None);
}

#[test]
fn clear_without_file_is_quiet() {
    let store = FilePersistence::new(scratch("clear-missing"));
    store.clear();
    assert!(!store.path().exists());
}

#[test]
fn corrupt_file_loads_as_signed_out() {
    let path = scratch("corrupt");
    fs::create_dir_all(path.parent().expect("parent")).expect("dir");
    fs::write(&path, "{not json").expect("write");
    assert_eq!(FilePersistence::new(&path).load(), None);
    fs::remove_file(&path).expect("cleanup");
}

#[test]
fn default_path_lives_under_home() {
    assert_eq!(
        default_session_path(Some("/home/ada")),
        PathBuf::from("/home/ada/.instashare/session.json")
    );
    assert_eq!(default_session_path(None), PathBuf::from(".instashare/session.json"));
    assert_eq!(default_session_path(Some("")), PathBuf::from(".instashare/session.json"));
}
