//! Tests for startup-shortcut creation and removal.

use wordtoast::startup::{remove_shortcut, shortcut_contents, shortcut_file_name, write_shortcut};

#[test]
fn shortcut_file_name_has_url_extension() {
    assert_eq!(shortcut_file_name("WordToast"), "WordToast.url");
}

#[test]
fn contents_are_an_internet_shortcut_with_forward_slashes() {
    let contents = shortcut_contents(r"C:\Program Files\WordToast\wordtoast.exe");
    assert_eq!(
        contents,
        "[InternetShortcut]\r\nURL=file:///C:/Program Files/WordToast/wordtoast.exe\r\n"
    );
}

#[test]
fn write_then_remove_round_trip() {
    let dir = tempfile::tempdir().expect("tempdir");

    let path = write_shortcut(dir.path(), "WordToast", r"C:\Apps\wordtoast.exe").expect("write");
    assert!(path.exists());
    assert_eq!(path.file_name().unwrap(), "WordToast.url");

    let written = std::fs::read_to_string(&path).expect("read back");
    assert!(written.starts_with("[InternetShortcut]\r\n"));
    assert!(written.contains("URL=file:///C:/Apps/wordtoast.exe"));

    remove_shortcut(dir.path(), "WordToast").expect("remove");
    assert!(!path.exists());
}

#[test]
fn rewriting_overwrites_in_place() {
    let dir = tempfile::tempdir().expect("tempdir");

    write_shortcut(dir.path(), "WordToast", r"C:\old\wordtoast.exe").expect("first write");
    let path = write_shortcut(dir.path(), "WordToast", r"C:\new\wordtoast.exe").expect("rewrite");

    let written = std::fs::read_to_string(path).expect("read back");
    assert!(written.contains("C:/new/wordtoast.exe"));
    assert!(!written.contains("C:/old/"));
}

#[test]
fn removing_a_missing_shortcut_is_not_an_error() {
    let dir = tempfile::tempdir().expect("tempdir");
    assert!(remove_shortcut(dir.path(), "WordToast").is_ok());
}
