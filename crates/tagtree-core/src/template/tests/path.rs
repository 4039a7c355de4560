use crate::dom::{Document, DomError};
use crate::template::path::{path_of, resolve};

#[test]
fn test_resolve_follows_child_indices() {
    let document = Document::new();
    let root = document.create_fragment();
    let div = document.create_element("div");
    let span = document.create_element("span");
    let text = document.create_text("leaf");
    root.append_child(&document.create_text(" ")).unwrap();
    root.append_child(&div).unwrap();
    div.append_child(&span).unwrap();
    span.append_child(&text).unwrap();

    assert_eq!(resolve(&root, &[]).unwrap(), root);
    assert_eq!(resolve(&root, &[1, 0, 0]).unwrap(), text);
    assert_eq!(path_of(&root, &text), Some(vec![1, 0, 0]));
}

#[test]
fn test_resolve_reports_missing_path() {
    let document = Document::new();
    let root = document.create_fragment();
    root.append_child(&document.create_element("div")).unwrap();

    let err = resolve(&root, &[0, 3]).unwrap_err();
    assert_eq!(err, DomError::PathNotFound { path: vec![0, 3] });
}

#[test]
fn test_path_of_outside_root_is_none() {
    let document = Document::new();
    let root = document.create_fragment();
    let stranger = document.create_element("p");

    assert_eq!(path_of(&root, &stranger), None);
}
