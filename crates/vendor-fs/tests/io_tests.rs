use std::fs;

use tempfile::TempDir;
use vendor_fs::{io, tree};

#[test]
fn test_write_text_overwrites_existing() {
    let temp = TempDir::new().unwrap();
    let path = temp.path().join("parser.c");
    fs::write(&path, "#include <tree_sitter/parser.h>\n").unwrap();

    io::write_text(&path, "#include \"parser.h\"\n").unwrap();

    assert_eq!(
        io::read_text(&path).unwrap(),
        "#include \"parser.h\"\n"
    );
}

#[test]
fn test_recreate_then_copy_is_reproducible() {
    let temp = TempDir::new().unwrap();
    let src = temp.path().join("src");
    fs::create_dir_all(&src).unwrap();
    fs::write(src.join("a.h"), "a").unwrap();
    fs::write(src.join("b.h"), "b").unwrap();
    let dest = temp.path().join("dest");

    for _ in 0..2 {
        tree::recreate_dir(&dest).unwrap();
        let files = tree::list_files(&src, &["h"]).unwrap();
        tree::copy_into(&files, &dest).unwrap();
    }

    assert_eq!(tree::list_files(&dest, &["h"]).unwrap().len(), 2);
}
