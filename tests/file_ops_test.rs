use std::fs;
use tempfile::TempDir;
use utilkit::core::{digest, file, gzip};
use utilkit::DigestAlgorithm;

#[test]
fn test_list_and_size_of_tree() {
    let temp_dir = TempDir::new().unwrap();
    let root = temp_dir.path();
    fs::create_dir_all(root.join("a/b")).unwrap();
    fs::write(root.join("one.txt"), "12345").unwrap();
    fs::write(root.join("a/two.txt"), "123").unwrap();
    fs::write(root.join("a/b/three.txt"), "12").unwrap();

    let shallow = file::list_files(root, false).unwrap();
    assert_eq!(shallow, vec![root.join("one.txt")]);

    let deep = file::list_files(root, true).unwrap();
    assert_eq!(
        deep,
        vec![
            root.join("a/b/three.txt"),
            root.join("a/two.txt"),
            root.join("one.txt"),
        ]
    );

    assert_eq!(file::list_all(root).unwrap().len(), 5);
    assert_eq!(file::total_size(root).unwrap(), 10);
    assert_eq!(file::total_size(root.join("one.txt")).unwrap(), 5);
}

#[test]
fn test_copy_file_creates_parents_and_reports_progress() {
    let temp_dir = TempDir::new().unwrap();
    let src = temp_dir.path().join("src.bin");
    let data: Vec<u8> = (0..=255u8).cycle().take(5000).collect();
    fs::write(&src, &data).unwrap();

    let dest = temp_dir.path().join("nested/deeper/dest.bin");
    let mut last = None;
    let copied = file::copy_file(&src, &dest, 1024, |p| last = p.fraction()).unwrap();

    assert_eq!(copied, 5000);
    assert_eq!(fs::read(&dest).unwrap(), data);
    assert_eq!(last, Some(1.0));
}

#[test]
fn test_remove_recursively() {
    let temp_dir = TempDir::new().unwrap();
    let tree = temp_dir.path().join("tree");
    file::write_text(tree.join("x/y/z.txt"), "z").unwrap();
    assert_eq!(file::read_text(tree.join("x/y/z.txt")).unwrap(), "z");

    assert!(file::remove_recursively(&tree).unwrap());
    assert!(!tree.exists());
    assert!(!file::remove_recursively(&tree).unwrap());
}

#[test]
fn test_ensure_dir_rejects_existing_file() {
    let temp_dir = TempDir::new().unwrap();
    let blocker = temp_dir.path().join("blocker");
    fs::write(&blocker, "").unwrap();

    assert!(file::ensure_dir(&blocker).is_err());
    assert!(file::ensure_dir(temp_dir.path().join("fresh/dir")).is_ok());
}

#[test]
fn test_gzip_file_round_trip() {
    let temp_dir = TempDir::new().unwrap();
    let src = temp_dir.path().join("notes.txt");
    let text = "line of notes\n".repeat(200);
    fs::write(&src, &text).unwrap();

    let gz = gzip::gz_path_for(&src);
    let compressed = gzip::gzip_file(&src, &gz, gzip::DEFAULT_LEVEL).unwrap();
    assert!(compressed < text.len() as u64);

    let restored = temp_dir.path().join("out/notes.txt");
    let written = gzip::gunzip_file(&gz, &restored).unwrap();
    assert_eq!(written, text.len() as u64);
    assert_eq!(fs::read_to_string(&restored).unwrap(), text);
}

#[test]
fn test_digest_file_matches_digest_bytes() {
    let temp_dir = TempDir::new().unwrap();
    let path = temp_dir.path().join("data.bin");
    let data = vec![42u8; 20_000];
    fs::write(&path, &data).unwrap();

    for algorithm in DigestAlgorithm::ALL {
        assert_eq!(
            digest::digest_file(algorithm, &path).unwrap(),
            digest::digest_hex(algorithm, &data)
        );
    }
    assert!(digest::digest_file(DigestAlgorithm::Sha256, temp_dir.path().join("missing")).is_err());
}
