use base64::Engine;
use explorer_files::test_support::minimal_pdf;
use explorer_files::{
    Content, ExplorerConfig, FileCategory, FileExplorer, FileTypes, MatchKind, SearchPathSet,
    TextEncoding, PAGE_SEPARATOR,
};
use pretty_assertions::assert_eq;
use std::fs;
use std::path::{Path, PathBuf};
use tempfile::tempdir;

fn explorer(roots: &[&Path], max_depth: usize) -> FileExplorer {
    FileExplorer::new(
        SearchPathSet::new(roots.iter().map(|root| root.to_path_buf())),
        FileTypes::default(),
        max_depth,
    )
}

#[test]
fn suffixed_pdf_upload_reads_as_plain_text() {
    let temp = tempdir().unwrap();
    let storage = temp.path().join("storage");
    fs::create_dir_all(&storage).unwrap();
    fs::write(storage.join("report_xyz123.pdf"), minimal_pdf(&["Q3 Results"])).unwrap();

    let (resolved, content) = explorer(&[&storage], 100).read("report").unwrap();
    assert_eq!(resolved.match_kind, MatchKind::Partial);
    assert_eq!(resolved.category, FileCategory::Document);
    let Content::Document { text, pages } = content else {
        panic!("expected document content");
    };
    assert_eq!(pages, 1);
    assert_eq!(text.trim(), "Q3 Results");
    assert!(!text.contains(PAGE_SEPARATOR.trim()));
}

#[test]
fn image_payload_decodes_to_original_bytes() {
    let temp = tempdir().unwrap();
    let storage = temp.path().join("storage");
    fs::create_dir_all(&storage).unwrap();
    let bytes: Vec<u8> = (0..=255u8).cycle().take(4096).collect();
    fs::write(storage.join("logo.png"), &bytes).unwrap();

    let (resolved, content) = explorer(&[&storage], 100).read("logo").unwrap();
    assert_eq!(resolved.category, FileCategory::Image);
    let Content::Image { extension, base64 } = content else {
        panic!("expected image content");
    };
    assert_eq!(extension, "png");
    let decoded = base64::engine::general_purpose::STANDARD
        .decode(base64)
        .unwrap();
    assert_eq!(decoded, bytes);
}

#[test]
fn exact_name_wins_across_roots_in_any_case() {
    let temp = tempdir().unwrap();
    let storage = temp.path().join("storage");
    let uploads = temp.path().join("uploads");
    fs::create_dir_all(storage.join("archive")).unwrap();
    fs::create_dir_all(&uploads).unwrap();
    fs::write(storage.join("archive").join("budget_2023.csv"), "old").unwrap();
    fs::write(uploads.join("budget.csv"), "new").unwrap();

    let explorer = explorer(&[&storage, &uploads], 100);
    let (resolved, content) = explorer.read("BUDGET.CSV").unwrap();
    assert_eq!(resolved.match_kind, MatchKind::Exact);
    assert_eq!(resolved.path(), uploads.join("budget.csv"));
    assert_eq!(
        content,
        Content::Text {
            text: "new".to_string(),
            encoding: TextEncoding::Utf8,
        }
    );
}

#[test]
fn unique_substring_resolves_in_any_case() {
    let temp = tempdir().unwrap();
    let storage = temp.path().join("storage");
    fs::create_dir_all(storage.join("team")).unwrap();
    fs::write(storage.join("team").join("Meeting-Minutes_k9x.txt"), "minutes").unwrap();
    fs::write(storage.join("agenda.txt"), "agenda").unwrap();

    let explorer = explorer(&[&storage], 100);
    for query in ["minutes", "MINUTES", "Meeting-Min"] {
        let resolved = explorer.resolve(query).unwrap();
        assert_eq!(
            resolved.path(),
            storage.join("team").join("Meeting-Minutes_k9x.txt")
        );
    }
}

#[test]
fn unknown_name_reports_query_and_roots() {
    let temp = tempdir().unwrap();
    let storage = temp.path().join("storage");
    let uploads = temp.path().join("uploads");
    fs::create_dir_all(&storage).unwrap();
    fs::create_dir_all(&uploads).unwrap();

    let err = explorer(&[&storage, &uploads], 100)
        .read("nothing-here")
        .unwrap_err();
    let message = err.user_message();
    assert!(message.contains("'nothing-here' not found"));
    assert!(message.contains(&storage.display().to_string()));
    assert!(message.contains(&uploads.display().to_string()));
}

#[test]
fn binary_text_candidate_is_refused() {
    let temp = tempdir().unwrap();
    let storage = temp.path().join("storage");
    fs::create_dir_all(&storage).unwrap();
    fs::write(storage.join("model.bin"), [0x7f, b'E', b'L', b'F', 0, 0, 1]).unwrap();

    let explorer = explorer(&[&storage], 100);
    let resolved = explorer.resolve("model").unwrap();
    assert_eq!(resolved.category, FileCategory::UnsupportedBinary);

    let err = explorer.read("model").unwrap_err();
    assert_eq!(err.kind(), "invalid_file_type");
}

fn deep_tree(root: &Path, levels: usize) -> PathBuf {
    let mut dir = root.to_path_buf();
    for _ in 0..levels {
        dir = dir.join("d");
    }
    fs::create_dir_all(&dir).unwrap();
    dir
}

#[test]
fn list_all_respects_depth_on_fifty_level_tree() {
    let temp = tempdir().unwrap();
    let storage = temp.path().join("storage");
    fs::create_dir_all(&storage).unwrap();
    deep_tree(&storage, 50);

    let full = explorer(&[&storage], 100).list_all();
    assert_eq!(full.len(), 1);
    let listing = full[0].1.as_ref().unwrap();
    assert_eq!(listing.entries.len(), 50);
    assert_eq!(listing.entries.last().map(|entry| entry.depth), Some(50));

    let shallow = explorer(&[&storage], 2).list_all();
    let listing = shallow[0].1.as_ref().unwrap();
    assert_eq!(
        listing
            .entries
            .iter()
            .map(|entry| entry.path.clone())
            .collect::<Vec<_>>(),
        vec![storage.join("d"), storage.join("d").join("d")]
    );
}

#[test]
fn config_driven_explorer_searches_storage_then_uploads() {
    let temp = tempdir().unwrap();
    let storage = temp.path().join("storage");
    let uploads = temp.path().join("uploads");
    fs::create_dir_all(&uploads).unwrap();

    let config = ExplorerConfig {
        storage_path: storage.clone(),
        upload_paths: vec![uploads.clone()],
        ..ExplorerConfig::default()
    };
    config.ensure_directories_exist().unwrap();
    fs::write(storage.join("plan_a.txt"), "a").unwrap();
    fs::write(uploads.join("plan_b.txt"), "b").unwrap();

    let explorer = FileExplorer::from_config(&config);
    assert_eq!(explorer.search_paths().roots(), &[storage.clone(), uploads]);
    assert_eq!(explorer.resolve("plan").unwrap().path(), storage.join("plan_a.txt"));
}
