use std::sync::Arc;

use assert_fs::prelude::*;
use filex::{Backend, FileHub, FilexError, MemoryFs, ReadInput, ReadOptions, SourceType, XmlSource};

fn opts() -> ReadOptions {
    ReadOptions::default()
}

#[test]
fn inline_xml_is_returned_verbatim() {
    let hub = FileHub::new();
    let input = "<?xml version=\"1.0\"?><doc><a>1</a></doc>";
    let result = hub.read(input, &opts()).unwrap();
    assert_eq!(result.source, SourceType::InlineXml);
    assert_eq!(result.content, input);
}

#[test]
fn bare_opening_tag_is_inline_xml() {
    let hub = FileHub::new();
    let result = hub.read("<note>hi</note>", &opts()).unwrap();
    assert_eq!(result.source, SourceType::InlineXml);
}

#[test]
fn multiline_input_is_literal_content() {
    let td = assert_fs::TempDir::new().unwrap();
    let hub = FileHub::builder().working_dir(td.path()).build();
    let input = "first line\nsecond line";
    let result = hub.read(input, &opts()).unwrap();
    assert_eq!(result.source, SourceType::Unknown);
    assert_eq!(result.content, input);
}

#[test]
fn single_line_with_whitespace_is_plain_text() {
    let td = assert_fs::TempDir::new().unwrap();
    let hub = FileHub::builder().working_dir(td.path()).build();
    let result = hub.read("hello world", &opts()).unwrap();
    assert_eq!(result.source, SourceType::PlainText);
    assert_eq!(result.content, "hello world");
}

#[test]
fn existing_local_file_is_read_from_disk() {
    let td = assert_fs::TempDir::new().unwrap();
    let file = td.child("data.txt");
    file.write_str("on disk").unwrap();

    let hub = FileHub::builder().working_dir(td.path()).build();
    let result = hub.read("data.txt", &opts()).unwrap();
    assert_eq!(result.source, SourceType::LocalFile);
    assert_eq!(result.content, "on disk");
}

#[test]
fn file_prefix_reads_local_path() {
    let td = assert_fs::TempDir::new().unwrap();
    let file = td.child("pref.txt");
    file.write_str("prefixed").unwrap();

    let hub = FileHub::new();
    let input = format!("file://{}", file.path().display());
    let result = hub.read(input.as_str(), &opts()).unwrap();
    assert_eq!(result.source, SourceType::LocalFile);
    assert_eq!(result.content, "prefixed");
}

#[test]
fn parsed_document_handle_short_circuits() {
    struct Doc;
    impl XmlSource for Doc {
        fn to_xml(&self) -> String {
            "<doc/>".to_string()
        }
    }

    let hub = FileHub::new();
    let doc = Doc;
    let result = hub.read(ReadInput::Document(&doc), &opts()).unwrap();
    assert_eq!(result.source, SourceType::InlineDoc);
    assert_eq!(result.content, "<doc/>");
}

#[test]
fn dfs_scheme_reads_from_dfs_backend() {
    let mem = Arc::new(MemoryFs::new());
    mem.write("dfs://nas/share/report.txt", b"from dfs").unwrap();

    let td = assert_fs::TempDir::new().unwrap();
    let hub = FileHub::builder()
        .working_dir(td.path())
        .dfs(mem)
        .build();
    let result = hub.read("dfs://nas/share/report.txt", &opts()).unwrap();
    assert_eq!(result.source, SourceType::Dfs);
    assert_eq!(result.content, "from dfs");
}

#[test]
fn last_chance_dfs_probe_catches_bare_names() {
    let mem = Arc::new(MemoryFs::new());
    mem.write("inventory.dat", b"remote bytes").unwrap();

    let td = assert_fs::TempDir::new().unwrap();
    let hub = FileHub::builder()
        .working_dir(td.path())
        .dfs(mem)
        .build();
    let result = hub.read("inventory.dat", &opts()).unwrap();
    assert_eq!(result.source, SourceType::Dfs);
    assert_eq!(result.content, "remote bytes");
}

#[test]
fn unmatched_bare_token_comes_back_verbatim() {
    let td = assert_fs::TempDir::new().unwrap();
    let hub = FileHub::builder().working_dir(td.path()).build();
    let result = hub.read("no-such-token", &opts()).unwrap();
    assert_eq!(result.source, SourceType::Unknown);
    assert_eq!(result.content, "no-such-token");
}

#[test]
fn empty_input_is_invalid() {
    let hub = FileHub::new();
    let err = hub.read("", &opts()).unwrap_err();
    assert!(matches!(err, FilexError::InvalidInput(_)));
}

#[test]
fn ftp_scheme_reads_from_ftp_backend() {
    let mem = Arc::new(MemoryFs::new());
    mem.write("ftp://host/pub/file.txt", b"ftp bytes").unwrap();

    let hub = FileHub::builder().ftp(mem).build();
    let result = hub.read("ftp://host/pub/file.txt", &opts()).unwrap();
    assert_eq!(result.source, SourceType::Ftp);
    assert_eq!(result.content, "ftp bytes");
}
