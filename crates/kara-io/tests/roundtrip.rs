//! Extension-based dispatch between SRT and JSON tables

use kara_core::{SegmentList, Strictness};
use kara_io::{load_table, save_table};

#[test]
fn srt_file_round_trips_through_normalize() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("lines.srt");
    std::fs::write(
        &path,
        "1\n00:00:00,000 --> 00:00:02,000\nHello\n\n2\n00:00:02,000 --> 00:00:04,000\nWorld\n",
    )
    .unwrap();

    let rows = load_table(&path).unwrap();
    let list = SegmentList::normalize(rows, Strictness::Strict).unwrap();
    assert_eq!(list.len(), 2);

    let out = dir.path().join("out.srt");
    save_table(&out, list.as_slice()).unwrap();
    let reloaded = load_table(&out).unwrap();
    assert_eq!(reloaded.len(), 2);
    assert_eq!(reloaded[1].text, "World");
}

#[test]
fn json_file_round_trips() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("lines.json");
    std::fs::write(&path, r#"[{"start": 1.5, "end": 3.0, "text": "only"}]"#).unwrap();

    let rows = load_table(&path).unwrap();
    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0].start, 1.5);

    let list = SegmentList::normalize(rows, Strictness::Strict).unwrap();
    let out = dir.path().join("out.json");
    save_table(&out, list.as_slice()).unwrap();
    assert_eq!(load_table(&out).unwrap()[0].text, "only");
}
