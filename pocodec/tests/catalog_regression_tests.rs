use pocodec::formats::po::{self, WriteOptions};
use pocodec::formats::{JsonFormat, PoFormat};
use pocodec::traits::Parser;
use pocodec::{
    Catalog, EntryState, EntryStateFilter, catalog_stats, classify, diff_catalogs, filter_entries,
    merge_catalogs, parse_entry_range,
};

const RU_CATALOG: &str = r#"# Russian translations for the demo package.
# Copyright (C) 2024
msgid ""
msgstr ""
"Project-Id-Version: demo 1.2\n"
"Language: ru\n"
"MIME-Version: 1.0\n"
"Content-Type: text/plain; charset=UTF-8\n"
"Plural-Forms: nplurals=3; plural=(n%10==1 && n%100!=11 ? 0 : n%10>=2 && n%10<=4 && (n%100<10 || n%100>=20) ? 1 : 2);\n"

#: src/main.rs:12
msgid "Open file"
msgstr "Открыть файл"

#: src/main.rs:20
#, fuzzy
msgid "Save changes?"
msgstr "Сохранить изменения?"

#: src/list.rs:33
msgid "%d item"
msgid_plural "%d items"
msgstr[0] "%d элемент"
msgstr[1] "%d элемента"
msgstr[2] "%d элементов"

#: src/help.rs:5
msgid "Usage:\n  demo [OPTIONS]\n"
msgstr ""

msgid "Quit"
msgstr "Quit"

#~ msgid "Print"
#~ msgstr "Печать"

#~| msgid "Exit now"
#~ msgid "Exit"
#~ msgstr "Выход"
"#;

#[test]
fn parses_a_realistic_catalog() {
    let catalog = po::parse(RU_CATALOG);

    assert_eq!(
        catalog.header_comment,
        "# Russian translations for the demo package.\n# Copyright (C) 2024"
    );
    assert!(catalog.header_meta.contains("Project-Id-Version: demo 1.2\n"));
    assert!(catalog.header_meta.contains("plural=(n%10==1"));

    assert_eq!(catalog.entries.len(), 7);
    assert_eq!(catalog.entries[0].msg_id, "Open file");
    assert!(catalog.entries[1].fuzzy);
    assert_eq!(catalog.entries[2].msg_str_plural.len(), 3);
    assert_eq!(catalog.entries[3].msg_id, "Usage:\\n  demo [OPTIONS]\\n");
    assert!(catalog.entries[3].is_untranslated());
    assert!(catalog.entries[4].is_same_as_source());
    assert!(catalog.entries[5].obsolete);
    assert!(catalog.entries[6].obsolete);
    assert_eq!(catalog.entries[6].msg_id_previous.as_deref(), Some("Exit now"));
}

#[test]
fn roundtrips_byte_for_byte() {
    let catalog = po::parse(RU_CATALOG);
    let written = po::write_string(&catalog, &WriteOptions::default());
    assert_eq!(written, RU_CATALOG);
}

#[test]
fn classifies_and_counts_states() {
    let catalog = po::parse(RU_CATALOG);
    assert_eq!(classify(&catalog.entries[0]), EntryState::Translated);
    assert_eq!(classify(&catalog.entries[1]), EntryState::Fuzzy);
    assert_eq!(classify(&catalog.entries[3]), EntryState::Untranslated);
    assert_eq!(classify(&catalog.entries[4]), EntryState::Same);
    assert_eq!(classify(&catalog.entries[5]), EntryState::Obsolete);

    let stats = catalog_stats(&catalog);
    assert_eq!(stats.total, 7);
    assert_eq!(stats.translated, 2);
    assert_eq!(stats.untranslated, 1);
    assert_eq!(stats.fuzzy, 1);
    assert_eq!(stats.same, 1);
    assert_eq!(stats.obsolete, 2);
}

#[test]
fn filter_and_range_narrow_a_working_set() {
    let catalog = po::parse(RU_CATALOG);

    let needs_work = EntryStateFilter {
        untranslated: true,
        fuzzy: true,
        ..EntryStateFilter::default()
    };
    let filtered = filter_entries(&catalog.entries, &needs_work);
    let ids: Vec<_> = filtered.iter().map(|e| e.msg_id.as_str()).collect();
    assert_eq!(ids, vec!["Save changes?", "Usage:\\n  demo [OPTIONS]\\n"]);

    let indices = parse_entry_range("2-", filtered.len()).unwrap();
    assert_eq!(indices, vec![2]);
    let batch: Vec<_> = indices.iter().map(|&i| filtered[i - 1].clone()).collect();
    let subset = catalog.with_entries(batch);
    assert_eq!(subset.header_meta, catalog.header_meta);
    assert_eq!(subset.entries.len(), 1);
    assert!(subset.entries[0].msg_id.starts_with("Usage:"));
}

#[test]
fn json_bridge_preserves_catalog_semantics() {
    let catalog = po::parse(RU_CATALOG);

    let json_text = JsonFormat::from(&catalog).to_json_string().unwrap();
    let reparsed_json = pocodec::formats::json::parse(&json_text).unwrap();
    let rebuilt = Catalog::from(reparsed_json);

    // Fuzzy state lives in the boolean on the JSON side, not in comments.
    assert!(rebuilt.entries[1].fuzzy);
    assert!(
        rebuilt.entries[1]
            .comments
            .iter()
            .all(|line| !line.contains("fuzzy"))
    );

    // Writing the rebuilt catalog as PO and diffing against the original
    // shows no drift.
    let po_text = po::write_string(&rebuilt, &WriteOptions::default());
    let reparsed = po::parse(&po_text);
    let diff = diff_catalogs(&catalog, &reparsed);
    assert_eq!(diff.stats.added, 0);
    assert_eq!(diff.stats.changed, 0);
    assert_eq!(diff.stats.deleted, 0);
}

#[test]
fn diff_reports_the_new_entry() {
    let old = po::parse("msgid \"hello\"\nmsgstr \"你好\"\n");
    let new = po::parse("msgid \"hello\"\nmsgstr \"你好\"\n\nmsgid \"world\"\nmsgstr \"世界\"\n");

    let diff = diff_catalogs(&old, &new);
    assert_eq!(diff.stats.added, 1);
    assert_eq!(diff.stats.changed, 0);
    assert_eq!(diff.stats.deleted, 0);
    assert_eq!(diff.review_entries.len(), 1);
    assert_eq!(diff.review_entries[0].msg_id, "world");
}

#[test]
fn diff_treats_revived_obsolete_as_added() {
    let old = po::parse("#~ msgid \"x\"\n#~ msgstr \"X\"\n");
    let new = po::parse("msgid \"x\"\nmsgstr \"X\"\n");

    let diff = diff_catalogs(&old, &new);
    assert_eq!(diff.stats.added, 1);
    assert_eq!(diff.stats.changed, 0);
    assert_eq!(diff.stats.deleted, 0);
}

#[test]
fn merge_dedups_across_batches() {
    let first = po::parse("msgid \"a\"\nmsgstr \"1\"\n");
    let second = po::parse("msgid \"a\"\nmsgstr \"2\"\n\nmsgid \"b\"\nmsgstr \"3\"\n");

    let merged = merge_catalogs(&[first, second]);
    assert_eq!(merged.entries.len(), 2);
    assert_eq!(merged.entries[0].msg_str, "1");
    assert_eq!(merged.entries[1].msg_str, "3");
}

#[test]
fn parser_trait_reads_both_formats() {
    let po_format = PoFormat::from_str(RU_CATALOG).unwrap();
    assert_eq!(po_format.catalog.entries.len(), 7);

    let json_text = JsonFormat::from(&po_format.catalog).to_json_string().unwrap();
    let json_format = JsonFormat::from_str(&json_text).unwrap();
    assert_eq!(json_format.entries.len(), 7);
}
