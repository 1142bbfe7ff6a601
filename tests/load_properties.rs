//! End-to-end behaviour of the external properties loader.

use std::fs;

use external_properties::properties::{PropertyStore, SkipKind, MAX_SLOTS};

mod common;

use common::Fixture;

#[test]
fn test_load_applies_once() {
    let fx = Fixture::new();
    let path = fx.write("a.properties", "app.name=first\n");
    assert!(fx.loader.register_path("file.1", &path));

    let first = fx.loader.load();
    assert_eq!(first.keys_set, 1);
    assert_eq!(fx.store.get("app.name").as_deref(), Some("first"));

    // Change both the file and the store; a second load must not touch either.
    fs::write(&path, "app.name=second\n").unwrap();
    fx.store.set("app.name", "external");

    let second = fx.loader.load();
    assert!(second.already_loaded);
    assert!(second.applied.is_empty());
    assert_eq!(fx.store.get("app.name").as_deref(), Some("external"));
}

#[test]
fn test_forced_reload_picks_up_changes() {
    let fx = Fixture::new();
    let path = fx.write("a.properties", "db.url=jdbc:old\n");
    fx.loader.register_path("file.1", &path);
    fx.loader.load();

    fs::write(&path, "db.url=jdbc:new\n").unwrap();
    assert!(fx.loader.reload(false).already_loaded);
    assert_eq!(fx.store.get("db.url").as_deref(), Some("jdbc:old"));

    let summary = fx.loader.reload(true);
    assert!(!summary.already_loaded);
    assert_eq!(summary.keys_overwritten, 1);
    assert_eq!(fx.store.get("db.url").as_deref(), Some("jdbc:new"));
    assert!(fx.loader.is_loaded());
}

#[test]
fn test_forced_reload_before_first_load_just_loads() {
    let fx = Fixture::new();
    fx.loader
        .register_path("file.1", &fx.write("a.properties", "k=v\n"));

    let summary = fx.loader.reload(true);
    assert_eq!(summary.keys_set, 1);
}

#[test]
fn test_merge_order_is_case_insensitive() {
    let fx = Fixture::new();
    let f1 = fx.write("f1.properties", "K=from-f1\n");
    let f2 = fx.write("f2.properties", "K=from-f2\n");
    fx.loader.register_path("file.B", &f1);
    fx.loader.register_path("file.a", &f2);

    let summary = fx.loader.load();

    // file.a sorts before file.B, so f1 is applied last and wins.
    assert_eq!(summary.applied_paths(), vec![f2.as_str(), f1.as_str()]);
    assert_eq!(fx.store.get("K").as_deref(), Some("from-f1"));
}

#[test]
fn test_merge_order_is_lexical_for_numbers() {
    let fx = Fixture::new();
    let ten = fx.write("ten.properties", "k=ten\n");
    let two = fx.write("two.properties", "k=two\n");
    fx.loader.register_path("file.10", &ten);
    fx.loader.register_path("file.2", &two);

    fx.loader.load();
    assert_eq!(fx.store.get("k").as_deref(), Some("two"));
}

#[test]
fn test_overwrite_disabled_keeps_existing() {
    let fx = Fixture::new();
    fx.store.set("K", "existing");
    fx.loader.set_overwrite(false);
    fx.loader
        .register_path("file.1", &fx.write("a.properties", "K=new\nother=1\n"));

    let summary = fx.loader.load();

    assert_eq!(fx.store.get("K").as_deref(), Some("existing"));
    assert_eq!(fx.store.get("other").as_deref(), Some("1"));
    assert_eq!(summary.refused.len(), 1);
    let refused = &summary.refused[0];
    assert_eq!(refused.key, "K");
    assert_eq!(refused.existing, "existing");
    assert_eq!(refused.discarded, "new");
    assert!(!summary.is_clean());
}

#[test]
fn test_overwrite_enabled_replaces() {
    let fx = Fixture::new();
    fx.store.set("K", "existing");
    fx.loader.set_overwrite(true);
    fx.loader
        .register_path("file.1", &fx.write("a.properties", "K=new\n"));

    let summary = fx.loader.load();

    assert_eq!(fx.store.get("K").as_deref(), Some("new"));
    assert_eq!(summary.keys_overwritten, 1);
    assert!(summary.refused.is_empty());
}

#[test]
fn test_earlier_files_are_visible_to_later_overwrite_checks() {
    let fx = Fixture::new();
    fx.loader.set_overwrite(false);
    fx.loader
        .register_path("file.1", &fx.write("a.properties", "shared=first\n"));
    fx.loader
        .register_path("file.2", &fx.write("b.properties", "shared=second\n"));

    let summary = fx.loader.load();

    assert_eq!(fx.store.get("shared").as_deref(), Some("first"));
    assert_eq!(summary.refused.len(), 1);
    assert_eq!(summary.refused[0].discarded, "second");
}

#[test]
fn test_sparse_slots() {
    let fx = Fixture::new();
    fx.loader
        .register_path("file.1", &fx.write("one.properties", "one=1\n"));
    fx.loader
        .register_path("file.3", &fx.write("three.properties", "three=3\n"));

    let summary = fx.loader.load();

    assert_eq!(summary.applied.len(), 2);
    assert!(summary.skipped.is_empty());
    assert!(summary.empty_slots.is_empty());
    assert!(fx.loader.path("file.2").is_none());
    assert_eq!(fx.store.get("one").as_deref(), Some("1"));
    assert_eq!(fx.store.get("three").as_deref(), Some("3"));
}

#[test]
fn test_empty_slot_is_a_silent_gap() {
    let fx = Fixture::new();
    fx.loader.register_path("file.1", "");
    fx.loader
        .register_path("file.2", &fx.write("two.properties", "two=2\n"));

    let summary = fx.loader.load();

    assert_eq!(summary.empty_slots, vec!["file.1".to_string()]);
    assert!(summary.skipped.is_empty());
    assert_eq!(fx.store.get("two").as_deref(), Some("2"));
}

#[test]
fn test_missing_file_is_not_fatal() {
    let fx = Fixture::new();
    let missing = fx.missing("absent.properties");
    fx.loader.register_path("file.1", &missing);
    fx.loader
        .register_path("file.2", &fx.write("ok.properties", "ok=yes\n"));

    let summary = fx.loader.load();

    assert_eq!(summary.skipped.len(), 1);
    assert_eq!(summary.skipped[0].kind, SkipKind::Open);
    assert_eq!(summary.skipped[0].path, missing);
    assert_eq!(fx.store.get("ok").as_deref(), Some("yes"));
    assert!(fx.loader.is_loaded());
}

#[test]
fn test_unrecognized_prefix_is_rejected() {
    let fx = Fixture::new();
    assert!(!fx.loader.register_path("other.1", "/x"));
    assert_eq!(fx.loader.registered_count(), 0);
    assert!(fx.loader.path("other.1").is_none());
}

#[test]
fn test_capacity_boundary() {
    let fx = Fixture::new();
    for i in 1..=MAX_SLOTS {
        assert!(fx.loader.register_path(&format!("file.{i}"), ""));
    }
    assert_eq!(fx.loader.registered_count(), 99);

    // The 100th distinct slot is the one that trips the limit.
    assert!(!fx.loader.register_path("file.100", "/x"));
    assert_eq!(fx.loader.registered_count(), 99);
    assert!(fx.loader.path("file.100").is_none());
}

#[test]
fn test_full_file_grammar_reaches_store() {
    let fx = Fixture::new();
    let content = "\
# Application settings
! legacy comment
app.title = Caf\\u00e9 Server
app.greeting:hello \\
    world
path\\ with\\ spaces=C:\\\\data
";
    fx.loader
        .register_path("file.1", &fx.write("app.properties", content));

    fx.loader.load();

    assert_eq!(fx.store.get("app.title").as_deref(), Some("Café Server"));
    assert_eq!(fx.store.get("app.greeting").as_deref(), Some("hello world"));
    assert_eq!(fx.store.get("path with spaces").as_deref(), Some("C:\\data"));
}
