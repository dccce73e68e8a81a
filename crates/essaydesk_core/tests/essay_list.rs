use essaydesk_core::service::essay_list::{DELETED_MESSAGE, DELETED_TITLE, EMPTY_LIST_MESSAGE};
use essaydesk_core::{
    EssayListPresenter, EssayListView, EssayRecord, EssayStore, ExportService, MemoryKvStore,
    NoShareSheet, NoticeLevel, Route, ScreenLifecycle,
};

mod support;

use support::{essay, ids, FlakyKvStore};

fn grid_ids(view: &EssayListView) -> Vec<(String, Option<String>)> {
    match view {
        EssayListView::Grid { rows } => rows
            .iter()
            .map(|row| (row.left.id.clone(), row.right.as_ref().map(|c| c.id.clone())))
            .collect(),
        EssayListView::Empty { .. } => panic!("expected grid"),
    }
}

#[test]
fn empty_collection_renders_placeholder_not_grid() {
    let mut presenter = EssayListPresenter::new(EssayStore::new(MemoryKvStore::new()));
    presenter.on_focus();
    assert_eq!(
        presenter.view(),
        EssayListView::Empty {
            message: EMPTY_LIST_MESSAGE
        }
    );
}

#[test]
fn grid_is_newest_first_with_partial_last_row() {
    let kv = MemoryKvStore::new();
    let store = EssayStore::new(&kv);
    for id in ["e1", "e2", "e3"] {
        store.save(&essay(id)).unwrap();
    }

    let mut presenter = EssayListPresenter::new(EssayStore::new(&kv));
    presenter.on_focus();
    assert_eq!(
        grid_ids(&presenter.view()),
        vec![
            ("e3".to_string(), Some("e2".to_string())),
            ("e1".to_string(), None)
        ]
    );
    assert_eq!(ids(&EssayStore::new(&kv).load_all()), vec!["e1", "e2", "e3"]);
}

#[test]
fn focus_reloads_changes_made_elsewhere() {
    let kv = MemoryKvStore::new();
    let mut presenter = EssayListPresenter::new(EssayStore::new(&kv));
    presenter.on_focus();
    assert!(presenter.essays().is_empty());

    presenter.on_blur();
    EssayStore::new(&kv).save(&essay("new")).unwrap();
    presenter.on_focus();
    assert_eq!(ids(presenter.essays()), vec!["new"]);
}

#[test]
fn cards_use_placeholders_for_blank_fields() {
    let kv = MemoryKvStore::new();
    EssayStore::new(&kv)
        .save(&EssayRecord::with_id("1", "", "   ").unwrap())
        .unwrap();
    let mut presenter = EssayListPresenter::new(EssayStore::new(&kv));
    presenter.on_focus();

    match presenter.view() {
        EssayListView::Grid { rows } => {
            assert_eq!(rows[0].left.title, "Sem título");
            assert_eq!(rows[0].left.summary, "Sem conteúdo disponível.");
        }
        other => panic!("unexpected view: {other:?}"),
    }
}

#[test]
fn open_passes_record_fields_to_detail_route() {
    let kv = MemoryKvStore::new();
    EssayStore::new(&kv).save(&essay("7")).unwrap();
    let mut presenter = EssayListPresenter::new(EssayStore::new(&kv));
    presenter.on_focus();

    let request = presenter.open("7").expect("listed essay opens");
    assert_eq!(request.route, Route::EssayDetail);
    assert_eq!(request.route.path(), "/visualizacao");
    assert_eq!(request.get("id"), Some("7"));
    assert_eq!(request.get("titulo"), Some("title 7"));
    assert_eq!(request.get("texto"), Some("text 7"));
    assert!(presenter.open("missing").is_none());
}

#[test]
fn delete_confirms_and_reloads() {
    let kv = MemoryKvStore::new();
    let store = EssayStore::new(&kv);
    store.save(&essay("1")).unwrap();
    store.save(&essay("2")).unwrap();
    let mut presenter = EssayListPresenter::new(EssayStore::new(&kv));
    presenter.on_focus();

    let notice = presenter.delete("1");
    assert_eq!(notice.level, NoticeLevel::Info);
    assert_eq!(notice.title, DELETED_TITLE);
    assert_eq!(notice.message, DELETED_MESSAGE);
    assert_eq!(ids(presenter.essays()), vec!["2"]);
}

#[test]
fn failed_delete_reports_error_and_keeps_presented_list() {
    let kv = FlakyKvStore::default();
    let store = EssayStore::new(&kv);
    store.save(&essay("1")).unwrap();
    store.save(&essay("2")).unwrap();
    let mut presenter = EssayListPresenter::new(EssayStore::new(&kv));
    presenter.on_focus();

    kv.fail_writes.set(true);
    let notice = presenter.delete("1");
    assert!(notice.is_error());
    assert_eq!(ids(presenter.essays()), vec!["2", "1"]);
}

#[test]
fn export_writes_listed_essay_through_service() {
    let kv = MemoryKvStore::new();
    EssayStore::new(&kv)
        .save(&EssayRecord::with_id("1", "T", "hello").unwrap())
        .unwrap();
    let mut presenter = EssayListPresenter::new(EssayStore::new(&kv));
    presenter.on_focus();

    let dir = tempfile::tempdir().unwrap();
    let exporter = ExportService::native(dir.path(), NoShareSheet);
    let notice = presenter.export("1", &exporter);
    assert_eq!(notice.level, NoticeLevel::Info);
    assert_eq!(std::fs::read(dir.path().join("T.txt")).unwrap(), b"hello");

    assert!(presenter.export("missing", &exporter).is_error());
}
