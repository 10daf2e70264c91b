use catalog_sync::{
    project_all, BookGenreLink, EntityStore, FilterState, Genre, Operation, Predicate, RawBook,
};

use crate::support::Library;

#[test]
fn author_filter_shows_only_that_authors_books() {
    let mut library = Library::seeded();
    library.manager.set_author_filter(Some(library.lem.as_str()));

    assert_eq!(library.visible_names(), vec!["Solaris", "The Cyberiad"]);
    assert_eq!(library.manager.original_books().len(), 3);
}

#[test]
fn genre_filter_uses_membership() {
    let mut library = Library::seeded();
    library.manager.set_genre_filter(Some(library.satire.as_str()));

    assert_eq!(library.visible_names(), vec!["Ubik", "The Cyberiad"]);
}

#[test]
fn filters_combine_and_clear_independently() {
    let mut library = Library::seeded();
    library.manager.set_author_filter(Some(library.lem.as_str()));
    library.manager.set_genre_filter(Some(library.sf.as_str()));
    assert_eq!(library.visible_names(), vec!["Solaris"]);

    library.manager.set_author_filter(Some(""));
    assert_eq!(library.visible_names(), vec!["Solaris", "Ubik"]);

    library.manager.set_genre_filter(None);
    assert_eq!(library.visible_names(), vec!["Solaris", "Ubik", "The Cyberiad"]);
    assert!(library.manager.filter_state().is_unconstrained());
}

#[test]
fn filtering_never_calls_the_service() {
    let mut library = Library::seeded();
    library.manager.set_author_filter(Some(library.dick.as_str()));
    library.manager.set_genre_filter(Some(library.sf.as_str()));
    library.manager.set_author_filter(None);

    assert_eq!(library.service.calls(Operation::ListBooks), 0);
}

#[test]
fn refresh_reapplies_active_filters() {
    let mut library = Library::seeded();
    library.manager.set_author_filter(Some(library.dick.as_str()));

    library
        .service
        .seed_book("VALIS", Some(library.dick.as_str()), Some(1981), &[])
        .unwrap();
    library
        .service
        .seed_book("Fiasco", Some(library.lem.as_str()), Some(1986), &[])
        .unwrap();
    library
        .manager
        .refresh(catalog_sync::EntityKind::Book)
        .unwrap();

    assert_eq!(library.visible_names(), vec!["Ubik", "VALIS"]);
    assert_eq!(
        library.manager.filter_state().author_id.as_deref(),
        Some(library.dick.as_str())
    );
}

#[test]
fn two_book_example_filters_as_expected() {
    let g1 = Genre::new("G1", "One");
    let g2 = Genre::new("G2", "Two");
    let book = |id: &str, author: &str, genres: &[&Genre]| RawBook {
        id: id.to_string(),
        name: format!("Book {}", id),
        publication_year: None,
        author_id: Some(author.to_string()),
        author: None,
        genre_links: genres
            .iter()
            .map(|g| BookGenreLink::resolved((*g).clone()))
            .collect(),
    };

    let mut store = EntityStore::new();
    store.set_books(vec![book("1", "A1", &[&g1]), book("2", "A2", &[&g1, &g2])]);
    let ids = |store: &EntityStore| -> Vec<String> {
        store.books().iter().map(|b| b.id.clone()).collect()
    };

    store.set_author_filter(Some("A1"));
    assert_eq!(ids(&store), vec!["1"]);

    store.set_author_filter(None);
    store.set_genre_filter(Some("G2"));
    assert_eq!(ids(&store), vec!["2"]);

    store.set_genre_filter(Some(""));
    assert_eq!(ids(&store), vec!["1", "2"]);
}

#[test]
fn visible_rows_equal_predicate_over_original() {
    let library = Library::seeded();
    let raw: Vec<RawBook> = library.manager.store().raw_books().items().to_vec();
    let rows = project_all(&raw);

    let authors = [None, Some(library.lem.as_str()), Some(library.dick.as_str())];
    let genres = [None, Some(library.sf.as_str()), Some(library.satire.as_str())];

    let mut store = EntityStore::new();
    store.set_books(raw);
    for author in authors {
        for genre in genres {
            store.set_author_filter(author);
            store.set_genre_filter(genre);

            let mut state = FilterState::new();
            state.set_author(author);
            state.set_genre(genre);
            let expected: Vec<_> = rows.iter().filter(|r| state.matches(r)).cloned().collect();

            assert_eq!(store.books(), expected.as_slice());
        }
    }
}
