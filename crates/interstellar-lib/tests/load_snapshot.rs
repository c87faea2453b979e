mod common;

use interstellar_lib::{load_dataset_file, load_json_snapshot, load_snapshot, Error};

use common::{fixture_json_path, solar_snapshot, SqliteFixture};

#[test]
fn loads_sqlite_snapshot_in_collection_order() {
    let expected = solar_snapshot();
    let fixture = SqliteFixture::new(&expected);

    let snapshot = load_snapshot(&fixture.db_path).expect("snapshot loads");

    assert_eq!(snapshot, expected);
}

#[test]
fn edges_follow_record_order() {
    let fixture = SqliteFixture::new(&solar_snapshot());
    fixture
        .connection()
        .execute(
            "INSERT INTO edge (record_id, edge_id, source, destination, distance, time_delay)
             VALUES (0, 'first', 'F', 'A', 1.5, NULL)",
            [],
        )
        .expect("insert edge");

    let snapshot = load_snapshot(&fixture.db_path).expect("snapshot loads");

    let first = &snapshot.edges[0];
    assert_eq!(first.id, "first");
    assert_eq!(first.time_delay, 0.0, "NULL delay reads as zero");
    assert_eq!(first.effective_weight(), 1.5);
    assert_eq!(snapshot.edges.len(), 9);
}

#[test]
fn missing_traffic_table_yields_empty_traffic() {
    let fixture = SqliteFixture::without_traffic(&solar_snapshot());

    let snapshot = load_snapshot(&fixture.db_path).expect("snapshot loads");

    assert!(snapshot.traffic.is_empty());
    assert_eq!(snapshot.edges.len(), 8);
}

#[test]
fn numeric_ids_are_read_as_text() {
    let fixture = SqliteFixture::empty();
    fixture
        .connection()
        .execute_batch(
            "CREATE TABLE vertex (vertex_id INTEGER PRIMARY KEY, name TEXT);
             CREATE TABLE edge (edge_id INTEGER, source INTEGER, destination INTEGER, distance REAL);
             INSERT INTO vertex VALUES (1, 'Earth'), (2, 'Moon');
             INSERT INTO edge VALUES (10, 1, 2, 4);",
        )
        .expect("create legacy schema");

    let snapshot = load_snapshot(&fixture.db_path).expect("snapshot loads");

    assert_eq!(snapshot.vertices[0].id, "1");
    let edge = &snapshot.edges[0];
    assert_eq!((edge.id.as_str(), edge.source.as_str()), ("10", "1"));
    assert_eq!(edge.distance, 4.0);
    assert_eq!(edge.time_delay, 0.0);
}

#[test]
fn missing_edge_table_is_unsupported() {
    let fixture = SqliteFixture::empty();
    fixture
        .connection()
        .execute_batch("CREATE TABLE vertex (vertex_id TEXT, name TEXT);")
        .expect("create partial schema");

    let err = load_snapshot(&fixture.db_path).expect_err("schema rejected");
    assert!(matches!(err, Error::UnsupportedSchema));
}

#[test]
fn json_fixture_matches_sqlite_fixture() {
    let snapshot = load_json_snapshot(&fixture_json_path()).expect("json fixture loads");
    assert_eq!(snapshot, solar_snapshot());
}

#[test]
fn dataset_file_reader_dispatches_on_extension() {
    let from_json = load_dataset_file(&fixture_json_path()).expect("json dataset");
    let fixture = SqliteFixture::new(&solar_snapshot());
    let from_sqlite = load_dataset_file(&fixture.db_path).expect("sqlite dataset");

    assert_eq!(from_json, from_sqlite);
}

#[test]
fn dataset_directory_resolves_default_filename() {
    let fixture = SqliteFixture::new(&solar_snapshot());

    let snapshot =
        interstellar_lib::load_dataset(Some(fixture.dir())).expect("directory resolves");
    assert_eq!(snapshot.vertices.len(), 6);
}
