//! Runs compiled clauses against an in-memory SQLite index table.

#![cfg(unix)]

use index_query::{optimize_query, Clause, Column, ColumnType, Query, Row, SqlValue, Value};
use rusqlite::types::Value as SqliteValue;
use rusqlite::{params, params_from_iter, Connection};

struct Index {
    conn: Connection,
    path: Column,
    size: Column,
    rev: Column,
}

impl Index {
    fn new(entries: &[(&str, i64, &str)]) -> Self {
        let path = Column::new("path", ColumnType::Path);
        let size = Column::new("size", ColumnType::Integer);
        let rev = Column::new("rev", ColumnType::Text);

        let conn = Connection::open_in_memory().unwrap();
        conn.execute(
            &format!(
                "CREATE TABLE entries ({} {} PRIMARY KEY, {} {}, {} {})",
                path.name(),
                path.column_type().sql_type(),
                size.name(),
                size.column_type().sql_type(),
                rev.name(),
                rev.column_type().sql_type(),
            ),
            [],
        )
        .unwrap();

        let index = Self {
            conn,
            path,
            size,
            rev,
        };
        for (entry_path, entry_size, entry_rev) in entries {
            index.insert(entry_path, Some(*entry_size), entry_rev);
        }
        index
    }

    fn insert(&self, path: &str, size: Option<i64>, rev: &str) {
        self.conn
            .execute(
                "INSERT INTO entries (path, size, rev) VALUES (?1, ?2, ?3)",
                params![path.as_bytes(), size, rev],
            )
            .unwrap();
    }

    /// Paths selected by the clause, sorted.
    fn select(&self, clause: &Clause) -> Vec<String> {
        self.rows(clause)
            .into_iter()
            .map(|row| match row.get("path") {
                Some(SqlValue::Blob(bytes)) => String::from_utf8(bytes.clone()).unwrap(),
                other => panic!("unexpected path value {other:?}"),
            })
            .collect()
    }

    fn rows(&self, clause: &Clause) -> Vec<Row> {
        let mut sql = String::from("SELECT path, size, rev FROM entries");
        if !clause.is_empty() {
            sql.push_str(" WHERE ");
            sql.push_str(clause.text());
        }
        sql.push_str(" ORDER BY path");

        let mut stmt = self.conn.prepare(&sql).unwrap();
        let args = clause.args().iter().map(to_sqlite);
        let rows = stmt
            .query_map(params_from_iter(args), |row| {
                Ok(Row::new()
                    .with("path", SqlValue::Blob(row.get(0)?))
                    .with(
                        "size",
                        row.get::<_, Option<i64>>(1)?
                            .map_or(SqlValue::Null, SqlValue::Integer),
                    )
                    .with("rev", SqlValue::Text(row.get(2)?)))
            })
            .unwrap()
            .collect::<rusqlite::Result<Vec<_>>>()
            .unwrap();
        rows
    }
}

fn to_sqlite(value: &SqlValue) -> SqliteValue {
    match value {
        SqlValue::Null => SqliteValue::Null,
        SqlValue::Integer(number) => SqliteValue::Integer(*number),
        SqlValue::Real(number) => SqliteValue::Real(*number),
        SqlValue::Text(text) => SqliteValue::Text(text.clone()),
        SqlValue::Blob(bytes) => SqliteValue::Blob(bytes.clone()),
    }
}

fn sample() -> Index {
    Index::new(&[
        ("/a", 0, "r1"),
        ("/a/b", 0, "r2"),
        ("/a/b/c", 12, "r3"),
        ("/a/b/c/d.txt", 0, "r4"),
        ("/a/bc", 7, "r5"),
        ("/sync/docs", 0, "r6"),
        ("/sync/docs/report.pdf", 2048, "r7"),
        ("/sync/docs/empty.txt", 0, "r8"),
        ("/sync/docs-old/report.pdf", 1024, "r9"),
    ])
}

#[test]
fn path_tree_selects_subtree_only() {
    let index = sample();
    let query = Query::path_tree(&index.path, "/a/b").unwrap();

    assert_eq!(
        index.select(&query.compile()),
        vec!["/a/b", "/a/b/c", "/a/b/c/d.txt"]
    );
}

#[test]
fn root_path_tree_selects_everything() {
    let index = sample();
    let query = Query::path_tree(&index.path, "/").unwrap();
    assert_eq!(index.select(&query.compile()).len(), 9);
}

#[test]
fn end_to_end_scenario() {
    let index = sample();
    let query = Query::and([
        Query::path_tree(&index.path, "/sync/docs").unwrap(),
        Query::negate(Query::matching(&index.size, 0_i64)),
    ]);

    assert_eq!(index.select(&query.compile()), vec!["/sync/docs/report.pdf"]);
}

#[test]
fn all_and_not_all() {
    let index = sample();
    assert_eq!(index.select(&Query::all().compile()).len(), 9);
    assert!(index
        .select(&Query::negate(Query::all()).compile())
        .is_empty());
}

#[test]
fn or_of_matches() {
    let index = sample();
    let query = Query::or([
        Query::matching(&index.rev, "r5"),
        Query::matching(&index.rev, "r9"),
        Query::matching(&index.rev, "missing"),
    ]);

    assert_eq!(
        index.select(&query.compile()),
        vec!["/a/bc", "/sync/docs-old/report.pdf"]
    );
}

#[test]
fn hostile_values_are_bound_not_interpolated() {
    let index = sample();
    let query = Query::matching(&index.rev, "r1' OR '1'='1");
    assert!(index.select(&query.compile()).is_empty());
}

#[test]
fn optimized_query_selects_same_rows() {
    let index = sample();
    let query = Query::and([
        Query::and([Query::path_tree(&index.path, "/a").unwrap()]),
        Query::and([
            Query::negate(Query::matching(&index.size, 0_i64)),
            Query::all(),
        ]),
    ]);
    let optimized = optimize_query(query.clone());

    assert_ne!(query.compile().text(), optimized.compile().text());
    assert_eq!(
        index.select(&query.compile()),
        index.select(&optimized.compile())
    );
    assert_eq!(index.select(&optimized.compile()), vec!["/a/b/c", "/a/bc"]);
}

#[test]
fn compiled_clause_agrees_with_fallback_matcher() {
    let index = sample();
    index.insert("/sync/docs/folder", None, "r10");
    let queries = [
        Query::path_tree(&index.path, "/sync/docs").unwrap(),
        Query::and([
            Query::path_tree(&index.path, "/sync/docs").unwrap(),
            Query::negate(Query::matching(&index.size, 0_i64)),
        ]),
        Query::matching(&index.size, Value::Null),
        Query::negate(Query::matching(&index.size, Value::Null)),
        Query::negate(Query::matching(&index.size, 0_i64)),
        Query::or([
            Query::matching(&index.rev, "r10"),
            Query::negate(Query::matching(&index.size, 2048_i64)),
        ]),
        Query::negate(Query::or([
            Query::matching(&index.size, 0_i64),
            Query::path_tree(&index.path, "/a").unwrap(),
        ])),
        Query::or([
            Query::path_tree(&index.path, "/a/b/c").unwrap(),
            Query::matching(&index.size, 7_i64),
        ]),
        Query::negate(Query::and([
            Query::path_tree(&index.path, "/a").unwrap(),
            Query::matching(&index.size, 0_i64),
        ])),
    ];
    let all_rows = index.rows(&Query::all().compile());
    assert_eq!(all_rows.len(), 10);

    for query in &queries {
        let from_engine = index.rows(&query.compile());
        let from_matcher: Vec<_> = all_rows
            .iter()
            .filter(|row| query.matches(row))
            .cloned()
            .collect();
        assert_eq!(from_engine, from_matcher, "{:?}", query.compile());
    }
}

#[test]
fn null_size_row_is_not_selected_by_negation() {
    let index = sample();
    index.insert("/sync/docs/folder", None, "r10");
    let query = Query::and([
        Query::path_tree(&index.path, "/sync/docs").unwrap(),
        Query::negate(Query::matching(&index.size, 0_i64)),
    ]);

    assert_eq!(index.select(&query.compile()), vec!["/sync/docs/report.pdf"]);
    assert!(index.select(&Query::matching(&index.size, Value::Null).compile()).is_empty());
}

#[test]
fn negated_deferred_query_filters_out_of_band() {
    let index = sample();
    let large = |row: &Row| matches!(row.get("size"), Some(SqlValue::Integer(size)) if *size > 1000);
    let query = Query::negate(Query::deferred("large", large));

    assert!(query.needs_fallback());
    let clause = query.compile();
    assert!(clause.is_empty());

    let kept: Vec<_> = index
        .rows(&clause)
        .into_iter()
        .filter(|row| query.matches(row))
        .collect();
    assert_eq!(kept.len(), 7);
    assert!(kept
        .iter()
        .all(|row| !matches!(row.get("size"), Some(SqlValue::Integer(2048 | 1024)))));
}
