use obralog::db::initialize::init_db;
use obralog::db::pool::DbPool;
use obralog::db::stats;

mod common;
use common::{count, setup_test_db};

#[test]
fn test_migrations_are_idempotent() {
    let db_path = setup_test_db("migrations_idempotent");
    let pool = DbPool::open_initialized(&db_path).unwrap();
    let applied = count(
        &pool.conn,
        "SELECT COUNT(*) FROM log WHERE operation = 'migration_applied'",
    );
    assert!(applied >= 2);

    init_db(&pool.conn).unwrap();
    init_db(&pool.conn).unwrap();
    assert_eq!(
        count(
            &pool.conn,
            "SELECT COUNT(*) FROM log WHERE operation = 'migration_applied'"
        ),
        applied
    );
}

#[test]
fn test_legacy_week_column_is_renamed() {
    let db_path = setup_test_db("migrations_legacy_weeks");
    {
        let pool = DbPool::new(&db_path).unwrap();
        pool.conn
            .execute_batch(
                "CREATE TABLE weeks (
                     id INTEGER PRIMARY KEY AUTOINCREMENT,
                     year INTEGER NOT NULL,
                     kalenderwoche INTEGER NOT NULL,
                     UNIQUE (year, kalenderwoche)
                 );
                 INSERT INTO weeks (year, kalenderwoche) VALUES (2024, 48);",
            )
            .unwrap();
    }

    let pool = DbPool::open_initialized(&db_path).unwrap();
    let wn: i64 = pool
        .conn
        .query_row(
            "SELECT week_number FROM weeks WHERE year = 2024",
            [],
            |r| r.get(0),
        )
        .unwrap();
    assert_eq!(wn, 48);
    assert_eq!(
        count(
            &pool.conn,
            "SELECT COUNT(*) FROM log WHERE target = '20250110_0002_rename_kalenderwoche'"
        ),
        1
    );
}

#[test]
fn test_foreign_keys_are_enforced() {
    let db_path = setup_test_db("migrations_foreign_keys");
    let pool = DbPool::open_initialized(&db_path).unwrap();

    let res = pool.conn.execute(
        "INSERT INTO attendance (worker_id, week_id, day, half, site_id, sort_order)
         VALUES (1, 1, 0, 1, 1, 0)",
        [],
    );
    assert!(res.is_err());
}

#[test]
fn test_fresh_store_has_no_integrity_problems() {
    let db_path = setup_test_db("migrations_integrity");
    let pool = DbPool::open_initialized(&db_path).unwrap();
    assert!(stats::integrity_problems(&pool.conn).unwrap().is_empty());
}
