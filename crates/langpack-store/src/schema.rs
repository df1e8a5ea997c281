use rusqlite_migration::{M, Migrations};

pub fn migrations() -> Migrations<'static> {
    Migrations::new(vec![M::up(
        "CREATE TABLE registry (
            namespace   TEXT NOT NULL,
            key         TEXT NOT NULL,
            value_json  TEXT NOT NULL,
            PRIMARY KEY (namespace, key)
        );

        CREATE INDEX idx_registry_namespace ON registry(namespace);",
    )])
}
