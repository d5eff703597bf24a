//! SQL schema for the Mysfits SQLite store.

/// Full schema DDL; idempotent thanks to `CREATE ... IF NOT EXISTS`.
pub const SCHEMA: &str = "
PRAGMA journal_mode = WAL;

CREATE TABLE IF NOT EXISTS mysfits (
    mysfit_id         TEXT PRIMARY KEY,
    name              TEXT NOT NULL,
    species           TEXT NOT NULL,
    description       TEXT NOT NULL DEFAULT '',
    age               INTEGER NOT NULL CHECK (age >= 0),
    good_evil         TEXT NOT NULL,   -- 'Good' | 'Neutral' | 'Evil'
    law_chaos         TEXT NOT NULL,   -- 'Lawful' | 'Neutral' | 'Chaotic'
    thumb_image_uri   TEXT NOT NULL DEFAULT '',
    profile_image_uri TEXT NOT NULL DEFAULT '',
    likes             INTEGER NOT NULL DEFAULT 0 CHECK (likes >= 0),
    adopted           INTEGER NOT NULL DEFAULT 0 CHECK (adopted IN (0, 1))
);

-- The two secondary indexes; the only columns filtered queries may use.
CREATE INDEX IF NOT EXISTS mysfits_good_evil_idx ON mysfits(good_evil);
CREATE INDEX IF NOT EXISTS mysfits_law_chaos_idx ON mysfits(law_chaos);

PRAGMA user_version = 1;
";

/// Column list shared by every `SELECT` so rows always decode the same way.
pub const COLUMNS: &str = "mysfit_id, name, species, description, age, \
  good_evil, law_chaos, thumb_image_uri, profile_image_uri, likes, adopted";
