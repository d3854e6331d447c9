//! Reference SQL schema for dev and test databases.
//!
//! The production `events` and `event_media` tables are owned by an external
//! editorial system; this DDL mirrors their shape so local and in-memory
//! stores behave the same. Executed once at connection startup; idempotent
//! thanks to `CREATE TABLE IF NOT EXISTS`.
//!
//! The curated views the procedure fast path looks for (`events_public`,
//! `options_continents`, `options_countries`, `options_locations`,
//! `options_groups`) are deliberately NOT created here — a database without
//! them exercises the fallback path, which is the supported baseline.

pub const SCHEMA: &str = "
PRAGMA journal_mode = WAL;
PRAGMA foreign_keys = ON;

CREATE TABLE IF NOT EXISTS events (
    id                   INTEGER PRIMARY KEY,
    title_it             TEXT,
    title_en             TEXT,
    description_it       TEXT,
    description_en       TEXT,
    short_description_it TEXT,
    short_description_en TEXT,
    group_name_it        TEXT,
    group_name_en        TEXT,
    link_it              TEXT,
    link_en              TEXT,
    continent            TEXT,
    country              TEXT,
    location             TEXT,
    latitude             REAL,
    longitude            REAL,
    year_from            INTEGER,
    year_to              INTEGER,
    event_year           INTEGER,
    exact_date           TEXT,    -- ISO 8601 calendar date
    created_at           TEXT,    -- RFC 3339 UTC
    image_url            TEXT     -- legacy single-image column
);

CREATE TABLE IF NOT EXISTS event_media (
    id                  INTEGER PRIMARY KEY,
    media_id            TEXT NOT NULL,             -- asset UUID
    event_id            INTEGER NOT NULL REFERENCES events(id),
    role                TEXT NOT NULL DEFAULT 'gallery',  -- 'cover' | 'gallery' | 'attachment'
    is_primary          INTEGER NOT NULL DEFAULT 0,
    sort_order          INTEGER NOT NULL DEFAULT 0,
    title               TEXT,
    caption             TEXT,
    alt_text            TEXT,
    bucket              TEXT,
    path                TEXT,
    mime_type           TEXT,
    checksum            TEXT,
    public_url          TEXT,
    preview_url         TEXT,
    source_url          TEXT,
    width               INTEGER,
    height              INTEGER,
    duration_seconds    REAL,
    attachment_metadata TEXT NOT NULL DEFAULT '{}',
    asset_metadata      TEXT NOT NULL DEFAULT '{}'
);

CREATE INDEX IF NOT EXISTS event_media_event_idx ON event_media(event_id);
CREATE INDEX IF NOT EXISTS events_continent_idx  ON events(continent);
CREATE INDEX IF NOT EXISTS events_country_idx    ON events(country);
CREATE INDEX IF NOT EXISTS events_year_from_idx  ON events(year_from);

PRAGMA user_version = 1;
";
