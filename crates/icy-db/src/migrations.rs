use anyhow::Result;
use rusqlite::Connection;
use tracing::info;

pub fn run(conn: &Connection) -> Result<()> {
    conn.execute_batch("CREATE TABLE IF NOT EXISTS schema_version (version INTEGER NOT NULL);")?;

    let version: i64 =
        conn.query_row("SELECT COALESCE(MAX(version), 0) FROM schema_version", [], |r| r.get(0))?;

    if version < 1 {
        info!("Running migration v1 (initial schema)");
        conn.execute_batch(
            "
            CREATE TABLE users (
                id          TEXT PRIMARY KEY,
                username    TEXT NOT NULL UNIQUE,
                password    TEXT NOT NULL,
                email       TEXT,
                created_at  TEXT NOT NULL DEFAULT (strftime('%Y-%m-%dT%H:%M:%fZ', 'now'))
            );

            CREATE TABLE brands (
                id              TEXT PRIMARY KEY,
                name            TEXT NOT NULL,
                description     TEXT,
                target_audience TEXT,
                website         TEXT,
                user_id         TEXT NOT NULL REFERENCES users(id),
                created_at      TEXT NOT NULL DEFAULT (strftime('%Y-%m-%dT%H:%M:%fZ', 'now'))
            );

            CREATE INDEX idx_brands_user ON brands(user_id, created_at);

            CREATE TABLE influencers (
                id              TEXT PRIMARY KEY,
                name            TEXT NOT NULL,
                handle          TEXT NOT NULL,
                platform        TEXT NOT NULL,
                category        TEXT NOT NULL,
                followers       INTEGER NOT NULL CHECK (followers >= 0),
                avg_views       INTEGER,
                email           TEXT,
                avatar          TEXT,
                channel_id      TEXT,
                brand_fit_score INTEGER CHECK (brand_fit_score BETWEEN 1 AND 100),
                recent_content  TEXT NOT NULL DEFAULT '[]',
                created_at      TEXT NOT NULL DEFAULT (strftime('%Y-%m-%dT%H:%M:%fZ', 'now'))
            );

            -- Dedup key: external channel id first, then display name.
            CREATE UNIQUE INDEX idx_influencers_channel
                ON influencers(channel_id) WHERE channel_id IS NOT NULL;
            CREATE UNIQUE INDEX idx_influencers_name ON influencers(name);
            CREATE INDEX idx_influencers_followers ON influencers(followers DESC);

            CREATE TABLE campaigns (
                id          TEXT PRIMARY KEY,
                name        TEXT NOT NULL,
                description TEXT,
                status      TEXT NOT NULL DEFAULT 'active',
                brand_id    TEXT NOT NULL REFERENCES brands(id),
                user_id     TEXT NOT NULL REFERENCES users(id),
                created_at  TEXT NOT NULL DEFAULT (strftime('%Y-%m-%dT%H:%M:%fZ', 'now'))
            );

            CREATE INDEX idx_campaigns_user ON campaigns(user_id, created_at);

            CREATE TABLE outreach_messages (
                id              TEXT PRIMARY KEY,
                subject         TEXT NOT NULL,
                content         TEXT NOT NULL,
                influencer_id   TEXT NOT NULL REFERENCES influencers(id),
                campaign_id     TEXT REFERENCES campaigns(id),
                user_id         TEXT NOT NULL REFERENCES users(id),
                status          TEXT NOT NULL DEFAULT 'draft',
                sent_at         TEXT,
                email_used      TEXT,
                ai_generated    INTEGER NOT NULL DEFAULT 1,
                created_at      TEXT NOT NULL DEFAULT (strftime('%Y-%m-%dT%H:%M:%fZ', 'now'))
            );

            CREATE INDEX idx_messages_influencer
                ON outreach_messages(influencer_id, created_at);

            INSERT INTO schema_version (version) VALUES (1);
            ",
        )?;
    }

    info!("Database migrations complete");
    Ok(())
}
