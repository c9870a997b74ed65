use crate::models::{
    BrandRow, CampaignRow, InfluencerFilter, InfluencerRow, InfluencerUpdate, MessageRow, NewBrand,
    NewCampaign, NewInfluencer, NewMessage, UserRow,
};
use crate::Database;
use anyhow::{Result, anyhow};
use chrono::{DateTime, SecondsFormat, Utc};
use rusqlite::types::Value;
use rusqlite::{Connection, Row};
use uuid::Uuid;

/// Hard ceiling on a single influencer listing.
pub const MAX_INFLUENCER_LIMIT: u32 = 200;

const USER_COLUMNS: &str = "id, username, password, email, created_at";
const BRAND_COLUMNS: &str =
    "id, name, description, target_audience, website, user_id, created_at";
const INFLUENCER_COLUMNS: &str = "id, name, handle, platform, category, followers, avg_views, \
     email, avatar, channel_id, brand_fit_score, recent_content, created_at";
const CAMPAIGN_COLUMNS: &str = "id, name, description, status, brand_id, user_id, created_at";
const MESSAGE_COLUMNS: &str = "id, subject, content, influencer_id, campaign_id, user_id, \
     status, sent_at, email_used, ai_generated, created_at";

impl Database {
    // -- Users --

    pub fn create_user(
        &self,
        username: &str,
        password_hash: &str,
        email: Option<&str>,
    ) -> Result<UserRow> {
        let id = Uuid::new_v4().to_string();
        self.with_conn_mut(|conn| {
            conn.execute(
                "INSERT INTO users (id, username, password, email) VALUES (?1, ?2, ?3, ?4)",
                rusqlite::params![id, username, password_hash, email],
            )?;
            query_user_by_id(conn, &id)?.ok_or_else(|| anyhow!("User vanished after insert: {}", id))
        })
    }

    pub fn get_user(&self, id: &Uuid) -> Result<Option<UserRow>> {
        self.with_conn(|conn| query_user_by_id(conn, &id.to_string()))
    }

    pub fn get_user_by_username(&self, username: &str) -> Result<Option<UserRow>> {
        self.with_conn(|conn| {
            let sql = format!("SELECT {USER_COLUMNS} FROM users WHERE username = ?1");
            conn.query_row(&sql, [username], user_from_row).optional()
        })
    }

    // -- Brands --

    pub fn create_brand(&self, brand: &NewBrand) -> Result<BrandRow> {
        let id = Uuid::new_v4().to_string();
        self.with_conn_mut(|conn| {
            conn.execute(
                "INSERT INTO brands (id, name, description, target_audience, website, user_id)
                 VALUES (?1, ?2, ?3, ?4, ?5, ?6)",
                rusqlite::params![
                    id,
                    brand.name,
                    brand.description,
                    brand.target_audience,
                    brand.website,
                    brand.user_id.to_string(),
                ],
            )?;
            query_brand_by_id(conn, &id)?.ok_or_else(|| anyhow!("Brand vanished after insert: {}", id))
        })
    }

    pub fn get_brand(&self, id: &Uuid) -> Result<Option<BrandRow>> {
        self.with_conn(|conn| query_brand_by_id(conn, &id.to_string()))
    }

    pub fn list_brands_by_user(&self, user_id: &Uuid) -> Result<Vec<BrandRow>> {
        self.with_conn(|conn| {
            let sql = format!(
                "SELECT {BRAND_COLUMNS} FROM brands WHERE user_id = ?1
                 ORDER BY created_at DESC, rowid DESC"
            );
            let mut stmt = conn.prepare(&sql)?;
            let rows = stmt
                .query_map([user_id.to_string()], brand_from_row)?
                .collect::<std::result::Result<Vec<_>, _>>()?;
            Ok(rows)
        })
    }

    // -- Campaigns --

    pub fn create_campaign(&self, campaign: &NewCampaign) -> Result<CampaignRow> {
        let id = Uuid::new_v4().to_string();
        self.with_conn_mut(|conn| {
            conn.execute(
                "INSERT INTO campaigns (id, name, description, status, brand_id, user_id)
                 VALUES (?1, ?2, ?3, ?4, ?5, ?6)",
                rusqlite::params![
                    id,
                    campaign.name,
                    campaign.description,
                    campaign.status.as_str(),
                    campaign.brand_id.to_string(),
                    campaign.user_id.to_string(),
                ],
            )?;
            let sql = format!("SELECT {CAMPAIGN_COLUMNS} FROM campaigns WHERE id = ?1");
            conn.query_row(&sql, [&id], campaign_from_row)
                .optional()?
                .ok_or_else(|| anyhow!("Campaign vanished after insert: {}", id))
        })
    }

    pub fn list_campaigns_by_user(&self, user_id: &Uuid) -> Result<Vec<CampaignRow>> {
        self.with_conn(|conn| {
            let sql = format!(
                "SELECT {CAMPAIGN_COLUMNS} FROM campaigns WHERE user_id = ?1
                 ORDER BY created_at DESC, rowid DESC"
            );
            let mut stmt = conn.prepare(&sql)?;
            let rows = stmt
                .query_map([user_id.to_string()], campaign_from_row)?
                .collect::<std::result::Result<Vec<_>, _>>()?;
            Ok(rows)
        })
    }

    // -- Influencers --

    pub fn list_influencers(&self, filter: &InfluencerFilter) -> Result<Vec<InfluencerRow>> {
        self.with_conn(|conn| query_influencers(conn, filter))
    }

    pub fn get_influencer(&self, id: &Uuid) -> Result<Option<InfluencerRow>> {
        self.with_conn(|conn| query_influencer_by_id(conn, &id.to_string()))
    }

    /// Indexed dedup lookup: a match on channel id wins over a match on name.
    pub fn find_influencer_by_dedup_key(
        &self,
        channel_id: Option<&str>,
        name: &str,
    ) -> Result<Option<InfluencerRow>> {
        self.with_conn(|conn| {
            if let Some(channel_id) = channel_id {
                let sql = format!("SELECT {INFLUENCER_COLUMNS} FROM influencers WHERE channel_id = ?1");
                if let Some(row) = conn.query_row(&sql, [channel_id], influencer_from_row).optional()? {
                    return Ok(Some(row));
                }
            }
            let sql = format!("SELECT {INFLUENCER_COLUMNS} FROM influencers WHERE name = ?1");
            conn.query_row(&sql, [name], influencer_from_row).optional()
        })
    }

    /// Insert unless the dedup key is already taken.
    /// Returns `None` when an existing row holds the channel id or the name.
    /// Other constraint violations are errors.
    pub fn insert_influencer_if_new(&self, influencer: &NewInfluencer) -> Result<Option<InfluencerRow>> {
        let id = Uuid::new_v4().to_string();
        let recent_content = serde_json::to_string(&influencer.recent_content)?;

        self.with_conn_mut(|conn| {
            let inserted = conn.execute(
                "INSERT INTO influencers (
                    id, name, handle, platform, category, followers, avg_views,
                    email, avatar, channel_id, brand_fit_score, recent_content
                 ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11, ?12)
                 ON CONFLICT DO NOTHING",
                rusqlite::params![
                    id,
                    influencer.name,
                    influencer.handle,
                    influencer.platform.as_str(),
                    influencer.category,
                    influencer.followers,
                    influencer.avg_views,
                    influencer.email,
                    influencer.avatar,
                    influencer.channel_id,
                    influencer.brand_fit_score,
                    recent_content,
                ],
            )?;

            if inserted == 0 {
                return Ok(None);
            }
            query_influencer_by_id(conn, &id)
        })
    }

    pub fn update_influencer(
        &self,
        id: &Uuid,
        update: &InfluencerUpdate,
    ) -> Result<Option<InfluencerRow>> {
        let id = id.to_string();
        self.with_conn_mut(|conn| {
            let changed = conn.execute(
                "UPDATE influencers SET
                    avg_views = COALESCE(?2, avg_views),
                    email = COALESCE(?3, email),
                    avatar = COALESCE(?4, avatar),
                    brand_fit_score = COALESCE(?5, brand_fit_score)
                 WHERE id = ?1",
                rusqlite::params![id, update.avg_views, update.email, update.avatar, update.brand_fit_score],
            )?;

            if changed == 0 {
                return Ok(None);
            }
            query_influencer_by_id(conn, &id)
        })
    }

    // -- Outreach messages --

    pub fn create_message(&self, message: &NewMessage) -> Result<MessageRow> {
        let id = Uuid::new_v4().to_string();
        self.with_conn_mut(|conn| {
            conn.execute(
                "INSERT INTO outreach_messages (
                    id, subject, content, influencer_id, campaign_id, user_id, email_used, ai_generated
                 ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8)",
                rusqlite::params![
                    id,
                    message.subject,
                    message.content,
                    message.influencer_id.to_string(),
                    message.campaign_id.map(|c| c.to_string()),
                    message.user_id.to_string(),
                    message.email_used,
                    message.ai_generated,
                ],
            )?;
            query_message_by_id(conn, &id)?.ok_or_else(|| anyhow!("Message vanished after insert: {}", id))
        })
    }

    pub fn get_message(&self, id: &Uuid) -> Result<Option<MessageRow>> {
        self.with_conn(|conn| query_message_by_id(conn, &id.to_string()))
    }

    /// Newest first.
    pub fn list_messages_by_influencer(&self, influencer_id: &Uuid) -> Result<Vec<MessageRow>> {
        self.with_conn(|conn| {
            let sql = format!(
                "SELECT {MESSAGE_COLUMNS} FROM outreach_messages WHERE influencer_id = ?1
                 ORDER BY created_at DESC, rowid DESC"
            );
            let mut stmt = conn.prepare(&sql)?;
            let rows = stmt
                .query_map([influencer_id.to_string()], message_from_row)?
                .collect::<std::result::Result<Vec<_>, _>>()?;
            Ok(rows)
        })
    }

    pub fn update_message_draft(
        &self,
        id: &Uuid,
        subject: Option<&str>,
        content: Option<&str>,
    ) -> Result<Option<MessageRow>> {
        let id = id.to_string();
        self.with_conn_mut(|conn| {
            let changed = conn.execute(
                "UPDATE outreach_messages SET
                    subject = COALESCE(?2, subject),
                    content = COALESCE(?3, content)
                 WHERE id = ?1",
                rusqlite::params![id, subject, content],
            )?;

            if changed == 0 {
                return Ok(None);
            }
            query_message_by_id(conn, &id)
        })
    }

    /// Only a draft moves to `sent`; `None` when the message is missing or
    /// already left draft.
    pub fn mark_message_sent(
        &self,
        id: &Uuid,
        email_used: &str,
        sent_at: DateTime<Utc>,
    ) -> Result<Option<MessageRow>> {
        let id = id.to_string();
        let sent_at = sent_at.to_rfc3339_opts(SecondsFormat::Millis, true);
        self.with_conn_mut(|conn| {
            let changed = conn.execute(
                "UPDATE outreach_messages SET status = 'sent', sent_at = ?2, email_used = ?3
                 WHERE id = ?1 AND status = 'draft'",
                rusqlite::params![id, sent_at, email_used],
            )?;

            if changed == 0 {
                return Ok(None);
            }
            query_message_by_id(conn, &id)
        })
    }
}

fn query_user_by_id(conn: &Connection, id: &str) -> Result<Option<UserRow>> {
    let sql = format!("SELECT {USER_COLUMNS} FROM users WHERE id = ?1");
    conn.query_row(&sql, [id], user_from_row).optional()
}

fn query_brand_by_id(conn: &Connection, id: &str) -> Result<Option<BrandRow>> {
    let sql = format!("SELECT {BRAND_COLUMNS} FROM brands WHERE id = ?1");
    conn.query_row(&sql, [id], brand_from_row).optional()
}

fn query_influencer_by_id(conn: &Connection, id: &str) -> Result<Option<InfluencerRow>> {
    let sql = format!("SELECT {INFLUENCER_COLUMNS} FROM influencers WHERE id = ?1");
    conn.query_row(&sql, [id], influencer_from_row).optional()
}

fn query_message_by_id(conn: &Connection, id: &str) -> Result<Option<MessageRow>> {
    let sql = format!("SELECT {MESSAGE_COLUMNS} FROM outreach_messages WHERE id = ?1");
    conn.query_row(&sql, [id], message_from_row).optional()
}

fn query_influencers(conn: &Connection, filter: &InfluencerFilter) -> Result<Vec<InfluencerRow>> {
    let mut clauses: Vec<&str> = Vec::new();
    let mut params: Vec<Value> = Vec::new();

    if let Some(category) = &filter.category {
        clauses.push("category = ?");
        params.push(Value::Text(category.clone()));
    }
    if let Some(platform) = filter.platform {
        clauses.push("platform = ?");
        params.push(Value::Text(platform.as_str().to_string()));
    }
    if let Some(min) = filter.min_followers {
        clauses.push("followers >= ?");
        params.push(Value::Integer(min));
    }
    if let Some(max) = filter.max_followers {
        clauses.push("followers < ?");
        params.push(Value::Integer(max));
    }

    let where_clause = if clauses.is_empty() {
        String::new()
    } else {
        format!("WHERE {}", clauses.join(" AND "))
    };
    params.push(Value::Integer(filter.limit.min(MAX_INFLUENCER_LIMIT) as i64));

    let sql = format!(
        "SELECT {INFLUENCER_COLUMNS} FROM influencers {where_clause}
         ORDER BY followers DESC, rowid ASC
         LIMIT ?"
    );

    let mut stmt = conn.prepare(&sql)?;
    let rows = stmt
        .query_map(rusqlite::params_from_iter(params), influencer_from_row)?
        .collect::<std::result::Result<Vec<_>, _>>()?;

    Ok(rows)
}

fn user_from_row(row: &Row<'_>) -> rusqlite::Result<UserRow> {
    Ok(UserRow {
        id: row.get(0)?,
        username: row.get(1)?,
        password: row.get(2)?,
        email: row.get(3)?,
        created_at: row.get(4)?,
    })
}

fn brand_from_row(row: &Row<'_>) -> rusqlite::Result<BrandRow> {
    Ok(BrandRow {
        id: row.get(0)?,
        name: row.get(1)?,
        description: row.get(2)?,
        target_audience: row.get(3)?,
        website: row.get(4)?,
        user_id: row.get(5)?,
        created_at: row.get(6)?,
    })
}

fn influencer_from_row(row: &Row<'_>) -> rusqlite::Result<InfluencerRow> {
    Ok(InfluencerRow {
        id: row.get(0)?,
        name: row.get(1)?,
        handle: row.get(2)?,
        platform: row.get(3)?,
        category: row.get(4)?,
        followers: row.get(5)?,
        avg_views: row.get(6)?,
        email: row.get(7)?,
        avatar: row.get(8)?,
        channel_id: row.get(9)?,
        brand_fit_score: row.get(10)?,
        recent_content: row.get(11)?,
        created_at: row.get(12)?,
    })
}

fn campaign_from_row(row: &Row<'_>) -> rusqlite::Result<CampaignRow> {
    Ok(CampaignRow {
        id: row.get(0)?,
        name: row.get(1)?,
        description: row.get(2)?,
        status: row.get(3)?,
        brand_id: row.get(4)?,
        user_id: row.get(5)?,
        created_at: row.get(6)?,
    })
}

fn message_from_row(row: &Row<'_>) -> rusqlite::Result<MessageRow> {
    Ok(MessageRow {
        id: row.get(0)?,
        subject: row.get(1)?,
        content: row.get(2)?,
        influencer_id: row.get(3)?,
        campaign_id: row.get(4)?,
        user_id: row.get(5)?,
        status: row.get(6)?,
        sent_at: row.get(7)?,
        email_used: row.get(8)?,
        ai_generated: row.get(9)?,
        created_at: row.get(10)?,
    })
}

/// Extension trait for optional query results
trait OptionalExt<T> {
    fn optional(self) -> Result<Option<T>>;
}

impl<T> OptionalExt<T> for std::result::Result<T, rusqlite::Error> {
    fn optional(self) -> Result<Option<T>> {
        match self {
            Ok(val) => Ok(Some(val)),
            Err(rusqlite::Error::QueryReturnedNoRows) => Ok(None),
            Err(e) => Err(e.into()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use icy_types::{MessageStatus, Platform};

    fn influencer(name: &str, channel_id: Option<&str>, followers: i64) -> NewInfluencer {
        NewInfluencer {
            name: name.to_string(),
            handle: format!("@{}", name.to_lowercase().replace(' ', "")),
            platform: Platform::Youtube,
            category: "tech".to_string(),
            followers,
            avg_views: Some(followers / 20),
            email: None,
            avatar: None,
            channel_id: channel_id.map(str::to_string),
            brand_fit_score: Some(80),
            recent_content: vec!["product reviews".to_string()],
        }
    }

    fn seeded_message(db: &Database) -> MessageRow {
        let user = db.create_user("owner", "hash", None).unwrap();
        let inf = db
            .insert_influencer_if_new(&influencer("Alex Chen", Some("UC1"), 5_000))
            .unwrap()
            .unwrap();
        db.create_message(&NewMessage {
            subject: "Hello".to_string(),
            content: "Line one\nLine two".to_string(),
            influencer_id: inf.id.parse().unwrap(),
            campaign_id: None,
            user_id: user.id.parse().unwrap(),
            email_used: Some(String::new()),
            ai_generated: true,
        })
        .unwrap()
    }

    #[test]
    fn test_influencers_sorted_and_limited() {
        let db = Database::open_in_memory().unwrap();
        for (i, followers) in [3_000, 250_000, 12_000, 1_200_000, 40_000].into_iter().enumerate() {
            let name = format!("Creator {}", i);
            db.insert_influencer_if_new(&influencer(&name, None, followers)).unwrap();
        }

        let rows = db
            .list_influencers(&InfluencerFilter { limit: 3, ..Default::default() })
            .unwrap();
        let followers: Vec<i64> = rows.iter().map(|r| r.followers).collect();
        assert_eq!(followers, vec![1_200_000, 250_000, 40_000]);
    }

    #[test]
    fn test_influencer_filters() {
        let db = Database::open_in_memory().unwrap();
        db.insert_influencer_if_new(&influencer("Small", None, 5_000)).unwrap();
        db.insert_influencer_if_new(&influencer("Medium", None, 50_000)).unwrap();
        let mut beauty = influencer("Glam", None, 60_000);
        beauty.category = "beauty".to_string();
        db.insert_influencer_if_new(&beauty).unwrap();

        let rows = db
            .list_influencers(&InfluencerFilter {
                category: Some("tech".to_string()),
                min_followers: Some(10_000),
                max_followers: Some(100_000),
                ..Default::default()
            })
            .unwrap();
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].name, "Medium");

        let rows = db
            .list_influencers(&InfluencerFilter {
                platform: Some(Platform::Instagram),
                ..Default::default()
            })
            .unwrap();
        assert!(rows.is_empty());
    }

    #[test]
    fn test_dedup_constraint_on_channel_and_name() {
        let db = Database::open_in_memory().unwrap();
        assert!(db.insert_influencer_if_new(&influencer("Alex", Some("UC1"), 5_000)).unwrap().is_some());

        // Same channel, different name
        assert!(db.insert_influencer_if_new(&influencer("Alex B", Some("UC1"), 5_000)).unwrap().is_none());
        // Same name, different channel
        assert!(db.insert_influencer_if_new(&influencer("Alex", Some("UC2"), 5_000)).unwrap().is_none());
        // Rows without a channel id only collide on name
        assert!(db.insert_influencer_if_new(&influencer("Sam", None, 5_000)).unwrap().is_some());
        assert!(db.insert_influencer_if_new(&influencer("Kim", None, 5_000)).unwrap().is_some());

        let found = db.find_influencer_by_dedup_key(Some("UC1"), "nobody").unwrap().unwrap();
        assert_eq!(found.name, "Alex");
        let found = db.find_influencer_by_dedup_key(None, "Sam").unwrap();
        assert!(found.is_some());
        assert!(db.find_influencer_by_dedup_key(Some("UC9"), "nobody").unwrap().is_none());
    }

    #[test]
    fn test_check_violations_are_errors_not_duplicates() {
        let db = Database::open_in_memory().unwrap();

        let mut unscored = influencer("Zero", Some("UC1"), 5_000);
        unscored.brand_fit_score = Some(0);
        assert!(db.insert_influencer_if_new(&unscored).is_err());

        assert!(db.insert_influencer_if_new(&influencer("Negative", Some("UC2"), -1)).is_err());
        assert!(db.find_influencer_by_dedup_key(Some("UC1"), "Zero").unwrap().is_none());
    }

    #[test]
    fn test_influencer_round_trips_recent_content() {
        let db = Database::open_in_memory().unwrap();
        let row = db
            .insert_influencer_if_new(&influencer("Alex", Some("UC1"), 5_000))
            .unwrap()
            .unwrap();
        let model = row.into_model().unwrap();
        assert_eq!(model.recent_content, vec!["product reviews".to_string()]);
        assert_eq!(model.platform, Platform::Youtube);
    }

    #[test]
    fn test_update_influencer_partial() {
        let db = Database::open_in_memory().unwrap();
        let row = db
            .insert_influencer_if_new(&influencer("Alex", Some("UC1"), 5_000))
            .unwrap()
            .unwrap();
        let id: Uuid = row.id.parse().unwrap();

        let updated = db
            .update_influencer(&id, &InfluencerUpdate { brand_fit_score: Some(42), ..Default::default() })
            .unwrap()
            .unwrap();
        assert_eq!(updated.brand_fit_score, Some(42));
        assert_eq!(updated.avg_views, Some(250));

        assert!(db.update_influencer(&Uuid::new_v4(), &InfluencerUpdate::default()).unwrap().is_none());
    }

    #[test]
    fn test_message_lifecycle() {
        let db = Database::open_in_memory().unwrap();
        let msg = seeded_message(&db);
        assert_eq!(msg.status().unwrap(), MessageStatus::Draft);
        assert!(msg.sent_at.is_none());

        let id: Uuid = msg.id.parse().unwrap();
        let edited = db.update_message_draft(&id, Some("New subject"), None).unwrap().unwrap();
        assert_eq!(edited.subject, "New subject");
        assert_eq!(edited.content, "Line one\nLine two");

        let sent = db.mark_message_sent(&id, "alex@example.com", Utc::now()).unwrap().unwrap();
        let model = sent.into_model().unwrap();
        assert_eq!(model.status, MessageStatus::Sent);
        assert!(model.sent_at.is_some());
        assert_eq!(model.email_used.as_deref(), Some("alex@example.com"));

        assert!(db.mark_message_sent(&Uuid::new_v4(), "x@example.com", Utc::now()).unwrap().is_none());
    }

    #[test]
    fn test_mark_sent_only_moves_drafts() {
        let db = Database::open_in_memory().unwrap();
        let id: Uuid = seeded_message(&db).id.parse().unwrap();

        let first = db.mark_message_sent(&id, "alex@example.com", Utc::now()).unwrap().unwrap();
        let later = Utc::now() + chrono::Duration::minutes(5);
        assert!(db.mark_message_sent(&id, "other@example.com", later).unwrap().is_none());

        let stored = db.get_message(&id).unwrap().unwrap();
        assert_eq!(stored.sent_at, first.sent_at);
        assert_eq!(stored.email_used.as_deref(), Some("alex@example.com"));
    }

    #[test]
    fn test_messages_newest_first() {
        let db = Database::open_in_memory().unwrap();
        let first = seeded_message(&db);
        let influencer_id: Uuid = first.influencer_id.parse().unwrap();
        let second = db
            .create_message(&NewMessage {
                subject: "Follow-up".to_string(),
                content: "Checking in".to_string(),
                influencer_id,
                campaign_id: None,
                user_id: first.user_id.parse().unwrap(),
                email_used: None,
                ai_generated: false,
            })
            .unwrap();

        let rows = db.list_messages_by_influencer(&influencer_id).unwrap();
        let ids: Vec<&str> = rows.iter().map(|r| r.id.as_str()).collect();
        assert_eq!(ids, vec![second.id.as_str(), first.id.as_str()]);
    }

    #[test]
    fn test_brands_and_campaigns_by_user() {
        let db = Database::open_in_memory().unwrap();
        let user = db.create_user("owner", "hash", Some("owner@example.com")).unwrap();
        let user_id: Uuid = user.id.parse().unwrap();

        let brand = db
            .create_brand(&NewBrand {
                name: "Acme".to_string(),
                description: Some("Rocket skates".to_string()),
                target_audience: None,
                website: None,
                user_id,
            })
            .unwrap();
        let campaign = db
            .create_campaign(&NewCampaign {
                name: "Spring launch".to_string(),
                description: None,
                status: Default::default(),
                brand_id: brand.id.parse().unwrap(),
                user_id,
            })
            .unwrap();

        assert_eq!(db.list_brands_by_user(&user_id).unwrap().len(), 1);
        let campaigns = db.list_campaigns_by_user(&user_id).unwrap();
        assert_eq!(campaigns.len(), 1);
        assert_eq!(campaigns[0].status, "active");
        assert_eq!(campaigns[0].id, campaign.id);
        assert!(db.list_brands_by_user(&Uuid::new_v4()).unwrap().is_empty());
    }

    #[test]
    fn test_username_is_unique() {
        let db = Database::open_in_memory().unwrap();
        db.create_user("testuser", "hash", None).unwrap();
        assert!(db.create_user("testuser", "hash", None).is_err());
        assert!(db.get_user_by_username("testuser").unwrap().is_some());
        assert!(db.get_user_by_username("other").unwrap().is_none());
    }
}
