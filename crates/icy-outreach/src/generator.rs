use std::sync::Arc;

use icy_db::{Database, InfluencerUpdate, NewMessage};
use icy_types::{Influencer, InfluencerSummary};
use tracing::{info, warn};
use uuid::Uuid;

use crate::error::{OutreachError, Result};
use crate::providers::TextGenerator;
use crate::scoring::{DEFAULT_BRAND_FIT, parse_score};
use crate::store::blocking;

/// Sender identity used in prompts when the caller names no brand.
pub const DEFAULT_BRAND_NAME: &str = "ICY Outreach Team";

/// At most this many recent content themes are quoted to the model.
pub const MAX_PROMPT_THEMES: usize = 5;

/// Generated subjects longer than this are replaced by the template.
pub const MAX_SUBJECT_CHARS: usize = 50;

#[derive(Debug, Clone)]
pub struct GenerateRequest {
    pub influencer_id: Uuid,
    /// Owning user. Falls back to the configured default owner.
    pub owner_id: Option<Uuid>,
    pub brand_name: Option<String>,
    pub brand_description: Option<String>,
}

#[derive(Debug, Clone)]
pub struct GeneratedMessage {
    pub message_id: Uuid,
    pub subject: String,
    pub content: String,
    pub influencer: InfluencerSummary,
}

/// Drafts outreach emails with the text provider and stores them as drafts.
pub struct MessageGenerator {
    llm: Arc<dyn TextGenerator>,
    db: Arc<Database>,
    default_owner: Option<String>,
}

impl MessageGenerator {
    pub fn new(llm: Arc<dyn TextGenerator>, db: Arc<Database>) -> Self {
        Self {
            llm,
            db,
            default_owner: None,
        }
    }

    /// Username that owns drafts when the caller supplies no user id.
    pub fn with_default_owner(mut self, username: impl Into<String>) -> Self {
        self.default_owner = Some(username.into());
        self
    }

    pub async fn generate(&self, req: GenerateRequest) -> Result<GeneratedMessage> {
        let influencer = self.load_influencer(req.influencer_id).await?;
        let owner_id = self.resolve_owner(req.owner_id).await?;

        let prompt = build_message_prompt(
            &influencer,
            req.brand_name.as_deref(),
            req.brand_description.as_deref(),
        );
        let content = self
            .llm
            .generate(&prompt)
            .await
            .map_err(|e| OutreachError::Provider(format!("message generation: {}", e)))?;
        let content = content.trim().to_string();
        if content.is_empty() {
            return Err(OutreachError::Provider("empty response".into()));
        }

        let subject = self.generate_subject(&influencer).await;

        let new_message = NewMessage {
            subject: subject.clone(),
            content: content.clone(),
            influencer_id: influencer.id,
            campaign_id: None,
            user_id: owner_id,
            email_used: Some(influencer.email.clone().unwrap_or_default()),
            ai_generated: true,
        };
        let row = blocking(&self.db, move |db| db.create_message(&new_message)).await?;
        let message = row.into_model()?;

        info!(
            message_id = %message.id,
            influencer_id = %influencer.id,
            "Generated outreach draft"
        );

        Ok(GeneratedMessage {
            message_id: message.id,
            subject,
            content,
            influencer: influencer.summary(),
        })
    }

    /// Never fails: an error or an unusable reply degrades to a template.
    async fn generate_subject(&self, influencer: &Influencer) -> String {
        let prompt = build_subject_prompt(&influencer.name, &influencer.category);
        match self.llm.generate(&prompt).await {
            Ok(text) => {
                let subject = text.trim().trim_matches(|c| c == '"' || c == '\'').trim();
                if subject.is_empty() {
                    fallback_subject(&influencer.name)
                } else if subject.chars().count() > MAX_SUBJECT_CHARS {
                    warn!(influencer_id = %influencer.id, len = subject.chars().count(), "Subject too long, using template");
                    fallback_subject(&influencer.name)
                } else {
                    subject.to_string()
                }
            }
            Err(e) => {
                warn!(influencer_id = %influencer.id, error = %e, "Subject generation failed, using template");
                fallback_subject(&influencer.name)
            }
        }
    }

    /// Ask the text provider for a 1-100 brand-fit rating and store it.
    /// Provider failures and unparseable replies fall back to the default score.
    pub async fn score_brand_fit(&self, influencer_id: Uuid, brand_description: Option<&str>) -> Result<u8> {
        let influencer = self.load_influencer(influencer_id).await?;
        let prompt = build_brand_fit_prompt(&influencer, brand_description);

        let score = match self.llm.generate(&prompt).await {
            Ok(text) => parse_score(&text).unwrap_or_else(|| {
                warn!(influencer_id = %influencer_id, reply = %text, "Unparseable brand-fit reply");
                DEFAULT_BRAND_FIT as u8
            }),
            Err(e) => {
                warn!(influencer_id = %influencer_id, error = %e, "Brand-fit scoring failed");
                DEFAULT_BRAND_FIT as u8
            }
        };

        let update = InfluencerUpdate {
            brand_fit_score: Some(i64::from(score)),
            ..Default::default()
        };
        blocking(&self.db, move |db| db.update_influencer(&influencer_id, &update))
            .await?
            .ok_or(OutreachError::NotFound("Influencer"))?;

        Ok(score)
    }

    async fn load_influencer(&self, id: Uuid) -> Result<Influencer> {
        let row = blocking(&self.db, move |db| db.get_influencer(&id))
            .await?
            .ok_or(OutreachError::NotFound("Influencer"))?;
        Ok(row.into_model()?)
    }

    async fn resolve_owner(&self, owner_id: Option<Uuid>) -> Result<Uuid> {
        if let Some(id) = owner_id {
            let found = blocking(&self.db, move |db| db.get_user(&id)).await?;
            return match found {
                Some(_) => Ok(id),
                None => Err(OutreachError::Validation(format!("Unknown user '{}'", id))),
            };
        }

        let Some(username) = self.default_owner.clone() else {
            return Err(OutreachError::Validation("userId is required".into()));
        };
        let user = blocking(&self.db, move |db| db.get_user_by_username(&username))
            .await?
            .ok_or_else(|| {
                OutreachError::Validation("userId is required; no default owner exists".into())
            })?;
        Ok(user.into_model()?.id)
    }
}

pub fn fallback_subject(influencer_name: &str) -> String {
    format!("Collaboration Opportunity - {}", influencer_name)
}

pub fn build_message_prompt(
    influencer: &Influencer,
    brand_name: Option<&str>,
    brand_description: Option<&str>,
) -> String {
    let mut prompt = format!(
        "You are an expert influencer outreach specialist. Write a personalized, professional \
         outreach email of 200-300 words. Address the influencer by name, show real knowledge \
         of their {category} content on {platform}, propose a collaboration that serves their \
         audience, and keep the tone professional yet friendly. Use an email format with a \
         greeting, exactly one clear call-to-action, and a signature.\n\n\
         Influencer: {name} ({handle})\n\
         Category: {category}\n\
         Platform: {platform}\n",
        name = influencer.name,
        handle = influencer.handle,
        category = influencer.category,
        platform = influencer.platform,
    );

    let themes: Vec<&str> = influencer
        .recent_content
        .iter()
        .take(MAX_PROMPT_THEMES)
        .map(String::as_str)
        .collect();
    if !themes.is_empty() {
        prompt.push_str(&format!("Recent content themes: {}\n", themes.join(", ")));
    }

    let brand = brand_name.map(str::trim).filter(|b| !b.is_empty()).unwrap_or(DEFAULT_BRAND_NAME);
    prompt.push_str(&format!("Brand: {}\n", brand));
    if let Some(description) = brand_description.map(str::trim).filter(|d| !d.is_empty()) {
        prompt.push_str(&format!("Brand description: {}\n", description));
    }

    prompt.push_str(
        "\nReturn only the email body, demonstrating knowledge of their work and proposing a \
         meaningful collaboration.",
    );
    prompt
}

pub fn build_subject_prompt(influencer_name: &str, category: &str) -> String {
    format!(
        "Write an email subject line for an influencer outreach email to {} who creates {} \
         content. It must be personalized, clear about collaboration intent, under 50 \
         characters, and free of spam trigger words. Return only the subject line.",
        influencer_name, category
    )
}

fn build_brand_fit_prompt(influencer: &Influencer, brand_description: Option<&str>) -> String {
    let brand = brand_description
        .map(str::trim)
        .filter(|d| !d.is_empty())
        .unwrap_or("General technology/lifestyle brand");
    format!(
        "Rate the brand fit between this influencer and brand from 1 to 100, considering \
         content alignment, audience match, brand safety and engagement quality.\n\n\
         Influencer: {}\nCategory: {}\nPlatform: {}\nFollowers: {}\nBrand: {}\n\n\
         Respond with only a number from 1-100.",
        influencer.name, influencer.category, influencer.platform, influencer.followers, brand
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::seed::demo_influencers;
    use crate::testing::FakeLlm;

    struct Fixture {
        db: Arc<Database>,
        influencer_id: Uuid,
        user_id: Uuid,
    }

    fn fixture() -> Fixture {
        let db = Database::open_in_memory().unwrap();
        let user = db.create_user("testuser", "hash", None).unwrap();
        let influencer = db
            .insert_influencer_if_new(&demo_influencers()[0])
            .unwrap()
            .unwrap();
        Fixture {
            influencer_id: influencer.id.parse().unwrap(),
            user_id: user.id.parse().unwrap(),
            db: Arc::new(db),
        }
    }

    fn request(f: &Fixture, brand_name: Option<&str>) -> GenerateRequest {
        GenerateRequest {
            influencer_id: f.influencer_id,
            owner_id: Some(f.user_id),
            brand_name: brand_name.map(str::to_string),
            brand_description: None,
        }
    }

    #[tokio::test]
    async fn test_generate_persists_draft() {
        let f = fixture();
        let llm = Arc::new(FakeLlm::replying(vec![Ok("Hi Alex, ..."), Ok("\"Let's build together\"\n")]));
        let generator = MessageGenerator::new(llm, f.db.clone());

        let out = generator.generate(request(&f, Some("Acme"))).await.unwrap();
        assert_eq!(out.subject, "Let's build together");
        assert_eq!(out.content, "Hi Alex, ...");
        assert_eq!(out.influencer.name, "Alex Chen");

        let stored = f.db.get_message(&out.message_id).unwrap().unwrap().into_model().unwrap();
        assert!(stored.status.is_draft());
        assert!(stored.ai_generated);
        assert_eq!(stored.user_id, f.user_id);
        assert_eq!(stored.email_used.as_deref(), Some("alex@techreview.com"));
        assert!(stored.sent_at.is_none());
    }

    #[tokio::test]
    async fn test_brand_name_reaches_prompt() {
        let f = fixture();
        let llm = Arc::new(FakeLlm::replying(vec![Ok("body"), Ok("subject")]));
        let generator = MessageGenerator::new(llm.clone(), f.db.clone());

        generator.generate(request(&f, Some("Acme"))).await.unwrap();

        let prompts = llm.prompts();
        assert!(prompts[0].contains("Brand: Acme"));
        assert!(prompts[0].contains("Alex Chen (@alextech)"));
        assert!(prompts[0].contains("AI innovations"));
    }

    #[tokio::test]
    async fn test_missing_brand_uses_default_sender() {
        let f = fixture();
        let llm = Arc::new(FakeLlm::replying(vec![Ok("body"), Ok("subject")]));
        let generator = MessageGenerator::new(llm.clone(), f.db.clone());

        generator.generate(request(&f, Some("  "))).await.unwrap();
        assert!(llm.prompts()[0].contains("Brand: ICY Outreach Team"));
    }

    #[tokio::test]
    async fn test_unknown_influencer_writes_nothing() {
        let f = fixture();
        let llm = Arc::new(FakeLlm::replying(vec![Ok("body"), Ok("subject")]));
        let generator = MessageGenerator::new(llm.clone(), f.db.clone());

        let mut req = request(&f, None);
        req.influencer_id = Uuid::new_v4();
        let err = generator.generate(req).await.unwrap_err();

        assert!(matches!(err, OutreachError::NotFound("Influencer")));
        assert!(llm.prompts().is_empty());
        assert!(f.db.list_messages_by_influencer(&f.influencer_id).unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_subject_failure_falls_back_to_template() {
        let f = fixture();
        let llm = Arc::new(FakeLlm::replying(vec![Ok("body"), Err("quota exceeded")]));
        let generator = MessageGenerator::new(llm, f.db.clone());

        let out = generator.generate(request(&f, None)).await.unwrap();
        assert_eq!(out.subject, "Collaboration Opportunity - Alex Chen");
    }

    #[tokio::test]
    async fn test_overlong_subject_falls_back_to_template() {
        let f = fixture();
        let long = "An Exciting Partnership Opportunity For Your Channel This Spring";
        let fits = "é".repeat(MAX_SUBJECT_CHARS);
        let llm = Arc::new(FakeLlm::replying(vec![Ok("body"), Ok(long), Ok("body"), Ok(fits.as_str())]));
        let generator = MessageGenerator::new(llm, f.db.clone());

        let out = generator.generate(request(&f, None)).await.unwrap();
        assert_eq!(out.subject, "Collaboration Opportunity - Alex Chen");

        let out = generator.generate(request(&f, None)).await.unwrap();
        assert_eq!(out.subject, fits);
    }

    #[tokio::test]
    async fn test_empty_body_is_provider_failure() {
        let f = fixture();
        let llm = Arc::new(FakeLlm::replying(vec![Ok("   \n"), Ok("subject")]));
        let generator = MessageGenerator::new(llm, f.db.clone());

        let err = generator.generate(request(&f, None)).await.unwrap_err();
        assert!(matches!(err, OutreachError::Provider(_)));
        assert!(f.db.list_messages_by_influencer(&f.influencer_id).unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_owner_falls_back_to_default_username() {
        let f = fixture();
        let llm = Arc::new(FakeLlm::replying(vec![Ok("body"), Ok("subject")]));
        let generator = MessageGenerator::new(llm, f.db.clone()).with_default_owner("testuser");

        let mut req = request(&f, None);
        req.owner_id = None;
        let out = generator.generate(req).await.unwrap();

        let stored = f.db.get_message(&out.message_id).unwrap().unwrap();
        assert_eq!(stored.user_id, f.user_id.to_string());
    }

    #[tokio::test]
    async fn test_unresolved_owner_is_rejected() {
        let f = fixture();
        let llm = Arc::new(FakeLlm::replying(vec![Ok("body"), Ok("subject")]));
        let generator = MessageGenerator::new(llm, f.db.clone()).with_default_owner("nobody");

        let mut req = request(&f, None);
        req.owner_id = None;
        let err = generator.generate(req).await.unwrap_err();
        assert!(matches!(err, OutreachError::Validation(_)));
    }

    #[tokio::test]
    async fn test_brand_fit_score_is_parsed_and_stored() {
        let f = fixture();
        let llm = Arc::new(FakeLlm::replying(vec![Ok("Score: 64")]));
        let generator = MessageGenerator::new(llm, f.db.clone());

        let score = generator.score_brand_fit(f.influencer_id, Some("Eco sneakers")).await.unwrap();
        assert_eq!(score, 64);
        let row = f.db.get_influencer(&f.influencer_id).unwrap().unwrap();
        assert_eq!(row.brand_fit_score, Some(64));
    }

    #[tokio::test]
    async fn test_brand_fit_falls_back_on_provider_error() {
        let f = fixture();
        let llm = Arc::new(FakeLlm::replying(vec![Err("boom")]));
        let generator = MessageGenerator::new(llm, f.db.clone());

        let score = generator.score_brand_fit(f.influencer_id, None).await.unwrap();
        assert_eq!(score, 75);
    }

    #[test]
    fn test_prompt_caps_themes() {
        let mut influencer = demo_influencers()[0].clone();
        influencer.recent_content = (1..=8).map(|i| format!("theme{i}")).collect();
        let db = Database::open_in_memory().unwrap();
        let influencer = db
            .insert_influencer_if_new(&influencer)
            .unwrap()
            .unwrap()
            .into_model()
            .unwrap();

        let prompt = build_message_prompt(&influencer, None, Some("Eco sneakers"));
        assert!(prompt.contains("theme5"));
        assert!(!prompt.contains("theme6"));
        assert!(prompt.contains("Brand description: Eco sneakers"));
    }
}
