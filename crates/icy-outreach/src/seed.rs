//! Hand-authored influencer records used when the search provider is down,
//! plus the demo set behind the populate endpoint.

use icy_db::NewInfluencer;
use icy_types::Platform;

struct Seed {
    name: &'static str,
    handle: &'static str,
    category: &'static str,
    followers: i64,
    avg_views: i64,
    email: Option<&'static str>,
    avatar: &'static str,
    channel_id: &'static str,
    brand_fit_score: i64,
    recent_content: &'static [&'static str],
}

impl Seed {
    fn to_new(&self) -> NewInfluencer {
        NewInfluencer {
            name: self.name.to_string(),
            handle: self.handle.to_string(),
            platform: Platform::Youtube,
            category: self.category.to_string(),
            followers: self.followers,
            avg_views: Some(self.avg_views),
            email: self.email.map(str::to_string),
            avatar: Some(self.avatar.to_string()),
            channel_id: Some(self.channel_id.to_string()),
            brand_fit_score: Some(self.brand_fit_score),
            recent_content: self.recent_content.iter().map(|s| s.to_string()).collect(),
        }
    }
}

const ALEX_CHEN: Seed = Seed {
    name: "Alex Chen",
    handle: "@alextech",
    category: "tech",
    followers: 245_000,
    avg_views: 12_300,
    email: Some("alex@techreview.com"),
    avatar: "https://images.unsplash.com/photo-1507003211169-0a1dd7228f2d?auto=format&fit=crop&w=100&h=100",
    channel_id: "UCtech123",
    brand_fit_score: 87,
    recent_content: &["AI innovations", "smartphone reviews", "tech tutorials"],
};

const SOFIA_RODRIGUEZ: Seed = Seed {
    name: "Sofia Rodriguez",
    handle: "@sofiabeauty",
    category: "beauty",
    followers: 189_000,
    avg_views: 8_700,
    email: None,
    avatar: "https://images.unsplash.com/photo-1494790108755-2616c96d5d2b?auto=format&fit=crop&w=100&h=100",
    channel_id: "UCbeauty456",
    brand_fit_score: 72,
    recent_content: &["makeup tutorials", "skincare routines", "product reviews"],
};

const MARCUS_JOHNSON: Seed = Seed {
    name: "Marcus Johnson",
    handle: "@marcusfitness",
    category: "fitness",
    followers: 321_000,
    avg_views: 15_200,
    email: Some("marcus.johnson@gmail.com"),
    avatar: "https://images.unsplash.com/photo-1571019613540-b7ba3e1b0fcd?auto=format&fit=crop&w=100&h=100",
    channel_id: "UCfitness789",
    brand_fit_score: 94,
    recent_content: &["workout routines", "nutrition tips", "fitness motivation"],
};

const TECH_SEEDS: &[Seed] = &[
    ALEX_CHEN,
    Seed {
        name: "Priya Nair",
        handle: "@priyacodes",
        category: "tech",
        followers: 412_000,
        avg_views: 20_600,
        email: Some("hello@priyacodes.dev"),
        avatar: "https://images.unsplash.com/photo-1544005313-94ddf0286df2?auto=format&fit=crop&w=100&h=100",
        channel_id: "UCtech124",
        brand_fit_score: 91,
        recent_content: &["programming tutorials", "developer tooling", "career advice"],
    },
    Seed {
        name: "Gadget Garage",
        handle: "@gadgetgarage",
        category: "tech",
        followers: 98_000,
        avg_views: 4_900,
        email: None,
        avatar: "https://images.unsplash.com/photo-1519389950473-47ba0277781c?auto=format&fit=crop&w=100&h=100",
        channel_id: "UCtech125",
        brand_fit_score: 78,
        recent_content: &["gadget unboxings", "budget phone reviews", "smart home setups"],
    },
];

const BEAUTY_SEEDS: &[Seed] = &[
    SOFIA_RODRIGUEZ,
    Seed {
        name: "Mia Laurent",
        handle: "@mialaurent",
        category: "beauty",
        followers: 534_000,
        avg_views: 26_700,
        email: Some("collabs@mialaurent.com"),
        avatar: "https://images.unsplash.com/photo-1487412720507-e7ab37603c6f?auto=format&fit=crop&w=100&h=100",
        channel_id: "UCbeauty457",
        brand_fit_score: 83,
        recent_content: &["skincare routines", "drugstore dupes", "get ready with me"],
    },
    Seed {
        name: "Glow Theory",
        handle: "@glowtheory",
        category: "beauty",
        followers: 76_000,
        avg_views: 3_800,
        email: None,
        avatar: "https://images.unsplash.com/photo-1522335789203-aabd1fc54bc9?auto=format&fit=crop&w=100&h=100",
        channel_id: "UCbeauty458",
        brand_fit_score: 69,
        recent_content: &["makeup tutorials", "product reviews", "beauty tips"],
    },
];

const FITNESS_SEEDS: &[Seed] = &[
    MARCUS_JOHNSON,
    Seed {
        name: "Hana Sato",
        handle: "@hanamoves",
        category: "fitness",
        followers: 157_000,
        avg_views: 7_850,
        email: Some("team@hanamoves.com"),
        avatar: "https://images.unsplash.com/photo-1518611012118-696072aa579a?auto=format&fit=crop&w=100&h=100",
        channel_id: "UCfitness790",
        brand_fit_score: 88,
        recent_content: &["yoga flows", "mobility drills", "healthy meal prep"],
    },
    Seed {
        name: "Iron Path",
        handle: "@ironpath",
        category: "fitness",
        followers: 268_000,
        avg_views: 13_400,
        email: None,
        avatar: "https://images.unsplash.com/photo-1534438327276-14e5300c3a48?auto=format&fit=crop&w=100&h=100",
        channel_id: "UCfitness791",
        brand_fit_score: 80,
        recent_content: &["strength programs", "gym training", "fitness challenges"],
    },
];

/// Fallback records for `category`; empty for categories without a seed list.
pub fn fallback_influencers(category: &str) -> Vec<NewInfluencer> {
    let seeds: &[Seed] = match category {
        "tech" => TECH_SEEDS,
        "beauty" => BEAUTY_SEEDS,
        "fitness" => FITNESS_SEEDS,
        _ => &[],
    };
    seeds.iter().map(Seed::to_new).collect()
}

/// The fixed sample set used by the demo populate endpoint.
pub fn demo_influencers() -> Vec<NewInfluencer> {
    [ALEX_CHEN, SOFIA_RODRIGUEZ, MARCUS_JOHNSON]
        .iter()
        .map(Seed::to_new)
        .collect()
}
