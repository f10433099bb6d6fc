use crate::core::extract::registrable_domain;
use crate::domain::model::{Category, ClassifiedSet};
use std::collections::{HashMap, HashSet};

/// Second-level labels under the target TLD that carry their own namespace
/// (xxx.gov.sa is owner-level at three labels, not two).
const SAUDI_SUB_TLDS: &[&str] = &["com", "gov", "edu", "org", "net", "med", "sch"];

/// Compound public suffixes outside the target TLD that we recognize.
/// Deliberately a short allow-list, not full public-suffix data.
const COMPOUND_SUFFIXES: &[&str] = &[
    "co.uk", "com.au", "co.in", "co.jp", "com.br", "co.za", "com.eg", "com.pk", "co.id",
];

/// Global services that are popular in-country but are not country-affiliated.
const GLOBAL_EXCLUDES: &[&str] = &[
    // Search & tech giants
    "google.com",
    "google.com.sa",
    "googleapis.com",
    "gstatic.com",
    "googleusercontent.com",
    "googlevideo.com",
    "youtube.com",
    "youtu.be",
    "ytimg.com",
    "googleadservices.com",
    "googlesyndication.com",
    "googletagmanager.com",
    "google-analytics.com",
    "doubleclick.net",
    "facebook.com",
    "fb.com",
    "fbcdn.net",
    "instagram.com",
    "meta.com",
    "whatsapp.com",
    "twitter.com",
    "x.com",
    "twimg.com",
    "t.co",
    "microsoft.com",
    "live.com",
    "outlook.com",
    "office.com",
    "windows.com",
    "windowsupdate.com",
    "bing.com",
    "msn.com",
    "skype.com",
    "linkedin.com",
    "github.com",
    "azure.com",
    "azureedge.net",
    "apple.com",
    "icloud.com",
    "mzstatic.com",
    "amazon.com",
    "amazonaws.com",
    "cloudfront.net",
    "tiktok.com",
    "tiktokcdn.com",
    "bytedance.com",
    "snapchat.com",
    "snap.com",
    "sc-cdn.net",
    "reddit.com",
    "redd.it",
    "wikipedia.org",
    "wikimedia.org",
    "yahoo.com",
    "yimg.com",
    // CDN & infrastructure
    "cloudflare.com",
    "akamai.com",
    "akamaized.net",
    "akamaihd.net",
    "fastly.net",
    "fastly.com",
    "jsdelivr.net",
    "unpkg.com",
    "cdnjs.com",
    "bootstrapcdn.com",
    "fontawesome.com",
    // E-commerce (global)
    "ebay.com",
    "aliexpress.com",
    "alibaba.com",
    "wish.com",
    // Streaming (global)
    "netflix.com",
    "nflxvideo.net",
    "spotify.com",
    "scdn.co",
    "twitch.tv",
    "hulu.com",
    "disneyplus.com",
    "disney.com",
    // Gaming
    "steampowered.com",
    "steamcommunity.com",
    "epicgames.com",
    "roblox.com",
    "rbxcdn.com",
    // Communication
    "zoom.us",
    "telegram.org",
    "t.me",
    "discord.com",
    "discordapp.com",
    "signal.org",
    // Ad/tracking
    "adnxs.com",
    "criteo.com",
    "outbrain.com",
    "taboola.com",
    "pubmatic.com",
    "scorecardresearch.com",
    "hotjar.com",
    "mixpanel.com",
    "segment.com",
    "amplitude.com",
    "appsflyer.com",
    "adjust.com",
    "branch.io",
    "onesignal.com",
    // Other global platforms
    "wordpress.com",
    "wp.com",
    "wordpress.org",
    "blogger.com",
    "blogspot.com",
    "medium.com",
    "pinterest.com",
    "pinimg.com",
    "tumblr.com",
    "quora.com",
    "stackoverflow.com",
    "stackexchange.com",
    "paypal.com",
    "stripe.com",
    "recaptcha.net",
    "hcaptcha.com",
    "sentry.io",
    "intercom.io",
    "zendesk.com",
    "freshdesk.com",
    "hubspot.com",
    "salesforce.com",
    "force.com",
    "shopify.com",
    "myshopify.com",
    "wix.com",
    "wixsite.com",
    "squarespace.com",
    "godaddy.com",
    "secureserver.net",
    "namecheap.com",
    "canva.com",
    "figma.com",
    "notion.so",
    "slack.com",
    "trello.com",
    "dropbox.com",
    "box.com",
    "onedrive.com",
    "sharepoint.com",
];

/// Name fragments that suggest country affiliation: cities, brands,
/// abbreviations. Substring matching, so false positives are possible
/// (a hostname merely containing a fragment still matches).
const SAUDI_KEYWORDS: &[&str] = &[
    "saudi",
    "riyadh",
    "jeddah",
    "jidda",
    "makkah",
    "mecca",
    "madinah",
    "medina",
    "dammam",
    "khobar",
    "dhahran",
    "tabuk",
    "taif",
    "abha",
    "najran",
    "hail",
    "jizan",
    "jazan",
    "yanbu",
    "jubail",
    "neom",
    "kaec",
    "qassim",
    "buraidah",
    "ksa",
    "saudia",
    "aramco",
    "sabic",
    "stc-",
    "mobily",
    "zain-sa",
    "alrajhi",
    "alinma",
    "albilad",
    "sabb-",
    "riyadbank",
    "bankalahli",
    "tawakkalna",
    "absher",
    "nafath",
    "sehhaty",
    "haraj",
    "jarir",
    "panda-sa",
    "tamimi",
    "hungerstation",
    "jahez",
    "marsool",
    "mrsool",
];

/// Country-affiliated companies operating under non-native domains.
const KNOWN_SAUDI_DOMAINS: &[&str] = &[
    "noon.com",
    "careem.com",
    "hungerstation.com",
    "argaam.com",
    "sabq.org",
    "alarabiya.net",
    "aawsat.com",
    "mbc.net",
    "shahid.net",
    "rotana.net",
    "anghami.com",
    "thmanyah.com",
    "srmg.com",
    "flynas.com",
    "flyadeal.com",
    "almosafer.com",
    "aramex.com",
    "neom.com",
    "aramco.com",
    "saudiaramco.com",
    "sabic.com",
    "ithra.com",
    "tawuniya.com",
    "tamara.co",
    "tabby.ai",
    "moyasar.com",
    "hyperpay.com",
    "namshi.com",
    "ounass.com",
    "fordeal.com",
    "bayt.com",
    "adslgate.com",
    "jeeny.com",
    "stcplay.gg",
    "jawwy.tv",
];

/// Immutable rule data the classifier runs against. Built once at startup
/// and passed explicitly so classification stays a pure function.
#[derive(Debug, Clone)]
pub struct RuleSet {
    pub target_tld: &'static str,
    target_suffix: String,
    pub sub_tlds: HashSet<&'static str>,
    pub compound_suffixes: HashSet<&'static str>,
    pub global_excludes: HashSet<&'static str>,
    pub known_first_party: HashSet<&'static str>,
    pub keywords: Vec<&'static str>,
}

impl RuleSet {
    pub fn new(
        target_tld: &'static str,
        sub_tlds: &[&'static str],
        compound_suffixes: &[&'static str],
        global_excludes: &[&'static str],
        known_first_party: &[&'static str],
        keywords: &[&'static str],
    ) -> Self {
        Self {
            target_tld,
            target_suffix: format!(".{}", target_tld),
            sub_tlds: sub_tlds.iter().copied().collect(),
            compound_suffixes: compound_suffixes.iter().copied().collect(),
            global_excludes: global_excludes.iter().copied().collect(),
            known_first_party: known_first_party.iter().copied().collect(),
            keywords: keywords.to_vec(),
        }
    }

    /// The curated Saudi Arabia rule data.
    pub fn saudi() -> Self {
        Self::new(
            "sa",
            SAUDI_SUB_TLDS,
            COMPOUND_SUFFIXES,
            GLOBAL_EXCLUDES,
            KNOWN_SAUDI_DOMAINS,
            SAUDI_KEYWORDS,
        )
    }

    pub fn is_target_tld(&self, hostname: &str) -> bool {
        hostname == self.target_tld || hostname.ends_with(&self.target_suffix)
    }
}

/// Assign a hostname to exactly one category. Precedence is fixed: the
/// target TLD always wins, and exclusion outranks the first-party and
/// keyword tiers so a collision is excluded rather than included.
pub fn classify(hostname: &str, rules: &RuleSet) -> Category {
    if hostname.is_empty() {
        return Category::Unresolved;
    }

    if rules.is_target_tld(hostname) {
        return Category::TldMatch;
    }

    let registrable = registrable_domain(hostname, rules);
    if rules.global_excludes.contains(registrable.as_str())
        || rules.global_excludes.contains(hostname)
    {
        return Category::GlobalExcluded;
    }

    if rules.known_first_party.contains(registrable.as_str()) {
        return Category::KnownFirstParty;
    }

    let lowered = hostname.to_ascii_lowercase();
    if rules.keywords.iter().any(|kw| lowered.contains(kw)) {
        return Category::KeywordMatch;
    }

    Category::Unresolved
}

/// Bucket every hostname by tier, keyed by registrable domain.
/// Excluded hostnames keep their full form for the diagnostic count.
pub fn partition(ranks: &HashMap<String, u32>, rules: &RuleSet) -> ClassifiedSet {
    let mut set = ClassifiedSet::default();

    for hostname in ranks.keys() {
        let registrable = registrable_domain(hostname, rules);
        match classify(hostname, rules) {
            Category::TldMatch => {
                set.tld.insert(registrable);
            }
            Category::GlobalExcluded => {
                set.excluded.insert(hostname.clone());
            }
            Category::KnownFirstParty => {
                set.known.insert(registrable);
            }
            Category::KeywordMatch => {
                set.keyword.insert(registrable);
            }
            Category::DnsVerified | Category::Unresolved => {
                set.deferred.insert(registrable);
            }
        }
    }

    set
}
