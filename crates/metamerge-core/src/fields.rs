//! Catalogue of canonical field names.
//!
//! Canonical fields are the platform-agnostic column names every imported
//! row is rewritten into. Anything not listed here may still appear in a row
//! as a pass-through column.

pub const POST_ID: &str = "post_id";
pub const ACCOUNT_ID: &str = "account_id";
pub const ACCOUNT_NAME: &str = "account_name";
pub const ACCOUNT_USERNAME: &str = "account_username";
pub const DESCRIPTION: &str = "description";
pub const PUBLISH_TIME: &str = "publish_time";
pub const POST_TYPE: &str = "post_type";
pub const PERMALINK: &str = "permalink";
pub const PLATFORM: &str = "platform";

pub const VIEWS: &str = "views";
pub const REACH: &str = "reach";
pub const TOTAL_ENGAGEMENT: &str = "total_engagement";
pub const LIKES: &str = "likes";
pub const COMMENTS: &str = "comments";
pub const SHARES: &str = "shares";
pub const TOTAL_CLICKS: &str = "total_clicks";
pub const LINK_CLICKS: &str = "link_clicks";
pub const OTHER_CLICKS: &str = "other_clicks";
pub const SAVES: &str = "saves";
pub const PROFILE_VISITS: &str = "profile_visits";
pub const FOLLOWS: &str = "follows";
pub const VIDEO_30SEC_VIEWS: &str = "video_30sec_views";
pub const VIDEO_PLAYS: &str = "video_plays";
pub const AVG_VIDEO_PLAY_TIME: &str = "avg_video_play_time";

/// Metrics that are summed per account.
///
/// Reach and average play time are per-post figures that do not add up
/// across posts, so they are left out.
pub const SUMMARIZABLE_METRICS: &[&str] = &[
    VIEWS,
    LIKES,
    COMMENTS,
    SHARES,
    TOTAL_ENGAGEMENT,
    TOTAL_CLICKS,
    OTHER_CLICKS,
    LINK_CLICKS,
    SAVES,
    PROFILE_VISITS,
    FOLLOWS,
    VIDEO_PLAYS,
    VIDEO_30SEC_VIEWS,
];

/// Identity and free-text fields. Their values are kept as text even when
/// they look numeric; post ids routinely exceed the exact range of an `f64`.
pub const TEXT_FIELDS: &[&str] = &[
    POST_ID,
    ACCOUNT_ID,
    ACCOUNT_NAME,
    ACCOUNT_USERNAME,
    DESCRIPTION,
    PUBLISH_TIME,
    POST_TYPE,
    PERMALINK,
    PLATFORM,
];

/// Names written by earlier releases, mapped to their current canonical field.
pub const LEGACY_ALIASES: &[(&str, &str)] = &[
    ("page_id", ACCOUNT_ID),
    ("page_name", ACCOUNT_NAME),
    ("reactions", LIKES),
    ("engagement_total", TOTAL_ENGAGEMENT),
    ("post_reach", REACH),
    ("instagram_id", ACCOUNT_ID),
    ("profile_name", ACCOUNT_NAME),
    ("username", ACCOUNT_USERNAME),
    ("media_id", POST_ID),
    ("media_type", POST_TYPE),
    ("media_url", PERMALINK),
    ("caption", DESCRIPTION),
    ("timestamp", PUBLISH_TIME),
    ("impressions", VIEWS),
    ("total_interactions", TOTAL_ENGAGEMENT),
];

/// Grouping used when listing fields to a user.
pub const FIELD_GROUPS: &[(&str, &[&str])] = &[
    (
        "Metadata",
        &[
            POST_ID,
            ACCOUNT_ID,
            ACCOUNT_NAME,
            ACCOUNT_USERNAME,
            DESCRIPTION,
            PUBLISH_TIME,
            POST_TYPE,
            PERMALINK,
        ],
    ),
    ("Reach and views", &[VIEWS, REACH]),
    (
        "Engagement",
        &[
            TOTAL_ENGAGEMENT,
            LIKES,
            COMMENTS,
            SHARES,
            SAVES,
            PROFILE_VISITS,
            FOLLOWS,
        ],
    ),
    ("Video", &[VIDEO_PLAYS, VIDEO_30SEC_VIEWS, AVG_VIDEO_PLAY_TIME]),
    ("Clicks", &[TOTAL_CLICKS, LINK_CLICKS, OTHER_CLICKS]),
];

#[must_use]
pub fn is_text_field(field: &str) -> bool {
    TEXT_FIELDS.contains(&field)
}

/// Legacy names that resolve to `canonical`.
pub fn legacy_aliases_for(canonical: &str) -> impl Iterator<Item = &'static str> + '_ {
    LEGACY_ALIASES
        .iter()
        .filter(move |(_, target)| *target == canonical)
        .map(|(alias, _)| *alias)
}

/// Human-readable label for a canonical field.
#[must_use]
pub fn display_name(field: &str) -> Option<&'static str> {
    let label = match field {
        POST_ID => "Post ID",
        ACCOUNT_ID => "Account ID",
        ACCOUNT_NAME => "Account name",
        ACCOUNT_USERNAME => "Username",
        DESCRIPTION => "Description / caption",
        PUBLISH_TIME => "Publish time",
        POST_TYPE => "Post type",
        PERMALINK => "Link",
        PLATFORM => "Platform",
        VIEWS => "Views / impressions",
        REACH => "Reach",
        TOTAL_ENGAGEMENT => "Total engagement",
        LIKES => "Likes / reactions",
        COMMENTS => "Comments",
        SHARES => "Shares",
        TOTAL_CLICKS => "Total clicks",
        LINK_CLICKS => "Link clicks",
        OTHER_CLICKS => "Other clicks",
        SAVES => "Saves",
        PROFILE_VISITS => "Profile visits",
        FOLLOWS => "New followers",
        VIDEO_30SEC_VIEWS => "30-second views",
        VIDEO_PLAYS => "Video plays",
        AVG_VIDEO_PLAY_TIME => "Average play time",
        _ => return None,
    };
    Some(label)
}

/// Example source headers for a canonical field. Shown as hints only;
/// never consulted when matching headers.
#[must_use]
pub fn examples(field: &str) -> &'static [&'static str] {
    match field {
        VIEWS => &["Visningar", "Views", "Intryck", "Impressions"],
        REACH => &["Räckvidd", "Reach", "Audiences", "Unique users"],
        TOTAL_ENGAGEMENT => &[
            "Reaktioner, kommentarer och delningar",
            "Total engagement",
            "Interaktioner totalt",
            "Engagement",
        ],
        LIKES => &[
            "Reaktioner",
            "Likes",
            "Gilla-markeringar",
            "Reactions",
            "Likes and reactions",
        ],
        COMMENTS => &["Kommentarer", "Comments"],
        SHARES => &["Delningar", "Shares"],
        TOTAL_CLICKS => &["Totalt antal klick", "Total clicks", "All clicks"],
        OTHER_CLICKS => &["Övriga klick", "Other clicks"],
        LINK_CLICKS => &["Länkklick", "Link clicks"],
        POST_ID => &["Publicerings-id", "Post ID", "Inläggs-ID"],
        ACCOUNT_ID => &["Sid-id", "Page ID", "Konto-ID", "Account ID", "Instagram ID"],
        ACCOUNT_NAME => &["Sidnamn", "Page name", "Account name", "Kontonamn"],
        DESCRIPTION => &["Beskrivning", "Description", "Bildtext", "Caption", "Titel"],
        PUBLISH_TIME => &["Publiceringstid", "Publish time", "Publicerat", "Timestamp"],
        POST_TYPE => &["Inläggstyp", "Post type", "Medietyp", "Media type"],
        PERMALINK => &["Permalänk", "Permalink", "Länk", "Link"],
        ACCOUNT_USERNAME => &["Användarnamn", "Username", "Handle"],
        SAVES => &["Sparade", "Saves", "Saved"],
        PROFILE_VISITS => &["Profilbesök", "Profile visits"],
        FOLLOWS => &["Följare", "Follows", "New followers"],
        VIDEO_30SEC_VIEWS => &["30-sekundersvisningar", "30s views"],
        VIDEO_PLAYS => &["Videospelningar", "Video plays"],
        AVG_VIDEO_PLAY_TIME => &["Genomsnittlig visningstid", "Average video play time"],
        _ => &[],
    }
}
