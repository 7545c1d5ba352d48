//! Built-in header mappings for Meta Business Suite exports.

use metamerge_core::fields::{
    ACCOUNT_ID, ACCOUNT_NAME, ACCOUNT_USERNAME, AVG_VIDEO_PLAY_TIME, COMMENTS, DESCRIPTION,
    FOLLOWS, LIKES, LINK_CLICKS, OTHER_CLICKS, PERMALINK, POST_ID, POST_TYPE, PROFILE_VISITS,
    PUBLISH_TIME, REACH, SAVES, SHARES, TOTAL_CLICKS, TOTAL_ENGAGEMENT, VIDEO_30SEC_VIEWS,
    VIDEO_PLAYS, VIEWS,
};

/// Raw header to canonical field, in precedence order. The first raw header
/// listed for a canonical field is the one used when exporting back to the
/// source format.
pub const DEFAULT_MAPPINGS: &[(&str, &str)] = &[
    // Facebook, Swedish locale
    ("Publicerings-id", POST_ID),
    ("Sid-id", ACCOUNT_ID),
    ("Sidnamn", ACCOUNT_NAME),
    ("Beskrivning", DESCRIPTION),
    ("Publiceringstid", PUBLISH_TIME),
    ("Inläggstyp", POST_TYPE),
    ("Permalänk", PERMALINK),
    ("Visningar", VIEWS),
    ("Räckvidd", REACH),
    ("Reaktioner, kommentarer och delningar", TOTAL_ENGAGEMENT),
    ("Reaktioner", LIKES),
    ("Kommentarer", COMMENTS),
    ("Delningar", SHARES),
    ("Totalt antal klick", TOTAL_CLICKS),
    ("Länkklick", LINK_CLICKS),
    ("Övriga klick", OTHER_CLICKS),
    // Instagram, Swedish locale
    ("Inläggs-ID", POST_ID),
    ("Konto-ID", ACCOUNT_ID),
    ("Kontonamn", ACCOUNT_NAME),
    ("Användarnamn", ACCOUNT_USERNAME),
    ("Publicerat", PUBLISH_TIME),
    ("Medietyp", POST_TYPE),
    ("Länk", PERMALINK),
    ("Intryck", VIEWS),
    ("Interaktioner totalt", TOTAL_ENGAGEMENT),
    ("Gilla-markeringar", LIKES),
    ("Sparade", SAVES),
    ("Profilbesök", PROFILE_VISITS),
    ("Följare", FOLLOWS),
    ("30-sekundersvisningar", VIDEO_30SEC_VIEWS),
    ("Videospelningar", VIDEO_PLAYS),
    ("Genomsnittlig visningstid", AVG_VIDEO_PLAY_TIME),
    // Facebook, English locale
    ("Post ID", POST_ID),
    ("Page ID", ACCOUNT_ID),
    ("Page name", ACCOUNT_NAME),
    ("Description", DESCRIPTION),
    ("Publish time", PUBLISH_TIME),
    ("Post type", POST_TYPE),
    ("Permalink", PERMALINK),
    ("Views", VIEWS),
    ("Reach", REACH),
    ("Reactions, comments and shares", TOTAL_ENGAGEMENT),
    ("Reactions", LIKES),
    ("Comments", COMMENTS),
    ("Shares", SHARES),
    ("Total clicks", TOTAL_CLICKS),
    ("Link clicks", LINK_CLICKS),
    ("Other clicks", OTHER_CLICKS),
    // Instagram, English locale
    ("Account ID", ACCOUNT_ID),
    ("Account name", ACCOUNT_NAME),
    ("Account username", ACCOUNT_USERNAME),
    ("Media type", POST_TYPE),
    ("Impressions", VIEWS),
    ("Total interactions", TOTAL_ENGAGEMENT),
    ("Likes", LIKES),
    ("Saves", SAVES),
    ("Profile visits", PROFILE_VISITS),
    ("Follows", FOLLOWS),
    ("30-second views", VIDEO_30SEC_VIEWS),
    ("Video plays", VIDEO_PLAYS),
    ("Average video play time", AVG_VIDEO_PLAY_TIME),
];

/// Headers only Facebook page exports carry.
pub const FACEBOOK_HEADERS: &[&str] = &[
    "Publicerings-id",
    "Sid-id",
    "Sidnamn",
    "Titel",
    "Beskrivning",
    "Publiceringstid",
    "Inläggstyp",
    "Permalänk",
    "Visningar",
    "Reaktioner, kommentarer och delningar",
    "Reaktioner",
    "Totalt antal klick",
    "Länkklick",
    "Övriga klick",
    "Page ID",
    "Page name",
    "Title",
    "Publish time",
    "Reactions, comments and shares",
    "Total clicks",
    "Link clicks",
    "Other clicks",
];

/// Headers only Instagram account exports carry.
pub const INSTAGRAM_HEADERS: &[&str] = &[
    "Inläggs-ID",
    "Konto-ID",
    "Kontonamn",
    "Användarnamn",
    "Bildtext",
    "Publicerat",
    "Medietyp",
    "Intryck",
    "Interaktioner totalt",
    "Gilla-markeringar",
    "Sparade",
    "Profilbesök",
    "Följare",
    "30-sekundersvisningar",
    "Videospelningar",
    "Genomsnittlig visningstid",
    "Username",
    "Account ID",
    "Account username",
    "Profile name",
    "Media type",
    "Caption",
    "Saves",
    "Profile visits",
    "Followers",
    "Impressions",
    "30s views",
    "Video plays",
    "Avg. watch time",
];

/// Substrings that appear only in Instagram headers.
pub const INSTAGRAM_KEYWORDS: &[&str] = &[
    "saves",
    "profile visit",
    "follow",
    "impression",
    "spara",
    "profilbes",
    "följ",
    "intryck",
    "videospelning",
    "sekundervisning",
    "användarnamn",
];
