//! Well-known identifiers of the host item database.
//!
//! Base classes are the `_parent` values the host uses to group items; the
//! remaining constants name individual templates and handbook categories this
//! crate clones from or writes into.

/// Root class every item derives from. A filter of `[ITEM]` accepts anything.
pub const ITEM: &str = "54009119af1c881c07000029";
pub const BACKPACK: &str = "5448e53e4bdc2d60728b4567";
pub const VEST: &str = "5448e5284bdc2dcb718b4567";
/// Generic "mob container" class shared by secure containers and a few special stashes.
pub const MOB_CONTAINER: &str = "5448bf274bdc2dfc2f8b456a";
pub const KEY_MECHANICAL: &str = "5c99f98d86f7745c314214b3";
pub const KEYCARD: &str = "5c164d2286f774194c5e69fa";

/// Secure container reserved by the host; class-wide filter rules never touch it.
pub const RESERVED_SECURE_CONTAINER: &str = "5c0a794586f77461c458f892";

/// Template cloned for grid-based cases.
pub const CONTAINER_TEMPLATE: &str = "5d235bb686f77443f4331278";
/// Template cloned for slot-based cases.
pub const SLOTS_TEMPLATE: &str = "5a9d6d00a2750c5c985b5305";

/// Handbook category the cases are listed under.
pub const HANDBOOK_CASES_CATEGORY: &str = "5b5f6fa186f77409407a7eb7";

/// Lab access keycard, whose in-raid limit is raised so the keycard case can be filled.
pub const LABS_ACCESS_CARD: &str = "5c94bbff86f7747ee735c08f";

/// Placeholder the host uses for "no entry" in filter lists.
pub const EMPTY_FILTER: &str = "";

/// Trader display names and the canonical ids they resolve to.
pub const TRADER_IDS: &[(&str, &str)] = &[
    ("mechanic", "5a7c2eca46aef81a7ca2145d"),
    ("skier", "58330581ace78e27b8b10cee"),
    ("peacekeeper", "5935c25fb3acc3127c3d8cd9"),
    ("therapist", "54cb57776803fa99248b456e"),
    ("prapor", "54cb50c76803fa8b248b4571"),
    ("jaeger", "5c0647fdd443bc2504c2d371"),
    ("ragman", "5ac3b934156ae10c4430e83c"),
];

pub const ROUBLES: &str = "5449016a4bdc2d6f028b456f";
pub const EUROS: &str = "569668774bdc2da2298b4568";
pub const DOLLARS: &str = "5696686a4bdc2da3298b456a";
