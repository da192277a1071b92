/// Every selectable mode, in menu order. Keys double as aggregation keys.
pub const MODES: &[(&str, &str)] = &[
    ("overall", "Overall"),
    ("eight_one", "Solo"),
    ("eight_two", "Doubles"),
    ("four_three", "Threes"),
    ("four_four", "Fours"),
    ("two_four", "4v4"),
    ("castle", "Castle"),
    ("rush", "Rush"),
    ("lucky", "Lucky"),
    ("swap", "Swappage"),
    ("ultimate", "Ultimate"),
    ("voidless", "Voidless"),
    ("underworld", "Underworld"),
];

pub const OVERALL: &str = "overall";

/// Modes whose counters live directly under `{mode}_void_*_bedwars`.
pub const NORMAL_MODES: &[&str] = &[
    "eight_one",
    "eight_two",
    "four_three",
    "four_four",
    "two_four",
    "castle",
];

/// Dream modes only offered in doubles and fours; shown as the sum of both.
pub const MERGED_MODES: &[&str] = &["rush", "lucky", "swap", "ultimate", "voidless", "underworld"];

/// Base-mode prefixes a merged mode is recorded under.
pub const MERGE_BASES: [&str; 2] = ["eight_two", "four_four"];

pub fn label(key: &str) -> Option<&'static str> {
    MODES.iter().find(|(k, _)| *k == key).map(|(_, l)| *l)
}
