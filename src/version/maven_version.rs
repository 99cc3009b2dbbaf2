//! Maven version ordering
//!
//! Versions are split into items on `.`, `-` and digit/letter transitions.
//! Integer items compare numerically, string items by qualifier rank:
//!
//! ```text
//! alpha < beta < milestone < rc = cr < snapshot < "" = ga = final = release < sp < unknown
//! ```
//!
//! A `-` opens a nested list, so `1-1` sorts before `1.1`. Trailing zero
//! and release items are dropped, which makes `1`, `1.0` and `1.0.0` equal.

use std::cmp::Ordering;
use std::fmt;

const QUALIFIERS: [&str; 7] = ["alpha", "beta", "milestone", "rc", "snapshot", "", "sp"];

/// Rank of the empty qualifier, i.e. a plain release
const RELEASE_RANK: &str = "5";

#[derive(Debug, Clone)]
enum Item {
    /// Decimal digits without leading zeros ("0" for zero)
    Int(String),
    Str(String),
    List(Vec<Item>),
}

impl Item {
    fn int(digits: &str) -> Self {
        let trimmed = digits.trim_start_matches('0');
        Item::Int(if trimmed.is_empty() {
            "0".to_string()
        } else {
            trimmed.to_string()
        })
    }

    fn string(value: &str, followed_by_digit: bool) -> Self {
        let value = match value {
            "a" if followed_by_digit => "alpha",
            "b" if followed_by_digit => "beta",
            "m" if followed_by_digit => "milestone",
            other => other,
        };
        let value = match value {
            "ga" | "final" | "release" => "",
            "cr" => "rc",
            other => other,
        };
        Item::Str(value.to_string())
    }

    fn parse(is_digit: bool, value: &str) -> Self {
        if is_digit {
            Item::int(value)
        } else {
            Item::string(value, false)
        }
    }

    fn is_null(&self) -> bool {
        match self {
            Item::Int(digits) => digits == "0",
            Item::Str(value) => qualifier_rank(value) == RELEASE_RANK,
            Item::List(items) => items.is_empty(),
        }
    }

    /// Compares against another item, `None` standing for a missing item
    fn compare(&self, other: Option<&Item>) -> Ordering {
        match (self, other) {
            (Item::Int(digits), None) => {
                if digits == "0" {
                    Ordering::Equal
                } else {
                    Ordering::Greater
                }
            }
            (Item::Int(a), Some(Item::Int(b))) => compare_digits(a, b),
            (Item::Int(_), Some(_)) => Ordering::Greater,

            (Item::Str(value), None) => qualifier_rank(value).as_str().cmp(RELEASE_RANK),
            (Item::Str(_), Some(Item::Int(_))) => Ordering::Less,
            (Item::Str(a), Some(Item::Str(b))) => qualifier_rank(a).cmp(&qualifier_rank(b)),
            (Item::Str(_), Some(Item::List(_))) => Ordering::Less,

            (Item::List(items), None) => items
                .iter()
                .map(|item| item.compare(None))
                .find(|result| *result != Ordering::Equal)
                .unwrap_or(Ordering::Equal),
            (Item::List(_), Some(Item::Int(_))) => Ordering::Less,
            (Item::List(_), Some(Item::Str(_))) => Ordering::Greater,
            (Item::List(a), Some(Item::List(b))) => compare_lists(a, b),
        }
    }
}

fn compare_digits(a: &str, b: &str) -> Ordering {
    a.len().cmp(&b.len()).then_with(|| a.cmp(b))
}

fn compare_lists(left: &[Item], right: &[Item]) -> Ordering {
    let mut left = left.iter();
    let mut right = right.iter();
    loop {
        let result = match (left.next(), right.next()) {
            (None, None) => return Ordering::Equal,
            (Some(l), r) => l.compare(r),
            (None, Some(r)) => r.compare(None).reverse(),
        };
        if result != Ordering::Equal {
            return result;
        }
    }
}

/// Known qualifiers rank by position, unknown ones after all of them
fn qualifier_rank(qualifier: &str) -> String {
    match QUALIFIERS.iter().position(|q| *q == qualifier) {
        Some(index) => index.to_string(),
        None => format!("{}-{}", QUALIFIERS.len(), qualifier),
    }
}

/// Removes trailing null items, looking through nested lists
fn normalize(items: &mut Vec<Item>) {
    let mut i = items.len();
    while i > 0 {
        i -= 1;
        if items[i].is_null() {
            items.remove(i);
        } else if !matches!(items[i], Item::List(_)) {
            break;
        }
    }
}

/// A version string ordered with Maven's comparison rules
#[derive(Debug, Clone)]
pub struct MavenVersion {
    value: String,
    items: Vec<Item>,
}

impl MavenVersion {
    pub fn parse(version: &str) -> Self {
        let lower = version.to_lowercase();
        let chars: Vec<char> = lower.chars().collect();

        // Every new list is appended as the last item of the previous one,
        // so the nesting is a chain and can be kept as a stack.
        let mut stack: Vec<Vec<Item>> = vec![Vec::new()];
        let mut is_digit = false;
        let mut start = 0;

        for (i, &c) in chars.iter().enumerate() {
            if c == '.' || c == '-' {
                let item = if i == start {
                    Item::int("0")
                } else {
                    Item::parse(is_digit, &collect(&chars[start..i]))
                };
                push(&mut stack, item);
                start = i + 1;
                if c == '-' {
                    stack.push(Vec::new());
                }
            } else if c.is_ascii_digit() {
                if !is_digit && i > start {
                    push(&mut stack, Item::string(&collect(&chars[start..i]), true));
                    start = i;
                    stack.push(Vec::new());
                }
                is_digit = true;
            } else {
                if is_digit && i > start {
                    push(&mut stack, Item::parse(true, &collect(&chars[start..i])));
                    start = i;
                    stack.push(Vec::new());
                }
                is_digit = false;
            }
        }

        if chars.len() > start {
            push(&mut stack, Item::parse(is_digit, &collect(&chars[start..])));
        }

        while stack.len() > 1 {
            let mut child = stack.pop().unwrap_or_default();
            normalize(&mut child);
            push(&mut stack, Item::List(child));
        }
        let mut items = stack.pop().unwrap_or_default();
        normalize(&mut items);

        Self {
            value: version.to_string(),
            items,
        }
    }
}

fn collect(chars: &[char]) -> String {
    chars.iter().collect()
}

fn push(stack: &mut [Vec<Item>], item: Item) {
    if let Some(current) = stack.last_mut() {
        current.push(item);
    }
}

impl Ord for MavenVersion {
    fn cmp(&self, other: &Self) -> Ordering {
        compare_lists(&self.items, &other.items)
    }
}

impl PartialOrd for MavenVersion {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl PartialEq for MavenVersion {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for MavenVersion {}

impl fmt::Display for MavenVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.value)
    }
}

/// Compares two version strings, falling back to text order for equally ranked spellings
pub fn compare_versions(a: &str, b: &str) -> Ordering {
    MavenVersion::parse(a)
        .cmp(&MavenVersion::parse(b))
        .then_with(|| a.cmp(b))
}

/// Deduplicates and sorts versions in ascending Maven order
pub fn sort_versions(mut versions: Vec<String>) -> Vec<String> {
    versions.sort();
    versions.dedup();
    // Stable sort keeps the text order for versions ranked equal
    versions.sort_by_cached_key(|v| MavenVersion::parse(v));
    versions
}
