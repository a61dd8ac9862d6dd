use reel_models::{Record, SortMode};
use std::cmp::Ordering;

/// Leading year of a display year. `"2010–2012"` is 2010; anything without
/// digits is 0.
pub fn parse_year(year: &str) -> u32 {
    let digits: String = year.chars().filter(char::is_ascii_digit).take(4).collect();
    digits.parse().unwrap_or(0)
}

/// Case-insensitive ordering first, exact ordering only to break ties, so
/// "alien" and "Alien" sit together but the order is still total.
pub fn compare_titles(a: &str, b: &str) -> Ordering {
    a.to_lowercase()
        .cmp(&b.to_lowercase())
        .then_with(|| a.cmp(b))
}

/// Stable, page-local sort. Records with equal keys keep upstream order.
pub fn sort_records<T, F>(records: &mut [T], mode: SortMode, record_of: F)
where
    F: Fn(&T) -> &Record,
{
    match mode {
        SortMode::YearDesc => {
            records.sort_by(|a, b| parse_year(&record_of(b).year).cmp(&parse_year(&record_of(a).year)))
        }
        SortMode::YearAsc => {
            records.sort_by(|a, b| parse_year(&record_of(a).year).cmp(&parse_year(&record_of(b).year)))
        }
        SortMode::TitleAsc => records.sort_by(|a, b| compare_titles(&record_of(a).title, &record_of(b).title)),
        SortMode::TitleDesc => records.sort_by(|a, b| compare_titles(&record_of(b).title, &record_of(a).title)),
    }
}
