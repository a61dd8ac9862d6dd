use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Client-side ordering applied to the records of one page.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, Default)]
pub enum SortMode {
    #[default]
    #[serde(rename = "year-desc")]
    YearDesc,
    #[serde(rename = "year-asc")]
    YearAsc,
    #[serde(rename = "title-asc")]
    TitleAsc,
    #[serde(rename = "title-desc")]
    TitleDesc,
}

impl SortMode {
    pub const ALL: [SortMode; 4] = [
        SortMode::YearDesc,
        SortMode::YearAsc,
        SortMode::TitleAsc,
        SortMode::TitleDesc,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            SortMode::YearDesc => "year-desc",
            SortMode::YearAsc => "year-asc",
            SortMode::TitleAsc => "title-asc",
            SortMode::TitleDesc => "title-desc",
        }
    }
}

impl fmt::Display for SortMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SortMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim().to_lowercase().replace('_', "-");
        SortMode::ALL
            .into_iter()
            .find(|mode| mode.as_str() == wanted)
            .ok_or_else(|| {
                format!(
                    "Invalid sort mode: {}. Use 'year-desc', 'year-asc', 'title-asc' or 'title-desc'",
                    s
                )
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_and_display_agree() {
        for mode in SortMode::ALL {
            assert_eq!(mode.as_str().parse::<SortMode>().unwrap(), mode);
        }
        assert_eq!("title_asc".parse::<SortMode>().unwrap(), SortMode::TitleAsc);
        assert!("rating".parse::<SortMode>().is_err());
    }

    #[test]
    fn test_serde_uses_kebab_names() {
        assert_eq!(serde_json::to_string(&SortMode::YearAsc).unwrap(), "\"year-asc\"");
    }
}
