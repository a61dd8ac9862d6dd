//! TMDB numeric ids collide across movies and TV, so canonical ids carry a
//! type tag: `movie-27205`, `tv-1399`.

use crate::capabilities::{IdScheme, ParsedId};
use crate::error::AdapterError;
use reel_models::MediaType;

pub struct TmdbIdScheme;

impl TmdbIdScheme {
    pub fn tag(media_type: MediaType) -> &'static str {
        match media_type {
            MediaType::Movie => "movie",
            MediaType::Series => "tv",
        }
    }

    fn from_tag(tag: &str) -> Option<MediaType> {
        match tag {
            "movie" => Some(MediaType::Movie),
            "tv" | "series" => Some(MediaType::Series),
            _ => None,
        }
    }

    /// Split a canonical id into its media type and numeric id.
    ///
    /// An explicit `hint` overrides the tag. A bare number without a hint is
    /// treated as a movie.
    pub fn split(id: &str, hint: Option<MediaType>) -> Result<(MediaType, u64), AdapterError> {
        let id = id.trim();
        let invalid = || AdapterError::InvalidId(format!("'{}' is not a TMDB id", id));

        let (tagged, number) = match id.split_once('-') {
            Some((tag, number)) => (Some(Self::from_tag(&tag.to_lowercase()).ok_or_else(invalid)?), number),
            None => (None, id),
        };

        if number.is_empty() || !number.bytes().all(|b| b.is_ascii_digit()) {
            return Err(invalid());
        }
        let numeric = number.parse::<u64>().map_err(|_| invalid())?;

        let media_type = hint.or(tagged).unwrap_or(MediaType::Movie);
        Ok((media_type, numeric))
    }
}

impl IdScheme for TmdbIdScheme {
    fn encode(&self, media_type: MediaType, native_id: &str) -> String {
        format!("{}-{}", Self::tag(media_type), native_id)
    }

    fn parse(&self, id: &str, hint: Option<MediaType>) -> Result<ParsedId, AdapterError> {
        let (media_type, numeric) = Self::split(id, hint)?;
        Ok(ParsedId {
            media_type: Some(media_type),
            native_id: numeric.to_string(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tagged_id_without_hint() {
        assert_eq!(TmdbIdScheme::split("tv-1399", None).unwrap(), (MediaType::Series, 1399));
        assert_eq!(TmdbIdScheme::split("movie-27205", None).unwrap(), (MediaType::Movie, 27205));
    }

    #[test]
    fn test_explicit_hint_wins_over_tag() {
        assert_eq!(
            TmdbIdScheme::split("tv-1399", Some(MediaType::Movie)).unwrap(),
            (MediaType::Movie, 1399)
        );
        assert_eq!(
            TmdbIdScheme::split("1399", Some(MediaType::Series)).unwrap(),
            (MediaType::Series, 1399)
        );
    }

    #[test]
    fn test_bare_number_defaults_to_movie() {
        assert_eq!(TmdbIdScheme::split("603", None).unwrap(), (MediaType::Movie, 603));
    }

    #[test]
    fn test_encode_then_parse_is_identity() {
        let scheme = TmdbIdScheme;
        for media_type in [MediaType::Movie, MediaType::Series] {
            for numeric in [1u64, 1399, 27205, u32::MAX as u64] {
                let id = scheme.encode(media_type, &numeric.to_string());
                let parsed = scheme.parse(&id, None).unwrap();
                assert_eq!(parsed.media_type, Some(media_type));
                assert_eq!(parsed.native_id, numeric.to_string());
            }
        }
    }

    #[test]
    fn test_rejects_garbage() {
        for id in ["", "tv-", "person-12", "tv-12a", "tt1375666", "-5", "movie--5"] {
            assert!(
                matches!(TmdbIdScheme::split(id, None), Err(AdapterError::InvalidId(_))),
                "{} should be rejected",
                id
            );
        }
    }
}
