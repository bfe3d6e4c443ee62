use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, sqlx::FromRow)]
pub struct Topic {
    pub slug: String,
    pub description: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, sqlx::FromRow)]
pub struct User {
    pub username: String,
    pub name: String,
    pub avatar_url: Option<String>,
}

/// A single article, including the number of comments attached to it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, sqlx::FromRow)]
pub struct Article {
    pub article_id: i64,
    pub title: String,
    pub topic: String,
    pub author: String,
    pub body: String,
    #[serde(with = "timestamp")]
    pub created_at: DateTime<Utc>,
    pub votes: i64,
    pub article_img_url: String,
    pub comment_count: i64,
}

/// An article as it appears in a listing. The body is left out.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, sqlx::FromRow)]
pub struct ArticleSummary {
    pub author: String,
    pub title: String,
    pub article_id: i64,
    pub topic: String,
    #[serde(with = "timestamp")]
    pub created_at: DateTime<Utc>,
    pub votes: i64,
    pub article_img_url: String,
    pub comment_count: i64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, sqlx::FromRow)]
pub struct Comment {
    pub comment_id: i64,
    pub body: String,
    pub article_id: i64,
    pub author: String,
    pub votes: i64,
    #[serde(with = "timestamp")]
    pub created_at: DateTime<Utc>,
}

/// Timestamps go over the wire (and into the database) as RFC 3339 with
/// millisecond precision and a `Z` suffix, e.g. `2020-07-09T20:11:00.000Z`.
pub mod timestamp {
    use chrono::{DateTime, SecondsFormat, Utc};
    use serde::{Deserialize, Deserializer, Serializer};

    pub fn format(value: &DateTime<Utc>) -> String {
        value.to_rfc3339_opts(SecondsFormat::Millis, true)
    }

    pub fn serialize<S>(value: &DateTime<Utc>, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(&format(value))
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<DateTime<Utc>, D::Error>
    where
        D: Deserializer<'de>,
    {
        let raw = String::deserialize(deserializer)?;
        DateTime::parse_from_rfc3339(&raw)
            .map(|value| value.with_timezone(&Utc))
            .map_err(serde::de::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn timestamps_serialize_with_milliseconds() {
        let created_at = Utc.with_ymd_and_hms(2020, 7, 9, 20, 11, 0).unwrap();
        assert_eq!(timestamp::format(&created_at), "2020-07-09T20:11:00.000Z");
    }

    #[test]
    fn comment_serializes_flat() {
        let comment = Comment {
            comment_id: 1,
            body: "Nice".to_owned(),
            article_id: 9,
            author: "butter_bridge".to_owned(),
            votes: 16,
            created_at: Utc.with_ymd_and_hms(2020, 4, 6, 12, 17, 0).unwrap(),
        };
        let json = serde_json::to_value(&comment).unwrap();
        assert_eq!(json["created_at"], "2020-04-06T12:17:00.000Z");
        assert_eq!(json["article_id"], 9);

        let back: Comment = serde_json::from_value(json).unwrap();
        assert_eq!(back, comment);
    }
}
