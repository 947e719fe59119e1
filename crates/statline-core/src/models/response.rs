// Allow dead code: API response structs have fields for completeness
#![allow(dead_code)]

//! Raw wire types for the MLB Stats API.
//!
//! Every nested field is optional: a missing field at any depth must read
//! as "no data for this request", never a parse failure.

use serde::{Deserialize, Serialize};

// Response from /stats/leaders
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct LeadersResponse {
    #[serde(rename = "leagueLeaders", default)]
    pub league_leaders: Vec<LeaderCategory>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct LeaderCategory {
    #[serde(rename = "leaderCategory")]
    pub leader_category: Option<String>,
    #[serde(rename = "statGroup")]
    pub stat_group: Option<String>,
    pub season: Option<String>,
    #[serde(default)]
    pub leaders: Vec<RawLeader>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RawLeader {
    pub rank: Option<u32>,
    /// The API serializes every value as a string, e.g. "62" or ".306"
    pub value: Option<String>,
    pub person: Option<RawPerson>,
    pub team: Option<RawTeam>,
    pub league: Option<RawLeague>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RawPerson {
    pub id: Option<i64>,
    #[serde(rename = "fullName")]
    pub full_name: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RawTeam {
    pub id: Option<i64>,
    pub name: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RawLeague {
    pub id: Option<i64>,
    pub name: Option<String>,
    pub abbreviation: Option<String>,
}

// Response from /people/{id}?hydrate=stats(...)
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PeopleResponse {
    #[serde(default)]
    pub people: Vec<RawPlayer>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RawPlayer {
    pub id: Option<i64>,
    #[serde(rename = "fullName")]
    pub full_name: Option<String>,
    pub active: Option<bool>,
    #[serde(default)]
    pub stats: Vec<RawStatBlock>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RawStatBlock {
    #[serde(default)]
    pub splits: Vec<RawSplit>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RawSplit {
    pub season: Option<String>,
    /// Stat object keyed by remote parameter name; kept opaque so one
    /// type serves every statistic
    pub stat: Option<serde_json::Value>,
}

impl RawSplit {
    /// Extract this split's value for the given remote parameter,
    /// accepting both numeric and string encodings.
    pub fn stat_value(&self, remote_param: &str) -> Option<f64> {
        let field = self.stat.as_ref()?.get(remote_param)?;
        match field {
            serde_json::Value::Number(n) => n.as_f64(),
            serde_json::Value::String(s) => s.trim().parse::<f64>().ok(),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_leaders_response() {
        let json = r#"{
            "copyright": "MLB",
            "leagueLeaders": [{
                "leaderCategory": "homeRuns",
                "season": "2022",
                "statGroup": "hitting",
                "leaders": [
                    {"rank": 1, "value": "62",
                     "team": {"id": 147, "name": "New York Yankees"},
                     "league": {"id": 103, "name": "American League", "abbreviation": "AL"},
                     "person": {"id": 592450, "fullName": "Aaron Judge"}},
                    {"rank": 2, "value": "46",
                     "person": {"id": 592518, "fullName": "Kyle Schwarber"}}
                ]
            }]
        }"#;

        let resp: LeadersResponse = serde_json::from_str(json).unwrap();
        assert_eq!(resp.league_leaders.len(), 1);
        let leaders = &resp.league_leaders[0].leaders;
        assert_eq!(leaders.len(), 2);
        assert_eq!(
            leaders[0].person.as_ref().unwrap().full_name.as_deref(),
            Some("Aaron Judge")
        );
        assert_eq!(leaders[0].value.as_deref(), Some("62"));
        // Second leader has no team or league; parse must not care
        assert!(leaders[1].team.is_none());
    }

    #[test]
    fn test_parse_people_hydrate_response() {
        let json = r#"{
            "people": [{
                "id": 592450,
                "fullName": "Aaron Judge",
                "active": true,
                "stats": [{
                    "splits": [
                        {"season": "2021", "stat": {"homeRuns": 39, "avg": ".287"}},
                        {"season": "2022", "stat": {"homeRuns": 62, "avg": ".311"}}
                    ]
                }]
            }]
        }"#;

        let resp: PeopleResponse = serde_json::from_str(json).unwrap();
        let player = &resp.people[0];
        assert_eq!(player.stats[0].splits.len(), 2);
        assert_eq!(player.stats[0].splits[1].stat_value("homeRuns"), Some(62.0));
    }

    #[test]
    fn test_stat_value_handles_string_and_missing() {
        let split: RawSplit = serde_json::from_str(
            r#"{"season": "2004", "stat": {"avg": ".372", "hits": 262}}"#,
        )
        .unwrap();
        assert_eq!(split.stat_value("avg"), Some(0.372));
        assert_eq!(split.stat_value("hits"), Some(262.0));
        assert_eq!(split.stat_value("homeRuns"), None);

        let empty = RawSplit::default();
        assert_eq!(empty.stat_value("hits"), None);
    }

    #[test]
    fn test_unexpected_shape_degrades_to_empty() {
        // Entirely different payload still parses, yielding no leaders
        let resp: LeadersResponse = serde_json::from_str(r#"{"message": "maintenance"}"#).unwrap();
        assert!(resp.league_leaders.is_empty());
    }
}
