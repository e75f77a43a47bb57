use chrono::{NaiveDate, Utc};
use rand::Rng;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use uuid::Uuid;

/// One stored keyboard smashing together with everything derived from it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Smashing {
    #[serde(rename = "_id")]
    pub id: String,
    pub smashing_text: String,
    pub length: i64,
    pub letter_counts: Vec<LetterCount>,
    pub sentiment: f64,
    pub date: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LetterCount {
    pub letter: String,
    pub count: i64,
}

impl Smashing {
    /// Derives a fresh record from user text: random sentiment, today's UTC date.
    pub fn new(smashing_text: String) -> Self {
        let sentiment = rand::thread_rng().gen::<f64>();
        Self::with_metadata(smashing_text, sentiment, Utc::now().date_naive())
    }

    pub fn with_metadata(smashing_text: String, sentiment: f64, date: NaiveDate) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            length: smashing_text.chars().count() as i64,
            letter_counts: count_letters(&smashing_text),
            smashing_text,
            sentiment,
            date: date.format("%Y-%m-%d").to_string(),
        }
    }
}

/// Tallies every character, keeping entries in first-seen order.
pub fn count_letters(text: &str) -> Vec<LetterCount> {
    let mut tally: Vec<(char, i64)> = Vec::new();
    let mut slots: HashMap<char, usize> = HashMap::new();

    for c in text.chars() {
        match slots.get(&c) {
            Some(&slot) => tally[slot].1 += 1,
            None => {
                slots.insert(c, tally.len());
                tally.push((c, 1));
            }
        }
    }

    tally
        .into_iter()
        .map(|(letter, count)| LetterCount {
            letter: letter.to_string(),
            count,
        })
        .collect()
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateSmashingRequest {
    pub smashing_text: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum ResultCode {
    Ok,
    Error,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct CreateSmashingResponse {
    #[serde(rename = "_code")]
    pub code: ResultCode,
}
