//! Text analytics tools: summarization, entity extraction, sentiment
//! scoring and a small dictionary-based translator.

use std::sync::OnceLock;

use async_trait::async_trait;
use regex::Regex;
use serde_json::{json, Map, Value};

use super::{require_str, Tool, ToolError};

/// Summarize a text to a maximum length.
///
/// Takes the first sentence and truncates it to the cap; real deployments
/// would swap in a model-backed summarizer behind the same tool name.
pub struct SummarizeText;

#[async_trait]
impl Tool for SummarizeText {
    fn name(&self) -> &str {
        "summarize_text"
    }

    fn description(&self) -> &str {
        "Summarize a text to a maximum length in characters. Parameters: {\"text\": \"...\", \"max_length\": 200}"
    }

    async fn execute(&self, args: Value) -> Result<Value, ToolError> {
        let text = require_str(&args, "text")?;
        let max_length = args["max_length"].as_u64().unwrap_or(200) as usize;

        if text.chars().count() <= max_length {
            return Ok(json!(text));
        }

        let first_sentence = split_sentences(text)
            .into_iter()
            .next()
            .unwrap_or_else(|| text.to_string());

        Ok(json!(truncate_chars(&first_sentence, max_length)))
    }
}

fn sentence_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"[.!?]\s+").unwrap())
}

fn split_sentences(text: &str) -> Vec<String> {
    let mut sentences = Vec::new();
    let mut start = 0;
    for m in sentence_re().find_iter(text) {
        // Keep the terminating punctuation with the sentence.
        sentences.push(text[start..m.start() + 1].to_string());
        start = m.end();
    }
    if start < text.len() {
        sentences.push(text[start..].to_string());
    }
    sentences
}

fn truncate_chars(text: &str, max_length: usize) -> String {
    if text.chars().count() <= max_length {
        return text.to_string();
    }
    let keep = max_length.saturating_sub(3);
    let truncated: String = text.chars().take(keep).collect();
    format!("{}...", truncated)
}

/// Extract emails, URLs, dates and numbers from text with fixed patterns.
pub struct ExtractEntities;

#[async_trait]
impl Tool for ExtractEntities {
    fn name(&self) -> &str {
        "extract_entities"
    }

    fn description(&self) -> &str {
        "Extract named entities (emails, urls, dates, numbers) from text. Parameters: {\"text\": \"...\"}"
    }

    async fn execute(&self, args: Value) -> Result<Value, ToolError> {
        let text = require_str(&args, "text")?;

        let patterns: &[(&str, &Regex)] = &[
            ("emails", email_re()),
            ("urls", url_re()),
            ("dates", date_re()),
            ("numbers", number_re()),
        ];

        let mut entities = Map::new();
        for (kind, pattern) in patterns {
            let matches: Vec<Value> = pattern
                .find_iter(text)
                .map(|m| json!(m.as_str()))
                .collect();
            if !matches.is_empty() {
                entities.insert((*kind).to_string(), Value::Array(matches));
            }
        }

        Ok(Value::Object(entities))
    }
}

fn email_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(r"\b[A-Za-z0-9._%+-]+@[A-Za-z0-9.-]+\.[A-Za-z]{2,}\b").unwrap()
    })
}

fn url_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"https?://[^\s]+").unwrap())
}

fn date_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"\b\d{1,2}[/-]\d{1,2}[/-]\d{2,4}\b").unwrap())
}

fn number_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"\b\d+(?:\.\d+)?\b").unwrap())
}

const POSITIVE_WORDS: &[&str] = &[
    "good", "great", "excellent", "amazing", "wonderful", "best", "love", "happy",
];
const NEGATIVE_WORDS: &[&str] = &[
    "bad", "terrible", "awful", "horrible", "worst", "hate", "sad", "disappointed",
];

/// Score text sentiment with positive/negative word lists.
pub struct AnalyzeSentiment;

#[async_trait]
impl Tool for AnalyzeSentiment {
    fn name(&self) -> &str {
        "analyze_sentiment"
    }

    fn description(&self) -> &str {
        "Analyze the sentiment of a text. Returns a label and a score in [-1, 1]. Parameters: {\"text\": \"...\"}"
    }

    async fn execute(&self, args: Value) -> Result<Value, ToolError> {
        let text = require_str(&args, "text")?.to_lowercase();

        let positive_count = POSITIVE_WORDS.iter().filter(|w| text.contains(*w)).count();
        let negative_count = NEGATIVE_WORDS.iter().filter(|w| text.contains(*w)).count();

        let total = positive_count + negative_count;
        let score = if total == 0 {
            0.0
        } else {
            (positive_count as f64 - negative_count as f64) / total as f64
        };

        let label = if score > 0.3 {
            "positive"
        } else if score < -0.3 {
            "negative"
        } else {
            "neutral"
        };

        Ok(json!({
            "label": label,
            "score": score,
            "positive_count": positive_count,
            "negative_count": negative_count,
        }))
    }
}

const TRANSLATIONS: &[(&str, &[(&str, &str)])] = &[
    (
        "es",
        &[
            ("hello", "hola"),
            ("world", "mundo"),
            ("goodbye", "adiós"),
            ("thank you", "gracias"),
            ("yes", "sí"),
            ("no", "no"),
        ],
    ),
    (
        "fr",
        &[
            ("hello", "bonjour"),
            ("world", "monde"),
            ("goodbye", "au revoir"),
            ("thank you", "merci"),
            ("yes", "oui"),
            ("no", "non"),
        ],
    ),
    (
        "de",
        &[
            ("hello", "hallo"),
            ("world", "welt"),
            ("goodbye", "auf wiedersehen"),
            ("thank you", "danke"),
            ("yes", "ja"),
            ("no", "nein"),
        ],
    ),
];

/// Word-by-word translation against a tiny built-in dictionary.
pub struct TranslateText;

#[async_trait]
impl Tool for TranslateText {
    fn name(&self) -> &str {
        "translate_text"
    }

    fn description(&self) -> &str {
        "Translate text to a target language (es, fr, de). Parameters: {\"text\": \"...\", \"target_language\": \"es\"}"
    }

    async fn execute(&self, args: Value) -> Result<Value, ToolError> {
        let text = require_str(&args, "text")?;
        let target = args["target_language"].as_str().unwrap_or("es");

        let dictionary = TRANSLATIONS
            .iter()
            .find(|(lang, _)| *lang == target)
            .map(|(_, entries)| *entries)
            .ok_or_else(|| {
                let supported: Vec<&str> = TRANSLATIONS.iter().map(|(lang, _)| *lang).collect();
                ToolError::msg(format!(
                    "Unsupported target language '{}'. Supported languages: {}",
                    target,
                    supported.join(", ")
                ))
            })?;

        let mut result = text.to_lowercase();
        for (english, translated) in dictionary {
            let pattern = Regex::new(&format!(r"\b{}\b", regex::escape(english)))
                .map_err(|e| ToolError::msg(format!("Internal pattern error: {}", e)))?;
            result = pattern.replace_all(&result, *translated).into_owned();
        }

        Ok(json!(format!(
            "{} [Note: This is a simplified translation to {}]",
            result, target
        )))
    }
}
