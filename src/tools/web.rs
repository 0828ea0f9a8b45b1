//! Web search tool.
//!
//! Queries the DuckDuckGo HTML endpoint, which needs no API key, and
//! extracts title/link/snippet triples from the result markup.

use std::sync::OnceLock;
use std::time::Duration;

use async_trait::async_trait;
use regex::Regex;
use serde_json::{json, Value};

use super::{require_str, Tool, ToolError};

const USER_AGENT: &str = "Mozilla/5.0 (compatible; SmolAgent/1.0)";

fn anchor_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(r#"(?s)<a[^>]*class="result__a"[^>]*href="([^"]*)"[^>]*>(.*?)</a>"#).unwrap()
    })
}

fn snippet_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r#"(?s)class="result__snippet"[^>]*>(.*?)</a>"#).unwrap())
}

/// Search the web for information on a query.
pub struct WebSearch;

#[async_trait]
impl Tool for WebSearch {
    fn name(&self) -> &str {
        "web_search"
    }

    fn description(&self) -> &str {
        "Search the web for information. Returns results with title, link and snippet. Parameters: {\"query\": \"...\", \"num_results\": 5}"
    }

    async fn execute(&self, args: Value) -> Result<Value, ToolError> {
        let query = require_str(&args, "query")?;
        let num_results = args["num_results"].as_u64().unwrap_or(5) as usize;

        let url = format!(
            "https://html.duckduckgo.com/html/?q={}",
            urlencoding::encode(query)
        );

        let client = reqwest::Client::builder()
            .user_agent(USER_AGENT)
            .timeout(Duration::from_secs(30))
            .build()
            .map_err(|e| ToolError::msg(format!("Error building HTTP client: {}", e)))?;

        let response = client
            .get(&url)
            .send()
            .await
            .map_err(|e| ToolError::msg(format!("Error performing search: {}", e)))?;

        let status = response.status();
        if !status.is_success() {
            return Err(ToolError::msg(format!("Search returned HTTP {}", status)));
        }

        let html = response
            .text()
            .await
            .map_err(|e| ToolError::msg(format!("Error reading search response: {}", e)))?;

        let results = extract_results(&html, num_results);
        if results.is_empty() {
            return Ok(json!(format!("No results found for: {}", query)));
        }

        Ok(Value::Array(results))
    }
}

/// Pull up to `limit` result entries out of the DuckDuckGo HTML page.
fn extract_results(html: &str, limit: usize) -> Vec<Value> {
    let snippets: Vec<String> = snippet_re()
        .captures_iter(html)
        .map(|c| clean_fragment(&c[1]))
        .collect();

    anchor_re()
        .captures_iter(html)
        .take(limit)
        .enumerate()
        .map(|(i, c)| {
            json!({
                "title": clean_fragment(&c[2]),
                "link": c[1].trim(),
                "snippet": snippets.get(i).cloned().unwrap_or_default(),
            })
        })
        .collect()
}

/// Strip tags and decode the handful of entities DuckDuckGo emits.
fn clean_fragment(fragment: &str) -> String {
    let mut text = String::with_capacity(fragment.len());
    let mut in_tag = false;
    for c in fragment.chars() {
        match c {
            '<' => in_tag = true,
            '>' => in_tag = false,
            _ if !in_tag => text.push(c),
            _ => {}
        }
    }

    text.replace("&amp;", "&")
        .replace("&lt;", "<")
        .replace("&gt;", ">")
        .replace("&quot;", "\"")
        .replace("&#39;", "'")
        .replace("&nbsp;", " ")
        .trim()
        .to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE: &str = r##"
        <div class="result__body">
          <a rel="nofollow" class="result__a" href="https://example.com/one">First <b>hit</b></a>
          <a class="result__snippet" href="#">Snippet &amp; more</a>
        </div>
        <div class="result__body">
          <a rel="nofollow" class="result__a" href="https://example.com/two">Second hit</a>
          <a class="result__snippet" href="#">Another snippet</a>
        </div>
    "##;

    #[test]
    fn extracts_title_link_snippet() {
        let results = extract_results(SAMPLE, 5);
        assert_eq!(results.len(), 2);
        assert_eq!(results[0]["title"], "First hit");
        assert_eq!(results[0]["link"], "https://example.com/one");
        assert_eq!(results[0]["snippet"], "Snippet & more");
        assert_eq!(results[1]["title"], "Second hit");
    }

    #[test]
    fn honors_result_limit() {
        let results = extract_results(SAMPLE, 1);
        assert_eq!(results.len(), 1);
    }

    #[test]
    fn empty_page_yields_no_results() {
        assert!(extract_results("<html></html>", 5).is_empty());
    }

    #[test]
    fn clean_fragment_strips_tags_and_entities() {
        assert_eq!(clean_fragment("<b>a</b> &lt;tag&gt;"), "a <tag>");
    }
}
