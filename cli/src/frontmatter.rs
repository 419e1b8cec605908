use anyhow::{Context, Result};
use serde::Deserialize;

/// Metadata carried at the top of a markdown article, between `---` fences.
/// Field names mirror the API payload.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Frontmatter {
    #[serde(default)]
    pub title: String,
    pub excerpt: Option<String>,
    pub tags: Option<Vec<String>>,
    pub status: Option<String>,
    pub author: Option<String>,
    pub read_time_minutes: Option<u32>,
    /// Target slug for updates. Without it the server assigns one on create.
    pub slug: Option<String>,
}

/// Split a markdown document into frontmatter and body.
///
/// A document without a leading `---` fence has no frontmatter and the whole
/// content becomes the body.
pub fn parse_article(content: &str) -> Result<(Frontmatter, String)> {
    let Some(rest) = content.strip_prefix("---\n").or_else(|| content.strip_prefix("---\r\n"))
    else {
        return Ok((Frontmatter::default(), content.to_string()));
    };

    let (raw_frontmatter, body) = split_at_closing_fence(rest)
        .context("unterminated frontmatter: missing closing --- fence")?;

    let frontmatter: Frontmatter =
        serde_yaml::from_str(raw_frontmatter).context("invalid frontmatter YAML")?;
    if frontmatter.title.trim().is_empty() {
        anyhow::bail!("frontmatter title is required");
    }

    Ok((frontmatter, body.trim_start_matches(['\r', '\n']).to_string()))
}

fn split_at_closing_fence(rest: &str) -> Option<(&str, &str)> {
    let mut offset = 0;
    for line in rest.split_inclusive('\n') {
        if line.trim_end() == "---" {
            return Some((&rest[..offset], &rest[offset + line.len()..]));
        }
        offset += line.len();
    }
    None
}
