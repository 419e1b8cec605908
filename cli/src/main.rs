mod client;
mod frontmatter;

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use serde_json::{json, Value};
use walkdir::WalkDir;

use crate::client::ContentClient;
use crate::frontmatter::{parse_article, Frontmatter};

#[derive(Parser)]
#[command(name = "curhat-sync", version, about = "Sync markdown articles to a CurhatIn content instance")]
struct Cli {
    /// Base URL of the content service.
    #[arg(long, env = "CURHAT_URL", default_value = "http://localhost:3000")]
    url: String,
    /// Service token for mutating operations.
    #[arg(long, env = "SERVICE_TOKEN", default_value = "dev-token")]
    token: String,
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Push a markdown file or every .md file under a directory.
    Push {
        /// Markdown file or directory.
        path: PathBuf,
    },
    /// List all articles, drafts included.
    List,
    /// Publish an article by slug.
    Publish { slug: String },
    /// Move a published article back to draft.
    Unpublish { slug: String },
    /// Delete an article by slug.
    Delete { slug: String },
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    let client = ContentClient::new(cli.url, cli.token);

    match cli.command {
        Commands::Push { path } => push(&client, &path).await,
        Commands::List => list(&client).await,
        Commands::Publish { slug } => set_status(&client, &slug, "published").await,
        Commands::Unpublish { slug } => set_status(&client, &slug, "draft").await,
        Commands::Delete { slug } => {
            client.delete_article(&slug).await?;
            println!("deleted {slug}");
            Ok(())
        },
    }
}

async fn push(client: &ContentClient, path: &Path) -> Result<()> {
    let files = collect_markdown(path)?;
    if files.is_empty() {
        anyhow::bail!("no markdown files under {}", path.display());
    }

    for file in files {
        let content = fs::read_to_string(&file)
            .with_context(|| format!("failed to read {}", file.display()))?;
        let (frontmatter, body) = parse_article(&content)
            .with_context(|| format!("failed to parse {}", file.display()))?;
        if frontmatter.title.trim().is_empty() {
            anyhow::bail!("{}: frontmatter title is required", file.display());
        }

        let payload = build_payload(&frontmatter, &body);
        let target = match &frontmatter.slug {
            Some(slug) => client.find_article(slug).await?.map(|_| slug.clone()),
            None => None,
        };

        let article = match target {
            Some(slug) => {
                let article = client.update_article(&slug, &payload).await?;
                println!("updated {} ({})", slug, file.display());
                article
            },
            None => {
                let article = client.create_article(&payload).await?;
                let assigned = article["slug"].as_str().unwrap_or("?");
                println!("created {} ({})", assigned, file.display());
                if let Some(hint) = stale_slug_hint(frontmatter.slug.as_deref(), assigned) {
                    println!("  note: {hint}");
                }
                article
            },
        };

        if article["status"] == "draft" {
            println!("  note: {} is a draft", article["slug"].as_str().unwrap_or("?"));
        }
    }
    Ok(())
}

async fn list(client: &ContentClient) -> Result<()> {
    let articles = client.list_articles().await?;
    if articles.is_empty() {
        println!("no articles");
        return Ok(());
    }
    for article in articles {
        println!(
            "{:<40} {:<10} {}",
            article["slug"].as_str().unwrap_or("?"),
            article["status"].as_str().unwrap_or("?"),
            article["title"].as_str().unwrap_or("?"),
        );
    }
    Ok(())
}

async fn set_status(client: &ContentClient, slug: &str, status: &str) -> Result<()> {
    let article = client
        .update_article(slug, &json!({ "status": status }))
        .await?;
    println!("{} is now {}", slug, article["status"].as_str().unwrap_or("?"));
    Ok(())
}

/// A frontmatter slug that probed not-found ends up as a create, and the
/// server assigns its own slug. Warn when the two differ, otherwise every
/// following push repeats the miss and creates another duplicate.
fn stale_slug_hint(requested: Option<&str>, assigned: &str) -> Option<String> {
    match requested {
        Some(requested) if requested != assigned => Some(format!(
            "slug '{requested}' was not found, so the server created '{assigned}'; \
             update the frontmatter slug or the next push will create a duplicate"
        )),
        _ => None,
    }
}

fn build_payload(frontmatter: &Frontmatter, body: &str) -> Value {
    let mut payload = json!({
        "title": frontmatter.title,
        "body": body,
    });
    let object = payload.as_object_mut().unwrap();
    if let Some(excerpt) = &frontmatter.excerpt {
        object.insert("excerpt".to_string(), json!(excerpt));
    }
    if let Some(tags) = &frontmatter.tags {
        object.insert("tags".to_string(), json!(tags));
    }
    if let Some(status) = &frontmatter.status {
        object.insert("status".to_string(), json!(status));
    }
    if let Some(author) = &frontmatter.author {
        object.insert("author".to_string(), json!(author));
    }
    if let Some(minutes) = frontmatter.read_time_minutes {
        object.insert("readTimeMinutes".to_string(), json!(minutes));
    }
    payload
}

fn collect_markdown(path: &Path) -> Result<Vec<PathBuf>> {
    if path.is_file() {
        return Ok(vec![path.to_path_buf()]);
    }
    let mut files = Vec::new();
    for entry in WalkDir::new(path).sort_by_file_name() {
        let entry = entry?;
        if entry.file_type().is_file()
            && entry.path().extension().is_some_and(|ext| ext == "md")
        {
            files.push(entry.into_path());
        }
    }
    Ok(files)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn collects_markdown_recursively() {
        let dir = tempfile::tempdir().unwrap();
        let nested = dir.path().join("nested");
        fs::create_dir(&nested).unwrap();
        fs::write(dir.path().join("a.md"), "isi").unwrap();
        fs::write(nested.join("b.md"), "isi").unwrap();
        fs::write(dir.path().join("skip.txt"), "bukan markdown").unwrap();

        let files = collect_markdown(dir.path()).unwrap();
        assert_eq!(files.len(), 2);
        assert!(files.iter().all(|file| file.extension().unwrap() == "md"));
    }

    #[test]
    fn stale_slug_is_called_out_after_create() {
        let hint = stale_slug_hint(Some("napas-lama"), "napas-dulu").unwrap();
        assert!(hint.contains("napas-lama"));
        assert!(hint.contains("napas-dulu"));

        assert!(stale_slug_hint(Some("napas-dulu"), "napas-dulu").is_none());
        assert!(stale_slug_hint(None, "napas-dulu").is_none());
    }

    #[test]
    fn payload_omits_absent_fields() {
        let frontmatter = Frontmatter {
            title: "Judul".to_string(),
            excerpt: None,
            tags: Some(vec!["napas".to_string()]),
            status: None,
            author: None,
            read_time_minutes: None,
            slug: None,
        };
        let payload = build_payload(&frontmatter, "isi");

        assert_eq!(payload["title"], "Judul");
        assert_eq!(payload["tags"], json!(["napas"]));
        assert!(payload.get("excerpt").is_none());
        assert!(payload.get("readTimeMinutes").is_none());
    }
}
