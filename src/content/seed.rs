//! Seed set the article store is initialized with on first access.

use chrono::{DateTime, Utc};

use crate::content::normalize::normalize_multiline;
use crate::models::article::{Article, ArticleStatus};

/// Fixed timestamp stamped on the seed records so the seed file is
/// reproducible run to run.
const SEED_STAMP: &str = "2026-02-15T10:00:00Z";

struct SeedEntry {
    id: &'static str,
    slug: &'static str,
    title: &'static str,
    excerpt: &'static str,
    body: &'static str,
    tags: &'static [&'static str],
    status: ArticleStatus,
    author: &'static str,
    read_time_minutes: u32,
}

// Bodies are embedded at compile time, matching how demo content ships.
const SEED_ENTRIES: &[SeedEntry] = &[
    SeedEntry {
        id: "article-001",
        slug: "napas-90-detik-saat-pikiran-ramai",
        title: "Napas 90 detik saat pikiran terasa ramai",
        excerpt: "Ritual singkat untuk menurunkan intensitas emosi sebelum kamu lanjut beraktivitas.",
        body: include_str!("../../seed_data/napas_90_detik.md"),
        tags: &["Breathing", "Grounding", "Overthinking"],
        status: ArticleStatus::Published,
        author: "Tim CurhatIn",
        read_time_minutes: 3,
    },
    SeedEntry {
        id: "article-002",
        slug: "template-jurnal-5-menit-sebelum-tidur",
        title: "Template jurnal 5 menit sebelum tidur",
        excerpt: "Format sederhana agar kamu menutup hari dengan lebih tenang dan terarah.",
        body: include_str!("../../seed_data/jurnal_5_menit.md"),
        tags: &["Journaling", "Sleep Hygiene", "Routine"],
        status: ArticleStatus::Published,
        author: "Tim CurhatIn",
        read_time_minutes: 4,
    },
    SeedEntry {
        id: "article-003",
        slug: "self-talk-lebih-lembut-tanpa-memanjakan-diri",
        title: "Self-talk lebih lembut tanpa memanjakan diri",
        excerpt: "Cara mengubah nada bicara ke diri sendiri agar tetap jujur tapi tidak menghukum.",
        body: include_str!("../../seed_data/self_talk_lembut.md"),
        tags: &["Self Compassion", "Mindset", "Emotional Safety"],
        status: ArticleStatus::Published,
        author: "Tim CurhatIn",
        read_time_minutes: 4,
    },
    SeedEntry {
        id: "article-004",
        slug: "grounding-54321-saat-cemas-meningkat",
        title: "Grounding 5-4-3-2-1 saat cemas meningkat",
        excerpt: "Teknik praktis untuk kembali hadir di momen sekarang ketika cemas memuncak.",
        body: include_str!("../../seed_data/grounding_54321.md"),
        tags: &["Grounding", "Anxiety", "Nervous System"],
        status: ArticleStatus::Published,
        author: "Tim CurhatIn",
        read_time_minutes: 3,
    },
    SeedEntry {
        id: "article-005",
        slug: "cek-batas-energi-sebelum-bilang-ya",
        title: "Cek batas energi sebelum bilang \"ya\"",
        excerpt: "Kerangka singkat untuk membantu kamu menilai kapasitas sebelum mengambil komitmen baru.",
        body: include_str!("../../seed_data/cek_batas_energi.md"),
        tags: &["Boundary", "Stress Management", "Decision Making"],
        status: ArticleStatus::Published,
        author: "Tim CurhatIn",
        read_time_minutes: 5,
    },
    SeedEntry {
        id: "article-006",
        slug: "draft-panduan-checkin-mingguan",
        title: "Draft: panduan check-in mingguan",
        excerpt: "Draft internal untuk format refleksi mingguan yang lebih konsisten.",
        body: include_str!("../../seed_data/draft_checkin_mingguan.md"),
        tags: &["Draft", "Check-in"],
        status: ArticleStatus::Draft,
        author: "Admin CurhatIn",
        read_time_minutes: 3,
    },
];

/// Materialize the embedded seed set.
pub fn seeded_articles() -> Vec<Article> {
    let stamp: DateTime<Utc> = SEED_STAMP.parse().expect("seed timestamp is valid RFC 3339");

    SEED_ENTRIES
        .iter()
        .map(|entry| Article {
            id: entry.id.to_string(),
            slug: entry.slug.to_string(),
            title: entry.title.to_string(),
            excerpt: entry.excerpt.to_string(),
            body: normalize_multiline(entry.body),
            tags: entry.tags.iter().map(|t| t.to_string()).collect(),
            status: entry.status,
            author: entry.author.to_string(),
            read_time_minutes: entry.read_time_minutes,
            created_at: stamp,
            updated_at: stamp,
            published_at: (entry.status == ArticleStatus::Published).then_some(stamp),
        })
        .collect()
}
