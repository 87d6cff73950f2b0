//! Integration tests for the editing flow
//!
//! Tests cover:
//! - Admin login → new document → block editing → save → reopen
//! - Command routing through id-keyed surfaces after reorders
//! - Order invariant across long mutation sequences
//! - Legacy documents: rendering and one-way migration on first edit

use std::sync::Arc;
use std::time::Duration;

use portfolio_core::db::{DocumentStore, JsonFileStore};
use portfolio_core::models::{BlockType, Document, DocumentBody, DocumentKind};
use portfolio_core::operations::{BlockEditor, FormatCommand, MarkdownToken, TextArea};
use portfolio_core::render::{render_block, render_document};
use portfolio_core::services::{AdminGate, EditingSession};
use portfolio_core::PortfolioConfig;
use tempfile::TempDir;

fn orders(doc: &Document) -> Vec<usize> {
    doc.blocks().iter().map(|b| b.order()).collect()
}

// =========================================================================
// End-to-end editing
// =========================================================================

#[tokio::test]
async fn test_write_save_and_reopen_tutorial() {
    let tmp = TempDir::new().unwrap();
    let store: Arc<dyn DocumentStore> = Arc::new(JsonFileStore::new(tmp.path()));
    let config = PortfolioConfig {
        admin_password: Some("letmein".to_string()),
        ..Default::default()
    };
    let admin = AdminGate::from_config(&config).unwrap().login("letmein").unwrap();

    let mut session = EditingSession::new(
        store.clone(),
        Document::new(DocumentKind::Tutorial, "Getting started with Signals"),
        admin.clone(),
    )
    .with_config(&config);
    session.insert(BlockType::Text);
    session.insert(BlockType::Code);
    session.add_tag("Angular");
    session.add_tag("Angular");

    let mut editor: BlockEditor<TextArea> = BlockEditor::from_config(&config);
    editor.mount_document(session.document(), |b| TextArea::new(b.content.clone()));

    let text_id = session.document().blocks()[0].id.clone();
    editor.surface_mut(&text_id).unwrap().set_text("Signals are reactive");
    editor.sync_from_surface(session.document_mut(), 0);
    editor.surface_mut(&text_id).unwrap().select(12, 20);
    assert!(
        editor
            .apply_command(session.document_mut(), FormatCommand::Bold, 0)
            .await
    );

    let code_id = session.document().blocks()[1].id.clone();
    editor.surface_mut(&code_id).unwrap().set_text("const count = signal(0);");
    editor.sync_from_surface(session.document_mut(), 1);

    let id = session.publish().await.unwrap();

    let reopened = EditingSession::open(store.clone(), &id, admin).await.unwrap();
    let doc = reopened.document();
    assert!(doc.published);
    assert_eq!(doc.tags(), &["Angular".to_string()]);
    assert_eq!(doc.blocks()[0].content, "Signals are **reactive**");
    assert_eq!(doc.blocks()[1].language(), Some("javascript"));
    assert_eq!(doc.reading_time, 1);

    let html = render_document(doc);
    assert!(html.contains("Signals are <strong>reactive</strong>"));
    assert!(html.contains("<code class=\"language-javascript\">const count = signal(0);</code>"));
}

#[tokio::test]
async fn test_commands_follow_blocks_through_reorder() {
    let mut doc = Document::new(DocumentKind::Solution, "Routing");
    for _ in 0..3 {
        doc.insert(BlockType::Text);
    }
    for (i, text) in ["alpha", "beta", "gamma"].iter().enumerate() {
        doc.set_block_content(i, *text);
    }

    let mut editor = BlockEditor::new(Duration::from_millis(150));
    editor.mount_document(&doc, |b| TextArea::new(b.content.clone()));

    // gamma moves to the front; index 0 now names gamma's surface
    assert!(doc.reorder(2, 0));
    let gamma = doc.blocks()[0].id.clone();
    editor.surface_mut(&gamma).unwrap().select(0, 5);
    assert!(editor.apply_command(&mut doc, FormatCommand::Italic, 0).await);

    let contents: Vec<&str> = doc.blocks().iter().map(|b| b.content.as_str()).collect();
    assert_eq!(contents, vec!["*gamma*", "alpha", "beta"]);
}

#[test]
fn test_markdown_tokens_render_in_preview() {
    let mut doc = Document::new(DocumentKind::Tutorial, "Tokens");
    doc.insert(BlockType::Text);

    let mut editor = BlockEditor::new(Duration::from_millis(150));
    editor.mount_document(&doc, |_| TextArea::new("Intro"));

    assert!(editor.insert_markdown_token(&mut doc, MarkdownToken::BulletList, 0));
    let html = render_block(&doc.blocks()[0]);
    assert_eq!(html, "Intro<ul><li>List item</li></ul>");
}

// =========================================================================
// Order invariant
// =========================================================================

#[test]
fn test_order_invariant_over_mutation_sequences() {
    let mut doc = Document::new(DocumentKind::Tutorial, "Stress");
    let mut seed: u64 = 0x2545_f491_4f6c_dd1d;
    let mut next = move |bound: usize| {
        seed ^= seed << 13;
        seed ^= seed >> 7;
        seed ^= seed << 17;
        (seed % bound as u64) as usize
    };

    for _ in 0..500 {
        let len = doc.len();
        match next(3) {
            0 => {
                doc.insert(BlockType::ALL[next(BlockType::ALL.len())]);
            }
            1 => {
                doc.remove(next(len + 2));
            }
            _ => {
                doc.reorder(next(len + 2), next(len + 2));
            }
        }
        assert_eq!(orders(&doc), (0..doc.len()).collect::<Vec<_>>());
    }
}

#[test]
fn test_remove_then_reorder_example() {
    let mut doc = Document::new(DocumentKind::Tutorial, "ABC");
    for (i, name) in ["A", "B", "C"].iter().enumerate() {
        doc.insert(BlockType::Text);
        doc.set_block_content(i, *name);
    }
    doc.remove(1);
    let contents: Vec<&str> = doc.blocks().iter().map(|b| b.content.as_str()).collect();
    assert_eq!(contents, vec!["A", "C"]);
    assert_eq!(orders(&doc), vec![0, 1]);
}

// =========================================================================
// Legacy documents
// =========================================================================

#[test]
fn test_legacy_json_renders_and_migrates_on_edit() {
    let json = r##"{
        "title": "Old post",
        "kind": "solution",
        "content": "# Fix\nRun `npm ci`",
        "readTime": 4
    }"##;
    let mut doc: Document = serde_json::from_str(json).unwrap();
    assert!(doc.is_legacy());
    assert_eq!(doc.reading_time, 4);
    assert_eq!(
        render_document(&doc),
        "<div class=\"legacy-content\"><h1>Fix</h1>Run <code>npm ci</code></div>"
    );

    doc.insert(BlockType::Callout);
    assert!(!doc.is_legacy());
    assert_eq!(doc.len(), 2);
    assert_eq!(doc.blocks()[0].content, "# Fix\nRun `npm ci`");
    assert!(matches!(doc.body(), DocumentBody::Blocks(_)));
    assert!(render_document(&doc).contains("<h1>Fix</h1>Run <code>npm ci</code>"));
}
