//! Tests for the Content Model operations on Document

#[cfg(test)]
mod tests {
    use crate::models::{
        BlockType, Difficulty, Document, DocumentBody, DocumentKind, DocumentPatch,
        ValidationError,
    };
    use serde_json::json;

    fn orders(doc: &Document) -> Vec<usize> {
        doc.blocks().iter().map(|b| b.order()).collect()
    }

    fn ids(doc: &Document) -> Vec<String> {
        doc.blocks().iter().map(|b| b.id.clone()).collect()
    }

    fn three_blocks() -> Document {
        let mut doc = Document::new(DocumentKind::Tutorial, "RxJS basics");
        doc.insert(BlockType::Text);
        doc.insert(BlockType::Code);
        doc.insert(BlockType::Image);
        doc
    }

    fn assert_dense(doc: &Document) {
        let expected: Vec<usize> = (0..doc.len()).collect();
        assert_eq!(orders(doc), expected);
    }

    #[test]
    fn test_insert_appends_with_next_order() {
        let mut doc = Document::new(DocumentKind::Solution, "Fix CORS");
        let first = doc.insert(BlockType::Text).order();
        let second = doc.insert(BlockType::Code);
        assert_eq!(first, 0);
        assert_eq!(second.order(), 1);
        assert_eq!(second.language(), Some("javascript"));
        assert_eq!(doc.len(), 2);
    }

    #[test]
    fn test_remove_middle_renormalizes() {
        let mut doc = three_blocks();
        let before = ids(&doc);

        let removed = doc.remove(1).unwrap();
        assert_eq!(removed.id, before[1]);
        assert_eq!(ids(&doc), vec![before[0].clone(), before[2].clone()]);
        assert_eq!(orders(&doc), vec![0, 1]);
    }

    #[test]
    fn test_remove_out_of_range_is_noop() {
        let mut doc = three_blocks();
        let before = doc.clone();
        assert!(doc.remove(3).is_none());
        assert_eq!(doc.blocks(), before.blocks());
    }

    #[test]
    fn test_reorder_moves_forward_and_back() {
        let mut doc = three_blocks();
        let original = ids(&doc);

        assert!(doc.reorder(0, 2));
        assert_eq!(
            ids(&doc),
            vec![original[1].clone(), original[2].clone(), original[0].clone()]
        );
        assert_dense(&doc);

        assert!(doc.reorder(2, 0));
        assert_eq!(ids(&doc), original);
        assert_dense(&doc);
    }

    #[test]
    fn test_reorder_rejects_out_of_range() {
        let mut doc = three_blocks();
        let before = ids(&doc);
        assert!(!doc.reorder(0, 3));
        assert!(!doc.reorder(5, 0));
        assert_eq!(ids(&doc), before);
    }

    #[test]
    fn test_reorder_same_index_is_accepted() {
        let mut doc = three_blocks();
        let before = ids(&doc);
        assert!(doc.reorder(1, 1));
        assert_eq!(ids(&doc), before);
    }

    #[test]
    fn test_order_invariant_over_mixed_operations() {
        let mut doc = Document::new(DocumentKind::Tutorial, "Mixed");
        let types = BlockType::ALL;
        for step in 0..60usize {
            match step % 5 {
                0 | 1 => {
                    doc.insert(types[step % types.len()]);
                }
                2 => {
                    doc.remove((step * 7) % (doc.len() + 2));
                }
                3 => {
                    let len = doc.len().max(1);
                    doc.reorder((step * 3) % len, (step * 5) % (len + 1));
                }
                _ => {
                    doc.remove(0);
                }
            }
            assert_dense(&doc);
        }
    }

    #[test]
    fn test_add_tag_dedups_and_trims() {
        let mut doc = Document::new(DocumentKind::Tutorial, "Tags");
        assert!(doc.add_tag("Angular"));
        assert!(!doc.add_tag("Angular"));
        assert!(!doc.add_tag("  Angular "));
        assert!(!doc.add_tag("   "));
        assert!(!doc.add_tag(""));
        assert!(doc.add_tag("angular"));
        assert_eq!(doc.tags(), &["Angular".to_string(), "angular".to_string()]);
    }

    #[test]
    fn test_remove_tag() {
        let mut doc = Document::new(DocumentKind::Tutorial, "Tags");
        doc.add_tag("RxJS");
        doc.add_tag("NgRx");
        assert!(doc.remove_tag("RxJS"));
        assert!(!doc.remove_tag("RxJS"));
        assert_eq!(doc.tags(), &["NgRx".to_string()]);
    }

    #[test]
    fn test_legacy_document_migrates_on_first_mutation() {
        let mut doc = Document::from_legacy_markdown(
            DocumentKind::Tutorial,
            "Old post",
            "# Intro\nSome text",
        );
        assert!(doc.is_legacy());
        assert!(doc.blocks().is_empty());

        doc.insert(BlockType::Code);
        assert!(!doc.is_legacy());
        assert_eq!(doc.len(), 2);
        assert_eq!(doc.blocks()[0].block_type(), BlockType::Text);
        assert_eq!(doc.blocks()[0].content, "# Intro\nSome text");
        assert_dense(&doc);
    }

    #[test]
    fn test_blank_legacy_migrates_to_empty() {
        let mut doc = Document::from_legacy_markdown(DocumentKind::Solution, "Empty", "  \n");
        assert!(doc.migrate_legacy());
        assert!(doc.is_empty());
        assert!(!doc.migrate_legacy());
    }

    #[test]
    fn test_declined_mutations_leave_legacy_body_alone() {
        let mut doc = Document::from_legacy_markdown(DocumentKind::Tutorial, "Old", "# hi");
        let before = doc.clone();

        assert!(doc.remove(5).is_none());
        assert!(!doc.reorder(0, 9));
        assert!(doc.is_legacy());
        assert_eq!(doc, before);
    }

    #[test]
    fn test_remove_on_legacy_migrates_then_removes() {
        let mut doc = Document::from_legacy_markdown(DocumentKind::Tutorial, "Old", "# hi");
        let removed = doc.remove(0).unwrap();
        assert_eq!(removed.content, "# hi");
        assert!(!doc.is_legacy());
        assert!(doc.is_empty());

        let mut blank = Document::from_legacy_markdown(DocumentKind::Solution, "Blank", " ");
        assert!(blank.remove(0).is_none());
        assert!(blank.is_legacy());
    }

    #[test]
    fn test_block_mut_edits_fields_but_not_order() {
        let mut doc = three_blocks();
        {
            let mut code = doc.block_mut(1).unwrap();
            assert_eq!(code.order(), 1);
            code.content_mut().push_str("let x = 1;");
            assert!(code.set_language("rust"));
            code.toggle_preview();
        }
        let image = doc.blocks()[2].kind.clone();
        *doc.block_mut(0).unwrap().kind_mut() = image;

        assert_eq!(doc.blocks()[1].content, "let x = 1;");
        assert_eq!(doc.blocks()[1].language(), Some("rust"));
        assert!(doc.blocks()[1].is_preview_shown());
        assert_eq!(doc.blocks()[0].block_type(), BlockType::Image);
        assert_dense(&doc);
    }

    #[test]
    fn test_block_mut_on_legacy_is_none() {
        let mut doc = Document::from_legacy_markdown(DocumentKind::Tutorial, "Old", "text");
        assert!(doc.block_mut(0).is_none());
        assert!(doc.is_legacy());
    }

    #[test]
    fn test_reading_time() {
        let mut doc = Document::new(DocumentKind::Tutorial, "Reading");
        doc.insert(BlockType::Text);
        doc.set_block_content(0, "word ".repeat(450));
        doc.insert(BlockType::Image);
        doc.set_block_content(1, "https://example.com/a-very-long-url.png");
        assert_eq!(doc.refresh_reading_time(200), 3);

        let mut empty = Document::new(DocumentKind::Tutorial, "Empty");
        assert_eq!(empty.refresh_reading_time(200), 1);
    }

    #[test]
    fn test_validate_requires_title() {
        let doc = Document::new(DocumentKind::Tutorial, "  ");
        assert_eq!(
            doc.validate(),
            Err(ValidationError::MissingField("title".to_string()))
        );
    }

    #[test]
    fn test_apply_patch() {
        let mut doc = three_blocks();
        doc.apply_patch(DocumentPatch {
            title: Some("Renamed".to_string()),
            tags: Some(vec!["A".to_string(), "A".to_string(), " ".to_string()]),
            difficulty: Some(Difficulty::Advanced),
            published: Some(true),
            ..Default::default()
        });
        assert_eq!(doc.title, "Renamed");
        assert_eq!(doc.tags(), &["A".to_string()]);
        assert_eq!(doc.difficulty, Difficulty::Advanced);
        assert!(doc.published);
        assert_eq!(doc.len(), 3);
    }

    #[test]
    fn test_deserialize_normalizes_sparse_orders() {
        let mut doc: Document = serde_json::from_value(json!({
            "title": "Stored",
            "kind": "solution",
            "readTime": 4,
            "tags": ["a", "a", "b"],
            "content": [
                {"id": "x", "type": "text", "content": "second", "order": 7},
                {"id": "y", "type": "text", "content": "first", "order": 2}
            ]
        }))
        .unwrap();
        doc.normalize();

        assert_eq!(doc.reading_time, 4);
        assert_eq!(doc.tags(), &["a".to_string(), "b".to_string()]);
        assert_eq!(doc.blocks()[0].content, "first");
        assert_eq!(orders(&doc), vec![0, 1]);
    }

    #[test]
    fn test_deserialize_legacy_string_body() {
        let doc: Document = serde_json::from_value(json!({
            "title": "Legacy",
            "content": "## Heading"
        }))
        .unwrap();
        assert_eq!(doc.body(), &DocumentBody::Legacy("## Heading".to_string()));
    }

    #[test]
    fn test_excerpt() {
        let mut doc = Document::new(DocumentKind::Tutorial, "Excerpt");
        doc.insert(BlockType::Text);
        doc.set_block_content(0, "**Signals** make change detection simpler");
        assert_eq!(doc.excerpt(100), "Signals make change detection simpler");
        assert_eq!(doc.excerpt(7), "Signals…");
    }
}
