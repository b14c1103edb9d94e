//! End-to-end integration tests for tana-paste.
//!
//! Each test feeds a realistic document through the public API and checks
//! the paste output as a user would see it.
//!
//! Run with:
//!   cargo test --test e2e -- --nocapture

use rstest::rstest;
use std::sync::Arc;
use tana_paste::{
    convert, convert_file, convert_to_files, ConversionConfig, ConversionOutput, DepthContext,
    DepthStrategy, DepthStrategyKind, TanaPasteError, DOCUMENT_MARKER,
};

// ── Test helpers ─────────────────────────────────────────────────────────────

fn convert_default(input: &str) -> ConversionOutput {
    convert(input, &ConversionConfig::default())
}

/// Single-chunk conversion, marker included.
fn paste(input: &str) -> String {
    let output = convert_default(input);
    assert_eq!(output.chunks.len(), 1, "expected a single chunk");
    output.chunks[0].text()
}

/// Assert the invariants every conversion must satisfy.
fn assert_paste_quality(output: &ConversionOutput, context: &str) {
    assert!(!output.chunks.is_empty(), "[{context}] no chunks");

    for (i, chunk) in output.chunks.iter().enumerate() {
        assert_eq!(chunk.index, i + 1, "[{context}] chunk numbering");
        assert_eq!(
            chunk.lines[0], DOCUMENT_MARKER,
            "[{context}] chunk {} must open with the marker",
            chunk.index
        );

        for line in chunk.body() {
            let first = line.lines().next().unwrap_or("");
            assert!(
                first.trim_start().starts_with("- "),
                "[{context}] not a bullet: {first:?}"
            );
            assert!(
                !line.chars().any(|c| ('\u{E000}'..='\u{E01F}').contains(&c)),
                "[{context}] placeholder left in {line:?}"
            );
        }
    }

    println!(
        "[{context}] ✓  {} nodes, {} chunk(s)",
        output.stats.nodes, output.stats.chunks
    );
}

/// Leading indentation of a rendered bullet, in levels.
fn depth_of(line: &str) -> usize {
    (line.len() - line.trim_start().len()) / 2
}

// ── Documents ────────────────────────────────────────────────────────────────

const MEETING_NOTES: &str = "\
# Weekly Sync
- Status: Draft
- Owner: Platform team
- Date: March 3rd, 2024

## Decisions
1. Ship the importer first
2. Defer the exporter
- Deadline: Week 12, 2024

## Follow-ups
- [ ] Send the recap to [the team](https://chat.example.test/team)
- [x] Book the room for March 10th, 2024, 2:30 PM
  - Note: ask about the *projector*
";

const AI_ANSWER: &str = "\
## Setting up the CLI

To get started, open a terminal:

```bash
cargo install tana-paste
tana-paste --help
```

### Options

- **Chunk size**: controls the paste limit
- Click the Settings button: it opens a dialog.
- ==Important== read [the guide](https://docs.example.test/guide) first
";

const VOICE_MEMO: &str = "\
# Standup
## Transcript
- Recording
  > [Ann](#startMs=0&endMs=4200): Shall we start?
  > [Ben](#startMs=4200&endMs=9100): Yes, I finished the parser.
  > [Ann](#startMs=9100&endMs=12000): Great. Status: green.
";

// ── Structure tests ──────────────────────────────────────────────────────────

#[test]
fn test_meeting_notes_structure() {
    let output = convert_default(MEETING_NOTES);
    assert_paste_quality(&output, "meeting");
    let text = output.chunks[0].text();

    assert!(text.contains("\n- Weekly Sync\n"));
    assert!(text.contains("\n  - Status::Draft\n"));
    assert!(text.contains("\n  - Owner::Platform team\n"));
    // A comma in the value reads as prose, so the date stays unfielded.
    assert!(text.contains("\n  - Date: [[date:2024-03-03]]\n"));
    assert!(text.contains("\n  - Decisions\n"));
    assert!(text.contains("\n    - Ship the importer first\n"));
    assert!(text.contains("\n    - Deadline: [[date:2024-W12]]\n"));
    assert!(text.contains(
        "\n    - [ ] Send the recap to the team https://chat.example.test/team\n"
    ));
    assert!(text.contains("\n    - [x] Book the room for [[date:2024-03-10 14:30]]\n"));
    assert!(text.contains("\n      - Note: ask about the __projector__"));
}

#[test]
fn test_header_depth_is_level_minus_one() {
    let text = paste("# One\n## Two\n### Three\n#### Four");
    let depths: Vec<usize> = text.lines().skip(1).map(depth_of).collect();
    assert_eq!(depths, vec![0, 1, 2, 3]);
}

#[test]
fn test_content_is_one_below_parent() {
    let text = paste("# Top\n- a\n  - b\n    - c\n- d");
    let depths: Vec<usize> = text.lines().skip(1).map(depth_of).collect();
    assert_eq!(depths, vec![0, 1, 2, 3, 1]);
}

#[test]
fn test_flat_document_uses_indentation() {
    let text = paste("alpha\n  beta\n    gamma\ndelta");
    assert_eq!(
        text,
        "%%tana%%\n  - alpha\n    - beta\n      - gamma\n  - delta"
    );
}

#[test]
fn test_over_indented_line_goes_to_root() {
    assert_eq!(paste("- a\n      - deep"), "%%tana%%\n  - a\n  - deep");
}

#[test]
fn test_new_h2_resets_h3_tracking() {
    let text = paste("# A\n## B\n### C\n## D\n### E\n- under E");
    let lines: Vec<&str> = text.lines().collect();
    assert_eq!(lines.last(), Some(&"      - under E"));
    assert_eq!(lines[5], "    - E");
}

// ── Code block tests ─────────────────────────────────────────────────────────

#[test]
fn test_ai_answer_code_block_is_one_bullet() {
    let output = convert_default(AI_ANSWER);
    assert_paste_quality(&output, "ai-answer");
    let body = output.chunks[0].body();

    let block: Vec<&String> = body.iter().filter(|l| l.contains("cargo install")).collect();
    assert_eq!(block.len(), 1);
    assert_eq!(
        block[0].as_str(),
        "      - cargo install tana-paste\ntana-paste --help"
    );
    assert_eq!(output.stats.code_blocks, 1);
}

#[rstest]
#[case::root("```\nlet x = 1;\n```")]
#[case::under_header("# H\n```\nlet x = 1;\n```")]
#[case::nested("- a\n  - b\n    ```\n    let x = 1;\n    ```")]
fn test_three_line_fence_is_one_bullet(#[case] input: &str) {
    let output = convert_default(input);
    let fence: Vec<&String> = output.chunks[0]
        .body()
        .iter()
        .filter(|l| l.contains("let x = 1;"))
        .collect();
    assert_eq!(fence.len(), 1);
    assert!(fence[0].trim_start().starts_with("- let x = 1;"));
    assert!(!output.chunks[0].text().contains("```"));
}

#[test]
fn test_unindented_fence_nests_under_list_item() {
    let text = paste("## Answer\n- Step one\n```\ncode\n```");
    assert_eq!(text, "%%tana%%\n  - Answer\n    - Step one\n      - code");
}

#[test]
fn test_fenced_table_keeps_separator_row() {
    let text = paste("- Example\n```\n| a | b |\n| --- | --- |\n| 1 | 2 |\n```");
    assert!(text.ends_with("\n    - | a | b |\n| --- | --- |\n| 1 | 2 |"));
}

#[test]
fn test_fence_hides_headers() {
    let text = paste("# Real\n```\n# not a header\n```\n## Also real");
    assert!(text.contains("\n  - # not a header\n"));
    assert!(text.ends_with("\n  - Also real"));
}

// ── Transform tests ──────────────────────────────────────────────────────────

#[test]
fn test_ai_answer_inline_markup() {
    let text = paste(AI_ANSWER);
    assert!(text.contains("- **Chunk size**: controls the paste limit"));
    assert!(text.contains("- Click the Settings button: it opens a dialog."));
    assert!(text.contains("- ^^Important^^ read the guide https://docs.example.test/guide first"));
}

#[test]
fn test_link_markup_is_stripped() {
    let text = paste("- see [Example](http://x.test)");
    assert!(text.contains("Example http://x.test"));
    assert!(!text.contains("[Example]"));
    assert!(!text.contains("(http://x.test)"));
}

#[test]
fn test_status_field() {
    assert_eq!(paste("- Status: Done"), "%%tana%%\n  - Status::Done");
}

#[test]
fn test_instructional_prose_is_unchanged() {
    assert_eq!(
        paste("Click the Settings button: it opens a dialog."),
        "%%tana%%\n  - Click the Settings button: it opens a dialog."
    );
}

#[rstest]
#[case("March 3rd, 2024", "[[date:2024-03-03]]")]
#[case("March 3rd, 2024, 2:30 PM", "[[date:2024-03-03 14:30]]")]
#[case("Week 5, 2024", "[[date:2024-W05]]")]
fn test_dates(#[case] input: &str, #[case] token: &str) {
    let text = paste(&format!("- {input}"));
    assert_eq!(text, format!("%%tana%%\n  - {token}"));
}

#[test]
fn test_existing_date_references_pass_through() {
    let output = convert_default("- due [[date:2024-01-01]] see [[Project X]]");
    assert_eq!(
        output.chunks[0].text(),
        "%%tana%%\n  - due [[date:2024-01-01]] see [[Project X]]"
    );
    assert_eq!(output.stats.dates, 0);
}

#[test]
fn test_image_becomes_field() {
    assert_eq!(
        paste("- ![Diagram](https://img.example.test/d.png)"),
        "%%tana%%\n  - Diagram::!Diagram https://img.example.test/d.png"
    );
}

#[test]
fn test_no_placeholders_in_hostile_input() {
    let input = "- **[a](http://a.test)** *b* ==c== [d] [[e]] https://f.test/*g*\n\
                 - Link: [x](http://x.test) on 2024-01-01 - 2024-01-05";
    let output = convert_default(input);
    assert_paste_quality(&output, "hostile");
    assert!(output.chunks[0]
        .text()
        .contains("Link: x http://x.test on [[date:2024-01-01/2024-01-05]]"));
}

#[test]
fn test_forged_placeholder_chars_are_stripped() {
    let text = paste("- a\u{E000}\u{E010}\u{E001}b");
    assert_eq!(text, "%%tana%%\n  - ab");
}

// ── Transcript tests ─────────────────────────────────────────────────────────

#[test]
fn test_voice_memo_speaker_lines() {
    let output = convert_default(VOICE_MEMO);
    assert_paste_quality(&output, "voice-memo");
    assert!(output.stats.transcript);

    let text = output.chunks[0].text();
    assert!(text.contains("\n      - Ann: Shall we start?\n"));
    assert!(text.contains("\n      - Ben: Yes, I finished the parser.\n"));
    // Speaker lines are never field-converted.
    assert!(text.contains("Ann: Great. Status: green."));
    assert_eq!(output.stats.fields, 0);
}

#[test]
fn test_voice_memo_section_promotion() {
    let config = ConversionConfig::builder()
        .depth_strategy(DepthStrategyKind::SectionPromotion)
        .build()
        .unwrap();
    let text = convert(VOICE_MEMO, &config).chunks[0].text();
    assert!(text.contains("\n    - Recording\n"));
    assert!(text.contains("\n    - Ann: Shall we start?\n"));
}

#[test]
fn test_two_speaker_lines_are_not_a_transcript() {
    let input = "> [Ann](#startMs=0&endMs=1): hi\n> [Ben](#startMs=1&endMs=2): hey";
    let output = convert_default(input);
    assert!(!output.stats.transcript);
    assert!(output.chunks[0]
        .text()
        .contains("\n  - > Ann #startMs=0&endMs=1: hi\n"));
}

#[test]
fn test_youtube_transcript_is_split() {
    let input = "## Video\n- Transcript: \"(0:00) Welcome back (0:42) Today we look at dates\"";
    let text = paste(input);
    assert_eq!(
        text,
        "%%tana%%\n  - Video\n    - Transcript: (0:00) Welcome back\n    - (0:42) Today we look at dates"
    );

    let config = ConversionConfig::builder()
        .split_transcript_timestamps(false)
        .build()
        .unwrap();
    assert_eq!(convert(input, &config).chunks[0].lines.len(), 3);
}

// ── Depth strategy tests ─────────────────────────────────────────────────────

#[test]
fn test_section_promotion_lifts_bold_labels() {
    let input = "## 2. Scope\n- Overview\n  **Definition:** what we build";
    let baseline = paste(input);
    assert!(baseline.ends_with("\n      - **Definition:** what we build"));

    let config = ConversionConfig::builder()
        .depth_strategy(DepthStrategyKind::SectionPromotion)
        .build()
        .unwrap();
    let promoted = convert(input, &config).chunks[0].text();
    assert!(promoted.ends_with("\n    - **Definition:** what we build"));
}

struct CapDepth(usize);

impl DepthStrategy for CapDepth {
    fn name(&self) -> &'static str {
        "cap"
    }

    fn depth(&self, ctx: &DepthContext<'_>) -> usize {
        ctx.baseline.min(self.0)
    }
}

#[test]
fn test_custom_depth_strategy() {
    let config = ConversionConfig::builder()
        .custom_depth_strategy(Arc::new(CapDepth(1)))
        .build()
        .unwrap();
    let text = convert("- a\n  - b\n    - c", &config).chunks[0].text();
    assert_eq!(text, "%%tana%%\n  - a\n  - b\n  - c");
}

// ── Chunking tests ───────────────────────────────────────────────────────────

#[test]
fn test_default_single_chunk() {
    let output = convert_default(MEETING_NOTES);
    assert_eq!(output.chunks.len(), 1);
    assert_eq!(output.stats.chunks, 1);
}

#[test]
fn test_one_over_threshold_gives_two_chunks() {
    let input: String = (0..20).map(|i| format!("- item {i:02}\n")).collect();
    let single = convert_default(&input);
    let full_len = single.chunks[0].text().chars().count();

    let config = ConversionConfig::builder()
        .max_chunk_size(full_len - 1)
        .build()
        .unwrap();
    let output = convert(&input, &config);
    assert_paste_quality(&output, "threshold");
    assert_eq!(output.chunks.len(), 2);

    let rejoined: Vec<String> = output
        .chunks
        .iter()
        .flat_map(|c| c.body().to_vec())
        .collect();
    assert_eq!(rejoined, single.chunks[0].body());

    for chunk in &output.chunks {
        assert!(chunk.text().chars().count() < full_len);
    }
}

#[test]
fn test_code_block_never_splits_across_chunks() {
    let code: String = (0..10).map(|i| format!("line {i}\n")).collect();
    let input = format!("- intro\n```\n{code}```\n- outro");
    let config = ConversionConfig::builder().max_chunk_size(40).build().unwrap();
    let output = convert(&input, &config);
    assert_paste_quality(&output, "fence-chunking");

    let holders: Vec<_> = output
        .chunks
        .iter()
        .filter(|c| c.body().iter().any(|l| l.contains("line 0")))
        .collect();
    assert_eq!(holders.len(), 1);
    assert!(holders[0].text().contains("line 9"));
}

#[test]
fn test_empty_input_is_marker_only() {
    for input in ["", "\n\n   \n"] {
        let output = convert_default(input);
        assert_eq!(output.texts(), vec![DOCUMENT_MARKER.to_string()]);
    }
}

// ── File I/O tests ───────────────────────────────────────────────────────────

#[test]
fn test_convert_to_files_writes_numbered_chunks() {
    let dir = tempfile::tempdir().unwrap();
    let input: String = (0..30).map(|i| format!("- entry {i}\n")).collect();
    let config = ConversionConfig::builder().max_chunk_size(100).build().unwrap();

    let paths = convert_to_files(&input, dir.path().join("notes.txt"), &config).unwrap();
    assert!(paths.len() > 1);
    for (i, path) in paths.iter().enumerate() {
        assert_eq!(
            path.file_name().unwrap().to_string_lossy(),
            format!("notes_{}.txt", i + 1)
        );
        let text = std::fs::read_to_string(path).unwrap();
        assert!(text.starts_with(DOCUMENT_MARKER));
        assert!(text.chars().count() <= 100);
    }
}

#[test]
fn test_convert_file_round_trip() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("meeting.md");
    std::fs::write(&path, MEETING_NOTES).unwrap();

    let from_file = convert_file(&path, &ConversionConfig::default()).unwrap();
    assert_eq!(from_file.texts(), convert_default(MEETING_NOTES).texts());
}

#[test]
fn test_convert_file_missing() {
    let err = convert_file("/definitely/missing.md", &ConversionConfig::default()).unwrap_err();
    assert!(matches!(err, TanaPasteError::FileNotFound { .. }));
    assert!(err.to_string().contains("missing.md"));
}

#[test]
fn test_output_serialises_to_json() {
    let output = convert_default(MEETING_NOTES);
    let json = serde_json::to_string(&output).unwrap();
    let back: ConversionOutput = serde_json::from_str(&json).unwrap();
    assert_eq!(back.chunks, output.chunks);
    assert_eq!(back.stats.fields, output.stats.fields);
}
