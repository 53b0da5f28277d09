//! End-to-end conversion with the bundled collaborators

use std::sync::Arc;

use pinmerge_engine::{
    ExecutionMode, PhraseRomanizer, PinyinConverter, PinmergeConfig, ReconciliationPolicy,
};

const LINES: &[&str] = &[
    "我们去银行取钱。",
    "Hello, world!",
    "他是行长; 谁知道呢?",
    "价格是100元, go go go!",
    "今天天气很好",
    "重新开始",
    "",
    "The quick brown fox",
];

fn converter(mode: ExecutionMode) -> PinyinConverter {
    PinyinConverter::builder()
        .execution_mode(mode)
        .threads(Some(4))
        .build()
        .unwrap()
}

#[test]
fn test_output_order_matches_input() {
    let out = converter(ExecutionMode::Sequential).convert(LINES, true).unwrap();
    assert_eq!(out.lines.len(), LINES.len());
    assert_eq!(out.metadata.lines_processed, LINES.len());
    assert!(out.lines[6].tokens.is_empty());
}

#[test]
fn test_parallel_matches_sequential() {
    let batch: Vec<&str> = LINES.iter().cycle().take(200).copied().collect();
    let sequential = converter(ExecutionMode::Sequential).convert(&batch, true).unwrap();
    let parallel = converter(ExecutionMode::Parallel).convert(&batch, true).unwrap();

    assert_eq!(sequential.lines, parallel.lines);
    assert_eq!(parallel.metadata.execution_mode, ExecutionMode::Parallel);
}

#[test]
fn test_adaptive_picks_sequential_for_small_batches() {
    let converter = PinyinConverter::builder()
        .parallel_threshold(1000)
        .build()
        .unwrap();
    let out = converter.convert(LINES, true).unwrap();
    assert_eq!(out.metadata.execution_mode, ExecutionMode::Sequential);
}

#[test]
fn test_ascii_line_passes_through() {
    let out = converter(ExecutionMode::Sequential)
        .convert(&["Hello, world!"], true)
        .unwrap();
    let line = &out.lines[0];
    assert!(line.aligned);
    assert_eq!(
        line.tokens,
        vec!["H", "e", "l", "l", "o", ",", " ", "w", "o", "r", "l", "d", "!"]
    );
}

#[test]
fn test_phrase_reading_is_used() {
    let out = converter(ExecutionMode::Sequential).convert(&["银行"], true).unwrap();
    assert_eq!(out.lines[0].tokens, vec![" ", "yin2", " ", "hang2"]);
}

#[test]
fn test_latin_words_keep_phrase_readings() {
    let out = converter(ExecutionMode::Sequential)
        .convert(&["我用iPhone去银行", "银行ok"], true)
        .unwrap();
    for line in &out.lines {
        assert!(line.aligned, "{:?}", line.tokens);
        assert!(!line.fell_back);
        assert!(line.tokens.iter().any(|t| t == "hang2"), "{:?}", line.tokens);
        assert!(!line.tokens.iter().any(|t| t == "xing2"));
    }
    assert_eq!(out.lines[0].consumed, 5);
    assert_eq!(out.lines[0].expected, 5);
    assert_eq!(out.metadata.mismatched_lines, 0);
}

#[test]
fn test_shei_is_corrected() {
    let out = converter(ExecutionMode::Sequential).convert(&["谁"], true).unwrap();
    assert_eq!(out.lines[0].tokens, vec![" ", "shui2"]);
}

#[test]
fn test_chinese_count_matches_stream_on_success() {
    let out = converter(ExecutionMode::Sequential).convert(LINES, true).unwrap();
    for (line, report) in LINES.iter().zip(&out.lines) {
        let han = line.chars().filter(|c| pinmerge_core::is_chinese(*c)).count();
        assert_eq!(report.consumed, han, "line {line:?}");
        if report.aligned {
            assert_eq!(report.expected, han, "line {line:?}");
        }
    }
}

#[test]
fn test_polyphone_flag_off_still_aligns() {
    let out = converter(ExecutionMode::Sequential)
        .convert(&["今天天气很好"], false)
        .unwrap();
    let tokens = &out.lines[0].tokens;
    // One boundary and one reading per character
    assert_eq!(tokens.len(), 12);
    assert!(tokens.iter().step_by(2).all(|t| t == " "));
}

#[test]
fn test_custom_context_aware_romanizer() {
    let dir = tempfile::tempdir().unwrap();
    let phrases = dir.path().join("phrases.txt");
    std::fs::write(&phrases, "取钱\tqu3 qian2\n").unwrap();
    let romanizer = PhraseRomanizer::from_files(&phrases, None).unwrap();

    let mut config = PinmergeConfig::default();
    config.corrections.readings.clear();

    let converter = PinyinConverter::builder()
        .context_aware(Arc::new(romanizer))
        .config(config)
        .policy(ReconciliationPolicy::Batch)
        .build()
        .unwrap();

    let out = converter.convert(&["取钱"], true).unwrap();
    assert_eq!(out.lines[0].tokens, vec![" ", "qu3", " ", "qian2"]);
    assert_eq!(out.metadata.policy, ReconciliationPolicy::Batch);
}

#[test]
fn test_json_report_shape() {
    let out = converter(ExecutionMode::Sequential).convert(&["银行"], true).unwrap();
    let json = serde_json::to_value(&out).unwrap();
    assert_eq!(json["lines"][0]["aligned"], true);
    assert_eq!(json["metadata"]["execution_mode"], "sequential");
    assert_eq!(json["metadata"]["policy"], "per-line");
}
